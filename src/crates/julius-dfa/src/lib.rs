//! Drive Julius' grammar tools over compiled pattern grammars
//!
//! [`DfaBuilder`] writes a `.grammar`/`.voca` pair under a base name, runs
//! `mkdfa` to produce the `.dfa`, `.dict` and `.term` files, and can run
//! `generate` to sample sentences from the result.

pub mod config;
pub mod files;
pub mod runner;

pub use config::DfaConfig;
pub use files::{GrammarFiles, GENERATED_EXTENSIONS};
pub use runner::{ProcessRunner, ToolError, ToolOutput, ToolRunner};

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum DfaError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error(transparent)]
    Tool(#[from] ToolError),
}

pub type Result<T> = std::result::Result<T, DfaError>;

pub struct DfaBuilder<R = ProcessRunner> {
    config: DfaConfig,
    runner: R,
}

impl DfaBuilder<ProcessRunner> {
    pub fn new(config: DfaConfig) -> Self {
        Self::with_runner(config, ProcessRunner)
    }
}

impl Default for DfaBuilder<ProcessRunner> {
    fn default() -> Self {
        Self::new(DfaConfig::default())
    }
}

impl<R: ToolRunner> DfaBuilder<R> {
    pub fn with_runner(config: DfaConfig, runner: R) -> Self {
        DfaBuilder { config, runner }
    }

    pub fn config(&self) -> &DfaConfig {
        &self.config
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    pub fn set_base_name(&mut self, base_name: impl Into<PathBuf>) -> Result<()> {
        let base_name = base_name.into();
        if base_name.as_os_str().is_empty() {
            return Err(DfaError::Config("baseName must not be empty".to_string()));
        }
        self.config.base_name = base_name;
        Ok(())
    }

    pub fn files(&self) -> GrammarFiles {
        GrammarFiles::new(&self.config.base_name)
    }

    /// Write the grammar files and compile them with `mkdfa`
    pub fn mkdfa(&self, grammar: &str, voca: &str) -> Result<ToolOutput> {
        self.files().write(grammar, voca)?;
        let output = self.run_tool(&self.config.mkdfa_path)?;
        info!(base = %self.config.base_name.display(), "mkdfa finished");
        Ok(output)
    }

    /// Sample sentences from the compiled grammar with `generate`
    pub fn test(&self) -> Result<ToolOutput> {
        self.run_tool(&self.config.generate_path)
    }

    /// Remove every file generated for the current base name
    pub fn delete_files(&self) -> Result<Vec<PathBuf>> {
        let removed = self.files().delete()?;
        debug!(count = removed.len(), "deleted grammar files");
        Ok(removed)
    }

    fn run_tool(&self, program: &Path) -> Result<ToolOutput> {
        let args = [OsString::from(self.config.base_name.as_os_str())];
        Ok(self.runner.run(program, &args)?)
    }
}
