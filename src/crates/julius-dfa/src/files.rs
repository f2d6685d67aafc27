use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const GRAMMAR_EXTENSION: &str = "grammar";
pub const VOCA_EXTENSION: &str = "voca";

/// Everything `mkdfa` reads or writes for one base name
pub const GENERATED_EXTENSIONS: [&str; 5] = ["voca", "grammar", "dfa", "dict", "term"];

/// The family of files sharing a base path, e.g. `out/cmd.grammar`, `out/cmd.voca`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrammarFiles {
    base: PathBuf,
}

impl GrammarFiles {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        GrammarFiles { base: base.into() }
    }

    pub fn base(&self) -> &Path {
        &self.base
    }

    /// `<base>.<extension>`; an existing dot in the base name is kept
    pub fn path(&self, extension: &str) -> PathBuf {
        let mut name = OsString::from(self.base.as_os_str());
        name.push(".");
        name.push(extension);
        PathBuf::from(name)
    }

    pub fn grammar_path(&self) -> PathBuf {
        self.path(GRAMMAR_EXTENSION)
    }

    pub fn voca_path(&self) -> PathBuf {
        self.path(VOCA_EXTENSION)
    }

    /// Write the `.voca` and `.grammar` inputs of `mkdfa`
    pub fn write(&self, grammar: &str, voca: &str) -> io::Result<()> {
        let voca_path = self.voca_path();
        fs::write(&voca_path, voca)?;
        let grammar_path = self.grammar_path();
        fs::write(&grammar_path, grammar)?;

        debug!(
            voca = %voca_path.display(),
            grammar = %grammar_path.display(),
            "wrote grammar files"
        );
        Ok(())
    }

    /// Remove every generated file that exists; returns the removed paths
    pub fn delete(&self) -> io::Result<Vec<PathBuf>> {
        let mut removed = Vec::new();
        for extension in GENERATED_EXTENSIONS {
            let path = self.path(extension);
            match fs::remove_file(&path) {
                Ok(()) => removed.push(path),
                Err(e) if e.kind() == io::ErrorKind::NotFound => {
                    debug!(path = %path.display(), "nothing to delete");
                }
                Err(e) => return Err(e),
            }
        }
        Ok(removed)
    }
}
