use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use julius_dfa::GrammarFiles;
use julius_pattern::{format, parse, Session};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "julius-pattern")]
#[command(about = "Compile utterance patterns into Julius grammar files", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a pattern
    Validate {
        /// Pattern to validate
        pattern: String,
    },
    /// Print a pattern in canonical form
    Fmt {
        /// Pattern to format
        pattern: String,
    },
    /// Dump the syntax tree of a pattern
    Ast {
        /// Pattern to parse
        pattern: String,

        /// Output format (json or debug)
        #[arg(short, long, default_value = "debug")]
        output_format: String,
    },
    /// Compile patterns into .grammar and .voca text
    Compile {
        /// Patterns to compile, in order
        #[arg(required = true)]
        patterns: Vec<String>,

        /// JSON file of symbol definitions
        #[arg(short, long)]
        symbols: Option<PathBuf>,

        /// Write <OUT>.grammar and <OUT>.voca instead of printing
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Compile patterns and build the DFA with mkdfa
    #[cfg(feature = "dfa")]
    Mkdfa {
        /// Patterns to compile, in order
        #[arg(required = true)]
        patterns: Vec<String>,

        /// JSON file with baseName, mkdfaPath and generatePath
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// JSON file of symbol definitions
        #[arg(short, long)]
        symbols: Option<PathBuf>,
    },
    /// Sample sentences from a built DFA with generate
    #[cfg(feature = "dfa")]
    Test {
        /// JSON file with baseName, mkdfaPath and generatePath
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

/// A symbol value, either pronounced as written or with an explicit reading
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SymbolValue {
    Plain(String),
    Reading { surface: String, reading: String },
}

fn load_symbols(session: &mut Session, path: &Path) -> Result<()> {
    let source = fs::read_to_string(path)
        .with_context(|| format!("Failed to read symbol file '{}'", path.display()))?;
    let symbols: BTreeMap<String, Vec<SymbolValue>> = serde_json::from_str(&source)
        .with_context(|| format!("Invalid symbol file '{}'", path.display()))?;

    for (name, values) in &symbols {
        let entries = values.iter().map(|value| match value {
            SymbolValue::Plain(text) => (text.as_str(), text.as_str()),
            SymbolValue::Reading { surface, reading } => (surface.as_str(), reading.as_str()),
        });
        session
            .add_symbol_readings(name, entries)
            .with_context(|| format!("Failed to add symbol '{}'", name))?;
    }
    Ok(())
}

fn compile(patterns: &[String], symbols: Option<&Path>) -> Result<Session> {
    let mut session = Session::default();
    if let Some(path) = symbols {
        load_symbols(&mut session, path)?;
    }
    for pattern in patterns {
        session.add(pattern)?;
    }
    Ok(session)
}

/// Write `<base>.grammar` and `<base>.voca`; returns the two paths
fn write_compiled(session: &Session, base: &Path) -> Result<(PathBuf, PathBuf)> {
    let files = GrammarFiles::new(base);
    files
        .write(session.grammar(), session.voca())
        .with_context(|| format!("Failed to write grammar files for '{}'", base.display()))?;
    Ok((files.grammar_path(), files.voca_path()))
}

#[cfg(feature = "dfa")]
fn load_config(path: Option<&Path>) -> Result<julius_dfa::DfaConfig> {
    match path {
        Some(path) => julius_dfa::DfaConfig::from_file(path)
            .with_context(|| format!("Failed to load config '{}'", path.display())),
        None => Ok(julius_dfa::DfaConfig::default()),
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { pattern } => match parse(&pattern) {
            Ok(_) => {
                println!("✓ Pattern is valid");
                Ok(())
            }
            Err(e) => {
                eprintln!("✗ Parse error: {}", e);
                std::process::exit(1);
            }
        },
        Commands::Fmt { pattern } => match parse(&pattern) {
            Ok(tree) => {
                println!("{}", format(&tree));
                Ok(())
            }
            Err(e) => {
                eprintln!("✗ Parse error: {}", e);
                std::process::exit(1);
            }
        },
        Commands::Ast {
            pattern,
            output_format,
        } => match parse(&pattern) {
            Ok(tree) => {
                match output_format.as_str() {
                    "json" => {
                        let json = serde_json::to_string_pretty(&tree)?;
                        println!("{}", json);
                    }
                    _ => {
                        println!("{:#?}", tree);
                    }
                }
                Ok(())
            }
            Err(e) => {
                eprintln!("✗ Parse error: {}", e);
                std::process::exit(1);
            }
        },
        Commands::Compile {
            patterns,
            symbols,
            out,
        } => {
            let session = compile(&patterns, symbols.as_deref())?;

            match out {
                Some(base) => {
                    let (grammar, voca) = write_compiled(&session, &base)?;
                    println!("Wrote {} and {}", grammar.display(), voca.display());
                }
                None => {
                    println!("{}", session.grammar());
                    print!("{}", session.voca());
                }
            }
            Ok(())
        }
        #[cfg(feature = "dfa")]
        Commands::Mkdfa {
            patterns,
            config,
            symbols,
        } => {
            use julius_dfa::DfaBuilder;

            let config = load_config(config.as_deref())?;
            let session = compile(&patterns, symbols.as_deref())?;

            let builder = DfaBuilder::new(config);
            let output = builder.mkdfa(session.grammar(), session.voca())?;
            print!("{}", output.stdout);
            eprint!("{}", output.stderr);
            Ok(())
        }
        #[cfg(feature = "dfa")]
        Commands::Test { config } => {
            use julius_dfa::DfaBuilder;

            let config = load_config(config.as_deref())?;
            let output = DfaBuilder::new(config).test()?;
            print!("{}", output.stdout);
            eprint!("{}", output.stderr);
            Ok(())
        }
    }
}
