//! Pattern notation compiler for the Julius speech recognizer
//!
//! This crate turns compact utterance patterns into the `.grammar` and `.voca`
//! files that Julius' `mkdfa` tool compiles into a recognition grammar.
//!
//! # Examples
//!
//! ```
//! use julius_pattern::Session;
//!
//! let mut session = Session::default();
//! session.add_symbol("COLOR", ["あか", "あお"]).unwrap();
//! session.add(r#""きょう" ("は" | "も")? <COLOR>"#).unwrap();
//!
//! assert!(session.grammar().contains("WORD_2\t: COLOR\n"));
//! assert!(session.voca().contains("% WORD_0\nきょう\tky o u\n"));
//! ```
//!
//! # Pattern Syntax
//!
//! - Quoted literals: `"おはよう"` or `'おはよう'`
//! - Symbol references: `<COLOR>`, defined with [`Session::add_symbol`]
//! - Sequences: `"a" "b"`
//! - Groups with alternatives: `("a" | "b" "c")`
//! - Repeats: `{n}`, `{min,max}`, `+`, `*`, `?`
//!
//! # Main Functions
//!
//! - [`parse`]: Parse a pattern into a [`Tree`]
//! - [`generate_tree`]: Lower a tree into grammar and vocabulary text
//! - [`format()`]: Render a tree back to pattern notation
//! - [`Session`]: Accumulate many patterns and symbols into one grammar

pub mod ast;
pub mod builder;
pub mod codegen;
pub mod error;
pub mod formatter;
pub mod lexer;
pub mod parser;
pub mod session;
pub mod span;
pub mod transliterate;


pub use ast::{Node, NodeId, NodeKind, Repeat, Tree};
pub use builder::AstBuilder;
pub use codegen::{generate, generate_tree, Generated};
pub use error::{CompileError, ParseError, Result, TransliterationError};
pub use formatter::format;
pub use lexer::{Lexer, Token};
pub use parser::{parse, Parser, MAX_GROUP_DEPTH};
pub use session::{is_valid_symbol_name, Session, DEFAULT_GRAMMAR, DEFAULT_VOCA};
pub use span::Span;
pub use transliterate::{KanaTransliterator, Transliterator};
