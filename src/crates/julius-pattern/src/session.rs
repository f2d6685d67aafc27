//! Accumulates grammar and vocabulary text across many patterns
//!
//! A [`Session`] owns the identifier counter, so patterns added one after
//! another never share nonterminal names. Each call either commits all of
//! its output or returns an error and leaves the session untouched.

use crate::codegen::{generate_tree, voca_section};
use crate::error::{CompileError, Result};
use crate::parser::parse;
use crate::transliterate::{KanaTransliterator, Transliterator};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt::Display;
use tracing::{debug, warn};

/// Grammar every session starts from: a sentence of silence and filler
pub const DEFAULT_GRAMMAR: &str = "S\t: NS_B NOISE NS_E\n";

/// Vocabulary sections for the silence and filler markers
pub const DEFAULT_VOCA: &str = "% NS_B\n<s>\tsilB\n% NS_E\n<s>\tsilE\n% NOISE\n<sp>\tsp\n";

static SYMBOL_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("symbol name pattern is valid"));

/// Returns true when `name` can be used as a vocabulary section name
pub fn is_valid_symbol_name(name: &str) -> bool {
    SYMBOL_NAME.is_match(name)
}

#[derive(Debug, Clone)]
pub struct Session<T = KanaTransliterator> {
    translit: T,
    next_id: usize,
    grammar: String,
    voca: String,
}

impl Default for Session<KanaTransliterator> {
    fn default() -> Self {
        Session::new(KanaTransliterator::new())
    }
}

impl<T: Transliterator> Session<T> {
    pub fn new(translit: T) -> Self {
        Session {
            translit,
            next_id: 0,
            grammar: DEFAULT_GRAMMAR.to_string(),
            voca: DEFAULT_VOCA.to_string(),
        }
    }

    /// Compile `pattern` and append it as another accepted sentence
    pub fn add(&mut self, pattern: &str) -> Result<()> {
        let tree = parse(pattern).map_err(|e| CompileError::syntax(pattern, e))?;
        let out = generate_tree(self.next_id, &tree, &self.translit)?;

        debug!(
            pattern,
            first_id = self.next_id,
            next_id = out.next_id,
            "compiled pattern"
        );
        self.grammar.push_str(&out.grammar);
        self.voca.push_str(&out.voca);
        self.next_id = out.next_id;
        Ok(())
    }

    /// Define the vocabulary section `name`, one entry per value
    ///
    /// Values are pronounced as written, e.g. `add_symbol("color", ["あか", "あお"])`.
    pub fn add_symbol<I, V>(&mut self, name: &str, values: I) -> Result<()>
    where
        I: IntoIterator<Item = V>,
        V: Display,
    {
        let values: Vec<String> = values.into_iter().map(|v| v.to_string()).collect();
        self.add_symbol_readings(name, values.iter().map(|v| (v.as_str(), v.as_str())))
    }

    /// Define the vocabulary section `name` from `(surface, reading)` pairs
    ///
    /// The surface form is what the recognizer reports; the reading is what
    /// gets transliterated, e.g. `("1", "いち")`.
    pub fn add_symbol_readings<'e, I>(&mut self, name: &str, entries: I) -> Result<()>
    where
        I: IntoIterator<Item = (&'e str, &'e str)>,
    {
        if !is_valid_symbol_name(name) {
            return Err(CompileError::InvalidSymbolName(name.to_string()));
        }

        let entries = entries
            .into_iter()
            .map(|(surface, reading)| Ok((surface, self.translit.transliterate(reading)?)))
            .collect::<Result<Vec<_>>>()?;

        if entries.is_empty() {
            warn!(symbol = name, "symbol has no values, skipping");
            return Ok(());
        }

        voca_section(
            &mut self.voca,
            name,
            entries.iter().map(|(surface, phones)| (*surface, phones.as_str())),
        );
        debug!(symbol = name, entries = entries.len(), "added symbol");
        Ok(())
    }

    /// Drop all added patterns and symbols; identifiers keep counting up
    pub fn reset(&mut self) {
        self.grammar.clear();
        self.grammar.push_str(DEFAULT_GRAMMAR);
        self.voca.clear();
        self.voca.push_str(DEFAULT_VOCA);
        debug!(next_id = self.next_id, "session reset");
    }

    /// Accumulated `.grammar` text
    pub fn grammar(&self) -> &str {
        &self.grammar
    }

    /// Accumulated `.voca` text
    pub fn voca(&self) -> &str {
        &self.voca
    }

    pub fn next_id(&self) -> usize {
        self.next_id
    }

    pub fn transliterator(&self) -> &T {
        &self.translit
    }
}
