//! Lowering of pattern trees into Julius grammar rules and vocabulary blocks
//!
//! Every emitted leaf or group gets an identifier: `WORD_<n>` at the top level,
//! `<parent>_<n>` below a group. Repeats introduce a `<id>_LOOP` nonterminal
//! that stands for one occurrence; the original id then derives the allowed
//! counts of it. Literal leaves become vocabulary sections (the section name is
//! the terminal), symbol leaves become a rule pointing at the symbol's section.

use crate::ast::{Node, NodeId, NodeKind, Repeat, Tree};
use crate::error::{CompileError, Result};
use crate::transliterate::Transliterator;

/// Silence marker opening every sentence
pub const SILENCE_BEGIN: &str = "NS_B";
/// Silence marker closing every sentence
pub const SILENCE_END: &str = "NS_E";
/// Short-pause filler, also used to skip zero-count repeats
pub const NOISE: &str = "NOISE";
/// Start symbol of the grammar
pub const START: &str = "S";

/// Text produced for one chain of siblings
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Generated {
    pub grammar: String,
    pub voca: String,
    /// First identifier number not used by this output
    pub next_id: usize,
}

/// Generate a whole tree as a top-level sentence, numbering from `start_id`
pub fn generate_tree(start_id: usize, tree: &Tree, translit: &dyn Transliterator) -> Result<Generated> {
    generate(start_id, tree, tree.first(), None, translit)
}

/// Generate the sibling chain starting at `first`
///
/// With `parent == None` the chain is treated as a top-level sentence and
/// wrapped in `S : NS_B ROOT_n ... NS_E`. Otherwise identifiers are derived
/// from `parent` and no root rule is emitted.
pub fn generate(
    start_id: usize,
    tree: &Tree,
    first: NodeId,
    parent: Option<&str>,
    translit: &dyn Transliterator,
) -> Result<Generated> {
    Generator { tree, translit }.chain(start_id, first, parent)
}

struct Generator<'a> {
    tree: &'a Tree,
    translit: &'a dyn Transliterator,
}

impl<'a> Generator<'a> {
    fn chain(&self, start_id: usize, first: NodeId, parent: Option<&str>) -> Result<Generated> {
        let nodes = self.collect_chain(first)?;
        let mut out = Generated {
            next_id: start_id,
            ..Generated::default()
        };

        if parent.is_none() {
            root_rules(&mut out.grammar, start_id, &nodes);
        }

        for node in nodes {
            if node.is_placeholder() {
                continue;
            }
            if node.is_group() && !node.content.is_empty() {
                return Err(CompileError::internal(format!(
                    "node '{}' at {} is both a leaf and a group",
                    node.content, node.span
                )));
            }

            let id = match parent {
                None => format!("WORD_{}", out.next_id),
                Some(parent) => format!("{}_{}", parent, out.next_id),
            };
            let id = lower_repeat(&mut out.grammar, id, node.repeat);

            match node.child {
                Some(child) => {
                    self.group_rules(&mut out.grammar, &id, child)?;
                    let inner = self.chain(0, child, Some(id.as_str()))?;
                    out.grammar.push_str(&inner.grammar);
                    out.voca.push_str(&inner.voca);
                }
                None => match node.kind {
                    NodeKind::Literal => {
                        let phones = self.translit.transliterate(&node.content)?;
                        voca_section(&mut out.voca, &id, [(node.content.as_str(), phones.as_str())]);
                    }
                    NodeKind::Symbol => rule(&mut out.grammar, &id, &[node.content.as_str()]),
                },
            }

            out.next_id += 1;
        }

        Ok(out)
    }

    /// One `id : id_0 id_1 ...` line per alternative of the group's children
    fn group_rules(&self, grammar: &mut String, id: &str, first_child: NodeId) -> Result<()> {
        let mut alternatives: Vec<Vec<String>> = Vec::new();
        let mut current = Vec::new();
        let mut slot = 0;

        for node in self.collect_chain(first_child)? {
            if !node.is_placeholder() {
                current.push(format!("{}_{}", id, slot));
                slot += 1;
            }
            // The flag sits on the last node of an alternative
            if node.alt_boundary && !current.is_empty() {
                alternatives.push(std::mem::take(&mut current));
            }
        }
        if !current.is_empty() {
            alternatives.push(current);
        }

        if alternatives.is_empty() {
            return Err(CompileError::internal(format!("group {} has no members", id)));
        }
        for alternative in &alternatives {
            let symbols: Vec<&str> = alternative.iter().map(String::as_str).collect();
            rule(grammar, id, &symbols);
        }
        Ok(())
    }

    /// Resolve a sibling chain, rejecting dangling or cyclic links
    fn collect_chain(&self, first: NodeId) -> Result<Vec<&'a Node>> {
        let mut nodes = Vec::new();
        let mut cursor = Some(first);

        while let Some(id) = cursor {
            if nodes.len() > self.tree.len() {
                return Err(CompileError::internal("sibling chain does not terminate"));
            }
            let node = self
                .tree
                .get(id)
                .ok_or_else(|| CompileError::internal(format!("dangling node index {}", id.0)))?;
            nodes.push(node);
            cursor = node.next;
        }

        Ok(nodes)
    }
}

/// `S : NS_B ROOT_a ROOT_b ... NS_E` followed by `ROOT_n : WORD_n` for each item
fn root_rules(grammar: &mut String, start_id: usize, nodes: &[&Node]) {
    let roots: Vec<usize> = nodes
        .iter()
        .filter(|node| !node.is_placeholder())
        .enumerate()
        .map(|(offset, _)| start_id + offset)
        .collect();

    let mut sentence = vec![SILENCE_BEGIN.to_string()];
    sentence.extend(roots.iter().map(|n| format!("ROOT_{}", n)));
    sentence.push(SILENCE_END.to_string());
    let sentence: Vec<&str> = sentence.iter().map(String::as_str).collect();
    rule(grammar, START, &sentence);

    for n in roots {
        let word = format!("WORD_{}", n);
        rule(grammar, &format!("ROOT_{}", n), &[word.as_str()]);
    }
}

/// Emit the productions for `repeat` and return the id that stands for one occurrence
fn lower_repeat(grammar: &mut String, id: String, repeat: Repeat) -> String {
    let looped = format!("{}_LOOP", id);

    match repeat {
        Repeat::None => return id,
        Repeat::Range { min, max } => {
            for count in min..=max {
                if count == 0 {
                    rule(grammar, &id, &[NOISE]);
                } else {
                    rule(grammar, &id, &vec![looped.as_str(); count as usize]);
                }
            }
        }
        Repeat::ZeroOrMore => {
            rule(grammar, &id, &[NOISE]);
            rule(grammar, &id, &[looped.as_str()]);
            rule(grammar, &id, &[id.as_str(), looped.as_str()]);
        }
        Repeat::OneOrMore => {
            rule(grammar, &id, &[looped.as_str()]);
            rule(grammar, &id, &[id.as_str(), looped.as_str()]);
        }
    }

    looped
}

/// Append `lhs<TAB>: a b c`
pub fn rule(grammar: &mut String, lhs: &str, rhs: &[&str]) {
    grammar.push_str(lhs);
    grammar.push_str("\t: ");
    grammar.push_str(&rhs.join(" "));
    grammar.push('\n');
}

/// Append `% section` followed by `word<TAB>phones` lines
pub fn voca_section<'e>(voca: &mut String, section: &str, entries: impl IntoIterator<Item = (&'e str, &'e str)>) {
    voca.push_str("% ");
    voca.push_str(section);
    voca.push('\n');
    for (word, phones) in entries {
        voca.push_str(word);
        voca.push('\t');
        voca.push_str(phones);
        voca.push('\n');
    }
}
