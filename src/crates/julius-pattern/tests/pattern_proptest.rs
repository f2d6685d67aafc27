//! Property-based tests for pattern compilation
//!
//! Generated patterns cover nested groups, alternatives and every repeat
//! form. Literals stay within kana so the default transliterator accepts them.

use julius_pattern::{format, generate_tree, parse, KanaTransliterator, Session};
use proptest::prelude::*;

/// Generate repeat suffixes, including none
fn repeat_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        Just("?".to_string()),
        Just("*".to_string()),
        Just("+".to_string()),
        (0u32..4).prop_map(|n| format!("{{{}}}", n)),
        (0u32..3, 0u32..3).prop_map(|(min, extra)| format!("{{{},{}}}", min, min + extra)),
    ]
}

/// Generate a literal or symbol, possibly repeated
fn leaf_strategy() -> impl Strategy<Value = String> {
    let leaf = prop_oneof![
        "[あいうえおかきくけこさしすせそなにぬねのんっ]{1,4}"
            .prop_map(|text| format!("\"{}\"", text)),
        "[A-Z][A-Z0-9_]{0,4}".prop_map(|name| format!("<{}>", name)),
    ];
    (leaf, repeat_strategy()).prop_map(|(leaf, repeat)| leaf + &repeat)
}

/// Generate an item: a leaf or a group of alternatives
fn item_strategy() -> impl Strategy<Value = String> {
    leaf_strategy().prop_recursive(3, 24, 4, |inner| {
        let sequence = prop::collection::vec(inner, 1..3).prop_map(|items| items.join(" "));
        (prop::collection::vec(sequence, 1..4), repeat_strategy())
            .prop_map(|(alternatives, repeat)| format!("({}){}", alternatives.join(" | "), repeat))
    })
}

/// Generate a whole pattern
fn pattern_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(item_strategy(), 1..4).prop_map(|items| items.join(" "))
}

/// Leading number of an identifier like `WORD_12_LOOP_0`
fn id_number(name: &str) -> Option<usize> {
    let rest = name
        .strip_prefix("WORD_")
        .or_else(|| name.strip_prefix("ROOT_"))?;
    rest.split('_').next()?.parse().ok()
}

#[cfg(test)]
mod proptest_tests {
    use super::*;

    proptest! {
        #[test]
        fn test_generated_patterns_parse(pattern in pattern_strategy()) {
            let result = parse(&pattern);
            prop_assert!(result.is_ok(), "Failed to parse: {}", pattern);
        }

        #[test]
        fn test_compilation_is_deterministic(pattern in pattern_strategy()) {
            let mut first = Session::default();
            let mut second = Session::default();
            first.add(&pattern).unwrap();
            second.add(&pattern).unwrap();

            prop_assert_eq!(first.grammar(), second.grammar());
            prop_assert_eq!(first.voca(), second.voca());
            prop_assert_eq!(first.next_id(), second.next_id());
        }

        #[test]
        fn test_format_is_stable(pattern in pattern_strategy()) {
            let tree = parse(&pattern).unwrap();
            let formatted = format(&tree);
            let reparsed = parse(&formatted);
            prop_assert!(reparsed.is_ok(), "Formatted pattern does not parse: {}", formatted);
            let reparsed = reparsed.unwrap();

            prop_assert_eq!(&format(&reparsed), &formatted);

            let translit = KanaTransliterator::new();
            let original = generate_tree(0, &tree, &translit).unwrap();
            let roundtrip = generate_tree(0, &reparsed, &translit).unwrap();
            prop_assert_eq!(original, roundtrip);
        }

        #[test]
        fn test_sequential_adds_use_fresh_ids(
            first in pattern_strategy(),
            second in pattern_strategy(),
        ) {
            let mut session = Session::default();
            session.add(&first).unwrap();
            let boundary = session.next_id();
            let grammar_len = session.grammar().len();
            let voca_len = session.voca().len();

            session.add(&second).unwrap();
            prop_assert!(session.next_id() > boundary);

            for line in session.grammar()[grammar_len..].lines() {
                let lhs = line.split('\t').next().unwrap();
                if lhs == "S" {
                    continue;
                }
                let n = id_number(lhs);
                prop_assert!(n.is_some(), "Unexpected rule name in: {}", line);
                prop_assert!(n.unwrap() >= boundary, "Reused id in: {}", line);
            }
            for line in session.voca()[voca_len..].lines() {
                if let Some(section) = line.strip_prefix("% ") {
                    let n = id_number(section);
                    prop_assert!(n.is_some(), "Unexpected section in: {}", line);
                    prop_assert!(n.unwrap() >= boundary, "Reused id in: {}", line);
                }
            }
        }

        #[test]
        fn test_symbols_never_reach_vocabulary(name in "[A-Z][A-Z0-9_]{0,6}") {
            let mut session = Session::default();
            session.add(&format!("<{}>", name)).unwrap();

            let expected_tail = format!("WORD_0\t: {}\n", name);
            prop_assert!(session.grammar().ends_with(&expected_tail));
            prop_assert_eq!(session.voca(), julius_pattern::DEFAULT_VOCA);
        }
    }
}
