//! Pure map function: record text to per-word partial counts
//!
//! A record is split on whitespace. Each token loses every ASCII punctuation
//! character and is lowercased. Tokens are emitted in source order, each
//! paired with a count of one.

use serde::{Deserialize, Serialize};

/// A single `(word, 1)` pair emitted for one occurrence of a word
pub type PartialCount = (String, u64);

/// What to do with a token that is empty once punctuation is stripped
///
/// `Discard` drops tokens such as `"-"` or `"..."` entirely. `Keep` emits
/// them as the empty-string word, which is what a literal strip-and-count
/// produces.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyTokenPolicy {
    #[default]
    Discard,
    Keep,
}

/// Pure: Normalize one whitespace-delimited token
///
/// # Examples
///
/// ```
/// use tally::mapreduce::pure::tokenize::normalize_token;
///
/// assert_eq!(normalize_token("Hello,"), "hello");
/// assert_eq!(normalize_token("don't"), "dont");
/// assert_eq!(normalize_token("--"), "");
/// ```
pub fn normalize_token(token: &str) -> String {
    token
        .chars()
        .filter(|c| !c.is_ascii_punctuation())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Pure: Map a record to its ordered `(word, 1)` pairs
///
/// Identical input always yields an identical sequence.
///
/// # Examples
///
/// ```
/// use tally::mapreduce::pure::tokenize::{map_record, EmptyTokenPolicy};
///
/// let pairs = map_record("Hello, hello!! HELLO", EmptyTokenPolicy::Discard);
/// assert_eq!(pairs.len(), 3);
/// assert!(pairs.iter().all(|(word, count)| word == "hello" && *count == 1));
/// ```
pub fn map_record(record: &str, policy: EmptyTokenPolicy) -> Vec<PartialCount> {
    record
        .split_whitespace()
        .map(normalize_token)
        .filter(|word| policy == EmptyTokenPolicy::Keep || !word.is_empty())
        .map(|word| (word, 1))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokenize(record: &str, policy: EmptyTokenPolicy) -> Vec<String> {
        map_record(record, policy)
            .into_iter()
            .map(|(word, _)| word)
            .collect()
    }

    #[test]
    fn test_sentence_is_lowercased_and_stripped() {
        assert_eq!(
            tokenize("This is sentence one.", EmptyTokenPolicy::Discard),
            vec!["this", "is", "sentence", "one"]
        );
    }

    #[test]
    fn test_repeated_word_with_punctuation() {
        let pairs = map_record("Hello, hello!! HELLO", EmptyTokenPolicy::Discard);
        assert_eq!(
            pairs,
            vec![
                ("hello".to_string(), 1),
                ("hello".to_string(), 1),
                ("hello".to_string(), 1),
            ]
        );
    }

    #[test]
    fn test_punctuation_only_token_vanishes_by_default() {
        assert_eq!(
            tokenize("red - blue", EmptyTokenPolicy::Discard),
            vec!["red", "blue"]
        );
    }

    #[test]
    fn test_keep_policy_emits_empty_word() {
        assert_eq!(
            tokenize("red - blue", EmptyTokenPolicy::Keep),
            vec!["red", "", "blue"]
        );
    }

    #[test]
    fn test_inner_punctuation_is_removed() {
        assert_eq!(
            tokenize("e-mail isn't (quoted)", EmptyTokenPolicy::Discard),
            vec!["email", "isnt", "quoted"]
        );
    }

    #[test]
    fn test_mixed_whitespace() {
        assert_eq!(
            tokenize("  tabs\tand\nnewlines  ", EmptyTokenPolicy::Discard),
            vec!["tabs", "and", "newlines"]
        );
    }

    #[test]
    fn test_unicode_whitespace_separates_tokens() {
        assert_eq!(
            tokenize("left\u{a0}right\u{2003}end", EmptyTokenPolicy::Discard),
            vec!["left", "right", "end"]
        );
    }

    #[test]
    fn test_empty_and_blank_records() {
        assert!(map_record("", EmptyTokenPolicy::Discard).is_empty());
        assert!(map_record("   \t ", EmptyTokenPolicy::Keep).is_empty());
    }

    #[test]
    fn test_non_ascii_letters_are_lowercased() {
        assert_eq!(
            tokenize("ÉCOLE Straße", EmptyTokenPolicy::Discard),
            vec!["école", "straße"]
        );
    }

    #[test]
    fn test_policy_deserializes_from_snake_case() {
        let policy: EmptyTokenPolicy = serde_json::from_str("\"keep\"").unwrap();
        assert_eq!(policy, EmptyTokenPolicy::Keep);
    }
}
