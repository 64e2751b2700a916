use std::ops::Range;

use once_cell::sync::Lazy;
use regex::Regex;

// Words may carry internal dots, hyphens or apostrophes and trailing `+`/`#`
// so that `node.js`, `scikit-learn` and `c++` survive as single tokens.
// Everything else that is not whitespace becomes a one-character token.
static TOKEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\p{L}\p{N}_]+(?:[.'\-][\p{L}\p{N}_]+)*[+#]*|\S").unwrap());

/// Splits text into surface tokens.
pub fn tokenize(text: &str) -> Vec<&str> {
    TOKEN_RE.find_iter(text).map(|m| m.as_str()).collect()
}

fn is_sentence_terminal(token: &str) -> bool {
    matches!(token, "." | "!" | "?")
}

/// Partitions `tokens` into sentences, each ending after a terminal
/// punctuation token. A trailing run without a terminator is its own sentence.
pub fn split_sentences(tokens: &[&str]) -> Vec<Range<usize>> {
    let mut sentences = Vec::new();
    let mut start = 0;
    for (i, token) in tokens.iter().enumerate() {
        if is_sentence_terminal(token) {
            sentences.push(start..i + 1);
            start = i + 1;
        }
    }
    if start < tokens.len() {
        sentences.push(start..tokens.len());
    }
    sentences
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_words_and_punctuation() {
        assert_eq!(
            tokenize("Led a team, shipped v2."),
            vec!["Led", "a", "team", ",", "shipped", "v2", "."]
        );
    }

    #[test]
    fn test_tokenize_keeps_tech_names_whole() {
        assert_eq!(
            tokenize("C++, C#, node.js and scikit-learn"),
            vec!["C++", ",", "C#", ",", "node.js", "and", "scikit-learn"]
        );
    }

    #[test]
    fn test_tokenize_splits_slashes() {
        assert_eq!(tokenize("Python/Django"), vec!["Python", "/", "Django"]);
    }

    #[test]
    fn test_split_sentences() {
        let tokens = tokenize("One two. Three! Four");
        let sentences = split_sentences(&tokens);
        assert_eq!(sentences, vec![0..3, 3..5, 5..6]);
    }

    #[test]
    fn test_split_sentences_empty() {
        assert!(split_sentences(&[]).is_empty());
    }
}
