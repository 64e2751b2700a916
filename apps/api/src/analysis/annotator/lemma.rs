//! Rule-based English lemmatizer: an irregular-form table plus suffix rules
//! for plurals, past tense and progressive forms. It is tuned for the verbs
//! and nouns that show up on resumes, not for general English.

use std::collections::HashMap;

use once_cell::sync::Lazy;

static IRREGULAR: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    [
        ("am", "be"), ("is", "be"), ("are", "be"), ("was", "be"), ("were", "be"),
        ("been", "be"), ("being", "be"), ("has", "have"), ("had", "have"),
        ("having", "have"), ("does", "do"), ("did", "do"), ("done", "do"),
        ("doing", "do"), ("goes", "go"), ("went", "go"), ("gone", "go"), ("going", "go"),
        ("led", "lead"), ("built", "build"), ("ran", "run"), ("made", "make"),
        ("wrote", "write"), ("written", "write"), ("writing", "write"),
        ("taught", "teach"), ("brought", "bring"), ("bought", "buy"),
        ("thought", "think"), ("sought", "seek"), ("won", "win"), ("grew", "grow"),
        ("grown", "grow"), ("drove", "drive"), ("driven", "drive"), ("began", "begin"),
        ("begun", "begin"), ("oversaw", "oversee"), ("overseen", "oversee"),
        ("spoke", "speak"), ("spent", "spend"), ("sent", "send"), ("held", "hold"),
        ("kept", "keep"), ("met", "meet"), ("paid", "pay"), ("sold", "sell"),
        ("told", "tell"), ("took", "take"), ("taken", "take"), ("gave", "give"),
        ("given", "give"), ("found", "find"), ("got", "get"), ("chose", "choose"),
        ("chosen", "choose"), ("used", "use"), ("using", "use"), ("children", "child"),
        ("people", "person"), ("men", "man"), ("women", "woman"),
        ("analyses", "analysis"), ("criteria", "criterion"), ("news", "news"),
        ("series", "series"), ("always", "always"), ("treated", "treat"),
        ("repeated", "repeat"),
    ]
    .into_iter()
    .collect()
});

const NON_INFLECTED_ING: &[&str] = &[
    "during", "morning", "evening", "ceiling", "nothing", "something", "anything",
    "everything", "wedding",
];

fn is_vowel(c: char) -> bool {
    matches!(c, 'a' | 'e' | 'i' | 'o' | 'u')
}

/// Returns the lemma of a single lowercase word. Non-alphabetic tokens are
/// returned unchanged.
pub fn lemmatize(word: &str) -> String {
    let lower = word.to_lowercase();
    if let Some(lemma) = IRREGULAR.get(lower.as_str()) {
        return (*lemma).to_string();
    }
    if lower.is_empty() || !lower.chars().all(char::is_alphabetic) {
        return lower;
    }
    let len = lower.chars().count();

    if len > 4 && lower.ends_with("ies") {
        return format!("{}y", &lower[..lower.len() - 3]);
    }
    if len > 4 && lower.ends_with("ied") {
        return format!("{}y", &lower[..lower.len() - 3]);
    }
    if len > 4 && lower.ends_with("ed") && !lower.ends_with("eed") {
        let stem = &lower[..lower.len() - 2];
        if has_vowel(stem) {
            return restore_stem(stem);
        }
    }
    if len > 5 && lower.ends_with("ing") && !NON_INFLECTED_ING.contains(&lower.as_str()) {
        let stem = &lower[..lower.len() - 3];
        if has_vowel(stem) {
            return restore_stem(stem);
        }
    }
    if len > 3 && lower.ends_with('s') {
        for suffix in ["sses", "xes", "ches", "shes"] {
            if lower.ends_with(suffix) {
                return lower[..lower.len() - 2].to_string();
            }
        }
        if !["ss", "us", "is"].iter().any(|s| lower.ends_with(s)) {
            return lower[..lower.len() - 1].to_string();
        }
    }
    lower
}

fn has_vowel(stem: &str) -> bool {
    stem.chars().any(|c| is_vowel(c) || c == 'y')
}

/// Undoes consonant doubling (`planned` → `plan`) or restores a dropped
/// silent `e` (`managed` → `manage`).
fn restore_stem(stem: &str) -> String {
    let chars: Vec<char> = stem.chars().collect();
    let n = chars.len();
    if n >= 4 {
        let (a, b) = (chars[n - 2], chars[n - 1]);
        if a == b && !is_vowel(b) && !matches!(b, 'l' | 's' | 'z' | 'f') {
            return chars[..n - 1].iter().collect();
        }
    }
    if needs_silent_e(&chars) {
        format!("{stem}e")
    } else {
        stem.to_string()
    }
}

fn needs_silent_e(chars: &[char]) -> bool {
    let n = chars.len();
    if n < 3 {
        return false;
    }
    let (c3, c2, c1) = (chars[n - 3], chars[n - 2], chars[n - 1]);
    match c1 {
        'v' | 'c' | 'u' => true,
        'z' => c2 != 'z',
        'g' => c2 != 'n' || matches!(c3, 'a' | 'e'),
        't' => matches!(c2, 'a' | 'u'),
        'd' | 'm' | 'k' => is_vowel(c2) && c2 != 'e' && !is_vowel(c3),
        'r' => match c2 {
            'u' => c3 != 'o',
            'i' => !matches!(c3, 'a' | 'e' | 'o'),
            'a' => !is_vowel(c3),
            _ => false,
        },
        'n' => c2 == 'i' && !is_vowel(c3),
        'l' => matches!(c2, 'b' | 'p' | 't' | 'd' | 'g' | 'k' | 'f' | 'z'),
        'p' => matches!(c2, 'a' | 'y') && !is_vowel(c3),
        's' => matches!(c2, 'a' | 'i') || (c2 == 'u' && c3 == 'a'),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_irregular_forms() {
        assert_eq!(lemmatize("led"), "lead");
        assert_eq!(lemmatize("Built"), "build");
        assert_eq!(lemmatize("was"), "be");
        assert_eq!(lemmatize("oversaw"), "oversee");
    }

    #[test]
    fn test_past_tense_with_silent_e() {
        assert_eq!(lemmatize("managed"), "manage");
        assert_eq!(lemmatize("created"), "create");
        assert_eq!(lemmatize("optimized"), "optimize");
        assert_eq!(lemmatize("analyzed"), "analyze");
        assert_eq!(lemmatize("improved"), "improve");
        assert_eq!(lemmatize("reduced"), "reduce");
        assert_eq!(lemmatize("streamlined"), "streamline");
        assert_eq!(lemmatize("secured"), "secure");
        assert_eq!(lemmatize("provided"), "provide");
    }

    #[test]
    fn test_past_tense_without_silent_e() {
        assert_eq!(lemmatize("developed"), "develop");
        assert_eq!(lemmatize("designed"), "design");
        assert_eq!(lemmatize("trained"), "train");
        assert_eq!(lemmatize("monitored"), "monitor");
        assert_eq!(lemmatize("deployed"), "deploy");
    }

    #[test]
    fn test_consonant_doubling() {
        assert_eq!(lemmatize("planned"), "plan");
        assert_eq!(lemmatize("running"), "run");
        assert_eq!(lemmatize("shipped"), "ship");
        assert_eq!(lemmatize("added"), "add");
    }

    #[test]
    fn test_progressive_forms() {
        assert_eq!(lemmatize("designing"), "design");
        assert_eq!(lemmatize("managing"), "manage");
        assert_eq!(lemmatize("leading"), "lead");
        assert_eq!(lemmatize("string"), "string");
        assert_eq!(lemmatize("during"), "during");
    }

    #[test]
    fn test_plurals() {
        assert_eq!(lemmatize("skills"), "skill");
        assert_eq!(lemmatize("studies"), "study");
        assert_eq!(lemmatize("processes"), "process");
        assert_eq!(lemmatize("matches"), "match");
        assert_eq!(lemmatize("status"), "status");
        assert_eq!(lemmatize("analysis"), "analysis");
    }

    #[test]
    fn test_non_alphabetic_tokens_unchanged() {
        assert_eq!(lemmatize("node.js"), "node.js");
        assert_eq!(lemmatize("C++"), "c++");
        assert_eq!(lemmatize("2020"), "2020");
    }
}
