//! Text normalization applied to extracted documents before annotation.

use once_cell::sync::Lazy;
use regex::Regex;

/// Default cap on cleaned text length, in characters.
pub const DEFAULT_MAX_CHARS: usize = 2000;

/// Passes are length non-increasing, so this bound is never reached in practice.
const MAX_PASSES: usize = 8;

static BOILERPLATE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)P\.T\.O\s*\d*",
        r"(?i)\b(?:Prepared by|Author|Dr\.|Prof\.|Department of|University of|College of|Institute of)\b.*?\n",
        r"(?i)Page\s+\d+\s+of\s+\d+",
        r"(?i)\b(?:Syllabus|Course Code|Module [IVX]+)\b.*?\n",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

static BLANK_LINES_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{2,}").unwrap());
static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());
static TERMINAL_PUNCT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[?!.]{2,}").unwrap());
static WORD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\w+").unwrap());

/// Cleans text with the default length cap.
pub fn clean(text: &str) -> String {
    clean_with_limit(text, DEFAULT_MAX_CHARS)
}

/// Strips boilerplate, collapses whitespace, punctuation runs and stuttered
/// words, then caps the result at `max_chars` characters on a sentence
/// boundary where possible. The output is a fixed point: cleaning it again
/// returns it unchanged.
pub fn clean_with_limit(text: &str, max_chars: usize) -> String {
    let normalized = normalize_to_fixed_point(text.to_string());
    match cap_length(&normalized, max_chars) {
        Some(capped) => normalize_to_fixed_point(capped),
        None => normalized,
    }
}

// Stripping can expose a new match (e.g. a page marker split across a
// newline), so passes repeat until nothing changes.
fn normalize_to_fixed_point(mut text: String) -> String {
    for _ in 0..MAX_PASSES {
        let next = normalize_once(&text);
        if next == text {
            break;
        }
        text = next;
    }
    text
}

fn normalize_once(text: &str) -> String {
    let mut out = text.to_string();
    for re in BOILERPLATE_PATTERNS.iter() {
        out = re.replace_all(&out, " ").into_owned();
    }
    out = BLANK_LINES_RE.replace_all(&out, " ").into_owned();
    out = WHITESPACE_RE.replace_all(&out, " ").into_owned();
    out = TERMINAL_PUNCT_RE.replace_all(&out, ".").into_owned();
    out = collapse_repeated_words(&out);
    out.trim().to_string()
}

/// Replaces a word immediately repeated three or more times (case-insensitive,
/// whitespace-separated) with its first occurrence.
pub fn collapse_repeated_words(text: &str) -> String {
    let words: Vec<_> = WORD_RE.find_iter(text).collect();
    let mut out = String::with_capacity(text.len());
    let mut copied_to = 0;
    let mut i = 0;

    while i < words.len() {
        let first = words[i];
        let key = first.as_str().to_lowercase();
        let mut last = i;
        while last + 1 < words.len() {
            let gap = &text[words[last].end()..words[last + 1].start()];
            let adjacent = !gap.is_empty() && gap.chars().all(char::is_whitespace);
            if adjacent && words[last + 1].as_str().to_lowercase() == key {
                last += 1;
            } else {
                break;
            }
        }
        if last - i >= 2 {
            out.push_str(&text[copied_to..first.end()]);
            copied_to = words[last].end();
        }
        i = last + 1;
    }
    out.push_str(&text[copied_to..]);
    out
}

/// Truncates to `max_chars` characters, backing off to the last full stop in
/// the window. Returns `None` when the text already fits.
fn cap_length(text: &str, max_chars: usize) -> Option<String> {
    let cut = text.char_indices().nth(max_chars).map(|(i, _)| i)?;
    let window = &text[..cut];
    let kept = match window.rfind('.') {
        Some(idx) => &window[..=idx],
        None => window,
    };
    Some(kept.to_string())
}
