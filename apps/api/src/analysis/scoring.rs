//! Heuristic dimension scorers. Each maps its inputs to an integer in [0, 100]
//! and is independent of the others.
//!
//! Sub-terms that need token-level annotation are skipped when no annotated
//! document is available; purely lexical sub-terms always run.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::analysis::annotator::{AnnotatedDocument, Token};
use crate::analysis::catalog::Catalogs;

pub const MAX_SCORE: u32 = 100;

// ────────────────────────────────────────────────────────────────────────────
// Impact
// ────────────────────────────────────────────────────────────────────────────

const ACTION_VERB_POINTS: u32 = 5;
const ACTION_VERB_CAP: u32 = 30;
const ACHIEVEMENT_POINTS: u32 = 10;
const ACHIEVEMENT_CAP: u32 = 50;
const DENSITY_CAP: u32 = 20;

/// Compiled achievement pattern: an achievement verb anywhere in the text,
/// optionally followed by a quantifier (`40%`, `$5000`, `300 users`).
/// Verbs are not word-anchored, so `learned` also counts as `earned`.
#[derive(Debug, Clone)]
pub struct AchievementMatcher {
    re: Option<Regex>,
}

impl AchievementMatcher {
    pub fn new(catalogs: &Catalogs) -> Result<Self, regex::Error> {
        let verbs = catalogs.achievement_verbs();
        if verbs.is_empty() {
            return Ok(Self { re: None });
        }
        let verbs = alternation(verbs);
        let quantifier = if catalogs.quantifier_units().is_empty() {
            r"\d+%|[$£€₹]\d+".to_string()
        } else {
            format!(
                r"\d+%|[$£€₹]\d+|\d+\s*(?:{})\b",
                alternation(catalogs.quantifier_units())
            )
        };
        let pattern = format!(r"(?i)(?:{verbs})(?:\s*(?:{quantifier}))?");
        Ok(Self {
            re: Some(Regex::new(&pattern)?),
        })
    }

    pub fn count(&self, text: &str) -> usize {
        self.re
            .as_ref()
            .map(|re| re.find_iter(text).count())
            .unwrap_or(0)
    }
}

fn alternation(words: &[String]) -> String {
    words
        .iter()
        .map(|w| regex::escape(w))
        .collect::<Vec<_>>()
        .join("|")
}

/// Returns the catalog verb a token realizes, matching its lemma first and
/// then its lowercase surface form (the catalog lists past-tense forms).
fn action_verb_for<'c>(token: &Token, catalogs: &'c Catalogs) -> Option<&'c str> {
    let verbs = catalogs.action_verbs();
    verbs
        .get(token.lemma.as_str())
        .or_else(|| verbs.get(token.lower.as_str()))
        .map(String::as_str)
}

/// Rewards evidence of results: distinct action verbs, achievement phrases
/// and content density.
pub fn impact_score(
    raw_text: &str,
    annotated: Option<&AnnotatedDocument>,
    catalogs: &Catalogs,
    achievements: &AchievementMatcher,
) -> u32 {
    let mut score = 0u32;

    if let Some(doc) = annotated {
        let verbs: HashSet<&str> = doc
            .tokens()
            .iter()
            .filter_map(|t| action_verb_for(t, catalogs))
            .collect();
        score += (verbs.len() as u32 * ACTION_VERB_POINTS).min(ACTION_VERB_CAP);
    }

    let achievement_count = achievements.count(raw_text) as u32;
    score += (achievement_count * ACHIEVEMENT_POINTS).min(ACHIEVEMENT_CAP);

    if let Some(doc) = annotated {
        score += ((doc.meaningful_ratio() * 100.0) as u32).min(DENSITY_CAP);
    }

    score.min(MAX_SCORE)
}

// ────────────────────────────────────────────────────────────────────────────
// Skills
// ────────────────────────────────────────────────────────────────────────────

const SKILL_POINTS: u32 = 5;
const SKILL_CAP: u32 = 80;
const SKILL_DENSITY_CAP: u32 = 20;

pub fn distinct_skills<'d>(doc: &'d AnnotatedDocument, catalogs: &Catalogs) -> HashSet<&'d str> {
    doc.tokens()
        .iter()
        .map(|t| t.lower.as_str())
        .filter(|lower| catalogs.is_skill(lower))
        .collect()
}

/// +5 per distinct catalog skill (max 80) plus a density bonus (max 20).
pub fn skills_score(
    annotated: Option<&AnnotatedDocument>,
    word_count: usize,
    catalogs: &Catalogs,
) -> u32 {
    let Some(doc) = annotated else {
        return 0;
    };
    let unique = distinct_skills(doc, catalogs).len();
    let base = (unique as u32 * SKILL_POINTS).min(SKILL_CAP);
    let density = unique as f64 / word_count.max(1) as f64 * 100.0;
    let density_term = ((density * 10.0) as u32).min(SKILL_DENSITY_CAP);
    (base + density_term).min(MAX_SCORE)
}

// ────────────────────────────────────────────────────────────────────────────
// Formatting
// ────────────────────────────────────────────────────────────────────────────

static SECTION_BREAK_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n\s*\n|[-*]{2,}").unwrap());
static BULLET_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[•\-*]\s").unwrap());

const MAX_HEADING_CHARS: usize = 50;

/// Python-style `istitle`: every cased run starts with an uppercase letter
/// followed only by lowercase letters, and at least one cased letter exists.
pub fn is_title_case(s: &str) -> bool {
    let mut prev_cased = false;
    let mut has_cased = false;
    for c in s.chars() {
        if c.is_uppercase() {
            if prev_cased {
                return false;
            }
            prev_cased = true;
            has_cased = true;
        } else if c.is_lowercase() {
            if !prev_cased {
                return false;
            }
            prev_cased = true;
            has_cased = true;
        } else {
            prev_cased = false;
        }
    }
    has_cased
}

fn population_std_dev(values: &[usize]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<usize>() as f64 / n;
    let variance = values
        .iter()
        .map(|&v| (v as f64 - mean).powi(2))
        .sum::<f64>()
        / n;
    variance.sqrt()
}

/// Layout quality of the original (uncleaned) text: section breaks, bullets,
/// line-length consistency, headings and content coherence.
pub fn formatting_score(raw_text: &str, annotated: Option<&AnnotatedDocument>) -> u32 {
    let mut score = 0u32;

    let breaks = SECTION_BREAK_RE.find_iter(raw_text).count() as u32;
    score += (breaks * 5).min(20);

    let bullets = BULLET_RE.find_iter(raw_text).count() as u32;
    score += (bullets * 2).min(20);

    let lines: Vec<&str> = raw_text
        .split('\n')
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();

    if !lines.is_empty() {
        let lengths: Vec<usize> = lines.iter().map(|l| l.chars().count()).collect();
        let penalty = (population_std_dev(&lengths) / 5.0) as u32;
        score += 20u32.saturating_sub(penalty);
    }

    let headings = lines
        .iter()
        .filter(|l| l.chars().count() < MAX_HEADING_CHARS && is_title_case(l))
        .count() as u32;
    score += (headings * 5).min(20);

    if let Some(doc) = annotated {
        score += ((doc.meaningful_ratio() * 50.0) as u32).min(20);
    }

    score.min(MAX_SCORE)
}

// ────────────────────────────────────────────────────────────────────────────
// Conciseness
// ────────────────────────────────────────────────────────────────────────────

const CONCISENESS_BASE: u32 = 80;

/// Ideal word-count window for a document of `word_count` words. Tier
/// thresholds are exclusive upper bounds: 399 words selects the first tier,
/// 400 the second.
pub fn ideal_word_range(word_count: usize) -> (usize, usize) {
    if word_count < 400 {
        (200, 600)
    } else if word_count < 800 {
        (400, 1000)
    } else {
        (800, 1500)
    }
}

/// 80 inside the ideal window, minus 10 per full 100 words outside it.
pub fn conciseness_score(word_count: usize) -> u32 {
    let (low, high) = ideal_word_range(word_count);
    let deviation = if word_count < low {
        low - word_count
    } else if word_count > high {
        word_count - high
    } else {
        return CONCISENESS_BASE;
    };
    let penalty = (deviation / 100) as u32 * 10;
    CONCISENESS_BASE.saturating_sub(penalty).min(MAX_SCORE)
}
