use thiserror::Error;

use crate::analysis::annotator::AnnotatedDocument;
use crate::analysis::catalog::Catalogs;

const MIN_CHARS: usize = 50;
const MIN_WORDS: usize = 20;
const MIN_SENTENCES: usize = 3;
const MIN_MEANINGFUL_TOKENS: usize = 15;
const MIN_MEANINGFUL_RATIO: f64 = 0.3;

/// The first resume-shape rule an input failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationFailure {
    #[error("text is shorter than 50 characters")]
    TooShort,

    #[error("text contains no alphabetic characters")]
    NoAlphabetic,

    #[error("text has fewer than 20 words")]
    TooFewWords,

    #[error("no resume section or skill keyword found")]
    NoResumeKeywords,

    #[error("fewer than 3 sentences")]
    TooFewSentences,

    #[error("fewer than 15 meaningful tokens")]
    TooFewMeaningfulTokens,

    #[error("meaningful token ratio below 0.3")]
    LowMeaningfulRatio,
}

/// Checks whether `text` plausibly resembles a resume.
///
/// Lexical rules always run. Sentence and token rules only run when an
/// annotated document is available, so a missing annotator makes the gate
/// more permissive rather than failing.
pub fn check_resume(
    text: &str,
    annotated: Option<&AnnotatedDocument>,
    catalogs: &Catalogs,
) -> Result<(), ValidationFailure> {
    if text.trim().chars().count() < MIN_CHARS {
        return Err(ValidationFailure::TooShort);
    }
    if !text.chars().any(|c| c.is_ascii_alphabetic()) {
        return Err(ValidationFailure::NoAlphabetic);
    }
    if text.split_whitespace().count() < MIN_WORDS {
        return Err(ValidationFailure::TooFewWords);
    }

    let lower = text.to_lowercase();
    if !catalogs.resume_keywords().any(|k| lower.contains(k)) {
        return Err(ValidationFailure::NoResumeKeywords);
    }

    if let Some(doc) = annotated {
        if doc.sentence_count() < MIN_SENTENCES {
            return Err(ValidationFailure::TooFewSentences);
        }
        if doc.meaningful_token_count() < MIN_MEANINGFUL_TOKENS {
            return Err(ValidationFailure::TooFewMeaningfulTokens);
        }
        if doc.meaningful_ratio() < MIN_MEANINGFUL_RATIO {
            return Err(ValidationFailure::LowMeaningfulRatio);
        }
    }

    Ok(())
}

pub fn is_valid_resume(
    text: &str,
    annotated: Option<&AnnotatedDocument>,
    catalogs: &Catalogs,
) -> bool {
    check_resume(text, annotated, catalogs).is_ok()
}
