//! Linguistic annotation consumed by the validator and scorers.
//!
//! The analyzer holds an `Option<Arc<dyn Annotator>>`. `None` means the
//! collaborator could not be initialized and every annotation-dependent
//! sub-score is skipped. `RuleAnnotator` is the built-in implementation;
//! attaching `WordVectors` to it enables similarity queries.

pub mod lemma;
pub mod stop_words;
pub mod tokenizer;
pub mod vectors;

use std::ops::Range;
use std::sync::Arc;

use thiserror::Error;

pub use vectors::{cosine_similarity, DimensionMismatch, WordVectors};

/// Largest input the rule annotator accepts, in characters.
pub const DEFAULT_MAX_LENGTH: usize = 1_000_000;

#[derive(Debug, Error)]
pub enum AnnotationError {
    #[error("Text of length {len} exceeds annotator maximum of {max}")]
    TextTooLong { len: usize, max: usize },

    #[error("Annotator failed: {0}")]
    Failed(String),
}

// ────────────────────────────────────────────────────────────────────────────
// Annotated document
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct Token {
    pub text: String,
    pub lower: String,
    pub lemma: String,
    pub is_alpha: bool,
    pub is_stop: bool,
    pub vector: Option<Arc<[f32]>>,
}

impl Token {
    /// Alphabetic and not a stop word.
    pub fn is_meaningful(&self) -> bool {
        self.is_alpha && !self.is_stop
    }
}

/// Read-only view over annotated text: tokens, sentence partition and the
/// similarity capability flag.
#[derive(Debug, Clone)]
pub struct AnnotatedDocument {
    tokens: Vec<Token>,
    sentences: Vec<Range<usize>>,
    supports_similarity: bool,
}

impl AnnotatedDocument {
    pub fn new(tokens: Vec<Token>, sentences: Vec<Range<usize>>, supports_similarity: bool) -> Self {
        Self {
            tokens,
            sentences,
            supports_similarity,
        }
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn sentences(&self) -> impl Iterator<Item = &[Token]> {
        self.sentences.iter().map(|r| &self.tokens[r.clone()])
    }

    pub fn sentence_count(&self) -> usize {
        self.sentences.len()
    }

    pub fn meaningful_token_count(&self) -> usize {
        self.tokens.iter().filter(|t| t.is_meaningful()).count()
    }

    /// Meaningful tokens over all tokens; 0.0 for an empty document.
    pub fn meaningful_ratio(&self) -> f64 {
        self.meaningful_token_count() as f64 / self.tokens.len().max(1) as f64
    }

    pub fn supports_similarity(&self) -> bool {
        self.supports_similarity
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Trait
// ────────────────────────────────────────────────────────────────────────────

/// An NLP pipeline. Implementations must be shareable across concurrent analyses.
pub trait Annotator: Send + Sync {
    fn annotate(&self, text: &str) -> Result<AnnotatedDocument, AnnotationError>;

    /// Embeds a short phrase for similarity against token vectors. `None` when
    /// the annotator has no vectors or knows none of the phrase's words.
    fn embed(&self, _phrase: &str) -> Option<Vec<f32>> {
        None
    }

    fn supports_similarity(&self) -> bool {
        false
    }
}

// ────────────────────────────────────────────────────────────────────────────
// RuleAnnotator
// ────────────────────────────────────────────────────────────────────────────

/// Regex tokenizer, stop-word list and rule lemmatizer, with optional word vectors.
#[derive(Debug, Clone)]
pub struct RuleAnnotator {
    vectors: Option<Arc<WordVectors>>,
    max_length: usize,
}

impl RuleAnnotator {
    pub fn new() -> Self {
        Self {
            vectors: None,
            max_length: DEFAULT_MAX_LENGTH,
        }
    }

    pub fn with_vectors(mut self, vectors: Arc<WordVectors>) -> Self {
        self.vectors = Some(vectors);
        self
    }

    pub fn with_max_length(mut self, max_length: usize) -> Self {
        self.max_length = max_length;
        self
    }
}

impl Default for RuleAnnotator {
    fn default() -> Self {
        Self::new()
    }
}

impl Annotator for RuleAnnotator {
    fn annotate(&self, text: &str) -> Result<AnnotatedDocument, AnnotationError> {
        let len = text.chars().count();
        if len > self.max_length {
            return Err(AnnotationError::TextTooLong {
                len,
                max: self.max_length,
            });
        }

        let surface = tokenizer::tokenize(text);
        let sentences = tokenizer::split_sentences(&surface);
        let tokens = surface
            .iter()
            .map(|&t| {
                let lower = t.to_lowercase();
                Token {
                    text: t.to_string(),
                    lemma: lemma::lemmatize(&lower),
                    is_alpha: t.chars().all(char::is_alphabetic),
                    is_stop: stop_words::is_stop_word(&lower),
                    vector: self.vectors.as_ref().and_then(|v| v.get(&lower)),
                    lower,
                }
            })
            .collect();

        Ok(AnnotatedDocument::new(
            tokens,
            sentences,
            self.vectors.is_some(),
        ))
    }

    fn embed(&self, phrase: &str) -> Option<Vec<f32>> {
        let vectors = self.vectors.as_ref()?;
        vectors.mean_vector(tokenizer::tokenize(phrase))
    }

    fn supports_similarity(&self) -> bool {
        self.vectors.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn vectors() -> Arc<WordVectors> {
        let table = "career 1.0 0.0\nwork 0.9 0.1\nhistory 0.8 0.2\npython 0.0 1.0\n";
        Arc::new(WordVectors::from_reader(Cursor::new(table)).unwrap())
    }

    #[test]
    fn test_annotate_flags_tokens() {
        let doc = RuleAnnotator::new()
            .annotate("Managed the Python team.")
            .unwrap();
        let tokens = doc.tokens();
        assert_eq!(tokens.len(), 5);
        assert_eq!(tokens[0].lemma, "manage");
        assert!(tokens[0].is_meaningful());
        assert!(tokens[1].is_stop);
        assert_eq!(tokens[2].lower, "python");
        assert!(!tokens[4].is_alpha);
        assert!(tokens.iter().all(|t| t.vector.is_none()));
        assert!(!doc.supports_similarity());
    }

    #[test]
    fn test_annotate_sentences_and_ratio() {
        let doc = RuleAnnotator::new()
            .annotate("Built APIs. Led hiring. Mentored interns")
            .unwrap();
        assert_eq!(doc.sentence_count(), 3);
        assert_eq!(doc.len(), 8);
        assert_eq!(doc.meaningful_token_count(), 6);
        assert!((doc.meaningful_ratio() - 0.75).abs() < 1e-9);
        let first: Vec<&str> = doc.sentences().next().unwrap().iter().map(|t| t.text.as_str()).collect();
        assert_eq!(first, vec!["Built", "APIs", "."]);
    }

    #[test]
    fn test_empty_document_ratio_is_zero() {
        let doc = RuleAnnotator::new().annotate("").unwrap();
        assert!(doc.is_empty());
        assert_eq!(doc.sentence_count(), 0);
        assert_eq!(doc.meaningful_ratio(), 0.0);
    }

    #[test]
    fn test_annotate_rejects_oversized_text() {
        let annotator = RuleAnnotator::new().with_max_length(10);
        let err = annotator.annotate("this is far too long").unwrap_err();
        assert!(matches!(err, AnnotationError::TextTooLong { len: 20, max: 10 }));
    }

    #[test]
    fn test_vectors_attach_and_enable_similarity() {
        let doc = RuleAnnotator::new()
            .with_vectors(vectors())
            .annotate("Career in Python")
            .unwrap();
        assert!(doc.supports_similarity());
        assert!(RuleAnnotator::new().with_vectors(vectors()).supports_similarity());
        assert!(doc.tokens()[0].vector.is_some());
        assert!(doc.tokens()[1].vector.is_none());
    }

    #[test]
    fn test_embed_phrase_averages_known_words() {
        let annotator = RuleAnnotator::new().with_vectors(vectors());
        let v = annotator.embed("work history").unwrap();
        assert!((v[0] - 0.85).abs() < 1e-6);
        assert!((v[1] - 0.15).abs() < 1e-6);
        assert!(annotator.embed("reach me").is_none());
        assert!(RuleAnnotator::new().embed("career").is_none());
    }
}
