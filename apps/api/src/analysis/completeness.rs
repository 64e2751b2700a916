//! Section completeness: which canonical resume sections the text covers.
//!
//! A section counts as present when one of its aliases occurs literally in
//! the lowercased text, or, when the annotated document carries vectors,
//! when some token is semantically close to an alias.

use std::collections::{BTreeMap, BTreeSet};

use crate::analysis::annotator::{cosine_similarity, AnnotatedDocument, Annotator, DimensionMismatch};
use crate::analysis::catalog::{Catalogs, Section};

/// Strict lower bound on cosine similarity for a semantic section match.
pub const SIMILARITY_THRESHOLD: f32 = 0.7;

const POINTS_PER_SECTION: u32 = 12;

/// Alias embeddings per section, computed once when the analyzer is built.
#[derive(Debug, Clone, Default)]
pub struct SectionEmbeddings {
    by_section: BTreeMap<Section, Vec<Vec<f32>>>,
}

impl SectionEmbeddings {
    /// Embeds every alias the annotator knows. Returns `None` when the
    /// annotator has no similarity support or can embed none of the aliases.
    pub fn build(annotator: &dyn Annotator, catalogs: &Catalogs) -> Option<Self> {
        if !annotator.supports_similarity() {
            return None;
        }
        let mut by_section = BTreeMap::new();
        for (section, aliases) in catalogs.sections() {
            let vectors: Vec<Vec<f32>> = aliases.iter().filter_map(|a| annotator.embed(a)).collect();
            if !vectors.is_empty() {
                by_section.insert(section, vectors);
            }
        }
        if by_section.is_empty() {
            None
        } else {
            Some(Self { by_section })
        }
    }

    fn for_section(&self, section: Section) -> &[Vec<f32>] {
        self.by_section
            .get(&section)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

fn semantic_match(
    doc: &AnnotatedDocument,
    aliases: &[String],
    alias_vectors: &[Vec<f32>],
) -> Result<bool, DimensionMismatch> {
    for alias_vector in alias_vectors {
        for token in doc.tokens() {
            let Some(vector) = token.vector.as_deref() else { continue };
            if aliases.iter().any(|a| a == &token.lower) {
                continue;
            }
            if cosine_similarity(vector, alias_vector)? > SIMILARITY_THRESHOLD {
                return Ok(true);
            }
        }
    }
    Ok(false)
}

/// Detects the sections present in `cleaned_text`.
///
/// The semantic pass only runs when both `embeddings` is present and the
/// document reports similarity support. A vector dimension mismatch between
/// token and alias embeddings is an internal failure and is propagated.
pub fn detect_sections(
    cleaned_text: &str,
    annotated: Option<&AnnotatedDocument>,
    embeddings: Option<&SectionEmbeddings>,
    catalogs: &Catalogs,
) -> Result<BTreeSet<Section>, DimensionMismatch> {
    let lower = cleaned_text.to_lowercase();
    let semantic = match (annotated, embeddings) {
        (Some(doc), Some(emb)) if doc.supports_similarity() => Some((doc, emb)),
        _ => None,
    };

    let mut found = BTreeSet::new();
    for (section, aliases) in catalogs.sections() {
        if aliases.iter().any(|a| lower.contains(a.as_str())) {
            found.insert(section);
            continue;
        }
        if let Some((doc, emb)) = semantic {
            if semantic_match(doc, aliases, emb.for_section(section))? {
                found.insert(section);
            }
        }
    }
    Ok(found)
}

pub fn completeness_score(section_count: usize) -> u32 {
    (section_count as u32 * POINTS_PER_SECTION).min(100)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use std::sync::Arc;

    use crate::analysis::annotator::{AnnotationError, RuleAnnotator, Token, WordVectors};

    fn vector_annotator() -> RuleAnnotator {
        let table = "career 1.0 0.0\nvita 0.95 0.05\npython 0.0 1.0\n";
        let vectors = WordVectors::from_reader(Cursor::new(table)).unwrap();
        RuleAnnotator::new().with_vectors(Arc::new(vectors))
    }

    #[test]
    fn test_literal_detection_without_annotation() {
        let catalogs = Catalogs::default();
        let text = "Professional Experience at Acme. Education: BSc. Skills: Rust.";
        let found = detect_sections(text, None, None, &catalogs).unwrap();
        assert!(found.contains(&Section::Experience));
        assert!(found.contains(&Section::Education));
        assert!(found.contains(&Section::Skills));
        assert!(!found.contains(&Section::Certifications));
    }

    #[test]
    fn test_literal_detection_is_case_insensitive() {
        let catalogs = Catalogs::default();
        let found = detect_sections("CERTIFICATES", None, None, &catalogs).unwrap();
        assert_eq!(found, BTreeSet::from([Section::Certifications]));
    }

    #[test]
    fn test_nothing_detected() {
        let catalogs = Catalogs::default();
        let found = detect_sections("zzz qqq", None, None, &catalogs).unwrap();
        assert!(found.is_empty());
    }

    #[test]
    fn test_semantic_detection_uses_vectors() {
        let catalogs = Catalogs::default();
        let annotator = vector_annotator();
        let embeddings = SectionEmbeddings::build(&annotator, &catalogs).unwrap();
        let text = "Vita: ten years at Acme writing python";
        let doc = annotator.annotate(text).unwrap();

        let literal = detect_sections(text, Some(&doc), None, &catalogs).unwrap();
        assert!(literal.is_empty());

        let found = detect_sections(text, Some(&doc), Some(&embeddings), &catalogs).unwrap();
        assert_eq!(found, BTreeSet::from([Section::Experience]));
    }

    #[test]
    fn test_build_without_vectors_is_none() {
        let catalogs = Catalogs::default();
        assert!(SectionEmbeddings::build(&RuleAnnotator::new(), &catalogs).is_none());
    }

    struct MismatchedAnnotator;

    impl Annotator for MismatchedAnnotator {
        fn annotate(&self, text: &str) -> Result<AnnotatedDocument, AnnotationError> {
            let token = Token {
                text: text.to_string(),
                lower: text.to_lowercase(),
                lemma: text.to_lowercase(),
                is_alpha: true,
                is_stop: false,
                vector: Some(Arc::from(vec![1.0_f32, 0.0, 0.0])),
            };
            Ok(AnnotatedDocument::new(vec![token], vec![0..1], true))
        }

        fn embed(&self, _phrase: &str) -> Option<Vec<f32>> {
            Some(vec![1.0, 0.0])
        }

        fn supports_similarity(&self) -> bool {
            true
        }
    }

    #[test]
    fn test_dimension_mismatch_propagates() {
        let catalogs = Catalogs::default();
        let embeddings = SectionEmbeddings::build(&MismatchedAnnotator, &catalogs).unwrap();
        let doc = MismatchedAnnotator.annotate("zzz").unwrap();
        let err = detect_sections("zzz", Some(&doc), Some(&embeddings), &catalogs).unwrap_err();
        assert_eq!(err, DimensionMismatch { left: 3, right: 2 });
    }

    #[test]
    fn test_completeness_score() {
        assert_eq!(completeness_score(0), 0);
        assert_eq!(completeness_score(3), 36);
        assert_eq!(completeness_score(8), 96);
        assert_eq!(completeness_score(9), 100);
    }
}
