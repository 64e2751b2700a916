//! The resume analyzer: clean → annotate → validate → score → aggregate.
//!
//! `ResumeAnalyzer::analyze` never fails. Rejected input yields the
//! "not a resume" sentinel; an internal error or a panic inside the injected
//! annotator yields the "processing failed" sentinel. A failed annotation of
//! one text is not an internal error: scoring continues on the lexical path.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::analysis::annotator::{AnnotatedDocument, Annotator, DimensionMismatch};
use crate::analysis::catalog::Catalogs;
use crate::analysis::cleaner::{clean_with_limit, DEFAULT_MAX_CHARS};
use crate::analysis::completeness::{completeness_score, detect_sections, SectionEmbeddings};
use crate::analysis::scoring::{
    conciseness_score, formatting_score, impact_score, skills_score, AchievementMatcher,
};
use crate::analysis::validation::check_resume;
use crate::models::score::{ScoreResult, Subscores};

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error(transparent)]
    Similarity(#[from] DimensionMismatch),

    #[error("{0}")]
    Panicked(String),
}

// ────────────────────────────────────────────────────────────────────────────
// Configuration
// ────────────────────────────────────────────────────────────────────────────

/// Dimension weights in percentage points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreWeights {
    pub impact: u32,
    pub skills: u32,
    pub formatting: u32,
    pub conciseness: u32,
    pub completeness: u32,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            impact: 30,
            skills: 30,
            formatting: 15,
            conciseness: 15,
            completeness: 10,
        }
    }
}

impl ScoreWeights {
    fn total(&self) -> u32 {
        self.impact + self.skills + self.formatting + self.conciseness + self.completeness
    }

    /// Weighted mean of the subscores, floored. Zero total weight scores 0.
    pub fn overall(&self, s: &Subscores) -> u32 {
        let total = self.total();
        if total == 0 {
            return 0;
        }
        let weighted = self.impact * s.impact
            + self.skills * s.skills
            + self.formatting * s.formatting
            + self.conciseness * s.conciseness
            + self.completeness * s.completeness;
        (weighted / total).min(100)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct AnalyzerConfig {
    pub max_clean_chars: usize,
    pub weights: ScoreWeights,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            max_clean_chars: DEFAULT_MAX_CHARS,
            weights: ScoreWeights::default(),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Recommendations
// ────────────────────────────────────────────────────────────────────────────

const MIN_SECTIONS: usize = 4;
const MIN_WORDS_FOR_DETAIL: usize = 200;
const MIN_DIMENSION_SCORE: u32 = 50;

fn build_recommendations(section_count: usize, word_count: usize, subscores: &Subscores) -> String {
    let mut recs = Vec::new();
    if section_count < MIN_SECTIONS {
        recs.push("Add missing resume sections (e.g., experience, education, skills)");
    }
    if word_count < MIN_WORDS_FOR_DETAIL {
        recs.push("Expand content with detailed descriptions and achievements");
    }
    if subscores.skills < MIN_DIMENSION_SCORE {
        recs.push("Include more specific skills relevant to your target role");
    }
    if subscores.impact < MIN_DIMENSION_SCORE {
        recs.push("Add quantifiable achievements (e.g., 'increased sales by 20%')");
    }
    recs.push("Ensure clear section headings and consistent formatting");
    recs.join(". ")
}

// ────────────────────────────────────────────────────────────────────────────
// Analyzer
// ────────────────────────────────────────────────────────────────────────────

/// Shared, immutable scoring engine. `Send + Sync`; hold it behind an `Arc`.
pub struct ResumeAnalyzer {
    catalogs: Arc<Catalogs>,
    annotator: Option<Arc<dyn Annotator>>,
    achievements: AchievementMatcher,
    section_embeddings: Option<SectionEmbeddings>,
    config: AnalyzerConfig,
}

impl ResumeAnalyzer {
    /// Compiles catalog patterns and, when the annotator supports similarity,
    /// embeds every section alias up front.
    pub fn new(
        catalogs: Arc<Catalogs>,
        annotator: Option<Arc<dyn Annotator>>,
        config: AnalyzerConfig,
    ) -> Result<Self, regex::Error> {
        let achievements = AchievementMatcher::new(&catalogs)?;
        let section_embeddings = annotator
            .as_deref()
            .and_then(|a| SectionEmbeddings::build(a, &catalogs));

        info!(
            annotator = annotator.is_some(),
            semantic_sections = section_embeddings.is_some(),
            "Resume analyzer ready"
        );

        Ok(Self {
            catalogs,
            annotator,
            achievements,
            section_embeddings,
            config,
        })
    }

    pub fn has_annotator(&self) -> bool {
        self.annotator.is_some()
    }

    /// Scores `text`. Never fails; see the module docs for the sentinel cases.
    pub fn analyze(&self, text: &str) -> ScoreResult {
        match panic::catch_unwind(AssertUnwindSafe(|| self.try_analyze(text))) {
            Ok(Ok(result)) => result,
            Ok(Err(e)) => {
                error!("Resume analysis failed: {e}");
                ScoreResult::processing_failed(e)
            }
            Err(payload) => {
                let e = AnalysisError::Panicked(panic_message(payload));
                error!("Resume analysis panicked: {e}");
                ScoreResult::processing_failed(e)
            }
        }
    }

    fn try_analyze(&self, text: &str) -> Result<ScoreResult, AnalysisError> {
        let cleaned = clean_with_limit(text, self.config.max_clean_chars);
        let doc = self.annotate(&cleaned);

        if let Err(reason) = check_resume(text, doc.as_ref(), &self.catalogs) {
            warn!("Input rejected as non-resume: {reason}");
            return Ok(ScoreResult::not_a_resume());
        }

        let word_count = cleaned.split_whitespace().count();
        let sections = detect_sections(
            &cleaned,
            doc.as_ref(),
            self.section_embeddings.as_ref(),
            &self.catalogs,
        )?;

        let subscores = Subscores {
            impact: impact_score(text, doc.as_ref(), &self.catalogs, &self.achievements),
            skills: skills_score(doc.as_ref(), word_count, &self.catalogs),
            formatting: formatting_score(text, doc.as_ref()),
            conciseness: conciseness_score(word_count),
            completeness: completeness_score(sections.len()),
        }
        .clamped();
        debug!(?subscores, sections = sections.len(), word_count, "Subscores computed");

        let overall_score = self.config.weights.overall(&subscores);
        info!(overall_score, "Resume scored");

        Ok(ScoreResult {
            overall_score,
            subscores,
            recommendations: build_recommendations(sections.len(), word_count, &subscores),
        })
    }

    fn annotate(&self, cleaned: &str) -> Option<AnnotatedDocument> {
        let annotator = self.annotator.as_ref()?;
        match annotator.annotate(cleaned) {
            Ok(doc) => Some(doc),
            Err(e) => {
                warn!("Annotation failed, continuing with lexical scoring: {e}");
                None
            }
        }
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "annotator panicked".to_string()
    }
}
