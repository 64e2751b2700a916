use std::fmt::Display;

use serde::{Deserialize, Serialize};

pub const NOT_A_RESUME_MESSAGE: &str = "Document does not appear to be a resume. Please upload a valid resume with relevant sections and content.";

/// Per-dimension scores, each in [0, 100].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subscores {
    #[serde(rename = "impact_results")]
    pub impact: u32,
    #[serde(rename = "skills_relevance")]
    pub skills: u32,
    pub formatting: u32,
    pub conciseness: u32,
    #[serde(rename = "section_completeness")]
    pub completeness: u32,
}

impl Subscores {
    pub fn clamped(self) -> Self {
        Self {
            impact: self.impact.min(100),
            skills: self.skills.min(100),
            formatting: self.formatting.min(100),
            conciseness: self.conciseness.min(100),
            completeness: self.completeness.min(100),
        }
    }
}

/// Outcome of one analysis. Rejected or failed inputs produce the all-zero
/// sentinel carrying an advisory message instead of an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub overall_score: u32,
    pub subscores: Subscores,
    pub recommendations: String,
}

impl ScoreResult {
    pub fn sentinel(message: impl Into<String>) -> Self {
        Self {
            overall_score: 0,
            subscores: Subscores::default(),
            recommendations: message.into(),
        }
    }

    pub fn not_a_resume() -> Self {
        Self::sentinel(NOT_A_RESUME_MESSAGE)
    }

    pub fn processing_failed(err: impl Display) -> Self {
        Self::sentinel(format!(
            "Document processing failed: {err}. Please upload a valid resume."
        ))
    }

    pub fn is_sentinel(&self) -> bool {
        self.overall_score == 0 && self.subscores == Subscores::default()
    }
}

/// Request-level facts the HTTP layer returns next to the score.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisMetadata {
    /// Seconds, rounded to two decimals.
    pub processing_time: f64,
    /// Characters of extracted text.
    pub document_length: usize,
    pub filename: String,
    /// Unix time in seconds.
    pub timestamp: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_serialized_field_names() {
        let result = ScoreResult {
            overall_score: 61,
            subscores: Subscores {
                impact: 70,
                skills: 55,
                formatting: 60,
                conciseness: 80,
                completeness: 36,
            },
            recommendations: "Ensure clear section headings and consistent formatting".into(),
        };
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(
            value,
            json!({
                "overall_score": 61,
                "subscores": {
                    "impact_results": 70,
                    "skills_relevance": 55,
                    "formatting": 60,
                    "conciseness": 80,
                    "section_completeness": 36
                },
                "recommendations": "Ensure clear section headings and consistent formatting"
            })
        );
    }

    #[test]
    fn test_sentinels() {
        let rejected = ScoreResult::not_a_resume();
        assert!(rejected.is_sentinel());
        assert_eq!(rejected.recommendations, NOT_A_RESUME_MESSAGE);

        let failed = ScoreResult::processing_failed("vector dimension mismatch");
        assert!(failed.is_sentinel());
        assert_eq!(
            failed.recommendations,
            "Document processing failed: vector dimension mismatch. Please upload a valid resume."
        );
    }

    #[test]
    fn test_clamped() {
        let s = Subscores {
            impact: 130,
            skills: 100,
            formatting: 0,
            conciseness: 101,
            completeness: 12,
        }
        .clamped();
        assert_eq!((s.impact, s.skills, s.formatting, s.conciseness, s.completeness), (100, 100, 0, 100, 12));
    }
}
