//! Resume analysis: extraction, cleaning, validation and heuristic scoring.

pub mod analyzer;
pub mod annotator;
pub mod catalog;
pub mod cleaner;
pub mod completeness;
pub mod extract;
pub mod handlers;
pub mod scoring;
pub mod validation;
