//! Static word vectors (GloVe / word2vec text format) and cosine similarity.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::sync::Arc;

use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum VectorLoadError {
    #[error("Failed to read word vectors: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed word vector on line {line}: {reason}")]
    Parse { line: usize, reason: String },

    #[error("Word vector file contains no vectors")]
    Empty,
}

#[derive(Debug, Error, PartialEq)]
#[error("Vector dimension mismatch: {left} vs {right}")]
pub struct DimensionMismatch {
    pub left: usize,
    pub right: usize,
}

/// Lowercase word → dense vector lookup table. All vectors share one dimension.
#[derive(Debug, Clone)]
pub struct WordVectors {
    dim: usize,
    table: HashMap<String, Arc<[f32]>>,
}

impl WordVectors {
    /// Loads a vector table from a text file with one `word v1 v2 ...` entry
    /// per line. A leading word2vec `count dim` header is skipped.
    pub fn load(path: &Path) -> Result<Self, VectorLoadError> {
        let file = File::open(path)?;
        let vectors = Self::from_reader(BufReader::new(file))?;
        info!(
            "Loaded {} word vectors ({} dims) from {}",
            vectors.len(),
            vectors.dim(),
            path.display()
        );
        Ok(vectors)
    }

    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self, VectorLoadError> {
        let mut dim = 0;
        let mut table = HashMap::new();

        for (idx, line) in reader.lines().enumerate() {
            let line = line?;
            let line_no = idx + 1;
            let mut fields = line.split_whitespace();
            let Some(word) = fields.next() else { continue };
            let values: Vec<&str> = fields.collect();

            if idx == 0 && values.len() == 1 && word.parse::<usize>().is_ok() {
                continue; // word2vec header
            }

            let vector = values
                .iter()
                .map(|v| v.parse::<f32>())
                .collect::<Result<Vec<f32>, _>>()
                .map_err(|e| VectorLoadError::Parse {
                    line: line_no,
                    reason: e.to_string(),
                })?;

            if vector.is_empty() {
                return Err(VectorLoadError::Parse {
                    line: line_no,
                    reason: format!("'{word}' has no components"),
                });
            }
            if dim == 0 {
                dim = vector.len();
            } else if vector.len() != dim {
                return Err(VectorLoadError::Parse {
                    line: line_no,
                    reason: format!("expected {dim} components, found {}", vector.len()),
                });
            }
            table.insert(word.to_lowercase(), Arc::from(vector));
        }

        if table.is_empty() {
            return Err(VectorLoadError::Empty);
        }
        Ok(Self { dim, table })
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn get(&self, word: &str) -> Option<Arc<[f32]>> {
        self.table.get(&word.to_lowercase()).cloned()
    }

    /// Mean of the vectors of the known words in `words`, or `None` when none
    /// of them is in the table.
    pub fn mean_vector<'a>(&self, words: impl IntoIterator<Item = &'a str>) -> Option<Vec<f32>> {
        let mut sum = vec![0.0_f32; self.dim];
        let mut count = 0usize;
        for word in words {
            if let Some(v) = self.table.get(&word.to_lowercase()) {
                for (acc, x) in sum.iter_mut().zip(v.iter()) {
                    *acc += x;
                }
                count += 1;
            }
        }
        if count == 0 {
            return None;
        }
        for acc in &mut sum {
            *acc /= count as f32;
        }
        Some(sum)
    }
}

/// Cosine similarity. A zero-length vector is similar to nothing (0.0).
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Result<f32, DimensionMismatch> {
    if a.len() != b.len() {
        return Err(DimensionMismatch {
            left: a.len(),
            right: b.len(),
        });
    }
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return Ok(0.0);
    }
    Ok(dot / (norm_a * norm_b))
}
