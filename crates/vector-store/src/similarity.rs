//! Scoring functions for [`crate::VectorDatabase::search`].
//!
//! Every function returns a score where larger means more similar, so ranking
//! is uniform regardless of which one a caller selects.

use crate::error::{Result, VectorStoreError};
use ndarray::{Array1, ArrayView1};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

type ScoreFn = dyn Fn(&[f32], &[f32]) -> f32 + Send + Sync;

/// Scoring function selected per search call.
#[derive(Clone, Default)]
pub enum Similarity {
    #[default]
    Cosine,
    /// `1 / (1 + euclidean distance)`
    Euclidean,
    /// `1 / (1 + manhattan distance)`
    Manhattan,
    /// Caller-supplied score; inputs are dimension-checked before the call.
    Custom(Arc<ScoreFn>),
}

impl Similarity {
    pub fn custom(score: impl Fn(&[f32], &[f32]) -> f32 + Send + Sync + 'static) -> Self {
        Self::Custom(Arc::new(score))
    }

    /// Scores one pair; a NaN or infinite score is an error.
    pub fn score(&self, a: &[f32], b: &[f32]) -> Result<f32> {
        let score = match self {
            Self::Cosine => cosine_similarity(a, b)?,
            Self::Euclidean => euclidean_similarity(a, b)?,
            Self::Manhattan => manhattan_similarity(a, b)?,
            Self::Custom(scorer) => {
                ensure_same_dimension(a, b)?;
                scorer(a, b)
            }
        };
        if !score.is_finite() {
            return Err(VectorStoreError::NonFiniteScore(self.name()));
        }
        Ok(score)
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Cosine => "cosine",
            Self::Euclidean => "euclidean",
            Self::Manhattan => "manhattan",
            Self::Custom(_) => "custom",
        }
    }
}

impl fmt::Debug for Similarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Similarity {
    type Err = VectorStoreError;

    fn from_str(raw: &str) -> Result<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "cosine" => Ok(Self::Cosine),
            "euclidean" => Ok(Self::Euclidean),
            "manhattan" => Ok(Self::Manhattan),
            other => Err(VectorStoreError::invalid_argument(format!(
                "Unsupported similarity '{other}' (expected 'cosine', 'euclidean' or 'manhattan')"
            ))),
        }
    }
}

const fn ensure_same_dimension(a: &[f32], b: &[f32]) -> Result<()> {
    if a.len() != b.len() {
        return Err(VectorStoreError::InvalidDimension {
            expected: a.len(),
            actual: b.len(),
        });
    }
    Ok(())
}

/// Sums run in f64: squares of finite f32 components neither overflow nor
/// flush to zero there.
fn widen(v: &[f32]) -> Array1<f64> {
    ArrayView1::from(v).mapv(f64::from)
}

/// Dot product over the product of magnitudes.
///
/// Fails with [`VectorStoreError::ZeroMagnitude`] when either vector is all zeros.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Result<f32> {
    ensure_same_dimension(a, b)?;
    let (a, b) = (widen(a), widen(b));

    let norm_a = a.dot(&a).sqrt();
    let norm_b = b.dot(&b).sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return Err(VectorStoreError::ZeroMagnitude);
    }

    Ok((a.dot(&b) / (norm_a * norm_b)) as f32)
}

pub fn euclidean_similarity(a: &[f32], b: &[f32]) -> Result<f32> {
    ensure_same_dimension(a, b)?;
    let diff = widen(a) - widen(b);
    let distance = diff.dot(&diff).sqrt();
    Ok((1.0 / (1.0 + distance)) as f32)
}

pub fn manhattan_similarity(a: &[f32], b: &[f32]) -> Result<f32> {
    ensure_same_dimension(a, b)?;
    let diff = widen(a) - widen(b);
    let distance = diff.mapv(f64::abs).sum();
    Ok((1.0 / (1.0 + distance)) as f32)
}
