use crate::error::{Result, VectorStoreError};
use async_trait::async_trait;
use std::env;
use std::str::FromStr;
#[cfg(test)]
use std::sync::atomic::{AtomicUsize, Ordering};
#[cfg(test)]
use std::sync::Arc;

pub const DEFAULT_EMBEDDING_DIM: usize = 384;
pub const DEFAULT_EMBEDDING_BATCH: usize = 64;

/// Maps text to numeric vectors.
///
/// Errors are returned to callers of the database unmodified.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Embeds `texts`, returning one vector per input in input order.
    async fn embed_many(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>>;

    async fn embed_one(&self, text: &str) -> Result<Vec<f32>> {
        let mut embeddings = self.embed_many(&[text]).await?;
        embeddings
            .pop()
            .ok_or_else(|| VectorStoreError::embedding("Empty embedding result"))
    }
}

/// Deterministic offline embedder: identical text always yields the identical
/// unit-length vector. Carries no semantics beyond exact text identity.
#[derive(Clone, Debug)]
pub struct HashEmbedder {
    dimension: usize,
    max_batch: usize,
    #[cfg(test)]
    batch_calls: Arc<AtomicUsize>,
}

impl HashEmbedder {
    pub fn new(dimension: usize, max_batch: usize) -> Result<Self> {
        if dimension == 0 {
            return Err(VectorStoreError::embedding(
                "Embedding dimension must be > 0",
            ));
        }
        if max_batch == 0 {
            return Err(VectorStoreError::embedding(
                "Embedding batch size must be > 0",
            ));
        }
        Ok(Self {
            dimension,
            max_batch,
            #[cfg(test)]
            batch_calls: Arc::new(AtomicUsize::new(0)),
        })
    }

    /// Reads `RAGKIT_EMBEDDING_DIM` and `RAGKIT_EMBEDDING_BATCH`.
    pub fn from_env() -> Result<Self> {
        let dimension = env_usize("RAGKIT_EMBEDDING_DIM", DEFAULT_EMBEDDING_DIM)?;
        let max_batch = env_usize("RAGKIT_EMBEDDING_BATCH", DEFAULT_EMBEDDING_BATCH)?;
        Self::new(dimension, max_batch)
    }

    #[must_use]
    pub const fn dimension(&self) -> usize {
        self.dimension
    }

    #[must_use]
    pub const fn max_batch(&self) -> usize {
        self.max_batch
    }

    #[cfg(test)]
    pub(crate) fn batch_calls(&self) -> usize {
        self.batch_calls.load(Ordering::Relaxed)
    }

    fn embed_batch(&self, texts: &[&str]) -> Vec<Vec<f32>> {
        #[cfg(test)]
        self.batch_calls.fetch_add(1, Ordering::Relaxed);
        texts
            .iter()
            .map(|text| hash_embed(text, self.dimension))
            .collect()
    }
}

#[async_trait]
impl EmbeddingProvider for HashEmbedder {
    async fn embed_many(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(vec![]);
        }

        let mut out = Vec::with_capacity(texts.len());
        for batch in texts.chunks(self.max_batch) {
            out.extend(self.embed_batch(batch));
        }
        log::debug!(
            "Embedded {} texts in {} batches",
            texts.len(),
            texts.len().div_ceil(self.max_batch)
        );
        Ok(out)
    }
}

fn env_usize(name: &str, default: usize) -> Result<usize> {
    match env::var(name) {
        Ok(raw) => usize::from_str(raw.trim()).map_err(|_| {
            VectorStoreError::embedding(format!(
                "Invalid {name} '{raw}' (expected a positive integer)"
            ))
        }),
        Err(_) => Ok(default),
    }
}

fn normalize(vec: &mut [f32]) {
    let norm = vec.iter().map(|v| v * v).sum::<f32>().sqrt();
    if norm == 0.0 {
        return;
    }
    for value in vec {
        *value /= norm;
    }
}

fn hash_embed(text: &str, dimension: usize) -> Vec<f32> {
    let mut state =
        fnv1a_64(text.as_bytes()) ^ (dimension as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15);
    let mut vec = Vec::with_capacity(dimension);
    for _ in 0..dimension {
        let bits = splitmix64(&mut state);
        let high = (bits >> 32) as u32;
        let mantissa = high >> 9;
        let unit = f32::from_bits(0x3f80_0000 | mantissa) - 1.0;
        vec.push(unit.mul_add(2.0, -1.0));
    }
    normalize(&mut vec);
    vec
}

fn fnv1a_64(bytes: &[u8]) -> u64 {
    let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
    for byte in bytes {
        hash ^= u64::from(*byte);
        hash = hash.wrapping_mul(0x0000_0100_0000_01b3);
    }
    hash
}

const fn splitmix64(state: &mut u64) -> u64 {
    *state = state.wrapping_add(0x9E37_79B9_7F4A_7C15);
    let mut z = *state;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}
