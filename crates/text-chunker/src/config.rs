use serde::{Deserialize, Serialize};

/// Configuration for document splitting and transcript grouping
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkerConfig {
    /// Window size in characters
    pub chunk_size: usize,

    /// Characters shared by consecutive windows
    pub chunk_overlap: usize,

    /// Transcript cues joined into one chunk
    pub transcript_cues_per_chunk: usize,
}

impl Default for ChunkerConfig {
    fn default() -> Self {
        Self {
            chunk_size: 1000,
            chunk_overlap: 200,
            transcript_cues_per_chunk: 20,
        }
    }
}

impl ChunkerConfig {
    /// Create config optimized for embeddings (smaller, focused chunks)
    pub fn for_embeddings() -> Self {
        Self {
            chunk_size: 500,
            chunk_overlap: 100,
            ..Default::default()
        }
    }

    /// Create config for long transcripts (fewer, larger cue groups)
    pub fn for_transcripts() -> Self {
        Self {
            transcript_cues_per_chunk: 40,
            ..Default::default()
        }
    }

    /// Distance between the starts of consecutive windows
    #[must_use]
    pub const fn stride(&self) -> usize {
        self.chunk_size.saturating_sub(self.chunk_overlap)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.chunk_size == 0 {
            return Err("chunk_size must be > 0".to_string());
        }

        if self.chunk_overlap >= self.chunk_size {
            return Err(format!(
                "chunk_overlap ({}) must be smaller than chunk_size ({})",
                self.chunk_overlap, self.chunk_size
            ));
        }

        if self.transcript_cues_per_chunk == 0 {
            return Err("transcript_cues_per_chunk must be > 0".to_string());
        }

        Ok(())
    }
}
