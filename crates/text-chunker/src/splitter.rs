use crate::config::ChunkerConfig;
use crate::error::{ChunkerError, Result};

/// Fixed-size character windows with overlap.
#[derive(Debug, Clone)]
pub struct TextSplitter {
    config: ChunkerConfig,
}

impl TextSplitter {
    pub fn new(config: ChunkerConfig) -> Result<Self> {
        config.validate().map_err(ChunkerError::invalid_config)?;
        Ok(Self { config })
    }

    /// Windows of `chunk_size` characters starting every `chunk_size - chunk_overlap`
    /// characters. The tail window may be shorter; empty text yields no chunks.
    #[must_use]
    pub fn split(&self, text: &str) -> Vec<String> {
        let offsets: Vec<usize> = text.char_indices().map(|(offset, _)| offset).collect();
        let total = offsets.len();

        (0..total)
            .step_by(self.config.stride())
            .map(|start| {
                let end = (start + self.config.chunk_size).min(total);
                let byte_end = offsets.get(end).copied().unwrap_or(text.len());
                text[offsets[start]..byte_end].to_string()
            })
            .collect()
    }

    /// Splits every document, preserving document order.
    #[must_use]
    pub fn split_texts<S: AsRef<str>>(&self, texts: &[S]) -> Vec<String> {
        let chunks: Vec<String> = texts
            .iter()
            .flat_map(|text| self.split(text.as_ref()))
            .collect();
        log::debug!("Split {} documents into {} chunks", texts.len(), chunks.len());
        chunks
    }
}
