//! WebVTT transcript parsing and count-based grouping.
//!
//! Grouping joins a fixed number of consecutive cues. Chunk boundaries are not
//! aligned to sentences or to elapsed time.

use crate::error::{ChunkerError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const TIMING_SEPARATOR: &str = "-->";

/// One timed caption from a transcript
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptCue {
    pub start: String,
    pub end: String,
    pub text: String,
}

/// Parses WebVTT blocks into cleaned cues
#[derive(Debug, Clone)]
pub struct VttParser {
    inline_tag: Regex,
    whitespace: Regex,
}

impl VttParser {
    pub fn new() -> Result<Self> {
        Ok(Self {
            inline_tag: Regex::new(r"<[^>]+>")?,
            whitespace: Regex::new(r"\s+")?,
        })
    }

    /// Cues in file order. Blocks without a timing line (header, notes, styles)
    /// and cues whose text is empty after cleanup are skipped.
    #[must_use]
    pub fn parse(&self, vtt: &str) -> Vec<TranscriptCue> {
        let normalized = vtt.replace("\r\n", "\n");
        normalized
            .split("\n\n")
            .filter_map(|block| self.parse_block(block))
            .collect()
    }

    /// Strips inline timing/style tags and collapses whitespace.
    #[must_use]
    pub fn clean_text(&self, text: &str) -> String {
        let without_tags = self.inline_tag.replace_all(text, "");
        self.whitespace
            .replace_all(&without_tags, " ")
            .trim()
            .to_string()
    }

    fn parse_block(&self, block: &str) -> Option<TranscriptCue> {
        let mut lines = block.lines().skip_while(|line| !line.contains(TIMING_SEPARATOR));
        let timing = lines.next()?;
        let (start, end) = timing.split_once(TIMING_SEPARATOR)?;
        // Cue settings may follow the end timestamp.
        let end = end.split_whitespace().next().unwrap_or_default();

        let text = self.clean_text(&lines.collect::<Vec<_>>().join(" "));
        if text.is_empty() {
            return None;
        }

        Some(TranscriptCue {
            start: start.trim().to_string(),
            end: end.to_string(),
            text,
        })
    }
}

/// Read and parse a `.vtt` file; a file without cues is [`ChunkerError::EmptyContent`].
pub fn read_transcript(path: impl AsRef<Path>) -> Result<Vec<TranscriptCue>> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;
    let cues = VttParser::new()?.parse(&content);
    if cues.is_empty() {
        return Err(ChunkerError::EmptyContent);
    }
    log::debug!("Parsed {} cues from {}", cues.len(), path.display());
    Ok(cues)
}

/// Join every `cues_per_chunk` consecutive cues with a space; the last group may be smaller.
pub fn chunk_cues(cues: &[TranscriptCue], cues_per_chunk: usize) -> Result<Vec<String>> {
    if cues_per_chunk == 0 {
        return Err(ChunkerError::invalid_config(
            "transcript_cues_per_chunk must be > 0",
        ));
    }
    Ok(cues
        .chunks(cues_per_chunk)
        .map(join_cues)
        .collect())
}

/// Whole transcript as a single text.
#[must_use]
pub fn full_transcript(cues: &[TranscriptCue]) -> String {
    join_cues(cues)
}

fn join_cues(cues: &[TranscriptCue]) -> String {
    cues.iter()
        .map(|cue| cue.text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}
