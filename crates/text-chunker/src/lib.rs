//! # Ragkit Text Chunker
//!
//! Turns local documents into ordered text chunks ready for embedding.
//!
//! ## Architecture
//!
//! ```text
//! .txt file / directory            .vtt transcript
//!     │                                 │
//!     ├──> load_documents               ├──> VttParser → TranscriptCue[]
//!     │                                 │
//!     └──> TextSplitter                 └──> chunk_cues (every N cues)
//!          └─> overlapping char windows      └─> joined cue text
//! ```
//!
//! ## Example
//!
//! ```rust
//! use ragkit_text_chunker::{ChunkerConfig, TextSplitter};
//!
//! let config = ChunkerConfig {
//!     chunk_size: 8,
//!     chunk_overlap: 2,
//!     ..ChunkerConfig::default()
//! };
//! let splitter = TextSplitter::new(config).unwrap();
//!
//! let chunks = splitter.split("the quick brown fox");
//! assert_eq!(chunks[0], "the quic");
//! assert_eq!(chunks[1], "ick brow");
//! ```

mod config;
mod error;
mod loader;
mod splitter;
mod transcript;

pub use config::ChunkerConfig;
pub use error::{ChunkerError, Result};
pub use loader::{load_documents, source_name, Document};
pub use splitter::TextSplitter;
pub use transcript::{chunk_cues, full_transcript, read_transcript, TranscriptCue, VttParser};
