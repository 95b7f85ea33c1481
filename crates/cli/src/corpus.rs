use anyhow::{bail, Context as AnyhowContext, Result};
use ragkit_text_chunker::{
    chunk_cues, full_transcript, load_documents, read_transcript, source_name, ChunkerConfig,
    TextSplitter,
};
use ragkit_vector_store::{HashEmbedder, VectorDatabase, DEFAULT_SOURCE_TYPE};
use std::path::PathBuf;
use std::sync::Arc;

pub(crate) struct SourceOptions {
    pub texts: Vec<PathBuf>,
    pub transcripts: Vec<PathBuf>,
    pub chunk_size: usize,
    pub chunk_overlap: usize,
    pub cues_per_chunk: usize,
    pub whole_transcripts: bool,
}

/// Loads every configured source into a fresh database backed by the
/// deterministic hash embedder.
pub(crate) async fn build_database(options: &SourceOptions) -> Result<VectorDatabase> {
    if options.texts.is_empty() && options.transcripts.is_empty() {
        bail!("No sources given; pass at least one --text or --transcript path");
    }

    let embedder = HashEmbedder::from_env().context("Invalid embedding configuration")?;
    log::debug!(
        "Hash embedder: dimension {}, batch size {}",
        embedder.dimension(),
        embedder.max_batch()
    );
    let mut db = VectorDatabase::with_embedder(Arc::new(embedder));

    let config = ChunkerConfig {
        chunk_size: options.chunk_size,
        chunk_overlap: options.chunk_overlap,
        transcript_cues_per_chunk: options.cues_per_chunk,
    };
    let splitter = TextSplitter::new(config).context("Invalid chunking options")?;

    for path in &options.texts {
        let documents = load_documents(path)
            .with_context(|| format!("Failed to load text from {}", path.display()))?;
        for document in documents {
            let chunks = splitter.split(&document.content);
            db.build_from_list(chunks.as_slice(), &document.source_name(), DEFAULT_SOURCE_TYPE)
                .await
                .with_context(|| format!("Failed to ingest {}", document.path.display()))?;
        }
    }

    for path in &options.transcripts {
        let cues = read_transcript(path)
            .with_context(|| format!("Failed to read transcript {}", path.display()))?;
        let chunks = if options.whole_transcripts {
            vec![full_transcript(&cues)]
        } else {
            chunk_cues(&cues, options.cues_per_chunk)?
        };
        db.build_from_list(chunks.as_slice(), &source_name(path), "transcript")
            .await
            .with_context(|| format!("Failed to ingest {}", path.display()))?;
    }

    log::info!("Database ready with {} records", db.len());
    Ok(db)
}
