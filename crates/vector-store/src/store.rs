use crate::embeddings::EmbeddingProvider;
use crate::error::{Result, VectorStoreError};
use crate::similarity::Similarity;
use crate::summary::MetadataSummary;
use crate::types::{
    Metadata, MetadataFilter, MetadataValue, Record, SearchOutput, SearchResult, SearchResults,
};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

pub const DEFAULT_SOURCE_NAME: &str = "default";
pub const DEFAULT_SOURCE_TYPE: &str = "text";

/// In-memory store of `(key, vector, metadata)` records with exact linear-scan search.
///
/// Records keep the order in which their key was first inserted; re-inserting a
/// key replaces its vector and metadata in place. The store has no internal
/// locking: wrap it in a single-writer lock when sharing across threads.
#[derive(Default)]
pub struct VectorDatabase {
    records: Vec<Record>,
    positions: HashMap<String, usize>,
    embedder: Option<Arc<dyn EmbeddingProvider>>,
}

impl fmt::Debug for VectorDatabase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VectorDatabase")
            .field("records", &self.records.len())
            .field("embedder", &self.embedder.is_some())
            .finish()
    }
}

impl VectorDatabase {
    /// Database without an embedding provider; only vector-level operations are available.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_embedder(embedder: Arc<dyn EmbeddingProvider>) -> Self {
        Self {
            embedder: Some(embedder),
            ..Self::default()
        }
    }

    /// Insert or overwrite `key`.
    ///
    /// Without `metadata` a default record is synthesized:
    /// `{timestamp, source: "unknown", chunk_index: <store size after insert - 1>}`.
    /// `Some(Metadata::new())` is stored as-is.
    pub fn insert(&mut self, key: impl Into<String>, vector: Vec<f32>, metadata: Option<Metadata>) {
        let key = key.into();
        let existing = self.positions.get(&key).copied();
        let position = existing.unwrap_or(self.records.len());
        let metadata = metadata.unwrap_or_else(|| {
            // Store size after this insert, minus one; an overwrite does not grow the store.
            let chunk_index = match existing {
                Some(_) => self.records.len().saturating_sub(1),
                None => self.records.len(),
            };
            default_metadata(chunk_index, Utc::now())
        });

        if let Some(record) = self.records.get_mut(position) {
            record.vector = vector;
            record.metadata = metadata;
            return;
        }

        self.positions.insert(key.clone(), position);
        self.records.push(Record {
            key,
            vector,
            metadata,
        });
    }

    /// Record stored under `key`, or `None` when absent.
    #[must_use]
    pub fn retrieve(&self, key: &str) -> Option<&Record> {
        self.positions
            .get(key)
            .and_then(|&position| self.records.get(position))
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.positions.contains_key(key)
    }

    /// Number of distinct keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records in insertion order.
    pub fn records(&self) -> impl Iterator<Item = &Record> {
        self.records.iter()
    }

    /// Top `k` records by `similarity` to `query`, best first.
    ///
    /// Candidates are the records whose metadata satisfies `filter`. Equal scores
    /// keep insertion order. Fails when `k == 0`, when a candidate's dimension
    /// differs from the query's, or when the scoring function rejects a pair.
    pub fn search(
        &self,
        query: &[f32],
        k: usize,
        similarity: &Similarity,
        filter: Option<&MetadataFilter>,
    ) -> Result<Vec<SearchResult>> {
        if k == 0 {
            return Err(VectorStoreError::invalid_argument("k must be at least 1"));
        }

        let mut scored: Vec<(&Record, f32)> = Vec::new();
        for record in self
            .records
            .iter()
            .filter(|record| filter.map_or(true, |f| f.matches(&record.metadata)))
        {
            if record.vector.len() != query.len() {
                return Err(VectorStoreError::InvalidDimension {
                    expected: query.len(),
                    actual: record.vector.len(),
                });
            }
            let score = similarity.score(query, &record.vector)?;
            scored.push((record, score));
        }

        // Stable: ties stay in insertion order.
        scored.sort_by(|a, b| b.1.total_cmp(&a.1));
        scored.truncate(k);

        log::debug!(
            "Search ({:?}, k={k}) returned {} results",
            similarity,
            scored.len()
        );

        Ok(scored
            .into_iter()
            .map(|(record, score)| SearchResult {
                key: record.key.clone(),
                score,
                metadata: record.metadata.clone(),
            })
            .collect())
    }

    /// Embeds `query` with the configured provider, then delegates to [`Self::search`].
    pub async fn search_by_text(
        &self,
        query: &str,
        k: usize,
        similarity: &Similarity,
        filter: Option<&MetadataFilter>,
        output: SearchOutput,
    ) -> Result<SearchResults> {
        let embedder = self.embedder()?;
        log::debug!("Searching for: '{query}' (k: {k})");
        let query_vector = embedder.embed_one(query).await?;
        let results = self.search(&query_vector, k, similarity, filter)?;
        Ok(SearchResults::project(results, output))
    }

    /// Embeds every chunk and inserts it under its own text as the key.
    ///
    /// All vectors are obtained before the first insert, so a provider failure
    /// leaves the database untouched. Duplicate chunk texts overwrite each other.
    /// Returns the number of chunks written.
    pub async fn build_from_list<S: AsRef<str>>(
        &mut self,
        chunks: &[S],
        source_name: &str,
        source_type: &str,
    ) -> Result<usize> {
        if chunks.is_empty() {
            log::debug!("No chunks to ingest for source '{source_name}'");
            return Ok(0);
        }

        let embedder = self.embedder()?.clone();
        let texts: Vec<&str> = chunks.iter().map(|chunk| chunk.as_ref()).collect();

        log::info!(
            "Embedding {} chunks from source '{source_name}' ({source_type})",
            texts.len()
        );
        let vectors = embedder.embed_many(&texts).await?;
        if vectors.len() != texts.len() {
            return Err(VectorStoreError::EmbeddingCountMismatch {
                expected: texts.len(),
                actual: vectors.len(),
            });
        }

        let ingested_at = Utc::now();
        let total_chunks = texts.len();
        for (index, (text, vector)) in texts.iter().zip(vectors).enumerate() {
            let metadata = chunk_metadata(
                source_name,
                source_type,
                index,
                text,
                total_chunks,
                ingested_at,
            );
            self.insert(*text, vector, Some(metadata));
        }

        log::info!(
            "Ingested {total_chunks} chunks from '{source_name}'. Total: {}",
            self.len()
        );
        Ok(total_chunks)
    }

    #[must_use]
    pub fn summarize(&self) -> MetadataSummary {
        MetadataSummary::from_metadata(self.records.iter().map(|record| &record.metadata))
    }

    fn embedder(&self) -> Result<&Arc<dyn EmbeddingProvider>> {
        self.embedder
            .as_ref()
            .ok_or(VectorStoreError::MissingEmbedder)
    }
}

fn default_metadata(position: usize, now: DateTime<Utc>) -> Metadata {
    Metadata::from([
        ("timestamp".to_string(), MetadataValue::Timestamp(now)),
        ("source".to_string(), MetadataValue::from("unknown")),
        ("chunk_index".to_string(), MetadataValue::from(position)),
    ])
}

fn chunk_metadata(
    source_name: &str,
    source_type: &str,
    index: usize,
    text: &str,
    total_chunks: usize,
    ingested_at: DateTime<Utc>,
) -> Metadata {
    Metadata::from([
        ("source".to_string(), MetadataValue::from(source_name)),
        ("source_type".to_string(), MetadataValue::from(source_type)),
        ("chunk_index".to_string(), MetadataValue::from(index)),
        (
            "chunk_length".to_string(),
            MetadataValue::from(text.chars().count()),
        ),
        ("timestamp".to_string(), MetadataValue::Timestamp(ingested_at)),
        ("total_chunks".to_string(), MetadataValue::from(total_chunks)),
    ])
}
