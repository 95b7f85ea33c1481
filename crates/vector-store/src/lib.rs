//! # Ragkit Vector Store
//!
//! In-memory vector storage and exact similarity search over embedded text chunks.
//!
//! ## Features
//!
//! - **Exact search** via linear scan, no index to build or maintain
//! - **Pluggable scoring**: cosine, euclidean- and manhattan-derived similarity, or a closure
//! - **Metadata filtering** by exact `(field, value)` equality
//! - **Batch ingestion** of text chunks through an injected [`EmbeddingProvider`]
//! - **Metadata summary** per source and source type
//!
//! ## Architecture
//!
//! ```text
//! text chunks
//!     │
//!     ├──> EmbeddingProvider (external, async)
//!     │      └─> Vec<f32>
//!     │
//!     ├──> VectorDatabase
//!     │      └─> key → (vector, metadata), insertion ordered
//!     │
//!     └──> search(query, k, Similarity, MetadataFilter)
//!            └─> top-k SearchResult, ties in insertion order
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use ragkit_vector_store::{HashEmbedder, SearchOutput, Similarity, VectorDatabase};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> ragkit_vector_store::Result<()> {
//!     let embedder = Arc::new(HashEmbedder::from_env()?);
//!     let mut db = VectorDatabase::with_embedder(embedder);
//!
//!     db.build_from_list(&["I like to eat broccoli and bananas."], "notes", "text")
//!         .await?;
//!
//!     let results = db
//!         .search_by_text("fruit", 2, &Similarity::Cosine, None, SearchOutput::Full)
//!         .await?;
//!     println!("{results:?}");
//!
//!     Ok(())
//! }
//! ```

mod embeddings;
mod error;
mod similarity;
mod store;
mod summary;
mod types;

pub use embeddings::{
    EmbeddingProvider, HashEmbedder, DEFAULT_EMBEDDING_BATCH, DEFAULT_EMBEDDING_DIM,
};
pub use error::{Result, VectorStoreError};
pub use similarity::{cosine_similarity, euclidean_similarity, manhattan_similarity, Similarity};
pub use store::{VectorDatabase, DEFAULT_SOURCE_NAME, DEFAULT_SOURCE_TYPE};
pub use summary::MetadataSummary;
pub use types::{
    Metadata, MetadataFilter, MetadataValue, Record, SearchOutput, SearchResult, SearchResults,
};
