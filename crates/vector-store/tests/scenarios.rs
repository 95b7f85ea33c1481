use async_trait::async_trait;
use ragkit_vector_store::{
    EmbeddingProvider, MetadataFilter, MetadataValue, Result, SearchOutput, SearchResults,
    Similarity, VectorDatabase, VectorStoreError,
};
use std::collections::HashMap;
use std::sync::Arc;

/// Provider backed by a fixed text → vector table.
struct TableEmbedder {
    table: HashMap<String, Vec<f32>>,
}

impl TableEmbedder {
    fn new(entries: &[(&str, [f32; 2])]) -> Self {
        Self {
            table: entries
                .iter()
                .map(|(text, vector)| ((*text).to_string(), vector.to_vec()))
                .collect(),
        }
    }
}

#[async_trait]
impl EmbeddingProvider for TableEmbedder {
    async fn embed_many(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        texts
            .iter()
            .map(|text| {
                self.table
                    .get(*text)
                    .cloned()
                    .ok_or_else(|| VectorStoreError::embedding(format!("no vector for '{text}'")))
            })
            .collect()
    }
}

fn keys(results: &[ragkit_vector_store::SearchResult]) -> Vec<&str> {
    results.iter().map(|r| r.key.as_str()).collect()
}

#[test]
fn cosine_ties_break_by_insertion_order() {
    let mut db = VectorDatabase::new();
    db.insert("a", vec![1.0, 0.0], None);
    db.insert("b", vec![0.0, 1.0], None);
    db.insert("c", vec![1.0, 0.0], None);

    let results = db
        .search(&[1.0, 0.0], 3, &Similarity::Cosine, None)
        .expect("search");
    assert_eq!(keys(&results), vec!["a", "c", "b"]);
    assert!((results[0].score - 1.0).abs() < 1e-6);
    assert!((results[1].score - 1.0).abs() < 1e-6);
    assert!(results[2].score.abs() < 1e-6);

    let top_two = db
        .search(&[1.0, 0.0], 2, &Similarity::Cosine, None)
        .expect("search");
    assert_eq!(keys(&top_two), vec!["a", "c"]);
}

#[tokio::test]
async fn build_from_list_with_stub_provider() {
    let embedder = TableEmbedder::new(&[("x", [1.0, 0.0]), ("y", [0.0, 1.0])]);
    let mut db = VectorDatabase::with_embedder(Arc::new(embedder));

    db.build_from_list(&["x", "y"], "S", "text")
        .await
        .expect("ingest");

    assert_eq!(db.len(), 2);
    for (key, index, vector) in [("x", 0, [1.0, 0.0]), ("y", 1, [0.0, 1.0])] {
        let record = db.retrieve(key).expect("record");
        assert_eq!(record.vector, vector.to_vec());
        assert_eq!(
            record.metadata.get("chunk_index"),
            Some(&MetadataValue::Integer(index))
        );
        assert_eq!(
            record.metadata.get("total_chunks"),
            Some(&MetadataValue::Integer(2))
        );
        assert_eq!(
            record.metadata.get("source"),
            Some(&MetadataValue::from("S"))
        );
    }
}

#[tokio::test]
async fn provider_error_reaches_caller_and_commits_nothing() {
    let embedder = TableEmbedder::new(&[("x", [1.0, 0.0])]);
    let mut db = VectorDatabase::with_embedder(Arc::new(embedder));

    let err = db
        .build_from_list(&["x", "missing"], "S", "text")
        .await
        .expect_err("unknown text must fail");
    assert_eq!(err.to_string(), "Embedding error: no vector for 'missing'");
    assert!(db.is_empty());
}

#[test]
fn summarize_empty_store_is_default() {
    let summary = VectorDatabase::new().summarize();
    assert_eq!(summary.total_chunks, 0);
    assert!(summary.sources.is_empty());
    assert!(summary.source_types.is_empty());
    assert!(summary.chunks_per_source.is_empty());
    assert!(summary.sample_metadata.is_none());
}

#[test]
fn filter_that_matches_nothing_yields_empty_results() {
    let mut db = VectorDatabase::new();
    db.insert("a", vec![1.0, 0.0], None);
    db.insert("b", vec![0.0, 1.0], None);

    let filter = MetadataFilter::new().with("source", "nope");
    let results = db
        .search(&[1.0, 0.0], 5, &Similarity::Cosine, Some(&filter))
        .expect("search");
    assert!(results.is_empty());
}

#[tokio::test]
async fn text_search_filters_by_source() {
    let embedder = TableEmbedder::new(&[
        ("blog one", [1.0, 0.0]),
        ("blog two", [0.6, 0.8]),
        ("video one", [1.0, 0.1]),
        ("query", [1.0, 0.0]),
    ]);
    let mut db = VectorDatabase::with_embedder(Arc::new(embedder));
    db.build_from_list(&["blog one", "blog two"], "blog", "text")
        .await
        .expect("ingest blog");
    db.build_from_list(&["video one"], "video", "transcript")
        .await
        .expect("ingest video");

    let unfiltered = db
        .search_by_text("query", 2, &Similarity::Cosine, None, SearchOutput::Keys)
        .await
        .expect("search");
    assert_eq!(
        unfiltered,
        SearchResults::Keys(vec!["blog one".to_string(), "video one".to_string()])
    );

    let filter = MetadataFilter::new().with("source_type", "text");
    let filtered = db
        .search_by_text(
            "query",
            5,
            &Similarity::Cosine,
            Some(&filter),
            SearchOutput::Keys,
        )
        .await
        .expect("search");
    assert_eq!(filtered.keys(), vec!["blog one", "blog two"]);
}
