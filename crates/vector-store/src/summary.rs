use crate::types::{Metadata, MetadataValue};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

const UNKNOWN: &str = "unknown";

/// Aggregate view over the metadata of every stored record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetadataSummary {
    pub total_chunks: usize,
    pub sources: Vec<String>,
    pub source_types: Vec<String>,
    pub chunks_per_source: BTreeMap<String, usize>,
    /// Metadata of the first record in insertion order
    pub sample_metadata: Option<Metadata>,
}

impl MetadataSummary {
    pub(crate) fn from_metadata<'a>(records: impl IntoIterator<Item = &'a Metadata>) -> Self {
        let mut summary = Self::default();
        let mut source_types = BTreeSet::new();

        for metadata in records {
            if summary.sample_metadata.is_none() {
                summary.sample_metadata = Some(metadata.clone());
            }
            summary.total_chunks += 1;

            let source = field_or_unknown(metadata, "source");
            source_types.insert(field_or_unknown(metadata, "source_type"));
            *summary.chunks_per_source.entry(source).or_insert(0) += 1;
        }

        summary.sources = summary.chunks_per_source.keys().cloned().collect();
        summary.source_types = source_types.into_iter().collect();
        summary
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total_chunks == 0
    }
}

fn field_or_unknown(metadata: &Metadata, field: &str) -> String {
    metadata
        .get(field)
        .map_or_else(|| UNKNOWN.to_string(), MetadataValue::to_string)
}
