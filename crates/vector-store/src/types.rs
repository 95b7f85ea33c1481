use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::{self, Display};

/// A scalar value stored in a record's metadata.
///
/// Filter equality is variant-sensitive: `Integer(1)` never equals `Float(1.0)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetadataValue {
    Bool(bool),
    Integer(i64),
    Float(f64),
    Timestamp(DateTime<Utc>),
    Text(String),
}

impl Display for MetadataValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(value) => write!(f, "{value}"),
            Self::Integer(value) => write!(f, "{value}"),
            Self::Float(value) => write!(f, "{value}"),
            Self::Timestamp(value) => f.write_str(&value.to_rfc3339()),
            Self::Text(value) => f.write_str(value),
        }
    }
}

impl From<&str> for MetadataValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for MetadataValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<bool> for MetadataValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for MetadataValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<usize> for MetadataValue {
    fn from(value: usize) -> Self {
        Self::Integer(i64::try_from(value).unwrap_or(i64::MAX))
    }
}

impl From<f64> for MetadataValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<DateTime<Utc>> for MetadataValue {
    fn from(value: DateTime<Utc>) -> Self {
        Self::Timestamp(value)
    }
}

/// Free-form metadata attached 1:1 to a record key.
pub type Metadata = BTreeMap<String, MetadataValue>;

/// Exact-match `(field, value)` constraints narrowing the search candidate set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetadataFilter {
    constraints: BTreeMap<String, MetadataValue>,
}

impl MetadataFilter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: require `field == value`.
    #[must_use]
    pub fn with(mut self, field: impl Into<String>, value: impl Into<MetadataValue>) -> Self {
        self.constraints.insert(field.into(), value.into());
        self
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }

    /// True when every constraint is present in `metadata` with an equal value.
    #[must_use]
    pub fn matches(&self, metadata: &Metadata) -> bool {
        self.constraints
            .iter()
            .all(|(field, expected)| metadata.get(field) == Some(expected))
    }
}

impl<K, V> FromIterator<(K, V)> for MetadataFilter
where
    K: Into<String>,
    V: Into<MetadataValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            constraints: iter
                .into_iter()
                .map(|(field, value)| (field.into(), value.into()))
                .collect(),
        }
    }
}

/// One stored `(key, vector, metadata)` triple.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub key: String,
    pub vector: Vec<f32>,
    pub metadata: Metadata,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub key: String,
    pub score: f32,
    pub metadata: Metadata,
}

/// Presentation of text-search results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchOutput {
    /// Keys only (the chunk text for ingested records)
    Keys,
    /// `(key, score)` pairs
    Scored,
    #[default]
    Full,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SearchResults {
    Keys(Vec<String>),
    Scored(Vec<(String, f32)>),
    Full(Vec<SearchResult>),
}

impl SearchResults {
    #[must_use]
    pub fn project(results: Vec<SearchResult>, output: SearchOutput) -> Self {
        match output {
            SearchOutput::Keys => Self::Keys(results.into_iter().map(|r| r.key).collect()),
            SearchOutput::Scored => {
                Self::Scored(results.into_iter().map(|r| (r.key, r.score)).collect())
            }
            SearchOutput::Full => Self::Full(results),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Keys(keys) => keys.len(),
            Self::Scored(pairs) => pairs.len(),
            Self::Full(results) => results.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn keys(&self) -> Vec<&str> {
        match self {
            Self::Keys(keys) => keys.iter().map(String::as_str).collect(),
            Self::Scored(pairs) => pairs.iter().map(|(key, _)| key.as_str()).collect(),
            Self::Full(results) => results.iter().map(|r| r.key.as_str()).collect(),
        }
    }
}
