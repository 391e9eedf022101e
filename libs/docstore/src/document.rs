//! Document bodies and snapshots.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::path::DocPath;

/// Failure to convert between a typed record and a document body.
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("record does not serialize to a JSON object")]
    NotAnObject,

    #[error("document encoding failed: {0}")]
    Codec(#[from] serde_json::Error),
}

/// A document body: a JSON object of named fields.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Document(Map<String, Value>);

impl Document {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Serialize a typed record into a document body.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError`] if the record fails to serialize or is not
    /// a JSON object.
    pub fn from_record<T: Serialize>(record: &T) -> Result<Self, DocumentError> {
        match serde_json::to_value(record)? {
            Value::Object(map) => Ok(Self(map)),
            _ => Err(DocumentError::NotAnObject),
        }
    }

    /// Deserialize the body into a typed record.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError::Codec`] if the fields do not match `T`.
    pub fn to_record<T: DeserializeOwned>(&self) -> Result<T, DocumentError> {
        Ok(serde_json::from_value(Value::Object(self.0.clone()))?)
    }

    #[must_use]
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    #[must_use]
    pub fn get_str(&self, field: &str) -> Option<&str> {
        self.0.get(field).and_then(Value::as_str)
    }

    pub fn insert(&mut self, field: impl Into<String>, value: Value) -> Option<Value> {
        self.0.insert(field.into(), value)
    }

    #[must_use]
    pub fn with(mut self, field: impl Into<String>, value: Value) -> Self {
        self.0.insert(field.into(), value);
        self
    }

    /// String members of an array field. Missing fields and non-string
    /// members read as absent.
    #[must_use]
    pub fn string_set(&self, field: &str) -> Vec<&str> {
        self.0
            .get(field)
            .and_then(Value::as_array)
            .map(|items| items.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default()
    }

    /// Whether array field `field` contains the string `member`.
    #[must_use]
    pub fn set_contains(&self, field: &str, member: &str) -> bool {
        self.string_set(field).contains(&member)
    }

    /// Shallow merge: fields of `patch` replace fields of `self`.
    pub fn merge(&mut self, patch: &Document) {
        for (k, v) in &patch.0 {
            self.0.insert(k.clone(), v.clone());
        }
    }

    #[must_use]
    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }
}

impl From<Map<String, Value>> for Document {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// A document as read from the store, with the commit version that last
/// wrote it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub path: DocPath,
    pub data: Document,
    pub version: u64,
}

impl Snapshot {
    /// Deserialize the body into a typed record.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError::Codec`] if the fields do not match `T`.
    pub fn to_record<T: DeserializeOwned>(&self) -> Result<T, DocumentError> {
        self.data.to_record()
    }
}
