//! Hierarchical addressing: `collection/doc/collection/doc/...`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Malformed document or collection path.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PathError {
    #[error("path is empty")]
    Empty,

    #[error("path '{0}' contains an empty segment")]
    EmptySegment(String),

    #[error("'{0}' is not a document path (needs an even number of segments)")]
    NotADocument(String),

    #[error("'{0}' is not a collection path (needs an odd number of segments)")]
    NotACollection(String),

    #[error("segment '{0}' contains '/'")]
    InvalidSegment(String),
}

fn split(raw: &str) -> Result<Vec<String>, PathError> {
    let trimmed = raw.trim_matches('/');
    if trimmed.is_empty() {
        return Err(PathError::Empty);
    }
    let segments: Vec<String> = trimmed.split('/').map(ToOwned::to_owned).collect();
    if segments.iter().any(String::is_empty) {
        return Err(PathError::EmptySegment(raw.to_owned()));
    }
    Ok(segments)
}

fn check_segment(segment: &str) -> Result<(), PathError> {
    if segment.is_empty() {
        return Err(PathError::EmptySegment(segment.to_owned()));
    }
    if segment.contains('/') {
        return Err(PathError::InvalidSegment(segment.to_owned()));
    }
    Ok(())
}

/// Path of a single document, e.g. `users/A/todos/42`.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DocPath {
    segments: Vec<String>,
}

impl DocPath {
    /// Parse a slash-separated document path.
    ///
    /// # Errors
    ///
    /// Returns [`PathError`] when the path is empty, has empty segments or an
    /// odd number of segments.
    pub fn parse(raw: &str) -> Result<Self, PathError> {
        let segments = split(raw)?;
        if segments.len() % 2 != 0 {
            return Err(PathError::NotADocument(raw.to_owned()));
        }
        Ok(Self { segments })
    }

    /// Top-level document `collection/id`.
    ///
    /// # Errors
    ///
    /// Returns [`PathError`] when either segment is empty or contains `/`.
    pub fn root(collection: &str, id: &str) -> Result<Self, PathError> {
        check_segment(collection)?;
        check_segment(id)?;
        Ok(Self {
            segments: vec![collection.to_owned(), id.to_owned()],
        })
    }

    /// Document `id` in subcollection `collection` of this document.
    ///
    /// # Errors
    ///
    /// Returns [`PathError`] when either segment is empty or contains `/`.
    pub fn child(&self, collection: &str, id: &str) -> Result<Self, PathError> {
        check_segment(collection)?;
        check_segment(id)?;
        let mut segments = self.segments.clone();
        segments.push(collection.to_owned());
        segments.push(id.to_owned());
        Ok(Self { segments })
    }

    /// Subcollection `collection` of this document.
    ///
    /// # Errors
    ///
    /// Returns [`PathError`] when the segment is empty or contains `/`.
    pub fn collection(&self, collection: &str) -> Result<CollectionPath, PathError> {
        check_segment(collection)?;
        let mut segments = self.segments.clone();
        segments.push(collection.to_owned());
        Ok(CollectionPath { segments })
    }

    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Last segment: the document id.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.segments[self.segments.len() - 1]
    }

    /// Id of the collection that directly contains this document.
    #[must_use]
    pub fn collection_id(&self) -> &str {
        &self.segments[self.segments.len() - 2]
    }

    /// The collection that directly contains this document.
    #[must_use]
    pub fn parent(&self) -> CollectionPath {
        CollectionPath {
            segments: self.segments[..self.segments.len() - 1].to_vec(),
        }
    }

    /// Number of `collection/doc` pairs.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.segments.len() / 2
    }
}

impl fmt::Display for DocPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("/"))
    }
}

impl FromStr for DocPath {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for DocPath {
    type Error = PathError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<DocPath> for String {
    fn from(path: DocPath) -> Self {
        path.to_string()
    }
}

/// Path of a collection, e.g. `users` or `users/A/todos`.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CollectionPath {
    segments: Vec<String>,
}

impl CollectionPath {
    /// Parse a slash-separated collection path.
    ///
    /// # Errors
    ///
    /// Returns [`PathError`] when the path is empty, has empty segments or an
    /// even number of segments.
    pub fn parse(raw: &str) -> Result<Self, PathError> {
        let segments = split(raw)?;
        if segments.len() % 2 == 0 {
            return Err(PathError::NotACollection(raw.to_owned()));
        }
        Ok(Self { segments })
    }

    /// Document `id` inside this collection.
    ///
    /// # Errors
    ///
    /// Returns [`PathError`] when the id is empty or contains `/`.
    pub fn doc(&self, id: &str) -> Result<DocPath, PathError> {
        check_segment(id)?;
        let mut segments = self.segments.clone();
        segments.push(id.to_owned());
        Ok(DocPath { segments })
    }

    /// Last segment: the collection id.
    #[must_use]
    pub fn collection_id(&self) -> &str {
        &self.segments[self.segments.len() - 1]
    }

    /// The document this collection hangs off, `None` for root collections.
    #[must_use]
    pub fn parent_doc(&self) -> Option<DocPath> {
        (self.segments.len() > 1).then(|| DocPath {
            segments: self.segments[..self.segments.len() - 1].to_vec(),
        })
    }

    /// Whether `path` is a direct child of this collection.
    #[must_use]
    pub fn contains(&self, path: &DocPath) -> bool {
        path.segments.len() == self.segments.len() + 1
            && path.segments[..self.segments.len()] == self.segments[..]
    }
}

impl fmt::Display for CollectionPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("/"))
    }
}

impl FromStr for CollectionPath {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for CollectionPath {
    type Error = PathError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<CollectionPath> for String {
    fn from(path: CollectionPath) -> Self {
        path.to_string()
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn parses_nested_document_path() {
        let p = DocPath::parse("users/A/todos/42").unwrap();
        assert_eq!(p.id(), "42");
        assert_eq!(p.collection_id(), "todos");
        assert_eq!(p.depth(), 2);
        assert_eq!(p.parent().to_string(), "users/A/todos");
        assert_eq!(p.parent().parent_doc().unwrap().to_string(), "users/A");
    }

    #[test]
    fn rejects_collection_as_document() {
        assert_eq!(
            DocPath::parse("users/A/todos"),
            Err(PathError::NotADocument("users/A/todos".to_owned()))
        );
        assert!(matches!(
            CollectionPath::parse("users/A"),
            Err(PathError::NotACollection(_))
        ));
    }

    #[test]
    fn rejects_empty_segments() {
        assert_eq!(DocPath::parse(""), Err(PathError::Empty));
        assert!(matches!(
            DocPath::parse("users//todos/1"),
            Err(PathError::EmptySegment(_))
        ));
    }

    #[test]
    fn child_rejects_separator_in_segment() {
        let user = DocPath::root("users", "A").unwrap();
        assert!(matches!(
            user.child("todos", "x/y"),
            Err(PathError::InvalidSegment(_))
        ));
    }

    #[test]
    fn collection_contains_only_direct_children() {
        let todos = CollectionPath::parse("users/A/todos").unwrap();
        assert!(todos.contains(&DocPath::parse("users/A/todos/1").unwrap()));
        assert!(!todos.contains(&DocPath::parse("users/B/todos/1").unwrap()));
        let nested = DocPath::parse("users/A/todos/1/notes/n").unwrap();
        assert!(!todos.contains(&nested));
    }

    #[test]
    fn serializes_as_plain_string() {
        let p = DocPath::parse("users/A").unwrap();
        assert_eq!(serde_json::to_string(&p).unwrap(), r#""users/A""#);
        let back: DocPath = serde_json::from_str(r#""users/A""#).unwrap();
        assert_eq!(back, p);
    }
}
