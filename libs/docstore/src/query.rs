//! Collection and collection-group queries.

use serde_json::Value;

use crate::document::Snapshot;
use crate::path::CollectionPath;

/// What a query scans.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QueryTarget {
    /// Direct children of one collection.
    Collection(CollectionPath),
    /// Every collection with this id, at any depth.
    Group(String),
}

/// A field predicate. All filters of a query are `ANDed`.
#[derive(Clone, Debug, PartialEq)]
pub enum FieldFilter {
    /// `field == value`
    Eq { field: String, value: Value },
    /// `value IN field` for array fields.
    ArrayContains { field: String, value: Value },
}

impl FieldFilter {
    #[must_use]
    pub fn matches(&self, snapshot: &Snapshot) -> bool {
        match self {
            Self::Eq { field, value } => snapshot.data.get(field) == Some(value),
            Self::ArrayContains { field, value } => snapshot
                .data
                .get(field)
                .and_then(Value::as_array)
                .is_some_and(|items| items.contains(value)),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Query {
    target: QueryTarget,
    filters: Vec<FieldFilter>,
}

impl Query {
    #[must_use]
    pub fn collection(path: CollectionPath) -> Self {
        Self {
            target: QueryTarget::Collection(path),
            filters: Vec::new(),
        }
    }

    #[must_use]
    pub fn group(collection_id: impl Into<String>) -> Self {
        Self {
            target: QueryTarget::Group(collection_id.into()),
            filters: Vec::new(),
        }
    }

    #[must_use]
    pub fn where_eq(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filters.push(FieldFilter::Eq {
            field: field.into(),
            value: value.into(),
        });
        self
    }

    #[must_use]
    pub fn where_array_contains(
        mut self,
        field: impl Into<String>,
        value: impl Into<Value>,
    ) -> Self {
        self.filters.push(FieldFilter::ArrayContains {
            field: field.into(),
            value: value.into(),
        });
        self
    }

    #[must_use]
    pub fn target(&self) -> &QueryTarget {
        &self.target
    }

    #[must_use]
    pub fn filters(&self) -> &[FieldFilter] {
        &self.filters
    }

    #[must_use]
    pub fn is_collection_group(&self) -> bool {
        matches!(self.target, QueryTarget::Group(_))
    }

    /// Whether a stored snapshot is selected by this query.
    #[must_use]
    pub fn matches(&self, snapshot: &Snapshot) -> bool {
        let in_target = match &self.target {
            QueryTarget::Collection(c) => c.contains(&snapshot.path),
            QueryTarget::Group(id) => snapshot.path.collection_id() == id,
        };
        in_target && self.filters.iter().all(|f| f.matches(snapshot))
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::document::Document;
    use crate::path::DocPath;
    use serde_json::json;

    fn snap(path: &str, data: Document) -> Snapshot {
        Snapshot {
            path: DocPath::parse(path).unwrap(),
            data,
            version: 1,
        }
    }

    #[test]
    fn group_query_matches_any_depth() {
        let q = Query::group("todos").where_array_contains("sharedWith", "B");
        let shared = Document::new().with("sharedWith", json!(["B"]));
        assert!(q.matches(&snap("users/A/todos/1", shared.clone())));
        assert!(q.matches(&snap("teams/T/users/A/todos/1", shared.clone())));
        assert!(!q.matches(&snap("users/A/contacts/B", shared)));
        assert!(!q.matches(&snap("users/A/todos/2", Document::new())));
    }

    #[test]
    fn collection_query_applies_eq_filter() {
        let q = Query::collection(CollectionPath::parse("users").unwrap())
            .where_eq("email", "u2@x.com");
        assert!(!q.is_collection_group());
        assert!(q.matches(&snap(
            "users/B",
            Document::new().with("email", json!("u2@x.com"))
        )));
        assert!(!q.matches(&snap(
            "users/A",
            Document::new().with("email", json!("u1@x.com"))
        )));
    }
}
