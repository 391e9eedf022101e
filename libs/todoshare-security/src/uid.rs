use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Longest identifier accepted from the identity provider.
pub const MAX_UID_LEN: usize = 128;

/// Opaque identifier of an authenticated identity.
///
/// The value is assigned by the identity provider and never interpreted.
/// It is used verbatim as a document path segment, so it must be non-empty
/// and must not contain `/`.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Uid(String);

/// Rejected identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidUid {
    #[error("uid must not be empty")]
    Empty,

    #[error("uid must not contain '/'")]
    Separator,

    #[error("uid exceeds {MAX_UID_LEN} bytes")]
    TooLong,
}

impl Uid {
    /// Validate and wrap an identifier.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidUid`] if the value is empty, longer than
    /// [`MAX_UID_LEN`] or contains a path separator.
    pub fn new(value: impl Into<String>) -> Result<Self, InvalidUid> {
        let value = value.into();
        if value.is_empty() {
            return Err(InvalidUid::Empty);
        }
        if value.len() > MAX_UID_LEN {
            return Err(InvalidUid::TooLong);
        }
        if value.contains('/') {
            return Err(InvalidUid::Separator);
        }
        Ok(Self(value))
    }

    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Uid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Uid {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for Uid {
    type Err = InvalidUid;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for Uid {
    type Error = InvalidUid;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for Uid {
    type Error = InvalidUid;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Uid> for String {
    fn from(uid: Uid) -> Self {
        uid.0
    }
}

impl PartialEq<str> for Uid {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Uid {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}
