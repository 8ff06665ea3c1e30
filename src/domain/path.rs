//! Materialized path encoding
//!
//! A path is the chain of ancestor ids from the root down to (excluding) the
//! party itself, each id prefixed with `/`:
//!
//! ```text
//! ""                  root
//! "/<root>"           child of a root
//! "/<root>/<mid>"     grandchild
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;

/// Delimiter between path segments. Never part of an id.
pub const SEPARATOR: char = '/';

/// Ordered ancestor chain of a party, root first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MaterializedPath(String);

impl MaterializedPath {
    /// Path of a party without owner.
    pub fn root() -> Self {
        Self(String::new())
    }

    /// Path of a party created under `owner_id`, whose own path is `owner_path`.
    pub fn child_of(owner_path: &MaterializedPath, owner_id: &str) -> Self {
        Self(format!("{}{}{}", owner_path.0, SEPARATOR, owner_id))
    }

    /// Parse a stored path.
    ///
    /// Accepts `""` or one or more `/<id>` segments. Empty segments (`//`,
    /// trailing `/`) are rejected since they cannot be produced by
    /// [`MaterializedPath::child_of`].
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        if raw.is_empty() {
            return Ok(Self::root());
        }
        let Some(rest) = raw.strip_prefix(SEPARATOR) else {
            return Err(DomainError::InvalidPath {
                path: raw.to_string(),
                reason: format!("must start with '{SEPARATOR}'"),
            });
        };
        if rest.split(SEPARATOR).any(str::is_empty) {
            return Err(DomainError::InvalidPath {
                path: raw.to_string(),
                reason: "empty segment".to_string(),
            });
        }
        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Ancestor ids, root first, immediate owner last.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split(SEPARATOR).filter(|s| !s.is_empty())
    }

    /// Number of ancestors.
    pub fn depth(&self) -> usize {
        self.segments().count()
    }

    /// Whether `id` appears as a whole segment: `/<id>` followed by `/` or
    /// end of string. A bare substring test would let `ab` match `/abc`.
    pub fn contains_segment(&self, id: &str) -> bool {
        is_segment(id) && self.segments().any(|s| s == id)
    }
}

impl fmt::Display for MaterializedPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Whether `id` can stand as a single path segment.
pub fn is_segment(id: &str) -> bool {
    !id.is_empty() && !id.contains(SEPARATOR)
}

/// Reject ids that would corrupt the path encoding.
pub fn validate_segment(id: &str) -> Result<(), DomainError> {
    if is_segment(id) {
        Ok(())
    } else {
        Err(DomainError::InvalidId(id.to_string()))
    }
}
