//! Relationship value types.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::person::PersonId;

/// Role a parent holds towards a child.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParentRole {
    /// Father-role parent.
    Father,
    /// Mother-role parent.
    Mother,
}

impl ParentRole {
    /// Returns the other role.
    #[must_use]
    pub fn other(self) -> Self {
        match self {
            Self::Father => Self::Mother,
            Self::Mother => Self::Father,
        }
    }

    /// Returns the lowercase role name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Father => "father",
            Self::Mother => "mother",
        }
    }
}

impl fmt::Display for ParentRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A parent of some child, tagged by role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParentLink {
    /// Role the parent holds.
    pub role: ParentRole,
    /// The parent's id.
    pub parent: PersonId,
}

/// A stored relationship, also used as the edge reference for removal.
///
/// # Example
///
/// ```rust
/// use kinship_core::{ParentRole, Relationship};
///
/// let edge = Relationship::spouse("b", "a");
/// assert_eq!(edge, Relationship::spouse("a", "b"));
/// assert!(edge.involves(&"a".into()));
///
/// let parent = Relationship::parent("a", "c", ParentRole::Mother);
/// assert!(!parent.is_spouse());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Relationship {
    /// Directed parent-of edge.
    Parent {
        /// The parent.
        parent: PersonId,
        /// The child.
        child: PersonId,
        /// Role of the parent.
        role: ParentRole,
    },
    /// Symmetric spouse edge, endpoints kept in sorted order.
    Spouse {
        /// Lower endpoint.
        a: PersonId,
        /// Higher endpoint.
        b: PersonId,
    },
}

impl Relationship {
    /// Builds a parent-of edge reference.
    #[must_use]
    pub fn parent(parent: impl Into<PersonId>, child: impl Into<PersonId>, role: ParentRole) -> Self {
        Self::Parent {
            parent: parent.into(),
            child: child.into(),
            role,
        }
    }

    /// Builds a spouse edge reference in canonical endpoint order.
    #[must_use]
    pub fn spouse(a: impl Into<PersonId>, b: impl Into<PersonId>) -> Self {
        let (a, b) = (a.into(), b.into());
        if a <= b {
            Self::Spouse { a, b }
        } else {
            Self::Spouse { a: b, b: a }
        }
    }

    /// Returns the same relationship with spouse endpoints sorted.
    ///
    /// Deserialized references may arrive in either order.
    #[must_use]
    pub fn canonical(self) -> Self {
        match self {
            Self::Spouse { a, b } => Self::spouse(a, b),
            parent @ Self::Parent { .. } => parent,
        }
    }

    /// Returns both endpoints.
    #[must_use]
    pub fn endpoints(&self) -> (&PersonId, &PersonId) {
        match self {
            Self::Parent { parent, child, .. } => (parent, child),
            Self::Spouse { a, b } => (a, b),
        }
    }

    /// Returns true if `id` is one of the endpoints.
    #[must_use]
    pub fn involves(&self, id: &PersonId) -> bool {
        let (x, y) = self.endpoints();
        x == id || y == id
    }

    /// Returns true for spouse edges.
    #[must_use]
    pub fn is_spouse(&self) -> bool {
        matches!(self, Self::Spouse { .. })
    }
}

impl fmt::Display for Relationship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parent {
                parent,
                child,
                role,
            } => write!(f, "{parent} -[{role}]-> {child}"),
            Self::Spouse { a, b } => write!(f, "{a} <-spouse-> {b}"),
        }
    }
}
