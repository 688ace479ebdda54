//! Error types for kinship-core.

use thiserror::Error;

use crate::config::ConfigError;
use crate::person::PersonId;
use crate::relation::ParentRole;

/// Errors raised by registry, graph, projection and adapter operations.
///
/// Every variant is recoverable: a failed mutation leaves the registry and
/// graph exactly as they were before the call.
#[derive(Error, Debug)]
pub enum Error {
    /// A person with this id is already registered.
    #[error("Person '{0}' already exists")]
    DuplicateId(PersonId),

    /// The requested person or relationship does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// A relationship references a person missing from the registry.
    #[error("Unknown person '{0}'")]
    UnknownPerson(PersonId),

    /// The child already has a parent in this role.
    #[error("Person '{child}' already has a {role} parent")]
    RoleConflict {
        /// Child whose parent slot is taken.
        child: PersonId,
        /// Role that is already occupied.
        role: ParentRole,
    },

    /// The parent edge would make a person their own ancestor.
    #[error("Adding '{parent}' as parent of '{child}' would create an ancestry cycle")]
    Cycle {
        /// Proposed parent.
        parent: PersonId,
        /// Proposed child.
        child: PersonId,
    },

    /// A relationship between a person and themselves.
    #[error("Person '{0}' cannot be related to themselves")]
    SelfRelationship(PersonId),

    /// The person still participates in relationships.
    #[error("Person '{id}' still has {count} relationship(s)")]
    HasRelationships {
        /// Person that cannot be removed.
        id: PersonId,
        /// Number of edges still referencing the person.
        count: usize,
    },

    /// The projection root is not in the registry.
    #[error("Unknown projection root '{0}'")]
    UnknownRoot(PersonId),

    /// The person record is malformed (empty id).
    #[error("Invalid person: {0}")]
    InvalidPerson(String),

    /// The projected layout exceeds the adapter's node budget.
    #[error("Layout has {nodes} nodes, exceeding the budget of {budget}")]
    LayoutBudget {
        /// Nodes in the projected layout.
        nodes: usize,
        /// Configured maximum.
        budget: usize,
    },

    /// The external rendering capability failed.
    #[error("Render error: {0}")]
    Render(String),

    /// Configuration error.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Returns true for errors caused by invalid user input.
    ///
    /// These are meant to surface as validation feedback rather than as
    /// infrastructure failures.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        !matches!(
            self,
            Self::Render(_) | Self::Config(_) | Self::Json(_) | Self::LayoutBudget { .. }
        )
    }
}

/// Result type alias for kinship operations.
pub type Result<T> = std::result::Result<T, Error>;
