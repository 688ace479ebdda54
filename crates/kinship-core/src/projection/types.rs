//! Layout result types.

use serde::{Deserialize, Serialize};

use crate::person::PersonId;
use crate::relation::Relationship;

/// A person with layout coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionedPerson {
    /// The person.
    pub person_id: PersonId,
    /// Generation relative to the root (root = 0, descendants positive).
    pub generation: i32,
    /// Horizontal position, minimum 0.
    pub x: f64,
    /// Vertical position, minimum 0 at the oldest generation.
    pub y: f64,
}

/// Immutable result of one projection.
///
/// Nodes are ordered by generation, then left to right. Edges are the
/// relationships whose endpoints were both reached from the root.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    /// Root the projection was computed for.
    pub root: PersonId,
    /// Positioned persons.
    pub nodes: Vec<PositionedPerson>,
    /// Relationships among the positioned persons, insertion order.
    pub edges: Vec<Relationship>,
}

impl Layout {
    /// Returns the positioned entry for a person, if reached.
    #[must_use]
    pub fn node(&self, id: &PersonId) -> Option<&PositionedPerson> {
        self.nodes.iter().find(|n| &n.person_id == id)
    }

    /// Returns true if the person was reached from the root.
    #[must_use]
    pub fn contains(&self, id: &PersonId) -> bool {
        self.node(id).is_some()
    }

    /// Returns the persons of one generation, left to right.
    pub fn generation(&self, generation: i32) -> impl Iterator<Item = &PositionedPerson> + '_ {
        self.nodes.iter().filter(move |n| n.generation == generation)
    }

    /// Returns the (oldest, youngest) generation present.
    #[must_use]
    pub fn generation_range(&self) -> Option<(i32, i32)> {
        let min = self.nodes.iter().map(|n| n.generation).min()?;
        let max = self.nodes.iter().map(|n| n.generation).max()?;
        Some((min, max))
    }

    /// Returns the number of positioned persons.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if nothing was positioned.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
