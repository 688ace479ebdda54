//! Identity-keyed person registry.
//!
//! The registry is the arena that owns every person record. Relationships
//! live in [`RelationGraph`](crate::relation::RelationGraph) and refer to
//! records by [`PersonId`] only.

use indexmap::IndexMap;

use crate::error::{Error, Result};
use crate::relation::RelationGraph;

use super::types::{Person, PersonId};

/// Insertion-ordered storage for person records.
///
/// Iteration follows insertion order, which gives UI listings and layout
/// tie-breaks a stable, reproducible order.
#[derive(Debug, Clone, Default)]
pub struct PersonRegistry {
    persons: IndexMap<PersonId, Person>,
}

impl PersonRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry with pre-allocated capacity.
    #[must_use]
    pub fn with_capacity(expected_persons: usize) -> Self {
        Self {
            persons: IndexMap::with_capacity(expected_persons),
        }
    }

    /// Inserts a new person.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidPerson` if the id is empty or whitespace-only,
    /// and `Error::DuplicateId` if the id is already registered.
    pub fn add_person(&mut self, person: Person) -> Result<()> {
        if person.id().as_str().trim().is_empty() {
            return Err(Error::InvalidPerson(
                "Person id cannot be empty or whitespace-only".to_string(),
            ));
        }
        if self.persons.contains_key(person.id()) {
            return Err(Error::DuplicateId(person.id().clone()));
        }
        tracing::debug!(id = %person.id(), "person added");
        self.persons.insert(person.id().clone(), person);
        Ok(())
    }

    /// Gets a person by id.
    ///
    /// # Errors
    ///
    /// Returns `Error::NotFound` if the id is not registered.
    pub fn get_person(&self, id: &PersonId) -> Result<&Person> {
        self.persons
            .get(id)
            .ok_or_else(|| Error::NotFound(format!("person '{id}'")))
    }

    /// Gets a mutable reference to a person's record.
    ///
    /// The id itself cannot be changed through this reference.
    ///
    /// # Errors
    ///
    /// Returns `Error::NotFound` if the id is not registered.
    pub fn get_person_mut(&mut self, id: &PersonId) -> Result<&mut Person> {
        self.persons
            .get_mut(id)
            .ok_or_else(|| Error::NotFound(format!("person '{id}'")))
    }

    /// Removes a person that takes part in no relationship.
    ///
    /// # Errors
    ///
    /// Returns `Error::NotFound` if the id is not registered and
    /// `Error::HasRelationships` if any edge in `relations` still references it.
    pub fn remove_person(&mut self, id: &PersonId, relations: &RelationGraph) -> Result<Person> {
        if !self.persons.contains_key(id) {
            return Err(Error::NotFound(format!("person '{id}'")));
        }
        let count = relations.degree(id);
        if count > 0 {
            tracing::debug!(id = %id, count, "person removal rejected");
            return Err(Error::HasRelationships {
                id: id.clone(),
                count,
            });
        }
        // shift_remove keeps the remaining insertion order intact.
        let person = self
            .persons
            .shift_remove(id)
            .ok_or_else(|| Error::NotFound(format!("person '{id}'")))?;
        tracing::debug!(id = %id, "person removed");
        Ok(person)
    }

    /// Returns a lazy iterator over all persons in insertion order.
    ///
    /// The iterator is `Clone`, so a listing can be restarted without
    /// touching the registry again.
    pub fn list_persons(&self) -> impl Iterator<Item = &Person> + Clone + '_ {
        self.persons.values()
    }

    /// Returns true if the id is registered.
    #[must_use]
    pub fn contains(&self, id: &PersonId) -> bool {
        self.persons.contains_key(id)
    }

    /// Returns the insertion rank of a person (0 = oldest surviving record).
    #[must_use]
    pub fn rank(&self, id: &PersonId) -> Option<usize> {
        self.persons.get_index_of(id)
    }

    /// Returns the number of registered persons.
    #[must_use]
    pub fn len(&self) -> usize {
        self.persons.len()
    }

    /// Returns true if no person is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.persons.is_empty()
    }
}
