//! Domain-facing family tree: one registry, one relationship graph, and the
//! complete operation set UI layers call into.

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::person::{Person, PersonId, PersonRegistry};
use crate::projection::{FamilyView, Layout, TreeProjector};
use crate::relation::{ParentLink, ParentRole, RelationGraph, Relationship};

/// Serializable snapshot of a family: persons and relationships, both in
/// insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FamilyDocument {
    /// Person records.
    #[serde(default)]
    pub persons: Vec<Person>,
    /// Relationships between them.
    #[serde(default)]
    pub relationships: Vec<Relationship>,
}

/// Persons plus relationships, kept mutually consistent.
///
/// # Example
///
/// ```rust
/// use kinship_core::{Error, FamilyTree, ParentRole, Person};
///
/// let mut tree = FamilyTree::new();
/// tree.add_person(Person::new("d", "Dora")).unwrap();
/// tree.add_person(Person::new("e", "Emil")).unwrap();
/// tree.add_spouse_edge(&"d".into(), &"e".into()).unwrap();
///
/// let err = tree.remove_person(&"d".into()).unwrap_err();
/// assert!(matches!(err, Error::HasRelationships { .. }));
/// ```
#[derive(Debug, Clone, Default)]
pub struct FamilyTree {
    registry: PersonRegistry,
    graph: RelationGraph,
}

impl FamilyTree {
    /// Creates an empty family tree.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a tree by replaying a document through the checked operations.
    ///
    /// # Errors
    ///
    /// Fails with the first registry or graph error the document triggers.
    pub fn from_document(document: &FamilyDocument) -> Result<Self> {
        let mut tree = Self {
            registry: PersonRegistry::with_capacity(document.persons.len()),
            graph: RelationGraph::new(),
        };
        for person in &document.persons {
            tree.add_person(person.clone())?;
        }
        for edge in &document.relationships {
            match edge {
                Relationship::Parent {
                    parent,
                    child,
                    role,
                } => tree.add_parent_edge(parent, child, *role)?,
                Relationship::Spouse { a, b } => {
                    tree.add_spouse_edge(a, b)?;
                }
            }
        }
        tracing::info!(
            persons = tree.registry.len(),
            relationships = tree.graph.edge_count(),
            "family document loaded"
        );
        Ok(tree)
    }

    /// Parses a JSON family document and builds a tree from it.
    ///
    /// # Errors
    ///
    /// Returns `Error::Json` for malformed input, otherwise as
    /// [`from_document`](Self::from_document).
    pub fn from_json(json: &str) -> Result<Self> {
        let document: FamilyDocument = serde_json::from_str(json)?;
        Self::from_document(&document)
    }

    /// Exports persons and relationships in insertion order.
    #[must_use]
    pub fn to_document(&self) -> FamilyDocument {
        FamilyDocument {
            persons: self.registry.list_persons().cloned().collect(),
            relationships: self.graph.relationships().cloned().collect(),
        }
    }

    // ── Persons ────────────────────────────────────────────────────────

    /// Registers a person. See [`PersonRegistry::add_person`].
    pub fn add_person(&mut self, person: Person) -> Result<()> {
        self.registry.add_person(person)
    }

    /// Gets a person. See [`PersonRegistry::get_person`].
    pub fn get_person(&self, id: &PersonId) -> Result<&Person> {
        self.registry.get_person(id)
    }

    /// Gets a person's mutable attributes. See
    /// [`PersonRegistry::get_person_mut`].
    pub fn get_person_mut(&mut self, id: &PersonId) -> Result<&mut Person> {
        self.registry.get_person_mut(id)
    }

    /// Removes a person with no remaining relationships.
    pub fn remove_person(&mut self, id: &PersonId) -> Result<Person> {
        self.registry.remove_person(id, &self.graph)
    }

    /// Lists persons lazily in insertion order.
    pub fn list_persons(&self) -> impl Iterator<Item = &Person> + Clone + '_ {
        self.registry.list_persons()
    }

    /// Returns the number of persons.
    #[must_use]
    pub fn person_count(&self) -> usize {
        self.registry.len()
    }

    // ── Relationships ──────────────────────────────────────────────────

    /// Adds a parent-of edge. See [`RelationGraph::add_parent_edge`].
    pub fn add_parent_edge(
        &mut self,
        parent: &PersonId,
        child: &PersonId,
        role: ParentRole,
    ) -> Result<()> {
        self.graph
            .add_parent_edge(&self.registry, parent, child, role)
    }

    /// Adds a spouse edge. See [`RelationGraph::add_spouse_edge`].
    pub fn add_spouse_edge(&mut self, a: &PersonId, b: &PersonId) -> Result<bool> {
        self.graph.add_spouse_edge(&self.registry, a, b)
    }

    /// Removes an edge. See [`RelationGraph::remove_edge`].
    pub fn remove_edge(&mut self, edge: &Relationship) -> Result<()> {
        self.graph.remove_edge(edge)
    }

    /// Returns a person's parents with their roles, father first.
    ///
    /// # Errors
    ///
    /// Returns `Error::UnknownPerson` if `id` is not registered.
    pub fn parents_of(&self, id: &PersonId) -> Result<Vec<(ParentRole, &Person)>> {
        self.require(id)?;
        self.graph
            .parents_of(id)
            .into_iter()
            .map(|link| Ok((link.role, self.registry.get_person(&link.parent)?)))
            .collect()
    }

    /// Returns a person's children in creation order.
    ///
    /// # Errors
    ///
    /// Returns `Error::UnknownPerson` if `id` is not registered.
    pub fn children_of(&self, id: &PersonId) -> Result<Vec<&Person>> {
        self.require(id)?;
        self.graph
            .children_of(&self.registry, id)
            .iter()
            .map(|c| self.registry.get_person(c))
            .collect()
    }

    /// Returns a person's current spouses in insertion order.
    ///
    /// # Errors
    ///
    /// Returns `Error::UnknownPerson` if `id` is not registered.
    pub fn spouses_of(&self, id: &PersonId) -> Result<Vec<&Person>> {
        self.require(id)?;
        self.graph
            .spouses_of(id)
            .iter()
            .map(|s| self.registry.get_person(s))
            .collect()
    }

    /// Returns the number of stored edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Read access to the registry.
    #[must_use]
    pub fn registry(&self) -> &PersonRegistry {
        &self.registry
    }

    /// Read access to the relationship graph.
    #[must_use]
    pub fn graph(&self) -> &RelationGraph {
        &self.graph
    }

    // ── Projection ─────────────────────────────────────────────────────

    /// Projects from `root` with default spacing.
    pub fn project(&self, root: &PersonId) -> Result<Layout> {
        TreeProjector::default().project(self, root)
    }

    /// Projects from `root` with the given projector.
    pub fn project_with(&self, projector: &TreeProjector, root: &PersonId) -> Result<Layout> {
        projector.project(self, root)
    }

    fn require(&self, id: &PersonId) -> Result<()> {
        if self.registry.contains(id) {
            Ok(())
        } else {
            Err(Error::UnknownPerson(id.clone()))
        }
    }
}

impl FamilyView for FamilyTree {
    fn person(&self, id: &PersonId) -> Option<&Person> {
        self.registry.get_person(id).ok()
    }

    fn rank(&self, id: &PersonId) -> Option<usize> {
        self.registry.rank(id)
    }

    fn parents(&self, id: &PersonId) -> Vec<ParentLink> {
        self.graph.parents_of(id)
    }

    fn children(&self, id: &PersonId) -> Vec<PersonId> {
        self.graph.children_of(&self.registry, id)
    }

    fn spouses(&self, id: &PersonId) -> Vec<PersonId> {
        self.graph.spouses_of(id)
    }

    fn relationships(&self) -> Vec<Relationship> {
        self.graph.relationships().cloned().collect()
    }
}

/// A family tree shared between callers.
///
/// Mutations take the write lock and run one at a time; projections and
/// snapshots take the read lock, so they never observe a half-applied
/// change.
#[derive(Debug, Clone, Default)]
pub struct SharedFamilyTree {
    inner: Arc<RwLock<FamilyTree>>,
}

impl SharedFamilyTree {
    /// Wraps an existing tree.
    #[must_use]
    pub fn new(tree: FamilyTree) -> Self {
        Self {
            inner: Arc::new(RwLock::new(tree)),
        }
    }

    /// Runs a mutation under the write lock.
    pub fn update<T>(&self, f: impl FnOnce(&mut FamilyTree) -> Result<T>) -> Result<T> {
        let mut tree = self.inner.write();
        f(&mut tree)
    }

    /// Runs a read-only operation under the read lock.
    pub fn read<T>(&self, f: impl FnOnce(&FamilyTree) -> T) -> T {
        let tree = self.inner.read();
        f(&tree)
    }

    /// Projects under the read lock.
    pub fn project(&self, projector: &TreeProjector, root: &PersonId) -> Result<Layout> {
        self.read(|tree| projector.project(tree, root))
    }

    /// Returns an owned copy of the current tree.
    #[must_use]
    pub fn snapshot(&self) -> FamilyTree {
        self.inner.read().clone()
    }
}
