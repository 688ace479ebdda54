//! Relationship graph layered over the person registry.
//!
//! Edges are stored once in insertion order and indexed three ways:
//! child -> parents, parent -> children, person -> spouses. All
//! relationships are id references resolved through the registry.

use indexmap::IndexSet;
use std::collections::{HashMap, HashSet};

use crate::error::{Error, Result};
use crate::person::{PersonId, PersonRegistry};

use super::types::{ParentLink, ParentRole, Relationship};

/// Edge storage with role-keyed adjacency indices.
#[derive(Debug, Clone, Default)]
pub struct RelationGraph {
    /// All edges, insertion order, spouse endpoints canonical.
    edges: IndexSet<Relationship>,
    /// Child -> parent links, father first.
    parents: HashMap<PersonId, Vec<ParentLink>>,
    /// Parent -> children, edge insertion order.
    children: HashMap<PersonId, Vec<PersonId>>,
    /// Person -> spouses, edge insertion order, both directions.
    spouses: HashMap<PersonId, Vec<PersonId>>,
}

impl RelationGraph {
    /// Creates an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // ── Mutation ───────────────────────────────────────────────────────

    /// Adds a role-tagged parent-of edge.
    ///
    /// Checks run before any index is touched, so a rejected edge leaves the
    /// graph unchanged.
    ///
    /// # Errors
    ///
    /// - `Error::UnknownPerson` if either id is not registered.
    /// - `Error::RoleConflict` if the child already has a parent in `role`,
    ///   or `parent` already holds the other role for this child.
    /// - `Error::Cycle` if `parent` is `child` or one of its descendants.
    pub fn add_parent_edge(
        &mut self,
        registry: &PersonRegistry,
        parent: &PersonId,
        child: &PersonId,
        role: ParentRole,
    ) -> Result<()> {
        Self::require_known(registry, parent)?;
        Self::require_known(registry, child)?;

        if let Some(links) = self.parents.get(child) {
            let taken = links
                .iter()
                .any(|l| l.role == role || (l.role == role.other() && &l.parent == parent));
            if taken {
                tracing::debug!(parent = %parent, child = %child, %role, "parent edge rejected: role conflict");
                return Err(Error::RoleConflict {
                    child: child.clone(),
                    role,
                });
            }
        }

        if self.is_ancestor_or_self(child, parent, registry.len()) {
            tracing::debug!(parent = %parent, child = %child, "parent edge rejected: cycle");
            return Err(Error::Cycle {
                parent: parent.clone(),
                child: child.clone(),
            });
        }

        let links = self.parents.entry(child.clone()).or_default();
        links.push(ParentLink {
            role,
            parent: parent.clone(),
        });
        links.sort_by_key(|l| l.role);
        self.children
            .entry(parent.clone())
            .or_default()
            .push(child.clone());
        self.edges
            .insert(Relationship::parent(parent.clone(), child.clone(), role));

        tracing::debug!(parent = %parent, child = %child, %role, "parent edge added");
        Ok(())
    }

    /// Adds a symmetric spouse edge.
    ///
    /// Re-adding an existing pair (in either order) is a no-op. Returns
    /// `true` if a new edge was stored.
    ///
    /// # Errors
    ///
    /// - `Error::UnknownPerson` if either id is not registered.
    /// - `Error::SelfRelationship` if `a == b`.
    pub fn add_spouse_edge(
        &mut self,
        registry: &PersonRegistry,
        a: &PersonId,
        b: &PersonId,
    ) -> Result<bool> {
        Self::require_known(registry, a)?;
        Self::require_known(registry, b)?;
        if a == b {
            return Err(Error::SelfRelationship(a.clone()));
        }

        let edge = Relationship::spouse(a.clone(), b.clone());
        if self.edges.contains(&edge) {
            return Ok(false);
        }

        self.spouses.entry(a.clone()).or_default().push(b.clone());
        self.spouses.entry(b.clone()).or_default().push(a.clone());
        self.edges.insert(edge);

        tracing::debug!(a = %a, b = %b, "spouse edge added");
        Ok(true)
    }

    /// Removes an edge; spouse edges disappear from both sides at once.
    ///
    /// Parent edges must match parent, child and role.
    ///
    /// # Errors
    ///
    /// Returns `Error::NotFound` if no such edge is stored.
    pub fn remove_edge(&mut self, edge: &Relationship) -> Result<()> {
        let edge = edge.clone().canonical();
        if !self.edges.shift_remove(&edge) {
            return Err(Error::NotFound(format!("relationship {edge}")));
        }

        match &edge {
            Relationship::Parent { parent, child, .. } => {
                Self::detach(&mut self.parents, child, |l| &l.parent == parent);
                Self::detach(&mut self.children, parent, |c| c == child);
            }
            Relationship::Spouse { a, b } => {
                Self::detach(&mut self.spouses, a, |s| s == b);
                Self::detach(&mut self.spouses, b, |s| s == a);
            }
        }

        tracing::debug!(%edge, "edge removed");
        Ok(())
    }

    // ── Queries ────────────────────────────────────────────────────────

    /// Returns the 0–2 parents of a person, father first.
    #[must_use]
    pub fn parents_of(&self, id: &PersonId) -> Vec<ParentLink> {
        self.parents.get(id).cloned().unwrap_or_default()
    }

    /// Returns the derived child set, ordered by each child's registry
    /// insertion rank.
    #[must_use]
    pub fn children_of(&self, registry: &PersonRegistry, id: &PersonId) -> Vec<PersonId> {
        let mut children = self.children.get(id).cloned().unwrap_or_default();
        children.sort_by_key(|c| registry.rank(c).unwrap_or(usize::MAX));
        children
    }

    /// Returns current spouses in edge insertion order.
    #[must_use]
    pub fn spouses_of(&self, id: &PersonId) -> Vec<PersonId> {
        self.spouses.get(id).cloned().unwrap_or_default()
    }

    /// Returns true if the edge is stored (spouse order does not matter).
    #[must_use]
    pub fn has_edge(&self, edge: &Relationship) -> bool {
        self.edges.contains(&edge.clone().canonical())
    }

    /// Returns all edges in insertion order.
    pub fn relationships(&self) -> impl Iterator<Item = &Relationship> + Clone + '_ {
        self.edges.iter()
    }

    /// Returns the total number of edges (a spouse pair counts once).
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Returns the number of edges touching a person.
    #[must_use]
    pub fn degree(&self, id: &PersonId) -> usize {
        self.parents.get(id).map_or(0, Vec::len)
            + self.children.get(id).map_or(0, Vec::len)
            + self.spouses.get(id).map_or(0, Vec::len)
    }

    /// Returns true if any edge references the person.
    #[must_use]
    pub fn references(&self, id: &PersonId) -> bool {
        self.degree(id) > 0
    }

    // ── Internals ──────────────────────────────────────────────────────

    fn require_known(registry: &PersonRegistry, id: &PersonId) -> Result<()> {
        if registry.contains(id) {
            Ok(())
        } else {
            Err(Error::UnknownPerson(id.clone()))
        }
    }

    /// Walks the ancestors of `start` upward, one generation per step, and
    /// reports whether `candidate` is `start` itself or one of them.
    ///
    /// The walk takes at most `bound` steps so a corrupted graph still
    /// terminates.
    fn is_ancestor_or_self(&self, candidate: &PersonId, start: &PersonId, bound: usize) -> bool {
        if candidate == start {
            return true;
        }

        let mut visited: HashSet<&PersonId> = HashSet::new();
        let mut frontier = vec![start];

        for _ in 0..bound {
            let mut next = Vec::new();
            for id in frontier {
                for link in self.parents.get(id).map(Vec::as_slice).unwrap_or_default() {
                    if &link.parent == candidate {
                        return true;
                    }
                    if visited.insert(&link.parent) {
                        next.push(&link.parent);
                    }
                }
            }
            if next.is_empty() {
                break;
            }
            frontier = next;
        }

        false
    }

    fn detach<T>(index: &mut HashMap<PersonId, Vec<T>>, key: &PersonId, matches: impl Fn(&T) -> bool) {
        if let Some(entries) = index.get_mut(key) {
            entries.retain(|e| !matches(e));
            if entries.is_empty() {
                index.remove(key);
            }
        }
    }
}
