//! Generation assignment by breadth-first traversal.
//!
//! Provides the [`FamilyView`] trait, the read-only seam every projection
//! goes through, so any store holding persons and relationships can be
//! projected without reimplementing the walk.

use std::collections::{BTreeMap, HashSet, VecDeque};

use crate::person::{Person, PersonId};
use crate::relation::{ParentLink, Relationship};

/// Read-only view of a family graph.
pub trait FamilyView {
    /// Returns the person record, if registered.
    fn person(&self, id: &PersonId) -> Option<&Person>;

    /// Returns the registry insertion rank, if registered.
    fn rank(&self, id: &PersonId) -> Option<usize>;

    /// Returns parents, father first.
    fn parents(&self, id: &PersonId) -> Vec<ParentLink>;

    /// Returns children in creation order.
    fn children(&self, id: &PersonId) -> Vec<PersonId>;

    /// Returns spouses in insertion order.
    fn spouses(&self, id: &PersonId) -> Vec<PersonId>;

    /// Returns every relationship in insertion order.
    fn relationships(&self) -> Vec<Relationship>;
}

/// A person reached during the walk. Its index in the discovery list is its
/// discovery position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Discovered {
    pub id: PersonId,
    pub generation: i32,
    /// Discovery position of the connecting person plus one; 0 for the root.
    pub via: usize,
    /// Registry insertion rank, the secondary ordering key.
    pub rank: usize,
}

/// Walks the graph breadth-first from `root`.
///
/// Neighbours of a person at generation `g` are expanded as spouses (`g`),
/// children (`g + 1`) then parents (`g - 1`). The first discovery of a
/// person fixes its generation.
pub(crate) fn discover<V: FamilyView>(view: &V, root: &PersonId) -> Vec<Discovered> {
    let mut discovered = vec![Discovered {
        id: root.clone(),
        generation: 0,
        via: 0,
        rank: view.rank(root).unwrap_or(usize::MAX),
    }];
    let mut seen: HashSet<PersonId> = HashSet::from([root.clone()]);
    let mut queue = VecDeque::from([0usize]);

    while let Some(current) = queue.pop_front() {
        let id = discovered[current].id.clone();
        let generation = discovered[current].generation;

        let neighbours = view
            .spouses(&id)
            .into_iter()
            .map(|s| (s, generation))
            .chain(view.children(&id).into_iter().map(|c| (c, generation + 1)))
            .chain(
                view.parents(&id)
                    .into_iter()
                    .map(|l| (l.parent, generation - 1)),
            );

        for (next, next_generation) in neighbours {
            if seen.contains(&next) {
                continue;
            }
            let Some(rank) = view.rank(&next) else {
                // Dangling id; the graph never stores one, but a foreign
                // view might.
                continue;
            };
            let position = discovered.len();
            seen.insert(next.clone());
            discovered.push(Discovered {
                id: next,
                generation: next_generation,
                via: current + 1,
                rank,
            });
            queue.push_back(position);
        }
    }

    discovered
}

/// Groups discovery indices by generation, each row ordered by the
/// connecting relationship's discovery position, then registry rank.
pub(crate) fn generation_rows(discovered: &[Discovered]) -> BTreeMap<i32, Vec<usize>> {
    let mut rows: BTreeMap<i32, Vec<usize>> = BTreeMap::new();
    for (index, d) in discovered.iter().enumerate() {
        rows.entry(d.generation).or_default().push(index);
    }
    for row in rows.values_mut() {
        row.sort_by_key(|&i| (discovered[i].via, discovered[i].rank, i));
    }
    rows
}
