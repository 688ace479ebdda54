//! Tree projection: from a family graph and a chosen root to a positioned,
//! generation-layered layout.
//!
//! The projector keeps no state between calls. Re-rooting is simply another
//! call with a different root.
//!
//! # Example
//!
//! ```rust
//! use kinship_core::{FamilyTree, ParentRole, Person, TreeProjector};
//!
//! let mut tree = FamilyTree::new();
//! tree.add_person(Person::new("a", "Anna")).unwrap();
//! tree.add_person(Person::new("b", "Bert")).unwrap();
//! tree.add_parent_edge(&"a".into(), &"b".into(), ParentRole::Mother).unwrap();
//!
//! let layout = TreeProjector::default().project(&tree, &"a".into()).unwrap();
//! assert_eq!(layout.node(&"a".into()).unwrap().generation, 0);
//! assert_eq!(layout.node(&"b".into()).unwrap().generation, 1);
//! ```

mod placement;
pub mod traversal;
mod types;


pub use traversal::FamilyView;
pub use types::{Layout, PositionedPerson};

use std::collections::HashSet;

use crate::config::LayoutConfig;
use crate::error::{Error, Result};
use crate::person::PersonId;

/// Computes layouts with fixed spacing parameters.
#[derive(Debug, Clone, Default)]
pub struct TreeProjector {
    config: LayoutConfig,
}

impl TreeProjector {
    /// Creates a projector with validated spacing.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if a separation is not positive or spouses
    /// would sit further apart than families.
    pub fn new(config: LayoutConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Returns the spacing parameters.
    #[must_use]
    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Projects the part of the graph reachable from `root`.
    ///
    /// Persons not connected to the root are left out.
    ///
    /// # Errors
    ///
    /// Returns `Error::UnknownRoot` if `root` is not registered.
    pub fn project<V: FamilyView>(&self, view: &V, root: &PersonId) -> Result<Layout> {
        if view.rank(root).is_none() {
            return Err(Error::UnknownRoot(root.clone()));
        }

        let discovered = traversal::discover(view, root);
        let rows = traversal::generation_rows(&discovered);
        let placement = placement::place(view, &discovered, &rows, &self.config);

        let min_generation = rows.keys().next().copied().unwrap_or(0);
        let nodes: Vec<PositionedPerson> = placement
            .rows
            .values()
            .flatten()
            .map(|&i| {
                let d = &discovered[i];
                PositionedPerson {
                    person_id: d.id.clone(),
                    generation: d.generation,
                    x: placement.x[i],
                    y: f64::from(d.generation - min_generation) * self.config.level_separation,
                }
            })
            .collect();

        let reached: HashSet<&PersonId> = discovered.iter().map(|d| &d.id).collect();
        let edges = view
            .relationships()
            .into_iter()
            .filter(|edge| {
                let (a, b) = edge.endpoints();
                reached.contains(a) && reached.contains(b)
            })
            .collect();

        tracing::debug!(
            root = %root,
            nodes = nodes.len(),
            generations = rows.len(),
            "projection computed"
        );

        Ok(Layout {
            root: root.clone(),
            nodes,
            edges,
        })
    }
}
