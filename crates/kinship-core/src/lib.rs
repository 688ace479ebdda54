//! # Kinship Core
//!
//! Family relationship graph and deterministic tree-layout projection.
//!
//! People live in an id-keyed [`PersonRegistry`]; parent-of (father/mother)
//! and spouse-of edges live in a separate [`RelationGraph`] that refuses
//! ancestry cycles, role conflicts and dangling ids. A [`TreeProjector`]
//! turns the graph plus a chosen root into generation-layered coordinates,
//! and the [`visualization`] module hands those to an external renderer.
//!
//! ## Quick Start
//!
//! ```rust
//! use kinship_core::{FamilyTree, ParentRole, Person};
//!
//! fn main() -> kinship_core::Result<()> {
//!     let mut tree = FamilyTree::new();
//!     tree.add_person(Person::new("a", "Anna"))?;
//!     tree.add_person(Person::new("b", "Bert"))?;
//!     tree.add_person(Person::new("c", "Cleo"))?;
//!
//!     tree.add_spouse_edge(&"a".into(), &"b".into())?;
//!     tree.add_parent_edge(&"a".into(), &"c".into(), ParentRole::Mother)?;
//!
//!     // Cleo's mother and her husband share a generation.
//!     let layout = tree.project(&"c".into())?;
//!     assert_eq!(layout.node(&"a".into()).unwrap().generation, -1);
//!     assert_eq!(layout.node(&"b".into()).unwrap().generation, -1);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![cfg_attr(test, allow(clippy::float_cmp, clippy::similar_names))]

pub mod config;
pub mod error;
pub mod family;
pub mod person;
pub mod projection;
pub mod relation;
pub mod visualization;

pub use config::{AdapterConfig, ConfigError, KinshipConfig, LayoutConfig, LoggingConfig};
pub use error::{Error, Result};
pub use family::{FamilyDocument, FamilyTree, SharedFamilyTree};
pub use person::{Person, PersonId, PersonRegistry};
pub use projection::{FamilyView, Layout, PositionedPerson, TreeProjector};
pub use relation::{ParentLink, ParentRole, RelationGraph, Relationship};
pub use visualization::{NodeKey, RenderCapability, VisualizationAdapter};
