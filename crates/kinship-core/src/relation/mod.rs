//! Parent-of and spouse-of relationships between registered persons.
//!
//! # Example
//!
//! ```rust
//! use kinship_core::person::{Person, PersonRegistry};
//! use kinship_core::relation::{ParentRole, RelationGraph};
//!
//! let mut registry = PersonRegistry::new();
//! registry.add_person(Person::new("a", "Anna")).unwrap();
//! registry.add_person(Person::new("b", "Bert")).unwrap();
//!
//! let mut graph = RelationGraph::new();
//! graph
//!     .add_parent_edge(&registry, &"a".into(), &"b".into(), ParentRole::Mother)
//!     .unwrap();
//!
//! // The reverse edge would make "a" her own ancestor.
//! assert!(graph
//!     .add_parent_edge(&registry, &"b".into(), &"a".into(), ParentRole::Father)
//!     .is_err());
//! assert_eq!(graph.edge_count(), 1);
//! ```

mod graph;
mod types;

#[cfg(test)]
mod graph_tests;

pub use graph::RelationGraph;
pub use types::{ParentLink, ParentRole, Relationship};
