//! Tests for RelationGraph.

use crate::error::Error;
use crate::person::{Person, PersonId, PersonRegistry};

use super::graph::RelationGraph;
use super::types::{ParentLink, ParentRole, Relationship};

fn id(s: &str) -> PersonId {
    PersonId::from(s)
}

fn build_registry(ids: &[&str]) -> PersonRegistry {
    let mut registry = PersonRegistry::new();
    for &p in ids {
        registry.add_person(Person::new(p, p)).unwrap();
    }
    registry
}

/// Three generations: g is father of f, f is father of c, m is mother of c.
fn build_family() -> (PersonRegistry, RelationGraph) {
    let registry = build_registry(&["g", "f", "m", "c"]);
    let mut graph = RelationGraph::new();
    graph
        .add_parent_edge(&registry, &id("g"), &id("f"), ParentRole::Father)
        .unwrap();
    graph
        .add_parent_edge(&registry, &id("f"), &id("c"), ParentRole::Father)
        .unwrap();
    graph
        .add_parent_edge(&registry, &id("m"), &id("c"), ParentRole::Mother)
        .unwrap();
    (registry, graph)
}

#[test]
fn test_add_father_edge_visible_in_parents_of() {
    let registry = build_registry(&["a", "b"]);
    let mut graph = RelationGraph::new();
    graph
        .add_parent_edge(&registry, &id("a"), &id("b"), ParentRole::Father)
        .unwrap();

    assert_eq!(
        graph.parents_of(&id("b")),
        vec![ParentLink {
            role: ParentRole::Father,
            parent: id("a"),
        }]
    );
    assert_eq!(graph.children_of(&registry, &id("a")), vec![id("b")]);
}

#[test]
fn test_parents_of_lists_father_first() {
    let registry = build_registry(&["m", "f", "c"]);
    let mut graph = RelationGraph::new();
    graph
        .add_parent_edge(&registry, &id("m"), &id("c"), ParentRole::Mother)
        .unwrap();
    graph
        .add_parent_edge(&registry, &id("f"), &id("c"), ParentRole::Father)
        .unwrap();

    let roles: Vec<ParentRole> = graph.parents_of(&id("c")).iter().map(|l| l.role).collect();
    assert_eq!(roles, vec![ParentRole::Father, ParentRole::Mother]);
}

#[test]
fn test_parent_edge_unknown_person_fails() {
    let registry = build_registry(&["a"]);
    let mut graph = RelationGraph::new();
    let result = graph.add_parent_edge(&registry, &id("a"), &id("ghost"), ParentRole::Mother);
    assert!(matches!(result, Err(Error::UnknownPerson(p)) if p == id("ghost")));
    let result = graph.add_parent_edge(&registry, &id("ghost"), &id("a"), ParentRole::Mother);
    assert!(matches!(result, Err(Error::UnknownPerson(_))));
    assert_eq!(graph.edge_count(), 0);
}

#[test]
fn test_role_conflict() {
    let registry = build_registry(&["f1", "f2", "c"]);
    let mut graph = RelationGraph::new();
    graph
        .add_parent_edge(&registry, &id("f1"), &id("c"), ParentRole::Father)
        .unwrap();

    let result = graph.add_parent_edge(&registry, &id("f2"), &id("c"), ParentRole::Father);
    assert!(matches!(
        result,
        Err(Error::RoleConflict { role: ParentRole::Father, .. })
    ));

    // The father cannot also be registered as mother of the same child.
    let result = graph.add_parent_edge(&registry, &id("f1"), &id("c"), ParentRole::Mother);
    assert!(matches!(result, Err(Error::RoleConflict { .. })));

    assert_eq!(graph.edge_count(), 1);
    assert_eq!(graph.parents_of(&id("c"))[0].parent, id("f1"));
}

#[test]
fn test_self_parent_is_cycle() {
    let registry = build_registry(&["a"]);
    let mut graph = RelationGraph::new();
    let result = graph.add_parent_edge(&registry, &id("a"), &id("a"), ParentRole::Father);
    assert!(matches!(result, Err(Error::Cycle { .. })));
}

#[test]
fn test_cycle_rejected_without_mutation() {
    let (registry, mut graph) = build_family();
    let before = graph.edge_count();

    // c is a grandchild of g; making c a parent of g closes a loop.
    let result = graph.add_parent_edge(&registry, &id("c"), &id("g"), ParentRole::Father);
    assert!(matches!(result, Err(Error::Cycle { .. })));
    assert_eq!(graph.edge_count(), before);
    assert!(graph.parents_of(&id("g")).is_empty());
    assert!(graph.children_of(&registry, &id("c")).is_empty());
}

#[test]
fn test_non_ancestral_edge_is_not_a_cycle() {
    // m is not related to g by ancestry, so m may become g's mother.
    let (registry, mut graph) = build_family();
    graph
        .add_parent_edge(&registry, &id("m"), &id("g"), ParentRole::Mother)
        .unwrap();
    assert_eq!(graph.edge_count(), 4);
}

#[test]
fn test_children_ordered_by_creation() {
    let registry = build_registry(&["p", "c1", "c2", "c3"]);
    let mut graph = RelationGraph::new();
    for child in ["c3", "c1", "c2"] {
        graph
            .add_parent_edge(&registry, &id("p"), &id(child), ParentRole::Mother)
            .unwrap();
    }
    assert_eq!(
        graph.children_of(&registry, &id("p")),
        vec![id("c1"), id("c2"), id("c3")]
    );
}

#[test]
fn test_spouse_edge_symmetric() {
    let registry = build_registry(&["a", "b"]);
    let mut graph = RelationGraph::new();
    assert!(graph.add_spouse_edge(&registry, &id("a"), &id("b")).unwrap());

    assert_eq!(graph.spouses_of(&id("a")), vec![id("b")]);
    assert_eq!(graph.spouses_of(&id("b")), vec![id("a")]);
    assert!(graph.has_edge(&Relationship::spouse("b", "a")));
}

#[test]
fn test_spouse_edge_idempotent() {
    let registry = build_registry(&["a", "b"]);
    let mut graph = RelationGraph::new();
    graph.add_spouse_edge(&registry, &id("a"), &id("b")).unwrap();
    let count = graph.edge_count();

    assert!(!graph.add_spouse_edge(&registry, &id("a"), &id("b")).unwrap());
    assert!(!graph.add_spouse_edge(&registry, &id("b"), &id("a")).unwrap());
    assert_eq!(graph.edge_count(), count);
    assert_eq!(graph.spouses_of(&id("a")).len(), 1);
}

#[test]
fn test_spouse_self_relationship_fails() {
    let registry = build_registry(&["a"]);
    let mut graph = RelationGraph::new();
    assert!(matches!(
        graph.add_spouse_edge(&registry, &id("a"), &id("a")),
        Err(Error::SelfRelationship(_))
    ));
}

#[test]
fn test_spouse_unknown_person_fails() {
    let registry = build_registry(&["a"]);
    let mut graph = RelationGraph::new();
    assert!(matches!(
        graph.add_spouse_edge(&registry, &id("a"), &id("ghost")),
        Err(Error::UnknownPerson(_))
    ));
}

#[test]
fn test_multiple_spouses_insertion_order() {
    let registry = build_registry(&["a", "b", "c"]);
    let mut graph = RelationGraph::new();
    graph.add_spouse_edge(&registry, &id("a"), &id("c")).unwrap();
    graph.add_spouse_edge(&registry, &id("a"), &id("b")).unwrap();
    assert_eq!(graph.spouses_of(&id("a")), vec![id("c"), id("b")]);
}

#[test]
fn test_remove_spouse_edge_both_directions() {
    let registry = build_registry(&["a", "b"]);
    let mut graph = RelationGraph::new();
    graph.add_spouse_edge(&registry, &id("a"), &id("b")).unwrap();

    // Either endpoint order addresses the same edge.
    graph.remove_edge(&Relationship::spouse("b", "a")).unwrap();
    assert!(graph.spouses_of(&id("a")).is_empty());
    assert!(graph.spouses_of(&id("b")).is_empty());
    assert_eq!(graph.edge_count(), 0);
    assert!(!graph.references(&id("a")));
}

#[test]
fn test_remove_uncanonical_spouse_reference() {
    let registry = build_registry(&["a", "b"]);
    let mut graph = RelationGraph::new();
    graph.add_spouse_edge(&registry, &id("a"), &id("b")).unwrap();

    let raw = Relationship::Spouse {
        a: id("b"),
        b: id("a"),
    };
    graph.remove_edge(&raw).unwrap();
    assert_eq!(graph.edge_count(), 0);
}

#[test]
fn test_remove_parent_edge() {
    let (registry, mut graph) = build_family();
    graph
        .remove_edge(&Relationship::parent("f", "c", ParentRole::Father))
        .unwrap();

    assert_eq!(graph.parents_of(&id("c")).len(), 1);
    assert!(graph.children_of(&registry, &id("f")).is_empty());
    assert_eq!(graph.edge_count(), 2);
}

#[test]
fn test_remove_missing_edge_fails() {
    let (_, mut graph) = build_family();
    // Right endpoints, wrong role.
    let result = graph.remove_edge(&Relationship::parent("f", "c", ParentRole::Mother));
    assert!(matches!(result, Err(Error::NotFound(_))));
    assert!(matches!(
        graph.remove_edge(&Relationship::spouse("f", "m")),
        Err(Error::NotFound(_))
    ));
    assert_eq!(graph.edge_count(), 3);
}

#[test]
fn test_relationships_in_insertion_order() {
    let (_, graph) = build_family();
    let edges: Vec<String> = graph.relationships().map(ToString::to_string).collect();
    assert_eq!(
        edges,
        vec![
            "g -[father]-> f".to_string(),
            "f -[father]-> c".to_string(),
            "m -[mother]-> c".to_string(),
        ]
    );
}

#[test]
fn test_degree_counts_every_edge_kind() {
    let (registry, mut graph) = build_family();
    graph.add_spouse_edge(&registry, &id("f"), &id("m")).unwrap();
    // f: one parent, one child, one spouse.
    assert_eq!(graph.degree(&id("f")), 3);
    assert_eq!(graph.degree(&id("c")), 2);
}
