//! Property-based tests over randomly built families.
//!
//! Random mutation sequences exercise the graph's refusal paths; the
//! resulting families are then projected from random roots to check the
//! layout invariants.

use std::collections::{HashMap, HashSet, VecDeque};

use kinship_core::{
    FamilyTree, LayoutConfig, ParentRole, Person, PersonId, Relationship, TreeProjector,
};
use proptest::{
    collection::vec,
    prelude::{any, prop_assert, prop_assert_eq, Strategy},
    proptest,
    test_runner::{Config as ProptestConfig, FileFailurePersistence},
};

const FAMILY_PROP_CASES: u32 = 128;
const EPSILON: f64 = 1.0e-9;

#[derive(Debug, Clone)]
enum Mutation {
    Parent(usize, usize, bool),
    Spouse(usize, usize),
    Remove(usize),
}

fn mutation_strategy() -> impl Strategy<Value = Mutation> {
    (0_u8..3, any::<usize>(), any::<usize>(), any::<bool>()).prop_map(|(kind, a, b, father)| {
        match kind {
            0 => Mutation::Parent(a, b, father),
            1 => Mutation::Spouse(a, b),
            _ => Mutation::Remove(a),
        }
    })
}

fn family_strategy() -> impl Strategy<Value = (usize, Vec<Mutation>)> {
    (1_usize..10, vec(mutation_strategy(), 0..40))
}

fn family_proptest_config() -> ProptestConfig {
    ProptestConfig {
        cases: FAMILY_PROP_CASES,
        failure_persistence: Some(Box::new(FileFailurePersistence::Off)),
        ..ProptestConfig::default()
    }
}

fn person_id(index: usize) -> PersonId {
    PersonId::new(format!("p{index}"))
}

/// Applies the mutations, returning the tree and whether every rejected
/// mutation left the document untouched.
fn build(persons: usize, mutations: &[Mutation]) -> (FamilyTree, bool) {
    let mut tree = FamilyTree::new();
    for i in 0..persons {
        tree.add_person(Person::new(person_id(i), &format!("Person {i}")))
            .unwrap();
    }

    let mut untouched_on_failure = true;
    for mutation in mutations {
        let before = tree.to_document();
        let result = match mutation {
            Mutation::Parent(a, b, father) => {
                let role = if *father {
                    ParentRole::Father
                } else {
                    ParentRole::Mother
                };
                tree.add_parent_edge(&person_id(a % persons), &person_id(b % persons), role)
            }
            Mutation::Spouse(a, b) => tree
                .add_spouse_edge(&person_id(a % persons), &person_id(b % persons))
                .map(|_| ()),
            Mutation::Remove(i) => {
                let edges: Vec<Relationship> = before.relationships.clone();
                if edges.is_empty() {
                    continue;
                }
                tree.remove_edge(&edges[i % edges.len()])
            }
        };
        if result.is_err() {
            untouched_on_failure &= tree.to_document() == before;
        }
    }
    (tree, untouched_on_failure)
}

/// Persons reachable from `root` over any relationship.
fn reachable(tree: &FamilyTree, root: &PersonId) -> HashSet<PersonId> {
    let mut seen = HashSet::from([root.clone()]);
    let mut queue = VecDeque::from([root.clone()]);
    while let Some(current) = queue.pop_front() {
        let neighbours = tree
            .parents_of(&current)
            .unwrap()
            .into_iter()
            .map(|(_, p)| p.id().clone())
            .chain(tree.children_of(&current).unwrap().into_iter().map(|p| p.id().clone()))
            .chain(tree.spouses_of(&current).unwrap().into_iter().map(|p| p.id().clone()))
            .collect::<Vec<_>>();
        for next in neighbours {
            if seen.insert(next.clone()) {
                queue.push_back(next);
            }
        }
    }
    seen
}

/// Labels each person of a row with the spouse group it belongs to, joining
/// spouses transitively but only through persons on the same row.
fn spouse_groups(tree: &FamilyTree, row: &[PersonId]) -> HashMap<PersonId, usize> {
    let in_row: HashSet<&PersonId> = row.iter().collect();
    let mut group = HashMap::new();
    for (label, start) in row.iter().enumerate() {
        if group.contains_key(start) {
            continue;
        }
        group.insert(start.clone(), label);
        let mut queue = VecDeque::from([start.clone()]);
        while let Some(current) = queue.pop_front() {
            for spouse in tree.spouses_of(&current).unwrap() {
                let spouse = spouse.id();
                if in_row.contains(spouse) && !group.contains_key(spouse) {
                    group.insert(spouse.clone(), label);
                    queue.push_back(spouse.clone());
                }
            }
        }
    }
    group
}

fn is_own_ancestor(tree: &FamilyTree, id: &PersonId) -> bool {
    let mut seen = HashSet::new();
    let mut queue: VecDeque<PersonId> = VecDeque::from([id.clone()]);
    while let Some(current) = queue.pop_front() {
        for (_, parent) in tree.parents_of(&current).unwrap() {
            if parent.id() == id {
                return true;
            }
            if seen.insert(parent.id().clone()) {
                queue.push_back(parent.id().clone());
            }
        }
    }
    false
}

proptest! {
    #![proptest_config(family_proptest_config())]

    #[test]
    fn test_rejected_mutations_leave_graph_unchanged((persons, mutations) in family_strategy()) {
        let (tree, untouched) = build(persons, &mutations);
        prop_assert!(untouched);
        for i in 0..persons {
            prop_assert!(!is_own_ancestor(&tree, &person_id(i)));
        }
    }

    #[test]
    fn test_projection_is_deterministic((persons, mutations) in family_strategy(), root in any::<usize>()) {
        let (tree, _) = build(persons, &mutations);
        let root = person_id(root % persons);
        let first = serde_json::to_string(&tree.project(&root).unwrap()).unwrap();
        let second = serde_json::to_string(&tree.project(&root).unwrap()).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn test_each_reachable_person_placed_once((persons, mutations) in family_strategy(), root in any::<usize>()) {
        let (tree, _) = build(persons, &mutations);
        let root = person_id(root % persons);
        let layout = tree.project(&root).unwrap();

        let placed: Vec<&PersonId> = layout.nodes.iter().map(|n| &n.person_id).collect();
        let unique: HashSet<&PersonId> = placed.iter().copied().collect();
        prop_assert_eq!(placed.len(), unique.len());

        let expected = reachable(&tree, &root);
        prop_assert_eq!(unique.len(), expected.len());
        for id in &expected {
            prop_assert!(layout.contains(id));
        }
        prop_assert_eq!(layout.node(&root).map(|n| n.generation), Some(0));
    }

    #[test]
    fn test_rows_keep_minimum_spacing(
        (persons, mutations) in family_strategy(),
        root in any::<usize>(),
        spouse_separation in 1.0_f64..50.0,
        extra in 1.0_f64..100.0,
    ) {
        let node_separation = spouse_separation + extra;
        let config = LayoutConfig::new(node_separation, 100.0, spouse_separation);
        let projector = TreeProjector::new(config).unwrap();
        let (tree, _) = build(persons, &mutations);
        let layout = projector.project(&tree, &person_id(root % persons)).unwrap();

        let (low, high) = layout.generation_range().unwrap();
        for generation in low..=high {
            let row: Vec<PersonId> = layout.generation(generation).map(|n| n.person_id.clone()).collect();
            let xs: Vec<f64> = layout.generation(generation).map(|n| n.x).collect();
            let groups = spouse_groups(&tree, &row);
            for (pair, ids) in xs.windows(2).zip(row.windows(2)) {
                let gap = pair[1] - pair[0];
                prop_assert!(gap >= spouse_separation - EPSILON, "row {}: {:?}", generation, xs);
                if groups[&ids[0]] != groups[&ids[1]] {
                    prop_assert!(
                        gap >= node_separation - EPSILON,
                        "row {}: {} and {} are {} apart: {:?}",
                        generation, ids[0], ids[1], gap, xs
                    );
                }
            }
        }
        for node in &layout.nodes {
            prop_assert!(node.x >= -EPSILON);
            prop_assert!((node.y - f64::from(node.generation - low) * 100.0).abs() < EPSILON);
        }
    }

    #[test]
    fn test_edges_join_placed_persons((persons, mutations) in family_strategy(), root in any::<usize>()) {
        let (tree, _) = build(persons, &mutations);
        let layout = tree.project(&person_id(root % persons)).unwrap();
        for edge in &layout.edges {
            let (a, b) = edge.endpoints();
            prop_assert!(layout.contains(a) && layout.contains(b));
        }
        let expected = tree
            .to_document()
            .relationships
            .into_iter()
            .filter(|edge| {
                let (a, b) = edge.endpoints();
                layout.contains(a) && layout.contains(b)
            })
            .count();
        prop_assert_eq!(layout.edges.len(), expected);
    }
}
