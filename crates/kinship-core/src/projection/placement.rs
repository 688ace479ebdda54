//! Horizontal placement of generation rows.
//!
//! Rows are split into family clusters (a person and their same-row
//! spouses) and placed bottom-up, each cluster centred over the span of its
//! children in the row below.

use std::collections::{BTreeMap, HashMap, HashSet};

use crate::config::LayoutConfig;
use crate::person::PersonId;

use super::traversal::{Discovered, FamilyView};

/// Final placement: x per discovery index and each row in left-to-right
/// order.
#[derive(Debug)]
pub(crate) struct Placement {
    pub x: Vec<f64>,
    pub rows: BTreeMap<i32, Vec<usize>>,
}

/// Splits every row into spouse clusters.
///
/// A cluster starts at the first unclustered person in row order and
/// absorbs same-row spouses transitively, in spouse insertion order.
fn build_clusters<V: FamilyView>(
    view: &V,
    discovered: &[Discovered],
    index_of: &HashMap<&PersonId, usize>,
    rows: &BTreeMap<i32, Vec<usize>>,
) -> BTreeMap<i32, Vec<Vec<usize>>> {
    let mut clustered_rows = BTreeMap::new();

    for (&generation, row) in rows {
        let in_row: HashSet<usize> = row.iter().copied().collect();
        let mut clustered: HashSet<usize> = HashSet::with_capacity(row.len());
        let mut clusters = Vec::new();

        for &member in row {
            if !clustered.insert(member) {
                continue;
            }
            let mut cluster = vec![member];
            let mut cursor = 0;
            while cursor < cluster.len() {
                for spouse in view.spouses(&discovered[cluster[cursor]].id) {
                    if let Some(&s) = index_of.get(&spouse) {
                        if in_row.contains(&s) && clustered.insert(s) {
                            cluster.push(s);
                        }
                    }
                }
                cursor += 1;
            }
            clusters.push(cluster);
        }

        clustered_rows.insert(generation, clusters);
    }

    clustered_rows
}

/// Returns the (leftmost, rightmost) x of the cluster's children placed in
/// the next generation.
fn children_span<V: FamilyView>(
    view: &V,
    discovered: &[Discovered],
    index_of: &HashMap<&PersonId, usize>,
    x: &[f64],
    cluster: &[usize],
    generation: i32,
) -> Option<(f64, f64)> {
    let mut span: Option<(f64, f64)> = None;
    for &member in cluster {
        for child in view.children(&discovered[member].id) {
            let Some(&c) = index_of.get(&child) else {
                continue;
            };
            if discovered[c].generation != generation + 1 {
                continue;
            }
            span = Some(match span {
                Some((lo, hi)) => (lo.min(x[c]), hi.max(x[c])),
                None => (x[c], x[c]),
            });
        }
    }
    span
}

/// Assigns x coordinates to every discovered person.
///
/// Clusters never sit closer than `node_separation`; spouses inside a
/// cluster are `spouse_separation` apart. When a parent cluster is pushed
/// right by its left neighbour, every node at or right of its first child in
/// all deeper rows moves by the same amount, which keeps rows overlap-free
/// and the parents centred.
// Reason: cluster sizes are tiny, usize -> f64 is exact in this range.
#[allow(clippy::cast_precision_loss)]
pub(crate) fn place<V: FamilyView>(
    view: &V,
    discovered: &[Discovered],
    rows: &BTreeMap<i32, Vec<usize>>,
    config: &LayoutConfig,
) -> Placement {
    let index_of: HashMap<&PersonId, usize> = discovered
        .iter()
        .enumerate()
        .map(|(i, d)| (&d.id, i))
        .collect();
    let clustered_rows = build_clusters(view, discovered, &index_of, rows);
    let mut x = vec![0.0_f64; discovered.len()];

    for (&generation, clusters) in clustered_rows.iter().rev() {
        let mut cursor: Option<f64> = None;

        for cluster in clusters {
            let width = (cluster.len() - 1) as f64 * config.spouse_separation;
            let span = children_span(view, discovered, &index_of, &x, cluster, generation);

            let desired = match span {
                Some((lo, hi)) => (lo + hi) / 2.0 - width / 2.0,
                None => cursor.map_or(0.0, |c| c + config.node_separation),
            };
            let left = cursor.map_or(desired, |c| desired.max(c + config.node_separation));

            if let Some((lo, _)) = span {
                let delta = left - desired;
                if delta > 0.0 {
                    for (_, deeper) in clustered_rows.range(generation + 1..) {
                        for &member in deeper.iter().flatten() {
                            if x[member] >= lo {
                                x[member] += delta;
                            }
                        }
                    }
                }
            }

            for (offset, &member) in cluster.iter().enumerate() {
                x[member] = left + offset as f64 * config.spouse_separation;
            }
            cursor = Some(left + width);
        }
    }

    let min_x = x.iter().copied().fold(f64::INFINITY, f64::min);
    if min_x.is_finite() {
        for value in &mut x {
            *value -= min_x;
        }
    }

    let rows = clustered_rows
        .into_iter()
        .map(|(generation, clusters)| (generation, clusters.into_iter().flatten().collect()))
        .collect();

    Placement { x, rows }
}
