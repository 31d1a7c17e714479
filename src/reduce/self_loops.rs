//! Self-match and reverse-complement-self removal (§4.3). Both scan every
//! vertex's own edges and reduce single-sided, the way `reduce_self`'s
//! spec text describes; no cross-vertex partner search is needed because
//! the per-vertex loop visits every vertex's own copy of a self-match's
//! duplicated edges independently (§9 open question 2, resolved in
//! SPEC_FULL.md).

use crate::builder::Graph;
use crate::edge::EdgeStore;
use crate::error::Result;
use crate::vertex::other;

/// Removes edges where `dest == V` (true self-loops). Returns the number
/// of self-matches removed (half the raw edge count, §8 invariant 5).
pub fn reduce_self<E: EdgeStore>(graph: &mut Graph<E>) -> Result<usize> {
    let mut raw = 0usize;
    for v in 0..graph.num_vertices() {
        let start = graph.vertices.offset(v);
        let end = graph.vertices.offset(v + 1);
        for slot in start..end {
            let rec = graph.edges.get(slot);
            if rec.reduced || rec.dest != v {
                continue;
            }
            graph.edges.reduce(slot);
            graph.vertices.dec_outdeg(v);
            raw += 1;
        }
    }
    debug_assert_eq!(raw % 2, 0, "self-matches must contribute an even number of self-loop edges");
    log::debug!("reduce_self: removed {} self-loop edges ({} self-matches)", raw, raw / 2);
    Ok(raw / 2)
}

/// Removes edges where `dest == other(V)` (reverse-complement self-matches).
/// Returns the number of self-matches removed.
pub fn reduce_with_rc<E: EdgeStore>(graph: &mut Graph<E>) -> Result<usize> {
    let mut raw = 0usize;
    for v in 0..graph.num_vertices() {
        let start = graph.vertices.offset(v);
        let end = graph.vertices.offset(v + 1);
        let target = other(v);
        for slot in start..end {
            let rec = graph.edges.get(slot);
            if rec.reduced || rec.dest != target {
                continue;
            }
            graph.edges.reduce(slot);
            graph.vertices.dec_outdeg(v);
            raw += 1;
        }
    }
    debug_assert_eq!(raw % 2, 0, "reverse-complement self-matches must contribute an even number of edges");
    log::debug!("reduce_with_rc: removed {} edges ({} self-matches)", raw, raw / 2);
    Ok(raw / 2)
}
