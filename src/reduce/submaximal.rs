//! Submaximal-edge reduction (§4.3): deduplicates multiple edges to the
//! same destination, keeping only the shortest (the first one seen in
//! ascending order). Requires `SortedByL`, like transitive reduction.

use crate::builder::{BuildState, Graph};
use crate::edge::EdgeStore;
use crate::error::{Result, StrgraphError};
use crate::vertex::{Mark, Vertex};

use super::reduce_with_partner;

/// Marks, then reduces, every submaximal edge (and its partner). Returns
/// the number of submaximal edges removed.
pub fn reduce_submaximal<E: EdgeStore>(graph: &mut Graph<E>) -> Result<usize> {
    if graph.state != BuildState::SortedByL {
        return Err(StrgraphError::state("reduce_submaximal", BuildState::SortedByL, graph.state));
    }
    graph.vertices.reset_marks();
    let num_vertices = graph.num_vertices();

    for v in 0..num_vertices {
        let start = graph.vertices.offset(v);
        let end = graph.vertices.offset(v + 1);
        let mut seen: Vec<Vertex> = Vec::new();

        for slot in start..end {
            let rec = graph.edges.get(slot);
            if rec.reduced {
                continue;
            }
            match graph.vertices.mark(rec.dest) {
                Mark::Vacant => {
                    graph.vertices.set_mark(rec.dest, Mark::InPlay);
                    seen.push(rec.dest);
                }
                Mark::InPlay => {
                    // A later (longer, since ascending) edge to an
                    // already-seen destination: submaximal.
                    graph.edges.set_mark(slot, true);
                }
                other => unreachable!("submaximal scratch marks should only ever be Vacant/InPlay, got {other:?}"),
            }
        }

        for dest in seen {
            graph.vertices.set_mark(dest, Mark::Vacant);
        }
    }

    let mut marked: Vec<(Vertex, u64)> = Vec::new();
    for v in 0..num_vertices {
        let start = graph.vertices.offset(v);
        let end = graph.vertices.offset(v + 1);
        for slot in start..end {
            let rec = graph.edges.get(slot);
            if !rec.reduced && rec.mark {
                marked.push((v, slot));
            }
        }
    }
    for &(v, slot) in &marked {
        if !graph.edges.get(slot).reduced {
            reduce_with_partner(graph, v, slot);
        }
    }
    log::debug!("reduce_submaximal: removed {} submaximal edges", marked.len());
    Ok(marked.len())
}
