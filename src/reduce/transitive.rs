//! Myers' ordering-based transitive-edge reduction (§4.3). Requires
//! `SortedByL` (§5 "Transitive reduction requires this ordering").
//! Grounded on the teacher's `transform::simplify` pattern: per-vertex
//! scratch state reset on every iteration rather than carried across.

use crate::builder::{BuildState, Graph};
use crate::edge::EdgeStore;
use crate::error::{Result, StrgraphError};
use crate::vertex::{Mark, Vertex};

use super::reduce_with_partner;

/// Marks, then reduces, every transitively-redundant edge (and its
/// partner). Returns the number of transitive edge pairs removed.
pub fn reduce_transitive<E: EdgeStore>(graph: &mut Graph<E>) -> Result<usize> {
    if graph.state != BuildState::SortedByL {
        return Err(StrgraphError::state("reduce_transitive", BuildState::SortedByL, graph.state));
    }
    graph.vertices.reset_marks();
    let num_vertices = graph.num_vertices();

    for v in 0..num_vertices {
        if graph.vertices.outdeg(v) == 0 {
            continue;
        }
        let start = graph.vertices.offset(v);
        let end = graph.vertices.offset(v + 1);

        // Step 1: mark every live neighbor INPLAY.
        for slot in start..end {
            let rec = graph.edges.get(slot);
            if !rec.reduced {
                graph.vertices.set_mark(rec.dest, Mark::InPlay);
            }
        }

        // Step 2: longest = length of V's longest live edge (edges are
        // ascending by length, so the last live slot holds it).
        let longest = (start..end)
            .rev()
            .find_map(|slot| {
                let rec = graph.edges.get(slot);
                if rec.reduced { None } else { Some(rec.len) }
            })
            .unwrap_or(0);

        // Step 3: for every live edge (V,W,jlen), walk W's live edges in
        // ascending length while klen + jlen <= longest.
        for slot in start..end {
            let rec = graph.edges.get(slot);
            if rec.reduced {
                continue;
            }
            let w = rec.dest;
            let jlen = rec.len as u64;
            let w_start = graph.vertices.offset(w);
            let w_end = graph.vertices.offset(w + 1);
            for wslot in w_start..w_end {
                let wrec = graph.edges.get(wslot);
                if wrec.reduced {
                    continue;
                }
                let klen = wrec.len as u64;
                if klen + jlen > longest as u64 {
                    break; // ascending order: nothing further can satisfy the bound
                }
                if graph.vertices.mark(wrec.dest) != Mark::InPlay {
                    continue;
                }
                let target_len = (jlen + klen) as u32;
                let x = wrec.dest;
                if let Some(found) = (start..end).find(|&s| {
                    let r = graph.edges.get(s);
                    !r.reduced && r.dest == x && r.len == target_len
                }) {
                    graph.edges.set_mark(found, true);
                }
            }
        }

        // Step 4: clear this vertex's neighbors back to VACANT.
        for slot in start..end {
            let rec = graph.edges.get(slot);
            graph.vertices.set_mark(rec.dest, Mark::Vacant);
        }
    }

    reduce_marked(graph, num_vertices)
}

fn reduce_marked<E: EdgeStore>(graph: &mut Graph<E>, num_vertices: u64) -> Result<usize> {
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
    debug_assert_eq!(marked.len() % 2, 0, "transitively-marked edges must come in partner pairs");
    for &(v, slot) in &marked {
        if !graph.edges.get(slot).reduced {
            reduce_with_partner(graph, v, slot);
        }
    }
    let removed = marked.len() / 2;
    log::debug!("reduce_transitive: removed {removed} transitive edge pairs");
    Ok(removed)
}
