//! Sorts each vertex's edge block ascending by `len` (§4.2 "Sort by
//! length"), the precondition for transitive reduction (§4.3, §8
//! invariant 4). Grounded on the teacher's `par_sort_graph`/`par_sort_pairs`
//! parallel-chunk-sort pattern (§5): computing each vertex's new order is
//! read-only and embarrassingly parallel over vertices, so it runs under
//! `rayon`; writing the reordered records back is sequential, since
//! `EdgeStore::set` takes `&mut self`.

use rayon::prelude::*;

use crate::builder::{BuildState, Graph};
use crate::edge::{EdgeRecord, EdgeStore};
use crate::error::{Result, StrgraphError};

/// Sorts every vertex's edge slots ascending by `len` and transitions the
/// graph to `SortedByL`.
pub fn sort_edges_by_length<E>(graph: &mut Graph<E>) -> Result<()>
where
    E: EdgeStore + Sync,
{
    if graph.state != BuildState::Construction {
        return Err(StrgraphError::state("sort_edges_by_length", BuildState::Construction, graph.state));
    }
    let num_vertices = graph.num_vertices();
    let ranges: Vec<(u64, u64)> = (0..num_vertices)
        .map(|v| (graph.vertices.offset(v), graph.vertices.offset(v + 1)))
        .collect();

    let sorted_blocks: Vec<Vec<EdgeRecord>> = ranges
        .par_iter()
        .map(|&(start, end)| {
            let mut block: Vec<EdgeRecord> = (start..end).map(|slot| graph.edges.get(slot)).collect();
            block.sort_by_key(|record| record.len);
            block
        })
        .collect();

    for (&(start, _), block) in ranges.iter().zip(sorted_blocks) {
        for (i, record) in block.into_iter().enumerate() {
            graph.edges.set(start + i as u64, record);
        }
    }

    graph.state = BuildState::SortedByL;
    log::info!("sort: {num_vertices} vertices sorted by edge length");
    Ok(())
}
