//! Compaction (§4.3 "Compaction"): walks edges in storage order, copies
//! each vertex's non-reduced edges down to the next free slot, rewrites
//! `offset`, and shrinks the edge array exactly once. Safe to call after
//! any reduction pass, any number of times.

use crate::builder::Graph;
use crate::edge::EdgeStore;
use crate::error::Result;

/// Compacts `graph` in place, dropping every reduced edge slot.
pub fn compact<E: EdgeStore>(graph: &mut Graph<E>) -> Result<()> {
    let num_vertices = graph.num_vertices();
    let mut new_offset = Vec::with_capacity(num_vertices as usize + 1);
    let mut write_cursor = 0u64;

    for v in 0..num_vertices {
        new_offset.push(write_cursor);
        let start = graph.vertices.offset(v);
        let end = graph.vertices.offset(v + 1);
        for slot in start..end {
            let record = graph.edges.get(slot);
            if record.reduced {
                continue;
            }
            if write_cursor != slot {
                graph.edges.set(write_cursor, record);
            }
            write_cursor += 1;
        }
    }
    new_offset.push(write_cursor);

    graph.edges.truncate(write_cursor);
    graph.vertices.set_offsets(&new_offset);
    log::info!("compact: {} live slots kept of {num_vertices} vertices", write_cursor);
    Ok(())
}
