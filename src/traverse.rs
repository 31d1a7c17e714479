//! Simple-path traversal and contig-path walking (§4.4). Grounded on the
//! teacher's `visits::depth_first::seq`: a single-threaded, mark-based walk
//! with no recursion and no stack beyond the call frame, adapted here to
//! collapse runs of internal vertices into one simple path instead of
//! emitting generic DFS events.

use crate::builder::Graph;
use crate::edge::EdgeStore;
use crate::error::Result;
use crate::vertex::{other, Mark, Vertex};

/// One traversal event. `PathStart` fires once per branch leaving a
/// non-internal vertex (a junction with out-degree 3 fires it three
/// times, once per branch); `Edge` fires once per traversed edge,
/// including the final edge into each path's terminal vertex. Both
/// variants go through a single callback so callers with shared mutable
/// state (contig spelling) need only one closure, not two borrowing the
/// same locals.
#[derive(Debug, Clone, Copy)]
pub enum PathEvent {
    Start(Vertex),
    Edge { dest: Vertex, len: u32 },
}

/// Walks every simple path in the graph exactly once.
pub fn traverse<E: EdgeStore>(graph: &mut Graph<E>, mut on_event: impl FnMut(PathEvent)) -> Result<()> {
    graph.vertices.reset_marks();
    let num_vertices = graph.num_vertices();

    for v in 0..num_vertices {
        if graph.vertices.mark(v) == Mark::Eliminated {
            continue;
        }
        if graph.vertices.outdeg(v) == 0 {
            graph.vertices.set_mark(v, Mark::Eliminated);
            continue;
        }
        if !graph.vertices.is_internal(v) {
            traverse_from_vertex(graph, v, &mut on_event);
            graph.vertices.set_mark(v, Mark::Eliminated);
        }
    }

    // Purely internal cycles: every vertex on them stayed VACANT, since
    // the main pass above only starts from non-internal vertices.
    for v in 0..num_vertices {
        if graph.vertices.is_internal(v) && graph.vertices.mark(v) != Mark::Eliminated {
            traverse_from_vertex(graph, v, &mut on_event);
        }
    }
    Ok(())
}

fn traverse_from_vertex<E: EdgeStore>(graph: &mut Graph<E>, v: Vertex, on_event: &mut impl FnMut(PathEvent)) {
    let start = graph.vertices.offset(v);
    let end = graph.vertices.offset(v + 1);
    for slot in start..end {
        let rec = graph.edges.get(slot);
        if rec.reduced {
            continue;
        }
        if graph.vertices.mark(rec.dest) == Mark::Eliminated {
            continue;
        }
        on_event(PathEvent::Start(v));
        traverse_simple_path(graph, v, slot, on_event);
    }
}

fn traverse_simple_path<E: EdgeStore>(graph: &mut Graph<E>, i: Vertex, slot0: u64, on_event: &mut impl FnMut(PathEvent)) {
    let mut from = i;
    let mut slot = slot0;
    let mut rec = graph.edges.get(slot);
    let mut to = rec.dest;

    while graph.vertices.is_internal(to) && i != to && graph.vertices.mark(to) != Mark::Eliminated {
        on_event(PathEvent::Edge { dest: to, len: rec.len });
        graph.vertices.set_mark(to, Mark::Eliminated);
        graph.vertices.set_mark(other(to), Mark::Eliminated);
        from = to;
        let fstart = graph.vertices.offset(from);
        let fend = graph.vertices.offset(from + 1);
        slot = (fstart..fend)
            .find(|&s| !graph.edges.get(s).reduced)
            .expect("internal vertex must have exactly one live outgoing edge");
        rec = graph.edges.get(slot);
        to = rec.dest;
    }
    on_event(PathEvent::Edge { dest: to, len: rec.len });
}
