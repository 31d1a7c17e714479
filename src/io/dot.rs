//! Graphviz DOT export (§4.5), ported from the original's
//! `gt_strgraph_dot_show`/`gt_strgraph_dot_bi_show`: a directional digraph
//! with one edge per live directed half-edge, and a bidirected graph with
//! one edge per SPM (arrow ends encoding read orientation).

use std::io::Write;

use crate::builder::Graph;
use crate::edge::EdgeStore;
use crate::error::Result;
use crate::io::is_canonical_spm_edge;
use crate::vertex::{end_of, readnum, End, Vertex};

fn vertex_shape<E: EdgeStore>(graph: &Graph<E>, v: Vertex) -> &'static str {
    if graph.vertices().is_internal(v) {
        "ellipse"
    } else if graph.vertices().outdeg(v) > 1 {
        "box"
    } else {
        "triangle"
    }
}

fn vertex_label(v: Vertex) -> String {
    format!("{}{}", readnum(v), if end_of(v) == End::E { 'E' } else { 'B' })
}

/// Writes the directional DOT view: one `U -> V [label=len]` edge per
/// non-reduced edge, vertex shape encoding internal/junction/end status.
pub fn write_dot<E: EdgeStore>(graph: &Graph<E>, mut out: impl Write) -> Result<()> {
    writeln!(out, "digraph StringGraph {{")?;
    let num_vertices = graph.num_vertices();
    for v in 0..num_vertices {
        if graph.vertices().outdeg(v) == 0 && graph.vertices().outdeg(crate::vertex::other(v)) == 0 {
            continue;
        }
        writeln!(out, " \"{}\" [shape={}]", vertex_label(v), vertex_shape(graph, v))?;
    }
    for v in 0..num_vertices {
        let start = graph.vertices().offset(v);
        let end = graph.vertices().offset(v + 1);
        for slot in start..end {
            let rec = graph.edges().get(slot);
            if rec.reduced {
                continue;
            }
            writeln!(out, " \"{}\" -> \"{}\" [label={}];", vertex_label(v), vertex_label(rec.dest), rec.len)?;
        }
    }
    writeln!(out, "}}")?;
    Ok(())
}

/// Writes the bidirected DOT view: one `U -- V` edge per SPM, using
/// `arrowtail`/`arrowhead` of `normal`/`inv` to encode which end of each
/// read the match touches.
pub fn write_dot_bidirected<E: EdgeStore>(graph: &Graph<E>, mut out: impl Write) -> Result<()> {
    writeln!(out, "graph StringGraph {{")?;
    let num_vertices = graph.num_vertices();
    for v in 0..num_vertices {
        if graph.vertices().outdeg(v) == 0 {
            continue;
        }
        writeln!(out, " {} [shape={}]", readnum(v), vertex_shape(graph, v))?;
        let start = graph.vertices().offset(v);
        let end = graph.vertices().offset(v + 1);
        for slot in start..end {
            let rec = graph.edges().get(slot);
            if rec.reduced || !is_canonical_spm_edge(v, rec.dest) {
                continue;
            }
            let is_e1 = end_of(v) == End::E;
            let is_e2 = end_of(rec.dest) == End::E;
            let (towards1, towards2) = if is_e1 && is_e2 {
                (false, true)
            } else if is_e1 && !is_e2 {
                (false, false)
            } else {
                (true, true)
            };
            writeln!(
                out,
                " {} -- {} [arrowtail={},arrowhead={},dir=both];",
                readnum(v),
                readnum(rec.dest),
                if towards1 { "normal" } else { "inv" },
                if towards2 { "normal" } else { "inv" },
            )?;
        }
    }
    writeln!(out, "}}")?;
    Ok(())
}
