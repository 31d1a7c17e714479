//! Adjacency dump (§4.5): one human-readable line per vertex, its
//! out-degree, and its live `(dest, len)` edges.

use std::io::Write;

use crate::builder::Graph;
use crate::edge::EdgeStore;
use crate::error::Result;
use crate::vertex::{end_of, readnum, End, Vertex};

fn vertex_label(v: Vertex) -> String {
    format!("{}{}", readnum(v), if end_of(v) == End::E { 'E' } else { 'B' })
}

/// Writes one line per vertex: `LABEL outdeg=N dest1:len1 dest2:len2 ...`,
/// skipping reduced slots.
pub fn write_adjacency<E: EdgeStore>(graph: &Graph<E>, mut out: impl Write) -> Result<()> {
    let num_vertices = graph.num_vertices();
    for v in 0..num_vertices {
        write!(out, "{} outdeg={}", vertex_label(v), graph.vertices().outdeg(v))?;
        let start = graph.vertices().offset(v);
        let end = graph.vertices().offset(v + 1);
        for slot in start..end {
            let rec = graph.edges().get(slot);
            if rec.reduced {
                continue;
            }
            write!(out, " {}:{}", vertex_label(rec.dest), rec.len)?;
        }
        writeln!(out)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::{BuildConfig, GraphBuilder, LengthSource};
    use crate::edge::BitfieldEdges;
    use crate::oracle::VecReadOracle;
    use crate::sort::sort_edges_by_length;
    use crate::spm::SpmRecord;

    #[test]
    fn dumps_one_line_per_vertex_with_live_edges() {
        let reads = vec!["A".repeat(20), "C".repeat(20)];
        let oracle = VecReadOracle::new(reads);
        let source = LengthSource::Oracle(&oracle);
        let config = BuildConfig::default();
        let spm = SpmRecord { suffix_read: 0, prefix_read: 1, length: 12, suffix_forward: true, prefix_forward: true };

        let mut builder = GraphBuilder::new(2).unwrap();
        builder.count_spm(&spm, &config);
        let mut graph: Graph<BitfieldEdges> = builder.allocate(&source);
        graph.insert_spm(&spm, &source, &config).unwrap();
        graph.finish_insertion().unwrap();
        sort_edges_by_length(&mut graph).unwrap();

        let mut buf = Vec::new();
        write_adjacency(&graph, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text.lines().count(), 4);
        assert!(text.lines().any(|l| l.starts_with("0E outdeg=1") && l.contains("1E:8")));
        assert!(text.lines().any(|l| l.starts_with("0B outdeg=0") && !l.contains(':')));
    }
}
