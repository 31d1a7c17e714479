//! Dead-end-path removal (§4.3): short branches of internal vertices that
//! terminate at a sink, attributable to a sequencing error rather than a
//! real junction, are marked and removed.

use crate::builder::Graph;
use crate::edge::EdgeStore;
use crate::error::Result;
use crate::vertex::{other, Vertex};

use super::reduce_with_partner;

/// `maxdepth` (§4.3): the longest dead-end chain (in edges) this pass
/// will remove.
#[derive(Debug, Clone, Copy)]
pub struct DeadEndConfig {
    pub max_depth: u32,
}

impl Default for DeadEndConfig {
    fn default() -> Self {
        DeadEndConfig { max_depth: 1 }
    }
}

/// Marks, then reduces, every dead-end chain (and its partners). Returns
/// the number of edges removed.
pub fn reduce_dead_ends<E: EdgeStore>(graph: &mut Graph<E>, config: &DeadEndConfig) -> Result<usize> {
    let num_vertices = graph.num_vertices();
    let mut marked: Vec<(Vertex, u64)> = Vec::new();

    for v in 0..num_vertices {
        if graph.vertices.is_internal(v) || graph.vertices.outdeg(v) == 0 {
            continue;
        }
        // The start vertex must have nothing attached on its opposite end
        // (§4.3 "the start vertex is ... has outdeg 0 on the opposite
        // direction"), i.e. this really is a dead end, not an interior
        // branch of an otherwise-connected read.
        if graph.vertices.outdeg(other(v)) != 0 {
            continue;
        }

        let start = graph.vertices.offset(v);
        let end = graph.vertices.offset(v + 1);
        for slot in start..end {
            let rec = graph.edges.get(slot);
            if rec.reduced || rec.mark {
                continue;
            }
            if let Some(path) = walk_dead_end(graph, v, slot, config.max_depth) {
                for &(_, s) in &path {
                    graph.edges.set_mark(s, true);
                }
                marked.extend(path);
            }
        }
    }

    for &(src, slot) in &marked {
        if !graph.edges.get(slot).reduced {
            reduce_with_partner(graph, src, slot);
        }
    }
    log::debug!("reduce_dead_ends: removed {} edges", marked.len());
    Ok(marked.len())
}

/// Walks the unique forward path starting at `(v, slot)` through internal
/// successors. Returns the path's edges if it reaches a sink within
/// `max_depth` steps, `None` otherwise (branches, cycles back to `v`, or
/// runs out of depth first).
fn walk_dead_end<E: EdgeStore>(
    graph: &Graph<E>,
    v: Vertex,
    slot: u64,
    max_depth: u32,
) -> Option<Vec<(Vertex, u64)>> {
    let mut path = vec![(v, slot)];
    let mut current = graph.edges.get(slot).dest;
    let mut depth = 1u32;

    while graph.vertices.outdeg(current) != 0 {
        if !graph.vertices.is_internal(current) || current == v || depth >= max_depth {
            return None;
        }
        let cstart = graph.vertices.offset(current);
        let cend = graph.vertices.offset(current + 1);
        let next_slot = (cstart..cend).find(|&s| !graph.edges.get(s).reduced)?;
        let next_rec = graph.edges.get(next_slot);
        path.push((current, next_slot));
        current = next_rec.dest;
        depth += 1;
    }
    Some(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::{BuildConfig, GraphBuilder, LengthSource};
    use crate::edge::BitfieldEdges;
    use crate::oracle::VecReadOracle;
    use crate::sort::sort_edges_by_length;
    use crate::spm::SpmRecord;
    use crate::vertex::{vertex_of, End};

    /// Scenario E (§8): a chain of 3 internal vertices hanging off a
    /// junction; with `maxdepth=10` all three edges get removed and the
    /// junction's outdeg drops by exactly 1.
    #[test]
    fn removes_a_three_edge_dead_end_off_a_junction() {
        let reads: Vec<String> = (0..6).map(|_| "A".repeat(40)).collect();
        let oracle = VecReadOracle::new(reads);
        let source = LengthSource::Oracle(&oracle);
        let config = BuildConfig::default();

        // Junction read 0 (E end) branches two ways: to read 1 (a real,
        // longer branch kept alive by a further overlap) and into a
        // length-3 internal chain 0E -> 2 -> 3 -> 4 (a sink).
        let spms = [
            SpmRecord { suffix_read: 0, prefix_read: 1, length: 30, suffix_forward: true, prefix_forward: true },
            SpmRecord { suffix_read: 1, prefix_read: 5, length: 30, suffix_forward: true, prefix_forward: true },
            SpmRecord { suffix_read: 0, prefix_read: 2, length: 20, suffix_forward: true, prefix_forward: true },
            SpmRecord { suffix_read: 2, prefix_read: 3, length: 20, suffix_forward: true, prefix_forward: true },
            SpmRecord { suffix_read: 3, prefix_read: 4, length: 20, suffix_forward: true, prefix_forward: true },
        ];

        let mut builder = GraphBuilder::new(6).unwrap();
        for spm in &spms {
            builder.count_spm(spm, &config);
        }
        let mut graph: Graph<BitfieldEdges> = builder.allocate(&source);
        for spm in &spms {
            graph.insert_spm(spm, &source, &config).unwrap();
        }
        graph.finish_insertion().unwrap();
        sort_edges_by_length(&mut graph).unwrap();

        let zero_e = vertex_of(0, End::E);
        assert_eq!(graph.vertices().outdeg(zero_e), 2);

        let removed = reduce_dead_ends(&mut graph, &DeadEndConfig { max_depth: 10 }).unwrap();
        assert_eq!(removed, 3);
        assert_eq!(graph.vertices().outdeg(zero_e), 1);

        let two_b = vertex_of(2, End::B);
        assert_eq!(graph.vertices().outdeg(two_b), 0);
    }
}
