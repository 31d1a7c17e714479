//! P-bubble removal (§4.3): when two or more paths leave the same vertex,
//! thread through internal successors only, and rejoin at a common
//! endpoint at similar total width, all but the shallowest are artifacts
//! of sequencing error at a heterozygous site and get removed.

use std::collections::HashMap;

use crate::builder::Graph;
use crate::edge::EdgeStore;
use crate::error::Result;
use crate::vertex::Vertex;

use super::reduce_with_partner;

/// Bubble-detection parameters (§4.3). `max_width` bounds how far a path
/// is walked before giving up; `max_diff` bounds how close two paths'
/// total widths must be to count as the same bubble; `bubble_rounds`
/// caps how many sweeps are run (each round can expose new bubbles since
/// removing one path shortens its neighbors' out-degree).
#[derive(Debug, Clone, Copy)]
pub struct PBubbleConfig {
    pub max_width: u32,
    pub max_diff: u32,
    pub bubble_rounds: u32,
}

impl PBubbleConfig {
    /// The default `max_width` (§4.3): one less than four times the
    /// longest read, minus twice the minimum match length.
    pub fn default_max_width(longest_read: u64, min_match_len: u64) -> u32 {
        (4 * longest_read).saturating_sub(2 * min_match_len).saturating_sub(1) as u32
    }
}

struct Path {
    /// The first edge out of the bubble's source vertex; this is the one
    /// actually reduced (and its partner) if the path loses.
    first: (Vertex, u64),
    endpoint: Vertex,
    width: u32,
    depth: usize,
}

/// Runs up to `config.bubble_rounds` sweeps, marking and reducing losing
/// bubble arms each round, stopping early once a round removes nothing.
/// Returns the total number of edges removed.
pub fn reduce_p_bubbles<E: EdgeStore>(graph: &mut Graph<E>, config: &PBubbleConfig) -> Result<usize> {
    let mut total = 0usize;
    for round in 0..config.bubble_rounds {
        let removed = reduce_p_bubbles_once(graph, config)?;
        total += removed;
        log::debug!("reduce_p_bubbles: round {round} removed {removed} edges");
        if removed == 0 {
            break;
        }
    }
    Ok(total)
}

fn reduce_p_bubbles_once<E: EdgeStore>(graph: &mut Graph<E>, config: &PBubbleConfig) -> Result<usize> {
    let num_vertices = graph.num_vertices();
    let mut by_endpoint: HashMap<(Vertex, Vertex), Vec<Path>> = HashMap::new();

    for v in 0..num_vertices {
        if graph.vertices.is_internal(v) || graph.vertices.outdeg(v) == 0 {
            continue;
        }
        let start = graph.vertices.offset(v);
        let end = graph.vertices.offset(v + 1);
        for slot in start..end {
            let rec = graph.edges.get(slot);
            if rec.reduced {
                continue;
            }
            if let Some(path) = walk_bubble_arm(graph, v, slot, config.max_width) {
                by_endpoint.entry((v, path.endpoint)).or_default().push(path);
            }
        }
    }

    let mut marked: Vec<(Vertex, u64)> = Vec::new();
    for (_, mut paths) in by_endpoint {
        if paths.len() < 2 {
            continue;
        }
        paths.sort_by_key(|p| p.width);
        for i in 0..paths.len() - 1 {
            if paths[i].first.1 == u64::MAX {
                continue; // already marked as the loser of an earlier pair
            }
            let diff = paths[i + 1].width.abs_diff(paths[i].width);
            if diff > config.max_diff {
                continue;
            }
            // Keep the shallower (shorter-depth) path; mark the other.
            // On a depth tie, arbitrarily keep the one seen first.
            let loser = if paths[i + 1].depth >= paths[i].depth { i + 1 } else { i };
            marked.push(paths[loser].first);
            paths[loser].first.1 = u64::MAX;
        }
    }

    for &(_, slot) in &marked {
        graph.edges.set_mark(slot, true);
    }
    for &(v, slot) in &marked {
        if !graph.edges.get(slot).reduced {
            reduce_with_partner(graph, v, slot);
        }
    }
    Ok(marked.len())
}

/// Walks from `(v, slot)` through internal successors, accumulating total
/// overhang width, until it either leaves the internal-successor chain
/// (a non-internal vertex: a candidate bubble endpoint) or exceeds
/// `max_width`. A bare single edge out of `v` (depth 1, no internal hop
/// at all) is not a bubble arm (§4.3 "keep paths with depth > 1") and is
/// rejected.
fn walk_bubble_arm<E: EdgeStore>(graph: &Graph<E>, v: Vertex, slot: u64, max_width: u32) -> Option<Path> {
    let rec = graph.edges.get(slot);
    let mut width = rec.len;
    let mut current = rec.dest;
    let mut depth = 1usize;

    while graph.vertices.is_internal(current) && current != v {
        let cstart = graph.vertices.offset(current);
        let cend = graph.vertices.offset(current + 1);
        let next_slot = (cstart..cend).find(|&s| !graph.edges.get(s).reduced)?;
        let next_rec = graph.edges.get(next_slot);
        width = width.checked_add(next_rec.len)?;
        if width > max_width {
            return None;
        }
        current = next_rec.dest;
        depth += 1;
    }
    if width > max_width || depth <= 1 {
        return None;
    }
    Some(Path {
        first: (v, slot),
        endpoint: current,
        width,
        depth,
    })
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

    fn fwd_fwd(suf: u64, pre: u64, len: u64) -> SpmRecord {
        SpmRecord { suffix_read: suf, prefix_read: pre, length: len, suffix_forward: true, prefix_forward: true }
    }

    /// Two single-edge arms from the same vertex to the same endpoint,
    /// at nearly equal width: a minimal p-bubble. The deeper-width arm
    /// is removed.
    #[test]
    fn removes_the_higher_width_arm_of_a_simple_bubble() {
        let reads: Vec<String> = (0..4).map(|_| "A".repeat(40)).collect();
        let oracle = VecReadOracle::new(reads);
        let source = LengthSource::Oracle(&oracle);
        let config = BuildConfig::default();
        // 0E -> 1 -> 3 (two hops) and 0E -> 2 -> 3 (two hops), nearly
        // equal total overhang, both ending at read 3.
        let spms = [
            fwd_fwd(0, 1, 20),
            fwd_fwd(1, 3, 20),
            fwd_fwd(0, 2, 22),
            fwd_fwd(2, 3, 20),
        ];

        let mut builder = GraphBuilder::new(4).unwrap();
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

        let bubble_config = PBubbleConfig { max_width: 100, max_diff: 5, bubble_rounds: 4 };
        let removed = reduce_p_bubbles(&mut graph, &bubble_config).unwrap();
        assert_eq!(removed, 1);
        assert_eq!(graph.vertices().outdeg(zero_e), 1);
    }

    /// A bare single-edge arm out of `v` (no internal hop) must never be
    /// treated as a bubble candidate, even when its width and endpoint
    /// would otherwise line up with a real depth > 1 arm.
    #[test]
    fn single_edge_arm_is_rejected_as_a_bubble_candidate() {
        let reads: Vec<String> = (0..2).map(|_| "A".repeat(40)).collect();
        let oracle = VecReadOracle::new(reads);
        let source = LengthSource::Oracle(&oracle);
        let config = BuildConfig::default();
        let spms = [fwd_fwd(0, 1, 20)];

        let mut builder = GraphBuilder::new(2).unwrap();
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
        let slot = graph.vertices().offset(zero_e);
        assert!(walk_bubble_arm(&graph, zero_e, slot, 100).is_none());
    }

    #[test]
    fn default_max_width_formula() {
        assert_eq!(PBubbleConfig::default_max_width(100, 20), 4 * 100 - 2 * 20 - 1);
    }
}
