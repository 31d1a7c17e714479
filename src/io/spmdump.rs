//! SPM dump (§4.5): the reverse of `crate::spm::parse_ascii_line`, walking
//! the graph's live edges back into [`SpmRecord`]s, one per SPM (same
//! de-duplication as bidirected DOT).

use std::io::Write;

use crate::builder::Graph;
use crate::edge::EdgeStore;
use crate::error::Result;
use crate::io::{is_canonical_spm_edge, reconstruct_spm};
use crate::oracle::ReadOracle;
use crate::spm::{write_spm_list, SpmFormat, SpmRecord};

/// Collects every live edge's originating SPM, one per bidirected pair.
pub fn collect_spms<E: EdgeStore>(graph: &Graph<E>, oracle: &dyn ReadOracle) -> Vec<SpmRecord> {
    let mut spms = Vec::new();
    let num_vertices = graph.num_vertices();
    for v in 0..num_vertices {
        let start = graph.vertices().offset(v);
        let end = graph.vertices().offset(v + 1);
        for slot in start..end {
            let rec = graph.edges().get(slot);
            if rec.reduced || !is_canonical_spm_edge(v, rec.dest) {
                continue;
            }
            spms.push(reconstruct_spm(oracle, v, rec.dest, rec.len));
        }
    }
    spms
}

/// Writes every live edge's originating SPM to `out`, in any of the three
/// on-disk formats [`crate::spm`] already supports.
pub fn write_spm_dump<E: EdgeStore>(
    path: &str,
    graph: &Graph<E>,
    oracle: &dyn ReadOracle,
    format: SpmFormat,
    out: impl Write,
) -> Result<()> {
    let spms = collect_spms(graph, oracle);
    write_spm_list(path, &spms, format, out)
}
