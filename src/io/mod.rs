//! Read-only views and serialization over a built graph (§4.5): a binary
//! checkpoint plus four export formats (DOT, adjacency dump, SPM dump,
//! ASQG/GFA). Every function here is a free function writing to any `impl
//! Write`, the way [`crate::spm::write_spm_list`] and
//! [`crate::bitset::BitSet::write`] do, so callers choose plain files,
//! `flate2` gzip streams, or in-memory buffers without this module caring.

pub mod adjacency;
pub mod asqg;
pub mod checkpoint;
pub mod dot;
pub mod spmdump;

pub use checkpoint::{read_checkpoint, write_checkpoint};

use crate::oracle::ReadOracle;
use crate::spm::SpmRecord;
use crate::vertex::{end_of, readnum, End, Vertex};

/// True iff `(source, dest)` is the one stored directed half-edge a
/// bidirected SPM pair should be shown through (§4.5 "avoid emitting the
/// same SPM twice"), ported from the original's
/// `gt_strgraph_dot_bi_show` dedup rule: an E-E edge is always canonical
/// (its stored partner is always B-B, excluded here); an E-B or B-E edge
/// breaks the tie by read number. Used by the bidirected DOT, SPM dump,
/// and ASQG edge writers alike, since all three need exactly one line per
/// SPM.
pub(crate) fn is_canonical_spm_edge(source: Vertex, dest: Vertex) -> bool {
    let is_e1 = end_of(source) == End::E;
    let is_e2 = end_of(dest) == End::E;
    match (is_e1, is_e2) {
        (true, true) => true,
        (true, false) => readnum(source) < readnum(dest),
        (false, true) => readnum(source) > readnum(dest),
        (false, false) => false,
    }
}

/// Reconstructs the [`SpmRecord`] a canonical directed edge `source ->
/// dest` (overhang `len`) originated from, treating `source`'s read as
/// the suffix read and `dest`'s as the prefix read — the inverse of §3's
/// orientation table, specialized to the one half-edge
/// [`is_canonical_spm_edge`] selects.
pub(crate) fn reconstruct_spm(oracle: &dyn ReadOracle, source: Vertex, dest: Vertex, len: u32) -> SpmRecord {
    let prefix_read = readnum(dest);
    let dest_len = oracle.seq_length(prefix_read);
    SpmRecord {
        suffix_read: readnum(source),
        prefix_read,
        length: dest_len - len as u64,
        suffix_forward: end_of(source) == End::E,
        prefix_forward: end_of(dest) == End::E,
    }
}
