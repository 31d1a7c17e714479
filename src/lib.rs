//! String-graph construction, simplification and contig spelling for
//! overlap-based sequence assembly (§1 OVERVIEW).
//!
//! This crate consumes suffix–prefix matches (SPMs) between reads and a
//! contained-read bitset — both produced upstream by external tools — and
//! builds a bidirected string graph (one vertex per read end, one edge
//! per SPM), simplifies it (transitive, self, submaximal, dead-end and
//! p-bubble reduction), and walks the result into contigs. The encoded
//! sequence store, the SPM finder, FASTA I/O, and CLI/logging plumbing
//! are all external collaborators; this crate only defines the
//! [`oracle::ReadOracle`] seam they're consumed through.

pub mod bitset;
pub mod builder;
pub mod compact;
pub mod contained;
pub mod edge;
pub mod error;
pub mod io;
pub mod oracle;
pub mod reduce;
pub mod sort;
pub mod spell;
pub mod spm;
pub mod traverse;
pub mod vertex;

/// Commonly-combined imports for callers building and simplifying a graph
/// end to end.
pub mod prelude {
    pub use crate::builder::{BuildConfig, BuildState, Graph, GraphBuilder, LengthSource};
    pub use crate::compact::compact;
    pub use crate::contained::ContainedReads;
    pub use crate::edge::{BitfieldEdges, BitpackEdges, EdgeParams, EdgeRecord, EdgeStore, ShortEdges};
    pub use crate::error::{Result, StrgraphError};
    pub use crate::oracle::{decode_bases, ReadOracle, VecReadOracle};
    pub use crate::reduce::{
        reduce_dead_ends, reduce_p_bubbles, reduce_self, reduce_submaximal, reduce_transitive, reduce_with_rc,
        DeadEndConfig, PBubbleConfig,
    };
    pub use crate::sort::sort_edges_by_length;
    pub use crate::spell::{contig_paths, mirror_seqnum, spell_contigs, ContigPathElem, ContigsWriter, SpellConfig};
    pub use crate::spm::{read_spm_list, write_spm_list, SpmFormat, SpmRecord};
    pub use crate::traverse::{traverse, PathEvent};
    pub use crate::vertex::{end_of, other, readnum, vertex_of, End, Mark, ReadNum, Vertex, VertexStore};
}
