//! Contig spelling (§4.4). Built on [`traverse`]; grounded on the
//! original's `gt_strgraph_spell_vertex`/`gt_strgraph_spell_edge` pair and
//! its contig-paths twin, `gt_strgraph_show_contigpath_vertex`/`_edge`
//! (`original_source/src/match/rdj-strgraph.c`). The contigs-writer
//! contract (§3 "Contigs-writer state") is exposed as a trait so the
//! actual FASTA/stats accumulation stays external, the way the SPM finder
//! and CLI layers do (§1).

use crate::builder::Graph;
use crate::edge::EdgeStore;
use crate::error::Result;
use crate::oracle::{decode_bases, ReadOracle};
use crate::traverse::{traverse, PathEvent};
use crate::vertex::{end_of, readnum, End, ReadNum, Vertex};

/// Filtering and output-mode parameters for contig spelling (§4.4).
#[derive(Debug, Clone, Copy)]
pub struct SpellConfig {
    /// Minimum number of vertices (read ends) a path must pass through to
    /// be emitted.
    pub min_path_depth: u64,
    /// Minimum total base length a contig must reach to be emitted.
    pub min_contig_length: u64,
}

impl Default for SpellConfig {
    fn default() -> Self {
        SpellConfig {
            min_path_depth: 1,
            min_contig_length: 0,
        }
    }
}

/// Maps a vertex to the read and strand a contig should read from at that
/// point in the path (§4.4 "the forward-strand read number for E-vertices,
/// or the reverse-strand read number for B-vertices"). Unlike the
/// original's mirrored-encseq virtual read ids, this crate's
/// [`ReadOracle`](crate::oracle::ReadOracle) contract keeps one id per
/// read and expresses strand via the `forward` flag already threaded
/// through `char_at`, so no id doubling is needed here.
pub fn mirror_seqnum(v: Vertex) -> (ReadNum, bool) {
    (readnum(v), end_of(v) == End::E)
}

/// The downstream consumer of spelled contigs (§3 "Contigs-writer state").
/// An append-only buffer plus a path description and stats accumulator,
/// reset on every `start`.
pub trait ContigsWriter {
    /// Begins a new contig at `read` (in the strand given by `forward`),
    /// discarding any state left over from a prior `start` that was never
    /// finalized with `write`/`abort`.
    fn start(&mut self, read: ReadNum, forward: bool);
    /// Appends the last `len` bases of `read` (in `forward`'s strand) to
    /// the contig currently being built.
    fn append(&mut self, read: ReadNum, forward: bool, len: u64);
    /// Finalizes and emits the current contig.
    fn write(&mut self);
    /// Discards the current contig (it failed the depth/length cutoff).
    fn abort(&mut self);
}

/// Walks the graph and drives `writer` through one `start`/`append`*/
/// `write`-or-`abort` cycle per simple path, applying `config`'s cutoffs.
pub fn spell_contigs<E, W>(graph: &mut Graph<E>, oracle: &dyn ReadOracle, config: &SpellConfig, writer: &mut W) -> Result<()>
where
    E: EdgeStore,
    W: ContigsWriter,
{
    let mut current_depth = 0u64;
    let mut current_length = 0u64;
    let mut started = false;

    let finalize = |writer: &mut W, depth: u64, length: u64, started: bool| {
        if !started {
            return;
        }
        if depth >= config.min_path_depth && length >= config.min_contig_length {
            writer.write();
        } else {
            writer.abort();
        }
    };

    traverse(graph, |event| match event {
        PathEvent::Start(v) => {
            finalize(writer, current_depth, current_length, started);
            let (read, forward) = mirror_seqnum(v);
            writer.start(read, forward);
            current_length = oracle.seq_length(read);
            current_depth = 1;
            started = true;
        }
        PathEvent::Edge { dest, len } => {
            let (read, forward) = mirror_seqnum(dest);
            writer.append(read, forward, len as u64);
            current_depth += 1;
            current_length += len as u64;
        }
    })?;

    finalize(writer, current_depth, current_length, started);
    Ok(())
}

/// One element of a contig's path description (§4.4 "contig-paths output
/// mode"): either the leading `(0, start_read)` marker or a subsequent
/// `(len, read)` step. `forward` records the strand, since this crate's
/// read ids are not doubled for reverse complements (see
/// [`mirror_seqnum`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContigPathElem {
    pub len: u32,
    pub read: ReadNum,
    pub forward: bool,
}

/// Walks the graph and collects one path description per surviving
/// contig (filtered only by `min_path_depth`, matching the original's
/// `gt_strgraph_show_contigpath_vertex`, which does not apply a length
/// cutoff). Consumed downstream to produce FASTA directly from the
/// encoded sequence store (out of scope here, §1(d)).
pub fn contig_paths<E: EdgeStore>(graph: &mut Graph<E>, min_path_depth: u64) -> Result<Vec<Vec<ContigPathElem>>> {
    let mut contigs: Vec<Vec<ContigPathElem>> = Vec::new();
    let mut current: Vec<ContigPathElem> = Vec::new();
    let mut current_depth = 0u64;

    traverse(graph, |event| match event {
        PathEvent::Start(v) => {
            if current_depth >= min_path_depth && !current.is_empty() {
                contigs.push(std::mem::take(&mut current));
            } else {
                current.clear();
            }
            let (read, forward) = mirror_seqnum(v);
            current.push(ContigPathElem { len: 0, read, forward });
            current_depth = 1;
        }
        PathEvent::Edge { dest, len } => {
            let (read, forward) = mirror_seqnum(dest);
            current.push(ContigPathElem { len, read, forward });
            current_depth += 1;
        }
    })?;

    if current_depth >= min_path_depth && !current.is_empty() {
        contigs.push(current);
    }
    Ok(contigs)
}

/// A [`ContigsWriter`] that spells actual DNA into owned `String`s via an
/// oracle, for tests and for callers without a FASTA-writing layer of
/// their own.
pub struct StringContigsWriter<'a> {
    oracle: &'a dyn ReadOracle,
    pending: String,
    pub contigs: Vec<String>,
}

impl<'a> StringContigsWriter<'a> {
    pub fn new(oracle: &'a dyn ReadOracle) -> Self {
        StringContigsWriter {
            oracle,
            pending: String::new(),
            contigs: Vec::new(),
        }
    }
}

impl<'a> ContigsWriter for StringContigsWriter<'a> {
    fn start(&mut self, read: ReadNum, forward: bool) {
        self.pending.clear();
        let len = self.oracle.seq_length(read);
        let start = self.oracle.seq_start(read);
        self.pending.push_str(&decode_bases(self.oracle, start, len, forward));
    }

    fn append(&mut self, read: ReadNum, forward: bool, len: u64) {
        let start = if forward {
            self.oracle.seq_start(read) + self.oracle.seq_length(read) - len
        } else {
            self.oracle.seq_start(read)
        };
        self.pending.push_str(&decode_bases(self.oracle, start, len, forward));
    }

    fn write(&mut self) {
        self.contigs.push(std::mem::take(&mut self.pending));
    }

    fn abort(&mut self) {
        self.pending.clear();
    }
}
