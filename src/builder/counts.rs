//! Phase 1 of the three-phase builder protocol (§4.2): counting. Also
//! home of the bidirected edge-pair mapping (§3) shared by counting and
//! insertion — every SPM is consumed through this one table so the two
//! phases can never disagree about which vertices an SPM touches.

use crate::spm::SpmRecord;
use crate::vertex::{vertex_of, End, Vertex};

/// The two directed half-edges one SPM inserts (§3's orientation table).
/// `(source, dest)` pairs; inserting both, independently, gives the
/// bidirected edge.
pub(crate) fn bidirected_pair(spm: &SpmRecord) -> [(Vertex, Vertex); 2] {
    let a = spm.suffix_read;
    let b = spm.prefix_read;
    let a_b = vertex_of(a, End::B);
    let a_e = vertex_of(a, End::E);
    let b_b = vertex_of(b, End::B);
    let b_e = vertex_of(b, End::E);
    match (spm.suffix_forward, spm.prefix_forward) {
        (true, true) => [(a_e, b_e), (b_b, a_b)],
        (true, false) => [(a_e, b_b), (b_e, a_b)],
        (false, true) => [(a_b, b_e), (b_b, a_e)],
        (false, false) => [(a_b, b_b), (b_e, a_e)],
    }
}

/// Per-vertex SPM-endpoint counts accumulated during phase 1, plus the
/// running minimum SPM length the builder must track alongside them.
pub(crate) struct Counts {
    counts: Vec<u64>,
    min_match_len: Option<u64>,
}

impl Counts {
    pub fn new(num_vertices: u64) -> Self {
        Counts {
            counts: vec![0; num_vertices as usize],
            min_match_len: None,
        }
    }

    /// Records one SPM's endpoints. Self-matches (`suffix_read ==
    /// prefix_read`) are skipped unless `load_self_spms` is set, mirroring
    /// phase 3's own skip so the two phases can never disagree about how
    /// many slots a self-match needs (§9 open question 3, resolved).
    pub fn observe(&mut self, spm: &SpmRecord, load_self_spms: bool) {
        if spm.suffix_read == spm.prefix_read && !load_self_spms {
            return;
        }
        for (source, _dest) in bidirected_pair(spm) {
            self.counts[source as usize] += 1;
        }
        self.min_match_len = Some(self.min_match_len.map_or(spm.length, |m| m.min(spm.length)));
    }

    pub fn min_match_len(&self) -> Option<u64> {
        self.min_match_len
    }

    pub fn into_vec(self) -> Vec<u64> {
        self.counts
    }
}
