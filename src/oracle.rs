//! The read oracle: the external encoded-sequence store this crate
//! consumes for lengths, offsets and 2-bit characters.
//!
//! This crate never materializes sequence data itself; every caller site
//! that needs a base goes through a `&dyn ReadOracle` (or a generic `O:
//! ReadOracle`). A real oracle lives outside this crate's scope (§1(a));
//! [`VecReadOracle`] below is an in-memory stand-in used by tests and by
//! callers without an encoded-sequence store of their own.

/// 2-bit nucleotide code, in the conventional A=0, C=1, G=2, T=3 order.
pub type Base = u8;

/// Minimal capability set a string-graph construction needs from an
/// encoded-sequence store (§6).
pub trait ReadOracle {
    /// Number of reads, `N`.
    fn num_reads(&self) -> u64;

    /// Total length in bases of all reads.
    fn total_length(&self) -> u64;

    /// Length in bases of `read_id`.
    fn seq_length(&self, read_id: u64) -> u64;

    /// Starting offset (in bases) of `read_id` in the oracle's address
    /// space.
    fn seq_start(&self, read_id: u64) -> u64;

    /// The 2-bit code at `offset`, read forward or as its complement.
    fn char_at(&self, offset: u64, forward: bool) -> Base;

    /// Length of the longest read.
    fn max_seq_length(&self) -> u64;

    /// Whether reverse complements are materialized alongside forward
    /// reads (affects how `char_at`'s `forward` flag is interpreted
    /// upstream; this crate always passes it through unchanged).
    fn is_mirrored(&self) -> bool;
}

/// Decodes `len` bases starting at `start`, in the given orientation, into
/// an ASCII DNA string. A convenience built only on [`ReadOracle`].
pub fn decode_bases(oracle: &dyn ReadOracle, start: u64, len: u64, forward: bool) -> String {
    const ALPHABET: [u8; 4] = *b"ACGT";
    (0..len)
        .map(|i| {
            let offset = if forward { start + i } else { start + len - 1 - i };
            ALPHABET[oracle.char_at(offset, forward) as usize & 0b11] as char
        })
        .collect()
}

/// A simple in-memory [`ReadOracle`] over owned ASCII DNA strings, for
/// tests and for callers that have no real encoded-sequence store.
#[derive(Debug, Clone, Default)]
pub struct VecReadOracle {
    reads: Vec<String>,
    starts: Vec<u64>,
    total_length: u64,
    max_len: u64,
}

impl VecReadOracle {
    pub fn new(reads: Vec<String>) -> Self {
        let mut starts = Vec::with_capacity(reads.len());
        let mut total_length = 0u64;
        let mut max_len = 0u64;
        for r in &reads {
            starts.push(total_length);
            total_length += r.len() as u64;
            max_len = max_len.max(r.len() as u64);
        }
        VecReadOracle {
            reads,
            starts,
            total_length,
            max_len,
        }
    }

    pub fn read(&self, read_id: u64) -> &str {
        &self.reads[read_id as usize]
    }
}

fn base_code(c: u8) -> Base {
    match c {
        b'A' | b'a' => 0,
        b'C' | b'c' => 1,
        b'G' | b'g' => 2,
        b'T' | b't' => 3,
        other => panic!("not a DNA base: {}", other as char),
    }
}

fn complement_code(code: Base) -> Base {
    3 - code
}

impl ReadOracle for VecReadOracle {
    fn num_reads(&self) -> u64 {
        self.reads.len() as u64
    }

    fn total_length(&self) -> u64 {
        self.total_length
    }

    fn seq_length(&self, read_id: u64) -> u64 {
        self.reads[read_id as usize].len() as u64
    }

    fn seq_start(&self, read_id: u64) -> u64 {
        self.starts[read_id as usize]
    }

    fn char_at(&self, offset: u64, forward: bool) -> Base {
        // Locate which read `offset` falls in via the start table; reads
        // are concatenated in order, so a linear scan suffices for the
        // small inputs this stand-in is meant for.
        let read_id = match self.starts.binary_search(&offset) {
            Ok(i) => i,
            Err(i) => i - 1,
        };
        let local = offset - self.starts[read_id];
        let code = base_code(self.reads[read_id].as_bytes()[local as usize]);
        if forward {
            code
        } else {
            complement_code(code)
        }
    }

    fn max_seq_length(&self) -> u64 {
        self.max_len
    }

    fn is_mirrored(&self) -> bool {
        false
    }
}
