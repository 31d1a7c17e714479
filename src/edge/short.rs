//! The "short" edge encoding: 8-bit length (0xFF = reduced sentinel),
//! 32-bit destination, mark kept in a separate bitset. Cheapest to
//! implement and fastest to scan; suited to ≤255-base reads and ≤2G
//! reads (§3).

use super::{EdgeParams, EdgeRecord, EdgeStore};
use crate::bitset::BitSet;
use crate::vertex::Vertex;

const REDUCED_SENTINEL: u8 = 0xFF;
/// Largest representable overhang length; 0xFF is reserved to mean
/// "reduced".
pub const LEN_MAX: u32 = 0xFE;

pub struct ShortEdges {
    dest: Vec<u32>,
    len: Vec<u8>,
    mark: BitSet,
}

impl EdgeStore for ShortEdges {
    const REPR_TAG: u8 = 1;

    fn new(total_slots: u64, params: EdgeParams) -> Self {
        assert!(
            params.max_len <= LEN_MAX,
            "short encoding cannot represent overhangs longer than {LEN_MAX} bases"
        );
        assert!(
            params.num_vertices <= u32::MAX as u64,
            "short encoding cannot address more than 2^32 vertices"
        );
        ShortEdges {
            dest: vec![0; total_slots as usize],
            // Every slot starts out reduced; the builder's `init` clears
            // this as it fills slots, so slots an SPM was counted for but
            // that never got inserted (e.g. a contained endpoint dropped
            // on load) end up reduced with no extra bookkeeping.
            len: vec![REDUCED_SENTINEL; total_slots as usize],
            mark: BitSet::new(total_slots),
        }
    }

    fn len(&self) -> u64 {
        self.dest.len() as u64
    }

    fn get(&self, slot: u64) -> EdgeRecord {
        let raw_len = self.len[slot as usize];
        EdgeRecord {
            dest: self.dest[slot as usize] as Vertex,
            len: if raw_len == REDUCED_SENTINEL { 0 } else { raw_len as u32 },
            reduced: raw_len == REDUCED_SENTINEL,
            mark: self.mark.get(slot),
        }
    }

    fn set(&mut self, slot: u64, record: EdgeRecord) {
        assert!(
            record.reduced || record.len <= LEN_MAX,
            "overhang length {} exceeds short encoding's maximum {LEN_MAX}",
            record.len
        );
        self.dest[slot as usize] = record.dest as u32;
        self.len[slot as usize] = if record.reduced {
            REDUCED_SENTINEL
        } else {
            record.len as u8
        };
        self.mark.set(slot, record.mark);
    }

    fn truncate(&mut self, new_len: u64) {
        self.dest.truncate(new_len as usize);
        self.len.truncate(new_len as usize);
        let mut shrunk = BitSet::new(new_len);
        for i in 0..new_len {
            shrunk.set(i, self.mark.get(i));
        }
        self.mark = shrunk;
    }
}
