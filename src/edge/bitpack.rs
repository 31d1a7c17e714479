//! The "bitpack" edge encoding: `dest` and `len` each stored in the
//! minimum number of bits their ranges require (`ceil(log2(...))`),
//! marks in a 1-bit array, a sentinel `len` value meaning "reduced"
//! (§3). The minimum-memory variant; pays for it in reduced scan speed
//! since every access walks a packed bit offset.

use sux::bits::BitFieldVec;
use sux::traits::bit_field_slice::{BitFieldSlice, BitFieldSliceCore, BitFieldSliceMut};

use super::{EdgeParams, EdgeRecord, EdgeStore};
use crate::bitset::BitSet;
use crate::vertex::Vertex;

/// Bits needed to represent the `count` distinct values `0..count`.
fn bits_to_represent(count: u64) -> usize {
    if count <= 1 {
        1
    } else {
        (64 - (count - 1).leading_zeros()) as usize
    }
}

pub struct BitpackEdges {
    dest: BitFieldVec<usize>,
    len: BitFieldVec<usize>,
    mark: BitSet,
    len_sentinel: usize,
}

impl BitpackEdges {
    fn rebuild(&self, new_len: u64) -> (BitFieldVec<usize>, BitFieldVec<usize>) {
        let dest_bits = self.dest.bit_width();
        let len_bits = self.len.bit_width();
        let mut dest = BitFieldVec::new(dest_bits, new_len as usize);
        let mut len = BitFieldVec::new(len_bits, new_len as usize);
        for i in 0..new_len as usize {
            dest.set(i, self.dest.get(i));
            len.set(i, self.len.get(i));
        }
        (dest, len)
    }
}

impl EdgeStore for BitpackEdges {
    const REPR_TAG: u8 = 3;

    fn new(total_slots: u64, params: EdgeParams) -> Self {
        let dest_bits = bits_to_represent(params.num_vertices.max(1));
        // Reserve one extra code point (max_len + 2 distinct values) for
        // the reduced sentinel, the way the "short" encoding reserves
        // 0xFF out of its 8 bits.
        let len_bits = bits_to_represent(params.max_len as u64 + 2);
        let len_sentinel = (1usize << len_bits) - 1;
        let mut len = BitFieldVec::new(len_bits, total_slots as usize);
        // Slots start out reduced (see `ShortEdges::new` for why).
        for i in 0..total_slots as usize {
            len.set(i, len_sentinel);
        }
        BitpackEdges {
            dest: BitFieldVec::new(dest_bits, total_slots as usize),
            len,
            mark: BitSet::new(total_slots),
            len_sentinel,
        }
    }

    fn len(&self) -> u64 {
        self.dest.len() as u64
    }

    fn get(&self, slot: u64) -> EdgeRecord {
        let slot = slot as usize;
        let raw_len = self.len.get(slot);
        EdgeRecord {
            dest: self.dest.get(slot) as Vertex,
            len: if raw_len == self.len_sentinel { 0 } else { raw_len as u32 },
            reduced: raw_len == self.len_sentinel,
            mark: self.mark.get(slot as u64),
        }
    }

    fn set(&mut self, slot: u64, record: EdgeRecord) {
        let code = if record.reduced {
            self.len_sentinel
        } else {
            assert!(
                (record.len as usize) < self.len_sentinel,
                "overhang length {} exceeds this bitpack graph's maximum",
                record.len
            );
            record.len as usize
        };
        self.dest.set(slot as usize, record.dest as usize);
        self.len.set(slot as usize, code);
        self.mark.set(slot, record.mark);
    }

    fn truncate(&mut self, new_len: u64) {
        let (dest, len) = self.rebuild(new_len);
        self.dest = dest;
        self.len = len;
        let mut shrunk = BitSet::new(new_len);
        for i in 0..new_len {
            shrunk.set(i, self.mark.get(i));
        }
        self.mark = shrunk;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edge::conformance;

    #[test]
    fn get_set_round_trip() {
        conformance::get_set_round_trip::<BitpackEdges>();
    }

    #[test]
    fn truncate_keeps_prefix() {
        conformance::truncate_keeps_prefix::<BitpackEdges>();
    }

    #[test]
    fn packs_tightly_for_small_graphs() {
        let mut edges = BitpackEdges::new(2, EdgeParams { num_vertices: 6, max_len: 10 });
        edges.init(0, 5, 7);
        edges.reduce(1);
        assert_eq!(edges.dest(0), 5);
        assert_eq!(edges.edge_len(0), 7);
        assert!(edges.is_reduced(1));
        assert!(!edges.is_reduced(0));
    }
}
