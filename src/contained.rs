//! The contained-read set (§4.1): one bit per read, set iff that read is
//! a substring (possibly reverse-complemented) of another and must
//! therefore be excluded from the graph. Backed by [`BitSet`]; this
//! module only adds the domain-specific names the builder calls.

use std::io::{Read, Write};

use crate::bitset::BitSet;
use crate::error::Result;

#[derive(Debug, Clone, Default)]
pub struct ContainedReads(BitSet);

impl ContainedReads {
    pub fn new(num_reads: u64) -> Self {
        ContainedReads(BitSet::new(num_reads))
    }

    pub fn num_reads(&self) -> u64 {
        self.0.len()
    }

    #[inline]
    pub fn is_contained(&self, read: u64) -> bool {
        self.0.get(read)
    }

    #[inline]
    pub fn mark_contained(&mut self, read: u64) {
        self.0.set(read, true);
    }

    /// Number of reads marked contained.
    pub fn count(&self) -> u64 {
        self.0.count()
    }

    pub fn write(&self, out: impl Write, binary: bool) -> Result<()> {
        self.0.write(out, binary)
    }

    pub fn write_indexed_header(num_reads: u64, out: impl Write) -> Result<()> {
        BitSet::write_indexed_header(num_reads, out)
    }

    pub fn write_indexed_entry(read: u64, out: impl Write) -> Result<()> {
        BitSet::write_indexed_entry(read, out)
    }

    /// Parses a contained-read file. `alloc = true` allocates a fresh set
    /// sized from the file; `alloc = false` OR-merges into `self`.
    pub fn parse(path: &str, input: impl Read, alloc: bool, into: &mut Option<ContainedReads>) -> Result<()> {
        let mut bits = into.take().map(|c| c.0);
        BitSet::parse(path, input, alloc, &mut bits)?;
        *into = bits.map(ContainedReads);
        Ok(())
    }
}
