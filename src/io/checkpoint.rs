//! Binary checkpoint of a graph's vertex and edge arrays (§4.5): "write
//! the vertex array then the edge array verbatim; load is symmetric."
//! The header carries [`EdgeStore::REPR_TAG`] so a reload only succeeds
//! against a build using the same edge encoding, the way [`BitSet::parse`]
//! and [`read_spm_list`](crate::spm::read_spm_list) validate their own
//! word-size bytes before trusting the payload.

use std::io::{Read, Write};

use crate::builder::{BuildState, Graph};
use crate::edge::{EdgeParams, EdgeRecord, EdgeStore};
use crate::error::{Result, StrgraphError};
use crate::vertex::VertexStore;

const MAGIC: u8 = 0xC0;

fn read_u64(path: &str, input: &mut impl Read) -> Result<u64> {
    let mut buf = [0u8; 8];
    input
        .read_exact(&mut buf)
        .map_err(|_| StrgraphError::format(path, "truncated checkpoint"))?;
    Ok(u64::from_le_bytes(buf))
}

fn read_u32(path: &str, input: &mut impl Read) -> Result<u32> {
    let mut buf = [0u8; 4];
    input
        .read_exact(&mut buf)
        .map_err(|_| StrgraphError::format(path, "truncated checkpoint"))?;
    Ok(u32::from_le_bytes(buf))
}

/// Writes `graph` to `out` in this crate's binary checkpoint format.
pub fn write_checkpoint<E: EdgeStore>(graph: &Graph<E>, mut out: impl Write) -> Result<()> {
    out.write_all(&[MAGIC, E::REPR_TAG])?;
    out.write_all(&graph.num_reads().to_le_bytes())?;
    out.write_all(&graph.min_match_len().to_le_bytes())?;

    let vertices = graph.vertices();
    let num_vertices = vertices.num_vertices() as u64;
    out.write_all(&num_vertices.to_le_bytes())?;
    for v in 0..=num_vertices {
        out.write_all(&vertices.offset(v).to_le_bytes())?;
    }
    for v in 0..num_vertices {
        out.write_all(&vertices.outdeg(v).to_le_bytes())?;
    }

    let edges = graph.edges();
    let total_slots = edges.len();
    let mut max_len = 0u32;
    for slot in 0..total_slots {
        let rec = edges.get(slot);
        max_len = max_len.max(rec.len);
        out.write_all(&rec.dest.to_le_bytes())?;
        out.write_all(&rec.len.to_le_bytes())?;
        let flags = (rec.reduced as u8) | ((rec.mark as u8) << 1);
        out.write_all(&[flags])?;
    }
    log::info!("checkpoint: wrote {num_vertices} vertices, {total_slots} edge slots (tag {})", E::REPR_TAG);
    let _ = max_len; // recomputed from params.max_len on load instead of trusted from the payload
    Ok(())
}

/// Reads a graph back from `path`/`input`, reconstructing it directly into
/// [`BuildState::LoadedFromFile`] — the one state this builder's own
/// counting/allocation/insertion protocol never produces (§4.2).
pub fn read_checkpoint<E: EdgeStore>(path: &str, mut input: impl Read) -> Result<Graph<E>> {
    let mut header = [0u8; 2];
    input
        .read_exact(&mut header)
        .map_err(|_| StrgraphError::format(path, "truncated checkpoint header"))?;
    if header[0] != MAGIC {
        return Err(StrgraphError::format(
            path,
            format!("not a checkpoint file (expected magic byte 0x{MAGIC:02x}, found 0x{:02x})", header[0]),
        ));
    }
    if header[1] != E::REPR_TAG {
        return Err(StrgraphError::format(
            path,
            format!(
                "checkpoint was written with edge representation tag {}, this build uses tag {}",
                header[1],
                E::REPR_TAG
            ),
        ));
    }

    let num_reads = read_u64(path, &mut input)?;
    let min_match_len = read_u64(path, &mut input)?;
    let num_vertices = read_u64(path, &mut input)?;
    if num_vertices != num_reads * 2 {
        return Err(StrgraphError::format(
            path,
            format!("vertex count {num_vertices} does not match 2 * num_reads ({})", num_reads * 2),
        ));
    }

    let mut offsets = Vec::with_capacity(num_vertices as usize + 1);
    for _ in 0..=num_vertices {
        offsets.push(read_u64(path, &mut input)?);
    }
    let mut vertices = VertexStore::from_counts(&vec![0u64; num_vertices as usize]);
    vertices.set_offsets(&offsets);
    for v in 0..num_vertices {
        let outdeg = read_u32(path, &mut input)?;
        vertices.set_outdeg(v, outdeg);
    }

    let total_slots = offsets[num_vertices as usize];
    let mut max_len = 0u32;
    let mut records = Vec::with_capacity(total_slots as usize);
    for _ in 0..total_slots {
        let dest = read_u64(path, &mut input)?;
        let len = read_u32(path, &mut input)?;
        let mut flag_byte = [0u8; 1];
        input
            .read_exact(&mut flag_byte)
            .map_err(|_| StrgraphError::format(path, "truncated edge record"))?;
        let reduced = flag_byte[0] & 1 != 0;
        let mark = flag_byte[0] & 2 != 0;
        max_len = max_len.max(len);
        records.push(EdgeRecord { dest, len, reduced, mark });
    }

    let mut edges = E::new(total_slots, EdgeParams { num_vertices, max_len });
    for (slot, rec) in records.into_iter().enumerate() {
        edges.set(slot as u64, rec);
    }

    log::info!("checkpoint: loaded {num_vertices} vertices, {total_slots} edge slots from {path}");
    Ok(Graph {
        vertices,
        edges,
        num_reads,
        min_match_len,
        state: BuildState::LoadedFromFile,
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

    fn built_graph() -> Graph<BitfieldEdges> {
        let reads = vec!["A".repeat(20), "C".repeat(20), "G".repeat(20)];
        let oracle = VecReadOracle::new(reads);
        let source = LengthSource::Oracle(&oracle);
        let config = BuildConfig::default();
        let spm = SpmRecord { suffix_read: 0, prefix_read: 1, length: 12, suffix_forward: true, prefix_forward: true };

        let mut builder = GraphBuilder::new(3).unwrap();
        builder.count_spm(&spm, &config);
        let mut graph: Graph<BitfieldEdges> = builder.allocate(&source);
        graph.insert_spm(&spm, &source, &config).unwrap();
        graph.finish_insertion().unwrap();
        sort_edges_by_length(&mut graph).unwrap();
        graph
    }

    #[test]
    fn round_trips_a_built_graph() {
        let graph = built_graph();
        let mut buf = Vec::new();
        write_checkpoint(&graph, &mut buf).unwrap();

        let loaded: Graph<BitfieldEdges> = read_checkpoint("mem", &buf[..]).unwrap();
        assert_eq!(loaded.num_reads(), graph.num_reads());
        assert_eq!(loaded.min_match_len(), graph.min_match_len());
        assert_eq!(loaded.state(), BuildState::LoadedFromFile);
        assert_eq!(loaded.edges().len(), graph.edges().len());
        for v in 0..graph.num_vertices() {
            assert_eq!(loaded.vertices().offset(v), graph.vertices().offset(v));
            assert_eq!(loaded.vertices().outdeg(v), graph.vertices().outdeg(v));
        }
        for slot in 0..graph.edges().len() {
            assert_eq!(loaded.edges().get(slot), graph.edges().get(slot));
        }
    }

    #[test]
    fn rejects_mismatched_representation_tag() {
        let graph = built_graph();
        let mut buf = Vec::new();
        write_checkpoint(&graph, &mut buf).unwrap();
        buf[1] = 99;
        let err = read_checkpoint::<BitfieldEdges>("mem", &buf[..]).unwrap_err();
        assert!(matches!(err, StrgraphError::Format { .. }));
    }

    #[test]
    fn rejects_bad_magic() {
        let buf = [0u8; 16];
        let err = read_checkpoint::<BitfieldEdges>("mem", &buf[..]).unwrap_err();
        assert!(matches!(err, StrgraphError::Format { .. }));
    }
}
