//! End-to-end: build, sort, reduce, compact, traverse, spell — the full
//! dependency order §2 lays out, run back to back on one small instance.

use strandgraph::prelude::*;

fn fwd_fwd(suf: u64, pre: u64, len: u64) -> SpmRecord {
    SpmRecord { suffix_read: suf, prefix_read: pre, length: len, suffix_forward: true, prefix_forward: true }
}

#[test]
fn builds_sorts_reduces_and_spells_a_three_read_chain() {
    // Reads 0 -> 1 -> 2, each overlap exact so the direct 0->2 edge (if any)
    // would be transitive; here there is none, so this is just a simple path.
    let reads: Vec<String> = vec!["A".repeat(30), "C".repeat(30), "G".repeat(30)];
    let oracle = VecReadOracle::new(reads);
    let source = LengthSource::Oracle(&oracle);
    let config = BuildConfig::default();
    let spms = [fwd_fwd(0, 1, 20), fwd_fwd(1, 2, 15)];

    let mut builder = GraphBuilder::new(3).unwrap();
    for spm in &spms {
        builder.count_spm(spm, &config);
    }
    let mut graph: Graph<BitfieldEdges> = builder.allocate(&source);
    for spm in &spms {
        graph.insert_spm(spm, &source, &config).unwrap();
    }
    graph.finish_insertion().unwrap();
    sort_edges_by_length(&mut graph).unwrap();

    reduce_transitive(&mut graph).unwrap();
    reduce_submaximal(&mut graph).unwrap();
    reduce_self(&mut graph).unwrap();
    reduce_with_rc(&mut graph).unwrap();
    reduce_dead_ends(&mut graph, &DeadEndConfig::default()).unwrap();
    compact(&mut graph).unwrap();

    let mut writer = strandgraph::spell::StringContigsWriter::new(&oracle);
    spell_contigs(&mut graph, &oracle, &SpellConfig::default(), &mut writer).unwrap();

    assert_eq!(writer.contigs.len(), 1);
    // 30 (read 0) + (30-20) + (30-15) = 30 + 10 + 15 = 55
    assert_eq!(writer.contigs[0].len(), 55);
    assert!(writer.contigs[0].starts_with(&"A".repeat(30)));
    assert!(writer.contigs[0].ends_with(&"G".repeat(15)));
}

#[test]
fn checkpoint_round_trips_a_reduced_graph() {
    let reads: Vec<String> = vec!["A".repeat(30), "C".repeat(30), "G".repeat(30)];
    let oracle = VecReadOracle::new(reads);
    let source = LengthSource::Oracle(&oracle);
    let config = BuildConfig::default();
    let spms = [fwd_fwd(0, 1, 20), fwd_fwd(1, 2, 15)];

    let mut builder = GraphBuilder::new(3).unwrap();
    for spm in &spms {
        builder.count_spm(spm, &config);
    }
    let mut graph: Graph<BitfieldEdges> = builder.allocate(&source);
    for spm in &spms {
        graph.insert_spm(spm, &source, &config).unwrap();
    }
    graph.finish_insertion().unwrap();
    sort_edges_by_length(&mut graph).unwrap();
    reduce_transitive(&mut graph).unwrap();
    compact(&mut graph).unwrap();

    let mut buf = Vec::new();
    strandgraph::io::write_checkpoint(&graph, &mut buf).unwrap();
    let loaded: Graph<BitfieldEdges> = strandgraph::io::read_checkpoint("mem", &buf[..]).unwrap();

    assert_eq!(loaded.num_reads(), graph.num_reads());
    assert_eq!(loaded.edges().len(), graph.edges().len());
    assert_eq!(loaded.state(), BuildState::LoadedFromFile);
    for v in 0..graph.num_vertices() {
        assert_eq!(loaded.vertices().outdeg(v), graph.vertices().outdeg(v));
    }
    for slot in 0..graph.edges().len() {
        assert_eq!(loaded.edges().get(slot), graph.edges().get(slot));
    }
}
