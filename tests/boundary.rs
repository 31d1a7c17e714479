//! Boundary behaviors (§8): a single read with no SPMs, and a graph where
//! every read is filtered out as contained.

use strandgraph::prelude::*;

#[test]
fn single_read_with_no_spms_has_two_vertices_and_no_contig() {
    let reads = vec!["A".repeat(15)];
    let oracle = VecReadOracle::new(reads);
    let source = LengthSource::Oracle(&oracle);

    let builder = GraphBuilder::new(1).unwrap();
    let graph: Graph<BitfieldEdges> = builder.allocate(&source);

    assert_eq!(graph.num_vertices(), 2);
    assert_eq!(graph.edges().len(), 0);

    let mut graph = graph;
    let mut writer = strandgraph::spell::StringContigsWriter::new(&oracle);
    spell_contigs(&mut graph, &oracle, &SpellConfig::default(), &mut writer).unwrap();
    assert!(writer.contigs.is_empty());
}

#[test]
fn n_zero_is_disallowed() {
    assert!(GraphBuilder::new(0).is_err());
}

#[test]
fn all_reads_contained_leaves_zero_edges_but_keeps_all_vertices() {
    let mut contained = ContainedReads::new(3);
    contained.mark_contained(0);
    contained.mark_contained(1);
    contained.mark_contained(2);

    let reads: Vec<String> = (0..3).map(|_| "A".repeat(15)).collect();
    let oracle = VecReadOracle::new(reads);
    let source = LengthSource::Oracle(&oracle);
    let config = BuildConfig::default();

    let spms = [SpmRecord { suffix_read: 0, prefix_read: 1, length: 10, suffix_forward: true, prefix_forward: true }];

    let mut builder = GraphBuilder::new(3).unwrap();
    for spm in &spms {
        if !contained.is_contained(spm.suffix_read) && !contained.is_contained(spm.prefix_read) {
            builder.count_spm(spm, &config);
        }
    }
    let graph: Graph<BitfieldEdges> = builder.allocate(&source);

    assert_eq!(graph.num_vertices(), 6);
    assert_eq!(graph.edges().len(), 0);
}
