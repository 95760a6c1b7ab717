#![no_main]

use deprank_core::{DependencyGraph, NodeId, rank};
use libfuzzer_sys::fuzz_target;

// First byte: node count. Remaining byte pairs: edges, taken modulo the count.
fuzz_target!(|data: &[u8]| {
    let Some((&count, edges)) = data.split_first() else {
        return;
    };
    let n = usize::from(count);
    let mut graph = DependencyGraph::with_capacity(n);
    for i in 0..n {
        graph.add_node(i);
    }
    if n > 0 {
        for pair in edges.chunks_exact(2) {
            let from = NodeId::from_index(usize::from(pair[0]) % n);
            let to = NodeId::from_index(usize::from(pair[1]) % n);
            graph.add_edge(from, to).expect("edge in range");
        }
    }

    let ranking = rank(&graph);
    assert_eq!(ranking.len(), n);

    // Every node appears exactly once.
    let mut seen = vec![false; n];
    for node in ranking.order() {
        assert!(!seen[node.index()], "node {node} emitted twice");
        seen[node.index()] = true;
    }

    // Edges never point backwards across components.
    for (id, _) in graph.iter() {
        let node = graph.node(id).expect("node exists");
        let from = ranking.position_of(id).expect("ranked");
        for &dep in node.edges() {
            let to = ranking.position_of(dep).expect("ranked");
            let same_component = ranking.entries()[from].rank == ranking.entries()[to].rank;
            assert!(same_component || from < to, "{id} -> {dep} goes backwards");
        }
    }

    let layered: usize = ranking.layers().iter().map(|layer| layer.nodes.len()).sum();
    assert_eq!(layered, n);
});
