#![no_main]

use deprank_core::{DependencyGraph, MissingNodes};
use libfuzzer_sys::fuzz_target;

// Arbitrary JSON dependency lists, built leniently and ranked twice.
fuzz_target!(|data: &[u8]| {
    let Ok(entries) = serde_json::from_slice::<Vec<(String, Vec<String>)>>(data) else {
        return;
    };
    let Ok(graph) = DependencyGraph::from_adjacency_with(entries, MissingNodes::Append) else {
        return;
    };

    let first = graph.rank();
    let second = graph.rank();
    assert_eq!(first.entries(), second.entries());
    assert_eq!(first.cycles(), second.cycles());
});
