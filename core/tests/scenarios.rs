use waypoint_core::prelude::*;

fn labelled(codec: &LabelCodec, n: usize, class: EdgeClass, edges: &[(&str, &str, Weight)]) -> Graph {
    let mut graph = Graph::new(n);
    for &(u, v, w) in edges {
        let from = codec.decode(u).unwrap();
        let to = codec.decode(v).unwrap();
        graph.add_edge(from, to, w, class).unwrap();
    }
    graph
}

#[test]
fn test_undirected_scenario_distances_and_mst() {
    let codec = LabelCodec::default();
    let graph = labelled(
        &codec,
        4,
        EdgeClass::Undirected,
        &[("A", "B", 1), ("B", "C", 2), ("A", "C", 4), ("C", "D", 1)],
    );
    let source = codec.decode("A").unwrap();

    let tree = Dijkstra::undirected().execute(&graph, source).unwrap();
    let distances: Vec<_> = tree.distances().iter().map(|d| d.value().unwrap()).collect();
    assert_eq!(distances, vec![0, 1, 3, 4]);

    let mst = Prim.execute(&graph, source).unwrap();
    assert_eq!(mst.total_weight(), 4);
    assert_eq!(mst.total_weight(), kruskal(&graph).total_weight);
}

#[test]
fn test_directed_scenario_relaxes_through_b() {
    let codec = LabelCodec::default();
    let graph = labelled(
        &codec,
        3,
        EdgeClass::Directed,
        &[("A", "B", 5), ("B", "C", 3), ("A", "C", 10)],
    );
    let tree = Dijkstra::directed().execute(&graph, NodeId(0)).unwrap();

    let c = codec.decode("C").unwrap();
    assert_eq!(tree.distance(c).value(), Some(8));
    let labels: Vec<_> = tree.path_to(c).unwrap().into_iter().map(|n| codec.encode(n)).collect();
    assert_eq!(labels, vec!["A", "B", "C"]);
}

#[test]
fn test_disconnected_scenario() {
    let codec = LabelCodec::default();
    let graph = labelled(&codec, 3, EdgeClass::Undirected, &[("A", "B", 2)]);
    let tree = Dijkstra::undirected().execute(&graph, NodeId(0)).unwrap();

    let c = codec.decode("C").unwrap();
    assert_eq!(tree.distance(c), Distance::INFINITY);
    assert_eq!(tree.path_to(c), None);
    assert_eq!(reconstruct_path(tree.parents(), tree.source(), c), None);
}

#[test]
fn test_self_path() {
    let codec = LabelCodec::default();
    let graph = labelled(&codec, 2, EdgeClass::Undirected, &[("A", "B", 2)]);
    let tree = Dijkstra::undirected().execute(&graph, NodeId(1)).unwrap();
    assert_eq!(tree.path_to(NodeId(1)), Some(vec![NodeId(1)]));
}

#[test]
fn test_graph_larger_than_alphabet() {
    let codec = LabelCodec::default();
    let n = 40;
    let mut graph = Graph::new(n);
    for i in 0..n - 1 {
        graph.add_edge(NodeId(i), NodeId(i + 1), 1, EdgeClass::Undirected).unwrap();
    }
    let last = codec.decode("AN").unwrap();
    assert_eq!(last, NodeId(39));

    let tree = Dijkstra::undirected().execute(&graph, NodeId(0)).unwrap();
    assert_eq!(tree.distance(last).value(), Some(39));
    assert_eq!(Prim.execute(&graph, last).unwrap().total_weight(), 39);
}

#[test]
fn test_traced_prim_replays_finalization() {
    let graph = labelled(
        &LabelCodec::default(),
        4,
        EdgeClass::Undirected,
        &[("A", "B", 1), ("B", "C", 2), ("A", "C", 4), ("C", "D", 1)],
    );
    let mut tracer = ExecutionTracer::new();
    let tree = Prim.execute_with_tracing(&graph, NodeId(0), Some(&mut tracer)).unwrap();

    assert_eq!(
        tracer.finalization_order(),
        vec![NodeId(0), NodeId(1), NodeId(2), NodeId(3)]
    );
    assert_eq!(tracer.stale_skips(), tree.metrics().stale_entries_skipped);
    assert!(tracer.to_json().unwrap().contains("\"algorithm_name\": \"Prim\""));
}

#[test]
fn test_large_weights_stay_finite() {
    let big = 4_000_000_000_000_000_000;
    let codec = LabelCodec::default();

    let directed = labelled(&codec, 3, EdgeClass::Directed, &[("A", "B", big), ("B", "C", big)]);
    let tree = Dijkstra::directed().execute(&directed, NodeId(0)).unwrap();
    assert_eq!(tree.distance(NodeId(2)).value(), Some(2 * big));
    assert_eq!(tree.path_to(NodeId(2)), Some(vec![NodeId(0), NodeId(1), NodeId(2)]));

    let undirected = labelled(&codec, 3, EdgeClass::Undirected, &[("A", "B", big), ("B", "C", big)]);
    let mst = Prim.execute(&undirected, NodeId(0)).unwrap();
    assert_eq!(mst.total_weight(), 2 * big);
    assert_eq!(kruskal(&undirected).total_weight, 2 * big);
}

#[test]
fn test_weights_past_the_sentinel_are_rejected() {
    let big = 5_000_000_000_000_000_000;
    let mut graph = Graph::new(3);
    graph.add_edge(NodeId(0), NodeId(1), big, EdgeClass::Directed).unwrap();
    assert!(matches!(
        graph.add_edge(NodeId(1), NodeId(2), big, EdgeClass::Directed),
        Err(AlgorithmError::InvalidGraph(_))
    ));
}
