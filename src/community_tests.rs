#[cfg(test)]
#[allow(clippy::unwrap_used, unused_results)]
mod tests {
    use crate::community::modularity::AggregateTable;
    use crate::community::{
        aggregate, delta_modularity, local_moving, modularity, refine, run_leiden, run_louvain,
        CommunityDetection, Detection, Leiden, Louvain,
    };
    use crate::{Graph, Partition, Result};
    use petgraph::unionfind::UnionFind;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::BTreeMap;

    const TOL: f64 = 1e-9;

    fn init_logging() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    /// Graph on nodes `0..n` with integer weights, so every aggregate is
    /// exact. Repeated pairs keep their first weight; self-loops allowed.
    fn build_graph(n: usize, edges: &[(usize, usize, u8)]) -> Graph {
        let mut unique: BTreeMap<(usize, usize), f64> = BTreeMap::new();
        for &(u, v, w) in edges {
            let (u, v) = (u % n, v % n);
            let key = if u <= v { (u, v) } else { (v, u) };
            unique.entry(key).or_insert(w as f64);
        }
        let mut graph = Graph::with_nodes(0..n);
        for ((u, v), w) in unique {
            graph.add_edge(u, v, w).unwrap();
        }
        graph
    }

    fn build_partition(labels: &[usize]) -> Partition {
        labels.iter().copied().enumerate().collect()
    }

    fn moved(partition: &Partition, node: usize, target: usize) -> Partition {
        partition
            .iter()
            .map(|(n, c)| if n == node { (n, target) } else { (n, c) })
            .collect()
    }

    fn graph_strategy() -> impl Strategy<Value = Graph> {
        (1usize..12)
            .prop_flat_map(|n| {
                (
                    Just(n),
                    proptest::collection::vec((0..n, 0..n, 1u8..5), 0..30),
                )
            })
            .prop_map(|(n, edges)| build_graph(n, &edges))
    }

    fn graph_and_labels() -> impl Strategy<Value = (Graph, Vec<usize>)> {
        graph_strategy().prop_flat_map(|g| {
            let n = g.node_count();
            (Just(g), proptest::collection::vec(0usize..5, n))
        })
    }

    fn components(graph: &Graph) -> UnionFind<usize> {
        let mut uf = UnionFind::new(graph.node_count());
        for (u, v, _) in graph.edges() {
            uf.union(u, v);
        }
        uf
    }

    fn check_detection(graph: &Graph, detection: &Detection) -> Result<()> {
        let partition = detection.partition();
        assert_eq!(partition.len(), graph.node_count());
        assert!(graph.nodes().all(|n| partition.get(n).is_some()));

        let history = detection.modularity_history();
        assert!(!history.is_empty());
        for pair in history.windows(2) {
            assert!(pair[1] > pair[0]);
        }
        let q = modularity(graph, partition)?;
        assert!((q - detection.final_modularity().unwrap_or(f64::NAN)).abs() < TOL);

        // Communities never span connected components.
        let uf = components(graph);
        for (_, members) in partition.groups() {
            for pair in members.windows(2) {
                assert!(uf.equiv(pair[0], pair[1]));
            }
        }
        Ok(())
    }

    #[test]
    fn test_two_disjoint_edges_both_algorithms() -> Result<()> {
        init_logging();
        let graph = Graph::from_edges([(0, 1, 1.0), (2, 3, 1.0)])?;
        for detection in [run_louvain(&graph)?, run_leiden(&graph)?] {
            let p = detection.partition();
            assert_eq!(p.get(0), p.get(1));
            assert_eq!(p.get(2), p.get(3));
            assert_ne!(p.get(0), p.get(2));
            assert_eq!(detection.final_modularity(), Some(0.5));
        }
        Ok(())
    }

    #[test]
    fn test_two_disjoint_triangles_both_algorithms() -> Result<()> {
        init_logging();
        let graph = Graph::from_edges([
            (0, 1, 1.0),
            (1, 2, 1.0),
            (0, 2, 1.0),
            (3, 4, 1.0),
            (4, 5, 1.0),
            (3, 5, 1.0),
        ])?;
        for detection in [run_louvain(&graph)?, run_leiden(&graph)?] {
            assert_eq!(detection.community_count(), 2);
            let groups: Vec<Vec<usize>> = detection.communities().into_values().collect();
            assert!(groups.contains(&vec![0, 1, 2]));
            assert!(groups.contains(&vec![3, 4, 5]));
            assert_eq!(detection.final_modularity(), Some(0.5));
        }
        Ok(())
    }

    #[test]
    fn test_single_isolated_node_both_algorithms() -> Result<()> {
        init_logging();
        let graph = Graph::with_nodes([12]);
        for detection in [run_louvain(&graph)?, run_leiden(&graph)?] {
            assert_eq!(detection.partition().get(12), Some(12));
            assert!(detection.modularity_history().len() <= 1);
            assert_eq!(detection.final_modularity().unwrap_or(0.0), 0.0);
        }
        Ok(())
    }

    #[test]
    fn test_non_contiguous_node_ids() -> Result<()> {
        init_logging();
        let graph = Graph::from_edges([
            (100, 205, 1.0),
            (205, 7, 1.0),
            (7, 100, 1.0),
            (9000, 31, 2.0),
        ])?;
        for detection in [run_louvain(&graph)?, run_leiden(&graph)?] {
            let p = detection.partition();
            assert_eq!(p.len(), 5);
            assert_eq!(p.get(100), p.get(205));
            assert_eq!(p.get(205), p.get(7));
            assert_eq!(p.get(9000), p.get(31));
            assert_ne!(p.get(7), p.get(31));
        }
        Ok(())
    }

    #[test]
    fn test_rings_of_cliques_multilevel() -> Result<()> {
        init_logging();
        // Eight 4-cliques in a ring, one light edge between neighbors.
        let mut edges = Vec::new();
        for c in 0..8 {
            let base = 4 * c;
            for i in 0..4 {
                for j in (i + 1)..4 {
                    edges.push((base + i, base + j, 1.0));
                }
            }
            edges.push((base + 3, (base + 4) % 32, 1.0));
        }
        let graph = Graph::from_edges(edges)?;

        for seed in [1, 2, 3] {
            let louvain = Louvain::new().with_seed(seed).detect(&graph)?;
            let leiden = Leiden::new().with_seed(seed).detect(&graph)?;
            check_detection(&graph, &louvain)?;
            check_detection(&graph, &leiden)?;

            // No clique is ever cut.
            for detection in [&louvain, &leiden] {
                let p = detection.partition();
                for c in 0..8 {
                    let base = 4 * c;
                    assert!((1..4).all(|i| p.get(base + i) == p.get(base)));
                }
            }
        }
        Ok(())
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_detection_serde_round_trip() -> Result<()> {
        let graph = Graph::from_edges([(0, 1, 1.0), (2, 3, 1.0)])?;
        let detection = run_leiden(&graph)?;
        let json = serde_json::to_string(&detection).unwrap();
        let back: Detection = serde_json::from_str(&json).unwrap();
        assert_eq!(back, detection);
        Ok(())
    }

    proptest! {
        #[test]
        fn modularity_zero_without_edges(
            n in 1usize..10,
            labels in proptest::collection::vec(0usize..4, 10),
        ) {
            let graph = Graph::with_nodes(0..n);
            let partition = build_partition(&labels[..n]);
            prop_assert_eq!(modularity(&graph, &partition).unwrap(), 0.0);
        }

        #[test]
        fn delta_zero_for_current_community((graph, labels) in graph_and_labels(), node in 0usize..12) {
            let node = node % graph.node_count();
            let partition = build_partition(&labels);
            let current = partition.community_of(node).unwrap();
            prop_assert_eq!(delta_modularity(&graph, &partition, node, current).unwrap(), 0.0);
        }

        #[test]
        fn delta_matches_global_difference(
            (graph, labels) in graph_and_labels(),
            node in 0usize..12,
            target in 0usize..7,
        ) {
            let node = node % graph.node_count();
            let before = build_partition(&labels);
            let after = moved(&before, node, target);

            let delta = delta_modularity(&graph, &before, node, target).unwrap();
            let diff = modularity(&graph, &after).unwrap() - modularity(&graph, &before).unwrap();
            prop_assert!((delta - diff).abs() < TOL, "delta {} vs diff {}", delta, diff);
        }

        #[test]
        fn aggregate_table_agrees_with_rescan(
            (graph, labels) in graph_and_labels(),
            moves in proptest::collection::vec((0usize..12, 0usize..7), 1..20),
        ) {
            let mut partition = build_partition(&labels);
            let mut table = AggregateTable::build(&graph, &partition).unwrap();
            for (node, target) in moves {
                let node = node % graph.node_count();
                let tracked = table.gain(&graph, &partition, node, target).unwrap();
                let fresh = delta_modularity(&graph, &partition, node, target).unwrap();
                prop_assert!((tracked - fresh).abs() < TOL);

                table.move_node(&graph, &partition, node, target).unwrap();
                partition = moved(&partition, node, target);
            }
        }

        #[test]
        fn aggregation_conserves_weight_and_counts((graph, labels) in graph_and_labels()) {
            let partition = build_partition(&labels);
            let coarse = aggregate(&graph, &partition).unwrap();
            prop_assert_eq!(coarse.total_weight(), graph.total_weight());
            prop_assert_eq!(coarse.node_count(), partition.community_count());
        }

        #[test]
        fn aggregation_preserves_modularity(
            (graph, labels) in graph_and_labels(),
            coarse_labels in proptest::collection::vec(0usize..3, 5),
        ) {
            let fine = build_partition(&labels);
            let coarse = aggregate(&graph, &fine).unwrap();
            let coarse_partition: Partition = coarse
                .nodes()
                .map(|super_node| (super_node, coarse_labels[super_node % coarse_labels.len()]))
                .collect();
            let composed = fine.compose(&coarse_partition).unwrap();

            let q_coarse = modularity(&coarse, &coarse_partition).unwrap();
            let q_fine = modularity(&graph, &composed).unwrap();
            prop_assert!((q_coarse - q_fine).abs() < TOL);
        }

        #[test]
        fn local_moving_is_idempotent(graph in graph_strategy(), seed in 0u64..1000) {
            let mut rng = StdRng::seed_from_u64(seed);
            let start = Partition::singletons(graph.nodes());
            let settled = local_moving(&graph, &graph, &start, &mut rng).unwrap();
            let again = local_moving(&graph, &graph, &settled, &mut rng).unwrap();
            prop_assert_eq!(settled, again);
        }

        #[test]
        fn local_moving_never_lowers_modularity(graph in graph_strategy(), seed in 0u64..1000) {
            let start = Partition::singletons(graph.nodes());
            let settled = local_moving(&graph, &graph, &start, &mut StdRng::seed_from_u64(seed)).unwrap();
            prop_assert!(
                modularity(&graph, &settled).unwrap() >= modularity(&graph, &start).unwrap() - TOL
            );
        }

        #[test]
        fn refinement_never_merges((graph, labels) in graph_and_labels(), seed in 0u64..1000) {
            let partition = build_partition(&labels);
            let refined = refine(&graph, &partition, &mut StdRng::seed_from_u64(seed)).unwrap();
            prop_assert_eq!(refined.len(), partition.len());
            for (a, ca) in partition.iter() {
                for (b, cb) in partition.iter() {
                    if ca != cb {
                        prop_assert_ne!(refined.get(a), refined.get(b));
                    }
                }
            }
        }

        #[test]
        fn detectors_satisfy_contract(graph in graph_strategy(), seed in 0u64..1000) {
            let louvain = Louvain::new().with_seed(seed).detect(&graph).unwrap();
            let leiden = Leiden::new().with_seed(seed).detect(&graph).unwrap();
            prop_assert!(check_detection(&graph, &louvain).is_ok());
            prop_assert!(check_detection(&graph, &leiden).is_ok());
        }
    }
}
