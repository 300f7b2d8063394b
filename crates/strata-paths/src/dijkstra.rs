use std::borrow::Borrow;
use std::hash::Hash;

use crate::graph::{Graph, NodeId};
use crate::pathfinder::{OpenEntry, PathNode, PathResult, Pathfinder, step_cost};
use crate::traits::NodePayload;

impl Pathfinder {
    /// Shortest path by uniform-cost search, whatever algorithm is
    /// configured.
    pub fn find_path_dijkstra<K, N, E, Q>(
        &mut self,
        graph: &Graph<K, N, E>,
        start: &Q,
        end: &Q,
    ) -> PathResult<K>
    where
        K: NodeId + Borrow<Q>,
        N: NodePayload,
        Q: Hash + Eq + ?Sized,
    {
        self.find_with(graph, start, end, crate::SearchAlgorithm::Dijkstra)
    }

    /// Compute a multi-source Dijkstra distance map.
    ///
    /// Every source starts at cost 0. Expansion stops when the cumulative
    /// cost exceeds `max_cost` (pass `f64::INFINITY` for no limit). Returns
    /// every reached node in order of increasing cost. Unknown sources are
    /// ignored; unwalkable ones are too when the config respects walkability.
    pub fn dijkstra_map<'q, K, N, E, Q, I>(
        &mut self,
        graph: &Graph<K, N, E>,
        sources: I,
        max_cost: f64,
    ) -> Vec<PathNode<K>>
    where
        K: NodeId + Borrow<Q>,
        N: NodePayload,
        Q: Hash + Eq + ?Sized + 'q,
        I: IntoIterator<Item = &'q Q>,
    {
        self.expanded = 0;
        let cur_gen = self.begin(graph);
        let mut results = Vec::new();

        // Seed sources.
        for src in sources {
            let Some(si) = graph.slot_of(src) else {
                continue;
            };
            if !self.passable(graph, si) {
                continue;
            }
            let n = &mut self.forward[si];
            n.claim(cur_gen);
            n.g = 0.0;
            n.f = 0.0;
            n.open = true;
            self.open.push(OpenEntry { idx: si, f: 0.0 });
        }

        while let Some(current) = self.open.pop() {
            let ci = current.idx;
            let cn = &self.forward[ci];
            if !cn.seen(cur_gen) || !cn.open {
                continue;
            }
            let current_g = cn.g;
            self.forward[ci].open = false;
            self.forward[ci].closed = true;
            self.expanded += 1;

            if let Some(id) = graph.id_at(ci) {
                results.push(PathNode {
                    id: id.clone(),
                    cost: current_g,
                });
            }

            for &e in graph.out_slots(ci) {
                let Some(edge) = graph.edge_at(e) else {
                    continue;
                };
                let ni = edge.to;
                if !self.passable(graph, ni) {
                    continue;
                }
                let tentative = current_g + step_cost(graph, ni, edge.weight);
                if tentative > max_cost {
                    continue;
                }

                let n = &mut self.forward[ni];
                if n.seen(cur_gen) {
                    if tentative >= n.g {
                        continue;
                    }
                } else {
                    n.claim(cur_gen);
                }

                n.g = tentative;
                n.f = tentative;
                n.open = true;
                self.open.push(OpenEntry {
                    idx: ni,
                    f: tentative,
                });
            }
        }

        log::trace!(
            "dijkstra map reached {} nodes (max cost {max_cost})",
            results.len()
        );
        results
    }
}

#[cfg(test)]
mod tests {
    use crate::graph::{Graph, NodeData};
    use crate::pathfinder::{Pathfinder, SearchAlgorithm};
    use strata_core::Vec3;

    fn chain(n: u32) -> Graph<u32> {
        let mut g = Graph::new();
        for i in 0..n {
            g.add_node(i, NodeData::at(Vec3::new(f64::from(i), 0.0, 0.0)));
        }
        for i in 1..n {
            g.add_bidirectional_edge(&(i - 1), &i, None).unwrap();
        }
        g
    }

    #[test]
    fn weighted_shortcut_is_avoided() {
        let mut g: Graph<&str> = Graph::new();
        for id in ["A", "B", "C", "D"] {
            g.add_node(id, NodeData::default());
        }
        g.add_edge(&"A", &"B", Some(1.0)).unwrap();
        g.add_edge(&"B", &"C", Some(1.0)).unwrap();
        g.add_edge(&"C", &"D", Some(1.0)).unwrap();
        g.add_edge(&"A", &"D", Some(10.0)).unwrap();

        let r = Pathfinder::default().find_path_dijkstra(&g, &"A", &"D");
        assert!(r.found);
        assert_eq!(r.path, vec!["A", "B", "C", "D"]);
        assert_eq!(r.cost, 3.0);
        assert_eq!(r.positions, vec![Vec3::ZERO; 4]);

        // The default bidirectional search takes the same route.
        let r = Pathfinder::default().find(&g, &"A", &"D");
        assert!(r.found);
        assert_eq!(r.path, vec!["A", "B", "C", "D"]);
        assert_eq!(r.cost, 3.0);
    }

    #[test]
    fn unreachable_not_found() {
        let mut g = chain(3);
        g.add_node(9, NodeData::at(Vec3::new(9.0, 0.0, 0.0)));
        let r = Pathfinder::default().find_path_dijkstra(&g, &0, &9);
        assert!(!r.found);
        assert!(r.cost.is_infinite());
    }

    #[test]
    fn map_multi_source_with_limit() {
        let g = chain(10);
        let mut pf = Pathfinder::default();
        let map = pf.dijkstra_map(&g, &[0, 9], 2.0);
        let mut reached: Vec<(u32, f64)> = map.iter().map(|n| (n.id, n.cost)).collect();
        reached.sort_by_key(|&(id, _)| id);
        assert_eq!(
            reached,
            vec![
                (0, 0.0),
                (1, 1.0),
                (2, 2.0),
                (7, 2.0),
                (8, 1.0),
                (9, 0.0)
            ]
        );
        // Settled in non-decreasing cost order.
        assert!(map.windows(2).all(|w| w[0].cost <= w[1].cost));
    }

    #[test]
    fn map_skips_unknown_and_unwalkable() {
        let mut g = chain(4);
        g.get_node_mut(&2).unwrap().walkable = false;
        let mut pf = Pathfinder::default();
        let map = pf.dijkstra_map(&g, &[0, 42], f64::INFINITY);
        let ids: Vec<u32> = map.iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![0, 1]);
    }

    #[test]
    fn map_does_not_leak_into_search() {
        let g = chain(5);
        let mut pf = Pathfinder::default();
        pf.dijkstra_map(&g, &[4], f64::INFINITY);
        let r = pf.find_with(&g, &0, &4, SearchAlgorithm::Dijkstra);
        assert_eq!(r.path, vec![0, 1, 2, 3, 4]);
        assert_eq!(r.cost, 4.0);
    }
}
