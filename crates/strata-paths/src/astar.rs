use crate::graph::{Graph, NodeId};
use crate::pathfinder::{Frontier, OpenEntry, Pathfinder, heuristic, step_cost, walk_parents};
use crate::traits::NodePayload;

impl Pathfinder {
    /// Unidirectional best-first search from slot `s` to slot `t`.
    ///
    /// `frontier` selects the ordering: A* (`g + h`), greedy (`h` only) or
    /// uniform cost (`g` only). Returns the slot path including both
    /// endpoints.
    pub(crate) fn astar_search<K: NodeId, N: NodePayload, E>(
        &mut self,
        graph: &Graph<K, N, E>,
        s: usize,
        t: usize,
        frontier: Frontier,
    ) -> Option<Vec<usize>> {
        let cur_gen = self.begin(graph);
        let estimate = |from: usize| match frontier {
            Frontier::Uniform => 0.0,
            Frontier::AStar | Frontier::Greedy => heuristic(graph, from, t),
        };

        {
            let node = &mut self.forward[s];
            node.claim(cur_gen);
            node.g = 0.0;
            node.f = estimate(s);
            node.open = true;
        }
        self.open.push(OpenEntry {
            idx: s,
            f: self.forward[s].f,
        });

        let found = 'search: loop {
            let Some(current) = self.open.pop() else {
                break 'search false;
            };
            let ci = current.idx;

            // Skip stale entries.
            if !self.forward[ci].seen(cur_gen) || !self.forward[ci].open {
                continue;
            }
            if ci == t {
                break 'search true;
            }

            self.forward[ci].open = false;
            self.forward[ci].closed = true;
            self.expanded += 1;
            let current_g = self.forward[ci].g;

            for &e in graph.out_slots(ci) {
                let Some(edge) = graph.edge_at(e) else {
                    continue;
                };
                let ni = edge.to;
                if !self.passable(graph, ni) {
                    continue;
                }
                let tentative_g = current_g + step_cost(graph, ni, edge.weight);

                let n = &mut self.forward[ni];
                if n.seen(cur_gen) {
                    // Greedy keeps the first parent it finds.
                    if frontier == Frontier::Greedy || tentative_g >= n.g {
                        continue;
                    }
                } else {
                    n.claim(cur_gen);
                }

                n.g = tentative_g;
                n.f = match frontier {
                    Frontier::AStar => tentative_g + estimate(ni),
                    Frontier::Greedy => estimate(ni),
                    Frontier::Uniform => tentative_g,
                };
                n.parent = ci;
                n.open = true;
                n.closed = false;

                self.open.push(OpenEntry { idx: ni, f: n.f });
            }
        };

        if !found {
            return None;
        }
        let mut path = walk_parents(&self.forward, t);
        path.reverse();
        Some(path)
    }
}
