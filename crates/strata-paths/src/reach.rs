//! Reachability flood fill.

use std::borrow::Borrow;
use std::hash::Hash;

use crate::graph::{Graph, NodeId};
use crate::pathfinder::Pathfinder;
use crate::traits::NodePayload;

impl Pathfinder {
    /// Flood-fill along out-edges from `start` and return every node that
    /// can be reached, `start` first.
    ///
    /// Unwalkable nodes are neither entered nor returned when the config
    /// respects walkability. An unknown `start` yields an empty set.
    pub fn reachable<K, N, E, Q>(&mut self, graph: &Graph<K, N, E>, start: &Q) -> Vec<K>
    where
        K: NodeId + Borrow<Q>,
        N: NodePayload,
        Q: Hash + Eq + ?Sized,
    {
        self.expanded = 0;
        let mut result = Vec::new();
        let Some(si) = graph.slot_of(start) else {
            return result;
        };
        if !self.passable(graph, si) {
            return result;
        }
        let cur_gen = self.begin(graph);

        self.forward[si].claim(cur_gen);
        self.stack.push(si);
        if let Some(id) = graph.id_at(si) {
            result.push(id.clone());
        }

        // Iterative DFS.
        while let Some(ci) = self.stack.pop() {
            self.expanded += 1;
            for &e in graph.out_slots(ci) {
                let Some(edge) = graph.edge_at(e) else {
                    continue;
                };
                let ni = edge.to;
                if self.forward[ni].seen(cur_gen) || !self.passable(graph, ni) {
                    continue;
                }
                self.forward[ni].claim(cur_gen);
                self.stack.push(ni);
                if let Some(id) = graph.id_at(ni) {
                    result.push(id.clone());
                }
            }
        }

        result
    }

    /// Whether `end` can be reached from `start` at all.
    pub fn is_reachable<K, N, E, Q>(&mut self, graph: &Graph<K, N, E>, start: &Q, end: &Q) -> bool
    where
        K: NodeId + Borrow<Q>,
        N: NodePayload,
        Q: Hash + Eq + ?Sized,
    {
        let Some(ti) = graph.slot_of(end) else {
            return false;
        };
        // Every node the flood fill reaches carries the fresh generation.
        !self.reachable(graph, start).is_empty() && self.forward[ti].seen(self.generation)
    }
}
