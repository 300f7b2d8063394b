//! New Bidirectional A* (Pijls & Post).
//!
//! Two A* searches run towards each other, one along out-edges from the
//! start and one along in-edges from the goal. They share a single closed
//! set, and each side prunes nodes that provably cannot improve on the best
//! meeting cost `L` seen so far:
//!
//! - `g(x) + h(x) >= L` (cannot beat `L` going forward), or
//! - `g(x) + F_other - h_other(x) >= L` (cannot beat `L` given the other
//!   side's best open estimate `F_other`).
//!
//! The side with the smaller open set is expanded each round. The search
//! ends when either side runs dry; `L` is then the optimal cost, given an
//! admissible and consistent heuristic.

use std::collections::BinaryHeap;

use crate::graph::{Graph, NodeId};
use crate::pathfinder::{OpenEntry, Pathfinder, SearchNode, heuristic, step_cost, walk_parents};
use crate::traits::NodePayload;

impl Pathfinder {
    pub(crate) fn nba_search<K: NodeId, N: NodePayload, E>(
        &mut self,
        graph: &Graph<K, N, E>,
        s: usize,
        t: usize,
    ) -> Option<Vec<usize>> {
        let cur_gen = self.begin(graph);
        let respect = self.config.respect_walkable;
        let enter =
            |slot: usize| !respect || graph.data_at(slot).is_some_and(|d| d.walkable());

        let mut best = f64::INFINITY;
        let mut meet = usize::MAX;

        let f0 = heuristic(graph, s, t);
        seed(&mut self.forward, &mut self.open, s, f0, cur_gen);
        seed(&mut self.backward, &mut self.open_back, t, f0, cur_gen);
        let mut f_fwd = f0;
        let mut f_back = f0;

        loop {
            let forward = self.open.len() <= self.open_back.len();
            let (mine, other, open, other_f, origin, target) = if forward {
                (&mut self.forward, &self.backward, &mut self.open, f_back, s, t)
            } else {
                (&mut self.backward, &self.forward, &mut self.open_back, f_fwd, t, s)
            };

            let Some(x) = pop_live(mine, open, cur_gen) else {
                break;
            };
            mine[x].open = false;
            if is_closed(other, x, cur_gen) {
                continue;
            }
            mine[x].closed = true;

            let gx = mine[x].g;
            let rejected = gx + heuristic(graph, x, target) >= best
                || gx + other_f - heuristic(graph, x, origin) >= best;

            if !rejected {
                self.expanded += 1;
                let edges = if forward {
                    graph.out_slots(x)
                } else {
                    graph.in_slots(x)
                };
                for &e in edges {
                    let Some(edge) = graph.edge_at(e) else {
                        continue;
                    };
                    // Backward steps traverse `y → x`, so the cost of
                    // entering `x` applies.
                    let (y, w) = if forward {
                        (edge.to, step_cost(graph, edge.to, edge.weight))
                    } else {
                        (edge.from, step_cost(graph, x, edge.weight))
                    };
                    if !enter(y) || is_closed(mine, y, cur_gen) || is_closed(other, y, cur_gen) {
                        continue;
                    }

                    let tentative = gx + w;
                    let n = &mut mine[y];
                    if n.seen(cur_gen) {
                        if tentative >= n.g {
                            continue;
                        }
                    } else {
                        n.claim(cur_gen);
                    }
                    n.g = tentative;
                    n.f = tentative + heuristic(graph, y, target);
                    n.parent = x;
                    n.open = true;
                    open.push(OpenEntry { idx: y, f: n.f });

                    let through = tentative + g_of(other, y, cur_gen);
                    if through < best {
                        best = through;
                        meet = y;
                    }
                }
            }

            let top = peek_live(mine, open, cur_gen);
            if forward {
                f_fwd = top;
            } else {
                f_back = top;
            }
        }

        if meet == usize::MAX {
            return None;
        }
        let mut path = walk_parents(&self.forward, meet);
        path.reverse();
        let mut ci = self.backward[meet].parent;
        while ci != usize::MAX {
            path.push(ci);
            ci = self.backward[ci].parent;
        }
        Some(path)
    }
}

fn seed(
    nodes: &mut [SearchNode],
    open: &mut BinaryHeap<OpenEntry>,
    idx: usize,
    f: f64,
    cur_gen: u32,
) {
    let n = &mut nodes[idx];
    n.claim(cur_gen);
    n.g = 0.0;
    n.f = f;
    n.open = true;
    open.push(OpenEntry { idx, f });
}

#[inline]
fn is_closed(nodes: &[SearchNode], idx: usize, cur_gen: u32) -> bool {
    nodes[idx].seen(cur_gen) && nodes[idx].closed
}

#[inline]
fn g_of(nodes: &[SearchNode], idx: usize, cur_gen: u32) -> f64 {
    if nodes[idx].seen(cur_gen) {
        nodes[idx].g
    } else {
        f64::INFINITY
    }
}

/// Whether a heap entry still describes an open node with that `f`.
#[inline]
fn live(nodes: &[SearchNode], entry: OpenEntry, cur_gen: u32) -> bool {
    let n = &nodes[entry.idx];
    n.seen(cur_gen) && n.open && n.f == entry.f
}

fn pop_live(nodes: &[SearchNode], open: &mut BinaryHeap<OpenEntry>, cur_gen: u32) -> Option<usize> {
    while let Some(entry) = open.pop() {
        if live(nodes, entry, cur_gen) {
            return Some(entry.idx);
        }
    }
    None
}

/// Smallest live `f` on a side, discarding stale entries on the way.
fn peek_live(nodes: &[SearchNode], open: &mut BinaryHeap<OpenEntry>, cur_gen: u32) -> f64 {
    while let Some(&entry) = open.peek() {
        if live(nodes, entry, cur_gen) {
            return entry.f;
        }
        open.pop();
    }
    f64::INFINITY
}
