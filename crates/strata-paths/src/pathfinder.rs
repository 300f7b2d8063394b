use std::borrow::Borrow;
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::hash::Hash;

use strata_core::Vec3;

use crate::graph::{Graph, NodeId};
use crate::traits::NodePayload;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Shortest-path strategy used by [`Pathfinder::find`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SearchAlgorithm {
    /// NBA*: bidirectional A* meeting in the middle.
    #[default]
    Bidirectional,
    /// Classic A* with a Euclidean heuristic.
    AStar,
    /// Best-first search on the heuristic alone. Fast, not always optimal.
    GreedyAStar,
    /// Uniform-cost search (A* with a zero heuristic).
    Dijkstra,
}

/// Options for a [`Pathfinder`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct PathfinderConfig {
    pub algorithm: SearchAlgorithm,
    /// Never route through nodes whose payload reports `walkable() == false`.
    pub respect_walkable: bool,
}

impl Default for PathfinderConfig {
    fn default() -> Self {
        Self {
            algorithm: SearchAlgorithm::default(),
            respect_walkable: true,
        }
    }
}

// ---------------------------------------------------------------------------
// Results
// ---------------------------------------------------------------------------

/// Outcome of a path query.
///
/// When `found` is false, `path` and `positions` are empty and `cost` is
/// infinite. Nodes without a position resolve to [`Vec3::ZERO`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathResult<K> {
    pub found: bool,
    pub path: Vec<K>,
    pub cost: f64,
    pub positions: Vec<Vec3>,
}

impl<K> PathResult<K> {
    /// The "no path" result.
    pub fn not_found() -> Self {
        Self {
            found: false,
            path: Vec::new(),
            cost: f64::INFINITY,
            positions: Vec::new(),
        }
    }

    #[inline]
    pub fn is_found(&self) -> bool {
        self.found
    }

    /// Number of nodes on the path.
    #[inline]
    pub fn len(&self) -> usize {
        self.path.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }
}

/// A node with its distance, returned from [`Pathfinder::dijkstra_map`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathNode<K> {
    pub id: K,
    pub cost: f64,
}

// ---------------------------------------------------------------------------
// Internal search state
// ---------------------------------------------------------------------------

#[derive(Clone)]
pub(crate) struct SearchNode {
    pub(crate) g: f64,
    pub(crate) f: f64,
    pub(crate) parent: usize,
    pub(crate) generation: u32,
    pub(crate) open: bool,
    pub(crate) closed: bool,
}

impl Default for SearchNode {
    fn default() -> Self {
        Self {
            g: f64::INFINITY,
            f: f64::INFINITY,
            parent: usize::MAX,
            generation: 0,
            open: false,
            closed: false,
        }
    }
}

impl SearchNode {
    /// Reset a node touched for the first time in generation `cur_gen`.
    #[inline]
    pub(crate) fn claim(&mut self, cur_gen: u32) {
        if self.generation != cur_gen {
            *self = SearchNode {
                generation: cur_gen,
                ..SearchNode::default()
            };
        }
    }

    #[inline]
    pub(crate) fn seen(&self, cur_gen: u32) -> bool {
        self.generation == cur_gen
    }
}

/// Reference into a node array, ordered by `f` for use in `BinaryHeap`.
#[derive(Clone, Copy)]
pub(crate) struct OpenEntry {
    pub(crate) idx: usize,
    pub(crate) f: f64,
}

impl PartialEq for OpenEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for OpenEntry {}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed so BinaryHeap (max-heap) pops smallest f first; equal f
        // pops the lowest slot, keeping searches deterministic.
        other
            .f
            .total_cmp(&self.f)
            .then_with(|| other.idx.cmp(&self.idx))
    }
}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// ---------------------------------------------------------------------------
// Pathfinder
// ---------------------------------------------------------------------------

/// Shortest-path searcher over a [`Graph`].
///
/// `Pathfinder` owns all internal caches (node arrays, open lists, stacks)
/// so that repeated queries allocate only when the graph outgrows them. It
/// never holds the graph: each query borrows it, so mutations between
/// queries are always picked up. Cached state is invalidated per query by a
/// generation counter and never leaks into the next result.
pub struct Pathfinder {
    pub(crate) config: PathfinderConfig,
    pub(crate) forward: Vec<SearchNode>,
    pub(crate) backward: Vec<SearchNode>,
    pub(crate) generation: u32,
    pub(crate) open: BinaryHeap<OpenEntry>,
    pub(crate) open_back: BinaryHeap<OpenEntry>,
    pub(crate) stack: Vec<usize>,
    pub(crate) expanded: usize,
}

impl Default for Pathfinder {
    fn default() -> Self {
        Self::new(PathfinderConfig::default())
    }
}

impl Pathfinder {
    /// Create a pathfinder with the given options.
    pub fn new(config: PathfinderConfig) -> Self {
        Self {
            config,
            forward: Vec::new(),
            backward: Vec::new(),
            generation: 0,
            open: BinaryHeap::new(),
            open_back: BinaryHeap::new(),
            stack: Vec::new(),
            expanded: 0,
        }
    }

    #[inline]
    pub fn config(&self) -> PathfinderConfig {
        self.config
    }

    pub fn set_config(&mut self, config: PathfinderConfig) {
        self.config = config;
    }

    /// Nodes expanded by the most recent search.
    #[inline]
    pub fn last_expanded(&self) -> usize {
        self.expanded
    }

    /// Find a path with the configured algorithm.
    ///
    /// Missing ids and unreachable goals yield [`PathResult::not_found`];
    /// `start == end` yields a one-node path of cost 0.
    pub fn find<K, N, E, Q>(&mut self, graph: &Graph<K, N, E>, start: &Q, end: &Q) -> PathResult<K>
    where
        K: NodeId + Borrow<Q>,
        N: NodePayload,
        Q: Hash + Eq + ?Sized,
    {
        self.find_with(graph, start, end, self.config.algorithm)
    }

    /// Find a path with an explicit algorithm, ignoring the configured one.
    pub fn find_with<K, N, E, Q>(
        &mut self,
        graph: &Graph<K, N, E>,
        start: &Q,
        end: &Q,
        algorithm: SearchAlgorithm,
    ) -> PathResult<K>
    where
        K: NodeId + Borrow<Q>,
        N: NodePayload,
        Q: Hash + Eq + ?Sized,
    {
        self.expanded = 0;
        let (Some(s), Some(t)) = (graph.slot_of(start), graph.slot_of(end)) else {
            return PathResult::not_found();
        };
        if s == t {
            return resolve(graph, &[s]);
        }
        if !self.passable(graph, s) || !self.passable(graph, t) {
            return PathResult::not_found();
        }

        let slots = match algorithm {
            SearchAlgorithm::Bidirectional => self.nba_search(graph, s, t),
            SearchAlgorithm::AStar => self.astar_search(graph, s, t, Frontier::AStar),
            SearchAlgorithm::GreedyAStar => self.astar_search(graph, s, t, Frontier::Greedy),
            SearchAlgorithm::Dijkstra => self.astar_search(graph, s, t, Frontier::Uniform),
        };
        log::trace!(
            "{algorithm:?} search expanded {} nodes, found: {}",
            self.expanded,
            slots.is_some()
        );

        match slots {
            Some(slots) => resolve(graph, &slots),
            None => PathResult::not_found(),
        }
    }

    // -----------------------------------------------------------------------
    // Shared helpers
    // -----------------------------------------------------------------------

    /// Grow the node arrays to cover every slot of the graph and start a new
    /// generation.
    pub(crate) fn begin<K: NodeId, N, E>(&mut self, graph: &Graph<K, N, E>) -> u32 {
        let cap = graph.slot_capacity();
        if self.forward.len() < cap {
            self.forward.resize(cap, SearchNode::default());
            self.backward.resize(cap, SearchNode::default());
        }
        self.generation = self.generation.wrapping_add(1);
        if self.generation == 0 {
            // Wrapped: stale stamps could now collide, so wipe them.
            self.forward.fill(SearchNode::default());
            self.backward.fill(SearchNode::default());
            self.generation = 1;
        }
        self.open.clear();
        self.open_back.clear();
        self.stack.clear();
        self.generation
    }

    /// Whether the search may enter `slot`.
    #[inline]
    pub(crate) fn passable<K: NodeId, N: NodePayload, E>(
        &self,
        graph: &Graph<K, N, E>,
        slot: usize,
    ) -> bool {
        !self.config.respect_walkable || graph.data_at(slot).is_some_and(|d| d.walkable())
    }
}

/// Search frontier ordering for the unidirectional searches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Frontier {
    /// f = g + h
    AStar,
    /// f = h
    Greedy,
    /// f = g
    Uniform,
}

/// Cost of stepping along an edge of `weight` into `to`.
#[inline]
pub(crate) fn step_cost<K: NodeId, N: NodePayload, E>(
    graph: &Graph<K, N, E>,
    to: usize,
    weight: f64,
) -> f64 {
    weight * graph.data_at(to).map_or(1.0, |d| d.cost())
}

/// Admissible estimate between two slots: straight-line distance, or 0 when
/// either lacks a position.
#[inline]
pub(crate) fn heuristic<K: NodeId, N: NodePayload, E>(
    graph: &Graph<K, N, E>,
    a: usize,
    b: usize,
) -> f64 {
    let pa = graph.data_at(a).and_then(|d| d.position());
    let pb = graph.data_at(b).and_then(|d| d.position());
    match (pa, pb) {
        (Some(pa), Some(pb)) => pa.distance(pb),
        _ => 0.0,
    }
}

/// Turn a slot path into a [`PathResult`], summing step costs in order.
pub(crate) fn resolve<K: NodeId, N: NodePayload, E>(
    graph: &Graph<K, N, E>,
    slots: &[usize],
) -> PathResult<K> {
    let mut cost = 0.0;
    for pair in slots.windows(2) {
        match graph.weight_between(pair[0], pair[1]) {
            Some(w) => cost += step_cost(graph, pair[1], w),
            None => return PathResult::not_found(),
        }
    }
    let mut path = Vec::with_capacity(slots.len());
    let mut positions = Vec::with_capacity(slots.len());
    for &slot in slots {
        let Some(id) = graph.id_at(slot) else {
            return PathResult::not_found();
        };
        path.push(id.clone());
        positions.push(
            graph
                .data_at(slot)
                .and_then(|d| d.position())
                .unwrap_or(Vec3::ZERO),
        );
    }
    PathResult {
        found: true,
        path,
        cost,
        positions,
    }
}

/// Walk `parent` links from `from` until `usize::MAX`, yielding slots in
/// visiting order.
pub(crate) fn walk_parents(nodes: &[SearchNode], from: usize) -> Vec<usize> {
    let mut out = Vec::new();
    let mut ci = from;
    while ci != usize::MAX {
        out.push(ci);
        ci = nodes[ci].parent;
    }
    out
}

// ---------------------------------------------------------------------------
// Graph-bound convenience wrapper
// ---------------------------------------------------------------------------

/// A [`Pathfinder`] bound to one borrowed graph.
///
/// The borrow keeps the graph frozen while the binding lives; to mutate the
/// graph, drop the binding (or use [`Pathfinder`] directly and pass the
/// graph per query).
pub struct GraphPathfinder<'g, K, N = crate::NodeData, E = ()> {
    graph: &'g Graph<K, N, E>,
    finder: Pathfinder,
}

/// Bind a new [`Pathfinder`] to `graph`.
pub fn create_pathfinder<K, N, E>(
    graph: &Graph<K, N, E>,
    config: PathfinderConfig,
) -> GraphPathfinder<'_, K, N, E> {
    GraphPathfinder {
        graph,
        finder: Pathfinder::new(config),
    }
}

impl<'g, K: NodeId, N: NodePayload, E> GraphPathfinder<'g, K, N, E> {
    #[inline]
    pub fn graph(&self) -> &'g Graph<K, N, E> {
        self.graph
    }

    /// Search with the configured algorithm.
    pub fn find<Q>(&mut self, start: &Q, end: &Q) -> PathResult<K>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.finder.find(self.graph, start, end)
    }

    /// Uniform-cost search regardless of the configured algorithm.
    pub fn find_path_dijkstra<Q>(&mut self, start: &Q, end: &Q) -> PathResult<K>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.finder.find_path_dijkstra(self.graph, start, end)
    }

    /// Closest positioned node to `position`.
    pub fn find_closest_node(&self, position: Vec3) -> Option<K> {
        crate::nearest::find_closest_node(self.graph, position)
    }

    /// Rebind to another graph, keeping the search buffers.
    pub fn rebind<'h>(self, graph: &'h Graph<K, N, E>) -> GraphPathfinder<'h, K, N, E> {
        GraphPathfinder {
            graph,
            finder: self.finder,
        }
    }

    pub fn into_inner(self) -> Pathfinder {
        self.finder
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::NodeData;

    fn line() -> Graph<&'static str> {
        let mut g = Graph::new();
        for (i, id) in ["A", "B", "C"].into_iter().enumerate() {
            g.add_node(id, NodeData::at(Vec3::new(i as f64, 0.0, 0.0)));
        }
        g.add_bidirectional_edge(&"A", &"B", None).unwrap();
        g.add_bidirectional_edge(&"B", &"C", None).unwrap();
        g
    }

    const ALL: [SearchAlgorithm; 4] = [
        SearchAlgorithm::Bidirectional,
        SearchAlgorithm::AStar,
        SearchAlgorithm::GreedyAStar,
        SearchAlgorithm::Dijkstra,
    ];

    #[test]
    fn same_node_is_trivial_path() {
        let g = line();
        let mut pf = Pathfinder::default();
        for algo in ALL {
            let r = pf.find_with(&g, &"B", &"B", algo);
            assert!(r.found);
            assert_eq!(r.path, vec!["B"]);
            assert_eq!(r.cost, 0.0);
            assert_eq!(r.positions, vec![Vec3::new(1.0, 0.0, 0.0)]);
        }
    }

    #[test]
    fn result_accessors() {
        let g = line();
        let r = Pathfinder::default().find(&g, &"A", &"C");
        assert!(r.is_found());
        assert_eq!(r.len(), 3);
        assert!(!r.is_empty());

        let none = Pathfinder::default().find(&g, &"A", &"Z");
        assert!(!none.is_found());
        assert_eq!(none.len(), 0);
        assert!(none.is_empty());
    }

    #[test]
    fn missing_ids_not_found() {
        let g = line();
        let mut pf = Pathfinder::default();
        for algo in ALL {
            let r = pf.find_with(&g, &"A", &"Z", algo);
            assert_eq!(r, PathResult::not_found());
            assert!(r.cost.is_infinite());
            let r = pf.find_with(&g, &"Z", &"Z", algo);
            assert!(!r.found);
        }
    }

    #[test]
    fn empty_graph_not_found() {
        let g: Graph<u32> = Graph::new();
        let r = Pathfinder::default().find(&g, &0, &1);
        assert!(!r.found);
        assert!(r.path.is_empty());
        assert!(r.positions.is_empty());
    }

    #[test]
    fn positions_fall_back_to_origin() {
        let mut g: Graph<u32> = Graph::new();
        g.add_node(1, NodeData::default());
        g.add_node(2, NodeData::at(Vec3::new(5.0, 1.0, 0.0)));
        g.add_edge(&1, &2, Some(3.0)).unwrap();
        let r = Pathfinder::default().find(&g, &1, &2);
        assert!(r.found);
        assert_eq!(r.positions, vec![Vec3::ZERO, Vec3::new(5.0, 1.0, 0.0)]);
        assert_eq!(r.cost, 3.0);
    }

    #[test]
    fn unwalkable_nodes_are_avoided() {
        let mut g = line();
        g.add_node("D", NodeData::at(Vec3::new(1.0, 0.0, 1.0)));
        g.add_bidirectional_edge(&"A", &"D", None).unwrap();
        g.add_bidirectional_edge(&"D", &"C", None).unwrap();
        g.get_node_mut(&"B").unwrap().walkable = false;

        let mut pf = Pathfinder::default();
        for algo in ALL {
            let r = pf.find_with(&g, &"A", &"C", algo);
            assert_eq!(r.path, vec!["A", "D", "C"], "{algo:?}");
        }

        // Goal itself unwalkable.
        let r = pf.find(&g, &"A", &"B");
        assert!(!r.found);

        pf.set_config(PathfinderConfig {
            respect_walkable: false,
            ..PathfinderConfig::default()
        });
        let r = pf.find(&g, &"A", &"B");
        assert_eq!(r.path, vec!["A", "B"]);
    }

    #[test]
    fn node_cost_scales_entering_edges() {
        let mut g = line();
        g.get_node_mut(&"B").unwrap().cost = 3.0;
        let r = Pathfinder::default().find(&g, &"A", &"C");
        assert_eq!(r.cost, 4.0);
    }

    #[test]
    fn graph_mutation_between_calls_is_visible() {
        let mut g = line();
        let mut pf = Pathfinder::default();
        assert!(pf.find(&g, &"A", &"C").found);
        g.remove_edge(&"B", &"C");
        assert!(!pf.find(&g, &"A", &"C").found);
        g.add_edge(&"A", &"C", Some(10.0)).unwrap();
        let r = pf.find(&g, &"A", &"C");
        assert_eq!(r.path, vec!["A", "C"]);
        assert_eq!(r.cost, 10.0);
    }

    #[test]
    fn bound_pathfinder_queries() {
        let g = line();
        let mut bound = create_pathfinder(&g, PathfinderConfig::default());
        let r = bound.find(&"A", &"C");
        assert_eq!(r.path, vec!["A", "B", "C"]);
        assert_eq!(bound.find_path_dijkstra(&"C", &"A").cost, 2.0);
        assert_eq!(bound.find_closest_node(Vec3::new(1.9, 0.0, 0.3)), Some("C"));
    }

    #[test]
    fn generation_wrap_resets_buffers() {
        let g = line();
        let mut pf = Pathfinder::default();
        pf.generation = u32::MAX;
        let r = pf.find(&g, &"A", &"C");
        assert_eq!(pf.generation, 1);
        assert_eq!(r.path, vec!["A", "B", "C"]);
    }

    #[test]
    fn open_entry_orders_by_f_then_slot() {
        let mut heap = BinaryHeap::new();
        heap.push(OpenEntry { idx: 3, f: 2.0 });
        heap.push(OpenEntry { idx: 1, f: 5.0 });
        heap.push(OpenEntry { idx: 2, f: 2.0 });
        let order: Vec<_> = std::iter::from_fn(|| heap.pop()).map(|e| e.idx).collect();
        assert_eq!(order, vec![2, 3, 1]);
    }
}
