//! Weighted directed graph keyed by arbitrary node ids.
//!
//! Nodes and edges live in slot arenas (`Vec<Option<_>>` with free lists)
//! and refer to each other only by slot index. Two hash maps give O(1)
//! expected lookup: node id → slot, and `(from_slot, to_slot)` → edge slot.
//!
//! Iteration walks the arenas in slot order, so it is stable as long as the
//! graph is not mutated in between.

use std::borrow::Borrow;
use std::fmt;
use std::hash::Hash;
use std::ops::ControlFlow;

use rustc_hash::FxHashMap;
use strata_core::Vec3;

use crate::error::GraphError;
use crate::traits::NodePayload;

/// Weight given to an edge added without an explicit weight when either
/// endpoint has no position.
pub const DEFAULT_EDGE_WEIGHT: f64 = 1.0;

/// Requirements for a node identifier. Implemented for every type that
/// satisfies them (`String`, `&str`, integers, tuples, ...).
pub trait NodeId: Clone + Eq + Hash + fmt::Debug {}

impl<T: Clone + Eq + Hash + fmt::Debug> NodeId for T {}

// ---------------------------------------------------------------------------
// NodeData
// ---------------------------------------------------------------------------

/// The default node payload: an optional position plus traversal flags.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct NodeData {
    pub position: Option<Vec3>,
    pub walkable: bool,
    /// Multiplier on the weight of edges entering this node.
    pub cost: f64,
}

impl Default for NodeData {
    fn default() -> Self {
        Self {
            position: None,
            walkable: true,
            cost: 1.0,
        }
    }
}

impl NodeData {
    /// A walkable node at `position`.
    pub fn at(position: Vec3) -> Self {
        Self {
            position: Some(position),
            ..Self::default()
        }
    }

    pub fn with_walkable(mut self, walkable: bool) -> Self {
        self.walkable = walkable;
        self
    }

    pub fn with_cost(mut self, cost: f64) -> Self {
        self.cost = cost;
        self
    }
}

impl NodePayload for NodeData {
    fn position(&self) -> Option<Vec3> {
        self.position
    }

    fn walkable(&self) -> bool {
        self.walkable
    }

    fn cost(&self) -> f64 {
        self.cost
    }
}

// ---------------------------------------------------------------------------
// Borrowed views
// ---------------------------------------------------------------------------

/// A node id together with its payload.
#[derive(Debug)]
pub struct NodeRef<'a, K, N> {
    pub id: &'a K,
    pub data: &'a N,
}

impl<K, N> Clone for NodeRef<'_, K, N> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K, N> Copy for NodeRef<'_, K, N> {}

/// A directed edge with its weight and optional payload.
#[derive(Debug)]
pub struct EdgeRef<'a, K, E> {
    pub from: &'a K,
    pub to: &'a K,
    pub weight: f64,
    pub data: Option<&'a E>,
}

impl<K, E> Clone for EdgeRef<'_, K, E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K, E> Copy for EdgeRef<'_, K, E> {}

// ---------------------------------------------------------------------------
// Storage
// ---------------------------------------------------------------------------

#[derive(Clone, Debug)]
struct NodeSlot<K, N> {
    id: K,
    data: N,
    /// Edge slots leaving this node, in insertion order.
    out_edges: Vec<usize>,
    /// Edge slots entering this node, in insertion order.
    in_edges: Vec<usize>,
}

#[derive(Clone, Debug)]
pub(crate) struct EdgeSlot<E> {
    pub(crate) from: usize,
    pub(crate) to: usize,
    pub(crate) weight: f64,
    data: Option<E>,
}

/// A weighted directed graph.
///
/// `K` is the node id, `N` the node payload and `E` the optional edge
/// payload. An undirected connection is two directed edges, added together
/// with [`add_bidirectional_edge`](Self::add_bidirectional_edge) and
/// removable independently.
///
/// Edges may only join nodes that already exist: `add_edge` on an unknown
/// id returns [`GraphError::UnknownNode`] and leaves the graph untouched.
#[derive(Clone, Debug)]
pub struct Graph<K, N = NodeData, E = ()> {
    nodes: Vec<Option<NodeSlot<K, N>>>,
    edges: Vec<Option<EdgeSlot<E>>>,
    index: FxHashMap<K, usize>,
    edge_index: FxHashMap<(usize, usize), usize>,
    free_nodes: Vec<usize>,
    free_edges: Vec<usize>,
    edge_count: usize,
}

impl<K, N, E> Default for Graph<K, N, E> {
    fn default() -> Self {
        Self {
            nodes: Vec::new(),
            edges: Vec::new(),
            index: FxHashMap::default(),
            edge_index: FxHashMap::default(),
            free_nodes: Vec::new(),
            free_edges: Vec::new(),
            edge_count: 0,
        }
    }
}

impl<K: NodeId, N, E> Graph<K, N, E> {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty graph with room for `nodes` nodes.
    pub fn with_capacity(nodes: usize) -> Self {
        let mut g = Self::default();
        g.nodes.reserve(nodes);
        g.index.reserve(nodes);
        g
    }

    // -----------------------------------------------------------------------
    // Nodes
    // -----------------------------------------------------------------------

    /// Insert a node, or overwrite the payload of an existing one in place.
    pub fn add_node(&mut self, id: K, data: N) {
        if let Some(&slot) = self.index.get(&id) {
            if let Some(node) = self.nodes[slot].as_mut() {
                node.data = data;
            }
            return;
        }
        let node = NodeSlot {
            id: id.clone(),
            data,
            out_edges: Vec::new(),
            in_edges: Vec::new(),
        };
        let slot = match self.free_nodes.pop() {
            Some(slot) => {
                self.nodes[slot] = Some(node);
                slot
            }
            None => {
                self.nodes.push(Some(node));
                self.nodes.len() - 1
            }
        };
        self.index.insert(id, slot);
    }

    pub fn has_node<Q>(&self, id: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.contains_key(id)
    }

    /// Look up a node. Returns `None` for unknown ids.
    pub fn get_node<Q>(&self, id: &Q) -> Option<NodeRef<'_, K, N>>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let slot = self.slot_of(id)?;
        self.node_ref(slot)
    }

    pub fn get_node_mut<Q>(&mut self, id: &Q) -> Option<&mut N>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let slot = self.slot_of(id)?;
        self.nodes[slot].as_mut().map(|n| &mut n.data)
    }

    /// Remove a node and every edge entering or leaving it.
    ///
    /// Returns the removed payload, or `None` (doing nothing) if the id is
    /// unknown.
    pub fn remove_node<Q>(&mut self, id: &Q) -> Option<N>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let slot = self.index.remove(id)?;
        let node = self.nodes[slot].take()?;
        // A self-loop sits in both lists; `unlink` ignores the second visit.
        for &e in node.out_edges.iter().chain(node.in_edges.iter()) {
            self.unlink(e);
        }
        self.free_nodes.push(slot);
        Some(node.data)
    }

    // -----------------------------------------------------------------------
    // Edges
    // -----------------------------------------------------------------------

    pub fn has_edge<Q>(&self, from: &Q, to: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.edge_slot_between(from, to).is_some()
    }

    /// Look up the directed edge `from → to`.
    pub fn get_edge<Q>(&self, from: &Q, to: &Q) -> Option<EdgeRef<'_, K, E>>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let e = self.edge_slot_between(from, to)?;
        self.edge_ref(e)
    }

    /// Remove the directed edge `from → to`. Returns whether it existed.
    pub fn remove_edge<Q>(&mut self, from: &Q, to: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        match self.edge_slot_between(from, to) {
            Some(e) => self.unlink(e),
            None => false,
        }
    }

    /// Edges leaving `id`, in insertion order. Empty for unknown ids.
    pub fn neighbors<Q>(&self, id: &Q) -> Edges<'_, K, N, E>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let slots = match self.slot_of(id).and_then(|s| self.nodes[s].as_ref()) {
            Some(node) => node.out_edges.as_slice(),
            None => &[],
        };
        Edges {
            graph: self,
            slots: slots.iter(),
        }
    }

    /// Edges entering `id`, in insertion order. Empty for unknown ids.
    pub fn incoming<Q>(&self, id: &Q) -> Edges<'_, K, N, E>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let slots = match self.slot_of(id).and_then(|s| self.nodes[s].as_ref()) {
            Some(node) => node.in_edges.as_slice(),
            None => &[],
        };
        Edges {
            graph: self,
            slots: slots.iter(),
        }
    }

    pub fn out_degree<Q>(&self, id: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.neighbors(id).len()
    }

    pub fn in_degree<Q>(&self, id: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.incoming(id).len()
    }

    // -----------------------------------------------------------------------
    // Iteration
    // -----------------------------------------------------------------------

    /// All nodes in slot order.
    pub fn nodes(&self) -> impl Iterator<Item = NodeRef<'_, K, N>> + '_ {
        self.nodes.iter().flatten().map(|n| NodeRef {
            id: &n.id,
            data: &n.data,
        })
    }

    /// All node ids in slot order.
    pub fn node_ids(&self) -> impl Iterator<Item = &K> + '_ {
        self.nodes.iter().flatten().map(|n| &n.id)
    }

    /// All edges in slot order.
    pub fn edges(&self) -> impl Iterator<Item = EdgeRef<'_, K, E>> + '_ {
        (0..self.edges.len()).filter_map(|e| self.edge_ref(e))
    }

    /// Visit every node until the visitor breaks.
    ///
    /// Returns `ControlFlow::Break(())` if the visitor stopped early. No node
    /// is visited after a break.
    pub fn for_each_node<F>(&self, mut visit: F) -> ControlFlow<()>
    where
        F: FnMut(NodeRef<'_, K, N>) -> ControlFlow<()>,
    {
        for node in self.nodes() {
            visit(node)?;
        }
        ControlFlow::Continue(())
    }

    /// Visit every edge until the visitor breaks.
    pub fn for_each_edge<F>(&self, mut visit: F) -> ControlFlow<()>
    where
        F: FnMut(EdgeRef<'_, K, E>) -> ControlFlow<()>,
    {
        for edge in self.edges() {
            visit(edge)?;
        }
        ControlFlow::Continue(())
    }

    // -----------------------------------------------------------------------
    // Size
    // -----------------------------------------------------------------------

    /// Remove every node and edge.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.edges.clear();
        self.index.clear();
        self.edge_index.clear();
        self.free_nodes.clear();
        self.free_edges.clear();
        self.edge_count = 0;
    }

    #[inline]
    pub fn node_count(&self) -> usize {
        self.index.len()
    }

    /// Number of directed edges.
    #[inline]
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    // -----------------------------------------------------------------------
    // Slot-level access for the search algorithms
    // -----------------------------------------------------------------------

    /// Upper bound (exclusive) on node slot indices.
    #[inline]
    pub(crate) fn slot_capacity(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub(crate) fn slot_of<Q>(&self, id: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.get(id).copied()
    }

    #[inline]
    pub(crate) fn id_at(&self, slot: usize) -> Option<&K> {
        self.nodes.get(slot)?.as_ref().map(|n| &n.id)
    }

    #[inline]
    pub(crate) fn data_at(&self, slot: usize) -> Option<&N> {
        self.nodes.get(slot)?.as_ref().map(|n| &n.data)
    }

    #[inline]
    pub(crate) fn out_slots(&self, slot: usize) -> &[usize] {
        match self.nodes.get(slot).and_then(Option::as_ref) {
            Some(node) => &node.out_edges,
            None => &[],
        }
    }

    #[inline]
    pub(crate) fn in_slots(&self, slot: usize) -> &[usize] {
        match self.nodes.get(slot).and_then(Option::as_ref) {
            Some(node) => &node.in_edges,
            None => &[],
        }
    }

    #[inline]
    pub(crate) fn edge_at(&self, e: usize) -> Option<&EdgeSlot<E>> {
        self.edges.get(e)?.as_ref()
    }

    /// Weight of the edge `from → to` between two node slots.
    #[inline]
    pub(crate) fn weight_between(&self, from: usize, to: usize) -> Option<f64> {
        let e = *self.edge_index.get(&(from, to))?;
        self.edge_at(e).map(|edge| edge.weight)
    }

    fn node_ref(&self, slot: usize) -> Option<NodeRef<'_, K, N>> {
        let node = self.nodes.get(slot)?.as_ref()?;
        Some(NodeRef {
            id: &node.id,
            data: &node.data,
        })
    }

    fn edge_ref(&self, e: usize) -> Option<EdgeRef<'_, K, E>> {
        let edge = self.edge_at(e)?;
        Some(EdgeRef {
            from: self.id_at(edge.from)?,
            to: self.id_at(edge.to)?,
            weight: edge.weight,
            data: edge.data.as_ref(),
        })
    }

    fn edge_slot_between<Q>(&self, from: &Q, to: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let f = self.slot_of(from)?;
        let t = self.slot_of(to)?;
        self.edge_index.get(&(f, t)).copied()
    }

    /// Insert or overwrite the edge between two live slots.
    fn link(&mut self, from: usize, to: usize, weight: f64, data: Option<E>) {
        if let Some(&e) = self.edge_index.get(&(from, to)) {
            if let Some(edge) = self.edges[e].as_mut() {
                edge.weight = weight;
                edge.data = data;
            }
            return;
        }
        let edge = EdgeSlot {
            from,
            to,
            weight,
            data,
        };
        let e = match self.free_edges.pop() {
            Some(e) => {
                self.edges[e] = Some(edge);
                e
            }
            None => {
                self.edges.push(Some(edge));
                self.edges.len() - 1
            }
        };
        self.edge_index.insert((from, to), e);
        if let Some(node) = self.nodes[from].as_mut() {
            node.out_edges.push(e);
        }
        if let Some(node) = self.nodes[to].as_mut() {
            node.in_edges.push(e);
        }
        self.edge_count += 1;
    }

    /// Remove an edge slot. Returns `false` if it was already free.
    fn unlink(&mut self, e: usize) -> bool {
        let Some(edge) = self.edges.get_mut(e).and_then(Option::take) else {
            return false;
        };
        self.edge_index.remove(&(edge.from, edge.to));
        if let Some(node) = self.nodes[edge.from].as_mut() {
            node.out_edges.retain(|&x| x != e);
        }
        if let Some(node) = self.nodes[edge.to].as_mut() {
            node.in_edges.retain(|&x| x != e);
        }
        self.free_edges.push(e);
        self.edge_count -= 1;
        true
    }
}

impl<K: NodeId, N: NodePayload, E> Graph<K, N, E> {
    /// Add the directed edge `from → to`.
    ///
    /// With `weight = None` the weight is the Euclidean distance between the
    /// endpoint positions, or [`DEFAULT_EDGE_WEIGHT`] when either endpoint
    /// has none. Re-adding an existing edge overwrites its weight and
    /// payload. Weights must be non-negative for searches to be correct.
    pub fn add_edge<Q>(&mut self, from: &Q, to: &Q, weight: Option<f64>) -> Result<(), GraphError>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + fmt::Debug + ?Sized,
    {
        self.add_edge_with(from, to, weight, None)
    }

    /// Like [`add_edge`](Self::add_edge), attaching a payload to the edge.
    pub fn add_edge_with<Q>(
        &mut self,
        from: &Q,
        to: &Q,
        weight: Option<f64>,
        data: Option<E>,
    ) -> Result<(), GraphError>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + fmt::Debug + ?Sized,
    {
        let (f, t) = self.endpoints(from, to)?;
        let weight = weight.unwrap_or_else(|| self.default_weight(f, t));
        self.link(f, t, weight, data);
        Ok(())
    }

    /// Add `a → b` and `b → a` with the same weight.
    pub fn add_bidirectional_edge<Q>(
        &mut self,
        a: &Q,
        b: &Q,
        weight: Option<f64>,
    ) -> Result<(), GraphError>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + fmt::Debug + ?Sized,
    {
        let (sa, sb) = self.endpoints(a, b)?;
        let weight = weight.unwrap_or_else(|| self.default_weight(sa, sb));
        self.link(sa, sb, weight, None);
        self.link(sb, sa, weight, None);
        Ok(())
    }

    fn endpoints<Q>(&self, from: &Q, to: &Q) -> Result<(usize, usize), GraphError>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + fmt::Debug + ?Sized,
    {
        let unknown = |id: &Q| GraphError::UnknownNode {
            id: format!("{id:?}"),
        };
        let f = self.slot_of(from).ok_or_else(|| unknown(from))?;
        let t = self.slot_of(to).ok_or_else(|| unknown(to))?;
        Ok((f, t))
    }

    fn default_weight(&self, from: usize, to: usize) -> f64 {
        let a = self.data_at(from).and_then(|d| d.position());
        let b = self.data_at(to).and_then(|d| d.position());
        match (a, b) {
            (Some(a), Some(b)) => a.distance(b),
            _ => DEFAULT_EDGE_WEIGHT,
        }
    }
}

// ---------------------------------------------------------------------------
// Edges iterator
// ---------------------------------------------------------------------------

/// Iterator over a node's outgoing or incoming edges.
pub struct Edges<'a, K, N, E> {
    graph: &'a Graph<K, N, E>,
    slots: std::slice::Iter<'a, usize>,
}

impl<'a, K: NodeId, N, E> Iterator for Edges<'a, K, N, E> {
    type Item = EdgeRef<'a, K, E>;

    fn next(&mut self) -> Option<Self::Item> {
        let graph = self.graph;
        self.slots.find_map(|&e| graph.edge_ref(e))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.slots.size_hint()
    }
}

impl<K: NodeId, N, E> ExactSizeIterator for Edges<'_, K, N, E> {}

#[cfg(test)]
mod tests {
    use super::*;

    fn abc() -> Graph<&'static str> {
        let mut g = Graph::new();
        g.add_node("A", NodeData::at(Vec3::new(0.0, 0.0, 0.0)));
        g.add_node("B", NodeData::at(Vec3::new(3.0, 0.0, 4.0)));
        g.add_node("C", NodeData::default());
        g
    }

    #[test]
    fn add_node_overwrites_in_place() {
        let mut g = abc();
        assert_eq!(g.node_count(), 3);
        g.add_node("C", NodeData::default().with_cost(4.0));
        assert_eq!(g.node_count(), 3);
        assert_eq!(g.get_node(&"C").unwrap().data.cost, 4.0);
    }

    #[test]
    fn get_missing_node_is_none() {
        let g = abc();
        assert!(g.get_node(&"Z").is_none());
        assert!(!g.has_node(&"Z"));
        let node = g.get_node(&"A").unwrap();
        assert_eq!(*node.id, "A");
    }

    #[test]
    fn string_ids_borrow_as_str() {
        let mut g: Graph<String> = Graph::new();
        g.add_node("start".to_string(), NodeData::default());
        g.add_node("end".to_string(), NodeData::default());
        g.add_edge("start", "end", Some(2.0)).unwrap();
        assert!(g.has_node("start"));
        assert!(g.has_edge("start", "end"));
        assert_eq!(g.get_edge("start", "end").unwrap().weight, 2.0);
    }

    #[test]
    fn edges_are_directed() {
        let mut g = abc();
        g.add_edge(&"A", &"B", Some(1.0)).unwrap();
        assert!(g.has_edge(&"A", &"B"));
        assert!(!g.has_edge(&"B", &"A"));
        assert_eq!(g.edge_count(), 1);
    }

    #[test]
    fn bidirectional_edge_is_two_removable_edges() {
        let mut g = abc();
        g.add_bidirectional_edge(&"A", &"B", Some(2.0)).unwrap();
        assert_eq!(g.edge_count(), 2);
        assert!(g.remove_edge(&"A", &"B"));
        assert!(!g.has_edge(&"A", &"B"));
        assert!(g.has_edge(&"B", &"A"));
        assert_eq!(g.edge_count(), 1);
    }

    #[test]
    fn default_weight_is_euclidean_or_one() {
        let mut g = abc();
        g.add_edge(&"A", &"B", None).unwrap();
        g.add_edge(&"A", &"C", None).unwrap();
        assert_eq!(g.get_edge(&"A", &"B").unwrap().weight, 5.0);
        assert_eq!(g.get_edge(&"A", &"C").unwrap().weight, DEFAULT_EDGE_WEIGHT);
    }

    #[test]
    fn edge_to_unknown_node_is_rejected() {
        let mut g = abc();
        let err = g.add_edge(&"A", &"Z", None).unwrap_err();
        assert_eq!(
            err,
            GraphError::UnknownNode {
                id: "\"Z\"".to_string()
            }
        );
        // Nothing was auto-created.
        assert!(!g.has_node(&"Z"));
        assert_eq!(g.node_count(), 3);
        assert_eq!(g.edge_count(), 0);

        assert!(g.add_bidirectional_edge(&"Y", &"A", None).is_err());
        assert_eq!(g.edge_count(), 0);
    }

    #[test]
    fn re_adding_edge_overwrites_weight() {
        let mut g: Graph<u32, NodeData, &'static str> = Graph::new();
        g.add_node(1, NodeData::default());
        g.add_node(2, NodeData::default());
        g.add_edge_with(&1, &2, Some(1.0), Some("road")).unwrap();
        g.add_edge_with(&1, &2, Some(7.0), Some("bridge")).unwrap();
        assert_eq!(g.edge_count(), 1);
        let e = g.get_edge(&1, &2).unwrap();
        assert_eq!(e.weight, 7.0);
        assert_eq!(e.data, Some(&"bridge"));
    }

    #[test]
    fn remove_node_cascades() {
        let mut g = abc();
        g.add_edge(&"A", &"B", None).unwrap();
        g.add_edge(&"B", &"C", None).unwrap();
        g.add_edge(&"A", &"C", None).unwrap();
        let before = g.edge_count();
        let degree = g.in_degree(&"B") + g.out_degree(&"B");

        assert!(g.remove_node(&"B").is_some());
        assert!(!g.has_edge(&"A", &"B"));
        assert!(!g.has_edge(&"B", &"C"));
        assert!(g.has_edge(&"A", &"C"));
        assert_eq!(g.edge_count(), before - degree);
        assert_eq!(g.edges().count(), g.edge_count());
        assert_eq!(g.out_degree(&"A"), 1);
        assert_eq!(g.in_degree(&"C"), 1);
    }

    #[test]
    fn remove_node_with_self_loop() {
        let mut g = abc();
        g.add_edge(&"A", &"A", Some(1.0)).unwrap();
        g.add_edge(&"A", &"B", Some(1.0)).unwrap();
        assert_eq!(g.edge_count(), 2);
        g.remove_node(&"A");
        assert_eq!(g.edge_count(), 0);
        assert_eq!(g.edges().count(), 0);
    }

    #[test]
    fn remove_missing_is_noop() {
        let mut g = abc();
        g.add_edge(&"A", &"B", None).unwrap();
        assert!(g.remove_node(&"Z").is_none());
        assert!(!g.remove_edge(&"B", &"A"));
        assert!(!g.remove_edge(&"A", &"Z"));
        assert_eq!(g.node_count(), 3);
        assert_eq!(g.edge_count(), 1);
    }

    #[test]
    fn freed_slots_are_reused() {
        let mut g = abc();
        g.remove_node(&"B");
        g.add_node("D", NodeData::default());
        assert_eq!(g.slot_capacity(), 3);
        assert_eq!(g.node_count(), 3);
        g.add_edge(&"D", &"A", None).unwrap();
        assert_eq!(g.neighbors(&"D").next().unwrap().to, &"A");
    }

    #[test]
    fn counts_match_iteration() {
        let mut g = abc();
        g.add_bidirectional_edge(&"A", &"B", None).unwrap();
        g.add_edge(&"C", &"A", None).unwrap();
        g.remove_edge(&"B", &"A");
        assert_eq!(g.nodes().count(), g.node_count());
        assert_eq!(g.edges().count(), g.edge_count());
    }

    #[test]
    fn iteration_order_is_stable() {
        let mut g = abc();
        g.add_edge(&"A", &"B", None).unwrap();
        g.add_edge(&"C", &"B", None).unwrap();
        let first: Vec<_> = g.node_ids().copied().collect();
        let second: Vec<_> = g.node_ids().copied().collect();
        assert_eq!(first, vec!["A", "B", "C"]);
        assert_eq!(first, second);
        let edges: Vec<_> = g.edges().map(|e| (*e.from, *e.to)).collect();
        assert_eq!(edges, vec![("A", "B"), ("C", "B")]);
    }

    #[test]
    fn for_each_node_stops_on_break() {
        let g = abc();
        let mut seen = Vec::new();
        let flow = g.for_each_node(|n| {
            seen.push(*n.id);
            if *n.id == "B" {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        });
        assert_eq!(flow, ControlFlow::Break(()));
        assert_eq!(seen, vec!["A", "B"]);
    }

    #[test]
    fn for_each_edge_visits_all_without_break() {
        let mut g = abc();
        g.add_bidirectional_edge(&"A", &"B", None).unwrap();
        let mut n = 0;
        let flow = g.for_each_edge(|_| {
            n += 1;
            ControlFlow::Continue(())
        });
        assert_eq!(flow, ControlFlow::Continue(()));
        assert_eq!(n, 2);
    }

    #[test]
    fn clear_empties_everything() {
        let mut g = abc();
        g.add_edge(&"A", &"B", None).unwrap();
        g.clear();
        assert_eq!(g.node_count(), 0);
        assert_eq!(g.edge_count(), 0);
        assert!(g.is_empty());
        assert_eq!(g.nodes().count(), 0);
    }

    #[test]
    fn unit_payload_graph() {
        let mut g: Graph<u8, ()> = Graph::new();
        g.add_node(0, ());
        g.add_node(1, ());
        g.add_edge(&0, &1, None).unwrap();
        assert_eq!(g.get_edge(&0, &1).unwrap().weight, DEFAULT_EDGE_WEIGHT);
    }
}
