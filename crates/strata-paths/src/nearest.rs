use strata_core::Vec3;

use crate::graph::{Graph, NodeId, NodeRef};
use crate::traits::NodePayload;

/// The node whose position is closest to `position`.
///
/// Nodes without a position are skipped. Ties go to the node visited first
/// in [`Graph::nodes`] order. Returns `None` when no node has a position.
pub fn find_closest_node<K: NodeId, N: NodePayload, E>(
    graph: &Graph<K, N, E>,
    position: Vec3,
) -> Option<K> {
    find_closest_node_by(graph, position, |_| true)
}

/// Like [`find_closest_node`], considering only nodes accepted by `filter`.
pub fn find_closest_node_by<K, N, E, F>(
    graph: &Graph<K, N, E>,
    position: Vec3,
    mut filter: F,
) -> Option<K>
where
    K: NodeId,
    N: NodePayload,
    F: FnMut(NodeRef<'_, K, N>) -> bool,
{
    let mut best: Option<(&K, f64)> = None;
    for node in graph.nodes() {
        let Some(p) = node.data.position() else {
            continue;
        };
        if !filter(node) {
            continue;
        }
        let d = p.distance_squared(position);
        if best.is_none_or(|(_, bd)| d < bd) {
            best = Some((node.id, d));
        }
    }
    best.map(|(id, _)| id.clone())
}
