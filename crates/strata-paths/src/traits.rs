use strata_core::Vec3;

/// Navigation data the pathfinder reads from a node payload.
///
/// Only [`position`](Self::position) is required; a payload without one
/// still routes, but contributes no heuristic guidance and resolves to the
/// origin in a [`PathResult`](crate::PathResult).
pub trait NodePayload {
    /// World-space position of the node, if it has one.
    fn position(&self) -> Option<Vec3>;

    /// Whether agents may stand on this node.
    fn walkable(&self) -> bool {
        true
    }

    /// Multiplier applied to the weight of every edge entering this node.
    /// Must be > 0.
    fn cost(&self) -> f64 {
        1.0
    }
}

impl NodePayload for () {
    fn position(&self) -> Option<Vec3> {
        None
    }
}

impl NodePayload for Vec3 {
    fn position(&self) -> Option<Vec3> {
        Some(*self)
    }
}

/// A single convex walkable polygon of a navmesh.
pub trait NavRegion {
    /// Boundary vertices in winding order.
    fn vertices(&self) -> &[Vec3];
}

/// Anything that can enumerate navmesh regions.
///
/// Regions are identified by their index in [`regions`](Self::regions), so
/// implementations must return them in a stable order.
pub trait NavMeshSource {
    type Region: NavRegion;

    fn regions(&self) -> &[Self::Region];
}
