//! Navigation graphs and shortest-path search for agents moving through 3D
//! worlds.
//!
//! This crate provides:
//!
//! - a directed, weighted [`Graph`] with arena storage and stable slot
//!   indices
//! - builders from a square lattice ([`create_grid_graph`]) and from a
//!   navmesh of convex regions ([`from_nav_mesh`])
//! - a [`Pathfinder`] running **NBA\*** (bidirectional), **A\***, greedy
//!   best-first and **Dijkstra** searches, plus multi-source distance maps
//!   ([`Pathfinder::dijkstra_map`]) and flood fills
//!   ([`Pathfinder::reachable`])
//! - polyline post-processing: [`simplify_path`] (Douglas–Peucker) and
//!   [`smooth_path`] (Chaikin), [`calculate_distance`] and
//!   [`find_closest_node`] for re-routing
//!
//! [`Pathfinder`] owns and reuses its search buffers, so repeated queries
//! allocate only when the graph grows. It borrows the graph per query
//! rather than holding it; [`create_pathfinder`] binds the two when that is
//! more convenient.
//!
//! # Trait hierarchy
//!
//! | Trait | Required for |
//! |---|---|
//! | [`NodePayload`] | searching a graph with custom node data |
//! | [`NavRegion`] | a single navmesh polygon |
//! | [`NavMeshSource`] | [`from_nav_mesh`] |

mod astar;
mod dijkstra;
mod distance;
mod error;
mod graph;
mod grid;
mod navmesh;
mod nba;
mod nearest;
mod pathfinder;
mod reach;
mod simplify;
mod smooth;
mod traits;

pub use distance::{calculate_distance, path_length};
pub use error::{GraphError, NavMeshError};
pub use graph::{DEFAULT_EDGE_WEIGHT, EdgeRef, Edges, Graph, NodeData, NodeId, NodeRef};
pub use grid::{GridOptions, create_grid_graph, grid_node_id, parse_grid_node_id};
pub use navmesh::{NavMeshOptions, Region, from_nav_mesh};
pub use nearest::{find_closest_node, find_closest_node_by};
pub use pathfinder::{
    GraphPathfinder, PathNode, PathResult, Pathfinder, PathfinderConfig, SearchAlgorithm,
    create_pathfinder,
};
pub use simplify::{SimplifyOptions, simplify_path};
pub use smooth::{MAX_SMOOTH_ITERATIONS, SmoothOptions, smooth_path};
pub use strata_core::{Aabb, Vec3};
pub use traits::{NavMeshSource, NavRegion, NodePayload};
