use thiserror::Error;

/// Errors raised when a graph operation references something that does not
/// exist.
///
/// Missing nodes on lookup or removal are *not* errors (those return
/// `None` / `false`); this is reserved for insertions that would otherwise
/// have to invent an endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    /// An edge endpoint has not been added with `add_node`.
    #[error("graph has no node {id}")]
    UnknownNode { id: String },
}

/// Errors that can occur when converting a navmesh into a graph.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavMeshError {
    /// A region has too few vertices to form a polygon.
    #[error("navmesh region {index} has {vertex_count} vertices, at least 3 are required")]
    DegenerateRegion { index: usize, vertex_count: usize },
    /// A region vertex has a NaN or infinite coordinate.
    #[error("navmesh region {index} has a non-finite coordinate at vertex {vertex}")]
    NonFiniteVertex { index: usize, vertex: usize },
    /// Linking regions failed inside the graph.
    #[error(transparent)]
    Graph(#[from] GraphError),
}
