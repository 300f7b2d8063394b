//! Square-lattice graphs.

use std::f64::consts::SQRT_2;

use strata_core::Vec3;

use crate::graph::{Graph, NodeData};

/// Options for [`create_grid_graph`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct GridOptions {
    /// Also connect each cell to its four diagonal neighbours.
    pub allow_diagonals: bool,
    /// Height every node is placed at.
    pub y: f64,
}

/// Id of the grid node at column `col`, row `row`: `"{col}_{row}"`.
pub fn grid_node_id(col: usize, row: usize) -> String {
    format!("{col}_{row}")
}

/// Inverse of [`grid_node_id`].
pub fn parse_grid_node_id(id: &str) -> Option<(usize, usize)> {
    let (col, row) = id.split_once('_')?;
    Some((col.parse().ok()?, row.parse().ok()?))
}

/// Build a `width × height` lattice of walkable nodes spaced `cell_size`
/// apart on the XZ plane.
///
/// Node `(col, row)` sits at `(col * cell_size, y, row * cell_size)`.
/// Orthogonal neighbours are joined in both directions with weight
/// `cell_size`, diagonal ones (when enabled) with `√2 × cell_size`.
/// A zero width or height gives an empty graph.
pub fn create_grid_graph(
    width: usize,
    height: usize,
    cell_size: f64,
    options: GridOptions,
) -> Graph<String> {
    let mut graph = Graph::with_capacity(width * height);
    if width == 0 || height == 0 {
        return graph;
    }

    for row in 0..height {
        for col in 0..width {
            let pos = Vec3::new(col as f64 * cell_size, options.y, row as f64 * cell_size);
            graph.add_node(grid_node_id(col, row), NodeData::at(pos));
        }
    }

    let diagonal = SQRT_2 * cell_size;
    for row in 0..height {
        for col in 0..width {
            if col + 1 < width {
                link(&mut graph, (col, row), (col + 1, row), cell_size);
            }
            if row + 1 < height {
                link(&mut graph, (col, row), (col, row + 1), cell_size);
            }
            if options.allow_diagonals && row + 1 < height {
                if col + 1 < width {
                    link(&mut graph, (col, row), (col + 1, row + 1), diagonal);
                }
                if col > 0 {
                    link(&mut graph, (col, row), (col - 1, row + 1), diagonal);
                }
            }
        }
    }

    log::debug!(
        "built {width}x{height} grid graph: {} nodes, {} edges",
        graph.node_count(),
        graph.edge_count()
    );
    graph
}

fn link(graph: &mut Graph<String>, a: (usize, usize), b: (usize, usize), weight: f64) {
    let linked = graph.add_bidirectional_edge(
        grid_node_id(a.0, a.1).as_str(),
        grid_node_id(b.0, b.1).as_str(),
        Some(weight),
    );
    debug_assert!(linked.is_ok(), "grid cells are added before they are linked");
}
