//! Navmesh → graph conversion.
//!
//! Each convex region becomes one node at its vertex centroid, keyed by the
//! region's index. Two regions are linked (both directions, weighted by
//! centroid distance) when they share an edge, i.e. at least two vertices
//! coincide within `epsilon`.

use strata_core::{Aabb, Vec3};

use crate::error::NavMeshError;
use crate::graph::{Graph, NodeData};
use crate::traits::{NavMeshSource, NavRegion};

/// A convex walkable polygon given by its boundary vertices.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Region {
    pub vertices: Vec<Vec3>,
}

impl Region {
    pub fn new(vertices: impl Into<Vec<Vec3>>) -> Self {
        Self {
            vertices: vertices.into(),
        }
    }

    /// Mean of the vertices, or `None` for an empty region.
    pub fn centroid(&self) -> Option<Vec3> {
        centroid(&self.vertices)
    }
}

impl NavRegion for Region {
    fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }
}

impl<R: NavRegion> NavMeshSource for [R] {
    type Region = R;

    fn regions(&self) -> &[R] {
        self
    }
}

impl<R: NavRegion> NavMeshSource for Vec<R> {
    type Region = R;

    fn regions(&self) -> &[R] {
        self
    }
}

/// Options for [`from_nav_mesh`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct NavMeshOptions {
    /// Vertices closer than this are treated as the same vertex.
    pub epsilon: f64,
}

impl Default for NavMeshOptions {
    fn default() -> Self {
        Self { epsilon: 1e-4 }
    }
}

/// Build a navigation graph from a navmesh.
///
/// Returns an error if any region has fewer than three vertices or a
/// non-finite coordinate. An empty mesh gives an empty graph.
pub fn from_nav_mesh<M>(mesh: &M, options: NavMeshOptions) -> Result<Graph<usize>, NavMeshError>
where
    M: NavMeshSource + ?Sized,
{
    let regions = mesh.regions();
    let epsilon = options.epsilon.abs();
    let mut graph = Graph::with_capacity(regions.len());
    let mut bounds = Vec::with_capacity(regions.len());

    for (index, region) in regions.iter().enumerate() {
        let verts = region.vertices();
        if verts.len() < 3 {
            return Err(NavMeshError::DegenerateRegion {
                index,
                vertex_count: verts.len(),
            });
        }
        if let Some(vertex) = verts.iter().position(|v| !v.is_finite()) {
            return Err(NavMeshError::NonFiniteVertex { index, vertex });
        }
        let (Some(center), Some(aabb)) = (centroid(verts), Aabb::from_points(verts)) else {
            return Err(NavMeshError::DegenerateRegion {
                index,
                vertex_count: verts.len(),
            });
        };
        graph.add_node(index, NodeData::at(center));
        bounds.push(aabb.inflate(epsilon));
    }

    let mut links = 0usize;
    for i in 0..regions.len() {
        for j in i + 1..regions.len() {
            if !bounds[i].overlaps(bounds[j]) {
                continue;
            }
            if shared_vertices(regions[i].vertices(), regions[j].vertices(), epsilon) < 2 {
                continue;
            }
            let a = graph.get_node(&i).and_then(|n| n.data.position);
            let b = graph.get_node(&j).and_then(|n| n.data.position);
            let weight = match (a, b) {
                (Some(a), Some(b)) => a.distance(b),
                _ => continue,
            };
            graph.add_bidirectional_edge(&i, &j, Some(weight))?;
            links += 1;
        }
    }

    log::debug!("navmesh graph: {} regions, {links} links", regions.len());
    Ok(graph)
}

fn centroid(verts: &[Vec3]) -> Option<Vec3> {
    if verts.is_empty() {
        return None;
    }
    let sum = verts.iter().fold(Vec3::ZERO, |acc, &v| acc + v);
    Some(sum / verts.len() as f64)
}

/// Number of distinct vertices of `b` that coincide with some vertex of
/// `a`. Repeated or near-repeated corners count once.
fn shared_vertices(a: &[Vec3], b: &[Vec3], epsilon: f64) -> usize {
    let eps2 = epsilon * epsilon;
    let near = |p: Vec3, q: Vec3| p.distance_squared(q) <= eps2;
    let mut shared: Vec<Vec3> = Vec::new();
    for &vb in b {
        if a.iter().any(|&va| near(va, vb)) && !shared.iter().any(|&s| near(s, vb)) {
            shared.push(vb);
        }
    }
    shared.len()
}
