//! **strata-core** — shared types for the strata navigation crates.
//!
//! This crate provides the geometry primitives used across the *strata*
//! pathfinding stack: world-space positions and bounding boxes.

pub mod geom;

pub use geom::{Aabb, Vec3};
