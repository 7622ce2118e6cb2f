// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Geometry module - mesh representation, spatial acceleration and exact predicates

mod bbox;
pub mod bvh;
mod mesh;
mod primitives;
pub mod robust_predicates;
pub mod triangle_intersection;

pub use bbox::BoundingBox;
pub use bvh::BVH;
pub use mesh::{MeshHandle, PolyMesh, TriMesh};
pub use primitives::Primitive;
pub use robust_predicates::{orient2d, orient3d, Orientation};
pub use triangle_intersection::{triangles_intersect, Triangle3};
