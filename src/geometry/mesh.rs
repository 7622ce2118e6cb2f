// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Mesh representation and utilities
//!
//! Analyzers are written once against [`MeshHandle`]: indexed vertex
//! positions plus per-face vertex index lists. Each loader backend only has
//! to provide that contract.

use super::BoundingBox;
use crate::error::{MeshError, Result};
use nalgebra::Point3;
use serde::{Deserialize, Serialize};

/// Read-only view of a loaded surface mesh.
pub trait MeshHandle {
    /// Number of vertices; vertex IDs are `0..vertex_count()`.
    fn vertex_count(&self) -> usize;

    /// Position of vertex `v`.
    fn position(&self, v: usize) -> Point3<f64>;

    /// Number of faces.
    fn face_count(&self) -> usize;

    /// Vertex indices of face `f`, in stored (winding) order.
    fn face(&self, f: usize) -> &[usize];

    /// Face `f` as a triangle, or `MalformedMesh` if it is not one.
    fn triangle(&self, f: usize) -> Result<[usize; 3]> {
        match *self.face(f) {
            [a, b, c] => Ok([a, b, c]),
            ref other => Err(MeshError::MalformedMesh {
                face: f,
                arity: other.len(),
            }),
        }
    }

    /// Positions of the three corners of triangle `f`.
    fn triangle_points(&self, f: usize) -> Result<[Point3<f64>; 3]> {
        let [a, b, c] = self.triangle(f)?;
        Ok([self.position(a), self.position(b), self.position(c)])
    }

    fn is_triangle_mesh(&self) -> bool {
        (0..self.face_count()).all(|f| self.face(f).len() == 3)
    }

    fn bounding_box(&self) -> BoundingBox {
        let mut bbox = BoundingBox::empty();
        for v in 0..self.vertex_count() {
            bbox.expand_to_include(&self.position(v));
        }
        bbox
    }

    fn is_empty(&self) -> bool {
        self.vertex_count() == 0
    }
}

/// Triangle-only indexed mesh
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TriMesh {
    pub positions: Vec<Point3<f64>>,
    pub triangles: Vec<[usize; 3]>,
}

impl TriMesh {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(vertex_count: usize, triangle_count: usize) -> Self {
        Self {
            positions: Vec::with_capacity(vertex_count),
            triangles: Vec::with_capacity(triangle_count),
        }
    }

    /// Build a mesh, validating every face index.
    pub fn from_parts(positions: Vec<Point3<f64>>, triangles: Vec<[usize; 3]>) -> Result<Self> {
        validate_indices(positions.len(), triangles.iter().map(|t| &t[..]))?;
        Ok(Self {
            positions,
            triangles,
        })
    }

    /// Add a vertex and return its index
    pub fn add_vertex(&mut self, position: Point3<f64>) -> usize {
        let index = self.positions.len();
        self.positions.push(position);
        index
    }

    pub fn add_triangle(&mut self, indices: [usize; 3]) {
        self.triangles.push(indices);
    }

    /// Append another mesh, offsetting its indices.
    pub fn merge(&mut self, other: &TriMesh) {
        let offset = self.positions.len();
        self.positions.extend_from_slice(&other.positions);
        self.triangles.extend(
            other
                .triangles
                .iter()
                .map(|t| [t[0] + offset, t[1] + offset, t[2] + offset]),
        );
    }

    pub fn translate(&mut self, x: f64, y: f64, z: f64) {
        for p in &mut self.positions {
            p.x += x;
            p.y += y;
            p.z += z;
        }
    }

    pub fn scale(&mut self, factor: f64) {
        for p in &mut self.positions {
            p.coords *= factor;
        }
    }
}

impl MeshHandle for TriMesh {
    fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    fn position(&self, v: usize) -> Point3<f64> {
        self.positions[v]
    }

    fn face_count(&self) -> usize {
        self.triangles.len()
    }

    fn face(&self, f: usize) -> &[usize] {
        &self.triangles[f]
    }

    fn is_triangle_mesh(&self) -> bool {
        true
    }
}

/// Polygon mesh with a flat index buffer; faces may have any arity.
#[derive(Debug, Clone)]
pub struct PolyMesh {
    positions: Vec<Point3<f64>>,
    indices: Vec<usize>,
    /// `offsets[f]..offsets[f + 1]` slices `indices` for face `f`
    offsets: Vec<usize>,
}

impl PolyMesh {
    pub fn from_parts<F>(positions: Vec<Point3<f64>>, faces: F) -> Result<Self>
    where
        F: IntoIterator,
        F::Item: AsRef<[usize]>,
    {
        let mut mesh = Self {
            positions,
            indices: Vec::new(),
            offsets: vec![0],
        };
        for face in faces {
            mesh.push_face(face.as_ref());
        }
        validate_indices(mesh.positions.len(), (0..mesh.face_count()).map(|f| mesh.face(f)))?;
        Ok(mesh)
    }

    fn push_face(&mut self, face: &[usize]) {
        self.indices.extend_from_slice(face);
        self.offsets.push(self.indices.len());
    }

    /// Convert to a [`TriMesh`]; fails on the first non-triangular face.
    pub fn into_tri_mesh(self) -> Result<TriMesh> {
        let triangles = (0..self.face_count())
            .map(|f| self.triangle(f))
            .collect::<Result<Vec<_>>>()?;
        Ok(TriMesh {
            positions: self.positions,
            triangles,
        })
    }
}

impl MeshHandle for PolyMesh {
    fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    fn position(&self, v: usize) -> Point3<f64> {
        self.positions[v]
    }

    fn face_count(&self) -> usize {
        self.offsets.len() - 1
    }

    fn face(&self, f: usize) -> &[usize] {
        &self.indices[self.offsets[f]..self.offsets[f + 1]]
    }
}

fn validate_indices<'a>(
    vertex_count: usize,
    faces: impl Iterator<Item = &'a [usize]>,
) -> Result<()> {
    for (face, indices) in faces.enumerate() {
        if let Some(&vertex) = indices.iter().find(|&&v| v >= vertex_count) {
            return Err(MeshError::InvalidVertexIndex {
                face,
                vertex,
                vertex_count,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quad_and_triangle() -> PolyMesh {
        let positions = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
        ];
        PolyMesh::from_parts(positions, vec![vec![0, 1, 2, 3], vec![1, 4, 2]]).unwrap()
    }

    #[test]
    fn test_poly_mesh_faces() {
        let mesh = quad_and_triangle();
        assert_eq!(mesh.face_count(), 2);
        assert_eq!(mesh.face(0), &[0, 1, 2, 3]);
        assert_eq!(mesh.face(1), &[1, 4, 2]);
        assert!(!mesh.is_triangle_mesh());
    }

    #[test]
    fn test_triangle_rejects_quad() {
        let mesh = quad_and_triangle();
        assert!(matches!(
            mesh.triangle(0),
            Err(MeshError::MalformedMesh { face: 0, arity: 4 })
        ));
        assert_eq!(mesh.triangle(1).unwrap(), [1, 4, 2]);
        assert!(mesh.into_tri_mesh().is_err());
    }

    #[test]
    fn test_out_of_range_index_rejected() {
        let positions = vec![Point3::origin(), Point3::new(1.0, 0.0, 0.0)];
        let result = TriMesh::from_parts(positions, vec![[0, 1, 2]]);
        assert!(matches!(
            result,
            Err(MeshError::InvalidVertexIndex { vertex: 2, .. })
        ));
    }

    #[test]
    fn test_merge_offsets_indices() {
        let mut a = TriMesh::new();
        a.add_vertex(Point3::origin());
        a.add_vertex(Point3::new(1.0, 0.0, 0.0));
        a.add_vertex(Point3::new(0.0, 1.0, 0.0));
        a.add_triangle([0, 1, 2]);

        let b = a.clone();
        a.merge(&b);

        assert_eq!(a.vertex_count(), 6);
        assert_eq!(a.triangles[1], [3, 4, 5]);
    }
}
