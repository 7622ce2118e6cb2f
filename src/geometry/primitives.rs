// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Closed, consistently oriented reference meshes
//!
//! Vertices are shared between faces so the meshes are manifold as indexed
//! data, not triangle soup. Every face winds counter-clockwise seen from
//! outside.

use super::TriMesh;
use nalgebra::{Point3, Vector3};
use std::f64::consts::PI;

/// Geometric primitives
pub enum Primitive {
    Tetrahedron { r: f64 },
    Cube { size: Vector3<f64>, center: bool },
    Sphere { r: f64, segments: u32 },
}

impl Primitive {
    /// Regular tetrahedron inscribed in the cube `[-r, r]^3`
    pub fn tetrahedron(r: f64) -> Self {
        Self::Tetrahedron { r }
    }

    pub fn cube(size: Vector3<f64>, center: bool) -> Self {
        Self::Cube { size, center }
    }

    pub fn sphere(r: f64, segments: u32) -> Self {
        Self::Sphere {
            r,
            segments: segments.max(4),
        }
    }

    pub fn to_mesh(&self) -> TriMesh {
        match self {
            Self::Tetrahedron { r } => generate_tetrahedron_mesh(*r),
            Self::Cube { size, center } => generate_cube_mesh(*size, *center),
            Self::Sphere { r, segments } => generate_sphere_mesh(*r, *segments),
        }
    }
}

fn generate_tetrahedron_mesh(r: f64) -> TriMesh {
    let mut mesh = TriMesh::with_capacity(4, 4);
    mesh.add_vertex(Point3::new(r, r, r));
    mesh.add_vertex(Point3::new(r, -r, -r));
    mesh.add_vertex(Point3::new(-r, r, -r));
    mesh.add_vertex(Point3::new(-r, -r, r));

    for face in [[0, 1, 2], [0, 3, 1], [0, 2, 3], [1, 3, 2]] {
        mesh.add_triangle(face);
    }
    mesh
}

fn generate_cube_mesh(size: Vector3<f64>, center: bool) -> TriMesh {
    let (min, max) = if center {
        (-size / 2.0, size / 2.0)
    } else {
        (Vector3::zeros(), size)
    };

    let mut mesh = TriMesh::with_capacity(8, 12);
    for (x, y, z) in [
        (min.x, min.y, min.z),
        (max.x, min.y, min.z),
        (max.x, max.y, min.z),
        (min.x, max.y, min.z),
        (min.x, min.y, max.z),
        (max.x, min.y, max.z),
        (max.x, max.y, max.z),
        (min.x, max.y, max.z),
    ] {
        mesh.add_vertex(Point3::new(x, y, z));
    }

    for face in [
        // Front (z+)
        [4, 5, 6],
        [4, 6, 7],
        // Back (z-)
        [1, 0, 3],
        [1, 3, 2],
        // Right (x+)
        [5, 1, 2],
        [5, 2, 6],
        // Left (x-)
        [0, 4, 7],
        [0, 7, 3],
        // Top (y+)
        [7, 6, 2],
        [7, 2, 3],
        // Bottom (y-)
        [0, 1, 5],
        [0, 5, 4],
    ] {
        mesh.add_triangle(face);
    }
    mesh
}

/// UV sphere: `segments` slices around z and `segments / 2` stacks.
fn generate_sphere_mesh(r: f64, segments: u32) -> TriMesh {
    let slices = segments as usize;
    let stacks = (slices / 2).max(2);
    let mut mesh = TriMesh::with_capacity(2 + (stacks - 1) * slices, 2 * slices * (stacks - 1));

    let north = mesh.add_vertex(Point3::new(0.0, 0.0, r));
    for i in 1..stacks {
        let theta = PI * i as f64 / stacks as f64;
        let (ring_radius, z) = (r * theta.sin(), r * theta.cos());
        for j in 0..slices {
            let phi = 2.0 * PI * j as f64 / slices as f64;
            mesh.add_vertex(Point3::new(ring_radius * phi.cos(), ring_radius * phi.sin(), z));
        }
    }
    let south = mesh.add_vertex(Point3::new(0.0, 0.0, -r));

    let ring = |i: usize, j: usize| 1 + (i - 1) * slices + (j % slices);

    for j in 0..slices {
        mesh.add_triangle([north, ring(1, j), ring(1, j + 1)]);
    }
    for i in 1..stacks - 1 {
        for j in 0..slices {
            let (a, b) = (ring(i, j), ring(i, j + 1));
            let (c, d) = (ring(i + 1, j), ring(i + 1, j + 1));
            mesh.add_triangle([a, c, d]);
            mesh.add_triangle([a, d, b]);
        }
    }
    for j in 0..slices {
        mesh.add_triangle([ring(stacks - 1, j), south, ring(stacks - 1, j + 1)]);
    }
    mesh
}
