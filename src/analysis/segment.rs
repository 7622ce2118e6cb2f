// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Connected-component segmentation over the vertex adjacency graph

use crate::geometry::MeshHandle;
use std::collections::VecDeque;

/// Neighbour lists indexed by vertex, built from the cyclic edges of every
/// face. Both directions are inserted and duplicates are kept; collapsed
/// edges are skipped.
pub fn build_adjacency<M: MeshHandle + ?Sized>(mesh: &M) -> Vec<Vec<usize>> {
    let mut adjacency = vec![Vec::new(); mesh.vertex_count()];
    for f in 0..mesh.face_count() {
        let face = mesh.face(f);
        for (i, &from) in face.iter().enumerate() {
            let to = face[(i + 1) % face.len()];
            if from == to {
                continue;
            }
            adjacency[from].push(to);
            adjacency[to].push(from);
        }
    }
    adjacency
}

/// Component label per vertex plus the component count.
///
/// Every vertex index is a seed, so unreferenced vertices form their own
/// components. Labels follow seed order: component 0 contains vertex 0.
pub fn label_components<M: MeshHandle + ?Sized>(mesh: &M) -> (usize, Vec<usize>) {
    let adjacency = build_adjacency(mesh);
    let mut labels = vec![usize::MAX; adjacency.len()];
    let mut queue = VecDeque::new();
    let mut count = 0;

    for seed in 0..adjacency.len() {
        if labels[seed] != usize::MAX {
            continue;
        }
        labels[seed] = count;
        queue.push_back(seed);
        while let Some(v) = queue.pop_front() {
            for &n in &adjacency[v] {
                if labels[n] == usize::MAX {
                    labels[n] = count;
                    queue.push_back(n);
                }
            }
        }
        count += 1;
    }

    (count, labels)
}

/// Number of connected components; 0 only for a mesh without vertices.
pub fn count_components<M: MeshHandle + ?Sized>(mesh: &M) -> usize {
    label_components(mesh).0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{PolyMesh, Primitive, TriMesh};
    use nalgebra::{Point3, Vector3};

    #[test]
    fn test_single_component() {
        let mesh = Primitive::sphere(1.0, 12).to_mesh();
        assert_eq!(count_components(&mesh), 1);
    }

    #[test]
    fn test_two_cubes() {
        let mut mesh = Primitive::cube(Vector3::new(1.0, 1.0, 1.0), false).to_mesh();
        let mut other = mesh.clone();
        other.translate(5.0, 0.0, 0.0);
        mesh.merge(&other);

        let (count, labels) = label_components(&mesh);
        assert_eq!(count, 2);
        assert!(labels[..8].iter().all(|&l| l == 0));
        assert!(labels[8..].iter().all(|&l| l == 1));
    }

    #[test]
    fn test_isolated_vertices_count() {
        let mut mesh = Primitive::tetrahedron(1.0).to_mesh();
        mesh.add_vertex(Point3::new(9.0, 9.0, 9.0));
        mesh.add_vertex(Point3::new(-9.0, 9.0, 9.0));
        assert_eq!(count_components(&mesh), 3);
    }

    #[test]
    fn test_collapsed_face_has_no_self_loops() {
        let mut mesh = Primitive::tetrahedron(1.0).to_mesh();
        mesh.add_triangle([2, 2, 3]);
        let adjacency = build_adjacency(&mesh);

        for (v, neighbours) in adjacency.iter().enumerate() {
            assert!(!neighbours.contains(&v));
        }
        assert_eq!(count_components(&mesh), 1);
    }

    #[test]
    fn test_empty_mesh() {
        assert_eq!(count_components(&TriMesh::new()), 0);
    }

    #[test]
    fn test_polygon_faces_connect() {
        let positions = vec![
            Point3::origin(),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ];
        let mesh = PolyMesh::from_parts(positions, vec![vec![0, 1, 2, 3]]).unwrap();
        assert_eq!(count_components(&mesh), 1);
    }
}
