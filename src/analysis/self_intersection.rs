// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Self-intersection detection
//!
//! Broad phase: a BVH over per-face bounding boxes. Narrow phase: exact
//! triangle tests. Faces that share vertices (by index) are expected to
//! touch, so they only count when they overlap beyond what the shared
//! vertices or edge imply:
//! - three shared vertices: duplicate face, always intersecting
//! - shared edge: the two faces fold onto each other (coplanar, same side)
//! - shared vertex: the edge opposite the shared vertex of either face meets
//!   the other face
//!
//! Zero-area faces are ignored. Coordinates are rescaled by a power of two
//! before testing so results do not depend on the mesh's absolute scale.

use crate::error::Result;
use crate::geometry::triangle_intersection::{
    is_degenerate, same_side_coplanar, segment_intersects_triangle,
};
use crate::geometry::{orient3d, triangles_intersect, BoundingBox, MeshHandle, Triangle3, BVH};
use log::debug;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelfIntersectionReport {
    /// Distinct faces in at least one intersecting pair
    pub intersecting_faces: usize,
    pub total_faces: usize,
    pub intersecting_pairs: usize,
    /// Zero-area faces excluded from testing
    pub degenerate_faces: usize,
}

/// Count faces involved in self-intersections. Fails on non-triangular faces.
pub fn detect_self_intersections<M: MeshHandle + ?Sized>(mesh: &M) -> Result<SelfIntersectionReport> {
    let (faces, points) = normalized_triangles(mesh)?;
    let pairs = pairs_of(&faces, &points);

    let mut involved = vec![false; faces.len()];
    for &(i, j) in &pairs {
        involved[i] = true;
        involved[j] = true;
    }

    Ok(SelfIntersectionReport {
        intersecting_faces: involved.iter().filter(|&&hit| hit).count(),
        total_faces: faces.len(),
        intersecting_pairs: pairs.len(),
        degenerate_faces: points.iter().filter(|t| is_degenerate(t)).count(),
    })
}

/// All intersecting face pairs `(i, j)` with `i < j`, sorted.
pub fn intersecting_pairs<M: MeshHandle + ?Sized>(mesh: &M) -> Result<Vec<(usize, usize)>> {
    let (faces, points) = normalized_triangles(mesh)?;
    Ok(pairs_of(&faces, &points))
}

/// Face indices and corner positions, scaled by a power of two so the
/// largest coordinate magnitude is close to 1.
///
/// Power-of-two scaling is exact and keeps every predicate sign, while
/// moving tiny or huge meshes into the range where the predicates'
/// products neither underflow nor overflow.
fn normalized_triangles<M: MeshHandle + ?Sized>(
    mesh: &M,
) -> Result<(Vec<[usize; 3]>, Vec<Triangle3>)> {
    let face_count = mesh.face_count();
    let mut faces = Vec::with_capacity(face_count);
    let mut points: Vec<Triangle3> = Vec::with_capacity(face_count);
    for f in 0..face_count {
        faces.push(mesh.triangle(f)?);
        points.push(mesh.triangle_points(f)?);
    }

    let factor = power_of_two_scale(points.iter().flatten().map(|p| p.coords.amax()));
    if factor != 1.0 {
        debug!("rescaling coordinates by {:e} for exact predicates", factor);
        for p in points.iter_mut().flatten() {
            p.coords *= factor;
        }
    }
    Ok((faces, points))
}

/// `2^-e` where `2^e <= max magnitude < 2^(e+1)`; 1 when there is nothing
/// finite and non-zero to scale.
fn power_of_two_scale(magnitudes: impl Iterator<Item = f64>) -> f64 {
    let max = magnitudes.filter(|m| m.is_finite()).fold(0.0_f64, f64::max);
    if max == 0.0 {
        return 1.0;
    }
    // Keep the factor itself a normal, finite power of two
    let exponent = (max.log2().floor() as i32).clamp(-1000, 1000);
    2.0_f64.powi(-exponent)
}

fn pairs_of(faces: &[[usize; 3]], points: &[Triangle3]) -> Vec<(usize, usize)> {
    let boxes: Vec<BoundingBox> = points.iter().map(|t| BoundingBox::from_points(t.iter())).collect();
    let candidates: Vec<usize> = (0..faces.len()).filter(|&f| !is_degenerate(&points[f])).collect();
    let bvh = BVH::build(candidates.iter().map(|&f| (f, boxes[f])).collect());

    let mut pairs = Vec::new();
    let mut nearby = Vec::new();
    for &i in &candidates {
        nearby.clear();
        bvh.query_with(&boxes[i], |j| {
            if j > i {
                nearby.push(j);
            }
        });
        nearby.sort_unstable();

        for &j in &nearby {
            if faces_intersect(&faces[i], &points[i], &faces[j], &points[j]) {
                pairs.push((i, j));
            }
        }
    }
    pairs
}

fn faces_intersect(fi: &[usize; 3], pi: &Triangle3, fj: &[usize; 3], pj: &Triangle3) -> bool {
    // Corner slots of fi that also appear in fj, with their slot in fj
    let shared: Vec<(usize, usize)> = (0..3)
        .filter_map(|a| fj.iter().position(|&v| v == fi[a]).map(|b| (a, b)))
        .collect();

    match shared.len() {
        0 => triangles_intersect(pi, pj),
        1 => {
            let (a, b) = shared[0];
            let (i1, i2) = opposite(a);
            let (j1, j2) = opposite(b);
            segment_intersects_triangle(&pj[j1], &pj[j2], pi)
                || segment_intersects_triangle(&pi[i1], &pi[i2], pj)
        }
        2 => {
            let (u, v) = (pi[shared[0].0], pi[shared[1].0]);
            let p = pi[third(shared[0].0, shared[1].0)];
            let q = pj[third(shared[0].1, shared[1].1)];
            orient3d(&u, &v, &p, &q).is_zero() && same_side_coplanar(&u, &v, &p, &q)
        }
        _ => true,
    }
}

/// The two corner slots other than `slot`
fn opposite(slot: usize) -> (usize, usize) {
    ((slot + 1) % 3, (slot + 2) % 3)
}

/// The corner slot that is neither `a` nor `b`
fn third(a: usize, b: usize) -> usize {
    3 - a - b
}
