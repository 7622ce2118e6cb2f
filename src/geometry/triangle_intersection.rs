// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Triangle-triangle intersection tests
//!
//! All tests treat triangles as closed point sets and decide using only the
//! signs of [`orient3d`] and [`orient2d`], so results are exact and
//! independent of argument order.

use super::robust_predicates::{orient2d, orient3d, Orientation};
use nalgebra::Point3;

/// Three corner positions
pub type Triangle3 = [Point3<f64>; 3];

/// Test if two closed, non-degenerate triangles share at least one point.
pub fn triangles_intersect(p: &Triangle3, q: &Triangle3) -> bool {
    let dp = [
        orient3d(&q[0], &q[1], &q[2], &p[0]),
        orient3d(&q[0], &q[1], &q[2], &p[1]),
        orient3d(&q[0], &q[1], &q[2], &p[2]),
    ];
    if strictly_one_side(&dp) {
        return false;
    }

    let dq = [
        orient3d(&p[0], &p[1], &p[2], &q[0]),
        orient3d(&p[0], &p[1], &p[2], &q[1]),
        orient3d(&p[0], &p[1], &p[2], &q[2]),
    ];
    if strictly_one_side(&dq) {
        return false;
    }

    if dp.iter().all(|o| o.is_zero()) {
        return coplanar_triangles_intersect(p, q);
    }

    // The intersection of two non-coplanar triangles is a segment on their
    // common line whose endpoints lie on the boundary of one of them.
    edges(p).any(|(a, b)| segment_intersects_triangle(a, b, q))
        || edges(q).any(|(a, b)| segment_intersects_triangle(a, b, p))
}

/// Test if the closed segment `a-b` meets the closed triangle `t`.
pub fn segment_intersects_triangle(a: &Point3<f64>, b: &Point3<f64>, t: &Triangle3) -> bool {
    let oa = orient3d(&t[0], &t[1], &t[2], a);
    let ob = orient3d(&t[0], &t[1], &t[2], b);

    if oa == ob && !oa.is_zero() {
        return false;
    }
    if oa.is_zero() && ob.is_zero() {
        return coplanar_segment_intersects_triangle(a, b, t);
    }

    // Segment reaches the plane; check the supporting line passes through t.
    let sides = [
        orient3d(a, b, &t[0], &t[1]),
        orient3d(a, b, &t[1], &t[2]),
        orient3d(a, b, &t[2], &t[0]),
    ];
    !mixed_signs(&sides)
}

/// True when the three corners are collinear (zero area).
pub fn is_degenerate(t: &Triangle3) -> bool {
    projection_axis(t).is_none()
}

/// True if `p` and `q` lie strictly on the same side of the line `a-b`
/// within the plane of triangle `(a, b, p)`. Requires all four coplanar.
pub fn same_side_coplanar(
    a: &Point3<f64>,
    b: &Point3<f64>,
    p: &Point3<f64>,
    q: &Point3<f64>,
) -> bool {
    let Some(axis) = projection_axis(&[*a, *b, *p]) else {
        return false;
    };
    let (a2, b2) = (project(a, axis), project(b, axis));
    let sp = orient2d(a2, b2, project(p, axis));
    let sq = orient2d(a2, b2, project(q, axis));
    sp == sq && !sp.is_zero()
}

fn coplanar_triangles_intersect(p: &Triangle3, q: &Triangle3) -> bool {
    let Some(axis) = projection_axis(q).or_else(|| projection_axis(p)) else {
        return false;
    };
    let p2 = p.map(|v| project(&v, axis));
    let q2 = q.map(|v| project(&v, axis));

    for i in 0..3 {
        for j in 0..3 {
            if segments_intersect_2d(p2[i], p2[(i + 1) % 3], q2[j], q2[(j + 1) % 3]) {
                return true;
            }
        }
    }

    // No boundary crossings: either one contains the other or they are apart.
    point_in_triangle_2d(p2[0], &q2) || point_in_triangle_2d(q2[0], &p2)
}

fn coplanar_segment_intersects_triangle(a: &Point3<f64>, b: &Point3<f64>, t: &Triangle3) -> bool {
    let Some(axis) = projection_axis(t) else {
        return false;
    };
    let t2 = t.map(|v| project(&v, axis));
    let (a2, b2) = (project(a, axis), project(b, axis));

    point_in_triangle_2d(a2, &t2)
        || point_in_triangle_2d(b2, &t2)
        || (0..3).any(|i| segments_intersect_2d(a2, b2, t2[i], t2[(i + 1) % 3]))
}

/// Coordinate to drop so the triangle projects without collapsing.
fn projection_axis(t: &Triangle3) -> Option<usize> {
    let normal = (t[1] - t[0]).cross(&(t[2] - t[0]));
    let mut axes = [0usize, 1, 2];
    axes.sort_by(|&i, &j| normal[j].abs().total_cmp(&normal[i].abs()));

    // The float normal only ranks candidates; the exact check decides.
    axes.into_iter().find(|&axis| {
        let [a, b, c] = t.map(|v| project(&v, axis));
        !orient2d(a, b, c).is_zero()
    })
}

fn project(p: &Point3<f64>, drop_axis: usize) -> [f64; 2] {
    match drop_axis {
        0 => [p.y, p.z],
        1 => [p.x, p.z],
        _ => [p.x, p.y],
    }
}

fn point_in_triangle_2d(p: [f64; 2], t: &[[f64; 2]; 3]) -> bool {
    let sides = [
        orient2d(t[0], t[1], p),
        orient2d(t[1], t[2], p),
        orient2d(t[2], t[0], p),
    ];
    !mixed_signs(&sides)
}

fn segments_intersect_2d(p1: [f64; 2], p2: [f64; 2], q1: [f64; 2], q2: [f64; 2]) -> bool {
    let d1 = orient2d(q1, q2, p1);
    let d2 = orient2d(q1, q2, p2);
    let d3 = orient2d(p1, p2, q1);
    let d4 = orient2d(p1, p2, q2);

    if d1.opposes(d2) && d3.opposes(d4) {
        return true;
    }

    (d1.is_zero() && within_box(q1, q2, p1))
        || (d2.is_zero() && within_box(q1, q2, p2))
        || (d3.is_zero() && within_box(p1, p2, q1))
        || (d4.is_zero() && within_box(p1, p2, q2))
}

/// For a point collinear with `a-b`, whether it lies on the segment.
fn within_box(a: [f64; 2], b: [f64; 2], p: [f64; 2]) -> bool {
    p[0] >= a[0].min(b[0]) && p[0] <= a[0].max(b[0]) && p[1] >= a[1].min(b[1]) && p[1] <= a[1].max(b[1])
}

fn edges(t: &Triangle3) -> impl Iterator<Item = (&Point3<f64>, &Point3<f64>)> {
    (0..3).map(move |i| (&t[i], &t[(i + 1) % 3]))
}

fn strictly_one_side(signs: &[Orientation; 3]) -> bool {
    !signs[0].is_zero() && signs[0] == signs[1] && signs[1] == signs[2]
}

fn mixed_signs(signs: &[Orientation; 3]) -> bool {
    signs.contains(&Orientation::Positive) && signs.contains(&Orientation::Negative)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tri(a: [f64; 3], b: [f64; 3], c: [f64; 3]) -> Triangle3 {
        [
            Point3::new(a[0], a[1], a[2]),
            Point3::new(b[0], b[1], b[2]),
            Point3::new(c[0], c[1], c[2]),
        ]
    }

    #[test]
    fn test_triangle_intersection_disjoint() {
        let a = tri([0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]);
        let b = tri([2.0, 0.0, 0.0], [3.0, 0.0, 0.0], [2.0, 1.0, 0.0]);
        assert!(!triangles_intersect(&a, &b));
    }

    #[test]
    fn test_coplanar_overlap() {
        let a = tri([0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]);
        let b = tri([0.5, 0.0, 0.0], [1.5, 0.0, 0.0], [0.5, 1.0, 0.0]);
        assert!(triangles_intersect(&a, &b));
        assert!(triangles_intersect(&b, &a));
    }

    #[test]
    fn test_coplanar_containment() {
        let outer = tri([0.0, 0.0, 0.0], [10.0, 0.0, 0.0], [0.0, 10.0, 0.0]);
        let inner = tri([1.0, 1.0, 0.0], [2.0, 1.0, 0.0], [1.0, 2.0, 0.0]);
        assert!(triangles_intersect(&outer, &inner));
        assert!(triangles_intersect(&inner, &outer));
    }

    #[test]
    fn test_piercing_triangles() {
        let a = tri([0.0, 0.0, 0.0], [2.0, 0.0, 0.0], [0.0, 2.0, 0.0]);
        let b = tri([0.5, 0.5, -1.0], [0.5, 0.5, 1.0], [1.5, 0.2, 0.0]);
        assert!(triangles_intersect(&a, &b));
    }

    #[test]
    fn test_parallel_planes_do_not_intersect() {
        let a = tri([0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]);
        let b = tri([0.0, 0.0, 1e-12], [1.0, 0.0, 1e-12], [0.0, 1.0, 1e-12]);
        assert!(!triangles_intersect(&a, &b));
    }

    #[test]
    fn test_touching_at_vertex() {
        let a = tri([0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]);
        let b = tri([1.0, 0.0, 0.0], [2.0, 0.0, 1.0], [2.0, 1.0, 1.0]);
        assert!(triangles_intersect(&a, &b));
    }

    #[test]
    fn test_near_miss_above_plane() {
        let a = tri([0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]);
        let b = tri([0.2, 0.2, 1e-300], [0.4, 0.2, 1.0], [0.2, 0.4, 1.0]);
        assert!(!triangles_intersect(&a, &b));
    }

    #[test]
    fn test_segment_through_triangle() {
        let t = tri([0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]);
        let above = Point3::new(0.25, 0.25, 1.0);
        let below = Point3::new(0.25, 0.25, -1.0);
        let outside = Point3::new(2.0, 2.0, -1.0);

        assert!(segment_intersects_triangle(&above, &below, &t));
        assert!(!segment_intersects_triangle(&above, &outside, &t));
    }

    #[test]
    fn test_degenerate_detection() {
        let collinear = tri([0.0, 0.0, 0.0], [1.0, 1.0, 1.0], [2.0, 2.0, 2.0]);
        let proper = tri([0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]);
        assert!(is_degenerate(&collinear));
        assert!(!is_degenerate(&proper));
    }

    #[test]
    fn test_same_side_coplanar() {
        let a = Point3::new(0.0, 0.0, 0.0);
        let b = Point3::new(1.0, 0.0, 0.0);
        let p = Point3::new(0.5, 1.0, 0.0);
        let q_same = Point3::new(0.2, 2.0, 0.0);
        let q_other = Point3::new(0.2, -2.0, 0.0);

        assert!(same_side_coplanar(&a, &b, &p, &q_same));
        assert!(!same_side_coplanar(&a, &b, &p, &q_other));
    }
}
