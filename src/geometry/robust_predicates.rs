// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Robust geometric predicates
//!
//! `orient2d` and `orient3d` return the exact sign of their determinant as
//! long as no intermediate product underflows or overflows. Coordinate
//! magnitudes between roughly 2^-200 and 2^200 are safe; callers with other
//! scales rescale by a power of two first, which keeps every sign. A
//! floating-point evaluation is accepted when it clears a static error bound;
//! otherwise the determinant is recomputed with error-free floating-point
//! expansions (Shewchuk's arithmetic).

use nalgebra::Point3;

/// Half an ulp of 1.0
const EPSILON: f64 = f64::EPSILON * 0.5;
const ORIENT2D_BOUND: f64 = (3.0 + 16.0 * EPSILON) * EPSILON;
const ORIENT3D_BOUND: f64 = (7.0 + 56.0 * EPSILON) * EPSILON;

/// Exact sign of a predicate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    Positive,
    Negative,
    Zero,
}

impl Orientation {
    fn of(value: f64) -> Self {
        if value > 0.0 {
            Orientation::Positive
        } else if value < 0.0 {
            Orientation::Negative
        } else {
            Orientation::Zero
        }
    }

    pub fn is_zero(self) -> bool {
        self == Orientation::Zero
    }

    /// Strictly opposite non-zero signs.
    pub fn opposes(self, other: Orientation) -> bool {
        matches!(
            (self, other),
            (Orientation::Positive, Orientation::Negative)
                | (Orientation::Negative, Orientation::Positive)
        )
    }
}

/// Sign of `(b - a) x (c - a)`: positive when `c` lies left of `a -> b`.
pub fn orient2d(a: [f64; 2], b: [f64; 2], c: [f64; 2]) -> Orientation {
    let detleft = (b[0] - a[0]) * (c[1] - a[1]);
    let detright = (b[1] - a[1]) * (c[0] - a[0]);
    let det = detleft - detright;

    let errbound = ORIENT2D_BOUND * (detleft.abs() + detright.abs());
    if det > errbound || -det > errbound {
        return Orientation::of(det);
    }

    orient2d_exact(a, b, c)
}

fn orient2d_exact(a: [f64; 2], b: [f64; 2], c: [f64; 2]) -> Orientation {
    let abx = two_diff(b[0], a[0]);
    let aby = two_diff(b[1], a[1]);
    let acx = two_diff(c[0], a[0]);
    let acy = two_diff(c[1], a[1]);

    let det = expansion_diff(&expansion_product(&abx, &acy), &expansion_product(&aby, &acx));
    expansion_sign(&det)
}

/// Sign of `(b - a) . ((c - a) x (d - a))`: positive when `d` lies on the
/// side of plane `abc` that its right-handed normal points to.
pub fn orient3d(a: &Point3<f64>, b: &Point3<f64>, c: &Point3<f64>, d: &Point3<f64>) -> Orientation {
    let ab = b - a;
    let ac = c - a;
    let ad = d - a;

    let cx = ac.y * ad.z - ac.z * ad.y;
    let cy = ac.z * ad.x - ac.x * ad.z;
    let cz = ac.x * ad.y - ac.y * ad.x;
    let det = ab.x * cx + ab.y * cy + ab.z * cz;

    let permanent = ab.x.abs() * ((ac.y * ad.z).abs() + (ac.z * ad.y).abs())
        + ab.y.abs() * ((ac.z * ad.x).abs() + (ac.x * ad.z).abs())
        + ab.z.abs() * ((ac.x * ad.y).abs() + (ac.y * ad.x).abs());
    let errbound = ORIENT3D_BOUND * permanent;
    if det > errbound || -det > errbound {
        return Orientation::of(det);
    }

    orient3d_exact(a, b, c, d)
}

fn orient3d_exact(a: &Point3<f64>, b: &Point3<f64>, c: &Point3<f64>, d: &Point3<f64>) -> Orientation {
    let ab = [two_diff(b.x, a.x), two_diff(b.y, a.y), two_diff(b.z, a.z)];
    let ac = [two_diff(c.x, a.x), two_diff(c.y, a.y), two_diff(c.z, a.z)];
    let ad = [two_diff(d.x, a.x), two_diff(d.y, a.y), two_diff(d.z, a.z)];

    let cx = expansion_diff(&expansion_product(&ac[1], &ad[2]), &expansion_product(&ac[2], &ad[1]));
    let cy = expansion_diff(&expansion_product(&ac[2], &ad[0]), &expansion_product(&ac[0], &ad[2]));
    let cz = expansion_diff(&expansion_product(&ac[0], &ad[1]), &expansion_product(&ac[1], &ad[0]));

    let det = expansion_sum(
        &expansion_sum(&expansion_product(&ab[0], &cx), &expansion_product(&ab[1], &cy)),
        &expansion_product(&ab[2], &cz),
    );
    expansion_sign(&det)
}

// Expansions are nonoverlapping components in increasing magnitude whose
// exact sum is the represented value. Zero components are dropped.

fn two_sum(a: f64, b: f64) -> (f64, f64) {
    let x = a + b;
    let bv = x - a;
    let av = x - bv;
    let br = b - bv;
    let ar = a - av;
    (x, ar + br)
}

fn two_product(a: f64, b: f64) -> (f64, f64) {
    let x = a * b;
    (x, a.mul_add(b, -x))
}

fn two_diff(a: f64, b: f64) -> Vec<f64> {
    let (x, y) = two_sum(a, -b);
    compress(vec![y, x])
}

fn compress(components: Vec<f64>) -> Vec<f64> {
    components.into_iter().filter(|&c| c != 0.0).collect()
}

/// Add a scalar to an expansion.
fn grow_expansion(e: &[f64], b: f64) -> Vec<f64> {
    let mut h = Vec::with_capacity(e.len() + 1);
    let mut q = b;
    for &component in e {
        let (sum, err) = two_sum(q, component);
        if err != 0.0 {
            h.push(err);
        }
        q = sum;
    }
    if q != 0.0 {
        h.push(q);
    }
    h
}

fn expansion_sum(e: &[f64], f: &[f64]) -> Vec<f64> {
    f.iter().fold(e.to_vec(), |acc, &component| grow_expansion(&acc, component))
}

fn expansion_diff(e: &[f64], f: &[f64]) -> Vec<f64> {
    f.iter().fold(e.to_vec(), |acc, &component| grow_expansion(&acc, -component))
}

fn expansion_product(e: &[f64], f: &[f64]) -> Vec<f64> {
    let mut result = Vec::new();
    for &x in e {
        for &y in f {
            let (product, err) = two_product(x, y);
            result = grow_expansion(&result, err);
            result = grow_expansion(&result, product);
        }
    }
    result
}

fn expansion_sign(e: &[f64]) -> Orientation {
    e.last().map_or(Orientation::Zero, |&top| Orientation::of(top))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orient3d_signs() {
        let a = Point3::new(0.0, 0.0, 0.0);
        let b = Point3::new(1.0, 0.0, 0.0);
        let c = Point3::new(0.0, 1.0, 0.0);

        assert_eq!(orient3d(&a, &b, &c, &Point3::new(0.0, 0.0, 1.0)), Orientation::Positive);
        assert_eq!(orient3d(&a, &b, &c, &Point3::new(0.0, 0.0, -1.0)), Orientation::Negative);
        assert_eq!(orient3d(&a, &b, &c, &Point3::new(0.3, 0.7, 0.0)), Orientation::Zero);
    }

    #[test]
    fn test_orient2d_signs() {
        assert_eq!(orient2d([0.0, 0.0], [1.0, 0.0], [0.0, 1.0]), Orientation::Positive);
        assert_eq!(orient2d([0.0, 0.0], [1.0, 0.0], [0.0, -1.0]), Orientation::Negative);
        assert_eq!(orient2d([0.0, 0.0], [1.0, 1.0], [3.0, 3.0]), Orientation::Zero);
    }

    #[test]
    fn test_orient2d_near_collinear_is_exact() {
        // Points on y = x shifted by single ulps; naive evaluation
        // misclassifies many of these.
        let a = [0.5, 0.5];
        let b = [12.0, 12.0];
        let c = [24.0, 24.0];
        for i in 0..64 {
            let x = 0.5 + (i as f64) * f64::EPSILON;
            let p = [x, 0.5];
            let expected = if x > 0.5 {
                Orientation::Negative
            } else {
                Orientation::Zero
            };
            assert_eq!(orient2d(p, b, c), expected, "ulp offset {}", i);
        }
        assert_eq!(orient2d(a, b, c), Orientation::Zero);
    }

    #[test]
    fn test_orient3d_coplanar_large_coordinates() {
        // Exactly coplanar points on z = x + y with magnitudes where the
        // filter cannot decide.
        let p = |x: f64, y: f64| Point3::new(x, y, x + y);
        let a = p(1.0e8 + 1.0, 3.0);
        let b = p(7.0, 1.0e8 + 5.0);
        let c = p(-1.0e8 + 3.0, 11.0);
        let d = p(0.25, 0.5);
        assert_eq!(orient3d(&a, &b, &c, &d), Orientation::Zero);

        let e = Point3::new(0.25, 0.5, 0.75 + 1.0e-9);
        assert!(!orient3d(&a, &b, &c, &e).is_zero());
    }

    #[test]
    fn test_expansion_arithmetic() {
        let tiny = f64::EPSILON * f64::EPSILON;
        let e = grow_expansion(&[tiny], 1.0);
        let f = expansion_diff(&e, &[1.0]);
        assert_eq!(expansion_sign(&f), Orientation::Positive);
        assert_eq!(f, vec![tiny]);

        let g = expansion_product(&two_diff(1.0, tiny), &[2.0]);
        assert_eq!(expansion_sign(&expansion_diff(&g, &[2.0])), Orientation::Negative);
    }

    #[test]
    fn test_opposes() {
        assert!(Orientation::Positive.opposes(Orientation::Negative));
        assert!(!Orientation::Positive.opposes(Orientation::Zero));
        assert!(!Orientation::Zero.opposes(Orientation::Zero));
    }
}
