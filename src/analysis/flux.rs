// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Flux integrity check
//!
//! Sums `area * (unit_normal . probe)` over all triangles. For a closed,
//! consistently oriented surface the area-weighted normals cancel, so the
//! absolute sum is near zero. This is a closedness/orientation heuristic,
//! not a physical surface integral.

use crate::error::Result;
use crate::geometry::MeshHandle;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// Fixed probe direction. Test tolerances assume this value.
pub const PROBE_VECTOR: [f64; 3] = [1.0, 1.0, 1.0];

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FluxReport {
    /// Absolute value of the accumulated flux, never negative
    pub flux: f64,
    /// Zero-area faces that contributed nothing
    pub degenerate_faces: usize,
}

/// Compute the flux integrity value. Fails on any non-triangular face.
pub fn flux_integrity<M: MeshHandle + ?Sized>(mesh: &M) -> Result<FluxReport> {
    let probe = Vector3::from(PROBE_VECTOR);
    let mut flux = 0.0;
    let mut degenerate_faces = 0;

    for f in 0..mesh.face_count() {
        let [a, b, c] = mesh.triangle_points(f)?;
        let cross = (b - a).cross(&(c - a));
        let norm = cross.norm();
        if !(norm > 0.0) || !norm.is_finite() {
            degenerate_faces += 1;
            continue;
        }
        let area = norm / 2.0;
        let normal = cross / norm;
        flux += area * normal.dot(&probe);
    }

    Ok(FluxReport {
        flux: flux.abs(),
        degenerate_faces,
    })
}
