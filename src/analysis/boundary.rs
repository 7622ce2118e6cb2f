// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Boundary ("dangling") edge analysis
//!
//! Total boundary length is normalised by half the largest bounding-box
//! extent, which makes it invariant to uniform scaling of the mesh.

use super::edge_index::EdgeIncidence;
use crate::error::{MeshError, Result};
use crate::geometry::MeshHandle;
use ahash::AHashMap;
use nalgebra::Point3;
use serde::{Deserialize, Serialize};

/// Boundary polylines as a compact graph.
///
/// Each boundary vertex appears once in `nodes`; `edges` index into `nodes`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BoundaryGraph {
    pub nodes: Vec<Point3<f64>>,
    pub edges: Vec<[usize; 2]>,
}

impl BoundaryGraph {
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

/// Result of boundary analysis
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoundaryReport {
    /// Sum of boundary edge lengths in model units
    pub raw_length: f64,
    /// Half of the largest bounding-box extent
    pub scale: f64,
    /// `raw_length / scale`
    pub normalized_length: f64,
    pub graph: BoundaryGraph,
}

/// Measure boundary edges and collect them into a [`BoundaryGraph`].
///
/// Fails with `DegenerateGeometry` if the mesh has no positive extent.
pub fn analyze_boundary<M: MeshHandle + ?Sized>(
    mesh: &M,
    incidence: &EdgeIncidence,
) -> Result<BoundaryReport> {
    let scale = mesh.bounding_box().half_max_extent();
    if !(scale > 0.0) {
        return Err(MeshError::DegenerateGeometry {
            reason: format!("normalization scale {} is not positive", scale),
        });
    }

    let mut raw_length = 0.0;
    let mut graph = BoundaryGraph::default();
    let mut node_of: AHashMap<usize, usize> = AHashMap::new();

    for key in incidence.boundary_edges() {
        let (a, b) = key.vertices();
        let (pa, pb) = (mesh.position(a), mesh.position(b));
        raw_length += (pa - pb).norm();

        let mut node = |v: usize, position: Point3<f64>| {
            *node_of.entry(v).or_insert_with(|| {
                graph.nodes.push(position);
                graph.nodes.len() - 1
            })
        };
        let (na, nb) = (node(a, pa), node(b, pb));
        graph.edges.push([na, nb]);
    }

    Ok(BoundaryReport {
        raw_length,
        scale,
        normalized_length: raw_length / scale,
        graph,
    })
}
