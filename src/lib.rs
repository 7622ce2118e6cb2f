// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! meshqa - batch mesh quality analysis
//!
//! Measures structural defects of triangulated surface meshes: boundary
//! ("dangling") edges, connected components, a flux closedness check and
//! self-intersections. Meshes never get modified; every metric is written
//! to its own per-file artifact.

pub mod analysis;
pub mod batch;
pub mod error;
pub mod geometry;
pub mod io;
pub mod logging;
pub mod merge;

pub use analysis::{
    analyze_boundary, count_components, detect_self_intersections, flux_integrity, AnalyzerKind,
    BoundaryReport, EdgeIncidence, FluxReport, SelfIntersectionReport,
};
pub use batch::{run_batch, BatchConfig, BatchReport, FileOutcome};
pub use error::{MeshError, Result};
pub use geometry::{MeshHandle, PolyMesh, Primitive, TriMesh};
pub use io::{export_stl, load_with_fallback};

/// Boundary length, component count, flux and self-intersection of one mesh
#[derive(Debug, Clone)]
pub struct MeshMetrics {
    pub boundary: BoundaryReport,
    pub components: usize,
    pub flux: FluxReport,
    pub self_intersection: SelfIntersectionReport,
}

/// Run every analyzer over an in-memory mesh.
pub fn analyze<M: MeshHandle + ?Sized>(mesh: &M) -> Result<MeshMetrics> {
    let incidence = EdgeIncidence::build(mesh)?;
    Ok(MeshMetrics {
        boundary: analyze_boundary(mesh, &incidence)?,
        components: count_components(mesh),
        flux: flux_integrity(mesh)?,
        self_intersection: detect_self_intersections(mesh)?,
    })
}
