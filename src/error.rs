// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Error taxonomy for mesh analysis
//!
//! Every variant is terminal for the file being analysed. The batch worker
//! catches them at the per-file boundary, so none of these ever reaches a
//! sibling file.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using [`MeshError`].
pub type Result<T> = std::result::Result<T, MeshError>;

/// Errors raised while loading or analysing a mesh.
#[derive(Error, Debug)]
pub enum MeshError {
    /// Both the primary and the fallback format failed to load.
    #[error("failed to load {path} (primary: {primary}; fallback: {fallback})")]
    LoadFailure {
        path: PathBuf,
        primary: String,
        fallback: String,
    },

    /// Neither format yielded a pure triangle mesh.
    #[error("{path} is not a triangle mesh in either format")]
    NonTriangular { path: PathBuf },

    /// A face with a vertex count other than three reached a triangle-only analyzer.
    #[error("face {face} has {arity} vertices, expected a triangle")]
    MalformedMesh { face: usize, arity: usize },

    /// Geometry that cannot be normalised or measured.
    #[error("degenerate geometry: {reason}")]
    DegenerateGeometry { reason: String },

    /// A face references a vertex that does not exist.
    #[error("face {face} references vertex {vertex} (mesh has {vertex_count} vertices)")]
    InvalidVertexIndex {
        face: usize,
        vertex: usize,
        vertex_count: usize,
    },

    /// Vertex index too large for the packed edge key.
    #[error("vertex index {vertex} exceeds the edge key limit of 2^31")]
    EdgeKeyOverflow { vertex: usize },

    /// Invalid batch configuration.
    #[error("invalid configuration: {message}")]
    Config { message: String },

    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl MeshError {
    /// Short, stable label used in batch summaries.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::LoadFailure { .. } => "load",
            Self::NonTriangular { .. } => "non-triangular",
            Self::MalformedMesh { .. } => "malformed",
            Self::DegenerateGeometry { .. } => "degenerate",
            Self::InvalidVertexIndex { .. } => "invalid-index",
            Self::EdgeKeyOverflow { .. } => "edge-key",
            Self::Config { .. } => "config",
            Self::Io(_) => "io",
        }
    }
}
