// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Per-metric output artifacts
//!
//! Every metric of `<dir>/<name>.<ext>` is written to
//! `<dir><suffix>/<name>.txt`, where the suffix is fixed per analyzer.

use crate::analysis::{AnalyzerKind, BoundaryGraph, SelfIntersectionReport};
use crate::error::Result;
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

/// Output directory for `kind`: the input's parent directory with the
/// analyzer suffix appended.
pub fn output_dir(input: &Path, kind: AnalyzerKind) -> PathBuf {
    let parent = input
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let mut dir = parent.as_os_str().to_os_string();
    dir.push(kind.suffix());
    PathBuf::from(dir)
}

/// Artifact path for `kind`: basename with its extension replaced by `.txt`.
pub fn output_path(input: &Path, kind: AnalyzerKind) -> PathBuf {
    let name = input
        .file_name()
        .map(|n| Path::new(n).with_extension("txt"))
        .unwrap_or_else(|| PathBuf::from("unnamed.txt"));
    output_dir(input, kind).join(name)
}

/// Create `dir` (and parents) with mode 0755; an existing directory is fine.
pub fn ensure_dir(dir: &Path) -> Result<()> {
    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(0o755);
    }
    builder.create(dir)?;
    Ok(())
}

/// Write `contents` to the artifact for `input`, creating its directory.
pub fn write_artifact(input: &Path, kind: AnalyzerKind, contents: &str) -> Result<PathBuf> {
    let path = output_path(input, kind);
    if let Some(dir) = path.parent() {
        ensure_dir(dir)?;
    }
    fs::write(&path, contents)?;
    Ok(path)
}

pub fn format_boundary_length(normalized_length: f64) -> String {
    format!("{}\n", normalized_length)
}

/// Node count, `x y z` per node, edge count, `i j` per edge.
pub fn format_boundary_graph(graph: &BoundaryGraph) -> String {
    let mut out = String::with_capacity(32 * (graph.nodes.len() + graph.edges.len()) + 16);
    let _ = writeln!(out, "{}", graph.nodes.len());
    for p in &graph.nodes {
        let _ = writeln!(out, "{} {} {}", p.x, p.y, p.z);
    }
    let _ = writeln!(out, "{}", graph.edges.len());
    for [i, j] in &graph.edges {
        let _ = writeln!(out, "{} {}", i, j);
    }
    out
}

pub fn format_segment_count(count: usize) -> String {
    format!("{}\n", count)
}

/// Fixed notation, six decimals
pub fn format_flux(flux: f64) -> String {
    format!("{:.6}\n", flux)
}

pub fn format_self_intersection(report: &SelfIntersectionReport) -> String {
    format!("{}\n{}\n", report.intersecting_faces, report.total_faces)
}
