// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Per-file analysis
//!
//! A file moves through `load -> analyze -> write` and ends in exactly one
//! [`FileOutcome`]. Every error stops at this boundary; nothing propagates
//! to the next file.

use super::config::BatchConfig;
use crate::analysis::{
    analyze_boundary, count_components, detect_self_intersections, flux_integrity, AnalyzerKind,
    BoundaryReport, EdgeIncidence,
};
use crate::error::{MeshError, Result};
use crate::geometry::{MeshHandle, TriMesh};
use crate::io::{load_with_fallback, output, output_path, write_artifact};
use log::{debug, error, info, warn};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Every selected artifact already exists
    OutputExists,
    /// Neither format produced a triangle mesh
    NonTriangular,
}

#[derive(Debug)]
pub enum FileOutcome {
    Succeeded { artifacts: Vec<PathBuf> },
    Skipped { reason: SkipReason },
    /// First error encountered; the remaining analyzers still ran
    Failed { error: MeshError },
}

impl FileOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, FileOutcome::Succeeded { .. })
    }
}

#[derive(Debug)]
pub struct FileReport {
    pub path: PathBuf,
    pub outcome: FileOutcome,
    pub elapsed: Duration,
}

/// Runs the selected analyzers over one file at a time
pub struct FileWorker {
    analyzers: Vec<AnalyzerKind>,
    fallback_extension: String,
}

impl FileWorker {
    pub fn new(config: &BatchConfig) -> Self {
        Self {
            analyzers: config.selected(),
            fallback_extension: config.fallback_extension.clone(),
        }
    }

    /// Process one file end to end.
    pub fn process(&self, path: &Path) -> FileReport {
        let start = Instant::now();
        let outcome = self.analyze_file(path);
        let elapsed = start.elapsed();

        match &outcome {
            FileOutcome::Succeeded { artifacts } => {
                debug!("{}: {} artifacts in {:.2?}", path.display(), artifacts.len(), elapsed)
            }
            FileOutcome::Skipped { reason } => warn!("{}: skipped ({:?})", path.display(), reason),
            FileOutcome::Failed { error } => error!("{}: failed: {}", path.display(), error),
        }

        FileReport {
            path: path.to_path_buf(),
            outcome,
            elapsed,
        }
    }

    fn analyze_file(&self, path: &Path) -> FileOutcome {
        let pending: Vec<AnalyzerKind> = self
            .analyzers
            .iter()
            .copied()
            .filter(|kind| {
                let done = kind.honours_existing_output() && output_path(path, *kind).exists();
                if done {
                    info!("{}: {} output exists, skipping", path.display(), kind);
                }
                !done
            })
            .collect();

        if pending.is_empty() {
            return FileOutcome::Skipped {
                reason: SkipReason::OutputExists,
            };
        }

        let loaded = match load_with_fallback(path, &self.fallback_extension) {
            Ok(loaded) => loaded,
            Err(MeshError::NonTriangular { .. }) => {
                return FileOutcome::Skipped {
                    reason: SkipReason::NonTriangular,
                }
            }
            Err(error) => return FileOutcome::Failed { error },
        };
        debug!(
            "{}: loaded {} vertices, {} faces from {}",
            path.display(),
            loaded.mesh.vertex_count(),
            loaded.mesh.face_count(),
            loaded.source.display()
        );

        let mut artifacts = Vec::new();
        let mut first_error: Option<MeshError> = None;
        let mut boundary: Option<BoundaryReport> = None;

        for kind in pending {
            let started = Instant::now();
            let result = render(kind, &loaded.mesh, path, &mut boundary)
                .and_then(|contents| write_artifact(path, kind, &contents));
            debug!("{}: {} took {:.2?}", path.display(), kind, started.elapsed());

            match result {
                Ok(artifact) => {
                    info!("{}: wrote {}", kind, artifact.display());
                    artifacts.push(artifact);
                }
                Err(e) => {
                    error!("{}: {} failed: {}", path.display(), kind, e);
                    first_error.get_or_insert(e);
                }
            }
        }

        match first_error {
            Some(error) => FileOutcome::Failed { error },
            None => FileOutcome::Succeeded { artifacts },
        }
    }
}

/// Compute one metric and format its artifact. Boundary length and graph
/// share the boundary scan through `boundary`.
fn render(
    kind: AnalyzerKind,
    mesh: &TriMesh,
    input: &Path,
    boundary: &mut Option<BoundaryReport>,
) -> Result<String> {
    let contents = match kind {
        AnalyzerKind::BoundaryLength | AnalyzerKind::BoundaryGraph => {
            let report = match boundary.take() {
                Some(report) => report,
                None => {
                    let incidence = EdgeIncidence::build(mesh)?;
                    let non_manifold = incidence.non_manifold_edges().len();
                    if non_manifold > 0 {
                        debug!("{}: {} non-manifold edges", input.display(), non_manifold);
                    }
                    analyze_boundary(mesh, &incidence)?
                }
            };
            let contents = if kind == AnalyzerKind::BoundaryGraph {
                output::format_boundary_graph(&report.graph)
            } else {
                output::format_boundary_length(report.normalized_length)
            };
            *boundary = Some(report);
            contents
        }
        AnalyzerKind::SegmentCount => output::format_segment_count(count_components(mesh)),
        AnalyzerKind::Flux => {
            let report = flux_integrity(mesh)?;
            if report.degenerate_faces > 0 {
                debug!("{}: {} zero-area faces", input.display(), report.degenerate_faces);
            }
            output::format_flux(report.flux)
        }
        AnalyzerKind::SelfIntersection => {
            let report = detect_self_intersections(mesh)?;
            debug!(
                "{}: {} intersecting pairs, {} degenerate faces",
                input.display(),
                report.intersecting_pairs,
                report.degenerate_faces
            );
            output::format_self_intersection(&report)
        }
    };
    Ok(contents)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Primitive;
    use crate::io::export_stl;
    use std::fs;
    use tempfile::TempDir;

    fn mesh_dir() -> (TempDir, PathBuf) {
        let root = TempDir::new().unwrap();
        let dir = root.path().join("meshes");
        fs::create_dir(&dir).unwrap();
        (root, dir)
    }

    #[test]
    fn test_all_artifacts_written() {
        let (_root, dir) = mesh_dir();
        let input = dir.join("tetra.stl");
        export_stl(&Primitive::tetrahedron(1.0).to_mesh(), &input).unwrap();

        let worker = FileWorker::new(&BatchConfig::default());
        let report = worker.process(&input);
        match report.outcome {
            FileOutcome::Succeeded { artifacts } => assert_eq!(artifacts.len(), 5),
            other => panic!("unexpected outcome {:?}", other),
        }

        let read = |kind| fs::read_to_string(output_path(&input, kind)).unwrap();
        assert_eq!(read(AnalyzerKind::BoundaryLength), "0\n");
        assert_eq!(read(AnalyzerKind::BoundaryGraph), "0\n0\n");
        assert_eq!(read(AnalyzerKind::SegmentCount), "1\n");
        assert_eq!(read(AnalyzerKind::Flux), "0.000000\n");
        assert_eq!(read(AnalyzerKind::SelfIntersection), "0\n4\n");
    }

    #[test]
    fn test_existing_self_intersection_output_skips() {
        let (_root, dir) = mesh_dir();
        let input = dir.join("cube.stl");
        export_stl(&Primitive::cube(nalgebra::Vector3::new(1.0, 1.0, 1.0), false).to_mesh(), &input).unwrap();

        let config = BatchConfig {
            analyzers: vec![AnalyzerKind::SelfIntersection],
            ..BatchConfig::default()
        };
        let worker = FileWorker::new(&config);
        assert!(worker.process(&input).outcome.is_success());

        // The second run never loads the mesh, so deleting it proves the skip
        fs::remove_file(&input).unwrap();
        let second = worker.process(&input);
        assert!(matches!(
            second.outcome,
            FileOutcome::Skipped {
                reason: SkipReason::OutputExists
            }
        ));
    }

    #[test]
    fn test_unloadable_file_fails() {
        let (_root, dir) = mesh_dir();
        let input = dir.join("broken.stl");
        fs::write(&input, b"broken").unwrap();

        let report = FileWorker::new(&BatchConfig::default()).process(&input);
        assert!(matches!(
            report.outcome,
            FileOutcome::Failed {
                error: MeshError::LoadFailure { .. }
            }
        ));
    }

    #[test]
    fn test_degenerate_boundary_does_not_block_other_analyzers() {
        let (_root, dir) = mesh_dir();
        let input = dir.join("flat.stl");
        // Three coincident points: zero extent
        let mesh = TriMesh::from_parts(vec![nalgebra::Point3::new(1.0, 2.0, 3.0); 3], vec![[0, 1, 2]]).unwrap();
        export_stl(&mesh, &input).unwrap();

        let report = FileWorker::new(&BatchConfig::default()).process(&input);
        assert!(matches!(
            report.outcome,
            FileOutcome::Failed {
                error: MeshError::DegenerateGeometry { .. }
            }
        ));
        assert!(!output_path(&input, AnalyzerKind::BoundaryLength).exists());
        assert_eq!(
            fs::read_to_string(output_path(&input, AnalyzerKind::SegmentCount)).unwrap(),
            "1\n"
        );
    }
}
