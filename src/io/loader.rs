// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Mesh loading with a one-shot format fallback
//!
//! The primary format is tried first. If it fails to parse, or parses to
//! something other than a triangle mesh, the file extension is swapped for
//! the fallback format and loading is retried exactly once.

use crate::error::{MeshError, Result};
use crate::geometry::{MeshHandle, PolyMesh, TriMesh};
use log::{debug, warn};
use nalgebra::Point3;
use ply_rs::parser::Parser;
use ply_rs::ply::{DefaultElement, Property};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// A mesh together with the file it was actually read from
#[derive(Debug, Clone)]
pub struct LoadedMesh {
    pub mesh: TriMesh,
    pub source: PathBuf,
    pub used_fallback: bool,
}

/// Why a single load attempt did not yield a triangle mesh
enum Attempt {
    Parse(String),
    NotTriangles(String),
}

impl Attempt {
    fn message(&self) -> &str {
        match self {
            Attempt::Parse(m) | Attempt::NotTriangles(m) => m,
        }
    }
}

/// Load `path`, retrying once with its extension replaced by `fallback_ext`.
pub fn load_with_fallback(path: &Path, fallback_ext: &str) -> Result<LoadedMesh> {
    let primary = match try_load(path) {
        Ok(mesh) => {
            return Ok(LoadedMesh {
                mesh,
                source: path.to_path_buf(),
                used_fallback: false,
            })
        }
        Err(attempt) => attempt,
    };
    debug!("primary load of {} failed: {}", path.display(), primary.message());

    let alternate = path.with_extension(fallback_ext);
    let fallback = if alternate == path {
        Attempt::Parse("fallback path equals primary path".to_string())
    } else {
        match try_load(&alternate) {
            Ok(mesh) => {
                warn!(
                    "{}: primary load failed ({}), using {}",
                    path.display(),
                    primary.message(),
                    alternate.display()
                );
                return Ok(LoadedMesh {
                    mesh,
                    source: alternate,
                    used_fallback: true,
                });
            }
            Err(attempt) => attempt,
        }
    };

    match (&primary, &fallback) {
        (Attempt::NotTriangles(_), _) | (_, Attempt::NotTriangles(_)) => Err(MeshError::NonTriangular {
            path: path.to_path_buf(),
        }),
        _ => Err(MeshError::LoadFailure {
            path: path.to_path_buf(),
            primary: primary.message().to_string(),
            fallback: fallback.message().to_string(),
        }),
    }
}

fn try_load(path: &Path) -> std::result::Result<TriMesh, Attempt> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "stl" => read_stl(path).map_err(Attempt::Parse),
        "ply" => {
            let mesh = read_ply(path).map_err(Attempt::Parse)?;
            if !mesh.is_triangle_mesh() {
                return Err(Attempt::NotTriangles(format!(
                    "{} contains non-triangular faces",
                    path.display()
                )));
            }
            mesh.into_tri_mesh().map_err(|e| Attempt::NotTriangles(e.to_string()))
        }
        other => Err(Attempt::Parse(format!("unsupported mesh format '{}'", other))),
    }
}

/// Read an ASCII or binary STL. `stl_io` merges bit-identical vertices,
/// which restores shared topology.
pub fn read_stl(path: &Path) -> std::result::Result<TriMesh, String> {
    let mut file = File::open(path).map_err(|e| format!("failed to open {}: {}", path.display(), e))?;
    let stl = stl_io::read_stl(&mut file).map_err(|e| format!("failed to read STL {}: {}", path.display(), e))?;

    let positions = stl
        .vertices
        .iter()
        .map(|v| Point3::new(v[0] as f64, v[1] as f64, v[2] as f64))
        .collect();
    let triangles = stl.faces.iter().map(|face| face.vertices).collect();

    TriMesh::from_parts(positions, triangles).map_err(|e| e.to_string())
}

/// Read an ASCII or binary PLY with arbitrary polygon faces.
pub fn read_ply(path: &Path) -> std::result::Result<PolyMesh, String> {
    let file = File::open(path).map_err(|e| format!("failed to open {}: {}", path.display(), e))?;
    let mut reader = BufReader::new(file);

    let parser = Parser::<DefaultElement>::new();
    let ply = parser
        .read_ply(&mut reader)
        .map_err(|e| format!("failed to read PLY {}: {}", path.display(), e))?;

    let vertex_element = ply
        .payload
        .get("vertex")
        .ok_or_else(|| "PLY file has no vertex element".to_string())?;

    let mut positions = Vec::with_capacity(vertex_element.len());
    for vertex in vertex_element {
        let coord = |name: &str| {
            float_property(vertex, name).ok_or_else(|| format!("vertex missing {} coordinate", name))
        };
        positions.push(Point3::new(coord("x")?, coord("y")?, coord("z")?));
    }

    let mut faces = Vec::new();
    if let Some(face_element) = ply.payload.get("face") {
        faces.reserve(face_element.len());
        for face in face_element {
            let indices = list_property(face, "vertex_indices")
                .or_else(|| list_property(face, "vertex_index"))
                .ok_or_else(|| "face missing vertex_indices property".to_string())?;
            faces.push(indices);
        }
    }

    PolyMesh::from_parts(positions, faces).map_err(|e| e.to_string())
}

fn float_property(element: &DefaultElement, name: &str) -> Option<f64> {
    match element.get(name)? {
        Property::Float(v) => Some(*v as f64),
        Property::Double(v) => Some(*v),
        Property::Int(v) => Some(*v as f64),
        Property::UInt(v) => Some(*v as f64),
        Property::Short(v) => Some(*v as f64),
        Property::UShort(v) => Some(*v as f64),
        Property::Char(v) => Some(*v as f64),
        Property::UChar(v) => Some(*v as f64),
        _ => None,
    }
}

fn list_property(element: &DefaultElement, name: &str) -> Option<Vec<usize>> {
    match element.get(name)? {
        Property::ListInt(v) => Some(v.iter().map(|&x| x as usize).collect()),
        Property::ListUInt(v) => Some(v.iter().map(|&x| x as usize).collect()),
        Property::ListShort(v) => Some(v.iter().map(|&x| x as usize).collect()),
        Property::ListUShort(v) => Some(v.iter().map(|&x| x as usize).collect()),
        Property::ListChar(v) => Some(v.iter().map(|&x| x as usize).collect()),
        Property::ListUChar(v) => Some(v.iter().map(|&x| x as usize).collect()),
        _ => None,
    }
}
