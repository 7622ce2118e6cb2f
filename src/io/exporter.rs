// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Binary STL export

use crate::error::Result;
use crate::geometry::MeshHandle;
use nalgebra::Vector3;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use stl_io::{Normal, Triangle, Vertex};

/// Write any triangle mesh as binary STL.
///
/// Normals are computed from each triangle's geometry; zero-area faces get a
/// zero normal.
pub fn export_stl<M: MeshHandle + ?Sized>(mesh: &M, path: impl AsRef<Path>) -> Result<()> {
    let mut triangles = Vec::with_capacity(mesh.face_count());
    for f in 0..mesh.face_count() {
        let [a, b, c] = mesh.triangle_points(f)?;
        let normal = (b - a).cross(&(c - a)).try_normalize(0.0).unwrap_or_else(Vector3::zeros);

        triangles.push(Triangle {
            normal: Normal::new([normal.x as f32, normal.y as f32, normal.z as f32]),
            vertices: [a, b, c].map(|p| Vertex::new([p.x as f32, p.y as f32, p.z as f32])),
        });
    }

    let mut writer = BufWriter::new(File::create(path.as_ref())?);
    stl_io::write_stl(&mut writer, triangles.iter())?;
    writer.flush()?;
    Ok(())
}
