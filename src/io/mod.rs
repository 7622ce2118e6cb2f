// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! I/O module - loading, exporting, and per-metric output files

mod exporter;
mod loader;
pub mod output;

pub use exporter::export_stl;
pub use loader::{load_with_fallback, read_ply, read_stl, LoadedMesh};
pub use output::{output_dir, output_path, write_artifact};
