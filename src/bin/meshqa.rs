// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Batch mesh quality analysis CLI

use anyhow::{Context, Result};
use clap::Parser;
use meshqa::batch::{run_batch, BatchConfig};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "meshqa", version)]
#[command(about = "Measure boundary edges, components, flux and self-intersections of every mesh in a directory", long_about = None)]
struct Cli {
    /// Directory containing the meshes to analyse
    mesh_dir: PathBuf,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    meshqa::logging::init_logger();

    let config = BatchConfig::load().context("Failed to load configuration")?;
    let report = run_batch(&cli.mesh_dir, config)
        .with_context(|| format!("Failed to analyse {}", cli.mesh_dir.display()))?;
    report.print_summary();

    // Per-file failures are reported above and do not affect the exit status
    Ok(())
}
