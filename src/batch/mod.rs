// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Batch module - discovery, scheduling and per-file workers

pub mod config;
pub mod discovery;
pub mod reporter;
pub mod scheduler;
pub mod worker;

pub use config::BatchConfig;
pub use discovery::discover_files;
pub use reporter::BatchReport;
pub use scheduler::{partition, BatchScheduler};
pub use worker::{FileOutcome, FileReport, FileWorker, SkipReason};

use crate::error::Result;
use std::path::Path;

/// Discover the meshes in `dir` and analyse all of them.
pub fn run_batch(dir: &Path, config: BatchConfig) -> Result<BatchReport> {
    let files = discover_files(dir, &config.primary_extension)?;
    log::info!("found {} .{} files in {}", files.len(), config.primary_extension, dir.display());
    BatchScheduler::new(config).run(&files)
}
