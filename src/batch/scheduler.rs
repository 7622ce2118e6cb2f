// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Static batch scheduling
//!
//! The sorted file list is cut into contiguous ranges of `ceil(N / threads)`
//! files. Pool thread `i` owns range `i` and processes it in order; ranges
//! never migrate between threads. The driver returns only after every range
//! has finished.

use super::config::BatchConfig;
use super::reporter::{progress_bar, BatchReport};
use super::worker::{FileReport, FileWorker};
use crate::error::{MeshError, Result};
use log::{debug, info};
use rayon::ThreadPool;
use std::ops::Range;
use std::path::PathBuf;
use std::time::Instant;

/// Split `0..len` into at most `workers` contiguous, disjoint ranges.
pub fn partition(len: usize, workers: usize) -> Vec<Range<usize>> {
    if len == 0 {
        return Vec::new();
    }
    let chunk = len.div_ceil(workers.max(1));
    (0..len)
        .step_by(chunk)
        .map(|start| start..(start + chunk).min(len))
        .collect()
}

/// Run `ranges[i]` on pool thread `i`, returning the results in range order.
///
/// `ranges` must not outnumber the pool's threads; surplus threads idle.
fn run_pinned<T, F>(pool: &ThreadPool, ranges: &[Range<usize>], op: F) -> Vec<Vec<T>>
where
    T: Send,
    F: Fn(Range<usize>) -> Vec<T> + Sync,
{
    let mut results = pool.broadcast(|ctx| {
        ranges.get(ctx.index()).cloned().map(|range| {
            debug!("range {:?} started on thread {}", range, ctx.index());
            op(range)
        })
    });
    results.truncate(ranges.len());
    results.into_iter().flatten().collect()
}

/// Batch scheduler
pub struct BatchScheduler {
    config: BatchConfig,
}

impl BatchScheduler {
    pub fn new(config: BatchConfig) -> Self {
        Self { config }
    }

    /// Analyse every file; per-file failures are recorded, never returned.
    pub fn run(&self, files: &[PathBuf]) -> Result<BatchReport> {
        let start = Instant::now();
        let threads = self.config.worker_threads();
        let ranges = partition(files.len(), threads);
        info!(
            "analysing {} files on {} threads ({} ranges)",
            files.len(),
            threads,
            ranges.len()
        );

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("meshqa-worker-{}", i))
            .build()
            .map_err(|e| MeshError::Config {
                message: format!("failed to start worker pool: {}", e),
            })?;

        let worker = FileWorker::new(&self.config);
        let progress = progress_bar(files.len(), self.config.show_progress);

        let per_range = run_pinned(&pool, &ranges, |range| {
            let mut reports = Vec::with_capacity(range.len());
            for path in &files[range] {
                if let Some(pb) = &progress {
                    pb.set_message(
                        path.file_name()
                            .map(|n| n.to_string_lossy().into_owned())
                            .unwrap_or_default(),
                    );
                }
                reports.push(worker.process(path));
                if let Some(pb) = &progress {
                    pb.inc(1);
                }
            }
            reports
        });

        if let Some(pb) = progress {
            pb.finish_and_clear();
        }

        Ok(BatchReport {
            files: per_range.into_iter().flatten().collect(),
            elapsed: start.elapsed(),
        })
    }
}
