// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Aggregation of per-file metric artifacts
//!
//! Reads the `recon_*` output directories of an evaluation folder and
//! reduces each metric to its mean over all files, writing `results.json`.

use crate::analysis::AnalyzerKind;
use crate::batch::discover_files;
use crate::batch::reporter::progress_bar;
use crate::error::Result;
use log::{debug, info, warn};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const RESULTS_FILE: &str = "results.json";

/// Prefix of the analysed-mesh directory
pub const RECON_PREFIX: &str = "recon";
/// Prefix of the ground-truth directory, used for segment counts only
pub const GT_PREFIX: &str = "gt";

/// Metric means; `None` (JSON `null`) when no file contributed
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MergedResults {
    pub segment_num_error: Option<f64>,
    pub dangling_edge_length: Option<f64>,
    pub self_intersection_percentage: Option<f64>,
    pub flux_enclosure_error: Option<f64>,
}

/// Number of files that contributed to each mean
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleCounts {
    pub segment_num_error: usize,
    pub dangling_edge_length: usize,
    pub self_intersection_percentage: usize,
    pub flux_enclosure_error: usize,
}

#[derive(Debug, Clone, Default)]
pub struct MergeSummary {
    pub results: MergedResults,
    pub samples: SampleCounts,
}

/// Aggregate `eval_dir` and write `eval_dir/results.json`.
pub fn merge_results(eval_dir: &Path, show_progress: bool) -> Result<MergeSummary> {
    let summary = collect(eval_dir, show_progress)?;
    let json = serde_json::to_string_pretty(&summary.results)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
    fs::write(eval_dir.join(RESULTS_FILE), json)?;
    Ok(summary)
}

/// Aggregate without writing anything.
pub fn collect(eval_dir: &Path, show_progress: bool) -> Result<MergeSummary> {
    let dir = |prefix: &str, kind: AnalyzerKind| eval_dir.join(format!("{}{}", prefix, kind.suffix()));

    let segment_errors = collect_metric(&dir(RECON_PREFIX, AnalyzerKind::SegmentCount), show_progress, |path| {
        let gt_path = dir(GT_PREFIX, AnalyzerKind::SegmentCount).join(path.file_name()?);
        if !gt_path.exists() {
            return None;
        }
        let recon = line_value::<i64>(path, 0)?;
        let gt = line_value::<i64>(&gt_path, 0)?;
        Some((recon - gt).abs() as f64)
    })?;

    let dangling = collect_metric(&dir(RECON_PREFIX, AnalyzerKind::BoundaryLength), show_progress, |path| {
        line_value::<f64>(path, 0).filter(|v| v.is_finite())
    })?;

    let self_intersection = collect_metric(&dir(RECON_PREFIX, AnalyzerKind::SelfIntersection), show_progress, |path| {
        let intersecting = line_value::<u64>(path, 0)?;
        let total = line_value::<u64>(path, 1)?;
        (total > 0).then(|| intersecting as f64 / total as f64)
    })?;

    let flux = collect_metric(&dir(RECON_PREFIX, AnalyzerKind::Flux), show_progress, |path| {
        line_value::<f64>(path, 0).filter(|v| v.is_finite())
    })?;

    let summary = MergeSummary {
        results: MergedResults {
            segment_num_error: mean(&segment_errors),
            dangling_edge_length: mean(&dangling),
            self_intersection_percentage: mean(&self_intersection),
            flux_enclosure_error: mean(&flux),
        },
        samples: SampleCounts {
            segment_num_error: segment_errors.len(),
            dangling_edge_length: dangling.len(),
            self_intersection_percentage: self_intersection.len(),
            flux_enclosure_error: flux.len(),
        },
    };
    info!("merged samples: {:?}", summary.samples);
    Ok(summary)
}

/// Parse every `.txt` file of `dir` in parallel, keeping the `Some` values.
fn collect_metric<F>(dir: &Path, show_progress: bool, parse: F) -> Result<Vec<f64>>
where
    F: Fn(&Path) -> Option<f64> + Sync,
{
    if !dir.is_dir() {
        warn!("{} does not exist, metric left empty", dir.display());
        return Ok(Vec::new());
    }

    let files: Vec<PathBuf> = discover_files(dir, "txt")?;
    let progress = progress_bar(files.len(), show_progress);
    if let Some(pb) = &progress {
        pb.set_message(dir.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default());
    }

    let values: Vec<f64> = files
        .par_iter()
        .filter_map(|path| {
            let value = parse(path);
            if value.is_none() {
                debug!("skipping {}", path.display());
            }
            if let Some(pb) = &progress {
                pb.inc(1);
            }
            value
        })
        .collect();

    if let Some(pb) = progress {
        pb.finish_and_clear();
    }
    Ok(values)
}

/// Parse line `line` (zero-based) of `path`.
fn line_value<T: std::str::FromStr>(path: &Path, line: usize) -> Option<T> {
    let content = fs::read_to_string(path).ok()?;
    content.lines().nth(line)?.trim().parse().ok()
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}
