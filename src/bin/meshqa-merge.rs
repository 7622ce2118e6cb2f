// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Aggregate per-file metric artifacts into results.json

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use meshqa::merge::{merge_results, RESULTS_FILE};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "meshqa-merge", version)]
#[command(about = "Average the recon_* metric directories of an evaluation folder", long_about = None)]
struct Cli {
    /// Evaluation folder containing recon_* (and optionally gt_segment_num) directories
    path: PathBuf,

    /// Hide progress bars
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    meshqa::logging::init_logger();

    let summary = merge_results(&cli.path, !cli.quiet)
        .with_context(|| format!("Failed to merge results in {}", cli.path.display()))?;

    let show = |value: Option<f64>| match value {
        Some(v) => format!("{:.6}", v).cyan(),
        None => "n/a".yellow(),
    };
    let results = &summary.results;
    let samples = &summary.samples;
    println!("{}", "Merged Results".bold());
    println!("  {:<30} {} ({} files)", "segment_num_error", show(results.segment_num_error), samples.segment_num_error);
    println!("  {:<30} {} ({} files)", "dangling_edge_length", show(results.dangling_edge_length), samples.dangling_edge_length);
    println!(
        "  {:<30} {} ({} files)",
        "self_intersection_percentage",
        show(results.self_intersection_percentage),
        samples.self_intersection_percentage
    );
    println!("  {:<30} {} ({} files)", "flux_enclosure_error", show(results.flux_enclosure_error), samples.flux_enclosure_error);
    println!("  {} {}", "Written:".white(), cli.path.join(RESULTS_FILE).display());

    Ok(())
}
