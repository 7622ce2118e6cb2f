// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Batch summary and progress display

use super::worker::{FileOutcome, FileReport, SkipReason};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Per-file reports of one batch, in input order
#[derive(Debug, Default)]
pub struct BatchReport {
    pub files: Vec<FileReport>,
    pub elapsed: Duration,
}

impl BatchReport {
    pub fn total(&self) -> usize {
        self.files.len()
    }

    pub fn succeeded(&self) -> usize {
        self.count(|o| matches!(o, FileOutcome::Succeeded { .. }))
    }

    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, FileOutcome::Skipped { .. }))
    }

    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, FileOutcome::Failed { .. }))
    }

    fn count(&self, pred: impl Fn(&FileOutcome) -> bool) -> usize {
        self.files.iter().filter(|f| pred(&f.outcome)).count()
    }

    /// Print terminal summary
    pub fn print_summary(&self) {
        println!("\n{}", "═".repeat(60).white());
        println!("{}", "Mesh Analysis Summary".bold());
        println!("{}", "═".repeat(60).white());
        println!("  {} {}", "Files:".white(), self.total().to_string().cyan());
        println!("  {} {}", "Succeeded:".white(), self.succeeded().to_string().green());
        println!("  {} {}", "Skipped:".white(), self.skipped().to_string().yellow());
        println!("  {} {}", "Failed:".white(), self.failed().to_string().red());
        println!("  {} {:.2}s", "Duration:".white(), self.elapsed.as_secs_f64());

        let problems: Vec<&FileReport> = self
            .files
            .iter()
            .filter(|f| !f.outcome.is_success())
            .collect();
        if !problems.is_empty() {
            println!("\n{}", "Not analysed:".bold());
            for file in problems {
                match &file.outcome {
                    FileOutcome::Failed { error } => println!(
                        "  {} {} [{}] {}",
                        "✗".red(),
                        file.path.display(),
                        error.kind(),
                        error
                    ),
                    FileOutcome::Skipped { reason } => {
                        let why = match reason {
                            SkipReason::OutputExists => "output exists",
                            SkipReason::NonTriangular => "not a triangle mesh",
                        };
                        println!("  {} {} ({})", "-".yellow(), file.path.display(), why)
                    }
                    FileOutcome::Succeeded { .. } => {}
                }
            }
        }
        println!("{}", "═".repeat(60).white());
    }
}

/// Progress bar on stderr, or `None` when disabled.
pub fn progress_bar(len: usize, enabled: bool) -> Option<ProgressBar> {
    if !enabled {
        return None;
    }
    let pb = ProgressBar::new(len as u64);
    if let Ok(style) =
        ProgressStyle::default_bar().template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {msg}")
    {
        pb.set_style(style.progress_chars("#>-"));
    }
    Some(pb)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MeshError;
    use std::path::PathBuf;

    fn report(name: &str, outcome: FileOutcome) -> FileReport {
        FileReport {
            path: PathBuf::from(name),
            outcome,
            elapsed: Duration::from_millis(1),
        }
    }

    #[test]
    fn test_counts() {
        let batch = BatchReport {
            files: vec![
                report("a.stl", FileOutcome::Succeeded { artifacts: vec![] }),
                report(
                    "b.stl",
                    FileOutcome::Skipped {
                        reason: SkipReason::OutputExists,
                    },
                ),
                report(
                    "c.stl",
                    FileOutcome::Failed {
                        error: MeshError::DegenerateGeometry {
                            reason: "flat".to_string(),
                        },
                    },
                ),
                report("d.stl", FileOutcome::Succeeded { artifacts: vec![] }),
            ],
            elapsed: Duration::from_secs(1),
        };

        assert_eq!(batch.total(), 4);
        assert_eq!(batch.succeeded(), 2);
        assert_eq!(batch.skipped(), 1);
        assert_eq!(batch.failed(), 1);
        batch.print_summary();
    }

    #[test]
    fn test_progress_disabled() {
        assert!(progress_bar(10, false).is_none());
        assert!(progress_bar(10, true).is_some());
    }
}
