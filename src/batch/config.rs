// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Batch configuration
//!
//! Defaults, optionally overlaid by `meshqa.toml` in the working directory,
//! then by `MESHQA_*` environment variables.

use crate::analysis::AnalyzerKind;
use crate::error::{MeshError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Config file looked up in the working directory
pub const CONFIG_FILE: &str = "meshqa.toml";

/// Batch analysis configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// Metrics to compute for every file
    pub analyzers: Vec<AnalyzerKind>,
    /// Worker threads; `None` uses hardware concurrency
    pub threads: Option<usize>,
    /// Extension that selects input files
    pub primary_extension: String,
    /// Extension substituted when the primary load fails
    pub fallback_extension: String,
    /// Draw a progress bar on stderr
    pub show_progress: bool,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            analyzers: AnalyzerKind::ALL.to_vec(),
            threads: None,
            primary_extension: "stl".to_string(),
            fallback_extension: "ply".to_string(),
            show_progress: true,
        }
    }
}

impl BatchConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let config: BatchConfig = toml::from_str(&content).map_err(|e| MeshError::Config {
            message: format!("failed to parse {}: {}", path.display(), e),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load `meshqa.toml` if present, then apply environment overrides
    pub fn load() -> Result<Self> {
        let mut config = if Path::new(CONFIG_FILE).exists() {
            Self::from_file(CONFIG_FILE)?
        } else {
            Self::default()
        };
        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Apply `MESHQA_THREADS`, `MESHQA_ANALYZERS` and `MESHQA_PROGRESS`
    /// as returned by `lookup`.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(threads) = lookup("MESHQA_THREADS") {
            let threads = threads.trim().parse::<usize>().map_err(|_| MeshError::Config {
                message: format!("MESHQA_THREADS must be a positive integer, got '{}'", threads),
            })?;
            self.threads = Some(threads);
        }

        if let Some(names) = lookup("MESHQA_ANALYZERS") {
            self.analyzers = names
                .split(',')
                .filter(|name| !name.trim().is_empty())
                .map(|name| {
                    AnalyzerKind::from_str(name).ok_or_else(|| MeshError::Config {
                        message: format!("unknown analyzer '{}'", name.trim()),
                    })
                })
                .collect::<Result<_>>()?;
        }

        if let Some(progress) = lookup("MESHQA_PROGRESS") {
            self.show_progress = match progress.trim().to_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => true,
                "0" | "false" | "no" | "off" => false,
                other => {
                    return Err(MeshError::Config {
                        message: format!("MESHQA_PROGRESS must be a boolean, got '{}'", other),
                    })
                }
            };
        }

        self.validate()
    }

    fn validate(&self) -> Result<()> {
        if self.threads == Some(0) {
            return Err(MeshError::Config {
                message: "threads must be at least 1".to_string(),
            });
        }
        if self.analyzers.is_empty() {
            return Err(MeshError::Config {
                message: "at least one analyzer must be selected".to_string(),
            });
        }
        if self.primary_extension.is_empty() || self.fallback_extension.is_empty() {
            return Err(MeshError::Config {
                message: "file extensions must not be empty".to_string(),
            });
        }
        Ok(())
    }

    /// Selected analyzers in canonical order, without duplicates
    pub fn selected(&self) -> Vec<AnalyzerKind> {
        AnalyzerKind::ALL
            .into_iter()
            .filter(|kind| self.analyzers.contains(kind))
            .collect()
    }

    /// Resolved worker count, never zero
    pub fn worker_threads(&self) -> usize {
        self.threads
            .or_else(|| std::thread::available_parallelism().ok().map(|n| n.get()))
            .unwrap_or(1)
            .max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = BatchConfig::default();
        assert_eq!(config.selected(), AnalyzerKind::ALL.to_vec());
        assert_eq!(config.primary_extension, "stl");
        assert_eq!(config.fallback_extension, "ply");
        assert!(config.worker_threads() >= 1);
    }

    #[test]
    fn test_partial_toml() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "analyzers = [\"segment_num\", \"flux_enclosure_error\"]\nthreads = 3\n").unwrap();

        let config = BatchConfig::from_file(&path).unwrap();
        assert_eq!(
            config.selected(),
            vec![AnalyzerKind::SegmentCount, AnalyzerKind::Flux]
        );
        assert_eq!(config.worker_threads(), 3);
        assert!(config.show_progress);
    }

    #[test]
    fn test_invalid_toml() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "analyzers = [\"volume\"]\n").unwrap();
        assert!(matches!(
            BatchConfig::from_file(&path),
            Err(MeshError::Config { .. })
        ));
    }

    #[test]
    fn test_env_overrides() {
        let mut config = BatchConfig::default();
        config
            .apply_overrides(env(&[
                ("MESHQA_THREADS", "2"),
                ("MESHQA_ANALYZERS", "self_intersection, dangling_edge"),
                ("MESHQA_PROGRESS", "off"),
            ]))
            .unwrap();

        assert_eq!(config.threads, Some(2));
        assert_eq!(
            config.selected(),
            vec![AnalyzerKind::BoundaryLength, AnalyzerKind::SelfIntersection]
        );
        assert!(!config.show_progress);
    }

    #[test]
    fn test_bad_env_values() {
        let mut config = BatchConfig::default();
        assert!(config.apply_overrides(env(&[("MESHQA_THREADS", "0")])).is_err());

        let mut config = BatchConfig::default();
        assert!(config.apply_overrides(env(&[("MESHQA_ANALYZERS", "volume")])).is_err());

        let mut config = BatchConfig::default();
        assert!(config.apply_overrides(env(&[("MESHQA_PROGRESS", "maybe")])).is_err());
    }
}
