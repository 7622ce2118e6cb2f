// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Analysis module - topology and geometry defect metrics

pub mod boundary;
pub mod edge_index;
pub mod flux;
pub mod segment;
pub mod self_intersection;

pub use boundary::{analyze_boundary, BoundaryGraph, BoundaryReport};
pub use edge_index::{EdgeIncidence, EdgeKey};
pub use flux::{flux_integrity, FluxReport, PROBE_VECTOR};
pub use segment::{count_components, label_components};
pub use self_intersection::{detect_self_intersections, intersecting_pairs, SelfIntersectionReport};

use serde::{Deserialize, Serialize};

/// One per-file metric, each written to its own output directory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AnalyzerKind {
    #[serde(rename = "dangling_edge")]
    BoundaryLength,
    #[serde(rename = "dangling_edge_describe")]
    BoundaryGraph,
    #[serde(rename = "segment_num")]
    SegmentCount,
    #[serde(rename = "flux_enclosure_error")]
    Flux,
    #[serde(rename = "self_intersection")]
    SelfIntersection,
}

impl AnalyzerKind {
    pub const ALL: [AnalyzerKind; 5] = [
        AnalyzerKind::BoundaryLength,
        AnalyzerKind::BoundaryGraph,
        AnalyzerKind::SegmentCount,
        AnalyzerKind::Flux,
        AnalyzerKind::SelfIntersection,
    ];

    /// Stable name used in config files and `MESHQA_ANALYZERS`
    pub fn as_str(&self) -> &'static str {
        match self {
            AnalyzerKind::BoundaryLength => "dangling_edge",
            AnalyzerKind::BoundaryGraph => "dangling_edge_describe",
            AnalyzerKind::SegmentCount => "segment_num",
            AnalyzerKind::Flux => "flux_enclosure_error",
            AnalyzerKind::SelfIntersection => "self_intersection",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        let s = s.trim().to_lowercase();
        Self::ALL.into_iter().find(|kind| kind.as_str() == s)
    }

    /// Suffix appended to the input directory to form the output directory
    pub fn suffix(&self) -> String {
        format!("_{}", self.as_str())
    }

    /// Whether an existing artifact means the work is already done.
    ///
    /// Only self-intersection skips; every other analyzer overwrites.
    pub fn honours_existing_output(&self) -> bool {
        matches!(self, AnalyzerKind::SelfIntersection)
    }
}

impl std::fmt::Display for AnalyzerKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
