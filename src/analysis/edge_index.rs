// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Undirected edge keys and per-edge face incidence counts

use crate::error::{MeshError, Result};
use crate::geometry::MeshHandle;
use ahash::AHashMap;

/// Canonical undirected edge, packed as `low * 2^31 + high`.
///
/// Packing is injective only while both vertex indices are below 2^31;
/// [`EdgeKey::new`] rejects anything larger instead of wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeKey(u64);

impl EdgeKey {
    /// Exclusive upper bound on vertex indices
    pub const VERTEX_LIMIT: usize = 1 << 31;

    pub fn new(a: usize, b: usize) -> Result<Self> {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        if high >= Self::VERTEX_LIMIT {
            return Err(MeshError::EdgeKeyOverflow { vertex: high });
        }
        Ok(Self(((low as u64) << 31) | high as u64))
    }

    /// `(low, high)` vertex indices
    pub fn vertices(self) -> (usize, usize) {
        let mask = (Self::VERTEX_LIMIT as u64) - 1;
        ((self.0 >> 31) as usize, (self.0 & mask) as usize)
    }

    pub fn packed(self) -> u64 {
        self.0
    }
}

/// Map from undirected edge to the number of face sides using it.
///
/// For a closed, manifold, consistently oriented mesh every count is 2.
/// Count 1 marks a boundary edge, 3 or more a non-manifold edge.
#[derive(Debug, Clone, Default)]
pub struct EdgeIncidence {
    counts: AHashMap<EdgeKey, u32>,
}

impl EdgeIncidence {
    /// Count every cyclic edge of every face.
    ///
    /// Collapsed edges (a face repeating a vertex index) are not edges and
    /// are skipped.
    pub fn build<M: MeshHandle + ?Sized>(mesh: &M) -> Result<Self> {
        let mut counts: AHashMap<EdgeKey, u32> = AHashMap::with_capacity(mesh.face_count() * 3 / 2);

        for f in 0..mesh.face_count() {
            let face = mesh.face(f);
            for (i, &from) in face.iter().enumerate() {
                let to = face[(i + 1) % face.len()];
                if from == to {
                    continue;
                }
                *counts.entry(EdgeKey::new(from, to)?).or_insert(0) += 1;
            }
        }

        Ok(Self { counts })
    }

    pub fn count(&self, key: EdgeKey) -> u32 {
        self.counts.get(&key).copied().unwrap_or(0)
    }

    /// Number of distinct undirected edges
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (EdgeKey, u32)> + '_ {
        self.counts.iter().map(|(&key, &count)| (key, count))
    }

    /// Edges used by exactly one face, in ascending key order.
    pub fn boundary_edges(&self) -> Vec<EdgeKey> {
        self.edges_where(|count| count == 1)
    }

    /// Edges used by three or more faces, in ascending key order.
    pub fn non_manifold_edges(&self) -> Vec<EdgeKey> {
        self.edges_where(|count| count >= 3)
    }

    /// Every edge is shared by exactly two faces.
    pub fn is_closed_manifold(&self) -> bool {
        !self.counts.is_empty() && self.counts.values().all(|&count| count == 2)
    }

    fn edges_where(&self, keep: impl Fn(u32) -> bool) -> Vec<EdgeKey> {
        let mut edges: Vec<EdgeKey> = self
            .counts
            .iter()
            .filter(|&(_, &count)| keep(count))
            .map(|(&key, _)| key)
            .collect();
        edges.sort_unstable();
        edges
    }
}
