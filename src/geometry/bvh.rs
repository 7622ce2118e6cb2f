// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Bounding Volume Hierarchy (BVH) for spatial acceleration
//! Used as the broad phase of self-intersection detection

use super::BoundingBox;

/// BVH node
#[derive(Debug, Clone)]
pub struct BVHNode {
    /// Bounding box of this node
    pub bbox: BoundingBox,
    /// Left child (None for leaf)
    pub left: Option<Box<BVHNode>>,
    /// Right child (None for leaf)
    pub right: Option<Box<BVHNode>>,
    /// Triangle entries (only for leaf nodes)
    pub triangles: Vec<(usize, BoundingBox)>,
}

impl BVHNode {
    fn leaf(bbox: BoundingBox, triangles: Vec<(usize, BoundingBox)>) -> Self {
        Self {
            bbox,
            left: None,
            right: None,
            triangles,
        }
    }

    fn internal(bbox: BoundingBox, left: Box<BVHNode>, right: Box<BVHNode>) -> Self {
        Self {
            bbox,
            left: Some(left),
            right: Some(right),
            triangles: Vec::new(),
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }
}

/// Bounding Volume Hierarchy over triangle bounding boxes
pub struct BVH {
    root: BVHNode,
}

impl BVH {
    /// Build BVH from `(triangle_index, bbox)` pairs
    pub fn build(triangles: Vec<(usize, BoundingBox)>) -> Self {
        if triangles.is_empty() {
            return Self {
                root: BVHNode::leaf(BoundingBox::empty(), Vec::new()),
            };
        }

        let root = Self::build_recursive(triangles, 0);
        Self { root }
    }

    fn build_recursive(mut triangles: Vec<(usize, BoundingBox)>, depth: usize) -> BVHNode {
        const MAX_DEPTH: usize = 48;
        const MIN_TRIANGLES: usize = 4;

        let bbox = Self::compute_union_bbox(&triangles);

        if triangles.len() <= MIN_TRIANGLES || depth >= MAX_DEPTH {
            return BVHNode::leaf(bbox, triangles);
        }

        // Split along the longest axis of the centroid spread
        let axis = Self::find_best_split_axis(&triangles);
        let mid = triangles.len() / 2;
        triangles.select_nth_unstable_by(mid, |(_, a), (_, b)| {
            a.center()[axis].total_cmp(&b.center()[axis])
        });
        let right_triangles = triangles.split_off(mid);

        let left = Box::new(Self::build_recursive(triangles, depth + 1));
        let right = Box::new(Self::build_recursive(right_triangles, depth + 1));

        BVHNode::internal(bbox, left, right)
    }

    fn find_best_split_axis(triangles: &[(usize, BoundingBox)]) -> usize {
        let centers = BoundingBox::from_points(
            triangles
                .iter()
                .map(|(_, bbox)| bbox.center())
                .collect::<Vec<_>>()
                .iter(),
        );
        let size = centers.size();

        if size.x >= size.y && size.x >= size.z {
            0
        } else if size.y >= size.z {
            1
        } else {
            2
        }
    }

    fn compute_union_bbox(triangles: &[(usize, BoundingBox)]) -> BoundingBox {
        triangles
            .iter()
            .fold(BoundingBox::empty(), |acc, (_, bbox)| acc.union(bbox))
    }

    /// Triangles whose boxes overlap `bbox`, in unspecified order
    pub fn query_triangles(&self, bbox: &BoundingBox) -> Vec<usize> {
        let mut result = Vec::new();
        self.query_with(bbox, |index| result.push(index));
        result
    }

    /// Visit every triangle whose box overlaps `bbox`.
    pub fn query_with<F: FnMut(usize)>(&self, bbox: &BoundingBox, mut visit: F) {
        let mut stack: Vec<&BVHNode> = vec![&self.root];
        while let Some(node) = stack.pop() {
            if !node.bbox.intersects(bbox) {
                continue;
            }
            if node.is_leaf() {
                for (index, tri_bbox) in &node.triangles {
                    if tri_bbox.intersects(bbox) {
                        visit(*index);
                    }
                }
            } else {
                if let Some(ref left) = node.left {
                    stack.push(left);
                }
                if let Some(ref right) = node.right {
                    stack.push(right);
                }
            }
        }
    }

    #[cfg(test)]
    pub fn root(&self) -> &BVHNode {
        &self.root
    }
}
