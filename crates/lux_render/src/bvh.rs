//! Bounding Volume Hierarchy (BVH) acceleration structure.
//!
//! Nodes live in one contiguous arena and reference children and objects by
//! index, so the accelerator owns no borrow of the collection it indexes:
//! every query takes the same slice the tree was built over. Built once,
//! read-only afterwards.

use crate::{closer, Hittable, Intersection};
use lux_math::{Aabb, Ray};
use std::time::Instant;

/// Split policy selector.
///
/// Only the naive median split is implemented; `Sah` is accepted and
/// recorded but no build path branches on the selector yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitMethod {
    /// Median split on the widest centroid axis
    Naive,
    /// Surface-area heuristic (declared, not implemented)
    Sah,
}

/// One node of the tree: subtree bounds plus either an object index (leaf)
/// or two child node indices.
#[derive(Debug, Clone, Copy)]
struct BvhNode {
    bounds: Aabb,
    kind: NodeKind,
}

#[derive(Debug, Clone, Copy)]
enum NodeKind {
    Leaf { object: usize },
    Internal { left: usize, right: usize },
}

/// BVH accelerator over a slice of hittable objects.
pub struct Bvh {
    nodes: Vec<BvhNode>,
    root: Option<usize>,
    /// Configured leaf capacity, clamped to 255. The naive median split
    /// never consults it: leaves always hold exactly one object.
    pub max_leaf_prims: usize,
    /// Recorded split policy.
    pub split_method: SplitMethod,
}

impl Bvh {
    /// Build a tree over `objects`. An empty slice yields an empty tree
    /// whose queries all report a miss.
    pub fn build<T: Hittable>(
        objects: &[T],
        max_leaf_prims: usize,
        split_method: SplitMethod,
    ) -> Self {
        let mut bvh = Self {
            nodes: Vec::new(),
            root: None,
            max_leaf_prims: max_leaf_prims.min(255),
            split_method,
        };
        if objects.is_empty() {
            return bvh;
        }

        let start = Instant::now();
        let mut order: Vec<usize> = (0..objects.len()).collect();
        let root = bvh.build_recursive(objects, &mut order);
        bvh.root = Some(root);
        log::info!(
            "BVH over {} objects built in {:.2?} ({} nodes)",
            objects.len(),
            start.elapsed(),
            bvh.nodes.len()
        );
        bvh
    }

    /// Recursively partition `order` (indices into `objects`) and return the
    /// arena index of the subtree root.
    fn build_recursive<T: Hittable>(&mut self, objects: &[T], order: &mut [usize]) -> usize {
        match order.len() {
            0 => unreachable!("empty partition is guarded at the top level"),
            1 => self.push(BvhNode {
                bounds: objects[order[0]].bounds(),
                kind: NodeKind::Leaf { object: order[0] },
            }),
            // Two objects always become two single-object leaves in the
            // given order, whatever max_leaf_prims says.
            2 => {
                let (lo, hi) = order.split_at_mut(1);
                let left = self.build_recursive(objects, lo);
                let right = self.build_recursive(objects, hi);
                self.push_internal(left, right)
            }
            n => {
                // Split axis comes from the spread of the centroid points,
                // not the full bounds.
                let centroid_bounds = order.iter().fold(Aabb::EMPTY, |acc, &i| {
                    acc.union_point(objects[i].bounds().centroid())
                });
                let axis = centroid_bounds.max_extent();

                order.sort_unstable_by(|&a, &b| {
                    let ca = objects[a].bounds().centroid()[axis];
                    let cb = objects[b].bounds().centroid()[axis];
                    ca.partial_cmp(&cb).unwrap_or(std::cmp::Ordering::Equal)
                });

                let (lo, hi) = order.split_at_mut(n / 2);
                assert_eq!(lo.len() + hi.len(), n, "median partition lost objects");

                let left = self.build_recursive(objects, lo);
                let right = self.build_recursive(objects, hi);
                self.push_internal(left, right)
            }
        }
    }

    fn push(&mut self, node: BvhNode) -> usize {
        self.nodes.push(node);
        self.nodes.len() - 1
    }

    fn push_internal(&mut self, left: usize, right: usize) -> usize {
        let bounds = self.nodes[left].bounds.union(&self.nodes[right].bounds);
        self.push(BvhNode {
            bounds,
            kind: NodeKind::Internal { left, right },
        })
    }

    /// Whether the tree holds no objects.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Number of nodes in the arena.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Bounds of the whole tree, if non-empty.
    pub fn root_bounds(&self) -> Option<Aabb> {
        self.root.map(|id| self.nodes[id].bounds)
    }

    /// First hit of `ray` against the tree, queried over the same slice the
    /// tree was built from. An empty tree reports a miss.
    pub fn intersect<'a, T: Hittable>(&self, objects: &'a [T], ray: &Ray) -> Intersection<'a> {
        match self.root {
            Some(root) => self.node_intersect(root, objects, ray),
            None => Intersection::default(),
        }
    }

    fn node_intersect<'a, T: Hittable>(
        &self,
        id: usize,
        objects: &'a [T],
        ray: &Ray,
    ) -> Intersection<'a> {
        let node = &self.nodes[id];

        let dir_is_pos = ray.dir_is_pos();
        if !node.bounds.intersect_p(ray, ray.direction_inv, dir_is_pos) {
            return Intersection::default();
        }

        match node.kind {
            NodeKind::Leaf { object } => objects[object].intersect(ray),
            // Both children are visited unconditionally; the closer result
            // wins, ties going to the left subtree.
            NodeKind::Internal { left, right } => {
                let hit1 = self.node_intersect(left, objects, ray);
                let hit2 = self.node_intersect(right, objects, ray);
                if closer(&hit1, &hit2) {
                    hit1
                } else {
                    hit2
                }
            }
        }
    }
}
