//! Bounding Volume Hierarchy (BVH) acceleration structure.
//!
//! Uses a binary tree of bounding boxes over the bounded children of an
//! aggregate. Unbounded children (planes, tubes) cannot be placed in the tree
//! and are tested on every query.

use glint_math::{Aabb, Interval, Ray};

use crate::intersectable::{Intersectable, Intersection};

/// Maximum primitives per leaf node before splitting.
const LEAF_MAX_SIZE: usize = 4;

/// BVH node - either a branch with two children or a leaf with primitives.
pub enum BvhNode {
    /// Internal node with two children.
    Branch {
        left: Box<BvhNode>,
        right: Box<BvhNode>,
        bbox: Aabb,
    },
    /// Leaf node with a small number of primitives.
    Leaf {
        objects: Vec<(Box<dyn Intersectable>, Aabb)>,
        bbox: Aabb,
    },
    /// Empty node (no bounded children).
    Empty,
}

impl BvhNode {
    /// Recursive BVH construction.
    ///
    /// Simple median-split approach: sort objects by centroid on the longest
    /// axis of the centroid bounds, split in half, recurse.
    fn build(mut objects: Vec<(Box<dyn Intersectable>, Aabb)>) -> Self {
        let n = objects.len();
        if n == 0 {
            return BvhNode::Empty;
        }

        let bounds = objects
            .iter()
            .fold(Aabb::EMPTY, |acc, (_, b)| Aabb::surrounding(&acc, b));

        if n <= LEAF_MAX_SIZE {
            return BvhNode::Leaf {
                objects,
                bbox: bounds,
            };
        }

        let centroid_bounds = objects.iter().fold(Aabb::EMPTY, |acc, (_, b)| {
            let c = b.centroid();
            Aabb::surrounding(&acc, &Aabb::from_points(c, c))
        });
        let axis = centroid_bounds.longest_axis();

        objects.sort_unstable_by(|(_, a), (_, b)| {
            let a_val = a.centroid()[axis];
            let b_val = b.centroid()[axis];
            a_val.total_cmp(&b_val)
        });

        let mid = n / 2;
        let right_objects = objects.split_off(mid);
        let left_objects = objects;

        BvhNode::Branch {
            left: Box::new(Self::build(left_objects)),
            right: Box::new(Self::build(right_objects)),
            bbox: bounds,
        }
    }

    /// Collect every hit within `ray_t` into `hits`.
    fn collect<'a>(&'a self, ray: &Ray, ray_t: Interval, hits: &mut Vec<Intersection<'a>>) {
        match self {
            BvhNode::Empty => {}

            BvhNode::Leaf { objects, bbox } => {
                if !bbox.hit(ray, ray_t) {
                    return;
                }
                for (object, _) in objects {
                    hits.extend(object.intersect(ray, ray_t.max));
                }
            }

            BvhNode::Branch { left, right, bbox } => {
                if !bbox.hit(ray, ray_t) {
                    return;
                }
                left.collect(ray, ray_t, hits);
                right.collect(ray, ray_t, hits);
            }
        }
    }

    fn bounding_box(&self) -> Option<Aabb> {
        match self {
            BvhNode::Empty => None,
            BvhNode::Leaf { bbox, .. } | BvhNode::Branch { bbox, .. } => Some(*bbox),
        }
    }

    /// (nodes, leaves, depth) of the subtree.
    fn stats(&self) -> (usize, usize, usize) {
        match self {
            BvhNode::Empty => (0, 0, 0),
            BvhNode::Leaf { .. } => (1, 1, 1),
            BvhNode::Branch { left, right, .. } => {
                let (ln, ll, ld) = left.stats();
                let (rn, rl, rd) = right.stats();
                (1 + ln + rn, ll + rl, 1 + ld.max(rd))
            }
        }
    }
}

/// An aggregate that prunes ray tests with a bounding volume hierarchy.
///
/// Returns exactly the hits a flat [`crate::Geometries`] over the same
/// children would, only faster.
pub struct Bvh {
    root: BvhNode,
    unbounded: Vec<Box<dyn Intersectable>>,
}

impl Bvh {
    /// Build a BVH over `objects`.
    pub fn build(objects: Vec<Box<dyn Intersectable>>) -> Self {
        let total = objects.len();
        let mut bounded = Vec::with_capacity(total);
        let mut unbounded = Vec::new();

        for object in objects {
            match object.bounding_box() {
                Some(bbox) => bounded.push((object, bbox)),
                None => unbounded.push(object),
            }
        }

        let root = BvhNode::build(bounded);
        let (nodes, leaves, depth) = root.stats();
        log::info!(
            "Built BVH over {} objects: {} nodes, {} leaves, depth {}, {} unbounded",
            total,
            nodes,
            leaves,
            depth,
            unbounded.len()
        );

        Self { root, unbounded }
    }

    pub fn root(&self) -> &BvhNode {
        &self.root
    }

    /// Number of children kept outside the tree.
    pub fn unbounded_len(&self) -> usize {
        self.unbounded.len()
    }
}

impl Intersectable for Bvh {
    fn intersect<'a>(&'a self, ray: &Ray, max_distance: f64) -> Vec<Intersection<'a>> {
        let mut hits = Vec::new();
        for object in &self.unbounded {
            hits.extend(object.intersect(ray, max_distance));
        }
        self.root
            .collect(ray, Interval::new(0.0, max_distance), &mut hits);
        hits
    }

    fn bounding_box(&self) -> Option<Aabb> {
        if self.unbounded.is_empty() {
            self.root.bounding_box()
        } else {
            None
        }
    }
}
