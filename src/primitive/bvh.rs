use crate::core::{bbox::Bbox, intersection::Intersection, ray::Ray, rng::Rng};

use super::{Primitive, PrimitiveT};

/// Binary BVH over an arena of primitives. Built once per scene, immutable
/// afterward; nodes reference children by index instead of owning pointers.
pub struct Bvh {
    nodes: Vec<BvhNode>,
    root: Option<u32>,
    primitives: Vec<Primitive>,
    unbounded: Vec<Primitive>,
}

struct BvhNode {
    bbox: Bbox,
    left: Child,
    right: Child,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Child {
    Node(u32),
    Prim(u32),
}

impl Bvh {
    /// Bulk construction; the primitive order is disturbed by partitioning.
    /// Primitives that cannot report a bounding box are diagnosed and kept
    /// on a linearly scanned side list instead of entering the tree.
    pub fn build(primitives: Vec<Primitive>, rng: &mut Rng) -> Self {
        let mut bounded = Vec::with_capacity(primitives.len());
        let mut unbounded = Vec::new();
        for primitive in primitives {
            if primitive.bounding_box().is_some() {
                bounded.push(primitive);
            } else {
                log::warn!("bvh - primitive without a bounding box falls back to linear scan");
                unbounded.push(primitive);
            }
        }

        let mut bvh = Self {
            nodes: Vec::new(),
            root: None,
            primitives: bounded,
            unbounded,
        };

        let n = bvh.primitives.len();
        if n == 1 {
            // both children alias the single primitive, so traversal never
            // needs to null-check
            let bbox = bvh.primitives[0].bounding_box().unwrap();
            bvh.nodes.push(BvhNode {
                bbox,
                left: Child::Prim(0),
                right: Child::Prim(0),
            });
            bvh.root = Some(0);
        } else if n > 1 {
            match bvh.build_range(0, n, rng) {
                Child::Node(index) => bvh.root = Some(index),
                Child::Prim(_) => unreachable!("range of >= 2 always builds a node"),
            }
        }
        bvh
    }

    fn build_range(&mut self, start: usize, end: usize, rng: &mut Rng) -> Child {
        if end - start == 1 {
            return Child::Prim(start as u32);
        }

        let axis = ((rng.uniform_1d() * 3.0) as usize).min(2);
        self.primitives[start..end].sort_unstable_by(|a, b| {
            let a_min = a.bounding_box().unwrap().axis_min(axis);
            let b_min = b.bounding_box().unwrap().axis_min(axis);
            a_min.partial_cmp(&b_min).unwrap_or(std::cmp::Ordering::Equal)
        });

        let (left, right) = if end - start == 2 {
            (Child::Prim(start as u32), Child::Prim(start as u32 + 1))
        } else {
            let mid = start + (end - start) / 2;
            (
                self.build_range(start, mid, rng),
                self.build_range(mid, end, rng),
            )
        };

        // exact union of both children, computed after recursion bottom-up
        let bbox = self.child_bbox(left).merge(self.child_bbox(right));
        let index = self.nodes.len() as u32;
        self.nodes.push(BvhNode { bbox, left, right });
        Child::Node(index)
    }

    fn child_bbox(&self, child: Child) -> Bbox {
        match child {
            Child::Node(index) => self.nodes[index as usize].bbox,
            Child::Prim(index) => self.primitives[index as usize].bounding_box().unwrap(),
        }
    }

    fn intersect_node(&self, index: u32, ray: &Ray, inter: &mut Intersection) -> bool {
        let node = &self.nodes[index as usize];
        if !node.bbox.intersect_test(ray, inter.t) {
            return false;
        }
        // both subtrees are probed; the shared record keeps the nearer hit
        let hit_left = self.intersect_child(node.left, ray, inter);
        let hit_right = self.intersect_child(node.right, ray, inter);
        hit_left || hit_right
    }

    fn intersect_child(&self, child: Child, ray: &Ray, inter: &mut Intersection) -> bool {
        match child {
            Child::Node(index) => self.intersect_node(index, ray, inter),
            Child::Prim(index) => self.primitives[index as usize].intersect(ray, inter),
        }
    }

    fn pdf_value_child(&self, child: Child, origin: glam::Vec3A, direction: glam::Vec3A) -> f32 {
        match child {
            Child::Node(index) => {
                let node = &self.nodes[index as usize];
                0.5 * (self.pdf_value_child(node.left, origin, direction)
                    + self.pdf_value_child(node.right, origin, direction))
            }
            Child::Prim(index) => self.primitives[index as usize].pdf_value(origin, direction),
        }
    }

    fn random_child(&self, child: Child, origin: glam::Vec3A, rng: &mut Rng) -> glam::Vec3A {
        match child {
            Child::Node(index) => {
                let node = &self.nodes[index as usize];
                let next = if rng.uniform_1d() < 0.5 {
                    node.left
                } else {
                    node.right
                };
                self.random_child(next, origin, rng)
            }
            Child::Prim(index) => self.primitives[index as usize].random(origin, rng),
        }
    }
}

impl PrimitiveT for Bvh {
    fn intersect(&self, ray: &Ray, inter: &mut Intersection) -> bool {
        let mut result = false;
        for primitive in &self.unbounded {
            result |= primitive.intersect(ray, inter);
        }
        if let Some(root) = self.root {
            result |= self.intersect_node(root, ray, inter);
        }
        result
    }

    fn bounding_box(&self) -> Option<Bbox> {
        if !self.unbounded.is_empty() {
            return None;
        }
        match self.root {
            Some(root) => Some(self.nodes[root as usize].bbox),
            None => Some(Bbox::empty()),
        }
    }

    fn pdf_value(&self, origin: glam::Vec3A, direction: glam::Vec3A) -> f32 {
        match self.root {
            Some(root) => self.pdf_value_child(Child::Node(root), origin, direction),
            None => 0.0,
        }
    }

    fn random(&self, origin: glam::Vec3A, rng: &mut Rng) -> glam::Vec3A {
        match self.root {
            Some(root) => self.random_child(Child::Node(root), origin, rng),
            None => glam::Vec3A::X,
        }
    }
}
