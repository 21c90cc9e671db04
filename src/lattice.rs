//! Nodes and the rectangular lattice that holds them.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::ops::{Index, IndexMut};

/// A single prototype in the self-organizing map.
///
/// Each node has a fixed position on the 2D grid and a mutable weight vector
/// that is pulled toward training inputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Column position on the grid.
    pub x: usize,
    /// Row position on the grid.
    pub y: usize,
    /// The prototype weight vector.
    pub weights: Vec<f64>,
}

impl Node {
    /// Creates a new node with zeroed weights.
    pub fn new(x: usize, y: usize, dimensions: usize) -> Self {
        Self {
            x,
            y,
            weights: vec![0.0; dimensions],
        }
    }

    /// Returns the grid position as a vector, so distance kernels can measure
    /// topological distance the same way they measure weight-space distance.
    #[inline]
    pub fn position(&self) -> [f64; 2] {
        [self.x as f64, self.y as f64]
    }

    /// Moves the weights toward `input` by the given influence.
    ///
    /// Operates over the shorter of the two vectors; missing (NaN) input
    /// dimensions are left untouched.
    pub fn adjust(&mut self, input: &[f64], influence: f64) {
        for (w, &value) in self.weights.iter_mut().zip(input.iter()) {
            if value.is_nan() {
                continue;
            }
            *w += (value - *w) * influence;
        }
    }
}

/// An ordered collection of nodes arranged in a rectangular grid.
///
/// Nodes are stored in row-major order: index `k = y * width + x`. The
/// lattice is created once at initialization time and never resized; only
/// the weight vectors mutate afterwards.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Lattice {
    nodes: Vec<Node>,
}

impl Lattice {
    /// Creates a `width x height` lattice of zero-weight nodes.
    pub fn new(width: usize, height: usize, dimensions: usize) -> Self {
        let mut nodes = Vec::with_capacity(width * height);

        for y in 0..height {
            for x in 0..width {
                nodes.push(Node::new(x, y, dimensions));
            }
        }

        Self { nodes }
    }

    /// Returns the number of nodes.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the lattice has no nodes yet.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns a node by its row-major index.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&Node> {
        self.nodes.get(index)
    }

    /// Iterates over all nodes in canonical order.
    pub fn iter(&self) -> std::slice::Iter<'_, Node> {
        self.nodes.iter()
    }

    /// Iterates mutably over all nodes in canonical order.
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Node> {
        self.nodes.iter_mut()
    }

    /// Returns all nodes reordered by the comparator, without mutating the
    /// canonical order.
    pub fn ranked_by<F>(&self, mut compare: F) -> Vec<&Node>
    where
        F: FnMut(&Node, &Node) -> Ordering,
    {
        let mut ordered: Vec<&Node> = self.nodes.iter().collect();
        ordered.sort_by(|a, b| compare(a, b));
        ordered
    }
}

impl Index<usize> for Lattice {
    type Output = Node;

    fn index(&self, index: usize) -> &Node {
        &self.nodes[index]
    }
}

impl IndexMut<usize> for Lattice {
    fn index_mut(&mut self, index: usize) -> &mut Node {
        &mut self.nodes[index]
    }
}

impl<'a> IntoIterator for &'a Lattice {
    type Item = &'a Node;
    type IntoIter = std::slice::Iter<'a, Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
