use serde::{Deserialize, Serialize};

use crate::engine::Point;

/// An undirected edge between two editor vertex indices.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeRef {
	pub v1: usize,
	pub v2: usize,
}

impl EdgeRef {
	pub fn new(v1: usize, v2: usize) -> Self {
		Self { v1, v2 }
	}

	pub fn touches(&self, v: usize) -> bool {
		self.v1 == v || self.v2 == v
	}

	pub fn joins(&self, a: usize, b: usize) -> bool {
		(self.v1 == a && self.v2 == b) || (self.v1 == b && self.v2 == a)
	}

	pub fn other(&self, v: usize) -> usize {
		if self.v1 == v { self.v2 } else { self.v1 }
	}
}

/// Serialized form of an editor graph. Deleted vertices appear as `null`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphDocument {
	pub vertices: Vec<Option<Point>>,
	pub edges: Vec<EdgeRef>,
}
