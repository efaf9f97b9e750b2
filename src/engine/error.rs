//! Solver and animation errors.

use thiserror::Error;

/// Failures reported by the shortest-path solvers.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SolveError {
	/// The requested source is not a vertex of the graph.
	#[error("vertex {0} is not part of the graph")]
	VertexNotFound(String),
	/// An adjacency entry names a vertex that was never added.
	#[error("vertex {vertex} lists unknown neighbor {neighbor}")]
	DanglingNeighbor {
		/// Vertex owning the adjacency entry.
		vertex: String,
		/// Neighbor missing from the graph.
		neighbor: String,
	},
	/// The destination was not reached from the source.
	#[error("no path exists to vertex {0}")]
	NoPathExists(String),
}

/// Failures reported when building a path animation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnimationError {
	/// Edge `index` of the path has a zero or non-finite pixel length.
	#[error("edge {index} of the path has no drawable length")]
	DegenerateEdge {
		/// Position of the edge within the path.
		index: usize,
	},
	/// Velocity or frame rate is not a positive finite number.
	#[error("invalid animation config: {0}")]
	InvalidConfig(&'static str),
}
