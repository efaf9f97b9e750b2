//! Undirected weighted graph keyed by an ordered vertex identifier.

use std::collections::BTreeMap;
use std::fmt::Debug;

use super::error::SolveError;

/// Neighbor identifier to edge weight.
pub type Adjacency<V> = BTreeMap<V, f64>;

/// Adjacency-map graph. An undirected edge is stored once per endpoint.
#[derive(Clone, Debug, PartialEq)]
pub struct Graph<V> {
	vertices: BTreeMap<V, Adjacency<V>>,
}

impl<V> Default for Graph<V> {
	fn default() -> Self {
		Self {
			vertices: BTreeMap::new(),
		}
	}
}

impl<V: Ord + Clone> Graph<V> {
	/// An empty graph.
	pub fn new() -> Self {
		Self::default()
	}

	/// Inserts `id`, replacing any adjacency it already had.
	pub fn add_vertex<I>(&mut self, id: V, neighbors: I)
	where
		I: IntoIterator<Item = (V, f64)>,
	{
		self.vertices.insert(id, neighbors.into_iter().collect());
	}

	/// Every vertex with its adjacency.
	pub fn vertices(&self) -> &BTreeMap<V, Adjacency<V>> {
		&self.vertices
	}

	/// Every directed adjacency entry as `(from, to)`.
	pub fn edges(&self) -> impl Iterator<Item = (&V, &V)> + Clone + '_ {
		self.vertices
			.iter()
			.flat_map(|(from, adjacency)| adjacency.keys().map(move |to| (from, to)))
	}

	/// Adjacency of `id`, if it is a vertex.
	pub fn neighbors(&self, id: &V) -> Option<&Adjacency<V>> {
		self.vertices.get(id)
	}

	/// Weight of the edge `from` -> `to` as listed by `from`.
	pub fn weight(&self, from: &V, to: &V) -> Option<f64> {
		self.vertices.get(from)?.get(to).copied()
	}

	/// Whether `id` is a vertex.
	pub fn contains(&self, id: &V) -> bool {
		self.vertices.contains_key(id)
	}

	/// Number of vertices.
	pub fn len(&self) -> usize {
		self.vertices.len()
	}

	/// True when the graph has no vertices.
	pub fn is_empty(&self) -> bool {
		self.vertices.is_empty()
	}

	/// True when every edge is listed by both endpoints with the same weight.
	pub fn is_symmetric(&self) -> bool {
		self.edges()
			.all(|(from, to)| self.weight(to, from) == self.weight(from, to))
	}
}

impl<V: Ord + Clone + Debug> Graph<V> {
	/// Checks that every neighbor is itself a vertex.
	pub fn validate(&self) -> Result<(), SolveError> {
		match self.edges().find(|(_, to)| !self.contains(to)) {
			Some((from, to)) => Err(SolveError::DanglingNeighbor {
				vertex: format!("{from:?}"),
				neighbor: format!("{to:?}"),
			}),
			None => Ok(()),
		}
	}
}
