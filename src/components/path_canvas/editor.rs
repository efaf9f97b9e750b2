//! Editable vertex/edge set behind the canvas.

use log::{debug, info};
use thiserror::Error;

use super::types::{EdgeRef, GraphDocument};
use crate::engine::{Graph, PixelMapping, Point, Viewport};

/// Vertices further than this many pixels from a click are not picked.
pub const PICK_RADIUS: f64 = 20.0;
/// Dragging only moves a vertex grabbed within this many pixels.
pub const DRAG_RADIUS: f64 = 50.0;

#[derive(Debug, Error)]
pub enum EditorError {
	#[error("vertex {0} does not exist")]
	UnknownVertex(usize),
	#[error("select {expected} vertices (currently {found})")]
	SelectionSize { expected: usize, found: usize },
	#[error("no edge between vertices {0} and {1}")]
	EdgeNotFound(usize, usize),
	#[error("malformed path \"{0}\", expected e.g. 1,2,3,4")]
	BadPathInput(String),
	#[error("could not read graph document: {0}")]
	Document(#[from] serde_json::Error),
}

/// Vertex positions (normalized), edges and the current selection.
///
/// Deleting a vertex leaves a `None` hole so other indices stay stable;
/// [`EditorState::compact`] removes the holes.
#[derive(Clone, Debug, Default)]
pub struct EditorState {
	vertices: Vec<Option<Point>>,
	edges: Vec<EdgeRef>,
	selected: Vec<usize>,
}

impl EditorState {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn from_document(doc: GraphDocument) -> Result<Self, EditorError> {
		let state = Self {
			vertices: doc.vertices,
			edges: Vec::new(),
			selected: Vec::new(),
		};
		for edge in &doc.edges {
			state.position(edge.v1)?;
			state.position(edge.v2)?;
		}
		Ok(Self {
			edges: doc.edges,
			..state
		})
	}

	pub fn from_json(json: &str) -> Result<Self, EditorError> {
		Self::from_document(serde_json::from_str(json)?)
	}

	/// Compacted document, suitable for saving.
	pub fn to_document(&self) -> GraphDocument {
		let mut compacted = self.clone();
		compacted.compact();
		GraphDocument {
			vertices: compacted.vertices,
			edges: compacted.edges,
		}
	}

	pub fn to_json(&self) -> Result<String, EditorError> {
		Ok(serde_json::to_string(&self.to_document())?)
	}

	pub fn vertices(&self) -> impl Iterator<Item = (usize, Point)> + '_ {
		self.vertices
			.iter()
			.enumerate()
			.filter_map(|(i, v)| v.map(|p| (i, p)))
	}

	pub fn edges(&self) -> &[EdgeRef] {
		&self.edges
	}

	pub fn selected(&self) -> &[usize] {
		&self.selected
	}

	pub fn position(&self, v: usize) -> Result<Point, EditorError> {
		self.vertices
			.get(v)
			.copied()
			.flatten()
			.ok_or(EditorError::UnknownVertex(v))
	}

	pub fn edge_weight(&self, edge: &EdgeRef) -> Result<f64, EditorError> {
		Ok(self.position(edge.v1)?.distance(&self.position(edge.v2)?))
	}

	pub fn add_vertex(&mut self, at: Point) -> usize {
		self.vertices.push(Some(at));
		self.selected.clear();
		self.vertices.len() - 1
	}

	/// Closest live vertex within [`PICK_RADIUS`] pixels of `pixel`.
	pub fn vertex_near(&self, pixel: Point, viewport: &Viewport) -> Option<usize> {
		self.vertices()
			.map(|(i, p)| (i, viewport.to_pixels(p).distance(&pixel)))
			.filter(|(_, d)| *d < PICK_RADIUS)
			.min_by(|a, b| a.1.total_cmp(&b.1))
			.map(|(i, _)| i)
	}

	/// Selects `v`, adding it to the selection when `extend` is set.
	pub fn select(&mut self, v: usize, extend: bool) {
		if !extend {
			self.selected.clear();
		}
		self.selected.push(v);
	}

	pub fn clear_selection(&mut self) {
		self.selected.clear();
	}

	fn selected_pair(&self) -> Result<(usize, usize), EditorError> {
		match self.selected[..] {
			[a, b] => Ok((a, b)),
			_ => Err(EditorError::SelectionSize {
				expected: 2,
				found: self.selected.len(),
			}),
		}
	}

	/// Connects the two selected vertices. Returns `false` when they are
	/// already connected or are the same vertex.
	pub fn connect_selected(&mut self) -> Result<bool, EditorError> {
		let (a, b) = self.selected_pair()?;
		self.position(a)?;
		self.position(b)?;
		if a == b || self.edges.iter().any(|e| e.joins(a, b)) {
			return Ok(false);
		}
		self.edges.push(EdgeRef::new(a, b));
		debug!("connected V{a} and V{b}");
		Ok(true)
	}

	/// Splits the edge between the two selected vertices at its midpoint and
	/// returns the new vertex.
	pub fn split_selected_edge(&mut self) -> Result<usize, EditorError> {
		let (a, b) = self.selected_pair()?;
		let idx = self
			.edges
			.iter()
			.position(|e| e.joins(a, b))
			.ok_or(EditorError::EdgeNotFound(a, b))?;
		let mid = self.position(a)?.midpoint(&self.position(b)?);
		self.vertices.push(Some(mid));
		let new_vertex = self.vertices.len() - 1;
		self.edges[idx] = EdgeRef::new(a, new_vertex);
		self.edges.push(EdgeRef::new(new_vertex, b));
		debug!("split edge V{a}-V{b} at V{new_vertex}");
		Ok(new_vertex)
	}

	/// Deletes the single selected vertex and its edges, leaving a hole.
	/// Returns the number of edges removed.
	pub fn delete_selected(&mut self) -> Result<usize, EditorError> {
		let v = match self.selected[..] {
			[v] => v,
			_ => {
				return Err(EditorError::SelectionSize {
					expected: 1,
					found: self.selected.len(),
				});
			}
		};
		self.position(v)?;
		let before = self.edges.len();
		self.edges.retain(|e| !e.touches(v));
		self.vertices[v] = None;
		self.selected.clear();
		debug!("deleted V{v} and {} edges", before - self.edges.len());
		Ok(before - self.edges.len())
	}

	/// Moves the first selected vertex to `pixel` if it was grabbed close by.
	pub fn drag_selected(&mut self, pixel: Point, viewport: &Viewport) -> bool {
		let Some(&v) = self.selected.first() else {
			return false;
		};
		let Ok(current) = self.position(v) else {
			return false;
		};
		if viewport.to_pixels(current).distance(&pixel) > DRAG_RADIUS {
			return false;
		}
		self.vertices[v] = Some(viewport.to_normalized(pixel));
		true
	}

	pub fn clear(&mut self) {
		*self = Self::default();
	}

	/// Removes deleted-vertex holes. The returned table maps each old index
	/// to its new one (`None` for deleted vertices).
	pub fn compact(&mut self) -> Vec<Option<usize>> {
		let mut remap = Vec::with_capacity(self.vertices.len());
		let mut next = 0;
		for v in &self.vertices {
			remap.push(v.map(|_| {
				next += 1;
				next - 1
			}));
		}
		let old_len = self.vertices.len();
		self.vertices.retain(Option::is_some);
		for edge in &mut self.edges {
			// edges never touch deleted vertices
			if let (Some(v1), Some(v2)) = (remap[edge.v1], remap[edge.v2]) {
				*edge = EdgeRef::new(v1, v2);
			}
		}
		self.selected = self
			.selected
			.iter()
			.filter_map(|&v| remap.get(v).copied().flatten())
			.collect();
		info!(
			"compacted vertices, old count {old_len}, new count {}",
			self.vertices.len()
		);
		remap
	}

	/// Builds the solver graph, weighting each edge by the normalized
	/// Euclidean distance between its endpoints. Deleted vertices are absent.
	pub fn to_graph(&self) -> Graph<usize> {
		let mut graph = Graph::new();
		for (v, _) in self.vertices() {
			let neighbors = self
				.edges
				.iter()
				.filter(|e| e.touches(v))
				.filter_map(|e| self.edge_weight(e).ok().map(|w| (e.other(v), w)));
			graph.add_vertex(v, neighbors);
		}
		graph
	}

	/// Positions along a path of vertex indices.
	pub fn path_points(&self, path: &[usize]) -> Result<Vec<Point>, EditorError> {
		path.iter().map(|&v| self.position(v)).collect()
	}
}

/// Parses a comma-separated list of vertex indices such as `1,2,3`.
pub fn parse_path_input(input: &str) -> Result<Vec<usize>, EditorError> {
	input
		.split(',')
		.map(|part| part.trim().parse::<usize>())
		.collect::<Result<_, _>>()
		.map_err(|_| EditorError::BadPathInput(input.to_owned()))
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::engine::{Algorithm, SolveError};

	/// A-B-C laid out like a 3-4-5 triangle, plus an isolated D.
	fn sample() -> EditorState {
		let mut editor = EditorState::new();
		let a = editor.add_vertex(Point::new(0.0, 0.0));
		let b = editor.add_vertex(Point::new(0.3, 0.0));
		let c = editor.add_vertex(Point::new(0.3, 0.4));
		editor.add_vertex(Point::new(0.9, 0.9));
		for (x, y) in [(a, b), (b, c)] {
			editor.select(x, false);
			editor.select(y, true);
			assert!(editor.connect_selected().unwrap());
		}
		editor.clear_selection();
		editor
	}

	#[test]
	fn builds_symmetric_weighted_graph() {
		let graph = sample().to_graph();
		assert_eq!(graph.len(), 4);
		assert!(graph.is_symmetric());
		assert!((graph.weight(&0, &1).unwrap() - 0.3).abs() < 1e-12);
		assert!((graph.weight(&2, &1).unwrap() - 0.4).abs() < 1e-12);
		assert!(graph.neighbors(&3).unwrap().is_empty());
		let edge = EdgeRef::new(1, 2);
		assert_eq!(sample().edge_weight(&edge).unwrap(), graph.weight(&1, &2).unwrap());
		assert!(matches!(
			sample().edge_weight(&EdgeRef::new(1, 9)),
			Err(EditorError::UnknownVertex(9))
		));

		let solution = Algorithm::BellmanFord.solve(&graph, &0).unwrap();
		assert!((solution.distance(&2).unwrap() - 0.7).abs() < 1e-12);
		assert_eq!(solution.path_to(&2).unwrap(), [0, 1, 2]);
		assert!(matches!(
			solution.path_to(&3),
			Err(SolveError::NoPathExists(_))
		));
	}

	#[test]
	fn connect_requires_two_selected() {
		let mut editor = sample();
		editor.select(0, false);
		assert!(matches!(
			editor.connect_selected(),
			Err(EditorError::SelectionSize { expected: 2, found: 1 })
		));
		editor.select(1, true);
		assert!(!editor.connect_selected().unwrap());
		assert_eq!(editor.edges().len(), 2);
	}

	#[test]
	fn split_inserts_midpoint_vertex() {
		let mut editor = sample();
		editor.select(1, false);
		editor.select(0, true);
		let mid = editor.split_selected_edge().unwrap();
		assert_eq!(mid, 4);
		assert_eq!(editor.position(mid).unwrap(), Point::new(0.15, 0.0));
		assert!(editor.edges().contains(&EdgeRef::new(1, 4)));
		assert!(editor.edges().contains(&EdgeRef::new(4, 0)));
		assert!(!editor.edges().iter().any(|e| e.joins(0, 1)));

		let hops = Algorithm::Bfs.solve(&editor.to_graph(), &0).unwrap();
		assert_eq!(hops.path_to(&2).unwrap(), [0, 4, 1, 2]);

		editor.select(0, false);
		editor.select(2, true);
		assert!(matches!(
			editor.split_selected_edge(),
			Err(EditorError::EdgeNotFound(0, 2))
		));
	}

	#[test]
	fn delete_leaves_hole_and_compact_remaps() {
		let mut editor = sample();
		editor.select(1, false);
		assert_eq!(editor.delete_selected().unwrap(), 2);
		assert!(editor.edges().is_empty());
		assert!(matches!(editor.position(1), Err(EditorError::UnknownVertex(1))));

		let graph = editor.to_graph();
		assert!(!graph.contains(&1));
		assert!(graph.validate().is_ok());

		editor.select(2, false);
		editor.select(3, true);
		editor.connect_selected().unwrap();
		let remap = editor.compact();
		assert_eq!(remap, vec![Some(0), None, Some(1), Some(2)]);
		assert_eq!(editor.edges(), [EdgeRef::new(1, 2)]);
		assert_eq!(editor.selected(), [1, 2]);
		assert_eq!(editor.vertices().count(), 3);
	}

	#[test]
	fn document_round_trip_is_compacted() {
		let mut editor = sample();
		editor.select(3, false);
		editor.delete_selected().unwrap();
		let json = editor.to_json().unwrap();
		let loaded = EditorState::from_json(&json).unwrap();
		assert_eq!(loaded.vertices().count(), 3);
		assert_eq!(loaded.edges(), editor.edges());
		assert_eq!(loaded.to_graph(), editor.to_graph());
	}

	#[test]
	fn document_with_dangling_edge_is_rejected() {
		let json = r#"{"vertices":[{"x":0.1,"y":0.1},null],"edges":[{"v1":0,"v2":1}]}"#;
		assert!(matches!(
			EditorState::from_json(json),
			Err(EditorError::UnknownVertex(1))
		));
		assert!(matches!(
			EditorState::from_json("{"),
			Err(EditorError::Document(_))
		));
	}

	#[test]
	fn picks_closest_vertex_in_pixels() {
		let editor = sample();
		let viewport = Viewport::new(100.0, 100.0);
		assert_eq!(editor.vertex_near(Point::new(29.0, 1.0), &viewport), Some(1));
		assert_eq!(editor.vertex_near(Point::new(60.0, 60.0), &viewport), None);
	}

	#[test]
	fn drag_moves_only_nearby_selection() {
		let mut editor = sample();
		let viewport = Viewport::new(100.0, 100.0);
		editor.select(0, false);
		assert!(editor.drag_selected(Point::new(10.0, 20.0), &viewport));
		assert_eq!(editor.position(0).unwrap(), Point::new(0.1, 0.2));
		assert!(!editor.drag_selected(Point::new(99.0, 99.0), &viewport));
	}

	#[test]
	fn parses_path_input() {
		assert_eq!(parse_path_input("1, 2,3").unwrap(), vec![1, 2, 3]);
		assert!(matches!(
			parse_path_input("1,x"),
			Err(EditorError::BadPathInput(_))
		));
		assert!(parse_path_input("").is_err());
	}
}
