use log::{info, warn};
use thiserror::Error;
use web_sys::CanvasRenderingContext2d;

use super::editor::{EditorError, EditorState};
use super::types::GraphDocument;
use crate::engine::{
	Algorithm, AnimationConfig, AnimationError, PathAnimation, PathStyle, Point, Scheduler,
	SolveError, Viewport,
};

pub const BFS_STROKE: &str = "lime";
pub const BELLMAN_FORD_STROKE: &str = "#ff00ee";

#[derive(Debug, Error)]
pub enum PathCanvasError {
	#[error(transparent)]
	Editor(#[from] EditorError),
	#[error(transparent)]
	Solve(#[from] SolveError),
	#[error(transparent)]
	Animation(#[from] AnimationError),
}

/// What the scene render includes.
#[derive(Clone, Copy, Debug)]
pub struct DrawingOptions {
	pub vertices: bool,
	pub edges: bool,
	pub vertex_labels: bool,
	pub edge_labels: bool,
}

impl Default for DrawingOptions {
	fn default() -> Self {
		Self {
			vertices: true,
			edges: true,
			vertex_labels: true,
			edge_labels: false,
		}
	}
}

pub struct PathCanvasState {
	pub editor: EditorState,
	pub scheduler: Scheduler<CanvasRenderingContext2d>,
	pub viewport: Viewport,
	pub options: DrawingOptions,
	pub config: AnimationConfig,
	pub dragging: bool,
	/// Scene needs repainting. Path animations draw on top of the last scene
	/// paint, so the scene is only repainted when it changes.
	pub dirty: bool,
}

impl PathCanvasState {
	pub fn new(doc: &GraphDocument, width: f64, height: f64) -> Self {
		let editor = EditorState::from_document(doc.clone()).unwrap_or_else(|err| {
			warn!("ignoring initial graph: {err}");
			EditorState::new()
		});
		Self {
			editor,
			scheduler: Scheduler::new(),
			viewport: Viewport::new(width, height),
			options: DrawingOptions::default(),
			config: AnimationConfig::default(),
			dragging: false,
			dirty: true,
		}
	}

	/// Handles a canvas click at `pixel`: alt places a vertex, otherwise the
	/// nearest vertex is selected (shift extends the selection).
	pub fn click(&mut self, pixel: Point, alt: bool, shift: bool) {
		if alt {
			let v = self.editor.add_vertex(self.viewport.to_normalized(pixel));
			info!("added vertex V{v}");
		} else if let Some(v) = self.editor.vertex_near(pixel, &self.viewport) {
			self.editor.select(v, shift);
		}
		self.dirty = true;
	}

	/// Editing shortcuts: `f` connects, `w` splits, `x` deletes.
	pub fn key(&mut self, key: &str) -> Result<(), PathCanvasError> {
		match key {
			"f" => {
				self.editor.connect_selected()?;
			}
			"w" => {
				self.editor.split_selected_edge()?;
			}
			"x" => {
				self.editor.delete_selected()?;
			}
			_ => return Ok(()),
		}
		self.dirty = true;
		Ok(())
	}

	pub fn drag_to(&mut self, pixel: Point) {
		if self.dragging && self.editor.drag_selected(pixel, &self.viewport) {
			self.dirty = true;
		}
	}

	/// Solves from the first to the second selected vertex and animates the
	/// resulting path.
	pub fn solve_selected(&mut self, algorithm: Algorithm) -> Result<Vec<usize>, PathCanvasError> {
		let (source, destination) = match self.editor.selected() {
			[source, destination] => (*source, *destination),
			selected => {
				return Err(EditorError::SelectionSize {
					expected: 2,
					found: selected.len(),
				}
				.into());
			}
		};
		let solution = algorithm.solve(&self.editor.to_graph(), &source)?;
		let path = solution.path_to(&destination)?.to_vec();
		let stroke = match algorithm {
			Algorithm::Bfs => BFS_STROKE,
			Algorithm::BellmanFord => BELLMAN_FORD_STROKE,
		};
		info!(
			"{} path V{source} -> V{destination}: {path:?} (distance {:?})",
			algorithm.label(),
			solution.distance(&destination)
		);
		self.draw_path(&path, PathStyle::with_stroke(stroke))?;
		Ok(path)
	}

	/// Schedules an animation along the given vertex indices.
	pub fn draw_path(&mut self, path: &[usize], style: PathStyle) -> Result<(), PathCanvasError> {
		let points = self.editor.path_points(path)?;
		let task = PathAnimation::new(points, self.viewport, style, self.config)?;
		self.scheduler.push(Box::new(task));
		Ok(())
	}

	pub fn load(&mut self, json: &str) -> Result<(), PathCanvasError> {
		self.editor = EditorState::from_json(json)?;
		self.scheduler.clear();
		self.dirty = true;
		Ok(())
	}

	pub fn clear(&mut self) {
		self.editor.clear();
		self.scheduler.clear();
		self.dirty = true;
	}
}
