//! Animated drawing of a path as a line growing along each edge in turn at a
//! constant on-screen velocity.

use std::collections::VecDeque;

use super::config::{AnimationConfig, PathStyle};
use super::error::AnimationError;
use super::geometry::{PixelMapping, Point};
use super::scheduler::DrawTask;

const PCT_EPSILON: f64 = 1e-9;

/// Anything a path segment can be stroked onto.
pub trait Surface {
	/// Strokes a straight line in pixel coordinates.
	fn stroke_segment(&mut self, from: Point, to: Point, style: &PathStyle);
}

/// Per-frame state of a path animation.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PathParams {
	/// Edges still to be drawn; the front one is in progress.
	pub edges: VecDeque<(Point, Point)>,
	/// Progress along the front edge, in `0.0..=1.0`.
	pub pct: f64,
	/// Increment applied to `pct` each frame.
	pub step: f64,
	/// Set once the last edge is fully drawn or no edge remains.
	pub finished: bool,
}

/// Draws a path edge by edge, holding the marker speed constant in pixels.
pub struct PathAnimation<M> {
	params: PathParams,
	mapping: M,
	style: PathStyle,
	config: AnimationConfig,
}

impl<M: PixelMapping> PathAnimation<M> {
	/// Builds the task for `path`. Paths with fewer than two vertices produce
	/// a task that is already finished.
	pub fn new<I>(
		path: I,
		mapping: M,
		style: PathStyle,
		config: AnimationConfig,
	) -> Result<Self, AnimationError>
	where
		I: IntoIterator<Item = Point>,
	{
		config.validate()?;
		let vertices: Vec<Point> = path.into_iter().collect();
		let edges: VecDeque<(Point, Point)> =
			vertices.windows(2).map(|pair| (pair[0], pair[1])).collect();

		let mut animation = Self {
			params: PathParams::default(),
			mapping,
			style,
			config,
		};
		for (index, edge) in edges.iter().enumerate() {
			let length = animation.pixel_length(edge);
			if !(length.is_finite() && length > 0.0) {
				return Err(AnimationError::DegenerateEdge { index });
			}
		}
		animation.params = PathParams {
			step: edges.front().map_or(0.0, |edge| animation.step_for(edge)),
			finished: edges.is_empty(),
			pct: 0.0,
			edges,
		};
		Ok(animation)
	}

	/// Current per-frame state.
	pub fn params(&self) -> &PathParams {
		&self.params
	}

	fn pixel_length(&self, (from, to): &(Point, Point)) -> f64 {
		self.mapping
			.to_pixels(*from)
			.distance(&self.mapping.to_pixels(*to))
	}

	fn step_for(&self, edge: &(Point, Point)) -> f64 {
		self.config.step_for(self.pixel_length(edge))
	}

	/// Next-frame parameters. A completed edge is dropped and the step is
	/// recomputed for the edge that follows it. The task finishes in the same
	/// update that completes its last edge.
	pub fn update(&self, mut params: PathParams) -> PathParams {
		if params.pct >= 1.0 {
			params.edges.pop_front();
			if let Some(next) = params.edges.front() {
				params.step = self.step_for(next);
			}
			params.pct = 0.0;
		} else {
			let pct = params.pct + params.step;
			// accumulated steps may land just short of 1
			params.pct = if pct >= 1.0 - PCT_EPSILON { 1.0 } else { pct };
		}
		params.finished = match params.edges.len() {
			0 => true,
			1 => params.pct >= 1.0,
			_ => false,
		};
		params
	}
}

impl<M: PixelMapping, S: Surface + ?Sized> DrawTask<S> for PathAnimation<M> {
	fn advance(&mut self) {
		let params = std::mem::take(&mut self.params);
		self.params = self.update(params);
	}

	fn render(&self, surface: &mut S) {
		if let Some((from, to)) = self.params.edges.front() {
			let start = self.mapping.to_pixels(*from);
			let end = self.mapping.to_pixels(*to);
			surface.stroke_segment(start, start.lerp(&end, self.params.pct), &self.style);
		}
	}

	fn is_finished(&self) -> bool {
		self.params.finished
	}
}
