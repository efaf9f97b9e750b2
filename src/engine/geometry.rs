//! Points and the mapping from vertex positions to canvas pixels.

use serde::{Deserialize, Serialize};

/// A 2D position. Editor vertices use normalized coordinates in `0.0..=1.0`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
	/// Horizontal coordinate, growing rightwards.
	pub x: f64,
	/// Vertical coordinate, growing downwards.
	pub y: f64,
}

impl Point {
	/// Point at `(x, y)`.
	pub const fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}

	/// Euclidean distance.
	pub fn distance(&self, other: &Point) -> f64 {
		(self.x - other.x).hypot(self.y - other.y)
	}

	/// The point `t` of the way from `self` to `other`.
	pub fn lerp(&self, other: &Point, t: f64) -> Point {
		Point::new(
			self.x + (other.x - self.x) * t,
			self.y + (other.y - self.y) * t,
		)
	}

	/// Halfway point between `self` and `other`.
	pub fn midpoint(&self, other: &Point) -> Point {
		self.lerp(other, 0.5)
	}
}

/// Maps a vertex position to pixel space.
pub trait PixelMapping {
	/// Pixel-space position of `point`.
	fn to_pixels(&self, point: Point) -> Point;
}

impl<F: Fn(Point) -> Point> PixelMapping for F {
	fn to_pixels(&self, point: Point) -> Point {
		self(point)
	}
}

/// Pixel size of the canvas that normalized coordinates are stretched over.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
	/// Canvas width in pixels.
	pub width: f64,
	/// Canvas height in pixels.
	pub height: f64,
}

impl Viewport {
	/// Viewport over a `width` x `height` pixel canvas.
	pub fn new(width: f64, height: f64) -> Self {
		Self { width, height }
	}

	/// Inverse of [`PixelMapping::to_pixels`].
	pub fn to_normalized(&self, pixel: Point) -> Point {
		Point::new(pixel.x / self.width, pixel.y / self.height)
	}
}

impl PixelMapping for Viewport {
	fn to_pixels(&self, point: Point) -> Point {
		Point::new(point.x * self.width, point.y * self.height)
	}
}
