//! Animation speed and stroke style settings.

use super::error::AnimationError;

/// Marker velocity used when none is configured.
pub const DEFAULT_PIXELS_PER_SECOND: f64 = 150.0;
/// Frame rate the per-frame step is derived for.
pub const DEFAULT_FRAMES_PER_SECOND: f64 = 60.0;
/// Path stroke width in pixels.
pub const DEFAULT_LINE_WIDTH: f64 = 2.0;
/// Path stroke color.
pub const DEFAULT_STROKE_STYLE: &str = "red";

/// Speed of animated path drawing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnimationConfig {
	/// Marker velocity in screen pixels per second.
	pub pixels_per_second: f64,
	/// Assumed number of scheduler frames per second.
	pub frames_per_second: f64,
}

impl Default for AnimationConfig {
	fn default() -> Self {
		Self {
			pixels_per_second: DEFAULT_PIXELS_PER_SECOND,
			frames_per_second: DEFAULT_FRAMES_PER_SECOND,
		}
	}
}

impl AnimationConfig {
	/// Rejects velocities and frame rates that would produce a non-finite step.
	pub fn validate(&self) -> Result<(), AnimationError> {
		if !(self.pixels_per_second.is_finite() && self.pixels_per_second > 0.0) {
			return Err(AnimationError::InvalidConfig(
				"pixels per second must be positive",
			));
		}
		if !(self.frames_per_second.is_finite() && self.frames_per_second > 0.0) {
			return Err(AnimationError::InvalidConfig(
				"frames per second must be positive",
			));
		}
		Ok(())
	}

	/// Fraction of an edge `pixel_length` pixels long covered in one frame.
	pub fn step_for(&self, pixel_length: f64) -> f64 {
		1.0 / (pixel_length / self.pixels_per_second) / self.frames_per_second
	}
}

/// Stroke overrides for a drawn path; unset fields fall back to the defaults.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PathStyle {
	/// Stroke width in pixels.
	pub line_width: Option<f64>,
	/// Any canvas stroke style, e.g. `lime` or `#ff00ee`.
	pub stroke_style: Option<String>,
}

impl PathStyle {
	/// Default width with the given color.
	pub fn with_stroke(stroke_style: impl Into<String>) -> Self {
		Self {
			line_width: None,
			stroke_style: Some(stroke_style.into()),
		}
	}

	/// Configured width or [`DEFAULT_LINE_WIDTH`].
	pub fn line_width(&self) -> f64 {
		self.line_width.unwrap_or(DEFAULT_LINE_WIDTH)
	}

	/// Configured color or [`DEFAULT_STROKE_STYLE`].
	pub fn stroke_style(&self) -> &str {
		self.stroke_style.as_deref().unwrap_or(DEFAULT_STROKE_STYLE)
	}
}
