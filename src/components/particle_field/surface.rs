//! The 2-D immediate-mode drawing contract the renderer targets.
//!
//! Modeled on the canvas 2D context: path building with `begin_path`,
//! `move_to`, `line_to` and `arc`, finished by `stroke` or `fill`. The browser
//! implementation lives in `canvas`; tests use a recording surface.

use super::theme::Color;

/// Shape of stroke endpoints.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineCap {
	/// Flat end exactly at the endpoint.
	Butt,
	/// Semicircular end.
	Round,
}

impl LineCap {
	/// Canvas `lineCap` keyword.
	pub fn as_css(self) -> &'static str {
		match self {
			LineCap::Butt => "butt",
			LineCap::Round => "round",
		}
	}
}

/// Stroke settings for the current path.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stroke {
	/// Line color including opacity.
	pub color: Color,
	/// Line width in pixels.
	pub width: f64,
	/// Endpoint style.
	pub cap: LineCap,
}

/// One color stop of a gradient, `offset` in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GradientStop {
	/// Position along the gradient.
	pub offset: f64,
	/// Color at that position.
	pub color: Color,
}

/// Concentric radial gradient centered on `(x, y)`.
#[derive(Clone, Debug, PartialEq)]
pub struct RadialGradient {
	/// Center x.
	pub x: f64,
	/// Center y.
	pub y: f64,
	/// Radius where the first stop applies.
	pub inner_radius: f64,
	/// Radius where the last stop applies.
	pub outer_radius: f64,
	/// Color stops in increasing offset order.
	pub stops: Vec<GradientStop>,
}

/// Fill source for the current path.
#[derive(Clone, Debug, PartialEq)]
pub enum Paint {
	/// Uniform color.
	Solid(Color),
	/// Radial gradient.
	Radial(RadialGradient),
}

/// A resizable 2-D drawing surface.
pub trait Surface {
	/// Width in pixels.
	fn width(&self) -> f64;
	/// Height in pixels.
	fn height(&self) -> f64;
	/// Change the pixel dimensions.
	fn set_size(&mut self, width: f64, height: f64);
	/// Make a rectangle fully transparent.
	fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64);
	/// Composite a color over a rectangle.
	fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Color);
	/// Start a new path.
	fn begin_path(&mut self);
	/// Move the pen without drawing.
	fn move_to(&mut self, x: f64, y: f64);
	/// Add a straight segment to the path.
	fn line_to(&mut self, x: f64, y: f64);
	/// Add a full circle to the path.
	fn arc(&mut self, x: f64, y: f64, radius: f64);
	/// Stroke the current path.
	fn stroke(&mut self, stroke: &Stroke);
	/// Fill the current path.
	fn fill(&mut self, paint: &Paint);
}

#[cfg(test)]
pub(crate) mod recording {
	use super::*;

	/// Drawing call captured by [`RecordingSurface`].
	#[derive(Clone, Debug, PartialEq)]
	pub enum Op {
		Clear,
		FillRect(Color),
		BeginPath,
		MoveTo(f64, f64),
		LineTo(f64, f64),
		Arc(f64, f64, f64),
		Stroke(Stroke),
		Fill(Paint),
	}

	/// Surface that stores every call for inspection.
	#[derive(Debug, Default)]
	pub struct RecordingSurface {
		pub width: f64,
		pub height: f64,
		pub ops: Vec<Op>,
	}

	impl RecordingSurface {
		pub fn new(width: f64, height: f64) -> Self {
			Self {
				width,
				height,
				ops: Vec::new(),
			}
		}

		pub fn strokes(&self) -> impl Iterator<Item = &Stroke> {
			self.ops.iter().filter_map(|op| match op {
				Op::Stroke(s) => Some(s),
				_ => None,
			})
		}

		pub fn fills(&self) -> impl Iterator<Item = &Paint> {
			self.ops.iter().filter_map(|op| match op {
				Op::Fill(p) => Some(p),
				_ => None,
			})
		}
	}

	impl Surface for RecordingSurface {
		fn width(&self) -> f64 {
			self.width
		}

		fn height(&self) -> f64 {
			self.height
		}

		fn set_size(&mut self, width: f64, height: f64) {
			self.width = width;
			self.height = height;
		}

		fn clear_rect(&mut self, _x: f64, _y: f64, _width: f64, _height: f64) {
			self.ops.push(Op::Clear);
		}

		fn fill_rect(&mut self, _x: f64, _y: f64, _width: f64, _height: f64, color: Color) {
			self.ops.push(Op::FillRect(color));
		}

		fn begin_path(&mut self) {
			self.ops.push(Op::BeginPath);
		}

		fn move_to(&mut self, x: f64, y: f64) {
			self.ops.push(Op::MoveTo(x, y));
		}

		fn line_to(&mut self, x: f64, y: f64) {
			self.ops.push(Op::LineTo(x, y));
		}

		fn arc(&mut self, x: f64, y: f64, radius: f64) {
			self.ops.push(Op::Arc(x, y, radius));
		}

		fn stroke(&mut self, stroke: &Stroke) {
			self.ops.push(Op::Stroke(*stroke));
		}

		fn fill(&mut self, paint: &Paint) {
			self.ops.push(Op::Fill(paint.clone()));
		}
	}
}
