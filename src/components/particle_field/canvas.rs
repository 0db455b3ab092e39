//! Browser backend: an HTML canvas as a [`Surface`] and `Date.now()` as a [`Clock`].

use log::warn;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::animator::Clock;
use super::error::SceneError;
use super::surface::{Paint, Stroke, Surface};
use super::theme::Color;

/// A `<canvas>` element and its 2D context.
pub struct CanvasSurface {
	canvas: HtmlCanvasElement,
	ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
	/// Acquire the canvas' 2D context.
	pub fn new(canvas: HtmlCanvasElement) -> Result<Self, SceneError> {
		let ctx = canvas
			.get_context("2d")
			.ok()
			.flatten()
			.and_then(|obj| obj.dyn_into::<CanvasRenderingContext2d>().ok())
			.ok_or(SceneError::ContextUnavailable)?;
		Ok(Self { canvas, ctx })
	}
}

impl Surface for CanvasSurface {
	fn width(&self) -> f64 {
		self.canvas.width() as f64
	}

	fn height(&self) -> f64 {
		self.canvas.height() as f64
	}

	fn set_size(&mut self, width: f64, height: f64) {
		self.canvas.set_width(width as u32);
		self.canvas.set_height(height as u32);
	}

	fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
		self.ctx.clear_rect(x, y, width, height);
	}

	fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Color) {
		self.ctx.set_fill_style_str(&color.to_css());
		self.ctx.fill_rect(x, y, width, height);
	}

	fn begin_path(&mut self) {
		self.ctx.begin_path();
	}

	fn move_to(&mut self, x: f64, y: f64) {
		self.ctx.move_to(x, y);
	}

	fn line_to(&mut self, x: f64, y: f64) {
		self.ctx.line_to(x, y);
	}

	fn arc(&mut self, x: f64, y: f64, radius: f64) {
		let _ = self.ctx.arc(x, y, radius, 0.0, std::f64::consts::TAU);
	}

	fn stroke(&mut self, stroke: &Stroke) {
		self.ctx.set_stroke_style_str(&stroke.color.to_css());
		self.ctx.set_line_width(stroke.width);
		self.ctx.set_line_cap(stroke.cap.as_css());
		self.ctx.stroke();
	}

	fn fill(&mut self, paint: &Paint) {
		match paint {
			Paint::Solid(color) => self.ctx.set_fill_style_str(&color.to_css()),
			Paint::Radial(g) => {
				let gradient = match self.ctx.create_radial_gradient(
					g.x,
					g.y,
					g.inner_radius,
					g.x,
					g.y,
					g.outer_radius,
				) {
					Ok(gradient) => gradient,
					Err(e) => {
						warn!("particle-field: radial gradient rejected: {:?}", e);
						return;
					}
				};
				for stop in &g.stops {
					let _ = gradient.add_color_stop(stop.offset as f32, &stop.color.to_css());
				}
				#[allow(deprecated)]
				self.ctx.set_fill_style(&gradient);
			}
		}
		self.ctx.fill();
	}
}

/// Wall clock backed by `Date.now()`.
#[derive(Clone, Copy, Debug, Default)]
pub struct WallClock;

impl Clock for WallClock {
	fn now_ms(&self) -> f64 {
		js_sys::Date::now()
	}
}

/// Seed for a fresh random layout, mixed from `Math.random()` and the time.
pub fn entropy_seed() -> u64 {
	let noise = (js_sys::Math::random() * u32::MAX as f64) as u64;
	let time = js_sys::Date::now() as u64;
	(noise << 32) ^ time
}
