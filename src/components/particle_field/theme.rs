//! Visual styling for the particle field.
//!
//! Colors, trail and glow styles, the background grid, and the backdrop
//! strategy used to wipe the surface between frames.

use serde::Deserialize;

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
pub struct Color {
	/// Red channel.
	pub r: u8,
	/// Green channel.
	pub g: u8,
	/// Blue channel.
	pub b: u8,
	/// Opacity in `[0, 1]`.
	#[serde(default = "opaque")]
	pub a: f64,
}

fn opaque() -> f64 {
	1.0
}

impl Color {
	/// Fully opaque color.
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	/// Color with explicit opacity.
	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	/// Same channels, replaced opacity.
	pub fn with_alpha(self, a: f64) -> Self {
		Self { a, ..self }
	}

	/// Blend toward white by `factor` in `[0, 1]`.
	pub fn lighten(self, factor: f64) -> Self {
		let f = factor.clamp(0.0, 1.0);
		Self {
			r: (self.r as f64 + (255.0 - self.r as f64) * f) as u8,
			g: (self.g as f64 + (255.0 - self.g as f64) * f) as u8,
			b: (self.b as f64 + (255.0 - self.b as f64) * f) as u8,
			a: self.a,
		}
	}

	/// Blend toward black by `factor` in `[0, 1]`.
	pub fn darken(self, factor: f64) -> Self {
		let f = 1.0 - factor.clamp(0.0, 1.0);
		Self {
			r: (self.r as f64 * f) as u8,
			g: (self.g as f64 * f) as u8,
			b: (self.b as f64 * f) as u8,
			a: self.a,
		}
	}

	/// CSS `rgba()` string. Opacity is clamped to `[0, 1]` since gains may
	/// push computed alphas past 1.
	pub fn to_css(self) -> String {
		format!(
			"rgba({}, {}, {}, {})",
			self.r,
			self.g,
			self.b,
			self.a.clamp(0.0, 1.0)
		)
	}
}

/// How trail segments are stroked.
#[derive(Clone, Debug, PartialEq)]
pub struct TrailStyle {
	/// Segment color; the alpha channel is ignored.
	pub color: Color,
	/// Multiplier applied to each point's alpha when stroking.
	pub gain: f64,
	/// Stroke width as a fraction of particle size.
	pub width_factor: f64,
	/// Overall dimming of the trail relative to the particle's target alpha.
	pub dim: f64,
}

/// Gradient-shaded "star" body with a soft halo.
#[derive(Clone, Debug, PartialEq)]
pub struct GlowStyle {
	/// Bright center color.
	pub core: Color,
	/// Ring color at 70% of the radius.
	pub mid: Color,
	/// Dim rim color.
	pub edge: Color,
	/// Halo disc color.
	pub halo: Color,
	/// Halo radius as a multiple of the particle size.
	pub halo_scale: f64,
}

impl GlowStyle {
	/// Glow shades derived from a single tint. The mid ring keeps the tint;
	/// core and halo are lighter and the rim slightly darker.
	pub fn from_tint(tint: Color, halo_scale: f64) -> Self {
		Self {
			core: tint.lighten(0.6),
			mid: tint,
			edge: tint.darken(0.12),
			halo: tint.lighten(0.6),
			halo_scale,
		}
	}
}

/// How the particle body is drawn.
#[derive(Clone, Debug, PartialEq)]
pub enum RenderStyle {
	/// Single filled disc in the tint color.
	Flat,
	/// Radial gradient disc plus halo.
	GradientGlow(GlowStyle),
}

/// Static grid drawn beneath the particles.
#[derive(Clone, Debug, PartialEq)]
pub struct GridStyle {
	/// Distance between lines in pixels.
	pub spacing: f64,
	/// Line color, usually very transparent.
	pub color: Color,
	/// Line width in pixels.
	pub line_width: f64,
}

/// What happens to the previous frame's pixels at the start of each frame.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum Backdrop {
	/// Destructive clear; only the current frame is visible.
	Clear,
	/// Translucent overlay; earlier frames persist as afterimages.
	Fade {
		/// Overlay color, alpha sets how quickly afterimages die.
		color: Color,
	},
}
