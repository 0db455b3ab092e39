//! Particle lifecycle parameters, named presets, and page-level overrides.
//!
//! Two presets mirror the looks the field ships with:
//!
//! - [`Preset::Drift`]: a few dozen small flat dots with short tails that live
//!   ten seconds, drawn over a slowly fading overlay.
//! - [`Preset::Starfield`]: more, brighter gradient stars with very long tails
//!   that live fifty seconds, on a surface cleared every frame.
//!
//! A page can tweak either preset through [`SceneSettings`], deserialized from
//! camelCase JSON. Every field is optional.

use rand::Rng;
use serde::Deserialize;

use super::error::SceneError;
use super::theme::{Backdrop, Color, GlowStyle, GridStyle, RenderStyle, TrailStyle};

/// Largest particle pool a scene accepts.
pub const MAX_PARTICLES: usize = 1_000;

/// Largest per-particle trail a scene accepts.
pub const MAX_HISTORY: usize = 2_000;

/// Closed sampling band `[min, max]`.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
pub struct Range {
	/// Lower bound.
	pub min: f64,
	/// Upper bound.
	pub max: f64,
}

impl Range {
	/// Band between `min` and `max`.
	pub const fn new(min: f64, max: f64) -> Self {
		Self { min, max }
	}

	/// Degenerate band that always samples `value`.
	pub const fn fixed(value: f64) -> Self {
		Self {
			min: value,
			max: value,
		}
	}

	/// Uniform sample. Degenerate bands return `min` without panicking.
	pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
		self.min + rng.random::<f64>() * (self.max - self.min)
	}

	fn check(&self, field: &'static str) -> Result<(), SceneError> {
		if !self.min.is_finite() || !self.max.is_finite() || self.min > self.max {
			return Err(SceneError::InvalidRange {
				field,
				min: self.min,
				max: self.max,
			});
		}
		Ok(())
	}
}

/// Per-particle lifecycle and appearance.
#[derive(Clone, Debug, PartialEq)]
pub struct ParticleConfig {
	/// Fixed pool size.
	pub count: usize,
	/// Maximum trail points kept per particle.
	pub max_history: usize,
	/// Age at which a particle is reborn.
	pub lifespan_ms: f64,
	/// Age at which fade-out begins.
	pub fade_start_delay_ms: f64,
	/// How long fade-out takes to reach zero.
	pub fade_duration_ms: f64,
	/// Speed magnitude band; each axis gets `(u - 0.5) * speed`.
	pub speed: Range,
	/// Body radius band in pixels.
	pub size: Range,
	/// Band for the opacity a particle fades in to.
	pub target_alpha: Range,
	/// Opacity gained per update while fading in.
	pub fade_in_step: f64,
	/// Body color for the flat style.
	pub tint: Color,
	/// Tail appearance.
	pub trail: TrailStyle,
	/// Body appearance.
	pub render_style: RenderStyle,
}

impl ParticleConfig {
	/// Reject configurations that would break the lifecycle invariants.
	pub fn validate(&self) -> Result<(), SceneError> {
		at_most("count", self.count, MAX_PARTICLES)?;
		at_most("maxHistory", self.max_history, MAX_HISTORY)?;
		self.speed.check("speed")?;
		self.size.check("size")?;
		self.target_alpha.check("targetAlpha")?;
		if self.target_alpha.min < 0.0 || self.target_alpha.max > 1.0 {
			return Err(SceneError::AlphaOutOfRange {
				field: "targetAlpha",
				min: self.target_alpha.min,
				max: self.target_alpha.max,
			});
		}
		if self.size.min < 0.0 {
			return Err(SceneError::InvalidRange {
				field: "size",
				min: self.size.min,
				max: self.size.max,
			});
		}
		positive("lifespanMs", self.lifespan_ms)?;
		positive("fadeDurationMs", self.fade_duration_ms)?;
		positive("fadeInStep", self.fade_in_step)?;
		if self.fade_start_delay_ms.is_nan() || self.fade_start_delay_ms < 0.0 {
			return Err(SceneError::Negative {
				field: "fadeStartDelayMs",
				value: self.fade_start_delay_ms,
			});
		}
		Ok(())
	}
}

fn at_most(field: &'static str, value: usize, limit: usize) -> Result<(), SceneError> {
	if value <= limit {
		Ok(())
	} else {
		Err(SceneError::ExceedsLimit {
			field,
			value,
			limit,
		})
	}
}

fn positive(field: &'static str, value: f64) -> Result<(), SceneError> {
	if value > 0.0 && value.is_finite() {
		Ok(())
	} else {
		Err(SceneError::NonPositive { field, value })
	}
}

/// Everything a scene needs besides its surface.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneConfig {
	/// Which preset this config started from.
	pub preset: Preset,
	/// Particle pool parameters.
	pub particles: ParticleConfig,
	/// Background grid.
	pub grid: GridStyle,
	/// Per-frame wipe strategy.
	pub backdrop: Backdrop,
}

impl SceneConfig {
	/// Sparse flat dots over a fading overlay.
	pub fn drift() -> Self {
		let tint = Color::rgb(210, 168, 225);
		Self {
			preset: Preset::Drift,
			particles: ParticleConfig {
				count: 35,
				max_history: 40,
				lifespan_ms: 10_000.0,
				fade_start_delay_ms: 8_000.0,
				fade_duration_ms: 1_000.0,
				speed: Range::fixed(0.8),
				size: Range::new(0.2, 1.0),
				target_alpha: Range::new(0.05, 0.2),
				fade_in_step: 0.002,
				tint,
				trail: TrailStyle {
					color: tint,
					gain: 1.0,
					width_factor: 0.3,
					dim: 0.6,
				},
				render_style: RenderStyle::Flat,
			},
			grid: GridStyle {
				spacing: 50.0,
				color: Color::rgba(210, 168, 225, 0.08),
				line_width: 0.2,
			},
			backdrop: Backdrop::Fade {
				color: Color::rgba(26, 26, 46, 0.04),
			},
		}
	}

	/// Dense glowing stars with long tails, cleared every frame.
	pub fn starfield() -> Self {
		Self {
			preset: Preset::Starfield,
			particles: ParticleConfig {
				count: 65,
				max_history: 720,
				lifespan_ms: 50_000.0,
				fade_start_delay_ms: 45_000.0,
				fade_duration_ms: 5_000.0,
				speed: Range::new(0.7, 2.7),
				size: Range::new(0.8, 2.5),
				target_alpha: Range::new(0.2, 0.5),
				fade_in_step: 0.002,
				tint: Color::rgb(230, 180, 255),
				trail: TrailStyle {
					color: Color::rgb(255, 220, 255),
					gain: 1.2,
					width_factor: 0.5,
					dim: 0.8,
				},
				render_style: RenderStyle::GradientGlow(GlowStyle {
					core: Color::rgb(255, 230, 255),
					mid: Color::rgb(230, 180, 255),
					edge: Color::rgb(210, 150, 225),
					halo: Color::rgb(255, 230, 255),
					halo_scale: 1.5,
				}),
			},
			grid: GridStyle {
				spacing: 50.0,
				color: Color::rgba(230, 190, 255, 0.12),
				line_width: 0.3,
			},
			backdrop: Backdrop::Clear,
		}
	}

	/// Config for a named preset.
	pub fn preset(preset: Preset) -> Self {
		match preset {
			Preset::Drift => Self::drift(),
			Preset::Starfield => Self::starfield(),
		}
	}

	/// Validate particle parameters and the grid.
	pub fn validate(&self) -> Result<(), SceneError> {
		self.particles.validate()?;
		positive("grid.spacing", self.grid.spacing)?;
		Ok(())
	}
}

impl Default for SceneConfig {
	fn default() -> Self {
		Self::starfield()
	}
}

/// Named starting points for a scene.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
	/// See [`SceneConfig::drift`].
	Drift,
	/// See [`SceneConfig::starfield`].
	#[default]
	Starfield,
}

/// Page-supplied overrides, applied on top of a preset.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct SceneSettings {
	/// Preset to start from.
	pub preset: Preset,
	/// Pool size override.
	pub count: Option<usize>,
	/// Trail length override.
	pub max_history: Option<usize>,
	/// Lifespan override.
	pub lifespan_ms: Option<f64>,
	/// Fade-out start override.
	pub fade_start_delay_ms: Option<f64>,
	/// Fade-out duration override.
	pub fade_duration_ms: Option<f64>,
	/// Speed band override.
	pub speed: Option<Range>,
	/// Size band override.
	pub size: Option<Range>,
	/// Target opacity band override.
	pub target_alpha: Option<Range>,
	/// Tint override; recolors the body, the trail and any glow shades.
	pub tint: Option<Color>,
	/// Backdrop strategy override.
	pub backdrop: Option<Backdrop>,
	/// Fixed RNG seed, for reproducible layouts.
	pub seed: Option<u64>,
}

impl SceneSettings {
	/// Parse settings from JSON text.
	pub fn from_json(text: &str) -> Result<Self, SceneError> {
		Ok(serde_json::from_str(text)?)
	}

	/// Apply the overrides to their preset and validate the result.
	pub fn resolve(&self) -> Result<SceneConfig, SceneError> {
		let mut config = SceneConfig::preset(self.preset);
		let p = &mut config.particles;

		if let Some(count) = self.count {
			p.count = count;
		}
		if let Some(max_history) = self.max_history {
			p.max_history = max_history;
		}
		if let Some(ms) = self.lifespan_ms {
			p.lifespan_ms = ms;
		}
		if let Some(ms) = self.fade_start_delay_ms {
			p.fade_start_delay_ms = ms;
		}
		if let Some(ms) = self.fade_duration_ms {
			p.fade_duration_ms = ms;
		}
		if let Some(speed) = self.speed {
			p.speed = speed;
		}
		if let Some(size) = self.size {
			p.size = size;
		}
		if let Some(alpha) = self.target_alpha {
			p.target_alpha = alpha;
		}
		if let Some(tint) = self.tint {
			p.tint = tint;
			p.trail.color = tint;
			if let RenderStyle::GradientGlow(glow) = &mut p.render_style {
				*glow = GlowStyle::from_tint(tint, glow.halo_scale);
			}
		}
		if let Some(backdrop) = &self.backdrop {
			config.backdrop = backdrop.clone();
		}

		config.validate()?;
		Ok(config)
	}
}
