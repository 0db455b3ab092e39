//! Drawing for the particle field.
//!
//! Each frame is composited in order:
//! 1. Backdrop (clear or translucent overlay)
//! 2. Static grid
//! 3. Per particle: trail segments, then the body on top
//!
//! Nothing here mutates particle state.

use super::config::ParticleConfig;
use super::particle::Particle;
use super::surface::{GradientStop, LineCap, Paint, RadialGradient, Stroke, Surface};
use super::theme::{Backdrop, GlowStyle, GridStyle, RenderStyle};

const GLOW_CORE_GAIN: f64 = 1.5;
const GLOW_MID_GAIN: f64 = 0.7;
const GLOW_MID_STOP: f64 = 0.7;
const GLOW_EDGE_GAIN: f64 = 0.2;
const GLOW_HALO_GAIN: f64 = 0.25;

/// Wipe or dim the previous frame.
pub fn draw_backdrop<S: Surface + ?Sized>(surface: &mut S, backdrop: &Backdrop) {
	let (w, h) = (surface.width(), surface.height());
	match backdrop {
		Backdrop::Clear => surface.clear_rect(0.0, 0.0, w, h),
		Backdrop::Fade { color } => surface.fill_rect(0.0, 0.0, w, h, *color),
	}
}

/// Draw the static background grid.
pub fn draw_grid<S: Surface + ?Sized>(surface: &mut S, grid: &GridStyle) {
	let (w, h) = (surface.width(), surface.height());
	let stroke = Stroke {
		color: grid.color,
		width: grid.line_width,
		cap: LineCap::Butt,
	};

	let mut x = 0.0;
	while x < w {
		surface.begin_path();
		surface.move_to(x, 0.0);
		surface.line_to(x, h);
		surface.stroke(&stroke);
		x += grid.spacing;
	}

	let mut y = 0.0;
	while y < h {
		surface.begin_path();
		surface.move_to(0.0, y);
		surface.line_to(w, y);
		surface.stroke(&stroke);
		y += grid.spacing;
	}
}

/// Draw a particle's trail and body.
pub fn draw_particle<S: Surface + ?Sized>(
	surface: &mut S,
	particle: &Particle,
	config: &ParticleConfig,
) {
	draw_trail(surface, particle, config);

	match &config.render_style {
		RenderStyle::Flat => draw_flat_body(surface, particle, config),
		RenderStyle::GradientGlow(glow) => draw_glow_body(surface, particle, glow),
	}
}

fn draw_trail<S: Surface + ?Sized>(
	surface: &mut S,
	particle: &Particle,
	config: &ParticleConfig,
) {
	let style = &config.trail;
	let width = particle.size() * style.width_factor;

	for (prev, current) in particle.history().segments() {
		surface.begin_path();
		surface.move_to(prev.x, prev.y);
		surface.line_to(current.x, current.y);
		surface.stroke(&Stroke {
			color: style.color.with_alpha(current.alpha * style.gain),
			width,
			cap: LineCap::Round,
		});
	}
}

fn draw_flat_body<S: Surface + ?Sized>(
	surface: &mut S,
	particle: &Particle,
	config: &ParticleConfig,
) {
	surface.begin_path();
	surface.arc(particle.x(), particle.y(), particle.size());
	surface.fill(&Paint::Solid(config.tint.with_alpha(particle.visible_alpha())));
}

fn draw_glow_body<S: Surface + ?Sized>(surface: &mut S, particle: &Particle, glow: &GlowStyle) {
	let (x, y, size) = (particle.x(), particle.y(), particle.size());
	let alpha = particle.visible_alpha();

	let gradient = RadialGradient {
		x,
		y,
		inner_radius: 0.0,
		outer_radius: size,
		stops: vec![
			GradientStop {
				offset: 0.0,
				color: glow.core.with_alpha(alpha * GLOW_CORE_GAIN),
			},
			GradientStop {
				offset: GLOW_MID_STOP,
				color: glow.mid.with_alpha(alpha * GLOW_MID_GAIN),
			},
			GradientStop {
				offset: 1.0,
				color: glow.edge.with_alpha(alpha * GLOW_EDGE_GAIN),
			},
		],
	};

	surface.begin_path();
	surface.arc(x, y, size);
	surface.fill(&Paint::Radial(gradient));

	surface.begin_path();
	surface.arc(x, y, size * glow.halo_scale);
	surface.fill(&Paint::Solid(glow.halo.with_alpha(alpha * GLOW_HALO_GAIN)));
}
