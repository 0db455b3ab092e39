//! Scene state: the drawing surface plus the particle pool that lives on it.
//!
//! Created once when the background mounts and then mutated each frame by the
//! animation loop. The scene is the only writer of its particles.

use log::debug;
use rand::SeedableRng;
use rand::rngs::StdRng;

use super::config::SceneConfig;
use super::error::SceneError;
use super::particle::{Bounds, LifeContext, Particle};
use super::render;
use super::surface::Surface;

/// Fixed-size particle pool bound to a surface.
pub struct Scene<S: Surface> {
	surface: S,
	config: SceneConfig,
	particles: Vec<Particle>,
	rng: StdRng,
}

impl<S: Surface> Scene<S> {
	/// Validate the configuration and spawn the pool at time `now`.
	///
	/// Fails if the surface has no area; the frame loop never checks again.
	pub fn new(
		surface: S,
		config: SceneConfig,
		seed: u64,
		now: f64,
	) -> Result<Self, SceneError> {
		config.validate()?;

		let (width, height) = (surface.width(), surface.height());
		let has_area = width > 0.0 && height > 0.0;
		if !has_area {
			return Err(SceneError::ZeroSizedSurface { width, height });
		}

		let mut rng = StdRng::seed_from_u64(seed);
		let mut ctx = LifeContext {
			now,
			bounds: Bounds::new(width, height),
			config: &config.particles,
			rng: &mut rng,
		};
		let particles: Vec<Particle> = (0..config.particles.count)
			.map(|_| Particle::spawn(&mut ctx))
			.collect();

		debug!(
			"particle-field: {:?} scene with {} particles on {}x{}",
			config.preset,
			particles.len(),
			width,
			height
		);

		Ok(Self {
			surface,
			config,
			particles,
			rng,
		})
	}

	/// Composite one frame: backdrop, grid, then update and draw each particle.
	pub fn frame(&mut self, now: f64) {
		render::draw_backdrop(&mut self.surface, &self.config.backdrop);
		render::draw_grid(&mut self.surface, &self.config.grid);

		let bounds = self.bounds();
		let mut ctx = LifeContext {
			now,
			bounds,
			config: &self.config.particles,
			rng: &mut self.rng,
		};
		for particle in &mut self.particles {
			particle.update(&mut ctx);
			render::draw_particle(&mut self.surface, particle, ctx.config);
		}
	}

	/// Match the surface to a new viewport size.
	///
	/// Particles stay where they are; any now outside the bounds reset on
	/// their next update.
	pub fn resize(&mut self, width: f64, height: f64) {
		if self.surface.width() == width && self.surface.height() == height {
			return;
		}
		self.surface.set_size(width, height);
		debug!("particle-field: resized to {}x{}", width, height);
	}

	/// Current surface bounds.
	pub fn bounds(&self) -> Bounds {
		Bounds::new(self.surface.width(), self.surface.height())
	}

	/// The pool, in update order.
	pub fn particles(&self) -> &[Particle] {
		&self.particles
	}

	/// Configuration the scene was built with.
	pub fn config(&self) -> &SceneConfig {
		&self.config
	}

	/// The drawing surface.
	pub fn surface(&self) -> &S {
		&self.surface
	}
}
