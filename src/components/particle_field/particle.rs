//! Particle lifecycle: birth, drift, fade, rebirth.
//!
//! A particle never leaves the pool. When it grows too old or drifts off the
//! surface it is reset in place with fresh random state.

use rand::Rng;

use super::config::ParticleConfig;
use super::trail::Trail;

/// Drawable area a particle must stay within, `[0, width] x [0, height]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
	/// Width in pixels.
	pub width: f64,
	/// Height in pixels.
	pub height: f64,
}

impl Bounds {
	/// Bounds of the given size.
	pub const fn new(width: f64, height: f64) -> Self {
		Self { width, height }
	}

	/// Inclusive containment test.
	pub fn contains(&self, x: f64, y: f64) -> bool {
		(0.0..=self.width).contains(&x) && (0.0..=self.height).contains(&y)
	}
}

/// Everything an update or reset reads from the outside world.
pub struct LifeContext<'a, R: ?Sized> {
	/// Current timestamp in milliseconds.
	pub now: f64,
	/// Current surface bounds.
	pub bounds: Bounds,
	/// Lifecycle parameters.
	pub config: &'a ParticleConfig,
	/// Randomness for resets.
	pub rng: &'a mut R,
}

/// Which opacity phase a particle is in. Exactly one holds at a time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FadePhase {
	/// Opacity still climbing toward its target.
	GrowingIn,
	/// At target opacity, not yet fading.
	Steady,
	/// Terminal fade-out has begun.
	FadingOut,
}

/// What an update did to the particle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UpdateOutcome {
	/// Normal step.
	Advanced,
	/// Lifespan exceeded; reset without stepping.
	Expired,
	/// Stepped outside the bounds and was reset.
	LeftBounds,
}

/// A single drifting particle with a fading trail.
#[derive(Clone, Debug)]
pub struct Particle {
	x: f64,
	y: f64,
	vx: f64,
	vy: f64,
	size: f64,
	alpha: f64,
	target_alpha: f64,
	fade_alpha: f64,
	fade_start: Option<f64>,
	created_at: f64,
	history: Trail,
}

impl Particle {
	/// Create a freshly reset particle.
	pub fn spawn<R: Rng + ?Sized>(ctx: &mut LifeContext<'_, R>) -> Self {
		let mut particle = Self {
			x: 0.0,
			y: 0.0,
			vx: 0.0,
			vy: 0.0,
			size: 0.0,
			alpha: 0.0,
			target_alpha: 0.0,
			fade_alpha: 1.0,
			fade_start: None,
			created_at: ctx.now,
			history: Trail::new(ctx.config.max_history),
		};
		particle.reset(ctx);
		particle
	}

	/// Reinitialize every field at once, starting a new life at `ctx.now`.
	pub fn reset<R: Rng + ?Sized>(&mut self, ctx: &mut LifeContext<'_, R>) {
		let cfg = ctx.config;
		let rng = &mut *ctx.rng;

		self.x = rng.random::<f64>() * ctx.bounds.width;
		self.y = rng.random::<f64>() * ctx.bounds.height;

		let speed = cfg.speed.sample(rng);
		self.vx = (rng.random::<f64>() - 0.5) * speed;
		self.vy = (rng.random::<f64>() - 0.5) * speed;

		self.size = cfg.size.sample(rng);
		self.alpha = 0.0;
		self.target_alpha = cfg.target_alpha.sample(rng);
		self.fade_alpha = 1.0;
		self.fade_start = None;
		self.created_at = ctx.now;

		if self.history.capacity() != cfg.max_history {
			self.history = Trail::new(cfg.max_history);
		} else {
			self.history.clear();
		}
	}

	/// Begin the terminal fade. Only the first call records a start time.
	pub fn start_fade_out(&mut self, now: f64) {
		if self.fade_start.is_none() {
			self.fade_start = Some(now);
		}
	}

	/// Advance one frame.
	pub fn update<R: Rng + ?Sized>(
		&mut self,
		ctx: &mut LifeContext<'_, R>,
	) -> UpdateOutcome {
		let now = ctx.now;
		let cfg = ctx.config;
		let age = now - self.created_at;

		if age > cfg.fade_start_delay_ms {
			self.start_fade_out(now);
		}

		if age > cfg.lifespan_ms {
			self.reset(ctx);
			return UpdateOutcome::Expired;
		}

		self.fade_alpha = match self.fade_start {
			Some(start) => (1.0 - (now - start) / cfg.fade_duration_ms).clamp(0.0, 1.0),
			None => 1.0,
		};

		self.history.push(self.x, self.y, self.target_alpha);

		self.x += self.vx;
		self.y += self.vy;

		if self.alpha < self.target_alpha {
			self.alpha = (self.alpha + cfg.fade_in_step).min(self.target_alpha);
		}

		let outcome = if ctx.bounds.contains(self.x, self.y) {
			UpdateOutcome::Advanced
		} else {
			self.reset(ctx);
			UpdateOutcome::LeftBounds
		};

		self.history.reweight(cfg.trail.dim, self.fade_alpha);
		outcome
	}

	/// Current opacity phase.
	pub fn phase(&self) -> FadePhase {
		if self.fade_start.is_some() {
			FadePhase::FadingOut
		} else if self.alpha < self.target_alpha {
			FadePhase::GrowingIn
		} else {
			FadePhase::Steady
		}
	}

	/// Horizontal position.
	pub fn x(&self) -> f64 {
		self.x
	}

	/// Vertical position.
	pub fn y(&self) -> f64 {
		self.y
	}

	/// Velocity per update, `(vx, vy)`.
	pub fn velocity(&self) -> (f64, f64) {
		(self.vx, self.vy)
	}

	/// Body radius.
	pub fn size(&self) -> f64 {
		self.size
	}

	/// Fade-in opacity.
	pub fn alpha(&self) -> f64 {
		self.alpha
	}

	/// Opacity ceiling for this life.
	pub fn target_alpha(&self) -> f64 {
		self.target_alpha
	}

	/// Fade-out multiplier, 1 until fading begins.
	pub fn fade_alpha(&self) -> f64 {
		self.fade_alpha
	}

	/// Opacity the body is drawn with.
	pub fn visible_alpha(&self) -> f64 {
		self.alpha * self.fade_alpha
	}

	/// Whether fade-out has begun.
	pub fn is_fading_out(&self) -> bool {
		self.fade_start.is_some()
	}

	/// When fade-out began, if it has.
	pub fn fade_start_time(&self) -> Option<f64> {
		self.fade_start
	}

	/// Start of the current life.
	pub fn created_at(&self) -> f64 {
		self.created_at
	}

	/// Recent positions, oldest first.
	pub fn history(&self) -> &Trail {
		&self.history
	}
}

#[cfg(test)]
mod tests {
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	use super::super::config::{Range, SceneConfig};
	use super::*;

	fn still_config() -> ParticleConfig {
		let mut cfg = SceneConfig::starfield().particles;
		cfg.speed = Range::fixed(0.0);
		cfg.max_history = 16;
		cfg
	}

	struct Harness {
		cfg: ParticleConfig,
		rng: StdRng,
		bounds: Bounds,
	}

	impl Harness {
		fn new(cfg: ParticleConfig) -> Self {
			Self {
				cfg,
				rng: StdRng::seed_from_u64(3),
				bounds: Bounds::new(800.0, 600.0),
			}
		}

		fn ctx(&mut self, now: f64) -> LifeContext<'_, StdRng> {
			LifeContext {
				now,
				bounds: self.bounds,
				config: &self.cfg,
				rng: &mut self.rng,
			}
		}

		fn spawn(&mut self, now: f64) -> Particle {
			Particle::spawn(&mut self.ctx(now))
		}

		fn step(&mut self, p: &mut Particle, now: f64) -> UpdateOutcome {
			p.update(&mut self.ctx(now))
		}
	}

	fn assert_invariants(p: &Particle, cfg: &ParticleConfig) {
		assert!(p.alpha() >= 0.0 && p.alpha() <= p.target_alpha());
		assert!(p.target_alpha() <= 1.0);
		assert!((0.0..=1.0).contains(&p.fade_alpha()));
		assert!(p.history().len() <= cfg.max_history);
	}

	#[test]
	fn spawn_starts_invisible_and_inside() {
		let mut h = Harness::new(SceneConfig::starfield().particles);
		for _ in 0..200 {
			let p = h.spawn(0.0);
			assert!(h.bounds.contains(p.x(), p.y()));
			assert_eq!(p.alpha(), 0.0);
			assert_eq!(p.fade_alpha(), 1.0);
			assert!(p.history().is_empty());
			assert!((0.8..=2.5).contains(&p.size()));
			assert!((0.2..=0.5).contains(&p.target_alpha()));
			let (vx, vy) = p.velocity();
			assert!(vx.abs() <= 2.7 / 2.0 && vy.abs() <= 2.7 / 2.0);
			assert_eq!(p.phase(), FadePhase::GrowingIn);
		}
	}

	#[test]
	fn fade_and_lifespan_timeline() {
		let mut h = Harness::new(still_config());
		let mut p = h.spawn(0.0);

		assert_eq!(h.step(&mut p, 44_999.0), UpdateOutcome::Advanced);
		assert!(!p.is_fading_out());

		assert_eq!(h.step(&mut p, 45_001.0), UpdateOutcome::Advanced);
		assert!(p.is_fading_out());
		assert_eq!(p.fade_alpha(), 1.0);
		assert_eq!(p.phase(), FadePhase::FadingOut);

		h.step(&mut p, 47_500.0);
		assert!((p.fade_alpha() - 0.5).abs() < 1e-3);

		assert_eq!(h.step(&mut p, 50_001.0), UpdateOutcome::Expired);
		assert_eq!(p.created_at(), 50_001.0);
		assert!(!p.is_fading_out());
		assert!(p.history().is_empty());
		assert_eq!(p.alpha(), 0.0);

		// A second update right after the reset must not reset again.
		assert_eq!(h.step(&mut p, 50_001.0), UpdateOutcome::Advanced);
		assert_eq!(p.created_at(), 50_001.0);
		assert_eq!(p.history().len(), 1);
	}

	#[test]
	fn fade_alpha_bottoms_out_at_zero() {
		let mut cfg = still_config();
		cfg.lifespan_ms = 100_000.0;
		let mut h = Harness::new(cfg);
		let mut p = h.spawn(0.0);

		h.step(&mut p, 45_001.0);
		h.step(&mut p, 60_000.0);
		assert_eq!(p.fade_alpha(), 0.0);
		assert!(p.history().iter().all(|pt| pt.alpha == 0.0));
	}

	#[test]
	fn start_fade_out_is_idempotent() {
		let mut h = Harness::new(still_config());
		let mut p = h.spawn(0.0);

		p.start_fade_out(1_000.0);
		p.start_fade_out(2_000.0);
		assert_eq!(p.fade_start_time(), Some(1_000.0));
	}

	#[test]
	fn leaving_bounds_resets_on_the_same_update() {
		let mut cfg = still_config();
		cfg.speed = Range::fixed(2.0);
		let mut h = Harness::new(cfg);
		let mut p = h.spawn(0.0);
		p.x = 799.9;
		p.vx = 1.0;
		p.vy = 0.0;
		p.history.push(1.0, 1.0, 0.3);

		assert_eq!(h.step(&mut p, 16.0), UpdateOutcome::LeftBounds);
		assert!(h.bounds.contains(p.x(), p.y()));
		assert!(p.history().is_empty());
		assert_eq!(p.alpha(), 0.0);
		assert_eq!(p.created_at(), 16.0);
	}

	#[test]
	fn shrunk_bounds_reset_stranded_particle() {
		let mut h = Harness::new(still_config());
		let mut p = h.spawn(0.0);
		p.x = 700.0;
		p.y = 500.0;

		h.bounds = Bounds::new(400.0, 300.0);
		assert_eq!(h.step(&mut p, 16.0), UpdateOutcome::LeftBounds);
		assert!((0.0..=400.0).contains(&p.x()));
		assert!((0.0..=300.0).contains(&p.y()));
	}

	#[test]
	fn fade_in_clamps_to_target() {
		let mut h = Harness::new(still_config());
		let mut p = h.spawn(0.0);
		let target = p.target_alpha();

		let steps = (target / 0.002).ceil() as usize + 5;
		for i in 0..steps {
			h.step(&mut p, i as f64);
			assert!(p.alpha() <= target);
		}
		assert_eq!(p.alpha(), target);
		assert_eq!(p.phase(), FadePhase::Steady);
	}

	#[test]
	fn history_is_bounded_and_weighted() {
		let mut h = Harness::new(still_config());
		let mut p = h.spawn(0.0);

		for i in 0..40 {
			h.step(&mut p, i as f64);
			assert_invariants(&p, &h.cfg);
		}
		assert_eq!(p.history().len(), 16);

		let alphas: Vec<f64> = p.history().iter().map(|pt| pt.alpha).collect();
		assert_eq!(alphas[0], 0.0);
		let newest = p.target_alpha() * (15.0 / 16.0) * 0.8;
		assert!((alphas[15] - newest).abs() < 1e-12);
	}

	#[test]
	fn invariants_hold_over_long_random_run() {
		let mut cfg = SceneConfig::drift().particles;
		cfg.lifespan_ms = 500.0;
		cfg.fade_start_delay_ms = 300.0;
		cfg.fade_duration_ms = 100.0;
		let mut h = Harness::new(cfg);
		let mut pool: Vec<Particle> = (0..20).map(|_| h.spawn(0.0)).collect();

		for frame in 0..2_000 {
			let now = frame as f64 * 16.0;
			for p in &mut pool {
				h.step(p, now);
				assert_invariants(p, &h.cfg);
				assert!(h.bounds.contains(p.x(), p.y()));
			}
		}
	}
}
