//! Frame driver for a scene.
//!
//! The host calls [`Animator::tick`] once per display refresh and asks for
//! another refresh only while it returns [`LoopControl::Continue`]. Tests drive
//! the same path through [`Animator::run_for`] with a manual clock.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use log::{debug, trace};

use super::scene::Scene;
use super::surface::Surface;

/// Millisecond timestamp source.
pub trait Clock {
	/// Current time in milliseconds.
	fn now_ms(&self) -> f64;
}

/// Shared flag that stops the frame loop.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
	/// Fresh, uncancelled token.
	pub fn new() -> Self {
		Self::default()
	}

	/// Stop the loop before its next frame.
	pub fn cancel(&self) {
		self.0.store(true, Ordering::Relaxed);
	}

	/// Whether [`cancel`](Self::cancel) has been called.
	pub fn is_cancelled(&self) -> bool {
		self.0.load(Ordering::Relaxed)
	}
}

/// Whether the host should schedule another frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopControl {
	/// Request the next display refresh.
	Continue,
	/// Stop scheduling.
	Stop,
}

/// Drives a [`Scene`] from a [`Clock`].
pub struct Animator<S: Surface, C: Clock> {
	scene: Scene<S>,
	clock: C,
	cancel: CancelToken,
	frames: u64,
	last_frame_at: Option<f64>,
	last_delta: f64,
}

impl<S: Surface, C: Clock> Animator<S, C> {
	/// Wrap a scene; the loop runs until the returned token is cancelled.
	pub fn new(scene: Scene<S>, clock: C) -> Self {
		Self {
			scene,
			clock,
			cancel: CancelToken::new(),
			frames: 0,
			last_frame_at: None,
			last_delta: 0.0,
		}
	}

	/// Handle for stopping the loop.
	pub fn cancel_token(&self) -> CancelToken {
		self.cancel.clone()
	}

	/// Render one frame at the clock's current time.
	pub fn tick(&mut self) -> LoopControl {
		if self.cancel.is_cancelled() {
			debug!("particle-field: loop cancelled after {} frames", self.frames);
			return LoopControl::Stop;
		}

		let now = self.clock.now_ms();
		self.last_delta = self.last_frame_at.map_or(0.0, |prev| now - prev);
		self.last_frame_at = Some(now);

		self.scene.frame(now);
		self.frames += 1;
		trace!(
			"particle-field: frame {} at {:.1}ms (dt {:.1}ms)",
			self.frames, now, self.last_delta
		);
		LoopControl::Continue
	}

	/// Tick up to `max_frames` times, stopping early on cancellation.
	/// Returns the number of frames rendered.
	pub fn run_for(&mut self, max_frames: u64) -> u64 {
		let start = self.frames;
		for _ in 0..max_frames {
			if self.tick() == LoopControl::Stop {
				break;
			}
		}
		self.frames - start
	}

	/// Forward a viewport change to the scene.
	pub fn resize(&mut self, width: f64, height: f64) {
		self.scene.resize(width, height);
	}

	/// Frames rendered so far.
	pub fn frames(&self) -> u64 {
		self.frames
	}

	/// Wall-clock time between the last two frames, 0 before the second.
	pub fn last_delta(&self) -> f64 {
		self.last_delta
	}

	/// The driven scene.
	pub fn scene(&self) -> &Scene<S> {
		&self.scene
	}
}

#[cfg(test)]
mod tests {
	use std::cell::Cell;
	use std::rc::Rc;

	use super::super::config::SceneConfig;
	use super::super::surface::recording::RecordingSurface;
	use super::*;

	/// Clock that advances a fixed step every time it is read.
	#[derive(Clone)]
	struct SteppingClock {
		now: Rc<Cell<f64>>,
		step: f64,
	}

	impl Clock for SteppingClock {
		fn now_ms(&self) -> f64 {
			let t = self.now.get();
			self.now.set(t + self.step);
			t
		}
	}

	fn animator(step: f64) -> Animator<RecordingSurface, SteppingClock> {
		let scene = Scene::new(
			RecordingSurface::new(320.0, 240.0),
			SceneConfig::drift(),
			5,
			0.0,
		)
		.unwrap();
		let clock = SteppingClock {
			now: Rc::new(Cell::new(0.0)),
			step,
		};
		Animator::new(scene, clock)
	}

	#[test]
	fn runs_bounded_number_of_frames() {
		let mut a = animator(16.0);
		assert_eq!(a.run_for(30), 30);
		assert_eq!(a.frames(), 30);
		assert_eq!(a.last_delta(), 16.0);
	}

	#[test]
	fn cancellation_stops_the_loop() {
		let mut a = animator(16.0);
		let token = a.cancel_token();
		assert_eq!(a.tick(), LoopControl::Continue);

		token.cancel();
		assert_eq!(a.tick(), LoopControl::Stop);
		assert_eq!(a.run_for(10), 0);
		assert_eq!(a.frames(), 1);
	}

	#[test]
	fn delta_follows_the_clock() {
		let mut a = animator(33.0);
		a.tick();
		assert_eq!(a.last_delta(), 0.0);
		a.tick();
		assert_eq!(a.last_delta(), 33.0);
	}

	#[test]
	fn resize_mid_run_keeps_pool() {
		let mut a = animator(16.0);
		a.run_for(5);
		a.resize(100.0, 80.0);
		a.run_for(5);
		assert_eq!(a.scene().particles().len(), 35);
		let bounds = a.scene().bounds();
		assert!(
			a.scene()
				.particles()
				.iter()
				.all(|p| bounds.contains(p.x(), p.y()))
		);
	}

	#[test]
	fn particles_expire_over_long_runs() {
		// 10s lifespan at 16ms per frame: every particle is reborn at least once.
		let mut a = animator(16.0);
		a.run_for(700);
		assert!(a.scene().particles().iter().all(|p| p.created_at() > 0.0));
	}
}
