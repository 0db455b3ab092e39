//! Bounded position history rendered as a fading tail.

use std::collections::VecDeque;

/// One remembered position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrailPoint {
	/// Horizontal position in pixels.
	pub x: f64,
	/// Vertical position in pixels.
	pub y: f64,
	/// Opacity the point was recorded with (the particle's target alpha).
	pub base_alpha: f64,
	/// Opacity to render with, recomputed every update.
	pub alpha: f64,
}

/// Chronological ring of recent positions, oldest first.
///
/// Once `capacity` points are held, each push evicts the oldest one.
#[derive(Clone, Debug)]
pub struct Trail {
	points: VecDeque<TrailPoint>,
	capacity: usize,
}

impl Trail {
	/// Empty trail that keeps at most `capacity` points.
	pub fn new(capacity: usize) -> Self {
		Self {
			points: VecDeque::with_capacity(capacity.min(1024) + 1),
			capacity,
		}
	}

	/// Append a position, evicting the oldest once over capacity.
	pub fn push(&mut self, x: f64, y: f64, base_alpha: f64) {
		self.points.push_back(TrailPoint {
			x,
			y,
			base_alpha,
			alpha: 0.0,
		});
		while self.points.len() > self.capacity {
			self.points.pop_front();
		}
	}

	/// Recompute every point's alpha so older points are dimmer.
	///
	/// `alpha = base_alpha * (index / len) * dim * fade`.
	pub fn reweight(&mut self, dim: f64, fade: f64) {
		let len = self.points.len() as f64;
		for (index, point) in self.points.iter_mut().enumerate() {
			let age_in_history = index as f64 / len;
			point.alpha = point.base_alpha * age_in_history * dim * fade;
		}
	}

	/// Drop every point.
	pub fn clear(&mut self) {
		self.points.clear();
	}

	/// Number of stored points.
	pub fn len(&self) -> usize {
		self.points.len()
	}

	/// Whether no points are stored.
	pub fn is_empty(&self) -> bool {
		self.points.is_empty()
	}

	/// Maximum number of points kept.
	pub fn capacity(&self) -> usize {
		self.capacity
	}

	/// Points oldest first.
	pub fn iter(&self) -> impl Iterator<Item = &TrailPoint> {
		self.points.iter()
	}

	/// Consecutive `(earlier, later)` pairs, i.e. the drawable segments.
	pub fn segments(&self) -> impl Iterator<Item = (&TrailPoint, &TrailPoint)> {
		self.points.iter().zip(self.points.iter().skip(1))
	}
}
