//! Errors raised while setting up a particle scene.
//!
//! Everything here is a precondition failure detected once at construction.
//! The per-frame path has no error states.

use thiserror::Error;

/// Setup failures for a particle scene.
#[derive(Debug, Error)]
pub enum SceneError {
	/// The drawing surface has no area to draw on.
	#[error("drawing surface is {width}x{height}, both dimensions must be positive")]
	ZeroSizedSurface {
		/// Surface width at construction.
		width: f64,
		/// Surface height at construction.
		height: f64,
	},

	/// A sampling band has `min > max` or non-finite ends.
	#[error("{field} range is invalid: min {min} > max {max}")]
	InvalidRange {
		/// Name of the offending setting.
		field: &'static str,
		/// Lower bound.
		min: f64,
		/// Upper bound.
		max: f64,
	},

	/// An opacity band reaches outside `[0, 1]`.
	#[error("{field} must lie within [0, 1], got [{min}, {max}]")]
	AlphaOutOfRange {
		/// Name of the offending setting.
		field: &'static str,
		/// Lower bound.
		min: f64,
		/// Upper bound.
		max: f64,
	},

	/// A duration, step or spacing that must be strictly positive.
	#[error("{field} must be positive, got {value}")]
	NonPositive {
		/// Name of the offending setting.
		field: &'static str,
		/// Rejected value.
		value: f64,
	},

	/// A delay that may be zero but not negative.
	#[error("{field} must not be negative, got {value}")]
	Negative {
		/// Name of the offending setting.
		field: &'static str,
		/// Rejected value.
		value: f64,
	},

	/// A pool or history size beyond what a background should allocate.
	#[error("{field} is {value}, the limit is {limit}")]
	ExceedsLimit {
		/// Name of the offending setting.
		field: &'static str,
		/// Requested size.
		value: usize,
		/// Largest accepted size.
		limit: usize,
	},

	/// The canvas element did not hand out a 2-D context.
	#[error("canvas 2d context unavailable")]
	ContextUnavailable,

	/// Page-supplied settings JSON could not be parsed.
	#[error("malformed particle settings: {0}")]
	Settings(#[from] serde_json::Error),
}
