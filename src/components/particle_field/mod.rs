//! Ambient particle background.
//!
//! Draws drifting particles with fading trails over a faint static grid:
//! - Particles fade in, drift linearly, fade out near the end of their life,
//!   and are reborn in place when they expire or leave the surface
//! - Trails are bounded position histories rendered as dimming segments
//! - Frames are composited on any [`Surface`]; the browser uses a canvas
//! - The loop runs via `requestAnimationFrame` and stops on a [`CancelToken`]
//!
//! # Example
//!
//! ```ignore
//! use drift_field::{ParticleBackground, SceneSettings, Preset};
//!
//! let settings = SceneSettings { preset: Preset::Drift, ..Default::default() };
//!
//! view! { <ParticleBackground settings=settings /> }
//! ```

mod animator;
mod canvas;
mod component;
pub mod config;
mod error;
mod particle;
mod render;
mod scene;
pub mod surface;
pub mod theme;
mod trail;

pub use animator::{Animator, CancelToken, Clock, LoopControl};
pub use canvas::{CanvasSurface, WallClock};
pub use component::ParticleBackground;
pub use config::{ParticleConfig, Preset, Range, SceneConfig, SceneSettings};
pub use error::SceneError;
pub use particle::{Bounds, FadePhase, LifeContext, Particle, UpdateOutcome};
pub use scene::Scene;
pub use surface::Surface;
pub use trail::{Trail, TrailPoint};
