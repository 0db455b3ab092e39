//! Leptos component that hosts the particle field on a viewport-sized canvas.
//!
//! The component creates a fixed-position canvas behind the page, builds a
//! [`Scene`] on it, and runs the animation loop via `requestAnimationFrame`.
//! A window `resize` listener keeps the canvas matched to the viewport.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::{debug, error, info};
use wasm_bindgen::prelude::*;
use web_sys::{HtmlCanvasElement, Window};

use super::animator::{Animator, LoopControl};
use super::canvas::{CanvasSurface, WallClock, entropy_seed};
use super::config::SceneSettings;
use super::error::SceneError;
use super::scene::Scene;

type FieldAnimator = Animator<CanvasSurface, WallClock>;
type FieldSlots = LoopSlots<FieldAnimator, Closure<dyn FnMut()>>;

/// Shared cells the browser callbacks reach the loop through.
struct LoopSlots<A, C> {
	animator: Rc<RefCell<Option<A>>>,
	frame: Rc<RefCell<Option<C>>>,
	resize: Rc<RefCell<Option<C>>>,
}

impl<A, C> Clone for LoopSlots<A, C> {
	fn clone(&self) -> Self {
		Self {
			animator: self.animator.clone(),
			frame: self.frame.clone(),
			resize: self.resize.clone(),
		}
	}
}

impl<A, C> LoopSlots<A, C> {
	fn new() -> Self {
		Self {
			animator: Rc::new(RefCell::new(None)),
			frame: Rc::new(RefCell::new(None)),
			resize: Rc::new(RefCell::new(None)),
		}
	}

	/// Empty every slot and hand back the resize callback so the caller can
	/// unregister it before it drops.
	///
	/// The frame callback holds these slots, so taking it out of its cell is
	/// what frees the loop. wasm-bindgen defers freeing a closure dropped
	/// during its own invocation until that call returns.
	fn release(&self) -> Option<C> {
		self.animator.borrow_mut().take();
		let frame = self.frame.borrow_mut().take();
		drop(frame);
		self.resize.borrow_mut().take()
	}
}

fn viewport_size(window: &Window) -> (f64, f64) {
	let dim = |v: Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
	(dim(window.inner_width()), dim(window.inner_height()))
}

fn build_animator(
	canvas: HtmlCanvasElement,
	settings: &SceneSettings,
) -> Result<FieldAnimator, SceneError> {
	let config = settings.resolve()?;
	let seed = settings.seed.unwrap_or_else(entropy_seed);
	let surface = CanvasSurface::new(canvas)?;
	let scene = Scene::new(surface, config, seed, js_sys::Date::now())?;
	Ok(Animator::new(scene, WallClock))
}

/// Animated particle background filling the viewport.
///
/// Pass overrides via the reactive `settings` signal; they are read once when
/// the canvas mounts. The loop stops when the component is cleaned up.
#[component]
pub fn ParticleBackground(#[prop(into)] settings: Signal<SceneSettings>) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let slots = FieldSlots::new();

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		if slots.animator.borrow().is_some() {
			return;
		}
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			error!("particle-field: no window, background disabled");
			return;
		};

		let (w, h) = viewport_size(&window);
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let built = match build_animator(canvas, &settings.get_untracked()) {
			Ok(built) => built,
			Err(e) => {
				error!("particle-field: {}", e);
				return;
			}
		};
		// The next frame sees the cancelled token and tears the loop down.
		let token = built.cancel_token();
		on_cleanup(move || token.cancel());
		info!(
			"particle-field: {:?} preset, {} particles on {}x{}",
			built.scene().config().preset,
			built.scene().particles().len(),
			w,
			h
		);
		*slots.animator.borrow_mut() = Some(built);

		let animator_resize = slots.animator.clone();
		*slots.resize.borrow_mut() = Some(Closure::new(move || {
			let Some(win) = web_sys::window() else {
				return;
			};
			let (nw, nh) = viewport_size(&win);
			if let Some(ref mut a) = *animator_resize.borrow_mut() {
				a.resize(nw, nh);
			}
		}));
		if let Some(ref cb) = *slots.resize.borrow() {
			let _ = window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
		}

		let slots_frame = slots.clone();
		*slots.frame.borrow_mut() = Some(Closure::new(move || {
			let control = match *slots_frame.animator.borrow_mut() {
				Some(ref mut a) => a.tick(),
				None => LoopControl::Stop,
			};
			let Some(win) = web_sys::window() else {
				return;
			};
			if control == LoopControl::Stop {
				if let Some(cb) = slots_frame.release() {
					let _ = win
						.remove_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
				}
				debug!("particle-field: loop stopped, listeners released");
				return;
			}
			if let Some(ref cb) = *slots_frame.frame.borrow() {
				let _ = win.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));
		if let Some(ref cb) = *slots.frame.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	view! {
		<canvas
			node_ref=canvas_ref
			class="particle-background"
			style="position: fixed; inset: 0; z-index: -1; pointer-events: none; display: block;"
		/>
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	/// Stands in for a browser callback that captures the loop's own slots.
	struct Callback {
		_slots: LoopSlots<u32, Callback>,
	}

	fn callback(slots: &LoopSlots<u32, Callback>) -> Callback {
		Callback {
			_slots: slots.clone(),
		}
	}

	#[test]
	fn release_breaks_the_callback_cycle() {
		let slots = LoopSlots::new();
		*slots.animator.borrow_mut() = Some(7);
		*slots.frame.borrow_mut() = Some(callback(&slots));
		*slots.resize.borrow_mut() = Some(callback(&slots));
		assert_eq!(Rc::strong_count(&slots.frame), 3);

		let resize = slots.release();
		assert!(resize.is_some());
		assert!(slots.animator.borrow().is_none());
		assert!(slots.frame.borrow().is_none());
		assert!(slots.resize.borrow().is_none());
		assert_eq!(Rc::strong_count(&slots.frame), 2);

		drop(resize);
		assert_eq!(Rc::strong_count(&slots.frame), 1);
		assert_eq!(Rc::strong_count(&slots.animator), 1);
	}

	#[test]
	fn release_on_empty_slots_is_harmless() {
		let slots: LoopSlots<u32, Callback> = LoopSlots::new();
		assert!(slots.release().is_none());
		assert!(slots.release().is_none());
	}
}
