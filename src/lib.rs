//! drift-field: ambient particle background for web pages.
//!
//! This crate provides a WASM-based background component that renders
//! drifting, fading particles with trails over a faint grid, behind the
//! page's own content.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

pub mod components;

pub use components::particle_field::{ParticleBackground, Preset, SceneConfig, SceneSettings};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("drift-field: logging initialized");
}

/// Load background settings from a script element with id="particle-config".
/// Expected format: JSON such as `{ "preset": "drift", "count": 40 }`.
fn load_settings() -> Option<SceneSettings> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id("particle-config")?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	let json_text = script.text().ok()?;

	match SceneSettings::from_json(&json_text) {
		Ok(settings) => {
			info!("drift-field: loaded {:?} settings", settings.preset);
			Some(settings)
		}
		Err(e) => {
			warn!("drift-field: {}, using defaults", e);
			None
		}
	}
}

/// Main application component.
/// Loads settings from the DOM and mounts the animated background.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let settings = load_settings().unwrap_or_default();
	let settings_signal = Signal::derive(move || settings.clone());

	view! {
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<ParticleBackground settings=settings_signal />
	}
}
