//! live-background: animated flow-field particle backdrop for a portfolio page.
//!
//! This crate provides a WASM canvas component that fills the viewport behind
//! page content with drifting, pointer-shy particles joined by proximity lines.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

pub mod components;

pub use components::particle_field::{
	DeviceClass, FieldConfig, FieldState, Particle, ParticleFieldCanvas, ParticleSystem, Pointer,
	Surface, Theme,
};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("live-background: logging initialized");
}

/// Load field configuration from a script element with id="field-config".
/// Expected format: JSON matching [`FieldConfig`], every field optional.
fn load_field_config() -> Option<FieldConfig> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id("field-config")?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	let json_text = script.text().ok()?;

	match FieldConfig::from_json(&json_text) {
		Ok(config) => {
			info!(
				"live-background: loaded config ({} wide / {} narrow particles)",
				config.wide.count, config.narrow.count
			);
			Some(config)
		}
		Err(e) => {
			warn!("live-background: failed to parse field config: {}", e);
			None
		}
	}
}

/// Main application component.
/// Mounts the particle background behind whatever page content is passed in.
#[component]
pub fn App(#[prop(optional)] children: Option<Children>) -> impl IntoView {
	provide_meta_context();

	// Fall back to the built-in look when the page carries no config
	let config = load_field_config().unwrap_or_default();

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="dark" />
		<Title text="Portfolio" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<ParticleFieldCanvas config=config />
		<main class="page-content" style="position: relative; z-index: 1;">
			{children.map(|c| c())}
		</main>
	}
}
