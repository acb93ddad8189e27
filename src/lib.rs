//! portfolio-particles: animated particle background for the portfolio landing page.
//!
//! This crate provides a WASM-based canvas component that renders a drifting,
//! interlinked particle field reacting to the mouse, plus the landing page
//! that hosts it.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

pub mod components;

pub use components::particle_field::{FieldStyle, ParticleBackground};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("portfolio-particles: logging initialized");
}

/// Parse a particle field configuration document.
///
/// Any field may be omitted and falls back to its default. Values the
/// renderer cannot draw with (negative radii, non-positive distances,
/// opacities outside `[0, 1]`) make the whole document an error.
pub fn parse_field_style(json: &str) -> Result<FieldStyle, serde_json::Error> {
	serde_json::from_str(json)
}

/// Load the particle field configuration from a script element with
/// id="particle-config", falling back to the defaults.
pub fn load_field_style() -> FieldStyle {
	let Some(json_text) = field_style_source() else {
		return FieldStyle::default();
	};

	match parse_field_style(&json_text) {
		Ok(style) => {
			info!("portfolio-particles: loaded particle config ({} particles)", style.particle_count);
			style
		}
		Err(e) => {
			warn!("portfolio-particles: failed to parse particle config: {}", e);
			FieldStyle::default()
		}
	}
}

fn field_style_source() -> Option<String> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id("particle-config")?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	script.text().ok()
}

/// Landing page: the particle background behind a hero overlay.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="dark" />
		<Title text="Donald Cross" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<main class="landing">
			<ParticleBackground />
			<section id="home" class="hero">
				<h1>"Full-Stack Developer"</h1>
				<p class="subtitle">"Seasoned software engineer with 6+ years of experience"</p>
			</section>
		</main>
	}
}
