//! Leptos component wrapping the particle field canvas.
//!
//! On mount the canvas is sized to the viewport, the field is seeded, a window
//! resize listener is registered and a [`FrameLoop`] starts stepping and drawing
//! the field every animation frame. Cleanup stops the loop and removes the
//! listener.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use leptos::prelude::*;
use log::{debug, info, warn};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use send_wrapper::SendWrapper;
use thiserror::Error;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, Window};

use super::frame_loop::{AnimationFrames, FrameLoop};
use super::listener::Listener;
use super::particles::ParticleField;
use super::runner::{FieldRunner, SurfaceSource};
use super::state::PointerState;

#[derive(Debug, Error)]
enum SurfaceError {
	#[error("getContext(\"2d\") threw")]
	Rejected,
	#[error("no 2d context available yet")]
	Unavailable,
	#[error("context is not a CanvasRenderingContext2d")]
	WrongType,
}

fn context_2d(canvas: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d, SurfaceError> {
	canvas
		.get_context("2d")
		.map_err(|_| SurfaceError::Rejected)?
		.ok_or(SurfaceError::Unavailable)?
		.dyn_into()
		.map_err(|_| SurfaceError::WrongType)
}

fn viewport_size(window: &Window) -> (f64, f64) {
	let dimension = |v: Result<wasm_bindgen::JsValue, wasm_bindgen::JsValue>| {
		v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0)
	};
	(dimension(window.inner_width()), dimension(window.inner_height()))
}

fn browser_seed() -> u64 {
	let noise = (js_sys::Math::random() * u64::MAX as f64) as u64;
	noise ^ js_sys::Date::now() as u64
}

/// The canvas, with its 2d context fetched on first use.
struct CanvasSource {
	canvas: HtmlCanvasElement,
	ctx: Option<CanvasRenderingContext2d>,
}

impl SurfaceSource for CanvasSource {
	type Surface = CanvasRenderingContext2d;

	fn acquire(&mut self) -> Option<&mut CanvasRenderingContext2d> {
		if self.ctx.is_none() {
			match context_2d(&self.canvas) {
				Ok(ctx) => self.ctx = Some(ctx),
				Err(e) => {
					debug!("particle-field: {}", e);
					return None;
				}
			}
		}
		self.ctx.as_mut()
	}

	fn resize(&mut self, width: f64, height: f64) {
		self.canvas.set_width(width as u32);
		self.canvas.set_height(height as u32);
	}
}

/// Resources held while the component is mounted.
struct Mounted {
	frames: FrameLoop<AnimationFrames>,
	_resize: Option<Listener<Window>>,
}

/// Full-viewport animated particle background.
///
/// Particles drift and bounce inside the viewport, linked to close neighbours.
/// Those near the mouse grow and light up.
#[component]
pub fn ParticleBackground() -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let context: Rc<RefCell<Option<FieldRunner<CanvasSource>>>> = Rc::new(RefCell::new(None));
	let pointer: Rc<Cell<PointerState>> = Rc::new(Cell::new(PointerState::default()));
	let mounted: Rc<RefCell<Option<Mounted>>> = Rc::new(RefCell::new(None));
	let (context_init, pointer_init, mounted_init) = (context.clone(), pointer.clone(), mounted.clone());

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		// The field is built once per mount; later effect runs leave it alone.
		if mounted_init.borrow().is_some() {
			return;
		}
		let Some(window) = web_sys::window() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();

		let (w, h) = viewport_size(&window);
		let style = crate::load_field_style();
		let mut rng = SmallRng::seed_from_u64(browser_seed());
		let mut c = FieldRunner::new(
			ParticleField::new(style, w, h, &mut rng),
			CanvasSource { canvas, ctx: None },
		);
		c.resize(w, h);
		info!(
			"particle-field: mounted {} particles on {}x{}",
			c.field().particles().len(),
			w,
			h
		);
		*context_init.borrow_mut() = Some(c);

		let context_resize = context_init.clone();
		let resize = Listener::new(window.clone(), "resize", move || {
			let Some(win) = web_sys::window() else {
				return;
			};
			let (nw, nh) = viewport_size(&win);
			if let Some(ref mut c) = *context_resize.borrow_mut() {
				c.resize(nw, nh);
			}
		});
		if let Err(e) = &resize {
			warn!("particle-field: could not listen for resize: {:?}", e);
		}

		let (context_anim, pointer_anim) = (context_init.clone(), pointer_init.clone());
		let frames = FrameLoop::start(AnimationFrames::new(window), move || {
			if let Some(ref mut c) = *context_anim.borrow_mut() {
				c.tick(pointer_anim.get());
			}
		});

		*mounted_init.borrow_mut() = Some(Mounted {
			frames,
			_resize: resize.ok(),
		});
	});

	let teardown = SendWrapper::new((mounted, context.clone()));
	on_cleanup(move || {
		let (mounted, context) = teardown.take();
		if let Some(m) = mounted.borrow_mut().take() {
			m.frames.stop();
		}
		context.borrow_mut().take();
		info!("particle-field: stopped");
	});

	let pointer_mm = pointer.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let rect = canvas.get_bounding_client_rect();
		let (x, y) = (
			ev.client_x() as f64 - rect.left(),
			ev.client_y() as f64 - rect.top(),
		);
		pointer_mm.set(pointer_mm.get().moved_to(x, y));
	};

	let pointer_me = pointer.clone();
	let on_mouseenter = move |_: MouseEvent| {
		pointer_me.set(pointer_me.get().entered());
	};

	let pointer_ml = pointer;
	let on_mouseleave = move |_: MouseEvent| {
		pointer_ml.set(pointer_ml.get().left());
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="particle-background"
			on:mousemove=on_mousemove
			on:mouseenter=on_mouseenter
			on:mouseleave=on_mouseleave
			style="display: block; position: fixed; inset: 0; width: 100%; height: 100%;"
		/>
	}
}
