//! Drawing the particle field.
//!
//! Rendering goes through the [`Surface`] trait so the same pass can target a
//! canvas 2D context in the browser or a plain command list in tests.
//! Each frame is drawn in two passes:
//! 1. Particles, as filled circles tinted by their current opacity
//! 2. Links between every close pair, on top

use std::convert::Infallible;
use std::f64::consts::PI;
use std::fmt::Debug;

use log::debug;
use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::particles::ParticleField;

/// The immediate-mode drawing operations the renderer needs.
pub trait Surface {
	/// Failure reported by [`fill_circle`](Surface::fill_circle).
	type Error: Debug;

	/// Erase a rectangle to transparent.
	fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64);
	/// CSS color used by subsequent fills.
	fn set_fill_color(&mut self, css: &str);
	/// CSS color used by subsequent strokes.
	fn set_stroke_color(&mut self, css: &str);
	/// Width of subsequent strokes.
	fn set_line_width(&mut self, width: f64);
	/// Fill a circle centred on `(x, y)`. Fails on a radius the target rejects.
	fn fill_circle(&mut self, x: f64, y: f64, radius: f64) -> Result<(), Self::Error>;
	/// Stroke a straight segment.
	fn stroke_line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64);
}

impl Surface for CanvasRenderingContext2d {
	type Error = JsValue;

	fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
		CanvasRenderingContext2d::clear_rect(self, x, y, width, height);
	}

	fn set_fill_color(&mut self, css: &str) {
		self.set_fill_style_str(css);
	}

	fn set_stroke_color(&mut self, css: &str) {
		self.set_stroke_style_str(css);
	}

	fn set_line_width(&mut self, width: f64) {
		CanvasRenderingContext2d::set_line_width(self, width);
	}

	fn fill_circle(&mut self, x: f64, y: f64, radius: f64) -> Result<(), JsValue> {
		self.begin_path();
		self.arc(x, y, radius, 0.0, PI * 2.0)?;
		self.fill();
		Ok(())
	}

	fn stroke_line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) {
		self.begin_path();
		self.move_to(x1, y1);
		self.line_to(x2, y2);
		self.stroke();
	}
}

/// One recorded drawing operation.
#[derive(Clone, Debug, PartialEq)]
#[allow(missing_docs, reason = "variant fields mirror the Surface method arguments")]
pub enum DrawCommand {
	/// [`Surface::clear_rect`] from the origin
	Clear { width: f64, height: f64 },
	/// [`Surface::set_fill_color`]
	FillColor(String),
	/// [`Surface::set_stroke_color`]
	StrokeColor(String),
	/// [`Surface::set_line_width`]
	LineWidth(f64),
	/// [`Surface::fill_circle`]
	Circle { x: f64, y: f64, radius: f64 },
	/// [`Surface::stroke_line`]
	Line { from: (f64, f64), to: (f64, f64) },
}

/// Records commands instead of drawing them.
impl Surface for Vec<DrawCommand> {
	type Error = Infallible;

	fn clear_rect(&mut self, _x: f64, _y: f64, width: f64, height: f64) {
		self.push(DrawCommand::Clear { width, height });
	}

	fn set_fill_color(&mut self, css: &str) {
		self.push(DrawCommand::FillColor(css.to_string()));
	}

	fn set_stroke_color(&mut self, css: &str) {
		self.push(DrawCommand::StrokeColor(css.to_string()));
	}

	fn set_line_width(&mut self, width: f64) {
		self.push(DrawCommand::LineWidth(width));
	}

	fn fill_circle(&mut self, x: f64, y: f64, radius: f64) -> Result<(), Infallible> {
		self.push(DrawCommand::Circle { x, y, radius });
		Ok(())
	}

	fn stroke_line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) {
		self.push(DrawCommand::Line {
			from: (x1, y1),
			to: (x2, y2),
		});
	}
}

/// Renders the complete field, clearing the surface first.
///
/// A particle the surface refuses to draw is skipped; the rest of the frame,
/// links included, is still drawn. Returns how many particles were skipped.
pub fn render<S: Surface>(field: &ParticleField, surface: &mut S) -> usize {
	surface.clear_rect(0.0, 0.0, field.width(), field.height());
	let skipped = draw_particles(field, surface);
	draw_links(field, surface);
	skipped
}

fn draw_particles<S: Surface>(field: &ParticleField, surface: &mut S) -> usize {
	let color = field.style().particle_color;
	let mut skipped = 0;
	for p in field.particles() {
		surface.set_fill_color(&color.to_css_with_alpha(p.opacity));
		if let Err(e) = surface.fill_circle(p.x, p.y, p.size) {
			debug!("particle-field: skipped particle at ({}, {}): {:?}", p.x, p.y, e);
			skipped += 1;
		}
	}
	skipped
}

/// Links every unordered pair closer than the link distance.
///
/// Coincident particles (distance zero) are skipped. This is a plain O(n²)
/// scan; fine at a few hundred particles.
fn draw_links<S: Surface>(field: &ParticleField, surface: &mut S) {
	let style = field.style();
	let particles = field.particles();
	let mut styled = false;

	for (i, a) in particles.iter().enumerate() {
		for b in &particles[i + 1..] {
			let distance = a.distance_to(b.x, b.y);
			if distance <= 0.0 || distance >= style.link_distance {
				continue;
			}
			if !styled {
				surface.set_stroke_color(&style.link_color.to_css_with_alpha(style.link_opacity));
				surface.set_line_width(style.link_width);
				styled = true;
			}
			surface.stroke_line(a.x, a.y, b.x, b.y);
		}
	}
}
