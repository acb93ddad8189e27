//! Per-frame driver tying the simulation to a surface that may not exist yet.

use log::{debug, warn};

use super::particles::ParticleField;
use super::render::{self, Surface};
use super::state::PointerState;

/// Where frames get drawn.
pub trait SurfaceSource {
	/// The drawing target handed out per frame.
	type Surface: Surface;

	/// The surface for this frame, or `None` while it cannot be obtained.
	fn acquire(&mut self) -> Option<&mut Self::Surface>;

	/// Match the surface's pixel size to the viewport.
	fn resize(&mut self, width: f64, height: f64);
}

/// The simulation plus the surface it draws to.
pub struct FieldRunner<S> {
	field: ParticleField,
	source: S,
	reported_skips: bool,
}

impl<S: SurfaceSource> FieldRunner<S> {
	/// Pair a seeded field with its surface.
	pub fn new(field: ParticleField, source: S) -> Self {
		Self {
			field,
			source,
			reported_skips: false,
		}
	}

	/// The simulation being driven.
	pub fn field(&self) -> &ParticleField {
		&self.field
	}

	/// Resize the surface and the field bounds together.
	pub fn resize(&mut self, width: f64, height: f64) {
		self.source.resize(width, height);
		self.field.resize(width, height);
	}

	/// One frame: step then draw.
	///
	/// Without a surface nothing happens and the field is left as it was, so
	/// the next frame simply tries again. Returns whether the frame ran.
	pub fn tick(&mut self, pointer: PointerState) -> bool {
		let Some(surface) = self.source.acquire() else {
			debug!("particle-field: no surface, skipping frame");
			return false;
		};

		self.field.step(pointer);
		let skipped = render::render(&self.field, surface);
		if skipped > 0 && !self.reported_skips {
			warn!("particle-field: surface rejected {} particles", skipped);
			self.reported_skips = true;
		}
		true
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::particle_field::particles::Particle;
	use crate::components::particle_field::render::DrawCommand;
	use crate::components::particle_field::theme::FieldStyle;

	/// A surface that only exists once the test says so.
	#[derive(Default)]
	struct LateSurface {
		available: bool,
		size: (f64, f64),
		frame: Vec<DrawCommand>,
	}

	impl SurfaceSource for LateSurface {
		type Surface = Vec<DrawCommand>;

		fn acquire(&mut self) -> Option<&mut Vec<DrawCommand>> {
			self.available.then_some(&mut self.frame)
		}

		fn resize(&mut self, width: f64, height: f64) {
			self.size = (width, height);
		}
	}

	fn runner() -> FieldRunner<LateSurface> {
		let style = FieldStyle::default();
		let particles = vec![Particle::new(&style, 10.0, 10.0, 1.0, 0.5)];
		let field = ParticleField::from_particles(style, 100.0, 100.0, particles);
		FieldRunner::new(field, LateSurface::default())
	}

	#[test]
	fn missing_surface_skips_the_frame() {
		let mut runner = runner();
		let before = runner.field().particles().to_vec();

		assert!(!runner.tick(PointerState::default()));

		assert_eq!(runner.field().particles(), before.as_slice());
		assert!(runner.source.frame.is_empty());
	}

	#[test]
	fn frame_runs_once_surface_appears() {
		let mut runner = runner();
		runner.tick(PointerState::default());

		runner.source.available = true;
		assert!(runner.tick(PointerState::default()));

		let p = &runner.field().particles()[0];
		assert_eq!((p.x, p.y), (11.0, 10.5));
		assert!(runner
			.source
			.frame
			.contains(&DrawCommand::Circle { x: 11.0, y: 10.5, radius: 0.5 }));
	}

	#[test]
	fn resize_reaches_surface_and_field() {
		let mut runner = runner();

		runner.resize(640.0, 360.0);

		assert_eq!(runner.source.size, (640.0, 360.0));
		assert_eq!((runner.field().width(), runner.field().height()), (640.0, 360.0));
	}
}
