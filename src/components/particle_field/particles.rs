//! Particle simulation: a fixed pool of drifting points bouncing inside the
//! surface bounds, emphasised near the pointer.

use rand::Rng;

use super::state::PointerState;
use super::theme::FieldStyle;

/// A single floating particle.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
	/// Horizontal position in surface pixels
	pub x: f64,
	/// Vertical position in surface pixels
	pub y: f64,
	/// Horizontal displacement per frame
	pub vx: f64,
	/// Vertical displacement per frame
	pub vy: f64,
	/// Current radius
	pub size: f64,
	/// Current alpha, 0 to 1
	pub opacity: f64,
}

impl Particle {
	/// A resting particle at `(x, y)` with base size and opacity.
	pub fn new(style: &FieldStyle, x: f64, y: f64, vx: f64, vy: f64) -> Self {
		Self {
			x,
			y,
			vx,
			vy,
			size: style.particle_size,
			opacity: style.base_opacity,
		}
	}

	fn random<R: Rng + ?Sized>(style: &FieldStyle, width: f64, height: f64, rng: &mut R) -> Self {
		let x = rng.random::<f64>() * width;
		let y = rng.random::<f64>() * height;
		let vx = (rng.random::<f64>() - 0.5) * style.speed;
		let vy = (rng.random::<f64>() - 0.5) * style.speed;
		Self::new(style, x, y, vx, vy)
	}

	/// Euclidean distance to `(x, y)`.
	pub fn distance_to(&self, x: f64, y: f64) -> f64 {
		let (dx, dy) = (x - self.x, y - self.y);
		(dx * dx + dy * dy).sqrt()
	}
}

/// The particle pool together with the bounds it bounces within.
///
/// Built once per mount by [`ParticleField::new`]; afterwards only
/// [`resize`](ParticleField::resize) and [`step`](ParticleField::step) touch it.
#[derive(Clone, Debug)]
pub struct ParticleField {
	particles: Vec<Particle>,
	style: FieldStyle,
	width: f64,
	height: f64,
}

impl ParticleField {
	/// Seeds `style.particle_count` particles uniformly across the surface.
	pub fn new<R: Rng + ?Sized>(style: FieldStyle, width: f64, height: f64, rng: &mut R) -> Self {
		let particles = (0..style.particle_count)
			.map(|_| Particle::random(&style, width, height, rng))
			.collect();
		Self {
			particles,
			style,
			width,
			height,
		}
	}

	/// Builds a field from explicit particles.
	pub fn from_particles(style: FieldStyle, width: f64, height: f64, particles: Vec<Particle>) -> Self {
		Self {
			particles,
			style,
			width,
			height,
		}
	}

	/// The pool, in creation order.
	pub fn particles(&self) -> &[Particle] {
		&self.particles
	}

	/// Mutable access to the pool; its length cannot change.
	pub fn particles_mut(&mut self) -> &mut [Particle] {
		&mut self.particles
	}

	/// The constants this field was built with.
	pub fn style(&self) -> &FieldStyle {
		&self.style
	}

	/// Current bounds width.
	pub fn width(&self) -> f64 {
		self.width
	}

	/// Current bounds height.
	pub fn height(&self) -> f64 {
		self.height
	}

	/// Update the bounds. Particles are left where they are; any now outside
	/// the surface turn around on their next step.
	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}

	/// Advance every particle by one frame.
	///
	/// With an inactive pointer, size and opacity keep whatever the last active
	/// frame gave them; they only reset once the pointer is back and the
	/// particle is out of reach.
	pub fn step(&mut self, pointer: PointerState) {
		let style = &self.style;
		for p in &mut self.particles {
			p.x += p.vx;
			p.y += p.vy;

			if p.x < 0.0 || p.x > self.width {
				p.vx = -p.vx;
			}
			if p.y < 0.0 || p.y > self.height {
				p.vy = -p.vy;
			}

			if !pointer.active {
				continue;
			}
			let distance = p.distance_to(pointer.x, pointer.y);
			if distance < style.bubble_distance {
				let t = 1.0 - distance / style.bubble_distance;
				p.size = style.particle_size + (style.bubble_radius - style.particle_size) * t;
				p.opacity = 1.0;
			} else {
				p.size = style.particle_size;
				p.opacity = style.base_opacity;
			}
		}
	}
}
