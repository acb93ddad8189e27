//! Animated particle background.
//!
//! Renders an ambient particle field on a full-viewport HTML canvas with:
//! - A fixed pool of particles drifting and bouncing off the viewport edges
//! - Links between particles closer than a threshold distance
//! - Particles growing and brightening near the mouse pointer
//!
//! The simulation ([`ParticleField`]) and drawing ([`render()`]) are independent
//! of the browser; [`ParticleBackground`] wires them to a canvas and an
//! animation frame loop.
//!
//! # Example
//!
//! ```ignore
//! view! { <ParticleBackground /> }
//! ```

mod component;
pub mod frame_loop;
mod listener;
mod particles;
pub mod render;
mod runner;
mod state;
pub mod theme;

pub use component::ParticleBackground;
pub use particles::{Particle, ParticleField};
pub use render::{DrawCommand, Surface, render};
pub use state::PointerState;
pub use theme::{Color, FieldStyle};
