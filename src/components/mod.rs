//! UI components.

pub mod particle_field;
