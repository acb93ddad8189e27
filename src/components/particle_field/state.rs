//! Pointer tracking shared between event handlers and the frame loop.

/// Last known pointer position over the canvas.
///
/// `active` is set on `mouseenter` and cleared on `mouseleave`; the position is
/// only meaningful while active. Coordinates are in canvas pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerState {
	/// Whether the pointer is over the canvas
	pub active: bool,
	/// Last horizontal position
	pub x: f64,
	/// Last vertical position
	pub y: f64,
}

impl PointerState {
	/// An active pointer at `(x, y)`.
	pub fn at(x: f64, y: f64) -> Self {
		Self { active: true, x, y }
	}

	/// Same activity, new position.
	pub fn moved_to(self, x: f64, y: f64) -> Self {
		Self { x, y, ..self }
	}

	/// Pointer entered the canvas.
	pub fn entered(self) -> Self {
		Self {
			active: true,
			..self
		}
	}

	/// Pointer left the canvas; the position is kept.
	pub fn left(self) -> Self {
		Self {
			active: false,
			..self
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn leaving_keeps_last_position() {
		let p = PointerState::default().entered().moved_to(12.0, 34.0).left();
		assert!(!p.active);
		assert_eq!((p.x, p.y), (12.0, 34.0));
	}

	#[test]
	fn move_does_not_activate() {
		let p = PointerState::default().moved_to(5.0, 5.0);
		assert!(!p.active);
		assert!(p.entered().active);
	}
}
