//! Visual constants for the particle field.
//!
//! Everything the renderer needs to know about how the field looks and moves
//! lives in [`FieldStyle`]. The defaults are the production landing page values;
//! the host page may override any subset of them (see [`crate::load_field_style`]).

use serde::Deserialize;
use thiserror::Error;

/// Error returned when a color string is not `#rrggbb`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorParseError {
	/// No leading `#`.
	#[error("color must start with '#': {0:?}")]
	MissingHash(String),
	/// Not six characters after the `#`.
	#[error("color must have exactly 6 hex digits: {0:?}")]
	BadLength(String),
	/// Six characters, but not all hex.
	#[error("invalid hex digits in color: {0:?}")]
	BadDigits(String),
}

/// Opaque RGB color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub struct Color {
	/// Red channel
	pub r: u8,
	/// Green channel
	pub g: u8,
	/// Blue channel
	pub b: u8,
}

impl Color {
	/// Color from its three channels.
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b }
	}

	/// Parses `#rrggbb`.
	pub fn parse_hex(s: &str) -> Result<Self, ColorParseError> {
		let Some(digits) = s.strip_prefix('#') else {
			return Err(ColorParseError::MissingHash(s.to_string()));
		};
		if digits.len() != 6 {
			return Err(ColorParseError::BadLength(s.to_string()));
		}
		let channel = |range: std::ops::Range<usize>| {
			digits
				.get(range)
				.and_then(|hex| u8::from_str_radix(hex, 16).ok())
				.ok_or_else(|| ColorParseError::BadDigits(s.to_string()))
		};
		Ok(Self::rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
	}

	/// CSS `#rrggbbaa` with the alpha byte truncated from `alpha * 255`.
	///
	/// Alpha is clamped to `[0, 1]` so the byte always fits.
	pub fn to_css_with_alpha(self, alpha: f64) -> String {
		let a = (alpha.clamp(0.0, 1.0) * 255.0).floor() as u8;
		format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, a)
	}
}

impl TryFrom<String> for Color {
	type Error = ColorParseError;

	fn try_from(value: String) -> Result<Self, Self::Error> {
		Self::parse_hex(&value)
	}
}

/// A [`FieldStyle`] value the renderer cannot draw with.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StyleError {
	/// A length that must be zero or more is negative or not finite.
	#[error("{field} must be a finite value >= 0, got {value}")]
	Negative {
		/// Offending field
		field: &'static str,
		/// Value it was given
		value: f64,
	},
	/// A distance used as a divisor or threshold is not strictly positive.
	#[error("{field} must be a finite value > 0, got {value}")]
	NotPositive {
		/// Offending field
		field: &'static str,
		/// Value it was given
		value: f64,
	},
	/// An opacity outside `[0, 1]`.
	#[error("{field} must be within [0, 1], got {value}")]
	OutOfUnitRange {
		/// Offending field
		field: &'static str,
		/// Value it was given
		value: f64,
	},
}

/// Particle field configuration.
///
/// Deserializing validates the document; see [`FieldStyle::validate`].
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(try_from = "FieldStyleDoc")]
pub struct FieldStyle {
	/// Number of particles, fixed for the lifetime of a field
	pub particle_count: usize,
	/// Base particle radius
	pub particle_size: f64,
	/// Fill color of every particle
	pub particle_color: Color,
	/// Opacity of a particle outside the pointer's reach
	pub base_opacity: f64,
	/// Stroke color of links
	pub link_color: Color,
	/// Opacity of links
	pub link_opacity: f64,
	/// Link stroke width
	pub link_width: f64,
	/// Links are drawn between particles strictly closer than this
	pub link_distance: f64,
	/// Velocity components are drawn from `[-speed / 2, speed / 2)`
	pub speed: f64,
	/// Radius of a particle sitting right under the pointer
	pub bubble_radius: f64,
	/// Pointer interaction radius
	pub bubble_distance: f64,
}

impl Default for FieldStyle {
	fn default() -> Self {
		Self {
			particle_count: 400,
			particle_size: 0.5,
			particle_color: Color::rgb(0, 255, 255),
			base_opacity: 0.5,
			link_color: Color::rgb(255, 255, 255),
			link_opacity: 0.3,
			link_width: 0.5,
			link_distance: 40.0,
			speed: 1.0,
			bubble_radius: 6.0,
			bubble_distance: 80.0,
		}
	}
}

impl FieldStyle {
	/// Checks every value is one the renderer can draw with.
	pub fn validate(&self) -> Result<(), StyleError> {
		non_negative("particle_size", self.particle_size)?;
		non_negative("bubble_radius", self.bubble_radius)?;
		non_negative("link_width", self.link_width)?;
		non_negative("speed", self.speed)?;
		positive("link_distance", self.link_distance)?;
		positive("bubble_distance", self.bubble_distance)?;
		unit("base_opacity", self.base_opacity)?;
		unit("link_opacity", self.link_opacity)?;
		Ok(())
	}
}

fn non_negative(field: &'static str, value: f64) -> Result<(), StyleError> {
	if value.is_finite() && value >= 0.0 {
		Ok(())
	} else {
		Err(StyleError::Negative { field, value })
	}
}

fn positive(field: &'static str, value: f64) -> Result<(), StyleError> {
	if value.is_finite() && value > 0.0 {
		Ok(())
	} else {
		Err(StyleError::NotPositive { field, value })
	}
}

fn unit(field: &'static str, value: f64) -> Result<(), StyleError> {
	if (0.0..=1.0).contains(&value) {
		Ok(())
	} else {
		Err(StyleError::OutOfUnitRange { field, value })
	}
}

/// Host-page form of [`FieldStyle`]: every field optional, nothing checked yet.
#[derive(Deserialize)]
#[serde(default)]
struct FieldStyleDoc {
	particle_count: usize,
	particle_size: f64,
	particle_color: Color,
	base_opacity: f64,
	link_color: Color,
	link_opacity: f64,
	link_width: f64,
	link_distance: f64,
	speed: f64,
	bubble_radius: f64,
	bubble_distance: f64,
}

impl Default for FieldStyleDoc {
	fn default() -> Self {
		let FieldStyle {
			particle_count,
			particle_size,
			particle_color,
			base_opacity,
			link_color,
			link_opacity,
			link_width,
			link_distance,
			speed,
			bubble_radius,
			bubble_distance,
		} = FieldStyle::default();
		Self {
			particle_count,
			particle_size,
			particle_color,
			base_opacity,
			link_color,
			link_opacity,
			link_width,
			link_distance,
			speed,
			bubble_radius,
			bubble_distance,
		}
	}
}

impl TryFrom<FieldStyleDoc> for FieldStyle {
	type Error = StyleError;

	fn try_from(doc: FieldStyleDoc) -> Result<Self, Self::Error> {
		let style = Self {
			particle_count: doc.particle_count,
			particle_size: doc.particle_size,
			particle_color: doc.particle_color,
			base_opacity: doc.base_opacity,
			link_color: doc.link_color,
			link_opacity: doc.link_opacity,
			link_width: doc.link_width,
			link_distance: doc.link_distance,
			speed: doc.speed,
			bubble_radius: doc.bubble_radius,
			bubble_distance: doc.bubble_distance,
		};
		style.validate()?;
		Ok(style)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_hex_colors() {
		assert_eq!(Color::parse_hex("#00ffff"), Ok(Color::rgb(0, 255, 255)));
		assert_eq!(Color::parse_hex("#A0b1C2"), Ok(Color::rgb(0xa0, 0xb1, 0xc2)));
	}

	#[test]
	fn rejects_malformed_colors() {
		assert!(matches!(
			Color::parse_hex("00ffff"),
			Err(ColorParseError::MissingHash(_))
		));
		assert!(matches!(
			Color::parse_hex("#fff"),
			Err(ColorParseError::BadLength(_))
		));
		assert!(matches!(
			Color::parse_hex("#gg0000"),
			Err(ColorParseError::BadDigits(_))
		));
	}

	#[test]
	fn alpha_byte_is_truncated() {
		let cyan = Color::rgb(0, 255, 255);
		assert_eq!(cyan.to_css_with_alpha(0.5), "#00ffff7f");
		assert_eq!(cyan.to_css_with_alpha(1.0), "#00ffffff");
		assert_eq!(cyan.to_css_with_alpha(0.0), "#00ffff00");
		assert_eq!(Color::rgb(255, 255, 255).to_css_with_alpha(0.3), "#ffffff4c");
	}

	#[test]
	fn partial_config_keeps_defaults() {
		let style: FieldStyle =
			serde_json::from_str(r##"{ "particle_count": 50, "link_color": "#ff0000" }"##)
				.unwrap();
		assert_eq!(style.particle_count, 50);
		assert_eq!(style.link_color, Color::rgb(255, 0, 0));
		assert_eq!(style.link_distance, FieldStyle::default().link_distance);
		assert_eq!(style.particle_color, FieldStyle::default().particle_color);
	}

	#[test]
	fn defaults_are_valid() {
		assert_eq!(FieldStyle::default().validate(), Ok(()));
	}

	#[test]
	fn negative_radius_is_rejected() {
		let result = serde_json::from_str::<FieldStyle>(r#"{ "bubble_radius": -4.0 }"#);
		assert!(result.is_err());
		let style = FieldStyle {
			bubble_radius: -4.0,
			..FieldStyle::default()
		};
		assert_eq!(
			style.validate(),
			Err(StyleError::Negative {
				field: "bubble_radius",
				value: -4.0
			})
		);
	}

	#[test]
	fn zero_distances_are_rejected() {
		for doc in [r#"{ "bubble_distance": 0 }"#, r#"{ "link_distance": -1 }"#] {
			assert!(serde_json::from_str::<FieldStyle>(doc).is_err(), "{doc}");
		}
	}

	#[test]
	fn opacity_must_be_a_fraction() {
		let style = FieldStyle {
			link_opacity: 1.5,
			..FieldStyle::default()
		};
		assert!(matches!(
			style.validate(),
			Err(StyleError::OutOfUnitRange {
				field: "link_opacity",
				..
			})
		));
	}

	#[test]
	fn config_with_bad_color_is_rejected() {
		let result = serde_json::from_str::<FieldStyle>(r#"{ "particle_color": "cyan" }"#);
		assert!(result.is_err());
	}
}
