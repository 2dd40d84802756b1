//! Visual theming for the particle field.
//!
//! Colors, the particle palette, and the style knobs for trails, glow,
//! connective lines, pointer links and the ambient blobs.

use rand::Rng;
use serde::Deserialize;

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(try_from = "String")]
pub struct Color {
	/// Red channel
	pub r: u8,
	/// Green channel
	pub g: u8,
	/// Blue channel
	pub b: u8,
	/// Opacity, 0.0 to 1.0
	pub a: f64,
}

impl Color {
	/// Opaque color.
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	/// Color with explicit opacity.
	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	/// Same color at a different opacity.
	pub fn with_alpha(self, a: f64) -> Self {
		Self { a, ..self }
	}

	/// Parses `#RRGGBB` or `#RRGGBBAA`.
	pub fn from_hex(hex: &str) -> Option<Self> {
		let digits = hex.strip_prefix('#')?;
		if !digits.is_ascii() {
			return None;
		}
		let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
		match digits.len() {
			6 => Some(Self::rgb(channel(0)?, channel(2)?, channel(4)?)),
			8 => Some(Self::rgba(
				channel(0)?,
				channel(2)?,
				channel(4)?,
				channel(6)? as f64 / 255.0,
			)),
			_ => None,
		}
	}

	/// CSS color string: hex when opaque, `rgba()` otherwise.
	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}
}

impl TryFrom<String> for Color {
	type Error = String;

	fn try_from(value: String) -> Result<Self, Self::Error> {
		Self::from_hex(value.trim()).ok_or_else(|| format!("invalid hex color: {value}"))
	}
}

/// The fixed set of colors particles are drawn from.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct Palette {
	/// Colors in pick order
	pub colors: Vec<Color>,
}

impl Palette {
	/// Gold, cyan, violet, rose, emerald, amber.
	pub fn spectrum() -> Self {
		Self {
			colors: vec![
				Color::rgb(197, 160, 89), // Gold
				Color::rgb(34, 211, 238), // Cyan
				Color::rgb(139, 92, 246), // Violet
				Color::rgb(244, 63, 94),  // Rose
				Color::rgb(16, 185, 129), // Emerald
				Color::rgb(251, 191, 36), // Amber
			],
		}
	}

	/// Color at `index`, cycling past the end; an empty palette yields white.
	pub fn get(&self, index: usize) -> Color {
		if self.colors.is_empty() {
			return Color::rgb(255, 255, 255);
		}
		self.colors[index % self.colors.len()]
	}

	/// Uniform pick; an empty palette yields white.
	pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> Color {
		if self.colors.is_empty() {
			return Color::rgb(255, 255, 255);
		}
		self.get(rng.gen_range(0..self.colors.len()))
	}
}

impl Default for Palette {
	fn default() -> Self {
		Self::spectrum()
	}
}

/// Lines from particles to the pointer while it is within reach.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct PointerLinkStyle {
	/// Draw pointer links at all
	pub enabled: bool,
	/// Line alpha at zero distance, fading to zero at the interaction radius
	pub max_alpha: f64,
	/// Stroke width of pointer links
	pub line_width: f64,
	/// Accent dot drawn over linked particles
	pub dot_color: Color,
	/// Dot radius as a multiple of the particle radius
	pub dot_scale: f64,
}

impl Default for PointerLinkStyle {
	fn default() -> Self {
		Self {
			enabled: true,
			max_alpha: 0.4,
			line_width: 1.0,
			dot_color: Color::rgb(197, 160, 89),
			dot_scale: 1.5,
		}
	}
}

/// Large translucent gradient spots drifting behind the particles.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct BlobStyle {
	/// Draw blobs at all
	pub enabled: bool,
	/// Center alpha of each gradient
	pub alpha: f64,
	/// Smallest blob radius
	pub radius_min: f64,
	/// Largest blob radius
	pub radius_max: f64,
	/// Full width of the per-axis velocity range
	pub speed: f64,
	/// How far past an edge a blob travels before bouncing
	pub margin: f64,
}

impl Default for BlobStyle {
	fn default() -> Self {
		Self {
			enabled: true,
			alpha: 0.04,
			radius_min: 200.0,
			radius_max: 500.0,
			speed: 0.4,
			margin: 150.0,
		}
	}
}

/// Complete visual theme.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Theme {
	/// Color painted over the previous frame
	pub background: Color,
	/// Opacity of the per-frame background wash; lower means longer trails
	pub trail_fade: f64,
	/// Shadow blur around each particle (0 disables)
	pub glow_blur: f64,
	/// Connective line color; alpha is derived from pair distance
	pub line: Color,
	/// Stroke width of connective lines
	pub line_width: f64,
	/// Alpha of a connective line between touching particles
	pub line_max_alpha: f64,
	/// Lines to the pointer
	pub pointer_links: PointerLinkStyle,
	/// Ambient blobs
	pub blobs: BlobStyle,
	/// Particle and blob colors
	pub palette: Palette,
}

impl Default for Theme {
	fn default() -> Self {
		Self {
			background: Color::rgb(0, 0, 0),
			trail_fade: 0.12,
			glow_blur: 8.0,
			line: Color::rgb(197, 160, 89),
			line_width: 0.6,
			line_max_alpha: 0.2,
			pointer_links: PointerLinkStyle::default(),
			blobs: BlobStyle::default(),
			palette: Palette::spectrum(),
		}
	}
}
