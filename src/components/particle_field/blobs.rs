//! Ambient gradient blobs drifting behind the particles.

use rand::Rng;

use super::theme::{BlobStyle, Color, Palette};

/// One large translucent spot.
#[derive(Clone, Debug, PartialEq)]
pub struct Blob {
	/// Center, surface pixels
	pub x: f64,
	/// Center, surface pixels
	pub y: f64,
	/// Horizontal drift per tick
	pub vx: f64,
	/// Vertical drift per tick
	pub vy: f64,
	/// Gradient radius
	pub radius: f64,
	/// Center color; alpha comes from [`BlobStyle::alpha`]
	pub color: Color,
}

/// One blob per palette color.
#[derive(Clone, Debug, Default)]
pub struct BlobField {
	/// Drawn in order, back to front
	pub blobs: Vec<Blob>,
}

impl BlobField {
	/// Scatter one blob per palette color, or none when blobs are disabled.
	pub fn new<R: Rng + ?Sized>(
		style: &BlobStyle,
		palette: &Palette,
		width: f64,
		height: f64,
		rng: &mut R,
	) -> Self {
		if !style.enabled {
			return Self::default();
		}

		let half = style.speed / 2.0;
		let span = |rng: &mut R, lo: f64, hi: f64| if hi > lo { rng.gen_range(lo..hi) } else { lo };

		let blobs = palette
			.colors
			.iter()
			.map(|&color| Blob {
				x: span(rng, 0.0, width),
				y: span(rng, 0.0, height),
				vx: span(rng, -half, half),
				vy: span(rng, -half, half),
				radius: span(rng, style.radius_min, style.radius_max),
				color,
			})
			.collect();

		Self { blobs }
	}

	/// Drift every blob, reversing an axis once it is `margin` past an edge.
	pub fn update(&mut self, style: &BlobStyle, width: f64, height: f64) {
		let m = style.margin;
		for b in &mut self.blobs {
			b.x += b.vx;
			b.y += b.vy;
			if (b.x < -m && b.vx < 0.0) || (b.x > width + m && b.vx > 0.0) {
				b.vx = -b.vx;
			}
			if (b.y < -m && b.vy < 0.0) || (b.y > height + m && b.vy > 0.0) {
				b.vy = -b.vy;
			}
		}
	}
}
