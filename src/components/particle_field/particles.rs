//! Flow-field particles.
//!
//! Each tick a particle is nudged along a deterministic "wind" direction that
//! depends only on its position, clamped to its cruising speed, pushed away
//! from the pointer, integrated, and wrapped back into the viewport.

use std::f64::consts::PI;

use rand::Rng;

use super::state::Pointer;
use super::theme::{Color, Palette};
use super::types::{DeviceClass, FieldConfig, MAX_PARTICLES};

/// A single drifting particle.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
	/// Position in `[0, width)`
	pub x: f64,
	/// Position in `[0, height)`
	pub y: f64,
	/// Horizontal velocity, pixels per tick
	pub vx: f64,
	/// Vertical velocity, pixels per tick
	pub vy: f64,
	/// Drawn radius
	pub radius: f64,
	/// Upper bound on velocity magnitude
	pub speed: f64,
	/// Fill color, picked from the palette
	pub color: Color,
}

impl Particle {
	/// A particle at rest.
	pub fn new(x: f64, y: f64, speed: f64, radius: f64, color: Color) -> Self {
		Self {
			x,
			y,
			vx: 0.0,
			vy: 0.0,
			radius,
			speed,
			color,
		}
	}

	fn spawn<R: Rng + ?Sized>(
		rng: &mut R,
		width: f64,
		height: f64,
		config: &FieldConfig,
		palette: &Palette,
	) -> Self {
		let x = if width > 0.0 { rng.gen_range(0.0..width) } else { 0.0 };
		let y = if height > 0.0 { rng.gen_range(0.0..height) } else { 0.0 };
		let speed = config.speed.sample(rng);
		let radius = config.radius.sample(rng);
		Self::new(x, y, speed, radius, palette.pick(rng))
	}

	/// Velocity magnitude.
	pub fn velocity(&self) -> f64 {
		(self.vx * self.vx + self.vy * self.vy).sqrt()
	}

	/// Add to the velocity.
	pub fn accelerate(&mut self, ax: f64, ay: f64) {
		self.vx += ax;
		self.vy += ay;
	}

	/// Rescale velocity to exactly `speed` when it exceeds it.
	pub fn clamp_speed(&mut self) {
		let v = self.velocity();
		if v > self.speed && v > 0.0 {
			let k = self.speed / v;
			self.vx *= k;
			self.vy *= k;
		}
	}

	/// Integrate one tick and wrap into `[0, width) x [0, height)`.
	pub fn advance(&mut self, width: f64, height: f64) {
		self.x = wrap(self.x + self.vx, width);
		self.y = wrap(self.y + self.vy, height);
	}

	/// Euclidean distance to a point.
	pub fn distance_to(&self, x: f64, y: f64) -> f64 {
		let (dx, dy) = (self.x - x, self.y - y);
		(dx * dx + dy * dy).sqrt()
	}
}

/// Preferred drift direction (radians) at a position.
pub fn flow_angle(x: f64, y: f64, scale: f64) -> f64 {
	((x * scale).cos() + (y * scale).sin()) * PI
}

/// Velocity pushed onto a particle at `(x, y)` by the pointer.
///
/// Falls linearly from `strength` at the pointer to zero at `radius`. A
/// particle sitting exactly on the pointer is pushed along +y.
pub fn repulsion(x: f64, y: f64, pointer: Pointer, radius: f64, strength: f64) -> (f64, f64) {
	let (dx, dy) = (x - pointer.x, y - pointer.y);
	let dist = (dx * dx + dy * dy).sqrt();
	// Also rejects NaN and non-positive radii.
	if !(dist < radius) {
		return (0.0, 0.0);
	}
	let force = (radius - dist) / radius * strength;
	if dist <= f64::EPSILON {
		return (0.0, force);
	}
	(dx / dist * force, dy / dist * force)
}

/// Wrap a coordinate into `[0, extent)`; a degenerate extent pins it to 0.
pub fn wrap(value: f64, extent: f64) -> f64 {
	if !(extent > 0.0) || !value.is_finite() {
		return 0.0;
	}
	let wrapped = value.rem_euclid(extent);
	// rem_euclid can round up to `extent` for tiny negative inputs
	if wrapped >= extent { 0.0 } else { wrapped }
}

/// The particle population and the viewport it lives in.
#[derive(Clone, Debug)]
pub struct ParticleSystem {
	/// Current population
	pub particles: Vec<Particle>,
	width: f64,
	height: f64,
	class: DeviceClass,
}

impl ParticleSystem {
	/// Build a population sized for `class` over the given viewport.
	pub fn new<R: Rng + ?Sized>(
		width: f64,
		height: f64,
		class: DeviceClass,
		config: &FieldConfig,
		rng: &mut R,
	) -> Self {
		let mut system = Self {
			particles: Vec::new(),
			width,
			height,
			class,
		};
		system.init(width, height, class, config, rng);
		system
	}

	/// Discard every particle and build a fresh population for the viewport.
	pub fn init<R: Rng + ?Sized>(
		&mut self,
		width: f64,
		height: f64,
		class: DeviceClass,
		config: &FieldConfig,
		rng: &mut R,
	) {
		let count = config.profile(class).count.min(MAX_PARTICLES);
		let (width, height) = (width.max(0.0), height.max(0.0));

		self.particles.clear();
		self.particles.reserve(count);
		for _ in 0..count {
			self.particles.push(Particle::spawn(rng, width, height, config, &config.theme.palette));
		}

		self.width = width;
		self.height = height;
		self.class = class;
	}

	/// Advance every particle by one tick.
	pub fn step(&mut self, pointer: Pointer, config: &FieldConfig) {
		let profile = config.profile(self.class);
		for p in &mut self.particles {
			let angle = flow_angle(p.x, p.y, config.flow_scale);
			p.accelerate(angle.cos() * config.flow_strength, angle.sin() * config.flow_strength);
			p.clamp_speed();

			let (rx, ry) = repulsion(
				p.x,
				p.y,
				pointer,
				profile.interaction_radius,
				config.repulsion_strength,
			);
			p.accelerate(rx, ry);

			p.advance(self.width, self.height);
			// The push above moves the particle this tick but does not persist
			p.clamp_speed();
		}
	}

	/// Number of particles.
	pub fn len(&self) -> usize {
		self.particles.len()
	}

	/// True when the population is empty.
	pub fn is_empty(&self) -> bool {
		self.particles.is_empty()
	}

	/// Viewport width particles wrap within.
	pub fn width(&self) -> f64 {
		self.width
	}

	/// Viewport height particles wrap within.
	pub fn height(&self) -> f64 {
		self.height
	}

	/// Class the population was sized for.
	pub fn device_class(&self) -> DeviceClass {
		self.class
	}
}
