//! Field state and pointer tracking.
//!
//! [`FieldState`] is created once when the component mounts and mutated by the
//! animation loop. Input handlers only ever write [`FieldState::pointer`]; the
//! loop reads it once per tick and hands it to the particle step.

use log::{debug, info};
use rand::SeedableRng;
use rand::rngs::SmallRng;

use super::blobs::BlobField;
use super::particles::ParticleSystem;
use super::render::{self, Surface};
use super::types::{DeviceClass, FieldConfig};

/// Mouse events arriving within this many milliseconds of a touch are the
/// browser's compatibility events for that touch and are ignored.
pub const TOUCH_MOUSE_GUARD_MS: f64 = 800.0;

/// Last known pointer position in surface pixels.
///
/// When no mouse or touch is active the pointer sits at [`Pointer::AWAY`], far
/// enough outside any viewport that no particle is within reach.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pointer {
	/// Horizontal position
	pub x: f64,
	/// Vertical position
	pub y: f64,
}

impl Pointer {
	/// No active pointer.
	pub const AWAY: Pointer = Pointer {
		x: -1.0e6,
		y: -1.0e6,
	};

	/// Pointer at a surface position.
	pub const fn at(x: f64, y: f64) -> Self {
		Self { x, y }
	}
}

impl Default for Pointer {
	fn default() -> Self {
		Self::AWAY
	}
}

/// Everything the animation loop owns.
pub struct FieldState {
	/// Model constants and theme
	pub config: FieldConfig,
	/// Particle population
	pub particles: ParticleSystem,
	/// Ambient blobs
	pub blobs: BlobField,
	/// Read once per tick
	pub pointer: Pointer,
	/// Ticks since the last `init`
	pub ticks: u64,
	/// Event time (ms) of the latest touch
	last_touch: Option<f64>,
	rng: SmallRng,
}

impl FieldState {
	/// Build the field for a surface, classifying the device from its width.
	pub fn new(config: FieldConfig, width: f64, height: f64, seed: u64) -> Self {
		let mut rng = SmallRng::seed_from_u64(seed);
		let class = config.classify(width);
		let particles = ParticleSystem::new(width, height, class, &config, &mut rng);
		let blobs = BlobField::new(&config.theme.blobs, &config.theme.palette, width, height, &mut rng);
		info!(
			"live-background: field {}x{} ({:?}, {} particles)",
			width,
			height,
			class,
			particles.len()
		);

		Self {
			config,
			particles,
			blobs,
			pointer: Pointer::AWAY,
			ticks: 0,
			last_touch: None,
			rng,
		}
	}

	/// Rebuild particles and blobs from scratch.
	pub fn init(&mut self, width: f64, height: f64, class: DeviceClass) {
		self.particles.init(width, height, class, &self.config, &mut self.rng);
		self.blobs = BlobField::new(
			&self.config.theme.blobs,
			&self.config.theme.palette,
			width,
			height,
			&mut self.rng,
		);
		self.ticks = 0;
	}

	/// Viewport changed: reclassify and rebuild.
	pub fn resize(&mut self, width: f64, height: f64) {
		let class = self.config.classify(width);
		self.init(width, height, class);
		debug!(
			"live-background: resized to {}x{} ({:?}, {} particles)",
			width,
			height,
			class,
			self.particles.len()
		);
	}

	/// Move the pointer.
	pub fn set_pointer(&mut self, x: f64, y: f64) {
		self.pointer = Pointer::at(x, y);
	}

	/// Park the pointer at [`Pointer::AWAY`].
	pub fn clear_pointer(&mut self) {
		self.pointer = Pointer::AWAY;
	}

	/// A finger touched or moved at `(x, y)`; `at` is the event time in ms.
	pub fn touch_moved(&mut self, x: f64, y: f64, at: f64) {
		self.last_touch = Some(at);
		self.set_pointer(x, y);
	}

	/// The finger lifted or the touch was cancelled.
	pub fn touch_ended(&mut self, at: f64) {
		self.last_touch = Some(at);
		self.clear_pointer();
	}

	/// The mouse moved to `(x, y)`. Ignored right after a touch, when the
	/// event is a compatibility event replaying the tap position.
	pub fn mouse_moved(&mut self, x: f64, y: f64, at: f64) {
		if self.last_touch.is_some_and(|t| at - t < TOUCH_MOUSE_GUARD_MS) {
			return;
		}
		self.set_pointer(x, y);
	}

	/// Surface width.
	pub fn width(&self) -> f64 {
		self.particles.width()
	}

	/// Surface height.
	pub fn height(&self) -> f64 {
		self.particles.height()
	}

	/// Current device class.
	pub fn device_class(&self) -> DeviceClass {
		self.particles.device_class()
	}

	/// Advance the simulation one tick without drawing.
	pub fn tick(&mut self) {
		let (width, height) = (self.width(), self.height());
		self.blobs.update(&self.config.theme.blobs, width, height);
		self.particles.step(self.pointer, &self.config);
		self.ticks += 1;
	}

	/// Advance one tick, then draw if a surface is attached.
	pub fn frame<S: Surface + ?Sized>(&mut self, surface: Option<&S>) {
		self.tick();
		if let Some(surface) = surface {
			render::render(self, surface);
		}
	}
}

#[cfg(test)]
mod tests {
	use super::super::render::tests::Recorder;
	use super::*;

	#[test]
	fn counts_follow_device_class() {
		let config = FieldConfig::default();
		let mut state = FieldState::new(config.clone(), 1280.0, 800.0, 1);
		assert_eq!(state.device_class(), DeviceClass::Wide);
		assert_eq!(state.particles.len(), config.wide.count);

		state.resize(390.0, 844.0);
		assert_eq!(state.device_class(), DeviceClass::Narrow);
		assert_eq!(state.particles.len(), config.narrow.count);
		assert_eq!((state.width(), state.height()), (390.0, 844.0));

		state.init(390.0, 844.0, DeviceClass::Wide);
		assert_eq!(state.particles.len(), config.wide.count);
	}

	#[test]
	fn resize_rebuilds_particles() {
		let mut state = FieldState::new(FieldConfig::default(), 1280.0, 800.0, 2);
		let before = state.particles.particles.clone();
		state.resize(1280.0, 800.0);
		assert_eq!(state.particles.len(), before.len());
		assert_ne!(state.particles.particles, before);
		assert_eq!(state.ticks, 0);
	}

	#[test]
	fn pointer_round_trip() {
		let mut state = FieldState::new(FieldConfig::default(), 800.0, 600.0, 3);
		assert_eq!(state.pointer, Pointer::AWAY);
		state.set_pointer(12.0, 34.0);
		assert_eq!(state.pointer, Pointer::at(12.0, 34.0));
		state.clear_pointer();
		assert_eq!(state.pointer, Pointer::AWAY);
	}

	#[test]
	fn tap_releases_pointer_despite_trailing_mouse_event() {
		let mut state = FieldState::new(FieldConfig::default(), 400.0, 800.0, 5);
		state.touch_moved(120.0, 300.0, 1_000.0);
		assert_eq!(state.pointer, Pointer::at(120.0, 300.0));

		state.touch_ended(1_080.0);
		// Compatibility mousemove replaying the tap position
		state.mouse_moved(120.0, 300.0, 1_100.0);
		assert_eq!(state.pointer, Pointer::AWAY);

		for _ in 0..3 {
			state.tick();
		}
		assert_eq!(state.pointer, Pointer::AWAY);
	}

	#[test]
	fn mouse_tracks_again_after_touch_guard() {
		let mut state = FieldState::new(FieldConfig::default(), 800.0, 600.0, 6);
		state.mouse_moved(10.0, 20.0, 0.0);
		assert_eq!(state.pointer, Pointer::at(10.0, 20.0));

		state.touch_ended(500.0);
		state.mouse_moved(30.0, 40.0, 500.0 + TOUCH_MOUSE_GUARD_MS - 1.0);
		assert_eq!(state.pointer, Pointer::AWAY);

		state.mouse_moved(30.0, 40.0, 500.0 + TOUCH_MOUSE_GUARD_MS);
		assert_eq!(state.pointer, Pointer::at(30.0, 40.0));
	}

	#[test]
	fn frame_without_surface_still_advances() {
		let mut state = FieldState::new(FieldConfig::default(), 800.0, 600.0, 4);
		let before = state.particles.particles.clone();
		for _ in 0..5 {
			state.frame::<Recorder>(None);
		}
		assert_eq!(state.ticks, 5);
		assert_ne!(state.particles.particles, before);

		let recorder = Recorder::default();
		state.frame(Some(&recorder));
		assert_eq!(state.ticks, 6);
		assert!(!recorder.ops.borrow().is_empty());
	}

	#[test]
	fn same_seed_same_field() {
		let a = FieldState::new(FieldConfig::default(), 800.0, 600.0, 77);
		let b = FieldState::new(FieldConfig::default(), 800.0, 600.0, 77);
		assert_eq!(a.particles.particles, b.particles.particles);
		assert_eq!(a.blobs.blobs, b.blobs.blobs);
	}
}
