//! Configuration for the particle field.
//!
//! Every field is optional when deserializing; anything missing falls back to
//! the defaults below, so a page can override a single constant.

use rand::Rng;
use serde::Deserialize;
use serde::de::Error as _;

use super::theme::Theme;

/// Largest population a profile may request. The line pass visits every pair,
/// so cost grows with the square of this.
pub const MAX_PARTICLES: usize = 200;

/// Coarse viewport classification. Only used to pick a [`ViewportProfile`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeviceClass {
	/// Phones and narrow windows
	Narrow,
	/// Everything at or above the breakpoint
	Wide,
}

impl DeviceClass {
	/// Viewports narrower than `breakpoint` are [`DeviceClass::Narrow`].
	pub fn from_width(width: f64, breakpoint: f64) -> Self {
		if width < breakpoint {
			DeviceClass::Narrow
		} else {
			DeviceClass::Wide
		}
	}
}

/// Population and reach tuned per device class.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ViewportProfile {
	/// Number of particles built by each `init`
	pub count: usize,
	/// Pointer distance below which particles are pushed away
	pub interaction_radius: f64,
	/// Pair distance below which two particles are joined by a line
	pub connect_distance: f64,
}

/// Inclusive-exclusive span a per-particle constant is drawn from.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
pub struct ValueRange {
	/// Inclusive lower bound
	pub min: f64,
	/// Exclusive upper bound
	pub max: f64,
}

impl ValueRange {
	/// Span from `min` up to `max`.
	pub const fn new(min: f64, max: f64) -> Self {
		Self { min, max }
	}

	/// Uniform sample; a collapsed or inverted range yields `min`.
	pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
		if self.max > self.min {
			rng.gen_range(self.min..self.max)
		} else {
			self.min
		}
	}
}

/// Numerical model and look of the field.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
	/// Viewport width (px) separating narrow from wide devices
	pub narrow_breakpoint: f64,
	/// Profile at or above the breakpoint
	pub wide: ViewportProfile,
	/// Profile below the breakpoint
	pub narrow: ViewportProfile,
	/// Spatial frequency of the flow field
	pub flow_scale: f64,
	/// Velocity added per tick along the flow direction
	pub flow_strength: f64,
	/// Peak repulsive velocity added right at the pointer
	pub repulsion_strength: f64,
	/// Cruising speed range
	pub speed: ValueRange,
	/// Visual radius range
	pub radius: ValueRange,
	/// Colors and render styles
	pub theme: Theme,
}

impl FieldConfig {
	/// Parse a JSON override and reject values the simulation cannot honor.
	pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
		let config: Self = serde_json::from_str(json)?;
		config.validate().map_err(serde_json::Error::custom)?;
		Ok(config)
	}

	/// Check the bounds every tick relies on: non-negative ordered speed and
	/// radius ranges, positive reach, finite forces and at most
	/// [`MAX_PARTICLES`] per profile.
	pub fn validate(&self) -> Result<(), String> {
		for (name, profile) in [("wide", &self.wide), ("narrow", &self.narrow)] {
			if profile.count > MAX_PARTICLES {
				return Err(format!(
					"{name}.count {} exceeds the limit of {MAX_PARTICLES}",
					profile.count
				));
			}
			if !(profile.interaction_radius > 0.0 && profile.interaction_radius.is_finite()) {
				return Err(format!(
					"{name}.interaction_radius must be positive, got {}",
					profile.interaction_radius
				));
			}
			if !(profile.connect_distance > 0.0 && profile.connect_distance.is_finite()) {
				return Err(format!(
					"{name}.connect_distance must be positive, got {}",
					profile.connect_distance
				));
			}
		}

		for (name, range) in [("speed", self.speed), ("radius", self.radius)] {
			if !(range.min >= 0.0 && range.max.is_finite()) {
				return Err(format!(
					"{name} must be non-negative and finite, got {}..{}",
					range.min, range.max
				));
			}
			if range.min > range.max {
				return Err(format!("{name} min {} is above max {}", range.min, range.max));
			}
		}

		let forces = [
			("flow_scale", self.flow_scale),
			("flow_strength", self.flow_strength),
			("repulsion_strength", self.repulsion_strength),
		];
		for (name, value) in forces {
			if !(value >= 0.0 && value.is_finite()) {
				return Err(format!("{name} must be non-negative and finite, got {value}"));
			}
		}
		Ok(())
	}

	/// Profile for a device class.
	pub fn profile(&self, class: DeviceClass) -> &ViewportProfile {
		match class {
			DeviceClass::Narrow => &self.narrow,
			DeviceClass::Wide => &self.wide,
		}
	}

	/// Device class for a viewport width.
	pub fn classify(&self, width: f64) -> DeviceClass {
		DeviceClass::from_width(width, self.narrow_breakpoint)
	}
}

impl Default for FieldConfig {
	fn default() -> Self {
		Self {
			narrow_breakpoint: 768.0,
			wide: ViewportProfile {
				count: 90,
				interaction_radius: 250.0,
				connect_distance: 180.0,
			},
			narrow: ViewportProfile {
				count: 45,
				interaction_radius: 150.0,
				connect_distance: 120.0,
			},
			flow_scale: 0.005,
			flow_strength: 0.05,
			repulsion_strength: 0.6,
			speed: ValueRange::new(0.3, 1.0),
			radius: ValueRange::new(1.0, 4.0),
			theme: Theme::default(),
		}
	}
}
