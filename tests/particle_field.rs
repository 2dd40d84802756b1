//! Particle field simulation tests
//!
//! Drives the field with synthetic ticks, the way the animation loop does,
//! and checks the geometric guarantees of the update step.

use live_background::components::particle_field::{
	DeviceClass, FieldConfig, FieldState, MAX_PARTICLES, Particle, ParticleSystem, Pointer, flow_angle,
	repulsion, theme::Color,
};
use rand::SeedableRng;
use rand::rngs::SmallRng;

fn wide_system(seed: u64) -> (ParticleSystem, FieldConfig) {
	let config = FieldConfig::default();
	let system = ParticleSystem::new(
		800.0,
		600.0,
		DeviceClass::Wide,
		&config,
		&mut SmallRng::seed_from_u64(seed),
	);
	(system, config)
}

/// A particle just below the pointer is pushed further down
#[test]
fn test_pointer_pushes_particle_away() {
	let (mut system, config) = wide_system(1);
	system.particles = vec![Particle::new(400.0, 320.0, 0.6, 2.0, Color::rgb(197, 160, 89))];

	system.step(Pointer::at(400.0, 300.0), &config);

	let p = &system.particles[0];
	assert!(p.y > 320.0, "particle should move away from pointer. Got y: {}", p.y);

	let moved = ((p.x - 400.0).powi(2) + (p.y - 320.0).powi(2)).sqrt();
	let bound = 0.6 + config.repulsion_strength;
	assert!(moved <= bound, "moved {moved}, expected at most {bound}");
}

/// Leaving the left edge reappears on the right
#[test]
fn test_left_edge_wraps_to_right() {
	let mut p = Particle::new(0.0, 50.0, 1.0, 2.0, Color::rgb(34, 211, 238));
	p.vx = -0.3;

	p.advance(800.0, 600.0);

	assert!((p.x - 799.7).abs() < 1e-9, "expected 799.7, got {}", p.x);
	assert_eq!(p.y, 50.0);
}

/// Population size matches the device-class profile exactly
#[test]
fn test_particle_count_tracks_device_class() {
	let config = FieldConfig::default();
	let mut rng = SmallRng::seed_from_u64(2);
	let mut system = ParticleSystem::new(1440.0, 900.0, DeviceClass::Wide, &config, &mut rng);
	assert_eq!(system.len(), config.wide.count);

	system.init(375.0, 667.0, DeviceClass::Narrow, &config, &mut rng);
	assert_eq!(system.len(), config.narrow.count);

	system.init(1440.0, 900.0, DeviceClass::Wide, &config, &mut rng);
	assert_eq!(system.len(), config.wide.count);
}

/// Positions stay on screen and speeds stay clamped over a long run
#[test]
fn test_long_run_invariants() {
	let mut state = FieldState::new(FieldConfig::default(), 1024.0, 768.0, 99);

	for frame in 0..2_000u32 {
		match frame % 200 {
			0..=99 => {
				let t = frame as f64 * 0.05;
				state.set_pointer(512.0 + 300.0 * t.cos(), 384.0 + 200.0 * t.sin());
			}
			_ => state.clear_pointer(),
		}
		state.tick();

		for p in &state.particles.particles {
			assert!(p.x.is_finite() && p.y.is_finite());
			assert!(p.x >= 0.0 && p.x < 1024.0, "x out of bounds: {}", p.x);
			assert!(p.y >= 0.0 && p.y < 768.0, "y out of bounds: {}", p.y);
			assert!(
				p.velocity() <= p.speed + 1e-9,
				"velocity {} exceeds cruising speed {}",
				p.velocity(),
				p.speed
			);
		}
	}
}

/// The sentinel pointer never repels anything on screen
#[test]
fn test_sentinel_disables_repulsion() {
	let config = FieldConfig::default();
	for x in (0..1920).step_by(64) {
		for y in (0..1080).step_by(64) {
			let push = repulsion(
				x as f64,
				y as f64,
				Pointer::AWAY,
				config.wide.interaction_radius,
				config.repulsion_strength,
			);
			assert_eq!(push, (0.0, 0.0));
		}
	}
}

/// With the pointer away, a tick is driven by the flow field alone
#[test]
fn test_flow_only_tick_matches_field_direction() {
	let (mut system, config) = wide_system(3);
	system.particles = vec![Particle::new(250.0, 175.0, 0.8, 2.0, Color::rgb(139, 92, 246))];

	system.step(Pointer::AWAY, &config);

	let angle = flow_angle(250.0, 175.0, config.flow_scale);
	let p = &system.particles[0];
	assert!((p.vx - angle.cos() * config.flow_strength).abs() < 1e-12);
	assert!((p.vy - angle.sin() * config.flow_strength).abs() < 1e-12);
	assert!((p.x - (250.0 + p.vx)).abs() < 1e-12);
	assert!((p.y - (175.0 + p.vy)).abs() < 1e-12);
}

/// Repeated resizes always leave a complete field for the new viewport
#[test]
fn test_resize_sequence() {
	let config = FieldConfig::default();
	let mut state = FieldState::new(config.clone(), 1920.0, 1080.0, 5);

	for (w, h) in [(1280.0, 720.0), (600.0, 900.0), (0.0, 0.0), (2560.0, 1440.0)] {
		state.resize(w, h);
		let expected = config.profile(config.classify(w)).count;
		assert_eq!(state.particles.len(), expected);
		state.tick();
		for p in &state.particles.particles {
			assert!(p.x.is_finite() && p.y.is_finite());
			if w > 0.0 {
				assert!(p.x >= 0.0 && p.x < w);
			}
		}
	}
}

/// Page config that would break the speed clamp or the population cap is refused
#[test]
fn test_config_rejects_invariant_breaking_values() {
	let negative_speed = FieldConfig::from_json(r#"{ "speed": { "min": -1.0, "max": -0.5 } }"#);
	assert!(negative_speed.is_err(), "negative cruising speed accepted");

	let crowded = FieldConfig::from_json(
		r#"{ "wide": { "count": 20000, "interaction_radius": 250, "connect_distance": 180 } }"#,
	);
	assert!(crowded.is_err(), "population above {MAX_PARTICLES} accepted");
}

/// An accepted config keeps every particle within its cruising speed
#[test]
fn test_loaded_config_keeps_speed_clamp() {
	let config = FieldConfig::from_json(
		r#"{ "speed": { "min": 0.0, "max": 0.2 }, "flow_strength": 0.5, "repulsion_strength": 3.0 }"#,
	)
	.expect("config should be valid");
	let mut state = FieldState::new(config, 640.0, 480.0, 13);
	state.set_pointer(320.0, 240.0);

	for _ in 0..200 {
		state.tick();
		for p in &state.particles.particles {
			assert!(p.speed >= 0.0);
			assert!(
				p.velocity() <= p.speed + 1e-9,
				"velocity {} exceeds cruising speed {}",
				p.velocity(),
				p.speed
			);
		}
	}
}
