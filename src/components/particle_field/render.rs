//! Drawing the particle field.
//!
//! Rendering goes through the small [`Surface`] trait so the frame can be
//! drawn to a browser canvas or recorded in tests. Passes, back to front:
//! 1. Translucent background wash (leaves fading trails instead of clearing)
//! 2. Ambient blobs
//! 3. Particles with optional glow
//! 4. Connective lines between nearby particles
//! 5. Pointer links and accent dots

use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::links::{connections, pointer_links};
use super::state::FieldState;
use super::theme::Color;

/// The drawing operations the field needs.
pub trait Surface {
	/// Axis-aligned filled rectangle.
	fn fill_rect(&self, x: f64, y: f64, width: f64, height: f64, color: Color);
	/// Filled circle; `glow` is a blur radius, 0 for none.
	fn fill_circle(&self, x: f64, y: f64, radius: f64, color: Color, glow: f64);
	/// Straight stroked segment.
	fn stroke_line(&self, from: (f64, f64), to: (f64, f64), color: Color, width: f64);
	/// Circle filled with `color` at the center fading to transparent at `radius`.
	fn fill_radial(&self, x: f64, y: f64, radius: f64, color: Color);
}

impl Surface for CanvasRenderingContext2d {
	fn fill_rect(&self, x: f64, y: f64, width: f64, height: f64, color: Color) {
		self.set_fill_style_str(&color.to_css());
		CanvasRenderingContext2d::fill_rect(self, x, y, width, height);
	}

	fn fill_circle(&self, x: f64, y: f64, radius: f64, color: Color, glow: f64) {
		if glow > 0.0 {
			self.set_shadow_blur(glow);
			self.set_shadow_color(&color.to_css());
		}
		self.begin_path();
		let _ = self.arc(x, y, radius, 0.0, PI * 2.0);
		self.set_fill_style_str(&color.to_css());
		self.fill();
		if glow > 0.0 {
			self.set_shadow_blur(0.0);
		}
	}

	fn stroke_line(&self, from: (f64, f64), to: (f64, f64), color: Color, width: f64) {
		self.set_stroke_style_str(&color.to_css());
		self.set_line_width(width);
		self.begin_path();
		self.move_to(from.0, from.1);
		self.line_to(to.0, to.1);
		self.stroke();
	}

	fn fill_radial(&self, x: f64, y: f64, radius: f64, color: Color) {
		let Ok(gradient) = self.create_radial_gradient(x, y, 0.0, x, y, radius) else {
			return;
		};
		let _ = gradient.add_color_stop(0.0, &color.to_css());
		let _ = gradient.add_color_stop(1.0, "rgba(0, 0, 0, 0)");

		self.begin_path();
		let _ = self.arc(x, y, radius, 0.0, PI * 2.0);
		#[allow(deprecated)]
		self.set_fill_style(&gradient);
		self.fill();
	}
}

/// Draws the current state. Call after the tick's update.
pub fn render<S: Surface + ?Sized>(state: &FieldState, surface: &S) {
	draw_trail_fade(state, surface);
	if state.config.theme.blobs.enabled {
		draw_blobs(state, surface);
	}
	draw_particles(state, surface);
	draw_connections(state, surface);
	if state.config.theme.pointer_links.enabled {
		draw_pointer_links(state, surface);
	}
}

fn draw_trail_fade<S: Surface + ?Sized>(state: &FieldState, surface: &S) {
	let theme = &state.config.theme;
	surface.fill_rect(
		0.0,
		0.0,
		state.width(),
		state.height(),
		theme.background.with_alpha(theme.trail_fade),
	);
}

fn draw_blobs<S: Surface + ?Sized>(state: &FieldState, surface: &S) {
	let alpha = state.config.theme.blobs.alpha;
	for b in &state.blobs.blobs {
		surface.fill_radial(b.x, b.y, b.radius, b.color.with_alpha(alpha));
	}
}

fn draw_particles<S: Surface + ?Sized>(state: &FieldState, surface: &S) {
	let glow = state.config.theme.glow_blur;
	for p in &state.particles.particles {
		surface.fill_circle(p.x, p.y, p.radius, p.color, glow);
	}
}

fn draw_connections<S: Surface + ?Sized>(state: &FieldState, surface: &S) {
	let theme = &state.config.theme;
	let particles = &state.particles.particles;
	let connect = state.config.profile(state.device_class()).connect_distance;

	for link in connections(particles, connect) {
		let (a, b) = (&particles[link.a], &particles[link.b]);
		surface.stroke_line(
			(a.x, a.y),
			(b.x, b.y),
			theme.line.with_alpha(theme.line_max_alpha * link.strength),
			theme.line_width,
		);
	}
}

fn draw_pointer_links<S: Surface + ?Sized>(state: &FieldState, surface: &S) {
	let style = &state.config.theme.pointer_links;
	let line = state.config.theme.line;
	let radius = state.config.profile(state.device_class()).interaction_radius;
	let pointer = state.pointer;
	let particles = &state.particles.particles;

	for (i, strength) in pointer_links(particles, pointer, radius) {
		let p = &particles[i];
		surface.stroke_line(
			(p.x, p.y),
			(pointer.x, pointer.y),
			line.with_alpha(style.max_alpha * strength),
			style.line_width,
		);
		surface.fill_circle(p.x, p.y, p.radius * style.dot_scale, style.dot_color, 0.0);
	}
}
