//! Proximity lines between particles, and from particles to the pointer.
//!
//! The pair pass is a plain `O(N^2)` scan over `i < j`. Populations are kept
//! small by the viewport profiles; a spatial grid would be needed before
//! raising them substantially.

use super::particles::Particle;
use super::state::Pointer;

/// A line to draw between two particles.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Link {
	/// Index of the first particle
	pub a: usize,
	/// Index of the second particle, always greater than `a`
	pub b: usize,
	/// 1.0 when touching, falling linearly to 0.0 at the cutoff
	pub strength: f64,
}

/// Linear falloff of a distance against a cutoff, `None` at or past it.
pub fn falloff(distance: f64, cutoff: f64) -> Option<f64> {
	if distance < cutoff {
		Some(1.0 - distance / cutoff)
	} else {
		None
	}
}

/// Every unordered pair closer than `connect_distance`, with `a < b`.
pub fn connections(
	particles: &[Particle],
	connect_distance: f64,
) -> impl Iterator<Item = Link> + '_ {
	particles.iter().enumerate().flat_map(move |(i, p)| {
		particles[i + 1..]
			.iter()
			.enumerate()
			.filter_map(move |(offset, q)| {
				falloff(p.distance_to(q.x, q.y), connect_distance).map(|strength| Link {
					a: i,
					b: i + 1 + offset,
					strength,
				})
			})
	})
}

/// Particles within `radius` of the pointer, with their link strength.
pub fn pointer_links(
	particles: &[Particle],
	pointer: Pointer,
	radius: f64,
) -> impl Iterator<Item = (usize, f64)> + '_ {
	particles
		.iter()
		.enumerate()
		.filter_map(move |(i, p)| falloff(p.distance_to(pointer.x, pointer.y), radius).map(|s| (i, s)))
}
