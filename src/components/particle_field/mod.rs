//! Flow-field particle background.
//!
//! Renders a full-screen canvas behind the page with:
//! - A fixed population of particles drifting along a position-derived flow field
//! - Pointer repulsion within an interaction radius
//! - Edge wraparound, so particles never leave the viewport for good
//! - Fading motion trails, proximity lines and pointer links
//! - Slow translucent gradient blobs in the palette colors
//!
//! The simulation ([`FieldState`]) has no browser dependency and can be driven
//! by any loop; [`ParticleFieldCanvas`] wires it to `requestAnimationFrame`.
//!
//! # Example
//!
//! ```ignore
//! use live_background::{FieldConfig, ParticleFieldCanvas};
//!
//! view! { <ParticleFieldCanvas config=FieldConfig::default() /> }
//! ```

mod blobs;
mod component;
mod links;
mod particles;
mod render;
mod state;
pub mod theme;
mod types;

pub use blobs::{Blob, BlobField};
pub use component::ParticleFieldCanvas;
pub use links::{Link, connections, falloff, pointer_links};
pub use particles::{Particle, ParticleSystem, flow_angle, repulsion, wrap};
pub use render::{Surface, render};
pub use state::{FieldState, Pointer, TOUCH_MOUSE_GUARD_MS};
pub use theme::Theme;
pub use types::{DeviceClass, FieldConfig, MAX_PARTICLES, ValueRange, ViewportProfile};
