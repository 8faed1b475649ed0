//! Artwork simulation module
//!
//! All animation logic lives here, free of rendering and platform
//! dependencies:
//! - Fixed timestep only, per-tick rates
//! - State owned by `ArtState` and passed explicitly
//! - Controllers mutate state synchronously between frames

pub mod disperse;
pub mod layout;
pub mod particle;
pub mod state;
pub mod tick;

pub use disperse::{disperse_at, restore_last};
pub use layout::generate_layout;
pub use particle::{Particle, ParticleKind};
pub use state::{ArtState, Connector, Element};
pub use tick::{FrameInput, apply_input, tick};
