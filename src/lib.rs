//! Wheelburst - an interactive generative artwork
//!
//! A field of circular "wheel" motifs joined by curved links. Tapping a wheel
//! scatters every wheel of the same base color into drifting particles;
//! the restore key pulls the most recently scattered batch back together.
//!
//! Core modules:
//! - `sim`: Artwork state, dispersal/restoration controllers, frame driver
//! - `renderer`: WebGPU rendering pipeline (polygon tessellation)
//! - `palette`: Role-tagged wheel color schemes
//! - `settings`: Viewer preferences persisted to LocalStorage

pub mod palette;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::{DensityPreset, Settings};

use glam::Vec2;

/// Artwork tuning constants
pub mod consts {
    /// Fixed animation step (60 ticks per second)
    pub const TICK_HZ: f32 = 60.0;
    pub const TICK_DT: f32 = 1.0 / TICK_HZ;
    /// Maximum ticks per rendered frame to prevent spiral of death
    pub const MAX_TICKS_PER_FRAME: u32 = 4;

    /// Inner-detail fade ceiling and per-tick rise
    pub const FADE_MAX: f32 = 255.0;
    pub const FADE_STEP: f32 = 4.0;

    /// Particle opacity ceiling
    pub const ALPHA_MAX: f32 = 255.0;

    /// Fragments spawned per wheel: one per spoke, one per outer dot
    pub const SPOKE_COUNT: usize = 8;
    pub const OUTER_DOT_COUNT: usize = 12;
    /// Anchor rings as fractions of the wheel radius
    pub const SPOKE_RING_FRACTION: f32 = 0.52;
    pub const DOT_RING_FRACTION: f32 = 0.78;

    /// Drift mode: per-tick alpha step and multiplicative shrink
    pub const DRIFT_FADE_STEP: f32 = 2.2;
    pub const DRIFT_SHRINK: f32 = 0.985;

    /// Return mode easing
    pub const RETURN_SMOOTHING: f32 = 0.12;
    pub const RETURN_ALPHA_EASE: f32 = 0.90;
    /// Small linear bleed so the alpha ease reaches 0 in bounded ticks
    pub const RETURN_ALPHA_BLEED: f32 = 0.6;
    pub const RETURN_SIZE_EASE: f32 = 0.10;
    /// Rest size of a returning fragment, as a fraction of its spawn size
    pub const PARTICLE_REST_FRACTION: f32 = 0.6;
    pub const SPIN_DAMPING: f32 = 0.92;
    /// A returning fragment counts as home within this distance of its target
    pub const RETURN_EPSILON: f32 = 0.75;

    /// Restoration matches particles to recomputed anchors within this radius
    pub const ANCHOR_MATCH_TOLERANCE: f32 = 1.5;

    /// Hard cap on live particles (oldest are dropped first)
    pub const MAX_PARTICLES: usize = 4096;

    /// Wheel geometry and placement
    pub const MIN_WHEEL_RADIUS: f32 = 28.0;
    pub const MAX_WHEEL_RADIUS: f32 = 64.0;
    /// Minimum rim-to-rim gap between placed wheels
    pub const WHEEL_GAP: f32 = 12.0;
    pub const EDGE_MARGIN: f32 = 20.0;
    /// Placement attempts per wheel before giving up on it
    pub const PLACEMENT_ATTEMPTS: u32 = 60;

    /// Connectors join wheels whose rim gap is below this
    pub const CONNECT_RANGE: f32 = 150.0;
    pub const MAX_LINKS_PER_WHEEL: usize = 3;
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}
