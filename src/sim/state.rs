//! Artwork state and core visual types
//!
//! Everything the controllers and frame driver mutate lives here, owned by
//! `ArtState` and passed explicitly. No globals.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use std::f32::consts::TAU;

use super::particle::Particle;
use crate::consts::*;
use crate::palette::WheelPalette;
use crate::polar_to_cartesian;

/// A placed wheel motif
///
/// Created once by layout; only `dispersed` and `inner_fade` change over its
/// lifetime. `inner_fade` is pinned to 0 while dispersed and otherwise rises
/// toward [`FADE_MAX`] by [`FADE_STEP`] per tick.
#[derive(Debug, Clone)]
pub struct Element {
    pub id: u32,
    pub pos: Vec2,
    pub radius: f32,
    pub palette: WheelPalette,
    /// Orientation of the decorative stem; spokes are phased off this angle
    pub stem_angle: f32,
    pub dispersed: bool,
    /// Inner-detail opacity, 0-255
    pub inner_fade: f32,
}

impl Element {
    pub fn new(id: u32, pos: Vec2, radius: f32, palette: WheelPalette, stem_angle: f32) -> Self {
        Self {
            id,
            pos,
            radius,
            palette,
            stem_angle,
            dispersed: false,
            inner_fade: 0.0,
        }
    }

    /// Euclidean containment test used for hit-testing
    pub fn contains(&self, point: Vec2) -> bool {
        self.pos.distance_squared(point) <= self.radius * self.radius
    }

    /// Advance the fade one tick; pinned at 0 while dispersed
    pub fn advance_fade(&mut self) {
        if self.dispersed {
            self.inner_fade = 0.0;
            return;
        }
        self.inner_fade = (self.inner_fade + FADE_STEP).clamp(0.0, FADE_MAX);
    }

    /// Angular position of spoke `index` on the wheel
    pub fn spoke_angle(&self, index: usize) -> f32 {
        self.stem_angle + index as f32 * TAU / SPOKE_COUNT as f32
    }

    /// Anchor point of spoke fragment `index` on the spoke ring
    pub fn spoke_anchor(&self, index: usize) -> Vec2 {
        self.pos + polar_to_cartesian(self.radius * SPOKE_RING_FRACTION, self.spoke_angle(index))
    }

    /// Anchor point of dot fragment `index` on the outer dot ring
    pub fn dot_anchor(&self, index: usize) -> Vec2 {
        let theta = self.stem_angle + (index as f32 + 0.5) * TAU / OUTER_DOT_COUNT as f32;
        self.pos + polar_to_cartesian(self.radius * DOT_RING_FRACTION, theta)
    }
}

/// A decorative link between two wheels
///
/// References elements by id only; connectors never outlive or mutate the
/// wheels they join.
#[derive(Debug, Clone, Copy)]
pub struct Connector {
    pub a: u32,
    pub b: u32,
    /// Perpendicular bow of the curve, as a fraction of the span length
    pub bow: f32,
}

/// Complete artwork state
///
/// Elements, connectors, particles and the undo history are process-scoped
/// owned collections; controllers and the frame driver receive `&mut ArtState`.
pub struct ArtState {
    /// Layout seed, kept for logging
    pub seed: u64,
    pub rng: Pcg32,
    /// Canvas extent in CSS pixels
    pub width: f32,
    pub height: f32,
    pub elements: Vec<Element>,
    pub connectors: Vec<Connector>,
    pub particles: Vec<Particle>,
    /// LIFO stack of dispersal batches (element ids dispersed together)
    pub history: Vec<Vec<u32>>,
    next_id: u32,
}

impl ArtState {
    pub fn new(seed: u64, width: f32, height: f32) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            width,
            height,
            elements: Vec::new(),
            connectors: Vec::new(),
            particles: Vec::new(),
            history: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a stable element id
    pub fn next_element_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Add a wheel and return its id (used by layout and tests)
    pub fn add_element(
        &mut self,
        pos: Vec2,
        radius: f32,
        palette: WheelPalette,
        stem_angle: f32,
    ) -> u32 {
        let id = self.next_element_id();
        self.elements
            .push(Element::new(id, pos, radius, palette, stem_angle));
        id
    }

    pub fn element(&self, id: u32) -> Option<&Element> {
        self.elements.iter().find(|e| e.id == id)
    }

    /// Discard all artwork state and adopt a new canvas extent
    ///
    /// The only teardown path; a resize rebuilds everything via layout.
    pub fn reset(&mut self, seed: u64, width: f32, height: f32) {
        self.seed = seed;
        self.rng = Pcg32::seed_from_u64(seed);
        self.width = width;
        self.height = height;
        self.elements.clear();
        self.connectors.clear();
        self.particles.clear();
        self.history.clear();
        self.next_id = 1;
    }
}
