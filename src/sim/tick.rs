//! Fixed-step frame driver
//!
//! One logical tick per rendered frame step. All rates in the sim are
//! per-tick at [`crate::consts::TICK_HZ`]; the host runs ticks from an
//! accumulator so animation speed is independent of display refresh.

use glam::Vec2;

use super::disperse::{disperse_at, restore_last};
use super::state::ArtState;

/// Input gathered by the host between frames (one-shot; the host clears it
/// after it is applied)
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameInput {
    /// Selection at a canvas point (mouse/touch tap)
    pub tap: Option<Vec2>,
    /// Restore trigger (undo key)
    pub restore: bool,
}

/// Apply latched input before the tick runs. Input events are fully processed
/// between frames; no mutation happens mid-tick.
pub fn apply_input(state: &mut ArtState, input: &FrameInput) {
    if let Some(point) = input.tap {
        disperse_at(state, point);
    }
    if input.restore {
        restore_last(state);
    }
}

/// Advance the artwork one tick: element fades first, then particle motion,
/// then reap finished particles in the same pass.
pub fn tick(state: &mut ArtState) {
    for e in state.elements.iter_mut() {
        e.advance_fade();
    }

    for p in state.particles.iter_mut() {
        p.update();
    }
    state.particles.retain(|p| !p.finished());
}
