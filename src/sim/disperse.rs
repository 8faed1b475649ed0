//! Dispersal and restoration controllers
//!
//! Dispersal turns a tapped wheel and every non-dispersed wheel sharing its
//! base color into particle bursts and records the affected ids as one undo
//! batch. Restoration pops the most recent batch, re-forms those wheels and
//! calls matching particles home.

use glam::Vec2;
use rand::Rng;

use super::particle::{Particle, ParticleKind};
use super::state::ArtState;
use crate::consts::*;

/// Handle a selection at `point`.
///
/// Hit-tests the topmost wheel in z-order (later-placed wheels draw on top).
/// Returns false on the no-op cases: nothing hit, the hit wheel is already
/// dispersed, or the affected set is empty.
pub fn disperse_at(state: &mut ArtState, point: Vec2) -> bool {
    let Some(hit) = state.elements.iter().rposition(|e| e.contains(point)) else {
        return false;
    };
    if state.elements[hit].dispersed {
        return false;
    }

    let base = state.elements[hit].palette.base;
    let batch: Vec<u32> = state
        .elements
        .iter()
        .filter(|e| !e.dispersed && e.palette.base == base)
        .map(|e| e.id)
        .collect();
    // The trigger itself is in the set, so this cannot fire; guarded anyway.
    if batch.is_empty() {
        return false;
    }

    for idx in 0..state.elements.len() {
        if !batch.contains(&state.elements[idx].id) {
            continue;
        }
        {
            let e = &mut state.elements[idx];
            e.dispersed = true;
            e.inner_fade = 0.0;
        }
        spawn_burst(state, idx);
    }

    log::debug!("dispersed batch of {} wheels", batch.len());
    state.history.push(batch);
    true
}

/// Shatter one wheel's inner detail into particles, one per spoke and one per
/// outer dot. Origin and return-target are both the anchor-ring point.
fn spawn_burst(state: &mut ArtState, idx: usize) {
    let (center, radius, palette) = {
        let e = &state.elements[idx];
        (e.pos, e.radius, e.palette)
    };

    for i in 0..SPOKE_COUNT {
        let (anchor, angle) = {
            let e = &state.elements[idx];
            (e.spoke_anchor(i), e.spoke_angle(i))
        };
        let kind = ParticleKind::Spoke {
            rotation: angle,
            rotation_speed: state.rng.random_range(-0.15..0.15),
        };
        let p = Particle::spawn(
            anchor,
            kind,
            palette.spoke_accent,
            radius * 0.16,
            launch_velocity(state, center, anchor),
            wind(state),
        );
        push_particle(state, p);
    }

    for i in 0..OUTER_DOT_COUNT {
        let anchor = state.elements[idx].dot_anchor(i);
        let p = Particle::spawn(
            anchor,
            ParticleKind::Dot,
            palette.outer_accent,
            radius * 0.07,
            launch_velocity(state, center, anchor),
            wind(state),
        );
        push_particle(state, p);
    }
}

/// Small randomized velocity, biased outward from the wheel center
fn launch_velocity(state: &mut ArtState, center: Vec2, anchor: Vec2) -> Vec2 {
    let outward = (anchor - center).normalize_or_zero();
    let speed = state.rng.random_range(0.6..2.0);
    let jitter = Vec2::new(
        state.rng.random_range(-0.5..0.5),
        state.rng.random_range(-0.5..0.5),
    );
    outward * speed + jitter
}

/// Constant per-particle wind, fixed at spawn
fn wind(state: &mut ArtState) -> Vec2 {
    Vec2::new(
        state.rng.random_range(-0.02..0.02),
        state.rng.random_range(-0.035..0.01),
    )
}

fn push_particle(state: &mut ArtState, p: Particle) {
    if state.particles.len() >= MAX_PARTICLES {
        // Drop the oldest to make room
        state.particles.remove(0);
    }
    state.particles.push(p);
}

/// Handle a restore trigger.
///
/// Pops the most recent batch and re-forms its wheels with a fresh fade-in.
/// Live particles whose return-target sits within [`ANCHOR_MATCH_TOLERANCE`]
/// of a restored wheel's recomputed spoke or dot anchors flip to returning;
/// everything else keeps draining undisturbed. Returns false when the history
/// is empty.
pub fn restore_last(state: &mut ArtState) -> bool {
    let Some(batch) = state.history.pop() else {
        return false;
    };

    let mut anchors: Vec<Vec2> = Vec::with_capacity(batch.len() * (SPOKE_COUNT + OUTER_DOT_COUNT));
    for e in state.elements.iter_mut() {
        if !batch.contains(&e.id) {
            continue;
        }
        e.dispersed = false;
        e.inner_fade = 0.0;
        for i in 0..SPOKE_COUNT {
            anchors.push(e.spoke_anchor(i));
        }
        for i in 0..OUTER_DOT_COUNT {
            anchors.push(e.dot_anchor(i));
        }
    }

    let tol_sq = ANCHOR_MATCH_TOLERANCE * ANCHOR_MATCH_TOLERANCE;
    let mut called_home = 0usize;
    for p in state.particles.iter_mut() {
        if anchors
            .iter()
            .any(|a| a.distance_squared(p.target) <= tol_sq)
        {
            p.begin_return();
            called_home += 1;
        }
    }

    log::debug!(
        "restored batch of {} wheels, {} particles returning",
        batch.len(),
        called_home
    );
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::SCHEMES;

    const BURST: usize = SPOKE_COUNT + OUTER_DOT_COUNT;

    /// Three wheels sharing one base color, two sharing another
    fn five_wheel_state() -> ArtState {
        let mut state = ArtState::new(42, 1200.0, 800.0);
        // SCHEMES[0] and SCHEMES[1] share a base; SCHEMES[2] and SCHEMES[3]
        // share a different one.
        state.add_element(Vec2::new(150.0, 150.0), 40.0, SCHEMES[0], 0.0);
        state.add_element(Vec2::new(450.0, 150.0), 50.0, SCHEMES[1], 1.0);
        state.add_element(Vec2::new(750.0, 150.0), 35.0, SCHEMES[0], 2.0);
        state.add_element(Vec2::new(150.0, 500.0), 45.0, SCHEMES[2], 0.5);
        state.add_element(Vec2::new(450.0, 500.0), 40.0, SCHEMES[3], 1.5);
        state
    }

    #[test]
    fn dispersal_affects_every_wheel_of_the_base_color() {
        let mut state = five_wheel_state();
        assert!(disperse_at(&mut state, Vec2::new(150.0, 150.0)));

        let dispersed: Vec<bool> = state.elements.iter().map(|e| e.dispersed).collect();
        assert_eq!(dispersed, vec![true, true, true, false, false]);
        assert_eq!(state.particles.len(), 3 * BURST);
        assert_eq!(state.history.len(), 1);
        assert_eq!(state.history[0].len(), 3);
        for e in state.elements.iter().filter(|e| e.dispersed) {
            assert_eq!(e.inner_fade, 0.0);
        }
    }

    #[test]
    fn dispersal_misses_are_noops() {
        let mut state = five_wheel_state();
        assert!(!disperse_at(&mut state, Vec2::new(1100.0, 700.0)));
        assert!(state.particles.is_empty());
        assert!(state.history.is_empty());
        assert!(state.elements.iter().all(|e| !e.dispersed));
    }

    #[test]
    fn dispersing_an_already_dispersed_wheel_is_a_noop() {
        let mut state = five_wheel_state();
        assert!(disperse_at(&mut state, Vec2::new(150.0, 150.0)));
        let particles_before = state.particles.len();
        assert!(!disperse_at(&mut state, Vec2::new(150.0, 150.0)));
        assert_eq!(state.particles.len(), particles_before);
        assert_eq!(state.history.len(), 1);
    }

    #[test]
    fn one_selection_processed_per_event() {
        let mut state = ArtState::new(1, 600.0, 600.0);
        // Two overlapping wheels with different base colors; the later one
        // is on top in z-order.
        state.add_element(Vec2::new(300.0, 300.0), 50.0, SCHEMES[0], 0.0);
        state.add_element(Vec2::new(310.0, 300.0), 50.0, SCHEMES[2], 0.0);
        assert!(disperse_at(&mut state, Vec2::new(305.0, 300.0)));
        assert!(!state.elements[0].dispersed);
        assert!(state.elements[1].dispersed);
        assert_eq!(state.history.len(), 1);
    }

    #[test]
    fn particles_spawn_on_their_anchor_rings() {
        let mut state = five_wheel_state();
        disperse_at(&mut state, Vec2::new(150.0, 500.0));
        // SCHEMES[2]/[3] batch: wheels 3 and 4
        assert_eq!(state.particles.len(), 2 * BURST);
        for p in &state.particles {
            assert_eq!(p.origin, p.target);
            assert_eq!(p.pos, p.target);
            assert!(!p.returning);
            assert_eq!(p.alpha, ALPHA_MAX);
        }
        let spokes = state
            .particles
            .iter()
            .filter(|p| matches!(p.kind, ParticleKind::Spoke { .. }))
            .count();
        assert_eq!(spokes, 2 * SPOKE_COUNT);
    }

    #[test]
    fn restoration_pops_one_batch_and_calls_particles_home() {
        let mut state = five_wheel_state();
        disperse_at(&mut state, Vec2::new(150.0, 150.0));
        disperse_at(&mut state, Vec2::new(150.0, 500.0));
        assert_eq!(state.history.len(), 2);
        assert_eq!(state.particles.len(), 5 * BURST);

        // LIFO: the second batch (SCHEMES[2]/[3] pair) comes back first
        assert!(restore_last(&mut state));
        assert_eq!(state.history.len(), 1);
        assert!(!state.elements[3].dispersed);
        assert!(!state.elements[4].dispersed);
        assert_eq!(state.elements[3].inner_fade, 0.0);
        assert!(state.elements[0].dispersed);

        let returning = state.particles.iter().filter(|p| p.returning).count();
        assert_eq!(returning, 2 * BURST);
    }

    #[test]
    fn restoration_with_empty_history_is_a_noop() {
        let mut state = five_wheel_state();
        assert!(!restore_last(&mut state));
        disperse_at(&mut state, Vec2::new(150.0, 150.0));
        assert!(restore_last(&mut state));
        assert!(!restore_last(&mut state));
        assert!(state.history.is_empty());
    }

    #[test]
    fn restoration_snapshots_a_fresh_origin() {
        let mut state = five_wheel_state();
        disperse_at(&mut state, Vec2::new(450.0, 500.0));
        // Let the burst drift away from the anchors
        for _ in 0..30 {
            for p in state.particles.iter_mut() {
                p.update();
            }
        }
        restore_last(&mut state);
        for p in state.particles.iter().filter(|p| p.returning) {
            assert_eq!(p.origin, p.pos);
        }
    }

    #[test]
    fn end_to_end_color_batch_scenario() {
        // 3 wheels of color A, 2 of color B. Tap an A-wheel, then restore.
        let mut state = ArtState::new(99, 1200.0, 800.0);
        for (i, x) in [100.0f32, 400.0, 700.0].iter().enumerate() {
            state.add_element(Vec2::new(*x, 200.0), 40.0, SCHEMES[0], i as f32);
        }
        for x in [250.0f32, 550.0] {
            state.add_element(Vec2::new(x, 600.0), 40.0, SCHEMES[2], 0.0);
        }

        assert!(disperse_at(&mut state, Vec2::new(400.0, 200.0)));
        assert_eq!(
            state.elements.iter().filter(|e| e.dispersed).count(),
            3
        );
        assert_eq!(state.particles.len(), 3 * BURST);
        assert_eq!(state.history.len(), 1);

        assert!(restore_last(&mut state));
        assert!(state.history.is_empty());
        for e in &state.elements {
            assert!(!e.dispersed);
            assert_eq!(e.inner_fade, 0.0);
        }
        assert!(state.particles.iter().all(|p| p.returning));
    }
}
