//! Stochastic wheel placement and connector derivation
//!
//! Best-effort dart-throwing: each wheel gets a bounded number of placement
//! attempts; overlapping candidates are rejected. Falling short of the target
//! is tolerated and logged, never fatal. Connectors join wheels whose rims
//! end up close, capped per wheel so the linkage stays sparse.

use glam::Vec2;
use rand::Rng;
use std::f32::consts::TAU;

use super::state::{ArtState, Connector};
use crate::consts::*;
use crate::palette::SCHEMES;

/// Populate an empty state with up to `target` wheels and their links.
pub fn generate_layout(state: &mut ArtState, target: usize) {
    let max_fit = (state.width.min(state.height) / 2.0 - EDGE_MARGIN).min(MAX_WHEEL_RADIUS);
    if max_fit <= MIN_WHEEL_RADIUS {
        log::warn!(
            "canvas {}x{} too small for any wheel",
            state.width,
            state.height
        );
        return;
    }

    let mut placed = 0usize;
    for _ in 0..target {
        let mut accepted = false;
        for _ in 0..PLACEMENT_ATTEMPTS {
            let radius = state.rng.random_range(MIN_WHEEL_RADIUS..max_fit);
            let x = state
                .rng
                .random_range((EDGE_MARGIN + radius)..(state.width - EDGE_MARGIN - radius));
            let y = state
                .rng
                .random_range((EDGE_MARGIN + radius)..(state.height - EDGE_MARGIN - radius));
            let pos = Vec2::new(x, y);

            let overlaps = state
                .elements
                .iter()
                .any(|e| e.pos.distance(pos) < e.radius + radius + WHEEL_GAP);
            if overlaps {
                continue;
            }

            let scheme = SCHEMES[state.rng.random_range(0..SCHEMES.len())];
            let stem_angle = state.rng.random_range(0.0..TAU);
            state.add_element(pos, radius, scheme, stem_angle);
            placed += 1;
            accepted = true;
            break;
        }
        if !accepted {
            // Field is getting crowded; later wheels only get harder to fit
            break;
        }
    }

    if placed < target {
        log::warn!("placed {placed}/{target} wheels within the attempt budget");
    }

    derive_connectors(state);
    log::info!(
        "layout: {} wheels, {} links (seed {})",
        state.elements.len(),
        state.connectors.len(),
        state.seed
    );
}

/// Link wheels whose rim-to-rim gap is within [`CONNECT_RANGE`], nearest
/// pairs first, at most [`MAX_LINKS_PER_WHEEL`] links each.
fn derive_connectors(state: &mut ArtState) {
    let n = state.elements.len();
    let mut pairs: Vec<(usize, usize, f32)> = Vec::new();
    for i in 0..n {
        for j in (i + 1)..n {
            let (a, b) = (&state.elements[i], &state.elements[j]);
            let gap = a.pos.distance(b.pos) - a.radius - b.radius;
            if gap <= CONNECT_RANGE {
                pairs.push((i, j, gap));
            }
        }
    }
    pairs.sort_by(|x, y| x.2.total_cmp(&y.2));

    let mut link_count = vec![0usize; n];
    for (i, j, _) in pairs {
        if link_count[i] >= MAX_LINKS_PER_WHEEL || link_count[j] >= MAX_LINKS_PER_WHEEL {
            continue;
        }
        let bow = state.rng.random_range(-0.35..0.35);
        state.connectors.push(Connector {
            a: state.elements[i].id,
            b: state.elements[j].id,
            bow,
        });
        link_count[i] += 1;
        link_count[j] += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placed_wheels_never_overlap() {
        let mut state = ArtState::new(1234, 900.0, 700.0);
        generate_layout(&mut state, 20);
        assert!(!state.elements.is_empty());
        for (i, a) in state.elements.iter().enumerate() {
            for b in state.elements.iter().skip(i + 1) {
                let dist = a.pos.distance(b.pos);
                assert!(
                    dist >= a.radius + b.radius + WHEEL_GAP - 1e-3,
                    "wheels {} and {} overlap",
                    a.id,
                    b.id
                );
            }
        }
    }

    #[test]
    fn placement_respects_canvas_margins() {
        let mut state = ArtState::new(77, 640.0, 480.0);
        generate_layout(&mut state, 16);
        for e in &state.elements {
            assert!(e.pos.x - e.radius >= EDGE_MARGIN - 1e-3);
            assert!(e.pos.y - e.radius >= EDGE_MARGIN - 1e-3);
            assert!(e.pos.x + e.radius <= state.width - EDGE_MARGIN + 1e-3);
            assert!(e.pos.y + e.radius <= state.height - EDGE_MARGIN + 1e-3);
        }
    }

    #[test]
    fn shortfall_is_tolerated_not_fatal() {
        // Canvas fits a handful of wheels at most; asking for 50 must not
        // panic or loop forever.
        let mut state = ArtState::new(9, 300.0, 300.0);
        generate_layout(&mut state, 50);
        assert!(state.elements.len() < 50);
    }

    #[test]
    fn degenerate_canvas_places_nothing() {
        let mut state = ArtState::new(9, 50.0, 50.0);
        generate_layout(&mut state, 10);
        assert!(state.elements.is_empty());
        assert!(state.connectors.is_empty());
    }

    #[test]
    fn connectors_reference_placed_wheels_and_respect_the_cap() {
        let mut state = ArtState::new(4242, 1000.0, 800.0);
        generate_layout(&mut state, 24);
        let mut counts = std::collections::HashMap::new();
        for c in &state.connectors {
            assert_ne!(c.a, c.b);
            assert!(state.element(c.a).is_some());
            assert!(state.element(c.b).is_some());
            *counts.entry(c.a).or_insert(0usize) += 1;
            *counts.entry(c.b).or_insert(0usize) += 1;
        }
        for (_, n) in counts {
            assert!(n <= MAX_LINKS_PER_WHEEL);
        }
    }
}
