//! Frame assembly
//!
//! Tessellates the whole artwork into one vertex list per frame, in paint
//! order: connectors first, wheels (shell, then fade-gated inner detail),
//! particles last on top.

use glam::Vec2;

use super::shapes::{bezier_strip, circle, oriented_quad, ring, thick_segment};
use super::vertex::Vertex;
use crate::consts::*;
use crate::palette;
use crate::polar_to_cartesian;
use crate::settings::Settings;
use crate::sim::{ArtState, Element, ParticleKind};

const WHEEL_SEGMENTS: u32 = 48;
const DOT_SEGMENTS: u32 = 12;
const LINK_SEGMENTS: u32 = 16;
const LINK_WIDTH: f32 = 2.5;

/// Build the vertex list for the current state
pub fn build_scene(state: &ArtState, settings: &Settings) -> Vec<Vertex> {
    let mut out = Vec::with_capacity(
        state.elements.len() * 1200 + state.particles.len() * 36 + state.connectors.len() * 96,
    );

    if settings.show_connectors {
        for c in &state.connectors {
            let (Some(a), Some(b)) = (state.element(c.a), state.element(c.b)) else {
                continue;
            };
            push_connector(&mut out, a, b, c.bow);
        }
    }

    for e in &state.elements {
        push_wheel(&mut out, e);
    }

    for p in &state.particles {
        match p.kind {
            ParticleKind::Spoke { rotation, .. } => {
                oriented_quad(
                    &mut out,
                    p.pos,
                    Vec2::new(p.size, p.size * 0.28),
                    rotation,
                    p.color.with_alpha(p.alpha),
                );
            }
            ParticleKind::Dot => {
                circle(&mut out, p.pos, p.size, p.color.with_alpha(p.alpha), DOT_SEGMENTS);
            }
        }
    }

    out
}

fn push_connector(out: &mut Vec<Vertex>, a: &Element, b: &Element, bow: f32) {
    let dir = (b.pos - a.pos).normalize_or_zero();
    let start = a.pos + dir * a.radius;
    let end = b.pos - dir * b.radius;
    let span = end - start;
    let perp = Vec2::new(-span.y, span.x);
    let control = start + span * 0.5 + perp * bow;
    bezier_strip(out, start, control, end, LINK_WIDTH, palette::LINK, LINK_SEGMENTS);
}

/// One wheel: shell always, inner detail gated by the fade level.
///
/// A dispersed wheel keeps its body disc, rim ring and stem; only the inner
/// pattern disappears (its fade is pinned at 0).
fn push_wheel(out: &mut Vec<Vertex>, e: &Element) {
    let r = e.radius;

    // Shell
    circle(out, e.pos, r, e.palette.base.opaque(), WHEEL_SEGMENTS);
    ring(
        out,
        e.pos,
        r * 0.86,
        r * 0.95,
        e.palette.outer_accent.opaque(),
        WHEEL_SEGMENTS,
    );

    // Stem
    let stem_tip = e.pos + polar_to_cartesian(r * 1.16, e.stem_angle);
    let stem_root = e.pos + polar_to_cartesian(r * 0.96, e.stem_angle);
    thick_segment(out, stem_root, stem_tip, r * 0.08, e.palette.spoke_accent.opaque());
    circle(out, stem_tip, r * 0.06, e.palette.spoke_accent.opaque(), DOT_SEGMENTS);

    // Inner detail, faded in; invisible at fade 0 so skip the geometry
    if e.inner_fade <= 0.0 {
        return;
    }
    let fade = e.inner_fade;

    for i in 0..SPOKE_COUNT {
        let hub = e.pos + polar_to_cartesian(r * 0.18, e.spoke_angle(i));
        thick_segment(
            out,
            hub,
            e.spoke_anchor(i),
            r * 0.07,
            e.palette.spoke_accent.with_alpha(fade),
        );
    }

    ring(
        out,
        e.pos,
        r * 0.50,
        r * 0.55,
        e.palette.inner_accent.with_alpha(fade),
        WHEEL_SEGMENTS,
    );

    for i in 0..OUTER_DOT_COUNT {
        circle(
            out,
            e.dot_anchor(i),
            r * 0.07,
            e.palette.outer_accent.with_alpha(fade),
            DOT_SEGMENTS,
        );
    }

    circle(out, e.pos, r * 0.16, e.palette.center.with_alpha(fade), DOT_SEGMENTS * 2);
}
