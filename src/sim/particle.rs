//! Dispersal fragments and their two motion modes
//!
//! A particle is one piece of a wheel's inner detail: a spoke fragment or an
//! outer dot. It starts in drift mode (outward under velocity plus a small
//! constant wind, fading and shrinking) and may be flipped exactly once into
//! return mode by the restoration controller, after which it eases back onto
//! the ring point it departed from.

use glam::Vec2;

use crate::consts::*;
use crate::palette::Color;

/// Fragment kind; rotation state is only meaningful for spokes
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParticleKind {
    Spoke { rotation: f32, rotation_speed: f32 },
    Dot,
}

#[derive(Debug, Clone)]
pub struct Particle {
    pub pos: Vec2,
    /// Where the fragment started its current motion (spawn point, or the
    /// point it was at when restoration flipped it)
    pub origin: Vec2,
    /// Ring point on the owning wheel the fragment must converge back onto
    pub target: Vec2,
    pub kind: ParticleKind,
    pub color: Color,
    pub size: f32,
    /// Spawn size; the return-mode rest size is derived from it
    pub base_size: f32,
    /// Opacity, 0-255
    pub alpha: f32,
    pub vel: Vec2,
    /// Small constant per-tick force, fixed at spawn
    pub wind: Vec2,
    pub returning: bool,
}

impl Particle {
    /// Spawn at an anchor point; origin and target both equal the anchor, so
    /// "return" means converging back exactly onto the departure point.
    pub fn spawn(
        anchor: Vec2,
        kind: ParticleKind,
        color: Color,
        size: f32,
        vel: Vec2,
        wind: Vec2,
    ) -> Self {
        Self {
            pos: anchor,
            origin: anchor,
            target: anchor,
            kind,
            color,
            size,
            base_size: size,
            alpha: ALPHA_MAX,
            vel,
            wind,
            returning: false,
        }
    }

    /// Flip into return mode, re-anchoring the animation at the current
    /// position. Never flips back.
    pub fn begin_return(&mut self) {
        self.returning = true;
        self.origin = self.pos;
    }

    /// Advance one tick in the active motion mode
    pub fn update(&mut self) {
        if self.returning {
            self.pos += (self.target - self.pos) * RETURN_SMOOTHING;
            self.alpha = (self.alpha * RETURN_ALPHA_EASE - RETURN_ALPHA_BLEED)
                .clamp(0.0, ALPHA_MAX);
            let rest = self.base_size * PARTICLE_REST_FRACTION;
            self.size += (rest - self.size) * RETURN_SIZE_EASE;
            if let ParticleKind::Spoke {
                ref mut rotation,
                ref mut rotation_speed,
            } = self.kind
            {
                *rotation_speed *= SPIN_DAMPING;
                *rotation += *rotation_speed;
            }
        } else {
            self.vel += self.wind;
            self.pos += self.vel;
            self.alpha = (self.alpha - DRIFT_FADE_STEP).clamp(0.0, ALPHA_MAX);
            self.size *= DRIFT_SHRINK;
            if let ParticleKind::Spoke {
                ref mut rotation,
                ref mut rotation_speed,
            } = self.kind
            {
                *rotation += *rotation_speed;
            }
        }
    }

    /// Removal predicate: a drained drifter, or a drained returner that has
    /// reached its target.
    pub fn finished(&self) -> bool {
        if self.alpha > 0.0 {
            return false;
        }
        if !self.returning {
            return true;
        }
        self.pos.distance_squared(self.target) <= RETURN_EPSILON * RETURN_EPSILON
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drifting() -> Particle {
        Particle::spawn(
            Vec2::new(200.0, 150.0),
            ParticleKind::Dot,
            Color::rgb(200, 60, 60),
            4.0,
            Vec2::new(1.2, -0.4),
            Vec2::new(0.01, 0.02),
        )
    }

    fn spinning() -> Particle {
        Particle::spawn(
            Vec2::new(200.0, 150.0),
            ParticleKind::Spoke {
                rotation: 0.3,
                rotation_speed: 0.11,
            },
            Color::rgb(60, 60, 200),
            6.0,
            Vec2::new(-0.8, 1.0),
            Vec2::new(-0.02, 0.0),
        )
    }

    #[test]
    fn drift_alpha_strictly_decreases_until_zero() {
        let mut p = drifting();
        let mut prev = p.alpha;
        while p.alpha > 0.0 {
            p.update();
            assert!(p.alpha < prev || p.alpha == 0.0);
            assert!((0.0..=ALPHA_MAX).contains(&p.alpha));
            prev = p.alpha;
        }
    }

    #[test]
    fn drift_removal_is_bounded_and_deterministic() {
        let mut p = drifting();
        let bound = (ALPHA_MAX / DRIFT_FADE_STEP).ceil() as usize;
        for _ in 0..bound {
            p.update();
        }
        assert_eq!(p.alpha, 0.0);
        assert!(p.finished());
    }

    #[test]
    fn drift_shrinks_size_multiplicatively() {
        let mut p = drifting();
        p.update();
        assert!((p.size - 4.0 * DRIFT_SHRINK).abs() < 1e-6);
        p.update();
        assert!((p.size - 4.0 * DRIFT_SHRINK * DRIFT_SHRINK).abs() < 1e-6);
    }

    #[test]
    fn return_converges_onto_target() {
        let mut p = drifting();
        // Drift away for a while, then get called home
        for _ in 0..40 {
            p.update();
        }
        assert!(p.pos.distance(p.target) > 10.0);
        let flipped_at = p.pos;
        p.begin_return();
        assert!(p.returning);
        assert_eq!(p.origin, flipped_at);

        for _ in 0..400 {
            p.update();
            if p.finished() {
                break;
            }
        }
        assert!(p.finished());
        assert!(p.pos.distance(p.target) <= RETURN_EPSILON);
        assert_eq!(p.alpha, 0.0);
    }

    #[test]
    fn returner_is_not_finished_while_far_from_target() {
        let mut p = drifting();
        for _ in 0..60 {
            p.update();
        }
        p.begin_return();
        // Drain the alpha without letting position catch up
        p.alpha = 0.0;
        if p.pos.distance(p.target) > RETURN_EPSILON {
            assert!(!p.finished());
        }
    }

    #[test]
    fn spoke_spin_damps_toward_zero_in_return() {
        let mut p = spinning();
        p.begin_return();
        for _ in 0..200 {
            p.update();
        }
        let ParticleKind::Spoke { rotation_speed, .. } = p.kind else {
            panic!("kind changed");
        };
        assert!(rotation_speed.abs() < 1e-3);
    }

    #[test]
    fn spoke_rotates_while_drifting() {
        let mut p = spinning();
        p.update();
        let ParticleKind::Spoke { rotation, .. } = p.kind else {
            panic!("kind changed");
        };
        assert!((rotation - 0.41).abs() < 1e-6);
    }

    mod invariants {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn alpha_and_size_stay_in_range(
                vx in -4.0f32..4.0,
                vy in -4.0f32..4.0,
                wx in -0.1f32..0.1,
                wy in -0.1f32..0.1,
                flip_after in 0usize..200,
                ticks in 0usize..600,
            ) {
                let mut p = Particle::spawn(
                    Vec2::new(100.0, 100.0),
                    ParticleKind::Dot,
                    Color::rgb(10, 20, 30),
                    5.0,
                    Vec2::new(vx, vy),
                    Vec2::new(wx, wy),
                );
                for i in 0..ticks {
                    if i == flip_after {
                        p.begin_return();
                    }
                    p.update();
                    prop_assert!((0.0..=ALPHA_MAX).contains(&p.alpha));
                    prop_assert!(p.size >= 0.0);
                    prop_assert!(p.size <= p.base_size + 1e-3);
                }
            }

            #[test]
            fn drift_alpha_never_increases(ticks in 1usize..300) {
                let mut p = Particle::spawn(
                    Vec2::ZERO,
                    ParticleKind::Dot,
                    Color::rgb(0, 0, 0),
                    3.0,
                    Vec2::new(1.0, 0.0),
                    Vec2::new(0.0, 0.05),
                );
                let mut prev = p.alpha;
                for _ in 0..ticks {
                    p.update();
                    prop_assert!(p.alpha <= prev);
                    prev = p.alpha;
                }
            }
        }
    }
}
