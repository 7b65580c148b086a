//! Declarative transform tweens.
//!
//! A `Tween` is one `{from, to, duration, easing, start_delay}` descriptor
//! attached to an entity; `tween_system` advances it each frame and writes
//! the interpolated pose into the entity's `Transform`. Entrance
//! choreography, focus leans, the button-hover tilt, and the yellow mouth
//! wave are all played through this one component.

use bevy::prelude::{App, Component, Plugin, Quat, Query, Res, Time, Transform, Update, Vec2};

/// Stage tilt while the submit button is hovered (degrees,
/// counter-clockwise).
pub const BUTTON_TILT_DEG: f32 = 4.0;

/// Duration of the lean toward a focused field.
pub const FOCUS_LEAN_SECS: f32 = 0.6;

/// Duration of the relaxed return to the rest pose on blur.
pub const FOCUS_LEAN_RETURN_SECS: f32 = 1.2;

/// Easing vocabulary used by the scene's timelines.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Easing {
    Linear,
    SineInOut,
    /// `1 - (1 - t)^n`.
    PowerOut(f32),
    ExpoOut,
    /// Overshooting ease-out; the parameter controls overshoot strength.
    BackOut(f32),
    /// Spring-like ease-out with amplitude and period.
    ElasticOut { amplitude: f32, period: f32 },
}

impl Easing {
    /// Samples the curve at `t` in `[0, 1]`.
    pub fn sample(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::SineInOut => 0.5 - 0.5 * (std::f32::consts::PI * t).cos(),
            Easing::PowerOut(n) => 1.0 - (1.0 - t).powf(n),
            Easing::ExpoOut => {
                if t >= 1.0 {
                    1.0
                } else {
                    1.0 - 2.0_f32.powf(-10.0 * t)
                }
            }
            Easing::BackOut(s) => {
                let u = t - 1.0;
                1.0 + u * u * ((s + 1.0) * u + s)
            }
            Easing::ElasticOut { amplitude, period } => {
                if t <= 0.0 {
                    0.0
                } else if t >= 1.0 {
                    1.0
                } else {
                    let s = period / std::f32::consts::TAU * (1.0 / amplitude).asin();
                    amplitude
                        * 2.0_f32.powf(-10.0 * t)
                        * ((t - s) * std::f32::consts::TAU / period).sin()
                        + 1.0
                }
            }
        }
    }
}

/// One 2D pose keyframe: local translation, z-rotation in degrees, scale.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PoseKey {
    pub translation: Vec2,
    pub rotation_deg: f32,
    pub scale: Vec2,
}

impl PoseKey {
    pub fn new(translation: Vec2, rotation_deg: f32, scale: Vec2) -> Self {
        Self {
            translation,
            rotation_deg,
            scale,
        }
    }

    pub fn with_rotation(mut self, rotation_deg: f32) -> Self {
        self.rotation_deg = rotation_deg;
        self
    }

    /// Reads the pose out of an existing transform, keeping only the 2D
    /// parts the scene animates.
    pub fn from_transform(transform: &Transform) -> Self {
        let (_, _, z) = transform.rotation.to_euler(bevy::math::EulerRot::XYZ);
        Self {
            translation: transform.translation.truncate(),
            rotation_deg: z.to_degrees(),
            scale: transform.scale.truncate(),
        }
    }

    fn lerp(a: Self, b: Self, t: f32) -> Self {
        Self {
            translation: a.translation.lerp(b.translation, t),
            rotation_deg: a.rotation_deg + (b.rotation_deg - a.rotation_deg) * t,
            scale: a.scale.lerp(b.scale, t),
        }
    }

    /// Writes the pose into a transform, preserving its z layer.
    pub fn apply(self, transform: &mut Transform) {
        transform.translation.x = self.translation.x;
        transform.translation.y = self.translation.y;
        transform.rotation = Quat::from_rotation_z(self.rotation_deg.to_radians());
        transform.scale.x = self.scale.x;
        transform.scale.y = self.scale.y;
    }
}

/// A transform tween in flight. Inserting a new `Tween` on an entity
/// replaces the previous one, which is exactly the cancel-and-reschedule
/// behavior the focus leans rely on.
#[derive(Component, Clone, Debug)]
pub struct Tween {
    pub from: PoseKey,
    pub to: PoseKey,
    pub duration: f32,
    pub start_delay: f32,
    pub easing: Easing,
    /// Mirror back and forth forever instead of completing.
    pub yoyo: bool,
    elapsed: f32,
    completed: bool,
}

impl Tween {
    pub fn once(from: PoseKey, to: PoseKey, duration: f32, easing: Easing) -> Self {
        Self {
            from,
            to,
            duration,
            start_delay: 0.0,
            easing,
            yoyo: false,
            elapsed: 0.0,
            completed: false,
        }
    }

    pub fn yoyo(from: PoseKey, to: PoseKey, duration: f32, easing: Easing) -> Self {
        Self {
            yoyo: true,
            ..Self::once(from, to, duration, easing)
        }
    }

    pub fn with_start_delay(mut self, start_delay: f32) -> Self {
        self.start_delay = start_delay;
        self
    }

    pub fn completed(&self) -> bool {
        self.completed
    }

    /// Advances the clock and returns the pose to apply this frame, or
    /// `None` while waiting out the start delay or after completion.
    pub fn advance(&mut self, delta: f32) -> Option<PoseKey> {
        if self.completed {
            return None;
        }

        self.elapsed += delta;
        if self.elapsed < self.start_delay {
            return None;
        }

        let played = self.elapsed - self.start_delay;
        if self.yoyo {
            // Triangle-wave the clock so the pose mirrors back and forth.
            let cycle = played / self.duration;
            let phase = cycle.fract();
            let t = if (cycle as u32) % 2 == 0 {
                phase
            } else {
                1.0 - phase
            };
            return Some(PoseKey::lerp(self.from, self.to, self.easing.sample(t)));
        }

        if played >= self.duration {
            self.completed = true;
            return Some(self.to);
        }

        let t = self.easing.sample(played / self.duration);
        Some(PoseKey::lerp(self.from, self.to, t))
    }
}

pub fn tween_system(time: Res<Time>, mut query_tweens: Query<(&mut Tween, &mut Transform)>) {
    let delta = time.delta_secs();
    for (mut tween, mut transform) in query_tweens.iter_mut() {
        if let Some(pose) = tween.advance(delta) {
            pose.apply(&mut transform);
        }
    }
}

pub struct TweenPlugin;

impl Plugin for TweenPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, tween_system);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn easings_hit_their_endpoints() {
        let easings = [
            Easing::Linear,
            Easing::SineInOut,
            Easing::PowerOut(2.0),
            Easing::ExpoOut,
            Easing::BackOut(1.4),
            Easing::ElasticOut {
                amplitude: 1.0,
                period: 0.5,
            },
        ];
        for easing in easings {
            assert!(easing.sample(0.0).abs() < 1e-3, "{easing:?} f(0)");
            assert!((easing.sample(1.0) - 1.0).abs() < 1e-3, "{easing:?} f(1)");
        }
    }

    #[test]
    fn back_out_overshoots_past_one() {
        let easing = Easing::BackOut(1.7);
        let overshoot = (1..100)
            .map(|i| easing.sample(i as f32 / 100.0))
            .fold(f32::MIN, f32::max);
        assert!(overshoot > 1.0);
    }

    #[test]
    fn elastic_out_oscillates_around_one() {
        let easing = Easing::ElasticOut {
            amplitude: 1.0,
            period: 0.5,
        };
        let samples: Vec<f32> = (1..200).map(|i| easing.sample(i as f32 / 200.0)).collect();
        assert!(samples.iter().any(|&v| v > 1.0));
        assert!(samples.iter().any(|&v| v < 1.0));
    }

    fn pose(x: f32) -> PoseKey {
        PoseKey::new(Vec2::new(x, 0.0), 0.0, Vec2::ONE)
    }

    #[test]
    fn tween_waits_out_its_start_delay() {
        let mut tween = Tween::once(pose(0.0), pose(10.0), 1.0, Easing::Linear).with_start_delay(0.5);
        assert!(tween.advance(0.25).is_none());
        assert!(tween.advance(0.2).is_none());
        let p = tween.advance(0.15).expect("past the delay");
        assert!((p.translation.x - 1.0).abs() < 1e-4);
    }

    #[test]
    fn tween_completes_exactly_on_its_target() {
        let mut tween = Tween::once(pose(0.0), pose(10.0), 1.0, Easing::ExpoOut);
        let mut last = pose(0.0);
        for _ in 0..20 {
            if let Some(p) = tween.advance(0.1) {
                last = p;
            }
        }
        assert!(tween.completed());
        assert_eq!(last.translation.x, 10.0);
        assert!(tween.advance(0.1).is_none());
    }

    #[test]
    fn yoyo_tween_mirrors_and_never_completes() {
        let mut tween = Tween::yoyo(pose(-1.0), pose(1.0), 0.6, Easing::SineInOut);
        let forward = tween.advance(0.3).expect("mid first pass");
        assert!(forward.translation.x.abs() < 1e-3);
        let peak = tween.advance(0.3).expect("end of first pass");
        assert!((peak.translation.x - 1.0).abs() < 1e-3);
        let back = tween.advance(0.6).expect("end of mirrored pass");
        assert!((back.translation.x - -1.0).abs() < 1e-3);
        assert!(!tween.completed());
    }
}
