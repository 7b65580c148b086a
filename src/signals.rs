//! Pure signal derivation for the creature scene.
//!
//! Everything in this module maps raw input samples (pointer position,
//! field focus, password content) onto the small set of display parameters
//! the presentational systems consume: a gaze angle in degrees, a pupil
//! offset for the password eye glyph, and per-creature expression tags.
//! No ECS types, no side effects.

use bevy::math::Vec2;
use enum_map::Enum;
use serde::{Deserialize, Serialize};

/// Gaze angle applied when no tracking condition is active.
pub const RESTING_GAZE_DEG: f32 = 215.0;

/// Gaze angle forced while the password field holds focus or fails
/// validation. The creatures politely look away.
pub const AVERTED_GAZE_DEG: f32 = 100.0;

/// Horizontal displacement of the creature group while the password
/// field is focused.
pub const FOCUS_SHIFT_X: f32 = 30.0;

/// Which tracked form field currently holds focus. At most one.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum FocusState {
    #[default]
    None,
    Email,
    Password,
}

/// Pointer-to-gaze mapping policy. Both observed variants are supported;
/// the active one is chosen by configuration.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum GazePolicy {
    /// Angle of the pointer around an anchor point biased toward where
    /// the creatures sit, expressed as viewport fractions.
    Radial { anchor_x: f32, anchor_y: f32 },
    /// Horizontal-only mapping: pointer x clamped into a sub-region of
    /// the viewport and interpolated onto `resting ± span` degrees.
    ClampedHorizontal {
        region_width: f32,
        clamp_min: f32,
        clamp_max: f32,
        span_deg: f32,
    },
}

impl Default for GazePolicy {
    fn default() -> Self {
        GazePolicy::Radial {
            anchor_x: 0.33,
            anchor_y: 0.5,
        }
    }
}

/// Radial pointer-to-gaze mapping. The sign flip and 180 degree offset
/// line the neutral forward-facing direction up with the resting value.
pub fn radial_gaze_deg(pointer: Vec2, anchor: Vec2) -> f32 {
    let rad = (pointer.y - anchor.y).atan2(pointer.x - anchor.x);
    -rad.to_degrees() + 180.0
}

/// Clamped horizontal pointer-to-gaze mapping. `region_width` is the
/// fraction of the viewport the creatures occupy; pointer x is clamped
/// into `[clamp_min, clamp_max]` of that sub-region and interpolated
/// between `resting - span` and `resting + span`.
pub fn clamped_horizontal_gaze_deg(
    pointer_x: f32,
    viewport_width: f32,
    region_width: f32,
    clamp_min: f32,
    clamp_max: f32,
    span_deg: f32,
) -> f32 {
    let width = viewport_width * region_width;
    let x = pointer_x.clamp(width * clamp_min, width * clamp_max);
    let center = width / 2.0;
    RESTING_GAZE_DEG + ((x - center) / (width / 2.0)) * span_deg
}

/// Applies the configured mapping policy to one pointer sample.
pub fn gaze_for_pointer(policy: GazePolicy, pointer: Vec2, viewport: Vec2) -> f32 {
    match policy {
        GazePolicy::Radial { anchor_x, anchor_y } => radial_gaze_deg(
            pointer,
            Vec2::new(viewport.x * anchor_x, viewport.y * anchor_y),
        ),
        GazePolicy::ClampedHorizontal {
            region_width,
            clamp_min,
            clamp_max,
            span_deg,
        } => clamped_horizontal_gaze_deg(
            pointer.x,
            viewport.x,
            region_width,
            clamp_min,
            clamp_max,
            span_deg,
        ),
    }
}

/// Pointer tracking is suppressed while the password field is focused OR
/// currently failing validation. Both conditions avert the gaze.
pub fn gaze_suppressed(focus: FocusState, password_invalid: bool) -> bool {
    focus == FocusState::Password || password_invalid
}

/// Usable interior of the password eye glyph.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct EllipseBounds {
    pub rx: f32,
    pub ry: f32,
    /// Stroke width allowance.
    pub margin: f32,
    /// Radius reserved for the pupil itself.
    pub pupil_radius: f32,
}

impl Default for EllipseBounds {
    fn default() -> Self {
        Self {
            rx: 7.8,
            ry: 4.8,
            margin: 0.1,
            pupil_radius: 0.1,
        }
    }
}

impl EllipseBounds {
    /// Maximum radius along `angle` that stays inside the ellipse.
    pub fn max_radius(&self, angle: f32) -> f32 {
        let (sin, cos) = angle.sin_cos();
        (self.rx * self.ry) / ((self.ry * cos).powi(2) + (self.rx * sin).powi(2)).sqrt()
    }
}

/// Offset placing the pupil on the line toward `pointer`, guaranteed to
/// stay inside the glyph interior regardless of pointer angle.
pub fn pupil_offset(pointer: Vec2, center: Vec2, bounds: EllipseBounds) -> Vec2 {
    let delta = pointer - center;
    let angle = delta.y.atan2(delta.x);
    let r = (bounds.max_radius(angle) - (bounds.margin + bounds.pupil_radius)).max(0.0);
    Vec2::new(r * angle.cos(), r * angle.sin())
}

/// Face expression shared by the purple and black creatures.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Enum, Serialize, Deserialize)]
pub enum FaceExpression {
    #[default]
    Neutral,
    Happy,
    Sad,
    Wow,
    Shocked,
    Awful,
}

/// Mouth variant of the yellow creature (a rotating bar).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Enum, Serialize, Deserialize)]
pub enum YellowMouth {
    #[default]
    Bar,
    Wave,
    Vertical,
}

/// Mouth variant of the orange creature.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Enum, Serialize, Deserialize)]
pub enum OrangeMouth {
    Round,
    #[default]
    Bar,
    Sad,
    Happy,
    Triangle,
    Wow,
}

/// Eye variant of the orange creature.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Enum, Serialize, Deserialize)]
pub enum OrangeEye {
    #[default]
    Round,
    Closed,
    Smiling,
}

/// The full expression tuple the renderer consumes.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct CreatureExpressions {
    pub purple: FaceExpression,
    pub black: FaceExpression,
    pub yellow_mouth: YellowMouth,
    pub orange_mouth: OrangeMouth,
    pub orange_eye: OrangeEye,
}

impl CreatureExpressions {
    /// Startup tuple shown before either field has been touched. The
    /// blur rows of the decision table only apply once the form has been
    /// interacted with.
    pub const fn pristine() -> Self {
        Self {
            purple: FaceExpression::Neutral,
            black: FaceExpression::Neutral,
            yellow_mouth: YellowMouth::Bar,
            orange_mouth: OrangeMouth::Happy,
            orange_eye: OrangeEye::Round,
        }
    }
}

/// Password length at which the creatures approve while typing.
pub const STRONG_PASSWORD_LEN: usize = 8;

/// Password length accepted at blur time.
pub const ACCEPTABLE_PASSWORD_LEN: usize = 3;

/// Expression decision table keyed by focus state, password content
/// length, and blur-time validity. Pure: identical inputs always produce
/// the identical tuple.
pub fn derive_expressions(
    focus: FocusState,
    password_len: usize,
    blur_valid: bool,
) -> CreatureExpressions {
    match focus {
        FocusState::Password if password_len >= STRONG_PASSWORD_LEN => CreatureExpressions {
            purple: FaceExpression::Neutral,
            black: FaceExpression::Happy,
            yellow_mouth: YellowMouth::Bar,
            orange_mouth: OrangeMouth::Happy,
            orange_eye: OrangeEye::Smiling,
        },
        FocusState::Password => CreatureExpressions {
            purple: FaceExpression::Sad,
            black: FaceExpression::Neutral,
            yellow_mouth: YellowMouth::Wave,
            orange_mouth: OrangeMouth::Sad,
            orange_eye: OrangeEye::Round,
        },
        FocusState::Email => CreatureExpressions {
            purple: FaceExpression::Neutral,
            black: FaceExpression::Neutral,
            yellow_mouth: YellowMouth::Bar,
            orange_mouth: OrangeMouth::Happy,
            orange_eye: OrangeEye::Round,
        },
        FocusState::None if blur_valid => CreatureExpressions {
            purple: FaceExpression::Neutral,
            black: FaceExpression::Neutral,
            yellow_mouth: YellowMouth::Bar,
            orange_mouth: OrangeMouth::Happy,
            orange_eye: OrangeEye::Smiling,
        },
        FocusState::None => CreatureExpressions {
            purple: FaceExpression::Sad,
            black: FaceExpression::Neutral,
            yellow_mouth: YellowMouth::Bar,
            orange_mouth: OrangeMouth::Sad,
            orange_eye: OrangeEye::Round,
        },
    }
}

/// Blur-time password validity: empty or shorter than the acceptable
/// boundary counts as invalid.
pub fn password_blur_valid(password_len: usize) -> bool {
    password_len >= ACCEPTABLE_PASSWORD_LEN
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn radial_mapping_matches_reference_formula() {
        let anchor = Vec2::new(1920.0 * 0.33, 1080.0 * 0.5);
        let samples = [
            Vec2::new(0.0, 0.0),
            Vec2::new(1920.0, 1080.0),
            Vec2::new(633.6, 540.0),
            Vec2::new(700.0, 200.0),
            Vec2::new(50.0, 1000.0),
        ];
        for pointer in samples {
            let expected =
                (pointer.y - anchor.y).atan2(pointer.x - anchor.x).to_degrees() * -1.0 + 180.0;
            assert!(approx_eq(radial_gaze_deg(pointer, anchor), expected));
        }
    }

    #[test]
    fn radial_mapping_rests_forward_for_pointer_right_of_anchor() {
        // Pointer level with the anchor, to its right: atan2 = 0, so the
        // mapped angle is exactly the 180 degree offset.
        let anchor = Vec2::new(100.0, 100.0);
        assert!(approx_eq(
            radial_gaze_deg(Vec2::new(500.0, 100.0), anchor),
            180.0
        ));
    }

    #[test]
    fn clamped_horizontal_pins_to_edges_and_center() {
        let vw = 1000.0;
        // Sub-region is 650 wide; clamp range is [65, 617.5].
        let at = |x: f32| clamped_horizontal_gaze_deg(x, vw, 0.65, 0.10, 0.95, 70.0);
        assert!(approx_eq(at(325.0), RESTING_GAZE_DEG));
        // Values at and beyond the clamp edges are identical.
        assert!(approx_eq(at(65.0), at(-500.0)));
        assert!(approx_eq(at(617.5), at(5000.0)));
        // Edge angles sit at resting +- span scaled by the clamp position.
        let left = at(0.0);
        let right = at(vw);
        assert!(left < RESTING_GAZE_DEG && right > RESTING_GAZE_DEG);
        assert!(right <= RESTING_GAZE_DEG + 70.0 + 1e-3);
        assert!(left >= RESTING_GAZE_DEG - 70.0 - 1e-3);
    }

    #[test]
    fn suppression_is_an_or_of_focus_and_validity() {
        assert!(gaze_suppressed(FocusState::Password, false));
        assert!(gaze_suppressed(FocusState::Password, true));
        assert!(gaze_suppressed(FocusState::None, true));
        assert!(gaze_suppressed(FocusState::Email, true));
        assert!(!gaze_suppressed(FocusState::None, false));
        assert!(!gaze_suppressed(FocusState::Email, false));
    }

    #[test]
    fn pupil_offset_never_leaves_the_ellipse_interior() {
        let bounds = EllipseBounds::default();
        let center = Vec2::new(15.0, 15.0);
        for i in 0..720 {
            let angle = (i as f32) * std::f32::consts::TAU / 720.0;
            let pointer = center + Vec2::new(angle.cos(), angle.sin()) * 500.0;
            let offset = pupil_offset(pointer, center, bounds);
            let r_max = bounds.max_radius(angle);
            assert!(
                offset.length() <= r_max - bounds.margin + 1e-4,
                "pupil escaped at angle {angle}: {} > {}",
                offset.length(),
                r_max - bounds.margin
            );
        }
    }

    #[test]
    fn pupil_offset_is_clamped_to_zero_for_degenerate_bounds() {
        let bounds = EllipseBounds {
            rx: 0.05,
            ry: 0.05,
            margin: 0.1,
            pupil_radius: 0.1,
        };
        let offset = pupil_offset(Vec2::new(100.0, 0.0), Vec2::ZERO, bounds);
        assert_eq!(offset, Vec2::ZERO);
    }

    #[test]
    fn expression_table_is_pure() {
        for focus in [FocusState::None, FocusState::Email, FocusState::Password] {
            for len in [0usize, 2, 7, 8, 20] {
                for valid in [false, true] {
                    assert_eq!(
                        derive_expressions(focus, len, valid),
                        derive_expressions(focus, len, valid)
                    );
                }
            }
        }
    }

    #[test]
    fn password_focused_empty_is_sad_wave_round() {
        let exp = derive_expressions(FocusState::Password, 0, false);
        assert_eq!(exp.purple, FaceExpression::Sad);
        assert_eq!(exp.black, FaceExpression::Neutral);
        assert_eq!(exp.yellow_mouth, YellowMouth::Wave);
        assert_eq!(exp.orange_eye, OrangeEye::Round);
    }

    #[test]
    fn weak_password_matches_empty_password_row() {
        assert_eq!(
            derive_expressions(FocusState::Password, 1, false),
            derive_expressions(FocusState::Password, 0, false)
        );
        assert_eq!(
            derive_expressions(FocusState::Password, 7, false),
            derive_expressions(FocusState::Password, 0, false)
        );
    }

    #[test]
    fn strong_password_turns_black_happy() {
        let exp = derive_expressions(FocusState::Password, 8, false);
        assert_eq!(exp.purple, FaceExpression::Neutral);
        assert_eq!(exp.black, FaceExpression::Happy);
        assert_eq!(exp.yellow_mouth, YellowMouth::Bar);
        assert_eq!(exp.orange_eye, OrangeEye::Smiling);
    }

    #[test]
    fn blur_with_short_password_is_sad() {
        let exp = derive_expressions(FocusState::None, 2, password_blur_valid(2));
        assert_eq!(exp.purple, FaceExpression::Sad);
        assert_eq!(exp.orange_eye, OrangeEye::Round);
    }

    #[test]
    fn blur_with_acceptable_password_relaxes() {
        let exp = derive_expressions(FocusState::None, 3, password_blur_valid(3));
        assert_eq!(exp.purple, FaceExpression::Neutral);
        assert_eq!(exp.orange_eye, OrangeEye::Smiling);
    }

    #[test]
    fn email_focus_is_neutral_with_round_eyes() {
        let exp = derive_expressions(FocusState::Email, 0, true);
        assert_eq!(exp.purple, FaceExpression::Neutral);
        assert_eq!(exp.black, FaceExpression::Neutral);
        assert_eq!(exp.yellow_mouth, YellowMouth::Bar);
        assert_eq!(exp.orange_eye, OrangeEye::Round);
    }
}
