//! Creature scene components and the fixed shape tables behind them.
//!
//! All geometry below is authored in the stage's top-left coordinate
//! space (x right, y down, like the design mockups) and converted into
//! Bevy's centered y-up space by [`local_position`].

use bevy::prelude::{Color, Component, Transform, Vec2};
use enum_map::Enum;

use crate::signals::{FaceExpression, OrangeEye, OrangeMouth};

pub const STAGE_SIZE: Vec2 = Vec2::new(820.0, 660.0);
pub const STAGE_FLOOR_Y: f32 = 600.0;

pub const PURPLE_BODY: Color = Color::srgb(0.404, 0.165, 0.980);
pub const BLACK_BODY: Color = Color::srgb(0.106, 0.114, 0.129);
pub const YELLOW_BODY: Color = Color::srgb(1.0, 0.835, 0.0);
pub const ORANGE_BODY: Color = Color::srgb(0.941, 0.627, 0.149);
pub const LINE_COLOR: Color = Color::srgb(0.333, 0.333, 0.333);
pub const SCLERA_COLOR: Color = Color::WHITE;
pub const PUPIL_COLOR: Color = Color::BLACK;
pub const MOUTH_DARK: Color = Color::srgb(0.133, 0.133, 0.133);
pub const MOUTH_LIGHT: Color = Color::WHITE;

/// The four creatures, in stage stacking order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Enum)]
pub enum CreatureKind {
    Purple,
    Black,
    Yellow,
    Orange,
}

impl CreatureKind {
    /// Body rectangle in stage space: (left, top, width, height).
    pub fn body_rect(self) -> (f32, f32, Vec2) {
        match self {
            CreatureKind::Purple => (240.0, 50.0, Vec2::new(220.0, 550.0)),
            CreatureKind::Black => (410.0, 190.0, Vec2::new(130.0, 410.0)),
            CreatureKind::Yellow => (504.0, 290.0, Vec2::new(190.0, 310.0)),
            CreatureKind::Orange => (10.0, 340.0, Vec2::new(460.0, 260.0)),
        }
    }

    /// Stacking layer, mirroring the mockup's z-index values.
    pub fn z_layer(self) -> f32 {
        match self {
            CreatureKind::Purple => 1.0,
            CreatureKind::Black => 3.0,
            CreatureKind::Yellow => 4.0,
            CreatureKind::Orange => 7.0,
        }
    }

    pub fn body_color(self) -> Color {
        match self {
            CreatureKind::Purple => PURPLE_BODY,
            CreatureKind::Black => BLACK_BODY,
            CreatureKind::Yellow => YELLOW_BODY,
            CreatureKind::Orange => ORANGE_BODY,
        }
    }
}

/// Root of the whole creature group. The focus shift and the button-hover
/// tilt are applied here.
#[derive(Component)]
pub struct Stage;

/// One creature body. `kind` selects every per-creature table.
#[derive(Component)]
pub struct CreatureBody {
    pub kind: CreatureKind,
}

/// The pose a body returns to when nothing is focused. Captured at spawn
/// so lean targets can be derived from it instead of from whatever pose an
/// interrupted tween left behind.
#[derive(Component, Copy, Clone)]
pub struct RestPose(pub Transform);

/// Marker for bodies that lean toward the focused field.
#[derive(Component)]
pub struct BodyLean;

/// Rotating carrier for a pupil. The pupil itself is a child translated
/// `orbit` pixels from the eye center; rotating the carrier to the gaze
/// angle swings the pupil toward the pointer.
#[derive(Component)]
pub struct GazePupil {
    pub orbit: f32,
}

/// A creature's mouth. The expression systems swap its mesh and transform
/// from the tables below.
#[derive(Component)]
pub struct Mouth {
    pub kind: CreatureKind,
}

/// One of the orange creature's prespawned eye variants; visibility is
/// toggled so exactly one variant shows at a time.
#[derive(Component)]
pub struct OrangeEyeShape {
    pub variant: OrangeEye,
}

/// Ground line under one creature.
#[derive(Component)]
pub struct GroundLine {
    pub kind: CreatureKind,
}

/// Converts a (left, top, size) child rectangle in a parent of
/// `parent_size` from top-left y-down space to centered y-up local
/// coordinates.
pub fn local_position(parent_size: Vec2, left: f32, top: f32, size: Vec2) -> Vec2 {
    Vec2::new(
        left + size.x / 2.0 - parent_size.x / 2.0,
        parent_size.y / 2.0 - (top + size.y / 2.0),
    )
}

/// Geometric form of a mouth, with its authored dimensions.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum MouthForm {
    /// Fully-rounded horizontal pill.
    Pill(Vec2),
    Disc(f32),
    Oval(Vec2),
    Triangle(Vec2),
}

impl MouthForm {
    pub fn size(self) -> Vec2 {
        match self {
            MouthForm::Pill(size) | MouthForm::Oval(size) | MouthForm::Triangle(size) => size,
            MouthForm::Disc(diameter) => Vec2::splat(diameter),
        }
    }
}

/// Everything needed to place one mouth variant: form, stage-space
/// (left, top) inside the body, and the scale applied on top (negative y
/// flips a smile into a frown).
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct MouthShape {
    pub form: MouthForm,
    pub left: f32,
    pub top: f32,
    pub scale: Vec2,
}

impl MouthShape {
    const fn pill(left: f32, top: f32, w: f32, h: f32, scale_x: f32, scale_y: f32) -> Self {
        Self {
            form: MouthForm::Pill(Vec2::new(w, h)),
            left,
            top,
            scale: Vec2::new(scale_x, scale_y),
        }
    }

    /// Local transform for this shape inside a body of `parent_size`,
    /// layered just above the body surface.
    pub fn transform(self, parent_size: Vec2) -> Transform {
        let pos = local_position(parent_size, self.left, self.top, self.form.size());
        Transform::from_xyz(pos.x, pos.y, 0.2).with_scale(self.scale.extend(1.0))
    }
}

fn purple_mouth(expression: FaceExpression) -> MouthShape {
    match expression {
        FaceExpression::Happy => MouthShape::pill(94.0, 60.0, 30.0, 8.0, 1.0, 1.1),
        FaceExpression::Sad => MouthShape::pill(94.0, 60.0, 30.0, 8.0, 1.0, -1.2),
        FaceExpression::Wow => MouthShape {
            form: MouthForm::Disc(24.0),
            left: 98.0,
            top: 58.0,
            scale: Vec2::ONE,
        },
        FaceExpression::Shocked => MouthShape {
            form: MouthForm::Oval(Vec2::new(28.0, 32.0)),
            left: 96.0,
            top: 56.0,
            scale: Vec2::ONE,
        },
        FaceExpression::Awful => MouthShape::pill(94.0, 60.0, 35.0, 6.0, 1.3, -1.4),
        FaceExpression::Neutral => MouthShape::pill(94.0, 60.0, 30.0, 8.0, 1.0, 0.9),
    }
}

fn black_mouth(expression: FaceExpression) -> MouthShape {
    match expression {
        FaceExpression::Happy => MouthShape::pill(56.0, 54.0, 28.0, 10.0, 1.0, 1.1),
        FaceExpression::Sad => MouthShape::pill(56.0, 54.0, 28.0, 10.0, 1.0, -1.1),
        FaceExpression::Wow => MouthShape {
            form: MouthForm::Disc(20.0),
            left: 60.0,
            top: 52.0,
            scale: Vec2::ONE,
        },
        _ => MouthShape::pill(56.0, 54.0, 28.0, 10.0, 1.0, 0.9),
    }
}

fn orange_mouth(mouth: OrangeMouth) -> MouthShape {
    match mouth {
        OrangeMouth::Round => MouthShape {
            form: MouthForm::Disc(32.0),
            left: 115.0,
            top: 116.0,
            scale: Vec2::ONE,
        },
        OrangeMouth::Bar => MouthShape::pill(110.0, 120.0, 42.0, 14.0, 1.0, 1.0),
        OrangeMouth::Sad => MouthShape::pill(110.0, 120.0, 42.0, 14.0, 1.0, -1.1),
        OrangeMouth::Happy => MouthShape::pill(110.0, 120.0, 42.0, 14.0, 1.0, 1.3),
        OrangeMouth::Triangle => MouthShape {
            form: MouthForm::Triangle(Vec2::new(32.0, 20.0)),
            left: 125.0,
            top: 116.0,
            scale: Vec2::ONE,
        },
        OrangeMouth::Wow => MouthShape {
            form: MouthForm::Oval(Vec2::new(28.0, 36.0)),
            left: 117.0,
            top: 114.0,
            scale: Vec2::ONE,
        },
    }
}

/// The yellow creature's mouth never changes form, only rotation.
pub const YELLOW_MOUTH_BAR: MouthShape = MouthShape {
    form: MouthForm::Pill(Vec2::new(84.0, 8.0)),
    left: -8.0,
    top: 66.0,
    scale: Vec2::ONE,
};

/// Table-driven mouth lookup for the creatures whose mouth tracks the
/// expression tuple.
pub fn mouth_descriptor(kind: CreatureKind, expressions: &crate::signals::CreatureExpressions) -> MouthShape {
    match kind {
        CreatureKind::Purple => purple_mouth(expressions.purple),
        CreatureKind::Black => black_mouth(expressions.black),
        CreatureKind::Yellow => YELLOW_MOUTH_BAR,
        CreatureKind::Orange => orange_mouth(expressions.orange_mouth),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signals::CreatureExpressions;

    #[test]
    fn local_position_centers_children() {
        let parent = Vec2::new(100.0, 200.0);
        // A child filling the parent sits at the origin.
        assert_eq!(
            local_position(parent, 0.0, 0.0, parent),
            Vec2::ZERO
        );
        // Top-left corner child lands in the upper-left quadrant.
        let pos = local_position(parent, 0.0, 0.0, Vec2::new(10.0, 10.0));
        assert!(pos.x < 0.0 && pos.y > 0.0);
    }

    #[test]
    fn sad_mouths_flip_vertically() {
        let mut expressions = CreatureExpressions::default();
        expressions.purple = crate::signals::FaceExpression::Sad;
        let shape = mouth_descriptor(CreatureKind::Purple, &expressions);
        assert!(shape.scale.y < 0.0);
    }

    #[test]
    fn unmapped_black_expressions_fall_back_to_neutral() {
        let mut expressions = CreatureExpressions::default();
        expressions.black = crate::signals::FaceExpression::Awful;
        let awful = mouth_descriptor(CreatureKind::Black, &expressions);
        expressions.black = crate::signals::FaceExpression::Neutral;
        let neutral = mouth_descriptor(CreatureKind::Black, &expressions);
        assert_eq!(awful, neutral);
    }

    #[test]
    fn bodies_stand_on_the_floor_line() {
        for kind in [
            CreatureKind::Purple,
            CreatureKind::Black,
            CreatureKind::Yellow,
            CreatureKind::Orange,
        ] {
            let (_, top, size) = kind.body_rect();
            assert_eq!(top + size.y, STAGE_FLOOR_Y);
        }
    }
}
