use bevy::math::Vec2;
use bevy::prelude::Resource;

use crate::signals::{EllipseBounds, FocusState};

/// Form state the login UI publishes each frame. Credentials never leave
/// this resource; they are dropped with the world.
#[derive(Resource, Default, Clone, Debug)]
pub struct LoginFormState {
    pub email: String,
    pub password: String,
    pub show_password: bool,
    pub remember: bool,
    pub focus: FocusState,
    /// Set once either tracked field has held focus; until then the
    /// creatures keep their startup expressions.
    pub touched: bool,
    /// True while the submit button is hovered.
    pub submit_hovered: bool,
    /// Blur-time validity snapshot of the password field: set when the
    /// field loses focus with content shorter than the acceptable
    /// boundary, cleared when it becomes acceptable or is emptied.
    pub password_invalid: bool,
}

impl LoginFormState {
    pub fn password_len(&self) -> usize {
        self.password.chars().count()
    }
}

/// The show-password eye glyph's tracked pupil: glyph center in screen
/// coordinates (written by the UI each frame it is drawn), ellipse
/// interior bounds, and the offset computed from the latest pointer
/// sample.
#[derive(Resource, Clone, Debug)]
pub struct PupilIndicatorState {
    pub center: Vec2,
    pub bounds: EllipseBounds,
    pub offset: Vec2,
    /// Radius the pupil is drawn with.
    pub display_radius: f32,
    /// False until the glyph has been laid out once; offsets are not
    /// computed against a default center.
    pub visible: bool,
}

impl Default for PupilIndicatorState {
    fn default() -> Self {
        Self {
            center: Vec2::ZERO,
            bounds: EllipseBounds::default(),
            offset: Vec2::ZERO,
            display_radius: 3.0,
            visible: false,
        }
    }
}
