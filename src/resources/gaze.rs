use bevy::prelude::Resource;

use crate::signals::{GazePolicy, RESTING_GAZE_DEG};

/// Active pointer-to-gaze mapping policy, selected by configuration.
#[derive(Resource, Default, Copy, Clone, Debug)]
pub struct GazeSettings {
    pub policy: GazePolicy,
}

/// The display parameters every creature eye consumes.
#[derive(Resource, Copy, Clone, Debug)]
pub struct GazeState {
    /// Current gaze angle in degrees.
    pub angle_deg: f32,
    /// True while the password field holds focus and the creatures look
    /// away from the pointer.
    pub averted: bool,
    /// Horizontal displacement of the whole stage.
    pub shift_x: f32,
    /// True while the submit button is hovered; tilts the stage.
    pub look_at_button: bool,
}

impl Default for GazeState {
    fn default() -> Self {
        Self {
            angle_deg: RESTING_GAZE_DEG,
            averted: false,
            shift_x: 0.0,
            look_at_button: false,
        }
    }
}
