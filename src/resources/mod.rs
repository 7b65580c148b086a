mod animation_settings;
mod expression_state;
mod gaze;
mod login_form;

pub use animation_settings::AnimationSettings;
pub use expression_state::ExpressionState;
pub use gaze::{GazeSettings, GazeState};
pub use login_form::{LoginFormState, PupilIndicatorState};
