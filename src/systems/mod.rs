mod creature_expression_system;
mod creature_pose_system;
mod creature_spawn_system;
mod entrance_system;
mod gaze_system;
mod login_event_system;
mod pupil_indicator_system;

pub use creature_expression_system::{creature_expression_system, expression_system};
pub use creature_pose_system::creature_pose_system;
pub use creature_spawn_system::{creature_spawn_system, CreatureAssets};
pub use entrance_system::entrance_system;
pub use gaze_system::gaze_system;
pub use login_event_system::login_event_system;
pub use pupil_indicator_system::pupil_indicator_system;
