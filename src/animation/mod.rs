pub mod tween;

pub use tween::{
    tween_system, Easing, PoseKey, Tween, TweenPlugin, BUTTON_TILT_DEG, FOCUS_LEAN_RETURN_SECS,
    FOCUS_LEAN_SECS,
};
