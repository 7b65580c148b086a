mod field_focus_event;
mod login_event;

pub use field_focus_event::{FieldFocusEvent, TrackedField};
pub use login_event::LoginEvent;
