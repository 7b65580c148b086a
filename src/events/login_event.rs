use bevy::prelude::Event;

/// Submit request from the login form. There is no backend; the handler
/// only acknowledges it.
#[derive(Event)]
pub enum LoginEvent {
    Login { username: String, password: String },
}
