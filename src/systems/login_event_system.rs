use bevy::prelude::EventReader;

use crate::events::LoginEvent;

/// Acknowledges submit requests. There is no backend; the screen is
/// purely decorative.
pub fn login_event_system(mut login_events: EventReader<LoginEvent>) {
    for event in login_events.read() {
        let LoginEvent::Login { username, .. } = event;
        log::info!("login submitted for {username}, nothing to do without a backend");
    }
}
