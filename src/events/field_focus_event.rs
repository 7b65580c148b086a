use bevy::prelude::Event;

/// The two form fields the creatures react to.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TrackedField {
    Email,
    Password,
}

/// Focus transition on a tracked field. Sent by the login UI the frame
/// the transition happens; consumed by the gaze and pose systems.
#[derive(Event, Copy, Clone, Debug, PartialEq, Eq)]
pub enum FieldFocusEvent {
    Gained(TrackedField),
    Lost(TrackedField),
}
