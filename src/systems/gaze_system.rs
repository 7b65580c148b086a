//! Pointer-to-gaze tracking with password-field suppression.

use bevy::prelude::*;
use bevy::window::{CursorMoved, PrimaryWindow, Window};

use crate::events::{FieldFocusEvent, TrackedField};
use crate::resources::{GazeSettings, GazeState, LoginFormState};
use crate::signals::{
    self, AVERTED_GAZE_DEG, FOCUS_SHIFT_X, RESTING_GAZE_DEG,
};

pub fn gaze_system(
    mut cursor_events: EventReader<CursorMoved>,
    mut focus_events: EventReader<FieldFocusEvent>,
    form_state: Res<LoginFormState>,
    settings: Res<GazeSettings>,
    mut gaze: ResMut<GazeState>,
    query_window: Query<&Window, With<PrimaryWindow>>,
) {
    for event in focus_events.read() {
        match event {
            FieldFocusEvent::Gained(TrackedField::Password) => {
                gaze.averted = true;
                gaze.angle_deg = AVERTED_GAZE_DEG;
                gaze.shift_x = FOCUS_SHIFT_X;
            }
            FieldFocusEvent::Lost(TrackedField::Password) => {
                // Unconditional reset to resting, exactly once per blur.
                gaze.averted = false;
                gaze.angle_deg = RESTING_GAZE_DEG;
                gaze.shift_x = 0.0;
            }
            // Both tracked fields share the blur-to-resting behavior; the
            // next pointer sample re-aims immediately.
            FieldFocusEvent::Lost(TrackedField::Email) => {
                gaze.angle_deg = RESTING_GAZE_DEG;
            }
            _ => {}
        }
    }

    if gaze.look_at_button != form_state.submit_hovered {
        gaze.look_at_button = form_state.submit_hovered;
    }

    if signals::gaze_suppressed(form_state.focus, form_state.password_invalid) {
        // Pointer samples are dropped, not deferred.
        cursor_events.clear();
        return;
    }

    let Some(moved) = cursor_events.read().last() else {
        return;
    };
    let Ok(window) = query_window.get_single() else {
        return;
    };
    gaze.angle_deg = signals::gaze_for_pointer(
        settings.policy,
        moved.position,
        Vec2::new(window.width(), window.height()),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signals::GazePolicy;
    use bevy::ecs::system::RunSystemOnce;

    fn test_world() -> World {
        let mut world = World::new();
        world.init_resource::<Events<CursorMoved>>();
        world.init_resource::<Events<FieldFocusEvent>>();
        world.init_resource::<LoginFormState>();
        world.init_resource::<GazeState>();
        world.insert_resource(GazeSettings {
            policy: GazePolicy::Radial {
                anchor_x: 0.33,
                anchor_y: 0.5,
            },
        });
        let window = Window {
            resolution: bevy::window::WindowResolution::new(1000.0, 800.0),
            ..Default::default()
        };
        world.spawn((window, PrimaryWindow));
        world
    }

    fn send_cursor(world: &mut World, x: f32, y: f32) {
        let window = world
            .query_filtered::<Entity, With<PrimaryWindow>>()
            .single(world)
            .expect("primary window");
        world.resource_mut::<Events<CursorMoved>>().write(CursorMoved {
            window,
            position: Vec2::new(x, y),
            delta: None,
        });
    }

    #[test]
    fn pointer_moves_update_gaze_when_unfocused() {
        let mut world = test_world();
        send_cursor(&mut world, 900.0, 400.0);
        world.run_system_once(gaze_system).expect("system ran");
        let gaze = world.resource::<GazeState>();
        let expected = signals::radial_gaze_deg(
            Vec2::new(900.0, 400.0),
            Vec2::new(330.0, 400.0),
        );
        assert!((gaze.angle_deg - expected).abs() < 1e-4);
    }

    #[test]
    fn bursts_collapse_to_the_last_sample() {
        let mut world = test_world();
        for i in 0..10 {
            send_cursor(&mut world, 100.0 + i as f32 * 50.0, 300.0);
        }
        world.run_system_once(gaze_system).expect("system ran");
        let gaze = world.resource::<GazeState>();
        let expected = signals::radial_gaze_deg(
            Vec2::new(550.0, 300.0),
            Vec2::new(330.0, 400.0),
        );
        assert!((gaze.angle_deg - expected).abs() < 1e-4);
    }

    #[test]
    fn password_focus_averts_and_suppresses_pointer() {
        let mut world = test_world();
        world
            .resource_mut::<Events<FieldFocusEvent>>()
            .write(FieldFocusEvent::Gained(TrackedField::Password));
        world.resource_mut::<LoginFormState>().focus =
            crate::signals::FocusState::Password;
        send_cursor(&mut world, 900.0, 100.0);
        world.run_system_once(gaze_system).expect("system ran");
        let gaze = world.resource::<GazeState>();
        assert_eq!(gaze.angle_deg, AVERTED_GAZE_DEG);
        assert!(gaze.averted);
        assert_eq!(gaze.shift_x, FOCUS_SHIFT_X);

        // Further pointer traffic while focused changes nothing.
        send_cursor(&mut world, 20.0, 700.0);
        world.run_system_once(gaze_system).expect("system ran");
        assert_eq!(world.resource::<GazeState>().angle_deg, AVERTED_GAZE_DEG);
    }

    #[test]
    fn password_blur_resets_to_resting_once() {
        let mut world = test_world();
        {
            let mut form = world.resource_mut::<LoginFormState>();
            form.focus = crate::signals::FocusState::Password;
        }
        world
            .resource_mut::<Events<FieldFocusEvent>>()
            .write(FieldFocusEvent::Gained(TrackedField::Password));
        world.run_system_once(gaze_system).expect("system ran");

        {
            let mut form = world.resource_mut::<LoginFormState>();
            form.focus = crate::signals::FocusState::None;
        }
        world
            .resource_mut::<Events<FieldFocusEvent>>()
            .write(FieldFocusEvent::Lost(TrackedField::Password));
        world.run_system_once(gaze_system).expect("system ran");
        let gaze = world.resource::<GazeState>();
        assert_eq!(gaze.angle_deg, RESTING_GAZE_DEG);
        assert!(!gaze.averted);
        assert_eq!(gaze.shift_x, 0.0);

        // Tracking resumes afterwards.
        send_cursor(&mut world, 330.0, 0.0);
        world.run_system_once(gaze_system).expect("system ran");
        assert_ne!(world.resource::<GazeState>().angle_deg, RESTING_GAZE_DEG);
    }

    #[test]
    fn invalid_password_suppresses_even_when_blurred() {
        let mut world = test_world();
        {
            let mut form = world.resource_mut::<LoginFormState>();
            form.password = "ab".into();
            form.password_invalid = true;
        }
        send_cursor(&mut world, 900.0, 100.0);
        world.run_system_once(gaze_system).expect("system ran");
        assert_eq!(
            world.resource::<GazeState>().angle_deg,
            RESTING_GAZE_DEG,
            "suppressed pointer must not steer the gaze"
        );
    }
}
