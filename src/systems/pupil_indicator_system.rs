//! Keeps the show-password eye glyph's pupil inside its ellipse while it
//! chases the pointer. Pointer bursts within a frame coalesce: only the
//! final sample is applied, superseding any earlier ones.

use bevy::prelude::*;
use bevy::window::CursorMoved;

use crate::resources::PupilIndicatorState;
use crate::signals;

pub fn pupil_indicator_system(
    mut cursor_events: EventReader<CursorMoved>,
    mut indicator: ResMut<PupilIndicatorState>,
) {
    let Some(moved) = cursor_events.read().last() else {
        return;
    };
    if !indicator.visible {
        return;
    }
    let center = indicator.center;
    let bounds = indicator.bounds;
    indicator.offset = signals::pupil_offset(moved.position, center, bounds);
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::ecs::system::RunSystemOnce;

    fn send(world: &mut World, x: f32, y: f32) {
        let window = world.spawn_empty().id();
        world
            .resource_mut::<Events<CursorMoved>>()
            .write(CursorMoved {
                window,
                position: Vec2::new(x, y),
                delta: None,
            });
    }

    fn test_world() -> World {
        let mut world = World::new();
        world.init_resource::<Events<CursorMoved>>();
        world.insert_resource(PupilIndicatorState {
            center: Vec2::new(100.0, 100.0),
            visible: true,
            ..Default::default()
        });
        world
    }

    #[test]
    fn a_burst_applies_exactly_the_last_sample() {
        let mut world = test_world();
        for i in 0..10 {
            send(&mut world, 100.0 + i as f32 * 13.0, 100.0 - i as f32 * 7.0);
        }
        world
            .run_system_once(pupil_indicator_system)
            .expect("system ran");
        let indicator = world.resource::<PupilIndicatorState>();
        let expected = signals::pupil_offset(
            Vec2::new(100.0 + 9.0 * 13.0, 100.0 - 9.0 * 7.0),
            Vec2::new(100.0, 100.0),
            indicator.bounds,
        );
        assert_eq!(indicator.offset, expected);
    }

    #[test]
    fn no_samples_means_no_update() {
        let mut world = test_world();
        world
            .resource_mut::<PupilIndicatorState>()
            .offset = Vec2::new(1.0, 2.0);
        world
            .run_system_once(pupil_indicator_system)
            .expect("system ran");
        assert_eq!(
            world.resource::<PupilIndicatorState>().offset,
            Vec2::new(1.0, 2.0)
        );
    }

    #[test]
    fn hidden_glyph_ignores_pointer_traffic() {
        let mut world = test_world();
        world.resource_mut::<PupilIndicatorState>().visible = false;
        send(&mut world, 500.0, 500.0);
        world
            .run_system_once(pupil_indicator_system)
            .expect("system ran");
        assert_eq!(world.resource::<PupilIndicatorState>().offset, Vec2::ZERO);
    }
}
