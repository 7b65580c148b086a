//! Entrance choreography: each creature tumbles in from off stage and
//! settles into its rest pose, then the ground lines grow in underneath.

use bevy::prelude::*;

use crate::animation::{Easing, PoseKey, Tween};
use crate::components::{CreatureBody, CreatureKind, GroundLine, RestPose};
use crate::resources::AnimationSettings;

/// Per-creature entrance keyframe: offset from the rest position, spin,
/// squashed starting scale, duration, easing, start delay.
fn entrance_key(kind: CreatureKind) -> (Vec2, f32, Vec2, f32, Easing, f32) {
    match kind {
        // Drops in from high above with a half spin.
        CreatureKind::Black => (
            Vec2::new(170.0, 850.0),
            -180.0,
            Vec2::new(0.692, 0.110),
            2.2,
            Easing::ElasticOut {
                amplitude: 1.0,
                period: 0.5,
            },
            0.0,
        ),
        CreatureKind::Purple => (
            Vec2::new(-120.0, 40.0),
            45.0,
            Vec2::new(0.636, 0.255),
            2.0,
            Easing::ElasticOut {
                amplitude: 1.0,
                period: 0.6,
            },
            0.15,
        ),
        // Rolls in from the left.
        CreatureKind::Orange => (
            Vec2::new(-450.0, -180.0),
            180.0,
            Vec2::new(0.104, 0.081),
            2.1,
            Easing::BackOut(1.4),
            0.25,
        ),
        CreatureKind::Yellow => (
            Vec2::new(420.0, -140.0),
            0.0,
            Vec2::new(0.158, 0.097),
            1.9,
            Easing::BackOut(1.7),
            0.35,
        ),
    }
}

const LINE_GROW_START: f32 = 1.4;
const LINE_GROW_STAGGER: f32 = 0.08;

pub fn entrance_system(
    mut commands: Commands,
    settings: Res<AnimationSettings>,
    mut query_bodies: Query<(Entity, &CreatureBody, &RestPose, &mut Transform)>,
    mut query_lines: Query<(Entity, &GroundLine, &mut Transform), Without<CreatureBody>>,
) {
    if !settings.entrance {
        for (_, _, mut transform) in query_lines.iter_mut() {
            transform.scale.x = 1.0;
        }
        return;
    }

    for (entity, body, rest, mut transform) in query_bodies.iter_mut() {
        let rest_key = PoseKey::from_transform(&rest.0);
        let (offset, spin, scale, duration, easing, delay) = entrance_key(body.kind);
        let from = PoseKey::new(rest_key.translation + offset, spin, scale);
        // Snap to the start pose immediately so nothing flashes at rest
        // during the stagger delay.
        from.apply(&mut transform);
        commands
            .entity(entity)
            .insert(Tween::once(from, rest_key, duration, easing).with_start_delay(delay));
    }

    for (entity, line, transform) in query_lines.iter() {
        let index = match line.kind {
            CreatureKind::Purple => 0,
            CreatureKind::Black => 1,
            CreatureKind::Yellow => 2,
            CreatureKind::Orange => 3,
        };
        let grown = PoseKey::from_transform(transform);
        let flat = PoseKey::new(grown.translation, 0.0, Vec2::new(0.0, 1.0));
        let grown = PoseKey::new(grown.translation, 0.0, Vec2::ONE);
        commands.entity(entity).insert(
            Tween::once(flat, grown, 1.0, Easing::ExpoOut)
                .with_start_delay(LINE_GROW_START + LINE_GROW_STAGGER * index as f32),
        );
    }

    log::debug!("entrance timeline scheduled");
}
