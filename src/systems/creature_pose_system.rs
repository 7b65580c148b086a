//! Applies the derived display parameters to the scene: pupil carriers
//! rotate to the gaze angle every frame, and focus/hover transitions
//! retarget the stage and body tweens.

use bevy::prelude::*;

use crate::animation::{
    Easing, PoseKey, Tween, BUTTON_TILT_DEG, FOCUS_LEAN_RETURN_SECS, FOCUS_LEAN_SECS,
};
use crate::components::{BodyLean, CreatureBody, CreatureKind, GazePupil, RestPose, Stage};
use crate::resources::{GazeState, LoginFormState};
use crate::signals::FocusState;

/// Lean parameters per creature and focused field: horizontal slide,
/// tilt in degrees, vertical stretch. The orange creature only slides.
fn lean_offsets(kind: CreatureKind, focus: FocusState) -> (f32, f32, f32) {
    match (focus, kind) {
        (FocusState::Email, CreatureKind::Purple) => (-12.0, 2.0, 1.02),
        (FocusState::Email, CreatureKind::Black) => (-8.0, 1.5, 1.015),
        (FocusState::Email, CreatureKind::Yellow) => (-5.0, 1.0, 1.01),
        (FocusState::Email, CreatureKind::Orange) => (-3.0, 0.0, 1.0),
        (FocusState::Password, CreatureKind::Purple) => (14.0, -2.5, 1.03),
        (FocusState::Password, CreatureKind::Black) => (10.0, -2.0, 1.02),
        (FocusState::Password, CreatureKind::Yellow) => (7.0, -1.5, 1.015),
        (FocusState::Password, CreatureKind::Orange) => (4.0, 0.0, 1.0),
        (FocusState::None, _) => (0.0, 0.0, 1.0),
    }
}

/// Target pose for a body under the current focus, anchored so its feet
/// stay on the floor line while it stretches.
fn lean_target(kind: CreatureKind, focus: FocusState, rest: &Transform) -> PoseKey {
    let rest_key = PoseKey::from_transform(rest);
    let (dx, tilt, scale_y) = lean_offsets(kind, focus);
    let (_, _, size) = kind.body_rect();
    let lift = (scale_y - 1.0) * size.y / 2.0;
    PoseKey::new(
        rest_key.translation + Vec2::new(dx, lift),
        tilt,
        Vec2::new(1.0, scale_y),
    )
}

pub fn creature_pose_system(
    mut commands: Commands,
    gaze: Res<GazeState>,
    form_state: Res<LoginFormState>,
    mut query_pupils: Query<(&GazePupil, &mut Transform), (Without<Stage>, Without<CreatureBody>)>,
    query_stage: Query<(Entity, &RestPose, &Transform), With<Stage>>,
    query_bodies: Query<
        (Entity, &CreatureBody, &RestPose, &Transform),
        (With<BodyLean>, Without<Stage>),
    >,
    mut last: Local<Option<(FocusState, f32, bool)>>,
) {
    // The gaze angle is authored in the mockup's clockwise y-down
    // convention; Bevy rotates counter-clockwise.
    let rotation = Quat::from_rotation_z(-gaze.angle_deg.to_radians());
    for (_pupil, mut transform) in query_pupils.iter_mut() {
        transform.rotation = rotation;
    }

    let signature = (form_state.focus, gaze.shift_x, gaze.look_at_button);
    match *last {
        // First run observes the resting defaults; nothing to retarget.
        None => *last = Some(signature),
        Some(previous) if previous != signature => {
            if let Ok((stage_entity, rest, transform)) = query_stage.get_single() {
                let rest_key = PoseKey::from_transform(&rest.0);
                let target = PoseKey::new(
                    rest_key.translation + Vec2::new(gaze.shift_x, 0.0),
                    if gaze.look_at_button {
                        BUTTON_TILT_DEG
                    } else {
                        0.0
                    },
                    rest_key.scale,
                );
                commands.entity(stage_entity).insert(Tween::once(
                    PoseKey::from_transform(transform),
                    target,
                    0.7,
                    Easing::PowerOut(2.0),
                ));
            }

            for (entity, body, rest, transform) in query_bodies.iter() {
                let target = lean_target(body.kind, form_state.focus, &rest.0);
                let (duration, easing) = if form_state.focus == FocusState::None {
                    (
                        FOCUS_LEAN_RETURN_SECS,
                        Easing::ElasticOut {
                            amplitude: 1.0,
                            period: 0.5,
                        },
                    )
                } else {
                    (
                        FOCUS_LEAN_SECS,
                        Easing::ElasticOut {
                            amplitude: 1.0,
                            period: 0.4,
                        },
                    )
                };
                commands.entity(entity).insert(Tween::once(
                    PoseKey::from_transform(transform),
                    target,
                    duration,
                    easing,
                ));
            }

            *last = Some(signature);
        }
        _ => {}
    }
}
