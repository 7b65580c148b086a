//! Derives the expression tuple from the form signals and applies it to
//! the creature faces: mouth mesh/pose swaps, orange eye variant
//! visibility, and the yellow mouth's rotation tweens.

use bevy::prelude::*;

use crate::animation::{Easing, PoseKey, Tween};
use crate::components::{mouth_descriptor, CreatureKind, Mouth, OrangeEyeShape, YELLOW_MOUTH_BAR};
use crate::resources::{ExpressionState, LoginFormState};
use crate::signals::{self, YellowMouth};
use crate::systems::CreatureAssets;

/// Recomputes the expression tuple. Pure derivation; the resource is only
/// rewritten when the tuple changes so downstream systems can use change
/// detection.
pub fn expression_system(
    form_state: Res<LoginFormState>,
    mut expression_state: ResMut<ExpressionState>,
) {
    let password_len = form_state.password_len();
    let derived = if form_state.focus == signals::FocusState::None && !form_state.touched {
        signals::CreatureExpressions::pristine()
    } else {
        signals::derive_expressions(
            form_state.focus,
            password_len,
            signals::password_blur_valid(password_len),
        )
    };
    if expression_state.current != derived {
        expression_state.current = derived;
        log::debug!("expressions changed: {derived:?}");
    }
}

/// Mouth morph timing, matching the snappy overshoot of the mockups.
const MOUTH_MORPH_SECS: f32 = 0.4;
const MOUTH_MORPH_EASING: Easing = Easing::BackOut(1.56);

/// Yellow mouth wave: a slow yoyo wiggle while the password is being
/// typed and too short.
const WAVE_DEG: f32 = -10.0;
const WAVE_HALF_CYCLE_SECS: f32 = 0.6;
const VERTICAL_DEG: f32 = -90.0;
const YELLOW_SNAP_SECS: f32 = 0.5;

pub fn creature_expression_system(
    mut commands: Commands,
    expression_state: Res<ExpressionState>,
    assets: Option<Res<CreatureAssets>>,
    mut query_mouths: Query<(Entity, &Mouth, &mut Mesh2d, &Transform)>,
    mut query_orange_eyes: Query<(&OrangeEyeShape, &mut Visibility)>,
) {
    if !expression_state.is_changed() {
        return;
    }
    let Some(assets) = assets else {
        return;
    };
    let expressions = &expression_state.current;

    for (entity, mouth, mut mesh, transform) in query_mouths.iter_mut() {
        if mouth.kind == CreatureKind::Yellow {
            let (_, _, size) = CreatureKind::Yellow.body_rect();
            let base = PoseKey::from_transform(&YELLOW_MOUTH_BAR.transform(size));
            let current = PoseKey::from_transform(transform);
            let tween = match expressions.yellow_mouth {
                YellowMouth::Wave => Tween::yoyo(
                    base,
                    base.with_rotation(WAVE_DEG),
                    WAVE_HALF_CYCLE_SECS,
                    Easing::SineInOut,
                ),
                YellowMouth::Vertical => Tween::once(
                    current,
                    base.with_rotation(VERTICAL_DEG),
                    YELLOW_SNAP_SECS,
                    Easing::BackOut(1.5),
                ),
                YellowMouth::Bar => {
                    Tween::once(current, base, YELLOW_SNAP_SECS, Easing::BackOut(1.5))
                }
            };
            commands.entity(entity).insert(tween);
            continue;
        }

        if let Some(handle) = assets.mouth_mesh(mouth.kind, expressions) {
            mesh.0 = handle;
        }
        let (_, _, size) = mouth.kind.body_rect();
        let shape = mouth_descriptor(mouth.kind, expressions);
        let target = PoseKey::from_transform(&shape.transform(size));
        commands.entity(entity).insert(Tween::once(
            PoseKey::from_transform(transform),
            target,
            MOUTH_MORPH_SECS,
            MOUTH_MORPH_EASING,
        ));
    }

    for (eye_shape, mut visibility) in query_orange_eyes.iter_mut() {
        *visibility = if eye_shape.variant == expressions.orange_eye {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::ecs::system::RunSystemOnce;

    #[test]
    fn expression_resource_tracks_the_form() {
        let mut world = World::new();
        world.init_resource::<ExpressionState>();
        world.insert_resource(LoginFormState {
            password: "hunter42!".into(),
            focus: crate::signals::FocusState::Password,
            ..Default::default()
        });
        world.run_system_once(expression_system).expect("system ran");
        let state = world.resource::<ExpressionState>();
        assert_eq!(state.current.black, crate::signals::FaceExpression::Happy);
        assert_eq!(state.current.yellow_mouth, YellowMouth::Bar);
    }

    #[test]
    fn untouched_form_keeps_startup_expressions() {
        let mut world = World::new();
        world.init_resource::<ExpressionState>();
        world.insert_resource(LoginFormState {
            password: "ab".into(),
            ..Default::default()
        });
        world.run_system_once(expression_system).expect("system ran");
        assert_eq!(
            world.resource::<ExpressionState>().current,
            crate::signals::CreatureExpressions::pristine()
        );
    }

    #[test]
    fn blurred_short_password_is_sad_once_touched() {
        let mut world = World::new();
        world.init_resource::<ExpressionState>();
        world.insert_resource(LoginFormState {
            password: "ab".into(),
            touched: true,
            ..Default::default()
        });
        world.run_system_once(expression_system).expect("system ran");
        let current = world.resource::<ExpressionState>().current;
        assert_eq!(current.purple, crate::signals::FaceExpression::Sad);
        assert_eq!(current.orange_eye, crate::signals::OrangeEye::Round);
    }

    #[test]
    fn unchanged_form_does_not_rewrite_the_resource() {
        let mut world = World::new();
        world.init_resource::<ExpressionState>();
        world.insert_resource(LoginFormState::default());
        world.run_system_once(expression_system).expect("system ran");
        let first = *world.resource::<ExpressionState>();
        world.run_system_once(expression_system).expect("system ran");
        assert_eq!(first, *world.resource::<ExpressionState>());
    }
}
