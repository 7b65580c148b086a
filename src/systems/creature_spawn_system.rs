//! Spawns the creature stage: four bodies, their eyes, mouths, and
//! ground lines, plus the mesh/material caches the expression systems
//! swap between at runtime.

use bevy::prelude::*;
use bevy::sprite::{ColorMaterial, MeshMaterial2d};
use enum_map::{enum_map, EnumMap};

use crate::components::{
    local_position, mouth_descriptor, BodyLean, CreatureBody, CreatureKind, GazePupil, GroundLine,
    Mouth, MouthForm, OrangeEyeShape, RestPose, Stage, LINE_COLOR, MOUTH_DARK, MOUTH_LIGHT,
    PUPIL_COLOR, SCLERA_COLOR, STAGE_FLOOR_Y, STAGE_SIZE,
};
use crate::resources::ExpressionState;
use crate::signals::{FaceExpression, OrangeEye, OrangeMouth};

/// Horizontal placement of the stage: centered in the left portion of
/// the window, where the form panel leaves room.
const STAGE_OFFSET_X: f32 = -220.0;

/// Radius of the yellow creature's rounded cap.
const YELLOW_CAP_RADIUS: f32 = 95.0;

/// Mesh and material handles shared by the expression systems. Built
/// once at spawn so swapping a mouth is a handle copy, not an asset
/// allocation.
#[derive(Resource)]
pub struct CreatureAssets {
    pub purple_mouths: EnumMap<FaceExpression, Handle<Mesh>>,
    pub black_mouths: EnumMap<FaceExpression, Handle<Mesh>>,
    pub orange_mouths: EnumMap<OrangeMouth, Handle<Mesh>>,
    pub mouth_dark: Handle<ColorMaterial>,
    pub mouth_light: Handle<ColorMaterial>,
}

impl CreatureAssets {
    /// Mouth mesh for the creature's current expression.
    pub fn mouth_mesh(
        &self,
        kind: CreatureKind,
        expressions: &crate::signals::CreatureExpressions,
    ) -> Option<Handle<Mesh>> {
        match kind {
            CreatureKind::Purple => Some(self.purple_mouths[expressions.purple].clone()),
            CreatureKind::Black => Some(self.black_mouths[expressions.black].clone()),
            CreatureKind::Orange => Some(self.orange_mouths[expressions.orange_mouth].clone()),
            // The yellow mouth never changes mesh, only rotation.
            CreatureKind::Yellow => None,
        }
    }
}

fn form_mesh(form: MouthForm, meshes: &mut Assets<Mesh>) -> Handle<Mesh> {
    match form {
        MouthForm::Pill(size) | MouthForm::Oval(size) => {
            meshes.add(Ellipse::new(size.x / 2.0, size.y / 2.0))
        }
        MouthForm::Disc(diameter) => meshes.add(Circle::new(diameter / 2.0)),
        MouthForm::Triangle(size) => meshes.add(Triangle2d::new(
            Vec2::new(0.0, size.y / 2.0),
            Vec2::new(-size.x / 2.0, -size.y / 2.0),
            Vec2::new(size.x / 2.0, -size.y / 2.0),
        )),
    }
}

/// A shallow circular segment spanning `width` with sagitta `height`,
/// used for the orange creature's smiling eye arc.
fn arc_mesh(width: f32, height: f32, meshes: &mut Assets<Mesh>) -> Handle<Mesh> {
    let half_chord = width / 2.0;
    let radius = height / 2.0 + (width * width) / (8.0 * height);
    let half_angle = (half_chord / radius).asin();
    meshes.add(CircularSegment::new(radius, half_angle))
}

struct SpawnContext<'a> {
    meshes: &'a mut Assets<Mesh>,
    materials: &'a mut Assets<ColorMaterial>,
    sclera: Handle<ColorMaterial>,
    pupil: Handle<ColorMaterial>,
}

/// Spawns one white-sclera eye with a black ring and an orbiting pupil.
/// Geometry is authored in the body's top-left space.
fn spawn_sclera_eye(
    commands: &mut Commands,
    ctx: &mut SpawnContext,
    body: Entity,
    body_size: Vec2,
    left: f32,
    top: f32,
    size: f32,
    border: f32,
    pupil_size: f32,
    orbit: f32,
) {
    let pos = local_position(body_size, left, top, Vec2::splat(size));
    let eye = commands
        .spawn((
            Transform::from_xyz(pos.x, pos.y, 0.2),
            GlobalTransform::default(),
            Visibility::Inherited,
            InheritedVisibility::default(),
            ViewVisibility::default(),
        ))
        .id();
    commands.entity(body).add_child(eye);

    let sclera = commands
        .spawn((
            Mesh2d(ctx.meshes.add(Circle::new(size / 2.0))),
            MeshMaterial2d(ctx.sclera.clone()),
            Transform::from_xyz(0.0, 0.0, 0.0),
            GlobalTransform::default(),
            Visibility::Inherited,
            InheritedVisibility::default(),
            ViewVisibility::default(),
        ))
        .id();
    let ring = commands
        .spawn((
            Mesh2d(ctx.meshes.add(Annulus::new(size / 2.0 - border, size / 2.0))),
            MeshMaterial2d(ctx.pupil.clone()),
            Transform::from_xyz(0.0, 0.0, 0.05),
            GlobalTransform::default(),
            Visibility::Inherited,
            InheritedVisibility::default(),
            ViewVisibility::default(),
        ))
        .id();
    let carrier = spawn_pupil_carrier(commands, ctx, pupil_size, orbit);
    commands.entity(eye).add_child(sclera);
    commands.entity(eye).add_child(ring);
    commands.entity(eye).add_child(carrier);
}

/// Spawns a rotating pupil carrier. Borderless eyes reuse this with
/// orbit 0.
fn spawn_pupil_carrier(
    commands: &mut Commands,
    ctx: &mut SpawnContext,
    pupil_size: f32,
    orbit: f32,
) -> Entity {
    let carrier = commands
        .spawn((
            GazePupil { orbit },
            Transform::from_xyz(0.0, 0.0, 0.1),
            GlobalTransform::default(),
            Visibility::Inherited,
            InheritedVisibility::default(),
            ViewVisibility::default(),
        ))
        .id();
    let pupil = commands
        .spawn((
            Mesh2d(ctx.meshes.add(Circle::new(pupil_size / 2.0))),
            MeshMaterial2d(ctx.pupil.clone()),
            Transform::from_xyz(0.0, orbit, 0.05),
            GlobalTransform::default(),
            Visibility::Inherited,
            InheritedVisibility::default(),
            ViewVisibility::default(),
        ))
        .id();
    commands.entity(carrier).add_child(pupil);
    carrier
}

pub fn creature_spawn_system(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
) {
    commands.spawn(Camera2d);

    let expressions = ExpressionState::default().current;

    let mouth_dark = materials.add(ColorMaterial::from(MOUTH_DARK));
    let mouth_light = materials.add(ColorMaterial::from(MOUTH_LIGHT));
    let assets = CreatureAssets {
        purple_mouths: enum_map! {
            exp => form_mesh(
                mouth_descriptor(CreatureKind::Purple, &crate::signals::CreatureExpressions {
                    purple: exp,
                    ..expressions
                })
                .form,
                &mut meshes,
            )
        },
        black_mouths: enum_map! {
            exp => form_mesh(
                mouth_descriptor(CreatureKind::Black, &crate::signals::CreatureExpressions {
                    black: exp,
                    ..expressions
                })
                .form,
                &mut meshes,
            )
        },
        orange_mouths: enum_map! {
            mouth => form_mesh(
                mouth_descriptor(CreatureKind::Orange, &crate::signals::CreatureExpressions {
                    orange_mouth: mouth,
                    ..expressions
                })
                .form,
                &mut meshes,
            )
        },
        mouth_dark: mouth_dark.clone(),
        mouth_light: mouth_light.clone(),
    };

    let sclera = materials.add(ColorMaterial::from(SCLERA_COLOR));
    let pupil = materials.add(ColorMaterial::from(PUPIL_COLOR));
    let mut ctx = SpawnContext {
        meshes: &mut *meshes,
        materials: &mut *materials,
        sclera,
        pupil,
    };

    let stage_transform = Transform::from_xyz(STAGE_OFFSET_X, 0.0, 0.0);
    let stage = commands
        .spawn((
            Stage,
            RestPose(stage_transform),
            stage_transform,
            GlobalTransform::default(),
            Visibility::Visible,
            InheritedVisibility::default(),
            ViewVisibility::default(),
        ))
        .id();

    for kind in [
        CreatureKind::Purple,
        CreatureKind::Black,
        CreatureKind::Yellow,
        CreatureKind::Orange,
    ] {
        let (left, top, size) = kind.body_rect();
        let pos = local_position(STAGE_SIZE, left, top, size);
        let body_transform = Transform::from_xyz(pos.x, pos.y, kind.z_layer());
        let body = commands
            .spawn((
                CreatureBody { kind },
                BodyLean,
                RestPose(body_transform),
                body_transform,
                GlobalTransform::default(),
                Visibility::Inherited,
                InheritedVisibility::default(),
                ViewVisibility::default(),
            ))
            .id();
        commands.entity(stage).add_child(body);

        spawn_body_shape(&mut commands, &mut ctx, body, kind, size);
        spawn_face(&mut commands, &mut ctx, &assets, body, kind, size, &expressions);

        // Ground line, scaled to zero until the entrance timeline grows it.
        let line_size = Vec2::new(size.x, 2.0);
        let line_pos = local_position(STAGE_SIZE, left, STAGE_FLOOR_Y, line_size);
        let line = commands
            .spawn((
                GroundLine { kind },
                Mesh2d(ctx.meshes.add(Rectangle::new(line_size.x, line_size.y))),
                MeshMaterial2d(ctx.materials.add(ColorMaterial::from(LINE_COLOR))),
                Transform::from_xyz(line_pos.x, line_pos.y, 20.0).with_scale(Vec3::new(0.0, 1.0, 1.0)),
                GlobalTransform::default(),
                Visibility::Inherited,
                InheritedVisibility::default(),
                ViewVisibility::default(),
            ))
            .id();
        commands.entity(stage).add_child(line);
    }

    commands.insert_resource(assets);
    log::debug!("creature stage spawned");
}

/// Spawns the colored body meshes under a creature node. The yellow and
/// orange silhouettes are composed from two primitives.
fn spawn_body_shape(
    commands: &mut Commands,
    ctx: &mut SpawnContext,
    body: Entity,
    kind: CreatureKind,
    size: Vec2,
) {
    let material = ctx.materials.add(ColorMaterial::from(kind.body_color()));
    let mut add_part = |mesh: Handle<Mesh>, transform: Transform| {
        let part = commands
            .spawn((
                Mesh2d(mesh),
                MeshMaterial2d(material.clone()),
                transform,
                GlobalTransform::default(),
                Visibility::Inherited,
                InheritedVisibility::default(),
                ViewVisibility::default(),
            ))
            .id();
        commands.entity(body).add_child(part);
    };

    match kind {
        CreatureKind::Purple | CreatureKind::Black => {
            add_part(
                ctx.meshes.add(Rectangle::new(size.x, size.y)),
                Transform::from_xyz(0.0, 0.0, 0.0),
            );
        }
        CreatureKind::Yellow => {
            // Straight lower body with a round cap.
            let trunk_height = size.y - YELLOW_CAP_RADIUS;
            add_part(
                ctx.meshes.add(Rectangle::new(size.x, trunk_height)),
                Transform::from_xyz(0.0, -YELLOW_CAP_RADIUS / 2.0, 0.0),
            );
            add_part(
                ctx.meshes.add(Circle::new(YELLOW_CAP_RADIUS)),
                Transform::from_xyz(0.0, size.y / 2.0 - YELLOW_CAP_RADIUS, 0.0),
            );
        }
        CreatureKind::Orange => {
            // Half-disc arch, stretched to the authored height.
            let radius = size.x / 2.0;
            add_part(
                ctx.meshes.add(CircularSegment::from_turns(radius, 0.5)),
                Transform::from_xyz(0.0, -size.y / 2.0, 0.0)
                    .with_scale(Vec3::new(1.0, size.y / radius, 1.0)),
            );
        }
    }
}

fn spawn_face(
    commands: &mut Commands,
    ctx: &mut SpawnContext,
    assets: &CreatureAssets,
    body: Entity,
    kind: CreatureKind,
    size: Vec2,
    expressions: &crate::signals::CreatureExpressions,
) {
    match kind {
        CreatureKind::Purple => {
            for left in [80.0, 150.0] {
                spawn_sclera_eye(commands, ctx, body, size, left, 14.0, 19.0, 3.0, 8.0, 7.0);
            }
        }
        CreatureKind::Black => {
            for left in [28.0, 74.0] {
                spawn_sclera_eye(commands, ctx, body, size, left, 6.0, 28.0, 4.0, 14.0, 10.0);
            }
        }
        CreatureKind::Yellow => {
            let pos = local_position(size, 76.0, 20.0, Vec2::splat(10.0));
            let eye = commands
                .spawn((
                    Transform::from_xyz(pos.x, pos.y, 0.2),
                    GlobalTransform::default(),
                    Visibility::Inherited,
                    InheritedVisibility::default(),
                    ViewVisibility::default(),
                ))
                .id();
            commands.entity(body).add_child(eye);
            let carrier = spawn_pupil_carrier(commands, ctx, 10.0, 0.0);
            commands.entity(eye).add_child(carrier);
        }
        CreatureKind::Orange => {
            for left in [110.0, 156.0] {
                spawn_orange_eye(commands, ctx, body, size, left, 76.0, expressions.orange_eye);
            }
        }
    }

    let shape = mouth_descriptor(kind, expressions);
    let (mesh, material) = match kind {
        CreatureKind::Black => (assets.black_mouths[expressions.black].clone(), assets.mouth_light.clone()),
        CreatureKind::Purple => (assets.purple_mouths[expressions.purple].clone(), assets.mouth_dark.clone()),
        CreatureKind::Orange => (assets.orange_mouths[expressions.orange_mouth].clone(), assets.mouth_dark.clone()),
        CreatureKind::Yellow => (form_mesh(shape.form, ctx.meshes), assets.mouth_dark.clone()),
    };
    let mouth = commands
        .spawn((
            Mouth { kind },
            Mesh2d(mesh),
            MeshMaterial2d(material),
            shape.transform(size),
            GlobalTransform::default(),
            Visibility::Inherited,
            InheritedVisibility::default(),
            ViewVisibility::default(),
        ))
        .id();
    commands.entity(body).add_child(mouth);
}

/// The orange creature's eye spawns all three variants; visibility picks
/// the active one.
fn spawn_orange_eye(
    commands: &mut Commands,
    ctx: &mut SpawnContext,
    body: Entity,
    body_size: Vec2,
    left: f32,
    top: f32,
    active: OrangeEye,
) {
    let size = 28.0;
    let pos = local_position(body_size, left, top, Vec2::splat(size));
    let eye = commands
        .spawn((
            Transform::from_xyz(pos.x, pos.y, 0.2),
            GlobalTransform::default(),
            Visibility::Inherited,
            InheritedVisibility::default(),
            ViewVisibility::default(),
        ))
        .id();
    commands.entity(body).add_child(eye);

    let visibility = |variant: OrangeEye| {
        if variant == active {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        }
    };

    let round = commands
        .spawn((
            OrangeEyeShape {
                variant: OrangeEye::Round,
            },
            Mesh2d(ctx.meshes.add(Circle::new(size / 2.0))),
            MeshMaterial2d(ctx.pupil.clone()),
            Transform::from_xyz(0.0, 0.0, 0.05),
            GlobalTransform::default(),
            visibility(OrangeEye::Round),
            InheritedVisibility::default(),
            ViewVisibility::default(),
        ))
        .id();
    let closed = commands
        .spawn((
            OrangeEyeShape {
                variant: OrangeEye::Closed,
            },
            Mesh2d(ctx.meshes.add(Rectangle::new(size, 4.0))),
            MeshMaterial2d(ctx.pupil.clone()),
            Transform::from_xyz(0.0, -2.0, 0.05),
            GlobalTransform::default(),
            visibility(OrangeEye::Closed),
            InheritedVisibility::default(),
            ViewVisibility::default(),
        ))
        .id();
    let smiling = commands
        .spawn((
            OrangeEyeShape {
                variant: OrangeEye::Smiling,
            },
            Mesh2d(arc_mesh(size, 6.0, ctx.meshes)),
            MeshMaterial2d(ctx.pupil.clone()),
            // Flipped so the arc opens upward like a smile.
            Transform::from_xyz(0.0, -4.0, 0.05).with_scale(Vec3::new(1.0, -1.0, 1.0)),
            GlobalTransform::default(),
            visibility(OrangeEye::Smiling),
            InheritedVisibility::default(),
            ViewVisibility::default(),
        ))
        .id();
    for entity in [round, closed, smiling] {
        commands.entity(eye).add_child(entity);
    }
}
