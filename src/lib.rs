#![allow(clippy::type_complexity)]
#![allow(clippy::too_many_arguments)]

use std::path::Path;

use bevy::prelude::{
    default, App, ClearColor, Color, IntoScheduleConfigs, PluginGroup, Startup, SystemSet, Update,
};
use bevy::window::{Window, WindowMode, WindowResolution};
use serde::Deserialize;
use thiserror::Error;

pub mod animation;
pub mod components;
pub mod events;
pub mod resources;
pub mod signals;
pub mod systems;
pub mod ui;

use animation::TweenPlugin;
use events::{FieldFocusEvent, LoginEvent};
use resources::{
    AnimationSettings, ExpressionState, GazeSettings, GazeState, LoginFormState,
    PupilIndicatorState,
};
use signals::GazePolicy;
use systems::{
    creature_expression_system, creature_pose_system, creature_spawn_system, entrance_system,
    expression_system, gaze_system, login_event_system, pupil_indicator_system,
};
use ui::ui_login_system;

#[derive(Deserialize)]
#[serde(tag = "type")]
pub enum GraphicsModeConfig {
    #[serde(rename = "window")]
    Window { width: f32, height: f32 },
    #[serde(rename = "fullscreen")]
    Fullscreen,
}

#[derive(Deserialize)]
#[serde(default)]
pub struct GraphicsConfig {
    pub mode: GraphicsModeConfig,
    pub disable_vsync: bool,
}

impl Default for GraphicsConfig {
    fn default() -> Self {
        Self {
            mode: GraphicsModeConfig::Window {
                width: 1280.0,
                height: 800.0,
            },
            disable_vsync: false,
        }
    }
}

fn default_anchor_x() -> f32 {
    0.33
}

fn default_anchor_y() -> f32 {
    0.5
}

fn default_region_width() -> f32 {
    0.65
}

fn default_clamp_min() -> f32 {
    0.10
}

fn default_clamp_max() -> f32 {
    0.95
}

fn default_span_deg() -> f32 {
    70.0
}

/// Which pointer-to-gaze mapping the creatures use. Two variants exist
/// in the wild; `radial` is the default.
#[derive(Deserialize)]
#[serde(tag = "type")]
pub enum GazeMappingConfig {
    #[serde(rename = "radial")]
    Radial {
        #[serde(default = "default_anchor_x")]
        anchor_x: f32,
        #[serde(default = "default_anchor_y")]
        anchor_y: f32,
    },
    #[serde(rename = "horizontal")]
    Horizontal {
        #[serde(default = "default_region_width")]
        region_width: f32,
        #[serde(default = "default_clamp_min")]
        clamp_min: f32,
        #[serde(default = "default_clamp_max")]
        clamp_max: f32,
        #[serde(default = "default_span_deg")]
        span_deg: f32,
    },
}

impl Default for GazeMappingConfig {
    fn default() -> Self {
        GazeMappingConfig::Radial {
            anchor_x: default_anchor_x(),
            anchor_y: default_anchor_y(),
        }
    }
}

impl GazeMappingConfig {
    pub fn policy(&self) -> GazePolicy {
        match *self {
            GazeMappingConfig::Radial { anchor_x, anchor_y } => {
                GazePolicy::Radial { anchor_x, anchor_y }
            }
            GazeMappingConfig::Horizontal {
                region_width,
                clamp_min,
                clamp_max,
                span_deg,
            } => GazePolicy::ClampedHorizontal {
                region_width,
                clamp_min,
                clamp_max,
                span_deg,
            },
        }
    }
}

#[derive(Default, Deserialize)]
#[serde(default)]
pub struct GazeConfig {
    pub mapping: GazeMappingConfig,
}

#[derive(Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// Play the entrance choreography. Turn off for reduced motion.
    pub entrance: bool,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self { entrance: true }
    }
}

#[derive(Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub filter: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: "wgpu=error,naga=warn".to_string(),
        }
    }
}

#[derive(Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub graphics: GraphicsConfig,
    pub gaze: GazeConfig,
    pub animation: AnimationConfig,
    pub log: LogConfig,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read configuration from {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse configuration from {path}: {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },
}

pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let toml_str = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_string_lossy().into_owned(),
        source,
    })?;
    toml::from_str(&toml_str).map_err(|source| ConfigError::Parse {
        path: path.to_string_lossy().into_owned(),
        source,
    })
}

#[derive(Debug, Hash, PartialEq, Eq, Clone, SystemSet)]
enum LoginScreenSets {
    Ui,
    Signals,
    Pose,
}

pub fn run_app(config: &Config) {
    let (window_width, window_height) =
        if let GraphicsModeConfig::Window { width, height } = config.graphics.mode {
            (width, height)
        } else {
            (1280.0, 800.0)
        };

    let mut app = App::new();

    app.add_plugins(
        bevy::prelude::DefaultPlugins
            .set(bevy::window::WindowPlugin {
                primary_window: Some(Window {
                    title: "creature-login".to_string(),
                    present_mode: if config.graphics.disable_vsync {
                        bevy::window::PresentMode::Immediate
                    } else {
                        bevy::window::PresentMode::Fifo
                    },
                    resolution: WindowResolution::new(window_width, window_height),
                    mode: if matches!(config.graphics.mode, GraphicsModeConfig::Fullscreen) {
                        WindowMode::BorderlessFullscreen(bevy::window::MonitorSelection::Primary)
                    } else {
                        WindowMode::Windowed
                    },
                    ..Default::default()
                }),
                ..Default::default()
            })
            .set(bevy::log::LogPlugin {
                level: bevy::log::Level::INFO,
                filter: config.log.filter.clone(),
                ..default()
            }),
    );

    app.add_plugins(bevy_egui::EguiPlugin {
        enable_multipass_for_primary_context: false,
    });
    app.add_plugins(TweenPlugin);

    // Page background behind the stage.
    app.insert_resource(ClearColor(Color::srgb(0.953, 0.957, 0.965)));
    app.insert_resource(GazeSettings {
        policy: config.gaze.mapping.policy(),
    });
    app.insert_resource(AnimationSettings {
        entrance: config.animation.entrance,
    });
    app.init_resource::<GazeState>();
    app.init_resource::<ExpressionState>();
    app.init_resource::<LoginFormState>();
    app.init_resource::<PupilIndicatorState>();

    app.add_event::<FieldFocusEvent>();
    app.add_event::<LoginEvent>();

    app.add_systems(Startup, (creature_spawn_system, entrance_system).chain());

    app.configure_sets(
        Update,
        (
            LoginScreenSets::Ui,
            LoginScreenSets::Signals.after(LoginScreenSets::Ui),
            LoginScreenSets::Pose.after(LoginScreenSets::Signals),
        ),
    );

    // The form publishes this frame's signals before anything derives
    // from them.
    app.add_systems(
        Update,
        ui_login_system
            .in_set(LoginScreenSets::Ui)
            .after(bevy_egui::EguiPreUpdateSet::InitContexts),
    );
    app.add_systems(
        Update,
        (
            gaze_system,
            expression_system,
            pupil_indicator_system,
            login_event_system,
        )
            .in_set(LoginScreenSets::Signals),
    );
    app.add_systems(
        Update,
        (creature_pose_system, creature_expression_system).in_set(LoginScreenSets::Pose),
    );

    app.run();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_config_file_is_a_read_error() {
        let result = load_config(Path::new("/definitely/not/here.toml"));
        assert!(matches!(result, Err(ConfigError::Read { .. })));
    }

    #[test]
    fn empty_config_parses_to_defaults() {
        let config: Config = toml::from_str("").expect("empty config");
        assert!(matches!(
            config.gaze.mapping,
            GazeMappingConfig::Radial { .. }
        ));
        assert!(config.animation.entrance);
    }

    #[test]
    fn gaze_mapping_variant_is_selected_by_tag() {
        let config: Config = toml::from_str(
            r#"
            [gaze.mapping]
            type = "horizontal"
            span_deg = 55.0
            "#,
        )
        .expect("horizontal config");
        match config.gaze.mapping.policy() {
            GazePolicy::ClampedHorizontal {
                region_width,
                span_deg,
                ..
            } => {
                assert_eq!(span_deg, 55.0);
                assert_eq!(region_width, 0.65);
            }
            other => panic!("unexpected policy {other:?}"),
        }
    }

    #[test]
    fn radial_anchor_defaults_match_the_stage_bias() {
        let config: Config = toml::from_str(
            r#"
            [gaze.mapping]
            type = "radial"
            "#,
        )
        .expect("radial config");
        match config.gaze.mapping.policy() {
            GazePolicy::Radial { anchor_x, anchor_y } => {
                assert_eq!(anchor_x, 0.33);
                assert_eq!(anchor_y, 0.5);
            }
            other => panic!("unexpected policy {other:?}"),
        }
    }
}
