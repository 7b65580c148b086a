use bevy::prelude::Resource;

/// Animation toggles from configuration.
#[derive(Resource, Copy, Clone, Debug)]
pub struct AnimationSettings {
    /// Play the entrance choreography at startup. Disabled for reduced
    /// motion; creatures then start directly at their rest poses.
    pub entrance: bool,
}

impl Default for AnimationSettings {
    fn default() -> Self {
        Self { entrance: true }
    }
}
