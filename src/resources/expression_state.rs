use bevy::prelude::Resource;

use crate::signals::CreatureExpressions;

/// The currently displayed expression tuple. Only rewritten when the
/// derived tuple actually changes, so consumers can rely on change
/// detection.
#[derive(Resource, Copy, Clone, Debug, PartialEq, Eq)]
pub struct ExpressionState {
    pub current: CreatureExpressions,
}

impl Default for ExpressionState {
    fn default() -> Self {
        Self {
            current: CreatureExpressions::pristine(),
        }
    }
}
