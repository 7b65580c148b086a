mod creature;

pub use creature::{
    local_position, mouth_descriptor, BodyLean, CreatureBody, CreatureKind, GazePupil, GroundLine,
    Mouth, MouthForm, MouthShape, OrangeEyeShape, RestPose, Stage, BLACK_BODY, LINE_COLOR,
    MOUTH_DARK, MOUTH_LIGHT, ORANGE_BODY, PUPIL_COLOR, PURPLE_BODY, SCLERA_COLOR, STAGE_FLOOR_Y,
    STAGE_SIZE, YELLOW_BODY, YELLOW_MOUTH_BAR,
};
