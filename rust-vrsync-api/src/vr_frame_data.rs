// Represents all the information needed to render a single stereo frame
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde-serialization", derive(Deserialize, Serialize))]
pub struct VRStereoFrame {
    // Milliseconds at which the frame was derived
    pub timestamp: f64,

    // major order column matrix describing the projection to be used for the left eye’s rendering
    pub left_projection_matrix: [f32; 16],

    // major order column matrix describing the projection to be used for the right eye’s rendering
    pub right_projection_matrix: [f32; 16],

    // Transposed world to eye matrices, ready to be handed to the renderer.
    pub left_view_matrix: [f32; 16],
    pub right_view_matrix: [f32; 16],

    // Eye positions in application space
    pub left_camera_position: [f32; 3],
    pub right_camera_position: [f32; 3],
}

impl Default for VRStereoFrame {
    fn default() -> VRStereoFrame {
        VRStereoFrame {
            timestamp: 0f64,
            left_projection_matrix: identity_matrix!(),
            right_projection_matrix: identity_matrix!(),
            left_view_matrix: identity_matrix!(),
            right_view_matrix: identity_matrix!(),
            left_camera_position: [0.0, 0.0, 0.0],
            right_camera_position: [0.0, 0.0, 0.0],
        }
    }
}
