// The VRPose struct represents a tracked device's state in application space
// for the current frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde-serialization", derive(Deserialize, Serialize))]
pub struct VRPose {
    // Position of the device in meters.
    // None when the device was not tracked this frame.
    pub position: Option<[f32; 3]>,

    // Orientation of the device as an [x, y, z, w] quaternion.
    // None when the device was not tracked this frame.
    pub orientation: Option<[f32; 4]>,
}

impl VRPose {
    pub fn invalid() -> VRPose {
        VRPose::default()
    }

    pub fn is_valid(&self) -> bool {
        self.position.is_some() && self.orientation.is_some()
    }
}
