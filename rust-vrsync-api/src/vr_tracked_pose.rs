/// Upper bound on the number of devices a runtime reports per frame.
pub const MAX_TRACKED_DEVICE_COUNT: u32 = 64;

/// Runtime index of the HMD. Overlays are positioned relative to it.
pub const HMD_DEVICE_INDEX: u32 = 0;

/// Device classes reported by the tracking runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde-serialization", derive(Deserialize, Serialize))]
pub enum VRDeviceClass {
    Invalid,
    Hmd,
    Controller,
    GenericTracker,
    TrackingReference,
    DisplayRedirect,
}

/// A single device pose as reported by the runtime, in native tracking space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VRTrackedPose {
    // Row major 3x4 device to tracking space transform.
    pub device_to_absolute_tracking: [[f32; 4]; 3],
    pub pose_is_valid: bool,
    pub device_is_connected: bool,
}

impl Default for VRTrackedPose {
    fn default() -> VRTrackedPose {
        VRTrackedPose {
            device_to_absolute_tracking: [[1.0, 0.0, 0.0, 0.0],
                                          [0.0, 1.0, 0.0, 0.0],
                                          [0.0, 0.0, 1.0, 0.0]],
            pose_is_valid: false,
            device_is_connected: false,
        }
    }
}

impl VRTrackedPose {
    pub fn tracked(device_to_absolute_tracking: [[f32; 4]; 3]) -> VRTrackedPose {
        VRTrackedPose {
            device_to_absolute_tracking,
            pose_is_valid: true,
            device_is_connected: true,
        }
    }
}
