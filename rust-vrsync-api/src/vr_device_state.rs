use std::fmt;
use std::str::FromStr;
use crate::utils;
use crate::vr_coordinate_transform as coords;
use crate::{VRControllerHand, VRError, VRPose};

/// The three devices the application addresses by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde-serialization", derive(Deserialize, Serialize))]
pub enum VRDeviceRole {
    Hmd,
    LeftController,
    RightController,
}

impl VRDeviceRole {
    pub fn hand(&self) -> Option<VRControllerHand> {
        match *self {
            VRDeviceRole::Hmd => None,
            VRDeviceRole::LeftController => Some(VRControllerHand::Left),
            VRDeviceRole::RightController => Some(VRControllerHand::Right),
        }
    }
}

impl From<VRControllerHand> for VRDeviceRole {
    fn from(hand: VRControllerHand) -> VRDeviceRole {
        match hand {
            VRControllerHand::Left => VRDeviceRole::LeftController,
            VRControllerHand::Right => VRDeviceRole::RightController,
        }
    }
}

impl fmt::Display for VRDeviceRole {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match *self {
            VRDeviceRole::Hmd => "hmd",
            VRDeviceRole::LeftController => "left_controller",
            VRDeviceRole::RightController => "right_controller",
        };
        f.write_str(name)
    }
}

impl FromStr for VRDeviceRole {
    type Err = VRError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hmd" => Ok(VRDeviceRole::Hmd),
            "left_controller" => Ok(VRDeviceRole::LeftController),
            "right_controller" => Ok(VRDeviceRole::RightController),
            other => Err(VRError::UnknownDevice(other.into())),
        }
    }
}

/// Controller specific input, refreshed on every frame the controller is seen.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct VRControllerData {
    pub trigger_fraction: f32,
    pub touchpad: [f32; 2],
    pub buttons_pressed: u64,
    // Axis slots discovered for the current device, None until found
    pub trigger_axis: Option<u32>,
    pub touchpad_axis: Option<u32>,
}

/// Latest known state of one tracked device.
///
/// `transform` is the native tracking-space transform with the user offset
/// already added to its translation. `position` and `orientation` are cached
/// from it in native space too; conversion to application space happens when
/// a `VRPose` is built.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VRDeviceState {
    pub transform: [f32; 16],
    pub position: [f32; 3],
    pub orientation: [f32; 4],
    pub is_valid: bool,
    // Runtime device index, None until the device has been seen
    pub index: Option<u32>,
    pub controller: VRControllerData,
}

impl Default for VRDeviceState {
    fn default() -> VRDeviceState {
        VRDeviceState {
            transform: identity_matrix!(),
            position: [0.0, 0.0, 0.0],
            orientation: [0.0, 0.0, 0.0, 1.0],
            is_valid: false,
            index: None,
            controller: VRControllerData::default(),
        }
    }
}

impl VRDeviceState {
    pub fn new() -> VRDeviceState {
        VRDeviceState::default()
    }

    // The last transform and index are kept so that consumers can fall back to them.
    pub fn invalidate(&mut self) {
        self.is_valid = false;
    }

    pub fn update_pose(&mut self, index: u32, transform: [f32; 16]) {
        self.index = Some(index);
        self.transform = transform;
        self.position = utils::matrix_position(&transform);
        self.orientation = utils::matrix_to_quat(&transform);
        self.is_valid = true;
    }

    pub fn pose(&self) -> VRPose {
        if !self.is_valid {
            return VRPose::invalid();
        }

        VRPose {
            position: Some(coords::point_to_app(self.position)),
            orientation: Some(coords::orientation_to_app(self.orientation)),
        }
    }

    /// Right, up and forward unit vectors of the device in application space.
    ///
    /// Native devices look down their -z axis, so the third column is negated.
    pub fn axes(&self) -> Option<[[f32; 3]; 3]> {
        if !self.is_valid {
            return None;
        }

        let right = utils::matrix_column(&self.transform, 0);
        let up = utils::matrix_column(&self.transform, 1);
        let back = utils::matrix_column(&self.transform, 2);
        let forward = [-back[0], -back[1], -back[2]];

        Some([utils::normalize(coords::direction_to_app(right)),
              utils::normalize(coords::direction_to_app(up)),
              utils::normalize(coords::direction_to_app(forward))])
    }
}
