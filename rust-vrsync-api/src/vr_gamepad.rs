use std::fmt;
use std::str::FromStr;
use crate::VRError;

/// Number of analog axis slots a controller state carries.
pub const CONTROLLER_STATE_AXIS_COUNT: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde-serialization", derive(Deserialize, Serialize))]
pub enum VRControllerHand {
    Left,
    Right,
}

impl VRControllerHand {
    // Numeric id used in normalized events: 0 left, 1 right
    pub fn id(&self) -> u32 {
        match *self {
            VRControllerHand::Left => 0,
            VRControllerHand::Right => 1,
        }
    }
}

impl fmt::Display for VRControllerHand {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            VRControllerHand::Left => write!(f, "left"),
            VRControllerHand::Right => write!(f, "right"),
        }
    }
}

impl FromStr for VRControllerHand {
    type Err = VRError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "left" | "left_controller" => Ok(VRControllerHand::Left),
            "right" | "right_controller" => Ok(VRControllerHand::Right),
            other => Err(VRError::UnknownDevice(other.into())),
        }
    }
}

/// What a controller axis slot measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VRAxisType {
    None,
    TrackPad,
    Joystick,
    Trigger,
}

impl VRAxisType {
    pub fn is_touchpad(&self) -> bool {
        match *self {
            VRAxisType::TrackPad | VRAxisType::Joystick => true,
            _ => false,
        }
    }
}

/// Raw controller state as read from the runtime.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct VRControllerState {
    pub packet_num: u32,
    pub button_pressed: u64,
    pub button_touched: u64,
    // x, y per axis slot. Triggers only use x.
    pub axis: [[f32; 2]; CONTROLLER_STATE_AXIS_COUNT as usize],
}

/// Per-frame controller input handed to the application.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde-serialization", derive(Deserialize, Serialize))]
pub struct VRControllerButtons {
    pub is_valid: bool,
    // 0 released, 1 fully pulled
    pub trigger_fraction: f32,
    pub touchpad_x: f32,
    pub touchpad_y: f32,
    // bit i set while button i is held
    pub buttons_pressed: u64,
}

// Button ids past the 64 bit mask map to no bit
#[inline]
pub fn button_mask(id: u32) -> u64 {
    1u64.checked_shl(id).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hand_names() {
        assert_eq!("left_controller".parse::<VRControllerHand>().unwrap(), VRControllerHand::Left);
        assert_eq!("right".parse::<VRControllerHand>().unwrap(), VRControllerHand::Right);
        assert!("hmd".parse::<VRControllerHand>().is_err());
        assert_eq!(VRControllerHand::Right.id(), 1);
    }

    #[test]
    fn touchpad_axis_types() {
        assert!(VRAxisType::TrackPad.is_touchpad());
        assert!(VRAxisType::Joystick.is_touchpad());
        assert!(!VRAxisType::Trigger.is_touchpad());
    }

    #[test]
    fn button_mask_stays_in_range() {
        assert_eq!(button_mask(33), 0x2_0000_0000);
        assert_eq!(button_mask(63), 1u64 << 63);
        assert_eq!(button_mask(64), 0);
        assert_eq!(button_mask(u32::MAX), 0);
    }
}
