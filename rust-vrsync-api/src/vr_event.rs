use crate::VRControllerHand;

/// Event types the runtime reports. Only the button ones are forwarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VRRuntimeEventType {
    ButtonPress,
    ButtonUnpress,
    ButtonTouch,
    ButtonUntouch,
    Other(u32),
}

/// An event as it comes out of the runtime queue.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VRRuntimeEvent {
    pub device_index: u32,
    pub event_type: VRRuntimeEventType,
    pub button: u32,
}

impl VRRuntimeEvent {
    pub fn new(device_index: u32, event_type: VRRuntimeEventType, button: u32) -> VRRuntimeEvent {
        VRRuntimeEvent {
            device_index,
            event_type,
            button,
        }
    }
}

/// A normalized controller button transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde-serialization", derive(Deserialize, Serialize))]
pub struct VRButtonEvent {
    pub hand: VRControllerHand,
    pub button: u32,
    // true on press or touch, false on unpress or untouch
    pub pressed: bool,
}

impl VRButtonEvent {
    // The (controller, button, state) triple: 0 left / 1 right, 1 pressed / 0 released
    pub fn as_tuple(&self) -> (u32, u32, u32) {
        (self.hand.id(), self.button, self.pressed as u32)
    }
}
