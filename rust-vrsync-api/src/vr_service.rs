use crate::{VRAxisType, VRCompositor, VRControllerHand, VRControllerState, VRDeviceClass, VREye,
            VRGazeDevice, VROverlayService, VRRuntimeEvent};

/// Device and input side of a tracking runtime.
///
/// Matrices are column major and expressed in the runtime's native tracking space.
pub trait VRService: Send {
    fn is_installed(&self) -> bool;

    fn initialize(&mut self) -> Result<(), String>;

    fn is_available(&self) -> bool;

    // Only valid after a successful `initialize`
    fn new_compositor(&mut self) -> Result<Box<dyn VRCompositor>, String>;

    fn new_overlay_service(&mut self) -> Result<Box<dyn VROverlayService>, String>;

    fn device_class(&self, index: u32) -> VRDeviceClass;

    fn controller_role(&self, index: u32) -> Option<VRControllerHand>;

    fn is_device_connected(&self, index: u32) -> bool;

    fn serial_number(&self, index: u32) -> Option<String>;

    fn axis_type(&self, index: u32, axis: u32) -> VRAxisType;

    // None when the state could not be read
    fn controller_state(&self, index: u32) -> Option<VRControllerState>;

    fn poll_next_event(&mut self) -> Option<VRRuntimeEvent>;

    fn trigger_haptic_pulse(&mut self, index: u32, axis: u32, duration_us: u16);

    fn projection_matrix(&self, eye: VREye, near: f32, far: f32) -> [f32; 16];

    fn eye_to_head_transform(&self, eye: VREye) -> [f32; 16];

    fn shutdown(&mut self);
}

pub trait VRServiceCreator {
    fn new_service(&self) -> Box<dyn VRService>;

    // Eye tracking lives outside of the tracking runtime and is optional
    fn new_gaze_device(&self) -> Option<Box<dyn VRGazeDevice>> {
        None
    }
}
