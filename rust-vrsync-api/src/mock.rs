use crate::{VRAxisType, VRCompositorError, VRControllerHand, VRControllerState, VRDeviceClass,
            VRRawGazeData, VRRuntimeEvent};

/// Messages that script the mock runtime.
#[derive(Debug, Clone)]
pub enum MockVRControlMsg {
    // Plugs a device in at `index`
    AddDevice {
        index: u32,
        class: VRDeviceClass,
        role: Option<VRControllerHand>,
        serial: Option<String>,
    },
    DisconnectDevice(u32),
    // Native device to tracking transform, column major
    SetDevicePose(u32, [f32; 16]),
    LoseTracking(u32),
    SetAxisTypes(u32, Vec<VRAxisType>),
    // None makes the controller state unreadable
    SetControllerState(u32, Option<VRControllerState>),
    PushEvent(VRRuntimeEvent),
    SetWaitError(Option<VRCompositorError>),
    SetSubmitError(Option<VRCompositorError>),
    SetProjectionMatrices([f32; 16], [f32; 16]),
    SetEyeToHeadTransforms([f32; 16], [f32; 16]),
    SetGazeData(Result<VRRawGazeData, String>),
}
