#[macro_export]
macro_rules! identity_matrix {
    () => ([1.0, 0.0, 0.0, 0.0,  0.0, 1.0, 0.0, 0.0,  0.0, 0.0, 1.0, 0.0,  0.0, 0.0, 0.0, 1.0]);
}

#[macro_use]
extern crate log;

#[cfg(feature = "serde-serialization")]
#[macro_use]
extern crate serde_derive;

pub mod utils;
pub mod vr_coordinate_transform;

pub mod mock;
pub mod vr_compositor;
pub mod vr_config;
pub mod vr_device_state;
pub mod vr_error;
pub mod vr_event;
pub mod vr_eye;
pub mod vr_frame_data;
pub mod vr_gamepad;
pub mod vr_gaze;
pub mod vr_layer;
pub mod vr_overlay;
pub mod vr_pose;
pub mod vr_service;
pub mod vr_tracked_pose;
pub mod vr_tracker_registry;

pub use mock::MockVRControlMsg;
pub use vr_compositor::VRCompositor;
pub use vr_config::VRSyncConfig;
pub use vr_device_state::{VRControllerData, VRDeviceRole, VRDeviceState};
pub use vr_error::{VRCompositorError, VRError, VRResult};
pub use vr_event::{VRButtonEvent, VRRuntimeEvent, VRRuntimeEventType};
pub use vr_eye::VREye;
pub use vr_frame_data::VRStereoFrame;
pub use vr_gamepad::{VRAxisType, VRControllerButtons, VRControllerHand, VRControllerState,
                     CONTROLLER_STATE_AXIS_COUNT};
pub use vr_gaze::{VRGazeDevice, VRGazeSample, VRGazeValidity, VRRawGazeData};
pub use vr_layer::{VRLayer, VRTextureBounds};
pub use vr_overlay::{VROverlayDesc, VROverlayHandle, VROverlayService};
pub use vr_pose::VRPose;
pub use vr_service::{VRService, VRServiceCreator};
pub use vr_tracked_pose::{VRDeviceClass, VRTrackedPose, HMD_DEVICE_INDEX, MAX_TRACKED_DEVICE_COUNT};
pub use vr_tracker_registry::VRTrackerRegistry;
