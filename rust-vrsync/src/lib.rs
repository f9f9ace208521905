#[macro_use]
extern crate log;
#[cfg(feature = "openvr")]
extern crate openvr_sys;
#[macro_use]
extern crate rust_vrsync_api;

pub mod api;
pub mod event_normalizer;
pub mod gaze_tracker;
pub mod haptics;
pub mod overlay_manager;
pub mod pose_sync;
pub mod snapshot;
pub mod stereo_camera;
mod vr_context;

pub use rust_vrsync_api::*;
pub use gaze_tracker::{DisabledGazeTracker, ThreadedGazeTracker, VRGazeTracker};
pub use haptics::VRHapticDispatcher;
pub use overlay_manager::VROverlayManager;
pub use pose_sync::VRPoseSync;
pub use snapshot::{VRHmdSnapshot, VRSnapshot};
pub use stereo_camera::VRStereoCamera;
pub use vr_context::VRSyncContext;

#[cfg(feature = "mock")]
pub use api::{MockServiceCreator, MockVRInit, MockVRRemote};

#[cfg(feature = "openvr")]
pub use api::OpenVRServiceCreator;
