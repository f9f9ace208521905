#[cfg(feature = "mock")]
mod mock;
#[cfg(feature = "mock")]
pub use self::mock::{MockDevice, MockGazeInit, MockHapticPulse, MockOverlay, MockServiceCreator, MockVRInit,
                     MockVRRemote, MockVRState};

#[cfg(feature = "openvr")]
mod openvr;
#[cfg(feature = "openvr")]
pub use self::openvr::OpenVRServiceCreator;
