use thiserror::Error;
use crate::VRDeviceRole;

pub type VRResult<T> = Result<T, VRError>;

#[derive(Error, Debug)]
pub enum VRError {
    // Startup failures. Any of these aborts context creation.
    #[error("VR runtime not installed")]
    RuntimeNotInstalled,

    #[error("unable to initialize VR runtime: {0}")]
    RuntimeInit(String),

    #[error("unable to initialize VR compositor: {0}")]
    CompositorInit(String),

    #[error("unable to initialize VR overlays: {0}")]
    OverlayInit(String),

    #[error("this HMD does not support eye tracking")]
    GazeUnsupported,

    #[error("unable to initialize eye tracking: {0}")]
    GazeInit(String),

    #[error("eye tracking device error: {0}")]
    GazeDevice(String),

    #[error("unable to spawn eye tracking thread: {0}")]
    GazeThread(#[from] std::io::Error),

    // Misuse. Reported and otherwise a no-op.
    #[error("device {0} does not have a valid tracking index")]
    NoTrackingIndex(VRDeviceRole),

    #[error("unknown device: {0}")]
    UnknownDevice(String),

    #[error("unknown eye: {0}")]
    UnknownEye(String),

    #[error("unknown overlay: {0}")]
    UnknownOverlay(String),

    #[error("overlay already exists: {0}")]
    DuplicateOverlay(String),

    #[error("overlay {name}: {reason}")]
    Overlay { name: String, reason: String },

    #[error("VR context already released")]
    Released,

    #[error(transparent)]
    Compositor(#[from] VRCompositorError),
}

/// Errors returned by frame submission.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum VRCompositorError {
    /// The application does not have scene focus yet. Expected during startup.
    #[error("compositor does not have focus")]
    DoNotHaveFocus,

    #[error("compositor error {0}")]
    Code(u32),
}

impl VRCompositorError {
    /// OpenVR numbers `DoNotHaveFocus` as 101.
    pub fn from_code(code: u32) -> Option<VRCompositorError> {
        match code {
            0 => None,
            101 => Some(VRCompositorError::DoNotHaveFocus),
            other => Some(VRCompositorError::Code(other)),
        }
    }

    pub fn is_benign(&self) -> bool {
        *self == VRCompositorError::DoNotHaveFocus
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compositor_codes() {
        assert_eq!(VRCompositorError::from_code(0), None);
        assert!(VRCompositorError::from_code(101).unwrap().is_benign());
        let other = VRCompositorError::from_code(105).unwrap();
        assert!(!other.is_benign());
        assert_eq!(other.to_string(), "compositor error 105");
    }

    #[test]
    fn misuse_messages_name_the_target() {
        let err = VRError::NoTrackingIndex(VRDeviceRole::LeftController);
        assert_eq!(err.to_string(), "device left_controller does not have a valid tracking index");
        assert_eq!(VRError::UnknownOverlay("menu".into()).to_string(), "unknown overlay: menu");
    }
}
