use crate::{VRCompositorError, VREye, VRLayer, VRTrackedPose};

/// Frame pacing and submission side of the runtime.
pub trait VRCompositor: Send {
    // Blocks until the runtime is ready for the next frame and fills `poses`
    // with one entry per device index.
    // Poses are filled in even when a benign error is returned
    fn wait_get_poses(&mut self, poses: &mut [VRTrackedPose]) -> Result<(), VRCompositorError>;

    fn submit(&mut self, eye: VREye, layer: &VRLayer) -> Result<(), VRCompositorError>;

    fn post_present_handoff(&mut self);
}
