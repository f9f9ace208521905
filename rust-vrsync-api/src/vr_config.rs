use std::time::Duration;

/// Startup configuration for a `VRSyncContext`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde-serialization", derive(Deserialize, Serialize))]
#[cfg_attr(feature = "serde-serialization", serde(default))]
pub struct VRSyncConfig {
    // Clip planes used for the per-eye projection matrices, in meters
    pub near_clip: f32,
    pub far_clip: f32,

    // Start the eye tracking thread. Fails context creation if unsupported.
    pub use_gaze_tracking: bool,

    // Wait between two eye tracking polls
    pub gaze_poll_interval_ms: u64,

    // Controller axis that receives haptic pulses
    pub haptic_axis: u32,
}

impl Default for VRSyncConfig {
    fn default() -> VRSyncConfig {
        VRSyncConfig {
            near_clip: 0.1,
            far_clip: 30.0,
            use_gaze_tracking: false,
            gaze_poll_interval_ms: 5,
            haptic_axis: 0,
        }
    }
}

impl VRSyncConfig {
    pub fn gaze_poll_interval(&self) -> Duration {
        Duration::from_millis(self.gaze_poll_interval_ms)
    }

    pub fn with_gaze_tracking(mut self, enabled: bool) -> VRSyncConfig {
        self.use_gaze_tracking = enabled;
        self
    }
}
