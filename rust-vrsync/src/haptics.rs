use rust_vrsync_api::{VRDeviceRole, VRDeviceState, VRError, VRResult, VRService};

/// Routes haptic pulses to the runtime index of a named device.
#[derive(Debug, Clone, Copy)]
pub struct VRHapticDispatcher {
    axis: u32,
}

impl Default for VRHapticDispatcher {
    fn default() -> VRHapticDispatcher {
        VRHapticDispatcher::new(0)
    }
}

impl VRHapticDispatcher {
    pub fn new(axis: u32) -> VRHapticDispatcher {
        VRHapticDispatcher { axis }
    }

    pub fn axis(&self) -> u32 {
        self.axis
    }

    // The runtime drops pulses fired less than 5ms apart, whatever their duration.
    pub fn trigger(&self,
                   service: &mut dyn VRService,
                   role: VRDeviceRole,
                   device: &VRDeviceState,
                   duration_us: u16)
                   -> VRResult<()> {
        let index = match device.index {
            Some(index) => index,
            None => {
                let err = VRError::NoTrackingIndex(role);
                error!("Haptic pulse dropped: {}", err);
                return Err(err);
            }
        };

        service.trigger_haptic_pulse(index, self.axis, duration_us);
        Ok(())
    }
}
