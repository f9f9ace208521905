mod service;
mod state;

pub use self::state::{MockDevice, MockHapticPulse, MockOverlay, MockVRState};

use parking_lot::Mutex;
use rust_vrsync_api::{MockVRControlMsg, VREye, VRGazeDevice, VRLayer, VROverlayHandle, VRService,
                      VRServiceCreator};
use std::sync::Arc;

/// Eye tracker attached to the mock HMD.
#[derive(Debug, Clone)]
pub struct MockGazeInit {
    pub supported: bool,
    pub init_error: Option<String>,
}

/// Startup behaviour of the mock runtime.
#[derive(Debug, Clone)]
pub struct MockVRInit {
    pub installed: bool,
    pub hmd_present: bool,
    pub compositor_available: bool,
    pub overlays_available: bool,
    pub gaze: Option<MockGazeInit>,
}

impl Default for MockVRInit {
    fn default() -> MockVRInit {
        MockVRInit {
            installed: true,
            hmd_present: true,
            compositor_available: true,
            overlays_available: true,
            gaze: None,
        }
    }
}

impl MockVRInit {
    pub fn with_gaze(mut self) -> MockVRInit {
        self.gaze = Some(MockGazeInit {
            supported: true,
            init_error: None,
        });
        self
    }
}

pub struct MockServiceCreator {
    state: Arc<Mutex<MockVRState>>,
}

impl MockServiceCreator {
    pub fn new() -> Box<dyn VRServiceCreator> {
        Box::new(MockServiceCreator::with_init(MockVRInit::default()))
    }

    pub fn with_init(init: MockVRInit) -> MockServiceCreator {
        MockServiceCreator {
            state: Arc::new(Mutex::new(MockVRState::new(init))),
        }
    }

    // The remote scripts the runtime and inspects what it recorded.
    pub fn new_with_remote(init: MockVRInit) -> (MockServiceCreator, MockVRRemote) {
        let creator = MockServiceCreator::with_init(init);
        let remote = MockVRRemote {
            state: creator.state.clone(),
        };
        (creator, remote)
    }
}

impl VRServiceCreator for MockServiceCreator {
    fn new_service(&self) -> Box<dyn VRService> {
        Box::new(service::MockVRService::new(self.state.clone()))
    }

    fn new_gaze_device(&self) -> Option<Box<dyn VRGazeDevice>> {
        if self.state.lock().init.gaze.is_none() {
            return None;
        }
        Some(Box::new(service::MockGazeDevice::new(self.state.clone())))
    }
}

#[derive(Clone)]
pub struct MockVRRemote {
    state: Arc<Mutex<MockVRState>>,
}

impl MockVRRemote {
    pub fn send(&self, msg: MockVRControlMsg) {
        self.state.lock().handle_msg(msg);
    }

    pub fn haptic_pulses(&self) -> Vec<MockHapticPulse> {
        self.state.lock().haptic_pulses.clone()
    }

    pub fn submissions(&self) -> Vec<(VREye, VRLayer)> {
        self.state.lock().submissions.clone()
    }

    pub fn handoffs(&self) -> u32 {
        self.state.lock().handoffs
    }

    pub fn frames(&self) -> u64 {
        self.state.lock().frames
    }

    pub fn overlay(&self, handle: VROverlayHandle) -> Option<MockOverlay> {
        self.state.lock().overlays.get(&handle).cloned()
    }

    pub fn overlay_count(&self) -> usize {
        self.state.lock().overlays.len()
    }

    pub fn pending_events(&self) -> usize {
        self.state.lock().events.len()
    }

    pub fn gaze_polls(&self) -> u64 {
        self.state.lock().gaze_polls
    }

    pub fn shutdown_count(&self) -> u32 {
        self.state.lock().shutdown_count
    }
}
