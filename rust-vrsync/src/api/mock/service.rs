use parking_lot::Mutex;
use rust_vrsync_api::utils;
use rust_vrsync_api::{VRAxisType, VRCompositor, VRCompositorError, VRControllerHand, VRControllerState,
                      VRDeviceClass, VREye, VRGazeDevice, VRLayer, VROverlayHandle, VROverlayService,
                      VRRawGazeData, VRRuntimeEvent, VRService, VRTextureBounds, VRTrackedPose};
use std::path::PathBuf;
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use super::{MockHapticPulse, MockOverlay, MockVRState};

pub struct MockVRService {
    state: Arc<Mutex<MockVRState>>,
}

impl MockVRService {
    pub fn new(state: Arc<Mutex<MockVRState>>) -> MockVRService {
        MockVRService { state }
    }
}

impl VRService for MockVRService {
    fn is_installed(&self) -> bool {
        self.state.lock().init.installed
    }

    fn initialize(&mut self) -> Result<(), String> {
        let mut state = self.state.lock();
        if !state.init.hmd_present {
            return Err("HMD not found".into());
        }
        state.initialized = true;
        Ok(())
    }

    fn is_available(&self) -> bool {
        self.state.lock().init.hmd_present
    }

    fn new_compositor(&mut self) -> Result<Box<dyn VRCompositor>, String> {
        if !self.state.lock().init.compositor_available {
            return Err("compositor interface not found".into());
        }
        Ok(Box::new(MockVRCompositor { state: self.state.clone() }))
    }

    fn new_overlay_service(&mut self) -> Result<Box<dyn VROverlayService>, String> {
        if !self.state.lock().init.overlays_available {
            return Err("overlay interface not found".into());
        }
        Ok(Box::new(MockOverlayService { state: self.state.clone() }))
    }

    fn device_class(&self, index: u32) -> VRDeviceClass {
        self.state.lock().device(index).map_or(VRDeviceClass::Invalid, |d| d.class)
    }

    fn controller_role(&self, index: u32) -> Option<VRControllerHand> {
        self.state.lock().device(index).and_then(|d| d.role)
    }

    fn is_device_connected(&self, index: u32) -> bool {
        self.state.lock().device(index).map_or(false, |d| d.connected)
    }

    fn serial_number(&self, index: u32) -> Option<String> {
        self.state.lock().device(index).and_then(|d| d.serial.clone())
    }

    fn axis_type(&self, index: u32, axis: u32) -> VRAxisType {
        let state = self.state.lock();
        state.device(index)
             .and_then(|d| d.axis_types.get(axis as usize).cloned())
             .unwrap_or(VRAxisType::None)
    }

    fn controller_state(&self, index: u32) -> Option<VRControllerState> {
        self.state.lock().device(index).and_then(|d| d.controller_state)
    }

    fn poll_next_event(&mut self) -> Option<VRRuntimeEvent> {
        self.state.lock().events.pop_front()
    }

    fn trigger_haptic_pulse(&mut self, index: u32, axis: u32, duration_us: u16) {
        self.state.lock().haptic_pulses.push(MockHapticPulse { index, axis, duration_us });
    }

    fn projection_matrix(&self, eye: VREye, near: f32, far: f32) -> [f32; 16] {
        self.state.lock().projection_matrix(eye, near, far)
    }

    fn eye_to_head_transform(&self, eye: VREye) -> [f32; 16] {
        let state = self.state.lock();
        match eye {
            VREye::Left => state.eye_to_head.0,
            VREye::Right => state.eye_to_head.1,
        }
    }

    fn shutdown(&mut self) {
        let mut state = self.state.lock();
        state.initialized = false;
        state.shutdown_count += 1;
    }
}

pub struct MockVRCompositor {
    state: Arc<Mutex<MockVRState>>,
}

impl VRCompositor for MockVRCompositor {
    fn wait_get_poses(&mut self, poses: &mut [VRTrackedPose]) -> Result<(), VRCompositorError> {
        // Simulate Vsync
        thread::sleep(Duration::from_millis(1));

        let mut state = self.state.lock();
        state.frames += 1;
        match state.wait_error {
            Some(err) if !err.is_benign() => return Err(err),
            _ => {}
        }

        for (pose, device) in poses.iter_mut().zip(state.devices.iter()) {
            *pose = VRTrackedPose {
                device_to_absolute_tracking: utils::array_to_matrix34(&device.pose),
                pose_is_valid: device.connected && device.tracking,
                device_is_connected: device.connected,
            };
        }
        match state.wait_error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn submit(&mut self, eye: VREye, layer: &VRLayer) -> Result<(), VRCompositorError> {
        let mut state = self.state.lock();
        if let Some(err) = state.submit_error {
            return Err(err);
        }
        state.submissions.push((eye, *layer));
        Ok(())
    }

    fn post_present_handoff(&mut self) {
        self.state.lock().handoffs += 1;
    }
}

pub struct MockOverlayService {
    state: Arc<Mutex<MockVRState>>,
}

impl MockOverlayService {
    fn with_overlay<F>(&mut self, handle: VROverlayHandle, f: F) -> Result<(), String>
        where F: FnOnce(&mut MockOverlay)
    {
        match self.state.lock().overlays.get_mut(&handle) {
            Some(overlay) => {
                f(overlay);
                Ok(())
            },
            None => Err(format!("invalid overlay handle {}", handle)),
        }
    }
}

impl VROverlayService for MockOverlayService {
    fn create_overlay(&mut self, key: &str, _name: &str) -> Result<VROverlayHandle, String> {
        let mut state = self.state.lock();
        if state.overlays.values().any(|o| o.key == key) {
            return Err(format!("overlay key {} already in use", key));
        }
        let handle = state.next_overlay;
        state.next_overlay += 1;
        state.overlays.insert(handle, MockOverlay {
            key: key.into(),
            width: 1.0,
            device_index: None,
            transform: None,
            image_path: None,
            bounds: VRTextureBounds::default(),
            texture_id: None,
            visible: false,
        });
        Ok(handle)
    }

    fn set_width(&mut self, handle: VROverlayHandle, width: f32) -> Result<(), String> {
        self.with_overlay(handle, |o| o.width = width)
    }

    fn set_transform_relative(&mut self,
                              handle: VROverlayHandle,
                              device_index: u32,
                              transform: [[f32; 4]; 3])
                              -> Result<(), String> {
        self.with_overlay(handle, |o| {
            o.device_index = Some(device_index);
            o.transform = Some(transform);
        })
    }

    fn set_from_file(&mut self, handle: VROverlayHandle, path: &str) -> Result<(), String> {
        self.with_overlay(handle, |o| o.image_path = Some(PathBuf::from(path)))
    }

    fn set_texture_bounds(&mut self, handle: VROverlayHandle, bounds: VRTextureBounds) -> Result<(), String> {
        self.with_overlay(handle, |o| o.bounds = bounds)
    }

    fn set_texture(&mut self, handle: VROverlayHandle, texture_id: u32) -> Result<(), String> {
        self.with_overlay(handle, |o| o.texture_id = Some(texture_id))
    }

    fn show(&mut self, handle: VROverlayHandle) -> Result<(), String> {
        self.with_overlay(handle, |o| o.visible = true)
    }

    fn hide(&mut self, handle: VROverlayHandle) -> Result<(), String> {
        self.with_overlay(handle, |o| o.visible = false)
    }

    fn destroy_overlay(&mut self, handle: VROverlayHandle) -> Result<(), String> {
        match self.state.lock().overlays.remove(&handle) {
            Some(_) => Ok(()),
            None => Err(format!("invalid overlay handle {}", handle)),
        }
    }
}

pub struct MockGazeDevice {
    state: Arc<Mutex<MockVRState>>,
}

impl MockGazeDevice {
    pub fn new(state: Arc<Mutex<MockVRState>>) -> MockGazeDevice {
        MockGazeDevice { state }
    }
}

impl VRGazeDevice for MockGazeDevice {
    fn is_supported(&self) -> bool {
        self.state.lock().init.gaze.as_ref().map_or(false, |g| g.supported)
    }

    fn initialize(&mut self) -> Result<(), String> {
        match self.state.lock().init.gaze.as_ref().and_then(|g| g.init_error.clone()) {
            Some(msg) => Err(msg),
            None => Ok(()),
        }
    }

    fn poll(&mut self) -> Result<VRRawGazeData, String> {
        let mut state = self.state.lock();
        state.gaze_polls += 1;
        state.gaze_data.clone()
    }
}
