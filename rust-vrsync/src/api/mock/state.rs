use rust_vrsync_api::utils;
use rust_vrsync_api::{MockVRControlMsg, VRAxisType, VRCompositorError, VRControllerHand, VRControllerState,
                      VRDeviceClass, VREye, VRLayer, VROverlayHandle, VRRawGazeData, VRRuntimeEvent,
                      VRTextureBounds, CONTROLLER_STATE_AXIS_COUNT, MAX_TRACKED_DEVICE_COUNT};
use std::collections::{HashMap, VecDeque};
use std::path::PathBuf;
use super::MockVRInit;

const AXIS_COUNT: usize = CONTROLLER_STATE_AXIS_COUNT as usize;

#[derive(Debug, Clone)]
pub struct MockDevice {
    pub class: VRDeviceClass,
    pub role: Option<VRControllerHand>,
    pub serial: Option<String>,
    pub connected: bool,
    pub tracking: bool,
    // Native, column major
    pub pose: [f32; 16],
    pub axis_types: [VRAxisType; AXIS_COUNT],
    pub controller_state: Option<VRControllerState>,
}

impl Default for MockDevice {
    fn default() -> MockDevice {
        MockDevice {
            class: VRDeviceClass::Invalid,
            role: None,
            serial: None,
            connected: false,
            tracking: false,
            pose: identity_matrix!(),
            axis_types: [VRAxisType::None; AXIS_COUNT],
            controller_state: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MockHapticPulse {
    pub index: u32,
    pub axis: u32,
    pub duration_us: u16,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MockOverlay {
    pub key: String,
    pub width: f32,
    pub device_index: Option<u32>,
    pub transform: Option<[[f32; 4]; 3]>,
    pub image_path: Option<PathBuf>,
    pub bounds: VRTextureBounds,
    pub texture_id: Option<u32>,
    pub visible: bool,
}

/// Everything the mock runtime reports or records.
pub struct MockVRState {
    pub init: MockVRInit,
    pub initialized: bool,
    pub shutdown_count: u32,
    pub devices: Vec<MockDevice>,
    pub events: VecDeque<VRRuntimeEvent>,
    pub wait_error: Option<VRCompositorError>,
    pub submit_error: Option<VRCompositorError>,
    pub projection_matrices: Option<([f32; 16], [f32; 16])>,
    pub eye_to_head: ([f32; 16], [f32; 16]),
    pub haptic_pulses: Vec<MockHapticPulse>,
    pub submissions: Vec<(VREye, VRLayer)>,
    pub handoffs: u32,
    pub frames: u64,
    pub overlays: HashMap<VROverlayHandle, MockOverlay>,
    pub next_overlay: VROverlayHandle,
    pub gaze_data: Result<VRRawGazeData, String>,
    pub gaze_polls: u64,
}

impl MockVRState {
    pub fn new(init: MockVRInit) -> MockVRState {
        let mut devices = vec![MockDevice::default(); MAX_TRACKED_DEVICE_COUNT as usize];

        // Simulates a standing user wearing an HTC Vive
        let mut hmd_pose: [f32; 16] = identity_matrix!();
        utils::set_matrix_position(&mut hmd_pose, [0.0, 1.6, 0.0]);
        devices[0] = MockDevice {
            class: VRDeviceClass::Hmd,
            serial: Some("LHR-MOCKHMD".into()),
            connected: true,
            tracking: true,
            pose: hmd_pose,
            ..MockDevice::default()
        };

        MockVRState {
            init,
            initialized: false,
            shutdown_count: 0,
            devices,
            events: VecDeque::new(),
            wait_error: None,
            submit_error: None,
            projection_matrices: None,
            eye_to_head: (eye_to_head([-0.035949998, 0.0, 0.015]), eye_to_head([0.035949998, 0.0, 0.015])),
            haptic_pulses: Vec::new(),
            submissions: Vec::new(),
            handoffs: 0,
            frames: 0,
            overlays: HashMap::new(),
            next_overlay: 1,
            gaze_data: Err("no eye data yet".into()),
            gaze_polls: 0,
        }
    }

    pub fn device(&self, index: u32) -> Option<&MockDevice> {
        self.devices.get(index as usize)
    }

    fn device_mut(&mut self, index: u32) -> Option<&mut MockDevice> {
        let device = self.devices.get_mut(index as usize);
        if device.is_none() {
            warn!("Mock device index {} out of range", index);
        }
        device
    }

    // Simulates HTC Vive projections, with the depth terms recomputed for the requested clip planes
    pub fn projection_matrix(&self, eye: VREye, near: f32, far: f32) -> [f32; 16] {
        if let Some((left, right)) = self.projection_matrices {
            return match eye {
                VREye::Left => left,
                VREye::Right => right,
            };
        }

        let mut m = match eye {
            VREye::Left => [0.75620246, 0.0, 0.0, 0.0,
                            0.0, 0.68050665, 0.0, 0.0,
                           -0.05713458, -0.0021225351, -1.0000999, -1.0,
                            0.0, 0.0, -0.10000999, 0.0],
            VREye::Right => [0.75646526, 0.0, 0.0, 0.0,
                             0.0, 0.68069947, 0.0, 0.0,
                             0.055611316, -0.005315368, -1.0000999, -1.0,
                             0.0, 0.0, -0.10000999, 0.0],
        };
        m[10] = far / (near - far);
        m[14] = near * far / (near - far);
        m
    }

    pub fn handle_msg(&mut self, msg: MockVRControlMsg) {
        match msg {
            MockVRControlMsg::AddDevice { index, class, role, serial } => {
                let axis_types = if class == VRDeviceClass::Controller {
                    // Vive wand layout
                    [VRAxisType::TrackPad, VRAxisType::Trigger, VRAxisType::None, VRAxisType::None, VRAxisType::None]
                } else {
                    [VRAxisType::None; AXIS_COUNT]
                };
                let controller_state = if class == VRDeviceClass::Controller {
                    Some(VRControllerState::default())
                } else {
                    None
                };
                if let Some(device) = self.device_mut(index) {
                    *device = MockDevice {
                        class,
                        role,
                        serial,
                        connected: true,
                        tracking: true,
                        pose: identity_matrix!(),
                        axis_types,
                        controller_state,
                    };
                }
            },
            MockVRControlMsg::DisconnectDevice(index) => {
                if let Some(device) = self.device_mut(index) {
                    device.connected = false;
                }
            },
            MockVRControlMsg::SetDevicePose(index, pose) => {
                if let Some(device) = self.device_mut(index) {
                    device.pose = pose;
                    device.tracking = true;
                }
            },
            MockVRControlMsg::LoseTracking(index) => {
                if let Some(device) = self.device_mut(index) {
                    device.tracking = false;
                }
            },
            MockVRControlMsg::SetAxisTypes(index, types) => {
                if let Some(device) = self.device_mut(index) {
                    device.axis_types = [VRAxisType::None; AXIS_COUNT];
                    for (slot, axis_type) in device.axis_types.iter_mut().zip(types) {
                        *slot = axis_type;
                    }
                }
            },
            MockVRControlMsg::SetControllerState(index, state) => {
                if let Some(device) = self.device_mut(index) {
                    device.controller_state = state;
                }
            },
            MockVRControlMsg::PushEvent(event) => {
                self.events.push_back(event);
            },
            MockVRControlMsg::SetWaitError(err) => {
                self.wait_error = err;
            },
            MockVRControlMsg::SetSubmitError(err) => {
                self.submit_error = err;
            },
            MockVRControlMsg::SetProjectionMatrices(left, right) => {
                self.projection_matrices = Some((left, right));
            },
            MockVRControlMsg::SetEyeToHeadTransforms(left, right) => {
                self.eye_to_head = (left, right);
            },
            MockVRControlMsg::SetGazeData(data) => {
                self.gaze_data = data;
            },
        }
    }
}

fn eye_to_head(offset: [f32; 3]) -> [f32; 16] {
    let mut m: [f32; 16] = identity_matrix!();
    utils::set_matrix_position(&mut m, offset);
    m
}
