use rust_vrsync_api::utils;
use rust_vrsync_api::{VRAxisType, VRCompositor, VRControllerHand, VRDeviceClass, VRDeviceRole, VRDeviceState,
                      VRService, VRTrackedPose, VRTrackerRegistry, CONTROLLER_STATE_AXIS_COUNT,
                      MAX_TRACKED_DEVICE_COUNT};
use crate::snapshot::VRHmdSnapshot;

/// Per frame device pose synchronization.
///
/// Everything held here is in native tracking space. The offset is added to
/// the translation of every device transform before it is stored.
pub struct VRPoseSync {
    hmd: VRDeviceState,
    left_controller: VRDeviceState,
    right_controller: VRDeviceState,
    trackers: VRTrackerRegistry,
    // HMD position before the offset was added
    hmd_actual_position: [f32; 3],
    offset: [f32; 3],
    poses: Vec<VRTrackedPose>,
}

impl Default for VRPoseSync {
    fn default() -> VRPoseSync {
        VRPoseSync::new()
    }
}

impl VRPoseSync {
    pub fn new() -> VRPoseSync {
        VRPoseSync {
            hmd: VRDeviceState::new(),
            left_controller: VRDeviceState::new(),
            right_controller: VRDeviceState::new(),
            trackers: VRTrackerRegistry::new(),
            hmd_actual_position: [0.0, 0.0, 0.0],
            offset: [0.0, 0.0, 0.0],
            poses: vec![VRTrackedPose::default(); MAX_TRACKED_DEVICE_COUNT as usize],
        }
    }

    pub fn offset(&self) -> [f32; 3] {
        self.offset
    }

    // Takes effect on the next update
    pub fn set_offset(&mut self, offset: [f32; 3]) {
        self.offset = offset;
    }

    pub fn device(&self, role: VRDeviceRole) -> &VRDeviceState {
        match role {
            VRDeviceRole::Hmd => &self.hmd,
            VRDeviceRole::LeftController => &self.left_controller,
            VRDeviceRole::RightController => &self.right_controller,
        }
    }

    pub fn controller(&self, hand: VRControllerHand) -> &VRDeviceState {
        self.device(hand.into())
    }

    pub fn trackers(&self) -> &VRTrackerRegistry {
        &self.trackers
    }

    pub fn hmd_actual_position(&self) -> Option<[f32; 3]> {
        if self.hmd.is_valid {
            Some(self.hmd_actual_position)
        } else {
            None
        }
    }

    pub fn hmd_snapshot(&self) -> VRHmdSnapshot {
        VRHmdSnapshot {
            is_valid: self.hmd.is_valid,
            transform: self.hmd.transform,
            position: self.hmd.position,
        }
    }

    pub fn invalidate_all(&mut self) {
        self.hmd.invalidate();
        self.left_controller.invalidate();
        self.right_controller.invalidate();
        self.trackers.invalidate_all();
    }

    // Blocks in the compositor until the runtime hands out the poses for the next frame
    pub fn update(&mut self, service: &dyn VRService, compositor: &mut dyn VRCompositor) {
        self.invalidate_all();

        for pose in self.poses.iter_mut() {
            *pose = VRTrackedPose::default();
        }

        match compositor.wait_get_poses(&mut self.poses) {
            Ok(()) => {},
            // Poses are still handed out before the application has focus
            Err(err) if err.is_benign() => {},
            Err(err) => {
                warn!("Unable to read device poses: {}", err);
                return;
            }
        }

        for index in 0..MAX_TRACKED_DEVICE_COUNT {
            let pose = self.poses[index as usize];
            if !pose.pose_is_valid || !service.is_device_connected(index) {
                continue;
            }

            let mut transform = utils::matrix34_to_array(&pose.device_to_absolute_tracking);
            let native_position = utils::matrix_position(&transform);
            utils::set_matrix_position(&mut transform, [native_position[0] + self.offset[0],
                                                        native_position[1] + self.offset[1],
                                                        native_position[2] + self.offset[2]]);

            match service.device_class(index) {
                VRDeviceClass::Hmd => {
                    self.hmd_actual_position = native_position;
                    self.hmd.update_pose(index, transform);
                },
                VRDeviceClass::Controller => {
                    let hand = match service.controller_role(index) {
                        Some(hand) => hand,
                        None => {
                            debug!("Skipping controller {} without a hand role", index);
                            continue;
                        }
                    };
                    let controller = match hand {
                        VRControllerHand::Left => &mut self.left_controller,
                        VRControllerHand::Right => &mut self.right_controller,
                    };
                    controller.update_pose(index, transform);
                    update_controller_input(service, index, controller);
                },
                VRDeviceClass::GenericTracker => {
                    match service.serial_number(index) {
                        Some(serial) => self.trackers.upsert(&serial, index, transform),
                        None => debug!("Skipping tracker {} without a serial number", index),
                    }
                },
                _ => {}
            }
        }
    }
}

// Axis slots are rediscovered every frame, the device behind a hand can change.
fn update_controller_input(service: &dyn VRService, index: u32, controller: &mut VRDeviceState) {
    let mut trigger_axis = None;
    let mut touchpad_axis = None;
    for axis in 0..CONTROLLER_STATE_AXIS_COUNT {
        match service.axis_type(index, axis) {
            VRAxisType::Trigger => trigger_axis = Some(axis),
            axis_type if axis_type.is_touchpad() => touchpad_axis = Some(axis),
            _ => {}
        }
    }

    let data = &mut controller.controller;
    data.trigger_axis = trigger_axis;
    data.touchpad_axis = touchpad_axis;

    let state = match service.controller_state(index) {
        Some(state) => state,
        None => {
            // Input that cannot be read makes the whole controller invalid
            controller.is_valid = false;
            return;
        }
    };

    // Slots missing on this device read as released
    data.trigger_fraction = 0.0;
    data.touchpad = [0.0, 0.0];
    if let Some(axis) = trigger_axis {
        data.trigger_fraction = state.axis[axis as usize][0];
    }
    if let Some(axis) = touchpad_axis {
        data.touchpad = state.axis[axis as usize];
    }
    data.buttons_pressed = state.button_pressed;
}
