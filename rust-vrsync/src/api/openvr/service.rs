use openvr_sys as openvr;
use rust_vrsync_api::utils;
use rust_vrsync_api::{VRAxisType, VRCompositor, VRControllerHand, VRControllerState, VRDeviceClass, VREye,
                      VROverlayService, VRRuntimeEvent, VRRuntimeEventType, VRService,
                      CONTROLLER_STATE_AXIS_COUNT};
use std::ffi::CStr;
use std::mem;
use std::os::raw::c_char;
use std::ptr;
use super::compositor::OpenVRCompositor;
use super::load_fn_table;
use super::overlay::OpenVROverlayService;

// OpenVR Service implementation
pub struct OpenVRService {
    initialized: bool,
    system: *mut openvr::VR_IVRSystem_FnTable,
}

unsafe impl Send for OpenVRService {}

impl OpenVRService {
    pub fn new() -> OpenVRService {
        OpenVRService {
            initialized: false,
            system: ptr::null_mut(),
        }
    }

    fn system(&self) -> Option<&openvr::VR_IVRSystem_FnTable> {
        if !self.initialized || self.system.is_null() {
            return None;
        }
        unsafe { Some(&*self.system) }
    }
}

fn eye_to_openvr(eye: VREye) -> openvr::EVREye {
    match eye {
        VREye::Left => openvr::EVREye_Eye_Left,
        VREye::Right => openvr::EVREye_Eye_Right,
    }
}

impl VRService for OpenVRService {
    fn is_installed(&self) -> bool {
        unsafe { openvr::VR_IsRuntimeInstalled() }
    }

    fn initialize(&mut self) -> Result<(), String> {
        if self.initialized {
            return Ok(());
        }

        if !self.is_available() {
            return Err("Not available".into());
        }

        // Initialize OpenVR
        let mut error = openvr::EVRInitError_VRInitError_None;
        unsafe {
            openvr::VR_InitInternal(&mut error, openvr::EVRApplicationType_VRApplication_Scene);
        }

        if error != openvr::EVRInitError_VRInitError_None {
            return Err(format!("OpenVR Internal failed with error {}", error as u32));
        }

        // Initialize System
        match unsafe { load_fn_table::<openvr::VR_IVRSystem_FnTable>(openvr::IVRSystem_Version) } {
            Ok(system) => self.system = system,
            Err(msg) => {
                unsafe { openvr::VR_ShutdownInternal(); }
                return Err(msg);
            }
        }

        self.initialized = true;
        Ok(())
    }

    fn is_available(&self) -> bool {
        unsafe { openvr::VR_IsHmdPresent() }
    }

    fn new_compositor(&mut self) -> Result<Box<dyn VRCompositor>, String> {
        if !self.initialized {
            return Err("OpenVR is not initialized".into());
        }
        let compositor = unsafe { load_fn_table::<openvr::VR_IVRCompositor_FnTable>(openvr::IVRCompositor_Version)? };
        Ok(Box::new(OpenVRCompositor::new(compositor)))
    }

    fn new_overlay_service(&mut self) -> Result<Box<dyn VROverlayService>, String> {
        if !self.initialized {
            return Err("OpenVR is not initialized".into());
        }
        let overlay = unsafe { load_fn_table::<openvr::VR_IVROverlay_FnTable>(openvr::IVROverlay_Version)? };
        Ok(Box::new(OpenVROverlayService::new(overlay)))
    }

    fn device_class(&self, index: u32) -> VRDeviceClass {
        let system = match self.system() {
            Some(system) => system,
            None => return VRDeviceClass::Invalid,
        };
        let class = unsafe { system.GetTrackedDeviceClass.unwrap()(index) };
        match class {
            openvr::ETrackedDeviceClass_TrackedDeviceClass_HMD => VRDeviceClass::Hmd,
            openvr::ETrackedDeviceClass_TrackedDeviceClass_Controller => VRDeviceClass::Controller,
            openvr::ETrackedDeviceClass_TrackedDeviceClass_GenericTracker => VRDeviceClass::GenericTracker,
            openvr::ETrackedDeviceClass_TrackedDeviceClass_TrackingReference => VRDeviceClass::TrackingReference,
            openvr::ETrackedDeviceClass_TrackedDeviceClass_DisplayRedirect => VRDeviceClass::DisplayRedirect,
            _ => VRDeviceClass::Invalid,
        }
    }

    fn controller_role(&self, index: u32) -> Option<VRControllerHand> {
        let system = self.system()?;
        let role = unsafe { system.GetControllerRoleForTrackedDeviceIndex.unwrap()(index) };
        match role {
            openvr::ETrackedControllerRole_TrackedControllerRole_LeftHand => Some(VRControllerHand::Left),
            openvr::ETrackedControllerRole_TrackedControllerRole_RightHand => Some(VRControllerHand::Right),
            _ => None,
        }
    }

    fn is_device_connected(&self, index: u32) -> bool {
        match self.system() {
            Some(system) => unsafe { system.IsTrackedDeviceConnected.unwrap()(index) },
            None => false,
        }
    }

    fn serial_number(&self, index: u32) -> Option<String> {
        let system = self.system()?;
        let mut buffer = vec![0 as c_char; openvr::k_unMaxPropertyStringSize as usize];
        let mut error = openvr::ETrackedPropertyError_TrackedProp_Success;
        let len = unsafe {
            system.GetStringTrackedDeviceProperty.unwrap()(index,
                                                           openvr::ETrackedDeviceProperty_Prop_SerialNumber_String,
                                                           buffer.as_mut_ptr(),
                                                           buffer.len() as u32,
                                                           &mut error)
        };
        if error != openvr::ETrackedPropertyError_TrackedProp_Success || len == 0 {
            return None;
        }
        let serial = unsafe { CStr::from_ptr(buffer.as_ptr()) };
        Some(serial.to_string_lossy().into_owned())
    }

    fn axis_type(&self, index: u32, axis: u32) -> VRAxisType {
        let system = match self.system() {
            Some(system) => system,
            None => return VRAxisType::None,
        };
        if axis >= CONTROLLER_STATE_AXIS_COUNT {
            return VRAxisType::None;
        }

        let mut error = openvr::ETrackedPropertyError_TrackedProp_Success;
        let property = openvr::ETrackedDeviceProperty_Prop_Axis0Type_Int32 + axis as openvr::ETrackedDeviceProperty;
        let value = unsafe { system.GetInt32TrackedDeviceProperty.unwrap()(index, property, &mut error) };
        if error != openvr::ETrackedPropertyError_TrackedProp_Success {
            return VRAxisType::None;
        }

        match value as openvr::EVRControllerAxisType {
            openvr::EVRControllerAxisType_k_eControllerAxis_TrackPad => VRAxisType::TrackPad,
            openvr::EVRControllerAxisType_k_eControllerAxis_Joystick => VRAxisType::Joystick,
            openvr::EVRControllerAxisType_k_eControllerAxis_Trigger => VRAxisType::Trigger,
            _ => VRAxisType::None,
        }
    }

    fn controller_state(&self, index: u32) -> Option<VRControllerState> {
        let system = self.system()?;
        let mut state: openvr::VRControllerState_t = unsafe { mem::zeroed() };
        let ok = unsafe {
            system.GetControllerState.unwrap()(index, &mut state, mem::size_of::<openvr::VRControllerState_t>() as u32)
        };
        if !ok {
            return None;
        }

        let mut result = VRControllerState {
            packet_num: state.unPacketNum,
            button_pressed: state.ulButtonPressed,
            button_touched: state.ulButtonTouched,
            axis: Default::default(),
        };
        for (out, axis) in result.axis.iter_mut().zip(state.rAxis.iter()) {
            *out = [axis.x, axis.y];
        }
        Some(result)
    }

    fn poll_next_event(&mut self) -> Option<VRRuntimeEvent> {
        let system = self.system()?;
        let mut event: openvr::VREvent_t = unsafe { mem::zeroed() };
        let size = mem::size_of::<openvr::VREvent_t>() as u32;
        if !unsafe { system.PollNextEvent.unwrap()(&mut event, size) } {
            return None;
        }

        let event_type = match event.eventType {
            openvr::EVREventType_VREvent_ButtonPress => VRRuntimeEventType::ButtonPress,
            openvr::EVREventType_VREvent_ButtonUnpress => VRRuntimeEventType::ButtonUnpress,
            openvr::EVREventType_VREvent_ButtonTouch => VRRuntimeEventType::ButtonTouch,
            openvr::EVREventType_VREvent_ButtonUntouch => VRRuntimeEventType::ButtonUntouch,
            other => VRRuntimeEventType::Other(other as u32),
        };
        // The controller member of the union is only meaningful for button events
        let button = match event_type {
            VRRuntimeEventType::Other(_) => 0,
            _ => unsafe { event.data.controller.button },
        };

        Some(VRRuntimeEvent::new(event.trackedDeviceIndex, event_type, button))
    }

    fn trigger_haptic_pulse(&mut self, index: u32, axis: u32, duration_us: u16) {
        if let Some(system) = self.system() {
            unsafe { system.TriggerHapticPulse.unwrap()(index, axis, duration_us) };
        }
    }

    fn projection_matrix(&self, eye: VREye, near: f32, far: f32) -> [f32; 16] {
        let system = match self.system() {
            Some(system) => system,
            None => return identity_matrix!(),
        };
        let m = unsafe { system.GetProjectionMatrix.unwrap()(eye_to_openvr(eye), near, far).m };
        // Row major to column major
        utils::transpose_matrix(&[m[0][0], m[0][1], m[0][2], m[0][3],
                                  m[1][0], m[1][1], m[1][2], m[1][3],
                                  m[2][0], m[2][1], m[2][2], m[2][3],
                                  m[3][0], m[3][1], m[3][2], m[3][3]])
    }

    fn eye_to_head_transform(&self, eye: VREye) -> [f32; 16] {
        let system = match self.system() {
            Some(system) => system,
            None => return identity_matrix!(),
        };
        let m = unsafe { system.GetEyeToHeadTransform.unwrap()(eye_to_openvr(eye)).m };
        utils::matrix34_to_array(&m)
    }

    fn shutdown(&mut self) {
        if !self.initialized {
            return;
        }
        self.initialized = false;
        self.system = ptr::null_mut();
        info!("OpenVR Shutdown");
        unsafe { openvr::VR_ShutdownInternal() };
    }
}

impl Drop for OpenVRService {
    fn drop(&mut self) {
        self.shutdown();
    }
}
