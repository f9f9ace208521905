use openvr_sys as openvr;
use rust_vrsync_api::{VRCompositor, VRCompositorError, VREye, VRLayer, VRTextureBounds, VRTrackedPose,
                      MAX_TRACKED_DEVICE_COUNT};
use std::mem;
use std::os::raw::c_void;
use std::ptr;

pub struct OpenVRCompositor {
    compositor: *mut openvr::VR_IVRCompositor_FnTable,
    poses: Vec<openvr::TrackedDevicePose_t>,
}

unsafe impl Send for OpenVRCompositor {}

impl OpenVRCompositor {
    pub fn new(compositor: *mut openvr::VR_IVRCompositor_FnTable) -> OpenVRCompositor {
        OpenVRCompositor {
            compositor,
            poses: vec![unsafe { mem::zeroed() }; MAX_TRACKED_DEVICE_COUNT as usize],
        }
    }
}

pub fn texture_bounds_to_openvr(bounds: &VRTextureBounds) -> openvr::VRTextureBounds_t {
    openvr::VRTextureBounds_t {
        uMin: bounds.u_min,
        vMin: bounds.v_min,
        uMax: bounds.u_max,
        vMax: bounds.v_max,
    }
}

pub fn gl_texture(texture_id: u32, color_space: openvr::EColorSpace) -> openvr::Texture_t {
    openvr::Texture_t {
        handle: texture_id as usize as *mut c_void,
        eType: openvr::ETextureType_TextureType_OpenGL,
        eColorSpace: color_space,
    }
}

impl VRCompositor for OpenVRCompositor {
    fn wait_get_poses(&mut self, poses: &mut [VRTrackedPose]) -> Result<(), VRCompositorError> {
        let count = poses.len().min(self.poses.len());
        let error = unsafe {
            (*self.compositor).WaitGetPoses.unwrap()(self.poses.as_mut_ptr(), count as u32, ptr::null_mut(), 0)
        };

        // The runtime fills the poses even when it reports an error
        for (out, pose) in poses.iter_mut().zip(self.poses.iter()) {
            *out = VRTrackedPose {
                device_to_absolute_tracking: pose.mDeviceToAbsoluteTracking.m,
                pose_is_valid: pose.bPoseIsValid,
                device_is_connected: pose.bDeviceIsConnected,
            };
        }
        match VRCompositorError::from_code(error as u32) {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn submit(&mut self, eye: VREye, layer: &VRLayer) -> Result<(), VRCompositorError> {
        let eye = match eye {
            VREye::Left => openvr::EVREye_Eye_Left,
            VREye::Right => openvr::EVREye_Eye_Right,
        };
        let mut texture = gl_texture(layer.texture_id, openvr::EColorSpace_ColorSpace_Gamma);
        let mut bounds = texture_bounds_to_openvr(&layer.bounds);
        let error = unsafe {
            (*self.compositor).Submit.unwrap()(eye, &mut texture, &mut bounds, openvr::EVRSubmitFlags_Submit_Default)
        };
        match VRCompositorError::from_code(error as u32) {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn post_present_handoff(&mut self) {
        unsafe { (*self.compositor).PostPresentHandoff.unwrap()() };
    }
}

