use openvr_sys as openvr;
use rust_vrsync_api::{VROverlayHandle, VROverlayService, VRTextureBounds};
use std::ffi::CString;
use super::compositor::{gl_texture, texture_bounds_to_openvr};

pub struct OpenVROverlayService {
    overlay: *mut openvr::VR_IVROverlay_FnTable,
}

unsafe impl Send for OpenVROverlayService {}

fn check(error: openvr::EVROverlayError, what: &str) -> Result<(), String> {
    if error == openvr::EVROverlayError_VROverlayError_None {
        Ok(())
    } else {
        Err(format!("unable to {} (error {})", what, error as u32))
    }
}

fn c_string(value: &str) -> Result<CString, String> {
    CString::new(value).map_err(|_| format!("{:?} contains a nul byte", value))
}

impl OpenVROverlayService {
    pub fn new(overlay: *mut openvr::VR_IVROverlay_FnTable) -> OpenVROverlayService {
        OpenVROverlayService { overlay }
    }

    fn table(&self) -> &openvr::VR_IVROverlay_FnTable {
        unsafe { &*self.overlay }
    }
}

impl VROverlayService for OpenVROverlayService {
    fn create_overlay(&mut self, key: &str, name: &str) -> Result<VROverlayHandle, String> {
        let key = c_string(key)?;
        let name = c_string(name)?;
        let mut handle: openvr::VROverlayHandle_t = 0;
        let error = unsafe {
            self.table().CreateOverlay.unwrap()(key.as_ptr() as *mut _, name.as_ptr() as *mut _, &mut handle)
        };
        check(error, "create overlay")?;
        Ok(handle)
    }

    fn set_width(&mut self, handle: VROverlayHandle, width: f32) -> Result<(), String> {
        let error = unsafe { self.table().SetOverlayWidthInMeters.unwrap()(handle, width) };
        check(error, "set overlay width")
    }

    fn set_transform_relative(&mut self,
                              handle: VROverlayHandle,
                              device_index: u32,
                              transform: [[f32; 4]; 3])
                              -> Result<(), String> {
        let mut matrix = openvr::HmdMatrix34_t { m: transform };
        let error = unsafe {
            self.table().SetOverlayTransformTrackedDeviceRelative.unwrap()(handle, device_index, &mut matrix)
        };
        check(error, "set overlay relative to HMD")
    }

    fn set_from_file(&mut self, handle: VROverlayHandle, path: &str) -> Result<(), String> {
        let path = c_string(path)?;
        let error = unsafe { self.table().SetOverlayFromFile.unwrap()(handle, path.as_ptr() as *mut _) };
        check(error, "load overlay image")
    }

    fn set_texture_bounds(&mut self, handle: VROverlayHandle, bounds: VRTextureBounds) -> Result<(), String> {
        let mut bounds = texture_bounds_to_openvr(&bounds);
        let error = unsafe { self.table().SetOverlayTextureBounds.unwrap()(handle, &mut bounds) };
        check(error, "crop overlay")
    }

    fn set_texture(&mut self, handle: VROverlayHandle, texture_id: u32) -> Result<(), String> {
        let mut texture = gl_texture(texture_id, openvr::EColorSpace_ColorSpace_Auto);
        let error = unsafe { self.table().SetOverlayTexture.unwrap()(handle, &mut texture) };
        check(error, "set overlay texture")
    }

    fn show(&mut self, handle: VROverlayHandle) -> Result<(), String> {
        let error = unsafe { self.table().ShowOverlay.unwrap()(handle) };
        check(error, "show overlay")
    }

    fn hide(&mut self, handle: VROverlayHandle) -> Result<(), String> {
        let error = unsafe { self.table().HideOverlay.unwrap()(handle) };
        check(error, "hide overlay")
    }

    fn destroy_overlay(&mut self, handle: VROverlayHandle) -> Result<(), String> {
        let error = unsafe { self.table().DestroyOverlay.unwrap()(handle) };
        check(error, "destroy overlay")
    }
}
