mod compositor;
mod overlay;
mod service;

use openvr_sys as openvr;
use rust_vrsync_api::{VRService, VRServiceCreator};
use std::os::raw::c_char;

pub struct OpenVRServiceCreator;

impl OpenVRServiceCreator {
    pub fn new() -> Box<dyn VRServiceCreator> {
        Box::new(OpenVRServiceCreator)
    }
}

impl VRServiceCreator for OpenVRServiceCreator {
    fn new_service(&self) -> Box<dyn VRService> {
        Box::new(service::OpenVRService::new())
    }
}

// Fetches the C function table of an interface. `version` is the nul terminated
// interface version string exported by openvr_sys.
unsafe fn load_fn_table<T>(version: &[u8]) -> Result<*mut T, String> {
    let mut name = Vec::from(&b"FnTable:"[..]);
    name.extend_from_slice(version);

    let mut error = openvr::EVRInitError_VRInitError_None;
    let table = openvr::VR_GetGenericInterface(name.as_ptr() as *const c_char, &mut error);
    if error != openvr::EVRInitError_VRInitError_None || table == 0 {
        return Err(format!("OpenVR GetGenericInterface failed with error {}", error as u32));
    }
    Ok(table as *mut T)
}
