use std::path::PathBuf;
use crate::VRTextureBounds;

/// Runtime handle of an overlay.
pub type VROverlayHandle = u64;

/// Parameters used to create a world-locked overlay.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde-serialization", derive(Deserialize, Serialize))]
pub struct VROverlayDesc {
    // Physical width of the quad in meters
    pub width: f32,
    // Position relative to the HMD, in application space
    pub position: [f32; 3],
    // Image shown before any texture is submitted
    pub image_path: Option<PathBuf>,
}

impl VROverlayDesc {
    pub fn new(width: f32, position: [f32; 3]) -> VROverlayDesc {
        VROverlayDesc {
            width,
            position,
            image_path: None,
        }
    }

    pub fn with_image<P: Into<PathBuf>>(mut self, path: P) -> VROverlayDesc {
        self.image_path = Some(path.into());
        self
    }
}

/// Runtime side of overlay management. Transforms are native and relative to
/// the tracked device at `device_index`.
pub trait VROverlayService: Send {
    fn create_overlay(&mut self, key: &str, name: &str) -> Result<VROverlayHandle, String>;

    fn set_width(&mut self, handle: VROverlayHandle, width: f32) -> Result<(), String>;

    fn set_transform_relative(&mut self,
                              handle: VROverlayHandle,
                              device_index: u32,
                              transform: [[f32; 4]; 3])
                              -> Result<(), String>;

    fn set_from_file(&mut self, handle: VROverlayHandle, path: &str) -> Result<(), String>;

    fn set_texture_bounds(&mut self, handle: VROverlayHandle, bounds: VRTextureBounds) -> Result<(), String>;

    fn set_texture(&mut self, handle: VROverlayHandle, texture_id: u32) -> Result<(), String>;

    fn show(&mut self, handle: VROverlayHandle) -> Result<(), String>;

    fn hide(&mut self, handle: VROverlayHandle) -> Result<(), String>;

    fn destroy_overlay(&mut self, handle: VROverlayHandle) -> Result<(), String>;
}
