/// Sub-rectangle of a texture, in normalized coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde-serialization", derive(Deserialize, Serialize))]
pub struct VRTextureBounds {
    pub u_min: f32,
    pub u_max: f32,
    pub v_min: f32,
    pub v_max: f32,
}

impl Default for VRTextureBounds {
    fn default() -> VRTextureBounds {
        VRTextureBounds {
            u_min: 0.0,
            u_max: 1.0,
            v_min: 0.0,
            v_max: 1.0,
        }
    }
}

impl VRTextureBounds {
    pub fn new(u_min: f32, u_max: f32, v_min: f32, v_max: f32) -> VRTextureBounds {
        VRTextureBounds { u_min, u_max, v_min, v_max }
    }
}

/// An opaque renderer texture handed to the compositor.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde-serialization", derive(Deserialize, Serialize))]
pub struct VRLayer {
    pub texture_id: u32,
    pub bounds: VRTextureBounds,
}

impl VRLayer {
    pub fn new(texture_id: u32) -> VRLayer {
        VRLayer {
            texture_id,
            bounds: VRTextureBounds::default(),
        }
    }
}
