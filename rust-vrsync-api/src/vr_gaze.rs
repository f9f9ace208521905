use bitflags::bitflags;

bitflags! {
    /// Validity bits reported with each combined eye sample.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct VRGazeValidity: u32 {
        const ORIGIN = 1 << 0;
        const DIRECTION = 1 << 1;
        const PUPIL_DIAMETER = 1 << 2;
    }
}

/// One combined-eye sample as read from the eye tracking hardware.
///
/// `origin_mm` and `direction` are in the tracker's own head frame, which is
/// mirrored on x and z relative to the HMD's native frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct VRRawGazeData {
    pub validity: VRGazeValidity,
    pub origin_mm: [f32; 3],
    pub direction: [f32; 3],
    pub left_pupil_diameter_mm: f32,
    pub right_pupil_diameter_mm: f32,
}

impl VRRawGazeData {
    // Value the hardware reports for a coordinate it could not measure
    pub const SENTINEL: [f32; 3] = [-1.0, -1.0, -1.0];
}

/// Gaze ray in application space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde-serialization", derive(Deserialize, Serialize))]
pub struct VRGazeSample {
    pub is_valid: bool,
    // meters
    pub origin: [f32; 3],
    // unit vector
    pub direction: [f32; 3],
    // millimeters
    pub left_pupil_diameter: f32,
    pub right_pupil_diameter: f32,
}

impl VRGazeSample {
    pub fn invalid() -> VRGazeSample {
        VRGazeSample::default()
    }
}

/// Eye tracking hardware attached to the HMD.
///
/// The device is moved into the gaze thread, so it must be `Send`.
pub trait VRGazeDevice: Send {
    fn is_supported(&self) -> bool;

    fn initialize(&mut self) -> Result<(), String>;

    fn poll(&mut self) -> Result<VRRawGazeData, String>;
}
