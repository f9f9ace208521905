use rust_vrsync_api::utils;
use rust_vrsync_api::vr_coordinate_transform as coords;
use rust_vrsync_api::{VRError, VRGazeDevice, VRGazeSample, VRGazeValidity, VRRawGazeData, VRResult};
use crate::snapshot::{VRHmdSnapshot, VRSnapshot};
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Source of the latest gaze sample for the frame loop.
pub trait VRGazeTracker: Send {
    fn latest(&self) -> VRGazeSample;

    fn is_active(&self) -> bool;

    // Idempotent
    fn stop(&mut self);
}

/// Used when eye tracking was not requested. Every sample is invalid.
#[derive(Debug, Default)]
pub struct DisabledGazeTracker;

impl VRGazeTracker for DisabledGazeTracker {
    fn latest(&self) -> VRGazeSample {
        VRGazeSample::invalid()
    }

    fn is_active(&self) -> bool {
        false
    }

    fn stop(&mut self) {
        // No op
    }
}

/// Polls the eye tracking device on a dedicated thread and publishes
/// application space gaze rays.
pub struct ThreadedGazeTracker {
    sample: VRSnapshot<VRGazeSample>,
    stop_sender: Option<Sender<()>>,
    thread: Option<JoinHandle<()>>,
}

impl ThreadedGazeTracker {
    pub fn start(mut device: Box<dyn VRGazeDevice>,
                 hmd: VRSnapshot<VRHmdSnapshot>,
                 poll_interval: Duration)
                 -> VRResult<ThreadedGazeTracker> {
        if !device.is_supported() {
            return Err(VRError::GazeUnsupported);
        }
        device.initialize().map_err(VRError::GazeInit)?;

        let sample = VRSnapshot::new(VRGazeSample::invalid());
        let published = sample.clone();
        let (stop_sender, stop_receiver) = mpsc::channel::<()>();

        let thread = thread::Builder::new().name("vr-gaze".into()).spawn(move || {
            info!("Eye tracking thread started");
            loop {
                let next = match device.poll() {
                    Ok(raw) => process_gaze_sample(&raw, &hmd.load()),
                    Err(msg) => {
                        debug!("Eye tracking poll failed: {}", msg);
                        VRGazeSample::invalid()
                    }
                };
                published.publish(next);

                // Doubles as the pause between polls
                match stop_receiver.recv_timeout(poll_interval) {
                    Err(RecvTimeoutError::Timeout) => continue,
                    Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                }
            }
            info!("Eye tracking thread stopped");
        })?;

        Ok(ThreadedGazeTracker {
            sample,
            stop_sender: Some(stop_sender),
            thread: Some(thread),
        })
    }
}

impl VRGazeTracker for ThreadedGazeTracker {
    fn latest(&self) -> VRGazeSample {
        *self.sample.load()
    }

    fn is_active(&self) -> bool {
        self.thread.is_some()
    }

    fn stop(&mut self) {
        if let Some(sender) = self.stop_sender.take() {
            let _ = sender.send(());
        }
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                error!("Eye tracking thread panicked");
            }
        }
    }
}

impl Drop for ThreadedGazeTracker {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Converts a raw eye tracker sample into an application space gaze ray.
///
/// The raw sample is relative to the head, so the HMD pose of the same frame
/// is required to place it in the world.
pub fn process_gaze_sample(raw: &VRRawGazeData, hmd: &VRHmdSnapshot) -> VRGazeSample {
    if !raw.validity.contains(VRGazeValidity::ORIGIN | VRGazeValidity::DIRECTION) {
        return VRGazeSample::invalid();
    }
    if !hmd.is_valid {
        return VRGazeSample::invalid();
    }
    if raw.origin_mm == VRRawGazeData::SENTINEL || raw.direction == VRRawGazeData::SENTINEL {
        return VRGazeSample::invalid();
    }

    // The eye tracker frame is mirrored on x and z and measured in millimeters
    let eye_origin = [-raw.origin_mm[0] / 1000.0, raw.origin_mm[1] / 1000.0, -raw.origin_mm[2] / 1000.0];
    let origin = utils::transform_point(&hmd.transform, eye_origin);

    let eye_direction = [-raw.direction[0], raw.direction[1], -raw.direction[2]];
    let tip = utils::transform_point(&hmd.transform, eye_direction);
    let direction = utils::normalize([tip[0] - hmd.position[0],
                                      tip[1] - hmd.position[1],
                                      tip[2] - hmd.position[2]]);

    // Pupil size is measured separately from the ray and reads 0 when unknown
    let (left_pupil_diameter, right_pupil_diameter) = if raw.validity.contains(VRGazeValidity::PUPIL_DIAMETER) {
        (raw.left_pupil_diameter_mm, raw.right_pupil_diameter_mm)
    } else {
        (0.0, 0.0)
    };

    VRGazeSample {
        is_valid: true,
        origin: coords::point_to_app(origin),
        direction: coords::direction_to_app(direction),
        left_pupil_diameter,
        right_pupil_diameter,
    }
}
