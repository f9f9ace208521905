use rust_vrsync_api::vr_coordinate_transform as coords;
use rust_vrsync_api::{VRButtonEvent, VRCompositor, VRControllerButtons, VRControllerHand, VRDeviceRole, VRError,
                      VREye, VRGazeSample, VRLayer, VROverlayDesc, VROverlayHandle, VROverlayService, VRPose,
                      VRResult, VRService, VRServiceCreator, VRStereoFrame, VRSyncConfig, VRTextureBounds};
use crate::event_normalizer;
use crate::gaze_tracker::{DisabledGazeTracker, ThreadedGazeTracker, VRGazeTracker};
use crate::haptics::VRHapticDispatcher;
use crate::overlay_manager::VROverlayManager;
use crate::pose_sync::VRPoseSync;
use crate::snapshot::{VRHmdSnapshot, VRSnapshot};
use crate::stereo_camera::VRStereoCamera;

// Single entry point for the render loop: owns the runtime and every piece of per-frame device state.
//
// Positions, orientations and directions returned from here are in application space.
pub struct VRSyncContext {
    config: VRSyncConfig,
    service: Box<dyn VRService>,
    compositor: Box<dyn VRCompositor>,
    overlay_service: Box<dyn VROverlayService>,
    pose_sync: VRPoseSync,
    stereo: VRStereoCamera,
    haptics: VRHapticDispatcher,
    overlays: VROverlayManager,
    gaze: Box<dyn VRGazeTracker>,
    hmd_snapshot: VRSnapshot<VRHmdSnapshot>,
    has_gaze_support: bool,
    released: bool,
}

impl Drop for VRSyncContext {
    fn drop(&mut self) {
        self.release();
    }
}

// Shuts an initialized runtime back down before reporting a startup failure
fn abort_init(service: &mut dyn VRService, err: VRError) -> VRError {
    error!("{}", err);
    service.shutdown();
    err
}

impl VRSyncContext {
    pub fn new(creator: &dyn VRServiceCreator, config: VRSyncConfig) -> VRResult<VRSyncContext> {
        let mut service = creator.new_service();
        if !service.is_installed() {
            error!("{}", VRError::RuntimeNotInstalled);
            return Err(VRError::RuntimeNotInstalled);
        }

        if let Err(msg) = service.initialize() {
            let err = VRError::RuntimeInit(msg);
            error!("{}", err);
            return Err(err);
        }
        info!("VR runtime initialized");

        let compositor = match service.new_compositor() {
            Ok(compositor) => compositor,
            Err(msg) => return Err(abort_init(&mut *service, VRError::CompositorInit(msg))),
        };
        let overlay_service = match service.new_overlay_service() {
            Ok(overlay_service) => overlay_service,
            Err(msg) => return Err(abort_init(&mut *service, VRError::OverlayInit(msg))),
        };

        let stereo = VRStereoCamera::new(&*service, config.near_clip, config.far_clip);
        let hmd_snapshot = VRSnapshot::default();

        let gaze_device = creator.new_gaze_device();
        let has_gaze_support = gaze_device.as_ref().map_or(false, |device| device.is_supported());
        let gaze: Box<dyn VRGazeTracker> = if config.use_gaze_tracking {
            let device = match gaze_device {
                Some(device) => device,
                None => return Err(abort_init(&mut *service, VRError::GazeUnsupported)),
            };
            match ThreadedGazeTracker::start(device, hmd_snapshot.clone(), config.gaze_poll_interval()) {
                Ok(tracker) => Box::new(tracker),
                Err(err) => return Err(abort_init(&mut *service, err)),
            }
        } else {
            Box::new(DisabledGazeTracker)
        };

        Ok(VRSyncContext {
            haptics: VRHapticDispatcher::new(config.haptic_axis),
            config,
            service,
            compositor,
            overlay_service,
            pose_sync: VRPoseSync::new(),
            stereo,
            overlays: VROverlayManager::new(),
            gaze,
            hmd_snapshot,
            has_gaze_support,
            released: false,
        })
    }

    // The runtime interfaces are dangling once the runtime is shut down
    fn ensure_active(&self, operation: &str) -> VRResult<()> {
        if self.released {
            error!("Ignoring {} on a released VR context", operation);
            return Err(VRError::Released);
        }
        Ok(())
    }

    pub fn config(&self) -> &VRSyncConfig {
        &self.config
    }

    // Blocks until the runtime hands out the poses of the next frame.
    pub fn update(&mut self) {
        if self.released {
            warn!("Ignoring update on a released VR context");
            return;
        }
        self.pose_sync.update(&*self.service, &mut *self.compositor);
        self.hmd_snapshot.publish(self.pose_sync.hmd_snapshot());
    }

    pub fn device_pose(&self, role: VRDeviceRole) -> VRPose {
        self.pose_sync.device(role).pose()
    }

    // Where the HMD is before the offset is applied
    pub fn hmd_actual_position(&self) -> Option<[f32; 3]> {
        self.pose_sync.hmd_actual_position().map(coords::point_to_app)
    }

    pub fn controller_buttons(&self, hand: VRControllerHand) -> VRControllerButtons {
        let controller = self.pose_sync.controller(hand);
        let data = &controller.controller;
        VRControllerButtons {
            is_valid: controller.is_valid,
            trigger_fraction: data.trigger_fraction,
            touchpad_x: data.touchpad[0],
            touchpad_y: data.touchpad[1],
            buttons_pressed: data.buttons_pressed,
        }
    }

    pub fn tracker_pose(&self, serial: &str) -> Option<VRPose> {
        self.pose_sync.trackers().get(serial).map(|tracker| tracker.pose())
    }

    pub fn tracker_serials(&self) -> Vec<String> {
        self.pose_sync.trackers().serials()
    }

    // Right, up and forward of the device
    pub fn device_axes(&self, role: VRDeviceRole) -> Option<[[f32; 3]; 3]> {
        self.pose_sync.device(role).axes()
    }

    pub fn gaze_sample(&self) -> VRGazeSample {
        self.gaze.latest()
    }

    pub fn has_gaze_support(&self) -> bool {
        self.has_gaze_support
    }

    pub fn offset(&self) -> [f32; 3] {
        coords::direction_to_app(self.pose_sync.offset())
    }

    // Applied from the next update on
    pub fn set_offset(&mut self, offset: [f32; 3]) {
        self.pose_sync.set_offset(coords::direction_to_native(offset));
    }

    pub fn poll_events(&mut self) -> Vec<VRButtonEvent> {
        if self.ensure_active("poll_events").is_err() {
            return Vec::new();
        }
        event_normalizer::drain_events(&mut *self.service)
    }

    // Uses the last known HMD transform when the HMD is not tracked this frame.
    pub fn pre_render(&self) -> VRStereoFrame {
        self.stereo.derive(&self.pose_sync.device(VRDeviceRole::Hmd).transform)
    }

    pub fn submit_eye(&mut self, eye: VREye, layer: &VRLayer) -> VRResult<()> {
        self.ensure_active("submit_eye")?;
        match self.compositor.submit(eye, layer) {
            Ok(()) => Ok(()),
            // Expected until the application gets scene focus
            Err(err) if err.is_benign() => Ok(()),
            Err(err) => {
                error!("Compositor error on {:?} eye: {}", eye, err);
                Err(err.into())
            }
        }
    }

    pub fn post_render(&mut self, handoff: bool) {
        if handoff && self.ensure_active("post_render").is_ok() {
            self.compositor.post_present_handoff();
        }
    }

    pub fn trigger_haptic_pulse(&mut self, role: VRDeviceRole, duration_us: u16) -> VRResult<()> {
        self.ensure_active("trigger_haptic_pulse")?;
        let device = self.pose_sync.device(role);
        self.haptics.trigger(&mut *self.service, role, device, duration_us)
    }

    pub fn create_overlay(&mut self, name: &str, desc: &VROverlayDesc) -> VRResult<VROverlayHandle> {
        self.ensure_active("create_overlay")?;
        self.overlays.create(&mut *self.overlay_service, name, desc)
    }

    pub fn crop_overlay(&mut self, name: &str, bounds: VRTextureBounds) -> VRResult<()> {
        self.ensure_active("crop_overlay")?;
        self.overlays.crop(&mut *self.overlay_service, name, bounds)
    }

    pub fn destroy_overlay(&mut self, name: &str) -> VRResult<()> {
        self.ensure_active("destroy_overlay")?;
        self.overlays.destroy(&mut *self.overlay_service, name)
    }

    pub fn show_overlay(&mut self, name: &str) -> VRResult<()> {
        self.ensure_active("show_overlay")?;
        self.overlays.show(&mut *self.overlay_service, name)
    }

    pub fn hide_overlay(&mut self, name: &str) -> VRResult<()> {
        self.ensure_active("hide_overlay")?;
        self.overlays.hide(&mut *self.overlay_service, name)
    }

    pub fn update_overlay_texture(&mut self, name: &str, texture_id: u32) -> VRResult<()> {
        self.ensure_active("update_overlay_texture")?;
        self.overlays.update_texture(&mut *self.overlay_service, name, texture_id)
    }

    pub fn overlay_names(&self) -> Vec<String> {
        self.overlays.names()
    }

    pub fn is_released(&self) -> bool {
        self.released
    }

    // Stops eye tracking and shuts the runtime down. Safe to call more than once.
    pub fn release(&mut self) {
        if self.released {
            return;
        }
        self.released = true;

        self.gaze.stop();
        self.overlays.destroy_all(&mut *self.overlay_service);
        self.service.shutdown();
        info!("VR runtime shut down");
    }
}
