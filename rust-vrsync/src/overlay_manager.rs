use rust_vrsync_api::vr_coordinate_transform as coords;
use rust_vrsync_api::{VRError, VROverlayDesc, VROverlayHandle, VROverlayService, VRResult, VRTextureBounds,
                      HMD_DEVICE_INDEX};
use std::collections::HashMap;

/// Keeps track of the overlays created by the application, by name.
#[derive(Debug, Default)]
pub struct VROverlayManager {
    overlays: HashMap<String, VROverlayHandle>,
}

fn overlay_error(name: &str, reason: String) -> VRError {
    let err = VRError::Overlay {
        name: name.into(),
        reason,
    };
    error!("{}", err);
    err
}

impl VROverlayManager {
    pub fn new() -> VROverlayManager {
        VROverlayManager::default()
    }

    pub fn handle(&self, name: &str) -> VRResult<VROverlayHandle> {
        match self.overlays.get(name) {
            Some(handle) => Ok(*handle),
            None => {
                let err = VRError::UnknownOverlay(name.into());
                error!("{}", err);
                Err(err)
            }
        }
    }

    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.overlays.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.overlays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.overlays.is_empty()
    }

    // The overlay stays registered even if a later configuration step fails,
    // so that it can still be destroyed by name.
    pub fn create(&mut self,
                  service: &mut dyn VROverlayService,
                  name: &str,
                  desc: &VROverlayDesc)
                  -> VRResult<VROverlayHandle> {
        if self.overlays.contains_key(name) {
            let err = VRError::DuplicateOverlay(name.into());
            error!("{}", err);
            return Err(err);
        }

        let handle = service.create_overlay(name, name).map_err(|reason| overlay_error(name, reason))?;
        self.overlays.insert(name.to_owned(), handle);
        debug!("Created overlay {} ({})", name, handle);

        if let Some(ref path) = desc.image_path {
            service.set_from_file(handle, &path.to_string_lossy())
                   .map_err(|reason| overlay_error(name, reason))?;
        }
        service.set_width(handle, desc.width).map_err(|reason| overlay_error(name, reason))?;

        let position = coords::point_to_native(desc.position);
        let transform = [[1.0, 0.0, 0.0, position[0]],
                         [0.0, 1.0, 0.0, position[1]],
                         [0.0, 0.0, 1.0, position[2]]];
        service.set_transform_relative(handle, HMD_DEVICE_INDEX, transform)
               .map_err(|reason| overlay_error(name, reason))?;

        Ok(handle)
    }

    pub fn crop(&self, service: &mut dyn VROverlayService, name: &str, bounds: VRTextureBounds) -> VRResult<()> {
        let handle = self.handle(name)?;
        service.set_texture_bounds(handle, bounds).map_err(|reason| overlay_error(name, reason))
    }

    pub fn destroy(&mut self, service: &mut dyn VROverlayService, name: &str) -> VRResult<()> {
        let handle = self.handle(name)?;
        self.overlays.remove(name);
        service.destroy_overlay(handle).map_err(|reason| overlay_error(name, reason))
    }

    pub fn show(&self, service: &mut dyn VROverlayService, name: &str) -> VRResult<()> {
        let handle = self.handle(name)?;
        service.show(handle).map_err(|reason| overlay_error(name, reason))
    }

    pub fn hide(&self, service: &mut dyn VROverlayService, name: &str) -> VRResult<()> {
        let handle = self.handle(name)?;
        service.hide(handle).map_err(|reason| overlay_error(name, reason))
    }

    pub fn update_texture(&self, service: &mut dyn VROverlayService, name: &str, texture_id: u32) -> VRResult<()> {
        let handle = self.handle(name)?;
        service.set_texture(handle, texture_id).map_err(|reason| overlay_error(name, reason))
    }

    pub fn destroy_all(&mut self, service: &mut dyn VROverlayService) {
        for (name, handle) in self.overlays.drain() {
            if let Err(reason) = service.destroy_overlay(handle) {
                warn!("Unable to destroy overlay {}: {}", name, reason);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[derive(Default)]
    struct RecordingOverlays {
        next: VROverlayHandle,
        calls: Vec<String>,
        transform: Option<(u32, [[f32; 4]; 3])>,
        fail_texture: bool,
    }

    impl VROverlayService for RecordingOverlays {
        fn create_overlay(&mut self, key: &str, _name: &str) -> Result<VROverlayHandle, String> {
            self.next += 1;
            self.calls.push(format!("create {}", key));
            Ok(self.next)
        }

        fn set_width(&mut self, handle: VROverlayHandle, width: f32) -> Result<(), String> {
            self.calls.push(format!("width {} {}", handle, width));
            Ok(())
        }

        fn set_transform_relative(&mut self, _handle: VROverlayHandle, device_index: u32,
                                  transform: [[f32; 4]; 3]) -> Result<(), String> {
            self.transform = Some((device_index, transform));
            Ok(())
        }

        fn set_from_file(&mut self, handle: VROverlayHandle, path: &str) -> Result<(), String> {
            self.calls.push(format!("file {} {}", handle, path));
            Ok(())
        }

        fn set_texture_bounds(&mut self, handle: VROverlayHandle, bounds: VRTextureBounds) -> Result<(), String> {
            self.calls.push(format!("bounds {} {} {}", handle, bounds.u_min, bounds.v_max));
            Ok(())
        }

        fn set_texture(&mut self, handle: VROverlayHandle, texture_id: u32) -> Result<(), String> {
            if self.fail_texture {
                return Err("invalid texture".into());
            }
            self.calls.push(format!("texture {} {}", handle, texture_id));
            Ok(())
        }

        fn show(&mut self, handle: VROverlayHandle) -> Result<(), String> {
            self.calls.push(format!("show {}", handle));
            Ok(())
        }

        fn hide(&mut self, handle: VROverlayHandle) -> Result<(), String> {
            self.calls.push(format!("hide {}", handle));
            Ok(())
        }

        fn destroy_overlay(&mut self, handle: VROverlayHandle) -> Result<(), String> {
            self.calls.push(format!("destroy {}", handle));
            Ok(())
        }
    }

    #[test]
    fn create_places_overlay_in_front_of_hmd() {
        let mut runtime = RecordingOverlays::default();
        let mut overlays = VROverlayManager::new();
        let desc = VROverlayDesc::new(0.5, [1.0, 0.0, 0.2]).with_image(PathBuf::from("menu.png"));

        let handle = overlays.create(&mut runtime, "menu", &desc).unwrap();
        assert_eq!(overlays.handle("menu").unwrap(), handle);
        assert_eq!(runtime.calls, vec!["create menu".to_string(),
                                       format!("file {} menu.png", handle),
                                       format!("width {} 0.5", handle)]);

        // one meter ahead, 20cm up: native (0, 0.2, -1)
        let (device, transform) = runtime.transform.unwrap();
        assert_eq!(device, HMD_DEVICE_INDEX);
        assert_eq!(transform[0][3], 0.0);
        assert_eq!(transform[1][3], 0.2);
        assert_eq!(transform[2][3], -1.0);
    }

    #[test]
    fn names_are_unique() {
        let mut runtime = RecordingOverlays::default();
        let mut overlays = VROverlayManager::new();
        let desc = VROverlayDesc::new(1.0, [1.0, 0.0, 0.0]);
        overlays.create(&mut runtime, "hud", &desc).unwrap();

        match overlays.create(&mut runtime, "hud", &desc) {
            Err(VRError::DuplicateOverlay(name)) => assert_eq!(name, "hud"),
            other => panic!("unexpected result: {:?}", other),
        }
        assert_eq!(overlays.len(), 1);
    }

    #[test]
    fn operations_on_unknown_names_fail() {
        let mut runtime = RecordingOverlays::default();
        let mut overlays = VROverlayManager::new();

        assert!(overlays.show(&mut runtime, "missing").is_err());
        assert!(overlays.hide(&mut runtime, "missing").is_err());
        assert!(overlays.update_texture(&mut runtime, "missing", 3).is_err());
        assert!(overlays.crop(&mut runtime, "missing", VRTextureBounds::default()).is_err());
        match overlays.destroy(&mut runtime, "missing") {
            Err(VRError::UnknownOverlay(name)) => assert_eq!(name, "missing"),
            other => panic!("unexpected result: {:?}", other),
        }
        assert!(runtime.calls.is_empty());
    }

    #[test]
    fn destroy_forgets_the_name() {
        let mut runtime = RecordingOverlays::default();
        let mut overlays = VROverlayManager::new();
        let handle = overlays.create(&mut runtime, "hud", &VROverlayDesc::new(1.0, [1.0, 0.0, 0.0])).unwrap();

        overlays.crop(&mut runtime, "hud", VRTextureBounds::new(0.25, 0.75, 0.0, 0.5)).unwrap();
        overlays.show(&mut runtime, "hud").unwrap();
        overlays.hide(&mut runtime, "hud").unwrap();
        overlays.destroy(&mut runtime, "hud").unwrap();

        assert!(overlays.is_empty());
        assert!(overlays.show(&mut runtime, "hud").is_err());
        assert_eq!(&runtime.calls[2..], &[format!("bounds {} 0.25 0.5", handle),
                                          format!("show {}", handle),
                                          format!("hide {}", handle),
                                          format!("destroy {}", handle)]);
    }

    #[test]
    fn runtime_failures_are_reported() {
        let mut runtime = RecordingOverlays::default();
        runtime.fail_texture = true;
        let mut overlays = VROverlayManager::new();
        overlays.create(&mut runtime, "hud", &VROverlayDesc::new(1.0, [1.0, 0.0, 0.0])).unwrap();

        let err = overlays.update_texture(&mut runtime, "hud", 7).unwrap_err();
        assert_eq!(err.to_string(), "overlay hud: invalid texture");
    }
}
