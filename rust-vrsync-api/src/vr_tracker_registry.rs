use std::collections::HashMap;
use crate::VRDeviceState;

/// Generic trackers keyed by serial number.
///
/// Entries are created the first time a serial is seen and are never removed,
/// so a tracker that drops out stays queryable as invalid.
#[derive(Debug, Default)]
pub struct VRTrackerRegistry {
    trackers: HashMap<String, VRDeviceState>,
}

impl VRTrackerRegistry {
    pub fn new() -> VRTrackerRegistry {
        VRTrackerRegistry::default()
    }

    pub fn invalidate_all(&mut self) {
        for tracker in self.trackers.values_mut() {
            tracker.invalidate();
        }
    }

    pub fn upsert(&mut self, serial: &str, index: u32, transform: [f32; 16]) {
        if let Some(tracker) = self.trackers.get_mut(serial) {
            tracker.update_pose(index, transform);
            return;
        }

        debug!("New tracker {} at index {}", serial, index);
        let mut tracker = VRDeviceState::new();
        tracker.update_pose(index, transform);
        self.trackers.insert(serial.to_owned(), tracker);
    }

    pub fn get(&self, serial: &str) -> Option<&VRDeviceState> {
        self.trackers.get(serial)
    }

    pub fn serials(&self) -> Vec<String> {
        let mut serials: Vec<String> = self.trackers.keys().cloned().collect();
        serials.sort();
        serials
    }

    pub fn len(&self) -> usize {
        self.trackers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trackers.is_empty()
    }
}
