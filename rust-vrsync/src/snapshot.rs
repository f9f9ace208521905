use parking_lot::Mutex;
use std::mem;
use std::sync::Arc;

/// Single slot cell shared between one writer thread and any number of readers.
///
/// Readers always get a complete value: the writer builds the new value first
/// and only swaps the pointer while holding the lock.
pub struct VRSnapshot<T> {
    slot: Arc<Mutex<Arc<T>>>,
}

impl<T> Clone for VRSnapshot<T> {
    fn clone(&self) -> VRSnapshot<T> {
        VRSnapshot {
            slot: self.slot.clone(),
        }
    }
}

impl<T: Default> Default for VRSnapshot<T> {
    fn default() -> VRSnapshot<T> {
        VRSnapshot::new(T::default())
    }
}

impl<T> VRSnapshot<T> {
    pub fn new(value: T) -> VRSnapshot<T> {
        VRSnapshot {
            slot: Arc::new(Mutex::new(Arc::new(value))),
        }
    }

    pub fn publish(&self, value: T) {
        let value = Arc::new(value);
        let previous = mem::replace(&mut *self.slot.lock(), value);
        // The previous value may be the last reference, release it unlocked
        drop(previous);
    }

    pub fn load(&self) -> Arc<T> {
        self.slot.lock().clone()
    }
}

/// HMD pose shared with the gaze thread, native tracking space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VRHmdSnapshot {
    pub is_valid: bool,
    pub transform: [f32; 16],
    pub position: [f32; 3],
}

impl Default for VRHmdSnapshot {
    fn default() -> VRHmdSnapshot {
        VRHmdSnapshot {
            is_valid: false,
            transform: identity_matrix!(),
            position: [0.0, 0.0, 0.0],
        }
    }
}
