//! Off-browser backend for tests, demos, and native embedding
//!
//! There is no platform underneath: attach/detach only book-keep, and
//! pointer lock is granted synchronously. Events are fed in by calling
//! [`Tap::ingest`](crate::Tap::ingest) directly.

use crate::backend::Backend;
use crate::core::family::InputFamily;

/// Recording backend with a configurable supported-family set
#[derive(Debug, Clone, Default)]
pub struct HeadlessBackend {
    supported: Vec<InputFamily>,
    attached: Vec<InputFamily>,
    detach_history: Vec<InputFamily>,
    locked: bool,
    lock_requests: usize,
    unlock_requests: usize,
}

impl HeadlessBackend {
    /// Backend supporting only the given families
    pub fn with_families(families: &[InputFamily]) -> Self {
        Self {
            supported: families.to_vec(),
            ..Self::default()
        }
    }

    /// Backend supporting all three families
    pub fn everything() -> Self {
        Self::with_families(&InputFamily::ALL)
    }

    /// Families whose listeners are currently attached
    pub fn attached_families(&self) -> &[InputFamily] {
        &self.attached
    }

    /// Every family that has been detached, in detach order
    pub fn detached_families(&self) -> Vec<InputFamily> {
        self.detach_history.clone()
    }

    /// How many times pointer lock has been requested
    pub fn lock_requests(&self) -> usize {
        self.lock_requests
    }

    /// How many times pointer-lock exit has been requested
    pub fn unlock_requests(&self) -> usize {
        self.unlock_requests
    }

    /// Forces the lock state, for driving lock-change scenarios that do not
    /// go through request/exit
    pub fn set_locked(&mut self, locked: bool) {
        self.locked = locked;
    }
}

impl Backend for HeadlessBackend {
    fn supports(&self, family: InputFamily) -> bool {
        self.supported.contains(&family)
    }

    fn attach(&mut self, family: InputFamily) {
        if !self.attached.contains(&family) {
            self.attached.push(family);
        }
    }

    fn detach(&mut self, family: InputFamily) {
        self.attached.retain(|f| *f != family);
        self.detach_history.push(family);
    }

    fn request_pointer_lock(&mut self) {
        self.lock_requests += 1;
        self.locked = true;
    }

    fn exit_pointer_lock(&mut self) {
        self.unlock_requests += 1;
        self.locked = false;
    }

    fn is_pointer_locked(&self) -> bool {
        self.locked
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_supported_set_is_respected() {
        let backend = HeadlessBackend::with_families(&[InputFamily::Mouse]);
        assert!(backend.supports(InputFamily::Mouse));
        assert!(!backend.supports(InputFamily::Touch));
        assert!(!backend.supports(InputFamily::Pointer));
    }

    #[test]
    fn test_attach_detach_bookkeeping() {
        let mut backend = HeadlessBackend::everything();
        backend.attach(InputFamily::Touch);
        backend.attach(InputFamily::Touch);
        assert_eq!(backend.attached_families(), &[InputFamily::Touch]);

        backend.detach(InputFamily::Touch);
        assert!(backend.attached_families().is_empty());
        assert_eq!(backend.detached_families(), vec![InputFamily::Touch]);
    }

    #[test]
    fn test_lock_is_granted_synchronously() {
        let mut backend = HeadlessBackend::everything();
        assert!(!backend.is_pointer_locked());
        backend.request_pointer_lock();
        assert!(backend.is_pointer_locked());
        backend.exit_pointer_lock();
        assert!(!backend.is_pointer_locked());
        assert_eq!(backend.lock_requests(), 1);
        assert_eq!(backend.unlock_requests(), 1);
    }
}
