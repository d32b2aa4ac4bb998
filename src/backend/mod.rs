pub mod headless;

#[cfg(feature = "wasm")]
pub mod web;

use crate::core::family::InputFamily;

/// Platform seam for a [`Tap`](crate::Tap)
///
/// The backend owns everything platform-specific: runtime feature
/// detection, the listener table, and pointer lock. The tap decides *when*
/// to attach, detach, or lock; the backend decides *how*. Listener
/// registrations are mutated only through [`Backend::attach`] and
/// [`Backend::detach`].
pub trait Backend {
    /// Whether the runtime environment supports this family at all
    fn supports(&self, family: InputFamily) -> bool;

    /// Registers down/move/up listeners for the family
    fn attach(&mut self, family: InputFamily);

    /// Removes the family's listeners
    fn detach(&mut self, family: InputFamily);

    /// Asks the platform to engage pointer lock (fire-and-forget; the
    /// outcome arrives as a lock-change notification)
    fn request_pointer_lock(&mut self);

    /// Asks the platform to release pointer lock
    fn exit_pointer_lock(&mut self);

    /// Live pointer-lock state; must be read fresh on every call, never
    /// cached
    fn is_pointer_locked(&self) -> bool;
}

pub use headless::HeadlessBackend;

#[cfg(feature = "wasm")]
pub use web::WebTap;
