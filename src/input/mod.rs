pub mod events;
pub mod publisher;
pub mod tap;

// Re-export the essential types
pub use events::{ListenerId, RawSample, TapEvent, TapPhase};
pub use publisher::EventPublisher;
pub use tap::{Lifecycle, Tap};
