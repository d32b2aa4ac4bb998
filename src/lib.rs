//! # unitap
//!
//! A small input-unification library that folds the browser's three
//! overlapping input families (mouse, touch, and pointer events) into a
//! single `down`/`move`/`up` tap stream with position tracking, pause/resume,
//! pointer-lock integration, and duplicate-event suppression.
//!
//! The state machine at the center ([`Tap`]) is platform-independent and
//! talks to the outside world through the [`backend::Backend`] trait. The
//! `wasm` feature provides the browser backend ([`backend::web`]); the
//! always-available [`backend::headless`] backend drives the same machine
//! natively for tests and demos.

pub mod backend;
pub mod core;
pub mod input;
pub mod prelude;

// Re-export public API
pub use crate::core::{
    config::TapConfig,
    family::{DownDisposition, FamilyTracker, InputFamily},
    position::{Position, PositionTracker},
};

pub use crate::input::{
    events::{ListenerId, RawSample, TapEvent, TapPhase},
    publisher::EventPublisher,
    tap::{Lifecycle, Tap},
};

pub use crate::backend::{headless::HeadlessBackend, Backend};

#[cfg(feature = "wasm")]
pub use crate::backend::web::WebTap;

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, TapError>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum TapError {
    #[error("tap has been destroyed")]
    Destroyed,

    #[error("tap is already active")]
    AlreadyActive,

    #[error("tap is not active yet (call activate first)")]
    NotActive,

    #[error("browser environment unavailable: {0}")]
    Environment(String),
}

/// Error type alias for convenience
pub type Error = TapError;
