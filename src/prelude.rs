//! Prelude module for common unitap types and traits
//!
//! Re-exports the most commonly used types for easy importing with
//! `use unitap::prelude::*;`

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

pub use crate::{Error as TapError, Result};

pub use fxhash::{FxHashMap as HashMap, FxHashSet as HashSet};
