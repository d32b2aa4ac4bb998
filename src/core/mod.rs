pub mod config;
pub mod family;
pub mod position;

// Re-export the essential types
pub use config::TapConfig;
pub use family::{DownDisposition, FamilyTracker, InputFamily};
pub use position::{Position, PositionTracker};
