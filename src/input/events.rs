use crate::core::position::Position;
use serde::{Deserialize, Serialize};

/// The three phases of a tap interaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TapPhase {
    Down,
    Move,
    Up,
}

impl TapPhase {
    /// All phases, in interaction order
    pub const ALL: [TapPhase; 3] = [TapPhase::Down, TapPhase::Move, TapPhase::Up];
}

/// Backend-normalized view of one platform input event
///
/// Every field is optional: a touch event carries page coordinates, a mouse
/// or pointer event carries client coordinates and movement deltas, and a
/// synthetic event may carry nothing at all.
#[derive(Debug, Clone, Default)]
pub struct RawSample {
    /// Page coordinates of the first touch point, if any
    pub page: Option<Position>,
    /// Client coordinates, if the event carries them
    pub client: Option<Position>,
    /// Relative movement delta (used while pointer lock is engaged)
    pub movement: Option<Position>,
    /// The original DOM event
    #[cfg(feature = "wasm")]
    pub source: Option<web_sys::Event>,
}

impl RawSample {
    /// A sample with no coordinates at all (synthetic events)
    pub fn empty() -> Self {
        Self::default()
    }

    /// A touch-style sample carrying page coordinates
    pub fn from_page(x: f64, y: f64) -> Self {
        Self {
            page: Some(Position::new(x, y)),
            ..Self::default()
        }
    }

    /// A mouse/pointer-style sample carrying client coordinates
    pub fn from_client(x: f64, y: f64) -> Self {
        Self {
            client: Some(Position::new(x, y)),
            ..Self::default()
        }
    }

    /// Adds a movement delta to the sample
    pub fn with_movement(mut self, dx: f64, dy: f64) -> Self {
        self.movement = Some(Position::new(dx, dy));
        self
    }

    /// First absolute coordinate the sample carries, page before client
    pub fn absolute(&self) -> Option<Position> {
        self.page.or(self.client)
    }
}

#[cfg(feature = "wasm")]
impl RawSample {
    /// Builds a sample from a DOM event
    ///
    /// Only the first touch point is sampled. Events that are neither touch
    /// nor mouse-derived (pointer events inherit from MouseEvent) produce a
    /// coordinate-free sample.
    pub fn from_dom_event(event: &web_sys::Event) -> Self {
        use wasm_bindgen::JsCast;

        let mut sample = RawSample::default();
        if let Some(touch_event) = event.dyn_ref::<web_sys::TouchEvent>() {
            if let Some(touch) = touch_event.touches().get(0) {
                sample.page = Some(Position::new(touch.page_x() as f64, touch.page_y() as f64));
            }
        } else if let Some(mouse_event) = event.dyn_ref::<web_sys::MouseEvent>() {
            sample.client = Some(Position::new(
                mouse_event.client_x() as f64,
                mouse_event.client_y() as f64,
            ));
            sample.movement = Some(Position::new(
                mouse_event.movement_x() as f64,
                mouse_event.movement_y() as f64,
            ));
        }
        sample.source = Some(event.clone());
        sample
    }
}

/// Payload delivered to tap subscribers
#[derive(Debug, Clone)]
pub struct TapEvent {
    pub phase: TapPhase,
    /// Normalized position at the time of the event
    pub position: Position,
    /// Present only on `Move`: whether a down is currently held
    pub dragging: Option<bool>,
    /// The sample the event was built from (carries the original DOM event
    /// on the web backend)
    pub sample: RawSample,
}

/// Handle for removing a registered listener
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub(crate) u64);
