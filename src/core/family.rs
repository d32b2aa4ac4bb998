//! Input family tracking and duplicate suppression
//!
//! Browsers fire more than one event family for a single physical gesture: a
//! finger press can surface as `pointerdown`, `touchstart`, *and* a synthetic
//! `mousedown`. Exactly one family should drive tap state, so family
//! precedence (pointer > touch > mouse) is implemented here as a small
//! explicit state machine that can be verified independently of any listener
//! wiring.

use crate::input::events::TapPhase;
use serde::{Deserialize, Serialize};

/// The three overlapping browser input families
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InputFamily {
    Touch,
    Mouse,
    Pointer,
}

impl InputFamily {
    /// All families, in attach order
    pub const ALL: [InputFamily; 3] = [InputFamily::Touch, InputFamily::Mouse, InputFamily::Pointer];

    /// The DOM event name this family uses for a given phase
    pub fn dom_event_name(self, phase: TapPhase) -> &'static str {
        match (self, phase) {
            (InputFamily::Touch, TapPhase::Down) => "touchstart",
            (InputFamily::Touch, TapPhase::Move) => "touchmove",
            (InputFamily::Touch, TapPhase::Up) => "touchend",
            (InputFamily::Mouse, TapPhase::Down) => "mousedown",
            (InputFamily::Mouse, TapPhase::Move) => "mousemove",
            (InputFamily::Mouse, TapPhase::Up) => "mouseup",
            (InputFamily::Pointer, TapPhase::Down) => "pointerdown",
            (InputFamily::Pointer, TapPhase::Move) => "pointermove",
            (InputFamily::Pointer, TapPhase::Up) => "pointerup",
        }
    }

    fn index(self) -> usize {
        match self {
            InputFamily::Touch => 0,
            InputFamily::Mouse => 1,
            InputFamily::Pointer => 2,
        }
    }
}

/// Outcome of running a down event through the precedence rules
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownDisposition {
    /// The event should drive tap state
    Deliver,
    /// The firing family lost to a higher-precedence family: its listeners
    /// must be detached and the event discarded
    Suppress,
}

/// Tracks which families are attached (active) and which have fired at least
/// one down event (registered)
///
/// The registered set is never reset; a family that once fired a down keeps
/// suppressing lower-precedence families for the lifetime of the tap.
#[derive(Debug, Clone, Default)]
pub struct FamilyTracker {
    active: [bool; 3],
    registered: [bool; 3],
}

impl FamilyTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks a family as attached
    pub fn activate(&mut self, family: InputFamily) {
        self.active[family.index()] = true;
    }

    /// Marks a family as detached
    pub fn deactivate(&mut self, family: InputFamily) {
        self.active[family.index()] = false;
    }

    pub fn is_active(&self, family: InputFamily) -> bool {
        self.active[family.index()]
    }

    pub fn is_registered(&self, family: InputFamily) -> bool {
        self.registered[family.index()]
    }

    /// Families currently attached, in attach order
    pub fn active_families(&self) -> Vec<InputFamily> {
        InputFamily::ALL
            .into_iter()
            .filter(|f| self.is_active(*f))
            .collect()
    }

    /// Records a down event for `family` and applies the precedence rules
    ///
    /// Pointer supersedes both touch and mouse; touch supersedes mouse only.
    /// The firing family is registered before the check, so a suppressed
    /// family still counts as registered afterwards.
    pub fn register_down(&mut self, family: InputFamily) -> DownDisposition {
        self.registered[family.index()] = true;

        let superseded = match family {
            InputFamily::Pointer => false,
            InputFamily::Touch => {
                self.is_active(InputFamily::Touch) && self.is_registered(InputFamily::Pointer)
            }
            InputFamily::Mouse => {
                self.is_active(InputFamily::Mouse)
                    && (self.is_registered(InputFamily::Pointer)
                        || self.is_registered(InputFamily::Touch))
            }
        };

        if superseded {
            DownDisposition::Suppress
        } else {
            DownDisposition::Deliver
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tracker_with_all_active() -> FamilyTracker {
        let mut tracker = FamilyTracker::new();
        for family in InputFamily::ALL {
            tracker.activate(family);
        }
        tracker
    }

    #[test]
    fn test_single_family_is_never_suppressed() {
        let mut tracker = tracker_with_all_active();
        assert_eq!(
            tracker.register_down(InputFamily::Mouse),
            DownDisposition::Deliver
        );
        assert_eq!(
            tracker.register_down(InputFamily::Mouse),
            DownDisposition::Deliver
        );
        assert!(tracker.is_registered(InputFamily::Mouse));
    }

    #[test]
    fn test_pointer_supersedes_touch() {
        let mut tracker = tracker_with_all_active();
        assert_eq!(
            tracker.register_down(InputFamily::Pointer),
            DownDisposition::Deliver
        );
        assert_eq!(
            tracker.register_down(InputFamily::Touch),
            DownDisposition::Suppress
        );
        // The suppressed family still counts as registered.
        assert!(tracker.is_registered(InputFamily::Touch));
    }

    #[test]
    fn test_touch_supersedes_mouse_but_not_pointer() {
        let mut tracker = tracker_with_all_active();
        assert_eq!(
            tracker.register_down(InputFamily::Touch),
            DownDisposition::Deliver
        );
        assert_eq!(
            tracker.register_down(InputFamily::Mouse),
            DownDisposition::Suppress
        );
        // Touch never suppresses pointer.
        assert_eq!(
            tracker.register_down(InputFamily::Pointer),
            DownDisposition::Deliver
        );
    }

    #[test]
    fn test_mouse_loses_to_touch_even_when_touch_was_suppressed() {
        let mut tracker = tracker_with_all_active();
        tracker.register_down(InputFamily::Pointer);
        assert_eq!(
            tracker.register_down(InputFamily::Touch),
            DownDisposition::Suppress
        );
        tracker.deactivate(InputFamily::Touch);
        assert_eq!(
            tracker.register_down(InputFamily::Mouse),
            DownDisposition::Suppress
        );
    }

    #[test]
    fn test_detached_touch_is_not_suppressed_again() {
        let mut tracker = tracker_with_all_active();
        tracker.register_down(InputFamily::Pointer);
        assert_eq!(
            tracker.register_down(InputFamily::Touch),
            DownDisposition::Suppress
        );
        tracker.deactivate(InputFamily::Touch);
        // Once inactive, the rule no longer fires for touch itself.
        assert_eq!(
            tracker.register_down(InputFamily::Touch),
            DownDisposition::Deliver
        );
    }

    #[test]
    fn test_dom_event_names() {
        assert_eq!(
            InputFamily::Touch.dom_event_name(TapPhase::Down),
            "touchstart"
        );
        assert_eq!(
            InputFamily::Mouse.dom_event_name(TapPhase::Move),
            "mousemove"
        );
        assert_eq!(
            InputFamily::Pointer.dom_event_name(TapPhase::Up),
            "pointerup"
        );
    }
}
