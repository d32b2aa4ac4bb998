//! Normalized cursor/touch position tracking

use crate::input::events::RawSample;
use serde::{Deserialize, Serialize};

/// A 2D screen-space coordinate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    /// Sentinel position reported before any input has arrived
    pub const OFFSCREEN: Position = Position { x: -1.0, y: -1.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::OFFSCREEN
    }
}

/// Tracks the current and last-seen position across events
///
/// Coordinate source precedence per event: first touch point page
/// coordinates, else client coordinates, else the current position (keeps
/// the value stable for synthetic events that carry no coordinates). When
/// pointer lock is engaged the event's movement delta overrides the
/// absolute coordinate.
#[derive(Debug, Clone, Default)]
pub struct PositionTracker {
    current: Position,
    last: Position,
}

impl PositionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Position {
        self.current
    }

    pub fn last(&self) -> Position {
        self.last
    }

    /// Folds one event's coordinates into the tracker and returns the
    /// resulting position
    ///
    /// `last` only advances when the coordinate actually changes, so a run
    /// of no-op events leaves it lagging behind `current`.
    pub fn advance(&mut self, sample: &RawSample, pointer_locked: bool) -> Position {
        let mut next = sample.absolute().unwrap_or(self.current);
        if pointer_locked {
            if let Some(movement) = sample.movement {
                next = movement;
            }
        }

        if next != self.current {
            self.last = self.current;
            self.current = next;
        }
        self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client_sample(x: f64, y: f64) -> RawSample {
        RawSample {
            client: Some(Position::new(x, y)),
            ..RawSample::default()
        }
    }

    #[test]
    fn test_defaults_to_offscreen() {
        let tracker = PositionTracker::new();
        assert_eq!(tracker.current(), Position::OFFSCREEN);
        assert_eq!(tracker.last(), Position::OFFSCREEN);
    }

    #[test]
    fn test_touch_page_coordinates_win_over_client() {
        let mut tracker = PositionTracker::new();
        let sample = RawSample {
            page: Some(Position::new(3.0, 4.0)),
            client: Some(Position::new(9.0, 9.0)),
            ..RawSample::default()
        };
        assert_eq!(tracker.advance(&sample, false), Position::new(3.0, 4.0));
    }

    #[test]
    fn test_coordinate_free_event_keeps_current() {
        let mut tracker = PositionTracker::new();
        tracker.advance(&client_sample(10.0, 20.0), false);
        let position = tracker.advance(&RawSample::default(), false);
        assert_eq!(position, Position::new(10.0, 20.0));
        // A no-op update must not clobber the history either.
        assert_eq!(tracker.last(), Position::OFFSCREEN);
    }

    #[test]
    fn test_movement_delta_overrides_when_locked() {
        let mut tracker = PositionTracker::new();
        let sample = RawSample {
            client: Some(Position::new(100.0, 100.0)),
            movement: Some(Position::new(5.0, -2.0)),
            ..RawSample::default()
        };
        assert_eq!(tracker.advance(&sample, true), Position::new(5.0, -2.0));
        // Unlocked, the absolute coordinate wins again.
        assert_eq!(tracker.advance(&sample, false), Position::new(100.0, 100.0));
    }

    #[test]
    fn test_last_lags_behind_noop_updates() {
        let mut tracker = PositionTracker::new();
        tracker.advance(&client_sample(1.0, 1.0), false);
        tracker.advance(&client_sample(2.0, 2.0), false);
        assert_eq!(tracker.last(), Position::new(1.0, 1.0));
        // Repeating the same coordinate changes nothing.
        tracker.advance(&client_sample(2.0, 2.0), false);
        tracker.advance(&client_sample(2.0, 2.0), false);
        assert_eq!(tracker.current(), Position::new(2.0, 2.0));
        assert_eq!(tracker.last(), Position::new(1.0, 1.0));
    }
}
