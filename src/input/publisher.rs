//! Internal publish/subscribe mechanism for tap events

use crate::input::events::{ListenerId, TapEvent, TapPhase};
use fxhash::FxHashMap;
use std::rc::Rc;

/// Event listener callback type
///
/// Callbacks are not `Send`: all delivery happens on the thread the tap
/// lives on (the browser main thread on the web backend).
pub type EventCallback = Rc<dyn Fn(&TapEvent)>;

struct ListenerEntry {
    id: ListenerId,
    callback: EventCallback,
    once: bool,
}

/// Listener registry with persistent and one-shot subscriptions
///
/// Persistent listeners are gated by the pause flag; one-shot listeners
/// fire exactly once and ignore pause (intentional asymmetry: a `once`
/// registration is a promise to deliver the next event, paused or not).
#[derive(Default)]
pub struct EventPublisher {
    listeners: FxHashMap<TapPhase, Vec<ListenerEntry>>,
    next_id: u64,
}

impl EventPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a persistent listener
    pub fn on<F>(&mut self, phase: TapPhase, callback: F) -> ListenerId
    where
        F: Fn(&TapEvent) + 'static,
    {
        self.insert(phase, Rc::new(callback), false)
    }

    /// Registers a listener that fires exactly once
    pub fn once<F>(&mut self, phase: TapPhase, callback: F) -> ListenerId
    where
        F: Fn(&TapEvent) + 'static,
    {
        self.insert(phase, Rc::new(callback), true)
    }

    fn insert(&mut self, phase: TapPhase, callback: EventCallback, once: bool) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.entry(phase).or_default().push(ListenerEntry {
            id,
            callback,
            once,
        });
        id
    }

    /// Removes a listener; returns false if the id is unknown (e.g. a
    /// one-shot that already fired)
    pub fn off(&mut self, id: ListenerId) -> bool {
        for entries in self.listeners.values_mut() {
            if let Some(index) = entries.iter().position(|e| e.id == id) {
                entries.remove(index);
                return true;
            }
        }
        false
    }

    /// Delivers an event to the matching listeners and returns how many
    /// callbacks ran
    ///
    /// One-shot entries are removed before their callbacks run, so a
    /// callback re-registering itself never sees its own removal race.
    pub fn publish(&mut self, event: &TapEvent, paused: bool) -> usize {
        let Some(entries) = self.listeners.get_mut(&event.phase) else {
            return 0;
        };

        let mut to_call: Vec<EventCallback> = Vec::new();
        entries.retain(|entry| {
            if entry.once {
                to_call.push(Rc::clone(&entry.callback));
                false
            } else {
                if !paused {
                    to_call.push(Rc::clone(&entry.callback));
                }
                true
            }
        });

        for callback in &to_call {
            callback(event);
        }
        to_call.len()
    }

    /// Drops every listener
    pub fn clear(&mut self) {
        self.listeners.clear();
    }

    /// Number of registered listeners across all phases
    pub fn len(&self) -> usize {
        self.listeners.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::position::Position;
    use crate::input::events::RawSample;
    use std::cell::RefCell;

    fn event(phase: TapPhase) -> TapEvent {
        TapEvent {
            phase,
            position: Position::new(1.0, 2.0),
            dragging: None,
            sample: RawSample::empty(),
        }
    }

    #[test]
    fn test_persistent_listener_fires_every_time() {
        let mut publisher = EventPublisher::new();
        let hits = Rc::new(RefCell::new(0));
        let counter = Rc::clone(&hits);
        publisher.on(TapPhase::Down, move |_| *counter.borrow_mut() += 1);

        publisher.publish(&event(TapPhase::Down), false);
        publisher.publish(&event(TapPhase::Down), false);
        assert_eq!(*hits.borrow(), 2);
    }

    #[test]
    fn test_once_listener_fires_exactly_once() {
        let mut publisher = EventPublisher::new();
        let hits = Rc::new(RefCell::new(0));
        let counter = Rc::clone(&hits);
        publisher.once(TapPhase::Up, move |_| *counter.borrow_mut() += 1);

        publisher.publish(&event(TapPhase::Up), false);
        publisher.publish(&event(TapPhase::Up), false);
        assert_eq!(*hits.borrow(), 1);
        assert!(publisher.is_empty());
    }

    #[test]
    fn test_pause_gates_persistent_but_not_once() {
        let mut publisher = EventPublisher::new();
        let persistent_hits = Rc::new(RefCell::new(0));
        let once_hits = Rc::new(RefCell::new(0));
        let p = Rc::clone(&persistent_hits);
        let o = Rc::clone(&once_hits);
        publisher.on(TapPhase::Down, move |_| *p.borrow_mut() += 1);
        publisher.once(TapPhase::Down, move |_| *o.borrow_mut() += 1);

        // Only the one-shot runs while paused; the count reflects that.
        assert_eq!(publisher.publish(&event(TapPhase::Down), true), 1);
        assert_eq!(*persistent_hits.borrow(), 0);
        assert_eq!(*once_hits.borrow(), 1);

        // The persistent listener survived the pause.
        assert_eq!(publisher.publish(&event(TapPhase::Down), false), 1);
        assert_eq!(*persistent_hits.borrow(), 1);
    }

    #[test]
    fn test_off_removes_listener() {
        let mut publisher = EventPublisher::new();
        let hits = Rc::new(RefCell::new(0));
        let counter = Rc::clone(&hits);
        let id = publisher.on(TapPhase::Move, move |_| *counter.borrow_mut() += 1);

        assert!(publisher.off(id));
        assert!(!publisher.off(id));
        publisher.publish(&event(TapPhase::Move), false);
        assert_eq!(*hits.borrow(), 0);
    }

    #[test]
    fn test_listeners_fire_in_registration_order() {
        let mut publisher = EventPublisher::new();
        let order = Rc::new(RefCell::new(Vec::new()));
        for tag in ["a", "b", "c"] {
            let log = Rc::clone(&order);
            publisher.on(TapPhase::Down, move |_| log.borrow_mut().push(tag));
        }
        publisher.publish(&event(TapPhase::Down), false);
        assert_eq!(*order.borrow(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_phases_are_independent() {
        let mut publisher = EventPublisher::new();
        let hits = Rc::new(RefCell::new(0));
        let counter = Rc::clone(&hits);
        publisher.on(TapPhase::Down, move |_| *counter.borrow_mut() += 1);

        assert_eq!(publisher.publish(&event(TapPhase::Move), false), 0);
        assert_eq!(publisher.publish(&event(TapPhase::Up), false), 0);
        assert_eq!(*hits.borrow(), 0);
    }
}
