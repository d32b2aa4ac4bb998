//! The tap state machine: one down/move/up stream over three input families

use crate::{
    backend::Backend,
    core::{
        config::TapConfig,
        family::{DownDisposition, FamilyTracker, InputFamily},
        position::{Position, PositionTracker},
    },
    input::{
        events::{ListenerId, RawSample, TapEvent, TapPhase},
        publisher::EventPublisher,
    },
    Result, TapError,
};
use futures::channel::oneshot;
use std::future::Future;

/// Explicit lifecycle of a tap
///
/// Operations on a destroyed tap fail fast with [`TapError::Destroyed`]
/// instead of silently reading invalidated state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    /// Built but not yet listening
    Constructed,
    /// Listeners attached, events flowing
    Active,
    /// Torn down; every operation errors
    Destroyed,
}

/// Normalizes mouse, touch, and pointer input into a single tap stream
///
/// Generic over a [`Backend`] that owns the platform side: feature
/// detection, listener registration, and pointer lock. The backend (or a
/// test) feeds normalized events back in through [`Tap::ingest`].
pub struct Tap<B: Backend> {
    backend: B,
    config: TapConfig,
    lifecycle: Lifecycle,
    families: FamilyTracker,
    position: PositionTracker,
    publisher: EventPublisher,
    is_down: bool,
    is_paused: bool,
    lock_request_pending: bool,
    lock_waiters: Vec<oneshot::Sender<()>>,
    unlock_waiters: Vec<oneshot::Sender<()>>,
}

impl<B: Backend> Tap<B> {
    /// Builds a tap in the `Constructed` state; call [`Tap::activate`] to
    /// start listening
    pub fn new(backend: B, config: TapConfig) -> Self {
        Self {
            backend,
            config,
            lifecycle: Lifecycle::Constructed,
            families: FamilyTracker::new(),
            position: PositionTracker::new(),
            publisher: EventPublisher::new(),
            is_down: false,
            is_paused: false,
            lock_request_pending: false,
            lock_waiters: Vec::new(),
            unlock_waiters: Vec::new(),
        }
    }

    /// Attaches listeners for every family that is both supported by the
    /// backend and enabled by configuration
    pub fn activate(&mut self) -> Result<()> {
        match self.lifecycle {
            Lifecycle::Constructed => {}
            Lifecycle::Active => return Err(TapError::AlreadyActive),
            Lifecycle::Destroyed => return Err(TapError::Destroyed),
        }

        for family in InputFamily::ALL {
            if self.config.is_enabled(family) && self.backend.supports(family) {
                self.backend.attach(family);
                self.families.activate(family);
            }
        }
        if self.families.active_families().is_empty() {
            log::warn!("no input family attached; this tap will never emit events");
        }

        self.lifecycle = Lifecycle::Active;
        Ok(())
    }

    /// Feeds one normalized platform event into the state machine
    ///
    /// Events from detached families are ignored; a down event may detach
    /// the firing family instead of being delivered (duplicate suppression).
    pub fn ingest(&mut self, family: InputFamily, phase: TapPhase, sample: RawSample) -> Result<()> {
        self.ensure_active()?;
        if !self.families.is_active(family) {
            log::debug!("ignoring {phase:?} from detached family {family:?}");
            return Ok(());
        }

        match phase {
            TapPhase::Down => self.ingest_down(family, sample),
            TapPhase::Move => self.ingest_move(sample),
            TapPhase::Up => self.ingest_up(sample),
        }
        Ok(())
    }

    fn ingest_down(&mut self, family: InputFamily, sample: RawSample) {
        if self.families.register_down(family) == DownDisposition::Suppress {
            log::debug!("suppressing duplicate down from {family:?}; detaching its listeners");
            self.backend.detach(family);
            self.families.deactivate(family);
            return;
        }

        self.is_down = true;

        // Pointer lock is requested on the first down after request(), not
        // when request() is called: browsers only honor lock requests made
        // inside a user-gesture handler.
        if self.lock_request_pending {
            self.lock_request_pending = false;
            self.backend.request_pointer_lock();
        }

        let position = self.position.advance(&sample, self.backend.is_pointer_locked());
        self.publish(TapPhase::Down, position, None, sample);
    }

    fn ingest_move(&mut self, sample: RawSample) {
        let position = self.position.advance(&sample, self.backend.is_pointer_locked());
        self.publish(TapPhase::Move, position, Some(self.is_down), sample);
    }

    fn ingest_up(&mut self, sample: RawSample) {
        self.is_down = false;
        let position = self.position.advance(&sample, self.backend.is_pointer_locked());
        self.publish(TapPhase::Up, position, None, sample);
    }

    fn publish(
        &mut self,
        phase: TapPhase,
        position: Position,
        dragging: Option<bool>,
        sample: RawSample,
    ) {
        let event = TapEvent {
            phase,
            position,
            dragging,
            sample,
        };
        let delivered = self.publisher.publish(&event, self.is_paused);
        log::trace!("{phase:?} at {position:?} delivered to {delivered} listener(s)");
    }

    /// Registers a persistent listener (suppressed while paused)
    pub fn on<F>(&mut self, phase: TapPhase, callback: F) -> Result<ListenerId>
    where
        F: Fn(&TapEvent) + 'static,
    {
        self.ensure_not_destroyed()?;
        Ok(self.publisher.on(phase, callback))
    }

    /// Registers a one-shot listener (fires exactly once, even while paused)
    pub fn once<F>(&mut self, phase: TapPhase, callback: F) -> Result<ListenerId>
    where
        F: Fn(&TapEvent) + 'static,
    {
        self.ensure_not_destroyed()?;
        Ok(self.publisher.once(phase, callback))
    }

    /// Removes a listener; returns false if the id is unknown
    pub fn off(&mut self, id: ListenerId) -> Result<bool> {
        self.ensure_not_destroyed()?;
        Ok(self.publisher.off(id))
    }

    /// Stops delivery through persistent listeners; internal state keeps
    /// updating while paused
    pub fn pause(&mut self) -> Result<()> {
        self.ensure_not_destroyed()?;
        self.is_paused = true;
        Ok(())
    }

    /// Resumes delivery through persistent listeners
    pub fn resume(&mut self) -> Result<()> {
        self.ensure_not_destroyed()?;
        self.is_paused = false;
        Ok(())
    }

    /// Arms a pointer-lock request and returns a future that resolves once
    /// the lock is reported engaged
    ///
    /// The platform request itself fires on the next down event. If the
    /// pointer is already locked the future resolves immediately.
    pub fn request_pointer_lock(&mut self) -> Result<impl Future<Output = ()>> {
        self.ensure_active()?;
        let (tx, rx) = oneshot::channel();
        if self.backend.is_pointer_locked() {
            let _ = tx.send(());
        } else {
            self.lock_request_pending = true;
            self.lock_waiters.push(tx);
        }
        Ok(async move {
            let _ = rx.await;
        })
    }

    /// Requests pointer-lock exit and returns a future that resolves once
    /// the lock is reported released
    ///
    /// If the pointer is not locked the future resolves immediately.
    pub fn exit_pointer_lock(&mut self) -> Result<impl Future<Output = ()>> {
        self.ensure_active()?;
        let (tx, rx) = oneshot::channel();
        if self.backend.is_pointer_locked() {
            self.unlock_waiters.push(tx);
            self.backend.exit_pointer_lock();
        } else {
            let _ = tx.send(());
        }
        Ok(async move {
            let _ = rx.await;
        })
    }

    /// Called by the platform glue (or tests) whenever the pointer-lock
    /// state flips; settles the matching waiters
    pub fn notify_pointer_lock_change(&mut self) -> Result<()> {
        self.ensure_not_destroyed()?;
        let waiters = if self.backend.is_pointer_locked() {
            &mut self.lock_waiters
        } else {
            &mut self.unlock_waiters
        };
        for tx in waiters.drain(..) {
            let _ = tx.send(());
        }
        Ok(())
    }

    /// Live pointer-lock state, read through the backend on every call
    pub fn is_pointer_locked(&self) -> bool {
        self.backend.is_pointer_locked()
    }

    /// Detaches all listeners, drops all subscribers, and settles pending
    /// pointer-lock futures; the tap is unusable afterwards
    pub fn destroy(&mut self) -> Result<()> {
        self.ensure_not_destroyed()?;
        self.is_paused = true;
        for family in self.families.active_families() {
            self.backend.detach(family);
            self.families.deactivate(family);
        }
        log::debug!("destroying tap, dropping {} listener(s)", self.publisher.len());
        self.publisher.clear();
        // Dropping the senders resolves the waiting futures.
        self.lock_waiters.clear();
        self.unlock_waiters.clear();
        self.lock_request_pending = false;
        self.lifecycle = Lifecycle::Destroyed;
        Ok(())
    }

    pub fn is_down(&self) -> bool {
        self.is_down
    }

    pub fn is_paused(&self) -> bool {
        self.is_paused
    }

    pub fn current_position(&self) -> Position {
        self.position.current()
    }

    pub fn last_position(&self) -> Position {
        self.position.last()
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    /// Families currently driving this tap
    pub fn active_families(&self) -> Vec<InputFamily> {
        self.families.active_families()
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    fn ensure_active(&self) -> Result<()> {
        match self.lifecycle {
            Lifecycle::Active => Ok(()),
            Lifecycle::Constructed => Err(TapError::NotActive),
            Lifecycle::Destroyed => Err(TapError::Destroyed),
        }
    }

    fn ensure_not_destroyed(&self) -> Result<()> {
        if self.lifecycle == Lifecycle::Destroyed {
            Err(TapError::Destroyed)
        } else {
            Ok(())
        }
    }
}
