//! Browser backend: DOM listeners, feature detection, and pointer lock
//!
//! Wires a [`Tap`] to a real `EventTarget`. One closure is registered per
//! (family, phase) pair; each builds a [`RawSample`] from the DOM event and
//! forwards it into the shared tap cell. All platform failures are logged
//! and swallowed: nothing in this module throws on the normal path.
//!
//! Listener callbacks run inside a `RefCell` borrow of the tap, so a
//! callback must not call back into the same [`WebTap`]; use
//! `wasm_bindgen_futures::spawn_local` to defer instead.

use crate::{
    backend::Backend,
    core::{config::TapConfig, family::InputFamily, position::Position},
    input::{
        events::{ListenerId, RawSample, TapEvent, TapPhase},
        tap::{Lifecycle, Tap},
    },
    Result, TapError,
};
use fxhash::FxHashMap;
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use wasm_bindgen::{closure::Closure, JsCast, JsValue};

type SharedTap = Rc<RefCell<Tap<WebBackend>>>;
type WeakTap = Weak<RefCell<Tap<WebBackend>>>;

/// [`Backend`] implementation over web-sys
pub struct WebBackend {
    target: web_sys::EventTarget,
    /// Pointer lock needs an element; absent when listening on the window
    lock_element: Option<web_sys::Element>,
    document: web_sys::Document,
    handle: Option<WeakTap>,
    listeners: FxHashMap<(InputFamily, TapPhase), Closure<dyn FnMut(web_sys::Event)>>,
    /// Detached closures parked until teardown: a closure must not be freed
    /// while the event that triggered the detach is still dispatching it
    retired: Vec<Closure<dyn FnMut(web_sys::Event)>>,
}

impl WebBackend {
    fn new(target: Option<web_sys::Element>) -> Result<Self> {
        let window =
            web_sys::window().ok_or_else(|| TapError::Environment("no window".into()))?;
        let document = window
            .document()
            .ok_or_else(|| TapError::Environment("no document".into()))?;

        let (target, lock_element): (web_sys::EventTarget, Option<web_sys::Element>) = match target
        {
            Some(element) => (element.clone().into(), Some(element)),
            None => {
                log::warn!("no target element supplied; falling back to the window");
                (window.into(), None)
            }
        };

        Ok(Self {
            target,
            lock_element,
            document,
            handle: None,
            listeners: FxHashMap::default(),
            retired: Vec::new(),
        })
    }

    fn set_handle(&mut self, handle: WeakTap) {
        self.handle = Some(handle);
    }
}

impl Backend for WebBackend {
    fn supports(&self, family: InputFamily) -> bool {
        let Some(window) = web_sys::window() else {
            return false;
        };
        let key = match family {
            InputFamily::Touch => "ontouchstart",
            InputFamily::Mouse => "onmousedown",
            InputFamily::Pointer => "PointerEvent",
        };
        js_sys::Reflect::has(window.as_ref(), &JsValue::from_str(key)).unwrap_or(false)
    }

    fn attach(&mut self, family: InputFamily) {
        let Some(handle) = self.handle.clone() else {
            log::warn!("attach for {family:?} before the tap handle was wired; skipping");
            return;
        };

        for phase in TapPhase::ALL {
            let weak = handle.clone();
            let closure = Closure::wrap(Box::new(move |event: web_sys::Event| {
                if let Some(tap) = weak.upgrade() {
                    let sample = RawSample::from_dom_event(&event);
                    if let Err(err) = tap.borrow_mut().ingest(family, phase, sample) {
                        log::warn!("dropping {family:?} {phase:?} event: {err}");
                    }
                }
            }) as Box<dyn FnMut(web_sys::Event)>);

            let name = family.dom_event_name(phase);
            if let Err(err) = self
                .target
                .add_event_listener_with_callback(name, closure.as_ref().unchecked_ref())
            {
                log::warn!("failed to attach {name} listener: {err:?}");
            }
            self.listeners.insert((family, phase), closure);
        }
    }

    fn detach(&mut self, family: InputFamily) {
        for phase in TapPhase::ALL {
            if let Some(closure) = self.listeners.remove(&(family, phase)) {
                let name = family.dom_event_name(phase);
                if let Err(err) = self
                    .target
                    .remove_event_listener_with_callback(name, closure.as_ref().unchecked_ref())
                {
                    log::warn!("failed to detach {name} listener: {err:?}");
                }
                self.retired.push(closure);
            }
        }
    }

    fn request_pointer_lock(&mut self) {
        match &self.lock_element {
            Some(element) => element.request_pointer_lock(),
            None => log::warn!("pointer lock requested but the target is the window; ignoring"),
        }
    }

    fn exit_pointer_lock(&mut self) {
        self.document.exit_pointer_lock();
    }

    fn is_pointer_locked(&self) -> bool {
        self.document.pointer_lock_element().is_some()
    }
}

/// Owning handle for a browser tap
///
/// Wraps the tap in an `Rc<RefCell>` shared with the DOM closures and keeps
/// the `pointerlockchange` listener alive. Construct with
/// [`WebTap::new`], subscribe, and call [`WebTap::destroy`] when done.
pub struct WebTap {
    core: SharedTap,
    document: web_sys::Document,
    lock_change: Option<Closure<dyn FnMut()>>,
}

impl WebTap {
    /// Attaches to the given element, or to the window (with a warning)
    /// when no element is supplied
    pub fn new(target: Option<web_sys::Element>) -> Result<Self> {
        Self::with_config(target, TapConfig::default())
    }

    pub fn with_config(target: Option<web_sys::Element>, config: TapConfig) -> Result<Self> {
        let backend = WebBackend::new(target)?;
        let document = backend.document.clone();

        let core: SharedTap = Rc::new(RefCell::new(Tap::new(backend, config)));
        core.borrow_mut()
            .backend_mut()
            .set_handle(Rc::downgrade(&core));
        core.borrow_mut().activate()?;

        let weak = Rc::downgrade(&core);
        let lock_change = Closure::wrap(Box::new(move || {
            if let Some(tap) = weak.upgrade() {
                let _ = tap.borrow_mut().notify_pointer_lock_change();
            }
        }) as Box<dyn FnMut()>);
        if let Err(err) = document.add_event_listener_with_callback(
            "pointerlockchange",
            lock_change.as_ref().unchecked_ref(),
        ) {
            log::warn!("failed to attach pointerlockchange listener: {err:?}");
        }

        Ok(Self {
            core,
            document,
            lock_change: Some(lock_change),
        })
    }

    /// Registers a persistent listener (suppressed while paused)
    pub fn on<F>(&self, phase: TapPhase, callback: F) -> Result<ListenerId>
    where
        F: Fn(&TapEvent) + 'static,
    {
        self.core.borrow_mut().on(phase, callback)
    }

    /// Registers a one-shot listener (fires exactly once, even while paused)
    pub fn once<F>(&self, phase: TapPhase, callback: F) -> Result<ListenerId>
    where
        F: Fn(&TapEvent) + 'static,
    {
        self.core.borrow_mut().once(phase, callback)
    }

    pub fn off(&self, id: ListenerId) -> Result<bool> {
        self.core.borrow_mut().off(id)
    }

    pub fn pause(&self) -> Result<()> {
        self.core.borrow_mut().pause()
    }

    pub fn resume(&self) -> Result<()> {
        self.core.borrow_mut().resume()
    }

    pub fn is_down(&self) -> bool {
        self.core.borrow().is_down()
    }

    pub fn is_paused(&self) -> bool {
        self.core.borrow().is_paused()
    }

    pub fn current_position(&self) -> Position {
        self.core.borrow().current_position()
    }

    pub fn last_position(&self) -> Position {
        self.core.borrow().last_position()
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.core.borrow().lifecycle()
    }

    pub fn active_families(&self) -> Vec<InputFamily> {
        self.core.borrow().active_families()
    }

    /// Live pointer-lock state, read from the document on every call
    pub fn is_pointer_locked(&self) -> bool {
        self.core.borrow().is_pointer_locked()
    }

    /// Resolves once pointer lock is engaged; the platform request fires on
    /// the next down event (browsers require a user gesture). Resolves
    /// immediately if already locked.
    pub async fn request_pointer_lock(&self) -> Result<()> {
        let fut = self.core.borrow_mut().request_pointer_lock()?;
        fut.await;
        Ok(())
    }

    /// Resolves once pointer lock is released; immediately if not locked
    pub async fn exit_pointer_lock(&self) -> Result<()> {
        let fut = self.core.borrow_mut().exit_pointer_lock()?;
        fut.await;
        Ok(())
    }

    /// Fire-and-forget variant of [`WebTap::request_pointer_lock`] for
    /// event callbacks, which cannot await. Observe the engaged state via
    /// [`WebTap::is_pointer_locked`] or a `once` listener.
    pub fn request_pointer_lock_detached(&self) -> Result<()> {
        let fut = self.core.borrow_mut().request_pointer_lock()?;
        wasm_bindgen_futures::spawn_local(async move {
            fut.await;
            log::debug!("pointer lock engaged");
        });
        Ok(())
    }

    /// Fire-and-forget variant of [`WebTap::exit_pointer_lock`]
    pub fn exit_pointer_lock_detached(&self) -> Result<()> {
        let fut = self.core.borrow_mut().exit_pointer_lock()?;
        wasm_bindgen_futures::spawn_local(async move {
            fut.await;
            log::debug!("pointer lock released");
        });
        Ok(())
    }

    /// Detaches every listener (including `pointerlockchange`), drops all
    /// subscribers, and invalidates the tap
    pub fn destroy(&mut self) -> Result<()> {
        if let Some(closure) = self.lock_change.take() {
            if let Err(err) = self.document.remove_event_listener_with_callback(
                "pointerlockchange",
                closure.as_ref().unchecked_ref(),
            ) {
                log::warn!("failed to detach pointerlockchange listener: {err:?}");
            }
        }
        self.core.borrow_mut().destroy()
    }
}
