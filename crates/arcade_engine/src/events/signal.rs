//! Typed signals
//!
//! A [`Signal`] keeps a priority-ordered list of listeners and calls them
//! synchronously on [`Signal::dispatch`]. Dispatch walks a snapshot of the
//! list, so a listener may add or remove listeners (itself included) on the
//! signal it is being called from:
//!
//! - every listener bound when the dispatch started runs exactly once,
//! - listeners added during a dispatch first run on the next one,
//! - [`Signal::halt`] called from a listener stops the rest of the walk.
//!
//! A signal is a cheap handle (`Rc`); clones refer to the same listener list,
//! which is how a listener gets hold of the signal it wants to halt.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

/// Listener callback. Identity is the `Rc` allocation.
pub type Listener<T> = Rc<dyn Fn(&T)>;

/// Wrap a closure as a [`Listener`]
pub fn listener<T>(callback: impl Fn(&T) + 'static) -> Listener<T> {
    Rc::new(callback)
}

/// Signal registration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SignalError {
    /// The listener is already bound with the other once-mode
    #[error("listener is already bound with once = {existing_once}; remove it before re-adding it with a different mode")]
    OnceMismatch {
        /// Mode of the existing binding
        existing_once: bool,
    },
}

struct Binding<T> {
    listener: Listener<T>,
    once: bool,
    priority: i32,
    active: Cell<bool>,
}

struct SignalState<T> {
    bindings: Vec<Rc<Binding<T>>>,
    memorize: bool,
    previous: Option<T>,
    propagating: bool,
    active: bool,
}

impl<T> SignalState<T> {
    fn find(&self, listener: &Listener<T>) -> Option<Rc<Binding<T>>> {
        self.bindings
            .iter()
            .find(|binding| same_listener(&binding.listener, listener))
            .cloned()
    }

    fn detach(&mut self, binding: &Rc<Binding<T>>) -> bool {
        let before = self.bindings.len();
        self.bindings.retain(|candidate| !Rc::ptr_eq(candidate, binding));
        self.bindings.len() != before
    }
}

fn same_listener<T>(a: &Listener<T>, b: &Listener<T>) -> bool {
    // Compare data pointers only; vtable addresses are not unique per type.
    std::ptr::eq(Rc::as_ptr(a).cast::<()>(), Rc::as_ptr(b).cast::<()>())
}

/// Observer list carrying payloads of type `T`
pub struct Signal<T: 'static> {
    state: Rc<RefCell<SignalState<T>>>,
}

impl<T: 'static> Clone for Signal<T> {
    fn clone(&self) -> Self {
        Self {
            state: Rc::clone(&self.state),
        }
    }
}

impl<T: 'static> fmt::Debug for Signal<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("Signal")
            .field("listeners", &state.bindings.len())
            .field("memorize", &state.memorize)
            .field("active", &state.active)
            .finish()
    }
}

impl<T: Clone + 'static> Default for Signal<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + 'static> Signal<T> {
    /// Create a signal that does not remember payloads
    pub fn new() -> Self {
        Self::with_memory(false)
    }

    /// Create a signal that replays its last payload to late listeners
    pub fn memorized() -> Self {
        Self::with_memory(true)
    }

    fn with_memory(memorize: bool) -> Self {
        Self {
            state: Rc::new(RefCell::new(SignalState {
                bindings: Vec::new(),
                memorize,
                previous: None,
                propagating: true,
                active: true,
            })),
        }
    }

    /// Bind a listener that stays bound until removed
    pub fn add(&self, listener: &Listener<T>, priority: i32) -> Result<SignalBinding<T>, SignalError> {
        self.register(listener, false, priority)
    }

    /// Bind a listener that is removed right before its first call
    pub fn add_once(&self, listener: &Listener<T>, priority: i32) -> Result<SignalBinding<T>, SignalError> {
        self.register(listener, true, priority)
    }

    fn register(
        &self,
        listener: &Listener<T>,
        once: bool,
        priority: i32,
    ) -> Result<SignalBinding<T>, SignalError> {
        let (binding, replay) = {
            let mut state = self.state.borrow_mut();
            if let Some(existing) = state.find(listener) {
                if existing.once != once {
                    return Err(SignalError::OnceMismatch {
                        existing_once: existing.once,
                    });
                }
                return Ok(self.handle(existing));
            }

            let binding = Rc::new(Binding {
                listener: Rc::clone(listener),
                once,
                priority,
                active: Cell::new(true),
            });
            // after every binding of equal or higher priority
            let index = state
                .bindings
                .iter()
                .position(|existing| existing.priority < priority)
                .unwrap_or(state.bindings.len());
            state.bindings.insert(index, Rc::clone(&binding));

            let replay = if state.memorize { state.previous.clone() } else { None };
            (binding, replay)
        };

        if let Some(payload) = replay {
            self.execute(&binding, &payload);
        }
        Ok(self.handle(binding))
    }

    fn handle(&self, binding: Rc<Binding<T>>) -> SignalBinding<T> {
        SignalBinding {
            signal: Rc::downgrade(&self.state),
            binding,
        }
    }

    fn execute(&self, binding: &Rc<Binding<T>>, payload: &T) {
        if !binding.active.get() {
            return;
        }
        if binding.once {
            self.state.borrow_mut().detach(binding);
        }
        (binding.listener)(payload);
    }

    /// Call every active listener, highest priority first
    pub fn dispatch(&self, payload: T) {
        let snapshot = {
            let mut state = self.state.borrow_mut();
            if !state.active {
                return;
            }
            if state.memorize {
                state.previous = Some(payload.clone());
            }
            state.propagating = true;
            state.bindings.clone()
        };

        for binding in &snapshot {
            if !self.state.borrow().propagating {
                break;
            }
            self.execute(binding, &payload);
        }
    }

    /// Stop the dispatch in progress from reaching the remaining listeners
    pub fn halt(&self) {
        self.state.borrow_mut().propagating = false;
    }

    /// Unbind a listener; returns whether it was bound
    pub fn remove(&self, listener: &Listener<T>) -> bool {
        let mut state = self.state.borrow_mut();
        match state.find(listener) {
            Some(binding) => state.detach(&binding),
            None => false,
        }
    }

    /// Unbind every listener
    pub fn remove_all(&self) {
        self.state.borrow_mut().bindings.clear();
    }

    /// Whether the listener is bound
    pub fn has(&self, listener: &Listener<T>) -> bool {
        self.state.borrow().find(listener).is_some()
    }

    /// Number of bound listeners
    pub fn num_listeners(&self) -> usize {
        self.state.borrow().bindings.len()
    }

    /// Drop the memorized payload
    pub fn forget(&self) {
        self.state.borrow_mut().previous = None;
    }

    /// Unbind everything, forget the payload and stop dispatching
    pub fn dispose(&self) {
        let mut state = self.state.borrow_mut();
        state.bindings.clear();
        state.previous = None;
        state.active = false;
    }

    /// Enable or disable dispatching
    pub fn set_active(&self, active: bool) {
        self.state.borrow_mut().active = active;
    }

    /// Whether dispatching is enabled
    pub fn is_active(&self) -> bool {
        self.state.borrow().active
    }

    /// Whether payloads are replayed to late listeners
    pub fn is_memorized(&self) -> bool {
        self.state.borrow().memorize
    }
}

/// Handle to one listener registration
pub struct SignalBinding<T: 'static> {
    signal: Weak<RefCell<SignalState<T>>>,
    binding: Rc<Binding<T>>,
}

impl<T: 'static> fmt::Debug for SignalBinding<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignalBinding")
            .field("once", &self.binding.once)
            .field("priority", &self.binding.priority)
            .field("active", &self.binding.active.get())
            .finish()
    }
}

impl<T: 'static> SignalBinding<T> {
    /// Remove the listener from its signal; returns whether it was bound
    pub fn detach(&self) -> bool {
        self.signal
            .upgrade()
            .is_some_and(|state| state.borrow_mut().detach(&self.binding))
    }

    /// Whether the listener is still bound to a live signal
    pub fn is_bound(&self) -> bool {
        self.signal.upgrade().is_some_and(|state| {
            state
                .borrow()
                .bindings
                .iter()
                .any(|candidate| Rc::ptr_eq(candidate, &self.binding))
        })
    }

    /// Whether the binding is removed before its first call
    pub fn is_once(&self) -> bool {
        self.binding.once
    }

    /// Priority the binding was registered with
    pub fn priority(&self) -> i32 {
        self.binding.priority
    }

    /// Mute or unmute this binding without unbinding it
    pub fn set_active(&self, active: bool) {
        self.binding.active.set(active);
    }

    /// Whether the binding is called on dispatch
    pub fn is_active(&self) -> bool {
        self.binding.active.get()
    }

    /// The bound listener
    pub fn listener(&self) -> Listener<T> {
        Rc::clone(&self.binding.listener)
    }

    /// Call the listener directly, honouring `active` and `once`
    pub fn execute(&self, payload: &T) {
        if !self.binding.active.get() {
            return;
        }
        if self.binding.once {
            self.detach();
        }
        (self.binding.listener)(payload);
    }
}
