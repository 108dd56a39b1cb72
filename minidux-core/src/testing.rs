//! Test utilities for minidux applications
//!
//! This module provides helpers for testing reducers, middleware and
//! listeners:
//!
//! - [`Recorder`]: middleware that captures every action passing through it
//! - [`NotifyCounter`]: listener that counts notifications
//! - [`TestHarness`]: a store wired with both, plus assertion macros for
//!   verifying dispatched actions
//!
//! # Example
//!
//! ```ignore
//! use minidux::testing::TestHarness;
//!
//! let mut harness = TestHarness::new(reducer);
//!
//! harness.dispatch(Action::Increment);
//! assert_eq!(harness.state().count, 1);
//! assert_eq!(harness.notifications(), 1);
//!
//! let dispatched = harness.drain_dispatched();
//! assert_dispatched!(dispatched, Action::Increment);
//! ```

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use crate::action::{Action, InitAction};
use crate::middleware::{apply_middleware, ApplyMiddleware, Dispatch, Middleware};
use crate::store::{Reducer, Store, Subscription};

/// Middleware that records every action it sees
///
/// Clones share the same buffer, so keep one clone in the test and move the
/// other into the middleware factory. By default the action is forwarded;
/// [`Recorder::swallowing`] builds one that drops everything.
pub struct Recorder<A> {
    seen: Rc<RefCell<Vec<A>>>,
    forward: bool,
}

impl<A: Action> Recorder<A> {
    /// Record and forward
    pub fn new() -> Self {
        Self {
            seen: Rc::new(RefCell::new(Vec::new())),
            forward: true,
        }
    }

    /// Record and drop
    pub fn swallowing() -> Self {
        Self {
            forward: false,
            ..Self::new()
        }
    }

    /// Actions recorded so far, oldest first
    pub fn actions(&self) -> Vec<A> {
        self.seen.borrow().clone()
    }

    /// Take all recorded actions, leaving the buffer empty
    pub fn drain(&self) -> Vec<A> {
        std::mem::take(&mut *self.seen.borrow_mut())
    }

    pub fn len(&self) -> usize {
        self.seen.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.borrow().is_empty()
    }
}

impl<A: Action> Default for Recorder<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> Clone for Recorder<A> {
    fn clone(&self) -> Self {
        Self {
            seen: Rc::clone(&self.seen),
            forward: self.forward,
        }
    }
}

impl<A: fmt::Debug> fmt::Debug for Recorder<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Recorder")
            .field("seen", &self.seen.borrow())
            .field("forward", &self.forward)
            .finish()
    }
}

impl<A: Action> Middleware<A> for Recorder<A> {
    fn handle(&self, action: A, next: &Dispatch<A>) {
        self.seen.borrow_mut().push(action.clone());
        if self.forward {
            next(action);
        }
    }
}

/// Listener that counts how many times it was notified
#[derive(Debug, Clone, Default)]
pub struct NotifyCounter {
    count: Rc<Cell<usize>>,
}

impl NotifyCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// A listener closure bumping this counter
    pub fn listener(&self) -> impl Fn() + 'static {
        let count = Rc::clone(&self.count);
        move || count.set(count.get() + 1)
    }

    /// Subscribe this counter to a store
    pub fn attach<S, A: Action>(&self, store: &Store<S, A>) -> Subscription {
        store.subscribe(self.listener())
    }

    pub fn count(&self) -> usize {
        self.count.get()
    }

    pub fn reset(&self) {
        self.count.set(0);
    }
}

/// Generic test harness for minidux stores.
///
/// Provides:
/// - A store whose outermost middleware is a [`Recorder`]
/// - A [`NotifyCounter`] subscribed to the store
/// - Helper methods for dispatching and draining recorded actions
///
/// # Type Parameters
///
/// - `S`: The state type
/// - `A`: The action type (must implement [`InitAction`])
pub struct TestHarness<S, A> {
    store: Store<S, A>,
    recorder: Recorder<A>,
    counter: NotifyCounter,
}

impl<S: 'static, A: InitAction> TestHarness<S, A> {
    /// Create a harness around a bare reducer
    pub fn new<R>(reducer: R) -> Self
    where
        R: Reducer<S, A> + 'static,
    {
        Self::with_middleware(reducer, apply_middleware())
    }

    /// Create a harness whose recorder sits in front of `middleware`
    pub fn with_middleware<R>(reducer: R, middleware: ApplyMiddleware<A>) -> Self
    where
        R: Reducer<S, A> + 'static,
    {
        let recorder = Recorder::new();
        let outer = recorder.clone();
        let enhancer = apply_middleware().with(move || outer).chain(middleware);

        let store = Store::with_enhancer(reducer, enhancer);
        let counter = NotifyCounter::new();
        counter.attach(&store);

        Self {
            store,
            recorder,
            counter,
        }
    }
}

impl<S, A: Action> TestHarness<S, A> {
    /// Dispatch through the full chain
    pub fn dispatch(&self, action: A) {
        self.store.dispatch(action);
    }

    /// Dispatch several actions in order
    pub fn dispatch_all(&self, actions: impl IntoIterator<Item = A>) {
        for action in actions {
            self.store.dispatch(action);
        }
    }

    /// Current state
    pub fn state(&self) -> Rc<S> {
        self.store.get_state()
    }

    /// The store under test
    pub fn store(&self) -> &Store<S, A> {
        &self.store
    }

    /// Drain every action that entered the chain since the last drain
    pub fn drain_dispatched(&mut self) -> Vec<A> {
        self.recorder.drain()
    }

    /// Number of listener notifications so far
    pub fn notifications(&self) -> usize {
        self.counter.count()
    }
}

/// Assert that a specific action was dispatched.
///
/// # Example
///
/// ```ignore
/// let actions = harness.drain_dispatched();
/// assert_dispatched!(actions, Action::Increment);
/// assert_dispatched!(actions, Action::SetValue(42));
/// ```
#[macro_export]
macro_rules! assert_dispatched {
    ($actions:expr, $pattern:pat $(if $guard:expr)?) => {
        assert!(
            $actions.iter().any(|a| matches!(a, $pattern $(if $guard)?)),
            "Expected action matching `{}` to be dispatched, but got: {:?}",
            stringify!($pattern),
            $actions
        );
    };
}

/// Assert that a specific action was NOT dispatched.
#[macro_export]
macro_rules! assert_not_dispatched {
    ($actions:expr, $pattern:pat $(if $guard:expr)?) => {
        assert!(
            !$actions.iter().any(|a| matches!(a, $pattern $(if $guard)?)),
            "Expected action matching `{}` NOT to be dispatched, but it was: {:?}",
            stringify!($pattern),
            $actions
        );
    };
}

/// Find and return the first action matching a pattern.
#[macro_export]
macro_rules! find_dispatched {
    ($actions:expr, $pattern:pat $(if $guard:expr)?) => {
        $actions.iter().find(|a| matches!(a, $pattern $(if $guard)?))
    };
}

/// Count how many actions match a pattern.
///
/// # Example
///
/// ```ignore
/// let actions = harness.drain_dispatched();
/// assert_eq!(count_dispatched!(actions, Action::Tick), 3);
/// ```
#[macro_export]
macro_rules! count_dispatched {
    ($actions:expr, $pattern:pat $(if $guard:expr)?) => {
        $actions.iter().filter(|a| matches!(a, $pattern $(if $guard)?)).count()
    };
}
