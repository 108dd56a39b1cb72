//! Core traits and types for minidux
//!
//! This crate provides the foundational abstractions of a minimal
//! unidirectional-data-flow state container, following the Redux pattern.
//!
//! # Core Concepts
//!
//! - **Action**: Values describing an intended state transition
//! - **Reducer**: Pure function computing the next state from the previous
//!   state and an action
//! - **Store**: Holds the current state, runs dispatched actions through the
//!   reducer and notifies subscribers
//! - **Middleware**: Interceptors between `dispatch` and the reducer, able to
//!   observe, rewrite or drop actions
//! - **Enhancer**: Wraps store creation; [`apply_middleware`] is one
//!
//! # Basic Example
//!
//! ```ignore
//! use minidux::prelude::*;
//!
//! #[derive(Action, Clone, Debug)]
//! enum CounterAction {
//!     #[action(init)]
//!     Init,
//!     Increment,
//! }
//!
//! fn reducer(state: Option<&i32>, action: &CounterAction) -> i32 {
//!     let count = state.copied().unwrap_or(0);
//!     match action {
//!         CounterAction::Init => count,
//!         CounterAction::Increment => count + 1,
//!     }
//! }
//!
//! let store = Store::with_enhancer(reducer, apply_middleware().with(LoggingMiddleware::new));
//! let _render = store.subscribe(|| println!("changed"));
//! store.dispatch(CounterAction::Increment);
//! ```
//!
//! Everything runs synchronously on the caller's thread. See [`Store`] for the
//! re-entrancy rules when a listener or middleware dispatches again.

pub mod action;
pub mod debug;
pub mod error;
pub mod guard;
pub mod middleware;
pub mod store;
pub mod testing;

// Core trait exports
pub use action::{Action, InitAction};
pub use error::ConfigError;

// Store exports
pub use store::{
    create_store, BoxReducer, Enhancer, Reducer, Store, StoreCreator, Subscription, WeakStore,
};

// Middleware exports
pub use guard::{Guard, GuardMiddleware, Verdict};
pub use middleware::{
    apply_middleware, compose, from_fn, interceptor, ApplyMiddleware, Dispatch, FnMiddleware,
    Interceptor, LoggingMiddleware, Middleware, NoopMiddleware,
};

// Testing exports
pub use testing::{NotifyCounter, Recorder, TestHarness};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::action::{Action, InitAction};
    pub use crate::debug::{ActionLogConfig, ActionLoggerConfig, ActionLoggerMiddleware};
    pub use crate::guard::{Guard, GuardMiddleware, Verdict};
    pub use crate::middleware::{
        apply_middleware, compose, from_fn, ApplyMiddleware, Dispatch, Interceptor,
        LoggingMiddleware, Middleware, NoopMiddleware,
    };
    pub use crate::store::{create_store, Enhancer, Reducer, Store, Subscription, WeakStore};
}
