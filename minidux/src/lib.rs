//! minidux: a minimal observable state container with pluggable middleware
//!
//! Like Redux, but typed: actions are enums, reducers are pure functions
//! `(Option<&State>, &Action) -> State`, and middleware sits between
//! `dispatch` and the reducer.
//!
//! # Example
//! ```
//! use minidux::prelude::*;
//!
//! #[derive(Action, Clone, Debug)]
//! enum CounterAction {
//!     #[action(init)]
//!     Init,
//!     Increment,
//!     Decrement,
//! }
//!
//! fn reducer(state: Option<&i32>, action: &CounterAction) -> i32 {
//!     let count = state.copied().unwrap_or(0);
//!     match action {
//!         CounterAction::Init => count,
//!         CounterAction::Increment => count + 1,
//!         CounterAction::Decrement => count - 1,
//!     }
//! }
//!
//! let store = Store::with_enhancer(reducer, apply_middleware().with(LoggingMiddleware::new));
//! store.dispatch(CounterAction::Increment);
//! store.dispatch(CounterAction::Increment);
//! assert_eq!(*store.get_state(), 2);
//! ```

// Re-export everything from core
pub use minidux_core::*;

// Re-export derive macros
pub use minidux_macros::Action;

/// Prelude for convenient imports
pub mod prelude {
    pub use minidux_core::prelude::*;

    // Derive macros
    pub use minidux_macros::Action;
}
