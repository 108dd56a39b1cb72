//! Action trait for type-safe state transitions

use std::fmt::Debug;

/// Marker trait for actions that can be dispatched to the store
///
/// Actions describe an intended state transition. They should be:
/// - Clone: Actions may be recorded, replayed, or rewritten by middleware
/// - Debug: For logging and the action log
///
/// Use `#[derive(Action)]` from `minidux-macros` to auto-implement this trait.
pub trait Action: Clone + Debug + 'static {
    /// Get the action name for logging and filtering
    fn name(&self) -> &'static str;

    /// Human-readable one-line summary, stored in the action log
    ///
    /// Defaults to the `Debug` representation.
    fn summary(&self) -> String {
        format!("{:?}", self)
    }
}

/// Actions that provide the sentinel dispatched when a store is created
///
/// The store calls the reducer once with no previous state and this action
/// to compute its initial state. Reducers should treat it as a no-op.
///
/// `#[derive(Action)]` implements this trait when one unit variant is marked
/// with `#[action(init)]`.
pub trait InitAction: Action {
    /// The initialization sentinel
    fn init() -> Self;
}
