//! Todo and goal lists driven by a minidux store
//!
//! Data flow:
//! 1. A [`Command`] (CLI argument or stdin line) becomes a [`TodoAction`]
//! 2. The action passes the action logger, then the [`checker`] guard
//! 3. [`app_reducer`] computes the next [`AppState`]
//! 4. Subscribers re-render with [`render`]

pub mod action;
pub mod checker;
pub mod command;
pub mod ids;
pub mod reducer;
pub mod render;
pub mod state;

use minidux::debug::ActionLoggerMiddleware;
use minidux::{apply_middleware, ApplyMiddleware, GuardMiddleware, Store};

pub use action::{Goal, Todo, TodoAction};
pub use checker::{checker, BAD_IDEA};
pub use command::{Command, CommandError};
pub use ids::{IdGenerator, RandomIds, SequentialIds};
pub use reducer::{app_reducer, goals_reducer, todos_reducer};
pub use render::render;
pub use state::AppState;

/// Middleware chain: logger outermost, so refused adds are still logged
pub fn middleware<F>(logger: ActionLoggerMiddleware, on_deny: F) -> ApplyMiddleware<TodoAction>
where
    F: Fn(&TodoAction, &str) + 'static,
{
    apply_middleware()
        .with(move || logger)
        .with(move || GuardMiddleware::new(checker).on_deny(on_deny))
}

/// Store wired with [`app_reducer`] and [`middleware`]
pub fn create_app_store<F>(logger: ActionLoggerMiddleware, on_deny: F) -> Store<AppState, TodoAction>
where
    F: Fn(&TodoAction, &str) + 'static,
{
    Store::with_enhancer(app_reducer, middleware(logger, on_deny))
}
