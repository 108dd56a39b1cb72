//! Inspection utilities for minidux stores
//!
//! - **Action Logging**: Pattern-based filtering for action logs, via
//!   `tracing` and an optional in-memory ring buffer
//!
//! # Action Logging
//!
//! ```ignore
//! use minidux::debug::{ActionLoggerConfig, ActionLoggerMiddleware};
//!
//! // Log everything except Tick, configured from the environment
//! let config = ActionLoggerConfig::from_env();
//! let store = Store::with_enhancer(
//!     reducer,
//!     apply_middleware().with(move || ActionLoggerMiddleware::new(config)),
//! );
//! ```

pub mod action_logger;

pub use action_logger::{
    glob_match, ActionLog, ActionLogConfig, ActionLogEntry, ActionLoggerConfig,
    ActionLoggerMiddleware, SharedActionLog, ENV_CAPACITY, ENV_EXCLUDE, ENV_INCLUDE,
};
