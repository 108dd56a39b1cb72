//! Action logging with pattern-based filtering and in-memory storage
//!
//! Provides configurable action logging using glob patterns to include/exclude
//! specific actions from logs. Supports both tracing output and an in-memory
//! ring buffer the application can inspect.
//!
//! # Example
//!
//! ```ignore
//! use minidux_core::debug::{ActionLog, ActionLogConfig, ActionLoggerMiddleware};
//!
//! // Keep the last 100 actions, shared with the middleware
//! let log = ActionLog::shared(ActionLogConfig::default());
//! let store = Store::with_enhancer(
//!     reducer,
//!     apply_middleware().with({
//!         let log = log.clone();
//!         move || ActionLoggerMiddleware::with_log(log)
//!     }),
//! );
//!
//! for entry in log.borrow().recent(10) {
//!     println!("{}: {}", entry.elapsed_display(), entry.summary);
//! }
//! ```

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::action::Action;
use crate::error::ConfigError;
use crate::middleware::{Dispatch, Middleware};

/// Environment variable holding comma-separated include patterns
pub const ENV_INCLUDE: &str = "MINIDUX_LOG_INCLUDE";
/// Environment variable holding comma-separated exclude patterns
pub const ENV_EXCLUDE: &str = "MINIDUX_LOG_EXCLUDE";
/// Environment variable holding the action log capacity
pub const ENV_CAPACITY: &str = "MINIDUX_LOG_CAPACITY";

const DEFAULT_CAPACITY: usize = 100;

fn default_excludes() -> Vec<String> {
    vec!["Tick".to_string(), "Render".to_string()]
}

fn split_patterns(s: &str) -> Vec<String> {
    s.split(',')
        .map(|p| p.trim())
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect()
}

/// Configuration for action logging with glob pattern filtering.
///
/// Patterns support:
/// - `*` matches any sequence of characters
/// - `?` matches any single character
/// - Literal text matches exactly
///
/// # Examples
///
/// - `Add*` matches AddTodo, AddGoal, etc.
/// - `*Todo` matches AddTodo, RemoveTodo, ToggleTodo
/// - `Tick` matches only Tick
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActionLoggerConfig {
    /// If non-empty, only log actions matching these patterns
    pub include_patterns: Vec<String>,
    /// Exclude actions matching these patterns (applied after include)
    pub exclude_patterns: Vec<String>,
}

impl Default for ActionLoggerConfig {
    fn default() -> Self {
        Self {
            include_patterns: Vec::new(),
            // By default, exclude noisy high-frequency actions
            exclude_patterns: default_excludes(),
        }
    }
}

impl ActionLoggerConfig {
    /// Create a new config from comma-separated pattern strings
    ///
    /// # Arguments
    /// - `include`: comma-separated glob patterns (or None for all)
    /// - `exclude`: comma-separated glob patterns (or None for default excludes)
    ///
    /// # Example
    /// ```
    /// use minidux_core::debug::ActionLoggerConfig;
    ///
    /// let config = ActionLoggerConfig::new(Some("Add*,RemoveGoal"), Some("Tick"));
    /// assert!(config.should_log("AddTodo"));
    /// assert!(config.should_log("RemoveGoal"));
    /// assert!(!config.should_log("Tick"));
    /// ```
    pub fn new(include: Option<&str>, exclude: Option<&str>) -> Self {
        let include_patterns = include.map(split_patterns).unwrap_or_default();
        let exclude_patterns = exclude
            .map(split_patterns)
            .unwrap_or_else(default_excludes);

        Self {
            include_patterns,
            exclude_patterns,
        }
    }

    /// Create a config with specific pattern vectors
    pub fn with_patterns(include: Vec<String>, exclude: Vec<String>) -> Self {
        Self {
            include_patterns: include,
            exclude_patterns: exclude,
        }
    }

    /// Read patterns from `MINIDUX_LOG_INCLUDE` / `MINIDUX_LOG_EXCLUDE`
    pub fn from_env() -> Self {
        Self::from_vars(|var| std::env::var(var).ok())
    }

    /// Like [`ActionLoggerConfig::from_env`], with a custom variable lookup
    pub fn from_vars<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let include = lookup(ENV_INCLUDE);
        let exclude = lookup(ENV_EXCLUDE);
        Self::new(include.as_deref(), exclude.as_deref())
    }

    /// Check if an action name should be logged based on include/exclude patterns
    pub fn should_log(&self, action_name: &str) -> bool {
        // If include patterns specified, action must match at least one
        if !self.include_patterns.is_empty() {
            let matches_include = self
                .include_patterns
                .iter()
                .any(|p| glob_match(p, action_name));
            if !matches_include {
                return false;
            }
        }

        let matches_exclude = self
            .exclude_patterns
            .iter()
            .any(|p| glob_match(p, action_name));

        !matches_exclude
    }
}

// ============================================================================
// In-Memory Action Log
// ============================================================================

/// An entry in the action log
#[derive(Debug, Clone)]
pub struct ActionLogEntry {
    /// Action name (from Action::name())
    pub name: &'static str,
    /// Summary representation (from Action::summary())
    pub summary: String,
    /// Timestamp when the action was logged
    pub timestamp: Instant,
    /// Sequence number for ordering
    pub sequence: u64,
}

impl ActionLogEntry {
    /// Create a new log entry
    pub fn new(name: &'static str, summary: String, sequence: u64) -> Self {
        Self {
            name,
            summary,
            timestamp: Instant::now(),
            sequence,
        }
    }

    /// Time since this action was logged
    pub fn elapsed(&self) -> std::time::Duration {
        self.timestamp.elapsed()
    }

    /// Format the elapsed time for display (e.g., "2.3s", "150ms")
    pub fn elapsed_display(&self) -> String {
        let elapsed = self.elapsed();
        if elapsed.as_secs() >= 1 {
            format!("{:.1}s", elapsed.as_secs_f64())
        } else {
            format!("{}ms", elapsed.as_millis())
        }
    }
}

/// Configuration for the action log ring buffer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActionLogConfig {
    /// Maximum number of entries to keep
    pub capacity: usize,
    /// Filter config (reuses ActionLoggerConfig)
    pub filter: ActionLoggerConfig,
}

impl Default for ActionLogConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            filter: ActionLoggerConfig::default(),
        }
    }
}

impl ActionLogConfig {
    /// Create with custom capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            ..Default::default()
        }
    }

    /// Create with custom capacity and filter
    pub fn new(capacity: usize, filter: ActionLoggerConfig) -> Self {
        Self { capacity, filter }
    }

    /// Read capacity and patterns from the `MINIDUX_LOG_*` variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|var| std::env::var(var).ok())
    }

    /// Like [`ActionLogConfig::from_env`], with a custom variable lookup
    pub fn from_vars<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let capacity = match lookup(ENV_CAPACITY) {
            Some(value) => value
                .trim()
                .parse()
                .map_err(|source| ConfigError::InvalidNumber {
                    var: ENV_CAPACITY,
                    value,
                    source,
                })?,
            None => DEFAULT_CAPACITY,
        };

        let config = Self::new(capacity, ActionLoggerConfig::from_vars(lookup));
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations the ring buffer cannot honour
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        Ok(())
    }
}

/// An action log shared between a middleware and the application
pub type SharedActionLog = Rc<RefCell<ActionLog>>;

/// In-memory ring buffer for storing recent actions
///
/// Older entries are automatically discarded when capacity is reached.
#[derive(Debug, Clone)]
pub struct ActionLog {
    entries: VecDeque<ActionLogEntry>,
    config: ActionLogConfig,
    next_sequence: u64,
}

impl Default for ActionLog {
    fn default() -> Self {
        Self::new(ActionLogConfig::default())
    }
}

impl ActionLog {
    /// Create a new action log with configuration
    pub fn new(config: ActionLogConfig) -> Self {
        Self {
            entries: VecDeque::with_capacity(config.capacity),
            config,
            next_sequence: 0,
        }
    }

    /// Create a log ready to hand to [`ActionLoggerMiddleware::with_log`]
    pub fn shared(config: ActionLogConfig) -> SharedActionLog {
        Rc::new(RefCell::new(Self::new(config)))
    }

    /// Log an action (if it passes the filter)
    ///
    /// Returns the entry if it was logged, None if filtered out.
    pub fn log<A: Action>(&mut self, action: &A) -> Option<&ActionLogEntry> {
        let name = action.name();

        if !self.config.filter.should_log(name) {
            return None;
        }

        let entry = ActionLogEntry::new(name, action.summary(), self.next_sequence);
        self.next_sequence += 1;

        // Maintain capacity
        while self.entries.len() >= self.config.capacity.max(1) {
            self.entries.pop_front();
        }

        self.entries.push_back(entry);
        self.entries.back()
    }

    /// Get all entries (oldest first)
    pub fn entries(&self) -> impl Iterator<Item = &ActionLogEntry> {
        self.entries.iter()
    }

    /// Get the most recent N entries (newest first)
    pub fn recent(&self, count: usize) -> impl Iterator<Item = &ActionLogEntry> {
        self.entries.iter().rev().take(count)
    }

    /// Number of entries currently stored
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the log is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Clear all entries
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Get configuration
    pub fn config(&self) -> &ActionLogConfig {
        &self.config
    }
}

// ============================================================================
// Middleware
// ============================================================================

/// Middleware that logs actions with configurable pattern filtering.
///
/// Supports two modes:
/// - **Tracing only** (default): logs via `tracing::debug!()`
/// - **With storage**: also stores in a shared [`ActionLog`]
///
/// The action is always forwarded; logging happens before `next` is called,
/// so actions later dropped by an inner middleware are still recorded.
#[derive(Debug, Clone)]
pub struct ActionLoggerMiddleware {
    config: ActionLoggerConfig,
    log: Option<SharedActionLog>,
    /// When false, the middleware only forwards.
    active: bool,
}

impl ActionLoggerMiddleware {
    /// Create a new action logger middleware with tracing only (no in-memory storage)
    pub fn new(config: ActionLoggerConfig) -> Self {
        Self {
            config,
            log: None,
            active: true,
        }
    }

    /// Create middleware writing into a shared log, filtered by the log's config
    pub fn with_log(log: SharedActionLog) -> Self {
        let config = log.borrow().config().filter.clone();
        Self {
            config,
            log: Some(log),
            active: true,
        }
    }

    /// Create with default config (excludes Tick and Render), tracing only
    pub fn default_filtering() -> Self {
        Self::new(ActionLoggerConfig::default())
    }

    /// Create with no filtering (logs all actions), tracing only
    pub fn log_all() -> Self {
        Self::new(ActionLoggerConfig::with_patterns(vec![], vec![]))
    }

    /// Set whether the middleware is active.
    ///
    /// Useful for conditional logging based on CLI flags:
    ///
    /// ```ignore
    /// let middleware = ActionLoggerMiddleware::default_filtering()
    ///     .active(args.debug);
    /// ```
    pub fn active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    /// Check if the middleware is active.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Get the shared action log (if storage is enabled)
    pub fn log(&self) -> Option<&SharedActionLog> {
        self.log.as_ref()
    }

    /// Get a reference to the config
    pub fn config(&self) -> &ActionLoggerConfig {
        &self.config
    }
}

impl<A: Action> Middleware<A> for ActionLoggerMiddleware {
    fn handle(&self, action: A, next: &Dispatch<A>) {
        if self.active {
            let name = action.name();
            if self.config.should_log(name) {
                tracing::debug!(action = %name, "action");
            }
            if let Some(log) = &self.log {
                log.borrow_mut().log(&action);
            }
        }
        next(action);
    }
}

/// Simple glob pattern matching supporting `*` and `?`.
///
/// - `*` matches zero or more characters
/// - `?` matches exactly one character
pub fn glob_match(pattern: &str, text: &str) -> bool {
    let pattern: Vec<char> = pattern.chars().collect();
    let text: Vec<char> = text.chars().collect();
    glob_match_impl(&pattern, &text)
}

fn glob_match_impl(pattern: &[char], text: &[char]) -> bool {
    let mut pi = 0;
    let mut ti = 0;
    let mut star_pi = None;
    let mut star_ti = 0;

    while ti < text.len() {
        if pi < pattern.len() && (pattern[pi] == '?' || pattern[pi] == text[ti]) {
            pi += 1;
            ti += 1;
        } else if pi < pattern.len() && pattern[pi] == '*' {
            star_pi = Some(pi);
            star_ti = ti;
            pi += 1;
        } else if let Some(spi) = star_pi {
            pi = spi + 1;
            star_ti += 1;
            ti = star_ti;
        } else {
            return false;
        }
    }

    while pi < pattern.len() && pattern[pi] == '*' {
        pi += 1;
    }

    pi == pattern.len()
}
