//! Policy hook for blocking actions before they reach the reducer
//!
//! A [`Guard`] inspects each action and returns a [`Verdict`]. The
//! [`GuardMiddleware`] forwards allowed actions and drops denied ones, calling
//! an injected interrupt hook so the application can tell the user. The store
//! itself never learns that an action was dropped.

use std::fmt;

use crate::action::Action;
use crate::middleware::{Dispatch, Middleware};

/// Outcome of a guard check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// Let the action continue down the chain
    Allow,
    /// Drop the action
    Deny {
        /// Message handed to the interrupt hook
        reason: String,
    },
}

impl Verdict {
    /// Deny with a reason
    pub fn deny(reason: impl Into<String>) -> Self {
        Verdict::Deny {
            reason: reason.into(),
        }
    }

    pub fn is_allowed(&self) -> bool {
        matches!(self, Verdict::Allow)
    }
}

/// Decides whether an action may proceed
///
/// Implemented for any `Fn(&A) -> Verdict`.
pub trait Guard<A> {
    fn check(&self, action: &A) -> Verdict;
}

impl<A, F> Guard<A> for F
where
    F: Fn(&A) -> Verdict,
{
    fn check(&self, action: &A) -> Verdict {
        self(action)
    }
}

type Interrupt<A> = Box<dyn Fn(&A, &str)>;

/// Middleware that drops actions denied by a [`Guard`]
///
/// # Example
///
/// ```ignore
/// fn no_spam(action: &AppAction) -> Verdict {
///     match action {
///         AppAction::Post(text) if text.contains("spam") => Verdict::deny("spam"),
///         _ => Verdict::Allow,
///     }
/// }
///
/// let store = Store::with_enhancer(
///     reducer,
///     apply_middleware().with(|| {
///         GuardMiddleware::new(no_spam).on_deny(|_, reason| eprintln!("{reason}"))
///     }),
/// );
/// ```
pub struct GuardMiddleware<A, G> {
    guard: G,
    interrupt: Option<Interrupt<A>>,
}

impl<A: Action, G: Guard<A>> GuardMiddleware<A, G> {
    pub fn new(guard: G) -> Self {
        Self {
            guard,
            interrupt: None,
        }
    }

    /// Install the hook called with the denied action and the reason
    pub fn on_deny<F>(mut self, interrupt: F) -> Self
    where
        F: Fn(&A, &str) + 'static,
    {
        self.interrupt = Some(Box::new(interrupt));
        self
    }
}

impl<A, G> fmt::Debug for GuardMiddleware<A, G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GuardMiddleware")
            .field("has_interrupt", &self.interrupt.is_some())
            .finish_non_exhaustive()
    }
}

impl<A, G> Middleware<A> for GuardMiddleware<A, G>
where
    A: Action,
    G: Guard<A> + 'static,
{
    fn handle(&self, action: A, next: &Dispatch<A>) {
        match self.guard.check(&action) {
            Verdict::Allow => next(action),
            Verdict::Deny { reason } => {
                tracing::warn!(action = %action.name(), %reason, "Action blocked");
                if let Some(interrupt) = &self.interrupt {
                    interrupt(&action, &reason);
                }
            }
        }
    }
}
