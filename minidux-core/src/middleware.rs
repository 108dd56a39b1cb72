//! Middleware pipeline wrapping the store's dispatch function
//!
//! ```text
//! dispatch(action) → m1 → m2 → … → mN → reducer → listeners
//! ```
//!
//! Each middleware receives the action and `next`, the rest of the chain.
//! It may forward the action unchanged, forward a rewritten action, or drop
//! it by not calling `next` at all. There is no return path: whatever a
//! middleware does after `next` returns is invisible to the caller.

use std::fmt;
use std::marker::PhantomData;
use std::rc::Rc;

use crate::action::Action;
use crate::store::{BoxReducer, Enhancer, Store, StoreCreator};

/// A dispatch function: the store's base dispatch or any link of the chain
pub type Dispatch<A> = Rc<dyn Fn(A)>;

/// An instantiated middleware in function form: `(next) -> (action) -> ()`
pub type Interceptor<A> = Box<dyn FnOnce(Dispatch<A>) -> Dispatch<A>>;

/// Intercepts actions before they reach the reducer
///
/// A middleware is instantiated once, when the store is created, and then
/// called once per dispatched action for the store's lifetime.
///
/// `handle` takes `&self` because dispatch is re-entrant: a listener that
/// dispatches while this middleware is still on the stack enters `handle`
/// again. Keep mutable bookkeeping in `Cell`/`RefCell` and never hold a
/// borrow across the call to `next`.
///
/// # Example
///
/// ```ignore
/// struct DropTicks;
///
/// impl Middleware<AppAction> for DropTicks {
///     fn handle(&self, action: AppAction, next: &Dispatch<AppAction>) {
///         if !matches!(action, AppAction::Tick) {
///             next(action);
///         }
///     }
/// }
/// ```
pub trait Middleware<A: Action>: 'static {
    /// Handle an action, calling `next` to continue the chain
    fn handle(&self, action: A, next: &Dispatch<A>);
}

/// Turn a middleware into its function form
pub fn interceptor<A, M>(middleware: M) -> Interceptor<A>
where
    A: Action,
    M: Middleware<A>,
{
    Box::new(move |next: Dispatch<A>| -> Dispatch<A> {
        Rc::new(move |action: A| middleware.handle(action, &next))
    })
}

/// Compose interceptors right to left
///
/// `compose(vec![i1, i2, i3])(dispatch)` is `i1(i2(i3(dispatch)))`, so `i1`
/// sees every action first. With no interceptors the result is the identity:
/// the dispatch function comes back unchanged (same `Rc`). With one
/// interceptor the result is that interceptor.
pub fn compose<A: Action>(mut interceptors: Vec<Interceptor<A>>) -> Interceptor<A> {
    if interceptors.len() == 1 {
        if let Some(only) = interceptors.pop() {
            return only;
        }
    }

    Box::new(move |dispatch: Dispatch<A>| {
        interceptors
            .into_iter()
            .rev()
            .fold(dispatch, |next, wrap| wrap(next))
    })
}

/// Middleware built from a closure, see [`from_fn`]
pub struct FnMiddleware<A, F> {
    f: F,
    _marker: PhantomData<fn(A)>,
}

/// Build a middleware from a closure
///
/// ```
/// use minidux_core::{from_fn, Dispatch};
/// # use minidux_core::Action;
/// # #[derive(Clone, Debug)]
/// # struct Ping;
/// # impl Action for Ping {
/// #     fn name(&self) -> &'static str { "Ping" }
/// # }
///
/// let passthrough = from_fn(|action: Ping, next: &Dispatch<Ping>| next(action));
/// # let _ = passthrough;
/// ```
pub fn from_fn<A, F>(f: F) -> FnMiddleware<A, F>
where
    A: Action,
    F: Fn(A, &Dispatch<A>) + 'static,
{
    FnMiddleware {
        f,
        _marker: PhantomData,
    }
}

impl<A, F> Middleware<A> for FnMiddleware<A, F>
where
    A: Action,
    F: Fn(A, &Dispatch<A>) + 'static,
{
    fn handle(&self, action: A, next: &Dispatch<A>) {
        (self.f)(action, next)
    }
}

type Factory<A> = Box<dyn FnOnce() -> Interceptor<A>>;

/// Enhancer installing a middleware chain, see [`apply_middleware`]
pub struct ApplyMiddleware<A> {
    factories: Vec<Factory<A>>,
}

/// Start building a middleware enhancer
///
/// Middlewares are given as zero-argument factories, called once each (in the
/// order they were added) when the store is created. The first one added is
/// the outermost link.
///
/// # Example
///
/// ```ignore
/// let store = Store::with_enhancer(
///     reducer,
///     apply_middleware()
///         .with(LoggingMiddleware::new)
///         .with(|| GuardMiddleware::new(checker)),
/// );
/// ```
pub fn apply_middleware<A: Action>() -> ApplyMiddleware<A> {
    ApplyMiddleware {
        factories: Vec::new(),
    }
}

impl<A: Action> ApplyMiddleware<A> {
    /// Append a middleware factory
    pub fn with<M, F>(mut self, factory: F) -> Self
    where
        M: Middleware<A>,
        F: FnOnce() -> M + 'static,
    {
        self.factories
            .push(Box::new(move || interceptor(factory())));
        self
    }

    /// Append a factory producing a raw interceptor
    pub fn with_interceptor<F>(mut self, factory: F) -> Self
    where
        F: FnOnce() -> Interceptor<A> + 'static,
    {
        self.factories.push(Box::new(factory));
        self
    }

    /// Append every factory of `other`, keeping its order
    pub fn chain(mut self, other: ApplyMiddleware<A>) -> Self {
        self.factories.extend(other.factories);
        self
    }

    /// Number of middlewares in the chain
    pub fn len(&self) -> usize {
        self.factories.len()
    }

    /// Whether the chain is empty
    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}

impl<A: Action> Default for ApplyMiddleware<A> {
    fn default() -> Self {
        apply_middleware()
    }
}

impl<A> fmt::Debug for ApplyMiddleware<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApplyMiddleware")
            .field("middlewares_count", &self.factories.len())
            .finish()
    }
}

impl<S, A: Action> Enhancer<S, A> for ApplyMiddleware<A> {
    fn enhance(self, create: StoreCreator<S, A>, reducer: BoxReducer<S, A>) -> Store<S, A> {
        let store = create(reducer);
        let chain: Vec<Interceptor<A>> = self.factories.into_iter().map(|f| f()).collect();
        tracing::debug!(middlewares = chain.len(), "Installing middleware chain");
        let dispatch = compose(chain)(store.dispatcher());
        store.replace_dispatch(dispatch)
    }
}

/// A middleware that forwards every action untouched
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopMiddleware;

impl<A: Action> Middleware<A> for NoopMiddleware {
    fn handle(&self, action: A, next: &Dispatch<A>) {
        next(action)
    }
}

/// Middleware that logs actions (for debugging)
#[derive(Debug, Clone, Default)]
pub struct LoggingMiddleware {
    /// Whether to log before forwarding
    pub log_before: bool,
    /// Whether to log once the rest of the chain has returned
    pub log_after: bool,
}

impl LoggingMiddleware {
    /// Create a new logging middleware with default settings (log after only)
    pub fn new() -> Self {
        Self {
            log_before: false,
            log_after: true,
        }
    }

    /// Create a logging middleware that logs both before and after
    pub fn verbose() -> Self {
        Self {
            log_before: true,
            log_after: true,
        }
    }
}

impl<A: Action> Middleware<A> for LoggingMiddleware {
    fn handle(&self, action: A, next: &Dispatch<A>) {
        let name = action.name();
        if self.log_before {
            tracing::debug!(action = %name, "Dispatching action");
        }
        next(action);
        if self.log_after {
            tracing::debug!(action = %name, "Action processed");
        }
    }
}
