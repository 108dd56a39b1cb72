//! Observable state container with reducer-driven transitions

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use crate::action::{Action, InitAction};
use crate::middleware::Dispatch;

/// A pure state transition
///
/// Receives the previous state (`None` on the very first call) and the
/// action, and returns the next state. Reducers must be total and free of
/// side effects; the store calls them exactly once per base dispatch.
///
/// Implemented for any `Fn(Option<&S>, &A) -> S`, so plain functions work:
///
/// ```
/// use minidux_core::Reducer;
///
/// fn counter(state: Option<&i32>, delta: &i32) -> i32 {
///     state.copied().unwrap_or_default() + delta
/// }
///
/// assert_eq!(counter.reduce(Some(&1), &2), 3);
/// ```
pub trait Reducer<S, A> {
    /// Compute the next state
    fn reduce(&self, state: Option<&S>, action: &A) -> S;
}

impl<S, A, F> Reducer<S, A> for F
where
    F: Fn(Option<&S>, &A) -> S,
{
    fn reduce(&self, state: Option<&S>, action: &A) -> S {
        self(state, action)
    }
}

/// A type-erased reducer, as handed to enhancers
pub type BoxReducer<S, A> = Box<dyn Reducer<S, A>>;

/// The base store constructor handed to an [`Enhancer`]
pub type StoreCreator<S, A> = fn(BoxReducer<S, A>) -> Store<S, A>;

/// Wraps store creation to add capabilities without changing the store's shape
///
/// An enhancer receives the base constructor and the reducer and is fully
/// responsible for building the store. [`crate::ApplyMiddleware`] is the
/// enhancer shipped with this crate; closures of the right shape work too.
pub trait Enhancer<S, A: Action> {
    /// Build the store
    fn enhance(self, create: StoreCreator<S, A>, reducer: BoxReducer<S, A>) -> Store<S, A>;
}

impl<S, A, F> Enhancer<S, A> for F
where
    A: Action,
    F: FnOnce(StoreCreator<S, A>, BoxReducer<S, A>) -> Store<S, A>,
{
    fn enhance(self, create: StoreCreator<S, A>, reducer: BoxReducer<S, A>) -> Store<S, A> {
        self(create, reducer)
    }
}

type Listener = Rc<dyn Fn()>;

/// Registered listeners, in registration order
///
/// Each registration gets its own id so the same closure registered twice
/// can be removed one registration at a time.
#[derive(Default)]
struct Listeners {
    entries: RefCell<Vec<(u64, Listener)>>,
    next_id: Cell<u64>,
}

impl Listeners {
    fn add(&self, listener: Listener) -> u64 {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.entries.borrow_mut().push((id, listener));
        id
    }

    fn remove(&self, id: u64) -> bool {
        let mut entries = self.entries.borrow_mut();
        let before = entries.len();
        entries.retain(|(entry_id, _)| *entry_id != id);
        entries.len() != before
    }

    fn contains(&self, id: u64) -> bool {
        self.entries.borrow().iter().any(|(entry_id, _)| *entry_id == id)
    }

    fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    fn snapshot(&self) -> Vec<Listener> {
        self.entries
            .borrow()
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect()
    }
}

struct Shared<S, A> {
    state: RefCell<Rc<S>>,
    listeners: Rc<Listeners>,
    reducer: BoxReducer<S, A>,
}

impl<S, A: Action> Shared<S, A> {
    /// The base dispatch: reduce, commit, then notify.
    ///
    /// No borrow is held while the reducer or a listener runs, so both may
    /// dispatch again. Notification uses the listener list as it was when
    /// the round started.
    fn reduce_and_notify(&self, action: A) {
        let previous = Rc::clone(&*self.state.borrow());
        let next = self.reducer.reduce(Some(&previous), &action);
        *self.state.borrow_mut() = Rc::new(next);

        let listeners = self.listeners.snapshot();
        tracing::trace!(
            action = %action.name(),
            listeners = listeners.len(),
            "dispatch"
        );
        for listener in listeners {
            listener();
        }
    }
}

/// Centralized state container
///
/// The store holds the current state, runs every dispatched action through
/// its dispatch function (the reducer, possibly wrapped by middleware) and
/// notifies subscribers synchronously after each transition.
///
/// `Store` is a cheap handle: clones share the same state and listeners, so
/// the application can create one store and hand clones to its renderer and
/// event handlers. It is single-threaded (`!Send`).
///
/// # Re-entrancy
///
/// A listener or middleware may call [`Store::dispatch`] while another
/// dispatch is still running. The nested dispatch runs to completion first;
/// the outer dispatch's remaining listeners then observe the newer state.
/// The store neither guards against nor queues nested dispatches. A reducer
/// that dispatches loses the nested update, because the outer reducer's
/// result is committed afterwards.
///
/// # Example
/// ```
/// use minidux_core::{Action, InitAction, Store};
///
/// #[derive(Clone, Debug)]
/// enum CounterAction {
///     Init,
///     Increment,
/// }
///
/// impl Action for CounterAction {
///     fn name(&self) -> &'static str {
///         match self {
///             CounterAction::Init => "Init",
///             CounterAction::Increment => "Increment",
///         }
///     }
/// }
///
/// impl InitAction for CounterAction {
///     fn init() -> Self {
///         CounterAction::Init
///     }
/// }
///
/// fn reducer(state: Option<&i32>, action: &CounterAction) -> i32 {
///     let count = state.copied().unwrap_or(0);
///     match action {
///         CounterAction::Init => count,
///         CounterAction::Increment => count + 1,
///     }
/// }
///
/// let store = Store::new(reducer);
/// store.dispatch(CounterAction::Increment);
/// assert_eq!(*store.get_state(), 1);
/// ```
pub struct Store<S, A> {
    shared: Rc<Shared<S, A>>,
    dispatch: Dispatch<A>,
}

/// Build a base store from a boxed reducer
///
/// The initial state is computed eagerly by calling the reducer with no
/// previous state and [`InitAction::init`]. No listener can observe that
/// call. This is the [`StoreCreator`] passed to enhancers.
pub fn create_store<S: 'static, A: InitAction>(reducer: BoxReducer<S, A>) -> Store<S, A> {
    let initial = reducer.reduce(None, &A::init());
    let shared = Rc::new(Shared {
        state: RefCell::new(Rc::new(initial)),
        listeners: Rc::new(Listeners::default()),
        reducer,
    });

    let base = Rc::clone(&shared);
    let dispatch: Dispatch<A> = Rc::new(move |action: A| base.reduce_and_notify(action));

    Store { shared, dispatch }
}

impl<S: 'static, A: InitAction> Store<S, A> {
    /// Create a base store from a reducer
    pub fn new<R>(reducer: R) -> Self
    where
        R: Reducer<S, A> + 'static,
    {
        create_store(Box::new(reducer))
    }

    /// Create a store through an enhancer
    ///
    /// Creation is delegated entirely to `enhancer`, which receives
    /// [`create_store`] and the reducer.
    pub fn with_enhancer<R, E>(reducer: R, enhancer: E) -> Self
    where
        R: Reducer<S, A> + 'static,
        E: Enhancer<S, A>,
    {
        enhancer.enhance(create_store, Box::new(reducer))
    }
}

impl<S, A: Action> Store<S, A> {
    /// Get the current state
    pub fn get_state(&self) -> Rc<S> {
        Rc::clone(&*self.shared.state.borrow())
    }

    /// Dispatch an action
    ///
    /// Returns once the action has passed through the whole chain and every
    /// listener has run. Panics from the reducer or a listener propagate to
    /// the caller; state committed before the panic is kept.
    pub fn dispatch(&self, action: A) {
        (self.dispatch)(action)
    }

    /// Register a listener called after every state transition
    ///
    /// Listeners run in registration order and take no arguments; read the
    /// state through [`Store::get_state`]. To keep a store handle inside a
    /// listener without creating a reference cycle, capture a
    /// [`WeakStore`] from [`Store::downgrade`].
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn() + 'static,
    {
        let id = self.shared.listeners.add(Rc::new(listener));
        Subscription {
            listeners: Rc::downgrade(&self.shared.listeners),
            id,
        }
    }

    /// Number of registered listeners
    pub fn listener_count(&self) -> usize {
        self.shared.listeners.len()
    }

    /// A handle to this store's dispatch function
    ///
    /// For a store built with middleware this is the composed chain.
    pub fn dispatcher(&self) -> Dispatch<A> {
        Rc::clone(&self.dispatch)
    }

    /// Replace the dispatch function, keeping state and listeners
    ///
    /// Used by enhancers to install a wrapped dispatch. Other clones of the
    /// original store keep the dispatch they were created with.
    pub fn replace_dispatch(self, dispatch: Dispatch<A>) -> Self {
        Self {
            shared: self.shared,
            dispatch,
        }
    }

    /// A non-owning handle to this store
    pub fn downgrade(&self) -> WeakStore<S, A> {
        WeakStore {
            shared: Rc::downgrade(&self.shared),
            dispatch: Rc::downgrade(&self.dispatch),
        }
    }
}

impl<S, A> Clone for Store<S, A> {
    fn clone(&self) -> Self {
        Self {
            shared: Rc::clone(&self.shared),
            dispatch: Rc::clone(&self.dispatch),
        }
    }
}

impl<S, A> fmt::Debug for Store<S, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("listeners", &self.shared.listeners.len())
            .finish_non_exhaustive()
    }
}

/// A non-owning store handle, see [`Store::downgrade`]
pub struct WeakStore<S, A> {
    shared: Weak<Shared<S, A>>,
    dispatch: Weak<dyn Fn(A)>,
}

impl<S, A> WeakStore<S, A> {
    /// Get the store back, if any strong handle is still alive
    pub fn upgrade(&self) -> Option<Store<S, A>> {
        Some(Store {
            shared: self.shared.upgrade()?,
            dispatch: self.dispatch.upgrade()?,
        })
    }
}

impl<S, A> Clone for WeakStore<S, A> {
    fn clone(&self) -> Self {
        Self {
            shared: Weak::clone(&self.shared),
            dispatch: Weak::clone(&self.dispatch),
        }
    }
}

impl<S, A> fmt::Debug for WeakStore<S, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeakStore")
            .field("alive", &(self.shared.strong_count() > 0))
            .finish()
    }
}

/// Handle returned by [`Store::subscribe`]
///
/// Dropping the handle does not unsubscribe; call
/// [`Subscription::unsubscribe`] explicitly.
pub struct Subscription {
    listeners: Weak<Listeners>,
    id: u64,
}

impl Subscription {
    /// Remove this registration
    ///
    /// Only the registration that produced this handle is removed, even if
    /// the same listener was registered more than once. Calling it again is a
    /// no-op. Returns `true` if a registration was removed.
    pub fn unsubscribe(&self) -> bool {
        match self.listeners.upgrade() {
            Some(listeners) => listeners.remove(self.id),
            None => false,
        }
    }

    /// Whether this registration is still active
    pub fn is_active(&self) -> bool {
        self.listeners
            .upgrade()
            .is_some_and(|listeners| listeners.contains(self.id))
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    struct TestState {
        counter: i32,
        history: Vec<i32>,
    }

    #[derive(Clone, Debug)]
    enum TestAction {
        Init,
        Increment,
        Decrement,
        Add(i32),
    }

    impl Action for TestAction {
        fn name(&self) -> &'static str {
            match self {
                TestAction::Init => "Init",
                TestAction::Increment => "Increment",
                TestAction::Decrement => "Decrement",
                TestAction::Add(_) => "Add",
            }
        }
    }

    impl InitAction for TestAction {
        fn init() -> Self {
            TestAction::Init
        }
    }

    fn test_reducer(state: Option<&TestState>, action: &TestAction) -> TestState {
        let mut next = state.cloned().unwrap_or(TestState {
            counter: 0,
            history: Vec::new(),
        });
        match action {
            TestAction::Init => return next,
            TestAction::Increment => next.counter += 1,
            TestAction::Decrement => next.counter -= 1,
            TestAction::Add(n) => next.counter += n,
        }
        next.history.push(next.counter);
        next
    }

    fn counting_listener(store: &Store<TestState, TestAction>) -> (Rc<Cell<usize>>, Subscription) {
        let calls = Rc::new(Cell::new(0));
        let seen = Rc::clone(&calls);
        let subscription = store.subscribe(move || seen.set(seen.get() + 1));
        (calls, subscription)
    }

    #[test]
    fn test_initial_state_is_eager() {
        let store = Store::new(test_reducer);

        assert_eq!(store.get_state().counter, 0);
        assert!(store.get_state().history.is_empty());
    }

    #[test]
    fn test_init_is_not_observed_by_listeners() {
        let inits = Rc::new(Cell::new(0));
        let seen = Rc::clone(&inits);
        let reducer = move |state: Option<&i32>, action: &TestAction| {
            if state.is_none() {
                seen.set(seen.get() + 1);
            }
            match action {
                TestAction::Increment => state.copied().unwrap_or(0) + 1,
                _ => state.copied().unwrap_or(0),
            }
        };

        let store = Store::new(reducer);
        let calls = Rc::new(Cell::new(0));
        let counted = Rc::clone(&calls);
        store.subscribe(move || counted.set(counted.get() + 1));

        assert_eq!(inits.get(), 1);
        assert_eq!(calls.get(), 0);

        store.dispatch(TestAction::Increment);
        assert_eq!(inits.get(), 1);
        assert_eq!(calls.get(), 1);
        assert_eq!(*store.get_state(), 1);
    }

    #[test]
    fn test_store_dispatch() {
        let store = Store::new(test_reducer);

        store.dispatch(TestAction::Increment);
        assert_eq!(store.get_state().counter, 1);

        store.dispatch(TestAction::Increment);
        assert_eq!(store.get_state().counter, 2);

        store.dispatch(TestAction::Decrement);
        assert_eq!(store.get_state().counter, 1);
        assert_eq!(store.get_state().history, vec![1, 2, 1]);
    }

    #[test]
    fn test_state_is_replaced_not_mutated() {
        let store = Store::new(test_reducer);
        let before = store.get_state();

        store.dispatch(TestAction::Add(5));
        let after = store.get_state();

        assert_eq!(before.counter, 0);
        assert_eq!(after.counter, 5);
        assert!(!Rc::ptr_eq(&before, &after));
    }

    #[test]
    fn test_listeners_run_in_registration_order() {
        let store = Store::new(test_reducer);
        let order = Rc::new(RefCell::new(Vec::new()));

        for label in ["first", "second", "third"] {
            let order = Rc::clone(&order);
            store.subscribe(move || order.borrow_mut().push(label));
        }

        store.dispatch(TestAction::Increment);
        assert_eq!(*order.borrow(), vec!["first", "second", "third"]);
    }

    #[test]
    fn test_listener_reads_committed_state() {
        let store = Store::new(test_reducer);
        let observed = Rc::new(RefCell::new(Vec::new()));

        let handle = store.downgrade();
        let sink = Rc::clone(&observed);
        store.subscribe(move || {
            if let Some(store) = handle.upgrade() {
                sink.borrow_mut().push(store.get_state().counter);
            }
        });

        store.dispatch(TestAction::Add(3));
        store.dispatch(TestAction::Add(4));
        assert_eq!(*observed.borrow(), vec![3, 7]);
    }

    #[test]
    fn test_unsubscribe_stops_notifications() {
        let store = Store::new(test_reducer);
        let (calls, subscription) = counting_listener(&store);

        store.dispatch(TestAction::Increment);
        assert_eq!(calls.get(), 1);

        assert!(subscription.unsubscribe());
        assert!(!subscription.is_active());

        store.dispatch(TestAction::Increment);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_unsubscribe_is_idempotent() {
        let store = Store::new(test_reducer);
        let (_calls, subscription) = counting_listener(&store);
        let (_other, _keep) = counting_listener(&store);

        assert!(subscription.unsubscribe());
        assert!(!subscription.unsubscribe());
        assert_eq!(store.listener_count(), 1);
    }

    #[test]
    fn test_unsubscribe_removes_only_its_registration() {
        let store = Store::new(test_reducer);
        let calls = Rc::new(Cell::new(0));
        let listener = {
            let calls = Rc::clone(&calls);
            Rc::new(move || calls.set(calls.get() + 1))
        };

        let first = {
            let listener = Rc::clone(&listener);
            store.subscribe(move || listener())
        };
        let second = {
            let listener = Rc::clone(&listener);
            store.subscribe(move || listener())
        };

        store.dispatch(TestAction::Increment);
        assert_eq!(calls.get(), 2);

        first.unsubscribe();
        store.dispatch(TestAction::Increment);
        assert_eq!(calls.get(), 3);
        assert!(second.is_active());
    }

    #[test]
    fn test_unsubscribe_mid_round_uses_snapshot() {
        let store = Store::new(test_reducer);
        let order = Rc::new(RefCell::new(Vec::new()));
        let victim: Rc<RefCell<Option<Subscription>>> = Rc::new(RefCell::new(None));

        {
            let order = Rc::clone(&order);
            let victim = Rc::clone(&victim);
            store.subscribe(move || {
                order.borrow_mut().push("remover");
                if let Some(subscription) = victim.borrow().as_ref() {
                    subscription.unsubscribe();
                }
            });
        }
        let subscription = {
            let order = Rc::clone(&order);
            store.subscribe(move || order.borrow_mut().push("victim"))
        };
        *victim.borrow_mut() = Some(subscription);

        // The round that removes the listener still calls it.
        store.dispatch(TestAction::Increment);
        assert_eq!(*order.borrow(), vec!["remover", "victim"]);

        store.dispatch(TestAction::Increment);
        assert_eq!(*order.borrow(), vec!["remover", "victim", "remover"]);
    }

    #[test]
    fn test_subscribe_mid_round_waits_for_next_round() {
        let store = Store::new(test_reducer);
        let late_calls = Rc::new(Cell::new(0));
        let added = Rc::new(Cell::new(false));

        {
            let handle = store.downgrade();
            let late_calls = Rc::clone(&late_calls);
            let added = Rc::clone(&added);
            store.subscribe(move || {
                if added.replace(true) {
                    return;
                }
                if let Some(store) = handle.upgrade() {
                    let late_calls = Rc::clone(&late_calls);
                    store.subscribe(move || late_calls.set(late_calls.get() + 1));
                }
            });
        }

        store.dispatch(TestAction::Increment);
        assert_eq!(late_calls.get(), 0);
        assert_eq!(store.listener_count(), 2);

        store.dispatch(TestAction::Increment);
        assert_eq!(late_calls.get(), 1);
    }

    #[test]
    fn test_reentrant_dispatch_from_listener() {
        let store = Store::new(test_reducer);
        let handle = store.downgrade();

        store.subscribe(move || {
            if let Some(store) = handle.upgrade() {
                if store.get_state().counter == 1 {
                    store.dispatch(TestAction::Add(10));
                }
            }
        });

        store.dispatch(TestAction::Increment);
        assert_eq!(store.get_state().counter, 11);
        assert_eq!(store.get_state().history, vec![1, 11]);
    }

    #[test]
    fn test_listener_panic_keeps_committed_state() {
        let store = Store::new(test_reducer);
        let (after_calls, _subscription) = {
            store.subscribe(|| panic!("listener failed"));
            counting_listener(&store)
        };

        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            store.dispatch(TestAction::Increment);
        }));

        assert!(result.is_err());
        assert_eq!(store.get_state().counter, 1);
        assert_eq!(after_calls.get(), 0);
    }

    #[test]
    fn test_reducer_panic_leaves_state_untouched() {
        let reducer = |state: Option<&i32>, action: &TestAction| match action {
            TestAction::Decrement => panic!("reducer failed"),
            TestAction::Increment => state.copied().unwrap_or(0) + 1,
            _ => state.copied().unwrap_or(0),
        };
        let store = Store::new(reducer);
        let calls = Rc::new(Cell::new(0));
        let counted = Rc::clone(&calls);
        store.subscribe(move || counted.set(counted.get() + 1));

        store.dispatch(TestAction::Increment);
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            store.dispatch(TestAction::Decrement);
        }));

        assert!(result.is_err());
        assert_eq!(*store.get_state(), 1);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_clones_share_state() {
        let store = Store::new(test_reducer);
        let other = store.clone();

        other.dispatch(TestAction::Add(2));
        assert_eq!(store.get_state().counter, 2);
    }

    #[test]
    fn test_weak_store_does_not_keep_store_alive() {
        let store = Store::new(test_reducer);
        let weak = store.downgrade();
        assert!(weak.upgrade().is_some());

        drop(store);
        assert!(weak.upgrade().is_none());
    }

    #[test]
    fn test_subscription_outliving_store() {
        let store = Store::new(test_reducer);
        let (_calls, subscription) = counting_listener(&store);

        drop(store);
        assert!(!subscription.is_active());
        assert!(!subscription.unsubscribe());
    }

    #[test]
    fn test_enhancer_closure_delegates_creation() {
        let created = Rc::new(Cell::new(false));
        let flag = Rc::clone(&created);
        let enhancer = move |create: StoreCreator<TestState, TestAction>,
                             reducer: BoxReducer<TestState, TestAction>| {
            flag.set(true);
            create(reducer)
        };

        let store = Store::with_enhancer(test_reducer, enhancer);
        assert!(created.get());

        store.dispatch(TestAction::Increment);
        assert_eq!(store.get_state().counter, 1);
    }
}
