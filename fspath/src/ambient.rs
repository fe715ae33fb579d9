//! Scoped, layered defaults that follow the logical call chain.
//!
//! A [`LayeredState`] resolves a value (such as the default [`Comparer`]) by
//! walking a stack of layers pushed by callers further up the stack. Each
//! layer may carry a condition so that it only applies to some arguments,
//! e.g. paths under one directory.
//!
//! Layers live in an [`AmbientContext`]: an immutable snapshot installed per
//! thread. Synchronous code pushes layers with
//! [`LayeredState::begin_with`] and pops them when the returned guard drops.
//! Asynchronous code wraps futures with [`LayeredState::scope`] or
//! [`AmbientContext::attach`]; the wrapper installs its context on every
//! poll and uninstalls it afterwards, so the layers follow the future across
//! `.await` points and worker threads while sibling tasks never see them.
//!
//! A task spawned without [`AmbientContext::attach`] starts from whatever
//! context the executing thread has installed, which outside of a wrapped
//! poll is the empty context.
//!
//! [`Comparer`]: crate::Comparer
//!
//! # Examples
//!
//! ```
//! use fspath::ambient::LayeredState;
//!
//! let state: LayeredState<u32, str> = LayeredState::new(1);
//! assert_eq!(state.resolve_for("/a"), 1);
//! {
//!     let _guard = state.begin_with(2);
//!     assert_eq!(state.resolve_for("/a"), 2);
//! }
//! assert_eq!(state.resolve_for("/a"), 1);
//! ```

use std::any::Any;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::marker::PhantomData;
use std::pin::Pin;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};
use std::task::{Context, Poll};

use pin_project_lite::pin_project;

type Slot = Arc<dyn Any + Send + Sync>;

thread_local! {
    static CURRENT: RefCell<AmbientContext> = RefCell::new(AmbientContext::default());
}

static NEXT_STATE_ID: AtomicU64 = AtomicU64::new(0);

/// An immutable snapshot of every [`LayeredState`]'s layer stack.
///
/// Cloning is cheap; pushing a layer produces a new snapshot and leaves the
/// old one untouched, so concurrent call chains never share a mutable stack.
#[derive(Clone, Default)]
pub struct AmbientContext {
    slots: Arc<HashMap<u64, Slot>>,
}

impl fmt::Debug for AmbientContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AmbientContext")
            .field("states", &self.slots.len())
            .finish()
    }
}

impl AmbientContext {
    /// The context installed on the current thread.
    #[must_use]
    pub fn current() -> Self {
        CURRENT.with(|current| current.borrow().clone())
    }

    /// Whether no state has a layer in this context.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Install this context on the current thread until the guard drops.
    ///
    /// Use this to carry a captured context into a thread you spawn.
    /// Guards must be dropped in reverse order of creation.
    ///
    /// # Examples
    ///
    /// ```
    /// use fspath::ambient::{AmbientContext, LayeredState};
    ///
    /// let state: LayeredState<&str, str> = LayeredState::new("fallback");
    /// let _layer = state.begin_with("outer");
    /// let captured = AmbientContext::current();
    ///
    /// std::thread::spawn(move || {
    ///     assert_eq!(state.resolve_for(""), "fallback");
    ///     let _entered = captured.enter();
    ///     assert_eq!(state.resolve_for(""), "outer");
    /// })
    /// .join()
    /// .unwrap();
    /// ```
    #[must_use = "the context is uninstalled as soon as the guard drops"]
    pub fn enter(self) -> ContextGuard {
        let previous = CURRENT.with(|current| current.replace(self));
        ContextGuard {
            previous: Some(previous),
            _not_send: PhantomData,
        }
    }

    /// Run `future` with this context installed on every poll.
    pub fn attach<F: Future>(self, future: F) -> WithContext<F> {
        WithContext {
            context: self,
            inner: future,
        }
    }

    fn slot(&self, id: u64) -> Option<Slot> {
        self.slots.get(&id).cloned()
    }

    fn with_slot(&self, id: u64, slot: Slot) -> Self {
        let mut slots = HashMap::clone(&self.slots);
        slots.insert(id, slot);
        Self {
            slots: Arc::new(slots),
        }
    }
}

/// Restores the previously installed [`AmbientContext`] on drop.
#[derive(Debug)]
pub struct ContextGuard {
    previous: Option<AmbientContext>,
    _not_send: PhantomData<Rc<()>>,
}

impl Drop for ContextGuard {
    fn drop(&mut self) {
        if let Some(previous) = self.previous.take() {
            // The thread-local is gone during thread teardown; nothing to restore.
            let _ = CURRENT.try_with(|current| *current.borrow_mut() = previous);
        }
    }
}

pin_project! {
    /// A future that runs with an [`AmbientContext`] installed.
    ///
    /// Layers pushed inside the future persist across its `.await` points
    /// and are saved back into the wrapper between polls.
    #[derive(Debug)]
    #[must_use = "futures do nothing unless polled"]
    pub struct WithContext<F> {
        context: AmbientContext,
        #[pin]
        inner: F,
    }
}

impl<F: Future> Future for WithContext<F> {
    type Output = F::Output;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.project();
        let guard = this.context.clone().enter();
        let result = this.inner.poll(cx);
        *this.context = AmbientContext::current();
        drop(guard);
        result
    }
}

type Condition<C> = Arc<dyn Fn(&C) -> bool + Send + Sync>;

struct Layer<V, C: ?Sized> {
    parent: Option<Arc<Layer<V, C>>>,
    value: V,
    condition: Option<Condition<C>>,
}

impl<V, C: ?Sized> Layer<V, C> {
    fn accepts(&self, arg: &C) -> bool {
        self.condition.as_ref().map_or(true, |condition| condition(arg))
    }
}

/// A stack of conditional overrides over a process-wide fallback value.
///
/// `V` is the resolved value; `C` is the argument conditions are evaluated
/// against (for the built-in states, the path being compared or read).
pub struct LayeredState<V, C: ?Sized> {
    id: u64,
    fallback: RwLock<V>,
    _condition: PhantomData<fn(&C)>,
}

impl<V: fmt::Debug, C: ?Sized> fmt::Debug for LayeredState<V, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LayeredState")
            .field("id", &self.id)
            .field("fallback", &*self.fallback.read().unwrap_or_else(PoisonError::into_inner))
            .finish_non_exhaustive()
    }
}

impl<V, C> LayeredState<V, C>
where
    V: Clone + Send + Sync + 'static,
    C: ?Sized + 'static,
{
    /// Create a state with the given fallback and no layers.
    #[must_use]
    pub fn new(fallback: V) -> Self {
        Self {
            id: NEXT_STATE_ID.fetch_add(1, Ordering::Relaxed),
            fallback: RwLock::new(fallback),
            _condition: PhantomData,
        }
    }

    /// The value used when no layer applies.
    #[must_use]
    pub fn fallback(&self) -> V {
        self.fallback
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Replace the process-wide fallback value.
    pub fn set_fallback(&self, value: V) {
        *self.fallback.write().unwrap_or_else(PoisonError::into_inner) = value;
    }

    /// Resolve the value for `arg` in the current thread's context.
    ///
    /// Layers are checked innermost first; the first one whose condition
    /// accepts `arg` wins. Without a match, the fallback is returned.
    #[must_use]
    pub fn resolve_for(&self, arg: &C) -> V {
        self.resolve_in(&AmbientContext::current(), arg)
    }

    /// Resolve the value for `arg` in an explicit context.
    #[must_use]
    pub fn resolve_in(&self, context: &AmbientContext, arg: &C) -> V {
        let top = self.top(context);
        let mut layer = top.as_deref();
        while let Some(current) = layer {
            if current.accepts(arg) {
                return current.value.clone();
            }
            layer = current.parent.as_deref();
        }
        self.fallback()
    }

    /// Number of layers visible in the current thread's context.
    #[must_use]
    pub fn depth(&self) -> usize {
        let top = self.top(&AmbientContext::current());
        std::iter::successors(top.as_deref(), |layer| layer.parent.as_deref()).count()
    }

    /// Push an unconditional layer until the guard drops.
    #[must_use = "the layer is popped as soon as the guard drops"]
    pub fn begin_with(&self, value: V) -> LayerGuard {
        self.push(value, None)
    }

    /// Push a layer that only applies where `condition` accepts the argument.
    ///
    /// # Examples
    ///
    /// ```
    /// use fspath::ambient::LayeredState;
    ///
    /// let state: LayeredState<bool, str> = LayeredState::new(false);
    /// let _guard = state.begin_with_condition(true, |path: &str| path.starts_with("/tmp"));
    /// assert!(state.resolve_for("/tmp/x"));
    /// assert!(!state.resolve_for("/home/x"));
    /// ```
    #[must_use = "the layer is popped as soon as the guard drops"]
    pub fn begin_with_condition<P>(&self, value: V, condition: P) -> LayerGuard
    where
        P: Fn(&C) -> bool + Send + Sync + 'static,
    {
        self.push(value, Some(Arc::new(condition)))
    }

    /// Run `future` with an unconditional layer installed.
    ///
    /// The layer is added on top of the context current at the time of the
    /// call, so the future also sees the caller's layers.
    pub fn scope<F: Future>(&self, value: V, future: F) -> WithContext<F> {
        self.layered(value, None).attach(future)
    }

    /// Run `future` with a conditional layer installed.
    pub fn scope_with_condition<F, P>(&self, value: V, condition: P, future: F) -> WithContext<F>
    where
        F: Future,
        P: Fn(&C) -> bool + Send + Sync + 'static,
    {
        self.layered(value, Some(Arc::new(condition))).attach(future)
    }

    fn push(&self, value: V, condition: Option<Condition<C>>) -> LayerGuard {
        LayerGuard {
            _context: self.layered(value, condition).enter(),
        }
    }

    fn layered(&self, value: V, condition: Option<Condition<C>>) -> AmbientContext {
        let context = AmbientContext::current();
        let layer = Layer {
            parent: self.top(&context),
            value,
            condition,
        };
        context.with_slot(self.id, Arc::new(layer))
    }

    fn top(&self, context: &AmbientContext) -> Option<Arc<Layer<V, C>>> {
        context
            .slot(self.id)
            .and_then(|slot| slot.downcast::<Layer<V, C>>().ok())
    }
}

/// Pops a layer pushed by [`LayeredState::begin_with`] when dropped.
///
/// Guards restore the context that was current when they were created, so
/// nested guards must be dropped innermost first (which scoping does).
#[derive(Debug)]
pub struct LayerGuard {
    _context: ContextGuard,
}
