//! A push-based, thread-backed asynchronous result container.
//!
//! A [`Future`] owns a single completion cell: a lock-guarded,
//! single-assignment slot for the terminal [`Try`] plus the list of
//! subscribers registered before the result arrived. Producers run on
//! dedicated threads and complete the cell exactly once; subscribers
//! registered before completion are each dispatched on a fresh thread when
//! the result lands, while subscribers registered after completion run
//! synchronously on their own calling thread.

use std::fmt::{self, Debug, Formatter};
use std::mem;
use std::sync::Arc;
use std::thread;

use parking_lot::{Condvar, Mutex};

use crate::r#try::{DynError, Try};

type Waiter<T> = Box<dyn FnOnce(Try<T>) + Send>;

struct CellState<T> {
    slot: Option<Try<T>>,
    waiters: Vec<Waiter<T>>,
}

/// Single-assignment slot plus subscriber queue. The lock is held for
/// bookkeeping only, never across a waiter invocation.
struct CompletionCell<T: Clone + Send + 'static> {
    state: Mutex<CellState<T>>,
    resolved: Condvar,
}

impl<T: Clone + Send + 'static> CompletionCell<T> {
    fn new() -> Arc<Self> {
        Arc::new(CompletionCell {
            state: Mutex::new(CellState {
                slot: None,
                waiters: Vec::new(),
            }),
            resolved: Condvar::new(),
        })
    }

    fn completed(result: Try<T>) -> Arc<Self> {
        Arc::new(CompletionCell {
            state: Mutex::new(CellState {
                slot: Some(result),
                waiters: Vec::new(),
            }),
            resolved: Condvar::new(),
        })
    }

    /// Stores the result and dispatches every queued waiter on its own
    /// thread, in registration order. The completion order of the waiter
    /// callbacks themselves is unspecified.
    ///
    /// # Panics
    /// If the cell was already completed. Every cell is wired to exactly one
    /// producer, so a second completion is an internal invariant violation.
    fn complete(&self, result: Try<T>) {
        let drained = {
            let mut state = self.state.lock();
            if state.slot.is_some() {
                panic!("completion cell resolved twice");
            }
            state.slot = Some(result.clone());
            self.resolved.notify_all();
            mem::take(&mut state.waiters)
        };

        for waiter in drained {
            let result = result.clone();
            thread::spawn(move || waiter(result));
        }
    }

    /// Enqueues `waiter` if the cell is still empty; otherwise invokes it
    /// immediately on the calling thread, after releasing the lock.
    fn subscribe(&self, waiter: Waiter<T>) {
        let mut state = self.state.lock();
        match state.slot.clone() {
            Some(result) => {
                drop(state);
                waiter(result);
            }
            None => state.waiters.push(waiter),
        }
    }

    fn peek(&self) -> Option<Try<T>> {
        self.state.lock().slot.clone()
    }

    /// Blocks until the slot is filled.
    fn wait(&self) -> Try<T> {
        let mut state = self.state.lock();
        loop {
            if let Some(result) = &state.slot {
                return result.clone();
            }
            self.resolved.wait(&mut state);
        }
    }
}

/// Executor that can only fail to run a task by panicking.
pub trait Executor {
    fn execute(task: impl FnOnce() + Send + 'static);
}

/// Runs every task on a fresh dedicated thread.
impl Executor for thread::Thread {
    fn execute(task: impl FnOnce() + Send + 'static) {
        thread::spawn(task);
    }
}

impl Executor for () {
    fn execute(task: impl FnOnce() + Send + 'static) {
        thread::spawn(task);
    }
}

/// An asynchronous, eventually-resolving, single-assignment container for a
/// [`Try`] result.
///
/// Cloning a `Future` clones the handle, not the computation: all clones
/// observe the same cell. `T: Clone` because the one terminal value is
/// handed to every observer as an owned copy.
pub struct Future<T: Clone + Send + 'static>(Arc<CompletionCell<T>>);

impl<T: Clone + Send + 'static> Clone for Future<T> {
    fn clone(&self) -> Self {
        Future(self.0.clone())
    }
}

impl<T: Clone + Send + Debug + 'static> Debug for Future<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.0.peek() {
            Some(result) => write!(f, "Future({:?})", result),
            None => f.write_str("Future(Pending)"),
        }
    }
}

impl<T: Clone + Send + 'static> Future<T> {
    /// Constructs an already-resolved future, synchronously on the calling
    /// thread. No thread is spawned.
    ///
    /// # Example
    /// ```rust
    /// use effects::Future;
    ///
    /// assert_eq!(Future::of(5).get(), Some(5));
    /// ```
    pub fn of(value: T) -> Future<T> {
        Future(CompletionCell::completed(Try::Success(value)))
    }

    /// Runs `func` on a fresh background thread and returns the pending
    /// future immediately.
    ///
    /// A normal return resolves the future with `Success`; a panic inside
    /// `func` is caught on the worker thread and resolves it with `Failure`
    /// carrying the panic message. A `func` that never returns leaves the
    /// future pending forever.
    ///
    /// # Example
    /// ```rust
    /// use effects::Future;
    ///
    /// let future = Future::run(|| 6 * 7);
    /// assert_eq!(future.result().get(), 42);
    /// ```
    pub fn run<F>(func: F) -> Future<T>
    where
        F: FnOnce() -> T + Send + 'static,
    {
        Self::run_via::<thread::Thread, F>(func)
    }

    /// Same as [`Future::run`], on a caller-chosen [`Executor`].
    pub fn run_via<E, F>(func: F) -> Future<T>
    where
        E: Executor,
        F: FnOnce() -> T + Send + 'static,
    {
        let cell = CompletionCell::new();
        let producer = cell.clone();
        E::execute(move || producer.complete(Try::of(func)));
        Future(cell)
    }

    /// Chains a dependent future onto this one.
    ///
    /// The returned future resolves once both this future and the future
    /// produced by `func` have resolved. A `Failure` here is forwarded
    /// directly and `func` is never invoked.
    ///
    /// # Thread of execution
    /// If this future is already resolved, `func` runs immediately on the
    /// calling thread. Otherwise it runs later, on the dispatch thread that
    /// delivers this future's result.
    ///
    /// # Panics
    /// A panic raised by `func` itself is not captured: it unwinds the
    /// thread described above, and the returned future never resolves.
    /// Panics inside the *computation* of the future `func` returns are
    /// captured as usual by [`Future::run`].
    pub fn flat_map<U, F>(&self, func: F) -> Future<U>
    where
        U: Clone + Send + 'static,
        F: FnOnce(T) -> Future<U> + Send + 'static,
    {
        let next = CompletionCell::new();
        let downstream = next.clone();
        self.0.subscribe(Box::new(move |result| match result {
            Try::Failure(error) => downstream.complete(Try::Failure(error)),
            Try::Success(value) => {
                let inner = func(value);
                inner
                    .0
                    .subscribe(Box::new(move |result| downstream.complete(result)));
            }
        }));
        Future(next)
    }

    /// Transforms the success value. Derived from [`Future::flat_map`] and
    /// [`Future::of`]; the same panic caveat as `flat_map` applies to
    /// `func`.
    pub fn map<U, F>(&self, func: F) -> Future<U>
    where
        U: Clone + Send + 'static,
        F: FnOnce(T) -> U + Send + 'static,
    {
        self.flat_map(move |value| Future::of(func(value)))
    }

    /// Calls `subscriber` with the terminal result.
    ///
    /// # Thread of execution
    /// If the future is already resolved, `subscriber` runs synchronously on
    /// the calling thread, before this method returns. Otherwise it is
    /// queued and later dispatched on a fresh thread when the future
    /// resolves.
    pub fn on_complete<F>(&self, subscriber: F)
    where
        F: FnOnce(Try<T>) + Send + 'static,
    {
        self.0.subscribe(Box::new(subscriber));
    }

    /// Calls `subscriber` with the success value, if the future succeeds.
    /// Dispatch follows [`Future::on_complete`].
    pub fn on_success<F>(&self, subscriber: F)
    where
        F: FnOnce(T) + Send + 'static,
    {
        self.on_complete(move |result| {
            if let Try::Success(value) = result {
                subscriber(value);
            }
        });
    }

    /// Calls `subscriber` with the error, if the future fails.
    /// Dispatch follows [`Future::on_complete`].
    pub fn on_failure<F>(&self, subscriber: F)
    where
        F: FnOnce(DynError) + Send + 'static,
    {
        self.on_complete(move |result| {
            if let Try::Failure(error) = result {
                subscriber(error);
            }
        });
    }

    /// The cached success value, or `None` while pending or failed.
    /// Never blocks.
    pub fn get(&self) -> Option<T> {
        match self.0.peek() {
            Some(Try::Success(value)) => Some(value),
            _ => None,
        }
    }

    /// The cached error, or `None` while pending or succeeded.
    /// Never blocks.
    pub fn error(&self) -> Option<DynError> {
        match self.0.peek() {
            Some(Try::Failure(error)) => Some(error),
            _ => None,
        }
    }

    pub fn is_done(&self) -> bool {
        self.0.state.lock().slot.is_some()
    }

    pub fn is_success(&self) -> bool {
        matches!(self.0.state.lock().slot, Some(Try::Success(_)))
    }

    pub fn is_failure(&self) -> bool {
        matches!(self.0.state.lock().slot, Some(Try::Failure(_)))
    }

    /// Blocks the calling thread until the future resolves and returns the
    /// terminal result. The one deliberately blocking accessor; everything
    /// else on this type returns immediately.
    pub fn result(&self) -> Try<T> {
        self.0.wait()
    }

    /// Folds a sequence of futures into a future of the sequence of their
    /// success values, preserving input order regardless of completion
    /// order.
    ///
    /// The first `Failure` encountered (in input order) becomes the result
    /// and later elements are not incorporated; their computations, if
    /// already running, still run to completion on their own threads.
    ///
    /// # Example
    /// ```rust
    /// use effects::Future;
    ///
    /// let combined = Future::traverse(vec![Future::of(3), Future::of(9)]);
    /// assert_eq!(combined.get(), Some(vec![3, 9]));
    /// ```
    pub fn traverse<I>(futures: I) -> Future<Vec<T>>
    where
        I: IntoIterator<Item = Future<T>>,
    {
        futures
            .into_iter()
            .fold(Future::of(Vec::new()), |acc, future| {
                acc.flat_map(move |mut values| {
                    future.map(move |value| {
                        values.push(value);
                        values
                    })
                })
            })
    }
}
