//! A computation outcome: a value or the error that prevented it.

use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

use thiserror::Error;

use crate::monad::Monad;

/// Shared, type-erased error value.
///
/// The `Arc` makes a captured error cheaply shareable: a failed
/// [`Future`](crate::Future) hands the same underlying error to every
/// subscriber. Any concrete error can be inspected again through
/// `downcast_ref`.
pub type DynError = Arc<dyn std::error::Error + Send + Sync + 'static>;

/// Error carrying the payload of a caught panic.
#[derive(Clone, Debug, Error)]
#[error("{message}")]
pub struct Panicked {
    message: String,
}

impl Panicked {
    pub fn message(&self) -> &str {
        &self.message
    }

    fn from_payload(payload: Box<dyn Any + Send>) -> DynError {
        let message = match payload.downcast::<String>() {
            Ok(text) => *text,
            Err(payload) => match payload.downcast::<&'static str>() {
                Ok(text) => (*text).to_string(),
                Err(_) => "computation panicked".to_string(),
            },
        };
        Arc::new(Panicked { message })
    }
}

/// The outcome of a computation: `Success` with its value, or `Failure`
/// with the error that was raised.
#[derive(Clone, Debug)]
pub enum Try<T> {
    Success(T),
    Failure(DynError),
}

impl<T> Try<T> {
    /// Runs `func`, capturing a panic as a `Failure`.
    ///
    /// A normal return becomes `Success`; an unwind is caught and becomes
    /// `Failure` carrying a [`Panicked`] with the panic message.
    ///
    /// # Example
    /// ```rust
    /// use effects::Try;
    ///
    /// assert_eq!(Try::of(|| 5 * 5).get(), 25);
    /// assert!(Try::<i32>::of(|| panic!("failed")).is_failure());
    /// ```
    pub fn of<F>(func: F) -> Try<T>
    where
        F: FnOnce() -> T,
    {
        match catch_unwind(AssertUnwindSafe(func)) {
            Ok(value) => Try::Success(value),
            Err(payload) => Try::Failure(Panicked::from_payload(payload)),
        }
    }

    pub fn success(value: T) -> Try<T> {
        Try::Success(value)
    }

    pub fn failure<E>(error: E) -> Try<T>
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Try::Failure(Arc::new(error))
    }

    /// Applies `func` to a `Success` value; a `Failure` passes through
    /// unchanged.
    pub fn flat_map<B, F>(self, func: F) -> Try<B>
    where
        F: FnOnce(T) -> Try<B>,
    {
        match self {
            Try::Success(value) => func(value),
            Try::Failure(error) => Try::Failure(error),
        }
    }

    /// Transforms a `Success` value, re-entering through [`Try::of`]: a
    /// panic inside `func` becomes a `Failure` rather than unwinding the
    /// caller.
    pub fn map<B, F>(self, func: F) -> Try<B>
    where
        F: FnOnce(T) -> B,
    {
        self.flat_map(|value| Try::of(|| func(value)))
    }

    /// Recovers from a `Failure` whose error is of concrete type `E` by
    /// re-running through [`Try::of`]. Any other failure, and any success,
    /// is returned unchanged.
    ///
    /// # Example
    /// ```rust
    /// use effects::{Panicked, Try};
    ///
    /// let failed = Try::<i32>::of(|| panic!("failed"));
    /// assert_eq!(failed.recover::<Panicked, _>(|| 3).get(), 3);
    /// ```
    pub fn recover<E, F>(self, func: F) -> Try<T>
    where
        E: std::error::Error + 'static,
        F: FnOnce() -> T,
    {
        match self {
            Try::Failure(error) if error.downcast_ref::<E>().is_some() => Try::of(func),
            other => other,
        }
    }

    /// The captured error, if this is a `Failure`.
    pub fn error(&self) -> Option<DynError> {
        match self {
            Try::Failure(error) => Some(error.clone()),
            Try::Success(_) => None,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Try::Success(_))
    }

    pub fn is_failure(&self) -> bool {
        !self.is_success()
    }

    /// # Panics
    /// If the try is a `Failure`.
    pub fn get(self) -> T {
        match self {
            Try::Success(value) => value,
            Try::Failure(_) => panic!("get called on Failure Try"),
        }
    }

    pub fn get_or_else(self, default: T) -> T {
        match self {
            Try::Success(value) => value,
            Try::Failure(_) => default,
        }
    }

    pub fn or_else_supply<F>(self, func: F) -> T
    where
        F: FnOnce() -> T,
    {
        match self {
            Try::Success(value) => value,
            Try::Failure(_) => func(),
        }
    }

    pub fn or_else(self, other: Try<T>) -> Try<T> {
        match self {
            Try::Success(value) => Try::Success(value),
            Try::Failure(_) => other,
        }
    }
}

impl<T> Monad for Try<T> {
    type Inner = T;
    type WithType<B> = Try<B>;

    fn pure(value: T) -> Self {
        Try::Success(value)
    }

    fn flat_map<B, F>(self, func: F) -> Try<B>
    where
        F: FnOnce(T) -> Try<B>,
    {
        Try::flat_map(self, func)
    }
}
