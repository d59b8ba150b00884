//! Monadic effect types.
//!
//! Explicit containers for branching ([`Either`]), error-carrying ([`Try`])
//! and asynchronous ([`Future`]) values, composed through `flat_map`/`map`
//! under one shared [`Monad`] contract (which `std`'s `Option` implements as
//! well). `Either` and `Try` are plain algebraic types; `Future` is a
//! push-based, thread-backed result container: computations run on
//! background threads, the terminal [`Try`] is cached in a
//! single-assignment cell, and every subscriber is notified exactly once.
//!
//! ```
//! use effects::Future;
//!
//! let squared = Future::of(5).flat_map(|v| Future::of(v * v));
//! assert_eq!(squared.get(), Some(25));
//! ```

pub mod either;
pub mod future;
pub mod monad;
pub mod r#try;

pub use either::Either;
pub use future::{Executor, Future};
pub use monad::Monad;
pub use r#try::{DynError, Panicked, Try};
