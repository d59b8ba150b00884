//! A value that is exactly one of two alternatives.

use crate::monad::Monad;

/// A left/right-biased container.
///
/// `Right` carries the value composition operates on; `Left` is carried
/// through `flat_map`/`map` untouched, which makes `Either` usable as a
/// short-circuiting error channel with a caller-chosen error type.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub enum Either<L, R> {
    Left(L),
    Right(R),
}

impl<L, R> Either<L, R> {
    /// Lifts a value into the biased (`Right`) variant.
    ///
    /// # Example
    /// ```rust
    /// use effects::Either;
    ///
    /// let squared: Either<String, i32> = Either::of(5).flat_map(|v| Either::Right(v * v));
    /// assert_eq!(squared, Either::Right(25));
    /// ```
    pub fn of(value: R) -> Self {
        Either::Right(value)
    }

    pub fn is_right(&self) -> bool {
        matches!(self, Either::Right(_))
    }

    pub fn is_left(&self) -> bool {
        !self.is_right()
    }

    /// Consumes the either, yielding the left value if present.
    pub fn left(self) -> Option<L> {
        match self {
            Either::Left(value) => Some(value),
            Either::Right(_) => None,
        }
    }

    /// Consumes the either, yielding the right value if present.
    pub fn right(self) -> Option<R> {
        match self {
            Either::Right(value) => Some(value),
            Either::Left(_) => None,
        }
    }

    /// Applies `func` to a `Right` value; a `Left` passes through unchanged.
    pub fn flat_map<B, F>(self, func: F) -> Either<L, B>
    where
        F: FnOnce(R) -> Either<L, B>,
    {
        match self {
            Either::Right(value) => func(value),
            Either::Left(value) => Either::Left(value),
        }
    }

    /// Transforms a `Right` value, keeping a `Left` unchanged.
    pub fn map<B, F>(self, func: F) -> Either<L, B>
    where
        F: FnOnce(R) -> B,
    {
        self.flat_map(|value| Either::Right(func(value)))
    }

    /// # Panics
    /// If the either is a `Left`.
    pub fn get(self) -> R {
        match self {
            Either::Right(value) => value,
            Either::Left(_) => panic!("get called on Left Either"),
        }
    }

    pub fn get_or_else(self, default: R) -> R {
        match self {
            Either::Right(value) => value,
            Either::Left(_) => default,
        }
    }

    pub fn or_else_supply<F>(self, func: F) -> R
    where
        F: FnOnce() -> R,
    {
        match self {
            Either::Right(value) => value,
            Either::Left(_) => func(),
        }
    }

    pub fn or_else(self, other: Either<L, R>) -> Either<L, R> {
        match self {
            Either::Right(value) => Either::Right(value),
            Either::Left(_) => other,
        }
    }
}

impl<L, R> Monad for Either<L, R> {
    type Inner = R;
    type WithType<B> = Either<L, B>;

    fn pure(value: R) -> Self {
        Either::Right(value)
    }

    fn flat_map<B, F>(self, func: F) -> Either<L, B>
    where
        F: FnOnce(R) -> Either<L, B>,
    {
        Either::flat_map(self, func)
    }
}
