//! # Iter Boons
//!
//! Small iterator adapters that come up again and again when wiring
//! pipelines together:
//!
//! - [`log_passthrough`] logs every element on its way through,
//! - [`join_sequences`] is `str::join` for sequences of sequences,
//! - [`bounded_take`] stops pulling after a fixed number of elements,
//! - [`counting_wrapper`] keeps running totals of the chunks it yields.
//!
//! Every adapter is lazy: nothing is pulled from a source until the
//! consumer asks for the next element. The same adapters are available as
//! methods through the [`IterBoons`] extension trait.
//!
//! ```
//! use iter_boons::IterBoons;
//!
//! let joined: Vec<i32> = vec![vec![1, 2, 3], vec![4, 5, 6]]
//!     .into_iter()
//!     .join_sequences([10])
//!     .bounded_take(5)
//!     .collect();
//! assert_eq!(joined, vec![1, 2, 3, 10, 4]);
//! ```

mod bounded;
mod counted;
mod errors;
mod join;
mod logged;
mod options;

use std::fmt::Display;

pub use bounded::{bounded_take, Bounded};
pub use counted::{
    counting_wrapper, Chunk, CountState, Counted, Counters, Lines,
};
pub use errors::{BoonsError, Result};
pub use join::{join_sequences, Join};
pub use logged::{
    log_passthrough, log_passthrough_with, try_log_passthrough, DisplayFn,
    Logged, TryLogged,
};
pub use options::{LogOptions, DEFAULT_TARGET};

/// Method-call access to the adapters of this crate.
pub trait IterBoons: Iterator + Sized {
    /// See [`log_passthrough`].
    fn log_passthrough(self) -> Logged<Self, DisplayFn<Self::Item>>
    where
        Self::Item: Display,
    {
        log_passthrough(self)
    }

    /// See [`log_passthrough_with`].
    fn log_passthrough_with<F>(
        self,
        stringifier: F,
        options: LogOptions,
    ) -> Logged<Self, F>
    where
        F: FnMut(&Self::Item) -> String,
    {
        Logged::new(self, stringifier, options)
    }

    /// See [`try_log_passthrough`].
    fn try_log_passthrough<F, E>(
        self,
        stringifier: F,
        options: LogOptions,
    ) -> TryLogged<Self, F>
    where
        F: FnMut(&Self::Item) -> std::result::Result<String, E>,
    {
        TryLogged::new(self, stringifier, options)
    }

    /// Joins the sub-sequences yielded by `self` with `separator`.
    ///
    /// See [`join_sequences`].
    fn join_sequences<S, T>(self, separator: S) -> Join<Self, T>
    where
        S: IntoIterator<Item = T>,
        Self::Item: IntoIterator<Item = T>,
        T: Clone,
    {
        Join::new(separator, self)
    }

    /// See [`bounded_take`].
    fn bounded_take(self, max_count: usize) -> Bounded<Self> {
        Bounded::new(self, max_count)
    }

    /// See [`counting_wrapper`].
    fn counted(self) -> Counted<Self>
    where
        Self::Item: Chunk,
    {
        Counted::new(self)
    }
}

impl<I: Iterator> IterBoons for I {}
