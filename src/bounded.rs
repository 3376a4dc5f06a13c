use std::iter::FusedIterator;

use crate::{BoonsError, Result};

/// Iterator returned by [`bounded_take`].
///
/// Pulls the source at most `max_count` times. Once that many elements
/// went through, or the source ended early, it is never pulled again.
/// [`Bounded::remaining`] tells how many more elements may still come.
#[derive(Clone, Debug)]
pub struct Bounded<I> {
    iter: I,
    remaining: usize,
}

impl<I> Bounded<I> {
    pub fn new(iter: I, max_count: usize) -> Self {
        Self {
            iter,
            remaining: max_count,
        }
    }

    /// Same as [`Bounded::new`] for a signed bound, rejecting negative
    /// values instead of guessing what they should mean.
    pub fn try_new(iter: I, max_count: i64) -> Result<Self> {
        let max_count = usize::try_from(max_count)
            .map_err(|_| BoonsError::NegativeBound(max_count))?;
        Ok(Self::new(iter, max_count))
    }

    /// Number of elements still allowed through
    pub fn remaining(&self) -> usize {
        self.remaining
    }

    pub fn into_inner(self) -> I {
        self.iter
    }
}

impl<I: Iterator> Iterator for Bounded<I> {
    type Item = I::Item;

    fn next(&mut self) -> Option<I::Item> {
        if self.remaining == 0 {
            return None;
        }
        match self.iter.next() {
            Some(item) => {
                self.remaining -= 1;
                Some(item)
            }
            None => {
                self.remaining = 0;
                None
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.remaining == 0 {
            return (0, Some(0));
        }
        let (lower, upper) = self.iter.size_hint();
        let upper = match upper {
            Some(upper) => upper.min(self.remaining),
            None => self.remaining,
        };
        (lower.min(self.remaining), Some(upper))
    }
}

impl<I: Iterator> FusedIterator for Bounded<I> {}

/// Yields at most `max_count` elements of `iter`.
pub fn bounded_take<I: IntoIterator>(
    iter: I,
    max_count: usize,
) -> Bounded<I::IntoIter> {
    Bounded::new(iter.into_iter(), max_count)
}
