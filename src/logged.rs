//! Pass-through adapters that emit a log record for every element.
//!
//! The record for an element always goes out before the element is handed
//! to the consumer, so the log reads in lock-step with downstream work.

use std::fmt::Display;
use std::iter::FusedIterator;

use crate::LogOptions;

/// Stringifier used when none is given.
pub type DisplayFn<T> = fn(&T) -> String;

fn display<T: Display>(item: &T) -> String {
    item.to_string()
}

/// Iterator returned by [`log_passthrough`] and [`log_passthrough_with`].
#[derive(Clone)]
pub struct Logged<I, F> {
    iter: I,
    stringifier: F,
    options: LogOptions,
}

impl<I, F> Logged<I, F> {
    pub fn new(iter: I, stringifier: F, options: LogOptions) -> Self {
        Self {
            iter,
            stringifier,
            options,
        }
    }

    pub fn options(&self) -> &LogOptions {
        &self.options
    }

    pub fn into_inner(self) -> I {
        self.iter
    }
}

impl<I, F> Iterator for Logged<I, F>
where
    I: Iterator,
    F: FnMut(&I::Item) -> String,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.iter.next()?;
        self.options.emit(&(self.stringifier)(&item));
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl<I, F> FusedIterator for Logged<I, F>
where
    I: FusedIterator,
    F: FnMut(&I::Item) -> String,
{
}

/// Iterator returned by [`try_log_passthrough`].
///
/// Yields `Ok(element)` for every element the stringifier accepted. The
/// first stringifier error is yielded as `Err` and ends the iteration: no
/// record is emitted for that element and the source is not pulled again.
#[derive(Clone)]
pub struct TryLogged<I, F> {
    iter: I,
    stringifier: F,
    options: LogOptions,
    failed: bool,
}

impl<I, F> TryLogged<I, F> {
    pub fn new(iter: I, stringifier: F, options: LogOptions) -> Self {
        Self {
            iter,
            stringifier,
            options,
            failed: false,
        }
    }
}

impl<I, F, E> Iterator for TryLogged<I, F>
where
    I: Iterator,
    F: FnMut(&I::Item) -> std::result::Result<String, E>,
{
    type Item = std::result::Result<I::Item, E>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let item = self.iter.next()?;
        match (self.stringifier)(&item) {
            Ok(text) => {
                self.options.emit(&text);
                Some(Ok(item))
            }
            Err(e) => {
                self.failed = true;
                Some(Err(e))
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.failed {
            (0, Some(0))
        } else {
            // an error may cut the iteration short
            (0, self.iter.size_hint().1)
        }
    }
}

impl<I, F, E> FusedIterator for TryLogged<I, F>
where
    I: FusedIterator,
    F: FnMut(&I::Item) -> std::result::Result<String, E>,
{
}

/// Logs every element at `WARN` using its `Display` form.
pub fn log_passthrough<I>(iter: I) -> Logged<I::IntoIter, DisplayFn<I::Item>>
where
    I: IntoIterator,
    I::Item: Display,
{
    Logged::new(
        iter.into_iter(),
        display::<I::Item> as DisplayFn<I::Item>,
        LogOptions::default(),
    )
}

pub fn log_passthrough_with<I, F>(
    iter: I,
    stringifier: F,
    options: LogOptions,
) -> Logged<I::IntoIter, F>
where
    I: IntoIterator,
    F: FnMut(&I::Item) -> String,
{
    Logged::new(iter.into_iter(), stringifier, options)
}

pub fn try_log_passthrough<I, F, E>(
    iter: I,
    stringifier: F,
    options: LogOptions,
) -> TryLogged<I::IntoIter, F>
where
    I: IntoIterator,
    F: FnMut(&I::Item) -> std::result::Result<String, E>,
{
    TryLogged::new(iter.into_iter(), stringifier, options)
}
