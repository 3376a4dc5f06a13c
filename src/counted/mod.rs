mod lines;

use std::borrow::Cow;
use std::io::BufRead;
use std::iter::FusedIterator;

use serde::Serialize;

pub use lines::Lines;

/// A sized element of a counted source.
///
/// Sizes are element counts: bytes for strings and byte buffers, items for
/// other slices.
pub trait Chunk {
    /// Size of the chunk, or `None` when the item carries a source failure
    /// instead of a chunk. Such items pass through without being counted.
    fn chunk_size(&self) -> Option<usize>;
}

impl Chunk for str {
    fn chunk_size(&self) -> Option<usize> {
        Some(self.len())
    }
}

impl<T> Chunk for [T] {
    fn chunk_size(&self) -> Option<usize> {
        Some(self.len())
    }
}

impl<T, const N: usize> Chunk for [T; N] {
    fn chunk_size(&self) -> Option<usize> {
        Some(N)
    }
}

impl Chunk for String {
    fn chunk_size(&self) -> Option<usize> {
        Some(self.len())
    }
}

impl<T> Chunk for Vec<T> {
    fn chunk_size(&self) -> Option<usize> {
        Some(self.len())
    }
}

impl Chunk for Cow<'_, str> {
    fn chunk_size(&self) -> Option<usize> {
        Some(self.len())
    }
}

impl<C: Chunk + ?Sized> Chunk for &C {
    fn chunk_size(&self) -> Option<usize> {
        (**self).chunk_size()
    }
}

impl<C: Chunk + ?Sized> Chunk for Box<C> {
    fn chunk_size(&self) -> Option<usize> {
        (**self).chunk_size()
    }
}

impl<C: Chunk, E> Chunk for std::result::Result<C, E> {
    fn chunk_size(&self) -> Option<usize> {
        self.as_ref().ok().and_then(Chunk::chunk_size)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountState {
    /// The source may still yield chunks
    Active,
    /// The source signalled its end, it will not be pulled again
    Exhausted,
}

/// Snapshot of a [`Counted`] wrapper's tallies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Counters {
    pub bytes_read: u64,
    pub read_count: u64,
}

/// Decorates a chunk source with running totals of what went through it.
///
/// Only pulls made through the wrapper are counted. The underlying source
/// stays reachable through [`Counted::get_ref`] and [`Counted::get_mut`]
/// for anything else it can do (seeking, closing, ...), and pulls made that
/// way never show up in the counters.
#[derive(Debug, Clone)]
pub struct Counted<I> {
    source: I,
    counters: Counters,
    state: CountState,
}

impl<I> Counted<I> {
    pub fn new(source: I) -> Self {
        Self {
            source,
            counters: Counters::default(),
            state: CountState::Active,
        }
    }

    /// Total size of the chunks yielded so far
    pub fn bytes_read(&self) -> u64 {
        self.counters.bytes_read
    }

    /// Number of chunks yielded so far
    pub fn read_count(&self) -> u64 {
        self.counters.read_count
    }

    pub fn counters(&self) -> Counters {
        self.counters
    }

    pub fn state(&self) -> CountState {
        self.state
    }

    pub fn is_exhausted(&self) -> bool {
        self.state == CountState::Exhausted
    }

    pub fn get_ref(&self) -> &I {
        &self.source
    }

    pub fn get_mut(&mut self) -> &mut I {
        &mut self.source
    }

    pub fn into_inner(self) -> I {
        self.source
    }
}

impl<R: BufRead> Counted<Lines<R>> {
    /// Counts the lines of `reader`, terminators included.
    ///
    /// `bytes_read` matches the bytes taken from `reader` except for lines
    /// that failed to decode, see [`Lines`].
    pub fn lines(reader: R) -> Self {
        Self::new(Lines::new(reader))
    }
}

impl<I> Iterator for Counted<I>
where
    I: Iterator,
    I::Item: Chunk,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<I::Item> {
        if self.is_exhausted() {
            return None;
        }

        match self.source.next() {
            Some(chunk) => {
                if let Some(size) = chunk.chunk_size() {
                    self.counters.read_count += 1;
                    self.counters.bytes_read += size as u64;
                }
                Some(chunk)
            }
            None => {
                self.state = CountState::Exhausted;
                log::trace!(
                    "counted source exhausted after {} chunks, {} bytes",
                    self.counters.read_count,
                    self.counters.bytes_read
                );
                None
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.is_exhausted() {
            (0, Some(0))
        } else {
            self.source.size_hint()
        }
    }
}

impl<I> FusedIterator for Counted<I>
where
    I: Iterator,
    I::Item: Chunk,
{
}

pub fn counting_wrapper<I>(source: I) -> Counted<I::IntoIter>
where
    I: IntoIterator,
    I::Item: Chunk,
{
    Counted::new(source.into_iter())
}
