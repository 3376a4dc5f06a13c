use std::fmt;
use std::iter::{Fuse, FusedIterator};

/// Iterator returned by [`join_sequences`].
///
/// Flattens the outer sequence while replaying the cached separator between
/// every pair of adjacent sub-sequences. Sub-sequences are turned into
/// iterators only once the outer sequence reaches them.
pub struct Join<O, T>
where
    O: Iterator,
    O::Item: IntoIterator<Item = T>,
{
    outer: Fuse<O>,
    separator: Vec<T>,
    current: Option<<O::Item as IntoIterator>::IntoIter>,
    // Position in `separator` while it is being replayed
    replay: Option<usize>,
    started: bool,
}

impl<O, T> Join<O, T>
where
    O: Iterator,
    O::Item: IntoIterator<Item = T>,
{
    pub fn new<S>(separator: S, outer: O) -> Self
    where
        S: IntoIterator<Item = T>,
    {
        Self {
            outer: outer.fuse(),
            separator: separator.into_iter().collect(),
            current: None,
            replay: None,
            started: false,
        }
    }

    pub fn separator(&self) -> &[T] {
        &self.separator
    }
}

impl<O, T> Clone for Join<O, T>
where
    O: Iterator + Clone,
    O::Item: IntoIterator<Item = T>,
    <O::Item as IntoIterator>::IntoIter: Clone,
    T: Clone,
{
    fn clone(&self) -> Self {
        Self {
            outer: self.outer.clone(),
            separator: self.separator.clone(),
            current: self.current.clone(),
            replay: self.replay,
            started: self.started,
        }
    }
}

impl<O, T> fmt::Debug for Join<O, T>
where
    O: Iterator + fmt::Debug,
    O::Item: IntoIterator<Item = T>,
    <O::Item as IntoIterator>::IntoIter: fmt::Debug,
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Join")
            .field("outer", &self.outer)
            .field("separator", &self.separator)
            .field("current", &self.current)
            .field("replay", &self.replay)
            .finish()
    }
}

impl<O, T> Iterator for Join<O, T>
where
    O: Iterator,
    O::Item: IntoIterator<Item = T>,
    T: Clone,
{
    type Item = T;

    fn next(&mut self) -> Option<T> {
        loop {
            if let Some(pos) = self.replay {
                if let Some(item) = self.separator.get(pos) {
                    self.replay = Some(pos + 1);
                    return Some(item.clone());
                }
                self.replay = None;
            }

            if let Some(current) = self.current.as_mut() {
                match current.next() {
                    Some(item) => return Some(item),
                    None => self.current = None,
                }
            }

            let next = self.outer.next()?;
            if self.started {
                self.replay = Some(0);
            } else {
                self.started = true;
            }
            self.current = Some(next.into_iter());
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let replaying = self
            .replay
            .map_or(0, |pos| self.separator.len().saturating_sub(pos));
        let (current_lower, current_upper) = self
            .current
            .as_ref()
            .map_or((0, Some(0)), |current| current.size_hint());

        // every sub-sequence still to come is preceded by a separator,
        // except the very first one
        let (outer_lower, outer_upper) = self.outer.size_hint();
        let separators = if self.started {
            outer_lower
        } else {
            outer_lower.saturating_sub(1)
        };
        let lower = replaying
            .saturating_add(current_lower)
            .saturating_add(separators.saturating_mul(self.separator.len()));

        // nothing is known about sub-sequences not reached yet
        let upper = match (outer_upper, current_upper) {
            (Some(0), Some(current_upper)) => {
                replaying.checked_add(current_upper)
            }
            _ => None,
        };
        (lower, upper)
    }
}

impl<O, T> FusedIterator for Join<O, T>
where
    O: Iterator,
    O::Item: IntoIterator<Item = T>,
    T: Clone,
{
}

/// Concatenates `sequences`, putting the elements of `separator` between
/// each adjacent pair, the way `str::join` does for strings.
///
/// The separator is collected once up front. No separator is emitted for
/// zero or one sub-sequence; empty sub-sequences still get separators on
/// both sides.
pub fn join_sequences<S, O, T>(
    separator: S,
    sequences: O,
) -> Join<O::IntoIter, T>
where
    S: IntoIterator<Item = T>,
    O: IntoIterator,
    O::Item: IntoIterator<Item = T>,
    T: Clone,
{
    Join::new(separator, sequences.into_iter())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::cell::Cell;

    #[test]
    fn joins_characters() {
        let joined: Vec<char> =
            join_sequences("".chars(), ["one", "two"].map(str::chars))
                .collect();
        assert_eq!(joined, vec!['o', 'n', 'e', 't', 'w', 'o']);
    }

    #[rstest]
    #[case(vec![10], vec![], vec![])]
    #[case(vec![10], vec![vec![1, 2, 3]], vec![1, 2, 3])]
    #[case(vec![10], vec![vec![1, 2, 3], vec![4, 5, 6]], vec![1, 2, 3, 10, 4, 5, 6])]
    #[case(vec![], vec![vec![1], vec![2]], vec![1, 2])]
    #[case(vec![0, 0], vec![vec![], vec![], vec![]], vec![0, 0, 0, 0])]
    #[case(vec![7], vec![vec![1], vec![], vec![2]], vec![1, 7, 7, 2])]
    fn joins_as_expected(
        #[case] separator: Vec<i32>,
        #[case] sequences: Vec<Vec<i32>>,
        #[case] expected: Vec<i32>,
    ) {
        let joined: Vec<i32> = join_sequences(separator, sequences).collect();
        assert_eq!(joined, expected);
    }

    #[test]
    fn separator_read_once() {
        let reads = Cell::new(0);
        let separator =
            [10].into_iter().inspect(|_| reads.set(reads.get() + 1));
        let joined: Vec<i32> =
            join_sequences(separator, vec![vec![1], vec![2], vec![3]])
                .collect();
        assert_eq!(joined, vec![1, 10, 2, 10, 3]);
        assert_eq!(reads.get(), 1);
    }

    #[test]
    fn sub_sequences_are_not_read_ahead() {
        let opened = Cell::new(0);
        let outer = (0..3).map(|i| {
            opened.set(opened.get() + 1);
            vec![i; 2]
        });
        let mut joined = join_sequences(vec![-1], outer);
        assert_eq!(opened.get(), 0);
        assert_eq!(joined.next(), Some(0));
        assert_eq!(joined.next(), Some(0));
        assert_eq!(opened.get(), 1);
        assert_eq!(joined.next(), Some(-1));
        assert_eq!(opened.get(), 2);
    }

    #[test]
    fn stays_empty_after_end() {
        let mut joined = join_sequences(vec![0], Vec::<Vec<i32>>::new());
        assert_eq!(joined.next(), None);
        assert_eq!(joined.next(), None);
    }

    #[test]
    fn size_hint_bounds_remaining_output() {
        let mut joined =
            join_sequences(vec![0], vec![vec![1, 2], vec![3], vec![4]]);
        assert_eq!(joined.size_hint(), (2, None));
        assert_eq!(joined.next(), Some(1));
        assert_eq!(joined.size_hint(), (3, None));

        let mut last = join_sequences(vec![0, 0], vec![vec![1, 2]]);
        assert_eq!(last.next(), Some(1));
        assert_eq!(last.size_hint(), (1, Some(1)));
        assert_eq!(last.next(), Some(2));
        assert_eq!(last.next(), None);
        assert_eq!(last.size_hint(), (0, Some(0)));
    }

    #[test]
    fn clone_resumes_from_same_position() {
        let mut joined = join_sequences([0], vec![vec![1, 2], vec![3]]);
        assert_eq!(joined.next(), Some(1));
        let rest: Vec<i32> = joined.clone().collect();
        assert_eq!(rest, vec![2, 0, 3]);
        assert_eq!(joined.collect::<Vec<_>>(), rest);
    }

    #[test]
    fn debug_shows_separator() {
        let joined = join_sequences([9], vec![vec![1]]);
        let debug = format!("{:?}", joined);
        assert!(debug.starts_with("Join"));
        assert!(debug.contains("separator: [9]"));
    }

    #[test]
    fn joins_infinite_outer_lazily() {
        let joined: Vec<u32> =
            join_sequences([0], (1..).map(|i| [i, i])).take(5).collect();
        assert_eq!(joined, vec![1, 1, 0, 2, 2]);
    }
}
