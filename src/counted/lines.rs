use std::io::{BufRead, Result};

/// Line source over a [`BufRead`] that keeps each line's terminator.
///
/// [`BufRead::lines`] strips `\n`/`\r\n`, which would make byte tallies
/// drift from what was actually read. Here the chunks concatenate back to
/// the input, as long as every line is valid UTF-8.
///
/// A line that is not valid UTF-8 is still consumed from the reader but
/// comes out as an `InvalidData` error. Counting wrappers skip error items,
/// so their tallies fall short of the reader position by that line.
#[derive(Debug)]
pub struct Lines<R> {
    reader: R,
}

impl<R> Lines<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    pub fn get_ref(&self) -> &R {
        &self.reader
    }

    pub fn get_mut(&mut self) -> &mut R {
        &mut self.reader
    }

    pub fn into_inner(self) -> R {
        self.reader
    }
}

impl<R: BufRead> Iterator for Lines<R> {
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut line = String::new();
        match self.reader.read_line(&mut line) {
            Ok(0) => None,
            Ok(_) => Some(Ok(line)),
            Err(e) => Some(Err(e)),
        }
    }
}
