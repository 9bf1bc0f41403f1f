//! Character sources for the tokenizer.
//!
//! The tokenizer decodes its input one character at a time. When it reads
//! one character past the end of a token, it pushes that character back into
//! the [`CharSource`] so that the next scan starts from it.
use std::io::{self, BufRead};

/// A character stream with a single character of push back.
#[derive(Debug, Clone)]
pub(crate) struct CharSource<I> {
    chars: I,
    last: Option<char>,
    pushed_back: bool,
    offset: usize,
}

impl<I: Iterator<Item = char>> CharSource<I> {
    pub fn new(chars: I) -> Self {
        Self {
            chars,
            last: None,
            pushed_back: false,
            offset: 0,
        }
    }

    /// Decodes the next character.
    pub fn read(&mut self) -> Option<char> {
        let c = if self.pushed_back {
            self.pushed_back = false;
            self.last?
        } else {
            let next = self.chars.next();
            self.last = next;
            next?
        };

        self.offset += c.len_utf8();
        Some(c)
    }

    /// Pushes back the character returned by the last call to [`read`].
    ///
    /// Only one character can be pushed back; returns `false` when there is
    /// nothing to push back.
    ///
    /// [`read`]: CharSource::read
    #[must_use]
    pub fn unread(&mut self) -> bool {
        match self.last {
            Some(c) if !self.pushed_back => {
                self.pushed_back = true;
                self.offset -= c.len_utf8();
                true
            }
            _ => false,
        }
    }

    /// Byte offset of the next character to be read.
    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }

    #[inline]
    pub fn inner_mut(&mut self) -> &mut I {
        &mut self.chars
    }
}

/// Failure to decode characters from a byte stream.
#[derive(Debug, thiserror::Error)]
pub enum ReadError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("invalid utf-8 at byte {offset}")]
    InvalidUtf8 { offset: usize },
}

/// Decodes UTF-8 characters from a buffered reader.
///
/// The iterator ends at the first I/O or decoding failure; the failure is
/// kept and can be retrieved with [`ReadChars::take_error`].
#[derive(Debug)]
pub struct ReadChars<R> {
    reader: R,
    offset: usize,
    error: Option<ReadError>,
    failed: bool,
}

impl<R: BufRead> ReadChars<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            offset: 0,
            error: None,
            failed: false,
        }
    }

    /// Takes the failure that ended the stream, if any.
    pub fn take_error(&mut self) -> Option<ReadError> {
        self.error.take()
    }

    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        loop {
            let byte = match self.reader.fill_buf() {
                Ok(buf) => buf.first().copied(),
                Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
                Err(err) => return Err(err),
            };

            if byte.is_some() {
                self.reader.consume(1);
            }

            return Ok(byte);
        }
    }

    fn decode(&mut self) -> Result<Option<char>, ReadError> {
        let offset = self.offset;
        let invalid = ReadError::InvalidUtf8 { offset };

        let Some(first) = self.read_byte()? else {
            return Ok(None);
        };

        let width = match first {
            0x00..=0x7f => 1,
            0xc2..=0xdf => 2,
            0xe0..=0xef => 3,
            0xf0..=0xf4 => 4,
            _ => return Err(invalid),
        };

        let mut bytes = [first, 0, 0, 0];
        for byte in bytes.iter_mut().take(width).skip(1) {
            *byte = self.read_byte()?.ok_or(ReadError::InvalidUtf8 { offset })?;
        }

        let c = std::str::from_utf8(&bytes[..width])
            .ok()
            .and_then(|str| str.chars().next())
            .ok_or(invalid)?;

        self.offset += width;
        Ok(Some(c))
    }
}

impl<R: BufRead> Iterator for ReadChars<R> {
    type Item = char;

    fn next(&mut self) -> Option<char> {
        if self.failed {
            return None;
        }

        match self.decode() {
            Ok(c) => c,
            Err(err) => {
                tracing::debug!(error = %err, "stopped reading characters");
                self.failed = true;
                self.error = Some(err);
                None
            }
        }
    }
}
