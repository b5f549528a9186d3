//! Forward-only view over the request body.
//!
//! # Design Decisions
//! - The buffer is borrowed, never copied or mutated
//! - The offset only moves forward; there is no rewind operation
//! - Every read checks the remaining length first

/// Cursor over an immutable byte buffer.
///
/// `offset() + remaining() == len()` holds at all times.
#[derive(Debug, Clone, Copy)]
pub struct InputCursor<'a> {
    buf: &'a [u8],
    offset: usize,
}

impl<'a> InputCursor<'a> {
    /// Create a cursor positioned at the start of `buf`.
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, offset: 0 }
    }

    /// Total length of the underlying buffer.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Bytes consumed so far.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Bytes not yet consumed.
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.offset
    }

    /// Unconsumed part of the buffer.
    pub fn rest(&self) -> &'a [u8] {
        &self.buf[self.offset..]
    }

    /// Returns true if the unconsumed bytes start with `literal`.
    pub fn starts_with(&self, literal: &[u8]) -> bool {
        self.rest().starts_with(literal)
    }

    /// Consume `literal` if it is next in the buffer.
    pub fn eat(&mut self, literal: &[u8]) -> bool {
        if self.starts_with(literal) {
            self.offset += literal.len();
            true
        } else {
            false
        }
    }

    /// Borrow the next `n` bytes without consuming them.
    pub fn peek(&self, n: usize) -> Option<&'a [u8]> {
        if n <= self.remaining() {
            Some(&self.buf[self.offset..self.offset + n])
        } else {
            None
        }
    }

    /// Consume the next `n` bytes and return them.
    pub fn take(&mut self, n: usize) -> Option<&'a [u8]> {
        let bytes = self.peek(n)?;
        self.offset += n;
        Some(bytes)
    }

    /// Skip `n` bytes. Returns false, leaving the cursor unchanged, if fewer remain.
    pub fn advance(&mut self, n: usize) -> bool {
        self.take(n).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_plus_remaining_is_len() {
        let mut cursor = InputCursor::new(b"abcdef");
        assert_eq!(cursor.offset() + cursor.remaining(), 6);

        assert!(cursor.advance(2));
        assert_eq!(cursor.offset(), 2);
        assert_eq!(cursor.remaining(), 4);

        assert_eq!(cursor.take(3), Some(&b"cde"[..]));
        assert_eq!(cursor.offset() + cursor.remaining(), cursor.len());
    }

    #[test]
    fn test_reads_past_end_are_refused() {
        let mut cursor = InputCursor::new(b"abc");
        assert!(cursor.advance(1));
        assert!(cursor.peek(3).is_none());
        assert!(!cursor.advance(3));
        assert_eq!(cursor.offset(), 1); // unchanged
        assert_eq!(cursor.take(2), Some(&b"bc"[..]));
        assert_eq!(cursor.remaining(), 0);
        assert!(cursor.rest().is_empty());
    }

    #[test]
    fn test_eat_literal() {
        let mut cursor = InputCursor::new(b"--XYZ\r\n");
        assert!(!cursor.eat(b"--ABC"));
        assert_eq!(cursor.offset(), 0);
        assert!(cursor.eat(b"--XYZ"));
        assert!(cursor.eat(b"\r\n"));
        assert_eq!(cursor.remaining(), 0);
        assert!(!cursor.eat(b"\r\n"));
    }
}
