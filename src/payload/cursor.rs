//! # PayloadCursor - Bounded Field Reader
//!
//! Sequential reader over one manufacturer payload. Every field read in the
//! crate goes through [`PayloadCursor::take`], which is the single chokepoint
//! preventing out-of-bounds reads: a request for more bytes than remain
//! returns `None` and leaves the position untouched.
//!
//! ## Usage
//!
//! ```rust
//! use hydroclima_rs::payload::PayloadCursor;
//!
//! let payload = [0x02, 0x00, 0x64, 0x19];
//! let mut cursor = PayloadCursor::new(&payload);
//!
//! assert!(cursor.has_bytes(2));
//! let field = cursor.take(2).unwrap();
//! assert_eq!(field, &[0x02, 0x00]);
//! assert_eq!(cursor.position(), 2);
//! assert!(cursor.take(4).is_none());
//! ```

/// Bounded sequential reader over a payload byte slice
///
/// Holds a read position that only advances through successful [`take`]
/// calls. The cursor never reads past the end of the underlying slice.
///
/// [`take`]: PayloadCursor::take
#[derive(Debug, Clone)]
pub struct PayloadCursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> PayloadCursor<'a> {
    /// Create a cursor positioned at the start of `data`
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// True iff at least `n` bytes remain from the current position
    pub fn has_bytes(&self, n: usize) -> bool {
        self.remaining() >= n
    }

    /// Return the next `n` bytes and advance the position by `n`
    ///
    /// Returns `None` without advancing when fewer than `n` bytes remain,
    /// so a bare `take` is already bounds-safe.
    pub fn take(&mut self, n: usize) -> Option<&'a [u8]> {
        if !self.has_bytes(n) {
            return None;
        }
        let start = self.pos;
        self.pos += n;
        Some(&self.data[start..self.pos])
    }

    /// Current read position, in bytes from the start of the payload
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Number of unread bytes
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_take_advances_position() {
        let data = [1u8, 2, 3, 4, 5, 6];
        let mut cursor = PayloadCursor::new(&data);

        assert_eq!(cursor.take(2), Some(&data[0..2]));
        assert_eq!(cursor.position(), 2);
        assert_eq!(cursor.take(4), Some(&data[2..6]));
        assert_eq!(cursor.position(), 6);
        assert_eq!(cursor.remaining(), 0);
    }

    #[test]
    fn test_take_past_end_is_refused() {
        let data = [1u8, 2, 3];
        let mut cursor = PayloadCursor::new(&data);

        cursor.take(2).unwrap();
        assert!(cursor.has_bytes(1));
        assert!(!cursor.has_bytes(2));

        // Refused reads must not advance the position.
        assert_eq!(cursor.take(2), None);
        assert_eq!(cursor.position(), 2);
        assert_eq!(cursor.take(1), Some(&data[2..3]));
    }

    #[test]
    fn test_empty_payload() {
        let mut cursor = PayloadCursor::new(&[]);
        assert!(cursor.has_bytes(0));
        assert!(!cursor.has_bytes(1));
        assert_eq!(cursor.take(1), None);
        assert_eq!(cursor.take(0), Some(&[][..]));
    }
}
