//! Byte source abstractions for parsing.
//!
//! This module provides the [ByteSource] trait and the [InMemoryByteSource]
//! implementation used to parse Newick strings held in memory.

// =#========================================================================#=
// BYTE SOURCE (Trait)
// =#========================================================================#=
/// Trait defining the interface for byte sources used by the ByteParser.
///
/// Parser logic only talks to this trait, so a Newick string can be read
/// from a borrowed or an owned buffer alike.
pub trait ByteSource {
    /// Peek at the current byte without consuming it.
    ///
    /// # Returns
    /// * `Some(u8)` - The current byte if available
    /// * `None` - If at end of data (EOF)
    fn peek(&self) -> Option<u8>;

    /// Get the current byte and advance the position (consume it).
    ///
    /// # Returns
    /// * `Some(u8)` - The current byte if available
    /// * `None` - If at end of data (EOF)
    fn next_byte(&mut self) -> Option<u8>;

    /// Returns the current position in the byte stream.
    fn position(&self) -> usize;

    /// Returns a slice of bytes from a start position to the current position.
    ///
    /// # Arguments
    /// * `start` - The starting byte offset
    ///
    /// # Returns
    /// A byte slice from `start` to the current position, or `None` if not available
    fn slice_from(&self, start: usize) -> Option<&[u8]>;

    /// Returns a slice of up to `k` bytes from the current position without allocating.
    ///
    /// # Arguments
    /// * `k` - Maximum number of bytes to retrieve
    fn peek_slice(&self, k: usize) -> &[u8];

    /// Check if at end of data.
    fn is_eof(&self) -> bool;
}

// =#========================================================================#=
// IN MEMORY BYTE SOURCE
// =#========================================================================#=
/// An in-memory byte source over a borrowed buffer.
///
/// Newick strings handled by this crate are single trees passed as `&str`,
/// so borrowing avoids copying the input.
pub struct InMemoryByteSource<'a> {
    /// The byte data being parsed
    input: &'a [u8],
    /// Current position in the byte slice
    pos: usize,
}

impl<'a> InMemoryByteSource<'a> {
    /// Creates a new in-memory byte source from a byte slice.
    ///
    /// # Arguments
    /// * `bytes` - The bytes to parse
    pub fn new(bytes: &'a [u8]) -> Self {
        Self {
            input: bytes,
            pos: 0,
        }
    }
}

impl ByteSource for InMemoryByteSource<'_> {
    #[inline(always)]
    fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    #[inline(always)]
    fn next_byte(&mut self) -> Option<u8> {
        let byte = self.peek()?;
        self.pos += 1;
        Some(byte)
    }

    #[inline]
    fn position(&self) -> usize {
        self.pos
    }

    fn slice_from(&self, start: usize) -> Option<&[u8]> {
        if start <= self.pos && self.pos <= self.input.len() {
            Some(&self.input[start..self.pos])
        } else {
            None
        }
    }

    #[inline(always)]
    fn peek_slice(&self, k: usize) -> &[u8] {
        let start = self.pos.min(self.input.len());
        let end = (self.pos + k).min(self.input.len());
        &self.input[start..end]
    }

    fn is_eof(&self) -> bool {
        self.pos >= self.input.len()
    }
}
