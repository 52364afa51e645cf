use crate::charset::Charset;
use crate::endian::{Endian, Primitive};
use crate::error::CodecError;
use crate::types::HexBytes;
use std::fmt;

// ─── ByteCursor ─────────────────────────────────────────────────────────────

/// Sequential reader over a byte slice.
///
/// Reads start at position 0 and advance by the width they consume. A read
/// that needs more bytes than remain fails with `BufferUnderrun` and leaves
/// the position where it was.
#[derive(Debug, Clone, Copy)]
pub struct ByteCursor<'a> {
    data: &'a [u8],
    position: usize,
    order: Endian,
}

macro_rules! typed_reads {
    ($($name:ident => $ty:ty),* $(,)?) => {
        $(
            #[inline]
            pub fn $name(&mut self) -> Result<$ty, CodecError> {
                self.read::<$ty>()
            }
        )*
    };
}

impl<'a> ByteCursor<'a> {
    #[inline]
    pub fn new(data: &'a [u8]) -> Self {
        Self::with_order(data, Endian::Big)
    }

    #[inline]
    pub fn with_order(data: &'a [u8], order: Endian) -> Self {
        Self {
            data,
            position: 0,
            order,
        }
    }

    #[inline]
    pub fn order(&self) -> Endian {
        self.order
    }

    #[inline]
    pub fn set_order(&mut self, order: Endian) {
        self.order = order;
    }

    // ════════════════════════════════════════════════════════════════════════
    // Position
    // ════════════════════════════════════════════════════════════════════════

    #[inline]
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn set_position(&mut self, position: usize) -> Result<(), CodecError> {
        if position > self.data.len() {
            return Err(CodecError::PositionOutOfRange {
                position,
                len: self.data.len(),
            });
        }
        self.position = position;
        Ok(())
    }

    #[inline]
    pub fn skip(&mut self, count: usize) -> Result<(), CodecError> {
        self.take(count).map(|_| ())
    }

    #[inline]
    pub fn remaining(&self) -> usize {
        self.data.len() - self.position
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// True when every unread byte is `0xFF` (also true when nothing is left).
    pub fn is_rest_all_ff(&self) -> bool {
        self.data[self.position..].iter().all(|&b| b == 0xFF)
    }

    // ════════════════════════════════════════════════════════════════════════
    // Reads
    // ════════════════════════════════════════════════════════════════════════

    #[inline]
    fn peek_span(&self, width: usize) -> Result<&'a [u8], CodecError> {
        let remaining = self.remaining();
        if width > remaining {
            return Err(CodecError::BufferUnderrun {
                needed: width,
                remaining,
            });
        }
        Ok(&self.data[self.position..self.position + width])
    }

    #[inline]
    fn take(&mut self, width: usize) -> Result<&'a [u8], CodecError> {
        let span = self.peek_span(width)?;
        self.position += width;
        Ok(span)
    }

    #[inline]
    pub fn read<T: Primitive>(&mut self) -> Result<T, CodecError> {
        self.read_with(self.order)
    }

    #[inline]
    pub fn read_with<T: Primitive>(&mut self, order: Endian) -> Result<T, CodecError> {
        self.take(T::WIDTH).map(|bytes| T::decode(bytes, order))
    }

    /// Decode the next value without consuming it.
    #[inline]
    pub fn peek<T: Primitive>(&self) -> Result<T, CodecError> {
        self.peek_span(T::WIDTH).map(|bytes| T::decode(bytes, self.order))
    }

    typed_reads!(
        u8 => u8,
        i8 => i8,
        u16 => u16,
        i16 => i16,
        u32 => u32,
        i32 => i32,
        u64 => u64,
        i64 => i64,
        f32 => f32,
        f64 => f64,
    );

    #[inline]
    pub fn bytes(&mut self, count: usize) -> Result<&'a [u8], CodecError> {
        self.take(count)
    }

    /// Decode exactly `length` bytes with the named charset.
    pub fn get_string(&mut self, length: usize, encoding: &str) -> Result<String, CodecError> {
        let charset = Charset::for_label(encoding)?;
        let bytes = self.take(length)?;
        Ok(charset.decode(bytes).into_owned())
    }

    /// Consume and return everything that is left.
    #[inline]
    pub fn rest(&mut self) -> &'a [u8] {
        let rest = &self.data[self.position..];
        self.position = self.data.len();
        rest
    }
}

impl fmt::Display for ByteCursor<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&HexBytes(self.data), f)
    }
}
