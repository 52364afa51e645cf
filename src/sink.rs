use crate::charset::Charset;
use crate::endian::{Endian, Primitive};
use crate::error::CodecError;
use crate::types::HexBytes;
use std::fmt;

// ─── ByteSink ───────────────────────────────────────────────────────────────

/// Growable byte buffer builder.
///
/// Every multi-byte append picks its own byte order. `append` is big-endian,
/// `append_with` takes the order explicitly. Appends chain:
///
/// ```
/// use bytes_tree::{ByteSink, Endian};
///
/// let mut sink = ByteSink::new();
/// sink.append(1u32).append_with(1u32, Endian::Little);
/// assert_eq!(sink.as_slice(), &[0, 0, 0, 1, 1, 0, 0, 0]);
/// ```
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ByteSink {
    buf: Vec<u8>,
}

impl ByteSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
        }
    }

    // ════════════════════════════════════════════════════════════════════════
    // Append
    // ════════════════════════════════════════════════════════════════════════

    #[inline]
    pub fn append<T: Primitive>(&mut self, value: T) -> &mut Self {
        self.append_with(value, Endian::Big)
    }

    #[inline]
    pub fn append_with<T: Primitive>(&mut self, value: T, order: Endian) -> &mut Self {
        self.buf.extend_from_slice(&value.encode(order));
        self
    }

    #[inline]
    pub fn append_bytes(&mut self, raw: &[u8]) -> &mut Self {
        self.buf.extend_from_slice(raw);
        self
    }

    /// Append `text` encoded with the named charset. No length prefix is
    /// written.
    pub fn append_string(&mut self, text: &str, encoding: &str) -> Result<&mut Self, CodecError> {
        let charset = Charset::for_label(encoding)?;
        self.buf.extend_from_slice(&charset.encode(text));
        Ok(self)
    }

    /// Append `count` zero bytes.
    #[inline]
    pub fn pad(&mut self, count: usize) -> &mut Self {
        self.buf.resize(self.buf.len() + count, 0);
        self
    }

    // ════════════════════════════════════════════════════════════════════════
    // Insert / overwrite
    // ════════════════════════════════════════════════════════════════════════

    #[inline]
    pub fn insert_at<T: Primitive>(&mut self, position: usize, value: T) -> &mut Self {
        self.insert_with(position, value, Endian::Big)
    }

    #[inline]
    pub fn insert_with<T: Primitive>(&mut self, position: usize, value: T, order: Endian) -> &mut Self {
        self.insert_bytes_at(position, &value.encode(order))
    }

    /// Insert `raw` at `position`, shifting the tail right. A position past
    /// the end zero-fills the gap first.
    pub fn insert_bytes_at(&mut self, position: usize, raw: &[u8]) -> &mut Self {
        if position >= self.buf.len() {
            self.buf.resize(position, 0);
            self.buf.extend_from_slice(raw);
        } else {
            self.buf.splice(position..position, raw.iter().copied());
        }
        self
    }

    /// Overwrite `raw.len()` bytes at `position`, growing the buffer (with
    /// zeros for any gap) when the write runs past the end.
    pub fn write_at(&mut self, position: usize, raw: &[u8]) -> &mut Self {
        let end = position + raw.len();
        if end > self.buf.len() {
            self.buf.resize(end, 0);
        }
        self.buf[position..end].copy_from_slice(raw);
        self
    }

    // ════════════════════════════════════════════════════════════════════════
    // Element access
    // ════════════════════════════════════════════════════════════════════════

    #[inline]
    pub fn get(&self, index: usize) -> Option<u8> {
        self.buf.get(index).copied()
    }

    pub fn remove(&mut self, index: usize) -> Option<u8> {
        (index < self.buf.len()).then(|| self.buf.remove(index))
    }

    /// Remove up to `count` bytes starting at `position`, shifting the tail
    /// left. Bytes past the end are ignored.
    pub fn remove_range(&mut self, position: usize, count: usize) -> &mut Self {
        let end = position.saturating_add(count).min(self.buf.len());
        if position < end {
            self.buf.drain(position..end);
        }
        self
    }

    /// Grow with zeros or truncate to exactly `len` bytes.
    #[inline]
    pub fn resize(&mut self, len: usize) {
        self.buf.resize(len, 0);
    }

    #[inline]
    pub fn clear(&mut self) {
        self.buf.clear();
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    // ════════════════════════════════════════════════════════════════════════
    // Finalize
    // ════════════════════════════════════════════════════════════════════════

    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        &self.buf
    }

    /// Snapshot of the accumulated bytes. The sink keeps its contents.
    #[inline]
    pub fn to_vec(&self) -> Vec<u8> {
        self.buf.clone()
    }

    #[inline]
    pub fn into_inner(self) -> Vec<u8> {
        self.buf
    }
}

impl From<Vec<u8>> for ByteSink {
    fn from(buf: Vec<u8>) -> Self {
        Self { buf }
    }
}

impl From<&[u8]> for ByteSink {
    fn from(raw: &[u8]) -> Self {
        Self { buf: raw.to_vec() }
    }
}

impl AsRef<[u8]> for ByteSink {
    fn as_ref(&self) -> &[u8] {
        &self.buf
    }
}

impl fmt::Display for ByteSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&HexBytes(&self.buf), f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_big_endian_by_default() {
        let mut sink = ByteSink::new();
        sink.append(1u32);
        assert_eq!(sink.as_slice(), &[0, 0, 0, 1]);
    }

    #[test]
    fn test_append_little_endian() {
        let mut sink = ByteSink::new();
        sink.append_with(1u32, Endian::Little);
        assert_eq!(sink.as_slice(), &[1, 0, 0, 0]);
    }

    #[test]
    fn test_append_mixed_primitives() {
        let mut sink = ByteSink::new();
        sink.append(0xABu8)
            .append(-2i32)
            .append(1.0f32)
            .append_with(3i64, Endian::Little)
            .append(0.5f64);
        assert_eq!(sink.len(), 1 + 4 + 4 + 8 + 8);
        assert_eq!(&sink.as_slice()[..5], &[0xAB, 0xFF, 0xFF, 0xFF, 0xFE]);
        assert_eq!(&sink.as_slice()[5..9], &1.0f32.to_be_bytes());
        assert_eq!(&sink.as_slice()[9..17], &3i64.to_le_bytes());
    }

    #[test]
    fn test_append_string_has_no_prefix() {
        let mut sink = ByteSink::new();
        sink.append_string("123", "UTF-8").unwrap();
        assert_eq!(sink.as_slice(), b"123");
    }

    #[test]
    fn test_append_string_unknown_charset_leaves_sink_untouched() {
        let mut sink = ByteSink::new();
        sink.append(7u8);
        let err = sink.append_string("x", "no-such-charset").unwrap_err();
        assert!(matches!(err, CodecError::CharsetUnsupported(_)));
        assert_eq!(sink.as_slice(), &[7]);
    }

    #[test]
    fn test_insert_at_shifts_tail() {
        let mut sink = ByteSink::new();
        sink.append_bytes(&[1, 2, 3]);
        sink.insert_at(1, 0xBEEFu16);
        assert_eq!(sink.as_slice(), &[1, 0xBE, 0xEF, 2, 3]);
    }

    #[test]
    fn test_insert_at_front_prepends() {
        let mut sink = ByteSink::new();
        sink.append_bytes(b"payload");
        sink.insert_with(0, 7u16, Endian::Little);
        assert_eq!(&sink.as_slice()[..2], &[7, 0]);
        assert_eq!(&sink.as_slice()[2..], b"payload");
    }

    #[test]
    fn test_insert_past_end_zero_fills() {
        let mut sink = ByteSink::new();
        sink.append(1u8);
        sink.insert_bytes_at(3, &[9, 9]);
        assert_eq!(sink.as_slice(), &[1, 0, 0, 9, 9]);
    }

    #[test]
    fn test_write_at_overwrites_and_extends() {
        let mut sink = ByteSink::from(vec![1, 2, 3]);
        sink.write_at(1, &[7]);
        assert_eq!(sink.as_slice(), &[1, 7, 3]);
        sink.write_at(5, &[8, 8]);
        assert_eq!(sink.as_slice(), &[1, 7, 3, 0, 0, 8, 8]);
    }

    #[test]
    fn test_to_vec_is_a_snapshot() {
        let mut sink = ByteSink::new();
        sink.append(1u8);
        let first = sink.to_vec();
        let second = sink.to_vec();
        assert_eq!(first, second);
        sink.append(2u8);
        assert_eq!(first, vec![1]);
        assert_eq!(sink.to_vec(), vec![1, 2]);
    }

    #[test]
    fn test_get_remove_resize_clear() {
        let mut sink = ByteSink::from(vec![5, 6, 7]);
        assert_eq!(sink.get(1), Some(6));
        assert_eq!(sink.get(3), None);
        assert_eq!(sink.remove(0), Some(5));
        assert_eq!(sink.remove(10), None);
        assert_eq!(sink.as_slice(), &[6, 7]);
        sink.resize(4);
        assert_eq!(sink.as_slice(), &[6, 7, 0, 0]);
        sink.pad(1).resize(1);
        assert_eq!(sink.as_slice(), &[6]);
        sink.clear();
        assert!(sink.is_empty());
    }

    #[test]
    fn test_remove_range_clamps_to_end() {
        let mut sink = ByteSink::from(vec![1, 2, 3, 4, 5]);
        sink.remove_range(1, 2);
        assert_eq!(sink.as_slice(), &[1, 4, 5]);
        sink.remove_range(2, 10);
        assert_eq!(sink.as_slice(), &[1, 4]);
        sink.remove_range(5, 1);
        assert_eq!(sink.as_slice(), &[1, 4]);
    }

    #[test]
    fn test_display_hex() {
        let sink = ByteSink::from(vec![0x01, 0x0A, 0xFF]);
        assert_eq!(sink.to_string(), "01 0A FF ");
    }
}
