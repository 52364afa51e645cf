use crate::endian::{Endian, Primitive};
use crate::error::CodecError;
use crate::sink::ByteSink;
use std::cell::RefCell;
use std::rc::Rc;

// ─── Bound Buffer View ──────────────────────────────────────────────────────

/// A tree's window onto a shared buffer: the buffer handle plus the absolute
/// start of the tree's first field.
///
/// A parent and every child bound through it hold clones of the same handle,
/// so writes on either side are visible to the other. Borrows of the inner
/// `RefCell` never outlive a single method call.
#[derive(Debug, Clone)]
pub(crate) struct BufView {
    buf: Rc<RefCell<ByteSink>>,
    start: usize,
}

impl BufView {
    pub(crate) fn new(sink: ByteSink) -> Self {
        Self {
            buf: Rc::new(RefCell::new(sink)),
            start: 0,
        }
    }

    /// A view starting `offset` bytes into this one.
    #[inline]
    pub(crate) fn at(&self, offset: usize) -> Self {
        Self {
            buf: Rc::clone(&self.buf),
            start: self.start + offset,
        }
    }

    #[inline]
    pub(crate) fn shares_buffer(&self, other: &BufView) -> bool {
        Rc::ptr_eq(&self.buf, &other.buf)
    }

    /// Bytes available from `offset` to the end of the shared buffer.
    #[inline]
    pub(crate) fn available(&self, offset: usize) -> usize {
        self.buf.borrow().len().saturating_sub(self.start + offset)
    }

    fn check(&self, offset: usize, width: usize) -> Result<usize, CodecError> {
        let remaining = self.available(offset);
        if width > remaining {
            return Err(CodecError::BufferUnderrun {
                needed: width,
                remaining,
            });
        }
        Ok(self.start + offset)
    }

    #[inline]
    pub(crate) fn read<T: Primitive>(&self, offset: usize, order: Endian) -> Result<T, CodecError> {
        let at = self.check(offset, T::WIDTH)?;
        let buf = self.buf.borrow();
        Ok(T::decode(&buf.as_slice()[at..at + T::WIDTH], order))
    }

    pub(crate) fn read_bytes(&self, offset: usize, width: usize) -> Result<Vec<u8>, CodecError> {
        let at = self.check(offset, width)?;
        let buf = self.buf.borrow();
        Ok(buf.as_slice()[at..at + width].to_vec())
    }

    /// Overwrite in place, extending the shared buffer with zeros if needed.
    #[inline]
    pub(crate) fn write(&self, offset: usize, raw: &[u8]) {
        self.buf.borrow_mut().write_at(self.start + offset, raw);
    }

    /// Grow or shrink the span `[offset, offset + old)` to `new` bytes,
    /// moving everything after it. Growth inserts zeros at the end of the
    /// old span. Nothing happens when the span ends past the buffer, since
    /// no later bytes exist to move.
    pub(crate) fn resize_span(&self, offset: usize, old: usize, new: usize) {
        let mut buf = self.buf.borrow_mut();
        let at = self.start + offset;
        if new > old {
            if at + old < buf.len() {
                buf.insert_bytes_at(at + old, &vec![0u8; new - old]);
            }
        } else {
            buf.remove_range(at + new, old - new);
        }
    }

    /// Append `width` bytes starting at `offset` to `sink`, zero-filling
    /// whatever lies past the end of the buffer.
    pub(crate) fn copy_padded(&self, offset: usize, width: usize, sink: &mut ByteSink) {
        let at = self.start + offset;
        let buf = self.buf.borrow();
        let present = buf.len().saturating_sub(at).min(width);
        if present > 0 {
            sink.append_bytes(&buf.as_slice()[at..at + present]);
        }
        sink.pad(width - present);
    }
}
