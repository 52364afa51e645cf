use super::Tree;
use super::view::BufView;
use crate::cursor::ByteCursor;
use crate::error::CodecError;
use crate::sink::ByteSink;
use crate::types::DataType;

impl Tree {
    // ════════════════════════════════════════════════════════════════════════
    // Parse
    // ════════════════════════════════════════════════════════════════════════

    /// Bind `bytes` as this tree's buffer, replacing any previous one, and
    /// rebind every child to its span of it.
    ///
    /// The length is not checked against the schema. Reading a field that
    /// lies past the end fails with `BufferUnderrun` at access time, so a
    /// prefix or a buffer with trailing data both parse.
    pub fn parse(&mut self, bytes: impl Into<Vec<u8>>) -> &mut Self {
        let sink = ByteSink::from(bytes.into());
        tracing::debug!(len = sink.len(), width = ?self.layout.total, "tree bound to buffer");
        self.bind(BufView::new(sink), false);
        self
    }

    /// Consume exactly this tree's total width from `cursor` and parse it.
    /// The cursor does not move on failure.
    pub fn parse_cursor(&mut self, cursor: &mut ByteCursor<'_>) -> Result<&mut Self, CodecError> {
        let width = self
            .layout
            .total
            .ok_or_else(|| self.unresolved_error(0))?;
        let bytes = cursor.bytes(width)?;
        Ok(self.parse(bytes))
    }

    // ════════════════════════════════════════════════════════════════════════
    // Serialize
    // ════════════════════════════════════════════════════════════════════════

    /// Serialize to exactly `total_width` bytes.
    ///
    /// Fixed fields come from the bound buffer. A field that was never
    /// written (or lies past the end of a short buffer) is zero-filled. TREE
    /// fields serialize their child recursively. The tree itself is left
    /// untouched.
    pub fn to_bytes(&self) -> Result<Vec<u8>, CodecError> {
        let mut sink = ByteSink::with_capacity(self.layout.total.unwrap_or(0));

        for (index, descriptor) in self.schema.iter().enumerate() {
            if descriptor.data_type == DataType::Tree {
                let child = self
                    .children
                    .get(&index)
                    .ok_or(CodecError::NotBound { index: Some(index) })?;
                sink.append_bytes(&child.to_bytes()?);
                continue;
            }

            let width = descriptor.width().ok_or(CodecError::MissingLength { index })?;
            match (&self.view, self.layout.offset(index)) {
                (Some(view), Some(offset)) => view.copy_padded(offset, width, &mut sink),
                _ => {
                    sink.pad(width);
                }
            }
        }

        Ok(sink.into_inner())
    }
}
