use super::Tree;
use super::view::BufView;
use crate::charset::Charset;
use crate::endian::FieldValue;
use crate::error::CodecError;
use crate::schema::Schema;
use crate::sink::ByteSink;
use crate::types::DataType;
use std::ops::{Deref, DerefMut};

macro_rules! typed_setters {
    ($($name:ident => $ty:ty),* $(,)?) => {
        $(
            #[inline]
            pub fn $name(&mut self, index: usize, value: $ty) -> Result<&mut Self, CodecError> {
                self.set::<$ty>(index, value)
            }
        )*
    };
}

impl Tree {
    // ════════════════════════════════════════════════════════════════════════
    // Internal: buffer materialization
    // ════════════════════════════════════════════════════════════════════════

    /// The bound view, creating an empty buffer on the first write. Children
    /// that already hold bytes are carried into it.
    fn materialize(&mut self) -> BufView {
        if let Some(view) = &self.view {
            return view.clone();
        }
        let view = BufView::new(ByteSink::with_capacity(self.layout.total.unwrap_or(0)));
        tracing::debug!(fields = self.schema.len(), "buffer materialized by first write");
        self.bind(view.clone(), true);
        view
    }

    // ════════════════════════════════════════════════════════════════════════
    // Typed setters — in place, extending the buffer when needed
    // ════════════════════════════════════════════════════════════════════════

    /// Write `value` into the fixed-width field at `index`. Every other
    /// field's bytes stay untouched.
    pub fn set<T: FieldValue>(&mut self, index: usize, value: T) -> Result<&mut Self, CodecError> {
        let descriptor = self.expect_type(index, T::DATA_TYPE)?;
        let offset = self.resolved_offset(index)?;
        self.materialize().write(offset, &value.encode(descriptor.order));
        Ok(self)
    }

    typed_setters!(
        set_u8 => u8,
        set_s8 => i8,
        set_u16 => u16,
        set_s16 => i16,
        set_u32 => u32,
        set_s32 => i32,
        set_s64 => i64,
        set_float => f32,
        set_double => f64,
    );

    // ════════════════════════════════════════════════════════════════════════
    // Variable-length setters
    // ════════════════════════════════════════════════════════════════════════

    /// Write `raw` into a MUABLE0 field. Shorter values are zero-padded to the
    /// declared length; longer ones are rejected.
    pub fn set_bytes(&mut self, index: usize, raw: &[u8]) -> Result<&mut Self, CodecError> {
        let descriptor = self.expect_type(index, DataType::Muable0)?;
        let width = descriptor.width().ok_or(CodecError::MissingLength { index })?;
        if raw.len() > width {
            return Err(CodecError::LengthMismatch {
                expected: width,
                actual: raw.len(),
            });
        }
        let offset = self.resolved_offset(index)?;

        let view = self.materialize();
        view.write(offset, raw);
        if raw.len() < width {
            view.write(offset + raw.len(), &vec![0u8; width - raw.len()]);
        }
        Ok(self)
    }

    /// Encode `text` with the named charset into a MUABLE0 field.
    pub fn set_string(&mut self, index: usize, text: &str, encoding: &str) -> Result<&mut Self, CodecError> {
        let charset = Charset::for_label(encoding)?;
        self.set_bytes(index, &charset.encode(text))
    }

    // ════════════════════════════════════════════════════════════════════════
    // Children
    // ════════════════════════════════════════════════════════════════════════

    /// Register (or replace) the child of the TREE field at `index` and shift
    /// every later field by the child's width. On a bound tree the bytes of
    /// later fields move along, so values already set there are kept.
    ///
    /// On a bound tree, a child that carries its own buffer has its bytes
    /// copied into this tree's buffer. A schema-only child instead becomes a
    /// view over the bytes already there.
    pub fn set_child_tree(&mut self, index: usize, child: impl Into<Tree>) -> Result<&mut Self, CodecError> {
        self.expect_type(index, DataType::Tree)?;
        let mut child = child.into();

        let carried = match (&self.view, self.layout.offset(index)) {
            (Some(_), Some(_)) if child.is_bound() => {
                let bytes = child.to_bytes()?;
                child.unbind();
                Some(bytes)
            }
            _ => None,
        };

        self.children.insert(index, child);
        self.relayout(None);

        if let (Some(bytes), Some(view), Some(offset)) = (carried, &self.view, self.layout.offset(index)) {
            view.write(offset, &bytes);
        }
        tracing::debug!(index, width = ?self.children.get(&index).and_then(Tree::total_width), "child tree attached");
        Ok(self)
    }

    /// Mutable access to a registered child. The parent relays out when the
    /// guard drops, so structural changes to the child are picked up.
    pub fn child_tree_mut(&mut self, index: usize) -> Result<ChildTreeMut<'_>, CodecError> {
        self.expect_type(index, DataType::Tree)?;
        let child = self
            .children
            .remove(&index)
            .ok_or(CodecError::NotBound { index: Some(index) })?;
        Ok(ChildTreeMut {
            parent: self,
            index,
            child,
        })
    }
}

// ─── ChildTreeMut ───────────────────────────────────────────────────────────

/// Guard returned by [`Tree::child_tree_mut`].
pub struct ChildTreeMut<'a> {
    parent: &'a mut Tree,
    index: usize,
    child: Tree,
}

impl Deref for ChildTreeMut<'_> {
    type Target = Tree;

    fn deref(&self) -> &Tree {
        &self.child
    }
}

impl DerefMut for ChildTreeMut<'_> {
    fn deref_mut(&mut self) -> &mut Tree {
        &mut self.child
    }
}

impl Drop for ChildTreeMut<'_> {
    fn drop(&mut self) {
        let child = std::mem::replace(&mut self.child, Tree::new(Schema::new()));
        // A child viewing the parent's buffer already shifted the bytes after
        // any span it resized.
        let moved = match (&self.parent.view, &child.view) {
            (Some(parent), Some(own)) if own.shares_buffer(parent) => Some(self.index),
            _ => None,
        };
        self.parent.children.insert(self.index, child);
        self.parent.relayout(moved);
    }
}
