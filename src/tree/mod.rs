mod layout;
mod read_op;
mod serialize_op;
mod view;
mod write_op;

pub use write_op::ChildTreeMut;

use crate::error::CodecError;
use crate::schema::Schema;
use crate::types::{DataType, FieldDescriptor, FieldSpan};
use layout::Layout;
use rustc_hash::FxHashMap;
use view::BufView;


// ─── Tree ───────────────────────────────────────────────────────────────────

/// Schema-driven view over a flat byte buffer.
///
/// Fields are addressed by their 0-based position in the schema. A tree is
/// *unbound* until it gets a buffer, either from [`Tree::parse`] or from the
/// first `set_*` call. Reads on an unbound tree fail with `NotBound`.
///
/// Replacing or resizing a child on a bound tree moves every later field's
/// bytes with it, so values already written there survive.
///
/// TREE fields hold a nested child tree. Once the parent is bound, each child
/// is a view into the parent's buffer at that field's offset, so parsing the
/// parent is enough to read nested fields:
///
/// ```
/// use bytes_tree::{FieldDescriptor, Tree};
///
/// let mut tree = Tree::new([FieldDescriptor::TREE, FieldDescriptor::U8]);
/// tree.set_child_tree(0, [FieldDescriptor::U8, FieldDescriptor::U8])?;
/// tree.parse(vec![1, 2, 3]);
///
/// assert_eq!(tree.get_child_tree(0)?.get_u8(1)?, 2);
/// assert_eq!(tree.get_u8(1)?, 3);
/// # Ok::<(), bytes_tree::CodecError>(())
/// ```
///
/// A tree shares its buffer with its children through `Rc`, so it is neither
/// `Send` nor `Sync`.
#[derive(Debug)]
pub struct Tree {
    schema: Schema,
    children: FxHashMap<usize, Tree>,
    layout: Layout,
    view: Option<BufView>,
}

impl Tree {
    pub fn new(schema: impl Into<Schema>) -> Self {
        let schema = schema.into();
        let children = FxHashMap::default();
        let layout = Layout::compute(&schema, &children);
        Self {
            schema,
            children,
            layout,
            view: None,
        }
    }

    /// Build a tree and place `children` into its TREE slots in schema order.
    pub fn with_children(
        schema: impl Into<Schema>,
        children: impl IntoIterator<Item = Tree>,
    ) -> Result<Self, CodecError> {
        let mut tree = Self::new(schema);
        let mut slots = tree
            .schema
            .iter()
            .enumerate()
            .filter(|(_, d)| d.data_type == DataType::Tree)
            .map(|(index, _)| index)
            .collect::<Vec<_>>()
            .into_iter();

        for child in children {
            let index = slots.next().ok_or(CodecError::TooManyChildren {
                slots: tree.schema.tree_slots(),
            })?;
            tree.children.insert(index, child);
        }
        tree.relayout(None);
        Ok(tree)
    }

    // ════════════════════════════════════════════════════════════════════════
    // Introspection
    // ════════════════════════════════════════════════════════════════════════

    #[inline]
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.schema.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.schema.is_empty()
    }

    #[inline]
    pub fn is_bound(&self) -> bool {
        self.view.is_some()
    }

    /// Sum of all field widths, or `None` while a TREE field is unresolved.
    #[inline]
    pub fn total_width(&self) -> Option<usize> {
        self.layout.total
    }

    #[inline]
    pub fn offset(&self, index: usize) -> Result<usize, CodecError> {
        self.descriptor(index)?;
        self.resolved_offset(index)
    }

    pub fn span(&self, index: usize) -> Result<FieldSpan, CodecError> {
        let offset = self.offset(index)?;
        let width = self.field_width(index)?;
        Ok(FieldSpan { offset, width })
    }

    // ════════════════════════════════════════════════════════════════════════
    // Internal: lookups
    // ════════════════════════════════════════════════════════════════════════

    #[inline]
    fn descriptor(&self, index: usize) -> Result<&FieldDescriptor, CodecError> {
        self.schema.get(index).ok_or(CodecError::IndexOutOfRange {
            index,
            len: self.schema.len(),
        })
    }

    #[inline]
    fn expect_type(&self, index: usize, expected: DataType) -> Result<FieldDescriptor, CodecError> {
        let descriptor = *self.descriptor(index)?;
        if descriptor.data_type != expected {
            return Err(CodecError::TypeMismatch {
                index,
                expected,
                actual: descriptor.data_type,
            });
        }
        Ok(descriptor)
    }

    #[inline]
    fn resolved_offset(&self, index: usize) -> Result<usize, CodecError> {
        self.layout
            .offset(index)
            .ok_or_else(|| self.unresolved_error(index))
    }

    /// Error for a field that cannot be located, blamed on the first field
    /// without a width.
    fn unresolved_error(&self, index: usize) -> CodecError {
        let at = self.layout.unresolved.unwrap_or(index);
        match self.schema.get(at).map(|d| d.data_type) {
            Some(DataType::Muable0) => CodecError::MissingLength { index: at },
            _ => CodecError::NotBound { index: Some(at) },
        }
    }

    fn field_width(&self, index: usize) -> Result<usize, CodecError> {
        let descriptor = self.descriptor(index)?;
        match descriptor.data_type {
            DataType::Tree => self
                .children
                .get(&index)
                .and_then(Tree::total_width)
                .ok_or(CodecError::NotBound { index: Some(index) }),
            _ => descriptor.width().ok_or(CodecError::MissingLength { index }),
        }
    }

    #[inline]
    fn bound_view(&self) -> Result<&BufView, CodecError> {
        self.view.as_ref().ok_or(CodecError::NotBound { index: None })
    }

    // ════════════════════════════════════════════════════════════════════════
    // Internal: binding
    // ════════════════════════════════════════════════════════════════════════

    /// Recompute offsets and move every child to its new position, carrying
    /// any child that holds its own buffer into this tree's buffer.
    ///
    /// On a bound tree, every field that was located before and changed
    /// width has its span grown or shrunk in the buffer so later fields keep
    /// their bytes. `moved` names a field whose bytes were already shifted
    /// through the shared buffer by the child itself. A field that had no
    /// offset before is reinterpreted in place, as nothing after it can have
    /// been written.
    fn relayout(&mut self, moved: Option<usize>) {
        let layout = Layout::compute(&self.schema, &self.children);
        if let Some(view) = &self.view {
            for (index, offset, old, new) in layout.resized_since(&self.layout) {
                if Some(index) != moved {
                    tracing::debug!(index, old, new, "field span resized");
                    view.resize_span(offset, old, new);
                }
            }
        }
        self.layout = layout;
        self.bind_children(true);
    }

    fn bind(&mut self, view: BufView, carry: bool) {
        self.view = Some(view);
        self.bind_children(carry);
    }

    fn unbind(&mut self) {
        self.view = None;
        for child in self.children.values_mut() {
            child.unbind();
        }
    }

    /// Point every locatable child at its span of this tree's buffer.
    ///
    /// With `carry`, a child bound to a buffer of its own has its bytes
    /// copied into the span first, and unbound children carry their own
    /// descendants the same way. Without it the buffer's bytes win.
    fn bind_children(&mut self, carry: bool) {
        let Some(view) = &self.view else {
            return;
        };
        for (&index, child) in self.children.iter_mut() {
            let shared = child
                .view
                .as_ref()
                .is_some_and(|own| own.shares_buffer(view));
            let Some(offset) = self.layout.offset(index) else {
                if shared {
                    child.unbind();
                }
                continue;
            };

            if !child.is_bound() {
                child.bind(view.at(offset), carry);
            } else if carry && !shared {
                let carried = child.carry_out(index);
                child.bind(view.at(offset), false);
                if let Some(bytes) = carried {
                    view.write(offset, &bytes);
                }
            } else {
                child.bind(view.at(offset), false);
            }
        }
    }

    fn carry_out(&self, index: usize) -> Option<Vec<u8>> {
        match self.to_bytes() {
            Ok(bytes) => Some(bytes),
            Err(err) => {
                tracing::warn!(index, %err, "child bytes not carried into parent buffer");
                None
            }
        }
    }
}

impl From<Schema> for Tree {
    fn from(schema: Schema) -> Self {
        Tree::new(schema)
    }
}

impl From<Vec<FieldDescriptor>> for Tree {
    fn from(fields: Vec<FieldDescriptor>) -> Self {
        Tree::new(fields)
    }
}

impl From<&[FieldDescriptor]> for Tree {
    fn from(fields: &[FieldDescriptor]) -> Self {
        Tree::new(fields)
    }
}

impl<const N: usize> From<[FieldDescriptor; N]> for Tree {
    fn from(fields: [FieldDescriptor; N]) -> Self {
        Tree::new(fields)
    }
}
