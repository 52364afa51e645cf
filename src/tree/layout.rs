use super::Tree;
use crate::schema::Schema;
use crate::types::DataType;
use rustc_hash::FxHashMap;

// ─── Layout (Offset Table) ──────────────────────────────────────────────────

/// Offset table derived from a schema plus the registered children.
///
/// Built by one left-to-right prefix sum. A TREE field without a child (or
/// whose child is itself unresolved) has no width, and neither does a MUABLE0
/// without a length. Every field after such a field has no offset either.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Layout {
    pub(crate) offsets: Vec<Option<usize>>,
    pub(crate) widths: Vec<Option<usize>>,
    pub(crate) total: Option<usize>,
    /// First field whose width could not be resolved.
    pub(crate) unresolved: Option<usize>,
}

impl Layout {
    pub(crate) fn compute(schema: &Schema, children: &FxHashMap<usize, Tree>) -> Self {
        let mut offsets = Vec::with_capacity(schema.len());
        let mut widths = Vec::with_capacity(schema.len());
        let mut running = Some(0usize);
        let mut unresolved = None;

        for (index, descriptor) in schema.iter().enumerate() {
            offsets.push(running);
            let width = match descriptor.data_type {
                DataType::Tree => children.get(&index).and_then(Tree::total_width),
                _ => descriptor.width(),
            };
            if width.is_none() && unresolved.is_none() {
                unresolved = Some(index);
            }
            widths.push(width);
            running = running.zip(width).map(|(offset, width)| offset + width);
        }

        tracing::trace!(fields = schema.len(), total = ?running, "layout recomputed");
        Self {
            offsets,
            widths,
            total: running,
            unresolved,
        }
    }

    #[inline]
    pub(crate) fn offset(&self, index: usize) -> Option<usize> {
        self.offsets.get(index).copied().flatten()
    }

    #[inline]
    pub(crate) fn width(&self, index: usize) -> Option<usize> {
        self.widths.get(index).copied().flatten()
    }

    /// Fields whose span was located before and after a change but whose
    /// width differs, last field first, as `(index, offset, old, new)` in
    /// the previous layout's coordinates.
    pub(crate) fn resized_since(&self, previous: &Layout) -> Vec<(usize, usize, usize, usize)> {
        (0..self.widths.len().min(previous.widths.len()))
            .rev()
            .filter_map(|index| {
                let offset = previous.offset(index)?;
                let old = previous.width(index)?;
                let new = self.width(index)?;
                (old != new).then_some((index, offset, old, new))
            })
            .collect()
    }
}
