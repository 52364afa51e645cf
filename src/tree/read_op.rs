use super::Tree;
use crate::charset::Charset;
use crate::endian::FieldValue;
use crate::error::CodecError;
use crate::types::DataType;

macro_rules! typed_getters {
    ($($(#[$doc:meta])* $name:ident => $ty:ty),* $(,)?) => {
        $(
            $(#[$doc])*
            #[inline]
            pub fn $name(&self, index: usize) -> Result<$ty, CodecError> {
                self.get::<$ty>(index)
            }
        )*
    };
}

impl Tree {
    // ════════════════════════════════════════════════════════════════════════
    // Typed getters
    // ════════════════════════════════════════════════════════════════════════

    /// Read the fixed-width field at `index` as `T`.
    ///
    /// Fails with `IndexOutOfRange`, then `TypeMismatch` when the field is not
    /// `T::DATA_TYPE`, then `NotBound` for an unbound tree, `NotBound` or
    /// `MissingLength` for an unlocatable field, and `BufferUnderrun`.
    pub fn get<T: FieldValue>(&self, index: usize) -> Result<T, CodecError> {
        let descriptor = self.expect_type(index, T::DATA_TYPE)?;
        let view = self.bound_view()?;
        let offset = self.resolved_offset(index)?;
        view.read::<T>(offset, descriptor.order)
    }

    typed_getters!(
        get_u8 => u8,
        get_s8 => i8,
        get_u16 => u16,
        get_s16 => i16,
        get_u32 => u32,
        get_s32 => i32,
        get_s64 => i64,
        get_float => f32,
        get_double => f64,
    );

    // ════════════════════════════════════════════════════════════════════════
    // Variable-length getters
    // ════════════════════════════════════════════════════════════════════════

    /// Copy of a MUABLE0 field's full declared span.
    pub fn get_bytes(&self, index: usize) -> Result<Vec<u8>, CodecError> {
        self.expect_type(index, DataType::Muable0)?;
        let view = self.bound_view()?;
        let offset = self.resolved_offset(index)?;
        view.read_bytes(offset, self.field_width(index)?)
    }

    /// Decode a MUABLE0 field's full declared span with the named charset.
    pub fn get_string(&self, index: usize, encoding: &str) -> Result<String, CodecError> {
        let charset = Charset::for_label(encoding)?;
        let bytes = self.get_bytes(index)?;
        Ok(charset.decode(&bytes).into_owned())
    }

    /// Raw bytes of any field, TREE fields included.
    pub fn get_raw(&self, index: usize) -> Result<Vec<u8>, CodecError> {
        let span = self.span(index)?;
        self.bound_view()?.read_bytes(span.offset, span.width)
    }

    // ════════════════════════════════════════════════════════════════════════
    // Children
    // ════════════════════════════════════════════════════════════════════════

    /// The child registered for the TREE field at `index`. When this tree is
    /// bound, the child reads and writes through to the same buffer.
    pub fn get_child_tree(&self, index: usize) -> Result<&Tree, CodecError> {
        self.expect_type(index, DataType::Tree)?;
        self.children
            .get(&index)
            .ok_or(CodecError::NotBound { index: Some(index) })
    }

    #[inline]
    pub fn has_child_tree(&self, index: usize) -> bool {
        self.children.contains_key(&index)
    }
}
