use crate::endian::Endian;
use serde::{Deserialize, Serialize};
use std::fmt;

// ─── Data Types ─────────────────────────────────────────────────────────────

/// Kind of a schema field. Every kind has a fixed width except `Muable0`
/// (declared by the descriptor) and `Tree` (the child's total width).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DataType {
    U8,
    S8,
    U16,
    S16,
    U32,
    S32,
    S64,
    Float,
    Double,
    Muable0,
    Tree,
}

impl DataType {
    #[inline]
    pub const fn fixed_width(self) -> Option<usize> {
        match self {
            DataType::U8 | DataType::S8 => Some(1),
            DataType::U16 | DataType::S16 => Some(2),
            DataType::U32 | DataType::S32 | DataType::Float => Some(4),
            DataType::S64 | DataType::Double => Some(8),
            DataType::Muable0 | DataType::Tree => None,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            DataType::U8 => "U8",
            DataType::S8 => "S8",
            DataType::U16 => "U16",
            DataType::S16 => "S16",
            DataType::U32 => "U32",
            DataType::S32 => "S32",
            DataType::S64 => "S64",
            DataType::Float => "FLOAT",
            DataType::Double => "DOUBLE",
            DataType::Muable0 => "MUABLE0",
            DataType::Tree => "TREE",
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ─── Field Descriptor ───────────────────────────────────────────────────────

/// One schema entry.
///
/// `length` only matters for `Muable0`. `order` only matters for multi-byte
/// numeric fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FieldDescriptor {
    #[serde(rename = "type")]
    pub data_type: DataType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<usize>,
    #[serde(default)]
    pub order: Endian,
}

impl FieldDescriptor {
    pub const U8: Self = Self::new(DataType::U8);
    pub const S8: Self = Self::new(DataType::S8);
    pub const U16: Self = Self::new(DataType::U16);
    pub const S16: Self = Self::new(DataType::S16);
    pub const U32: Self = Self::new(DataType::U32);
    pub const S32: Self = Self::new(DataType::S32);
    pub const S64: Self = Self::new(DataType::S64);
    pub const FLOAT: Self = Self::new(DataType::Float);
    pub const DOUBLE: Self = Self::new(DataType::Double);
    pub const TREE: Self = Self::new(DataType::Tree);

    #[inline]
    pub const fn new(data_type: DataType) -> Self {
        Self {
            data_type,
            length: None,
            order: Endian::Big,
        }
    }

    /// A raw span of exactly `length` bytes.
    #[inline]
    pub const fn muable0(length: usize) -> Self {
        Self {
            data_type: DataType::Muable0,
            length: Some(length),
            order: Endian::Big,
        }
    }

    #[inline]
    pub const fn with_order(mut self, order: Endian) -> Self {
        self.order = order;
        self
    }

    #[inline]
    pub const fn little_endian(self) -> Self {
        self.with_order(Endian::Little)
    }

    /// Width in bytes. `None` for `Tree`, whose width comes from its child,
    /// and for a `Muable0` that declares no length.
    #[inline]
    pub const fn width(&self) -> Option<usize> {
        match self.data_type {
            DataType::Muable0 => self.length,
            other => other.fixed_width(),
        }
    }
}

impl From<DataType> for FieldDescriptor {
    fn from(data_type: DataType) -> Self {
        Self::new(data_type)
    }
}

// ─── Field Span ─────────────────────────────────────────────────────────────

/// Position of a field inside its tree's buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpan {
    pub offset: usize,
    pub width: usize,
}

impl FieldSpan {
    #[inline]
    pub const fn end(&self) -> usize {
        self.offset + self.width
    }
}

// ─── Hex View ───────────────────────────────────────────────────────────────

/// Renders bytes as uppercase hex pairs, each followed by a space.
pub struct HexBytes<'a>(pub &'a [u8]);

impl fmt::Display for HexBytes<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.0 {
            write!(f, "{byte:02X} ")?;
        }
        Ok(())
    }
}
