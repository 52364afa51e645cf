use crate::error::CodecError;
use crate::types::{DataType, FieldDescriptor};
use serde::{Deserialize, Serialize};
use std::ops::Deref;

// ─── Schema ─────────────────────────────────────────────────────────────────

/// Ordered field descriptors defining a tree's layout.
///
/// Serializes as a plain JSON array, so producer and consumer can share the
/// same out-of-band definition:
///
/// ```
/// use bytes_tree::Schema;
///
/// let schema = Schema::from_json(
///     r#"[{"type": "U8"}, {"type": "S32", "order": "little"}, {"type": "MUABLE0", "length": 3}]"#,
/// )
/// .unwrap();
/// assert_eq!(schema.fixed_width(), Some(8));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Schema(Vec<FieldDescriptor>);

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style push.
    #[inline]
    pub fn field(mut self, descriptor: impl Into<FieldDescriptor>) -> Self {
        self.0.push(descriptor.into());
        self
    }

    pub fn from_json(json: &str) -> Result<Self, CodecError> {
        let schema: Schema = serde_json::from_str(json)?;
        schema.validate()?;
        Ok(schema)
    }

    pub fn to_json(&self) -> Result<String, CodecError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Every MUABLE0 field must declare its length.
    pub fn validate(&self) -> Result<(), CodecError> {
        match self
            .0
            .iter()
            .position(|d| d.data_type == DataType::Muable0 && d.length.is_none())
        {
            Some(index) => Err(CodecError::MissingLength { index }),
            None => Ok(()),
        }
    }

    /// Total width when no field is a TREE and every MUABLE0 has a length.
    pub fn fixed_width(&self) -> Option<usize> {
        self.0.iter().map(FieldDescriptor::width).sum()
    }

    /// Number of TREE slots.
    pub fn tree_slots(&self) -> usize {
        self.0.iter().filter(|d| d.data_type == DataType::Tree).count()
    }
}

impl Deref for Schema {
    type Target = [FieldDescriptor];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<Vec<FieldDescriptor>> for Schema {
    fn from(fields: Vec<FieldDescriptor>) -> Self {
        Self(fields)
    }
}

impl From<&[FieldDescriptor]> for Schema {
    fn from(fields: &[FieldDescriptor]) -> Self {
        Self(fields.to_vec())
    }
}

impl<const N: usize> From<[FieldDescriptor; N]> for Schema {
    fn from(fields: [FieldDescriptor; N]) -> Self {
        Self(fields.to_vec())
    }
}

impl FromIterator<FieldDescriptor> for Schema {
    fn from_iter<I: IntoIterator<Item = FieldDescriptor>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::endian::Endian;

    #[test]
    fn test_json_roundtrip() {
        let schema = Schema::new()
            .field(FieldDescriptor::TREE)
            .field(DataType::U8)
            .field(FieldDescriptor::S32.little_endian())
            .field(FieldDescriptor::muable0(3));
        let json = schema.to_json().unwrap();
        assert_eq!(Schema::from_json(&json).unwrap(), schema);
    }

    #[test]
    fn test_json_defaults() {
        let schema = Schema::from_json(r#"[{"type": "FLOAT"}, {"type": "U32", "order": "little"}]"#).unwrap();
        assert_eq!(schema[0], FieldDescriptor::FLOAT);
        assert_eq!(schema[0].order, Endian::Big);
        assert_eq!(schema[1].order, Endian::Little);
    }

    #[test]
    fn test_missing_length_is_rejected() {
        let err = Schema::from_json(r#"[{"type": "U8"}, {"type": "MUABLE0"}]"#).unwrap_err();
        assert!(matches!(err, CodecError::MissingLength { index: 1 }));
    }

    #[test]
    fn test_code_built_muable0_needs_length() {
        let schema = Schema::new().field(DataType::U8).field(DataType::Muable0);
        assert_eq!(schema.fixed_width(), None);
        assert!(matches!(schema.validate(), Err(CodecError::MissingLength { index: 1 })));
    }

    #[test]
    fn test_bad_json_is_a_schema_error() {
        let err = Schema::from_json(r#"[{"type": "U128"}]"#).unwrap_err();
        assert!(matches!(err, CodecError::Schema(_)));
    }

    #[test]
    fn test_fixed_width() {
        let schema = Schema::from([FieldDescriptor::U8, FieldDescriptor::S32, FieldDescriptor::FLOAT]);
        assert_eq!(schema.fixed_width(), Some(9));
        let nested = schema.clone().field(FieldDescriptor::TREE);
        assert_eq!(nested.fixed_width(), None);
        assert_eq!(nested.tree_slots(), 1);
    }
}
