use crate::types::DataType;
use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};

// ─── Byte Order ─────────────────────────────────────────────────────────────

/// Byte order of a multi-byte value. Big-endian (network order) unless
/// a caller opts into little-endian.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Endian {
    #[default]
    Big,
    Little,
}

// ─── Primitive Trait ────────────────────────────────────────────────────────

/// A fixed-width value that can be written to and read from raw bytes in
/// either byte order.
pub trait Primitive: Copy + Sized {
    /// Encoded width in bytes.
    const WIDTH: usize;

    fn encode(self, order: Endian) -> ArrayVec<u8, 8>;

    /// Decode from exactly `WIDTH` bytes. Callers check the length first.
    fn decode(bytes: &[u8], order: Endian) -> Self;
}

/// A primitive that is also a Tree field type.
pub trait FieldValue: Primitive {
    const DATA_TYPE: DataType;
}

macro_rules! impl_primitive {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Primitive for $ty {
                const WIDTH: usize = std::mem::size_of::<$ty>();

                #[inline]
                fn encode(self, order: Endian) -> ArrayVec<u8, 8> {
                    let bytes = match order {
                        Endian::Big => self.to_be_bytes(),
                        Endian::Little => self.to_le_bytes(),
                    };
                    bytes.into_iter().collect()
                }

                #[inline]
                fn decode(bytes: &[u8], order: Endian) -> Self {
                    let mut raw = [0u8; std::mem::size_of::<$ty>()];
                    raw.copy_from_slice(&bytes[..Self::WIDTH]);
                    match order {
                        Endian::Big => <$ty>::from_be_bytes(raw),
                        Endian::Little => <$ty>::from_le_bytes(raw),
                    }
                }
            }
        )*
    };
}

impl_primitive!(u8, i8, u16, i16, u32, i32, u64, i64, f32, f64);

macro_rules! impl_field_value {
    ($($ty:ty => $tag:ident),* $(,)?) => {
        $(
            impl FieldValue for $ty {
                const DATA_TYPE: DataType = DataType::$tag;
            }
        )*
    };
}

impl_field_value!(
    u8 => U8,
    i8 => S8,
    u16 => U16,
    i16 => S16,
    u32 => U32,
    i32 => S32,
    i64 => S64,
    f32 => Float,
    f64 => Double,
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_u32_one_in_both_orders() {
        assert_eq!(1u32.encode(Endian::Big).as_slice(), &[0, 0, 0, 1]);
        assert_eq!(1u32.encode(Endian::Little).as_slice(), &[1, 0, 0, 0]);
    }

    #[test]
    fn test_decode_matches_std() {
        let bytes = [0x12, 0x34, 0x56, 0x78];
        assert_eq!(u32::decode(&bytes, Endian::Big), 0x1234_5678);
        assert_eq!(u32::decode(&bytes, Endian::Little), 0x7856_3412);
        assert_eq!(i16::decode(&[0xFF, 0xFE], Endian::Big), -2);
    }

    #[test]
    fn test_width_matches_field_type() {
        assert_eq!(<i64 as Primitive>::WIDTH, 8);
        assert_eq!(<f32 as Primitive>::WIDTH, 4);
        assert_eq!(<i8 as FieldValue>::DATA_TYPE, DataType::S8);
        assert_eq!(DataType::Double.fixed_width(), Some(<f64 as Primitive>::WIDTH));
    }
}
