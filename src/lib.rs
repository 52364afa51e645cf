//! Compact binary serialization toolkit.
//!
//! - [`ByteSink`] builds a byte buffer from primitives in either byte order.
//! - [`ByteCursor`] reads primitives back sequentially.
//! - [`Tree`] maps a [`Schema`] of typed fields onto fixed offsets of a
//!   buffer, with nested child trees, typed get/set by field index, and
//!   whole-structure parse/serialize.
//!
//! The wire format carries no tags or length prefixes. The schema is shared
//! out of band between producer and consumer.

pub mod charset;
pub mod cursor;
pub mod endian;
pub mod error;
pub mod schema;
pub mod sink;
pub mod tree;
pub mod types;

pub use charset::Charset;
pub use cursor::ByteCursor;
pub use endian::{Endian, FieldValue, Primitive};
pub use error::CodecError;
pub use schema::Schema;
pub use sink::ByteSink;
pub use tree::{ChildTreeMut, Tree};
pub use types::{DataType, FieldDescriptor, FieldSpan, HexBytes};
