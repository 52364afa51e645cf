use crate::error::CodecError;
use encoding_rs::{Encoding, UTF_16BE, UTF_16LE};
use smol_str::SmolStr;
use std::borrow::Cow;

/// A named character encoding resolved from a WHATWG label such as
/// `"UTF-8"` or `"GBK"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Charset {
    encoding: &'static Encoding,
}

impl Charset {
    pub fn for_label(label: &str) -> Result<Self, CodecError> {
        Encoding::for_label(label.trim().as_bytes())
            .map(|encoding| Self { encoding })
            .ok_or_else(|| CodecError::CharsetUnsupported(SmolStr::from(label)))
    }

    #[inline]
    pub fn name(&self) -> &'static str {
        self.encoding.name()
    }

    /// Encode `text`. Characters the charset cannot represent become HTML
    /// numeric character references.
    pub fn encode<'a>(&self, text: &'a str) -> Cow<'a, [u8]> {
        // WHATWG encoders fall back to UTF-8 for UTF-16 targets.
        if self.encoding == UTF_16LE {
            return Cow::Owned(text.encode_utf16().flat_map(u16::to_le_bytes).collect());
        }
        if self.encoding == UTF_16BE {
            return Cow::Owned(text.encode_utf16().flat_map(u16::to_be_bytes).collect());
        }
        let (bytes, _, _) = self.encoding.encode(text);
        bytes
    }

    /// Decode exactly `bytes`. A BOM is kept as content and malformed
    /// sequences become U+FFFD.
    pub fn decode<'a>(&self, bytes: &'a [u8]) -> Cow<'a, str> {
        self.encoding.decode_without_bom_handling(bytes).0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_utf8_roundtrip() {
        let charset = Charset::for_label("UTF-8").unwrap();
        assert_eq!(charset.encode("123").as_ref(), b"123");
        assert_eq!(charset.decode("héllo".as_bytes()), "héllo");
    }

    #[test]
    fn test_gbk_roundtrip() {
        let charset = Charset::for_label("GBK").unwrap();
        let bytes = charset.encode("中文");
        assert_eq!(bytes.len(), 4);
        assert_eq!(charset.decode(&bytes), "中文");
    }

    #[test]
    fn test_utf16_encodes_natively() {
        let le = Charset::for_label("UTF-16LE").unwrap();
        assert_eq!(le.encode("A").as_ref(), &[0x41, 0x00]);
        assert_eq!(le.decode(&[0x41, 0x00]), "A");

        let be = Charset::for_label("utf-16be").unwrap();
        assert_eq!(be.encode("A").as_ref(), &[0x00, 0x41]);
    }

    #[test]
    fn test_unknown_label() {
        let err = Charset::for_label("klingon-8").unwrap_err();
        assert!(matches!(err, CodecError::CharsetUnsupported(ref l) if l == "klingon-8"));
    }
}
