//! Wire text codec
//!
//! The controller speaks windows-1250. Every byte maps to exactly one
//! character, so chunks can be decoded independently.

use crate::error::{FoxtrotError, FoxtrotResult};
use encoding_rs::WINDOWS_1250;

/// Decode one received chunk
pub fn decode(bytes: &[u8]) -> String {
    let (text, _) = WINDOWS_1250.decode_without_bom_handling(bytes);
    text.into_owned()
}

/// Encode a request for sending
///
/// Characters outside the code page are rejected instead of being replaced.
pub fn encode(text: &str) -> FoxtrotResult<Vec<u8>> {
    let (bytes, _, had_errors) = WINDOWS_1250.encode(text);
    if had_errors {
        return Err(FoxtrotError::InvalidData(format!(
            "request not representable in windows-1250: {:?}",
            text.trim_end()
        )));
    }
    Ok(bytes.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_is_unchanged() {
        assert_eq!(decode(b"LIST:\r\n"), "LIST:\r\n");
        assert_eq!(encode("GET:A.B\r\n").unwrap(), b"GET:A.B\r\n".to_vec());
    }

    #[test]
    fn test_central_european_characters() {
        // 0x9A = š, 0xE8 = č, 0xF8 = ř
        assert_eq!(decode(&[0x9A, 0xE8, 0xF8]), "ščř");
        assert_eq!(encode("Kuchyň").unwrap(), vec![b'K', b'u', b'c', b'h', b'y', 0xF2]);
    }

    #[test]
    fn test_unmappable_characters_are_rejected() {
        let err = encode("SET:A.B,\u{65E5}\r\n").unwrap_err();
        assert!(matches!(err, FoxtrotError::InvalidData(_)));
    }
}
