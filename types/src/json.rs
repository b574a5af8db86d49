//! JSON renderings of byte fields.

use base64::Engine;
use bytes::Bytes;
use serde::Serializer;

/// Renders bytes as an uppercase hexadecimal string.
pub fn upper_hex<S: Serializer>(bytes: &Bytes, serializer: S) -> Result<S::Ok, S::Error> {
    let mut out = String::with_capacity(bytes.len() * 2);
    for byte in bytes.iter() {
        out.push_str(&format!("{byte:02X}"));
    }
    serializer.serialize_str(&out)
}

/// Renders optional bytes as a base64 string, or `null` if absent.
pub fn base64_or_null<S: Serializer>(
    bytes: &Option<Bytes>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match bytes {
        Some(bytes) => {
            serializer.serialize_str(&base64::engine::general_purpose::STANDARD.encode(bytes))
        }
        None => serializer.serialize_none(),
    }
}
