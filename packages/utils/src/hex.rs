//! Hex formatting used in error messages and logs.

/// Encodes bytes as a `0x`-prefixed lowercase hex string.
///
/// Empty input is rendered as `0x` so that "no bytes" stays distinguishable from a zero byte.
pub fn to_hex<T: AsRef<[u8]>>(data: T) -> String {
    format!("0x{}", ::hex::encode(data.as_ref()))
}
