//! XML text helpers shared by the event reader.

pub mod escape;

pub use escape::{resolve_reference, unescape_xml};

/// Split a raw qualified name into `(prefix, local_name)`.
///
/// A name without a colon has an empty prefix.
#[inline]
pub fn split_qname(raw: &[u8]) -> (&[u8], &[u8]) {
    match memchr::memchr(b':', raw) {
        Some(pos) => (&raw[..pos], &raw[pos + 1..]),
        None => (&[], raw),
    }
}
