//! Utility functions and constants for format detection.

// Magic number signatures
pub const ZIP_SIGNATURE: &[u8] = &[0x50, 0x4B, 0x03, 0x04];
pub const ZIP_EMPTY_SIGNATURE: &[u8] = &[0x50, 0x4B, 0x05, 0x06];
pub const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Find a pattern anywhere in a buffer.
#[inline]
pub fn find_in_buffer(buffer: &[u8], pattern: &[u8]) -> Option<usize> {
    memchr::memmem::find(buffer, pattern)
}

/// Skip a UTF-8 byte order mark and leading XML whitespace.
pub fn skip_bom_and_whitespace(bytes: &[u8]) -> &[u8] {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    let start = bytes
        .iter()
        .position(|b| !matches!(b, b' ' | b'\t' | b'\r' | b'\n'))
        .unwrap_or(bytes.len());
    &bytes[start..]
}
