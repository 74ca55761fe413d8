//! Vox parsing error types

use core::fmt;

use crate::tag_name;

/// Vox parsing error types
#[derive(Debug, Clone, PartialEq)]
pub enum VoxError {
    /// File too small to contain the 8-byte header
    TooSmall,
    /// Invalid magic bytes (not "VOX ")
    InvalidMagic,
    /// Unexpected end of buffer while reading a fixed-width field
    UnexpectedEof,
    /// A chunk's declared lengths exceed the remaining buffer
    ChunkOverrun([u8; 4]),
    /// A known chunk body failed its fixed-layout decode
    InvalidChunk([u8; 4]),
    /// Container nesting exceeded the recursion limit
    TooDeep,
    /// IO error during parsing
    IoError(String),
}

impl fmt::Display for VoxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VoxError::TooSmall => write!(f, "File too small to contain a vox header"),
            VoxError::InvalidMagic => write!(f, "Invalid vox magic bytes"),
            VoxError::UnexpectedEof => write!(f, "Unexpected end of buffer"),
            VoxError::ChunkOverrun(tag) => write!(
                f,
                "Chunk '{}' declares more bytes than remain in the buffer",
                tag_name(tag)
            ),
            VoxError::InvalidChunk(tag) => {
                write!(f, "Chunk '{}' has a malformed body", tag_name(tag))
            }
            VoxError::TooDeep => write!(
                f,
                "Container nesting deeper than {} levels",
                crate::MAX_NESTING_DEPTH
            ),
            VoxError::IoError(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl std::error::Error for VoxError {}

impl From<std::io::Error> for VoxError {
    fn from(e: std::io::Error) -> Self {
        VoxError::IoError(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            VoxError::TooSmall.to_string(),
            "File too small to contain a vox header"
        );
        assert_eq!(VoxError::InvalidMagic.to_string(), "Invalid vox magic bytes");
        assert_eq!(
            VoxError::ChunkOverrun(*b"XYZI").to_string(),
            "Chunk 'XYZI' declares more bytes than remain in the buffer"
        );
        assert_eq!(
            VoxError::InvalidChunk(*b"RGBA").to_string(),
            "Chunk 'RGBA' has a malformed body"
        );
    }

    #[test]
    fn test_non_ascii_tag_display() {
        // Tags with non-printable bytes must still render without panicking
        let msg = VoxError::InvalidChunk([0x00, 0xFF, 0x41, 0x20]).to_string();
        assert!(msg.contains("has a malformed body"));
    }
}
