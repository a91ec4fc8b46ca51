use std::fmt::{Debug, Formatter};

use zune_inflate::errors::InflateDecodeErrors;

/// Errors terminating a decode. No partial image is ever returned.
pub enum PngError {
    /// EOF before the bytes a chunk or the pixel stream promised.
    TruncatedStream,
    /// Stored chunk CRC vs the CRC computed over type and payload.
    CrcMismatch(u32, u32),
    UnsupportedColorType(u8),
    UnsupportedBitDepth(u8),
    UnsupportedCompressionMethod(u8),
    UnsupportedFilterMethod(u8),
    UnsupportedInterlaceMethod(u8),
    /// Unknown chunk whose first type byte is uppercase.
    UnsupportedCriticalChunk([u8; 4]),
    MissingIend,
    /// Bytes present after the IEND chunk.
    TrailingData,
    /// Colour type 3 reached its first IDAT without a PLTE.
    MissingPlte,
    /// Scanline filter byte outside 0..=4.
    UnknownFilter(u8),
    /// Header dimension above the configured limit, (dimension, limit).
    DimensionsExceedLimit(usize, usize),
    Inflate(InflateDecodeErrors),
    Generic(String),
    GenericStatic(&'static str)
}

impl Debug for PngError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TruncatedStream => writeln!(f, "Stream ended before expected bytes"),
            Self::CrcMismatch(stored, computed) => writeln!(
                f,
                "CRC does not match, stored {stored:#010x} but computed {computed:#010x}"
            ),
            Self::UnsupportedColorType(val) => writeln!(f, "Unknown colour type {val}"),
            Self::UnsupportedBitDepth(val) => {
                writeln!(f, "Bit depth {val} not allowed for this colour type")
            }
            Self::UnsupportedCompressionMethod(val) => {
                writeln!(f, "Unknown compression method {val}")
            }
            Self::UnsupportedFilterMethod(val) => writeln!(f, "Unknown filter method {val}"),
            Self::UnsupportedInterlaceMethod(val) => writeln!(f, "Unknown interlace method {val}"),
            Self::UnsupportedCriticalChunk(chunk) => {
                let name = std::str::from_utf8(chunk).unwrap_or("XXXX");
                writeln!(f, "Chunk {name} unknown but deemed necessary")
            }
            Self::MissingIend => writeln!(f, "Stream ended before an IEND chunk"),
            Self::TrailingData => writeln!(f, "Extra bytes after the IEND chunk"),
            Self::MissingPlte => writeln!(f, "Palette image without a PLTE chunk"),
            Self::UnknownFilter(val) => writeln!(f, "Unknown scanline filter {val}"),
            Self::DimensionsExceedLimit(value, limit) => writeln!(
                f,
                "Image dimension {value} larger than configured maximum {limit}"
            ),
            Self::Inflate(err) => writeln!(f, "Error decoding idat chunks {err:?}"),
            Self::Generic(val) => writeln!(f, "{val}"),
            Self::GenericStatic(val) => writeln!(f, "{val}")
        }
    }
}

impl From<&'static str> for PngError {
    fn from(val: &'static str) -> Self {
        Self::GenericStatic(val)
    }
}

impl From<String> for PngError {
    fn from(val: String) -> Self {
        Self::Generic(val)
    }
}

impl From<InflateDecodeErrors> for PngError {
    fn from(val: InflateDecodeErrors) -> Self {
        Self::Inflate(val)
    }
}
