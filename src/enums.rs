#![allow(clippy::upper_case_acronyms, non_camel_case_types)]

/// Chunk types the decoder recognizes, see
/// https://www.w3.org/TR/2003/REC-PNG-20031110/
///
/// Anything else maps to `unkn` and is skipped or rejected depending on
/// the case of the first type byte.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum PngChunkType {
    IHDR,
    PLTE,
    IDAT,
    IEND,
    tRNS,
    pHYs,
    tEXt,
    unkn
}

impl PngChunkType {
    pub fn from_bytes(bytes: [u8; 4]) -> PngChunkType {
        match &bytes {
            b"IHDR" => Self::IHDR,
            b"PLTE" => Self::PLTE,
            b"IDAT" => Self::IDAT,
            b"IEND" => Self::IEND,
            b"tRNS" => Self::tRNS,
            b"pHYs" => Self::pHYs,
            b"tEXt" => Self::tEXt,
            _ => Self::unkn
        }
    }
}

/// Per-scanline filter choice, the first byte of every filtered scanline.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum FilterType {
    None,
    Sub,
    Up,
    Average,
    Paeth
}

impl FilterType {
    pub fn from_int(int: u8) -> Option<FilterType> {
        match int {
            0 => Some(FilterType::None),
            1 => Some(FilterType::Sub),
            2 => Some(FilterType::Up),
            3 => Some(FilterType::Average),
            4 => Some(FilterType::Paeth),
            _ => None
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum InterlaceMethod {
    Standard,
    Adam7,
    Unknown
}

impl Default for InterlaceMethod {
    fn default() -> Self {
        Self::Unknown
    }
}

impl InterlaceMethod {
    pub fn from_int(int: u8) -> Option<InterlaceMethod> {
        match int {
            0 => Some(Self::Standard),
            1 => Some(Self::Adam7),
            _ => None
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum PngColor {
    Luma,
    Palette,
    LumaA,
    RGB,
    RGBA,
    Unknown
}

impl Default for PngColor {
    fn default() -> Self {
        Self::Unknown
    }
}

impl PngColor {
    pub(crate) fn num_components(self) -> u8 {
        match self {
            PngColor::Luma => 1,
            PngColor::Palette => 1,
            PngColor::LumaA => 2,
            PngColor::RGB => 3,
            PngColor::RGBA => 4,
            PngColor::Unknown => unreachable!()
        }
    }

    pub(crate) fn from_int(int: u8) -> Option<PngColor> {
        match int {
            0 => Some(Self::Luma),
            2 => Some(Self::RGB),
            3 => Some(Self::Palette),
            4 => Some(Self::LumaA),
            6 => Some(Self::RGBA),
            _ => None
        }
    }

    /// Bit depths a colour type may legally combine with.
    pub(crate) fn supports_depth(self, depth: u8) -> bool {
        match self {
            PngColor::Luma => matches!(depth, 1 | 2 | 4 | 8 | 16),
            PngColor::Palette => matches!(depth, 1 | 2 | 4 | 8),
            PngColor::LumaA | PngColor::RGB | PngColor::RGBA => matches!(depth, 8 | 16),
            PngColor::Unknown => false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn colour_codes_round_trip() {
        for code in [0, 2, 3, 4, 6] {
            assert!(PngColor::from_int(code).is_some());
        }
        for code in [1, 5, 7, 255] {
            assert!(PngColor::from_int(code).is_none());
        }
    }

    #[test]
    fn depth_matrix() {
        assert!(PngColor::Luma.supports_depth(1));
        assert!(PngColor::Luma.supports_depth(16));
        assert!(PngColor::Palette.supports_depth(1));
        assert!(!PngColor::Palette.supports_depth(16));
        assert!(!PngColor::LumaA.supports_depth(4));
        assert!(PngColor::RGBA.supports_depth(16));
        assert!(!PngColor::RGB.supports_depth(2));
    }

    #[test]
    fn filter_codes() {
        assert_eq!(FilterType::from_int(0), Some(FilterType::None));
        assert_eq!(FilterType::from_int(4), Some(FilterType::Paeth));
        assert_eq!(FilterType::from_int(5), None);
    }
}
