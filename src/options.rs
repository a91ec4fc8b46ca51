/// Decoder configuration.
///
/// Defaults allow images up to 131072 pixels a side, verify every chunk
/// CRC and tolerate malformed ancillary chunks by skipping them.
#[derive(Copy, Clone, Debug)]
pub struct PngOptions {
    pub(crate) max_width:   usize,
    pub(crate) max_height:  usize,
    pub(crate) confirm_crc: bool,
    pub(crate) strict_mode: bool
}

impl Default for PngOptions {
    fn default() -> Self {
        Self {
            max_width:   1 << 17,
            max_height:  1 << 17,
            confirm_crc: true,
            strict_mode: false
        }
    }
}

impl PngOptions {
    pub fn set_max_width(mut self, width: usize) -> Self {
        self.max_width = width;
        self
    }

    pub fn set_max_height(mut self, height: usize) -> Self {
        self.max_height = height;
        self
    }

    /// Toggle chunk CRC and zlib Adler-32 verification.
    pub fn set_confirm_crc(mut self, yes: bool) -> Self {
        self.confirm_crc = yes;
        self
    }

    /// When set, malformed ancillary chunks abort the decode instead of
    /// being skipped.
    pub fn set_strict_mode(mut self, yes: bool) -> Self {
        self.strict_mode = yes;
        self
    }

    pub const fn max_width(&self) -> usize {
        self.max_width
    }

    pub const fn max_height(&self) -> usize {
        self.max_height
    }
}
