use log::{info, trace, warn};

use crate::constants::INCHES_PER_METER;
use crate::decoder::{PaletteEntry, PngChunk};
use crate::enums::{InterlaceMethod, PngColor};
use crate::error::PngError;
use crate::PngDecoder;

/// Latin-1 maps byte-for-byte onto the first 256 Unicode code points.
fn latin1_to_string(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}

impl<'a> PngDecoder<'a> {
    pub(crate) fn parse_ihdr(&mut self, chunk: PngChunk) -> Result<(), PngError> {
        if chunk.length != 13 {
            return Err(PngError::GenericStatic("Bad IHDR length, corrupt PNG"));
        }

        let pos_start = self.stream.get_position();

        self.info.width = self.stream.get_u32_be() as usize;
        self.info.height = self.stream.get_u32_be() as usize;

        if self.info.width == 0 || self.info.height == 0 {
            return Err(PngError::GenericStatic("Width or height cannot be zero"));
        }

        if self.info.width > self.options.max_width {
            return Err(PngError::DimensionsExceedLimit(
                self.info.width,
                self.options.max_width
            ));
        }

        if self.info.height > self.options.max_height {
            return Err(PngError::DimensionsExceedLimit(
                self.info.height,
                self.options.max_height
            ));
        }

        self.info.depth = self.stream.get_u8();

        let color = self.stream.get_u8();

        if let Some(img_color) = PngColor::from_int(color) {
            self.info.color = img_color;
        } else {
            return Err(PngError::UnsupportedColorType(color));
        }

        self.info.component = self.info.color.num_components();

        if !self.info.color.supports_depth(self.info.depth) {
            return Err(PngError::UnsupportedBitDepth(self.info.depth));
        }

        let compression = self.stream.get_u8();

        if compression != 0 {
            return Err(PngError::UnsupportedCompressionMethod(compression));
        }

        let filter_method = self.stream.get_u8();

        if filter_method != 0 {
            return Err(PngError::UnsupportedFilterMethod(filter_method));
        }

        let interlace = self.stream.get_u8();

        if let Some(method) = InterlaceMethod::from_int(interlace) {
            self.info.interlace_method = method;
        } else {
            return Err(PngError::UnsupportedInterlaceMethod(interlace));
        }

        let pos_end = self.stream.get_position();

        assert_eq!(pos_end - pos_start, 13); // we read all bytes

        // skip crc
        self.stream.skip(4);

        info!("Width: {}", self.info.width);
        info!("Height: {}", self.info.height);
        info!("Colour type: {:?}", self.info.color);
        info!("Depth: {:?}", self.info.depth);
        info!("Interlace: {:?}", self.info.interlace_method);

        Ok(())
    }

    pub(crate) fn parse_plte(&mut self, chunk: PngChunk) -> Result<(), PngError> {
        if self.seen_plte {
            return Err(PngError::GenericStatic("Multiple PLTE chunks, corrupt PNG"));
        }

        if chunk.length % 3 != 0 {
            return Err(PngError::GenericStatic("Invalid PLTE length, corrupt PNG"));
        }

        let entries = chunk.length / 3;

        if entries > 256 {
            return Err(PngError::GenericStatic(
                "PLTE with more than 256 entries, corrupt PNG"
            ));
        }

        self.palette.resize(256, PaletteEntry::default());

        for i in 0..entries {
            let red = self.stream.get_u8();
            let green = self.stream.get_u8();
            let blue = self.stream.get_u8();

            self.palette[i] = PaletteEntry {
                red,
                green,
                blue,
                alpha: 255
            };
        }

        self.metadata.palette_entries = Some(entries);
        self.seen_plte = true;

        // skip crc
        self.stream.skip(4);

        Ok(())
    }

    pub(crate) fn parse_trns(&mut self, chunk: PngChunk) -> Result<(), PngError> {
        match self.info.color {
            PngColor::Palette => {
                if !self.seen_plte {
                    return Err(PngError::GenericStatic("tRNS chunk before PLTE, corrupt PNG"));
                }
                if self.seen_trns {
                    return Err(PngError::GenericStatic("Multiple tRNS chunks, corrupt PNG"));
                }
                if chunk.length > 256 {
                    return Err(PngError::GenericStatic(
                        "tRNS chunk with too many entries, corrupt PNG"
                    ));
                }

                for i in 0..chunk.length {
                    self.palette[i].alpha = self.stream.get_u8();
                }

                self.seen_trns = true;
            }
            _ => {
                // colour-key transparency for non-indexed images is not
                // part of the pixel pipeline
                warn!("Ignoring tRNS chunk for colour type {:?}", self.info.color);
                self.stream.skip(chunk.length);
            }
        }

        // skip crc
        self.stream.skip(4);

        Ok(())
    }

    pub(crate) fn parse_phys(&mut self, chunk: PngChunk) -> Result<(), PngError> {
        if chunk.length != 9 {
            if self.options.strict_mode {
                return Err(PngError::Generic(format!(
                    "Invalid pHYs length {}",
                    chunk.length
                )));
            }
            warn!("Invalid pHYs chunk length {}, skipping", chunk.length);
            self.stream.skip(chunk.length + 4);

            return Ok(());
        }

        let ppm_x = self.stream.get_u32_be();
        let ppm_y = self.stream.get_u32_be();
        let unit = self.stream.get_u8();

        if unit == 1 {
            self.metadata.dpi_x = Some(f64::from(ppm_x) / INCHES_PER_METER);
            self.metadata.dpi_y = Some(f64::from(ppm_y) / INCHES_PER_METER);
        } else {
            // unit 0 only defines an aspect ratio
            trace!("pHYs chunk with unit {unit}, no absolute resolution");
        }

        // skip crc
        self.stream.skip(4);

        Ok(())
    }

    pub(crate) fn parse_text(&mut self, chunk: PngChunk) -> Result<(), PngError> {
        let payload = self.stream.get(chunk.length)?;

        match payload.iter().position(|&b| b == 0) {
            Some(split) if split > 0 => {
                let keyword = latin1_to_string(&payload[..split]);
                let value = latin1_to_string(&payload[split + 1..]);

                self.metadata.text.push((keyword, value));
            }
            _ => {
                if self.options.strict_mode {
                    return Err(PngError::GenericStatic(
                        "tEXt chunk without a keyword separator"
                    ));
                }
                warn!("Malformed tEXt chunk, skipping");
            }
        }

        // skip crc
        self.stream.skip(4);

        Ok(())
    }

    pub(crate) fn parse_idat(&mut self, chunk: PngChunk) -> Result<(), PngError> {
        // collect the payload, the whole concatenation goes to the
        // inflater once IEND is reached
        let idat_stream = self.stream.get(chunk.length)?;

        self.idat_chunks.extend_from_slice(idat_stream);

        // skip crc
        self.stream.skip(4);

        Ok(())
    }
}
