use log::trace;
use zune_core::bytestream::ZByteReader;
use zune_inflate::DeflateOptions;

use crate::adam7;
use crate::constants::PNG_SIGNATURE_SIZE;
use crate::crc::Crc32;
use crate::enums::{FilterType, InterlaceMethod, PngChunkType, PngColor};
use crate::error::PngError;
use crate::filters;
use crate::options::PngOptions;
use crate::unpack;

/// A single palette entry. Alpha comes from tRNS when present.
#[derive(Copy, Clone)]
pub(crate) struct PaletteEntry {
    pub red:   u8,
    pub green: u8,
    pub blue:  u8,
    pub alpha: u8
}

impl Default for PaletteEntry {
    fn default() -> Self {
        // a tRNS chunk may carry fewer values than there are palette
        // entries, the remaining entries are fully opaque
        PaletteEntry {
            red:   0,
            green: 0,
            blue:  0,
            alpha: 255
        }
    }
}

#[derive(Copy, Clone)]
pub(crate) struct PngChunk {
    pub length:     usize,
    pub chunk_type: PngChunkType,
    pub chunk:      [u8; 4],
    #[allow(dead_code)]
    pub crc:        u32
}

/// Validated IHDR contents plus derived quantities.
#[derive(Default, Debug, Copy, Clone)]
pub struct PngInfo {
    pub width:            usize,
    pub height:           usize,
    pub depth:            u8,
    pub color:            PngColor,
    pub component:        u8,
    pub interlace_method: InterlaceMethod
}

/// Image properties carried by ancillary chunks.
#[derive(Clone, Debug, Default)]
pub struct Metadata {
    /// Horizontal resolution, from a pHYs chunk with the meter unit.
    pub dpi_x:           Option<f64>,
    /// Vertical resolution, from a pHYs chunk with the meter unit.
    pub dpi_y:           Option<f64>,
    /// (keyword, value) pairs from tEXt chunks, in stream order.
    pub text:            Vec<(String, String)>,
    /// Number of PLTE entries the stream declared.
    pub palette_entries: Option<usize>
}

/// A fully decoded image, `width * height` RGBA samples in row-major
/// order.
#[derive(Debug)]
pub struct Image {
    pub width:    usize,
    pub height:   usize,
    pub pixels:   Vec<u8>,
    pub metadata: Metadata
}

/// Position of the decoder within the chunk stream.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum DecodeStage {
    ExpectSignature,
    ExpectHeader,
    InMetadata,
    InData,
    AfterEnd
}

pub struct PngDecoder<'a> {
    pub(crate) stream:      ZByteReader<'a>,
    pub(crate) options:     PngOptions,
    stage:                  DecodeStage,
    pub(crate) info:        PngInfo,
    pub(crate) palette:     Vec<PaletteEntry>,
    pub(crate) seen_plte:   bool,
    pub(crate) seen_trns:   bool,
    seen_idat:              bool,
    pub(crate) idat_chunks: Vec<u8>,
    pub(crate) metadata:    Metadata
}

impl<'a> PngDecoder<'a> {
    pub fn new(data: &'a [u8]) -> PngDecoder<'a> {
        PngDecoder::new_with_options(data, PngOptions::default())
    }

    pub fn new_with_options(data: &'a [u8], options: PngOptions) -> PngDecoder<'a> {
        PngDecoder {
            stream: ZByteReader::new(data),
            options,
            stage: DecodeStage::ExpectSignature,
            info: PngInfo::default(),
            palette: Vec::new(),
            seen_plte: false,
            seen_trns: false,
            seen_idat: false,
            idat_chunks: Vec::new(),
            metadata: Metadata::default()
        }
    }

    fn header_parsed(&self) -> bool {
        !matches!(
            self.stage,
            DecodeStage::ExpectSignature | DecodeStage::ExpectHeader
        )
    }

    pub fn dimensions(&self) -> Option<(usize, usize)> {
        if !self.header_parsed() {
            return None;
        }
        Some((self.info.width, self.info.height))
    }

    pub fn depth(&self) -> Option<u8> {
        if !self.header_parsed() {
            return None;
        }
        Some(self.info.depth)
    }

    pub fn color(&self) -> Option<PngColor> {
        if !self.header_parsed() {
            return None;
        }
        Some(self.info.color)
    }

    pub fn info(&self) -> Option<&PngInfo> {
        if !self.header_parsed() {
            return None;
        }
        Some(&self.info)
    }

    /// Read one `length | type | payload | crc` record, leaving the
    /// cursor at the payload start, and confirm the stored CRC against
    /// the type and payload bytes.
    fn read_chunk_header(&mut self) -> Result<PngChunk, PngError> {
        let chunk_length = self.stream.get_u32_be() as usize;
        let chunk_type_int = self.stream.get_u32_be().to_be_bytes();

        let chunk_type = PngChunkType::from_bytes(chunk_type_int);

        if !self.stream.has(chunk_length + 4 /* crc bytes */) {
            return Err(PngError::TruncatedStream);
        }

        let mut crc_bytes = [0; 4];
        let crc_ref = self.stream.peek_at(chunk_length, 4)?;

        crc_bytes.copy_from_slice(crc_ref);

        let crc = u32::from_be_bytes(crc_bytes);

        if self.options.confirm_crc {
            // step back so the type bytes are covered as well
            self.stream.rewind(4);

            let bytes = self.stream.peek_at(0, chunk_length + 4)?;

            let mut accumulator = Crc32::new();
            accumulator.update(bytes);

            let computed = accumulator.value();

            self.stream.skip(4);

            if crc != computed {
                return Err(PngError::CrcMismatch(crc, computed));
            }
        }

        Ok(PngChunk {
            length: chunk_length,
            chunk_type,
            chunk: chunk_type_int,
            crc
        })
    }

    /// Decode the stream into an RGBA raster plus metadata.
    ///
    /// This is the single decode entry point, driving signature skip,
    /// chunk parsing, inflation and the scanline pipeline in one call.
    pub fn decode(&mut self) -> Result<Image, PngError> {
        if !self.stream.has(PNG_SIGNATURE_SIZE) {
            return Err(PngError::TruncatedStream);
        }
        // signature contents are deliberately not inspected
        self.stream.skip(PNG_SIGNATURE_SIZE);
        self.stage = DecodeStage::ExpectHeader;

        loop {
            if self.stage == DecodeStage::AfterEnd {
                break;
            }

            if !self.stream.has(8) {
                // a clean end at a chunk boundary is a missing IEND,
                // anything part-way through a chunk is truncation
                return Err(if self.stream.has(1) {
                    PngError::TruncatedStream
                } else {
                    PngError::MissingIend
                });
            }

            let header = self.read_chunk_header()?;

            if self.stage == DecodeStage::ExpectHeader
                && header.chunk_type != PngChunkType::IHDR
            {
                return Err(PngError::GenericStatic("First chunk not IHDR, corrupt PNG"));
            }

            match header.chunk_type {
                PngChunkType::IHDR => {
                    if self.stage != DecodeStage::ExpectHeader {
                        return Err(PngError::GenericStatic("Multiple IHDR chunks, corrupt PNG"));
                    }
                    self.parse_ihdr(header)?;
                    self.stage = DecodeStage::InMetadata;
                }
                PngChunkType::PLTE => {
                    if self.seen_idat {
                        return Err(PngError::GenericStatic(
                            "PLTE chunk after the first IDAT, corrupt PNG"
                        ));
                    }
                    self.parse_plte(header)?;
                }
                PngChunkType::tRNS => {
                    if self.seen_idat {
                        return Err(PngError::GenericStatic(
                            "tRNS chunk after the first IDAT, corrupt PNG"
                        ));
                    }
                    self.parse_trns(header)?;
                }
                PngChunkType::pHYs => self.parse_phys(header)?,
                PngChunkType::tEXt => self.parse_text(header)?,
                PngChunkType::IDAT => {
                    if self.seen_idat && self.stage != DecodeStage::InData {
                        return Err(PngError::GenericStatic(
                            "IDAT chunks are not contiguous, corrupt PNG"
                        ));
                    }
                    if self.info.color == PngColor::Palette && !self.seen_plte {
                        return Err(PngError::MissingPlte);
                    }
                    self.parse_idat(header)?;
                    self.seen_idat = true;
                    self.stage = DecodeStage::InData;
                }
                PngChunkType::IEND => {
                    self.stream.skip(header.length + 4);
                    self.stage = DecodeStage::AfterEnd;
                }
                PngChunkType::unkn => self.handle_unknown(header)?
            }

            // a non-IDAT chunk ends the IDAT run, later metadata is still
            // accepted but further IDAT chunks are not
            if header.chunk_type != PngChunkType::IDAT && self.stage == DecodeStage::InData {
                self.stage = DecodeStage::InMetadata;
            }
        }

        if self.stream.has(1) {
            return Err(PngError::TrailingData);
        }

        if self.idat_chunks.is_empty() {
            return Err(PngError::GenericStatic("No IDAT chunks present, corrupt PNG"));
        }

        let deflate_data = self.inflate()?;
        // done with the compressed stream, release it
        self.idat_chunks = Vec::new();

        let info = self.info;

        if deflate_data.len() < self.filtered_stream_len() {
            return Err(PngError::TruncatedStream);
        }

        let mut out = vec![0_u8; info.width * info.height * 4];

        match info.interlace_method {
            InterlaceMethod::Standard => {
                self.decode_pass(&deflate_data, info.width, info.height, (0, 0), (1, 1), &mut out)?;
            }
            InterlaceMethod::Adam7 => {
                let mut offset = 0;

                for pass in 0..7 {
                    let (pass_width, pass_height) =
                        adam7::pass_dimensions(pass, info.width, info.height);

                    if pass_width == 0 || pass_height == 0 {
                        continue;
                    }

                    offset += self.decode_pass(
                        &deflate_data[offset..],
                        pass_width,
                        pass_height,
                        (adam7::START_COL[pass], adam7::START_ROW[pass]),
                        (adam7::COL_STEP[pass], adam7::ROW_STEP[pass]),
                        &mut out
                    )?;
                }
            }
            InterlaceMethod::Unknown => unreachable!()
        }

        Ok(Image {
            width:    info.width,
            height:   info.height,
            pixels:   out,
            metadata: std::mem::take(&mut self.metadata)
        })
    }

    /// Defilter and unpack one image or sub-image.
    ///
    /// `origin` and `step` place each produced sample in the final
    /// raster, `(0, 0)` and `(1, 1)` for a non-interlaced image, the
    /// pass geometry for Adam7. Returns the number of filtered bytes
    /// consumed.
    fn decode_pass(
        &self, data: &[u8], pass_width: usize, pass_height: usize, origin: (usize, usize),
        step: (usize, usize), out: &mut [u8]
    ) -> Result<usize, PngError> {
        let info = &self.info;

        let scanline_bytes =
            (pass_width * usize::from(info.component) * usize::from(info.depth) + 7) / 8;
        let bpp = ((usize::from(info.component) * usize::from(info.depth) + 7) / 8).max(1);
        let row_len = scanline_bytes + 1;

        if data.len() < row_len * pass_height {
            return Err(PngError::TruncatedStream);
        }

        let mut current = vec![0_u8; scanline_bytes];
        let mut previous = vec![0_u8; scanline_bytes];

        for j in 0..pass_height {
            let in_row = &data[j * row_len..(j + 1) * row_len];

            let filter = FilterType::from_int(in_row[0])
                .ok_or(PngError::UnknownFilter(in_row[0]))?;

            current.copy_from_slice(&in_row[1..]);
            filters::defilter_scanline(filter, &mut current, &previous, bpp);

            let raster_row = origin.1 + j * step.1;
            let base = (raster_row * info.width + origin.0) * 4;

            unpack::unpack_scanline(
                &current,
                pass_width,
                info.depth,
                info.color,
                &self.palette,
                out,
                base,
                step.0 * 4
            );

            std::mem::swap(&mut current, &mut previous);
        }

        Ok(row_len * pass_height)
    }

    /// Length the inflated stream must have: every scanline of every
    /// (sub-)image plus its filter-type byte.
    fn filtered_stream_len(&self) -> usize {
        let info = &self.info;
        let row_bytes =
            |w: usize| (w * usize::from(info.component) * usize::from(info.depth) + 7) / 8 + 1;

        match info.interlace_method {
            InterlaceMethod::Standard => info.height * row_bytes(info.width),
            InterlaceMethod::Adam7 => (0..7)
                .map(|pass| {
                    let (w, h) = adam7::pass_dimensions(pass, info.width, info.height);
                    if w == 0 || h == 0 {
                        0
                    } else {
                        h * row_bytes(w)
                    }
                })
                .sum(),
            InterlaceMethod::Unknown => 0
        }
    }

    /// Run the accumulated IDAT payloads through the zlib inflater.
    fn inflate(&mut self) -> Result<Vec<u8>, PngError> {
        // deflate does not store its uncompressed size, hand the decoder
        // the exact filtered stream length so it allocates once
        let size_hint = self.filtered_stream_len();

        let options = DeflateOptions::default()
            .set_size_hint(size_hint)
            .set_confirm_checksum(self.options.confirm_crc);

        let mut decoder = zune_inflate::DeflateDecoder::new_with_options(&self.idat_chunks, options);

        decoder.decode_zlib().map_err(PngError::Inflate)
    }

    fn handle_unknown(&mut self, chunk: PngChunk) -> Result<(), PngError> {
        if chunk.chunk[0] & (1 << 5) == 0 {
            return Err(PngError::UnsupportedCriticalChunk(chunk.chunk));
        }

        let chunk_name = std::str::from_utf8(&chunk.chunk).unwrap_or("XXXX");

        trace!(
            "Skipping unknown ancillary chunk {:?}, length {}",
            chunk_name,
            chunk.length
        );

        self.stream.skip(chunk.length + 4);

        Ok(())
    }
}
