//! Shared helpers hand-assembling PNG byte streams for the decoder
//! tests: chunk framing with real CRCs, a stored-block zlib wrapper,
//! forward filtering and Adam7 splitting, so every test controls the
//! exact bytes on the wire.
#![allow(dead_code)]

pub const SIGNATURE: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

const START_COL: [usize; 7] = [0, 4, 0, 2, 0, 1, 0];
const START_ROW: [usize; 7] = [0, 0, 4, 0, 2, 0, 1];
const COL_STEP: [usize; 7] = [8, 8, 4, 4, 2, 2, 1];
const ROW_STEP: [usize; 7] = [8, 8, 8, 4, 4, 2, 2];

pub fn crc32(data: &[u8]) -> u32 {
    let mut crc = u32::MAX;

    for &byte in data {
        crc ^= u32::from(byte);
        for _ in 0..8 {
            crc = if crc & 1 != 0 {
                (crc >> 1) ^ 0xEDB8_8320
            } else {
                crc >> 1
            };
        }
    }
    !crc
}

pub fn adler32(data: &[u8]) -> u32 {
    let mut a: u32 = 1;
    let mut b: u32 = 0;

    for &byte in data {
        a = (a + u32::from(byte)) % 65521;
        b = (b + a) % 65521;
    }
    (b << 16) | a
}

/// Frame a payload as `length | type | payload | crc`.
pub fn chunk(kind: &[u8; 4], payload: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(payload.len() + 12);

    out.extend_from_slice(&(payload.len() as u32).to_be_bytes());
    out.extend_from_slice(kind);
    out.extend_from_slice(payload);

    let mut covered = kind.to_vec();
    covered.extend_from_slice(payload);
    out.extend_from_slice(&crc32(&covered).to_be_bytes());

    out
}

pub fn ihdr(width: u32, height: u32, depth: u8, color: u8, interlace: u8) -> Vec<u8> {
    let mut payload = Vec::with_capacity(13);

    payload.extend_from_slice(&width.to_be_bytes());
    payload.extend_from_slice(&height.to_be_bytes());
    payload.extend_from_slice(&[depth, color, 0, 0, interlace]);

    chunk(b"IHDR", &payload)
}

pub fn plte(colors: &[[u8; 3]]) -> Vec<u8> {
    let payload: Vec<u8> = colors.iter().flatten().copied().collect();

    chunk(b"PLTE", &payload)
}

pub fn trns(alpha: &[u8]) -> Vec<u8> {
    chunk(b"tRNS", alpha)
}

pub fn text(keyword: &str, value: &str) -> Vec<u8> {
    let mut payload = keyword.as_bytes().to_vec();
    payload.push(0);
    payload.extend_from_slice(value.as_bytes());

    chunk(b"tEXt", &payload)
}

pub fn phys(ppm_x: u32, ppm_y: u32, unit: u8) -> Vec<u8> {
    let mut payload = Vec::with_capacity(9);

    payload.extend_from_slice(&ppm_x.to_be_bytes());
    payload.extend_from_slice(&ppm_y.to_be_bytes());
    payload.push(unit);

    chunk(b"pHYs", &payload)
}

/// Wrap raw bytes into a zlib stream of stored deflate blocks.
pub fn zlib_stored(raw: &[u8]) -> Vec<u8> {
    // 0x7801 passes the FCHECK divisibility rule
    let mut out = vec![0x78, 0x01];

    if raw.is_empty() {
        out.extend_from_slice(&[0x01, 0x00, 0x00, 0xFF, 0xFF]);
    } else {
        let mut blocks = raw.chunks(0xFFFF).peekable();

        while let Some(block) = blocks.next() {
            out.push(u8::from(blocks.peek().is_none()));
            out.extend_from_slice(&(block.len() as u16).to_le_bytes());
            out.extend_from_slice(&(!(block.len() as u16)).to_le_bytes());
            out.extend_from_slice(block);
        }
    }
    out.extend_from_slice(&adler32(raw).to_be_bytes());

    out
}

/// A single IDAT holding the whole filtered stream.
pub fn idat(filtered: &[u8]) -> Vec<u8> {
    chunk(b"IDAT", &zlib_stored(filtered))
}

pub fn iend() -> Vec<u8> {
    chunk(b"IEND", &[])
}

pub fn build(parts: &[Vec<u8>]) -> Vec<u8> {
    let mut out = SIGNATURE.to_vec();

    for part in parts {
        out.extend_from_slice(part);
    }
    out
}

/// Prefix every scanline with the None filter tag.
pub fn filter_none(rows: &[Vec<u8>]) -> Vec<u8> {
    let mut out = Vec::new();

    for row in rows {
        out.push(0);
        out.extend_from_slice(row);
    }
    out
}

/// Forward-filter raster rows with one fixed filter type, producing the
/// stream the defilter engine has to invert.
pub fn apply_filter(filter: u8, bpp: usize, rows: &[Vec<u8>]) -> Vec<u8> {
    let mut out = Vec::new();
    let mut prev: Vec<u8> = vec![0; rows[0].len()];

    for row in rows {
        out.push(filter);

        for i in 0..row.len() {
            let x = i16::from(row[i]);
            let a = if i >= bpp { i16::from(row[i - bpp]) } else { 0 };
            let b = i16::from(prev[i]);
            let c = if i >= bpp { i16::from(prev[i - bpp]) } else { 0 };

            let predicted = match filter {
                0 => 0,
                1 => a,
                2 => b,
                3 => (a + b) / 2,
                4 => paeth(a, b, c),
                _ => unreachable!()
            };

            out.push(((x - predicted) & 0xFF) as u8);
        }
        prev = row.clone();
    }
    out
}

fn paeth(a: i16, b: i16, c: i16) -> i16 {
    let p = a + b - c;
    let pa = (p - a).abs();
    let pb = (p - b).abs();
    let pc = (p - c).abs();

    if pa <= pb && pa <= pc {
        a
    } else if pb <= pc {
        b
    } else {
        c
    }
}

/// Split a raster of byte-aligned pixels into the seven Adam7 passes,
/// every sub-image scanline tagged with the None filter.
pub fn interlace(pixels: &[u8], width: usize, height: usize, bytes_per_pixel: usize) -> Vec<u8> {
    let mut out = Vec::new();

    for pass in 0..7 {
        let sub_w = (width.saturating_sub(START_COL[pass]) + COL_STEP[pass] - 1) / COL_STEP[pass];
        let sub_h = (height.saturating_sub(START_ROW[pass]) + ROW_STEP[pass] - 1) / ROW_STEP[pass];

        if sub_w == 0 || sub_h == 0 {
            continue;
        }

        for j in 0..sub_h {
            out.push(0);

            for k in 0..sub_w {
                let x = START_COL[pass] + k * COL_STEP[pass];
                let y = START_ROW[pass] + j * ROW_STEP[pass];
                let start = (y * width + x) * bytes_per_pixel;

                out.extend_from_slice(&pixels[start..start + bytes_per_pixel]);
            }
        }
    }
    out
}

pub fn decode(data: &[u8]) -> sable_png::Image {
    sable_png::PngDecoder::new(data).decode().unwrap()
}
