//! A PNG image decoder.
//!
//! Consumes a PNG byte stream and produces a row-major raster of 8-bit RGBA
//! samples, together with the image metadata carried by the ancillary
//! chunks the decoder understands (pHYs resolution, tEXt properties).
//!
//! # Using
//!
//! ```no_run
//! use sable_png::PngDecoder;
//!
//! let data = std::fs::read("image.png").unwrap();
//!
//! let image = PngDecoder::new(&data).decode().unwrap();
//! // image.pixels holds width * height RGBA samples
//! ```
pub use decoder::{Image, Metadata, PngDecoder, PngInfo};
pub use enums::{InterlaceMethod, PngColor};
pub use error::PngError;
pub use options::PngOptions;

mod adam7;
mod constants;
mod crc;
mod decoder;
mod enums;
pub mod error;
mod filters;
mod headers;
mod options;
mod unpack;
