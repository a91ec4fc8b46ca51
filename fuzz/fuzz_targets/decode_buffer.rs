#![no_main]

use libfuzzer_sys::fuzz_target;

use sable_png::{PngDecoder, PngOptions};

fuzz_target!(|data: &[u8]| {
    let options = PngOptions::default()
        .set_confirm_crc(false)
        .set_max_width(1 << 12)
        .set_max_height(1 << 12);

    let _ = PngDecoder::new_with_options(data, options).decode();
});
