#![no_main]
use cabala::{DecodeOptions, decode};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|buf: &[u8]| {
    let _ = decode(buf, &DecodeOptions::new());
    let _ = decode(buf, &DecodeOptions::new().map_documents(true));
});
