#![no_main]
use cabala::decode_document;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|buf: &[u8]| {
    let _ = decode_document(buf);
});
