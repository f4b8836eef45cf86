#![no_main]
use libfuzzer_sys::fuzz_target;
use polyline_codec::{decode, decode_strict};

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    if text.is_empty() {
        return;
    }

    // Lenient decoding must never panic and never fail on non-empty input.
    let lenient: Vec<_> = decode(text).unwrap().collect();

    // Whatever strict accepts, lenient must agree with.
    if let Ok(strict) = decode_strict(text) {
        assert_eq!(strict, lenient);
    }
});
