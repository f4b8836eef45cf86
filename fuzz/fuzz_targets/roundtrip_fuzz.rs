#![no_main]
use libfuzzer_sys::fuzz_target;
use polyline_codec::{Coordinate, decode_strict, encode};

fuzz_target!(|data: &[u8]| {
    // Interpret the input as pairs of i32 fixed-point units.
    let points: Vec<Coordinate> = data
        .chunks_exact(8)
        .map(|c| {
            let lat = i32::from_le_bytes([c[0], c[1], c[2], c[3]]);
            let lng = i32::from_le_bytes([c[4], c[5], c[6], c[7]]);
            Coordinate::from_scaled(i64::from(lat), i64::from(lng))
        })
        .collect();

    let encoded = encode(&points);
    assert!(encoded.bytes().all(|b| (63..=126).contains(&b)));
    if points.is_empty() {
        assert!(encoded.is_empty());
        return;
    }

    let decoded = decode_strict(&encoded).unwrap();
    assert_eq!(decoded.len(), points.len());
    for (a, b) in decoded.iter().zip(&points) {
        assert_eq!(a.scaled(), b.scaled());
    }
});
