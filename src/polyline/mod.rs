// Encoded polyline format implementation.
//
// # Modules
//
// - `varint`  — Zig-zag + variable-length integer encoding (base-32, offset 63)
// - `encoder` — Delta encoding of coordinate sequences
// - `decoder` — Lazy lenient decoding and the opt-in strict variant

pub mod decoder;
pub mod encoder;
pub mod varint;

// Re-export key types for convenience.
pub use decoder::{
    DecodeError, DecodeMode, Decoder, StrictDecoder, decode, decode_strict, decode_with,
};
pub use encoder::{Encoder, encode};
pub use varint::VarIntError;
