//! polyline-codec: encoded polyline coordinate encoding/decoding in Rust.
//!
//! The crate provides:
//! - The polyline codec itself (`polyline`)
//! - The `Coordinate` type and 1e-5 degree scaling (`coordinate`)
//! - Batch helpers over many independent polylines (`batch`)
//! - Coordinate text I/O helpers (`io`)
//! - An optional CLI (`cli` feature)
//!
//! # Quick Start
//!
//! ```
//! use polyline_codec::{Coordinate, decode, encode};
//!
//! let points = [Coordinate::new(38.5, -120.2), Coordinate::new(40.7, -120.95)];
//! let text = encode(&points);
//! assert_eq!(text, "_p~iF~ps|U_ulLnnqC");
//!
//! let decoded: Vec<Coordinate> = decode(&text).unwrap().collect();
//! assert_eq!(decoded.len(), 2);
//! ```

pub mod batch;
pub mod coordinate;
pub mod io;
pub mod polyline;

#[cfg(feature = "cli")]
pub mod cli;

pub use coordinate::Coordinate;
pub use polyline::{DecodeError, DecodeMode, decode, decode_strict, decode_with, encode};
