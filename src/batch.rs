// Batch helpers over many independent polylines.
//
// Each polyline is encoded or decoded on its own, so the work splits
// cleanly. With the `parallel` feature the batch runs on the rayon pool;
// without it the same functions run sequentially. Output order always
// matches input order.

use crate::coordinate::Coordinate;
use crate::polyline::decoder::{self, DecodeError, DecodeMode};
use crate::polyline::encoder;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Encode every coordinate sequence in `tracks`.
pub fn encode_batch<T>(tracks: &[T]) -> Vec<String>
where
    T: AsRef<[Coordinate]> + Sync,
{
    #[cfg(feature = "parallel")]
    let encoded = tracks
        .par_iter()
        .map(|t| encoder::encode(t.as_ref()))
        .collect();

    #[cfg(not(feature = "parallel"))]
    let encoded = tracks.iter().map(|t| encoder::encode(t.as_ref())).collect();

    encoded
}

/// Decode every polyline in `texts` with the given policy.
///
/// One failing entry does not affect the others.
pub fn decode_batch<S>(texts: &[S], mode: DecodeMode) -> Vec<Result<Vec<Coordinate>, DecodeError>>
where
    S: AsRef<str> + Sync,
{
    #[cfg(feature = "parallel")]
    let decoded = texts
        .par_iter()
        .map(|t| decoder::decode_with(t.as_ref(), mode))
        .collect();

    #[cfg(not(feature = "parallel"))]
    let decoded = texts
        .iter()
        .map(|t| decoder::decode_with(t.as_ref(), mode))
        .collect();

    log::trace!("decoded batch of {} polylines", texts.len());
    decoded
}
