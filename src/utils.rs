//! Assorted helpers for hosts feeding the engine.
//!
//! The engine only accepts lengths that are positive multiples of the tile
//! size; these helpers let callers pad their inputs up front.

/// Round `len` up to the next multiple of `tile`.
///
/// Returns 0 for an empty input; the engine rejects zero lengths, so empty
/// sequences stay the host's degenerate case.
///
/// # Panics
/// Panics if `tile == 0`.
#[inline]
pub fn padded_length(len: usize, tile: usize) -> usize {
    assert!(tile > 0, "tile size must be positive");
    len.div_ceil(tile) * tile
}

/// True when `len` is a positive multiple of `tile`, i.e. acceptable to
/// the engine as-is.
#[inline]
pub fn is_tile_aligned(len: usize, tile: usize) -> bool {
    tile > 0 && len > 0 && len % tile == 0
}
