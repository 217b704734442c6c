//! Tiled anti-diagonal wavefront Levenshtein distance.
//!
//! This crate computes the exact Levenshtein (edit) distance between two
//! sequences of equality-comparable symbols, optimized for long inputs on
//! shared-memory multicore hardware.
//!
//! ## Core idea
//! 1. Partition the classic O(H·W) DP table into fixed B×B tiles; a tile
//!    depends only on carry vectors along its top and left edges.
//! 2. Tiles on one anti-diagonal wavefront level share no cells, so each
//!    level runs as a data-parallel loop with per-worker scratch reuse.
//! 3. A monotone upper bound W* on the final distance lets whole tiles be
//!    skipped when no path through them can beat it, without giving up
//!    exactness.
//!
//! Both sequence lengths must be positive multiples of the tile size;
//! hosts pad with [`utils::padded_length`] or fall back to a plain row DP
//! for unaligned inputs.
//!
//! ## Quick start
//! ```
//! use levwave::WavefrontEngine;
//!
//! let mut engine = WavefrontEngine::<4>::new();
//! engine.init(4, 8)?;
//! let distance = engine.compute(b"GATT", b"GATTACCA")?;
//! assert_eq!(distance, 4);
//! # Ok::<(), levwave::EngineError>(())
//! ```
//!
//! ## Features
//! - `parallel` (default): dispatch each wavefront level across a rayon
//!   pool. Results are bit-identical to the serial build.
//! - `tracing`: structured spans around computes and levels.
//! - `heavy`: opt-in large-input stress tests.

pub mod builder;
pub mod carry;
pub mod engine;
pub mod error;
mod kernel;
mod pruning;
pub mod utils;

pub use crate::builder::WavefrontBuilder;
pub use crate::engine::{WavefrontEngine, TILE_SIZE};
pub use crate::error::{EngineError, EngineResult};
