//! Engine facade and the anti-diagonal wavefront scheduler.
//!
//! The virtual H×W DP matrix is partitioned into B×B tiles. Tiles on one
//! anti-diagonal level share no cells, so each level is dispatched as a
//! data-parallel loop; levels themselves run in sequence, separated by the
//! carry-store promote. A monotone upper bound W* on the final distance,
//! refreshed from the per-tile completion bounds after every level, feeds
//! the pruning oracle for the next one.
//!
//! Pruning retracts the active column range from either border. The
//! retraction is tracked with the `infinity_columns` / `infinity_rows`
//! counters and a pair of single-level latches; carries of skipped tiles
//! are masked with the infinity sentinel so downstream tiles ignore them.

use crate::carry::{self, CarryRecord, CarryStore, Score, INFINITY};
use crate::error::{EngineError, EngineResult};
use crate::kernel::compute_tile;
use crate::pruning::tile_prunable;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Production tile width/height in symbols.
pub const TILE_SIZE: usize = 64;

/// Geometry fixed by `init`. `height` is the shorter of the two declared
/// lengths; the distance is invariant under the internal swap.
#[derive(Debug, Clone, Copy)]
struct Layout {
    height: usize,
    width: usize,
    tiles_down: usize,
    tiles_across: usize,
    levels: usize,
    swapped: bool,
    same_length: bool,
}

struct EngineState {
    layout: Layout,
    store: CarryStore,
}

/// Tiled wavefront Levenshtein engine.
///
/// The const parameter `B` is the tile size; both sequence lengths must be
/// positive multiples of it. The default is [`TILE_SIZE`].
///
/// ```
/// use levwave::WavefrontEngine;
///
/// let mut engine = WavefrontEngine::<4>::new();
/// engine.init(4, 8)?;
/// assert_eq!(engine.compute(b"GATT", b"GATTACCA")?, 4);
/// # Ok::<(), levwave::EngineError>(())
/// ```
pub struct WavefrontEngine<const B: usize = TILE_SIZE> {
    state: Option<EngineState>,
    pruning: bool,
}

/// Per-level summary handed back by the tile dispatch: the minimum of the
/// completion bounds and the prune flag of every active column.
struct LevelOutcome {
    minimum: Score,
    pruned: Vec<bool>,
}

impl<const B: usize> WavefrontEngine<B> {
    /// Create an engine with pruning enabled. `init` must be called before
    /// `compute`.
    pub fn new() -> Self {
        Self::with_pruning(true)
    }

    pub(crate) fn with_pruning(pruning: bool) -> Self {
        assert!(B > 0, "tile size must be positive");
        Self {
            state: None,
            pruning,
        }
    }

    /// The tile size `B`, exposed so hosts can pad their inputs.
    pub const fn tile_size() -> usize {
        B
    }

    /// Record the input geometry and allocate the carry buffers.
    ///
    /// Internally reorders so the tile rows follow the shorter sequence;
    /// the reported distance is invariant under this swap. Fails with
    /// [`EngineError::BadShape`] unless both lengths are positive
    /// multiples of the tile size.
    pub fn init(&mut self, len1: usize, len2: usize) -> EngineResult<()> {
        let (height, width, swapped) = if len2 < len1 {
            (len2, len1, true)
        } else {
            (len1, len2, false)
        };
        if height == 0 || height % B != 0 || width % B != 0 {
            return Err(EngineError::BadShape { len1, len2, tile: B });
        }

        let tiles_down = height / B;
        let tiles_across = width / B;
        let layout = Layout {
            height,
            width,
            tiles_down,
            tiles_across,
            levels: tiles_down + tiles_across - 1,
            swapped,
            same_length: height == width,
        };
        let mut store = CarryStore::new(tiles_across + 1, B);
        store.seed();
        self.state = Some(EngineState { layout, store });
        Ok(())
    }

    /// Validate a `compute` call against the initialized geometry and
    /// re-seed the store so repeated computes start from the base case.
    fn prepare(&mut self, len1: usize, len2: usize) -> EngineResult<Layout> {
        let state = self.state.as_mut().ok_or(EngineError::NotInitialized)?;
        let layout = state.layout;
        let matches = (len1 == layout.height && len2 == layout.width)
            || (len2 == layout.height && len1 == layout.width);
        if !matches {
            return Err(EngineError::LengthMismatch {
                got1: len1,
                got2: len2,
                expected_shorter: layout.height,
                expected_longer: layout.width,
            });
        }
        state.store.seed();
        Ok(layout)
    }
}

impl<const B: usize> Default for WavefrontEngine<B> {
    fn default() -> Self {
        Self::new()
    }
}

/// Bind the shorter sequence to the tile rows. With equal lengths the
/// order recorded at init wins (the distance is symmetric either way).
fn bind_inputs<'a, S>(layout: &Layout, seq1: &'a [S], seq2: &'a [S]) -> (&'a [S], &'a [S]) {
    if layout.same_length {
        if layout.swapped {
            (seq2, seq1)
        } else {
            (seq1, seq2)
        }
    } else if seq1.len() == layout.height {
        (seq1, seq2)
    } else {
        (seq2, seq1)
    }
}

/// Run one tile: consult the oracle, then either mask the neighbor carries
/// or run the kernel and move its edges into the new buffer.
///
/// `bottom` and `right` are the tile's slots in the new buffer; `first`
/// and `last` flag the borders of the level's active range, where masking
/// is asymmetric because the retracted side has no live neighbor.
#[allow(clippy::too_many_arguments)]
fn run_tile<S: Eq>(
    carry: &mut CarryRecord,
    scratch: &mut CarryRecord,
    bottom: &mut Vec<Score>,
    right: &mut Vec<Score>,
    down: &[S],
    left: &[S],
    y: usize,
    x: usize,
    layout: &Layout,
    first: bool,
    last: bool,
    budget: Score,
    pruning: bool,
    tile: usize,
) -> (bool, Score) {
    if pruning
        && tile_prunable(
            carry,
            y,
            x,
            layout.height,
            layout.width,
            layout.same_length,
            budget,
        )
    {
        if first {
            carry::write_infinity(right);
        }
        if last {
            carry::write_infinity(bottom);
        } else {
            carry::write_infinity(bottom);
            carry::write_infinity(right);
        }
        (true, INFINITY)
    } else {
        let bound = compute_tile(
            carry,
            scratch,
            down,
            left,
            y,
            x,
            layout.height,
            layout.width,
            tile,
        );
        std::mem::swap(bottom, &mut scratch.horizontal);
        std::mem::swap(right, &mut scratch.vertical);
        (false, bound)
    }
}

fn fold_outcomes(results: Vec<(bool, Score)>) -> LevelOutcome {
    let minimum = results
        .iter()
        .map(|&(_, bound)| bound)
        .min()
        .unwrap_or(INFINITY);
    LevelOutcome {
        minimum,
        pruned: results.into_iter().map(|(pruned, _)| pruned).collect(),
    }
}

#[cfg(feature = "parallel")]
#[allow(clippy::too_many_arguments)]
fn dispatch_level<S: Eq + Sync>(
    store: &mut CarryStore,
    down: &[S],
    left: &[S],
    layout: &Layout,
    level: usize,
    lo: usize,
    hi: usize,
    budget: Score,
    pruning: bool,
    tile: usize,
) -> LevelOutcome {
    let (old, bottoms, rights) = store.level_lanes(lo, hi);
    let results: Vec<(bool, Score)> = old
        .par_iter_mut()
        .zip(bottoms.par_iter_mut())
        .zip(rights.par_iter_mut())
        .enumerate()
        .map_init(
            || CarryRecord::new(tile),
            |scratch, (offset, ((carry, bottom), right))| {
                let column = lo + offset;
                let row = level - 1 - column;
                run_tile(
                    carry,
                    scratch,
                    bottom,
                    right,
                    down,
                    left,
                    row * tile,
                    column * tile,
                    layout,
                    column == lo,
                    column + 1 == hi,
                    budget,
                    pruning,
                    tile,
                )
            },
        )
        .collect();
    fold_outcomes(results)
}

#[cfg(not(feature = "parallel"))]
#[allow(clippy::too_many_arguments)]
fn dispatch_level<S: Eq>(
    store: &mut CarryStore,
    down: &[S],
    left: &[S],
    layout: &Layout,
    level: usize,
    lo: usize,
    hi: usize,
    budget: Score,
    pruning: bool,
    tile: usize,
) -> LevelOutcome {
    let (old, bottoms, rights) = store.level_lanes(lo, hi);
    let mut scratch = CarryRecord::new(tile);
    let mut results = Vec::with_capacity(hi - lo);
    for (offset, ((carry, bottom), right)) in old
        .iter_mut()
        .zip(bottoms.iter_mut())
        .zip(rights.iter_mut())
        .enumerate()
    {
        let column = lo + offset;
        let row = level - 1 - column;
        results.push(run_tile(
            carry,
            &mut scratch,
            bottom,
            right,
            down,
            left,
            row * tile,
            column * tile,
            layout,
            column == lo,
            column + 1 == hi,
            budget,
            pruning,
            tile,
        ));
    }
    fold_outcomes(results)
}

/// Sequential post-pass over a finished level: derive the retraction
/// latches from the border prune flags and seed the matrix-boundary
/// carries the next level will consume.
#[allow(clippy::too_many_arguments)]
fn settle_level(
    store: &mut CarryStore,
    layout: &Layout,
    tile: usize,
    level: usize,
    lo: usize,
    hi: usize,
    infinity_columns: usize,
    infinity_rows: usize,
    pruned: &[bool],
) -> (bool, bool) {
    let first = lo;
    let last = hi - 1;
    let add_column = pruned[0];
    let add_row = pruned[last - lo];
    let base = (level * tile) as Score;

    // The leftmost tile has a neighbor below (its row + 1 < Ht) whose left
    // carry nothing else produces: the matrix boundary when the range
    // starts at column 0, an infinity mask while column pruning is active.
    if !pruned[0] && level - first < layout.tiles_down {
        if first == 0 {
            carry::write_ramp(store.new_vertical_lane(first), base);
        } else if infinity_columns > 0 {
            carry::write_infinity(store.new_vertical_lane(first));
        }
    }
    // Symmetric rule for the rightmost tile's neighbor to the right.
    if !pruned[last - lo] && last < layout.tiles_across - 1 {
        if infinity_rows > 0 {
            carry::write_infinity(store.new_horizontal_lane(last + 1));
        } else {
            carry::write_ramp(store.new_horizontal_lane(last + 1), base);
        }
    }

    (add_column, add_row)
}

#[cfg(feature = "parallel")]
impl<const B: usize> WavefrontEngine<B> {
    /// Compute the Levenshtein distance between `seq1` and `seq2`.
    ///
    /// The lengths must match the pair declared to `init`, in either
    /// order. Repeated computes on the same engine reuse the buffers.
    pub fn compute<S: Eq + Sync>(&mut self, seq1: &[S], seq2: &[S]) -> EngineResult<usize> {
        let layout = self.prepare(seq1.len(), seq2.len())?;
        let pruning = self.pruning;
        let store = &mut self
            .state
            .as_mut()
            .expect("prepare verified initialization")
            .store;
        let (down, left) = bind_inputs(&layout, seq1, seq2);

        #[cfg(feature = "tracing")]
        let span = tracing::info_span!(
            "wavefront_compute",
            height = layout.height,
            width = layout.width,
            levels = layout.levels
        );
        #[cfg(feature = "tracing")]
        let _enter = span.enter();

        let mut budget = layout.width as Score;
        let mut shift = 0usize;
        let mut infinity_columns = 0usize;
        let mut infinity_rows = 0usize;
        let mut add_infinity_column = false;
        let mut add_infinity_row = false;

        for level in 1..=layout.levels {
            if level > layout.tiles_down {
                shift = level - layout.tiles_down;
                if infinity_columns > 0 {
                    infinity_columns -= 1;
                }
                if level > layout.tiles_across && infinity_rows > 0 {
                    infinity_rows -= 1;
                }
            }
            if add_infinity_column {
                infinity_columns += 1;
                add_infinity_column = false;
            }
            if add_infinity_row {
                infinity_rows += 1;
                add_infinity_row = false;
            }

            let lo = shift + infinity_columns;
            let hi = level.min(layout.tiles_across) - infinity_rows;
            debug_assert!(lo < hi, "pruning retracted the whole level {level}");

            #[cfg(feature = "tracing")]
            let level_span = tracing::trace_span!("wavefront_level", level, lo, hi);
            #[cfg(feature = "tracing")]
            let _level_guard = level_span.enter();

            let outcome =
                dispatch_level(store, down, left, &layout, level, lo, hi, budget, pruning, B);
            let (add_column, add_row) = settle_level(
                store,
                &layout,
                B,
                level,
                lo,
                hi,
                infinity_columns,
                infinity_rows,
                &outcome.pruned,
            );
            add_infinity_column = add_column;
            add_infinity_row = add_row;
            budget = budget.min(outcome.minimum);

            #[cfg(feature = "tracing")]
            tracing::trace!(
                pruned = outcome.pruned.iter().filter(|&&p| p).count(),
                budget,
                "level settled"
            );

            store.promote();
        }

        Ok(store.result(layout.tiles_across - 1) as usize)
    }
}

#[cfg(not(feature = "parallel"))]
impl<const B: usize> WavefrontEngine<B> {
    /// Compute the Levenshtein distance between `seq1` and `seq2`.
    ///
    /// The lengths must match the pair declared to `init`, in either
    /// order. Repeated computes on the same engine reuse the buffers.
    pub fn compute<S: Eq>(&mut self, seq1: &[S], seq2: &[S]) -> EngineResult<usize> {
        let layout = self.prepare(seq1.len(), seq2.len())?;
        let pruning = self.pruning;
        let store = &mut self
            .state
            .as_mut()
            .expect("prepare verified initialization")
            .store;
        let (down, left) = bind_inputs(&layout, seq1, seq2);

        #[cfg(feature = "tracing")]
        let span = tracing::info_span!(
            "wavefront_compute",
            height = layout.height,
            width = layout.width,
            levels = layout.levels
        );
        #[cfg(feature = "tracing")]
        let _enter = span.enter();

        let mut budget = layout.width as Score;
        let mut shift = 0usize;
        let mut infinity_columns = 0usize;
        let mut infinity_rows = 0usize;
        let mut add_infinity_column = false;
        let mut add_infinity_row = false;

        for level in 1..=layout.levels {
            if level > layout.tiles_down {
                shift = level - layout.tiles_down;
                if infinity_columns > 0 {
                    infinity_columns -= 1;
                }
                if level > layout.tiles_across && infinity_rows > 0 {
                    infinity_rows -= 1;
                }
            }
            if add_infinity_column {
                infinity_columns += 1;
                add_infinity_column = false;
            }
            if add_infinity_row {
                infinity_rows += 1;
                add_infinity_row = false;
            }

            let lo = shift + infinity_columns;
            let hi = level.min(layout.tiles_across) - infinity_rows;
            debug_assert!(lo < hi, "pruning retracted the whole level {level}");

            #[cfg(feature = "tracing")]
            let level_span = tracing::trace_span!("wavefront_level", level, lo, hi);
            #[cfg(feature = "tracing")]
            let _level_guard = level_span.enter();

            let outcome =
                dispatch_level(store, down, left, &layout, level, lo, hi, budget, pruning, B);
            let (add_column, add_row) = settle_level(
                store,
                &layout,
                B,
                level,
                lo,
                hi,
                infinity_columns,
                infinity_rows,
                &outcome.pruned,
            );
            add_infinity_column = add_column;
            add_infinity_row = add_row;
            budget = budget.min(outcome.minimum);

            #[cfg(feature = "tracing")]
            tracing::trace!(
                pruned = outcome.pruned.iter().filter(|&&p| p).count(),
                budget,
                "level settled"
            );

            store.promote();
        }

        Ok(store.result(layout.tiles_across - 1) as usize)
    }
}
