//! Tile kernel: the Levenshtein recurrence over one B×B block.

use crate::carry::{CarryRecord, Score, INFINITY};

/// Run the edit-distance recurrence over one `tile`×`tile` block.
///
/// `carry` holds the tile's left edge in `vertical` and its top edge in
/// `horizontal`; the `horizontal` vector doubles as the in-place working
/// row, threaded through the recurrence together with a `diagonal` scalar.
/// On return `out.horizontal` holds the tile's bottom edge and
/// `out.vertical` its right edge; `carry.horizontal` receives whatever
/// `out.horizontal` held before (the vectors are exchanged so the caller
/// can recycle them without reallocation).
///
/// The return value is the cheapest total cost of any completion that
/// leaves through the tile's bottom or right edge, assuming no further
/// symbols match: a level-wide minimum of these bounds is the new W*.
pub(crate) fn compute_tile<S: Eq>(
    carry: &mut CarryRecord,
    out: &mut CarryRecord,
    down: &[S],
    left: &[S],
    y: usize,
    x: usize,
    height: usize,
    width: usize,
    tile: usize,
) -> Score {
    out.vertical[0] = carry.horizontal[tile];

    for h in 0..tile {
        let mut diagonal = carry.vertical[h];
        carry.horizontal[0] = carry.vertical[h + 1];
        let row_symbol = &down[y + h];
        for l in 1..=tile {
            if *row_symbol == left[x + l - 1] {
                std::mem::swap(&mut diagonal, &mut carry.horizontal[l]);
            } else {
                let substitute = diagonal;
                diagonal = carry.horizontal[l];
                carry.horizontal[l] = substitute
                    .min(carry.horizontal[l - 1])
                    .min(carry.horizontal[l])
                    + 1;
            }
        }
        out.vertical[h + 1] = carry.horizontal[tile];
    }

    carry.horizontal[0] = carry.vertical[tile];
    std::mem::swap(&mut carry.horizontal, &mut out.horizontal);

    completion_lower_bound(out, y, x, height, width, tile)
}

/// Minimum over the tile's bottom/right edge cells of the cell value plus
/// the match-free remainder to the matrix's bottom-right corner.
///
/// Three geometric regimes, measured from the tile origin: when more of
/// `left` remains than of `down` every completion exits rightward, when
/// less remains it exits downward, and when the remainders are equal the
/// straight diagonal through the tile's bottom-right cell is cheapest.
/// The rightmost tile column has `width - x - tile == 0`, which reduces
/// the first regime to the plain edge minimum.
fn completion_lower_bound(
    out: &CarryRecord,
    y: usize,
    x: usize,
    height: usize,
    width: usize,
    tile: usize,
) -> Score {
    let remaining_w = (width - x) as Score;
    let remaining_h = (height - y) as Score;
    let tile = tile as Score;

    if remaining_w > remaining_h {
        let mut best = INFINITY;
        for &value in &out.vertical {
            best = best.min(remaining_w - tile + value);
        }
        best
    } else if remaining_w < remaining_h {
        let mut best = INFINITY;
        for &value in &out.horizontal {
            best = best.min(remaining_h - tile + value);
        }
        best
    } else {
        out.horizontal[tile as usize] + remaining_w - tile
    }
}
