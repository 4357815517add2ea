//! Match scanner - finds runs of three or more equal colors in a line of blocks
//!
//! The same scanner serves rows and columns: the caller hands over the colors of
//! one line in order and gets back the indices of the matching cells.
//!
//! The scan is a single forward pass with a cursor starting at 1 and a `chaining`
//! flag. At each step it compares the cell under the cursor with the next one:
//!
//! - equal while chaining: the run continues, take `pos + 1`, advance 1
//! - equal, and the previous cell matches too: take `pos - 1..=pos + 1`, chain, advance 1
//! - equal, and the cell after next matches: take `pos..=pos + 2`, chain, advance 2
//! - equal but no third cell either side: advance 3
//! - different: stop chaining, advance 2
//!
//! `Empty` cells never compare equal to anything. Indices come out strictly
//! increasing, so a row's result always fits in `ROW_WIDTH` slots.

use crate::types::BlockColor;

#[inline(always)]
fn same(a: BlockColor, b: BlockColor) -> bool {
    a == b && !a.is_empty()
}

/// Push the index of every cell of `colors` that belongs to a run of three or more.
pub fn scan_runs<E: Extend<usize>>(colors: &[BlockColor], out: &mut E) {
    let len = colors.len();
    let mut pos = 1usize;
    let mut chaining = false;

    while pos + 2 <= len {
        if same(colors[pos], colors[pos + 1]) {
            if chaining {
                out.extend([pos + 1]);
                pos += 1;
            } else if same(colors[pos - 1], colors[pos]) {
                out.extend([pos - 1, pos, pos + 1]);
                chaining = true;
                pos += 1;
            } else if pos + 2 < len && same(colors[pos + 2], colors[pos]) {
                out.extend([pos, pos + 1, pos + 2]);
                chaining = true;
                pos += 2;
            } else {
                pos += 3;
            }
        } else {
            chaining = false;
            pos += 2;
        }
    }
}

/// Convenience wrapper returning the matched indices as a `Vec`.
pub fn find_runs(colors: &[BlockColor]) -> Vec<usize> {
    let mut out = Vec::new();
    scan_runs(colors, &mut out);
    out
}
