//! Adam7 pass geometry.
//!
//! Pass `p` covers the raster pixels at
//! `(START_COL[p] + k * COL_STEP[p], START_ROW[p] + j * ROW_STEP[p])`.

pub(crate) const START_COL: [usize; 7] = [0, 4, 0, 2, 0, 1, 0];
pub(crate) const START_ROW: [usize; 7] = [0, 0, 4, 0, 2, 0, 1];
pub(crate) const COL_STEP: [usize; 7] = [8, 8, 4, 4, 2, 2, 1];
pub(crate) const ROW_STEP: [usize; 7] = [8, 8, 8, 4, 4, 2, 2];

/// Sub-image size of `pass` for a `width` x `height` raster.
///
/// A pass that covers no pixel of the raster reports a zero dimension and
/// contributes no bytes to the filtered stream.
pub(crate) fn pass_dimensions(pass: usize, width: usize, height: usize) -> (usize, usize) {
    let sub_w = (width.saturating_sub(START_COL[pass]) + COL_STEP[pass] - 1) / COL_STEP[pass];
    let sub_h = (height.saturating_sub(START_ROW[pass]) + ROW_STEP[pass] - 1) / ROW_STEP[pass];

    (sub_w, sub_h)
}
