use std::ops::Range;

use crate::error::MediRustError;
use crate::ops::pad::{pad_op, PadMode};
use crate::ops::view;
use crate::volume::Volume;

/// Layout methods, thin wrappers around [`crate::ops::view`].
impl Volume {
    /// Reorders axes: output axis `i` is input axis `dims[i]`.
    pub fn permute(&self, dims: &[usize]) -> Result<Volume, MediRustError> {
        view::permute_op(self, dims)
    }

    /// Swaps two axes.
    pub fn transpose(&self, dim0: usize, dim1: usize) -> Result<Volume, MediRustError> {
        view::transpose_op(self, dim0, dim1)
    }

    /// NumPy `moveaxis`; negative axes count from the end.
    pub fn moveaxis(&self, source: isize, destination: isize) -> Result<Volume, MediRustError> {
        view::moveaxis_op(self, source, destination)
    }

    pub fn reshape(&self, new_shape: Vec<usize>) -> Result<Volume, MediRustError> {
        view::reshape_op(self, new_shape)
    }

    pub fn squeeze(&self, dim: Option<usize>) -> Result<Volume, MediRustError> {
        view::squeeze_op(self, dim)
    }

    pub fn unsqueeze(&self, dim: usize) -> Result<Volume, MediRustError> {
        view::unsqueeze_op(self, dim)
    }

    pub fn flip(&self, axes: &[usize]) -> Result<Volume, MediRustError> {
        view::flip_op(self, axes)
    }

    /// NumPy `rot90` in the plane of `axes`.
    pub fn rot90(&self, k: i32, axes: (isize, isize)) -> Result<Volume, MediRustError> {
        view::rot90_op(self, k, axes)
    }

    pub fn slice(&self, ranges: &[Range<usize>]) -> Result<Volume, MediRustError> {
        view::slice_op(self, ranges)
    }

    pub fn repeat_interleave(&self, repeats: usize, axis: usize) -> Result<Volume, MediRustError> {
        view::repeat_interleave_op(self, repeats, axis)
    }

    pub fn pad(
        &self,
        widths: &[(usize, usize)],
        mode: PadMode,
        value: f64,
    ) -> Result<Volume, MediRustError> {
        pad_op(self, widths, mode, value)
    }
}
