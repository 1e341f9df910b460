use super::utils::{gather_by_coord, permute_shape, validate_permutation};
use crate::error::MediRustError;
use crate::volume::utils::normalize_axis;
use crate::volume::Volume;

/// Reorders the axes of `input`: output axis `i` is input axis `dims[i]`.
pub fn permute_op(input: &Volume, dims: &[usize]) -> Result<Volume, MediRustError> {
    let rank = input.rank();
    validate_permutation(rank, dims)?;

    if dims.iter().enumerate().all(|(i, &d)| i == d) {
        return Ok(input.clone());
    }

    let new_shape = permute_shape(&input.shape, dims);
    gather_by_coord(input, new_shape, |out, src| {
        for (i, &axis) in dims.iter().enumerate() {
            src[axis] = out[i];
        }
    })
}

/// Swaps two axes.
pub fn transpose_op(input: &Volume, dim0: usize, dim1: usize) -> Result<Volume, MediRustError> {
    let rank = input.rank();
    for &d in &[dim0, dim1] {
        if d >= rank {
            return Err(MediRustError::InvalidAxis {
                axis: d as isize,
                rank,
            });
        }
    }
    let mut dims: Vec<usize> = (0..rank).collect();
    dims.swap(dim0, dim1);
    permute_op(input, &dims)
}

/// Moves axis `source` to position `destination`, keeping the order of the
/// other axes (NumPy `moveaxis`). Negative axes count from the end.
pub fn moveaxis_op(input: &Volume, source: isize, destination: isize) -> Result<Volume, MediRustError> {
    let rank = input.rank();
    let src = normalize_axis(source, rank)?;
    let dst = normalize_axis(destination, rank)?;
    let mut order: Vec<usize> = (0..rank).filter(|&d| d != src).collect();
    order.insert(dst, src);
    permute_op(input, &order)
}

#[cfg(test)]
#[path = "permute_test.rs"]
mod tests;
