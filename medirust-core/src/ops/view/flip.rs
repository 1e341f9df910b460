use super::permute::permute_op;
use super::utils::gather_by_coord;
use crate::error::MediRustError;
use crate::volume::utils::normalize_axis;
use crate::volume::Volume;

/// Reverses the order of elements along each axis in `axes`.
pub fn flip_op(input: &Volume, axes: &[usize]) -> Result<Volume, MediRustError> {
    let rank = input.rank();
    let mut flipped = vec![false; rank];
    for &axis in axes {
        if axis >= rank {
            return Err(MediRustError::InvalidAxis {
                axis: axis as isize,
                rank,
            });
        }
        flipped[axis] = true;
    }
    if !flipped.iter().any(|&f| f) {
        return Ok(input.clone());
    }

    let shape = input.shape();
    gather_by_coord(input, shape.clone(), |out, src| {
        for i in 0..out.len() {
            src[i] = if flipped[i] { shape[i] - 1 - out[i] } else { out[i] };
        }
    })
}

/// Rotates by 90 degrees `k` times in the plane of `axes`, turning from the
/// first axis towards the second (NumPy `rot90`). Negative `k` rotates the
/// other way; negative axes count from the end.
pub fn rot90_op(input: &Volume, k: i32, axes: (isize, isize)) -> Result<Volume, MediRustError> {
    let rank = input.rank();
    if rank < 2 {
        return Err(MediRustError::InvalidArgument(format!(
            "rot90 requires at least 2 dimensions, got shape {:?}",
            input.shape
        )));
    }
    let a0 = normalize_axis(axes.0, rank)?;
    let a1 = normalize_axis(axes.1, rank)?;
    if a0 == a1 {
        return Err(MediRustError::InvalidArgument(format!(
            "rot90 axes must be different, got ({}, {})",
            axes.0, axes.1
        )));
    }

    let mut swapped: Vec<usize> = (0..rank).collect();
    swapped.swap(a0, a1);

    match k.rem_euclid(4) {
        0 => Ok(input.clone()),
        1 => permute_op(&flip_op(input, &[a1])?, &swapped),
        2 => flip_op(input, &[a0, a1]),
        _ => flip_op(&permute_op(input, &swapped)?, &[a1]),
    }
}

#[cfg(test)]
#[path = "flip_test.rs"]
mod tests;
