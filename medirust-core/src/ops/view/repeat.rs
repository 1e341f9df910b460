use super::utils::gather_by_coord;
use crate::error::MediRustError;
use crate::volume::Volume;

/// Repeats each element `repeats` times along `axis` (NumPy `repeat`):
/// `[a, b]` becomes `[a, a, b, b]` for `repeats = 2`.
pub fn repeat_interleave_op(input: &Volume, repeats: usize, axis: usize) -> Result<Volume, MediRustError> {
    let rank = input.rank();
    if axis >= rank {
        return Err(MediRustError::InvalidAxis {
            axis: axis as isize,
            rank,
        });
    }
    if repeats == 1 {
        return Ok(input.clone());
    }
    let mut new_shape = input.shape();
    new_shape[axis] *= repeats;
    gather_by_coord(input, new_shape, |out, src| {
        src.copy_from_slice(out);
        src[axis] = out[axis] / repeats;
    })
}
