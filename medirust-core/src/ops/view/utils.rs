use crate::error::MediRustError;
use crate::volume::utils::{coord_to_index, increment_coord};
use crate::volume::Volume;

/// Validates permutation axes.
pub fn validate_permutation(rank: usize, dims: &[usize]) -> Result<(), MediRustError> {
    if dims.len() != rank {
        return Err(MediRustError::RankMismatch {
            expected: rank,
            actual: dims.len(),
        });
    }
    let mut seen = vec![false; rank];
    for &axis in dims {
        if axis >= rank {
            return Err(MediRustError::InvalidAxis {
                axis: axis as isize,
                rank,
            });
        }
        if seen[axis] {
            return Err(MediRustError::InvalidPermutation {
                dims: dims.to_vec(),
                rank,
            });
        }
        seen[axis] = true;
    }
    Ok(())
}

/// Calculates the new shape after permutation.
pub fn permute_shape(shape: &[usize], dims: &[usize]) -> Vec<usize> {
    dims.iter().map(|&axis| shape[axis]).collect()
}

/// Builds a new volume of `out_shape` whose element at each output coordinate
/// is read from the input coordinate written by `src_coord`.
///
/// `src_coord(out, src)` receives the output coordinate and must fill `src`
/// (pre-sized to the input rank).
pub(crate) fn gather_by_coord<F>(
    input: &Volume,
    out_shape: Vec<usize>,
    mut src_coord: F,
) -> Result<Volume, MediRustError>
where
    F: FnMut(&[usize], &mut [usize]),
{
    let numel: usize = out_shape.iter().product();
    let mut indices = Vec::with_capacity(numel);
    if numel > 0 {
        let mut out = vec![0; out_shape.len()];
        let mut src = vec![0; input.rank()];
        loop {
            src_coord(&out, &mut src);
            indices.push(coord_to_index(&src, &input.strides));
            if !increment_coord(&mut out, &out_shape) {
                break;
            }
        }
    }
    let buffer = input.buffer.gather(&indices)?;
    Volume::from_buffer(buffer, out_shape)
}

/// Same as [`gather_by_coord`], but `src_coord` may return `false` to mark an
/// output position that has no source element; those are set to `fill`.
pub(crate) fn gather_by_coord_or_fill<F>(
    input: &Volume,
    out_shape: Vec<usize>,
    fill: f64,
    mut src_coord: F,
) -> Result<Volume, MediRustError>
where
    F: FnMut(&[usize], &mut [usize]) -> bool,
{
    let numel: usize = out_shape.iter().product();
    let mut indices = Vec::with_capacity(numel);
    if numel > 0 {
        let mut out = vec![0; out_shape.len()];
        let mut src = vec![0; input.rank()];
        loop {
            if src_coord(&out, &mut src) {
                indices.push(Some(coord_to_index(&src, &input.strides)));
            } else {
                indices.push(None);
            }
            if !increment_coord(&mut out, &out_shape) {
                break;
            }
        }
    }
    let buffer = input.buffer.gather_or_fill(&indices, fill)?;
    Volume::from_buffer(buffer, out_shape)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_permutation() {
        assert!(validate_permutation(3, &[2, 0, 1]).is_ok());
        assert!(matches!(
            validate_permutation(3, &[0, 1]),
            Err(MediRustError::RankMismatch { .. })
        ));
        assert!(matches!(
            validate_permutation(2, &[0, 0]),
            Err(MediRustError::InvalidPermutation { .. })
        ));
        assert!(matches!(
            validate_permutation(2, &[0, 2]),
            Err(MediRustError::InvalidAxis { .. })
        ));
    }

    #[test]
    fn test_permute_shape() {
        assert_eq!(permute_shape(&[2, 3, 4], &[2, 0, 1]), vec![4, 2, 3]);
    }
}
