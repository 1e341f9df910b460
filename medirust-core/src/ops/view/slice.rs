use std::ops::Range;

use super::utils::gather_by_coord;
use crate::error::MediRustError;
use crate::volume::Volume;

/// Clamps `range` into `[0, dim_size]`; a reversed range becomes empty.
fn normalize_range(range: &Range<usize>, dim_size: usize) -> Range<usize> {
    let start = range.start.min(dim_size);
    let end = range.end.clamp(start, dim_size);
    start..end
}

/// Extracts a sub-block. `ranges[i]` selects along axis `i`; axes beyond
/// `ranges.len()` are kept whole. Ranges are clamped to the volume like
/// NumPy basic slicing, so an empty result is possible.
pub fn slice_op(input: &Volume, ranges: &[Range<usize>]) -> Result<Volume, MediRustError> {
    let rank = input.rank();
    if ranges.len() > rank {
        return Err(MediRustError::SliceError {
            message: format!(
                "{} ranges given for a volume of rank {} (shape {:?})",
                ranges.len(),
                rank,
                input.shape
            ),
        });
    }

    let normalized: Vec<Range<usize>> = (0..rank)
        .map(|i| match ranges.get(i) {
            Some(r) => normalize_range(r, input.shape[i]),
            None => 0..input.shape[i],
        })
        .collect();

    if normalized
        .iter()
        .zip(input.shape.iter())
        .all(|(r, &d)| r.start == 0 && r.end == d)
    {
        return Ok(input.clone());
    }

    let new_shape: Vec<usize> = normalized.iter().map(|r| r.end - r.start).collect();
    gather_by_coord(input, new_shape, |out, src| {
        for i in 0..out.len() {
            src[i] = normalized[i].start + out[i];
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slice_basic() -> Result<(), MediRustError> {
        let v = Volume::new((0..12).map(|x| x as f32).collect(), vec![3, 4])?;
        let s = slice_op(&v, &[1..3, 1..3])?;
        assert_eq!(s.shape(), vec![2, 2]);
        assert_eq!(s.get_f32_data()?, vec![5.0, 6.0, 9.0, 10.0]);
        Ok(())
    }

    #[test]
    fn test_slice_partial_ranges_keep_trailing_axes() -> Result<(), MediRustError> {
        let v = Volume::new((0..12).map(|x| x as f32).collect(), vec![3, 4])?;
        let s = slice_op(&v, &[2..3])?;
        assert_eq!(s.shape(), vec![1, 4]);
        assert_eq!(s.get_f32_data()?, vec![8.0, 9.0, 10.0, 11.0]);
        Ok(())
    }

    #[test]
    fn test_slice_clamps_and_empty() -> Result<(), MediRustError> {
        let v = Volume::new((0..6).map(|x| x as f32).collect(), vec![6])?;
        assert_eq!(slice_op(&v, &[4..100])?.get_f32_data()?, vec![4.0, 5.0]);
        assert_eq!(slice_op(&v, &[10..12])?.shape(), vec![0]);
        #[allow(clippy::reversed_empty_ranges)]
        let reversed = slice_op(&v, &[3..1])?;
        assert_eq!(reversed.numel(), 0);
        Ok(())
    }

    #[test]
    fn test_slice_too_many_ranges() -> Result<(), MediRustError> {
        let v = Volume::new(vec![1.0, 2.0], vec![2])?;
        assert!(matches!(
            slice_op(&v, &[0..1, 0..1]),
            Err(MediRustError::SliceError { .. })
        ));
        Ok(())
    }
}
