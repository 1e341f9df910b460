use crate::error::MediRustError;
use crate::types::DType;
use crate::volume::utils::{coord_to_index, increment_coord};
use crate::volume::Volume;

/// Logical OR of "element != 0" over `axes`, returning a U8 volume (0/1)
/// holding the remaining axes (NumPy `np.any(img, axis=axes)`).
///
/// NaN counts as non-zero.
pub fn any_op(input: &Volume, axes: &[usize]) -> Result<Volume, MediRustError> {
    let rank = input.rank();
    let mut reduced = vec![false; rank];
    for &axis in axes {
        if axis >= rank {
            return Err(MediRustError::InvalidAxis {
                axis: axis as isize,
                rank,
            });
        }
        reduced[axis] = true;
    }

    let out_shape: Vec<usize> = (0..rank)
        .filter(|&i| !reduced[i])
        .map(|i| input.shape[i])
        .collect();
    let out_strides = crate::volume::utils::calculate_strides(&out_shape);
    let out_numel: usize = out_shape.iter().product();
    let mut out = vec![0u8; out_numel];

    if input.numel() > 0 {
        let data = input.get_f64_data();
        let mut coord = vec![0; rank];
        let mut out_coord = Vec::with_capacity(out_shape.len());
        let mut linear = 0;
        loop {
            if data[linear] != 0.0 {
                out_coord.clear();
                out_coord.extend((0..rank).filter(|&i| !reduced[i]).map(|i| coord[i]));
                out[coord_to_index(&out_coord, &out_strides)] = 1;
            }
            linear += 1;
            if !increment_coord(&mut coord, &input.shape) {
                break;
            }
        }
    }

    let values: Vec<f64> = out.into_iter().map(f64::from).collect();
    Volume::from_f64_values(&values, out_shape, DType::U8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_any_axis0() -> Result<(), MediRustError> {
        let v = Volume::new(vec![0.0, 1.0, 0.0, 0.0, 0.0, 2.0], vec![2, 3])?;
        let a = any_op(&v, &[0])?;
        assert_eq!(a.shape(), vec![3]);
        assert_eq!(a.get_f64_data(), vec![0.0, 1.0, 1.0]);
        Ok(())
    }

    #[test]
    fn test_any_axis1() -> Result<(), MediRustError> {
        let v = Volume::new(vec![0.0, 0.0, 0.0, 0.0, 0.0, 2.0], vec![2, 3])?;
        let a = any_op(&v, &[1])?;
        assert_eq!(a.get_f64_data(), vec![0.0, 1.0]);
        Ok(())
    }

    #[test]
    fn test_any_all_axes() -> Result<(), MediRustError> {
        let v = Volume::new(vec![0.0, f32::NAN], vec![2])?;
        let a = any_op(&v, &[0])?;
        assert_eq!(a.rank(), 0);
        assert_eq!(a.item()?, 1.0);
        assert!(any_op(&v, &[1]).is_err());
        Ok(())
    }
}
