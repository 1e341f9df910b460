use std::sync::Arc;

use crate::error::MediRustError;
use crate::volume::utils::calculate_strides;
use crate::volume::Volume;

/// Reinterprets the (contiguous) buffer with a new shape of the same size.
pub fn reshape_op(input: &Volume, new_shape: Vec<usize>) -> Result<Volume, MediRustError> {
    let new_numel: usize = new_shape.iter().product();
    if new_numel != input.numel() {
        return Err(MediRustError::ShapeMismatch {
            expected: input.shape(),
            actual: new_shape,
            operation: "reshape".to_string(),
        });
    }
    let strides = calculate_strides(&new_shape);
    Ok(Volume {
        buffer: Arc::clone(&input.buffer),
        shape: new_shape,
        strides,
    })
}

/// Removes size-1 axes. With `dim = None` every size-1 axis is removed;
/// with `Some(d)`, axis `d` must have size 1.
pub fn squeeze_op(input: &Volume, dim: Option<usize>) -> Result<Volume, MediRustError> {
    let shape = &input.shape;
    let new_shape: Vec<usize> = match dim {
        None => shape.iter().copied().filter(|&d| d != 1).collect(),
        Some(d) => {
            if d >= shape.len() {
                return Err(MediRustError::InvalidAxis {
                    axis: d as isize,
                    rank: shape.len(),
                });
            }
            if shape[d] != 1 {
                return Err(MediRustError::InvalidArgument(format!(
                    "cannot squeeze axis {} of shape {:?}: size is not 1",
                    d, shape
                )));
            }
            shape
                .iter()
                .enumerate()
                .filter(|&(i, _)| i != d)
                .map(|(_, &s)| s)
                .collect()
        }
    };
    reshape_op(input, new_shape)
}

/// Inserts a size-1 axis at position `dim` (`0..=rank`).
pub fn unsqueeze_op(input: &Volume, dim: usize) -> Result<Volume, MediRustError> {
    let rank = input.rank();
    if dim > rank {
        return Err(MediRustError::InvalidAxis {
            axis: dim as isize,
            rank: rank + 1,
        });
    }
    let mut new_shape = input.shape();
    new_shape.insert(dim, 1);
    reshape_op(input, new_shape)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reshape() -> Result<(), MediRustError> {
        let v = Volume::new((0..6).map(|x| x as f32).collect(), vec![2, 3])?;
        let r = reshape_op(&v, vec![3, 2])?;
        assert_eq!(r.shape(), vec![3, 2]);
        assert_eq!(r.strides(), &[2, 1]);
        assert!(matches!(
            reshape_op(&v, vec![4]),
            Err(MediRustError::ShapeMismatch { .. })
        ));
        Ok(())
    }

    #[test]
    fn test_squeeze_all() -> Result<(), MediRustError> {
        let v = Volume::new(vec![1.0, 2.0], vec![1, 2, 1])?;
        assert_eq!(squeeze_op(&v, None)?.shape(), vec![2]);
        Ok(())
    }

    #[test]
    fn test_squeeze_dim() -> Result<(), MediRustError> {
        let v = Volume::new(vec![1.0, 2.0], vec![1, 2, 1])?;
        assert_eq!(squeeze_op(&v, Some(2))?.shape(), vec![1, 2]);
        assert!(matches!(
            squeeze_op(&v, Some(1)),
            Err(MediRustError::InvalidArgument(_))
        ));
        assert!(matches!(
            squeeze_op(&v, Some(3)),
            Err(MediRustError::InvalidAxis { .. })
        ));
        Ok(())
    }

    #[test]
    fn test_unsqueeze() -> Result<(), MediRustError> {
        let v = Volume::new(vec![1.0, 2.0, 3.0], vec![3])?;
        assert_eq!(unsqueeze_op(&v, 0)?.shape(), vec![1, 3]);
        assert_eq!(unsqueeze_op(&v, 1)?.shape(), vec![3, 1]);
        assert!(unsqueeze_op(&v, 2).is_err());
        Ok(())
    }
}
