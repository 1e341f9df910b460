use std::cmp::max;

use crate::error::MediRustError;

/// Calculates the strides for a given shape.
/// Strides represent the number of elements to skip in the flattened data array
/// to move one step along each dimension.
///
/// Example:
/// shape = [2, 3] -> strides = [3, 1]
/// shape = [2, 2, 2] -> strides = [4, 2, 1]
pub fn calculate_strides(shape: &[usize]) -> Vec<usize> {
    if shape.is_empty() {
        return vec![];
    }
    let rank = shape.len();
    let mut strides = vec![1; rank];
    for i in (0..rank - 1).rev() {
        strides[i] = strides[i + 1] * shape[i + 1];
    }
    strides
}

/// Determines the output shape resulting from broadcasting two input shapes.
///
/// Follows NumPy broadcasting rules:
/// 1. If the shapes have different numbers of dimensions, prepend 1s to the shorter shape.
/// 2. Compare dimensions element-wise from right to left.
/// 3. Dimensions are compatible if they are equal, or one of them is 1.
pub fn broadcast_shapes(shape_a: &[usize], shape_b: &[usize]) -> Result<Vec<usize>, MediRustError> {
    let rank_a = shape_a.len();
    let rank_b = shape_b.len();
    let max_rank = max(rank_a, rank_b);
    let mut result_shape = vec![0; max_rank];

    for i in 0..max_rank {
        let dim_a = shape_a.get(rank_a.wrapping_sub(1 + i)).copied().unwrap_or(1);
        let dim_b = shape_b.get(rank_b.wrapping_sub(1 + i)).copied().unwrap_or(1);

        result_shape[max_rank - 1 - i] = if dim_a == dim_b {
            dim_a
        } else if dim_a == 1 {
            dim_b
        } else if dim_b == 1 {
            dim_a
        } else {
            return Err(MediRustError::BroadcastError {
                shape1: shape_a.to_vec(),
                shape2: shape_b.to_vec(),
            });
        };
    }
    Ok(result_shape)
}

/// Converts a linear (row-major) index into coordinates.
pub fn index_to_coord(index: usize, shape: &[usize]) -> Vec<usize> {
    let mut coord = vec![0; shape.len()];
    let mut current_index = index;
    for i in (0..shape.len()).rev() {
        if shape[i] == 0 {
            continue;
        }
        coord[i] = current_index % shape[i];
        current_index /= shape[i];
    }
    coord
}

/// Linear index of `coord` in a contiguous volume with `strides`.
pub fn coord_to_index(coord: &[usize], strides: &[usize]) -> usize {
    coord.iter().zip(strides.iter()).map(|(c, s)| c * s).sum()
}

/// Linear index into a (possibly smaller) source shape that is broadcast to
/// the rank of `target_coord`.
pub fn coord_to_index_broadcasted(
    target_coord: &[usize],
    original_shape: &[usize],
    original_strides: &[usize],
) -> usize {
    if original_shape.is_empty() {
        return 0;
    }
    let rank_diff = target_coord.len().saturating_sub(original_shape.len());
    let mut index = 0;
    for i in 0..original_shape.len() {
        // A size-1 source dimension is read at coordinate 0.
        let effective_coord = if original_shape[i] == 1 {
            0
        } else {
            target_coord[rank_diff + i]
        };
        index += effective_coord * original_strides[i];
    }
    index
}

/// Resolves a possibly negative axis against `rank`.
pub fn normalize_axis(axis: isize, rank: usize) -> Result<usize, MediRustError> {
    let resolved = if axis < 0 { axis + rank as isize } else { axis };
    if resolved < 0 || resolved as usize >= rank {
        return Err(MediRustError::InvalidAxis { axis, rank });
    }
    Ok(resolved as usize)
}

/// Advances `coord` to the next position in row-major order.
/// Returns `false` once every position has been visited.
pub fn increment_coord(coord: &mut [usize], shape: &[usize]) -> bool {
    for dim in (0..shape.len()).rev() {
        coord[dim] += 1;
        if coord[dim] < shape[dim] {
            return true;
        }
        coord[dim] = 0;
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calculate_strides() {
        assert_eq!(calculate_strides(&[2, 3, 4]), vec![12, 4, 1]);
        assert_eq!(calculate_strides(&[5]), vec![1]);
        assert!(calculate_strides(&[]).is_empty());
    }

    #[test]
    fn test_broadcast_shapes() {
        assert_eq!(broadcast_shapes(&[4, 5, 3], &[3]), Ok(vec![4, 5, 3]));
        assert_eq!(broadcast_shapes(&[4, 1, 3], &[5, 1]), Ok(vec![4, 5, 3]));
        assert!(matches!(
            broadcast_shapes(&[4, 3], &[2]),
            Err(MediRustError::BroadcastError { .. })
        ));
    }

    #[test]
    fn test_index_coord_roundtrip() {
        let shape = [2, 3, 4];
        let strides = calculate_strides(&shape);
        let coord = index_to_coord(17, &shape);
        assert_eq!(coord, vec![1, 1, 1]);
        assert_eq!(coord_to_index(&coord, &strides), 17);
    }

    #[test]
    fn test_normalize_axis() {
        assert_eq!(normalize_axis(-1, 3), Ok(2));
        assert_eq!(normalize_axis(0, 3), Ok(0));
        assert_eq!(
            normalize_axis(3, 3),
            Err(MediRustError::InvalidAxis { axis: 3, rank: 3 })
        );
        assert!(normalize_axis(-4, 3).is_err());
    }

    #[test]
    fn test_increment_coord_visits_all() {
        let shape = [2, 2];
        let mut coord = vec![0, 0];
        let mut visited = vec![coord.clone()];
        while increment_coord(&mut coord, &shape) {
            visited.push(coord.clone());
        }
        assert_eq!(visited, vec![vec![0, 0], vec![0, 1], vec![1, 0], vec![1, 1]]);
    }
}
