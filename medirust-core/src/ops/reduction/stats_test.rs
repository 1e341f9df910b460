use super::*;
use approx::assert_relative_eq;

#[test]
fn test_min_max_sum() -> Result<(), MediRustError> {
    let v = Volume::from_vec_i32(vec![3, -1, 7, 2], vec![2, 2])?;
    assert_eq!(min_op(&v)?, -1.0);
    assert_eq!(max_op(&v)?, 7.0);
    assert_eq!(sum_op(&v), 11.0);
    Ok(())
}

#[test]
fn test_nan_propagates() -> Result<(), MediRustError> {
    let v = Volume::new(vec![1.0, f32::NAN, 3.0], vec![3])?;
    assert!(min_op(&v)?.is_nan());
    assert!(max_op(&v)?.is_nan());
    Ok(())
}

#[test]
fn test_mean_std() -> Result<(), MediRustError> {
    let v = Volume::new(vec![2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0], vec![8])?;
    assert_relative_eq!(mean_op(&v)?, 5.0, epsilon = 1e-12);
    assert_relative_eq!(std_op(&v)?, 2.0, epsilon = 1e-12);
    Ok(())
}

#[test]
fn test_empty_volume_errors() -> Result<(), MediRustError> {
    let v = Volume::new(vec![], vec![0, 3])?;
    assert!(min_op(&v).is_err());
    assert!(mean_op(&v).is_err());
    assert_eq!(sum_op(&v), 0.0);
    Ok(())
}
