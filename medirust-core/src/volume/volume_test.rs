use super::*;

#[test]
fn test_new_checks_length() {
    let result = Volume::new(vec![1.0, 2.0, 3.0], vec![2, 2]);
    assert_eq!(
        result.err(),
        Some(MediRustError::VolumeCreationError {
            data_len: 3,
            shape: vec![2, 2]
        })
    );
}

#[test]
fn test_accessors() -> Result<(), MediRustError> {
    let v = Volume::from_vec_u8((0..24).collect(), vec![2, 3, 4])?;
    assert_eq!(v.shape(), vec![2, 3, 4]);
    assert_eq!(v.strides(), &[12, 4, 1]);
    assert_eq!(v.rank(), 3);
    assert_eq!(v.numel(), 24);
    assert_eq!(v.dtype(), DType::U8);
    assert_eq!(v.spatial_shape(), vec![3, 4]);
    assert_eq!(v.spatial_rank(), 2);
    assert_eq!(v.get_f64(&[1, 2, 3])?, 23.0);
    Ok(())
}

#[test]
fn test_get_f64_out_of_bounds() -> Result<(), MediRustError> {
    let v = Volume::new(vec![1.0; 6], vec![2, 3])?;
    assert!(matches!(
        v.get_f64(&[2, 0]),
        Err(MediRustError::IndexOutOfBounds { .. })
    ));
    assert!(matches!(
        v.get_f64(&[0]),
        Err(MediRustError::RankMismatch { .. })
    ));
    Ok(())
}

#[test]
fn test_scalar_volume() -> Result<(), MediRustError> {
    let v = Volume::from_vec_f64(vec![4.5], vec![])?;
    assert_eq!(v.rank(), 0);
    assert_eq!(v.numel(), 1);
    assert_eq!(v.item()?, 4.5);
    Ok(())
}

#[test]
fn test_get_f32_data_requires_f32() -> Result<(), MediRustError> {
    let v = Volume::from_vec_i32(vec![1, 2], vec![2])?;
    assert!(v.get_f32_data().is_err());
    assert_eq!(v.get_f64_data(), vec![1.0, 2.0]);
    Ok(())
}

#[test]
fn test_clone_shares_buffer() -> Result<(), MediRustError> {
    let v = Volume::new(vec![1.0, 2.0], vec![2])?;
    let w = v.clone();
    assert!(Arc::ptr_eq(v.buffer(), w.buffer()));
    assert_eq!(v, w);
    Ok(())
}

#[test]
fn test_nonzero_mask() -> Result<(), MediRustError> {
    let v = Volume::new(vec![0.0, -2.0, 0.0, 0.5], vec![2, 2])?;
    let mask = v.nonzero_mask()?;
    assert_eq!(mask.dtype(), crate::types::DType::U8);
    assert_eq!(mask.get_f64_data(), vec![0.0, 1.0, 0.0, 1.0]);
    Ok(())
}
