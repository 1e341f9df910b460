use super::*;

fn one_two_three() -> Volume {
    Volume::new(vec![1.0, 2.0, 3.0], vec![3]).unwrap()
}

#[test]
fn test_pad_constant() -> Result<(), MediRustError> {
    let p = pad_op(&one_two_three(), &[(2, 1)], PadMode::Constant, 9.0)?;
    assert_eq!(p.get_f32_data()?, vec![9.0, 9.0, 1.0, 2.0, 3.0, 9.0]);
    Ok(())
}

#[test]
fn test_pad_edge() -> Result<(), MediRustError> {
    let p = pad_op(&one_two_three(), &[(2, 2)], PadMode::Edge, 0.0)?;
    assert_eq!(p.get_f32_data()?, vec![1.0, 1.0, 1.0, 2.0, 3.0, 3.0, 3.0]);
    Ok(())
}

#[test]
fn test_pad_reflect_symmetric_wrap() -> Result<(), MediRustError> {
    let v = one_two_three();
    // np.pad([1,2,3], 2, 'reflect') == [3,2,1,2,3,2,1]
    assert_eq!(
        pad_op(&v, &[(2, 2)], PadMode::Reflect, 0.0)?.get_f32_data()?,
        vec![3.0, 2.0, 1.0, 2.0, 3.0, 2.0, 1.0]
    );
    // np.pad([1,2,3], 2, 'symmetric') == [2,1,1,2,3,3,2]
    assert_eq!(
        pad_op(&v, &[(2, 2)], PadMode::Symmetric, 0.0)?.get_f32_data()?,
        vec![2.0, 1.0, 1.0, 2.0, 3.0, 3.0, 2.0]
    );
    // np.pad([1,2,3], 2, 'wrap') == [2,3,1,2,3,1,2]
    assert_eq!(
        pad_op(&v, &[(2, 2)], PadMode::Wrap, 0.0)?.get_f32_data()?,
        vec![2.0, 3.0, 1.0, 2.0, 3.0, 1.0, 2.0]
    );
    Ok(())
}

#[test]
fn test_pad_reflect_wider_than_data() -> Result<(), MediRustError> {
    // np.pad([1,2,3], (0, 5), 'reflect') == [1,2,3,2,1,2,3,2]
    let p = pad_op(&one_two_three(), &[(0, 5)], PadMode::Reflect, 0.0)?;
    assert_eq!(
        p.get_f32_data()?,
        vec![1.0, 2.0, 3.0, 2.0, 1.0, 2.0, 3.0, 2.0]
    );
    Ok(())
}

#[test]
fn test_pad_2d_keeps_dtype() -> Result<(), MediRustError> {
    let v = Volume::from_vec_u8(vec![1, 2, 3, 4], vec![2, 2])?;
    let p = pad_op(&v, &[(0, 1), (1, 0)], PadMode::Constant, 0.0)?;
    assert_eq!(p.shape(), vec![3, 3]);
    assert_eq!(p.dtype(), crate::DType::U8);
    assert_eq!(
        p.get_f64_data(),
        vec![0.0, 1.0, 2.0, 0.0, 3.0, 4.0, 0.0, 0.0, 0.0]
    );
    Ok(())
}

#[test]
fn test_pad_errors() -> Result<(), MediRustError> {
    let v = one_two_three();
    assert!(matches!(
        pad_op(&v, &[(1, 1), (1, 1)], PadMode::Constant, 0.0),
        Err(MediRustError::RankMismatch { .. })
    ));
    let empty = Volume::new(vec![], vec![0])?;
    assert!(pad_op(&empty, &[(1, 0)], PadMode::Edge, 0.0).is_err());
    assert_eq!(
        pad_op(&empty, &[(1, 0)], PadMode::Constant, 5.0)?.get_f32_data()?,
        vec![5.0]
    );
    Ok(())
}

#[test]
fn test_pad_mode_from_str() {
    assert_eq!("symmetric".parse::<PadMode>(), Ok(PadMode::Symmetric));
    assert!("mean".parse::<PadMode>().is_err());
}
