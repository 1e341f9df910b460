use super::*;
use approx::assert_abs_diff_eq;
use medirust_core::utils::testing::{arange_volume, check_volume_near};

#[test]
fn test_gaussian_filter_non_positive_sigma_is_identity() -> Result<(), MediRustError> {
    let vol = arange_volume(&[2, 3]);
    assert_eq!(gaussian_filter(&vol, 0.0)?, vol);
    assert!(gaussian_filter(&vol, f64::NAN).is_err());
    Ok(())
}

#[test]
fn test_gaussian_filter_impulse_response() -> Result<(), MediRustError> {
    let mut data = vec![0.0f64; 21];
    data[10] = 1.0;
    let vol = Volume::from_vec_f64(data, vec![21])?;
    let out = gaussian_filter(&vol, 1.0)?.get_f64_data();
    assert_abs_diff_eq!(out.iter().sum::<f64>(), 1.0, epsilon = 1e-12);
    assert_abs_diff_eq!(out[9], out[11], epsilon = 1e-15);
    assert!(out[10] > out[9] && out[9] > out[8]);
    // Radius is 4 sigma: nothing beyond it.
    assert_eq!(out[5], 0.0);
    assert!(out[6] > 0.0);
    Ok(())
}

#[test]
fn test_gaussian_filter_zero_boundary() -> Result<(), MediRustError> {
    let vol = Volume::new(vec![1.0; 5], vec![5])?;
    let out = gaussian_filter(&vol, 1.0)?;
    assert_eq!(out.dtype(), DType::F32);
    let out = out.get_f64_data();
    assert!(out[0] < out[1] && out[1] < out[2]);
    assert!(out[2] < 1.0);
    assert_abs_diff_eq!(out[0], out[4], epsilon = 1e-6);
    Ok(())
}

#[test]
fn test_gaussian_filter_is_separable_over_all_axes() -> Result<(), MediRustError> {
    let mut data = vec![0.0f64; 81];
    data[4 * 9 + 4] = 1.0;
    let vol = Volume::from_vec_f64(data, vec![9, 9])?;
    let out = gaussian_filter(&vol, 0.8)?;
    assert_abs_diff_eq!(out.get_f64(&[3, 4])?, out.get_f64(&[4, 3])?, epsilon = 1e-15);
    assert_abs_diff_eq!(out.get_f64(&[3, 3])?, out.get_f64(&[5, 5])?, epsilon = 1e-15);
    Ok(())
}

#[test]
fn test_interpolate_cubic_same_size_is_identity() -> Result<(), MediRustError> {
    let vol = arange_volume(&[2, 3, 4]);
    let out = interpolate_cubic(&vol, &[3, 4])?;
    let expected: Vec<f32> = (0..24).map(|x| x as f32).collect();
    check_volume_near(&out, &[2, 3, 4], &expected, 1e-5);
    Ok(())
}

#[test]
fn test_interpolate_cubic_keeps_constants() -> Result<(), MediRustError> {
    let vol = Volume::from_vec_f64(vec![2.5; 6], vec![1, 2, 3])?;
    let out = interpolate_cubic(&vol, &[5, 7])?;
    assert_eq!(out.shape(), vec![1, 5, 7]);
    assert_eq!(out.dtype(), DType::F64);
    for v in out.get_f64_data() {
        assert_abs_diff_eq!(v, 2.5, epsilon = 1e-12);
    }
    Ok(())
}

#[test]
fn test_interpolate_cubic_upsample_is_antisymmetric() -> Result<(), MediRustError> {
    let vol = Volume::from_vec_f64(vec![0.0, 1.0], vec![1, 2])?;
    let out = interpolate_cubic(&vol, &[4])?.get_f64_data();
    assert_eq!(out.len(), 4);
    assert_abs_diff_eq!(out[0] + out[3], 1.0, epsilon = 1e-12);
    assert_abs_diff_eq!(out[1] + out[2], 1.0, epsilon = 1e-12);
    assert!(out[1] < out[2]);
    Ok(())
}

#[test]
fn test_interpolate_cubic_rank_mismatch() {
    let vol = arange_volume(&[1, 4]);
    assert!(interpolate_cubic(&vol, &[2, 2]).is_err());
}
