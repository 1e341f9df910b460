mod common;

use common::{create_test_volume, square_image};
use medirust_core::utils::testing::check_volume_near;
use medirust_core::{DType, MediRustError, PadMode};

#[test]
fn test_channel_first_roundtrip_through_methods() -> Result<(), MediRustError> {
    let hwc = create_test_volume((0..24).map(|x| x as f32).collect(), vec![2, 4, 3]);
    let chw = hwc.moveaxis(-1, 0)?;
    assert_eq!(chw.shape(), vec![3, 2, 4]);
    assert_eq!(chw.get_f64(&[1, 1, 2])?, hwc.get_f64(&[1, 2, 1])?);
    assert_eq!(chw.moveaxis(0, -1)?, hwc);
    Ok(())
}

#[test]
fn test_flip_then_rot90_chain() -> Result<(), MediRustError> {
    let img = square_image(4, 4, 0, 2);
    // Square in the top-left corner moves to the top-right after flipping W.
    let flipped = img.flip(&[2])?;
    assert_eq!(flipped.get_f64(&[0, 0, 3])?, 1.0);
    assert_eq!(flipped.get_f64(&[0, 0, 0])?, 0.0);
    // Rotating back by 90 degrees in (H, W) moves it to the top-left again.
    let rotated = flipped.rot90(1, (1, 2))?;
    assert_eq!(rotated.get_f64(&[0, 0, 0])?, 1.0);
    assert_eq!(rotated.sum(), 4.0);
    Ok(())
}

#[test]
fn test_crop_pad_cast_chain() -> Result<(), MediRustError> {
    let img = square_image(6, 6, 2, 4);
    let cropped = img.slice(&[0..1, 2..4, 2..4])?;
    check_volume_near(&cropped, &[1, 2, 2], &[1.0; 4], 1e-6);
    let padded = cropped.pad(&[(0, 0), (1, 1), (1, 1)], PadMode::Constant, 0.0)?;
    assert_eq!(padded.shape(), vec![1, 4, 4]);
    assert_eq!(padded.sum(), 4.0);
    let labels = padded.cast(DType::U8)?;
    assert_eq!(labels.dtype(), DType::U8);
    assert_eq!(labels.max()?, 1.0);
    Ok(())
}

#[test]
fn test_normalise_with_stats() -> Result<(), MediRustError> {
    let img = create_test_volume(vec![1.0, 2.0, 3.0, 4.0], vec![1, 2, 2]);
    let mean = img.mean()?;
    let std = img.std()?;
    let normalised = img.sub_scalar(mean)?.div_scalar(std)?;
    assert!(normalised.mean()?.abs() < 1e-6);
    assert!((normalised.std()? - 1.0).abs() < 1e-6);
    Ok(())
}
