use crate::volume::Volume;

/// Checks if a volume is approximately equal to the expected shape and data.
/// Values are compared in f64 whatever the volume dtype.
/// Panics if shapes differ or data differs by more than `tolerance`.
pub fn check_volume_near(
    actual: &Volume,
    expected_shape: &[usize],
    expected_data: &[f32],
    tolerance: f32,
) {
    assert_eq!(actual.shape(), expected_shape, "Shape mismatch");

    let actual_data_vec = actual.get_f64_data();

    assert_eq!(
        actual_data_vec.len(),
        expected_data.len(),
        "Data length mismatch"
    );

    for (i, (a, e)) in actual_data_vec.iter().zip(expected_data.iter()).enumerate() {
        let diff = (*a - *e as f64).abs();
        if diff > tolerance as f64 || diff.is_nan() {
            panic!(
                "Data mismatch at index {}: actual={:?}, expected={:?}, diff={:?}, tolerance={:?}",
                i, a, e, diff, tolerance
            );
        }
    }
}

/// Helper to create a simple f32 volume for testing purposes.
pub fn create_test_volume(data: Vec<f32>, shape: Vec<usize>) -> Volume {
    Volume::new(data, shape).expect("Failed to create test volume")
}

/// `[channels, spatial...]` f32 volume filled with `0, 1, 2, ...`.
pub fn arange_volume(shape: &[usize]) -> Volume {
    let numel: usize = shape.iter().product();
    create_test_volume((0..numel).map(|x| x as f32).collect(), shape.to_vec())
}
