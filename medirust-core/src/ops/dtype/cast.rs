use crate::buffer::Buffer;
use crate::error::MediRustError;
use crate::types::DType;
use crate::volume::Volume;

/// Converts a volume to a new DType, producing a new volume with the converted values.
///
/// The source volume is left untouched; casting to the current dtype returns a
/// cheap clone. Float to integer conversion truncates toward zero and
/// saturates at the bounds of the target type; NaN becomes 0.
///
/// # Example
/// ```
/// use medirust_core::{Volume, DType};
/// use medirust_core::ops::dtype::cast_op;
/// let v = Volume::new(vec![1.7f32, -2.2, 300.0], vec![3]).unwrap();
/// let v_u8 = cast_op(&v, DType::U8).unwrap();
/// assert_eq!(v_u8.dtype(), DType::U8);
/// assert_eq!(v_u8.get_f64_data(), vec![1.0, 0.0, 255.0]);
/// ```
pub fn cast_op(volume: &Volume, new_dtype: DType) -> Result<Volume, MediRustError> {
    if volume.dtype() == new_dtype {
        return Ok(volume.clone());
    }
    let values = volume.buffer.to_f64_vec();
    let clipped = count_unrepresentable(&values, new_dtype);
    if clipped > 0 {
        log::warn!(
            "cast_op: {} of {} values are NaN or out of range for {}, saturating",
            clipped,
            values.len(),
            new_dtype
        );
    }
    Volume::from_buffer(Buffer::from_f64_slice(new_dtype, &values), volume.shape())
}

/// Number of `values` an integer `dtype` cannot hold after truncation
/// (NaN or outside its range). Always 0 for float targets.
pub(crate) fn count_unrepresentable(values: &[f64], dtype: DType) -> usize {
    if dtype.is_float() {
        return 0;
    }
    let (lo, hi) = (dtype.min_value(), dtype.max_value());
    values
        .iter()
        .filter(|v| v.is_nan() || v.trunc() < lo || v.trunc() > hi)
        .count()
}
