use crate::error::MediRustError;
use crate::types::DType;
use crate::volume::utils::{broadcast_shapes, coord_to_index_broadcasted, increment_coord};
use crate::volume::Volume;

/// Result dtype of mixing two dtypes in arithmetic.
///
/// Equal dtypes are kept; otherwise F64 wins over F32, any float wins over
/// integers, and mixed integers widen to I64.
pub fn promote_types(a: DType, b: DType) -> DType {
    if a == b {
        return a;
    }
    match (a, b) {
        (DType::F64, _) | (_, DType::F64) => DType::F64,
        (DType::F32, _) | (_, DType::F32) => DType::F32,
        _ => DType::I64,
    }
}

/// Dtype produced by scalar arithmetic: floats are kept, integers become F64.
fn scalar_result_dtype(dtype: DType) -> DType {
    if dtype.is_float() {
        dtype
    } else {
        DType::F64
    }
}

/// Applies `f` to every element (computed in f64) and stores the result as `dtype`.
pub fn map_op<F>(input: &Volume, dtype: DType, f: F) -> Result<Volume, MediRustError>
where
    F: Fn(f64) -> f64,
{
    let values: Vec<f64> = input.get_f64_data().into_iter().map(f).collect();
    Volume::from_f64_values(&values, input.shape(), dtype)
}

pub fn add_scalar_op(input: &Volume, scalar: f64) -> Result<Volume, MediRustError> {
    map_op(input, scalar_result_dtype(input.dtype()), |v| v + scalar)
}

pub fn sub_scalar_op(input: &Volume, scalar: f64) -> Result<Volume, MediRustError> {
    map_op(input, scalar_result_dtype(input.dtype()), |v| v - scalar)
}

pub fn mul_scalar_op(input: &Volume, scalar: f64) -> Result<Volume, MediRustError> {
    map_op(input, scalar_result_dtype(input.dtype()), |v| v * scalar)
}

pub fn div_scalar_op(input: &Volume, scalar: f64) -> Result<Volume, MediRustError> {
    if scalar == 0.0 {
        return Err(MediRustError::DivisionByZero);
    }
    map_op(input, scalar_result_dtype(input.dtype()), |v| v / scalar)
}

/// Element-wise binary op with NumPy broadcasting.
fn broadcast_binary_op<F>(
    a: &Volume,
    b: &Volume,
    op: F,
) -> Result<Volume, MediRustError>
where
    F: Fn(f64, f64) -> f64,
{
    let out_shape = broadcast_shapes(&a.shape, &b.shape)?;
    let dtype = promote_types(a.dtype(), b.dtype());
    let a_data = a.get_f64_data();
    let b_data = b.get_f64_data();

    let numel: usize = out_shape.iter().product();
    let mut values = Vec::with_capacity(numel);
    if numel > 0 {
        let mut coord = vec![0; out_shape.len()];
        loop {
            let ia = coord_to_index_broadcasted(&coord, &a.shape, &a.strides);
            let ib = coord_to_index_broadcasted(&coord, &b.shape, &b.strides);
            values.push(op(a_data[ia], b_data[ib]));
            if !increment_coord(&mut coord, &out_shape) {
                break;
            }
        }
    }
    Volume::from_f64_values(&values, out_shape, dtype)
}

pub fn add_op(a: &Volume, b: &Volume) -> Result<Volume, MediRustError> {
    broadcast_binary_op(a, b, |x, y| x + y)
}

pub fn sub_op(a: &Volume, b: &Volume) -> Result<Volume, MediRustError> {
    broadcast_binary_op(a, b, |x, y| x - y)
}

pub fn mul_op(a: &Volume, b: &Volume) -> Result<Volume, MediRustError> {
    broadcast_binary_op(a, b, |x, y| x * y)
}

/// Broadcast division. Any zero in the divisor is an error rather than inf/NaN.
pub fn div_op(a: &Volume, b: &Volume) -> Result<Volume, MediRustError> {
    if b.get_f64_data().iter().any(|&v| v == 0.0) {
        return Err(MediRustError::DivisionByZero);
    }
    broadcast_binary_op(a, b, |x, y| x / y)
}

#[cfg(test)]
#[path = "arithmetic_test.rs"]
mod tests;
