use crate::error::MediRustError;
use crate::volume::Volume;

fn non_empty_data(input: &Volume, operation: &str) -> Result<Vec<f64>, MediRustError> {
    if input.numel() == 0 {
        log::debug!("{} called on an empty volume of shape {:?}", operation, input.shape);
        return Err(MediRustError::UnsupportedOperation(format!(
            "{} of an empty volume (shape {:?})",
            operation, input.shape
        )));
    }
    Ok(input.get_f64_data())
}

/// Smallest element. NaN propagates, like `np.min`.
pub fn min_op(input: &Volume) -> Result<f64, MediRustError> {
    let data = non_empty_data(input, "min")?;
    Ok(data.iter().copied().fold(f64::INFINITY, |acc, v| {
        if acc.is_nan() || v.is_nan() {
            f64::NAN
        } else {
            acc.min(v)
        }
    }))
}

/// Largest element. NaN propagates, like `np.max`.
pub fn max_op(input: &Volume) -> Result<f64, MediRustError> {
    let data = non_empty_data(input, "max")?;
    Ok(data.iter().copied().fold(f64::NEG_INFINITY, |acc, v| {
        if acc.is_nan() || v.is_nan() {
            f64::NAN
        } else {
            acc.max(v)
        }
    }))
}

/// Sum of all elements, accumulated in f64. Zero for an empty volume.
pub fn sum_op(input: &Volume) -> f64 {
    input.get_f64_data().iter().sum()
}

/// Arithmetic mean of all elements.
pub fn mean_op(input: &Volume) -> Result<f64, MediRustError> {
    let data = non_empty_data(input, "mean")?;
    Ok(data.iter().sum::<f64>() / data.len() as f64)
}

/// Population standard deviation (`ddof = 0`) of all elements.
pub fn std_op(input: &Volume) -> Result<f64, MediRustError> {
    let data = non_empty_data(input, "std")?;
    let n = data.len() as f64;
    let mean = data.iter().sum::<f64>() / n;
    let var = data.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / n;
    Ok(var.sqrt())
}

#[cfg(test)]
#[path = "stats_test.rs"]
mod tests;
