//! Separable filters used by the elastic transforms.

use medirust_core::{DType, MediRustError, Volume};

/// Float output dtype for filtered data: floats are kept, integers become F64.
fn float_dtype(dtype: DType) -> DType {
    if dtype.is_float() {
        dtype
    } else {
        DType::F64
    }
}

/// Runs `line` over every 1D line of `data` along `axis`.
///
/// `line(input, output)` receives one line of the input (length `shape[axis]`)
/// and fills the output line (length `out_len`).
fn map_lines<F>(data: &[f64], shape: &[usize], axis: usize, out_len: usize, mut line: F) -> Vec<f64>
where
    F: FnMut(&[f64], &mut [f64]),
{
    let outer: usize = shape[..axis].iter().product();
    let len = shape[axis];
    let inner: usize = shape[axis + 1..].iter().product();
    let mut out = vec![0.0; outer * out_len * inner];
    let mut src = vec![0.0; len];
    let mut dst = vec![0.0; out_len];
    for o in 0..outer {
        for j in 0..inner {
            for (i, v) in src.iter_mut().enumerate() {
                *v = data[(o * len + i) * inner + j];
            }
            line(&src, &mut dst);
            for (i, &v) in dst.iter().enumerate() {
                out[(o * out_len + i) * inner + j] = v;
            }
        }
    }
    out
}

/// Normalised Gaussian weights, radius `int(4 * sigma + 0.5)`.
fn gaussian_kernel(sigma: f64) -> Vec<f64> {
    let radius = (4.0 * sigma + 0.5) as isize;
    let weights: Vec<f64> = (-radius..=radius)
        .map(|x| (-0.5 * (x * x) as f64 / (sigma * sigma)).exp())
        .collect();
    let total: f64 = weights.iter().sum();
    weights.into_iter().map(|w| w / total).collect()
}

/// Gaussian smoothing over every axis of `vol`, with zeros outside the volume.
///
/// `sigma <= 0` returns the input unchanged.
pub fn gaussian_filter(vol: &Volume, sigma: f64) -> Result<Volume, MediRustError> {
    if !sigma.is_finite() {
        return Err(MediRustError::InvalidArgument(format!(
            "gaussian_filter: sigma must be finite, got {}",
            sigma
        )));
    }
    if sigma <= 0.0 {
        return Ok(vol.clone());
    }
    let kernel = gaussian_kernel(sigma);
    let radius = (kernel.len() / 2) as isize;
    let shape = vol.shape();
    let mut data = vol.get_f64_data();
    for axis in 0..shape.len() {
        let len = shape[axis];
        data = map_lines(&data, &shape, axis, len, |src, dst| {
            for (i, out) in dst.iter_mut().enumerate() {
                *out = kernel
                    .iter()
                    .enumerate()
                    .filter_map(|(k, &w)| {
                        let j = i as isize + k as isize - radius;
                        (j >= 0 && (j as usize) < len).then(|| w * src[j as usize])
                    })
                    .sum();
            }
        });
    }
    Volume::from_f64_values(&data, shape, float_dtype(vol.dtype()))
}

const CUBIC_A: f64 = -0.75;

/// Keys cubic convolution kernel.
fn cubic_weight(x: f64) -> f64 {
    let x = x.abs();
    if x <= 1.0 {
        ((CUBIC_A + 2.0) * x - (CUBIC_A + 3.0)) * x * x + 1.0
    } else if x < 2.0 {
        ((CUBIC_A * x - 5.0 * CUBIC_A) * x + 8.0 * CUBIC_A) * x - 4.0 * CUBIC_A
    } else {
        0.0
    }
}

/// Resizes the spatial axes of a channel-first volume with cubic convolution.
///
/// Sample positions use half-pixel centres (`(o + 0.5) * in / out - 0.5`) and
/// taps falling outside the input are clamped to the border.
pub fn interpolate_cubic(vol: &Volume, out_size: &[usize]) -> Result<Volume, MediRustError> {
    let in_shape = vol.shape();
    if in_shape.len() != out_size.len() + 1 {
        return Err(MediRustError::RankMismatch {
            expected: in_shape.len().saturating_sub(1),
            actual: out_size.len(),
        });
    }
    if let Some(axis) = (0..out_size.len()).find(|&i| in_shape[i + 1] == 0 && out_size[i] > 0) {
        return Err(MediRustError::InvalidArgument(format!(
            "interpolate_cubic: cannot resize empty axis {} to {}",
            axis + 1,
            out_size[axis]
        )));
    }

    let mut shape = in_shape.clone();
    let mut data = vol.get_f64_data();
    for (i, &out_len) in out_size.iter().enumerate() {
        let axis = i + 1;
        let in_len = shape[axis];
        let scale = in_len as f64 / out_len.max(1) as f64;
        data = map_lines(&data, &shape, axis, out_len, |src, dst| {
            let last = in_len as isize - 1;
            for (o, out) in dst.iter_mut().enumerate() {
                let position = (o as f64 + 0.5) * scale - 0.5;
                let base = position.floor();
                let t = position - base;
                let base = base as isize;
                let weights = [
                    cubic_weight(t + 1.0),
                    cubic_weight(t),
                    cubic_weight(1.0 - t),
                    cubic_weight(2.0 - t),
                ];
                *out = weights
                    .iter()
                    .enumerate()
                    .map(|(k, &w)| {
                        let j = (base - 1 + k as isize).clamp(0, last);
                        w * src[j as usize]
                    })
                    .sum();
            }
        });
        shape[axis] = out_len;
    }
    Volume::from_f64_values(&data, shape, float_dtype(vol.dtype()))
}

#[cfg(test)]
#[path = "filters_test.rs"]
mod tests;
