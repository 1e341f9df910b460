// src/volume/create.rs

use rand::Rng;
use rand_distr::{Distribution, StandardNormal, Uniform};

use crate::buffer::Buffer;
use crate::error::MediRustError;
use crate::types::DType;
use crate::volume::Volume;

/// Creates a new f32 volume filled with zeros with the specified shape.
pub fn zeros(shape: &[usize]) -> Result<Volume, MediRustError> {
    full(shape, 0.0, DType::F32)
}

/// Creates a new f32 volume filled with ones with the specified shape.
pub fn ones(shape: &[usize]) -> Result<Volume, MediRustError> {
    full(shape, 1.0, DType::F32)
}

/// Creates a new volume of `dtype` filled with `value` (cast to `dtype`).
pub fn full(shape: &[usize], value: f64, dtype: DType) -> Result<Volume, MediRustError> {
    let numel = shape.iter().product();
    Volume::from_buffer(Buffer::filled(dtype, numel, value), shape.to_vec())
}

/// Creates a zero volume with the same shape and dtype as `volume`.
pub fn zeros_like(volume: &Volume) -> Result<Volume, MediRustError> {
    full(&volume.shape, 0.0, volume.dtype())
}

/// Creates a volume with the same shape and dtype as `volume`, filled with `value`.
pub fn full_like(volume: &Volume, value: f64) -> Result<Volume, MediRustError> {
    full(&volume.shape, value, volume.dtype())
}

/// `steps` evenly spaced f64 values from `start` to `end` inclusive.
///
/// `steps == 1` yields `[start]`, `steps == 0` an empty volume.
pub fn linspace(start: f64, end: f64, steps: usize) -> Result<Volume, MediRustError> {
    let data_vec: Vec<f64> = match steps {
        0 => vec![],
        1 => vec![start],
        _ => {
            let step = (end - start) / (steps - 1) as f64;
            (0..steps).map(|i| start + i as f64 * step).collect()
        }
    };
    Volume::from_vec_f64(data_vec, vec![steps])
}

/// Creates an f32 volume with values drawn from the standard normal distribution.
pub fn randn<R: Rng + ?Sized>(shape: &[usize], rng: &mut R) -> Result<Volume, MediRustError> {
    let numel: usize = shape.iter().product();
    let data_vec: Vec<f32> = (0..numel).map(|_| StandardNormal.sample(rng)).collect();
    Volume::new(data_vec, shape.to_vec())
}

/// Creates an f32 volume with values drawn uniformly from `[low, high)`.
pub fn rand_uniform<R: Rng + ?Sized>(
    shape: &[usize],
    low: f32,
    high: f32,
    rng: &mut R,
) -> Result<Volume, MediRustError> {
    if !(low < high) {
        return Err(MediRustError::InvalidArgument(format!(
            "rand_uniform requires low < high, got [{}, {})",
            low, high
        )));
    }
    let numel: usize = shape.iter().product();
    let dist = Uniform::new(low, high);
    let data_vec: Vec<f32> = (0..numel).map(|_| dist.sample(rng)).collect();
    Volume::new(data_vec, shape.to_vec())
}

#[cfg(test)]
#[path = "create_test.rs"]
mod tests;
