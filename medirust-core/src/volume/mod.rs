// src/volume/mod.rs

use std::fmt;
use std::sync::Arc;

use crate::buffer::{Buffer, Element};
use crate::error::MediRustError;
use crate::types::DType;

pub mod create;
mod reduction_methods;
mod view_methods;
mod arithmetic_methods;

pub mod utils;

// Re-export creation functions to make them public
pub use create::{full, full_like, linspace, ones, rand_uniform, randn, zeros, zeros_like};

use utils::calculate_strides;

/// Represents a multi-dimensional medical image array (a volume).
///
/// `Volume` keeps its elements in an `Arc<Buffer>`:
/// 1.  **Shared Ownership:** cloning a `Volume` is cheap and never copies voxels,
///     which matters when a data dictionary is passed through a transform chain.
/// 2.  **Immutability:** every operation returns a new volume. Transforms never
///     modify their input in place.
///
/// The buffer is always contiguous in row-major (C) order. By convention image
/// volumes are channel-first: `[C, spatial...]`.
#[derive(Clone)]
pub struct Volume {
    pub(crate) buffer: Arc<Buffer>,
    pub(crate) shape: Vec<usize>,
    pub(crate) strides: Vec<usize>,
}

impl Volume {
    /// Creates a new f32 Volume with the given data and shape.
    ///
    /// # Errors
    /// Returns `MediRustError::VolumeCreationError` if the length of `data_vec`
    /// does not match the number of elements implied by `shape`.
    pub fn new(data_vec: Vec<f32>, shape: Vec<usize>) -> Result<Self, MediRustError> {
        Self::from_vec(data_vec, shape)
    }

    /// Creates a new Volume from any supported element type.
    pub fn from_vec<T: Element>(data_vec: Vec<T>, shape: Vec<usize>) -> Result<Self, MediRustError> {
        Self::from_buffer(T::wrap(data_vec), shape)
    }

    pub fn from_vec_f32(data_vec: Vec<f32>, shape: Vec<usize>) -> Result<Self, MediRustError> {
        Self::from_vec(data_vec, shape)
    }

    pub fn from_vec_f64(data_vec: Vec<f64>, shape: Vec<usize>) -> Result<Self, MediRustError> {
        Self::from_vec(data_vec, shape)
    }

    pub fn from_vec_i32(data_vec: Vec<i32>, shape: Vec<usize>) -> Result<Self, MediRustError> {
        Self::from_vec(data_vec, shape)
    }

    pub fn from_vec_i64(data_vec: Vec<i64>, shape: Vec<usize>) -> Result<Self, MediRustError> {
        Self::from_vec(data_vec, shape)
    }

    pub fn from_vec_u8(data_vec: Vec<u8>, shape: Vec<usize>) -> Result<Self, MediRustError> {
        Self::from_vec(data_vec, shape)
    }

    pub fn from_vec_u16(data_vec: Vec<u16>, shape: Vec<usize>) -> Result<Self, MediRustError> {
        Self::from_vec(data_vec, shape)
    }

    /// Wraps an existing buffer. The buffer length must match `shape`.
    pub fn from_buffer(buffer: Buffer, shape: Vec<usize>) -> Result<Self, MediRustError> {
        let numel: usize = shape.iter().product();
        let data_len = buffer.len();
        if data_len != numel {
            return Err(MediRustError::VolumeCreationError { data_len, shape });
        }
        let strides = calculate_strides(&shape);
        Ok(Volume {
            buffer: Arc::new(buffer),
            shape,
            strides,
        })
    }

    /// Builds a volume of `dtype` from f64 values, casting each element.
    pub fn from_f64_values(
        values: &[f64],
        shape: Vec<usize>,
        dtype: DType,
    ) -> Result<Self, MediRustError> {
        Self::from_buffer(Buffer::from_f64_slice(dtype, values), shape)
    }

    // --- Accessors ---

    pub fn shape(&self) -> Vec<usize> {
        self.shape.clone()
    }

    pub fn strides(&self) -> &[usize] {
        &self.strides
    }

    pub fn rank(&self) -> usize {
        self.shape.len()
    }

    pub fn numel(&self) -> usize {
        self.shape.iter().product()
    }

    pub fn dtype(&self) -> DType {
        self.buffer.dtype()
    }

    pub fn buffer(&self) -> &Arc<Buffer> {
        &self.buffer
    }

    /// Shape without the leading channel axis.
    pub fn spatial_shape(&self) -> Vec<usize> {
        self.shape.iter().skip(1).copied().collect()
    }

    /// Number of spatial dimensions of a channel-first volume.
    pub fn spatial_rank(&self) -> usize {
        self.rank().saturating_sub(1)
    }

    /// Copies every element into a `Vec<f64>`, whatever the dtype.
    pub fn get_f64_data(&self) -> Vec<f64> {
        self.buffer.to_f64_vec()
    }

    /// Copies the data of an F32 volume.
    pub fn get_f32_data(&self) -> Result<Vec<f32>, MediRustError> {
        Ok(self.buffer.try_get_f32()?.to_vec())
    }

    /// Linear offset of a multi-dimensional index.
    pub fn offset_of(&self, coords: &[usize]) -> Result<usize, MediRustError> {
        if coords.len() != self.rank() {
            return Err(MediRustError::RankMismatch {
                expected: self.rank(),
                actual: coords.len(),
            });
        }
        let mut offset = 0;
        for (i, (&c, &d)) in coords.iter().zip(self.shape.iter()).enumerate() {
            if c >= d {
                return Err(MediRustError::IndexOutOfBounds {
                    index: coords.to_vec(),
                    shape: self.shape.clone(),
                });
            }
            offset += c * self.strides[i];
        }
        Ok(offset)
    }

    /// Reads the element at `coords` as f64.
    pub fn get_f64(&self, coords: &[usize]) -> Result<f64, MediRustError> {
        let offset = self.offset_of(coords)?;
        self.buffer
            .get_f64(offset)
            .ok_or_else(|| MediRustError::InternalError(format!("offset {} outside buffer", offset)))
    }

    /// Returns the scalar value of a single-element volume.
    pub fn item(&self) -> Result<f64, MediRustError> {
        if self.numel() != 1 {
            return Err(MediRustError::ShapeMismatch {
                expected: vec![],
                actual: self.shape(),
                operation: "item".to_string(),
            });
        }
        self.buffer
            .get_f64(0)
            .ok_or_else(|| MediRustError::InternalError("empty buffer in item".to_string()))
    }
}

impl PartialEq for Volume {
    fn eq(&self, other: &Self) -> bool {
        self.shape == other.shape && self.buffer == other.buffer
    }
}

impl fmt::Debug for Volume {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const PREVIEW: usize = 8;
        let data = self.get_f64_data();
        let preview: Vec<f64> = data.iter().take(PREVIEW).copied().collect();
        f.debug_struct("Volume")
            .field("shape", &self.shape)
            .field("dtype", &self.dtype())
            .field("data", &preview)
            .field("truncated", &(data.len() > PREVIEW))
            .finish()
    }
}

#[cfg(test)]
#[path = "volume_test.rs"]
mod tests;
