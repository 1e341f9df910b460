use medirust_core::{DType, MediRustError, Volume};

use crate::transform::Transform;

/// Adds a length-1 channel axis in front of the image.
#[derive(Debug, Clone, Copy, Default)]
pub struct AddChannel;

impl Transform<Volume> for AddChannel {
    fn apply(&mut self, img: Volume) -> Result<Volume, MediRustError> {
        img.unsqueeze(0)
    }
}

/// Moves the channel axis to the front. Negative axes count from the end.
#[derive(Debug, Clone, Copy)]
pub struct AsChannelFirst {
    pub channel_dim: isize,
}

impl AsChannelFirst {
    pub fn new(channel_dim: isize) -> Self {
        AsChannelFirst { channel_dim }
    }
}

impl Default for AsChannelFirst {
    fn default() -> Self {
        Self::new(-1)
    }
}

impl Transform<Volume> for AsChannelFirst {
    fn apply(&mut self, img: Volume) -> Result<Volume, MediRustError> {
        img.moveaxis(self.channel_dim, 0)
    }
}

/// Moves the channel axis to the end.
#[derive(Debug, Clone, Copy)]
pub struct AsChannelLast {
    pub channel_dim: isize,
}

impl AsChannelLast {
    pub fn new(channel_dim: isize) -> Self {
        AsChannelLast { channel_dim }
    }
}

impl Default for AsChannelLast {
    fn default() -> Self {
        Self::new(0)
    }
}

impl Transform<Volume> for AsChannelLast {
    fn apply(&mut self, img: Volume) -> Result<Volume, MediRustError> {
        img.moveaxis(self.channel_dim, -1)
    }
}

/// Repeats every channel `repeats` times in place (`[a, b]` becomes `[a, a, b, b]`).
#[derive(Debug, Clone, Copy)]
pub struct RepeatChannel {
    repeats: usize,
}

impl RepeatChannel {
    pub fn new(repeats: usize) -> Result<Self, MediRustError> {
        if repeats == 0 {
            return Err(MediRustError::InvalidArgument(
                "RepeatChannel: repeats must be positive".to_string(),
            ));
        }
        Ok(RepeatChannel { repeats })
    }
}

impl Transform<Volume> for RepeatChannel {
    fn apply(&mut self, img: Volume) -> Result<Volume, MediRustError> {
        img.repeat_interleave(self.repeats, 0)
    }
}

/// Casts the image to `dtype`.
#[derive(Debug, Clone, Copy, Default)]
pub struct CastToType {
    pub dtype: DType,
}

impl CastToType {
    pub fn new(dtype: DType) -> Self {
        CastToType { dtype }
    }
}

impl Transform<Volume> for CastToType {
    fn apply(&mut self, img: Volume) -> Result<Volume, MediRustError> {
        img.cast(self.dtype)
    }
}

/// Removes axis `dim`, which must have length 1, or every length-1 axis when `None`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SqueezeDim {
    pub dim: Option<usize>,
}

impl SqueezeDim {
    pub fn new(dim: Option<usize>) -> Self {
        SqueezeDim { dim }
    }
}

impl Transform<Volume> for SqueezeDim {
    fn apply(&mut self, img: Volume) -> Result<Volume, MediRustError> {
        img.squeeze(self.dim)
    }
}

/// Permutes the axes; output axis `i` is input axis `indices[i]`.
/// Empty `indices` reverses the axes.
#[derive(Debug, Clone, Default)]
pub struct Transpose {
    pub indices: Vec<usize>,
}

impl Transpose {
    pub fn new(indices: Vec<usize>) -> Self {
        Transpose { indices }
    }
}

impl Transform<Volume> for Transpose {
    fn apply(&mut self, img: Volume) -> Result<Volume, MediRustError> {
        if self.indices.is_empty() {
            let reversed: Vec<usize> = (0..img.rank()).rev().collect();
            return img.permute(&reversed);
        }
        img.permute(&self.indices)
    }
}

#[cfg(test)]
#[path = "utility_test.rs"]
mod tests;
