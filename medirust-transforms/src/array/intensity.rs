use medirust_core::{DType, MediRustError, Volume};

use crate::randomizable::RandomState;
use crate::transform::Transform;
use crate::utils::rescale_array;

/// Min-max rescales the image into `[minv, maxv]` and stores it as `dtype`.
#[derive(Debug, Clone, Copy)]
pub struct Rescale {
    pub minv: f64,
    pub maxv: f64,
    pub dtype: DType,
}

impl Rescale {
    pub fn new(minv: f64, maxv: f64, dtype: DType) -> Self {
        Rescale { minv, maxv, dtype }
    }
}

impl Default for Rescale {
    fn default() -> Self {
        Self::new(0.0, 1.0, DType::F32)
    }
}

impl Transform<Volume> for Rescale {
    fn apply(&mut self, img: Volume) -> Result<Volume, MediRustError> {
        rescale_array(&img, self.minv, self.maxv, Some(self.dtype))
    }
}

/// Normalizes intensities as `(img - subtrahend) / divisor`.
///
/// `subtrahend` and `divisor` are given together, and broadcast against the
/// image (channel-last layout: a `[C]` volume matches the trailing axis).
/// Without them the image mean and population standard deviation are used.
#[derive(Debug, Clone, Default)]
pub struct IntensityNormalizer {
    subtrahend: Option<Volume>,
    divisor: Option<Volume>,
    dtype: DType,
}

impl IntensityNormalizer {
    pub fn new(
        subtrahend: Option<Volume>,
        divisor: Option<Volume>,
        dtype: DType,
    ) -> Result<Self, MediRustError> {
        if subtrahend.is_some() != divisor.is_some() {
            return Err(MediRustError::InvalidArgument(
                "subtrahend and divisor must be set in pair".to_string(),
            ));
        }
        Ok(IntensityNormalizer {
            subtrahend,
            divisor,
            dtype,
        })
    }
}

impl Transform<Volume> for IntensityNormalizer {
    fn apply(&mut self, img: Volume) -> Result<Volume, MediRustError> {
        let normalized = match (&self.subtrahend, &self.divisor) {
            (Some(subtrahend), Some(divisor)) => img.sub(subtrahend)?.div(divisor)?,
            _ => {
                let mean = img.mean()?;
                let std = img.std()?;
                img.sub_scalar(mean)?.div_scalar(std)?
            }
        };
        normalized.cast(self.dtype)
    }
}

/// Adds a constant offset to every voxel.
#[derive(Debug, Clone, Copy)]
pub struct ShiftIntensity {
    pub offset: f64,
}

impl ShiftIntensity {
    pub fn new(offset: f64) -> Self {
        ShiftIntensity { offset }
    }
}

impl Transform<Volume> for ShiftIntensity {
    fn apply(&mut self, img: Volume) -> Result<Volume, MediRustError> {
        img.add_scalar(self.offset)
    }
}

/// With probability `prob`, shifts intensities by an offset drawn from
/// `U(offsets.0, offsets.1)`.
#[derive(Debug, Clone)]
pub struct RandShiftIntensity {
    offsets: (f64, f64),
    prob: f64,
    magnitude: f64,
    do_transform: bool,
    state: RandomState,
}

impl RandShiftIntensity {
    pub fn new(offsets: (f64, f64), prob: f64) -> Self {
        let (lo, hi) = offsets;
        RandShiftIntensity {
            offsets: (lo.min(hi), lo.max(hi)),
            prob,
            magnitude: 0.0,
            do_transform: false,
            state: RandomState::new(),
        }
    }

    /// A symmetric offset range `(-offset, offset)`.
    pub fn symmetric(offset: f64, prob: f64) -> Self {
        Self::new((-offset, offset), prob)
    }

    pub fn randomize(&mut self) {
        self.magnitude = self.state.uniform(self.offsets.0, self.offsets.1);
        self.do_transform = self.state.random() < self.prob;
        log::debug!(
            "RandShiftIntensity: do_transform={} offset={}",
            self.do_transform,
            self.magnitude
        );
    }

    /// Applies the last sampled decision without drawing again.
    pub fn shift(&self, img: Volume) -> Result<Volume, MediRustError> {
        if !self.do_transform {
            return Ok(img);
        }
        img.add_scalar(self.magnitude)
    }
}

impl Transform<Volume> for RandShiftIntensity {
    fn apply(&mut self, img: Volume) -> Result<Volume, MediRustError> {
        self.randomize();
        self.shift(img)
    }

    fn set_random_state(&mut self, seed: u64) {
        self.state.reseed(seed);
    }
}

/// With probability `prob`, adds Gaussian noise `N(mean, std^2)` to every voxel.
#[derive(Debug, Clone)]
pub struct RandGaussianNoise {
    prob: f64,
    mean: f64,
    std: f64,
    state: RandomState,
}

impl RandGaussianNoise {
    pub fn new(prob: f64, mean: f64, std: f64) -> Self {
        RandGaussianNoise {
            prob,
            mean,
            std,
            state: RandomState::new(),
        }
    }
}

impl Default for RandGaussianNoise {
    fn default() -> Self {
        Self::new(0.1, 0.0, 0.1)
    }
}

impl Transform<Volume> for RandGaussianNoise {
    fn apply(&mut self, img: Volume) -> Result<Volume, MediRustError> {
        let do_transform = self.state.random() < self.prob;
        log::debug!("RandGaussianNoise: do_transform={}", do_transform);
        if !do_transform {
            return Ok(img);
        }
        let noise = self.state.normal_vec(img.numel(), self.mean, self.std)?;
        let noise = Volume::from_vec_f64(noise, img.shape())?;
        let dtype = if img.dtype().is_float() {
            img.dtype()
        } else {
            DType::F64
        };
        img.add(&noise)?.cast(dtype)
    }

    fn set_random_state(&mut self, seed: u64) {
        self.state.reseed(seed);
    }
}

#[cfg(test)]
#[path = "intensity_test.rs"]
mod tests;
