use crate::error::MediRustError;
use crate::ops::reduction;
use crate::types::DType;
use crate::volume::Volume;

impl Volume {
    pub fn min(&self) -> Result<f64, MediRustError> {
        reduction::min_op(self)
    }

    pub fn max(&self) -> Result<f64, MediRustError> {
        reduction::max_op(self)
    }

    pub fn sum(&self) -> f64 {
        reduction::sum_op(self)
    }

    pub fn mean(&self) -> Result<f64, MediRustError> {
        reduction::mean_op(self)
    }

    /// Population standard deviation.
    pub fn std(&self) -> Result<f64, MediRustError> {
        reduction::std_op(self)
    }

    /// `np.any` over `axes`, as a U8 (0/1) volume.
    pub fn any_along(&self, axes: &[usize]) -> Result<Volume, MediRustError> {
        reduction::any_op(self, axes)
    }

    /// True if any element is non-zero.
    pub fn any(&self) -> bool {
        self.get_f64_data().iter().any(|&v| v != 0.0)
    }

    /// U8 mask, 1 where the element is non-zero (NaN counts as non-zero).
    pub fn nonzero_mask(&self) -> Result<Volume, MediRustError> {
        self.map(DType::U8, |v| if v != 0.0 { 1.0 } else { 0.0 })
    }
}
