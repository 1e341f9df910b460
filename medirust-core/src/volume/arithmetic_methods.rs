use crate::error::MediRustError;
use crate::ops::arithmetic;
use crate::ops::dtype::cast_op;
use crate::types::DType;
use crate::volume::Volume;

impl Volume {
    /// Applies `f` element-wise (in f64) and stores the result as `dtype`.
    pub fn map<F: Fn(f64) -> f64>(&self, dtype: DType, f: F) -> Result<Volume, MediRustError> {
        arithmetic::map_op(self, dtype, f)
    }

    pub fn cast(&self, dtype: DType) -> Result<Volume, MediRustError> {
        cast_op(self, dtype)
    }

    pub fn add_scalar(&self, scalar: f64) -> Result<Volume, MediRustError> {
        arithmetic::add_scalar_op(self, scalar)
    }

    pub fn sub_scalar(&self, scalar: f64) -> Result<Volume, MediRustError> {
        arithmetic::sub_scalar_op(self, scalar)
    }

    pub fn mul_scalar(&self, scalar: f64) -> Result<Volume, MediRustError> {
        arithmetic::mul_scalar_op(self, scalar)
    }

    pub fn div_scalar(&self, scalar: f64) -> Result<Volume, MediRustError> {
        arithmetic::div_scalar_op(self, scalar)
    }

    pub fn add(&self, other: &Volume) -> Result<Volume, MediRustError> {
        arithmetic::add_op(self, other)
    }

    pub fn sub(&self, other: &Volume) -> Result<Volume, MediRustError> {
        arithmetic::sub_op(self, other)
    }

    pub fn mul(&self, other: &Volume) -> Result<Volume, MediRustError> {
        arithmetic::mul_op(self, other)
    }

    pub fn div(&self, other: &Volume) -> Result<Volume, MediRustError> {
        arithmetic::div_op(self, other)
    }
}
