use crate::error::MediRustError;
use std::fmt;
use std::str::FromStr;

/// Defines the possible data types for Volume elements.
///
/// Medical volumes arrive as anything from 8-bit label maps to 64-bit floats,
/// so the element type is tracked dynamically next to the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DType {
    /// 32-bit floating-point type. Default output of intensity transforms.
    #[default]
    F32,
    /// 64-bit floating-point type. Used for sampling grids.
    F64,
    /// 32-bit signed integer type.
    I32,
    /// 64-bit signed integer type.
    I64,
    /// 8-bit unsigned integer type (typical for label maps).
    U8,
    /// 16-bit unsigned integer type (typical for raw CT/MR intensities).
    U16,
}

impl DType {
    /// Returns true for `F32` and `F64`.
    pub fn is_float(&self) -> bool {
        matches!(self, DType::F32 | DType::F64)
    }

    /// Smallest representable value, as f64.
    pub fn min_value(&self) -> f64 {
        match self {
            DType::F32 => f32::MIN as f64,
            DType::F64 => f64::MIN,
            DType::I32 => i32::MIN as f64,
            DType::I64 => i64::MIN as f64,
            DType::U8 => 0.0,
            DType::U16 => 0.0,
        }
    }

    /// Largest representable value, as f64.
    pub fn max_value(&self) -> f64 {
        match self {
            DType::F32 => f32::MAX as f64,
            DType::F64 => f64::MAX,
            DType::I32 => i32::MAX as f64,
            DType::I64 => i64::MAX as f64,
            DType::U8 => u8::MAX as f64,
            DType::U16 => u16::MAX as f64,
        }
    }
}

impl fmt::Display for DType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DType::F32 => "f32",
            DType::F64 => "f64",
            DType::I32 => "i32",
            DType::I64 => "i64",
            DType::U8 => "u8",
            DType::U16 => "u16",
        };
        f.write_str(name)
    }
}

impl FromStr for DType {
    type Err = MediRustError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "f32" | "float32" => Ok(DType::F32),
            "f64" | "float64" => Ok(DType::F64),
            "i32" | "int32" => Ok(DType::I32),
            "i64" | "int64" => Ok(DType::I64),
            "u8" | "uint8" => Ok(DType::U8),
            "u16" | "uint16" => Ok(DType::U16),
            other => Err(MediRustError::InvalidArgument(format!(
                "Unknown dtype '{}'",
                other
            ))),
        }
    }
}
