use std::fmt::Debug;

use num_traits::ToPrimitive;

use crate::error::MediRustError;
use crate::types::DType;

/// Scalar types that can live inside a [`Buffer`].
///
/// Conversion from f64 follows Rust `as` semantics: floats round-trip,
/// integers truncate toward zero and saturate, NaN becomes 0.
pub trait Element: Copy + Debug + Send + Sync + ToPrimitive + 'static {
    const DTYPE: DType;

    fn from_f64(value: f64) -> Self;

    fn to_f64_lossy(self) -> f64 {
        self.to_f64().unwrap_or(f64::NAN)
    }

    fn wrap(data: Vec<Self>) -> Buffer;
}

macro_rules! impl_element {
    ($t:ty, $variant:ident) => {
        impl Element for $t {
            const DTYPE: DType = DType::$variant;

            fn from_f64(value: f64) -> Self {
                value as $t
            }

            fn wrap(data: Vec<Self>) -> Buffer {
                Buffer::$variant(data)
            }
        }
    };
}

impl_element!(f32, F32);
impl_element!(f64, F64);
impl_element!(i32, I32);
impl_element!(i64, I64);
impl_element!(u8, U8);
impl_element!(u16, U16);

/// Typed contiguous storage for a Volume, one variant per [`DType`].
#[derive(Debug, Clone, PartialEq)]
pub enum Buffer {
    F32(Vec<f32>),
    F64(Vec<f64>),
    I32(Vec<i32>),
    I64(Vec<i64>),
    U8(Vec<u8>),
    U16(Vec<u16>),
}

/// Runs `$body` with `$data` bound to the typed vector of `$buffer`.
macro_rules! dispatch {
    ($buffer:expr, $data:ident => $body:expr) => {
        match $buffer {
            Buffer::F32($data) => $body,
            Buffer::F64($data) => $body,
            Buffer::I32($data) => $body,
            Buffer::I64($data) => $body,
            Buffer::U8($data) => $body,
            Buffer::U16($data) => $body,
        }
    };
}

impl Buffer {
    /// Builds a buffer of `dtype` from f64 values, casting each element.
    pub fn from_f64_slice(dtype: DType, values: &[f64]) -> Buffer {
        fn cast<T: Element>(values: &[f64]) -> Buffer {
            T::wrap(values.iter().map(|&v| T::from_f64(v)).collect())
        }
        match dtype {
            DType::F32 => cast::<f32>(values),
            DType::F64 => Buffer::F64(values.to_vec()),
            DType::I32 => cast::<i32>(values),
            DType::I64 => cast::<i64>(values),
            DType::U8 => cast::<u8>(values),
            DType::U16 => cast::<u16>(values),
        }
    }

    /// Builds a buffer of `dtype` holding `len` copies of `value`.
    pub fn filled(dtype: DType, len: usize, value: f64) -> Buffer {
        fn fill<T: Element>(len: usize, value: f64) -> Buffer {
            T::wrap(vec![T::from_f64(value); len])
        }
        match dtype {
            DType::F32 => fill::<f32>(len, value),
            DType::F64 => fill::<f64>(len, value),
            DType::I32 => fill::<i32>(len, value),
            DType::I64 => fill::<i64>(len, value),
            DType::U8 => fill::<u8>(len, value),
            DType::U16 => fill::<u16>(len, value),
        }
    }

    pub fn dtype(&self) -> DType {
        match self {
            Buffer::F32(_) => DType::F32,
            Buffer::F64(_) => DType::F64,
            Buffer::I32(_) => DType::I32,
            Buffer::I64(_) => DType::I64,
            Buffer::U8(_) => DType::U8,
            Buffer::U16(_) => DType::U16,
        }
    }

    pub fn len(&self) -> usize {
        dispatch!(self, data => data.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Reads element `index` as f64.
    pub fn get_f64(&self, index: usize) -> Option<f64> {
        dispatch!(self, data => data.get(index).map(|v| v.to_f64_lossy()))
    }

    /// Copies the whole buffer into a Vec<f64>.
    pub fn to_f64_vec(&self) -> Vec<f64> {
        dispatch!(self, data => data.iter().map(|v| v.to_f64_lossy()).collect())
    }

    /// Builds a new buffer of the same dtype holding `self[indices[i]]`.
    ///
    /// This is the single primitive behind every layout-changing op
    /// (permute, flip, slice, pad...), so it never changes the dtype.
    pub fn gather(&self, indices: &[usize]) -> Result<Buffer, MediRustError> {
        let len = self.len();
        if let Some(&bad) = indices.iter().find(|&&i| i >= len) {
            return Err(MediRustError::IndexOutOfBounds {
                index: vec![bad],
                shape: vec![len],
            });
        }
        fn go<T: Element>(data: &[T], indices: &[usize]) -> Buffer {
            T::wrap(indices.iter().map(|&i| data[i]).collect())
        }
        Ok(dispatch!(self, data => go(data, indices)))
    }

    /// Like [`Buffer::gather`] but `None` entries are filled with `fill`.
    pub fn gather_or_fill(
        &self,
        indices: &[Option<usize>],
        fill: f64,
    ) -> Result<Buffer, MediRustError> {
        fn go<T: Element>(data: &[T], indices: &[Option<usize>], fill: f64) -> Buffer {
            let fill = T::from_f64(fill);
            T::wrap(
                indices
                    .iter()
                    .map(|i| i.map(|i| data[i]).unwrap_or(fill))
                    .collect(),
            )
        }
        let len = self.len();
        if let Some(bad) = indices.iter().flatten().find(|&&i| i >= len) {
            return Err(MediRustError::IndexOutOfBounds {
                index: vec![*bad],
                shape: vec![len],
            });
        }
        Ok(dispatch!(self, data => go(data, indices, fill)))
    }

    /// Attempts to get the underlying f32 slice.
    pub fn try_get_f32(&self) -> Result<&[f32], MediRustError> {
        match self {
            Buffer::F32(data) => Ok(data),
            other => Err(MediRustError::DataTypeMismatch {
                expected: DType::F32,
                actual: other.dtype(),
                operation: "try_get_f32".to_string(),
            }),
        }
    }

    /// Attempts to get the underlying f64 slice.
    pub fn try_get_f64(&self) -> Result<&[f64], MediRustError> {
        match self {
            Buffer::F64(data) => Ok(data),
            other => Err(MediRustError::DataTypeMismatch {
                expected: DType::F64,
                actual: other.dtype(),
                operation: "try_get_f64".to_string(),
            }),
        }
    }
}
