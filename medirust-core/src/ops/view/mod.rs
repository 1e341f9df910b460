//! Layout operations.
//!
//! Volumes are always stored contiguously, so these ops materialise a new
//! buffer (except `reshape`/`squeeze`/`unsqueeze`, which share it). The element
//! dtype is never changed.

pub mod flip;
pub mod permute;
pub mod repeat;
pub mod slice;
pub mod squeeze_unsqueeze;
pub(crate) mod utils;

pub use flip::{flip_op, rot90_op};
pub use permute::{moveaxis_op, permute_op, transpose_op};
pub use repeat::repeat_interleave_op;
pub use slice::slice_op;
pub use squeeze_unsqueeze::{reshape_op, squeeze_op, unsqueeze_op};
