//! Core volume library for MediRust.
//!
//! Provides [`Volume`], a dtype-tagged, contiguous n-d array used to carry
//! medical images (channel-first `[C, spatial...]`) through preprocessing and
//! augmentation pipelines, plus the array operations the transforms are built on.

pub mod buffer;
pub mod error;
pub mod ops;
pub mod types;
pub mod volume;

pub mod utils;

// Re-export the main types so they are reachable as `medirust_core::Volume` etc.
pub use buffer::Buffer;
pub use error::MediRustError;
pub use ops::pad::PadMode;
pub use types::DType;
pub use volume::Volume;
