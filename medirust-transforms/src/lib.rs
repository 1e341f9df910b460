//! Preprocessing and augmentation transforms for medical imaging volumes.
//!
//! Transforms come in two flavours:
//! * array transforms ([`array`]) operate on a single channel-first [`Volume`],
//! * dictionary transforms ([`dictionary`], `...d` suffix) operate on a
//!   [`DataDict`] and apply the same spatial decision to every selected key,
//!   so an image and its label stay aligned.
//!
//! Both implement [`Transform`] and can be chained with [`Compose`].

pub mod array;
pub mod compose;
pub mod dictionary;
pub mod filters;
pub mod randomizable;
pub mod transform;
pub mod utils;

pub use compose::Compose;
pub use randomizable::RandomState;
pub use transform::{DataDict, KeysCollection, Transform};

pub use medirust_core::{DType, MediRustError, Volume};
