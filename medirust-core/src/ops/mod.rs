//! # Volume Operations Module (`ops`)
//!
//! This module serves as the central hub for the array operations the
//! transforms are built from. Operations are categorized into submodules based
//! on their functionality.
//!
//! ## Structure:
//!
//! - **`_op` Functions:** Each operation has a core function (named `xxx_op`)
//!   that validates its arguments and produces a new volume. They are public so
//!   transform code can call them directly, and are also exposed as methods on
//!   [`Volume`](crate::volume::Volume).
//! - Volumes are immutable: every `_op` allocates its output.
//!
//! ## Key Submodules:
//!
//! - [`arithmetic`]: Element-wise maps, scalar and broadcast binary arithmetic.
//! - [`dtype`]: Data type conversion (cast).
//! - [`pad`]: NumPy-style padding.
//! - [`reduction`]: Whole-volume statistics and `any` along axes.
//! - [`view`]: Layout operations (permute, squeeze, flip, rot90, slice, repeat).

pub mod arithmetic;
pub mod dtype;
pub mod pad;
pub mod reduction;
pub mod view;
