//! "Vanilla" transforms operating on a single channel-first [`Volume`].
//!
//! [`Volume`]: medirust_core::Volume

pub mod affine;
pub mod intensity;
pub mod spatial;
pub mod utility;

pub use affine::{
    Affine, AffineGrid, InterpolationMode, PaddingMode, Rand2DElastic, Rand3DElastic, RandAffine,
    RandAffineGrid, RandDeformGrid, Resample,
};
pub use intensity::{
    IntensityNormalizer, RandGaussianNoise, RandShiftIntensity, Rescale, ShiftIntensity,
};
pub use spatial::{
    CenterSpatialCrop, CropForeground, Flip, ImageEndPadder, RandFlip, RandRotate90, ResizeCenter,
    Rotate90, Spacing, SpatialCrop, UniformRandomPatch,
};
pub use utility::{
    AddChannel, AsChannelFirst, AsChannelLast, CastToType, RepeatChannel, SqueezeDim, Transpose,
};
