use medirust_core::{MediRustError, Volume};

use crate::array::affine::{
    Affine, AffineGrid, InterpolationMode, PaddingMode, Rand2DElastic, Rand3DElastic, RandAffine,
    RandAffineGrid,
};
use crate::array::spatial::{
    CenterSpatialCrop, CropForeground, Flip, RandFlip, RandRotate90, Rotate90, Spacing,
    SpatialCrop, UniformRandomPatch,
};
use crate::transform::{apply_to_keys, get_key, DataDict, KeysCollection, Transform};
use crate::utils::ensure_tuple_rep;

/// Key under which the voxel spacing of `key` is stored.
pub fn pixdim_key(key: &str) -> String {
    format!("{}_pixdim", key)
}

/// The first key, whose image decides the random parameters of a call.
fn first_key(keys: &KeysCollection) -> Result<&str, MediRustError> {
    keys.first().ok_or_else(|| {
        MediRustError::InvalidArgument("dictionary transform needs at least one key".to_string())
    })
}

/// Dictionary version of [`Spacing`].
///
/// The spacing of `key` is read from the 1-D volume at `"{key}_pixdim"` (1 along
/// every axis when absent) and the new spacing is written back there.
#[derive(Debug, Clone)]
pub struct Spacingd {
    keys: KeysCollection,
    spacing: Spacing,
    modes: Vec<InterpolationMode>,
}

impl Spacingd {
    pub fn new(keys: impl Into<KeysCollection>, pixdim: Vec<f64>) -> Self {
        let spacing = Spacing::new(pixdim);
        Spacingd {
            keys: keys.into(),
            modes: vec![spacing.mode],
            spacing,
        }
    }

    /// One mode for every key, or one mode per key.
    pub fn with_modes(mut self, modes: Vec<InterpolationMode>) -> Self {
        self.modes = modes;
        self
    }

    pub fn with_padding(mut self, padding_mode: PaddingMode) -> Self {
        self.spacing = self.spacing.with_padding(padding_mode);
        self
    }
}

impl Transform<DataDict> for Spacingd {
    fn apply(&mut self, mut data: DataDict) -> Result<DataDict, MediRustError> {
        let modes = ensure_tuple_rep(&self.modes, self.keys.len())?;
        for (key, mode) in self.keys.iter().zip(modes) {
            let img = get_key(&data, key)?;
            let meta_key = pixdim_key(key);
            let original = match data.get(&meta_key) {
                Some(pixdim) => pixdim.get_f64_data(),
                None => vec![1.0; img.spatial_rank()],
            };
            let (resampled, pixdim) = self.spacing.apply_with_pixdim(img, &original, mode)?;
            let n = pixdim.len();
            data.insert(key.clone(), resampled);
            data.insert(meta_key, Volume::from_vec_f64(pixdim, vec![n])?);
        }
        Ok(data)
    }
}

map_transform!(
    /// Dictionary wrapper of [`Flip`].
    Flipd,
    Flip
);

impl Flipd {
    pub fn new(keys: impl Into<KeysCollection>, spatial_axis: Option<Vec<usize>>) -> Self {
        Flipd {
            keys: keys.into(),
            converter: Flip::new(spatial_axis),
        }
    }
}

map_transform!(
    /// Dictionary wrapper of [`Rotate90`].
    Rotate90d,
    Rotate90
);

impl Rotate90d {
    pub fn new(keys: impl Into<KeysCollection>, k: i32, axes: (usize, usize)) -> Self {
        Rotate90d {
            keys: keys.into(),
            converter: Rotate90::new(k, axes),
        }
    }
}

map_transform!(
    /// Dictionary wrapper of [`SpatialCrop`].
    SpatialCropd,
    SpatialCrop
);

impl SpatialCropd {
    pub fn new(keys: impl Into<KeysCollection>, crop: SpatialCrop) -> Self {
        SpatialCropd {
            keys: keys.into(),
            converter: crop,
        }
    }
}

map_transform!(
    /// Dictionary wrapper of [`CenterSpatialCrop`].
    CenterSpatialCropd,
    CenterSpatialCrop
);

impl CenterSpatialCropd {
    pub fn new(keys: impl Into<KeysCollection>, roi_size: Vec<usize>) -> Self {
        CenterSpatialCropd {
            keys: keys.into(),
            converter: CenterSpatialCrop::new(roi_size),
        }
    }
}

/// Crops every key to the foreground bounding box of `source_key`.
///
/// When the source has no foreground the dictionary is returned unchanged.
#[derive(Debug, Clone)]
pub struct CropForegroundd {
    keys: KeysCollection,
    source_key: String,
    cropper: CropForeground,
}

impl CropForegroundd {
    pub fn new(keys: impl Into<KeysCollection>, source_key: impl Into<String>) -> Self {
        CropForegroundd {
            keys: keys.into(),
            source_key: source_key.into(),
            cropper: CropForeground::new(),
        }
    }

    pub fn with_select_fn<F>(mut self, select_fn: F) -> Self
    where
        F: Fn(f64) -> bool + Send + Sync + 'static,
    {
        self.cropper = self.cropper.with_select_fn(select_fn);
        self
    }

    pub fn with_channel_indices(mut self, channel_indices: Vec<usize>) -> Self {
        self.cropper = self.cropper.with_channel_indices(channel_indices);
        self
    }

    pub fn with_margin(mut self, margin: usize) -> Self {
        self.cropper = self.cropper.with_margin(margin);
        self
    }
}

impl Transform<DataDict> for CropForegroundd {
    fn apply(&mut self, data: DataDict) -> Result<DataDict, MediRustError> {
        let source = get_key(&data, &self.source_key)?;
        match self.cropper.bounding_box(source)? {
            Some(crop) => apply_to_keys(data, &self.keys, |_, img| crop.crop(&img)),
            None => {
                log::warn!(
                    "CropForegroundd: no foreground in '{}', returning data unchanged",
                    self.source_key
                );
                Ok(data)
            }
        }
    }
}

/// Dictionary version of [`Affine`], with one interpolation mode per key.
#[derive(Debug, Clone)]
pub struct Affined {
    keys: KeysCollection,
    affine: Affine,
    modes: Vec<InterpolationMode>,
}

impl Affined {
    pub fn new(keys: impl Into<KeysCollection>, affine_grid: AffineGrid) -> Self {
        Affined {
            keys: keys.into(),
            affine: Affine::new(affine_grid),
            modes: vec![InterpolationMode::default()],
        }
    }

    pub fn with_spatial_size(mut self, spatial_size: Vec<usize>) -> Self {
        self.affine = self.affine.with_spatial_size(spatial_size);
        self
    }

    pub fn with_modes(mut self, modes: Vec<InterpolationMode>) -> Self {
        self.modes = modes;
        self
    }

    pub fn with_padding(mut self, padding_mode: PaddingMode) -> Self {
        self.affine = self.affine.with_padding(padding_mode);
        self
    }
}

impl Transform<DataDict> for Affined {
    fn apply(&mut self, data: DataDict) -> Result<DataDict, MediRustError> {
        let modes = ensure_tuple_rep(&self.modes, self.keys.len())?;
        let affine = &self.affine;
        apply_to_keys(data, &self.keys, |i, img| affine.warp(&img, modes[i]))
    }
}

/// Dictionary version of [`RandFlip`]: one decision per call.
#[derive(Debug, Clone)]
pub struct RandFlipd {
    keys: KeysCollection,
    flipper: RandFlip,
}

impl RandFlipd {
    pub fn new(keys: impl Into<KeysCollection>, prob: f64, spatial_axis: Option<Vec<usize>>) -> Self {
        RandFlipd {
            keys: keys.into(),
            flipper: RandFlip::new(prob, spatial_axis),
        }
    }
}

impl Transform<DataDict> for RandFlipd {
    fn apply(&mut self, data: DataDict) -> Result<DataDict, MediRustError> {
        self.flipper.randomize();
        let flipper = &self.flipper;
        apply_to_keys(data, &self.keys, |_, img| flipper.flip(img))
    }

    fn set_random_state(&mut self, seed: u64) {
        self.flipper.set_random_state(seed);
    }
}

/// Dictionary version of [`RandRotate90`]: one `k` and one decision per call.
#[derive(Debug, Clone)]
pub struct RandRotate90d {
    keys: KeysCollection,
    rotator: RandRotate90,
}

impl RandRotate90d {
    pub fn new(
        keys: impl Into<KeysCollection>,
        prob: f64,
        max_k: usize,
        axes: (usize, usize),
    ) -> Self {
        RandRotate90d {
            keys: keys.into(),
            rotator: RandRotate90::new(prob, max_k, axes),
        }
    }
}

impl Transform<DataDict> for RandRotate90d {
    fn apply(&mut self, data: DataDict) -> Result<DataDict, MediRustError> {
        self.rotator.randomize()?;
        let rotator = &self.rotator;
        apply_to_keys(data, &self.keys, |_, img| rotator.rotate(img))
    }

    fn set_random_state(&mut self, seed: u64) {
        self.rotator.set_random_state(seed);
    }
}

/// Dictionary version of [`UniformRandomPatch`]: the patch position is drawn
/// from the shape of the first key and reused for the others.
#[derive(Debug, Clone)]
pub struct UniformRandomPatchd {
    keys: KeysCollection,
    patcher: UniformRandomPatch,
}

impl UniformRandomPatchd {
    pub fn new(keys: impl Into<KeysCollection>, patch_size: Vec<usize>) -> Self {
        UniformRandomPatchd {
            keys: keys.into(),
            patcher: UniformRandomPatch::new(patch_size),
        }
    }
}

impl Transform<DataDict> for UniformRandomPatchd {
    fn apply(&mut self, data: DataDict) -> Result<DataDict, MediRustError> {
        let shape = get_key(&data, first_key(&self.keys)?)?.shape();
        self.patcher.randomize(&shape)?;
        let patcher = &self.patcher;
        apply_to_keys(data, &self.keys, |_, img| patcher.crop(&img))
    }

    fn set_random_state(&mut self, seed: u64) {
        self.patcher.set_random_state(seed);
    }
}

/// Declares a dictionary transform around a random warp exposing
/// `output_size`, `randomize` and `warp`. The grid is drawn once per call for
/// the output size of the first key and every key is resampled on it with
/// its own mode.
macro_rules! rand_warp_transform {
    ($(#[$meta:meta])* $name:ident, $inner:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone)]
        pub struct $name {
            keys: KeysCollection,
            warper: $inner,
            modes: Vec<InterpolationMode>,
        }

        impl $name {
            pub fn with_spatial_size(mut self, spatial_size: Vec<usize>) -> Self {
                self.warper = self.warper.with_spatial_size(spatial_size);
                self
            }

            /// One mode for every key, or one mode per key.
            pub fn with_modes(mut self, modes: Vec<InterpolationMode>) -> Self {
                self.modes = modes;
                self
            }

            pub fn with_padding(mut self, padding_mode: PaddingMode) -> Self {
                self.warper = self.warper.with_padding(padding_mode);
                self
            }
        }

        impl Transform<DataDict> for $name {
            fn apply(&mut self, data: DataDict) -> Result<DataDict, MediRustError> {
                let modes = ensure_tuple_rep(&self.modes, self.keys.len())?;
                let size = self
                    .warper
                    .output_size(get_key(&data, first_key(&self.keys)?)?);
                self.warper.randomize(&size)?;
                let warper = &self.warper;
                apply_to_keys(data, &self.keys, |i, img| warper.warp(&img, modes[i]))
            }

            fn set_random_state(&mut self, seed: u64) {
                self.warper.set_random_state(seed);
            }
        }
    };
}

rand_warp_transform!(
    /// Dictionary version of [`RandAffine`].
    RandAffined,
    RandAffine
);

impl RandAffined {
    pub fn new(keys: impl Into<KeysCollection>, prob: f64, rand_affine_grid: RandAffineGrid) -> Self {
        RandAffined {
            keys: keys.into(),
            warper: RandAffine::new(prob, rand_affine_grid),
            modes: vec![InterpolationMode::default()],
        }
    }
}

rand_warp_transform!(
    /// Dictionary version of [`Rand2DElastic`].
    Rand2DElasticd,
    Rand2DElastic
);

impl Rand2DElasticd {
    pub fn new(
        keys: impl Into<KeysCollection>,
        spacing: Vec<f64>,
        magnitude_range: (f64, f64),
        prob: f64,
        rand_affine_grid: RandAffineGrid,
    ) -> Self {
        Rand2DElasticd {
            keys: keys.into(),
            warper: Rand2DElastic::new(spacing, magnitude_range, prob, rand_affine_grid),
            modes: vec![InterpolationMode::default()],
        }
    }
}

rand_warp_transform!(
    /// Dictionary version of [`Rand3DElastic`].
    Rand3DElasticd,
    Rand3DElastic
);

impl Rand3DElasticd {
    pub fn new(
        keys: impl Into<KeysCollection>,
        sigma_range: (f64, f64),
        magnitude_range: (f64, f64),
        prob: f64,
        rand_affine_grid: RandAffineGrid,
    ) -> Self {
        Rand3DElasticd {
            keys: keys.into(),
            warper: Rand3DElastic::new(sigma_range, magnitude_range, prob, rand_affine_grid),
            modes: vec![InterpolationMode::default()],
        }
    }
}

dict_aliases! {
    Spacingd => SpacingD, SpacingDict;
    Flipd => FlipD, FlipDict;
    Rotate90d => Rotate90D, Rotate90Dict;
    SpatialCropd => SpatialCropD, SpatialCropDict;
    CenterSpatialCropd => CenterSpatialCropD, CenterSpatialCropDict;
    CropForegroundd => CropForegroundD, CropForegroundDict;
    Affined => AffineD, AffineDict;
    RandFlipd => RandFlipD, RandFlipDict;
    RandRotate90d => RandRotate90D, RandRotate90Dict;
    UniformRandomPatchd => UniformRandomPatchD, UniformRandomPatchDict;
    RandAffined => RandAffineD, RandAffineDict;
    Rand2DElasticd => Rand2DElasticD, Rand2DElasticDict;
    Rand3DElasticd => Rand3DElasticD, Rand3DElasticDict;
}

#[cfg(test)]
#[path = "spatial_test.rs"]
mod tests;
