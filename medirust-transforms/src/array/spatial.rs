use std::fmt;
use std::ops::Range;
use std::sync::Arc;

use medirust_core::{MediRustError, PadMode, Volume};

use crate::array::affine::{InterpolationMode, PaddingMode, Resample};
use crate::randomizable::RandomState;
use crate::transform::Transform;
use crate::utils::{
    create_grid, ensure_tuple_rep, generate_spatial_bounding_box, get_random_patch,
    get_valid_patch_size, resize_center,
};

/// Resamples the image to a new voxel spacing.
///
/// Entries of `pixdim` that are not positive keep the original spacing of
/// that axis. The output has `max(1, round(d * original / target))` voxels per
/// axis and shares its centre with the input.
#[derive(Debug, Clone)]
pub struct Spacing {
    pub pixdim: Vec<f64>,
    pub mode: InterpolationMode,
    pub resampler: Resample,
}

impl Spacing {
    pub fn new(pixdim: Vec<f64>) -> Self {
        Spacing {
            pixdim,
            mode: InterpolationMode::Bilinear,
            resampler: Resample::new(PaddingMode::Border),
        }
    }

    pub fn with_mode(mut self, mode: InterpolationMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_padding(mut self, padding_mode: PaddingMode) -> Self {
        self.resampler = Resample::new(padding_mode);
        self
    }

    /// Resamples `img` whose voxels measure `original_pixdim`, returning the
    /// image and its new spacing.
    pub fn apply_with_pixdim(
        &self,
        img: &Volume,
        original_pixdim: &[f64],
        mode: InterpolationMode,
    ) -> Result<(Volume, Vec<f64>), MediRustError> {
        let spatial_shape = img.spatial_shape();
        let n = spatial_shape.len();
        let original = ensure_tuple_rep(original_pixdim, n)?;
        if let Some(bad) = original.iter().find(|&&p| p <= 0.0 || !p.is_finite()) {
            return Err(MediRustError::InvalidArgument(format!(
                "original pixdim must be positive, got {}",
                bad
            )));
        }
        let requested = ensure_tuple_rep(&self.pixdim, n)?;
        let target: Vec<f64> = requested
            .iter()
            .zip(original.iter())
            .map(|(&t, &o)| if t > 0.0 { t } else { o })
            .collect();

        let out_size: Vec<usize> = spatial_shape
            .iter()
            .zip(original.iter().zip(target.iter()))
            .map(|(&d, (&o, &t))| ((d as f64 * o / t).round() as usize).max(1))
            .collect();
        let zoom: Vec<f64> = target.iter().zip(original.iter()).map(|(&t, &o)| t / o).collect();
        log::debug!(
            "Spacing: {:?} @ {:?} -> {:?} @ {:?}",
            spatial_shape,
            original,
            out_size,
            target
        );

        let grid = create_grid(&out_size, Some(&zoom), true)?;
        let resampled = self.resampler.resample(img, &grid, mode)?;
        Ok((resampled, target))
    }
}

impl Transform<Volume> for Spacing {
    /// Treats the input spacing as 1 along every axis.
    fn apply(&mut self, img: Volume) -> Result<Volume, MediRustError> {
        let original = vec![1.0; img.spatial_rank()];
        Ok(self.apply_with_pixdim(&img, &original, self.mode)?.0)
    }
}

/// Reverses the order of elements along the given spatial axes
/// (0 is the first axis after the channel). `None` flips every spatial axis.
#[derive(Debug, Clone, Default)]
pub struct Flip {
    pub spatial_axis: Option<Vec<usize>>,
}

impl Flip {
    pub fn new(spatial_axis: Option<Vec<usize>>) -> Self {
        Flip { spatial_axis }
    }

    fn flip(&self, img: &Volume) -> Result<Volume, MediRustError> {
        let spatial_rank = img.spatial_rank();
        let axes: Vec<usize> = match &self.spatial_axis {
            Some(axes) => {
                if let Some(&bad) = axes.iter().find(|&&a| a >= spatial_rank) {
                    return Err(MediRustError::InvalidAxis {
                        axis: bad as isize,
                        rank: spatial_rank,
                    });
                }
                axes.iter().map(|&a| a + 1).collect()
            }
            None => (1..img.rank()).collect(),
        };
        img.flip(&axes)
    }
}

impl Transform<Volume> for Flip {
    fn apply(&mut self, img: Volume) -> Result<Volume, MediRustError> {
        self.flip(&img)
    }
}

/// With probability `prob`, flips the image along `spatial_axis`.
#[derive(Debug, Clone)]
pub struct RandFlip {
    pub prob: f64,
    flipper: Flip,
    do_transform: bool,
    state: RandomState,
}

impl RandFlip {
    pub fn new(prob: f64, spatial_axis: Option<Vec<usize>>) -> Self {
        RandFlip {
            prob,
            flipper: Flip::new(spatial_axis),
            do_transform: false,
            state: RandomState::new(),
        }
    }

    pub fn randomize(&mut self) {
        self.do_transform = self.state.random() < self.prob;
        log::debug!("RandFlip: do_transform={}", self.do_transform);
    }

    pub fn do_transform(&self) -> bool {
        self.do_transform
    }

    /// Applies the last sampled decision.
    pub fn flip(&self, img: Volume) -> Result<Volume, MediRustError> {
        if !self.do_transform {
            return Ok(img);
        }
        self.flipper.flip(&img)
    }
}

impl Default for RandFlip {
    fn default() -> Self {
        Self::new(0.1, None)
    }
}

impl Transform<Volume> for RandFlip {
    fn apply(&mut self, img: Volume) -> Result<Volume, MediRustError> {
        self.randomize();
        self.flip(img)
    }

    fn set_random_state(&mut self, seed: u64) {
        self.state.reseed(seed);
    }
}

/// Rotates by `k` quarter turns in the plane of `axes` (axes of the full
/// array, channel included).
#[derive(Debug, Clone, Copy)]
pub struct Rotate90 {
    pub k: i32,
    pub axes: (usize, usize),
}

impl Rotate90 {
    pub fn new(k: i32, axes: (usize, usize)) -> Self {
        Rotate90 { k, axes }
    }
}

impl Default for Rotate90 {
    fn default() -> Self {
        Self::new(1, (1, 2))
    }
}

impl Transform<Volume> for Rotate90 {
    fn apply(&mut self, img: Volume) -> Result<Volume, MediRustError> {
        img.rot90(self.k, (self.axes.0 as isize, self.axes.1 as isize))
    }
}

/// With probability `prob`, rotates by `k` quarter turns with
/// `k = randint(max_k) + 1`.
#[derive(Debug, Clone)]
pub struct RandRotate90 {
    prob: f64,
    max_k: usize,
    axes: (usize, usize),
    rand_k: usize,
    do_transform: bool,
    state: RandomState,
}

impl RandRotate90 {
    /// `prob` is clamped into `[0, 1]`.
    pub fn new(prob: f64, max_k: usize, axes: (usize, usize)) -> Self {
        RandRotate90 {
            prob: prob.clamp(0.0, 1.0),
            max_k,
            axes,
            rand_k: 0,
            do_transform: false,
            state: RandomState::new(),
        }
    }

    pub fn prob(&self) -> f64 {
        self.prob
    }

    pub fn randomize(&mut self) -> Result<(), MediRustError> {
        self.rand_k = self.state.randint(self.max_k)? + 1;
        self.do_transform = self.state.random() < self.prob;
        log::debug!(
            "RandRotate90: do_transform={} k={}",
            self.do_transform,
            self.rand_k
        );
        Ok(())
    }

    pub fn rand_k(&self) -> usize {
        self.rand_k
    }

    pub fn do_transform(&self) -> bool {
        self.do_transform
    }

    /// Applies the last sampled rotation.
    pub fn rotate(&self, img: Volume) -> Result<Volume, MediRustError> {
        if !self.do_transform {
            return Ok(img);
        }
        Rotate90::new(self.rand_k as i32, self.axes).apply(img)
    }
}

impl Default for RandRotate90 {
    fn default() -> Self {
        Self::new(0.1, 3, (1, 2))
    }
}

impl Transform<Volume> for RandRotate90 {
    fn apply(&mut self, img: Volume) -> Result<Volume, MediRustError> {
        self.randomize()?;
        self.rotate(img)
    }

    fn set_random_state(&mut self, seed: u64) {
        self.state.reseed(seed);
    }
}

/// Pads axes 2 and up at their end until they reach `out_size`.
/// Axes 0 and 1 (batch and channel) are never padded.
#[derive(Debug, Clone)]
pub struct ImageEndPadder {
    pub out_size: Vec<usize>,
    pub mode: PadMode,
}

impl ImageEndPadder {
    pub fn new(out_size: Vec<usize>, mode: PadMode) -> Self {
        ImageEndPadder { out_size, mode }
    }
}

impl Transform<Volume> for ImageEndPadder {
    fn apply(&mut self, img: Volume) -> Result<Volume, MediRustError> {
        let shape = img.shape();
        if shape.len() != self.out_size.len() + 2 {
            return Err(MediRustError::RankMismatch {
                expected: self.out_size.len() + 2,
                actual: shape.len(),
            });
        }
        let mut widths = vec![(0, 0), (0, 0)];
        widths.extend(
            self.out_size
                .iter()
                .zip(shape[2..].iter())
                .map(|(&o, &d)| (0, o.saturating_sub(d))),
        );
        img.pad(&widths, self.mode, 0.0)
    }
}

/// Crops a patch of `patch_size` (spatial axes) at a uniformly random
/// position; the channel axis is kept whole and oversized entries are
/// clipped to the image.
#[derive(Debug, Clone)]
pub struct UniformRandomPatch {
    pub patch_size: Vec<usize>,
    slices: Vec<Range<usize>>,
    state: RandomState,
}

impl UniformRandomPatch {
    pub fn new(patch_size: Vec<usize>) -> Self {
        UniformRandomPatch {
            patch_size,
            slices: Vec::new(),
            state: RandomState::new(),
        }
    }

    /// Draws a patch position for an image of `image_shape`.
    pub fn randomize(&mut self, image_shape: &[usize]) -> Result<(), MediRustError> {
        let mut requested = vec![None];
        requested.extend(self.patch_size.iter().map(|&p| Some(p)));
        let patch = get_valid_patch_size(image_shape, &requested);
        self.slices = get_random_patch(image_shape, &patch, &mut self.state)?;
        log::debug!("UniformRandomPatch: slices={:?}", self.slices);
        Ok(())
    }

    /// Crops at the last drawn position.
    pub fn crop(&self, img: &Volume) -> Result<Volume, MediRustError> {
        img.slice(&self.slices)
    }
}

impl Transform<Volume> for UniformRandomPatch {
    fn apply(&mut self, img: Volume) -> Result<Volume, MediRustError> {
        self.randomize(&img.shape())?;
        self.crop(&img)
    }

    fn set_random_state(&mut self, seed: u64) {
        self.state.reseed(seed);
    }
}

/// Crops the spatial axes to `[roi_start, roi_end)`; the channel axis is kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpatialCrop {
    pub roi_start: Vec<usize>,
    pub roi_end: Vec<usize>,
}

impl SpatialCrop {
    pub fn from_start_end(roi_start: Vec<usize>, roi_end: Vec<usize>) -> Result<Self, MediRustError> {
        if roi_start.len() != roi_end.len() {
            return Err(MediRustError::InvalidArgument(format!(
                "roi_start {:?} and roi_end {:?} differ in length",
                roi_start, roi_end
            )));
        }
        if roi_start.iter().zip(roi_end.iter()).any(|(s, e)| e < s) {
            return Err(MediRustError::InvalidArgument(format!(
                "roi_end {:?} before roi_start {:?}",
                roi_end, roi_start
            )));
        }
        Ok(SpatialCrop { roi_start, roi_end })
    }

    /// Region of `roi_size` whose centre voxel is `roi_center`.
    pub fn from_center_size(roi_center: &[usize], roi_size: &[usize]) -> Result<Self, MediRustError> {
        if roi_center.len() != roi_size.len() {
            return Err(MediRustError::InvalidArgument(format!(
                "roi_center {:?} and roi_size {:?} differ in length",
                roi_center, roi_size
            )));
        }
        let roi_start: Vec<usize> = roi_center
            .iter()
            .zip(roi_size.iter())
            .map(|(&c, &s)| c.saturating_sub(s / 2))
            .collect();
        let roi_end = roi_start.iter().zip(roi_size.iter()).map(|(&b, &s)| b + s).collect();
        Self::from_start_end(roi_start, roi_end)
    }

    pub fn crop(&self, img: &Volume) -> Result<Volume, MediRustError> {
        if img.rank() == 0 || self.roi_start.len() > img.spatial_rank() {
            return Err(MediRustError::RankMismatch {
                expected: img.spatial_rank(),
                actual: self.roi_start.len(),
            });
        }
        let mut ranges = vec![0..img.shape()[0]];
        ranges.extend(
            self.roi_start
                .iter()
                .zip(self.roi_end.iter())
                .map(|(&s, &e)| s..e),
        );
        img.slice(&ranges)
    }
}

impl Transform<Volume> for SpatialCrop {
    fn apply(&mut self, img: Volume) -> Result<Volume, MediRustError> {
        self.crop(&img)
    }
}

/// Crops the centre region of `roi_size`.
#[derive(Debug, Clone)]
pub struct CenterSpatialCrop {
    pub roi_size: Vec<usize>,
}

impl CenterSpatialCrop {
    pub fn new(roi_size: Vec<usize>) -> Self {
        CenterSpatialCrop { roi_size }
    }

    pub fn crop(&self, img: &Volume) -> Result<Volume, MediRustError> {
        let center: Vec<usize> = img.spatial_shape().iter().map(|&d| d / 2).collect();
        let roi_size = ensure_tuple_rep(&self.roi_size, center.len())?;
        SpatialCrop::from_center_size(&center, &roi_size)?.crop(img)
    }
}

impl Transform<Volume> for CenterSpatialCrop {
    fn apply(&mut self, img: Volume) -> Result<Volume, MediRustError> {
        self.crop(&img)
    }
}

/// Voxel predicate used to find the foreground.
pub type SelectFn = Arc<dyn Fn(f64) -> bool + Send + Sync>;

/// Crops to the bounding box of the foreground (`select_fn`, default `> 0`)
/// found in `channel_indices` (all channels by default), grown by `margin`.
///
/// An image without foreground is returned unchanged.
#[derive(Clone)]
pub struct CropForeground {
    select_fn: SelectFn,
    pub channel_indices: Option<Vec<usize>>,
    pub margin: usize,
}

impl CropForeground {
    pub fn new() -> Self {
        CropForeground {
            select_fn: Arc::new(|v| v > 0.0),
            channel_indices: None,
            margin: 0,
        }
    }

    pub fn with_select_fn<F>(mut self, select_fn: F) -> Self
    where
        F: Fn(f64) -> bool + Send + Sync + 'static,
    {
        self.select_fn = Arc::new(select_fn);
        self
    }

    pub fn with_channel_indices(mut self, channel_indices: Vec<usize>) -> Self {
        self.channel_indices = Some(channel_indices);
        self
    }

    pub fn with_margin(mut self, margin: usize) -> Self {
        self.margin = margin;
        self
    }

    /// The crop for `img`, or `None` when it has no foreground.
    pub fn bounding_box(&self, img: &Volume) -> Result<Option<SpatialCrop>, MediRustError> {
        let bbox = generate_spatial_bounding_box(
            img,
            self.select_fn.as_ref(),
            self.channel_indices.as_deref(),
            self.margin,
        )?;
        bbox.map(|(start, end)| SpatialCrop::from_start_end(start, end))
            .transpose()
    }
}

impl Default for CropForeground {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for CropForeground {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CropForeground")
            .field("channel_indices", &self.channel_indices)
            .field("margin", &self.margin)
            .finish_non_exhaustive()
    }
}

impl Transform<Volume> for CropForeground {
    fn apply(&mut self, img: Volume) -> Result<Volume, MediRustError> {
        match self.bounding_box(&img)? {
            Some(crop) => crop.crop(&img),
            None => {
                log::warn!("CropForeground: no foreground found, returning input unchanged");
                Ok(img)
            }
        }
    }
}

/// Crops or pads the spatial axes around the centre to `spatial_dims`
/// (`None` keeps an axis).
#[derive(Debug, Clone)]
pub struct ResizeCenter {
    pub spatial_dims: Vec<Option<usize>>,
    pub fill_value: f64,
}

impl ResizeCenter {
    pub fn new(spatial_dims: Vec<Option<usize>>, fill_value: f64) -> Self {
        ResizeCenter {
            spatial_dims,
            fill_value,
        }
    }
}

impl Transform<Volume> for ResizeCenter {
    fn apply(&mut self, img: Volume) -> Result<Volume, MediRustError> {
        let mut dims = vec![None];
        dims.extend(self.spatial_dims.iter().copied());
        resize_center(&img, &dims, self.fill_value)
    }
}

#[cfg(test)]
#[path = "spatial_test.rs"]
mod tests;
