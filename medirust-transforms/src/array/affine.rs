//! Sampling grids, resampling and the affine / elastic warps built on them.
//!
//! A grid is an F64 volume of shape `[n + 1, o1, ..., on]` holding homogeneous
//! coordinates in centred voxel units: `(0, .., 0, 1)` is the centre of the
//! input image, one unit is one voxel.

use std::fmt;
use std::str::FromStr;

use medirust_core::volume::utils::calculate_strides;
use medirust_core::{DType, MediRustError, Volume};
use nalgebra::DMatrix;

use crate::filters::{gaussian_filter, interpolate_cubic};
use crate::randomizable::RandomState;
use crate::transform::Transform;
use crate::utils::{apply_affine_to_grid, create_control_grid, create_grid, create_rotate,
    create_scale, create_shear, create_translate};

/// Interpolation used when reading the input at grid positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InterpolationMode {
    /// Nearest voxel, ties rounded to even.
    Nearest,
    /// Linear in every spatial axis.
    #[default]
    Bilinear,
}

impl fmt::Display for InterpolationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InterpolationMode::Nearest => write!(f, "nearest"),
            InterpolationMode::Bilinear => write!(f, "bilinear"),
        }
    }
}

impl FromStr for InterpolationMode {
    type Err = MediRustError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "nearest" => Ok(InterpolationMode::Nearest),
            "bilinear" | "linear" | "trilinear" => Ok(InterpolationMode::Bilinear),
            other => Err(MediRustError::InvalidArgument(format!(
                "unknown interpolation mode '{}'",
                other
            ))),
        }
    }
}

/// How grid positions outside the input are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaddingMode {
    /// Outside voxels read as zero.
    #[default]
    Zeros,
    /// Positions are clamped to the border voxels.
    Border,
    /// Positions are mirrored at the border voxel centres.
    Reflection,
}

impl fmt::Display for PaddingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaddingMode::Zeros => write!(f, "zeros"),
            PaddingMode::Border => write!(f, "border"),
            PaddingMode::Reflection => write!(f, "reflection"),
        }
    }
}

impl FromStr for PaddingMode {
    type Err = MediRustError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "zeros" => Ok(PaddingMode::Zeros),
            "border" => Ok(PaddingMode::Border),
            "reflection" => Ok(PaddingMode::Reflection),
            other => Err(MediRustError::InvalidArgument(format!(
                "unknown padding mode '{}'",
                other
            ))),
        }
    }
}

/// Affine transform of sampling coordinates.
///
/// The matrix is `I * R * Sh * T * S`; a parameter list that is empty does
/// not contribute.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AffineGrid {
    pub rotate_params: Vec<f64>,
    pub shear_params: Vec<f64>,
    pub translate_params: Vec<f64>,
    pub scale_params: Vec<f64>,
}

impl AffineGrid {
    pub fn new(
        rotate_params: Vec<f64>,
        shear_params: Vec<f64>,
        translate_params: Vec<f64>,
        scale_params: Vec<f64>,
    ) -> Self {
        AffineGrid {
            rotate_params,
            shear_params,
            translate_params,
            scale_params,
        }
    }

    pub fn with_rotate(mut self, radians: Vec<f64>) -> Self {
        self.rotate_params = radians;
        self
    }

    pub fn with_shear(mut self, coefs: Vec<f64>) -> Self {
        self.shear_params = coefs;
        self
    }

    pub fn with_translate(mut self, shift: Vec<f64>) -> Self {
        self.translate_params = shift;
        self
    }

    pub fn with_scale(mut self, scale: Vec<f64>) -> Self {
        self.scale_params = scale;
        self
    }

    /// The homogeneous `(n + 1) x (n + 1)` matrix for `spatial_dims`.
    pub fn affine_matrix(&self, spatial_dims: usize) -> Result<DMatrix<f64>, MediRustError> {
        let mut affine = DMatrix::identity(spatial_dims + 1, spatial_dims + 1);
        if !self.rotate_params.is_empty() {
            affine *= create_rotate(spatial_dims, &self.rotate_params)?;
        }
        if !self.shear_params.is_empty() {
            affine *= create_shear(spatial_dims, &self.shear_params)?;
        }
        if !self.translate_params.is_empty() {
            affine *= create_translate(spatial_dims, &self.translate_params);
        }
        if !self.scale_params.is_empty() {
            affine *= create_scale(spatial_dims, &self.scale_params);
        }
        Ok(affine)
    }

    /// Transforms `grid`, or a fresh `create_grid(spatial_size)` when no grid is given.
    pub fn generate(
        &self,
        spatial_size: Option<&[usize]>,
        grid: Option<&Volume>,
    ) -> Result<Volume, MediRustError> {
        let grid = match (grid, spatial_size) {
            (Some(grid), _) => grid.clone(),
            (None, Some(size)) => create_grid(size, None, true)?,
            (None, None) => {
                return Err(MediRustError::InvalidArgument(
                    "either specify a grid or a spatial size to create a grid from".to_string(),
                ))
            }
        };
        let spatial_dims = grid.rank().saturating_sub(1);
        let affine = self.affine_matrix(spatial_dims)?;
        apply_affine_to_grid(&affine, &grid)
    }
}

impl Transform<Volume> for AffineGrid {
    fn apply(&mut self, grid: Volume) -> Result<Volume, MediRustError> {
        self.generate(None, Some(&grid))
    }
}

/// Affine grid with parameters drawn at random on every call.
///
/// Rotation, shear and translation parameters are drawn from `U(-f, f)` for
/// every entry `f` of their range; scale factors from `1 + U(-f, f)`.
#[derive(Debug, Clone, Default)]
pub struct RandAffineGrid {
    pub rotate_range: Vec<f64>,
    pub shear_range: Vec<f64>,
    pub translate_range: Vec<f64>,
    pub scale_range: Vec<f64>,
    params: AffineGrid,
    state: RandomState,
}

impl RandAffineGrid {
    pub fn new(
        rotate_range: Vec<f64>,
        shear_range: Vec<f64>,
        translate_range: Vec<f64>,
        scale_range: Vec<f64>,
    ) -> Self {
        RandAffineGrid {
            rotate_range,
            shear_range,
            translate_range,
            scale_range,
            params: AffineGrid::default(),
            state: RandomState::new(),
        }
    }

    /// Draws new affine parameters.
    pub fn randomize(&mut self) {
        let state = &mut self.state;
        let mut draw = |range: &[f64]| -> Vec<f64> {
            range.iter().map(|&f| state.uniform(-f, f)).collect()
        };
        let rotate = draw(&self.rotate_range);
        let shear = draw(&self.shear_range);
        let translate = draw(&self.translate_range);
        let scale: Vec<f64> = draw(&self.scale_range).into_iter().map(|s| 1.0 + s).collect();
        self.params = AffineGrid::new(rotate, shear, translate, scale);
        log::debug!("RandAffineGrid: sampled {:?}", self.params);
    }

    /// The parameters of the last draw.
    pub fn params(&self) -> &AffineGrid {
        &self.params
    }

    /// Draws new parameters and applies them.
    pub fn generate(
        &mut self,
        spatial_size: Option<&[usize]>,
        grid: Option<&Volume>,
    ) -> Result<Volume, MediRustError> {
        self.randomize();
        self.params.generate(spatial_size, grid)
    }

    pub fn set_random_state(&mut self, seed: u64) {
        self.state.reseed(seed);
    }
}

/// Random deformation of a coarse control grid.
///
/// Control points `spacing` voxels apart are displaced by
/// `magnitude * N(0, 1)`, with `magnitude ~ U(magnitude_range)` per call.
#[derive(Debug, Clone)]
pub struct RandDeformGrid {
    pub spacing: Vec<f64>,
    pub magnitude_range: (f64, f64),
    rand_mag: f64,
    state: RandomState,
}

impl RandDeformGrid {
    pub fn new(spacing: Vec<f64>, magnitude_range: (f64, f64)) -> Self {
        RandDeformGrid {
            spacing,
            magnitude_range,
            rand_mag: 1.0,
            state: RandomState::new(),
        }
    }

    /// Homogeneous control grid for `spatial_size` with random offsets added
    /// to the spatial rows.
    pub fn generate(&mut self, spatial_size: &[usize]) -> Result<Volume, MediRustError> {
        let spacing = crate::utils::ensure_tuple_rep(&self.spacing, spatial_size.len())?;
        let control_grid = create_control_grid(spatial_size, &spacing)?;
        let points: usize = control_grid.spatial_shape().iter().product();
        let n = spatial_size.len();

        let offsets = self.state.normal_vec(n * points, 0.0, 1.0)?;
        self.rand_mag = self
            .state
            .uniform(self.magnitude_range.0, self.magnitude_range.1);
        log::debug!("RandDeformGrid: magnitude={}", self.rand_mag);

        let mut values = control_grid.get_f64_data();
        for (v, offset) in values.iter_mut().zip(offsets.iter()) {
            *v += self.rand_mag * offset;
        }
        Volume::from_f64_values(&values, control_grid.shape(), DType::F64)
    }

    pub fn set_random_state(&mut self, seed: u64) {
        self.state.reseed(seed);
    }
}

/// Rounds to the nearest integer, ties to even.
fn round_half_even(x: f64) -> f64 {
    if (x - x.trunc()).abs() == 0.5 {
        2.0 * (x / 2.0).round()
    } else {
        x.round()
    }
}

/// Mirrors `x` into `[0, span]` at the end points.
fn reflect_coordinate(x: f64, span: f64) -> f64 {
    if span <= 0.0 {
        return 0.0;
    }
    let period = 2.0 * span;
    let extra = x.abs() % period;
    if extra > span {
        period - extra
    } else {
        extra
    }
}

/// Reads an image at the positions given by a grid.
#[derive(Debug, Clone, Copy, Default)]
pub struct Resample {
    pub padding_mode: PaddingMode,
}

impl Resample {
    pub fn new(padding_mode: PaddingMode) -> Self {
        Resample { padding_mode }
    }

    /// Samples `img` (`[C, d1, ..., dn]`) at every point of `grid`
    /// (`[n + 1, o1, ..., on]`), returning an F32 `[C, o1, ..., on]` volume.
    pub fn resample(
        &self,
        img: &Volume,
        grid: &Volume,
        mode: InterpolationMode,
    ) -> Result<Volume, MediRustError> {
        let img_shape = img.shape();
        let grid_shape = grid.shape();
        if img_shape.len() < 2 {
            return Err(MediRustError::RankMismatch {
                expected: 2,
                actual: img_shape.len(),
            });
        }
        let n = img_shape.len() - 1;
        if grid_shape.len() != n + 1 || grid_shape[0] != n + 1 {
            return Err(MediRustError::ShapeMismatch {
                expected: vec![n + 1],
                actual: grid_shape,
                operation: "resample (grid must be [spatial_dims + 1, ...])".to_string(),
            });
        }

        let channels = img_shape[0];
        let in_spatial = &img_shape[1..];
        let in_strides = calculate_strides(in_spatial);
        let in_numel: usize = in_spatial.iter().product();
        let out_spatial = &grid_shape[1..];
        let points: usize = out_spatial.iter().product();

        let grid_data = grid.get_f64_data();
        let img_data = img.get_f64_data();
        let mut out = vec![0.0; channels * points];
        let mut index = vec![0.0; n];
        let mut taps: Vec<(usize, f64)> = Vec::with_capacity(1 << n);

        for p in 0..points {
            let w = grid_data[n * points + p];
            let mut valid = true;
            for k in 0..n {
                let centre = (in_spatial[k] as f64 - 1.0) / 2.0;
                let x = grid_data[k * points + p] / w + centre;
                let span = in_spatial[k] as f64 - 1.0;
                index[k] = match self.padding_mode {
                    PaddingMode::Zeros => x,
                    PaddingMode::Border => x.clamp(0.0, span.max(0.0)),
                    PaddingMode::Reflection => {
                        reflect_coordinate(x, span).clamp(0.0, span.max(0.0))
                    }
                };
                if !index[k].is_finite() {
                    valid = false;
                }
            }
            if !valid || in_numel == 0 {
                continue;
            }

            taps.clear();
            match mode {
                InterpolationMode::Nearest => {
                    let mut offset = 0;
                    let mut inside = true;
                    for k in 0..n {
                        let i = round_half_even(index[k]);
                        if i < 0.0 || i >= in_spatial[k] as f64 {
                            inside = false;
                            break;
                        }
                        offset += i as usize * in_strides[k];
                    }
                    if inside {
                        taps.push((offset, 1.0));
                    }
                }
                InterpolationMode::Bilinear => {
                    for corner in 0..(1usize << n) {
                        let mut offset = 0;
                        let mut weight = 1.0;
                        for k in 0..n {
                            let base = index[k].floor();
                            let frac = index[k] - base;
                            let upper = (corner >> k) & 1 == 1;
                            let i = if upper { base + 1.0 } else { base };
                            weight *= if upper { frac } else { 1.0 - frac };
                            if i < 0.0 || i >= in_spatial[k] as f64 {
                                weight = 0.0;
                                break;
                            }
                            offset += i as usize * in_strides[k];
                        }
                        if weight != 0.0 {
                            taps.push((offset, weight));
                        }
                    }
                }
            }

            for c in 0..channels {
                let channel = &img_data[c * in_numel..(c + 1) * in_numel];
                out[c * points + p] = taps.iter().map(|&(o, wt)| wt * channel[o]).sum();
            }
        }

        let mut out_shape = vec![channels];
        out_shape.extend_from_slice(out_spatial);
        Volume::from_f64_values(&out, out_shape, DType::F32)
    }
}

/// Spatial size of the output: the configured one, else the image's own.
fn output_size(configured: &Option<Vec<usize>>, img: &Volume) -> Vec<usize> {
    configured.clone().unwrap_or_else(|| img.spatial_shape())
}

/// Warps an image with fixed affine parameters.
#[derive(Debug, Clone, Default)]
pub struct Affine {
    pub affine_grid: AffineGrid,
    pub resampler: Resample,
    pub spatial_size: Option<Vec<usize>>,
    pub mode: InterpolationMode,
}

impl Affine {
    pub fn new(affine_grid: AffineGrid) -> Self {
        Affine {
            affine_grid,
            ..Default::default()
        }
    }

    pub fn with_spatial_size(mut self, spatial_size: Vec<usize>) -> Self {
        self.spatial_size = Some(spatial_size);
        self
    }

    pub fn with_mode(mut self, mode: InterpolationMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_padding(mut self, padding_mode: PaddingMode) -> Self {
        self.resampler = Resample::new(padding_mode);
        self
    }

    /// Warps `img` with an explicit interpolation mode.
    pub fn warp(&self, img: &Volume, mode: InterpolationMode) -> Result<Volume, MediRustError> {
        let size = output_size(&self.spatial_size, img);
        let grid = self.affine_grid.generate(Some(&size), None)?;
        self.resampler.resample(img, &grid, mode)
    }
}

impl Transform<Volume> for Affine {
    fn apply(&mut self, img: Volume) -> Result<Volume, MediRustError> {
        self.warp(&img, self.mode)
    }
}

/// With probability `prob`, warps the image with a random affine;
/// otherwise it is resampled on the identity grid.
///
/// [`RandAffine::randomize`] draws the decision and the grid once so the same
/// warp can be applied to several images with [`RandAffine::warp`].
#[derive(Debug, Clone)]
pub struct RandAffine {
    pub prob: f64,
    pub rand_affine_grid: RandAffineGrid,
    pub resampler: Resample,
    pub spatial_size: Option<Vec<usize>>,
    pub mode: InterpolationMode,
    do_transform: bool,
    grid: Option<Volume>,
    state: RandomState,
}

impl RandAffine {
    pub fn new(prob: f64, rand_affine_grid: RandAffineGrid) -> Self {
        RandAffine {
            prob,
            rand_affine_grid,
            resampler: Resample::default(),
            spatial_size: None,
            mode: InterpolationMode::default(),
            do_transform: false,
            grid: None,
            state: RandomState::new(),
        }
    }

    pub fn with_spatial_size(mut self, spatial_size: Vec<usize>) -> Self {
        self.spatial_size = Some(spatial_size);
        self
    }

    pub fn with_mode(mut self, mode: InterpolationMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_padding(mut self, padding_mode: PaddingMode) -> Self {
        self.resampler = Resample::new(padding_mode);
        self
    }

    pub fn do_transform(&self) -> bool {
        self.do_transform
    }

    /// Draws the trigger and builds the sampling grid for `spatial_size`.
    pub fn randomize(&mut self, spatial_size: &[usize]) -> Result<(), MediRustError> {
        self.do_transform = self.state.random() < self.prob;
        log::debug!("RandAffine: do_transform={}", self.do_transform);
        let grid = if self.do_transform {
            self.rand_affine_grid.generate(Some(spatial_size), None)?
        } else {
            create_grid(spatial_size, None, true)?
        };
        self.grid = Some(grid);
        Ok(())
    }

    /// Resamples `img` on the grid of the last [`RandAffine::randomize`].
    pub fn warp(&self, img: &Volume, mode: InterpolationMode) -> Result<Volume, MediRustError> {
        let grid = self.grid.as_ref().ok_or_else(|| {
            MediRustError::InternalError("RandAffine::warp called before randomize".to_string())
        })?;
        self.resampler.resample(img, grid, mode)
    }

    pub fn output_size(&self, img: &Volume) -> Vec<usize> {
        output_size(&self.spatial_size, img)
    }
}

impl Default for RandAffine {
    fn default() -> Self {
        Self::new(0.1, RandAffineGrid::default())
    }
}

impl Transform<Volume> for RandAffine {
    fn apply(&mut self, img: Volume) -> Result<Volume, MediRustError> {
        let size = self.output_size(&img);
        self.randomize(&size)?;
        self.warp(&img, self.mode)
    }

    fn set_random_state(&mut self, seed: u64) {
        self.state.reseed(seed);
        let child = self.state.next_seed();
        self.rand_affine_grid.set_random_state(child);
    }
}

/// Random 2D elastic deformation followed by a random affine.
///
/// A control grid is deformed, warped by a random affine, upsampled to the
/// output size with cubic interpolation and used to resample the image.
#[derive(Debug, Clone)]
pub struct Rand2DElastic {
    pub prob: f64,
    pub deform_grid: RandDeformGrid,
    pub rand_affine_grid: RandAffineGrid,
    pub resampler: Resample,
    pub spatial_size: Option<Vec<usize>>,
    pub mode: InterpolationMode,
    do_transform: bool,
    grid: Option<Volume>,
    state: RandomState,
}

impl Rand2DElastic {
    pub fn new(
        spacing: Vec<f64>,
        magnitude_range: (f64, f64),
        prob: f64,
        rand_affine_grid: RandAffineGrid,
    ) -> Self {
        Rand2DElastic {
            prob,
            deform_grid: RandDeformGrid::new(spacing, magnitude_range),
            rand_affine_grid,
            resampler: Resample::default(),
            spatial_size: None,
            mode: InterpolationMode::default(),
            do_transform: false,
            grid: None,
            state: RandomState::new(),
        }
    }

    pub fn with_spatial_size(mut self, spatial_size: Vec<usize>) -> Self {
        self.spatial_size = Some(spatial_size);
        self
    }

    pub fn with_mode(mut self, mode: InterpolationMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_padding(mut self, padding_mode: PaddingMode) -> Self {
        self.resampler = Resample::new(padding_mode);
        self
    }

    pub fn do_transform(&self) -> bool {
        self.do_transform
    }

    pub fn randomize(&mut self, spatial_size: &[usize]) -> Result<(), MediRustError> {
        if spatial_size.len() != 2 {
            return Err(MediRustError::InvalidArgument(format!(
                "Rand2DElastic needs a 2D spatial size, got {:?}",
                spatial_size
            )));
        }
        self.do_transform = self.state.random() < self.prob;
        log::debug!("Rand2DElastic: do_transform={}", self.do_transform);
        let grid = if self.do_transform {
            let control = self.deform_grid.generate(spatial_size)?;
            let control = self.rand_affine_grid.generate(None, Some(&control))?;
            interpolate_cubic(&control, spatial_size)?
        } else {
            create_grid(spatial_size, None, true)?
        };
        self.grid = Some(grid);
        Ok(())
    }

    pub fn warp(&self, img: &Volume, mode: InterpolationMode) -> Result<Volume, MediRustError> {
        let grid = self.grid.as_ref().ok_or_else(|| {
            MediRustError::InternalError("Rand2DElastic::warp called before randomize".to_string())
        })?;
        self.resampler.resample(img, grid, mode)
    }

    pub fn output_size(&self, img: &Volume) -> Vec<usize> {
        output_size(&self.spatial_size, img)
    }
}

impl Transform<Volume> for Rand2DElastic {
    fn apply(&mut self, img: Volume) -> Result<Volume, MediRustError> {
        let size = self.output_size(&img);
        self.randomize(&size)?;
        self.warp(&img, self.mode)
    }

    fn set_random_state(&mut self, seed: u64) {
        self.state.reseed(seed);
        let deform_seed = self.state.next_seed();
        let affine_seed = self.state.next_seed();
        self.deform_grid.set_random_state(deform_seed);
        self.rand_affine_grid.set_random_state(affine_seed);
    }
}

/// Random 3D elastic deformation followed by a random affine.
///
/// Dense offsets drawn from `U(-1, 1)` are smoothed by a Gaussian of
/// `sigma ~ U(sigma_range)`, scaled by `magnitude ~ U(magnitude_range)` and
/// added to the identity grid before the random affine is applied.
#[derive(Debug, Clone)]
pub struct Rand3DElastic {
    pub sigma_range: (f64, f64),
    pub magnitude_range: (f64, f64),
    pub prob: f64,
    pub rand_affine_grid: RandAffineGrid,
    pub resampler: Resample,
    pub spatial_size: Option<Vec<usize>>,
    pub mode: InterpolationMode,
    do_transform: bool,
    grid: Option<Volume>,
    state: RandomState,
}

impl Rand3DElastic {
    pub fn new(
        sigma_range: (f64, f64),
        magnitude_range: (f64, f64),
        prob: f64,
        rand_affine_grid: RandAffineGrid,
    ) -> Self {
        Rand3DElastic {
            sigma_range,
            magnitude_range,
            prob,
            rand_affine_grid,
            resampler: Resample::default(),
            spatial_size: None,
            mode: InterpolationMode::default(),
            do_transform: false,
            grid: None,
            state: RandomState::new(),
        }
    }

    pub fn with_spatial_size(mut self, spatial_size: Vec<usize>) -> Self {
        self.spatial_size = Some(spatial_size);
        self
    }

    pub fn with_mode(mut self, mode: InterpolationMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_padding(mut self, padding_mode: PaddingMode) -> Self {
        self.resampler = Resample::new(padding_mode);
        self
    }

    pub fn do_transform(&self) -> bool {
        self.do_transform
    }

    pub fn randomize(&mut self, spatial_size: &[usize]) -> Result<(), MediRustError> {
        if spatial_size.len() != 3 {
            return Err(MediRustError::InvalidArgument(format!(
                "Rand3DElastic needs a 3D spatial size, got {:?}",
                spatial_size
            )));
        }
        self.do_transform = self.state.random() < self.prob;
        if !self.do_transform {
            log::debug!("Rand3DElastic: do_transform=false");
            self.grid = Some(create_grid(spatial_size, None, true)?);
            return Ok(());
        }

        let points: usize = spatial_size.iter().product();
        let offsets = self.state.uniform_vec(3 * points, -1.0, 1.0);
        let magnitude = self
            .state
            .uniform(self.magnitude_range.0, self.magnitude_range.1);
        let sigma = self.state.uniform(self.sigma_range.0, self.sigma_range.1);
        log::debug!(
            "Rand3DElastic: do_transform=true magnitude={} sigma={}",
            magnitude,
            sigma
        );

        let grid = create_grid(spatial_size, None, true)?;
        let mut values = grid.get_f64_data();
        for axis in 0..3 {
            let offset = Volume::from_vec_f64(
                offsets[axis * points..(axis + 1) * points].to_vec(),
                spatial_size.to_vec(),
            )?;
            let smoothed = gaussian_filter(&offset, sigma)?.get_f64_data();
            for (v, s) in values[axis * points..(axis + 1) * points]
                .iter_mut()
                .zip(smoothed.iter())
            {
                *v += s * magnitude;
            }
        }
        let grid = Volume::from_f64_values(&values, grid.shape(), DType::F64)?;
        self.grid = Some(self.rand_affine_grid.generate(None, Some(&grid))?);
        Ok(())
    }

    pub fn warp(&self, img: &Volume, mode: InterpolationMode) -> Result<Volume, MediRustError> {
        let grid = self.grid.as_ref().ok_or_else(|| {
            MediRustError::InternalError("Rand3DElastic::warp called before randomize".to_string())
        })?;
        self.resampler.resample(img, grid, mode)
    }

    pub fn output_size(&self, img: &Volume) -> Vec<usize> {
        output_size(&self.spatial_size, img)
    }
}

impl Transform<Volume> for Rand3DElastic {
    fn apply(&mut self, img: Volume) -> Result<Volume, MediRustError> {
        let size = self.output_size(&img);
        self.randomize(&size)?;
        self.warp(&img, self.mode)
    }

    fn set_random_state(&mut self, seed: u64) {
        self.state.reseed(seed);
        let child = self.state.next_seed();
        self.rand_affine_grid.set_random_state(child);
    }
}

#[cfg(test)]
#[path = "affine_test.rs"]
mod tests;
