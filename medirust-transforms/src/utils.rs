//! Array helpers shared by the transforms: bounds, rescaling, crop/paste
//! geometry, one-hot encoding, sampling grids and affine matrices.

use std::ops::Range;

use medirust_core::volume::utils::{calculate_strides, increment_coord};
use medirust_core::{DType, MediRustError, PadMode, Volume};
use nalgebra::DMatrix;

use crate::randomizable::RandomState;

/// Returns true with probability `prob` (`random() <= prob`).
pub fn rand_choice(state: &mut RandomState, prob: f64) -> bool {
    state.random() <= prob
}

/// First and last non-zero column, then first and last non-zero row, of a 2D image.
pub fn img_bounds(img: &Volume) -> Result<[usize; 4], MediRustError> {
    if img.rank() != 2 {
        return Err(MediRustError::RankMismatch {
            expected: 2,
            actual: img.rank(),
        });
    }
    let cols = img.any_along(&[0])?.get_f64_data();
    let rows = img.any_along(&[1])?.get_f64_data();
    let first_last = |flags: &[f64]| -> Option<(usize, usize)> {
        let first = flags.iter().position(|&v| v != 0.0)?;
        let last = flags.iter().rposition(|&v| v != 0.0)?;
        Some((first, last))
    };
    match (first_last(&cols), first_last(&rows)) {
        (Some((c0, c1)), Some((r0, r1))) => Ok([c0, c1, r0, r1]),
        _ => Err(MediRustError::InvalidArgument(
            "img_bounds: image has no non-zero element".to_string(),
        )),
    }
}

/// True if `(x, y)` lies inside `[margin, maxx - margin) x [margin, maxy - margin)`.
pub fn in_bounds(x: f64, y: f64, margin: f64, maxx: f64, maxy: f64) -> bool {
    margin <= x && x < (maxx - margin) && margin <= y && y < (maxy - margin)
}

/// True if the maximum is not greater than the minimum.
///
/// Uses `!(max > min)` so an all-NaN image also counts as empty.
pub fn is_empty(img: &Volume) -> bool {
    match (img.max(), img.min()) {
        (Ok(max), Ok(min)) => !(max > min),
        _ => true,
    }
}

/// Copy of `seq` with exactly `dim` values, truncated or padded with defaults.
pub fn ensure_tuple_size<T: Clone + Default>(seq: &[T], dim: usize) -> Vec<T> {
    let mut out: Vec<T> = seq.iter().take(dim).cloned().collect();
    out.resize(dim, T::default());
    out
}

/// Repeats a single value `dim` times, or returns a `dim`-long sequence as is.
pub fn ensure_tuple_rep<T: Clone>(seq: &[T], dim: usize) -> Result<Vec<T>, MediRustError> {
    match seq.len() {
        1 => Ok(vec![seq[0].clone(); dim]),
        n if n == dim => Ok(seq.to_vec()),
        n => Err(MediRustError::InvalidArgument(format!(
            "sequence must have length 1 or {}, got {}",
            dim, n
        ))),
    }
}

/// True if the first and last `margin` indices of axes 1 and 2 are all zero.
pub fn zero_margins(img: &Volume, margin: usize) -> Result<bool, MediRustError> {
    if img.rank() < 3 {
        return Err(MediRustError::RankMismatch {
            expected: 3,
            actual: img.rank(),
        });
    }
    let shape = img.shape();
    for axis in [2usize, 1] {
        let dim = shape[axis];
        let head = 0..margin.min(dim);
        let tail = dim.saturating_sub(margin)..dim;
        for band in [head, tail] {
            let mut ranges: Vec<Range<usize>> = shape.iter().map(|&d| 0..d).collect();
            ranges[axis] = band;
            if img.slice(&ranges)?.any() {
                return Ok(false);
            }
        }
    }
    Ok(true)
}

/// Min-max rescales `arr` into `[minv, maxv]`.
///
/// The input is first cast to `dtype` when given; the result is stored as
/// `dtype`, or keeps the float dtype of `arr` (integers become F64).
/// A constant array returns `arr * minv`.
pub fn rescale_array(
    arr: &Volume,
    minv: f64,
    maxv: f64,
    dtype: Option<DType>,
) -> Result<Volume, MediRustError> {
    let arr = match dtype {
        Some(dtype) => arr.cast(dtype)?,
        None => arr.clone(),
    };
    let out_dtype = match dtype {
        Some(dtype) => dtype,
        None if arr.dtype().is_float() => arr.dtype(),
        None => DType::F64,
    };
    let mina = arr.min()?;
    let maxa = arr.max()?;
    if mina == maxa {
        log::warn!(
            "rescale_array: constant input ({}), returning arr * minv",
            mina
        );
        return arr.map(out_dtype, |v| v * minv);
    }
    let range = maxa - mina;
    arr.map(out_dtype, |v| (v - mina) / range * (maxv - minv) + minv)
}

/// Rescales every slice along the first axis independently.
pub fn rescale_instance_array(
    arr: &Volume,
    minv: f64,
    maxv: f64,
    dtype: DType,
) -> Result<Volume, MediRustError> {
    let shape = arr.shape();
    let Some(&count) = shape.first() else {
        return Err(MediRustError::RankMismatch {
            expected: 1,
            actual: 0,
        });
    };
    let mut values = Vec::with_capacity(arr.numel());
    for i in 0..count {
        let slice = arr.slice(&[i..i + 1])?;
        values.extend(rescale_array(&slice, minv, maxv, Some(dtype))?.get_f64_data());
    }
    Volume::from_f64_values(&values, shape, dtype)
}

/// Rescales `arr` to the full value range of the integer `dtype` and casts.
pub fn rescale_array_int_max(arr: &Volume, dtype: DType) -> Result<Volume, MediRustError> {
    if dtype.is_float() {
        return Err(MediRustError::InvalidArgument(format!(
            "rescale_array_int_max needs an integer dtype, got {}",
            dtype
        )));
    }
    rescale_array(arr, dtype.min_value(), dtype.max_value(), Some(DType::F64))?.cast(dtype)
}

/// Per-axis source and destination ranges for copying a region of size
/// `dims` centred at `srccenter` in the source into a region centred at
/// `destcenter` in the destination.
///
/// A `None` (or zero) entry of `dims` copies the whole axis. The region is
/// `dim / 2` before the centre and `dim / 2 + 1` from the centre on, clipped
/// to fit both arrays.
pub fn copypaste_arrays(
    src_shape: &[usize],
    dest_shape: &[usize],
    srccenter: &[usize],
    destcenter: &[usize],
    dims: &[Option<usize>],
) -> (Vec<Range<usize>>, Vec<Range<usize>>) {
    let mut src_ranges: Vec<Range<usize>> = src_shape.iter().map(|&d| 0..d).collect();
    let mut dest_ranges: Vec<Range<usize>> = dest_shape.iter().map(|&d| 0..d).collect();

    let axes = src_shape
        .len()
        .min(dest_shape.len())
        .min(srccenter.len())
        .min(destcenter.len())
        .min(dims.len());
    for i in 0..axes {
        let dim = match dims[i] {
            Some(d) if d > 0 => d,
            _ => continue,
        };
        let (ss, ds, sc, dc) = (src_shape[i], dest_shape[i], srccenter[i], destcenter[i]);
        let before = (dim / 2).min(sc.min(dc));
        let after = (dim / 2 + 1).min(ss.saturating_sub(sc).min(ds.saturating_sub(dc)));
        src_ranges[i] = (sc - before)..(sc + after);
        dest_ranges[i] = (dc - before)..(dc + after);
    }
    (src_ranges, dest_ranges)
}

/// Crops or pads `img` around its centre to `dims` (one entry per axis,
/// `None` keeps the axis). New voxels take `fill_value`.
pub fn resize_center(
    img: &Volume,
    dims: &[Option<usize>],
    fill_value: f64,
) -> Result<Volume, MediRustError> {
    let shape = img.shape();
    if dims.len() != shape.len() {
        return Err(MediRustError::RankMismatch {
            expected: shape.len(),
            actual: dims.len(),
        });
    }
    let resize_dims: Vec<usize> = dims
        .iter()
        .zip(shape.iter())
        .map(|(d, &s)| d.filter(|&d| d > 0).unwrap_or(s))
        .collect();
    let half_src: Vec<usize> = shape.iter().map(|&d| d / 2).collect();
    let half_dest: Vec<usize> = resize_dims.iter().map(|&d| d / 2).collect();
    let copy_dims: Vec<Option<usize>> = resize_dims.iter().map(|&d| Some(d)).collect();

    let (src, dest) = copypaste_arrays(&shape, &resize_dims, &half_src, &half_dest, &copy_dims);
    let widths: Vec<(usize, usize)> = dest
        .iter()
        .zip(resize_dims.iter())
        .map(|(r, &d)| (r.start, d - r.end))
        .collect();
    img.slice(&src)?.pad(&widths, PadMode::Constant, fill_value)
}

/// One-hot encodes integer labels as a new last axis of length `num_classes`.
///
/// Labels are taken modulo `num_classes` (Euclidean), the result keeps the
/// dtype of `labels`.
pub fn one_hot(labels: &Volume, num_classes: usize) -> Result<Volume, MediRustError> {
    if num_classes == 0 {
        return Err(MediRustError::InvalidArgument(
            "one_hot: num_classes must be positive".to_string(),
        ));
    }
    let n = num_classes as i64;
    let mut values = vec![0.0; labels.numel() * num_classes];
    for (i, v) in labels.get_f64_data().into_iter().enumerate() {
        let class = (v as i64).rem_euclid(n) as usize;
        values[i * num_classes + class] = 1.0;
    }
    let mut shape = labels.shape();
    shape.push(num_classes);
    Volume::from_f64_values(&values, shape, labels.dtype())
}

/// Centred `ij` mesh of `spatial_size`.
///
/// Axis `k` runs from `-(d - 1) / 2 * s` to `(d - 1) / 2 * s`. The result is
/// an F64 volume of shape `[n, d1, ..., dn]`, or `[n + 1, ...]` with a
/// trailing row of ones when `homogeneous`.
pub fn create_grid(
    spatial_size: &[usize],
    spacing: Option<&[f64]>,
    homogeneous: bool,
) -> Result<Volume, MediRustError> {
    let ndim = spatial_size.len();
    let spacing: Vec<f64> = match spacing {
        Some(s) if s.len() == ndim => s.to_vec(),
        Some(s) => {
            return Err(MediRustError::InvalidArgument(format!(
                "create_grid: {} spacing values for {} spatial dims",
                s.len(),
                ndim
            )))
        }
        None => vec![1.0; ndim],
    };
    let axis_values: Vec<Vec<f64>> = spatial_size
        .iter()
        .zip(spacing.iter())
        .map(|(&d, &s)| {
            let half = (d as f64 - 1.0) / 2.0 * s;
            if d <= 1 {
                vec![-half; d]
            } else {
                let step = 2.0 * half / (d as f64 - 1.0);
                (0..d).map(|i| -half + step * i as f64).collect()
            }
        })
        .collect();

    let numel: usize = spatial_size.iter().product();
    let rows = if homogeneous { ndim + 1 } else { ndim };
    let mut values = vec![1.0; rows * numel];
    if numel > 0 {
        let mut coord = vec![0; ndim];
        let mut p = 0;
        loop {
            for (k, &c) in coord.iter().enumerate() {
                values[k * numel + p] = axis_values[k][c];
            }
            p += 1;
            if !increment_coord(&mut coord, spatial_size) {
                break;
            }
        }
    }
    let mut shape = vec![rows];
    shape.extend_from_slice(spatial_size);
    Volume::from_f64_values(&values, shape, DType::F64)
}

/// Homogeneous control-point grid covering `spatial_shape` with control
/// points `spacing` voxels apart (plus a border of control points).
pub fn create_control_grid(spatial_shape: &[usize], spacing: &[f64]) -> Result<Volume, MediRustError> {
    if spacing.len() != spatial_shape.len() {
        return Err(MediRustError::InvalidArgument(format!(
            "create_control_grid: {} spacing values for {} spatial dims",
            spacing.len(),
            spatial_shape.len()
        )));
    }
    let mut grid_shape = Vec::with_capacity(spatial_shape.len());
    for (&s, &t) in spatial_shape.iter().zip(spacing.iter()) {
        if t <= 0.0 {
            return Err(MediRustError::InvalidArgument(format!(
                "control grid spacing must be positive, got {}",
                t
            )));
        }
        let s_f = s as f64;
        let count = if s % 2 == 0 {
            ((s_f - 1.0) / (2.0 * t) + 0.5).ceil() * 2.0 + 2.0
        } else {
            ((s_f - 1.0) / (2.0 * t)).ceil() * 2.0 + 3.0
        };
        grid_shape.push(count.max(0.0) as usize);
    }
    create_grid(&grid_shape, Some(spacing), true)
}

/// 2D or 3D homogeneous rotation matrix.
///
/// In 3D up to three angles are used, composed as `Rx * Ry * Rz`.
pub fn create_rotate(spatial_dims: usize, radians: &[f64]) -> Result<DMatrix<f64>, MediRustError> {
    match (spatial_dims, radians.len()) {
        (2, n) if n >= 1 => {
            let (sin, cos) = radians[0].sin_cos();
            Ok(DMatrix::from_row_slice(
                3,
                3,
                &[cos, -sin, 0.0, sin, cos, 0.0, 0.0, 0.0, 1.0],
            ))
        }
        (3, n) if n >= 1 => {
            let (sin, cos) = radians[0].sin_cos();
            let mut affine = DMatrix::from_row_slice(
                4,
                4,
                &[
                    1.0, 0.0, 0.0, 0.0, //
                    0.0, cos, -sin, 0.0, //
                    0.0, sin, cos, 0.0, //
                    0.0, 0.0, 0.0, 1.0,
                ],
            );
            if let Some(&angle) = radians.get(1) {
                let (sin, cos) = angle.sin_cos();
                affine *= DMatrix::from_row_slice(
                    4,
                    4,
                    &[
                        cos, 0.0, sin, 0.0, //
                        0.0, 1.0, 0.0, 0.0, //
                        -sin, 0.0, cos, 0.0, //
                        0.0, 0.0, 0.0, 1.0,
                    ],
                );
            }
            if let Some(&angle) = radians.get(2) {
                let (sin, cos) = angle.sin_cos();
                affine *= DMatrix::from_row_slice(
                    4,
                    4,
                    &[
                        cos, -sin, 0.0, 0.0, //
                        sin, cos, 0.0, 0.0, //
                        0.0, 0.0, 1.0, 0.0, //
                        0.0, 0.0, 0.0, 1.0,
                    ],
                );
            }
            Ok(affine)
        }
        _ => Err(MediRustError::InvalidArgument(format!(
            "create_rotate got spatial_dims={}, radians={:?}",
            spatial_dims, radians
        ))),
    }
}

/// 2D (2 coefficients) or 3D (6 coefficients) shearing matrix; missing
/// coefficients are zero.
pub fn create_shear(spatial_dims: usize, coefs: &[f64]) -> Result<DMatrix<f64>, MediRustError> {
    match spatial_dims {
        2 => {
            let c = ensure_tuple_size(coefs, 2);
            Ok(DMatrix::from_row_slice(
                3,
                3,
                &[1.0, c[0], 0.0, c[1], 1.0, 0.0, 0.0, 0.0, 1.0],
            ))
        }
        3 => {
            let c = ensure_tuple_size(coefs, 6);
            Ok(DMatrix::from_row_slice(
                4,
                4,
                &[
                    1.0, c[0], c[1], 0.0, //
                    c[2], 1.0, c[3], 0.0, //
                    c[4], c[5], 1.0, 0.0, //
                    0.0, 0.0, 0.0, 1.0,
                ],
            ))
        }
        _ => Err(MediRustError::UnsupportedOperation(format!(
            "create_shear supports 2 or 3 spatial dims, got {}",
            spatial_dims
        ))),
    }
}

/// Diagonal scaling matrix; missing factors are one.
pub fn create_scale(spatial_dims: usize, scale: &[f64]) -> DMatrix<f64> {
    let mut diagonal: Vec<f64> = scale.iter().take(spatial_dims).copied().collect();
    diagonal.resize(spatial_dims, 1.0);
    diagonal.push(1.0);
    DMatrix::from_diagonal(&nalgebra::DVector::from_vec(diagonal))
}

/// Translation matrix; missing offsets are zero.
pub fn create_translate(spatial_dims: usize, shift: &[f64]) -> DMatrix<f64> {
    let mut affine = DMatrix::identity(spatial_dims + 1, spatial_dims + 1);
    for (i, &a) in shift.iter().take(spatial_dims).enumerate() {
        affine[(i, spatial_dims)] = a;
    }
    affine
}

/// Patch size clipped to the image: `None` entries take the full axis.
pub fn get_valid_patch_size(image_shape: &[usize], patch_size: &[Option<usize>]) -> Vec<usize> {
    image_shape
        .iter()
        .enumerate()
        .map(|(i, &dim)| match patch_size.get(i).copied().flatten() {
            Some(p) => p.min(dim),
            None => dim,
        })
        .collect()
}

/// Ranges of a patch of `patch_size` at a uniformly random position in `dims`.
pub fn get_random_patch(
    dims: &[usize],
    patch_size: &[usize],
    state: &mut RandomState,
) -> Result<Vec<Range<usize>>, MediRustError> {
    if dims.len() != patch_size.len() {
        return Err(MediRustError::RankMismatch {
            expected: dims.len(),
            actual: patch_size.len(),
        });
    }
    dims.iter()
        .zip(patch_size.iter())
        .map(|(&d, &p)| {
            if p > d {
                return Err(MediRustError::InvalidArgument(format!(
                    "patch size {:?} larger than image {:?}",
                    patch_size, dims
                )));
            }
            let start = state.randint(d - p + 1)?;
            Ok(start..start + p)
        })
        .collect()
}

/// Bounding box of the voxels selected by `select_fn` in the spatial axes of
/// a channel-first image.
///
/// Only `channel_indices` are searched (all channels when `None`). Returns
/// `(start, end)` with exclusive ends, expanded by `margin` and clipped to the
/// image, or `None` when nothing is selected.
pub fn generate_spatial_bounding_box(
    img: &Volume,
    select_fn: &dyn Fn(f64) -> bool,
    channel_indices: Option<&[usize]>,
    margin: usize,
) -> Result<Option<(Vec<usize>, Vec<usize>)>, MediRustError> {
    let shape = img.shape();
    if shape.len() < 2 {
        return Err(MediRustError::RankMismatch {
            expected: 2,
            actual: shape.len(),
        });
    }
    let spatial = &shape[1..];
    let channels: Vec<usize> = match channel_indices {
        Some(indices) => indices.to_vec(),
        None => (0..shape[0]).collect(),
    };
    if let Some(&bad) = channels.iter().find(|&&c| c >= shape[0]) {
        return Err(MediRustError::IndexOutOfBounds {
            index: vec![bad],
            shape: shape.clone(),
        });
    }

    let spatial_numel: usize = spatial.iter().product();
    let strides = calculate_strides(spatial);
    let data = img.get_f64_data();
    let mut lo = vec![usize::MAX; spatial.len()];
    let mut hi = vec![0usize; spatial.len()];
    let mut found = false;
    for &c in &channels {
        let channel = &data[c * spatial_numel..(c + 1) * spatial_numel];
        for (p, &v) in channel.iter().enumerate() {
            if !select_fn(v) {
                continue;
            }
            found = true;
            for (axis, &stride) in strides.iter().enumerate() {
                let coord = (p / stride) % spatial[axis];
                lo[axis] = lo[axis].min(coord);
                hi[axis] = hi[axis].max(coord);
            }
        }
    }
    if !found {
        return Ok(None);
    }
    let start = lo.iter().map(|&l| l.saturating_sub(margin)).collect();
    let end = hi
        .iter()
        .zip(spatial.iter())
        .map(|(&h, &d)| h.saturating_add(1).saturating_add(margin).min(d))
        .collect();
    Ok(Some((start, end)))
}

/// Applies a homogeneous `affine` to every point of `grid` (`[n + 1, ...]`).
pub fn apply_affine_to_grid(affine: &DMatrix<f64>, grid: &Volume) -> Result<Volume, MediRustError> {
    let shape = grid.shape();
    let rows = shape.first().copied().unwrap_or(0);
    if affine.nrows() != rows || affine.ncols() != rows {
        return Err(MediRustError::ShapeMismatch {
            expected: vec![rows, rows],
            actual: vec![affine.nrows(), affine.ncols()],
            operation: "apply_affine_to_grid".to_string(),
        });
    }
    let points = grid.numel() / rows.max(1);
    let coords = DMatrix::from_row_slice(rows, points, &grid.get_f64_data());
    let warped = affine * coords;
    // Column-major storage of the transpose is the row-major layout of `warped`.
    let values: Vec<f64> = warped.transpose().as_slice().to_vec();
    Volume::from_f64_values(&values, shape, DType::F64)
}

#[cfg(test)]
#[path = "utils_test.rs"]
mod tests;
