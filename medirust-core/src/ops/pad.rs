use std::fmt;
use std::str::FromStr;

use crate::error::MediRustError;
use crate::ops::view::utils::gather_by_coord_or_fill;
use crate::volume::Volume;

/// Padding strategies, named after their `np.pad` counterparts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PadMode {
    /// Pads with a constant value.
    #[default]
    Constant,
    /// Pads with the edge values of the array.
    Edge,
    /// Mirror without repeating the edge value: `[1,2,3] -> 3,2,[1,2,3],2,1`.
    Reflect,
    /// Mirror repeating the edge value: `[1,2,3] -> 2,1,[1,2,3],3,2`.
    Symmetric,
    /// Periodic: `[1,2,3] -> 2,3,[1,2,3],1,2`.
    Wrap,
}

impl fmt::Display for PadMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PadMode::Constant => "constant",
            PadMode::Edge => "edge",
            PadMode::Reflect => "reflect",
            PadMode::Symmetric => "symmetric",
            PadMode::Wrap => "wrap",
        };
        f.write_str(name)
    }
}

impl FromStr for PadMode {
    type Err = MediRustError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "constant" => Ok(PadMode::Constant),
            "edge" => Ok(PadMode::Edge),
            "reflect" => Ok(PadMode::Reflect),
            "symmetric" => Ok(PadMode::Symmetric),
            "wrap" => Ok(PadMode::Wrap),
            other => Err(MediRustError::InvalidArgument(format!(
                "Unknown pad mode '{}'",
                other
            ))),
        }
    }
}

/// Maps a position relative to the start of the original data (`x` may be
/// negative or past the end) to a source index, or `None` for constant fill.
fn source_index(mode: PadMode, x: isize, dim: usize) -> Option<usize> {
    let d = dim as isize;
    if (0..d).contains(&x) {
        return Some(x as usize);
    }
    match mode {
        PadMode::Constant => None,
        PadMode::Edge => Some(x.clamp(0, d - 1) as usize),
        PadMode::Reflect => {
            if d == 1 {
                return Some(0);
            }
            let period = 2 * (d - 1);
            let r = x.rem_euclid(period);
            let idx = if r >= d { period - r } else { r };
            Some(idx as usize)
        }
        PadMode::Symmetric => {
            let period = 2 * d;
            let r = x.rem_euclid(period);
            let idx = if r >= d { period - 1 - r } else { r };
            Some(idx as usize)
        }
        PadMode::Wrap => Some(x.rem_euclid(d) as usize),
    }
}

/// Pads `input` with `widths[i] = (before, after)` elements along axis `i`.
///
/// `widths` must have one entry per axis. `value` is only used by
/// [`PadMode::Constant`]. Padding an empty axis with any other mode fails.
pub fn pad_op(
    input: &Volume,
    widths: &[(usize, usize)],
    mode: PadMode,
    value: f64,
) -> Result<Volume, MediRustError> {
    let rank = input.rank();
    if widths.len() != rank {
        return Err(MediRustError::RankMismatch {
            expected: rank,
            actual: widths.len(),
        });
    }
    if widths.iter().all(|&(b, a)| b == 0 && a == 0) {
        return Ok(input.clone());
    }
    if mode != PadMode::Constant {
        if let Some(axis) = (0..rank).find(|&i| input.shape[i] == 0 && widths[i] != (0, 0)) {
            return Err(MediRustError::UnsupportedOperation(format!(
                "cannot pad empty axis {} with mode '{}'",
                axis, mode
            )));
        }
    }

    let shape = input.shape();
    log::debug!("pad_op: {:?} widths {:?} mode '{}'", shape, widths, mode);
    let new_shape: Vec<usize> = shape
        .iter()
        .zip(widths.iter())
        .map(|(&d, &(b, a))| d + b + a)
        .collect();

    gather_by_coord_or_fill(input, new_shape, value, |out, src| {
        for i in 0..out.len() {
            let x = out[i] as isize - widths[i].0 as isize;
            match source_index(mode, x, shape[i]) {
                Some(s) => src[i] = s,
                None => return false,
            }
        }
        true
    })
}

#[cfg(test)]
#[path = "pad_test.rs"]
mod tests;
