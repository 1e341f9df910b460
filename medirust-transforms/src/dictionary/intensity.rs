use medirust_core::{DType, MediRustError, Volume};

use crate::array::intensity::{IntensityNormalizer, RandShiftIntensity, Rescale, ShiftIntensity};
use crate::transform::{apply_to_keys, DataDict, KeysCollection, Transform};

map_transform!(
    /// Dictionary wrapper of [`Rescale`].
    Rescaled,
    Rescale
);

impl Rescaled {
    pub fn new(keys: impl Into<KeysCollection>, minv: f64, maxv: f64, dtype: DType) -> Self {
        Rescaled {
            keys: keys.into(),
            converter: Rescale::new(minv, maxv, dtype),
        }
    }
}

map_transform!(
    /// Dictionary wrapper of [`IntensityNormalizer`].
    IntensityNormalizerd,
    IntensityNormalizer
);

impl IntensityNormalizerd {
    pub fn new(
        keys: impl Into<KeysCollection>,
        subtrahend: Option<Volume>,
        divisor: Option<Volume>,
        dtype: DType,
    ) -> Result<Self, MediRustError> {
        Ok(IntensityNormalizerd {
            keys: keys.into(),
            converter: IntensityNormalizer::new(subtrahend, divisor, dtype)?,
        })
    }
}

map_transform!(
    /// Dictionary wrapper of [`ShiftIntensity`].
    ShiftIntensityd,
    ShiftIntensity
);

impl ShiftIntensityd {
    pub fn new(keys: impl Into<KeysCollection>, offset: f64) -> Self {
        ShiftIntensityd {
            keys: keys.into(),
            converter: ShiftIntensity::new(offset),
        }
    }
}

/// Dictionary version of [`RandShiftIntensity`]: one offset and one trigger
/// per call, shared by every key.
#[derive(Debug, Clone)]
pub struct RandShiftIntensityd {
    keys: KeysCollection,
    shifter: RandShiftIntensity,
}

impl RandShiftIntensityd {
    pub fn new(keys: impl Into<KeysCollection>, offsets: (f64, f64), prob: f64) -> Self {
        RandShiftIntensityd {
            keys: keys.into(),
            shifter: RandShiftIntensity::new(offsets, prob),
        }
    }
}

impl Transform<DataDict> for RandShiftIntensityd {
    fn apply(&mut self, data: DataDict) -> Result<DataDict, MediRustError> {
        self.shifter.randomize();
        let shifter = &self.shifter;
        apply_to_keys(data, &self.keys, |_, img| shifter.shift(img))
    }

    fn set_random_state(&mut self, seed: u64) {
        self.shifter.set_random_state(seed);
    }
}

dict_aliases! {
    Rescaled => RescaleD, RescaleDict;
    IntensityNormalizerd => IntensityNormalizerD, IntensityNormalizerDict;
    ShiftIntensityd => ShiftIntensityD, ShiftIntensityDict;
    RandShiftIntensityd => RandShiftIntensityD, RandShiftIntensityDict;
}

#[cfg(test)]
#[path = "intensity_test.rs"]
mod tests;
