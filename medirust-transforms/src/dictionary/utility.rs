use medirust_core::{DType, MediRustError};

use crate::array::utility::{
    AddChannel, AsChannelFirst, AsChannelLast, CastToType, RepeatChannel, SqueezeDim, Transpose,
};
use crate::transform::{DataDict, KeysCollection, Transform};

map_transform!(
    /// Dictionary wrapper of [`AsChannelFirst`].
    AsChannelFirstd,
    AsChannelFirst
);

impl AsChannelFirstd {
    pub fn new(keys: impl Into<KeysCollection>, channel_dim: isize) -> Self {
        AsChannelFirstd {
            keys: keys.into(),
            converter: AsChannelFirst::new(channel_dim),
        }
    }
}

map_transform!(
    /// Dictionary wrapper of [`AsChannelLast`].
    AsChannelLastd,
    AsChannelLast
);

impl AsChannelLastd {
    pub fn new(keys: impl Into<KeysCollection>, channel_dim: isize) -> Self {
        AsChannelLastd {
            keys: keys.into(),
            converter: AsChannelLast::new(channel_dim),
        }
    }
}

map_transform!(
    /// Dictionary wrapper of [`AddChannel`].
    AddChanneld,
    AddChannel
);

impl AddChanneld {
    pub fn new(keys: impl Into<KeysCollection>) -> Self {
        AddChanneld {
            keys: keys.into(),
            converter: AddChannel,
        }
    }
}

map_transform!(
    /// Dictionary wrapper of [`RepeatChannel`].
    RepeatChanneld,
    RepeatChannel
);

impl RepeatChanneld {
    pub fn new(keys: impl Into<KeysCollection>, repeats: usize) -> Result<Self, MediRustError> {
        Ok(RepeatChanneld {
            keys: keys.into(),
            converter: RepeatChannel::new(repeats)?,
        })
    }
}

map_transform!(
    /// Dictionary wrapper of [`CastToType`].
    CastToTyped,
    CastToType
);

impl CastToTyped {
    pub fn new(keys: impl Into<KeysCollection>, dtype: DType) -> Self {
        CastToTyped {
            keys: keys.into(),
            converter: CastToType::new(dtype),
        }
    }
}

map_transform!(
    /// Dictionary wrapper of [`SqueezeDim`].
    SqueezeDimd,
    SqueezeDim
);

impl SqueezeDimd {
    pub fn new(keys: impl Into<KeysCollection>, dim: Option<usize>) -> Self {
        SqueezeDimd {
            keys: keys.into(),
            converter: SqueezeDim::new(dim),
        }
    }
}

map_transform!(
    /// Dictionary wrapper of [`Transpose`].
    Transposed,
    Transpose
);

impl Transposed {
    pub fn new(keys: impl Into<KeysCollection>, indices: Vec<usize>) -> Self {
        Transposed {
            keys: keys.into(),
            converter: Transpose::new(indices),
        }
    }
}

/// Removes the given keys from the dictionary. Absent keys are ignored.
#[derive(Debug, Clone)]
pub struct DeleteKeysd {
    keys: KeysCollection,
}

impl DeleteKeysd {
    pub fn new(keys: impl Into<KeysCollection>) -> Self {
        DeleteKeysd { keys: keys.into() }
    }
}

impl Transform<DataDict> for DeleteKeysd {
    fn apply(&mut self, data: DataDict) -> Result<DataDict, MediRustError> {
        Ok(data
            .into_iter()
            .filter(|(key, _)| !self.keys.contains(key))
            .collect())
    }
}

dict_aliases! {
    AsChannelFirstd => AsChannelFirstD, AsChannelFirstDict;
    AsChannelLastd => AsChannelLastD, AsChannelLastDict;
    AddChanneld => AddChannelD, AddChannelDict;
    RepeatChanneld => RepeatChannelD, RepeatChannelDict;
    CastToTyped => CastToTypeD, CastToTypeDict;
    SqueezeDimd => SqueezeDimD, SqueezeDimDict;
    Transposed => TransposeD, TransposeDict;
    DeleteKeysd => DeleteKeysD, DeleteKeysDict;
}

#[cfg(test)]
#[path = "utility_test.rs"]
mod tests;
