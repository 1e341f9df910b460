use std::collections::BTreeMap;

use medirust_core::{MediRustError, Volume};

/// A named collection of volumes, e.g. `{"image": .., "label": ..}`.
pub type DataDict = BTreeMap<String, Volume>;

/// A unary operation on a sample of type `I`.
///
/// Array transforms implement `Transform<Volume>`, dictionary transforms
/// implement `Transform<DataDict>`. Random transforms keep their own
/// [`crate::RandomState`] and override [`Transform::set_random_state`].
pub trait Transform<I>: Send {
    /// Transforms `input`, consuming it.
    fn apply(&mut self, input: I) -> Result<I, MediRustError>;

    /// Reseeds the transform's random state. Deterministic transforms ignore it.
    fn set_random_state(&mut self, _seed: u64) {}
}

/// The keys a dictionary transform operates on.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct KeysCollection(Vec<String>);

impl KeysCollection {
    pub fn new(keys: Vec<String>) -> Self {
        KeysCollection(keys)
    }

    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.iter().any(|k| k == key)
    }

    pub fn first(&self) -> Option<&str> {
        self.0.first().map(|k| k.as_str())
    }
}

impl From<&str> for KeysCollection {
    fn from(key: &str) -> Self {
        KeysCollection(vec![key.to_string()])
    }
}

impl From<String> for KeysCollection {
    fn from(key: String) -> Self {
        KeysCollection(vec![key])
    }
}

impl From<Vec<&str>> for KeysCollection {
    fn from(keys: Vec<&str>) -> Self {
        KeysCollection(keys.into_iter().map(String::from).collect())
    }
}

impl From<Vec<String>> for KeysCollection {
    fn from(keys: Vec<String>) -> Self {
        KeysCollection(keys)
    }
}

impl From<&[&str]> for KeysCollection {
    fn from(keys: &[&str]) -> Self {
        KeysCollection(keys.iter().map(|k| k.to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for KeysCollection {
    fn from(keys: [&str; N]) -> Self {
        KeysCollection(keys.iter().map(|k| k.to_string()).collect())
    }
}

/// Looks up `key`, reporting a missing entry as `KeyNotFound`.
pub fn get_key<'a>(data: &'a DataDict, key: &str) -> Result<&'a Volume, MediRustError> {
    data.get(key).ok_or_else(|| MediRustError::KeyNotFound {
        key: key.to_string(),
    })
}

/// Replaces every selected entry with `f(position_in_keys, volume)`.
///
/// Entries that are not in `keys` are left untouched.
pub fn apply_to_keys<F>(
    mut data: DataDict,
    keys: &KeysCollection,
    mut f: F,
) -> Result<DataDict, MediRustError>
where
    F: FnMut(usize, Volume) -> Result<Volume, MediRustError>,
{
    for (i, key) in keys.iter().enumerate() {
        let volume = data
            .remove(key)
            .ok_or_else(|| MediRustError::KeyNotFound { key: key.clone() })?;
        let transformed = f(i, volume)?;
        data.insert(key.clone(), transformed);
    }
    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> DataDict {
        let mut data = DataDict::new();
        data.insert("image".to_string(), Volume::new(vec![1.0, 2.0], vec![1, 2]).unwrap());
        data.insert("label".to_string(), Volume::new(vec![0.0, 1.0], vec![1, 2]).unwrap());
        data
    }

    #[test]
    fn test_keys_collection_from_variants() {
        assert_eq!(KeysCollection::from("image").len(), 1);
        let keys: KeysCollection = vec!["image", "label"].into();
        assert!(keys.contains("label"));
        assert_eq!(keys.first(), Some("image"));
        let keys: KeysCollection = ["a", "b", "c"].into();
        assert_eq!(keys.len(), 3);
        let slice: &[&str] = &["x"];
        assert_eq!(KeysCollection::from(slice), KeysCollection::from("x"));
    }

    #[test]
    fn test_apply_to_keys_leaves_other_keys() -> Result<(), MediRustError> {
        let data = sample();
        let out = apply_to_keys(data, &"image".into(), |_, v| v.mul_scalar(2.0))?;
        assert_eq!(out["image"].get_f64_data(), vec![2.0, 4.0]);
        assert_eq!(out["label"].get_f64_data(), vec![0.0, 1.0]);
        Ok(())
    }

    #[test]
    fn test_apply_to_keys_missing_key() {
        let result = apply_to_keys(sample(), &"mask".into(), |_, v| Ok(v));
        assert_eq!(
            result.unwrap_err(),
            MediRustError::KeyNotFound {
                key: "mask".to_string()
            }
        );
    }
}
