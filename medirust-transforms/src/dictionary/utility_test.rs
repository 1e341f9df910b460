use super::*;
use medirust_core::utils::testing::arange_volume;
use medirust_core::Volume;

fn sample() -> DataDict {
    let mut data = DataDict::new();
    data.insert("image".to_string(), arange_volume(&[2, 3, 4]));
    data.insert("label".to_string(), arange_volume(&[2, 3, 4]));
    data.insert("extra".to_string(), arange_volume(&[5]));
    data
}

#[test]
fn test_as_channel_first_and_last_d() -> Result<(), MediRustError> {
    let data = AsChannelFirstd::new(vec!["image", "label"], -1).apply(sample())?;
    assert_eq!(data["image"].shape(), vec![4, 2, 3]);
    assert_eq!(data["label"].shape(), vec![4, 2, 3]);
    assert_eq!(data["extra"].shape(), vec![5]);

    let data = AsChannelLastD::new("image", 0).apply(data)?;
    assert_eq!(data["image"].shape(), vec![2, 3, 4]);
    assert_eq!(data["label"].shape(), vec![4, 2, 3]);
    Ok(())
}

#[test]
fn test_add_and_repeat_channel_d() -> Result<(), MediRustError> {
    let data = AddChanneld::new("extra").apply(sample())?;
    assert_eq!(data["extra"].shape(), vec![1, 5]);
    let data = RepeatChannelDict::new("extra", 3)?.apply(data)?;
    assert_eq!(data["extra"].shape(), vec![3, 5]);
    assert!(RepeatChanneld::new("extra", 0).is_err());
    Ok(())
}

#[test]
fn test_cast_squeeze_transpose_d() -> Result<(), MediRustError> {
    let data = CastToTyped::new("label", DType::U8).apply(sample())?;
    assert_eq!(data["label"].dtype(), DType::U8);
    assert_eq!(data["image"].dtype(), DType::F32);

    let mut data = data;
    data.insert("mask".to_string(), Volume::new(vec![1.0, 0.0], vec![1, 2, 1])?);
    let data = SqueezeDimd::new("mask", None).apply(data)?;
    assert_eq!(data["mask"].shape(), vec![2]);

    let data = Transposed::new(vec!["image", "label"], vec![0, 2, 1]).apply(data)?;
    assert_eq!(data["image"].shape(), vec![2, 4, 3]);
    assert_eq!(data["label"].shape(), vec![2, 4, 3]);
    Ok(())
}

#[test]
fn test_missing_key_is_an_error() {
    let result = AddChanneld::new("missing").apply(sample());
    assert_eq!(
        result.unwrap_err(),
        MediRustError::KeyNotFound {
            key: "missing".to_string()
        }
    );
}

#[test]
fn test_delete_keys_d() -> Result<(), MediRustError> {
    let data = DeleteKeysd::new(vec!["label", "not_there"]).apply(sample())?;
    let keys: Vec<&String> = data.keys().collect();
    assert_eq!(keys, vec!["extra", "image"]);
    Ok(())
}
