use super::*;
use medirust_core::utils::testing::{arange_volume, check_volume_near};

fn pair(shape: &[usize]) -> DataDict {
    let mut data = DataDict::new();
    data.insert("image".to_string(), arange_volume(shape));
    data.insert("label".to_string(), arange_volume(shape));
    data
}

#[test]
fn test_spacingd_writes_pixdim() -> Result<(), MediRustError> {
    let mut spacing = Spacingd::new(vec!["image", "label"], vec![2.0])
        .with_modes(vec![InterpolationMode::Bilinear, InterpolationMode::Nearest]);
    let data = spacing.apply(pair(&[1, 4, 4]))?;
    assert_eq!(data["image"].shape(), vec![1, 2, 2]);
    assert_eq!(data["label"].shape(), vec![1, 2, 2]);
    check_volume_near(&data[&pixdim_key("image")], &[2], &[2.0, 2.0], 0.0);
    check_volume_near(&data[&pixdim_key("label")], &[2], &[2.0, 2.0], 0.0);
    for v in data["label"].get_f64_data() {
        assert_eq!(v, v.round());
        assert!((0.0..16.0).contains(&v));
    }

    // Already at the target spacing: the size is kept.
    let data = spacing.apply(data)?;
    assert_eq!(data["image"].shape(), vec![1, 2, 2]);
    Ok(())
}

#[test]
fn test_spacingd_reads_existing_pixdim() -> Result<(), MediRustError> {
    let mut data = pair(&[1, 4, 6]);
    data.insert(
        "image_pixdim".to_string(),
        Volume::from_vec_f64(vec![0.5, 0.5], vec![2])?,
    );
    let data = SpacingDict::new("image", vec![1.0, 0.0]).apply(data)?;
    assert_eq!(data["image"].shape(), vec![1, 2, 6]);
    check_volume_near(&data["image_pixdim"], &[2], &[1.0, 0.5], 0.0);
    assert!(!data.contains_key("label_pixdim"));
    Ok(())
}

#[test]
fn test_spacingd_mode_count_mismatch() {
    let mut spacing = Spacingd::new(vec!["image", "label"], vec![2.0]).with_modes(vec![
        InterpolationMode::Bilinear,
        InterpolationMode::Nearest,
        InterpolationMode::Nearest,
    ]);
    assert!(spacing.apply(pair(&[1, 4, 4])).is_err());
}

#[test]
fn test_flipd_and_rotate90d() -> Result<(), MediRustError> {
    let data = Flipd::new(vec!["image", "label"], Some(vec![1])).apply(pair(&[1, 2, 3]))?;
    let expected = [2.0, 1.0, 0.0, 5.0, 4.0, 3.0];
    check_volume_near(&data["image"], &[1, 2, 3], &expected, 0.0);
    check_volume_near(&data["label"], &[1, 2, 3], &expected, 0.0);

    let data = Rotate90d::new("image", 1, (1, 2)).apply(pair(&[1, 2, 3]))?;
    assert_eq!(data["image"].shape(), vec![1, 3, 2]);
    assert_eq!(data["label"].shape(), vec![1, 2, 3]);
    Ok(())
}

#[test]
fn test_spatial_crops_d() -> Result<(), MediRustError> {
    let crop = SpatialCrop::from_start_end(vec![1, 0], vec![3, 2])?;
    let data = SpatialCropd::new(vec!["image", "label"], crop).apply(pair(&[1, 4, 4]))?;
    check_volume_near(&data["image"], &[1, 2, 2], &[4.0, 5.0, 8.0, 9.0], 0.0);
    check_volume_near(&data["label"], &[1, 2, 2], &[4.0, 5.0, 8.0, 9.0], 0.0);

    let data = CenterSpatialCropD::new("image", vec![2]).apply(pair(&[1, 4, 4]))?;
    check_volume_near(&data["image"], &[1, 2, 2], &[5.0, 6.0, 9.0, 10.0], 0.0);
    Ok(())
}

#[test]
fn test_crop_foregroundd_uses_source_box() -> Result<(), MediRustError> {
    let mut data = DataDict::new();
    data.insert("image".to_string(), arange_volume(&[1, 4, 4]));
    let mut mask = vec![0.0f32; 16];
    mask[5] = 1.0;
    mask[10] = 1.0;
    data.insert("label".to_string(), Volume::new(mask, vec![1, 4, 4])?);

    let data = CropForegroundd::new(vec!["image", "label"], "label").apply(data)?;
    check_volume_near(&data["image"], &[1, 2, 2], &[5.0, 6.0, 9.0, 10.0], 0.0);
    check_volume_near(&data["label"], &[1, 2, 2], &[1.0, 0.0, 0.0, 1.0], 0.0);
    Ok(())
}

#[test]
fn test_crop_foregroundd_margin_and_empty() -> Result<(), MediRustError> {
    let mut data = DataDict::new();
    data.insert("image".to_string(), arange_volume(&[1, 5, 5]));
    let mut mask = vec![0.0f32; 25];
    mask[12] = 3.0;
    data.insert("label".to_string(), Volume::new(mask, vec![1, 5, 5])?);

    let cropped = CropForegroundd::new("image", "label")
        .with_margin(1)
        .apply(data.clone())?;
    assert_eq!(cropped["image"].shape(), vec![1, 3, 3]);

    let unchanged = CropForegroundd::new("image", "label")
        .with_select_fn(|v| v > 5.0)
        .apply(data.clone())?;
    assert_eq!(unchanged["image"], data["image"]);

    assert!(CropForegroundd::new("image", "missing").apply(data).is_err());
    Ok(())
}

#[test]
fn test_affined_per_key_modes() -> Result<(), MediRustError> {
    let mut data = DataDict::new();
    data.insert("image".to_string(), Volume::new(vec![1.0, 2.0, 3.0], vec![1, 1, 3])?);
    data.insert("label".to_string(), Volume::new(vec![1.0, 2.0, 3.0], vec![1, 1, 3])?);
    let mut affine = Affined::new(
        vec!["image", "label"],
        AffineGrid::default().with_translate(vec![0.0, 0.5]),
    )
    .with_modes(vec![InterpolationMode::Bilinear, InterpolationMode::Nearest]);
    let data = affine.apply(data)?;
    check_volume_near(&data["image"], &[1, 1, 3], &[1.5, 2.5, 1.5], 1e-6);
    check_volume_near(&data["label"], &[1, 1, 3], &[1.0, 3.0, 3.0], 1e-6);
    Ok(())
}

#[test]
fn test_rand_flipd_applies_to_all_keys() -> Result<(), MediRustError> {
    let mut flip = RandFlipd::new(vec!["image", "label"], 1.0, None);
    let data = flip.apply(pair(&[1, 2, 2]))?;
    check_volume_near(&data["image"], &[1, 2, 2], &[3.0, 2.0, 1.0, 0.0], 0.0);
    check_volume_near(&data["label"], &[1, 2, 2], &[3.0, 2.0, 1.0, 0.0], 0.0);

    let data = RandFlipD::new("image", 0.0, None).apply(pair(&[1, 2, 2]))?;
    check_volume_near(&data["image"], &[1, 2, 2], &[0.0, 1.0, 2.0, 3.0], 0.0);
    Ok(())
}

#[test]
fn test_rand_rotate90d_consistent() -> Result<(), MediRustError> {
    let mut rotate = RandRotate90d::new(vec!["image", "label"], 1.0, 3, (1, 2));
    rotate.set_random_state(11);
    for _ in 0..8 {
        let data = rotate.apply(pair(&[1, 2, 3]))?;
        assert_eq!(data["image"], data["label"]);
        assert_eq!(data["image"].numel(), 6);
    }
    Ok(())
}

#[test]
fn test_uniform_random_patchd_same_window() -> Result<(), MediRustError> {
    let mut patch = UniformRandomPatchd::new(vec!["image", "label"], vec![2, 3]);
    patch.set_random_state(5);
    for _ in 0..8 {
        let data = patch.apply(pair(&[2, 5, 6]))?;
        assert_eq!(data["image"].shape(), vec![2, 2, 3]);
        assert_eq!(data["image"], data["label"]);
    }
    Ok(())
}

#[test]
fn test_uniform_random_patchd_needs_a_key() {
    let mut patch = UniformRandomPatchd::new(Vec::<String>::new(), vec![2]);
    assert!(patch.apply(pair(&[1, 4])).is_err());
}

#[test]
fn test_rand_affined_shares_grid() -> Result<(), MediRustError> {
    let make = || {
        RandAffined::new(
            vec!["image", "label"],
            1.0,
            RandAffineGrid::new(vec![0.5], vec![0.2], vec![1.0, 1.0], vec![0.1]),
        )
        .with_spatial_size(vec![4, 3])
    };
    let mut a = make();
    a.set_random_state(21);
    let out_a = a.apply(pair(&[1, 5, 5]))?;
    assert_eq!(out_a["image"].shape(), vec![1, 4, 3]);
    assert_eq!(out_a["image"], out_a["label"]);

    let mut b = make();
    b.set_random_state(21);
    let out_b = b.apply(pair(&[1, 5, 5]))?;
    assert_eq!(out_a["image"], out_b["image"]);
    Ok(())
}

#[test]
fn test_rand_affined_nearest_label() -> Result<(), MediRustError> {
    let mut affine = RandAffined::new(
        vec!["image", "label"],
        1.0,
        RandAffineGrid::new(vec![0.7], vec![], vec![], vec![]),
    )
    .with_modes(vec![InterpolationMode::Bilinear, InterpolationMode::Nearest])
    .with_padding(PaddingMode::Border);
    affine.set_random_state(4);
    let data = affine.apply(pair(&[1, 4, 4]))?;
    for v in data["label"].get_f64_data() {
        assert_eq!(v, v.round());
    }
    Ok(())
}

#[test]
fn test_rand_2d_elasticd() -> Result<(), MediRustError> {
    let mut elastic = Rand2DElasticd::new(
        vec!["image", "label"],
        vec![2.0],
        (1.0, 2.0),
        1.0,
        RandAffineGrid::default(),
    );
    elastic.set_random_state(9);
    let data = elastic.apply(pair(&[1, 6, 5]))?;
    assert_eq!(data["image"].shape(), vec![1, 6, 5]);
    assert_eq!(data["image"], data["label"]);

    let mut not_2d = Rand2DElasticD::new("image", vec![2.0], (1.0, 2.0), 1.0, RandAffineGrid::default());
    assert!(not_2d.apply(pair(&[1, 3, 3, 3])).is_err());
    Ok(())
}

#[test]
fn test_rand_3d_elasticd() -> Result<(), MediRustError> {
    let make = || {
        Rand3DElasticd::new(
            vec!["image", "label"],
            (0.5, 1.0),
            (1.0, 2.0),
            1.0,
            RandAffineGrid::default(),
        )
        .with_spatial_size(vec![3, 3, 2])
    };
    let mut a = make();
    let mut b = make();
    a.set_random_state(17);
    b.set_random_state(17);
    let out_a = a.apply(pair(&[1, 4, 4, 4]))?;
    let out_b = b.apply(pair(&[1, 4, 4, 4]))?;
    assert_eq!(out_a["image"].shape(), vec![1, 3, 3, 2]);
    assert_eq!(out_a["image"], out_a["label"]);
    assert_eq!(out_a["label"], out_b["label"]);
    Ok(())
}
