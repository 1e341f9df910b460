use medirust_core::{DType, MediRustError};
use medirust_transforms::array::{InterpolationMode, RandAffineGrid};
use medirust_transforms::dictionary::{
    CastToTyped, CropForegroundd, DeleteKeysd, RandAffined, RandFlipd, RandRotate90d,
    RandShiftIntensityd, Rescaled, Spacingd, UniformRandomPatchd,
};
use medirust_transforms::{Compose, DataDict, Transform};

mod common;
use common::{image_and_label, init_logger};

fn training_pipeline() -> Compose<DataDict> {
    Compose::default()
        .with(
            Spacingd::new(vec!["image", "label"], vec![1.0])
                .with_modes(vec![InterpolationMode::Bilinear, InterpolationMode::Nearest]),
        )
        .with(CropForegroundd::new(vec!["image", "label"], "label").with_margin(1))
        .with(Rescaled::new("image", 0.0, 1.0, DType::F32))
        .with(RandShiftIntensityd::new("image", (-0.1, 0.1), 0.5))
        .with(RandFlipd::new(vec!["image", "label"], 0.5, None))
        .with(RandRotate90d::new(vec!["image", "label"], 0.5, 3, (1, 2)))
        .with(UniformRandomPatchd::new(vec!["image", "label"], vec![3, 3]))
        .with(
            RandAffined::new(
                vec!["image", "label"],
                0.5,
                RandAffineGrid::new(vec![0.3], vec![], vec![0.5, 0.5], vec![0.1]),
            )
            .with_modes(vec![InterpolationMode::Bilinear, InterpolationMode::Nearest]),
        )
        .with(CastToTyped::new("label", DType::U8))
        .with(DeleteKeysd::new(vec!["image_pixdim", "label_pixdim"]))
}

#[test]
fn test_training_pipeline_keeps_pairs_aligned() -> Result<(), MediRustError> {
    init_logger();
    let mut pipeline = training_pipeline();
    pipeline.set_random_state(2020);
    for _ in 0..10 {
        let data = pipeline.apply(image_and_label(8, 8, 2, 6))?;
        let keys: Vec<&String> = data.keys().collect();
        assert_eq!(keys, vec!["image", "label"]);

        let image = &data["image"];
        let label = &data["label"];
        assert_eq!(image.shape(), vec![1, 3, 3]);
        assert_eq!(label.shape(), vec![1, 3, 3]);
        assert_eq!(image.dtype(), DType::F32);
        assert_eq!(label.dtype(), DType::U8);
        for v in label.get_f64_data() {
            assert!(v == 0.0 || v == 1.0);
        }
    }
    Ok(())
}

#[test]
fn test_training_pipeline_is_reproducible() -> Result<(), MediRustError> {
    init_logger();
    let mut a = training_pipeline();
    let mut b = training_pipeline();
    a.set_random_state(7);
    b.set_random_state(7);
    for _ in 0..5 {
        let out_a = a.apply(image_and_label(8, 8, 1, 7))?;
        let out_b = b.apply(image_and_label(8, 8, 1, 7))?;
        assert_eq!(out_a, out_b);
    }
    Ok(())
}

#[test]
fn test_pipeline_reports_missing_key() {
    init_logger();
    let mut data = image_and_label(4, 4, 1, 3);
    data.remove("label");
    let err = training_pipeline().apply(data).unwrap_err();
    assert_eq!(
        err,
        MediRustError::KeyNotFound {
            key: "label".to_string()
        }
    );
}
