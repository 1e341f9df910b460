use medirust_core::Volume;
use medirust_transforms::DataDict;

// Attempt to initialize env_logger. If it fails (already initialized), that's okay.
#[allow(dead_code)]
pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// `{"image": [1, H, W] ramp, "label": [1, H, W] square mask}`.
#[allow(dead_code)]
pub fn image_and_label(h: usize, w: usize, lo: usize, hi: usize) -> DataDict {
    let image: Vec<f32> = (0..h * w).map(|x| x as f32).collect();
    let mut label = vec![0.0f32; h * w];
    for y in lo..hi {
        for x in lo..hi {
            label[y * w + x] = 1.0;
        }
    }
    let mut data = DataDict::new();
    data.insert(
        "image".to_string(),
        Volume::new(image, vec![1, h, w]).expect("Test image creation failed"),
    );
    data.insert(
        "label".to_string(),
        Volume::new(label, vec![1, h, w]).expect("Test label creation failed"),
    );
    data
}
