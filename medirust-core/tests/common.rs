use medirust_core::Volume;

// Helper function to create a basic f32 volume for testing.
// Added allow(dead_code) because usage across different test crates isn't detected easily.
#[allow(dead_code)]
pub fn create_test_volume(data: Vec<f32>, shape: Vec<usize>) -> Volume {
    Volume::new(data, shape).expect("Test volume creation failed")
}

/// Channel-first `[1, H, W]` image with a bright square in the middle.
#[allow(dead_code)]
pub fn square_image(h: usize, w: usize, lo: usize, hi: usize) -> Volume {
    let mut data = vec![0.0f32; h * w];
    for y in lo..hi {
        for x in lo..hi {
            data[y * w + x] = 1.0;
        }
    }
    create_test_volume(data, vec![1, h, w])
}
