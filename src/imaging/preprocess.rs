//! Image preprocessing for the risk classifier
//!
//! Resizes a decoded bitmap with Lanczos3, scales every channel into [0, 1]
//! and wraps the result in a single-item NHWC batch. The scaling must match
//! what the model saw during training: no mean subtraction, no per-channel
//! standardization.

use image::{imageops::FilterType, RgbImage};

/// Number of color channels fed to the model (RGB)
pub const CHANNELS: usize = 3;

/// A batch of normalized images in NHWC layout
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBatch {
    data: Vec<f32>,
    shape: [usize; 4],
}

impl ImageBatch {
    /// Wrap raw NHWC data, checking that it matches `shape`
    pub fn new(data: Vec<f32>, shape: [usize; 4]) -> Option<Self> {
        let expected: usize = shape.iter().product();
        (data.len() == expected).then_some(Self { data, shape })
    }

    /// Shape as `[batch, height, width, channels]`
    pub fn shape(&self) -> [usize; 4] {
        self.shape
    }

    /// Flat NHWC values
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }
}

/// Resize an image to the target dimensions
fn resize_image(image: &RgbImage, width: u32, height: u32) -> RgbImage {
    image::imageops::resize(image, width, height, FilterType::Lanczos3)
}

/// Normalize an RGB image to a flat HWC vector of values in [0, 1]
fn normalize_image(image: &RgbImage) -> Vec<f32> {
    image
        .as_raw()
        .iter()
        .map(|&value| value as f32 / 255.0)
        .collect()
}

/// Resize `image` to `size`×`size` and turn it into a batch of one
pub fn preprocess_image(image: &RgbImage, size: u32) -> ImageBatch {
    let resized = resize_image(image, size, size);
    let data = normalize_image(&resized);

    ImageBatch {
        data,
        shape: [1, size as usize, size as usize, CHANNELS],
    }
}
