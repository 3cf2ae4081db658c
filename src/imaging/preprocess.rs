//! Conversion of decoded images into classifier input tensors.

use crate::constants::{INPUT_SHAPE, INPUT_SIZE};
use image::imageops::{self, FilterType};
use image::RgbImage;

/// Normalized classifier input: `[1, 224, 224, 3]` float32 in HWC order.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageTensor {
    data: Vec<f32>,
}

impl ImageTensor {
    /// All-zero tensor, used to probe a model's output length at load time.
    pub fn zeros() -> Self {
        Self {
            data: vec![0.0; Self::len()],
        }
    }

    /// Tensor shape including the batch dimension.
    pub const fn shape() -> [usize; 4] {
        INPUT_SHAPE
    }

    /// Number of values in a tensor.
    pub const fn len() -> usize {
        INPUT_SHAPE[0] * INPUT_SHAPE[1] * INPUT_SHAPE[2] * INPUT_SHAPE[3]
    }

    /// Tensor values.
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }
}

/// Resize-with-crop an image to the classifier input size and scale to `[0, 1]`.
///
/// The centered square window of the source is cropped out first and only
/// that window is resized, so memory stays bounded for very elongated
/// images. Stretching would distort lesion shapes. An empty image yields an
/// all-zero tensor.
pub fn preprocess(image: &RgbImage) -> ImageTensor {
    if image.width() == 0 || image.height() == 0 {
        return ImageTensor::zeros();
    }

    let fitted = fit_square(image, INPUT_SIZE);

    let data = fitted
        .as_raw()
        .iter()
        .map(|&v| f32::from(v) / 255.0)
        .collect();

    ImageTensor { data }
}

/// Largest centered square inside a `width` x `height` image, as `(x, y, side)`.
const fn center_square(width: u32, height: u32) -> (u32, u32, u32) {
    let side = if width < height { width } else { height };
    ((width - side) / 2, (height - side) / 2, side)
}

fn fit_square(image: &RgbImage, size: u32) -> RgbImage {
    let (width, height) = image.dimensions();
    if width == size && height == size {
        return image.clone();
    }

    let (x, y, side) = center_square(width, height);
    let window = imageops::crop_imm(image, x, y, side, side);

    imageops::resize(&*window, size, size, FilterType::Lanczos3)
}
