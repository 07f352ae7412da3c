//! Image feature extraction for the disease classifier
//!
//! Images are decoded, resized to a canonical 224×224 and reduced to ten
//! colour and texture statistics.

use image::{imageops::FilterType, DynamicImage, RgbImage};
use serde::{Deserialize, Serialize};

use crate::error::DecodeError;

/// Side length images are resized to before extraction
pub const CANONICAL_SIZE: u32 = 224;

/// Number of values in a feature vector
pub const FEATURE_COUNT: usize = 10;

/// Colour and texture statistics of one image
///
/// Field order matches [`ImageFeatures::to_array`], which is the order
/// classifiers consume.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ImageFeatures {
    pub red_mean: f64,
    pub green_mean: f64,
    pub blue_mean: f64,
    pub red_std: f64,
    pub green_std: f64,
    pub blue_std: f64,
    pub gray_mean: f64,
    pub gray_std: f64,
    pub gray_variance: f64,
    pub gray_max: f64,
}

impl ImageFeatures {
    pub fn to_array(&self) -> [f64; FEATURE_COUNT] {
        [
            self.red_mean,
            self.green_mean,
            self.blue_mean,
            self.red_std,
            self.green_std,
            self.blue_std,
            self.gray_mean,
            self.gray_std,
            self.gray_variance,
            self.gray_max,
        ]
    }

    pub fn from_array(values: [f64; FEATURE_COUNT]) -> Self {
        Self {
            red_mean: values[0],
            green_mean: values[1],
            blue_mean: values[2],
            red_std: values[3],
            green_std: values[4],
            blue_std: values[5],
            gray_mean: values[6],
            gray_std: values[7],
            gray_variance: values[8],
            gray_max: values[9],
        }
    }

    /// Boundary check for vectors supplied by callers
    pub fn validate(&self) -> Result<(), DecodeError> {
        if self.to_array().iter().all(|v| v.is_finite()) {
            Ok(())
        } else {
            Err(DecodeError::Malformed(
                "feature vector contains non-finite values".to_string(),
            ))
        }
    }

    /// Scale every value into roughly `[0, 1]` (variance by 255²)
    pub fn normalized(&self) -> [f64; FEATURE_COUNT] {
        let mut values = self.to_array();
        for (i, v) in values.iter_mut().enumerate() {
            *v /= if i == 8 { 255.0 * 255.0 } else { 255.0 };
        }
        values
    }

    /// Statistics of an RGB image as-is (no resizing)
    pub fn from_rgb(image: &RgbImage) -> Self {
        let mut red = ChannelStats::default();
        let mut green = ChannelStats::default();
        let mut blue = ChannelStats::default();
        let mut gray = ChannelStats::default();

        for pixel in image.pixels() {
            let [r, g, b] = pixel.0;
            red.push(r);
            green.push(g);
            blue.push(b);
            gray.push(luma(r, g, b));
        }

        Self {
            red_mean: red.mean(),
            green_mean: green.mean(),
            blue_mean: blue.mean(),
            red_std: red.std(),
            green_std: green.std(),
            blue_std: blue.std(),
            gray_mean: gray.mean(),
            gray_std: gray.std(),
            gray_variance: gray.variance(),
            gray_max: gray.max as f64,
        }
    }
}

/// BT.601 luma rounded to an 8-bit level
fn luma(r: u8, g: u8, b: u8) -> u8 {
    let y = 0.299 * r as f64 + 0.587 * g as f64 + 0.114 * b as f64;
    y.round().clamp(0.0, 255.0) as u8
}

/// Running population statistics for one 8-bit channel
#[derive(Debug, Default)]
struct ChannelStats {
    count: u64,
    sum: f64,
    sum_sq: f64,
    max: u8,
}

impl ChannelStats {
    fn push(&mut self, value: u8) {
        let v = value as f64;
        self.count += 1;
        self.sum += v;
        self.sum_sq += v * v;
        self.max = self.max.max(value);
    }

    fn mean(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.sum / self.count as f64
        }
    }

    fn variance(&self) -> f64 {
        if self.count == 0 {
            return 0.0;
        }
        let mean = self.mean();
        (self.sum_sq / self.count as f64 - mean * mean).max(0.0)
    }

    fn std(&self) -> f64 {
        self.variance().sqrt()
    }
}

/// Decode an encoded image (PNG or JPEG) and require colour channels
pub fn decode_image(bytes: &[u8]) -> Result<DynamicImage, DecodeError> {
    if bytes.is_empty() {
        return Err(DecodeError::Empty);
    }

    let image =
        image::load_from_memory(bytes).map_err(|e| DecodeError::Malformed(e.to_string()))?;

    let color = image.color();
    if !color.has_color() {
        return Err(DecodeError::MissingColorChannels {
            channels: color.channel_count(),
        });
    }
    if image.width() == 0 || image.height() == 0 {
        return Err(DecodeError::Empty);
    }

    Ok(image)
}

/// Decode, resize to the canonical resolution and extract features
pub fn extract_features(bytes: &[u8]) -> Result<ImageFeatures, DecodeError> {
    let image = decode_image(bytes)?;
    let resized = image
        .resize_exact(CANONICAL_SIZE, CANONICAL_SIZE, FilterType::Triangle)
        .to_rgb8();

    Ok(ImageFeatures::from_rgb(&resized))
}
