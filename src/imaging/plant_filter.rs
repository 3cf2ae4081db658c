//! Green-pixel heuristic that rejects obvious non-plant images.
//!
//! This is not a learned model. It counts pixels whose green channel clearly
//! dominates and requires a minimum share of them. Close-up lesion photos
//! with little visible leaf can be rejected, and green backgrounds can pass.

use crate::config::PlantFilterConfig;
use crate::constants::plant_filter::ANALYSIS_SIZE;
use image::imageops::{self, FilterType};
use image::RgbImage;

/// Outcome of the plant-presence check.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlantCheck {
    /// Fraction of green-dominant pixels (0.0 - 1.0).
    pub green_ratio: f32,
    /// Whether the image is treated as a plant.
    pub is_plant: bool,
}

/// Green-dominance plant filter.
#[derive(Debug, Clone, Copy)]
pub struct PlantFilter {
    min_green_ratio: f32,
    channel_margin: i16,
    green_floor: i16,
}

impl Default for PlantFilter {
    fn default() -> Self {
        Self::from_config(&PlantFilterConfig::default())
    }
}

impl PlantFilter {
    /// Build a filter from configuration.
    pub fn from_config(config: &PlantFilterConfig) -> Self {
        Self {
            min_green_ratio: config.min_green_ratio,
            channel_margin: i16::from(config.channel_margin),
            green_floor: i16::from(config.green_floor),
        }
    }

    /// Compute the green-dominant pixel ratio and the plant verdict.
    pub fn check(&self, image: &RgbImage) -> PlantCheck {
        if image.width() == 0 || image.height() == 0 {
            return PlantCheck {
                green_ratio: 0.0,
                is_plant: false,
            };
        }

        let resized;
        let analysed = if image.dimensions() == (ANALYSIS_SIZE, ANALYSIS_SIZE) {
            image
        } else {
            resized = imageops::resize(image, ANALYSIS_SIZE, ANALYSIS_SIZE, FilterType::CatmullRom);
            &resized
        };

        let total = u64::from(analysed.width()) * u64::from(analysed.height());

        let green = analysed
            .pixels()
            .filter(|p| self.is_green_dominant(p.0))
            .count() as u64;

        #[allow(clippy::cast_precision_loss)]
        let green_ratio = green as f32 / total as f32;

        PlantCheck {
            green_ratio,
            is_plant: green_ratio >= self.min_green_ratio,
        }
    }

    fn is_green_dominant(&self, [r, g, b]: [u8; 3]) -> bool {
        let (r, g, b) = (i16::from(r), i16::from(g), i16::from(b));
        g > r + self.channel_margin && g > b + self.channel_margin && g > self.green_floor
    }
}
