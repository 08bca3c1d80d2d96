//! Elevation color banding.
//!
//! The observed height range is split into four bands: the top 20%, two
//! 30% bands below it, and whatever remains down to the lowest vertex.
//! Thresholds are pure data; the fragment stage picks a color per band.

use glam::Vec3;
use serde::{Deserialize, Serialize};

const TOP_SHARE: f32 = 0.2;
const MID_SHARE: f32 = 0.3;
const BASE_SHARE: f32 = 0.3;

/// Observed height extrema.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeightInterval {
    pub min_z: f32,
    pub max_z: f32,
}

impl HeightInterval {
    /// Scans every position's z. An empty slice yields `(0, 0)`.
    pub fn from_positions(positions: &[Vec3]) -> Self {
        if positions.is_empty() {
            return Self {
                min_z: 0.0,
                max_z: 0.0,
            };
        }

        let (min_z, max_z) = positions
            .iter()
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), p| {
                (lo.min(p.z), hi.max(p.z))
            });

        Self { min_z, max_z }
    }

    /// `|min_z| + |max_z|`, the span the band shares are taken from.
    pub fn length(&self) -> f32 {
        self.min_z.abs() + self.max_z.abs()
    }

    pub fn is_flat(&self) -> bool {
        self.min_z == self.max_z
    }
}

/// Which band a height falls into, from highest to lowest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElevationBand {
    Top,
    Mid,
    Base,
    Bottom,
}

/// Lower edges of the four bands, `top_start >= mid_start >= base_start >= bot_start`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorBandThresholds {
    pub top_start: f32,
    pub mid_start: f32,
    pub base_start: f32,
    pub bot_start: f32,
}

impl ColorBandThresholds {
    /// Selects the band for a height: the first band whose start is at or below `z`.
    pub fn band_for(&self, z: f32) -> ElevationBand {
        if z >= self.top_start {
            ElevationBand::Top
        } else if z >= self.mid_start {
            ElevationBand::Mid
        } else if z >= self.base_start {
            ElevationBand::Base
        } else {
            ElevationBand::Bottom
        }
    }

    /// Thresholds as a `[top, mid, base, bot]` array, the layout uniforms expect.
    pub fn to_array(&self) -> [f32; 4] {
        [self.top_start, self.mid_start, self.base_start, self.bot_start]
    }
}

/// Computes band thresholds from the final heights.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeightIntervalColorBanding;

impl HeightIntervalColorBanding {
    pub fn new() -> Self {
        Self
    }

    pub fn thresholds(&self, interval: &HeightInterval) -> ColorBandThresholds {
        let length = interval.length();
        let floor = interval.min_z;

        let top_start = interval.max_z - TOP_SHARE * length;
        let mid_start = top_start - MID_SHARE * length;
        let base_start = mid_start - BASE_SHARE * length;

        // The |min| + |max| span overshoots when both extrema share a sign;
        // no band may start below the lowest vertex.
        ColorBandThresholds {
            top_start: top_start.max(floor),
            mid_start: mid_start.max(floor),
            base_start: base_start.max(floor),
            bot_start: floor,
        }
    }

    /// Scans the positions and computes both the interval and its thresholds.
    pub fn compute(&self, positions: &[Vec3]) -> (HeightInterval, ColorBandThresholds) {
        let interval = HeightInterval::from_positions(positions);
        (interval, self.thresholds(&interval))
    }
}
