//! Chart configuration. Every fixed dimension, timing and styling constant of the chart
//! lives here; the CLI overrides a subset of them.

use crate::animation::{DEFAULT_DURATION_MS, DEFAULT_STAGGER_MS};
use crate::models::DEFAULT_MIN_RATING;
use anyhow::{Result, bail};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Margin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Default for Margin {
    fn default() -> Self {
        Self {
            top: 10.0,
            right: 60.0,
            bottom: 160.0,
            left: 150.0,
        }
    }
}

/// Legend geometry, relative to the plot area.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LegendConfig {
    /// Swatch edge length.
    pub size: f64,
    /// Vertical gap between swatches.
    pub gap: f64,
    /// Swatch x as a fraction of the plot width.
    pub x_fraction: f64,
    /// First swatch y as a fraction of the plot height.
    pub y_fraction: f64,
    /// Label x offset as a multiple of `size`.
    pub label_offset: f64,
}

impl Default for LegendConfig {
    fn default() -> Self {
        Self {
            size: 20.0,
            gap: 5.0,
            x_fraction: 0.85,
            y_fraction: 1.0 / 20.0,
            label_offset: 1.2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartConfig {
    pub width: f64,
    pub height: f64,
    pub margin: Margin,
    /// Rows below this rating are dropped; also the y-axis baseline.
    pub min_rating: f64,
    pub band_padding: f64,
    pub idle_opacity: f64,
    pub hover_opacity: f64,
    pub duration_ms: u64,
    pub stagger_ms: u64,
    /// Tooltip offset from the cursor, in page pixels (right, down).
    pub tooltip_offset: (f64, f64),
    pub legend: LegendConfig,
    pub font_px: u32,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: 1200.0,
            height: 500.0,
            margin: Margin::default(),
            min_rating: DEFAULT_MIN_RATING,
            band_padding: 0.2,
            idle_opacity: 0.5,
            hover_opacity: 1.0,
            duration_ms: DEFAULT_DURATION_MS,
            stagger_ms: DEFAULT_STAGGER_MS,
            tooltip_offset: (10.0, 10.0),
            legend: LegendConfig::default(),
            font_px: 10,
        }
    }
}

impl ChartConfig {
    pub fn plot_width(&self) -> f64 {
        self.width - self.margin.left - self.margin.right
    }

    pub fn plot_height(&self) -> f64 {
        self.height - self.margin.top - self.margin.bottom
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.plot_width() > 0.0 && self.plot_height() > 0.0) {
            bail!(
                "canvas {}x{} leaves no room for the plot after margins",
                self.width,
                self.height
            );
        }
        if !(0.0..1.0).contains(&self.band_padding) {
            bail!("band padding must be in [0, 1), got {}", self.band_padding);
        }
        if !self.min_rating.is_finite() {
            bail!("minimum rating must be a finite number");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_plot_area() {
        let c = ChartConfig::default();
        assert_eq!(c.plot_width(), 990.0);
        assert_eq!(c.plot_height(), 330.0);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn tiny_canvas_is_rejected() {
        let c = ChartConfig {
            height: 100.0,
            ..ChartConfig::default()
        };
        assert!(c.validate().is_err());
    }
}
