//! Chart geometry: everything the renderer draws, computed once from the filtered rows.
//!
//! `ChartLayout` is plain data. It is serializable so the computed chart can be
//! inspected (or tested) without parsing the rendered document.

use crate::animation::{BarGeometry, Transition};
use crate::config::{ChartConfig, Margin};
use crate::models::{Dataset, GenreSet, Row};
use crate::palette::ColorMap;
use crate::scale::{BandScale, DEFAULT_TICK_COUNT, LinearScale};
use crate::text::{rotated_label_room_px, truncate_to_width};
use crate::tooltip::TooltipContent;
use anyhow::Result;
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Tick line length plus label padding, below the axis line.
const TICK_RESERVED_PX: f64 = 9.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AxisTick {
    /// Offset along the axis, in plot coordinates.
    pub position: f64,
    pub label: String,
    /// Untruncated label, present only when `label` was shortened.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_label: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bar {
    pub index: usize,
    pub series_title: String,
    pub genre: String,
    pub rating: f64,
    pub x: f64,
    pub width: f64,
    pub fill: String,
    pub opacity: f64,
    pub transition: Transition,
    pub tooltip: TooltipContent,
}

impl Bar {
    /// Geometry once the growth transition has finished.
    pub fn final_geometry(&self) -> BarGeometry {
        self.transition.to
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendEntry {
    pub genre: String,
    pub fill: String,
    pub swatch_x: f64,
    pub swatch_y: f64,
    pub size: f64,
    pub label_x: f64,
    pub label_y: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChartLayout {
    pub canvas: Size,
    pub margin: Margin,
    pub plot: Size,
    pub min_rating: f64,
    pub y_domain: (f64, f64),
    pub x_axis: Vec<AxisTick>,
    pub y_axis: Vec<AxisTick>,
    pub bars: Vec<Bar>,
    pub legend: Vec<LegendEntry>,
    #[serde(skip)]
    rows: Vec<Row>,
    #[serde(skip)]
    x_scale: BandScale,
    #[serde(skip)]
    y_scale: LinearScale,
}

impl ChartLayout {
    /// Filter `dataset` to `config.min_rating` and compute scales, axes, bars and legend.
    pub fn build(dataset: &Dataset, config: &ChartConfig) -> Result<ChartLayout> {
        config.validate()?;
        let dataset = dataset.clone().filter_min_rating(config.min_rating);
        if dataset.is_empty() {
            log::warn!(
                "no rows with rating >= {}; rendering an empty chart",
                config.min_rating
            );
        }

        let plot = Size {
            width: config.plot_width(),
            height: config.plot_height(),
        };
        let x_scale = BandScale::new(&dataset.titles(), (0.0, plot.width), config.band_padding);
        let y_scale = LinearScale::for_ratings(config.min_rating, dataset.max_rating(), plot.height);

        let genres = dataset.genres();
        let colors = ColorMap::new(&genres);

        let x_axis = x_axis_ticks(&x_scale, config);
        let y_axis = y_axis_ticks(&y_scale);
        let bars = bars(dataset.rows(), &x_scale, &y_scale, &colors, config, plot.height);
        let legend = legend_entries(&genres, &colors, config, plot);

        log::debug!(
            "layout: {} bars, {} legend entries, y domain {:?}",
            bars.len(),
            legend.len(),
            y_scale.domain()
        );

        Ok(ChartLayout {
            canvas: Size {
                width: config.width,
                height: config.height,
            },
            margin: config.margin,
            plot,
            min_rating: config.min_rating,
            y_domain: y_scale.domain(),
            x_axis,
            y_axis,
            bars,
            legend,
            rows: dataset.into_rows(),
            x_scale,
            y_scale,
        })
    }

    /// Rows that made it through the filter, in chart order.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn x_scale(&self) -> &BandScale {
        &self.x_scale
    }

    pub fn y_scale(&self) -> &LinearScale {
        &self.y_scale
    }

    /// Time until the last bar has finished growing.
    pub fn total_animation_ms(&self) -> u64 {
        self.bars
            .iter()
            .map(|b| b.transition.end_ms())
            .max()
            .unwrap_or(0)
    }
}

fn x_axis_ticks(x: &BandScale, config: &ChartConfig) -> Vec<AxisTick> {
    let room = rotated_label_room_px(config.margin.bottom, TICK_RESERVED_PX + config.font_px as f64);
    x.domain()
        .iter()
        .filter_map(|title| {
            let position = x.center(title)?;
            let label = truncate_to_width(title, config.font_px, room);
            let full_label = (label != *title).then(|| title.clone());
            Some(AxisTick {
                position,
                label,
                full_label,
            })
        })
        .collect()
}

fn y_axis_ticks(y: &LinearScale) -> Vec<AxisTick> {
    let fmt = y.tick_formatter(DEFAULT_TICK_COUNT);
    y.ticks(DEFAULT_TICK_COUNT)
        .into_iter()
        .map(|v| AxisTick {
            position: y.map(v),
            label: fmt(v),
            full_label: None,
        })
        .collect()
}

fn bars(
    rows: &[Row],
    x: &BandScale,
    y: &LinearScale,
    colors: &ColorMap,
    config: &ChartConfig,
    plot_height: f64,
) -> Vec<Bar> {
    let baseline = y.map(config.min_rating);
    let from = BarGeometry {
        y: baseline,
        height: plot_height - baseline,
    };
    rows.iter()
        .enumerate()
        .map(|(index, row)| {
            let top = y.map(row.rating);
            let to = BarGeometry {
                y: top,
                height: (plot_height - top).max(0.0),
            };
            Bar {
                index,
                series_title: row.series_title.clone(),
                genre: row.genre.clone(),
                rating: row.rating,
                x: x.band(&row.series_title).unwrap_or_default(),
                width: x.bandwidth(),
                fill: colors.color(&row.genre).unwrap_or_default().hex(),
                opacity: config.idle_opacity,
                transition: Transition::staggered(
                    index,
                    config.stagger_ms,
                    config.duration_ms,
                    from,
                    to,
                ),
                tooltip: TooltipContent::for_row(row),
            }
        })
        .collect()
}

fn legend_entries(
    genres: &GenreSet,
    colors: &ColorMap,
    config: &ChartConfig,
    plot: Size,
) -> Vec<LegendEntry> {
    let lc = config.legend;
    let swatch_x = plot.width * lc.x_fraction;
    let base_y = plot.height * lc.y_fraction;
    genres
        .iter()
        .enumerate()
        .map(|(i, genre)| {
            let swatch_y = base_y + i as f64 * (lc.size + lc.gap);
            LegendEntry {
                genre: genre.to_string(),
                fill: colors.color(genre).unwrap_or_default().hex(),
                swatch_x,
                swatch_y,
                size: lc.size,
                label_x: swatch_x + lc.size * lc.label_offset,
                label_y: swatch_y + lc.size * 0.5,
            }
        })
        .collect()
}

/// Write the layout as pretty JSON.
pub fn save_layout_json<P: AsRef<Path>>(layout: &ChartLayout, path: P) -> Result<()> {
    let mut f = File::create(path)?;
    let s = serde_json::to_string_pretty(layout)?;
    f.write_all(s.as_bytes())?;
    Ok(())
}
