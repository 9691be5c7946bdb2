//! tvchart
//!
//! A small Rust library for turning a CSV of TV series ratings into an animated,
//! interactive bar chart. Pairs with the `tvchart` CLI.
//!
//! ### Features
//! - Load `series_title,rating,genre` rows from a file or an `http(s)://` URL
//! - Keep only highly rated series (`rating >= 8.5` by default)
//! - Band/linear scales with nice y ticks, colors per genre (Tableau 10)
//! - Bars that grow one after another, hover highlighting with a floating tooltip
//! - Legend with one swatch per genre
//! - HTML or standalone SVG output, JSON export of the computed layout
//!
//! ### Example
//! ```no_run
//! use tvchart::{ChartConfig, ChartLayout, Dataset, Loader, Source};
//!
//! let outcome = Loader::default().load(&Source::parse("tv_series.csv"))?;
//! let config = ChartConfig::default();
//! let layout = ChartLayout::build(&Dataset::new(outcome.rows), &config)?;
//! tvchart::render::save_chart(&layout, &config, "chart.html", None)?;
//! println!("{} bars", layout.bars.len());
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod animation;
pub mod config;
pub mod layout;
pub mod loader;
pub mod models;
pub mod palette;
pub mod render;
pub mod scale;
pub mod stats;
pub mod storage;
pub mod text;
pub mod tooltip;

pub use config::ChartConfig;
pub use layout::ChartLayout;
pub use loader::{Loader, Source};
pub use models::{Dataset, Row};
