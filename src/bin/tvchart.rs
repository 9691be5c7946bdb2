use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tvchart::loader::RatingPolicy;
use tvchart::render::OutputFormat;
use tvchart::{ChartConfig, ChartLayout, Dataset, Loader, Source};
use tvchart::{layout, render, stats, storage};

#[derive(Parser, Debug)]
#[command(
    name = "tvchart",
    version,
    about = "Render an animated bar chart of top-rated TV series from CSV"
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Load a CSV, filter it and write the chart (and optionally data, layout and stats).
    Render(RenderArgs),
}

#[derive(ValueEnum, Clone, Debug)]
enum ChartFormat {
    Html,
    Svg,
}

#[derive(Args, Debug)]
struct RenderArgs {
    /// CSV file path or http(s) URL with series_title, rating and genre columns.
    #[arg(short, long)]
    input: String,
    /// Chart output path (.html or .svg).
    #[arg(short, long, default_value = "chart.html")]
    output: PathBuf,
    /// Chart format. If omitted, inferred from --output extension.
    #[arg(long, value_enum)]
    format: Option<ChartFormat>,
    /// Minimum rating to keep (also the y-axis baseline).
    #[arg(long, default_value_t = tvchart::models::DEFAULT_MIN_RATING)]
    min_rating: f64,
    /// Canvas width (default 1200).
    #[arg(long, default_value_t = 1200.0)]
    width: f64,
    /// Canvas height (default 500).
    #[arg(long, default_value_t = 500.0)]
    height: f64,
    /// Write the computed chart layout as JSON.
    #[arg(long)]
    layout: Option<PathBuf>,
    /// Save the filtered rows (format from extension: .csv or .json).
    #[arg(long)]
    save: Option<PathBuf>,
    /// Print per-genre rating statistics to stdout.
    #[arg(long, default_value_t = false)]
    stats: bool,
    /// Fail on rows whose rating is not a number instead of skipping them.
    #[arg(long, default_value_t = false)]
    strict: bool,
}

fn fmt_num(x: f64) -> String {
    let s = format!("{:.2}", x);
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
    }
}

fn cmd_render(args: RenderArgs) -> Result<()> {
    let policy = if args.strict {
        RatingPolicy::Strict
    } else {
        RatingPolicy::Skip
    };
    let source = Source::parse(&args.input);
    let outcome = Loader::with_policy(policy)
        .load(&source)
        .with_context(|| format!("loading {}", source))?;
    if outcome.skipped > 0 {
        eprintln!("Skipped {} rows with a non-numeric rating", outcome.skipped);
    }

    let config = ChartConfig {
        width: args.width,
        height: args.height,
        min_rating: args.min_rating,
        ..ChartConfig::default()
    };
    let chart = ChartLayout::build(&Dataset::new(outcome.rows), &config)?;

    let format = args.format.map(|f| match f {
        ChartFormat::Html => OutputFormat::Html,
        ChartFormat::Svg => OutputFormat::Svg,
    });
    render::save_chart(&chart, &config, &args.output, format)?;
    eprintln!(
        "Wrote chart with {} bars to {}",
        chart.bars.len(),
        args.output.display()
    );

    if let Some(path) = args.layout.as_ref() {
        layout::save_layout_json(&chart, path)?;
        eprintln!("Wrote layout to {}", path.display());
    }

    if let Some(path) = args.save.as_ref() {
        let fmt = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("csv")
            .to_ascii_lowercase();
        match fmt.as_str() {
            "csv" => storage::save_csv(chart.rows(), path)?,
            "json" => storage::save_json(chart.rows(), path)?,
            other => anyhow::bail!("unsupported format: {}", other),
        }
        eprintln!("Saved {} rows to {}", chart.rows().len(), path.display());
    }

    if args.stats {
        for s in stats::genre_summary(chart.rows()) {
            println!(
                "{}  count={}  min={} max={} mean={} median={}",
                s.genre,
                s.count,
                fmt_num(s.min),
                fmt_num(s.max),
                fmt_num(s.mean),
                fmt_num(s.median)
            );
        }
    }

    Ok(())
}
