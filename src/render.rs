//! Document output: render a [`ChartLayout`] to **HTML** or standalone **SVG**.
//!
//! - Bars start at the baseline and grow through SVG `<animate>` elements
//!   (per-bar `begin` delay, cubic in-out spline), so no script is needed for the animation.
//! - HTML output adds a floating tooltip `<div>` and a small script wiring
//!   `mouseover` / `mousemove` / `mouseout` on each bar.
//! - SVG output uses native `<title>` tooltips and a CSS `:hover` rule instead.
//! - Axes follow the usual bottom/left axis markup: 6px ticks, half-pixel offset,
//!   `currentColor` strokes, 10px sans-serif labels.

use crate::config::ChartConfig;
use crate::layout::{AxisTick, Bar, ChartLayout};
use anyhow::{Result, bail};
use html_escape::{encode_double_quoted_attribute, encode_text};
use std::fmt::Write as _;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Half-pixel shift that keeps 1px axis lines crisp.
const CRISP_OFFSET: f64 = 0.5;
const TICK_SIZE: f64 = 6.0;
const TICK_PADDING: f64 = 3.0;
/// x-axis labels are rotated and shifted so their end sits under the tick.
const X_LABEL_TRANSFORM: &str = "translate(-10,0)rotate(-45)";

pub const CONTAINER_ID: &str = "chart";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Html,
    Svg,
}

impl OutputFormat {
    /// Infer the format from a file extension (`.html`/`.htm` or `.svg`).
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("html")
            .to_ascii_lowercase();
        match ext.as_str() {
            "html" | "htm" => Ok(OutputFormat::Html),
            "svg" => Ok(OutputFormat::Svg),
            other => bail!("unsupported output format: {}", other),
        }
    }
}

/// Render and write the chart to `out_path`.
///
/// `format` overrides the format inferred from the file extension.
pub fn save_chart<P: AsRef<Path>>(
    layout: &ChartLayout,
    config: &ChartConfig,
    out_path: P,
    format: Option<OutputFormat>,
) -> Result<()> {
    let out_path = out_path.as_ref();
    let format = match format {
        Some(f) => f,
        None => OutputFormat::from_path(out_path)?,
    };
    let doc = render(layout, config, format)?;
    let mut f = File::create(out_path)?;
    f.write_all(doc.as_bytes())?;
    f.flush()?;
    Ok(())
}

pub fn render(layout: &ChartLayout, config: &ChartConfig, format: OutputFormat) -> Result<String> {
    let doc = match format {
        OutputFormat::Html => render_html(layout, config)?,
        OutputFormat::Svg => render_svg(layout, config, true)?,
    };
    Ok(doc)
}

/// Full HTML page: chart container, tooltip element and hover script.
pub fn render_html(layout: &ChartLayout, config: &ChartConfig) -> Result<String> {
    let svg = render_svg(layout, config, false)?;
    let mut out = String::new();
    out.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\" />\n");
    out.push_str("<title>TV series ratings</title>\n</head>\n<body>\n");
    writeln!(out, "<div id=\"{CONTAINER_ID}\">")?;
    out.push_str(&svg);
    out.push_str(
        "<div class=\"tooltip\" style=\"opacity: 0; position: absolute; \
         background-color: white; border: solid; border-width: 2px; \
         border-radius: 5px; padding: 5px;\"></div>\n",
    );
    out.push_str("</div>\n<script>\n");
    out.push_str(&hover_script(config));
    out.push_str("</script>\n</body>\n</html>\n");
    Ok(out)
}

fn hover_script(config: &ChartConfig) -> String {
    let (dx, dy) = config.tooltip_offset;
    format!(
        r#"(function () {{
  var chart = document.getElementById("{id}");
  var tooltip = chart.querySelector(".tooltip");
  chart.querySelectorAll("rect.bar").forEach(function (bar) {{
    bar.addEventListener("mouseover", function () {{
      bar.style.opacity = {hover};
      tooltip.innerHTML = bar.getAttribute("data-tooltip");
      tooltip.style.opacity = 1;
    }});
    bar.addEventListener("mousemove", function (event) {{
      tooltip.style.left = (event.pageX + {dx}) + "px";
      tooltip.style.top = (event.pageY + {dy}) + "px";
    }});
    bar.addEventListener("mouseout", function () {{
      bar.style.opacity = {idle};
      tooltip.style.opacity = 0;
    }});
  }});
}})();
"#,
        id = CONTAINER_ID,
        hover = num(config.hover_opacity),
        idle = num(config.idle_opacity),
        dx = num(dx),
        dy = num(dy),
    )
}

/// The chart as an `<svg>` element. `standalone` adds the XML namespace,
/// a `:hover` style rule and native `<title>` tooltips.
pub fn render_svg(layout: &ChartLayout, config: &ChartConfig, standalone: bool) -> Result<String> {
    let mut out = String::new();
    writeln!(
        out,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{}\" height=\"{}\">",
        num(layout.canvas.width),
        num(layout.canvas.height)
    )?;
    if standalone {
        writeln!(
            out,
            "<style>rect.bar:hover {{ opacity: {}; }}</style>",
            num(config.hover_opacity)
        )?;
    }
    writeln!(
        out,
        "<g transform=\"translate({},{})\">",
        num(layout.margin.left),
        num(layout.margin.top)
    )?;
    write_x_axis(&mut out, layout, config)?;
    write_y_axis(&mut out, layout, config)?;

    out.push_str("<g class=\"bars\">\n");
    for bar in &layout.bars {
        write_bar(&mut out, bar, standalone)?;
    }
    out.push_str("</g>\n");

    out.push_str("<g class=\"legend\">\n");
    for entry in &layout.legend {
        writeln!(
            out,
            "<rect x=\"{}\" y=\"{}\" width=\"{s}\" height=\"{s}\" style=\"fill: {};\"></rect>",
            num(entry.swatch_x),
            num(entry.swatch_y),
            entry.fill,
            s = num(entry.size),
        )?;
        writeln!(
            out,
            "<text x=\"{}\" y=\"{}\" text-anchor=\"left\" style=\"fill: black; alignment-baseline: middle;\">{}</text>",
            num(entry.label_x),
            num(entry.label_y),
            encode_text(&entry.genre)
        )?;
    }
    out.push_str("</g>\n</g>\n</svg>\n");
    Ok(out)
}

fn axis_group_open(
    out: &mut String,
    class: &str,
    transform: Option<String>,
    anchor: &str,
    font_px: u32,
) -> std::fmt::Result {
    write!(out, "<g class=\"{class}\"")?;
    if let Some(t) = transform {
        write!(out, " transform=\"{t}\"")?;
    }
    writeln!(
        out,
        " fill=\"none\" font-size=\"{font_px}\" font-family=\"sans-serif\" text-anchor=\"{anchor}\">"
    )
}

fn write_x_axis(out: &mut String, layout: &ChartLayout, config: &ChartConfig) -> std::fmt::Result {
    axis_group_open(
        out,
        "x-axis",
        Some(format!("translate(0,{})", num(layout.plot.height))),
        "middle",
        config.font_px,
    )?;
    writeln!(
        out,
        "<path class=\"domain\" stroke=\"currentColor\" d=\"M{o},{t}V{o}H{w}V{t}\"></path>",
        o = num(CRISP_OFFSET),
        t = num(TICK_SIZE),
        w = num(layout.plot.width + CRISP_OFFSET),
    )?;
    // band ticks sit exactly on the band center
    for tick in &layout.x_axis {
        write!(
            out,
            "<g class=\"tick\" opacity=\"1\" transform=\"translate({},0)\"><line stroke=\"currentColor\" y2=\"{}\"></line>",
            num(tick.position),
            num(TICK_SIZE)
        )?;
        write!(
            out,
            "<text fill=\"currentColor\" y=\"{}\" dy=\"0.71em\" transform=\"{X_LABEL_TRANSFORM}\" style=\"text-anchor: end;\">{}",
            num(TICK_SIZE + TICK_PADDING),
            encode_text(&tick.label)
        )?;
        write_full_label(out, tick)?;
        out.push_str("</text></g>\n");
    }
    out.push_str("</g>\n");
    Ok(())
}

fn write_full_label(out: &mut String, tick: &AxisTick) -> std::fmt::Result {
    if let Some(full) = &tick.full_label {
        write!(out, "<title>{}</title>", encode_text(full))?;
    }
    Ok(())
}

fn write_y_axis(out: &mut String, layout: &ChartLayout, config: &ChartConfig) -> std::fmt::Result {
    axis_group_open(out, "y-axis", None, "end", config.font_px)?;
    writeln!(
        out,
        "<path class=\"domain\" stroke=\"currentColor\" d=\"M-{t},{h}H{o}V{o}H-{t}\"></path>",
        t = num(TICK_SIZE),
        h = num(layout.plot.height + CRISP_OFFSET),
        o = num(CRISP_OFFSET),
    )?;
    for tick in &layout.y_axis {
        writeln!(
            out,
            "<g class=\"tick\" opacity=\"1\" transform=\"translate(0,{})\"><line stroke=\"currentColor\" x2=\"-{}\"></line><text fill=\"currentColor\" x=\"-{}\" dy=\"0.32em\">{}</text></g>",
            num(tick.position + CRISP_OFFSET),
            num(TICK_SIZE),
            num(TICK_SIZE + TICK_PADDING),
            encode_text(&tick.label)
        )?;
    }
    out.push_str("</g>\n");
    Ok(())
}

fn write_bar(out: &mut String, bar: &Bar, standalone: bool) -> std::fmt::Result {
    let t = &bar.transition;
    write!(
        out,
        "<rect class=\"bar\" data-index=\"{}\" data-tooltip=\"{}\" x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"{}\" opacity=\"{}\">",
        bar.index,
        encode_double_quoted_attribute(&bar.tooltip.html()),
        num(bar.x),
        num(t.from.y),
        num(bar.width),
        num(t.from.height),
        bar.fill,
        num(bar.opacity)
    )?;
    for (attr, from, to) in [
        ("y", t.from.y, t.to.y),
        ("height", t.from.height, t.to.height),
    ] {
        write!(
            out,
            "<animate attributeName=\"{attr}\" from=\"{}\" to=\"{}\" begin=\"{}ms\" dur=\"{}ms\" fill=\"freeze\" calcMode=\"spline\" keyTimes=\"0;1\" keySplines=\"{}\"></animate>",
            num(from),
            num(to),
            t.delay_ms,
            t.duration_ms,
            t.easing.key_splines()
        )?;
    }
    if standalone {
        write!(out, "<title>{}</title>", encode_text(&bar.tooltip.plain()))?;
    }
    out.push_str("</rect>\n");
    Ok(())
}

/// Compact number formatting: up to 3 decimals, trailing zeros trimmed.
fn num(v: f64) -> String {
    if !v.is_finite() {
        return "0".to_string();
    }
    let s = format!("{:.3}", v);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" { "0".to_string() } else { s.to_string() }
}
