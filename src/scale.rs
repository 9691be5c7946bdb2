//! Band and linear scales plus "nice" tick generation.
//!
//! The band scale spreads categories evenly over a pixel range with inner/outer
//! padding; the linear scale maps a numeric domain onto pixels. Tick steps are
//! chosen from 1, 2 and 5 times a power of ten.

use num_format::{Locale, ToFormattedString};
use serde::Serialize;

/// Upper-bound extension used when the y domain would otherwise have zero width.
pub const DEGENERATE_SPAN: f64 = 0.5;

/// Default number of ticks requested from a linear scale.
pub const DEFAULT_TICK_COUNT: usize = 10;

/// Categorical scale: each distinct key gets a contiguous band.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BandScale {
    domain: Vec<String>,
    range: (f64, f64),
    padding_inner: f64,
    padding_outer: f64,
    align: f64,
    step: f64,
    start: f64,
    bandwidth: f64,
}

impl BandScale {
    /// `padding` sets both inner and outer padding, as a fraction of the step.
    ///
    /// Duplicate keys collapse onto the first occurrence.
    pub fn new<S: AsRef<str>>(domain: &[S], range: (f64, f64), padding: f64) -> Self {
        let mut seen = ahash::AHashSet::new();
        let domain: Vec<String> = domain
            .iter()
            .map(|s| s.as_ref())
            .filter(|s| seen.insert(*s))
            .map(str::to_string)
            .collect();
        let padding = padding.clamp(0.0, 1.0);
        let mut scale = Self {
            domain,
            range,
            padding_inner: padding,
            padding_outer: padding,
            align: 0.5,
            step: 0.0,
            start: 0.0,
            bandwidth: 0.0,
        };
        scale.rescale();
        scale
    }

    fn rescale(&mut self) {
        let n = self.domain.len() as f64;
        let (r0, r1) = self.range;
        let (lo, hi) = if r1 < r0 { (r1, r0) } else { (r0, r1) };
        let step = (hi - lo) / (n - self.padding_inner + self.padding_outer * 2.0).max(1.0);
        self.start = lo + (hi - lo - step * (n - self.padding_inner)) * self.align;
        self.step = step;
        self.bandwidth = step * (1.0 - self.padding_inner);
    }

    /// Left edge of the band for `key`, or `None` if it is not in the domain.
    pub fn band(&self, key: &str) -> Option<f64> {
        self.domain
            .iter()
            .position(|k| k == key)
            .map(|i| self.start + self.step * i as f64)
    }

    /// Center of the band for `key`.
    pub fn center(&self, key: &str) -> Option<f64> {
        self.band(key).map(|x| x + self.bandwidth / 2.0)
    }

    pub fn bandwidth(&self) -> f64 {
        self.bandwidth
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    pub fn domain(&self) -> &[String] {
        &self.domain
    }
}

/// Continuous scale from `domain` to `range`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    /// Y scale for ratings: domain `[min, max]`, range `[plot_height, 0]`.
    ///
    /// When `max` is missing, non-finite or not above `min`, the domain becomes
    /// `[min, min + DEGENERATE_SPAN]`.
    pub fn for_ratings(min: f64, max: Option<f64>, plot_height: f64) -> Self {
        let upper = match max {
            Some(m) if m.is_finite() && m > min => m,
            _ => min + DEGENERATE_SPAN,
        };
        Self::new((min, upper), (plot_height, 0.0))
    }

    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    pub fn map(&self, v: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let span = d1 - d0;
        if span == 0.0 || !span.is_finite() {
            return (r0 + r1) / 2.0;
        }
        r0 + (v - d0) / span * (r1 - r0)
    }

    /// Roughly `count` evenly spaced round values inside the domain.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        let (d0, d1) = self.domain;
        ticks(d0.min(d1), d0.max(d1), count)
    }

    /// Formatter for tick values with the precision implied by the tick step.
    pub fn tick_formatter(&self, count: usize) -> impl Fn(f64) -> String {
        let (d0, d1) = self.domain;
        let precision = precision_fixed(tick_step(d0.min(d1), d0.max(d1), count));
        move |v| format_grouped(v, precision)
    }
}

fn tick_spec(start: f64, stop: f64, count: f64) -> (f64, f64, f64) {
    let step = (stop - start) / count.max(0.0);
    let power = step.log10().floor();
    let error = step / 10f64.powf(power);
    let factor = if error >= 50f64.sqrt() {
        10.0
    } else if error >= 10f64.sqrt() {
        5.0
    } else if error >= 2f64.sqrt() {
        2.0
    } else {
        1.0
    };
    let (i1, i2, inc) = if power < 0.0 {
        let k = 10f64.powf(-power) / factor;
        let (mut i1, mut i2) = ((start * k).round(), (stop * k).round());
        if i1 / k < start {
            i1 += 1.0;
        }
        if i2 / k > stop {
            i2 -= 1.0;
        }
        (i1, i2, -k)
    } else {
        let k = 10f64.powf(power) * factor;
        let (mut i1, mut i2) = ((start / k).round(), (stop / k).round());
        if i1 * k < start {
            i1 += 1.0;
        }
        if i2 * k > stop {
            i2 -= 1.0;
        }
        (i1, i2, k)
    };
    if i2 < i1 && (0.5..2.0).contains(&count) {
        return tick_spec(start, stop, count * 2.0);
    }
    (i1, i2, inc)
}

/// Nice tick values in `[start, stop]`.
pub fn ticks(start: f64, stop: f64, count: usize) -> Vec<f64> {
    if count == 0 || !start.is_finite() || !stop.is_finite() {
        return Vec::new();
    }
    if start == stop {
        return vec![start];
    }
    let (i1, i2, inc) = tick_spec(start, stop, count as f64);
    if i2 < i1 || !inc.is_finite() {
        return Vec::new();
    }
    let n = (i2 - i1) as usize + 1;
    (0..n)
        .map(|i| {
            let k = i1 + i as f64;
            if inc < 0.0 { k / -inc } else { k * inc }
        })
        .collect()
}

/// Distance between consecutive ticks for the given request.
pub fn tick_step(start: f64, stop: f64, count: usize) -> f64 {
    if count == 0 || stop.partial_cmp(&start) != Some(std::cmp::Ordering::Greater) {
        return 0.0;
    }
    let (_, _, inc) = tick_spec(start, stop, count as f64);
    if inc < 0.0 { 1.0 / -inc } else { inc }
}

/// Number of decimals needed to tell ticks `step` apart.
fn precision_fixed(step: f64) -> usize {
    if step == 0.0 || !step.is_finite() {
        return 0;
    }
    let sci = format!("{:e}", step.abs());
    let exp: i32 = sci
        .split_once('e')
        .and_then(|(_, e)| e.parse().ok())
        .unwrap_or(0);
    (-exp).max(0) as usize
}

/// Fixed-point formatting with thousands grouping of the integer part.
fn format_grouped(v: f64, precision: usize) -> String {
    let s = format!("{:.*}", precision, v.abs());
    let (int_part, frac_part) = match s.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (s.as_str(), None),
    };
    let grouped = int_part
        .parse::<u64>()
        .map(|n| n.to_formatted_string(&Locale::en))
        .unwrap_or_else(|_| int_part.to_string());
    let sign = if v < 0.0 && !s.trim_start_matches(['0', '.']).is_empty() {
        "-"
    } else {
        ""
    };
    match frac_part {
        Some(f) => format!("{sign}{grouped}.{f}"),
        None => format!("{sign}{grouped}"),
    }
}
