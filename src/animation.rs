//! Bar growth transitions.
//!
//! A transition interpolates a bar's `y` and `height` from a start geometry to an end
//! geometry over a fixed duration, after a per-bar delay. The rendered document lets
//! the browser run it; [`Transition::sample`] computes the same geometry at any instant.

use serde::Serialize;

/// Growth duration of every bar.
pub const DEFAULT_DURATION_MS: u64 = 500;
/// Extra delay per bar index.
pub const DEFAULT_STAGGER_MS: u64 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Easing {
    Linear,
    #[default]
    CubicInOut,
}

impl Easing {
    /// Eased progress for `t` in `[0, 1]` (clamped).
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::CubicInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
        }
    }

    /// Cubic-bezier control points approximating the curve, as used by SVG `keySplines`.
    pub fn key_splines(self) -> &'static str {
        match self {
            Easing::Linear => "0 0 1 1",
            Easing::CubicInOut => "0.65 0 0.35 1",
        }
    }
}

/// Vertical extent of a bar in plot coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BarGeometry {
    pub y: f64,
    pub height: f64,
}

impl BarGeometry {
    fn lerp(self, to: BarGeometry, k: f64) -> BarGeometry {
        BarGeometry {
            y: self.y + (to.y - self.y) * k,
            height: self.height + (to.height - self.height) * k,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Transition {
    pub delay_ms: u64,
    pub duration_ms: u64,
    pub easing: Easing,
    pub from: BarGeometry,
    pub to: BarGeometry,
}

impl Transition {
    /// Transition for the bar at `index` in dataset order.
    pub fn staggered(
        index: usize,
        stagger_ms: u64,
        duration_ms: u64,
        from: BarGeometry,
        to: BarGeometry,
    ) -> Self {
        Self {
            delay_ms: index as u64 * stagger_ms,
            duration_ms,
            easing: Easing::default(),
            from,
            to,
        }
    }

    pub fn end_ms(&self) -> u64 {
        self.delay_ms + self.duration_ms
    }

    /// Geometry `elapsed_ms` after the chart was drawn.
    pub fn sample(&self, elapsed_ms: u64) -> BarGeometry {
        if elapsed_ms <= self.delay_ms {
            return self.from;
        }
        if self.duration_ms == 0 || elapsed_ms >= self.end_ms() {
            return self.to;
        }
        let t = (elapsed_ms - self.delay_ms) as f64 / self.duration_ms as f64;
        self.from.lerp(self.to, self.easing.apply(t))
    }

    pub fn is_finished(&self, elapsed_ms: u64) -> bool {
        elapsed_ms >= self.end_ms()
    }
}
