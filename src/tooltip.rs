//! Hover behavior of the bars.
//!
//! Each bar is either idle (half transparent, tooltip hidden) or hovered (opaque,
//! tooltip shown next to the cursor). Transitions are driven purely by pointer events.

use crate::config::ChartConfig;
use crate::models::Row;
use html_escape::encode_text;
use serde::Serialize;

/// Text shown in the floating tooltip for one row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TooltipContent {
    pub title: String,
    pub rating: String,
    pub genre: String,
}

impl TooltipContent {
    pub fn for_row(row: &Row) -> Self {
        Self {
            title: row.series_title.clone(),
            rating: row
                .rating_text
                .clone()
                .unwrap_or_else(|| format_rating(row.rating)),
            genre: row.genre.clone(),
        }
    }

    /// Markup placed inside the tooltip element (title underlined, one field per line).
    pub fn html(&self) -> String {
        format!(
            "<u>{}</u><br>Rating: {}<br>Genre: {}",
            encode_text(&self.title),
            encode_text(&self.rating),
            encode_text(&self.genre)
        )
    }

    /// Single-line plain text, used for native SVG `<title>` tooltips.
    pub fn plain(&self) -> String {
        format!(
            "{} | Rating: {} | Genre: {}",
            self.title, self.rating, self.genre
        )
    }
}

/// Rows built in code have no source text; their ratings keep at least one decimal ("9.0", "8.75").
pub fn format_rating(v: f64) -> String {
    if v.fract() == 0.0 {
        format!("{v:.1}")
    } else {
        format!("{v}")
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Enter { bar: usize },
    Move { page_x: f64, page_y: f64 },
    Leave,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HoverState {
    Idle,
    Hover {
        bar: usize,
        position: Option<(f64, f64)>,
    },
}

/// Visible state after an event.
#[derive(Debug, Clone, PartialEq)]
pub struct TooltipView {
    pub tooltip_opacity: f64,
    /// `(left, top)` in page pixels once the cursor has moved over the bar.
    pub position: Option<(f64, f64)>,
    pub content: Option<TooltipContent>,
}

/// Hover state machine over a fixed set of bars.
#[derive(Debug, Clone)]
pub struct TooltipController {
    contents: Vec<TooltipContent>,
    state: HoverState,
    idle_opacity: f64,
    hover_opacity: f64,
    offset: (f64, f64),
}

impl TooltipController {
    pub fn new(rows: &[Row], config: &ChartConfig) -> Self {
        Self {
            contents: rows.iter().map(TooltipContent::for_row).collect(),
            state: HoverState::Idle,
            idle_opacity: config.idle_opacity,
            hover_opacity: config.hover_opacity,
            offset: config.tooltip_offset,
        }
    }

    pub fn state(&self) -> HoverState {
        self.state
    }

    pub fn handle(&mut self, event: PointerEvent) -> TooltipView {
        self.state = match (self.state, event) {
            (_, PointerEvent::Enter { bar }) if bar < self.contents.len() => HoverState::Hover {
                bar,
                position: None,
            },
            (HoverState::Hover { bar, .. }, PointerEvent::Move { page_x, page_y }) => {
                HoverState::Hover {
                    bar,
                    position: Some((page_x + self.offset.0, page_y + self.offset.1)),
                }
            }
            (_, PointerEvent::Leave) => HoverState::Idle,
            (state, _) => state,
        };
        self.view()
    }

    pub fn view(&self) -> TooltipView {
        match self.state {
            HoverState::Idle => TooltipView {
                tooltip_opacity: 0.0,
                position: None,
                content: None,
            },
            HoverState::Hover { bar, position } => TooltipView {
                tooltip_opacity: 1.0,
                position,
                content: self.contents.get(bar).cloned(),
            },
        }
    }

    pub fn bar_opacity(&self, bar: usize) -> f64 {
        match self.state {
            HoverState::Hover { bar: hovered, .. } if hovered == bar => self.hover_opacity,
            _ => self.idle_opacity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rating_keeps_one_decimal() {
        assert_eq!(format_rating(9.0), "9.0");
        assert_eq!(format_rating(8.75), "8.75");
    }

    #[test]
    fn html_is_escaped() {
        let c = TooltipContent::for_row(&Row::new("Tom & <Jerry>", 9.1, "Kids"));
        assert_eq!(
            c.html(),
            "<u>Tom &amp; &lt;Jerry&gt;</u><br>Rating: 9.1<br>Genre: Kids"
        );
    }

    #[test]
    fn rating_is_shown_as_written_in_the_file() {
        let mut row = Row::new("Dark", 8.5, "Sci-Fi");
        row.rating_text = Some("8.50".into());
        assert_eq!(TooltipContent::for_row(&row).rating, "8.50");
    }

    #[test]
    fn move_without_hover_is_ignored() {
        let rows = vec![Row::new("A", 9.0, "Drama")];
        let mut tc = TooltipController::new(&rows, &ChartConfig::default());
        let v = tc.handle(PointerEvent::Move {
            page_x: 1.0,
            page_y: 1.0,
        });
        assert_eq!(tc.state(), HoverState::Idle);
        assert_eq!(v.tooltip_opacity, 0.0);
    }
}
