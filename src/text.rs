//! Text measurement and truncation for axis labels.

/// Heuristic: estimate pixel width of text in a sans-serif font.
pub fn estimate_text_width_px(text: &str, font_px: u32) -> f64 {
    text.chars().count() as f64 * font_px as f64 * 0.60
}

/// Longest prefix that fits `max_px`, with a trailing ellipsis when anything was cut.
pub fn truncate_to_width(text: &str, font_px: u32, max_px: f64) -> String {
    if estimate_text_width_px(text, font_px) <= max_px {
        return text.to_string();
    }
    let mut out = String::new();
    for ch in text.chars() {
        out.push(ch);
        if estimate_text_width_px(&out, font_px) + estimate_text_width_px("…", font_px) > max_px {
            out.pop();
            break;
        }
    }
    let kept = out.trim_end().to_string();
    if kept.is_empty() {
        return "…".to_string();
    }
    kept + "…"
}

/// Room along a label rotated by 45° that hangs below the axis into a margin of `margin_px`.
pub fn rotated_label_room_px(margin_px: f64, reserved_px: f64) -> f64 {
    (margin_px - reserved_px).max(0.0) / std::f64::consts::FRAC_1_SQRT_2
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_is_untouched() {
        assert_eq!(truncate_to_width("Dark", 10, 100.0), "Dark");
    }

    #[test]
    fn long_text_gets_ellipsis() {
        // 6px per char at 10px: 9 chars plus the ellipsis fill 60px
        let t = truncate_to_width("The Twilight Zone", 10, 60.0);
        assert_eq!(t, "The Twili…");
        assert!(estimate_text_width_px(&t, 10) <= 60.0);
    }
}
