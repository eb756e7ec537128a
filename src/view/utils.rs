//! Utility functions for rendering UI components

use ratatui::style::Color;

pub fn truncate_string(s: &str, max_width: usize) -> String {
    if s.chars().count() > max_width {
        let truncated: String = s.chars().take(max_width.saturating_sub(3)).collect();
        format!("{}...", truncated)
    } else {
        s.to_string()
    }
}

/// Short name for a cover reference: the last path segment without query.
pub fn cover_label(cover: &str) -> &str {
    let path = cover.split(['?', '#']).next().unwrap_or_default();
    path.trim_end_matches('/').rsplit('/').next().unwrap_or_default()
}

/// Grey level for a slot opacity in `0.0..=1.0` (dark background assumed).
pub fn fade(opacity: f32) -> Color {
    let level = (40.0 + opacity.clamp(0.0, 1.0) * 215.0).round() as u8;
    Color::Rgb(level, level, level)
}
