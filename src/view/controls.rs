//! Album caption, dots indicator and now-playing bar

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::model::CarouselSnapshot;

const DOT_SPACING: u16 = 3;

pub fn render_caption(frame: &mut Frame, area: Rect, snapshot: &CarouselSnapshot) {
    let Some(center) = snapshot.center() else {
        return;
    };
    let item = &center.item;

    let byline = if item.artist.is_empty() {
        item.year.clone()
    } else {
        format!("{} • {}", item.artist, item.year)
    };

    let caption = Paragraph::new(vec![
        Line::from(Span::styled(
            item.title.clone(),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(byline, Style::default().fg(Color::Gray))),
    ])
    .alignment(Alignment::Center);
    frame.render_widget(caption, area);
}

/// One-cell rectangles for the dots that fit on the row, centered.
///
/// When the catalog has more items than fit, the visible run of dots
/// follows the cursor.
pub fn dot_rects(area: Rect, count: usize, cursor: usize) -> Vec<(usize, Rect)> {
    if count == 0 || area.width == 0 || area.height == 0 {
        return Vec::new();
    }
    let spacing = DOT_SPACING as usize;
    let fit = (area.width as usize - 1) / spacing + 1;
    let visible = count.min(fit);
    let first = cursor.saturating_sub(visible / 2).min(count - visible);

    // Bounded by area.width, so the u16 conversions below cannot truncate.
    let total = ((visible - 1) * spacing + 1) as u16;
    let start = area.x + area.width.saturating_sub(total) / 2;
    (0..visible)
        .map(|slot| {
            let x = start + (slot * spacing) as u16;
            (first + slot, Rect::new(x, area.y, 1, 1))
        })
        .collect()
}

pub fn render_dots(frame: &mut Frame, area: Rect, snapshot: &CarouselSnapshot) -> Vec<(usize, Rect)> {
    let rects = dot_rects(area, snapshot.len, snapshot.cursor);
    for (index, rect) in &rects {
        let (glyph, style) = if *index == snapshot.cursor {
            // Ringed while the carousel is still settling
            let glyph = if snapshot.locked { "◉" } else { "●" };
            (glyph, Style::default().fg(Color::LightRed).add_modifier(Modifier::BOLD))
        } else {
            ("○", Style::default().fg(Color::DarkGray))
        };
        frame.render_widget(Paragraph::new(glyph).style(style), *rect);
    }
    rects
}

pub fn render_status_bar(frame: &mut Frame, area: Rect, snapshot: &CarouselSnapshot) {
    let status_text = if !snapshot.audio_available {
        " No audio".to_string()
    } else if snapshot.is_playing {
        let title = snapshot.center().map(|s| s.item.title.as_str()).unwrap_or_default();
        format!(" ▶ {}", title)
    } else {
        " ⏸  Paused".to_string()
    };

    let position = format!(" {} / {} ", snapshot.cursor + 1, snapshot.len);
    let autoplay = if snapshot.autoplay { " Autoplay: On " } else { " Autoplay: Off " };

    let bar = Paragraph::new(Line::from(vec![
        Span::styled(status_text, Style::default().fg(Color::LightRed)),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(position)
            .title_bottom(Line::from(format!("{}| ? help ", autoplay)).right_aligned()),
    );
    frame.render_widget(bar, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dots_are_centered_and_spaced() {
        let rects = dot_rects(Rect::new(0, 5, 21, 1), 5, 0);
        let xs: Vec<u16> = rects.iter().map(|(_, r)| r.x).collect();
        assert_eq!(xs, vec![4, 7, 10, 13, 16]);
        assert!(rects.iter().all(|(_, r)| r.y == 5));
    }

    #[test]
    fn dots_that_do_not_fit_are_dropped() {
        let rects = dot_rects(Rect::new(0, 0, 7, 1), 8, 0);
        assert_eq!(rects.len(), 3);
        assert!(dot_rects(Rect::new(0, 0, 10, 0), 3, 0).is_empty());
    }

    #[test]
    fn huge_catalog_shows_a_window_around_the_cursor() {
        let area = Rect::new(0, 0, 80, 1);
        let rects = dot_rects(area, 30_000, 15_000);

        assert_eq!(rects.len(), 27);
        assert!(rects.iter().any(|(index, _)| *index == 15_000));
        assert!(rects.iter().all(|(_, r)| r.right() <= area.right()));

        let tail = dot_rects(area, 30_000, 29_999);
        assert_eq!(tail.last().map(|(index, _)| *index), Some(29_999));
        assert_eq!(tail.first().map(|(index, _)| *index), Some(30_000 - 27));
    }
}
