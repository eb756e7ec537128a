//! Cover-flow rendering: overlapping cards sized by slot weight

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::model::{CarouselSnapshot, RenderSlot, WeightProfile};
use super::utils::{cover_label, fade, truncate_string};

/// Terminal cells are roughly twice as tall as wide.
const CELL_ASPECT: f32 = 2.0;
const GLOW: Color = Color::LightRed;

/// Card rectangles for every slot, nearest to the center first.
///
/// Sizes are relative to the largest slot so an enlarged center still fits.
pub fn slot_rects(area: Rect, slots: &[RenderSlot], profile: WeightProfile) -> Vec<(isize, Rect)> {
    if area.width == 0 || area.height == 0 {
        return Vec::new();
    }
    let peak = slots.iter().map(|s| s.weight.scale).fold(f32::EPSILON, f32::max);

    let base_h = area.height as f32;
    let base_w = (base_h * CELL_ASPECT).min(area.width as f32 * 0.34);
    let mid_x = area.x as f32 + area.width as f32 / 2.0;
    let mid_y = area.y as f32 + area.height as f32 / 2.0;

    let mut rects: Vec<(isize, Rect)> = slots
        .iter()
        .filter_map(|slot| {
            let scale = slot.weight.scale / peak;
            let w = (base_w * scale).round();
            let h = (base_h * scale).round();
            let cx = mid_x + slot.weight.shift / profile.cover_units() * (base_w / peak);
            let x = (cx - w / 2.0).round();
            let y = (mid_y - h / 2.0).round();
            if w < 3.0 || h < 3.0 || x + w <= area.x as f32 || x >= area.right() as f32 {
                return None;
            }
            let rect = Rect {
                x: x.max(0.0) as u16,
                y: y.max(0.0) as u16,
                width: w as u16,
                height: h as u16,
            }
            .intersection(area);
            (!rect.is_empty()).then_some((slot.offset, rect))
        })
        .collect();

    rects.sort_by_key(|(offset, _)| (offset.unsigned_abs(), *offset));
    rects
}

pub fn render_coverflow(frame: &mut Frame, area: Rect, snapshot: &CarouselSnapshot) -> Vec<(isize, Rect)> {
    let rects = slot_rects(area, &snapshot.slots, snapshot.profile);

    // Farthest first so nearer cards overlap them
    for (offset, rect) in rects.iter().rev() {
        if let Some(slot) = snapshot.slots.iter().find(|s| s.offset == *offset) {
            frame.render_widget(Clear, *rect);
            render_card(frame, *rect, slot, snapshot);
        }
    }

    rects
}

fn render_card(frame: &mut Frame, area: Rect, slot: &RenderSlot, snapshot: &CarouselSnapshot) {
    let tone = fade(slot.weight.opacity);
    let inner_width = area.width.saturating_sub(2) as usize;

    // Cards turned toward the center lean their caption that way
    let alignment = match slot.offset {
        o if o < 0 => Alignment::Right,
        o if o > 0 => Alignment::Left,
        _ => Alignment::Center,
    };

    let block = if slot.is_center() {
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Thick)
            .border_style(Style::default().fg(GLOW))
    } else {
        Block::default()
            .borders(Borders::ALL)
            .border_type(if slot.is_adjacent() { BorderType::Rounded } else { BorderType::Plain })
            .border_style(Style::default().fg(tone))
    };

    let mut lines = Vec::new();
    let pad = area.height.saturating_sub(if slot.is_center() { 6 } else { 3 }) / 2;
    lines.extend(std::iter::repeat_n(Line::default(), pad as usize));

    if slot.is_center() {
        if snapshot.audio_available && slot.item.track.is_some() {
            let icon = if snapshot.is_playing { "⏸" } else { "▶" };
            lines.push(Line::from(Span::styled(
                icon,
                Style::default().fg(GLOW).add_modifier(Modifier::BOLD),
            )));
            lines.push(Line::default());
        }
        lines.push(Line::from(Span::styled(
            truncate_string(&slot.item.title, inner_width),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(Span::styled(
            slot.item.year.clone(),
            Style::default().fg(Color::Gray),
        )));
        let label = cover_label(&slot.item.cover);
        if area.height >= 9 && !label.is_empty() {
            lines.push(Line::from(Span::styled(
                truncate_string(label, inner_width),
                Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
            )));
        }
    } else {
        lines.push(Line::from(Span::styled(
            truncate_string(&slot.item.title, inner_width),
            Style::default().fg(tone),
        )));
    }

    let card = Paragraph::new(lines)
        .alignment(alignment)
        .wrap(Wrap { trim: true })
        .block(block);
    frame.render_widget(card, area);
}
