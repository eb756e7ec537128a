//! View module - UI rendering
//!
//! This module handles all UI rendering for the application using ratatui.
//! It is organized into submodules by component type:
//!
//! - `utils`: Shared utility functions (truncation, fading)
//! - `coverflow`: The card carousel and its geometry
//! - `controls`: Caption, dots indicator and now-playing bar
//! - `overlays`: Modal overlays (help)

mod utils;
mod coverflow;
mod controls;
mod overlays;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::model::{CarouselSnapshot, HitAreas, UiState};

pub struct AppView;

impl AppView {
    /// Draw one frame and return the clickable regions.
    pub fn render(frame: &mut Frame, snapshot: &CarouselSnapshot, ui_state: &UiState) -> HitAreas {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2), // Header
                Constraint::Min(6),    // Cover flow
                Constraint::Length(2), // Album caption
                Constraint::Length(2), // Dots indicator
                Constraint::Length(3), // Now-playing bar
            ])
            .split(frame.area());

        let artist = snapshot
            .center()
            .map(|slot| slot.item.artist.as_str())
            .filter(|artist| !artist.is_empty())
            .unwrap_or("Cover Flow");
        let header = Paragraph::new(Line::from(vec![
            Span::styled(format!("{artist} "), Style::default().fg(Color::White)),
            Span::styled(
                "Discography",
                Style::default().fg(Color::LightRed).add_modifier(Modifier::BOLD),
            ),
        ]))
        .alignment(Alignment::Center);
        frame.render_widget(header, chunks[0]);

        let slots = coverflow::render_coverflow(frame, chunks[1], snapshot);
        controls::render_caption(frame, chunks[2], snapshot);
        let dots = controls::render_dots(frame, chunks[3], snapshot);
        controls::render_status_bar(frame, chunks[4], snapshot);

        // Help popup overlay (if open)
        if ui_state.show_help_popup {
            overlays::render_help_popup(frame);
        }

        HitAreas { slots, dots }
    }
}
