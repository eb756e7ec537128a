//! Overlay rendering (help popup)

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

pub fn render_help_popup(frame: &mut Frame) {
    let area = frame.area();

    let keybindings = vec![
        ("", "── Carousel ──"),
        ("← / h", "Previous album"),
        ("→ / l", "Next album"),
        ("1-9", "Jump to album"),
        ("Home / End", "First / last album"),
        ("Click", "Step toward a cover"),
        ("", ""),
        ("", "── Playback ──"),
        ("Space / Enter", "Play / Pause"),
        ("", ""),
        ("", "── General ──"),
        ("?", "Toggle this help"),
        ("Q / Esc", "Quit"),
    ];

    let popup_width = 48.min(area.width);
    let popup_height = (keybindings.len() as u16 + 2).min(area.height);

    let popup_x = area.width.saturating_sub(popup_width) / 2;
    let popup_y = area.height.saturating_sub(popup_height) / 2;

    let popup_area = Rect {
        x: popup_x,
        y: popup_y,
        width: popup_width,
        height: popup_height,
    };

    // Clear the area behind the popup
    frame.render_widget(Clear, popup_area);

    let lines: Vec<Line> = keybindings
        .iter()
        .map(|(key, desc)| {
            if key.is_empty() {
                // Section header or empty line
                Line::from(Span::styled(
                    format!("{:^44}", desc),
                    Style::default().fg(Color::LightRed).add_modifier(Modifier::BOLD),
                ))
            } else {
                Line::from(vec![
                    Span::styled(
                        format!("{:>16}", key),
                        Style::default().fg(Color::LightRed).add_modifier(Modifier::BOLD),
                    ),
                    Span::raw("  "),
                    Span::styled(desc.to_string(), Style::default().fg(Color::White)),
                ])
            }
        })
        .collect();

    let help_text = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Gray))
                .title(" Help (? or Esc to close) ")
                .title_style(Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD))
                .style(Style::default().bg(Color::Black)),
        )
        .style(Style::default().bg(Color::Black));

    frame.render_widget(help_text, popup_area);
}
