//! Key and mouse event handling

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Position;

use crate::model::HitAreas;
use super::CarouselController;

/// Where a click landed
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HitTarget {
    Slot(isize),
    Dot(usize),
}

impl HitAreas {
    /// Cards are stored nearest-first, so overlapping cards resolve to the
    /// one drawn on top.
    pub fn hit(&self, column: u16, row: u16) -> Option<HitTarget> {
        let pos = Position::new(column, row);
        if let Some((offset, _)) = self.slots.iter().find(|(_, rect)| rect.contains(pos)) {
            return Some(HitTarget::Slot(*offset));
        }
        self.dots
            .iter()
            .find(|(_, rect)| rect.contains(pos))
            .map(|(index, _)| HitTarget::Dot(*index))
    }
}

impl CarouselController {
    pub async fn handle_key_event(&self, key: KeyEvent) -> Result<()> {
        if key.kind != KeyEventKind::Press {
            return Ok(());
        }

        let mut ui_state = self.ui_state.lock().await;

        // Help popup swallows everything but its own close keys
        if ui_state.show_help_popup {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')) {
                ui_state.show_help_popup = false;
            }
            return Ok(());
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                ui_state.should_quit = true;
            }
            KeyCode::Char('?') => {
                ui_state.show_help_popup = true;
            }
            KeyCode::Left | KeyCode::Char('h') => {
                drop(ui_state);
                self.previous().await;
            }
            KeyCode::Right | KeyCode::Char('l') => {
                drop(ui_state);
                self.next().await;
            }
            KeyCode::Home => {
                drop(ui_state);
                self.go_to(0).await;
            }
            KeyCode::End => {
                drop(ui_state);
                self.go_to(self.catalog.len().saturating_sub(1)).await;
            }
            // Play/Pause toggle
            KeyCode::Char(' ') | KeyCode::Enter => {
                drop(ui_state);
                self.toggle_playback().await;
            }
            KeyCode::Char(c @ '1'..='9') => {
                drop(ui_state);
                let index = c as usize - '1' as usize;
                if index < self.catalog.len() {
                    self.go_to(index).await;
                }
            }
            _ => {}
        }
        Ok(())
    }

    pub async fn handle_mouse_event(&self, mouse: MouseEvent) -> Result<()> {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return Ok(());
        }

        let target = {
            let ui_state = self.ui_state.lock().await;
            if ui_state.show_help_popup {
                return Ok(());
            }
            ui_state.hit_areas.hit(mouse.column, mouse.row)
        };

        match target {
            Some(HitTarget::Slot(0)) => {
                self.toggle_playback().await;
            }
            Some(HitTarget::Slot(offset)) => {
                self.step_toward(offset).await;
            }
            Some(HitTarget::Dot(index)) => {
                self.go_to(index).await;
            }
            None => {}
        }
        Ok(())
    }
}
