//! Core type definitions shared by controller and view

use ratatui::layout::Rect;

use super::catalog::TrackRef;
use super::window::{RenderSlot, WeightProfile};

/// A navigation request entering the carousel
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Navigation {
    Next,
    Previous,
    GoTo(usize),
    /// Click on a visible slot: one step in the direction of its offset.
    StepToward(isize),
}

/// Everything the host needs to draw one frame
#[derive(Clone, Debug)]
pub struct CarouselSnapshot {
    pub cursor: usize,
    pub len: usize,
    pub slots: Vec<RenderSlot>,
    pub profile: WeightProfile,
    pub locked: bool,
    pub is_playing: bool,
    pub loaded_track: Option<TrackRef>,
    pub audio_available: bool,
    pub autoplay: bool,
}

impl CarouselSnapshot {
    pub fn center(&self) -> Option<&RenderSlot> {
        self.slots.iter().find(|slot| slot.is_center())
    }
}

/// Screen regions from the last draw, used to hit-test mouse clicks
#[derive(Clone, Debug, Default)]
pub struct HitAreas {
    /// Card rectangles keyed by slot offset, nearest first.
    pub slots: Vec<(isize, Rect)>,
    /// Dot rectangles keyed by item index.
    pub dots: Vec<(usize, Rect)>,
}

/// UI state for the application
#[derive(Clone, Debug, Default)]
pub struct UiState {
    pub show_help_popup: bool,
    pub should_quit: bool,
    pub hit_areas: HitAreas,
}
