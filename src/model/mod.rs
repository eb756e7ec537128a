//! Model module - Carousel state and data types
//!
//! This module contains the data structures and state machines of the
//! carousel engine. It is organized into submodules by responsibility:
//!
//! - `catalog`: Album items and track locators
//! - `cursor`: Circular cursor over the item list
//! - `window`: Visible window projection and slot weighting
//! - `carousel`: Cursor + transition lock state machine
//! - `playback`: Playback synchronizer state machine
//! - `types`: Navigation requests, render snapshot, UI state

mod catalog;
mod cursor;
mod window;
mod carousel;
pub(crate) mod playback;
mod types;

pub use catalog::{Catalog, TrackRef};

pub use window::{project, RenderSlot, WeightProfile};

pub use carousel::CarouselState;

pub use playback::{PendingStart, PlaybackSynchronizer};

pub use types::{CarouselSnapshot, HitAreas, Navigation, UiState};
