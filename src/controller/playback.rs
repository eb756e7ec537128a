//! Playback control methods

use crate::model::PendingStart;
use super::CarouselController;

impl CarouselController {
    /// Play or pause the album under the cursor.
    ///
    /// Waits for the start outcome, so the returned flag is the settled
    /// play state. Never fails; a refused start simply reports `false`.
    pub async fn toggle_playback(&self) -> bool {
        let pending = {
            let state = self.state.lock().await;
            let mut playback = self.playback.lock().await;
            playback.toggle(self.catalog.track_at(state.index()))
        };

        if let Some(pending) = pending {
            self.apply_start_outcome(pending).await;
        }
        self.playback.lock().await.is_playing()
    }

    /// Resolve a start triggered by navigation without holding up the caller.
    pub(crate) fn spawn_start_outcome(&self, pending: PendingStart) {
        let controller = self.clone();
        tokio::spawn(async move {
            controller.apply_start_outcome(pending).await;
        });
    }

    async fn apply_start_outcome(&self, pending: PendingStart) {
        let PendingStart { generation, outcome } = pending;
        let result = tokio::select! {
            _ = self.shutdown.cancelled() => return,
            result = outcome => result,
        };
        let mut playback = self.playback.lock().await;
        if playback.resolve(generation, result) && playback.is_playing() {
            tracing::info!(track = ?playback.loaded_track().map(|t| t.to_string()), "Playback running");
        }
    }

    pub async fn is_playing(&self) -> bool {
        self.playback.lock().await.is_playing()
    }
}
