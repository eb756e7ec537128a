//! Navigation-related controller methods (next, previous, go-to, settle timer)

use tracing::{Instrument, Span};

use crate::logging;
use crate::model::Navigation;
use super::CarouselController;

impl CarouselController {
    pub async fn next(&self) -> bool {
        self.navigate(Navigation::Next).await
    }

    pub async fn previous(&self) -> bool {
        self.navigate(Navigation::Previous).await
    }

    pub async fn go_to(&self, index: usize) -> bool {
        self.navigate(Navigation::GoTo(index)).await
    }

    /// Click on the slot at `offset`: one step toward it, never a jump.
    pub async fn step_toward(&self, offset: isize) -> bool {
        self.navigate(Navigation::StepToward(offset)).await
    }

    /// Lock, move, sync playback, then schedule the release.
    ///
    /// Returns `false` when the request was dropped.
    pub(crate) async fn navigate(&self, nav: Navigation) -> bool {
        let mut state = self.state.lock().await;
        let Some(accepted) = state.begin(nav) else {
            return false;
        };
        let span = logging::transition_span(accepted.epoch, accepted.from, accepted.to);
        span.in_scope(|| tracing::debug!(?nav, delta = accepted.delta, "Navigation accepted"));

        let pending = {
            let mut playback = self.playback.lock().await;
            playback.on_cursor_changed(self.catalog.track_at(accepted.to))
        };
        drop(state);

        if let Some(pending) = pending {
            self.spawn_start_outcome(pending);
        }
        self.schedule_settle(accepted.epoch, span);
        true
    }

    fn schedule_settle(&self, epoch: u64, span: Span) {
        let state = self.state.clone();
        let settled = self.settled.clone();
        let shutdown = self.shutdown.clone();
        let delay = self.settle_delay;

        tokio::spawn(
            async move {
                tokio::select! {
                    _ = shutdown.cancelled() => {
                        tracing::trace!("Settle timer cancelled");
                    }
                    _ = tokio::time::sleep(delay) => {
                        if state.lock().await.settle(epoch) {
                            settled.notify_one();
                        }
                    }
                }
            }
            .instrument(span),
        );
    }

    pub async fn is_transitioning(&self) -> bool {
        self.state.lock().await.is_locked()
    }

    pub async fn current_index(&self) -> usize {
        self.state.lock().await.index()
    }
}
