//! Autoplay timer: advance the carousel one period after it last came to rest

use std::time::Duration;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::Instrument;

use crate::logging;
use super::CarouselController;

impl CarouselController {
    /// Start (or restart) the autoplay timer. Any previous timer is aborted
    /// first, so at most one is ever running.
    ///
    /// Every settled transition, manual or automatic, pushes the next tick
    /// out to one full period after the settle.
    pub async fn start_autoplay(&self, period: Duration) {
        let mut slot = self.autoplay_task.lock().await;
        if let Some(previous) = slot.take() {
            previous.abort();
        }

        let controller = self.clone();
        let settled = self.settled.clone();
        let shutdown = self.shutdown.clone();
        let span = logging::autoplay_span(period);
        span.in_scope(|| tracing::debug!("Autoplay timer started"));

        *slot = Some(tokio::spawn(
            async move {
                let mut ticker = interval_at(Instant::now() + period, period);
                ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
                loop {
                    tokio::select! {
                        _ = shutdown.cancelled() => break,
                        _ = settled.notified() => {
                            ticker.reset();
                            tracing::trace!("Autoplay re-armed after settle");
                        }
                        _ = ticker.tick() => {
                            controller.autoplay_tick().await;
                        }
                    }
                }
                tracing::debug!("Autoplay timer stopped");
            }
            .instrument(span),
        ));
    }

    /// One timer firing. Skipped, not queued, while a transition is in flight.
    pub async fn autoplay_tick(&self) -> bool {
        if self.is_transitioning().await {
            tracing::trace!("Autoplay tick skipped: transition in flight");
            return false;
        }
        self.next().await
    }
}
