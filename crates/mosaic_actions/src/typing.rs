//! The client's own typing indicator.
//!
//! Each channel has at most one keep-alive task. The task calls
//! [`RestClient::trigger_typing`] immediately and then on a fixed cadence
//! until the indicator is stopped or a call fails.

use mosaic_core::ChannelId;
use mosaic_error::{MosaicResult, TypingError, TypingErrorKind};
use mosaic_interface::RestClient;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, info, instrument};

/// Keep-alive cadence; the remote shows an indicator for about ten seconds.
pub const DEFAULT_TYPING_INTERVAL: Duration = Duration::from_millis(9_000);

/// Lifecycle of one indicator.
#[derive(Debug, Clone, PartialEq)]
pub enum TypingStatus {
    /// Keep-alive running
    Active,
    /// Stopped by the caller
    Stopped,
    /// Cancelled because a keep-alive call failed
    Failed(TypingError),
}

struct TypingTimer {
    count: u32,
    generation: u64,
    task: JoinHandle<()>,
    status: watch::Sender<TypingStatus>,
}

type TimerTable = Arc<Mutex<HashMap<ChannelId, TypingTimer>>>;

/// Resolves when an indicator ends.
#[derive(Debug, Clone)]
pub struct TypingCompletion {
    channel_id: ChannelId,
    status: watch::Receiver<TypingStatus>,
}

impl TypingCompletion {
    /// Wait for the indicator to end.
    ///
    /// # Errors
    ///
    /// Returns the keep-alive failure that cancelled the indicator, or
    /// `Abandoned` if the indicator disappeared without being stopped.
    pub async fn wait(mut self) -> MosaicResult<()> {
        let channel_id = self.channel_id;
        let status = self
            .status
            .wait_for(|s| *s != TypingStatus::Active)
            .await
            .map_err(|_| TypingError::new(TypingErrorKind::Abandoned(channel_id.get())))?;
        match &*status {
            TypingStatus::Failed(e) => Err(e.clone().into()),
            _ => Ok(()),
        }
    }

    /// The status right now.
    pub fn status(&self) -> TypingStatus {
        self.status.borrow().clone()
    }
}

/// Per-channel typing state machine.
///
/// Cheap to clone; clones share the timer table.
#[derive(Clone)]
pub struct TypingIndicator {
    rest: Arc<dyn RestClient>,
    interval: Duration,
    timers: TimerTable,
    generations: Arc<AtomicU64>,
}

impl std::fmt::Debug for TypingIndicator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypingIndicator")
            .field("interval", &self.interval)
            .field("active", &self.lock().len())
            .finish_non_exhaustive()
    }
}

impl TypingIndicator {
    /// Indicator calling `rest` every `interval`.
    pub fn new(rest: Arc<dyn RestClient>, interval: Duration) -> Self {
        Self {
            rest,
            interval: interval.max(Duration::from_millis(1)),
            timers: Arc::default(),
            generations: Arc::default(),
        }
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<ChannelId, TypingTimer>> {
        self.timers.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Start typing in a channel, or raise the count of a running indicator.
    ///
    /// An explicit `count` replaces the current count; without one it goes up
    /// by one. Every caller of a running indicator shares one completion.
    ///
    /// The keep-alive runs on the current tokio runtime. Called outside one,
    /// nothing starts and the completion has already failed with
    /// [`TypingErrorKind::NoRuntime`].
    #[instrument(skip(self))]
    pub fn start(&self, channel_id: ChannelId, count: Option<u32>) -> TypingCompletion {
        let mut timers = self.lock();
        if let Some(timer) = timers.get_mut(&channel_id) {
            timer.count = count.unwrap_or(timer.count.saturating_add(1));
            debug!(count = timer.count, "Typing indicator already running");
            return TypingCompletion {
                channel_id,
                status: timer.status.subscribe(),
            };
        }

        let Ok(runtime) = Handle::try_current() else {
            error!("Cannot start typing outside a tokio runtime");
            let error = TypingError::new(TypingErrorKind::NoRuntime(channel_id.get()));
            let (_, receiver) = watch::channel(TypingStatus::Failed(error));
            return TypingCompletion {
                channel_id,
                status: receiver,
            };
        };

        let (status, receiver) = watch::channel(TypingStatus::Active);
        let generation = self.generations.fetch_add(1, Ordering::Relaxed);
        let task = runtime.spawn(keep_alive(
            Arc::clone(&self.rest),
            Arc::clone(&self.timers),
            channel_id,
            generation,
            self.interval,
        ));
        timers.insert(
            channel_id,
            TypingTimer {
                count: count.unwrap_or(1),
                generation,
                task,
                status,
            },
        );
        info!("Started typing");
        TypingCompletion {
            channel_id,
            status: receiver,
        }
    }

    /// Lower the count of a running indicator, stopping it at zero or when
    /// `force` is set. Does nothing when no indicator runs.
    #[instrument(skip(self))]
    pub fn stop(&self, channel_id: ChannelId, force: bool) {
        let mut timers = self.lock();
        let Some(timer) = timers.get_mut(&channel_id) else {
            return;
        };
        timer.count = timer.count.saturating_sub(1);
        if timer.count > 0 && !force {
            debug!(count = timer.count, "Typing indicator still held");
            return;
        }

        if let Some(timer) = timers.remove(&channel_id) {
            timer.task.abort();
            timer.status.send_replace(TypingStatus::Stopped);
            info!("Stopped typing");
        }
    }

    /// Stop every running indicator.
    pub fn stop_all(&self) {
        for (_, timer) in self.lock().drain() {
            timer.task.abort();
            timer.status.send_replace(TypingStatus::Stopped);
        }
    }

    /// Whether an indicator runs in the channel.
    pub fn is_typing(&self, channel_id: ChannelId) -> bool {
        self.lock().contains_key(&channel_id)
    }

    /// Count of a running indicator, zero when idle.
    pub fn count(&self, channel_id: ChannelId) -> u32 {
        self.lock().get(&channel_id).map_or(0, |t| t.count)
    }
}

async fn keep_alive(
    rest: Arc<dyn RestClient>,
    timers: TimerTable,
    channel_id: ChannelId,
    generation: u64,
    interval: Duration,
) {
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    loop {
        ticker.tick().await;
        if let Err(e) = rest.trigger_typing(channel_id).await {
            error!(channel_id = %channel_id, error = %e, "Typing keep-alive failed");
            fail(&timers, channel_id, generation, e.to_string());
            return;
        }
    }
}

/// Evict the failed timer unless it has already been replaced.
fn fail(timers: &TimerTable, channel_id: ChannelId, generation: u64, reason: String) {
    let mut timers = timers.lock().unwrap_or_else(PoisonError::into_inner);
    if !timers
        .get(&channel_id)
        .is_some_and(|t| t.generation == generation)
    {
        return;
    }
    if let Some(timer) = timers.remove(&channel_id) {
        let error = TypingError::new(TypingErrorKind::KeepAliveFailed {
            channel_id: channel_id.get(),
            reason,
        });
        timer.status.send_replace(TypingStatus::Failed(error));
    }
}
