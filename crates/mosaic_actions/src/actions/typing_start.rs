use super::Actions;
use chrono::{DateTime, Utc};
use mosaic_core::{TypingEntry, TypingStartPayload};
use mosaic_interface::Notification;
use tracing::{debug, instrument, warn};

/// A remote user stops counting as typing this long after their last signal.
const TYPING_EXPIRY_MS: i64 = 10_000;

impl Actions {
    /// Track a remote user typing in a channel.
    ///
    /// Only a user not already typing is announced. Entries whose last signal
    /// is older than ten seconds, measured against this event, are dropped.
    #[instrument(skip(self, payload), fields(channel_id = %payload.channel_id, user_id = %payload.user_id))]
    pub fn typing_start(&mut self, payload: &TypingStartPayload) -> Option<TypingEntry> {
        let Some(at) = DateTime::<Utc>::from_timestamp(payload.timestamp, 0) else {
            warn!(timestamp = payload.timestamp, "Typing timestamp out of range");
            return None;
        };
        self.store.user(payload.user_id)?;

        let channel = self.store.channel_mut(payload.channel_id)?;
        let Some(typing) = channel.typing_mut() else {
            warn!(kind = %channel.kind(), "Typing in a channel without text");
            return None;
        };

        typing.retain(|_, entry| (at - *entry.last_timestamp()).num_milliseconds() <= TYPING_EXPIRY_MS);

        let (entry, started) = match typing.get_mut(&payload.user_id) {
            Some(entry) => {
                entry.refresh(at);
                (entry.clone(), false)
            }
            None => {
                let entry = TypingEntry::new(payload.user_id, at);
                typing.insert(payload.user_id, entry.clone());
                (entry, true)
            }
        };

        if started {
            self.emit(Notification::TypingStart {
                channel_id: payload.channel_id,
                user_id: payload.user_id,
                since: at,
            });
        } else {
            debug!("Typing refreshed");
        }
        Some(entry)
    }
}
