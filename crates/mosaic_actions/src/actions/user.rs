use super::Actions;
use mosaic_core::{User, UserPayload};
use mosaic_interface::Notification;
use tracing::{debug, instrument};

impl Actions {
    /// Patch a cached user and announce it if anything changed.
    ///
    /// Returns `(old, new)` only when the patch changed the user; `old` is a
    /// detached snapshot.
    #[instrument(skip(self, payload), fields(user_id = %payload.id))]
    pub fn user_update(&mut self, payload: &UserPayload) -> Option<(User, User)> {
        let user = self.store.user_mut(payload.id)?;
        let old = user.clone();
        user.patch(payload);
        if *user == old {
            debug!("User unchanged");
            return None;
        }

        let new = user.clone();
        self.emit(Notification::UserUpdate {
            old: old.clone(),
            new: new.clone(),
        });
        Some((old, new))
    }
}
