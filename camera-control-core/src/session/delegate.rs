use std::fmt;
use std::sync::Arc;

use crate::models::events::ControlsNotification;
use crate::models::keys::ServiceKey;

/// Invoked with the handle of the service whose session posted the notification.
pub type ControlsCallback = Arc<dyn Fn(ServiceKey) + Send + Sync + 'static>;

/// Receiver for a session's control-overlay notifications.
///
/// Four independent callbacks, one per [`ControlsNotification`]. A service
/// holds at most one delegate; setting a new one replaces the old outright.
#[derive(Clone)]
pub struct SessionControlsDelegate {
    did_become_active: ControlsCallback,
    did_become_inactive: ControlsCallback,
    will_enter_fullscreen_appearance: ControlsCallback,
    will_exit_fullscreen_appearance: ControlsCallback,
}

impl SessionControlsDelegate {
    pub fn new(
        did_become_active: ControlsCallback,
        did_become_inactive: ControlsCallback,
        will_enter_fullscreen_appearance: ControlsCallback,
        will_exit_fullscreen_appearance: ControlsCallback,
    ) -> Self {
        Self {
            did_become_active,
            did_become_inactive,
            will_enter_fullscreen_appearance,
            will_exit_fullscreen_appearance,
        }
    }

    /// A delegate that sends every notification to one callback.
    pub fn uniform(callback: Arc<dyn Fn(ServiceKey, ControlsNotification) + Send + Sync + 'static>) -> Self {
        let forward = |notification: ControlsNotification| -> ControlsCallback {
            let callback = Arc::clone(&callback);
            Arc::new(move |key| callback(key, notification))
        };
        Self::new(
            forward(ControlsNotification::DidBecomeActive),
            forward(ControlsNotification::DidBecomeInactive),
            forward(ControlsNotification::WillEnterFullscreenAppearance),
            forward(ControlsNotification::WillExitFullscreenAppearance),
        )
    }

    pub fn callback_for(&self, notification: ControlsNotification) -> &ControlsCallback {
        match notification {
            ControlsNotification::DidBecomeActive => &self.did_become_active,
            ControlsNotification::DidBecomeInactive => &self.did_become_inactive,
            ControlsNotification::WillEnterFullscreenAppearance => &self.will_enter_fullscreen_appearance,
            ControlsNotification::WillExitFullscreenAppearance => &self.will_exit_fullscreen_appearance,
        }
    }
}

impl fmt::Debug for SessionControlsDelegate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionControlsDelegate").finish_non_exhaustive()
    }
}
