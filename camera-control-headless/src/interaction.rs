use camera_control_core::{InteractionBackend, InteractionKey};

use crate::device::HeadlessDevice;

/// Headless hardware-button interaction. Existing on the device means
/// attached to the host view.
pub struct HeadlessInteraction {
    key: InteractionKey,
    device: HeadlessDevice,
}

impl HeadlessInteraction {
    pub(crate) fn new(key: InteractionKey, device: HeadlessDevice) -> Self {
        Self { key, device }
    }

    pub fn key(&self) -> InteractionKey {
        self.key
    }
}

impl InteractionBackend for HeadlessInteraction {
    fn is_enabled(&self) -> bool {
        self.device
            .lock()
            .interactions
            .get(&self.key)
            .is_some_and(|i| i.enabled)
    }

    fn set_enabled(&mut self, enabled: bool) {
        if let Some(entry) = self.device.lock().interactions.get_mut(&self.key) {
            entry.enabled = enabled;
        }
    }

    fn release(&mut self) {
        self.device.lock().interactions.remove(&self.key);
        log::debug!("Headless interaction {} detached from the host view.", self.key);
    }
}
