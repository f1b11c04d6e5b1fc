use camera_control_core::models::descriptors::ControlKind;
use camera_control_core::{CameraControlError, ControlKey, ServiceKey, SessionBackend};

use crate::device::HeadlessDevice;

/// Headless capture session.
///
/// Membership changes made inside a configuration bracket are staged and
/// applied to the device in one step on commit, the way a real session
/// applies its configuration atomically.
pub struct HeadlessSession {
    key: ServiceKey,
    device: HeadlessDevice,
    supports_controls: bool,
    max_controls_count: usize,
    configuration_depth: usize,
    staged: Option<Vec<ControlKey>>,
}

impl HeadlessSession {
    pub(crate) fn new(
        key: ServiceKey,
        device: HeadlessDevice,
        supports_controls: bool,
        max_controls_count: usize,
    ) -> Self {
        Self {
            key,
            device,
            supports_controls,
            max_controls_count,
            configuration_depth: 0,
            staged: None,
        }
    }

    pub fn key(&self) -> ServiceKey {
        self.key
    }

    pub fn is_configuring(&self) -> bool {
        self.configuration_depth > 0
    }

    fn committed_controls(&self) -> Vec<ControlKey> {
        self.device.session_controls(self.key)
    }

    /// Apply `change` to the staged list, or directly to the device outside a bracket.
    fn edit_controls(&mut self, change: impl FnOnce(&mut Vec<ControlKey>)) {
        if self.configuration_depth > 0 {
            let committed = self.committed_controls();
            change(self.staged.get_or_insert(committed));
            return;
        }
        log::warn!(
            "Session for camera service {} changed its controls outside a configuration bracket.",
            self.key
        );
        if let Some(session) = self.device.lock().sessions.get_mut(&self.key) {
            change(&mut session.controls);
        }
    }
}

impl SessionBackend for HeadlessSession {
    fn is_running(&self) -> bool {
        self.device
            .lock()
            .sessions
            .get(&self.key)
            .is_some_and(|s| s.running)
    }

    fn start_running(&mut self) -> Result<(), CameraControlError> {
        let mut state = self.device.lock();
        if !state.available {
            return Err(CameraControlError::DeviceNotAvailable);
        }
        let session = state
            .sessions
            .get_mut(&self.key)
            .ok_or(CameraControlError::DeviceNotAvailable)?;
        session.running = true;
        log::debug!("Headless session for camera service {} running.", self.key);
        Ok(())
    }

    fn stop_running(&mut self) {
        if let Some(session) = self.device.lock().sessions.get_mut(&self.key) {
            session.running = false;
            session.overlay_active = false;
        }
    }

    fn supports_controls(&self) -> bool {
        self.supports_controls
    }

    fn max_controls_count(&self) -> usize {
        self.max_controls_count
    }

    fn begin_configuration(&mut self) {
        self.configuration_depth += 1;
    }

    fn commit_configuration(&mut self) {
        if self.configuration_depth == 0 {
            log::warn!(
                "commit_configuration without begin_configuration on camera service {}.",
                self.key
            );
            return;
        }
        self.configuration_depth -= 1;
        if self.configuration_depth > 0 {
            return;
        }
        if let Some(staged) = self.staged.take() {
            if let Some(session) = self.device.lock().sessions.get_mut(&self.key) {
                session.controls = staged;
            }
        }
    }

    fn can_add_control(&self, control: ControlKey, kind: ControlKind) -> bool {
        if !self.supports_controls {
            return false;
        }
        let state = self.device.lock();
        let exists = match kind {
            ControlKind::Slider => state.sliders.contains_key(&control),
            ControlKind::IndexPicker => state.index_pickers.contains_key(&control),
        };
        let count = match &self.staged {
            Some(staged) => staged.len(),
            None => state.sessions.get(&self.key).map_or(0, |s| s.controls.len()),
        };
        exists && count < self.max_controls_count
    }

    fn add_control(&mut self, control: ControlKey) {
        self.edit_controls(|controls| {
            if !controls.contains(&control) {
                controls.push(control);
            }
        });
    }

    fn remove_control(&mut self, control: ControlKey) {
        self.edit_controls(|controls| controls.retain(|&c| c != control));
    }

    fn control_count(&self) -> usize {
        match &self.staged {
            Some(staged) => staged.len(),
            None => self.committed_controls().len(),
        }
    }

    fn release(&mut self) {
        self.device.lock().sessions.remove(&self.key);
        log::debug!("Headless session for camera service {} released.", self.key);
    }
}
