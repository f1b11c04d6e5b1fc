use camera_control_core::{ControlBackend, ControlKey, IndexPickerBackend, SliderBackend};

use crate::device::{DeviceState, HeadlessDevice, IndexPickerEntry, SliderEntry};

/// Headless slider. Its state lives in the shared device so the simulator
/// can move it like a user would.
pub struct HeadlessSlider {
    key: ControlKey,
    device: HeadlessDevice,
}

impl HeadlessSlider {
    pub(crate) fn new(key: ControlKey, device: HeadlessDevice) -> Self {
        Self { key, device }
    }

    fn read<T: Default>(&self, f: impl FnOnce(&SliderEntry) -> T) -> T {
        self.device.lock().sliders.get(&self.key).map(f).unwrap_or_default()
    }

    fn write(&mut self, f: impl FnOnce(&mut SliderEntry)) {
        if let Some(entry) = self.device.lock().sliders.get_mut(&self.key) {
            f(entry);
        }
    }
}

impl ControlBackend for HeadlessSlider {
    fn is_enabled(&self) -> bool {
        self.read(|s| s.enabled)
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.write(|s| s.enabled = enabled);
    }

    fn release(&mut self) {
        release(&mut self.device.lock(), self.key);
    }
}

impl SliderBackend for HeadlessSlider {
    fn value(&self) -> f32 {
        self.read(|s| s.value)
    }

    fn set_value(&mut self, value: f32) {
        self.write(|s| s.value = value);
    }

    fn prominent_values(&self) -> Vec<f32> {
        self.read(|s| s.prominent_values.clone())
    }

    fn set_prominent_values(&mut self, values: Vec<f32>) {
        self.write(|s| s.prominent_values = values);
    }

    fn accessibility_identifier(&self) -> Option<String> {
        self.read(|s| s.accessibility_identifier.clone())
    }

    fn set_accessibility_identifier(&mut self, identifier: Option<String>) {
        self.write(|s| s.accessibility_identifier = identifier);
    }

    fn localized_value_format(&self) -> Option<String> {
        self.read(|s| s.localized_value_format.clone())
    }

    fn set_localized_value_format(&mut self, format: Option<String>) {
        self.write(|s| s.localized_value_format = format);
    }
}

/// Headless index picker.
pub struct HeadlessIndexPicker {
    key: ControlKey,
    device: HeadlessDevice,
}

impl HeadlessIndexPicker {
    pub(crate) fn new(key: ControlKey, device: HeadlessDevice) -> Self {
        Self { key, device }
    }

    fn read<T: Default>(&self, f: impl FnOnce(&IndexPickerEntry) -> T) -> T {
        self.device
            .lock()
            .index_pickers
            .get(&self.key)
            .map(f)
            .unwrap_or_default()
    }

    fn write(&mut self, f: impl FnOnce(&mut IndexPickerEntry)) {
        if let Some(entry) = self.device.lock().index_pickers.get_mut(&self.key) {
            f(entry);
        }
    }
}

impl ControlBackend for HeadlessIndexPicker {
    fn is_enabled(&self) -> bool {
        self.read(|p| p.enabled)
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.write(|p| p.enabled = enabled);
    }

    fn release(&mut self) {
        release(&mut self.device.lock(), self.key);
    }
}

impl IndexPickerBackend for HeadlessIndexPicker {
    fn selected_index(&self) -> usize {
        self.read(|p| p.selected)
    }

    fn set_selected_index(&mut self, index: usize) {
        self.write(|p| p.selected = index);
    }

    fn number_of_indexes(&self) -> usize {
        self.read(|p| p.titles.len())
    }

    fn localized_index_titles(&self) -> Vec<String> {
        self.read(|p| p.titles.clone())
    }

    fn accessibility_identifier(&self) -> Option<String> {
        self.read(|p| p.accessibility_identifier.clone())
    }

    fn set_accessibility_identifier(&mut self, identifier: Option<String>) {
        self.write(|p| p.accessibility_identifier = identifier);
    }
}

/// Forget a control and pull it out of any session still holding it.
fn release(state: &mut DeviceState, key: ControlKey) {
    state.sliders.remove(&key);
    state.index_pickers.remove(&key);
    for session in state.sessions.values_mut() {
        session.controls.retain(|&c| c != key);
    }
    log::debug!("Headless capture control {key} released.");
}
