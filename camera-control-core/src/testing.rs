//! In-memory platform for unit tests.

use std::collections::{BTreeMap, BTreeSet};

use crate::bridge::sinks::{ControlEvents, InteractionEvents, ServiceEvents};
use crate::models::descriptors::{ControlKind, IndexPickerDescriptor, SliderDescriptor};
use crate::models::error::CameraControlError;
use crate::models::events::InteractionRouting;
use crate::models::keys::{ControlKey, InteractionKey, ServiceKey};
use crate::traits::control_backend::{ControlBackend, IndexPickerBackend, SliderBackend};
use crate::traits::interaction_backend::InteractionBackend;
use crate::traits::platform::CameraPlatform;
use crate::traits::session_backend::SessionBackend;

#[derive(Default)]
pub struct FakeSession {
    pub running: bool,
    pub supports_controls: bool,
    pub max_controls: usize,
    pub rejected: BTreeSet<ControlKey>,
    pub native_controls: Vec<ControlKey>,
    pub open_brackets: usize,
    pub commits: usize,
    pub released: bool,
}

impl SessionBackend for FakeSession {
    fn is_running(&self) -> bool {
        self.running
    }

    fn start_running(&mut self) -> Result<(), CameraControlError> {
        self.running = true;
        Ok(())
    }

    fn stop_running(&mut self) {
        self.running = false;
    }

    fn supports_controls(&self) -> bool {
        self.supports_controls
    }

    fn max_controls_count(&self) -> usize {
        self.max_controls
    }

    fn begin_configuration(&mut self) {
        self.open_brackets += 1;
    }

    fn commit_configuration(&mut self) {
        self.open_brackets -= 1;
        self.commits += 1;
    }

    fn can_add_control(&self, control: ControlKey, _kind: ControlKind) -> bool {
        !self.rejected.contains(&control)
    }

    fn add_control(&mut self, control: ControlKey) {
        assert!(self.open_brackets > 0, "add_control outside a configuration bracket");
        self.native_controls.push(control);
    }

    fn remove_control(&mut self, control: ControlKey) {
        assert!(self.open_brackets > 0, "remove_control outside a configuration bracket");
        self.native_controls.retain(|&c| c != control);
    }

    fn control_count(&self) -> usize {
        self.native_controls.len()
    }

    fn release(&mut self) {
        self.released = true;
    }
}

#[derive(Default)]
pub struct FakeSlider {
    pub enabled: bool,
    pub value: f32,
    pub prominent: Vec<f32>,
    pub identifier: Option<String>,
    pub format: Option<String>,
}

impl ControlBackend for FakeSlider {
    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }
}

impl SliderBackend for FakeSlider {
    fn value(&self) -> f32 {
        self.value
    }

    fn set_value(&mut self, value: f32) {
        self.value = value;
    }

    fn prominent_values(&self) -> Vec<f32> {
        self.prominent.clone()
    }

    fn set_prominent_values(&mut self, values: Vec<f32>) {
        self.prominent = values;
    }

    fn accessibility_identifier(&self) -> Option<String> {
        self.identifier.clone()
    }

    fn set_accessibility_identifier(&mut self, identifier: Option<String>) {
        self.identifier = identifier;
    }

    fn localized_value_format(&self) -> Option<String> {
        self.format.clone()
    }

    fn set_localized_value_format(&mut self, format: Option<String>) {
        self.format = format;
    }
}

#[derive(Default)]
pub struct FakePicker {
    pub enabled: bool,
    pub selected: usize,
    pub titles: Vec<String>,
    pub identifier: Option<String>,
}

impl ControlBackend for FakePicker {
    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }
}

impl IndexPickerBackend for FakePicker {
    fn selected_index(&self) -> usize {
        self.selected
    }

    fn set_selected_index(&mut self, index: usize) {
        self.selected = index;
    }

    fn number_of_indexes(&self) -> usize {
        self.titles.len()
    }

    fn localized_index_titles(&self) -> Vec<String> {
        self.titles.clone()
    }

    fn accessibility_identifier(&self) -> Option<String> {
        self.identifier.clone()
    }

    fn set_accessibility_identifier(&mut self, identifier: Option<String>) {
        self.identifier = identifier;
    }
}

#[derive(Default)]
pub struct FakeInteraction {
    pub enabled: bool,
    pub released: bool,
}

impl InteractionBackend for FakeInteraction {
    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    fn release(&mut self) {
        self.released = true;
    }
}

/// Hands out fake natives and keeps each one's event sink so tests can
/// play the native side.
pub struct FakePlatform {
    pub supports_controls: bool,
    pub max_controls: usize,
    pub fail_creates: bool,
    pub service_sinks: BTreeMap<ServiceKey, ServiceEvents>,
    pub control_sinks: BTreeMap<ControlKey, ControlEvents>,
    pub interaction_sinks: BTreeMap<InteractionKey, InteractionEvents>,
}

impl Default for FakePlatform {
    fn default() -> Self {
        Self {
            supports_controls: true,
            max_controls: 4,
            fail_creates: false,
            service_sinks: BTreeMap::new(),
            control_sinks: BTreeMap::new(),
            interaction_sinks: BTreeMap::new(),
        }
    }
}

impl FakePlatform {
    fn check(&self) -> Result<(), CameraControlError> {
        if self.fail_creates {
            return Err(CameraControlError::DeviceNotAvailable);
        }
        Ok(())
    }
}

impl CameraPlatform for FakePlatform {
    type Session = FakeSession;
    type Slider = FakeSlider;
    type IndexPicker = FakePicker;
    type Interaction = FakeInteraction;

    fn create_session(&mut self, events: ServiceEvents) -> Result<FakeSession, CameraControlError> {
        self.check()?;
        self.service_sinks.insert(events.key(), events);
        Ok(FakeSession {
            supports_controls: self.supports_controls,
            max_controls: self.max_controls,
            ..FakeSession::default()
        })
    }

    fn create_slider(
        &mut self,
        descriptor: &SliderDescriptor,
        events: ControlEvents,
    ) -> Result<FakeSlider, CameraControlError> {
        self.check()?;
        self.control_sinks.insert(events.key(), events);
        Ok(FakeSlider {
            enabled: true,
            value: descriptor.domain.initial_value(),
            identifier: descriptor.accessibility_identifier.clone(),
            format: descriptor.localized_value_format.clone(),
            ..FakeSlider::default()
        })
    }

    fn create_index_picker(
        &mut self,
        descriptor: &IndexPickerDescriptor,
        events: ControlEvents,
    ) -> Result<FakePicker, CameraControlError> {
        self.check()?;
        self.control_sinks.insert(events.key(), events);
        Ok(FakePicker {
            enabled: true,
            titles: descriptor.localized_index_titles.clone(),
            identifier: descriptor.accessibility_identifier.clone(),
            ..FakePicker::default()
        })
    }

    fn create_interaction(
        &mut self,
        _routing: InteractionRouting,
        events: InteractionEvents,
    ) -> Result<FakeInteraction, CameraControlError> {
        self.check()?;
        self.interaction_sinks.insert(events.key(), events);
        Ok(FakeInteraction {
            enabled: true,
            released: false,
        })
    }
}
