use camera_control_core::{
    CameraControlError, CameraPlatform, ControlEvents, IndexPickerDescriptor, InteractionEvents,
    InteractionRouting, ServiceEvents, SliderDescriptor,
};

use crate::config::HeadlessConfig;
use crate::controls::{HeadlessIndexPicker, HeadlessSlider};
use crate::device::{HeadlessDevice, IndexPickerEntry, InteractionEntry, SessionEntry, SliderEntry};
use crate::interaction::HeadlessInteraction;
use crate::session::HeadlessSession;
use crate::simulator::HardwareSimulator;

/// In-memory [`CameraPlatform`].
///
/// Every native object it creates registers itself on a shared
/// [`HeadlessDevice`] together with its event sink, so a
/// [`HardwareSimulator`] can later act on it from any thread.
pub struct HeadlessPlatform {
    config: HeadlessConfig,
    device: HeadlessDevice,
}

impl HeadlessPlatform {
    pub fn new(config: HeadlessConfig) -> Result<Self, CameraControlError> {
        config.validate().map_err(CameraControlError::ConfigurationFailed)?;
        let device = HeadlessDevice::new(config.device_available);
        Ok(Self { config, device })
    }

    pub fn config(&self) -> &HeadlessConfig {
        &self.config
    }

    pub fn device(&self) -> &HeadlessDevice {
        &self.device
    }

    /// A simulator driving this platform's device.
    pub fn simulator(&self) -> HardwareSimulator {
        HardwareSimulator::new(self.device.clone())
    }
}

impl Default for HeadlessPlatform {
    fn default() -> Self {
        Self {
            config: HeadlessConfig::default(),
            device: HeadlessDevice::new(true),
        }
    }
}

impl CameraPlatform for HeadlessPlatform {
    type Session = HeadlessSession;
    type Slider = HeadlessSlider;
    type IndexPicker = HeadlessIndexPicker;
    type Interaction = HeadlessInteraction;

    fn create_session(&mut self, events: ServiceEvents) -> Result<HeadlessSession, CameraControlError> {
        let key = events.key();
        let mut state = self.device.lock();
        if !state.available {
            return Err(CameraControlError::DeviceNotAvailable);
        }
        state.sessions.insert(
            key,
            SessionEntry {
                events,
                running: false,
                controls: Vec::new(),
                overlay_active: false,
            },
        );
        drop(state);

        log::debug!("Headless session created for camera service {key}.");
        Ok(HeadlessSession::new(
            key,
            self.device.clone(),
            self.config.supports_controls,
            self.config.max_controls_count,
        ))
    }

    fn create_slider(
        &mut self,
        descriptor: &SliderDescriptor,
        events: ControlEvents,
    ) -> Result<HeadlessSlider, CameraControlError> {
        descriptor.domain.validate()?;
        let key = events.key();
        self.device.lock().sliders.insert(
            key,
            SliderEntry {
                events,
                enabled: true,
                domain: descriptor.domain.clone(),
                value: descriptor.domain.initial_value(),
                prominent_values: Vec::new(),
                accessibility_identifier: descriptor.accessibility_identifier.clone(),
                localized_value_format: descriptor.localized_value_format.clone(),
            },
        );
        Ok(HeadlessSlider::new(key, self.device.clone()))
    }

    fn create_index_picker(
        &mut self,
        descriptor: &IndexPickerDescriptor,
        events: ControlEvents,
    ) -> Result<HeadlessIndexPicker, CameraControlError> {
        descriptor.validate()?;
        let key = events.key();
        self.device.lock().index_pickers.insert(
            key,
            IndexPickerEntry {
                events,
                enabled: true,
                titles: descriptor.localized_index_titles.clone(),
                selected: 0,
                accessibility_identifier: descriptor.accessibility_identifier.clone(),
            },
        );
        Ok(HeadlessIndexPicker::new(key, self.device.clone()))
    }

    fn create_interaction(
        &mut self,
        routing: InteractionRouting,
        events: InteractionEvents,
    ) -> Result<HeadlessInteraction, CameraControlError> {
        let key = events.key();
        self.device
            .lock()
            .interactions
            .insert(key, InteractionEntry { events, enabled: true });
        log::debug!("Headless interaction {key} ({routing:?}) attached to the host view.");
        Ok(HeadlessInteraction::new(key, self.device.clone()))
    }
}
