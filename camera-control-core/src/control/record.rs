use std::sync::Arc;

use crate::models::descriptors::{ControlKind, SliderDomain};
use crate::models::error::CameraControlError;
use crate::models::keys::{ControlKey, ServiceKey};
use crate::traits::control_backend::{ControlBackend, IndexPickerBackend, SliderBackend};
use crate::traits::platform::CameraPlatform;

/// Invoked with the slider's handle and its new value.
pub type SliderAction = Arc<dyn Fn(ControlKey, f32) + Send + Sync + 'static>;

/// Invoked with the picker's handle and the newly selected index.
pub type IndexPickerAction = Arc<dyn Fn(ControlKey, usize) + Send + Sync + 'static>;

/// A native slider plus its value domain and optional value-changed action.
pub struct SliderRecord<S: SliderBackend> {
    native: S,
    domain: SliderDomain,
    action: Option<SliderAction>,
}

impl<S: SliderBackend> SliderRecord<S> {
    pub fn new(native: S, domain: SliderDomain) -> Self {
        Self {
            native,
            domain,
            action: None,
        }
    }

    pub fn native(&self) -> &S {
        &self.native
    }

    pub fn domain(&self) -> &SliderDomain {
        &self.domain
    }

    pub fn value(&self) -> f32 {
        self.native.value()
    }

    /// Set the value, snapped into the slider's domain. Returns the value applied.
    pub fn set_value(&mut self, value: f32) -> Result<f32, CameraControlError> {
        if !value.is_finite() {
            return Err(CameraControlError::InvalidPayload(format!(
                "slider value must be finite, got {value}"
            )));
        }
        let applied = self.domain.constrain(value);
        self.native.set_value(applied);
        Ok(applied)
    }

    pub fn prominent_values(&self) -> Vec<f32> {
        self.native.prominent_values()
    }

    pub fn set_prominent_values(&mut self, values: Vec<f32>) -> Result<(), CameraControlError> {
        if values.iter().any(|v| !v.is_finite()) {
            return Err(CameraControlError::InvalidPayload(
                "prominent values must be finite".into(),
            ));
        }
        self.native.set_prominent_values(values);
        Ok(())
    }

    pub fn accessibility_identifier(&self) -> Option<String> {
        self.native.accessibility_identifier()
    }

    pub fn set_accessibility_identifier(&mut self, identifier: Option<String>) {
        self.native.set_accessibility_identifier(identifier);
    }

    pub fn localized_value_format(&self) -> Option<String> {
        self.native.localized_value_format()
    }

    pub fn set_localized_value_format(&mut self, format: Option<String>) {
        self.native.set_localized_value_format(format);
    }

    pub fn action(&self) -> Option<&SliderAction> {
        self.action.as_ref()
    }

    /// Replace the value-changed action, returning the previous one.
    pub fn set_action(&mut self, action: Option<SliderAction>) -> Option<SliderAction> {
        std::mem::replace(&mut self.action, action)
    }
}

/// A native index picker plus its optional index-changed action.
pub struct IndexPickerRecord<I: IndexPickerBackend> {
    native: I,
    action: Option<IndexPickerAction>,
}

impl<I: IndexPickerBackend> IndexPickerRecord<I> {
    pub fn new(native: I) -> Self {
        Self {
            native,
            action: None,
        }
    }

    pub fn native(&self) -> &I {
        &self.native
    }

    pub fn selected_index(&self) -> usize {
        self.native.selected_index()
    }

    pub fn set_selected_index(&mut self, index: usize) -> Result<(), CameraControlError> {
        let count = self.native.number_of_indexes();
        if index >= count {
            return Err(CameraControlError::InvalidPayload(format!(
                "index {index} out of range for {count} indexes"
            )));
        }
        self.native.set_selected_index(index);
        Ok(())
    }

    pub fn number_of_indexes(&self) -> usize {
        self.native.number_of_indexes()
    }

    pub fn localized_index_titles(&self) -> Vec<String> {
        self.native.localized_index_titles()
    }

    pub fn accessibility_identifier(&self) -> Option<String> {
        self.native.accessibility_identifier()
    }

    pub fn set_accessibility_identifier(&mut self, identifier: Option<String>) {
        self.native.set_accessibility_identifier(identifier);
    }

    pub fn action(&self) -> Option<&IndexPickerAction> {
        self.action.as_ref()
    }

    pub fn set_action(&mut self, action: Option<IndexPickerAction>) -> Option<IndexPickerAction> {
        std::mem::replace(&mut self.action, action)
    }
}

pub enum ControlBody<P: CameraPlatform> {
    Slider(SliderRecord<P::Slider>),
    IndexPicker(IndexPickerRecord<P::IndexPicker>),
}

/// Registry record for one capture control.
///
/// Tracks which service, if any, the control is attached to. A control is
/// attached to at most one service at a time.
pub struct ControlRecord<P: CameraPlatform> {
    key: ControlKey,
    body: ControlBody<P>,
    attached_to: Option<ServiceKey>,
}

impl<P: CameraPlatform> ControlRecord<P> {
    pub fn slider(key: ControlKey, native: P::Slider, domain: SliderDomain) -> Self {
        Self {
            key,
            body: ControlBody::Slider(SliderRecord::new(native, domain)),
            attached_to: None,
        }
    }

    pub fn index_picker(key: ControlKey, native: P::IndexPicker) -> Self {
        Self {
            key,
            body: ControlBody::IndexPicker(IndexPickerRecord::new(native)),
            attached_to: None,
        }
    }

    pub fn key(&self) -> ControlKey {
        self.key
    }

    pub fn kind(&self) -> ControlKind {
        match self.body {
            ControlBody::Slider(_) => ControlKind::Slider,
            ControlBody::IndexPicker(_) => ControlKind::IndexPicker,
        }
    }

    pub fn body(&self) -> &ControlBody<P> {
        &self.body
    }

    /// The service this control is attached to.
    pub fn attached_to(&self) -> Option<ServiceKey> {
        self.attached_to
    }

    pub(crate) fn set_attached_to(&mut self, service: Option<ServiceKey>) {
        self.attached_to = service;
    }

    pub fn is_enabled(&self) -> bool {
        match &self.body {
            ControlBody::Slider(slider) => slider.native.is_enabled(),
            ControlBody::IndexPicker(picker) => picker.native.is_enabled(),
        }
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        match &mut self.body {
            ControlBody::Slider(slider) => slider.native.set_enabled(enabled),
            ControlBody::IndexPicker(picker) => picker.native.set_enabled(enabled),
        }
    }

    pub fn accessibility_identifier(&self) -> Option<String> {
        match &self.body {
            ControlBody::Slider(slider) => slider.accessibility_identifier(),
            ControlBody::IndexPicker(picker) => picker.accessibility_identifier(),
        }
    }

    pub fn set_accessibility_identifier(&mut self, identifier: Option<String>) {
        match &mut self.body {
            ControlBody::Slider(slider) => slider.set_accessibility_identifier(identifier),
            ControlBody::IndexPicker(picker) => picker.set_accessibility_identifier(identifier),
        }
    }

    pub fn as_slider(&self) -> Result<&SliderRecord<P::Slider>, CameraControlError> {
        match &self.body {
            ControlBody::Slider(slider) => Ok(slider),
            ControlBody::IndexPicker(_) => Err(self.mismatch(ControlKind::Slider)),
        }
    }

    pub fn as_slider_mut(&mut self) -> Result<&mut SliderRecord<P::Slider>, CameraControlError> {
        let mismatch = self.mismatch(ControlKind::Slider);
        match &mut self.body {
            ControlBody::Slider(slider) => Ok(slider),
            ControlBody::IndexPicker(_) => Err(mismatch),
        }
    }

    pub fn as_index_picker(&self) -> Result<&IndexPickerRecord<P::IndexPicker>, CameraControlError> {
        match &self.body {
            ControlBody::IndexPicker(picker) => Ok(picker),
            ControlBody::Slider(_) => Err(self.mismatch(ControlKind::IndexPicker)),
        }
    }

    pub fn as_index_picker_mut(
        &mut self,
    ) -> Result<&mut IndexPickerRecord<P::IndexPicker>, CameraControlError> {
        let mismatch = self.mismatch(ControlKind::IndexPicker);
        match &mut self.body {
            ControlBody::IndexPicker(picker) => Ok(picker),
            ControlBody::Slider(_) => Err(mismatch),
        }
    }

    /// Drop retained actions and release the native control.
    pub(crate) fn release(&mut self) {
        match &mut self.body {
            ControlBody::Slider(slider) => {
                slider.action = None;
                slider.native.release();
            }
            ControlBody::IndexPicker(picker) => {
                picker.action = None;
                picker.native.release();
            }
        }
    }

    fn mismatch(&self, expected: ControlKind) -> CameraControlError {
        CameraControlError::TypeMismatch {
            key: self.key,
            expected,
            actual: self.kind(),
        }
    }
}
