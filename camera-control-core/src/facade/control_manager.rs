use std::sync::Arc;

use log::{debug, info};

use super::{settle, succeeded};
use crate::bridge::sinks::ControlEvents;
use crate::context::CameraControlContext;
use crate::control::record::{ControlRecord, IndexPickerRecord, SliderRecord};
use crate::models::descriptors::{ControlKind, IndexPickerDescriptor, SliderDescriptor};
use crate::models::error::CameraControlError;
use crate::models::keys::{ControlKey, HandleKey, ResourceKind, ServiceKey};
use crate::models::log_target;
use crate::traits::platform::CameraPlatform;

const KIND: ResourceKind = ResourceKind::Control;

/// Capture control operations, borrowed from a [`CameraControlContext`].
///
/// Slider-only and index-picker-only operations applied to the other kind
/// fail with a type mismatch and return the getter's default.
pub struct ControlManager<'a, P: CameraPlatform> {
    ctx: &'a mut CameraControlContext<P>,
}

impl<'a, P: CameraPlatform> ControlManager<'a, P> {
    pub(crate) fn new(ctx: &'a mut CameraControlContext<P>) -> Self {
        Self { ctx }
    }

    pub fn create_slider_range(
        &mut self,
        localized_title: &str,
        symbol_name: &str,
        lower_bound: f32,
        upper_bound: f32,
    ) -> ControlKey {
        self.create_slider(&SliderDescriptor::range(
            localized_title,
            symbol_name,
            lower_bound,
            upper_bound,
        ))
    }

    pub fn create_slider_range_step(
        &mut self,
        localized_title: &str,
        symbol_name: &str,
        lower_bound: f32,
        upper_bound: f32,
        step: f32,
    ) -> ControlKey {
        self.create_slider(&SliderDescriptor::range_and_step(
            localized_title,
            symbol_name,
            lower_bound,
            upper_bound,
            step,
        ))
    }

    pub fn create_slider_values(&mut self, localized_title: &str, symbol_name: &str, values: Vec<f32>) -> ControlKey {
        self.create_slider(&SliderDescriptor::values(localized_title, symbol_name, values))
    }

    /// Create a slider from a full descriptor.
    /// Returns [`ControlKey::SENTINEL`] on failure.
    pub fn create_slider(&mut self, descriptor: &SliderDescriptor) -> ControlKey {
        if let Err(err) = descriptor.domain.validate() {
            return settle("create_slider", KIND, "(none)", Err(err), ControlKey::SENTINEL);
        }
        self.create_with("create_slider", ControlKind::Slider, |platform, key, events| {
            let native = platform.create_slider(descriptor, events)?;
            Ok(ControlRecord::slider(key, native, descriptor.domain.clone()))
        })
    }

    /// Returns [`ControlKey::SENTINEL`] on failure.
    pub fn create_index_picker(&mut self, descriptor: &IndexPickerDescriptor) -> ControlKey {
        if let Err(err) = descriptor.validate() {
            return settle("create_index_picker", KIND, "(none)", Err(err), ControlKey::SENTINEL);
        }
        self.create_with("create_index_picker", ControlKind::IndexPicker, |platform, key, events| {
            let native = platform.create_index_picker(descriptor, events)?;
            Ok(ControlRecord::index_picker(key, native))
        })
    }

    /// Detach the control from its service, if any, and release it.
    /// Returns whether it existed.
    pub fn destroy(&mut self, key: ControlKey) -> bool {
        let ctx = &mut *self.ctx;
        let Some(mut record) = ctx.controls.destroy(key) else {
            return succeeded("destroy", KIND, key, Err(CameraControlError::not_found(KIND, key)));
        };
        if let Some(service) = record.attached_to() {
            if let Some(controller) = ctx.services.try_get_mut(service) {
                controller.forget_control(key);
                debug!(
                    target: log_target::CONTROL,
                    "Detached capture control with key {key} from camera service with key {service} before destroying it."
                );
            }
        }
        record.release();
        info!(target: log_target::CONTROL, "Successfully destroyed capture control with key {key}.");
        true
    }

    pub fn contains(&self, key: ControlKey) -> bool {
        self.ctx.controls.contains(key)
    }

    pub fn len(&self) -> usize {
        self.ctx.controls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ctx.controls.is_empty()
    }

    pub fn kind(&self, key: ControlKey) -> Option<ControlKind> {
        self.read("kind", key, |record| Ok(Some(record.kind())), None)
    }

    /// The service the control is attached to, if any.
    pub fn attached_service(&self, key: ControlKey) -> Option<ServiceKey> {
        self.read("attached_service", key, |record| Ok(record.attached_to()), None)
    }

    pub fn is_enabled(&self, key: ControlKey) -> bool {
        self.read("is_enabled", key, |record| Ok(record.is_enabled()), false)
    }

    pub fn set_enabled(&mut self, key: ControlKey, enabled: bool) -> bool {
        self.write("set_enabled", key, |record| {
            record.set_enabled(enabled);
            Ok(())
        })
    }

    pub fn accessibility_identifier(&self, key: ControlKey) -> Option<String> {
        self.read("accessibility_identifier", key, |record| Ok(record.accessibility_identifier()), None)
    }

    pub fn set_accessibility_identifier(&mut self, key: ControlKey, identifier: Option<&str>) -> bool {
        self.write("set_accessibility_identifier", key, |record| {
            record.set_accessibility_identifier(identifier.map(str::to_owned));
            Ok(())
        })
    }

    // Slider

    pub fn value(&self, key: ControlKey) -> f32 {
        self.read_slider("value", key, SliderRecord::value, 0.0)
    }

    /// Set the slider's value, snapped into its domain.
    pub fn set_value(&mut self, key: ControlKey, value: f32) -> bool {
        self.write("set_value", key, |record| {
            let applied = record.as_slider_mut()?.set_value(value)?;
            if applied != value {
                debug!(
                    target: log_target::CONTROL,
                    "Slider with key {key}: requested {value}, applied {applied}."
                );
            }
            Ok(())
        })
    }

    pub fn prominent_values(&self, key: ControlKey) -> Vec<f32> {
        self.read_slider("prominent_values", key, SliderRecord::prominent_values, Vec::new())
    }

    pub fn set_prominent_values(&mut self, key: ControlKey, values: &[f32]) -> bool {
        self.write("set_prominent_values", key, |record| {
            record.as_slider_mut()?.set_prominent_values(values.to_vec())
        })
    }

    pub fn localized_value_format(&self, key: ControlKey) -> Option<String> {
        self.read_slider("localized_value_format", key, SliderRecord::localized_value_format, None)
    }

    pub fn set_localized_value_format(&mut self, key: ControlKey, format: Option<&str>) -> bool {
        self.write("set_localized_value_format", key, |record| {
            record
                .as_slider_mut()?
                .set_localized_value_format(format.map(str::to_owned));
            Ok(())
        })
    }

    /// Register the slider's value-changed action, replacing any previous one.
    pub fn set_slider_action(
        &mut self,
        key: ControlKey,
        action: impl Fn(ControlKey, f32) + Send + Sync + 'static,
    ) -> bool {
        self.write("set_slider_action", key, |record| {
            record.as_slider_mut()?.set_action(Some(Arc::new(action)));
            Ok(())
        })
    }

    pub fn clear_slider_action(&mut self, key: ControlKey) -> bool {
        self.write("clear_slider_action", key, |record| {
            record.as_slider_mut()?.set_action(None);
            Ok(())
        })
    }

    // Index picker

    pub fn selected_index(&self, key: ControlKey) -> usize {
        self.read_picker("selected_index", key, IndexPickerRecord::selected_index, 0)
    }

    pub fn set_selected_index(&mut self, key: ControlKey, index: usize) -> bool {
        self.write("set_selected_index", key, |record| {
            record.as_index_picker_mut()?.set_selected_index(index)
        })
    }

    pub fn number_of_indexes(&self, key: ControlKey) -> usize {
        self.read_picker("number_of_indexes", key, IndexPickerRecord::number_of_indexes, 0)
    }

    pub fn localized_index_titles(&self, key: ControlKey) -> Vec<String> {
        self.read_picker(
            "localized_index_titles",
            key,
            IndexPickerRecord::localized_index_titles,
            Vec::new(),
        )
    }

    pub fn set_index_picker_action(
        &mut self,
        key: ControlKey,
        action: impl Fn(ControlKey, usize) + Send + Sync + 'static,
    ) -> bool {
        self.write("set_index_picker_action", key, |record| {
            record.as_index_picker_mut()?.set_action(Some(Arc::new(action)));
            Ok(())
        })
    }

    pub fn clear_index_picker_action(&mut self, key: ControlKey) -> bool {
        self.write("clear_index_picker_action", key, |record| {
            record.as_index_picker_mut()?.set_action(None);
            Ok(())
        })
    }

    fn create_with(
        &mut self,
        operation: &str,
        kind: ControlKind,
        build: impl FnOnce(&mut P, ControlKey, ControlEvents) -> Result<ControlRecord<P>, CameraControlError>,
    ) -> ControlKey {
        let CameraControlContext {
            platform,
            controls,
            bridge,
            ..
        } = &mut *self.ctx;
        let queue = bridge.queue().clone();

        let result = controls.create(|stamp| {
            let events = ControlEvents::new(stamp.key, stamp.generation, queue);
            build(platform, stamp.key, events)
        });
        match result {
            Ok(key) => {
                info!(target: log_target::CONTROL, "Successfully created {kind} with key {key}.");
                key
            }
            Err(err) => settle(operation, KIND, "(none)", Err(err), ControlKey::SENTINEL),
        }
    }

    fn read<T>(
        &self,
        operation: &str,
        key: ControlKey,
        f: impl FnOnce(&ControlRecord<P>) -> Result<T, CameraControlError>,
        fallback: T,
    ) -> T {
        settle(operation, KIND, key, self.ctx.controls.get(key).and_then(f), fallback)
    }

    fn read_slider<T>(
        &self,
        operation: &str,
        key: ControlKey,
        f: impl FnOnce(&SliderRecord<P::Slider>) -> T,
        fallback: T,
    ) -> T {
        self.read(operation, key, |record| record.as_slider().map(f), fallback)
    }

    fn read_picker<T>(
        &self,
        operation: &str,
        key: ControlKey,
        f: impl FnOnce(&IndexPickerRecord<P::IndexPicker>) -> T,
        fallback: T,
    ) -> T {
        self.read(operation, key, |record| record.as_index_picker().map(f), fallback)
    }

    fn write(
        &mut self,
        operation: &str,
        key: ControlKey,
        f: impl FnOnce(&mut ControlRecord<P>) -> Result<(), CameraControlError>,
    ) -> bool {
        let result = self.ctx.controls.get_mut(key).and_then(f);
        succeeded(operation, KIND, key, result)
    }
}
