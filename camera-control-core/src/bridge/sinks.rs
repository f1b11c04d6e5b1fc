//! Event sinks handed to native resources at creation.
//!
//! Each sink is bound to one record's handle and generation, so native code
//! never chooses the handle it reports for, and events from a destroyed
//! record cannot reach a later record that reuses its handle.

use super::queue::{EventQueue, NativeEvent};
use crate::models::events::{CaptureEventPhase, ControlsNotification, InteractionButton};
use crate::models::keys::{ControlKey, InteractionKey, ServiceKey};

/// Sink for a camera service's session notifications.
#[derive(Debug, Clone)]
pub struct ServiceEvents {
    key: ServiceKey,
    generation: u64,
    queue: EventQueue,
}

impl ServiceEvents {
    pub(crate) fn new(key: ServiceKey, generation: u64, queue: EventQueue) -> Self {
        Self {
            key,
            generation,
            queue,
        }
    }

    pub fn key(&self) -> ServiceKey {
        self.key
    }

    pub fn notify(&self, notification: ControlsNotification) {
        self.queue.post_stamped(
            NativeEvent::SessionControls {
                service: self.key,
                notification,
            },
            self.generation,
        );
    }
}

/// Sink for a capture control's value changes.
#[derive(Debug, Clone)]
pub struct ControlEvents {
    key: ControlKey,
    generation: u64,
    queue: EventQueue,
}

impl ControlEvents {
    pub(crate) fn new(key: ControlKey, generation: u64, queue: EventQueue) -> Self {
        Self {
            key,
            generation,
            queue,
        }
    }

    pub fn key(&self) -> ControlKey {
        self.key
    }

    pub fn value_changed(&self, value: f32) {
        self.queue.post_stamped(
            NativeEvent::SliderValueChanged {
                control: self.key,
                value,
            },
            self.generation,
        );
    }

    pub fn index_changed(&self, index: usize) {
        self.queue.post_stamped(
            NativeEvent::IndexPickerChanged {
                control: self.key,
                index,
            },
            self.generation,
        );
    }
}

/// Sink for hardware-button events of an event interaction.
#[derive(Debug, Clone)]
pub struct InteractionEvents {
    key: InteractionKey,
    generation: u64,
    queue: EventQueue,
}

impl InteractionEvents {
    pub(crate) fn new(key: InteractionKey, generation: u64, queue: EventQueue) -> Self {
        Self {
            key,
            generation,
            queue,
        }
    }

    pub fn key(&self) -> InteractionKey {
        self.key
    }

    /// Report a phase using the raw native encoding.
    pub fn raw_phase(&self, button: InteractionButton, phase: u64) {
        self.queue.post_stamped(
            NativeEvent::Interaction {
                interaction: self.key,
                button,
                phase,
            },
            self.generation,
        );
    }

    pub fn phase(&self, button: InteractionButton, phase: CaptureEventPhase) {
        self.raw_phase(button, phase.raw());
    }
}
