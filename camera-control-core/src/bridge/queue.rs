use std::collections::VecDeque;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::models::events::{ControlsNotification, InteractionButton};
use crate::models::keys::{ControlKey, HandleKey, InteractionKey, ResourceKind, ServiceKey};

/// A native-originated notification, tagged with the handle it concerns.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NativeEvent {
    SessionControls {
        service: ServiceKey,
        notification: ControlsNotification,
    },
    SliderValueChanged {
        control: ControlKey,
        value: f32,
    },
    IndexPickerChanged {
        control: ControlKey,
        index: usize,
    },
    /// `phase` is the raw native phase value, decoded on delivery.
    Interaction {
        interaction: InteractionKey,
        button: InteractionButton,
        phase: u64,
    },
}

impl NativeEvent {
    pub fn kind(&self) -> ResourceKind {
        match self {
            Self::SessionControls { .. } => ResourceKind::Service,
            Self::SliderValueChanged { .. } | Self::IndexPickerChanged { .. } => ResourceKind::Control,
            Self::Interaction { .. } => ResourceKind::Interaction,
        }
    }

    pub fn key(&self) -> u64 {
        match self {
            Self::SessionControls { service, .. } => service.to_u64(),
            Self::SliderValueChanged { control, .. } | Self::IndexPickerChanged { control, .. } => {
                control.to_u64()
            }
            Self::Interaction { interaction, .. } => interaction.to_u64(),
        }
    }
}

/// A queued event plus the generation of the record it was posted for.
///
/// Events posted through a bound sink carry the generation; raw events
/// posted with [`EventQueue::post`] carry `None` and are checked for
/// liveness only.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Envelope {
    pub event: NativeEvent,
    pub generation: Option<u64>,
}

/// Multi-producer queue carrying native events to the coordinating context.
///
/// Clones share one queue. Producers may live on any thread; only the
/// context drains it. The lock is held just long enough to push or to swap
/// the pending events out, never while handlers run.
#[derive(Debug, Clone, Default)]
pub struct EventQueue {
    pending: Arc<Mutex<VecDeque<Envelope>>>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a raw `(handle, payload)` event.
    pub fn post(&self, event: NativeEvent) {
        self.push(Envelope {
            event,
            generation: None,
        });
    }

    pub(crate) fn post_stamped(&self, event: NativeEvent, generation: u64) {
        self.push(Envelope {
            event,
            generation: Some(generation),
        });
    }

    pub fn len(&self) -> usize {
        self.pending.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.lock().is_empty()
    }

    /// Take every pending event, oldest first.
    pub(crate) fn drain(&self) -> VecDeque<Envelope> {
        std::mem::take(&mut *self.pending.lock())
    }

    fn push(&self, envelope: Envelope) {
        self.pending.lock().push_back(envelope);
    }
}
