use log::{debug, trace, warn};
use serde::Serialize;

use super::queue::{Envelope, EventQueue, NativeEvent};
use crate::control::record::ControlBody;
use crate::control::ControlTable;
use crate::interaction::InteractionTable;
use crate::models::events::CaptureEventPhase;
use crate::models::keys::HandleKey;
use crate::models::log_target;
use crate::registry::resource_registry::ResourceRegistry;
use crate::session::ServiceTable;
use crate::traits::platform::CameraPlatform;

/// Outcome of delivering a single native event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// A registered handler ran.
    Delivered,
    /// The handle is dead, or was reused by a newer record.
    Stale,
    /// The record is live but has no handler for this event.
    Unhandled,
    /// The payload could not be decoded.
    Invalid,
}

/// Counts from one [`CallbackBridge::dispatch`] pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DispatchSummary {
    pub delivered: usize,
    pub dropped_stale: usize,
    pub dropped_unhandled: usize,
    pub dropped_invalid: usize,
}

impl DispatchSummary {
    pub fn total(&self) -> usize {
        self.delivered + self.dropped_stale + self.dropped_unhandled + self.dropped_invalid
    }

    fn record(&mut self, delivery: Delivery) {
        match delivery {
            Delivery::Delivered => self.delivered += 1,
            Delivery::Stale => self.dropped_stale += 1,
            Delivery::Unhandled => self.dropped_unhandled += 1,
            Delivery::Invalid => self.dropped_invalid += 1,
        }
    }
}

/// Routes queued native events to the handlers stored in live records.
///
/// Every event is checked against the registry before a handler is looked
/// up: an event for a handle that is no longer live, or whose generation
/// no longer matches the live record, is dropped without side effects.
#[derive(Debug, Clone, Default)]
pub struct CallbackBridge {
    queue: EventQueue,
}

impl CallbackBridge {
    pub fn new(queue: EventQueue) -> Self {
        Self { queue }
    }

    pub fn queue(&self) -> &EventQueue {
        &self.queue
    }

    /// Deliver every event queued so far, in the order it was posted.
    ///
    /// Events posted by handlers while this runs are left for the next pass.
    pub fn dispatch<P: CameraPlatform>(
        &self,
        services: &ServiceTable<P>,
        controls: &ControlTable<P>,
        interactions: &InteractionTable<P::Interaction>,
    ) -> DispatchSummary {
        let mut summary = DispatchSummary::default();
        for envelope in self.queue.drain() {
            let delivery = deliver(&envelope, services, controls, interactions);
            if delivery != Delivery::Delivered {
                debug!(
                    target: log_target::BRIDGE,
                    "Dropped {:?} for {} {}: {:?}.",
                    envelope.event,
                    envelope.event.kind(),
                    envelope.event.key(),
                    delivery
                );
            }
            summary.record(delivery);
        }
        if summary.total() > 0 {
            trace!(target: log_target::BRIDGE, "Dispatch pass finished: {summary:?}");
        }
        summary
    }
}

fn deliver<P: CameraPlatform>(
    envelope: &Envelope,
    services: &ServiceTable<P>,
    controls: &ControlTable<P>,
    interactions: &InteractionTable<P::Interaction>,
) -> Delivery {
    match envelope.event {
        NativeEvent::SessionControls {
            service,
            notification,
        } => {
            let Some(controller) = live(services, service, envelope.generation) else {
                return Delivery::Stale;
            };
            let Some(delegate) = controller.delegate() else {
                return Delivery::Unhandled;
            };
            let callback = delegate.callback_for(notification).clone();
            callback(service);
            Delivery::Delivered
        }
        NativeEvent::SliderValueChanged { control, value } => {
            let Some(record) = live(controls, control, envelope.generation) else {
                return Delivery::Stale;
            };
            let ControlBody::Slider(slider) = record.body() else {
                return Delivery::Invalid;
            };
            match slider.action().cloned() {
                Some(action) => {
                    action(control, value);
                    Delivery::Delivered
                }
                None => Delivery::Unhandled,
            }
        }
        NativeEvent::IndexPickerChanged { control, index } => {
            let Some(record) = live(controls, control, envelope.generation) else {
                return Delivery::Stale;
            };
            let ControlBody::IndexPicker(picker) = record.body() else {
                return Delivery::Invalid;
            };
            match picker.action().cloned() {
                Some(action) => {
                    action(control, index);
                    Delivery::Delivered
                }
                None => Delivery::Unhandled,
            }
        }
        NativeEvent::Interaction {
            interaction,
            button,
            phase,
        } => {
            let Some(record) = live(interactions, interaction, envelope.generation) else {
                return Delivery::Stale;
            };
            let phase = match CaptureEventPhase::try_from(phase) {
                Ok(phase) => phase,
                Err(err) => {
                    warn!(
                        target: log_target::INTERACTION,
                        "Ignoring event for capture event interaction with key {interaction}: {err}"
                    );
                    return Delivery::Invalid;
                }
            };
            let handler = record.handlers().handler_for(button).clone();
            handler(interaction, phase);
            Delivery::Delivered
        }
    }
}

/// Look up `key`, treating a generation mismatch the same as a dead handle.
fn live<K: HandleKey, R>(registry: &ResourceRegistry<K, R>, key: K, generation: Option<u64>) -> Option<&R> {
    match generation {
        Some(generation) if !registry.is_current(key, generation) => None,
        _ => registry.try_get(key),
    }
}
