use std::sync::Arc;

use parking_lot::Mutex;
use serde::Serialize;

use camera_control_core::{
    CaptureEventPhase, ControlKey, ControlsNotification, InteractionKey, ServiceKey, SessionControlsDelegate,
};

/// One handler invocation, as printed in the demo's report.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum LoggedEvent {
    Controls {
        service: ServiceKey,
        notification: String,
    },
    SliderValue {
        control: ControlKey,
        value: f32,
    },
    IndexSelected {
        control: ControlKey,
        index: usize,
    },
    Button {
        interaction: InteractionKey,
        handler: &'static str,
        phase: CaptureEventPhase,
    },
}

/// Collects events from every handler the demo registers.
#[derive(Clone, Default)]
pub struct EventLog {
    events: Arc<Mutex<Vec<LoggedEvent>>>,
}

impl EventLog {
    pub fn delegate(&self) -> SessionControlsDelegate {
        let sink = self.clone();
        SessionControlsDelegate::uniform(Arc::new(
            move |service: ServiceKey, notification: ControlsNotification| {
                sink.push(LoggedEvent::Controls {
                    service,
                    notification: format!("{notification:?}"),
                });
            },
        ))
    }

    pub fn slider_action(&self) -> impl Fn(ControlKey, f32) + Send + Sync + 'static {
        let sink = self.clone();
        move |control, value| sink.push(LoggedEvent::SliderValue { control, value })
    }

    pub fn index_action(&self) -> impl Fn(ControlKey, usize) + Send + Sync + 'static {
        let sink = self.clone();
        move |control, index| sink.push(LoggedEvent::IndexSelected { control, index })
    }

    pub fn button(&self, handler: &'static str) -> impl Fn(InteractionKey, CaptureEventPhase) + Send + Sync + 'static {
        let sink = self.clone();
        move |interaction, phase| {
            sink.push(LoggedEvent::Button {
                interaction,
                handler,
                phase,
            })
        }
    }

    pub fn take(&self) -> Vec<LoggedEvent> {
        std::mem::take(&mut *self.events.lock())
    }

    fn push(&self, event: LoggedEvent) {
        log::info!("{event:?}");
        self.events.lock().push(event);
    }
}
