//! Shared state of the headless camera.
//!
//! Native objects handed to the core and the [`HardwareSimulator`](crate::HardwareSimulator)
//! both point at one [`HeadlessDevice`]. The simulator may run on its own
//! threads, so everything lives behind a single `parking_lot::Mutex`.

use std::collections::BTreeMap;
use std::sync::Arc;

use parking_lot::{Mutex, MutexGuard};

use camera_control_core::models::descriptors::SliderDomain;
use camera_control_core::{ControlEvents, ControlKey, InteractionEvents, InteractionKey, ServiceEvents, ServiceKey};

pub(crate) struct SessionEntry {
    pub events: ServiceEvents,
    pub running: bool,
    pub controls: Vec<ControlKey>,
    /// Whether the control overlay is currently shown.
    pub overlay_active: bool,
}

pub(crate) struct SliderEntry {
    pub events: ControlEvents,
    pub enabled: bool,
    pub domain: SliderDomain,
    pub value: f32,
    pub prominent_values: Vec<f32>,
    pub accessibility_identifier: Option<String>,
    pub localized_value_format: Option<String>,
}

pub(crate) struct IndexPickerEntry {
    pub events: ControlEvents,
    pub enabled: bool,
    pub titles: Vec<String>,
    pub selected: usize,
    pub accessibility_identifier: Option<String>,
}

pub(crate) struct InteractionEntry {
    pub events: InteractionEvents,
    pub enabled: bool,
}

#[derive(Default)]
pub(crate) struct DeviceState {
    pub available: bool,
    pub sessions: BTreeMap<ServiceKey, SessionEntry>,
    pub sliders: BTreeMap<ControlKey, SliderEntry>,
    pub index_pickers: BTreeMap<ControlKey, IndexPickerEntry>,
    pub interactions: BTreeMap<InteractionKey, InteractionEntry>,
    pub events_posted: u64,
}

/// Snapshot of what the headless camera currently holds.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeviceStats {
    pub available: bool,
    pub sessions: usize,
    pub running_sessions: usize,
    pub sliders: usize,
    pub index_pickers: usize,
    /// Interactions attached to the host view.
    pub interactions: usize,
    /// Native events posted to the core since the device was created.
    pub events_posted: u64,
}

/// Handle to the headless camera's shared state. Cheap to clone.
#[derive(Clone, Default)]
pub struct HeadlessDevice {
    state: Arc<Mutex<DeviceState>>,
}

impl HeadlessDevice {
    pub fn new(available: bool) -> Self {
        Self {
            state: Arc::new(Mutex::new(DeviceState {
                available,
                ..DeviceState::default()
            })),
        }
    }

    pub fn is_available(&self) -> bool {
        self.lock().available
    }

    /// Plug or unplug the capture device. Unplugging stops running sessions.
    pub fn set_available(&self, available: bool) {
        let mut state = self.lock();
        state.available = available;
        if !available {
            for (key, session) in state.sessions.iter_mut().filter(|(_, s)| s.running) {
                session.running = false;
                session.overlay_active = false;
                log::warn!("Capture device lost; session for camera service {key} stopped.");
            }
        }
    }

    pub fn stats(&self) -> DeviceStats {
        let state = self.lock();
        DeviceStats {
            available: state.available,
            sessions: state.sessions.len(),
            running_sessions: state.sessions.values().filter(|s| s.running).count(),
            sliders: state.sliders.len(),
            index_pickers: state.index_pickers.len(),
            interactions: state.interactions.len(),
            events_posted: state.events_posted,
        }
    }

    /// Controls held by a session, in the order they were added.
    pub fn session_controls(&self, service: ServiceKey) -> Vec<ControlKey> {
        self.lock()
            .sessions
            .get(&service)
            .map(|s| s.controls.clone())
            .unwrap_or_default()
    }

    pub(crate) fn lock(&self) -> MutexGuard<'_, DeviceState> {
        self.state.lock()
    }
}
