//! Plays the user and the hardware against a [`HeadlessDevice`].
//!
//! Each action posts through the native resource's event sink exactly as
//! real hardware would, so nothing reaches a handler until the owning
//! context calls `dispatch_pending`. Actions on resources that are gone or
//! disabled post nothing and return `false`.

use std::thread;
use std::time::Duration;

use camera_control_core::{
    CameraControlError, CaptureEventPhase, ControlKey, ControlsNotification, InteractionButton, InteractionKey,
    ServiceKey,
};

use crate::device::{DeviceState, HeadlessDevice};

/// Drives the headless camera. Cheap to clone and `Send`.
#[derive(Clone)]
pub struct HardwareSimulator {
    device: HeadlessDevice,
}

impl HardwareSimulator {
    pub fn new(device: HeadlessDevice) -> Self {
        Self { device }
    }

    pub fn device(&self) -> &HeadlessDevice {
        &self.device
    }

    /// Press and release a hardware button.
    pub fn press(&self, interaction: InteractionKey, button: InteractionButton) -> bool {
        self.phase(interaction, button, CaptureEventPhase::Began)
            && self.phase(interaction, button, CaptureEventPhase::Ended)
    }

    /// Press a button, then have the system cancel the press.
    pub fn press_and_cancel(&self, interaction: InteractionKey, button: InteractionButton) -> bool {
        self.phase(interaction, button, CaptureEventPhase::Began)
            && self.phase(interaction, button, CaptureEventPhase::Cancelled)
    }

    pub fn phase(&self, interaction: InteractionKey, button: InteractionButton, phase: CaptureEventPhase) -> bool {
        self.raw_phase(interaction, button, phase.raw())
    }

    /// Post a phase using the raw native encoding, valid or not.
    pub fn raw_phase(&self, interaction: InteractionKey, button: InteractionButton, phase: u64) -> bool {
        let mut state = self.device.lock();
        let posted = match state.interactions.get(&interaction) {
            Some(entry) if entry.enabled => {
                entry.events.raw_phase(button, phase);
                true
            }
            _ => false,
        };
        count(&mut state, posted)
    }

    /// Move a slider as the user would. The value snaps to the slider's domain.
    pub fn drag_slider(&self, control: ControlKey, value: f32) -> bool {
        let mut state = self.device.lock();
        let posted = match state.sliders.get_mut(&control) {
            Some(entry) if entry.enabled && value.is_finite() => {
                entry.value = entry.domain.constrain(value);
                entry.events.value_changed(entry.value);
                true
            }
            _ => false,
        };
        count(&mut state, posted)
    }

    pub fn select_index(&self, control: ControlKey, index: usize) -> bool {
        let mut state = self.device.lock();
        let posted = match state.index_pickers.get_mut(&control) {
            Some(entry) if entry.enabled && index < entry.titles.len() => {
                entry.selected = index;
                entry.events.index_changed(index);
                true
            }
            _ => false,
        };
        count(&mut state, posted)
    }

    /// Bring up the control overlay. Needs a running session that holds controls.
    pub fn show_controls(&self, service: ServiceKey) -> bool {
        self.overlay(service, |active, session_ready| {
            (!active && session_ready).then_some((true, ControlsNotification::DidBecomeActive))
        })
    }

    pub fn hide_controls(&self, service: ServiceKey) -> bool {
        self.overlay(service, |active, _| {
            active.then_some((false, ControlsNotification::DidBecomeInactive))
        })
    }

    pub fn enter_fullscreen(&self, service: ServiceKey) -> bool {
        self.overlay(service, |active, _| {
            active.then_some((true, ControlsNotification::WillEnterFullscreenAppearance))
        })
    }

    pub fn exit_fullscreen(&self, service: ServiceKey) -> bool {
        self.overlay(service, |active, _| {
            active.then_some((true, ControlsNotification::WillExitFullscreenAppearance))
        })
    }

    /// Press `button` `presses` times on a background thread, `interval` apart.
    /// The thread returns how many presses were posted.
    pub fn spawn_button_presses(
        &self,
        interaction: InteractionKey,
        button: InteractionButton,
        presses: usize,
        interval: Duration,
    ) -> Result<thread::JoinHandle<usize>, CameraControlError> {
        let simulator = self.clone();
        thread::Builder::new()
            .name("headless-hardware-buttons".into())
            .spawn(move || {
                let mut posted = 0;
                for _ in 0..presses {
                    if simulator.press(interaction, button) {
                        posted += 1;
                    }
                    thread::sleep(interval);
                }
                log::debug!("Button thread for interaction {interaction} posted {posted} presses.");
                posted
            })
            .map_err(|e| CameraControlError::ConfigurationFailed(format!("failed to spawn button thread: {}", e)))
    }

    /// `decide(overlay_active, session_ready)` returns the new overlay state
    /// and the notification to post, or `None` to do nothing.
    fn overlay(
        &self,
        service: ServiceKey,
        decide: impl FnOnce(bool, bool) -> Option<(bool, ControlsNotification)>,
    ) -> bool {
        let mut state = self.device.lock();
        let posted = match state.sessions.get_mut(&service) {
            Some(session) => {
                let ready = session.running && !session.controls.is_empty();
                match decide(session.overlay_active, ready) {
                    Some((active, notification)) => {
                        session.overlay_active = active;
                        session.events.notify(notification);
                        true
                    }
                    None => false,
                }
            }
            None => false,
        };
        count(&mut state, posted)
    }
}

fn count(state: &mut DeviceState, posted: bool) -> bool {
    if posted {
        state.events_posted += 1;
    }
    posted
}
