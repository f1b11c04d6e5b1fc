use serde::{Deserialize, Serialize};

use super::error::CameraControlError;

/// Phase of a hardware-button capture event.
///
/// Native code reports the phase as a raw `u64`: 0 began, 1 ended, 2 cancelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaptureEventPhase {
    /// The button was pressed down.
    Began,
    /// The button was released.
    Ended,
    Cancelled,
}

impl CaptureEventPhase {
    pub fn raw(self) -> u64 {
        match self {
            Self::Began => 0,
            Self::Ended => 1,
            Self::Cancelled => 2,
        }
    }
}

impl TryFrom<u64> for CaptureEventPhase {
    type Error = CameraControlError;

    fn try_from(raw: u64) -> Result<Self, Self::Error> {
        match raw {
            0 => Ok(Self::Began),
            1 => Ok(Self::Ended),
            2 => Ok(Self::Cancelled),
            other => Err(CameraControlError::InvalidPayload(format!(
                "unknown capture event phase {other}"
            ))),
        }
    }
}

/// Which hardware button produced an interaction event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InteractionButton {
    /// Volume up.
    Primary,
    /// Volume down.
    Secondary,
}

/// How an interaction routes button events to its handlers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InteractionRouting {
    /// One handler receives events from both buttons.
    Combined,
    /// Primary and secondary buttons each have their own handler.
    Separated,
}

/// Session-level notifications delivered to a service's controls delegate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlsNotification {
    DidBecomeActive,
    DidBecomeInactive,
    WillEnterFullscreenAppearance,
    WillExitFullscreenAppearance,
}
