use crate::models::descriptors::ControlKind;
use crate::models::error::CameraControlError;
use crate::models::keys::ControlKey;

/// Native capture session wrapped by a camera service.
///
/// The session itself is an opaque capability: it can be started and
/// stopped, and it accepts controls by handle. Control membership changes
/// are always bracketed by `begin_configuration` / `commit_configuration`.
pub trait SessionBackend: Send {
    /// Whether the native session is currently running.
    fn is_running(&self) -> bool;

    fn start_running(&mut self) -> Result<(), CameraControlError>;

    fn stop_running(&mut self);

    /// Whether the hardware/platform provides session controls at all.
    fn supports_controls(&self) -> bool;

    /// Maximum number of controls the session accepts.
    fn max_controls_count(&self) -> usize;

    fn begin_configuration(&mut self);

    fn commit_configuration(&mut self);

    /// Whether the native session would accept this control right now.
    fn can_add_control(&self, control: ControlKey, kind: ControlKind) -> bool;

    fn add_control(&mut self, control: ControlKey);

    fn remove_control(&mut self, control: ControlKey);

    /// Number of controls the native session currently holds.
    fn control_count(&self) -> usize;

    /// Called once when the owning service is destroyed.
    fn release(&mut self) {}
}
