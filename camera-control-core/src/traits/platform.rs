use crate::bridge::sinks::{ControlEvents, InteractionEvents, ServiceEvents};
use crate::models::descriptors::{IndexPickerDescriptor, SliderDescriptor};
use crate::models::error::CameraControlError;
use crate::models::events::InteractionRouting;
use crate::traits::control_backend::{IndexPickerBackend, SliderBackend};
use crate::traits::interaction_backend::InteractionBackend;
use crate::traits::session_backend::SessionBackend;

/// Factory for the native resources a context manages.
///
/// Each factory method receives an event sink already bound to the new
/// resource's handle. Native code posts asynchronous notifications through
/// that sink from whatever thread it runs on; the context delivers them on
/// its own thread during [`dispatch_pending`](crate::CameraControlContext::dispatch_pending).
///
/// Implemented by:
/// - `HeadlessPlatform` (`camera-control-headless`)
pub trait CameraPlatform {
    type Session: SessionBackend;
    type Slider: SliderBackend;
    type IndexPicker: IndexPickerBackend;
    type Interaction: InteractionBackend;

    /// Create a session configured with its default input and output.
    fn create_session(&mut self, events: ServiceEvents) -> Result<Self::Session, CameraControlError>;

    fn create_slider(
        &mut self,
        descriptor: &SliderDescriptor,
        events: ControlEvents,
    ) -> Result<Self::Slider, CameraControlError>;

    fn create_index_picker(
        &mut self,
        descriptor: &IndexPickerDescriptor,
        events: ControlEvents,
    ) -> Result<Self::IndexPicker, CameraControlError>;

    /// Create an interaction and attach it to the host view.
    fn create_interaction(
        &mut self,
        routing: InteractionRouting,
        events: InteractionEvents,
    ) -> Result<Self::Interaction, CameraControlError>;
}
