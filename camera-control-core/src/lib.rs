//! # camera-control-core
//!
//! Platform-agnostic handle management for camera capture controls.
//!
//! Camera services, capture controls (sliders, index pickers) and
//! hardware-button event interactions are native resources. Callers never
//! hold them directly: each lives in a per-kind registry and is addressed
//! by a small integer handle. Native backends implement the traits in
//! [`traits`] and plug into a [`CameraControlContext`].
//!
//! ## Architecture
//!
//! ```text
//! camera-control-core (this crate)
//! ├── context       ← CameraControlContext (owns registries, platform, event queue)
//! ├── facade/       ← ServiceManager, ControlManager, InteractionManager (non-throwing)
//! ├── registry/     ← KeyGenerator, ResourceRegistry
//! ├── session/      ← ServiceController, SessionControlsDelegate
//! ├── control/      ← ControlRecord (slider / index picker)
//! ├── interaction/  ← InteractionRecord, InteractionHandlers
//! ├── bridge/       ← EventQueue, event sinks, CallbackBridge
//! ├── traits/       ← CameraPlatform, SessionBackend, SliderBackend, ...
//! └── models/       ← CameraControlError, keys, descriptors, events, ContextConfig
//! ```

pub mod bridge;
pub mod context;
pub mod control;
pub mod facade;
pub mod interaction;
pub mod models;
pub mod registry;
pub mod session;
pub mod traits;

#[cfg(test)]
mod testing;

// Re-export key types at crate root for convenience.
pub use bridge::dispatch::{CallbackBridge, Delivery, DispatchSummary};
pub use bridge::queue::{EventQueue, NativeEvent};
pub use bridge::sinks::{ControlEvents, InteractionEvents, ServiceEvents};
pub use context::CameraControlContext;
pub use facade::control_manager::ControlManager;
pub use facade::interaction_manager::InteractionManager;
pub use facade::service_manager::ServiceManager;
pub use interaction::record::InteractionHandlers;
pub use models::config::ContextConfig;
pub use models::descriptors::{ControlKind, IndexPickerDescriptor, SliderDescriptor, SliderDomain};
pub use models::error::CameraControlError;
pub use models::events::{CaptureEventPhase, ControlsNotification, InteractionButton, InteractionRouting};
pub use models::keys::{ControlKey, HandleKey, InteractionKey, ResourceKind, ServiceKey};
pub use registry::key_generator::{KeyGenerationError, KeyGenerator};
pub use registry::resource_registry::ResourceRegistry;
pub use session::controller::{RunState, ServiceController};
pub use session::delegate::SessionControlsDelegate;
pub use traits::control_backend::{ControlBackend, IndexPickerBackend, SliderBackend};
pub use traits::interaction_backend::InteractionBackend;
pub use traits::platform::CameraPlatform;
pub use traits::session_backend::SessionBackend;
