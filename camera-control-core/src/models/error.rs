use thiserror::Error;

use super::descriptors::ControlKind;
use super::keys::{ControlKey, HandleKey, ResourceKind, ServiceKey};

/// Errors raised by registries, controllers and the callback bridge.
///
/// None of these cross the boundary: the manager facades log them and
/// return a sentinel, `false`, or a default value instead.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CameraControlError {
    #[error("{kind} with key {key} not found")]
    NotFound { kind: ResourceKind, key: u64 },

    #[error("capture control with key {control} is already attached to camera service with key {service}")]
    AlreadyPresent { control: ControlKey, service: ServiceKey },

    #[error("capture control with key {control} is not attached to camera service with key {service}")]
    NotPresent { control: ControlKey, service: ServiceKey },

    #[error("camera service with key {service} already holds its maximum of {max} controls")]
    CapacityExceeded { service: ServiceKey, max: usize },

    #[error("camera service with key {0} does not support controls")]
    Unsupported(ServiceKey),

    #[error("native session of camera service with key {service} rejected capture control with key {control}")]
    CannotAdd { service: ServiceKey, control: ControlKey },

    #[error("{kind} key space exhausted after {attempts} attempts")]
    GenerationExhausted { kind: ResourceKind, attempts: u64 },

    #[error("replacement control list is empty; use remove_all_controls to clear")]
    EmptyReplacement,

    #[error("capture control with key {key} is a {actual}, not a {expected}")]
    TypeMismatch {
        key: ControlKey,
        expected: ControlKind,
        actual: ControlKind,
    },

    #[error("invalid payload: {0}")]
    InvalidPayload(String),

    #[error("configuration failed: {0}")]
    ConfigurationFailed(String),

    #[error("device not available")]
    DeviceNotAvailable,
}

impl CameraControlError {
    pub fn not_found<K: HandleKey>(kind: ResourceKind, key: K) -> Self {
        Self::NotFound {
            kind,
            key: key.to_u64(),
        }
    }
}
