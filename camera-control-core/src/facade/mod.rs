//! Non-throwing per-kind managers.
//!
//! Every operation here returns a plain value: a handle (or the kind's
//! sentinel), a `bool`, or a getter's default. Internal errors are logged
//! under the resource kind's target and never returned.

pub mod control_manager;
pub mod interaction_manager;
pub mod service_manager;

use std::fmt::Display;

use log::error;

use crate::models::error::CameraControlError;
use crate::models::keys::ResourceKind;

/// Unwrap `result`, or log the failure and return `fallback`.
pub(crate) fn settle<T>(
    operation: &str,
    kind: ResourceKind,
    key: impl Display,
    result: Result<T, CameraControlError>,
    fallback: T,
) -> T {
    match result {
        Ok(value) => value,
        Err(err) => {
            error!(
                target: kind.log_target(),
                "{operation} failed for {kind} with key {key}: {err}"
            );
            fallback
        }
    }
}

/// [`settle`] for mutations that report only success.
pub(crate) fn succeeded(
    operation: &str,
    kind: ResourceKind,
    key: impl Display,
    result: Result<(), CameraControlError>,
) -> bool {
    settle(operation, kind, key, result.map(|()| true), false)
}
