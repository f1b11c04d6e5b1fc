use std::ops::RangeInclusive;

use super::keys::{ControlKey, HandleKey, InteractionKey, ResourceKind, ServiceKey};

/// Configuration for a [`CameraControlContext`](crate::CameraControlContext).
///
/// Each resource kind allocates handles from its own inclusive range. The
/// range must not reach the kind's sentinel value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextConfig {
    /// Handles issued to camera services (default: `0..=254`).
    pub service_keys: RangeInclusive<ServiceKey>,

    /// Handles issued to capture controls (default: `0..=65534`).
    pub control_keys: RangeInclusive<ControlKey>,

    /// Handles issued to event interactions (default: `0..=65534`).
    pub interaction_keys: RangeInclusive<InteractionKey>,
}

impl ContextConfig {
    pub fn validate(&self) -> Result<(), String> {
        validate_range(ResourceKind::Service, &self.service_keys)?;
        validate_range(ResourceKind::Control, &self.control_keys)?;
        validate_range(ResourceKind::Interaction, &self.interaction_keys)?;
        Ok(())
    }
}

fn validate_range<K: HandleKey>(kind: ResourceKind, range: &RangeInclusive<K>) -> Result<(), String> {
    if range.start() > range.end() {
        return Err(format!(
            "{kind} key range {}..={} is empty",
            range.start(),
            range.end()
        ));
    }
    if range.end().is_sentinel() {
        return Err(format!(
            "{kind} key range {}..={} includes the reserved sentinel {}",
            range.start(),
            range.end(),
            K::SENTINEL
        ));
    }
    Ok(())
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self {
            service_keys: 0..=ServiceKey::MAX - 1,
            control_keys: 0..=ControlKey::MAX - 1,
            interaction_keys: 0..=InteractionKey::MAX - 1,
        }
    }
}
