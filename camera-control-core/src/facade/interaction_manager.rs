use std::sync::Arc;

use log::info;

use super::{settle, succeeded};
use crate::bridge::sinks::InteractionEvents;
use crate::context::CameraControlContext;
use crate::interaction::record::{InteractionHandlers, InteractionRecord};
use crate::models::error::CameraControlError;
use crate::models::events::{CaptureEventPhase, InteractionRouting};
use crate::models::keys::{HandleKey, InteractionKey, ResourceKind};
use crate::models::log_target;
use crate::traits::platform::CameraPlatform;

const KIND: ResourceKind = ResourceKind::Interaction;

/// Hardware-button event interaction operations, borrowed from a
/// [`CameraControlContext`].
pub struct InteractionManager<'a, P: CameraPlatform> {
    ctx: &'a mut CameraControlContext<P>,
}

impl<'a, P: CameraPlatform> InteractionManager<'a, P> {
    pub(crate) fn new(ctx: &'a mut CameraControlContext<P>) -> Self {
        Self { ctx }
    }

    /// One handler for both buttons.
    /// Returns [`InteractionKey::SENTINEL`] on failure.
    pub fn create_combined(
        &mut self,
        handler: impl Fn(InteractionKey, CaptureEventPhase) + Send + Sync + 'static,
    ) -> InteractionKey {
        self.create(InteractionHandlers::Combined(Arc::new(handler)))
    }

    /// Separate handlers for the primary and secondary buttons.
    /// Returns [`InteractionKey::SENTINEL`] on failure.
    pub fn create_separated(
        &mut self,
        primary: impl Fn(InteractionKey, CaptureEventPhase) + Send + Sync + 'static,
        secondary: impl Fn(InteractionKey, CaptureEventPhase) + Send + Sync + 'static,
    ) -> InteractionKey {
        self.create(InteractionHandlers::Separated {
            primary: Arc::new(primary),
            secondary: Arc::new(secondary),
        })
    }

    /// Detach the interaction from the host view and drop its handlers.
    pub fn destroy(&mut self, key: InteractionKey) -> bool {
        match self.ctx.interactions.destroy(key) {
            Some(mut record) => {
                record.release();
                info!(
                    target: log_target::INTERACTION,
                    "Successfully destroyed capture event interaction with key {key}."
                );
                true
            }
            None => succeeded("destroy", KIND, key, Err(CameraControlError::not_found(KIND, key))),
        }
    }

    pub fn contains(&self, key: InteractionKey) -> bool {
        self.ctx.interactions.contains(key)
    }

    pub fn len(&self) -> usize {
        self.ctx.interactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ctx.interactions.is_empty()
    }

    pub fn is_enabled(&self, key: InteractionKey) -> bool {
        let result = self.ctx.interactions.get(key).map(InteractionRecord::is_enabled);
        settle("is_enabled", KIND, key, result, false)
    }

    /// While disabled the system keeps its default button behavior.
    pub fn set_enabled(&mut self, key: InteractionKey, enabled: bool) -> bool {
        let result = self
            .ctx
            .interactions
            .get_mut(key)
            .map(|record| record.set_enabled(enabled));
        succeeded("set_enabled", KIND, key, result)
    }

    pub fn routing(&self, key: InteractionKey) -> Option<InteractionRouting> {
        let result = self
            .ctx
            .interactions
            .get(key)
            .map(|record| Some(record.routing()));
        settle("routing", KIND, key, result, None)
    }

    fn create(&mut self, handlers: InteractionHandlers) -> InteractionKey {
        let CameraControlContext {
            platform,
            interactions,
            bridge,
            ..
        } = &mut *self.ctx;
        let queue = bridge.queue().clone();
        let routing = handlers.routing();

        let result = interactions.create(|stamp| {
            let events = InteractionEvents::new(stamp.key, stamp.generation, queue);
            let native = platform.create_interaction(routing, events)?;
            Ok(InteractionRecord::new(native, handlers))
        });
        match result {
            Ok(key) => {
                info!(
                    target: log_target::INTERACTION,
                    "Successfully created capture event interaction with key {key}."
                );
                key
            }
            Err(err) => settle("create", KIND, "(none)", Err(err), InteractionKey::SENTINEL),
        }
    }
}
