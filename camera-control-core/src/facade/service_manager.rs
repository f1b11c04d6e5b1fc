use log::info;

use super::{settle, succeeded};
use crate::bridge::sinks::ServiceEvents;
use crate::context::CameraControlContext;
use crate::models::error::CameraControlError;
use crate::models::keys::{ControlKey, HandleKey, ResourceKind, ServiceKey};
use crate::models::log_target;
use crate::session::controller::ServiceController;
use crate::session::delegate::SessionControlsDelegate;
use crate::traits::platform::CameraPlatform;

const KIND: ResourceKind = ResourceKind::Service;

/// Camera service operations, borrowed from a [`CameraControlContext`].
pub struct ServiceManager<'a, P: CameraPlatform> {
    ctx: &'a mut CameraControlContext<P>,
}

impl<'a, P: CameraPlatform> ServiceManager<'a, P> {
    pub(crate) fn new(ctx: &'a mut CameraControlContext<P>) -> Self {
        Self { ctx }
    }

    /// Create a service around a new native session.
    /// Returns [`ServiceKey::SENTINEL`] on failure.
    pub fn create(&mut self) -> ServiceKey {
        let CameraControlContext {
            platform,
            services,
            bridge,
            ..
        } = &mut *self.ctx;
        let queue = bridge.queue().clone();

        let result = services.create(|stamp| {
            let events = ServiceEvents::new(stamp.key, stamp.generation, queue);
            let session = platform.create_session(events)?;
            Ok(ServiceController::new(stamp.key, session))
        });
        match result {
            Ok(key) => {
                info!(target: log_target::SERVICE, "Successfully created camera service with key {key}.");
                key
            }
            Err(err) => settle("create", KIND, "(none)", Err(err), ServiceKey::SENTINEL),
        }
    }

    /// Stop, detach, and release a service. Returns whether it existed.
    pub fn destroy(&mut self, key: ServiceKey) -> bool {
        let ctx = &mut *self.ctx;
        match ctx.services.destroy(key) {
            Some(mut controller) => {
                controller.teardown(&mut ctx.controls);
                info!(target: log_target::SERVICE, "Successfully destroyed camera service with key {key}.");
                true
            }
            None => succeeded("destroy", KIND, key, Err(CameraControlError::not_found(KIND, key))),
        }
    }

    pub fn contains(&self, key: ServiceKey) -> bool {
        self.ctx.services.contains(key)
    }

    /// Number of live services.
    pub fn len(&self) -> usize {
        self.ctx.services.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ctx.services.is_empty()
    }

    pub fn is_running(&self, key: ServiceKey) -> bool {
        self.read("is_running", key, ServiceController::is_running, false)
    }

    /// Start or stop the session. Setting the current state is a successful no-op.
    pub fn set_running(&mut self, key: ServiceKey, running: bool) -> bool {
        let result = self
            .ctx
            .services
            .get_mut(key)
            .and_then(|controller| controller.set_running(running).map(|_| ()));
        succeeded("set_running", KIND, key, result)
    }

    pub fn supports_controls(&self, key: ServiceKey) -> bool {
        self.read("supports_controls", key, ServiceController::supports_controls, false)
    }

    pub fn max_controls_count(&self, key: ServiceKey) -> usize {
        self.read("max_controls_count", key, ServiceController::max_controls_count, 0)
    }

    pub fn control_count(&self, key: ServiceKey) -> usize {
        self.read("control_count", key, ServiceController::control_count, 0)
    }

    pub fn contains_control(&self, key: ServiceKey, control: ControlKey) -> bool {
        self.read("contains_control", key, |c| c.contains_control(control), false)
    }

    /// Attached control handles in ascending order; empty for an unknown service.
    pub fn controls(&self, key: ServiceKey) -> Vec<ControlKey> {
        self.read("controls", key, |c| c.attached_controls().collect(), Vec::new())
    }

    /// Install the controls delegate, replacing any previous one.
    pub fn set_controls_delegate(&mut self, key: ServiceKey, delegate: SessionControlsDelegate) -> bool {
        let result = self.ctx.services.get_mut(key).map(|controller| {
            controller.set_delegate(delegate);
        });
        succeeded("set_controls_delegate", KIND, key, result)
    }

    pub fn remove_controls_delegate(&mut self, key: ServiceKey) -> bool {
        let result = self.ctx.services.get_mut(key).map(|controller| {
            controller.clear_delegate();
        });
        succeeded("remove_controls_delegate", KIND, key, result)
    }

    /// Replace the attached controls with `controls`, in order.
    ///
    /// Fails on an empty list without touching the current controls. A
    /// failure part-way leaves the controls attached before it in place.
    pub fn set_controls(&mut self, key: ServiceKey, controls: &[ControlKey]) -> bool {
        let ctx = &mut *self.ctx;
        let result = ctx
            .services
            .get_mut(key)
            .and_then(|controller| controller.set_controls(controls, &mut ctx.controls));
        succeeded("set_controls", KIND, key, result)
    }

    pub fn add_control(&mut self, key: ServiceKey, control: ControlKey) -> bool {
        let ctx = &mut *self.ctx;
        let result = ctx
            .services
            .get_mut(key)
            .and_then(|controller| controller.add_control(control, &mut ctx.controls));
        succeeded("add_control", KIND, key, result)
    }

    pub fn remove_control(&mut self, key: ServiceKey, control: ControlKey) -> bool {
        let ctx = &mut *self.ctx;
        let result = ctx
            .services
            .get_mut(key)
            .and_then(|controller| controller.remove_control(control, &mut ctx.controls));
        succeeded("remove_control", KIND, key, result)
    }

    pub fn remove_all_controls(&mut self, key: ServiceKey) -> bool {
        let ctx = &mut *self.ctx;
        let result = ctx
            .services
            .get_mut(key)
            .map(|controller| controller.remove_all_controls(&mut ctx.controls));
        succeeded("remove_all_controls", KIND, key, result)
    }

    fn read<T>(
        &self,
        operation: &str,
        key: ServiceKey,
        f: impl FnOnce(&ServiceController<P>) -> T,
        fallback: T,
    ) -> T {
        settle(operation, KIND, key, self.ctx.services.get(key).map(f), fallback)
    }
}
