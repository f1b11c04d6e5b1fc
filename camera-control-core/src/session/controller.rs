use std::collections::BTreeSet;

use log::{debug, info};

use super::delegate::SessionControlsDelegate;
use crate::control::ControlTable;
use crate::models::error::CameraControlError;
use crate::models::keys::{ControlKey, ServiceKey};
use crate::models::log_target;
use crate::traits::platform::CameraPlatform;
use crate::traits::session_backend::SessionBackend;

/// Running state of a service's native session.
///
/// ```text
/// Stopped ⇄ Running
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Stopped,
    Running,
}

/// The aggregate behind one service record.
///
/// Wraps one native session, owns the set of control handles attached to
/// it, and holds at most one controls delegate. Control attachment also
/// updates each control record's owner so a control can only ever belong
/// to one service.
pub struct ServiceController<P: CameraPlatform> {
    key: ServiceKey,
    session: P::Session,
    attached: BTreeSet<ControlKey>,
    delegate: Option<SessionControlsDelegate>,
}

impl<P: CameraPlatform> ServiceController<P> {
    pub fn new(key: ServiceKey, session: P::Session) -> Self {
        Self {
            key,
            session,
            attached: BTreeSet::new(),
            delegate: None,
        }
    }

    pub fn key(&self) -> ServiceKey {
        self.key
    }

    pub fn session(&self) -> &P::Session {
        &self.session
    }

    pub fn state(&self) -> RunState {
        if self.session.is_running() {
            RunState::Running
        } else {
            RunState::Stopped
        }
    }

    pub fn is_running(&self) -> bool {
        self.state() == RunState::Running
    }

    /// Start or stop the session. Returns whether the state actually changed.
    pub fn set_running(&mut self, running: bool) -> Result<bool, CameraControlError> {
        match (self.state(), running) {
            (RunState::Stopped, true) => {
                self.session.start_running()?;
                info!(target: log_target::SERVICE, "Started camera service with key {}.", self.key);
                Ok(true)
            }
            (RunState::Running, false) => {
                self.session.stop_running();
                info!(target: log_target::SERVICE, "Stopped camera service with key {}.", self.key);
                Ok(true)
            }
            (state, _) => {
                debug!(
                    target: log_target::SERVICE,
                    "Camera service with key {} already {:?}; no change.", self.key, state
                );
                Ok(false)
            }
        }
    }

    pub fn supports_controls(&self) -> bool {
        self.session.supports_controls()
    }

    pub fn max_controls_count(&self) -> usize {
        self.session.max_controls_count()
    }

    pub fn control_count(&self) -> usize {
        self.attached.len()
    }

    pub fn contains_control(&self, control: ControlKey) -> bool {
        self.attached.contains(&control)
    }

    /// Attached control handles in ascending order.
    pub fn attached_controls(&self) -> impl Iterator<Item = ControlKey> + '_ {
        self.attached.iter().copied()
    }

    pub fn delegate(&self) -> Option<&SessionControlsDelegate> {
        self.delegate.as_ref()
    }

    /// Install `delegate`, returning the one it replaced.
    pub fn set_delegate(&mut self, delegate: SessionControlsDelegate) -> Option<SessionControlsDelegate> {
        self.delegate.replace(delegate)
    }

    pub fn clear_delegate(&mut self) -> Option<SessionControlsDelegate> {
        self.delegate.take()
    }

    /// Replace every attached control with `controls`, in order.
    ///
    /// An empty list is rejected before anything changes. Otherwise all
    /// current controls are detached and the new ones attached one by one;
    /// the first control that cannot be attached aborts the call, and the
    /// controls attached before it stay attached.
    pub fn set_controls(
        &mut self,
        controls: &[ControlKey],
        table: &mut ControlTable<P>,
    ) -> Result<(), CameraControlError> {
        if controls.is_empty() {
            return Err(CameraControlError::EmptyReplacement);
        }
        if !self.session.supports_controls() {
            return Err(CameraControlError::Unsupported(self.key));
        }

        self.configured(|this| {
            this.detach_all(table);
            controls
                .iter()
                .try_for_each(|&control| this.attach(control, table))
        })
    }

    pub fn add_control(
        &mut self,
        control: ControlKey,
        table: &mut ControlTable<P>,
    ) -> Result<(), CameraControlError> {
        if !self.session.supports_controls() {
            return Err(CameraControlError::Unsupported(self.key));
        }
        self.configured(|this| this.attach(control, table))
    }

    pub fn remove_control(
        &mut self,
        control: ControlKey,
        table: &mut ControlTable<P>,
    ) -> Result<(), CameraControlError> {
        if !self.attached.remove(&control) {
            return Err(CameraControlError::NotPresent {
                control,
                service: self.key,
            });
        }
        self.configured(|this| this.session.remove_control(control));
        if let Some(record) = table.try_get_mut(control) {
            record.set_attached_to(None);
        }
        Ok(())
    }

    pub fn remove_all_controls(&mut self, table: &mut ControlTable<P>) {
        self.configured(|this| this.detach_all(table));
    }

    /// Drop a control that is being destroyed from the attached set.
    /// Returns whether it was attached.
    pub(crate) fn forget_control(&mut self, control: ControlKey) -> bool {
        if !self.attached.remove(&control) {
            return false;
        }
        self.configured(|this| this.session.remove_control(control));
        true
    }

    /// Stop the session, detach every control, drop the delegate, and
    /// release the native session. Called when the service is destroyed.
    pub(crate) fn teardown(&mut self, table: &mut ControlTable<P>) {
        if self.session.is_running() {
            self.session.stop_running();
        }
        self.remove_all_controls(table);
        self.delegate = None;
        self.session.release();
    }

    fn attach(&mut self, control: ControlKey, table: &mut ControlTable<P>) -> Result<(), CameraControlError> {
        if self.attached.contains(&control) {
            return Err(CameraControlError::AlreadyPresent {
                control,
                service: self.key,
            });
        }

        let record = table.get_mut(control)?;
        if let Some(owner) = record.attached_to() {
            return Err(CameraControlError::AlreadyPresent {
                control,
                service: owner,
            });
        }

        let max = self.session.max_controls_count();
        if self.attached.len() >= max {
            return Err(CameraControlError::CapacityExceeded {
                service: self.key,
                max,
            });
        }

        if !self.session.can_add_control(control, record.kind()) {
            return Err(CameraControlError::CannotAdd {
                service: self.key,
                control,
            });
        }

        self.session.add_control(control);
        record.set_attached_to(Some(self.key));
        self.attached.insert(control);
        Ok(())
    }

    fn detach_all(&mut self, table: &mut ControlTable<P>) {
        for control in std::mem::take(&mut self.attached) {
            self.session.remove_control(control);
            if let Some(record) = table.try_get_mut(control) {
                record.set_attached_to(None);
            }
        }
    }

    /// Run `body` inside a native configuration bracket. The bracket is
    /// committed whether or not `body` succeeds.
    fn configured<T>(&mut self, body: impl FnOnce(&mut Self) -> T) -> T {
        self.session.begin_configuration();
        let result = body(self);
        self.session.commit_configuration();
        result
    }
}
