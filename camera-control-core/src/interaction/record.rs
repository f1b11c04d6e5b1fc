use std::fmt;
use std::sync::Arc;

use crate::models::events::{CaptureEventPhase, InteractionButton, InteractionRouting};
use crate::models::keys::InteractionKey;
use crate::traits::interaction_backend::InteractionBackend;

/// Invoked with the interaction's handle and the decoded event phase.
pub type InteractionHandler = Arc<dyn Fn(InteractionKey, CaptureEventPhase) + Send + Sync + 'static>;

/// Handlers registered when an interaction is created.
#[derive(Clone)]
pub enum InteractionHandlers {
    /// One handler for presses of either button.
    Combined(InteractionHandler),
    Separated {
        primary: InteractionHandler,
        secondary: InteractionHandler,
    },
}

impl InteractionHandlers {
    pub fn routing(&self) -> InteractionRouting {
        match self {
            Self::Combined(_) => InteractionRouting::Combined,
            Self::Separated { .. } => InteractionRouting::Separated,
        }
    }

    /// The handler responsible for events from `button`.
    pub fn handler_for(&self, button: InteractionButton) -> &InteractionHandler {
        match (self, button) {
            (Self::Combined(handler), _) => handler,
            (Self::Separated { primary, .. }, InteractionButton::Primary) => primary,
            (Self::Separated { secondary, .. }, InteractionButton::Secondary) => secondary,
        }
    }
}

impl fmt::Debug for InteractionHandlers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("InteractionHandlers").field(&self.routing()).finish()
    }
}

/// Registry record for one hardware-button event interaction.
pub struct InteractionRecord<I: InteractionBackend> {
    native: I,
    handlers: InteractionHandlers,
}

impl<I: InteractionBackend> InteractionRecord<I> {
    pub fn new(native: I, handlers: InteractionHandlers) -> Self {
        Self { native, handlers }
    }

    pub fn native(&self) -> &I {
        &self.native
    }

    pub fn handlers(&self) -> &InteractionHandlers {
        &self.handlers
    }

    pub fn routing(&self) -> InteractionRouting {
        self.handlers.routing()
    }

    pub fn is_enabled(&self) -> bool {
        self.native.is_enabled()
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.native.set_enabled(enabled);
    }

    /// Detach the native interaction from the host view. The record's
    /// handlers are dropped with the record.
    pub(crate) fn release(&mut self) {
        self.native.release();
    }
}
