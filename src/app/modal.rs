//! Single-slot modal state.
//!
//! At most one modal is open at a time. Opening a modal while another is open
//! replaces it. Only the preview kinds carry a payload; for the others any
//! supplied payload is dropped.

use crate::domain::ModalId;
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ModalState {
    pub active_modal: Option<ModalId>,
    pub payload: Option<Value>,
}

impl ModalState {
    /// Opens `modal`, replacing whatever was open.
    #[must_use]
    pub fn open(modal: ModalId, payload: Option<Value>) -> Self {
        let payload = if modal.accepts_payload() {
            payload
        } else {
            if payload.is_some() {
                tracing::debug!(modal = %modal, "dropping payload for modal without preview data");
            }
            None
        };

        Self {
            active_modal: Some(modal),
            payload,
        }
    }

    /// Closed state. Closing twice is a no-op.
    #[must_use]
    pub fn closed() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.active_modal.is_some()
    }
}
