//! Edit modal reducer: messages in, outcomes out.

use chrono::{FixedOffset, Offset, Utc};
use serde_json::{Map, Value};

use super::confirmation::ConfirmationGate;
use super::state::FormState;
use crate::model::Schema;
use crate::submit::{Payload, SubmitError};

/// Literal typed by default to confirm a lease update.
pub const DEFAULT_CONFIRMATION_TEXT: &str = "update";

/// Settings shared by every session of a modal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModalSettings {
    /// Text that must be typed to enable the commit control.
    pub confirmation_text: String,
    /// Offset the date and time inputs are read in.
    pub offset: FixedOffset,
}

impl Default for ModalSettings {
    fn default() -> Self {
        Self {
            confirmation_text: DEFAULT_CONFIRMATION_TEXT.to_string(),
            offset: Utc.fix(),
        }
    }
}

/// Input to [`EditModal::apply`].
#[derive(Debug, Clone, PartialEq)]
pub enum ModalMsg {
    /// Open (or re-open) the modal on a seed item.
    Open {
        schema: Schema,
        seed: Map<String, Value>,
    },
    /// Replace the raw text of a field.
    Edit { key: String, value: String },
    /// The primary Save control.
    Save,
    /// Replace the text typed into the confirmation prompt.
    ConfirmText(String),
    /// The Update control of the confirmation prompt.
    Confirm,
    /// Close the confirmation prompt, keeping the form.
    CancelConfirmation,
    /// Close the modal, discarding the form.
    Close,
}

/// Result of applying a [`ModalMsg`].
#[derive(Debug)]
pub enum ModalOutcome {
    /// State changed (or the message was ignored); nothing to hand off.
    None,
    /// The gate opened: hand this payload to the update operation.
    /// The modal has already closed.
    Commit(Payload),
    /// The form was valid but the payload broke the update contract.
    Rejected(SubmitError),
    /// The modal closed without committing.
    Closed,
}

/// Everything that lives exactly as long as one opening of the modal.
#[derive(Debug, Clone)]
struct Session {
    form: FormState,
    gate: ConfirmationGate,
}

/// Single owner of the form state for an edit modal.
///
/// Controls are gated rather than checked: `Save` does nothing unless the form
/// is valid and no prompt is showing, and `Confirm` does nothing unless the
/// literal was typed. A commit always closes the session, so two commits can
/// never come from one opening.
#[derive(Debug, Clone)]
pub struct EditModal {
    settings: ModalSettings,
    session: Option<Session>,
}

impl EditModal {
    /// Creates a closed modal.
    pub fn new(settings: ModalSettings) -> Self {
        Self {
            settings,
            session: None,
        }
    }

    pub fn settings(&self) -> &ModalSettings {
        &self.settings
    }

    /// Returns `true` while a form is open.
    pub fn is_open(&self) -> bool {
        self.session.is_some()
    }

    /// The open form, if any.
    pub fn form(&self) -> Option<&FormState> {
        self.session.as_ref().map(|s| &s.form)
    }

    /// The confirmation gate of the open form, if any.
    pub fn gate(&self) -> Option<&ConfirmationGate> {
        self.session.as_ref().map(|s| &s.gate)
    }

    /// Whether the Save control is enabled.
    pub fn can_save(&self) -> bool {
        self.session
            .as_ref()
            .is_some_and(|s| !s.gate.is_awaiting() && s.form.is_valid())
    }

    /// Whether the confirmation prompt is showing.
    pub fn is_confirming(&self) -> bool {
        self.session.as_ref().is_some_and(|s| s.gate.is_awaiting())
    }

    /// Whether the Update control of the confirmation prompt is enabled.
    pub fn can_confirm(&self) -> bool {
        self.session.as_ref().is_some_and(|s| s.gate.can_confirm())
    }

    /// Applies one message.
    pub fn apply(&mut self, msg: ModalMsg) -> ModalOutcome {
        if let ModalMsg::Open { schema, seed } = msg {
            tracing::debug!(%schema, "edit modal opened");
            self.session = Some(Session {
                form: FormState::open(schema, seed, self.settings.offset),
                gate: ConfirmationGate::new(self.settings.confirmation_text.clone()),
            });
            return ModalOutcome::None;
        }

        let can_save = self.can_save();
        let Some(session) = self.session.as_mut() else {
            return ModalOutcome::None;
        };

        match msg {
            ModalMsg::Open { .. } => ModalOutcome::None,
            ModalMsg::Edit { key, value } => {
                if session.gate.is_awaiting() {
                    tracing::debug!(%key, "edit ignored while confirmation is showing");
                } else if !session.form.set_value(&key, value) {
                    tracing::warn!(%key, "edit for unknown field ignored");
                }
                ModalOutcome::None
            }
            ModalMsg::Save => {
                if !can_save {
                    tracing::debug!("save disabled");
                    return ModalOutcome::None;
                }
                if session.form.schema().requires_confirmation() {
                    session.gate.request();
                    tracing::info!(schema = %session.form.schema(), "confirmation requested");
                    return ModalOutcome::None;
                }
                self.commit()
            }
            ModalMsg::ConfirmText(text) => {
                session.gate.set_text(text);
                ModalOutcome::None
            }
            ModalMsg::Confirm => {
                if !session.gate.confirm() {
                    return ModalOutcome::None;
                }
                self.commit()
            }
            ModalMsg::CancelConfirmation => {
                session.gate.cancel();
                ModalOutcome::None
            }
            ModalMsg::Close => {
                self.session = None;
                tracing::debug!("edit modal closed");
                ModalOutcome::Closed
            }
        }
    }

    /// Assembles the payload and ends the session.
    fn commit(&mut self) -> ModalOutcome {
        let Some(session) = self.session.as_mut() else {
            return ModalOutcome::None;
        };
        let Some(valid) = session.form.validated() else {
            session.gate.cancel();
            return ModalOutcome::None;
        };
        match Payload::assemble(valid) {
            Ok(payload) => {
                self.session = None;
                tracing::info!(schema = %payload.schema(), "update committed");
                ModalOutcome::Commit(payload)
            }
            Err(err) => {
                tracing::warn!(error = %err, "update rejected");
                session.gate.cancel();
                ModalOutcome::Rejected(err)
            }
        }
    }
}
