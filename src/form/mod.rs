//! Form validation and submission gating for the edit modals.

mod confirmation;
mod field;
mod modal;
mod state;

pub use confirmation::{Confirmation, ConfirmationGate};
pub use field::{Form, FormField};
pub use modal::{DEFAULT_CONFIRMATION_TEXT, EditModal, ModalMsg, ModalOutcome, ModalSettings};
pub use state::{FieldValidity, FormState, ValidForm};
