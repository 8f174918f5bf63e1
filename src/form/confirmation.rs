//! Typed-confirmation step between a valid form and the commit.

/// Where the confirmation step stands.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Confirmation {
    /// No confirmation requested.
    #[default]
    Inactive,
    /// Prompt shown; holds the text typed so far.
    AwaitingText { typed: String },
    /// The literal was typed and the commit control used.
    Confirmed,
}

/// State machine guarding a destructive update behind a typed literal.
///
/// `Inactive -> AwaitingText -> Confirmed`, with [`cancel`](Self::cancel)
/// returning to `Inactive` from anywhere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmationGate {
    literal: String,
    state: Confirmation,
}

impl ConfirmationGate {
    /// Creates an inactive gate that opens on `literal`.
    pub fn new(literal: impl Into<String>) -> Self {
        Self {
            literal: literal.into(),
            state: Confirmation::Inactive,
        }
    }

    /// The text that must be typed verbatim.
    pub fn literal(&self) -> &str {
        &self.literal
    }

    pub fn state(&self) -> &Confirmation {
        &self.state
    }

    /// Returns `true` while the prompt is shown.
    pub fn is_awaiting(&self) -> bool {
        matches!(self.state, Confirmation::AwaitingText { .. })
    }

    /// Text typed into the prompt, empty unless awaiting.
    pub fn typed(&self) -> &str {
        match &self.state {
            Confirmation::AwaitingText { typed } => typed.as_str(),
            _ => "",
        }
    }

    /// Shows the prompt. Only valid from `Inactive`; returns whether it moved.
    pub fn request(&mut self) -> bool {
        if self.state != Confirmation::Inactive {
            return false;
        }
        self.state = Confirmation::AwaitingText {
            typed: String::new(),
        };
        true
    }

    /// Replaces the typed text. Ignored unless awaiting.
    pub fn set_text(&mut self, text: impl Into<String>) {
        if let Confirmation::AwaitingText { typed } = &mut self.state {
            *typed = text.into();
        }
    }

    /// `true` iff awaiting and the typed text equals the literal exactly.
    pub fn can_confirm(&self) -> bool {
        matches!(&self.state, Confirmation::AwaitingText { typed } if *typed == self.literal)
    }

    /// Moves to `Confirmed` if the commit control is enabled.
    pub fn confirm(&mut self) -> bool {
        if !self.can_confirm() {
            return false;
        }
        self.state = Confirmation::Confirmed;
        true
    }

    /// Closes the prompt without confirming.
    pub fn cancel(&mut self) {
        self.state = Confirmation::Inactive;
    }
}
