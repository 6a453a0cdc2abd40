//! Outbound render types.

use crate::grid::reshape;

/// One labeled, data-carrying choice in a keyboard grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyboardButton {
    /// Text shown on the button.
    pub label: String,
    /// Opaque payload echoed back verbatim on selection.
    pub payload: String,
}

impl KeyboardButton {
    /// Create a button.
    pub fn new(label: impl Into<String>, payload: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            payload: payload.into(),
        }
    }
}

/// A grid of selectable buttons, rows by columns.
///
/// An empty grid is valid: selection prompts render even when the user has
/// nothing to select from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Keyboard {
    rows: Vec<Vec<KeyboardButton>>,
}

impl Keyboard {
    /// Lay buttons out in a grid with the given number of columns.
    pub fn grid(buttons: Vec<KeyboardButton>, columns: usize) -> Self {
        Self {
            rows: reshape(buttons, columns),
        }
    }

    /// The button rows.
    pub fn rows(&self) -> &[Vec<KeyboardButton>] {
        &self.rows
    }

    /// Whether the grid has no buttons.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Iterate over all buttons in row order.
    pub fn buttons(&self) -> impl Iterator<Item = &KeyboardButton> {
        self.rows.iter().flatten()
    }
}

/// One outbound render request to the delivery channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Render {
    /// Plain text of the message.
    pub text: String,
    /// Optional button grid attached to the message.
    pub keyboard: Option<Keyboard>,
}

impl Render {
    /// A plain text render without a keyboard.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            keyboard: None,
        }
    }

    /// A render with an attached keyboard.
    pub fn with_keyboard(text: impl Into<String>, keyboard: Keyboard) -> Self {
        Self {
            text: text.into(),
            keyboard: Some(keyboard),
        }
    }
}
