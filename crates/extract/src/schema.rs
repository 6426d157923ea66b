use serde::{Deserialize, Serialize};

/// One recognized span: the exact matched text plus its category label.
///
/// The label vocabulary (PERSON, GPE, ...) is owned by the recognizer; this
/// crate treats it as opaque and open-ended.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntitySpan {
    pub text: String,
    pub label: String,
}

impl EntitySpan {
    pub fn new(text: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            label: label.into(),
        }
    }
}
