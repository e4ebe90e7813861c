//! Transition marker classes on the content root

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransitionPhase {
    /// Resting state, content fully visible
    Entered,
    /// Old content animating away
    Exiting,
    /// New content animating in
    Entering,
}

impl TransitionPhase {
    pub fn class_name(&self) -> &'static str {
        match self {
            TransitionPhase::Entered => "is-entered",
            TransitionPhase::Exiting => "is-exiting",
            TransitionPhase::Entering => "is-entering",
        }
    }
}

impl std::fmt::Display for TransitionPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.class_name())
    }
}
