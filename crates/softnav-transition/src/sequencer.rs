//! Exit / enter timeline of the content root
//!
//! Timing is a fixed animation budget matched to the stylesheet's durations;
//! actual animation completion is never measured.

use parking_lot::Mutex;
use softnav_document::{ClassList, DocumentView};
use std::time::Duration;

use crate::motion::MotionGate;
use crate::phase::TransitionPhase;

pub const DEFAULT_ANIMATION_BUDGET: Duration = Duration::from_millis(260);
/// Stand-in for "next paint opportunity"
pub const DEFAULT_FRAME_INTERVAL: Duration = Duration::from_millis(16);

#[derive(Debug, Clone)]
pub struct TransitionSequencer {
    gate: MotionGate,
    budget: Duration,
    frame: Duration,
}

impl TransitionSequencer {
    pub fn new(gate: MotionGate) -> Self {
        Self::with_timing(gate, DEFAULT_ANIMATION_BUDGET, DEFAULT_FRAME_INTERVAL)
    }

    pub fn with_timing(gate: MotionGate, budget: Duration, frame: Duration) -> Self {
        Self {
            gate,
            budget,
            frame: frame.min(budget),
        }
    }

    pub fn gate(&self) -> &MotionGate {
        &self.gate
    }

    pub fn budget(&self) -> Duration {
        self.budget
    }

    /// Play the exit animation. Returns immediately under reduced motion or
    /// when the document has no content root.
    pub async fn animate_out<D: DocumentView>(&self, doc: &Mutex<D>) {
        if doc.lock().content_root().is_none() || self.gate.prefers_reduced_motion() {
            return;
        }

        edit(doc, |classes| {
            classes.remove(TransitionPhase::Entered.class_name());
            classes.add(TransitionPhase::Exiting.class_name());
        });
        tracing::debug!(budget_ms = self.budget.as_millis() as u64, "Animating out");

        tokio::time::sleep(self.budget).await;
    }

    /// Play the enter animation.
    ///
    /// `is-entered` is added one frame after `is-entering` and both coexist
    /// until the budget elapses, so the stylesheet cross-fades instead of popping.
    pub async fn animate_in<D: DocumentView>(&self, doc: &Mutex<D>) {
        if doc.lock().content_root().is_none() {
            return;
        }

        if self.gate.prefers_reduced_motion() {
            edit(doc, |classes| {
                classes.remove(TransitionPhase::Exiting.class_name());
                classes.remove(TransitionPhase::Entering.class_name());
                classes.add(TransitionPhase::Entered.class_name());
            });
            return;
        }

        edit(doc, |classes| {
            classes.remove(TransitionPhase::Exiting.class_name());
            classes.add(TransitionPhase::Entering.class_name());
        });
        tracing::debug!(budget_ms = self.budget.as_millis() as u64, "Animating in");

        tokio::time::sleep(self.frame).await;
        edit(doc, |classes| classes.add(TransitionPhase::Entered.class_name()));

        tokio::time::sleep(self.budget - self.frame).await;
        edit(doc, |classes| {
            classes.remove(TransitionPhase::Entering.class_name())
        });
    }
}

fn edit<D: DocumentView>(doc: &Mutex<D>, mut f: impl FnMut(&mut ClassList)) {
    doc.lock().edit_root_classes(&mut f);
}
