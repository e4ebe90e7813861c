//! Reduced-motion preference
//!
//! The environment may flip the preference at any time through a
//! [`MotionSignal`]; every [`MotionGate`] sees the latest value on its next read.

use softnav_document::ScrollBehavior;
use tokio::sync::watch;

#[derive(Debug, Clone)]
pub struct MotionGate {
    rx: watch::Receiver<bool>,
}

#[derive(Debug)]
pub struct MotionSignal {
    tx: watch::Sender<bool>,
}

impl MotionGate {
    /// Create a live preference, returning the environment side and a gate
    pub fn channel(reduced: bool) -> (MotionSignal, MotionGate) {
        let (tx, rx) = watch::channel(reduced);
        (MotionSignal { tx }, MotionGate { rx })
    }

    /// A preference that never changes
    pub fn fixed(reduced: bool) -> Self {
        let (_, gate) = Self::channel(reduced);
        gate
    }

    pub fn prefers_reduced_motion(&self) -> bool {
        *self.rx.borrow()
    }

    /// Anchor scrolling is instant under reduced motion
    pub fn scroll_behavior(&self) -> ScrollBehavior {
        if self.prefers_reduced_motion() {
            ScrollBehavior::Auto
        } else {
            ScrollBehavior::Smooth
        }
    }
}

impl MotionSignal {
    pub fn set(&self, reduced: bool) {
        let previous = self.tx.send_replace(reduced);
        if previous != reduced {
            tracing::debug!(reduced, "Reduced motion preference changed");
        }
    }

    pub fn get(&self) -> bool {
        *self.tx.borrow()
    }

    pub fn subscribe(&self) -> MotionGate {
        MotionGate {
            rx: self.tx.subscribe(),
        }
    }
}
