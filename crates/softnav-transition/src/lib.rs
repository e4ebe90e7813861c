//! Softnav Page Transitions
//!
//! - [`MotionGate`]: the standing reduced-motion preference
//! - [`TransitionSequencer`]: exit / enter timeline of the content root
//!
//! ```text
//! is-entered
//!   ↓ animate_out
//! is-exiting
//!   ↓ content swapped, animate_in
//! is-entering (+ is-entered on next frame)
//!   ↓ animation budget elapsed
//! is-entered
//! ```

mod motion;
mod phase;
mod sequencer;

pub use motion::{MotionGate, MotionSignal};
pub use phase::TransitionPhase;
pub use sequencer::{TransitionSequencer, DEFAULT_ANIMATION_BUDGET, DEFAULT_FRAME_INTERVAL};
