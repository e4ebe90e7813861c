//! The decoration hook handed to the navigation controller

use parking_lot::Mutex;
use scraper::Html;
use serde::Serialize;
use softnav_document::{ContentRoot, DecorationHook};
use softnav_transition::MotionGate;

use crate::estimator::{CalcSelectors, CreditsEstimator, Estimate};
use crate::reveal::{RevealPlanner, RevealTarget};

/// Behavior attached to one content root generation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Decoration {
    pub root_id: String,
    pub generation: u64,
    pub reveals: Vec<RevealTarget>,
    pub estimator: Option<CreditsEstimator>,
}

struct DecoratorState {
    current: Option<Decoration>,
    bindings: usize,
}

pub struct PageDecorator {
    gate: MotionGate,
    planner: RevealPlanner,
    calc: CalcSelectors,
    state: Mutex<DecoratorState>,
}

impl PageDecorator {
    pub fn new(gate: MotionGate) -> softnav_document::Result<Self> {
        Ok(Self {
            gate,
            planner: RevealPlanner::new()?,
            calc: CalcSelectors::new()?,
            state: Mutex::new(DecoratorState {
                current: None,
                bindings: 0,
            }),
        })
    }

    /// Decoration of the most recently decorated root
    pub fn current(&self) -> Option<Decoration> {
        self.state.lock().current.clone()
    }

    /// Number of roots decorated so far
    pub fn bind_count(&self) -> usize {
        self.state.lock().bindings
    }

    /// Forward a device change to the bound estimator, if any
    pub fn set_device(&self, device: &str) -> Option<Estimate> {
        let mut state = self.state.lock();
        let calc = state.current.as_mut()?.estimator.as_mut()?;
        Some(calc.set_device(device).clone())
    }

    /// Forward an hours change to the bound estimator, if any
    pub fn set_hours(&self, hours: &str) -> Option<Estimate> {
        let mut state = self.state.lock();
        let calc = state.current.as_mut()?.estimator.as_mut()?;
        Some(calc.set_hours(hours).clone())
    }

    fn build(&self, root: &ContentRoot) -> Decoration {
        let fragment = Html::parse_fragment(root.inner_html().as_str());
        let reduced = self.gate.prefers_reduced_motion();

        Decoration {
            root_id: root.id.clone(),
            generation: root.generation(),
            reveals: self.planner.plan(&fragment, reduced),
            estimator: CreditsEstimator::bind(&fragment, &self.calc),
        }
    }
}

impl DecorationHook for PageDecorator {
    fn decorate(&self, root: &mut ContentRoot) {
        if !root.claim_decoration() {
            tracing::trace!(root = %root.id, generation = root.generation(), "Root already decorated");
            return;
        }

        let decoration = self.build(root);
        tracing::debug!(
            root = %decoration.root_id,
            generation = decoration.generation,
            reveals = decoration.reveals.len(),
            estimator = decoration.estimator.is_some(),
            "Decorated content root"
        );

        let mut state = self.state.lock();
        state.current = Some(decoration);
        state.bindings += 1;
    }
}
