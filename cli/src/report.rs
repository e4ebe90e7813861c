// JSON summary of a replayed script

use chrono::{DateTime, Utc};
use serde::Serialize;
use softnav_core::{Estimate, Fallback, Outcome, PageSnapshot};

#[derive(Debug, Serialize)]
pub struct StepReport {
    pub step: String,
    pub outcome: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    /// Location after the step
    pub url: String,
}

#[derive(Debug, Serialize)]
pub struct Report {
    pub start: String,
    pub generated_at: DateTime<Utc>,
    pub steps: Vec<StepReport>,
    /// Soft-navigation fetches, when the source counts them
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fetches: Option<usize>,
    pub final_state: PageSnapshot,
}

/// Short name and optional detail for a navigation outcome
pub fn describe(outcome: &Outcome) -> (&'static str, Option<String>) {
    match outcome {
        Outcome::Ignored(reason) => ("ignored", Some(format!("{:?}", reason))),
        Outcome::Dropped => ("dropped", None),
        Outcome::Refreshed => ("refreshed", None),
        Outcome::Anchored => ("anchored", None),
        Outcome::Swapped => ("swapped", None),
        Outcome::FellBack(Fallback::MissingContentRoot) => {
            ("fell_back", Some("no content root".to_string()))
        }
        Outcome::FellBack(Fallback::Fetch(err)) => ("fell_back", Some(err.to_string())),
        Outcome::Synced => ("synced", None),
    }
}

/// Outcome of a step on the bound estimator
pub fn describe_estimate(estimate: Option<&Estimate>) -> (&'static str, Option<String>) {
    match estimate {
        Some(out) => ("estimated", Some(format!("{}, {}", out.tokens, out.credits))),
        None => ("no_estimator", None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use softnav_core::{FetchError, NativeReason};

    #[test]
    fn test_describe_outcomes() {
        assert_eq!(describe(&Outcome::Swapped), ("swapped", None));
        assert_eq!(
            describe(&Outcome::Ignored(NativeReason::CrossOrigin)),
            ("ignored", Some("CrossOrigin".to_string()))
        );
        assert_eq!(
            describe(&Outcome::FellBack(Fallback::Fetch(FetchError::Status(500)))),
            ("fell_back", Some("HTTP 500".to_string()))
        );
    }

    #[test]
    fn test_describe_estimate() {
        assert_eq!(describe_estimate(None), ("no_estimator", None));

        let out = softnav_core::Estimate {
            tokens_per_day: 18_720,
            hours: "2.0".to_string(),
            tokens: "18,720 tokens/day".to_string(),
            credits: "18.7 credits/day".to_string(),
            note: String::new(),
        };
        assert_eq!(
            describe_estimate(Some(&out)),
            ("estimated", Some("18,720 tokens/day, 18.7 credits/day".to_string()))
        );
    }
}
