// Session configuration
//
// Loaded in order of precedence:
// 1. Environment variables (highest priority)
// 2. Config file (TOML, optional)
// 3. Built-in defaults (lowest priority)

use serde::{Deserialize, Serialize};
use softnav_document::{parse_selector, DocumentSettings};
use softnav_fetch::FetchSettings;
use softnav_navigation::NavigationSettings;
use softnav_transition::{MotionGate, TransitionSequencer};
use std::path::Path;
use std::time::Duration;

use crate::error::CoreError;
use crate::Result;

pub const ENV_REDUCED_MOTION: &str = "SOFTNAV_REDUCED_MOTION";
pub const ENV_ANIMATION_BUDGET_MS: &str = "SOFTNAV_ANIMATION_BUDGET_MS";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Selector of the content root, live and fetched
    pub content_selector: String,
    /// In-page navigational links
    pub nav_link_selector: String,
    /// Nav links with this class never get the active indicator
    pub button_class: String,
    /// Class list the root is reset to after a swap
    pub baseline_class: String,
    /// Document extension eligible for soft navigation
    pub page_extension: String,
    pub animation_budget_ms: u64,
    /// Delay standing in for the next paint
    pub frame_interval_ms: u64,
    /// `X-Requested-With` header value
    pub requested_with: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    /// Initial reduced-motion preference
    pub reduced_motion: bool,
}

impl Default for Config {
    fn default() -> Self {
        let fetch = FetchSettings::default();
        Self {
            content_selector: fetch.content_selector,
            nav_link_selector: ".nav a".to_string(),
            button_class: "btn".to_string(),
            baseline_class: "page".to_string(),
            page_extension: ".html".to_string(),
            animation_budget_ms: 260,
            frame_interval_ms: 16,
            requested_with: fetch.requested_with,
            request_timeout_secs: fetch.timeout.as_secs(),
            user_agent: fetch.user_agent,
            reduced_motion: false,
        }
    }
}

impl Config {
    /// Load a TOML file. Missing keys keep their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config = Self::from_toml(&contents)?;

        tracing::debug!(path = %path.display(), "Loaded config file");

        Ok(config)
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Apply environment overrides
    pub fn with_env(mut self) -> Self {
        self.apply_overrides(|key| std::env::var(key).ok());
        self
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(value) = lookup(ENV_REDUCED_MOTION) {
            match value.trim().to_lowercase().as_str() {
                "1" | "true" | "yes" => self.reduced_motion = true,
                "0" | "false" | "no" => self.reduced_motion = false,
                other => tracing::warn!(value = other, "Ignoring {}", ENV_REDUCED_MOTION),
            }
        }

        if let Some(value) = lookup(ENV_ANIMATION_BUDGET_MS) {
            match value.trim().parse() {
                Ok(ms) => self.animation_budget_ms = ms,
                Err(_) => tracing::warn!(value = %value, "Ignoring {}", ENV_ANIMATION_BUDGET_MS),
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        parse_selector(&self.content_selector)?;
        parse_selector(&self.nav_link_selector)?;

        if !self.page_extension.starts_with('.') || self.page_extension.len() < 2 {
            return Err(CoreError::Config(format!(
                "page_extension must look like \".html\", got {:?}",
                self.page_extension
            )));
        }
        if self.baseline_class.trim().is_empty() {
            return Err(CoreError::Config("baseline_class is empty".to_string()));
        }
        if self.frame_interval_ms > self.animation_budget_ms {
            return Err(CoreError::Config(format!(
                "frame_interval_ms ({}) exceeds animation_budget_ms ({})",
                self.frame_interval_ms, self.animation_budget_ms
            )));
        }
        Ok(())
    }

    pub fn animation_budget(&self) -> Duration {
        Duration::from_millis(self.animation_budget_ms)
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms)
    }

    pub fn document_settings(&self) -> DocumentSettings {
        DocumentSettings {
            content_selector: self.content_selector.clone(),
            nav_link_selector: self.nav_link_selector.clone(),
        }
    }

    pub fn fetch_settings(&self) -> FetchSettings {
        FetchSettings {
            content_selector: self.content_selector.clone(),
            requested_with: self.requested_with.clone(),
            timeout: Duration::from_secs(self.request_timeout_secs),
            user_agent: self.user_agent.clone(),
        }
    }

    pub fn navigation_settings(&self) -> NavigationSettings {
        NavigationSettings {
            baseline_class: self.baseline_class.clone(),
            button_class: self.button_class.clone(),
            page_extension: self.page_extension.clone(),
        }
    }

    pub fn sequencer(&self, gate: MotionGate) -> TransitionSequencer {
        TransitionSequencer::with_timing(gate, self.animation_budget(), self.frame_interval())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.content_selector, "#main");
        assert_eq!(config.nav_link_selector, ".nav a");
        assert_eq!(config.animation_budget(), Duration::from_millis(260));
        assert_eq!(config.frame_interval(), Duration::from_millis(16));
        assert_eq!(config.requested_with, "pjax");
        assert_eq!(config.request_timeout_secs, 12);
        assert!(config.user_agent.starts_with("softnav/"));
        assert!(!config.reduced_motion);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = Config::from_toml(
            r#"
content_selector = "main.content"
animation_budget_ms = 400
reduced_motion = true
"#,
        )
        .unwrap();

        assert_eq!(config.content_selector, "main.content");
        assert_eq!(config.animation_budget_ms, 400);
        assert!(config.reduced_motion);
        assert_eq!(config.page_extension, ".html");
        assert_eq!(config.document_settings().content_selector, "main.content");
        assert_eq!(config.fetch_settings().content_selector, "main.content");
    }

    #[test]
    fn test_toml_round_trip() {
        let config = Config {
            button_class: "button".to_string(),
            ..Config::default()
        };
        let text = config.to_toml().unwrap();
        assert_eq!(Config::from_toml(&text).unwrap(), config);
    }

    #[test]
    fn test_bad_file_is_an_error() {
        assert!(matches!(
            Config::from_toml("animation_budget_ms = \"slow\""),
            Err(CoreError::ConfigFile(_))
        ));
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            (ENV_REDUCED_MOTION, "TRUE"),
            (ENV_ANIMATION_BUDGET_MS, "120"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.apply_overrides(|key| env.get(key).map(|v| v.to_string()));
        assert!(config.reduced_motion);
        assert_eq!(config.animation_budget_ms, 120);

        config.apply_overrides(|key| match key {
            ENV_REDUCED_MOTION => Some("maybe".to_string()),
            ENV_ANIMATION_BUDGET_MS => Some("fast".to_string()),
            _ => None,
        });
        assert!(config.reduced_motion);
        assert_eq!(config.animation_budget_ms, 120);
    }

    #[test]
    fn test_validate() {
        let bad_selector = Config {
            content_selector: "##".to_string(),
            ..Config::default()
        };
        assert!(matches!(bad_selector.validate(), Err(CoreError::Document(_))));

        let bad_extension = Config {
            page_extension: "html".to_string(),
            ..Config::default()
        };
        assert!(matches!(bad_extension.validate(), Err(CoreError::Config(_))));

        let bad_timing = Config {
            animation_budget_ms: 10,
            ..Config::default()
        };
        assert!(matches!(bad_timing.validate(), Err(CoreError::Config(_))));
    }
}
