//! Credits estimator
//!
//! Estimates the verified tokens (and credits) a device contributes per day
//! when it only works while idle. One credit is 1,000 verified tokens.

use scraper::{ElementRef, Html, Selector};
use serde::Serialize;
use softnav_document::parse_selector;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DeviceProfile {
    /// `value` of the device option
    pub key: &'static str,
    pub tokens_per_second: f64,
    /// Share of raw tokens that survive verification
    pub efficiency: f64,
    pub label: &'static str,
}

pub static PROFILES: [DeviceProfile; 3] = [
    DeviceProfile {
        key: "phone",
        tokens_per_second: 4.0,
        efficiency: 0.65,
        label: "Android phone",
    },
    DeviceProfile {
        key: "laptop",
        tokens_per_second: 10.0,
        efficiency: 0.72,
        label: "Laptop CPU",
    },
    DeviceProfile {
        key: "desktop",
        tokens_per_second: 60.0,
        efficiency: 0.78,
        label: "Desktop GPU",
    },
];

const FALLBACK_PROFILE: usize = 1;

/// Look up a profile by key, falling back to the laptop
pub fn profile(key: &str) -> &'static DeviceProfile {
    PROFILES
        .iter()
        .find(|p| p.key == key)
        .unwrap_or(&PROFILES[FALLBACK_PROFILE])
}

/// The four output fields as the page displays them
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Estimate {
    pub tokens_per_day: u64,
    /// `#hoursOut`
    pub hours: String,
    /// `#tokensOut`
    pub tokens: String,
    /// `#creditsOut`
    pub credits: String,
    /// `#noteOut`
    pub note: String,
}

pub fn estimate(device: &str, hours: f64) -> Estimate {
    let profile = profile(device);

    let raw = (profile.tokens_per_second * 3600.0 * hours).floor().max(0.0);
    let net = (raw * profile.efficiency).floor().max(0.0) as u64;
    let credits = net as f64 / 1000.0;

    Estimate {
        tokens_per_day: net,
        hours: format!("{:.1}", hours),
        tokens: format!("{} tokens/day", format_thousands(net)),
        credits: format!("{:.1} credits/day", credits),
        note: format!(
            "Conservative estimate for {} contributing only while idle.",
            profile.label
        ),
    }
}

/// `103680` → `103,680`
pub fn format_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Element lookups for one `[data-credits-calc]` block
pub(crate) struct CalcSelectors {
    root: Selector,
    device: Selector,
    hours: Selector,
    outputs: [Selector; 4],
    option: Selector,
}

impl CalcSelectors {
    pub(crate) fn new() -> softnav_document::Result<Self> {
        Ok(Self {
            root: parse_selector("[data-credits-calc]")?,
            device: parse_selector("#device")?,
            hours: parse_selector("#hours")?,
            outputs: [
                parse_selector("#hoursOut")?,
                parse_selector("#creditsOut")?,
                parse_selector("#tokensOut")?,
                parse_selector("#noteOut")?,
            ],
            option: parse_selector("option")?,
        })
    }
}

/// A bound estimator: the current inputs and what the outputs show
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreditsEstimator {
    device: String,
    hours: f64,
    output: Estimate,
}

impl CreditsEstimator {
    pub fn new(device: impl Into<String>, hours: f64) -> Self {
        let device = device.into();
        let output = estimate(&device, hours);
        Self {
            device,
            hours,
            output,
        }
    }

    /// Bind the first estimator block in `fragment`. `None` unless the block
    /// and all six of its controls are present.
    pub(crate) fn bind(fragment: &Html, selectors: &CalcSelectors) -> Option<Self> {
        let root = fragment.select(&selectors.root).next()?;
        let device = root.select(&selectors.device).next()?;
        let hours = root.select(&selectors.hours).next()?;
        for output in &selectors.outputs {
            root.select(output).next()?;
        }

        Some(Self::new(
            control_value(device, &selectors.option),
            parse_hours(&control_value(hours, &selectors.option)),
        ))
    }

    pub fn device(&self) -> &str {
        &self.device
    }

    pub fn hours(&self) -> f64 {
        self.hours
    }

    pub fn output(&self) -> &Estimate {
        &self.output
    }

    /// `change` on the device selector
    pub fn set_device(&mut self, device: &str) -> &Estimate {
        self.device = device.to_string();
        self.update()
    }

    /// `input` on the hours slider
    pub fn set_hours(&mut self, value: &str) -> &Estimate {
        self.hours = parse_hours(value);
        self.update()
    }

    fn update(&mut self) -> &Estimate {
        self.output = estimate(&self.device, self.hours);
        &self.output
    }
}

/// Like `Number(value)`: blank is zero
fn parse_hours(value: &str) -> f64 {
    value.trim().parse().unwrap_or(0.0)
}

/// Current value of a form control as the page would read it
fn control_value(el: ElementRef<'_>, option: &Selector) -> String {
    let value = el.value();

    if value.name() == "select" {
        let options: Vec<_> = el.select(option).collect();
        let chosen = options
            .iter()
            .find(|o| o.value().attr("selected").is_some())
            .or_else(|| options.first());
        return chosen
            .map(|o| match o.value().attr("value") {
                Some(v) => v.to_string(),
                None => o.text().collect::<String>().trim().to_string(),
            })
            .unwrap_or_default();
    }

    if let Some(v) = value.attr("value") {
        return v.to_string();
    }

    // A range input with no value sits halfway between its bounds
    if value.attr("type") == Some("range") {
        let min = value.attr("min").map(parse_hours).unwrap_or(0.0);
        let max = value.attr("max").map(parse_hours).unwrap_or(100.0);
        return ((min + max) / 2.0).to_string();
    }

    String::new()
}
