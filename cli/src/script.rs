// Navigation script steps
//
// One step per argument:
//   click:<href>    primary click on a link
//   back, forward   history traversal
//   hash:<id>       native jump to an in-page anchor
//   device:<key>    change the estimator's device
//   hours:<n>       change the estimator's hours
//   menu            click the nav menu toggle
//   key:<name>      key press (Escape closes the menu)
//   outside         click outside the nav menu

use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    Click(String),
    Back,
    Forward,
    Hash(String),
    Device(String),
    Hours(String),
    Menu,
    Key(String),
    Outside,
}

impl FromStr for Step {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match s {
            "back" => return Ok(Step::Back),
            "forward" => return Ok(Step::Forward),
            "menu" => return Ok(Step::Menu),
            "outside" => return Ok(Step::Outside),
            _ => {}
        }

        let Some((kind, arg)) = s.split_once(':') else {
            return Err(format!("unknown step {:?}", s));
        };
        if arg.is_empty() {
            return Err(format!("step {:?} needs an argument", kind));
        }

        match kind {
            "click" => Ok(Step::Click(arg.to_string())),
            "hash" => Ok(Step::Hash(arg.trim_start_matches('#').to_string())),
            "device" => Ok(Step::Device(arg.to_string())),
            "key" => Ok(Step::Key(arg.to_string())),
            "hours" => {
                arg.parse::<f64>()
                    .map_err(|_| format!("hours must be a number, got {:?}", arg))?;
                Ok(Step::Hours(arg.to_string()))
            }
            other => Err(format!("unknown step kind {:?}", other)),
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Click(href) => write!(f, "click:{}", href),
            Step::Back => write!(f, "back"),
            Step::Forward => write!(f, "forward"),
            Step::Hash(id) => write!(f, "hash:{}", id),
            Step::Device(key) => write!(f, "device:{}", key),
            Step::Hours(value) => write!(f, "hours:{}", value),
            Step::Menu => write!(f, "menu"),
            Step::Key(key) => write!(f, "key:{}", key),
            Step::Outside => write!(f, "outside"),
        }
    }
}
