// Script replay

use anyhow::{Context, Result};
use chrono::Utc;
use softnav_core::{HttpPageSource, Outcome, PageSource, Site, StaticPageSource};
use url::Url;

use crate::cli::Cli;
use crate::report::{describe, describe_estimate, Report, StepReport};
use crate::script::Step;

pub async fn run(cli: &Cli) -> Result<Report> {
    let config = cli.load_config()?;
    let start = cli.start_url()?;

    match &cli.site_dir {
        Some(dir) => {
            let source = StaticPageSource::from_dir(dir, &config.content_selector)
                .with_context(|| format!("Failed to read site from {}", dir.display()))?;
            let site = Site::open(config, source, start.clone()).await?;

            let mut report = replay(&site, &cli.steps, &start).await?;
            report.fetches = Some(site.controller().source().fetch_count());
            Ok(report)
        }
        None => {
            let source = HttpPageSource::new(config.fetch_settings())?;
            let site = Site::open(config, source, start.clone())
                .await
                .with_context(|| format!("Failed to open {}", start))?;

            replay(&site, &cli.steps, &start).await
        }
    }
}

pub async fn replay<S: PageSource>(site: &Site<S>, steps: &[Step], start: &Url) -> Result<Report> {
    let mut reports = Vec::with_capacity(steps.len());

    for step in steps {
        let (outcome, detail) = match step {
            Step::Click(href) => describe(&site.click(href).await?),
            Step::Back => traversal(site.back().await?),
            Step::Forward => traversal(site.forward().await?),
            Step::Hash(id) => match site.jump_to_hash(id).await? {
                Some(outcome) => describe(&outcome),
                None => ("unchanged", None),
            },
            Step::Device(key) => {
                describe_estimate(site.controller().decorator().set_device(key).as_ref())
            }
            Step::Hours(value) => {
                describe_estimate(site.controller().decorator().set_hours(value).as_ref())
            }
            Step::Menu => menu_state(site.toggle_menu()),
            Step::Key(key) => menu_state(site.press_key(key)),
            Step::Outside => menu_state(site.click_outside()),
        };

        tracing::debug!(step = %step, outcome, "Step replayed");

        reports.push(StepReport {
            step: step.to_string(),
            outcome,
            detail,
            url: site.location().to_string(),
        });
    }

    Ok(Report {
        start: start.to_string(),
        generated_at: Utc::now(),
        steps: reports,
        fetches: None,
        final_state: site.snapshot(),
    })
}

fn traversal(outcome: Option<Outcome>) -> (&'static str, Option<String>) {
    match outcome {
        Some(outcome) => describe(&outcome),
        None => ("no_entry", None),
    }
}

fn menu_state(open: bool) -> (&'static str, Option<String>) {
    if open {
        ("menu_open", None)
    } else {
        ("menu_closed", None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::path::PathBuf;

    const INDEX: &str = r#"<html><head><title>Home</title></head><body>
<nav class="nav"><a href="/index.html">Home</a><a href="/pricing.html">Pricing</a></nav>
<main id="main" class="page"><section id="faq">FAQ</section></main></body></html>"#;

    const PRICING: &str = r#"<html><head><title>Pricing</title></head><body>
<main id="main" class="page"><div class="calc" data-credits-calc>
<select id="device"><option value="laptop">Laptop</option><option value="phone">Phone</option></select>
<input id="hours" type="range" value="4">
<span id="hoursOut"></span><span id="creditsOut"></span><span id="tokensOut"></span><span id="noteOut"></span>
</div></main></body></html>"#;

    fn site_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("softnav-cli-{}-{}", name, std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("index.html"), INDEX).unwrap();
        std::fs::write(dir.join("pricing.html"), PRICING).unwrap();
        dir
    }

    #[tokio::test(start_paused = true)]
    async fn test_replay_script() {
        let dir = site_dir("replay");
        let cli = Cli::try_parse_from([
            "softnav".to_string(),
            "/".to_string(),
            "click:/pricing.html".to_string(),
            "device:phone".to_string(),
            "hours:2".to_string(),
            "back".to_string(),
            "hash:faq".to_string(),
            "forward".to_string(),
            "--site-dir".to_string(),
            dir.display().to_string(),
        ])
        .unwrap();

        let report = run(&cli).await.unwrap();
        std::fs::remove_dir_all(&dir).unwrap();

        let outcomes: Vec<_> = report.steps.iter().map(|s| s.outcome).collect();
        assert_eq!(
            outcomes,
            vec!["swapped", "estimated", "estimated", "swapped", "synced", "no_entry"]
        );
        assert_eq!(
            report.steps[2].detail.as_deref(),
            Some("18,720 tokens/day, 18.7 credits/day")
        );
        assert_eq!(report.steps[4].url, "http://localhost/#faq");
        assert_eq!(report.fetches, Some(2));
        assert_eq!(report.final_state.title, "Home");

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["start"], "http://localhost/");
        assert_eq!(json["steps"][0]["step"], "click:/pricing.html");
    }

    #[tokio::test(start_paused = true)]
    async fn test_estimator_steps_without_calc() {
        let dir = site_dir("nocalc");
        let cli = Cli::try_parse_from([
            "softnav".to_string(),
            "/index.html".to_string(),
            "hours:3".to_string(),
            "click:mailto:team@site.test".to_string(),
            "--site-dir".to_string(),
            dir.display().to_string(),
        ])
        .unwrap();

        let report = run(&cli).await.unwrap();
        std::fs::remove_dir_all(&dir).unwrap();

        assert_eq!(report.steps[0].outcome, "no_estimator");
        assert_eq!(report.steps[1].outcome, "ignored");
        assert_eq!(report.fetches, Some(0));
    }

    #[tokio::test(start_paused = true)]
    async fn test_menu_steps() {
        let dir = site_dir("menu");
        let cli = Cli::try_parse_from([
            "softnav".to_string(),
            "/".to_string(),
            "menu".to_string(),
            "key:Enter".to_string(),
            "key:Escape".to_string(),
            "menu".to_string(),
            "outside".to_string(),
            "menu".to_string(),
            "--site-dir".to_string(),
            dir.display().to_string(),
        ])
        .unwrap();

        let report = run(&cli).await.unwrap();
        std::fs::remove_dir_all(&dir).unwrap();

        let outcomes: Vec<_> = report.steps.iter().map(|s| s.outcome).collect();
        assert_eq!(
            outcomes,
            vec!["menu_open", "menu_open", "menu_closed", "menu_open", "menu_closed", "menu_open"]
        );
        assert_eq!(report.final_state.menu_expanded, "true");
        assert_eq!(report.final_state.body_class, Some("nav-open"));
    }
}
