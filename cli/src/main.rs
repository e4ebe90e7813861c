// softnav - replay a navigation script and print the resulting document state
//
// Examples:
//   softnav https://example.com/ click:/docs/guide.html back
//   softnav --site-dir ./public / click:/pricing.html hours:6 --pretty

mod cli;
mod report;
mod run;
mod script;

use anyhow::Result;
use clap::Parser;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    softnav_core::init_logging();

    let report = run::run(&cli).await?;

    let json = if cli.pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };
    println!("{}", json);

    Ok(())
}
