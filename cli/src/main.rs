mod args;
mod notation;
mod settings;

use crate::args::build_cli;
use crate::notation::{format_period, parse_period};
use crate::settings::Settings;
use anyhow::{bail, Result};
use clap::ArgMatches;
use itertools::Itertools;
use period_lib::{Period, Sequence};

/// Parse all values of the given argument as periods
fn periods(
    args: &ArgMatches,
    id: &str,
    settings: &Settings,
) -> Result<Sequence> {
    args.get_many::<String>(id)
        .into_iter()
        .flatten()
        .map(|text| parse_period(text, settings.notation))
        .collect()
}

/// Execute one command and return the resulting periods
fn run(
    command: &str,
    args: &ArgMatches,
    settings: &Settings,
) -> Result<Vec<Period>> {
    let seq = periods(args, "periods", settings)?;
    log::debug!("{command} on {} periods", seq.len());

    let result = match command {
        "length" => seq.length().into_iter().collect(),
        "gaps" => seq.gaps().to_vec(),
        "intersections" => seq.intersections().to_vec(),
        "unions" => seq.unions().to_vec(),
        "subtract" => {
            let others = periods(args, "others", settings)?;
            seq.subtract(&others).to_vec()
        }
        "diff" => match seq.as_slice() {
            [a, b] => a.diff(b)?,
            _ => bail!("diff expects exactly two periods"),
        },
        other => bail!("Unknown command {other}"),
    };
    Ok(result)
}

fn main() -> Result<()> {
    let matches = build_cli().get_matches();
    let Some((command, args)) = matches.subcommand() else {
        bail!("No command given");
    };
    let settings = Settings::new(args);

    env_logger::Builder::new()
        .filter_level(settings.log_level())
        .parse_default_env()
        .init();

    let result = run(command, args, &settings)?;
    println!(
        "{}",
        result
            .iter()
            .map(|p| format_period(p, settings.notation))
            .join("\n")
    );
    Ok(())
}
