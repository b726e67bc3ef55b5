use crate::settings::Settings;
use clap::{Arg, Command};

fn periods_arg() -> Arg {
    Arg::new("periods")
        .value_name("PERIOD")
        .help("Periods like [2024-01-01,2024-02-01)")
        .required(true)
        .num_args(1..)
}

pub(crate) fn build_cli() -> Command {
    Command::new("periods")
        .version("0.1")
        .about("Compute with periods of time")
        .subcommand_required(true)
        .flatten_help(true) // show help for all subcommands
        .arg_required_else_help(true) // show full help if nothing given
        .args(Settings::cli())
        .subcommand(
            Command::new("length")
                .about("Show the smallest period containing all periods")
                .arg(periods_arg()),
        )
        .subcommand(
            Command::new("gaps")
                .about("Show the timestamps not covered by any period")
                .arg(periods_arg()),
        )
        .subcommand(
            Command::new("intersections")
                .about("Show where two or more periods overlap")
                .arg(periods_arg()),
        )
        .subcommand(
            Command::new("unions")
                .about("Merge overlapping and abutting periods")
                .arg(periods_arg()),
        )
        .subcommand(
            Command::new("subtract")
                .about("Remove the periods given after -- from the others")
                .arg(periods_arg())
                .arg(
                    Arg::new("others")
                        .value_name("PERIOD")
                        .help("Periods to remove")
                        .num_args(0..)
                        .last(true),
                ),
        )
        .subcommand(
            Command::new("diff")
                .about("Show the timestamps in exactly one of two periods")
                .arg(periods_arg().num_args(2)),
        )
}
