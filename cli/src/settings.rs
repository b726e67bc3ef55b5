use clap::{arg, Arg, ArgMatches};
use log::LevelFilter;

/// Which notation is used to read and print periods
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NotationKind {
    /// `[start, end)`
    Iso80000,

    /// `[start, end[`
    Bourbaki,
}

pub struct Settings {
    pub notation: NotationKind,

    // Number of -v on the command line
    pub verbosity: u8,
}

impl Settings {
    /// Return the command line switches shared by all commands
    pub fn cli() -> impl IntoIterator<Item = Arg> {
        [
            arg!(--bourbaki "Read and print periods as [start, end[")
                .global(true),
            arg!(-v --verbose... "Show more details, repeat for traces")
                .global(true),
        ]
    }

    /// Create the settings from the arguments of the selected command, where
    /// the global switches are always available.
    pub fn new(args: &ArgMatches) -> Self {
        Settings {
            notation: if args.get_flag("bourbaki") {
                NotationKind::Bourbaki
            } else {
                NotationKind::Iso80000
            },
            verbosity: args.get_count("verbose"),
        }
    }

    /// The log level for env_logger, unless RUST_LOG overrides it.
    pub fn log_level(&self) -> LevelFilter {
        match self.verbosity {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}
