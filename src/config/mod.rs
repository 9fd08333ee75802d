use crate::error::ConfigError;
use clap::{Arg, ArgAction, Command};
use ringlog::Level;
use std::ffi::OsString;
use std::str::FromStr;
use std::time::Duration;

mod oltp;

pub use oltp::*;

/// Environment variable holding the MySQL connection string.
pub const DATABASE_URL: &str = "DATABASE_URL";

/// Immutable run configuration, fixed at startup.
#[derive(Clone, Debug)]
pub struct Config {
    general: General,
    debug: Debug,
    oltp: Oltp,
}

#[derive(Clone, Debug)]
pub struct General {
    seed: Option<u64>,
    interval: u64,
}

impl General {
    /// Master seed for the per-worker PRNGs, if one was provided.
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Stats reporting interval. `None` disables periodic reporting.
    pub fn interval(&self) -> Option<Duration> {
        if self.interval == 0 {
            None
        } else {
            Some(Duration::from_secs(self.interval))
        }
    }
}

#[derive(Clone, Debug)]
pub struct Debug {
    log_level: Level,
}

impl Debug {
    pub fn log_level(&self) -> Level {
        self.log_level
    }

    pub fn log_queue_depth(&self) -> usize {
        4096
    }

    pub fn log_single_message_size(&self) -> usize {
        1024
    }
}

fn command() -> Command {
    Command::new(env!("CARGO_PKG_NAME"))
        .version(env!("CARGO_PKG_VERSION"))
        .long_about(
            "A load generator which exercises the read or write path of a MySQL \
            database using a pool of concurrent workers. The connection string is \
            read from the DATABASE_URL environment variable.",
        )
        .arg(
            Arg::new("num_threads")
                .long("num_threads")
                .help("number of concurrent readers/writers")
                .value_parser(clap::value_parser!(i64))
                .action(ArgAction::Set)
                .default_value("10"),
        )
        .arg(
            Arg::new("mode")
                .long("mode")
                .help("read/write")
                .action(ArgAction::Set)
                .default_value("read"),
        )
        .arg(
            Arg::new("seed")
                .long("seed")
                .help("seed for the worker PRNGs, random if not provided")
                .value_parser(clap::value_parser!(u64))
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("write-passes")
                .long("write-passes")
                .help("insert passes per writer, 0 to run until stopped")
                .value_parser(clap::value_parser!(u64))
                .action(ArgAction::Set)
                .default_value("1"),
        )
        .arg(
            Arg::new("read-interval-ms")
                .long("read-interval-ms")
                .help("pause between selects in milliseconds")
                .value_parser(clap::value_parser!(u64))
                .action(ArgAction::Set)
                .default_value("10"),
        )
        .arg(
            Arg::new("interval")
                .long("interval")
                .help("stats reporting interval in seconds, 0 disables")
                .value_parser(clap::value_parser!(u64))
                .action(ArgAction::Set)
                .default_value("0"),
        )
        .arg(
            Arg::new("log-level")
                .long("log-level")
                .help("debug log level")
                .action(ArgAction::Set)
                .default_value("info"),
        )
}

impl Config {
    /// Builds the config from command line arguments (including the binary
    /// name) and the value of the `DATABASE_URL` environment variable.
    pub fn new<I, T>(args: I, database_url: Option<OsString>) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = command().try_get_matches_from(args)?;

        // defaults are always present, so these lookups only miss on a
        // programming error in `command()`
        let mode = matches
            .get_one::<String>("mode")
            .map(String::as_str)
            .unwrap_or("read")
            .parse::<Mode>()?;

        let threads = matches.get_one::<i64>("num_threads").copied().unwrap_or(10);
        if threads < 1 {
            return Err(ConfigError::InvalidThreads(threads));
        }

        let log_level = matches
            .get_one::<String>("log-level")
            .map(String::as_str)
            .unwrap_or("info");
        let log_level = Level::from_str(log_level).map_err(|_| ConfigError::InvalidValue {
            name: "log-level",
            value: log_level.to_string(),
        })?;

        let database_url = database_url
            .ok_or(ConfigError::MissingDatabaseUrl)?
            .into_string()
            .map_err(|value| ConfigError::InvalidValue {
                name: DATABASE_URL,
                value: format!("{} (not valid UTF-8)", value.to_string_lossy()),
            })?;

        Ok(Self {
            general: General {
                seed: matches.get_one::<u64>("seed").copied(),
                interval: matches.get_one::<u64>("interval").copied().unwrap_or(0),
            },
            debug: Debug { log_level },
            oltp: Oltp::new(
                threads as usize,
                mode,
                database_url,
                matches.get_one::<u64>("write-passes").copied().unwrap_or(1),
                matches
                    .get_one::<u64>("read-interval-ms")
                    .copied()
                    .unwrap_or(10),
            ),
        })
    }

    pub fn general(&self) -> &General {
        &self.general
    }

    pub fn debug(&self) -> &Debug {
        &self.debug
    }

    pub fn oltp(&self) -> &Oltp {
        &self.oltp
    }
}
