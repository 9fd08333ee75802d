use super::*;

/// Which kind of worker the launcher spawns.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    /// Point selects against `user` (select workers).
    Read,
    /// User + team inserts (insert workers).
    Write,
}

impl FromStr for Mode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "read" => Ok(Self::Read),
            "write" => Ok(Self::Write),
            other => Err(ConfigError::InvalidMode(other.to_string())),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Oltp {
    threads: usize,
    mode: Mode,
    database_url: String,
    write_passes: u64,
    read_interval: u64,
}

impl Oltp {
    pub(super) fn new(
        threads: usize,
        mode: Mode,
        database_url: String,
        write_passes: u64,
        read_interval: u64,
    ) -> Self {
        Self {
            threads,
            mode,
            database_url,
            write_passes,
            read_interval,
        }
    }

    /// Number of concurrent workers.
    pub fn threads(&self) -> usize {
        self.threads
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    /// Insert passes per write worker. Zero means keep going until shutdown.
    pub fn write_passes(&self) -> u64 {
        self.write_passes
    }

    /// Pause between consecutive point selects.
    pub fn read_interval(&self) -> Duration {
        Duration::from_millis(self.read_interval)
    }
}
