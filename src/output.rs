use crate::metrics::*;
use crate::RUNNING;
use std::sync::atomic::Ordering;
use std::time::{Duration, Instant};

/// Writes a timestamped line to stdout.
macro_rules! output {
    () => {
        output!("")
    };
    ($($arg:tt)*) => {{
        let now = chrono::Utc::now();
        println!(
            "{}: {}",
            now.to_rfc3339_opts(chrono::SecondsFormat::Millis, false),
            format_args!($($arg)*)
        );
    }};
}

/// Point-in-time copy of the worker counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Snapshot {
    pub connect: u64,
    pub connect_ex: u64,
    pub select_ok: u64,
    pub select_ex: u64,
    pub user_ok: u64,
    pub user_ex: u64,
    pub team_ok: u64,
    pub team_ex: u64,
    pub team_minted: u64,
    pub team_reused: u64,
}

impl Snapshot {
    pub fn now() -> Self {
        Self {
            connect: OLTP_CONNECT.value(),
            connect_ex: OLTP_CONNECT_EX.value(),
            select_ok: OLTP_SELECT_OK.value(),
            select_ex: OLTP_SELECT_EX.value(),
            user_ok: OLTP_INSERT_USER_OK.value(),
            user_ex: OLTP_INSERT_USER_EX.value(),
            team_ok: OLTP_INSERT_TEAM_OK.value(),
            team_ex: OLTP_INSERT_TEAM_EX.value(),
            team_minted: OLTP_TEAM_MINTED.value(),
            team_reused: OLTP_TEAM_REUSED.value(),
        }
    }

    /// Counts accumulated since `previous`.
    pub fn delta(&self, previous: &Snapshot) -> Snapshot {
        Snapshot {
            connect: self.connect.wrapping_sub(previous.connect),
            connect_ex: self.connect_ex.wrapping_sub(previous.connect_ex),
            select_ok: self.select_ok.wrapping_sub(previous.select_ok),
            select_ex: self.select_ex.wrapping_sub(previous.select_ex),
            user_ok: self.user_ok.wrapping_sub(previous.user_ok),
            user_ex: self.user_ex.wrapping_sub(previous.user_ex),
            team_ok: self.team_ok.wrapping_sub(previous.team_ok),
            team_ex: self.team_ex.wrapping_sub(previous.team_ex),
            team_minted: self.team_minted.wrapping_sub(previous.team_minted),
            team_reused: self.team_reused.wrapping_sub(previous.team_reused),
        }
    }
}

fn rate(count: u64, elapsed: Duration) -> f64 {
    let secs = elapsed.as_secs_f64();
    if secs > 0.0 {
        count as f64 / secs
    } else {
        0.0
    }
}

fn report(delta: &Snapshot, elapsed: Duration) {
    output!("-----");
    output!(
        "Workers: {} active, Connect: {} Exception: {}",
        OLTP_WORKERS_ACTIVE.value(),
        delta.connect,
        delta.connect_ex
    );
    output!(
        "Select: Ok: {} Exception: {} Rate: {:.2}/s",
        delta.select_ok,
        delta.select_ex,
        rate(delta.select_ok, elapsed)
    );
    output!(
        "Insert User: Ok: {} Exception: {} Team: Ok: {} Exception: {} Rate: {:.2}/s",
        delta.user_ok,
        delta.user_ex,
        delta.team_ok,
        delta.team_ex,
        rate(delta.user_ok, elapsed)
    );
    output!(
        "Team: Minted: {} Reused: {}",
        delta.team_minted,
        delta.team_reused
    );
}

/// Periodically prints per-interval counts until shutdown.
pub async fn log(interval: Duration) {
    let mut previous = Snapshot::now();
    let mut last = Instant::now();

    while RUNNING.load(Ordering::Relaxed) {
        tokio::time::sleep(interval).await;

        let current = Snapshot::now();
        let now = Instant::now();
        report(&current.delta(&previous), now - last);

        previous = current;
        last = now;
    }
}

/// Prints totals for the whole run.
pub fn summary(start: Instant) {
    output!("=====");
    output!("Totals after {:.1}s", start.elapsed().as_secs_f64());
    report(&Snapshot::now(), start.elapsed());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delta_subtracts_fields() {
        let before = Snapshot {
            connect: 2,
            select_ok: 10,
            user_ok: 1,
            ..Default::default()
        };
        let after = Snapshot {
            connect: 3,
            select_ok: 25,
            select_ex: 1,
            user_ok: 1,
            ..Default::default()
        };
        let delta = after.delta(&before);
        assert_eq!(delta.connect, 1);
        assert_eq!(delta.select_ok, 15);
        assert_eq!(delta.select_ex, 1);
        assert_eq!(delta.user_ok, 0);
    }

    #[test]
    fn rate_handles_zero_elapsed() {
        assert_eq!(rate(10, Duration::ZERO), 0.0);
        assert_eq!(rate(10, Duration::from_secs(2)), 5.0);
    }
}
