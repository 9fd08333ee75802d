/*
 * Metrics definitions for the oltp workers
 */

use metriken::metric;
use metriken::Counter;
use metriken::Gauge;
use metriken::LazyCounter;
use metriken::LazyGauge;

#[metric(name = "oltp/connect/total")]
pub static OLTP_CONNECT: LazyCounter = LazyCounter::new(Counter::default);

#[metric(name = "oltp/connect/ok")]
pub static OLTP_CONNECT_OK: LazyCounter = LazyCounter::new(Counter::default);

#[metric(name = "oltp/connect/exception")]
pub static OLTP_CONNECT_EX: LazyCounter = LazyCounter::new(Counter::default);

#[metric(name = "oltp/select/total")]
pub static OLTP_SELECT: LazyCounter = LazyCounter::new(Counter::default);

#[metric(name = "oltp/select/ok")]
pub static OLTP_SELECT_OK: LazyCounter = LazyCounter::new(Counter::default);

#[metric(name = "oltp/select/exception")]
pub static OLTP_SELECT_EX: LazyCounter = LazyCounter::new(Counter::default);

#[metric(name = "oltp/insert/user/ok")]
pub static OLTP_INSERT_USER_OK: LazyCounter = LazyCounter::new(Counter::default);

#[metric(name = "oltp/insert/user/exception")]
pub static OLTP_INSERT_USER_EX: LazyCounter = LazyCounter::new(Counter::default);

#[metric(name = "oltp/insert/team/ok")]
pub static OLTP_INSERT_TEAM_OK: LazyCounter = LazyCounter::new(Counter::default);

#[metric(name = "oltp/insert/team/exception")]
pub static OLTP_INSERT_TEAM_EX: LazyCounter = LazyCounter::new(Counter::default);

#[metric(name = "oltp/team/reused")]
pub static OLTP_TEAM_REUSED: LazyCounter = LazyCounter::new(Counter::default);

#[metric(name = "oltp/team/minted")]
pub static OLTP_TEAM_MINTED: LazyCounter = LazyCounter::new(Counter::default);

#[metric(name = "oltp/team/lookup/exception")]
pub static OLTP_TEAM_LOOKUP_EX: LazyCounter = LazyCounter::new(Counter::default);

#[metric(name = "oltp/workers/active")]
pub static OLTP_WORKERS_ACTIVE: LazyGauge = LazyGauge::new(Gauge::default);
