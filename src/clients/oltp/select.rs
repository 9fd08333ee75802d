use super::*;
use crate::workload::PointSelect;
use ringlog::trace;
use std::sync::atomic::Ordering;
use std::time::Duration;
use tokio::time::sleep;

/// Connects, then issues point selects within this worker's key partition
/// until stopped. A failed select ends the worker; there is no reconnect.
pub async fn run<C: Connector>(
    connector: &C,
    index: usize,
    interval: Duration,
    rng: &mut Xoshiro512PlusPlus,
    running: &AtomicBool,
) -> Result<(), WorkerError> {
    let store = connect(connector).await?;

    while running.load(Ordering::Relaxed) {
        let request = PointSelect::generate(rng, index);
        trace!("selecting id={}", request.id);

        OLTP_SELECT.increment();
        match store.select_email(request.id).await {
            Ok(_) => {
                OLTP_SELECT_OK.increment();
            }
            Err(e) => {
                OLTP_SELECT_EX.increment();
                return Err(e.into());
            }
        }

        sleep(interval).await;
    }

    Ok(())
}
