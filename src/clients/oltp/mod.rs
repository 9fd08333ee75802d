//! OLTP workers which drive a MySQL database with synthetic user and team
//! rows. Each worker is an independent task with its own connection and its
//! own PRNG; workers only share the database itself.

use crate::config::{Config, Mode};
use crate::error::{ConnectionError, QueryError, WorkerError};
use crate::metrics::*;
use crate::workload::{Team, User};
use crate::RUNNING;
use async_trait::async_trait;
use rand::{RngCore, SeedableRng};
use rand_xoshiro::{Seed512, Xoshiro512PlusPlus};
use ringlog::{debug, error};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tokio::runtime::{Builder, Runtime};

mod insert;
mod mysql;
mod select;

#[cfg(test)]
mod memory;

pub use mysql::MysqlConnector;

/// The statements a worker issues against the database.
#[async_trait]
pub trait Store: Send + Sync {
    /// One randomly sampled existing team, or `None` if there are no teams.
    async fn random_team(&self) -> Result<Option<Team>, QueryError>;

    /// Inserts a user row and returns the identity the database assigned.
    async fn insert_user(&self, user: &User) -> Result<u64, QueryError>;

    async fn insert_team(&self, team: &Team, user_id: u64) -> Result<(), QueryError>;

    /// Point lookup of a user's email. A missing row is not an error.
    async fn select_email(&self, user_id: u64) -> Result<Option<String>, QueryError>;
}

/// Opens a new, liveness-checked [`Store`] for a worker.
#[async_trait]
pub trait Connector: Send + Sync {
    type Store: Store;

    async fn connect(&self) -> Result<Self::Store, ConnectionError>;
}

async fn connect<C: Connector>(connector: &C) -> Result<C::Store, ConnectionError> {
    OLTP_CONNECT.increment();
    match connector.connect().await {
        Ok(store) => {
            OLTP_CONNECT_OK.increment();
            Ok(store)
        }
        Err(e) => {
            OLTP_CONNECT_EX.increment();
            Err(e)
        }
    }
}

pub fn launch(config: &Config) -> Runtime {
    debug!("Launching oltp clients...");

    // spawn the workers on their own runtime, workers are tasks so the
    // thread count does not follow the worker count
    let client_rt = Builder::new_multi_thread()
        .enable_all()
        .worker_threads(worker_threads(config.oltp().threads()))
        .build()
        .expect("failed to initialize tokio runtime");

    // Initialize a master RNG to generate unique seeds for each task
    let mut rng = match config.general().seed() {
        Some(seed) => Xoshiro512PlusPlus::seed_from_u64(seed),
        None => Xoshiro512PlusPlus::from_entropy(),
    };

    let connector = Arc::new(MysqlConnector::new(config.oltp().database_url()));

    launch_tasks(&client_rt, config, connector, &mut rng, &RUNNING);

    client_rt
}

/// Runtime threads for `workers` tasks, capped at the available parallelism.
fn worker_threads(workers: usize) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    workers.clamp(1, cores.max(1))
}

fn launch_tasks<C: Connector + 'static>(
    runtime: &Runtime,
    config: &Config,
    connector: Arc<C>,
    rng: &mut Xoshiro512PlusPlus,
    running: &'static AtomicBool,
) {
    for index in 0..config.oltp().threads() {
        // Generate unique seed for this task
        let mut seed = [0u8; 64];
        rng.fill_bytes(&mut seed);

        match config.oltp().mode() {
            Mode::Write => output!("Launching insert loop {index}"),
            Mode::Read => output!("Launching select loop {index}"),
        }

        runtime.spawn(task(
            connector.clone(),
            config.clone(),
            index,
            Seed512(seed),
            running,
        ));
    }
}

// a single worker, which runs until it finishes, fails or is stopped
async fn task<C: Connector>(
    connector: Arc<C>,
    config: Config,
    index: usize,
    seed: Seed512,
    running: &'static AtomicBool,
) -> Result<(), WorkerError> {
    let mut rng = Xoshiro512PlusPlus::from_seed(seed);

    OLTP_WORKERS_ACTIVE.increment();

    let result = match config.oltp().mode() {
        Mode::Write => {
            insert::run(
                connector.as_ref(),
                config.oltp().write_passes(),
                &mut rng,
                running,
            )
            .await
        }
        Mode::Read => {
            select::run(
                connector.as_ref(),
                index,
                config.oltp().read_interval(),
                &mut rng,
                running,
            )
            .await
        }
    };

    OLTP_WORKERS_ACTIVE.decrement();

    match &result {
        Ok(()) => debug!("worker {index} finished"),
        Err(e) => error!("worker {index} stopped: {e}"),
    }

    result
}
