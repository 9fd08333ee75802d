use backtrace::Backtrace;
use core::sync::atomic::{AtomicBool, Ordering};
use ringlog::*;
use std::time::{Duration, Instant};
use tokio::runtime::Builder;
use tokio::time::sleep;

#[macro_use]
mod output;

mod clients;
mod config;
mod error;
mod metrics;
mod workload;

use config::{Config, DATABASE_URL};

static RUNNING: AtomicBool = AtomicBool::new(true);

fn main() {
    // custom panic hook to terminate whole process after unwinding
    std::panic::set_hook(Box::new(|s| {
        eprintln!("{s}");
        eprintln!("{:?}", Backtrace::new());
        std::process::exit(101);
    }));

    // parse command line options and the connection string
    let config = match Config::new(std::env::args_os(), std::env::var_os(DATABASE_URL)) {
        Ok(config) => config,
        Err(error::ConfigError::Args(e)) if !e.use_stderr() => {
            // --help and --version
            e.exit();
        }
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(e.exit_code());
        }
    };

    output!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
    output!(
        "Mode: {:?} Workers: {}",
        config.oltp().mode(),
        config.oltp().threads()
    );

    // configure debug log, which goes to stderr
    let debug_output: Box<dyn Output> = Box::new(Stderr::new());

    let level = config.debug().log_level();

    let debug_log = if level <= Level::Info {
        LogBuilder::new().format(ringlog::default_format)
    } else {
        LogBuilder::new()
    }
    .output(debug_output)
    .log_queue_depth(config.debug().log_queue_depth())
    .single_message_size(config.debug().log_single_message_size())
    .build()
    .expect("failed to initialize debug log");

    let mut log = MultiLogBuilder::new()
        .level_filter(level.to_level_filter())
        .default(debug_log)
        .build()
        .start();

    // initialize async runtime for control plane
    let control_runtime = Builder::new_multi_thread()
        .enable_all()
        .worker_threads(2)
        .build()
        .expect("failed to initialize tokio runtime");

    // spawn logging thread
    control_runtime.spawn(async move {
        while RUNNING.load(Ordering::Relaxed) {
            sleep(Duration::from_millis(1)).await;
            let _ = log.flush();
        }
        let _ = log.flush();
    });

    // stop on SIGINT or SIGTERM
    control_runtime.spawn(async {
        match shutdown_signal().await {
            Ok(()) => info!("received shutdown signal"),
            Err(e) => error!("failed to listen for shutdown signals: {e}"),
        }
        RUNNING.store(false, Ordering::Relaxed);
    });

    // periodic stats
    if let Some(interval) = config.general().interval() {
        control_runtime.spawn(output::log(interval));
    }

    let start = Instant::now();

    debug!("Starting workers");
    let oltp_runtime = clients::oltp::launch(&config);

    debug!("Waiting for shutdown signal");
    while RUNNING.load(Ordering::Relaxed) {
        std::thread::sleep(Duration::from_millis(100));
    }

    // workers check the running flag between statements, anything still in
    // flight after the timeout is abandoned
    oltp_runtime.shutdown_timeout(Duration::from_millis(100));

    output::summary(start);
    output!("done");

    // give the log thread a chance to flush
    std::thread::sleep(Duration::from_millis(100));
    control_runtime.shutdown_timeout(Duration::from_millis(100));
}

#[cfg(unix)]
async fn shutdown_signal() -> std::io::Result<()> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut sigterm = signal(SignalKind::terminate())?;

    tokio::select! {
        result = tokio::signal::ctrl_c() => result,
        _ = sigterm.recv() => Ok(()),
    }
}

#[cfg(not(unix))]
async fn shutdown_signal() -> std::io::Result<()> {
    tokio::signal::ctrl_c().await
}
