use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    time::Duration,
};
use tokio::sync::{watch, Mutex};
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::server::{
    error::AppError,
    service::reconciliation::{summary::TickSummary, Reconciler},
};

/// What happened when a tick was requested.
#[derive(Debug)]
pub enum TickOutcome {
    Completed(TickSummary),
    /// The previous tick was still running, nothing was done.
    Overlapped,
    /// Shutdown has begun, nothing was done.
    ShuttingDown,
    /// The bot's guild cache is not populated yet, nothing was done.
    NotReady,
    /// The tick returned an error or panicked; already logged.
    Failed,
}

/// Runs reconciliation ticks one at a time.
///
/// Clones share the running flag, so the scheduler job and the startup tick cannot
/// overlap each other.
#[derive(Clone)]
pub struct TickRunner {
    reconciler: Arc<Reconciler>,
    running: Arc<Mutex<()>>,
    shutting_down: Arc<AtomicBool>,
    /// Set by the bot once its guild cache is populated.
    ready: watch::Receiver<bool>,
}

impl TickRunner {
    /// Creates a runner that only ticks once `ready` holds `true`.
    ///
    /// # Arguments
    /// - `reconciler` - Reconciliation core run on every tick
    /// - `ready` - Readiness flag published by the bot's event handler
    pub fn new(reconciler: Arc<Reconciler>, ready: watch::Receiver<bool>) -> Self {
        Self {
            reconciler,
            running: Arc::new(Mutex::new(())),
            shutting_down: Arc::new(AtomicBool::new(false)),
            ready,
        }
    }

    /// Runs one tick unless the bot is not ready, another tick is in flight or shutdown
    /// has begun.
    ///
    /// The tick runs in its own task so a panic surfaces as a `JoinError` here instead of
    /// unwinding into the scheduler.
    pub async fn run(&self) -> TickOutcome {
        if self.shutting_down.load(Ordering::SeqCst) {
            tracing::debug!("Shutdown in progress, not starting reconciliation tick");
            return TickOutcome::ShuttingDown;
        }

        if !*self.ready.borrow() {
            tracing::debug!("Guild cache not ready, not starting reconciliation tick");
            return TickOutcome::NotReady;
        }

        let Ok(guard) = self.running.clone().try_lock_owned() else {
            tracing::warn!("Previous reconciliation tick still running, skipping this one");
            return TickOutcome::Overlapped;
        };

        let reconciler = self.reconciler.clone();
        let handle = tokio::spawn(async move {
            let _guard = guard;
            reconciler.run_tick().await
        });

        match handle.await {
            Ok(Ok(summary)) => TickOutcome::Completed(summary),
            Ok(Err(e)) => {
                tracing::error!("Reconciliation tick failed: {}", e);
                TickOutcome::Failed
            }
            Err(e) => {
                tracing::error!("Reconciliation tick panicked: {}", e);
                TickOutcome::Failed
            }
        }
    }

    /// Refuses new ticks and waits for the in-flight one to finish.
    pub async fn stop(&self) {
        self.shutting_down.store(true, Ordering::SeqCst);
        let _idle = self.running.lock().await;
    }
}

/// Handle to the running reconciliation job.
pub struct ReconciliationScheduler {
    scheduler: JobScheduler,
    runner: TickRunner,
}

impl ReconciliationScheduler {
    /// Stops the job scheduler, then waits for any in-flight tick.
    pub async fn shutdown(mut self) -> Result<(), AppError> {
        self.runner.stop().await;
        self.scheduler.shutdown().await?;

        tracing::info!("Reconciliation scheduler stopped");

        Ok(())
    }
}

/// Starts the reconciliation scheduler
///
/// Registers a job repeating every `interval` and fires one tick as soon as the bot's
/// guild cache is ready, so a restart does not wait a full interval before converging.
/// Job ticks that fire before then are skipped.
///
/// # Arguments
/// - `reconciler`: Reconciliation core shared with the wallet link flow
/// - `interval`: Time between tick starts
/// - `ready`: Readiness flag published by the bot's event handler
pub async fn start_scheduler(
    reconciler: Arc<Reconciler>,
    interval: Duration,
    ready: watch::Receiver<bool>,
) -> Result<ReconciliationScheduler, AppError> {
    let scheduler = JobScheduler::new().await?;
    let runner = TickRunner::new(reconciler, ready.clone());

    let job_runner = runner.clone();
    let job = Job::new_repeated_async(interval, move |_uuid, _lock| {
        let runner = job_runner.clone();

        Box::pin(async move {
            runner.run().await;
        })
    })?;

    scheduler.add(job).await?;
    scheduler.start().await?;

    let startup_runner = runner.clone();
    let mut startup_ready = ready;
    tokio::spawn(async move {
        if startup_ready.wait_for(|ready| *ready).await.is_err() {
            tracing::warn!("Discord bot stopped before its cache was ready, no startup tick");
            return;
        }
        startup_runner.run().await;
    });

    tracing::info!(
        interval_secs = interval.as_secs(),
        "Reconciliation scheduler started"
    );

    Ok(ReconciliationScheduler { scheduler, runner })
}
