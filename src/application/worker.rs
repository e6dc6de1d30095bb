//! Background worker for accumulation emissions.
//!
//! Tripped accumulation events are dispatched to a bounded queue with a
//! single consumer task, so throttle bookkeeping never blocks the call site
//! on the sink's write latency. One consumer means global FIFO, which gives
//! the per-key FIFO the threshold crossing depends on.
//!
//! Submission is non-blocking: when the queue is full the job is dropped and
//! counted on [`Metrics::queue_drops`]. Shutdown is explicit — stop intake,
//! drain pending jobs within a bounded grace period.

use crate::application::logger::ChannelLogger;
use crate::application::metrics::Metrics;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// A pre-rendered emission waiting for the worker.
#[derive(Debug)]
pub struct EmitJob {
    /// Handle the text is written through.
    pub logger: Arc<ChannelLogger>,
    /// Rendered message text.
    pub text: String,
}

#[derive(Debug)]
enum WorkerMessage {
    Emit(EmitJob),
    Drain,
}

/// Error returned when the worker fails to drain cleanly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShutdownError {
    /// Pending jobs were not drained within the grace period; the worker
    /// task was aborted.
    GraceExpired,
    /// The worker task panicked before completing the drain.
    WorkerPanicked,
}

impl std::fmt::Display for ShutdownError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShutdownError::GraceExpired => {
                write!(f, "worker did not drain within the grace period")
            }
            ShutdownError::WorkerPanicked => write!(f, "worker task panicked"),
        }
    }
}

impl std::error::Error for ShutdownError {}

/// Submission side of the worker queue. Cheap to clone.
#[derive(Debug, Clone)]
pub struct JobSender {
    tx: mpsc::Sender<WorkerMessage>,
    closed: Arc<AtomicBool>,
    metrics: Metrics,
}

impl JobSender {
    /// Submit a job without blocking.
    ///
    /// Returns `false` when the job was dropped — the queue is full or the
    /// worker is shutting down. Drops are counted on the metrics.
    pub fn submit(&self, job: EmitJob) -> bool {
        if self.closed.load(Ordering::Acquire) {
            self.metrics.record_queue_drop();
            return false;
        }
        match self.tx.try_send(WorkerMessage::Emit(job)) {
            Ok(()) => true,
            Err(_) => {
                self.metrics.record_queue_drop();
                false
            }
        }
    }
}

/// Owner handle for the worker task; shutting down requires an explicit call.
#[derive(Debug)]
pub struct WorkerHandle {
    tx: mpsc::Sender<WorkerMessage>,
    closed: Arc<AtomicBool>,
    join: JoinHandle<()>,
    grace: Duration,
}

impl WorkerHandle {
    /// Stop accepting new jobs and drain the pending queue.
    ///
    /// Jobs already queued are emitted before the worker exits. If the drain
    /// exceeds the grace period the worker is aborted and
    /// [`ShutdownError::GraceExpired`] is returned.
    pub async fn shutdown(mut self) -> Result<(), ShutdownError> {
        self.closed.store(true, Ordering::Release);
        // The sentinel lands behind every accepted job; the consumer exits
        // after processing everything before it
        let _ = self.tx.send(WorkerMessage::Drain).await;

        match tokio::time::timeout(self.grace, &mut self.join).await {
            Ok(Ok(())) => Ok(()),
            Ok(Err(_)) => Err(ShutdownError::WorkerPanicked),
            Err(_) => {
                self.join.abort();
                Err(ShutdownError::GraceExpired)
            }
        }
    }
}

/// Spawn the accumulation worker on the current tokio runtime.
///
/// `capacity` bounds the queue; `grace` bounds the shutdown drain.
pub fn spawn(capacity: usize, grace: Duration, metrics: Metrics) -> (JobSender, WorkerHandle) {
    let (tx, mut rx) = mpsc::channel(capacity);
    let closed = Arc::new(AtomicBool::new(false));

    let join = tokio::spawn(async move {
        while let Some(message) = rx.recv().await {
            match message {
                WorkerMessage::Emit(job) => job.logger.write_rendered(&job.text),
                WorkerMessage::Drain => break,
            }
        }
    });

    let sender = JobSender {
        tx: tx.clone(),
        closed: Arc::clone(&closed),
        metrics,
    };
    let handle = WorkerHandle {
        tx,
        closed,
        join,
        grace,
    };
    (sender, handle)
}
