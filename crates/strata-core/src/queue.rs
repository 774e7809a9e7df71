// File: crates/strata-core/src/queue.rs
// Summary: Background render worker fed by a channel, with bounded exponential-backoff retry.

use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crate::chart::{Chart, ChartStrategy};
use crate::error::{ChartError, ChartResult};
use crate::geometry::ImageSize;
use crate::output::{OutputFormat, RenderedImage};

/// Bounded retry for transient failures (see [`ChartError::is_transient`]).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RetryPolicy {
    /// Total tries including the first; zero behaves like one.
    pub max_attempts: u32,
    pub initial_backoff: Duration,
    /// Growth factor between consecutive waits.
    pub multiplier: u32,
    pub max_backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_backoff: Duration::from_millis(50),
            multiplier: 2,
            max_backoff: Duration::from_secs(1),
        }
    }
}

impl RetryPolicy {
    /// Run `f` once, no retries.
    pub fn none() -> Self {
        Self { max_attempts: 1, ..Self::default() }
    }

    /// Sleep before retry number `retry` (1-based).
    pub fn backoff(&self, retry: u32) -> Duration {
        let mut wait = self.initial_backoff;
        for _ in 1..retry {
            if wait >= self.max_backoff {
                break;
            }
            wait = wait.saturating_mul(self.multiplier.max(1));
        }
        wait.min(self.max_backoff)
    }

    /// Call `f` until it succeeds, fails permanently, or attempts run out.
    /// The last error is returned.
    pub fn run<T>(&self, what: &str, mut f: impl FnMut() -> ChartResult<T>) -> ChartResult<T> {
        let attempts = self.max_attempts.max(1);
        let mut attempt = 1;
        loop {
            match f() {
                Ok(v) => return Ok(v),
                Err(err) if err.is_transient() && attempt < attempts => {
                    let wait = self.backoff(attempt);
                    tracing::warn!(what, attempt, ?wait, %err, "transient failure, retrying");
                    thread::sleep(wait);
                    attempt += 1;
                }
                Err(err) => {
                    if err.is_transient() {
                        tracing::error!(what, attempts, %err, "giving up");
                    }
                    return Err(err);
                }
            }
        }
    }
}

type Job = Box<dyn FnOnce() + Send + 'static>;

/// Result slot for one submitted job.
pub struct RenderHandle<T> {
    rx: Receiver<ChartResult<T>>,
}

impl<T> RenderHandle<T> {
    /// Block until the job finishes.
    pub fn wait(self) -> ChartResult<T> {
        self.rx.recv().map_err(|_| ChartError::QueueClosed)?
    }

    pub fn wait_timeout(self, timeout: Duration) -> ChartResult<T> {
        match self.rx.recv_timeout(timeout) {
            Ok(res) => res,
            Err(RecvTimeoutError::Timeout) => Err(ChartError::Timeout(timeout)),
            Err(RecvTimeoutError::Disconnected) => Err(ChartError::QueueClosed),
        }
    }

    /// Non-blocking poll; `None` while the job is pending.
    pub fn try_take(&self) -> Option<ChartResult<T>> {
        match self.rx.try_recv() {
            Ok(res) => Some(res),
            Err(mpsc::TryRecvError::Empty) => None,
            Err(mpsc::TryRecvError::Disconnected) => Some(Err(ChartError::QueueClosed)),
        }
    }
}

/// Single worker thread rendering charts in submission order.
pub struct RenderQueue {
    tx: Option<Sender<Job>>,
    worker: Option<JoinHandle<()>>,
    exited: Receiver<()>,
    retry: RetryPolicy,
}

impl RenderQueue {
    pub fn new(retry: RetryPolicy) -> ChartResult<Self> {
        let (tx, rx) = mpsc::channel::<Job>();
        let (exit_tx, exited) = mpsc::channel();
        let worker = thread::Builder::new().name("strata-render".into()).spawn(move || {
            tracing::debug!("render worker started");
            for job in rx {
                job();
            }
            tracing::debug!("render worker stopped");
            let _ = exit_tx.send(());
        })?;
        Ok(Self { tx: Some(tx), worker: Some(worker), exited, retry })
    }

    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.retry
    }

    /// Queue an arbitrary fallible job; it is retried under the queue's policy.
    pub fn submit_with<T, F>(&self, what: &'static str, mut f: F) -> ChartResult<RenderHandle<T>>
    where
        T: Send + 'static,
        F: FnMut() -> ChartResult<T> + Send + 'static,
    {
        let tx = self.tx.as_ref().ok_or(ChartError::QueueClosed)?;
        let (res_tx, res_rx) = mpsc::channel();
        let retry = self.retry;
        let job: Job = Box::new(move || {
            let res = retry.run(what, &mut f);
            // receiver may have been dropped; nobody is waiting then
            let _ = res_tx.send(res);
        });
        tx.send(job).map_err(|_| ChartError::QueueClosed)?;
        Ok(RenderHandle { rx: res_rx })
    }

    /// Render `chart` to pixels off the calling thread.
    pub fn submit<S>(&self, chart: Chart<S>) -> ChartResult<RenderHandle<RenderedImage>>
    where
        S: ChartStrategy + Send + 'static,
    {
        let what = chart.strategy.kind();
        self.submit_with(what, move || chart.render())
    }

    /// Render `chart` and write it to `path`.
    pub fn submit_to_file<S>(
        &self,
        chart: Chart<S>,
        path: impl Into<std::path::PathBuf>,
        format: OutputFormat,
    ) -> ChartResult<RenderHandle<ImageSize>>
    where
        S: ChartStrategy + Send + 'static,
    {
        let path = path.into();
        let what = chart.strategy.kind();
        self.submit_with(what, move || chart.render_to_file(&path, format))
    }

    /// Stop accepting work, let queued jobs drain, and join the worker.
    pub fn shutdown(mut self, timeout: Duration) -> ChartResult<()> {
        self.tx.take();
        match self.exited.recv_timeout(timeout) {
            Ok(()) | Err(RecvTimeoutError::Disconnected) => {}
            Err(RecvTimeoutError::Timeout) => {
                // leave the worker detached rather than block in drop
                self.worker.take();
                return Err(ChartError::Timeout(timeout));
            }
        }
        if let Some(worker) = self.worker.take() {
            worker.join().map_err(|_| ChartError::QueueClosed)?;
        }
        Ok(())
    }
}

impl Drop for RenderQueue {
    fn drop(&mut self) {
        self.tx.take();
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}
