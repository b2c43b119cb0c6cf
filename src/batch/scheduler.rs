//! Batch scheduler.

use super::config::BatchConfig;
use super::progress::ProgressEvent;
use crate::inflight::{Resolver, ResolverStats};
use crate::types::ResultMapping;
use crate::Result;
use futures::future::join_all;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_stream::wrappers::UnboundedReceiverStream;
use tokio_util::sync::CancellationToken;
use tracing::Instrument;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Idle,
    Running { batch_index: usize },
    Completed,
    Cancelled,
}

#[derive(Debug, Clone)]
pub struct BatchReport {
    pub results: ResultMapping,
    /// `Completed` or `Cancelled`.
    pub state: RunState,
    pub batches_run: usize,
    pub batch_count: usize,
    /// Unique addresses attempted in this run that did not resolve.
    pub unresolved: usize,
    /// Resolver activity during the run. Includes lookups made concurrently
    /// by other users of the same resolver.
    pub stats: ResolverStats,
    pub elapsed: Duration,
}

impl BatchReport {
    pub fn is_completed(&self) -> bool {
        self.state == RunState::Completed
    }

    pub fn resolved(&self) -> usize {
        self.results.len()
    }
}

#[derive(Clone)]
pub struct BatchScheduler {
    resolver: Arc<Resolver>,
    config: BatchConfig,
}

impl BatchScheduler {
    pub fn new(resolver: Arc<Resolver>, config: BatchConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { resolver, config })
    }

    pub fn config(&self) -> &BatchConfig {
        &self.config
    }

    /// Resolve `addresses`, reporting `(fraction, resolved_so_far)` after each
    /// batch and `(1.0, resolved)` at the end.
    pub async fn run<F>(&self, addresses: &[String], mut on_progress: F) -> ResultMapping
    where
        F: FnMut(f64, usize),
    {
        self.run_with_report(addresses, None, |e| on_progress(e.fraction, e.resolved))
            .await
            .results
    }

    /// Full-featured run: optional cancellation at batch boundaries and a
    /// [`BatchReport`] with diagnostics.
    pub async fn run_with_report<F>(
        &self,
        addresses: &[String],
        cancel: Option<&CancellationToken>,
        on_progress: F,
    ) -> BatchReport
    where
        F: FnMut(&ProgressEvent),
    {
        let span = tracing::info_span!(
            "batch_geocode",
            run_id = %uuid::Uuid::new_v4(),
            total = addresses.len(),
            batch_size = self.config.batch_size,
        );
        self.execute(addresses, cancel, on_progress)
            .instrument(span)
            .await
    }

    /// Run on a spawned task, delivering progress as a stream.
    ///
    /// Dropping the stream does not stop the run; cancel `cancel` for that.
    pub fn run_stream(
        &self,
        addresses: Vec<String>,
        cancel: CancellationToken,
    ) -> (UnboundedReceiverStream<ProgressEvent>, JoinHandle<BatchReport>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let scheduler = self.clone();
        let handle = tokio::spawn(async move {
            scheduler
                .run_with_report(&addresses, Some(&cancel), |event| {
                    // A closed receiver only means nobody is listening.
                    let _ = tx.send(event.clone());
                })
                .await
        });
        (UnboundedReceiverStream::new(rx), handle)
    }

    async fn execute<F>(
        &self,
        addresses: &[String],
        cancel: Option<&CancellationToken>,
        mut on_progress: F,
    ) -> BatchReport
    where
        F: FnMut(&ProgressEvent),
    {
        let start = Instant::now();
        let stats_before = self.resolver.stats();
        let total = addresses.len();
        let batch_size = self.config.batch_size;
        let batch_count = self.config.batch_count(total);

        let mut results = ResultMapping::new();
        let mut state = RunState::Idle;
        let mut batches_run = 0;
        let mut processed = 0;

        for (batch_index, batch) in addresses.chunks(batch_size).enumerate() {
            if cancel.is_some_and(|t| t.is_cancelled()) {
                state = RunState::Cancelled;
                break;
            }
            state = RunState::Running { batch_index };
            tracing::debug!(batch_index, size = batch.len(), "starting batch");

            let outcomes = join_all(batch.iter().map(|address| async move {
                (address, self.resolver.resolve(address).await)
            }))
            .await;

            for (address, outcome) in outcomes {
                if let Some(coordinate) = outcome {
                    results.insert(address.clone(), coordinate);
                }
            }
            batches_run += 1;
            processed += batch.len();

            let event =
                ProgressEvent::after_batch(batches_run, batch_count, batch_size, total, results.len());
            tracing::info!(
                batch_index,
                batch_count,
                progress = event.percent(),
                resolved = results.len(),
                "batch complete"
            );
            on_progress(&event);

            if batches_run < batch_count && !self.pause(cancel).await {
                state = RunState::Cancelled;
                break;
            }
        }

        let final_event = if state == RunState::Cancelled {
            tracing::info!(batches_run, batch_count, "batch run cancelled");
            ProgressEvent::stopped(batches_run, batch_count, batch_size, total, results.len())
        } else {
            state = RunState::Completed;
            ProgressEvent::finished(batches_run, batch_count, results.len())
        };
        on_progress(&final_event);

        let attempted: HashSet<&str> = addresses[..processed].iter().map(String::as_str).collect();
        let unresolved = attempted.len().saturating_sub(results.len());

        tracing::info!(
            resolved = results.len(),
            unresolved,
            duration_ms = start.elapsed().as_millis() as u64,
            "batch run finished"
        );

        BatchReport {
            results,
            state,
            batches_run,
            batch_count,
            unresolved,
            stats: self.resolver.stats().since(&stats_before),
            elapsed: start.elapsed(),
        }
    }

    /// Sleep for the pacing delay. Returns `false` if cancelled meanwhile.
    async fn pause(&self, cancel: Option<&CancellationToken>) -> bool {
        let delay = self.config.inter_batch_delay;
        match cancel {
            Some(token) => {
                tokio::select! {
                    _ = token.cancelled() => false,
                    _ = tokio::time::sleep(delay) => true,
                }
            }
            None => {
                tokio::time::sleep(delay).await;
                true
            }
        }
    }
}
