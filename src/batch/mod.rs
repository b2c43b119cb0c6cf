//! 批量解析模块：按固定批次并发解析地址，批次之间插入节流延迟并报告进度。
//!
//! # Batch Scheduling Module
//!
//! [`BatchScheduler`] walks an ordered address list in fixed-size slices:
//!
//! - every address of a slice is resolved concurrently through the
//!   [`Resolver`](crate::inflight::Resolver) and the slice is joined before
//!   the next one starts;
//! - successes are merged into a single
//!   [`ResultMapping`](crate::types::ResultMapping);
//! - progress `(fraction, resolved_so_far)` is reported after each slice, and
//!   once more with `1.0` when the run completes;
//! - a pacing delay separates consecutive slices, never following the last.
//!
//! This is a fixed batch-plus-delay heuristic, not a token bucket.
//!
//! ## Key Components
//!
//! | Component | Description |
//! |-----------|-------------|
//! | [`BatchConfig`] | Batch size (default 10) and pacing delay (default 100 ms) |
//! | [`BatchScheduler`] | Runs the batches; callback, report and stream flavours |
//! | [`ProgressEvent`] | One progress notification |
//! | [`BatchReport`] | Result mapping plus diagnostics for one run |
//! | [`RunState`] | `Idle → Running(i) → Completed` (or `Cancelled`) |
//!
//! ## Cancellation
//!
//! [`BatchScheduler::run_with_report`] and [`BatchScheduler::run_stream`]
//! accept a [`CancellationToken`](tokio_util::sync::CancellationToken) that is
//! honored at batch boundaries only: a batch that has started always runs to
//! completion.

mod config;
mod progress;
mod scheduler;

pub use config::BatchConfig;
pub use progress::ProgressEvent;
pub use scheduler::{BatchReport, BatchScheduler, RunState};
