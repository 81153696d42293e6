use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// A checkpoint is reached after every this many records (and on the last one)
pub const CHECKPOINT_INTERVAL: usize = 25;

/// Receives completion percentages at each checkpoint of a matching run.
///
/// Reporting never affects results. After each report the engine asks
/// [`is_cancelled`](ProgressReporter::is_cancelled) and abandons the run if it
/// returns true.
pub trait ProgressReporter {
    /// Called with the rounded percentage of records completed (0-100)
    fn report(&mut self, percent: u8);

    fn is_cancelled(&self) -> bool {
        false
    }
}

impl<F: FnMut(u8)> ProgressReporter for F {
    fn report(&mut self, percent: u8) {
        self(percent);
    }
}

/// Discards all progress
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressReporter for NoProgress {
    fn report(&mut self, _percent: u8) {}
}

/// Handle used to abort a run from outside the reporter
#[derive(Debug, Clone, Default)]
pub struct CancelHandle(Arc<AtomicBool>);

impl CancelHandle {
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Wraps a reporter so the run can be cancelled through a [`CancelHandle`]
pub struct Cancellable<R> {
    inner: R,
    handle: CancelHandle,
}

impl<R: ProgressReporter> Cancellable<R> {
    pub fn new(inner: R) -> (Self, CancelHandle) {
        let handle = CancelHandle::default();
        (
            Self {
                inner,
                handle: handle.clone(),
            },
            handle,
        )
    }
}

impl<R: ProgressReporter> ProgressReporter for Cancellable<R> {
    fn report(&mut self, percent: u8) {
        self.inner.report(percent);
    }

    fn is_cancelled(&self) -> bool {
        self.handle.is_cancelled() || self.inner.is_cancelled()
    }
}

/// Whether finishing record `index` (0-based) of `total` is a checkpoint
#[must_use]
pub fn is_checkpoint(index: usize, total: usize) -> bool {
    index % CHECKPOINT_INTERVAL == 0 || index + 1 == total
}

/// Rounded percentage of `total` done after finishing record `index`
#[must_use]
pub fn percent_complete(index: usize, total: usize) -> u8 {
    if total == 0 {
        return 100;
    }
    #[allow(clippy::cast_precision_loss)]
    let fraction = (index + 1) as f64 / total as f64;
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)] // 0-100
    let percent = (fraction * 100.0).round().clamp(0.0, 100.0) as u8;
    percent
}
