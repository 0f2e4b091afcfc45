use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use thiserror::Error;

/// Why a [`CancelContext`] is done
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelReason {
    #[error("context canceled")]
    Canceled,
    #[error("context deadline exceeded")]
    DeadlineExceeded,
}

/// Cancellation signal for a running solve.
///
/// Clones share the same signal, so one clone can be handed to another
/// thread and canceled from there while the solve runs.
#[derive(Debug, Clone, Default)]
pub struct CancelContext {
    inner: Arc<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    canceled: AtomicBool,
    deadline: Option<Instant>,
}

impl CancelContext {
    /// A context that is only done once [`cancel`](Self::cancel) is called
    pub fn new() -> Self {
        Self::default()
    }

    /// A context whose deadline is `timeout` from now
    pub fn with_timeout(timeout: Duration) -> Self {
        match Instant::now().checked_add(timeout) {
            Some(deadline) => Self::with_deadline(deadline),
            None => Self::new(),
        }
    }

    pub fn with_deadline(deadline: Instant) -> Self {
        CancelContext {
            inner: Arc::new(Inner {
                canceled: AtomicBool::new(false),
                deadline: Some(deadline),
            }),
        }
    }

    pub fn cancel(&self) {
        self.inner.canceled.store(true, Ordering::Relaxed);
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.inner.deadline
    }

    /// Time left before the deadline; zero once it has passed
    pub fn remaining(&self) -> Option<Duration> {
        self.inner
            .deadline
            .map(|deadline| deadline.saturating_duration_since(Instant::now()))
    }

    /// `None` while the context is live, otherwise the reason it is done.
    /// An explicit cancel wins over an elapsed deadline.
    pub fn err(&self) -> Option<CancelReason> {
        if self.inner.canceled.load(Ordering::Relaxed) {
            return Some(CancelReason::Canceled);
        }
        match self.inner.deadline {
            Some(deadline) if Instant::now() >= deadline => Some(CancelReason::DeadlineExceeded),
            _ => None,
        }
    }
}
