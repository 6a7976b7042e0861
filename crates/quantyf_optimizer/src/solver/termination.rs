use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use jiff::{SignedDuration, Timestamp};

/// Shared flag a caller flips to stop a running optimization.
#[derive(Clone, Debug, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

#[derive(Clone, Debug)]
pub enum Termination {
    /// Wall-clock budget measured from the start of the run.
    Duration(SignedDuration),
    Deadline(Timestamp),
    Cancelled(CancellationToken),
}

impl Termination {
    pub fn is_reached(&self, started_at: Timestamp) -> bool {
        match self {
            Termination::Duration(max_duration) => {
                Timestamp::now().duration_since(started_at) > *max_duration
            }
            Termination::Deadline(deadline) => Timestamp::now() >= *deadline,
            Termination::Cancelled(token) => token.is_cancelled(),
        }
    }
}
