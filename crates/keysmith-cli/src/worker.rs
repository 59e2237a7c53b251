//! Off-thread key generation with supersession.
//!
//! Key generation (RSA in particular) is CPU-bound, so each request runs on
//! the blocking pool. Submitting a new request cancels the previous one if
//! it has not started yet, and any result belonging to a superseded ticket
//! is dropped in [`KeygenWorker::finish`]: at most one result is delivered
//! per logical generate action.
//!
//! All methods take `&self`, so a submission may race with a pending
//! `finish`; the staleness check runs after the task completes.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};

use keysmith_core::{
    generate_with_cancel, CancellationToken, KeyGenError, KeyGenResult, KeyPair, KeyRequest,
};
use tokio::task::JoinHandle;
use tracing::{debug, info};

/// Handle to one submitted request.
pub struct Ticket {
    id: u64,
    handle: JoinHandle<KeyGenResult<KeyPair>>,
}

impl Ticket {
    pub fn id(&self) -> u64 {
        self.id
    }
}

#[derive(Default)]
pub struct KeygenWorker {
    latest: AtomicU64,
    current: Mutex<Option<CancellationToken>>,
}

impl KeygenWorker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start generating `request`, superseding anything still in flight.
    pub fn submit(&self, request: KeyRequest) -> Ticket {
        let token = CancellationToken::new();
        let id = {
            let mut current = self.current.lock().unwrap_or_else(PoisonError::into_inner);
            if let Some(previous) = current.replace(token.clone()) {
                previous.cancel();
                debug!(
                    superseded = self.latest.load(Ordering::SeqCst),
                    "cancelled previous request"
                );
            }
            self.latest.fetch_add(1, Ordering::SeqCst) + 1
        };

        info!(id, request = ?request, "submitting key generation");
        let handle = tokio::task::spawn_blocking(move || generate_with_cancel(request, &token));

        Ticket { id, handle }
    }

    /// Cancel the current request if it has not started yet.
    pub fn cancel(&self) {
        let current = self.current.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(token) = current.as_ref() {
            token.cancel();
        }
    }

    /// Wait for `ticket`. Returns `None` if it was superseded by a later
    /// submission, whatever its outcome.
    pub async fn finish(&self, ticket: Ticket) -> Option<KeyGenResult<KeyPair>> {
        let result = match ticket.handle.await {
            Ok(result) => result,
            Err(e) => Err(KeyGenError::GenerationFailure(format!(
                "generation task failed: {e}"
            ))),
        };

        let latest = self.latest.load(Ordering::SeqCst);
        if ticket.id != latest {
            debug!(id = ticket.id, latest, "discarding superseded result");
            return None;
        }
        Some(result)
    }
}
