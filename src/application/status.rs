use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc, Mutex,
};
use std::time::Duration;

use tokio::{runtime::Handle, sync::watch, task::JoinHandle};
use tracing::debug;

use crate::domain::{config::client::RevertPolicy, models::transfer::TransferStatus};

/// The transient upload status, plus the timer that puts it back to `Idle`.
///
/// Every published value bumps a generation counter under the watch lock.
/// With [`RevertPolicy::Supersede`] a revert only lands if nothing was
/// published since it was scheduled; with [`RevertPolicy::Detached`] it
/// always lands.
pub struct StatusSignal {
    sender: Arc<watch::Sender<TransferStatus>>,
    generation: Arc<AtomicU64>,
    window: Duration,
    policy: RevertPolicy,
    pending: Mutex<Vec<JoinHandle<()>>>,
}

impl StatusSignal {
    pub fn new(window: Duration, policy: RevertPolicy) -> Self {
        let (sender, _) = watch::channel(TransferStatus::Idle);
        Self {
            sender: Arc::new(sender),
            generation: Arc::new(AtomicU64::new(0)),
            window,
            policy,
            pending: Mutex::new(Vec::new()),
        }
    }

    pub fn current(&self) -> TransferStatus {
        *self.sender.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<TransferStatus> {
        self.sender.subscribe()
    }

    /// Publishes `status` and leaves it in place.
    pub fn publish(&self, status: TransferStatus) {
        if self.policy == RevertPolicy::Supersede {
            self.cancel_pending();
        }

        let generation = &self.generation;
        self.sender.send_modify(|current| {
            generation.fetch_add(1, Ordering::SeqCst);
            *current = status;
        });
        debug!("Transfer status is now {:?}", status);
    }

    /// Publishes `status` and schedules the revert to `Idle` one display
    /// window from now.
    pub fn publish_transient(&self, status: TransferStatus) {
        self.publish(status);

        let scheduled_at = self.generation.load(Ordering::SeqCst);
        let sender = Arc::clone(&self.sender);
        let generation = Arc::clone(&self.generation);
        let window = self.window;
        let policy = self.policy;

        // A future dropped after its runtime shut down can still land here.
        let Ok(runtime) = Handle::try_current() else {
            debug!("No runtime to schedule the status revert on");
            return;
        };

        let handle = runtime.spawn(async move {
            tokio::time::sleep(window).await;
            sender.send_if_modified(|current| {
                if policy == RevertPolicy::Supersede
                    && generation.load(Ordering::SeqCst) != scheduled_at
                {
                    return false;
                }
                generation.fetch_add(1, Ordering::SeqCst);
                let changed = *current != TransferStatus::Idle;
                *current = TransferStatus::Idle;
                changed
            });
        });

        let mut pending = self.pending.lock().unwrap();
        pending.retain(|h| !h.is_finished());
        pending.push(handle);
    }

    fn cancel_pending(&self) {
        let mut pending = self.pending.lock().unwrap();
        for handle in pending.drain(..) {
            handle.abort();
        }
    }
}

impl Drop for StatusSignal {
    fn drop(&mut self) {
        if let Ok(mut pending) = self.pending.lock() {
            for handle in pending.drain(..) {
                handle.abort();
            }
        }
    }
}
