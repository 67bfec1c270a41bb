use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::task::JoinHandle;

pub type ToastId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastKind {
    Success,
    Error,
    #[default]
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Toast {
    pub id: ToastId,
    pub message: String,
    pub kind: ToastKind,
    pub created_at: DateTime<Local>,
}

/// Short-lived notifications. Each toast owns a timer task that removes it
/// after the queue's TTL; dismissing early aborts that timer.
///
/// `show` spawns onto the ambient tokio runtime.
#[derive(Debug)]
pub struct ToastQueue {
    ttl: Duration,
    next_id: AtomicU64,
    toasts: Arc<Mutex<Vec<Toast>>>,
    timers: Arc<Mutex<HashMap<ToastId, JoinHandle<()>>>>,
}

impl ToastQueue {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            next_id: AtomicU64::new(1),
            toasts: Arc::new(Mutex::new(Vec::new())),
            timers: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub fn show(&self, message: impl Into<String>, kind: ToastKind) -> ToastId {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let toast = Toast {
            id,
            message: message.into(),
            kind,
            created_at: Local::now(),
        };
        tracing::debug!(target: "toasts", id, kind = ?toast.kind, message = %toast.message, "toast shown");
        lock(&self.toasts).push(toast);

        let toasts = Arc::clone(&self.toasts);
        let timers = Arc::clone(&self.timers);
        let ttl = self.ttl;
        // Held across the spawn so the task's own removal always follows this insert.
        let mut pending = lock(&self.timers);
        let handle = tokio::spawn(async move {
            tokio::time::sleep(ttl).await;
            lock(&toasts).retain(|t| t.id != id);
            lock(&timers).remove(&id);
            tracing::trace!(target: "toasts", id, "toast expired");
        });
        pending.insert(id, handle);
        drop(pending);

        id
    }

    pub fn info(&self, message: impl Into<String>) -> ToastId {
        self.show(message, ToastKind::Info)
    }

    pub fn success(&self, message: impl Into<String>) -> ToastId {
        self.show(message, ToastKind::Success)
    }

    pub fn error(&self, message: impl Into<String>) -> ToastId {
        self.show(message, ToastKind::Error)
    }

    /// Removes a toast before it expires. Returns false if it was already gone.
    pub fn dismiss(&self, id: ToastId) -> bool {
        if let Some(handle) = lock(&self.timers).remove(&id) {
            handle.abort();
        }

        let mut toasts = lock(&self.toasts);
        let before = toasts.len();
        toasts.retain(|t| t.id != id);
        toasts.len() != before
    }

    /// Visible toasts, oldest first.
    pub fn toasts(&self) -> Vec<Toast> {
        lock(&self.toasts).clone()
    }

    pub fn len(&self) -> usize {
        lock(&self.toasts).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Expiry timers still registered.
    pub fn pending_timers(&self) -> usize {
        lock(&self.timers).len()
    }

    /// Stops every pending expiry timer. Toasts still visible stay visible.
    pub fn shutdown(&self) {
        let handles: Vec<(ToastId, JoinHandle<()>)> = lock(&self.timers).drain().collect();
        for (id, handle) in handles {
            handle.abort();
            tracing::trace!(target: "toasts", id, "toast timer stopped");
        }
    }
}

impl Drop for ToastQueue {
    fn drop(&mut self) {
        self.shutdown();
    }
}

// Every critical section is a single collection op, so a poisoned lock is still consistent.
fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    match m.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}
