//! Transient user-facing notifications ("toasts").

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};

/// Oldest toasts are dropped once this many are waiting.
pub const MAX_PENDING_TOASTS: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub kind: ToastKind,
    pub message: String,
}

/// Shared queue of toasts waiting to be shown. Cloning shares the queue.
#[derive(Debug, Clone, Default)]
pub struct Toaster {
    queue: Arc<Mutex<VecDeque<Toast>>>,
}

impl Toaster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn success(&self, message: impl Into<String>) {
        self.push(ToastKind::Success, message.into());
    }

    pub fn error(&self, message: impl Into<String>) {
        self.push(ToastKind::Error, message.into());
    }

    fn push(&self, kind: ToastKind, message: String) {
        tracing::debug!(?kind, %message, "toast");
        let mut queue = self.queue.lock().unwrap_or_else(PoisonError::into_inner);
        if queue.len() == MAX_PENDING_TOASTS {
            queue.pop_front();
        }
        queue.push_back(Toast { kind, message });
    }

    /// Take every pending toast, oldest first.
    pub fn drain(&self) -> Vec<Toast> {
        let mut queue = self.queue.lock().unwrap_or_else(PoisonError::into_inner);
        queue.drain(..).collect()
    }

    /// Most recent toast, without removing it.
    pub fn latest(&self) -> Option<Toast> {
        let queue = self.queue.lock().unwrap_or_else(PoisonError::into_inner);
        queue.back().cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn queue_is_bounded_and_drains_in_order() {
        let toaster = Toaster::new();
        for i in 0..(MAX_PENDING_TOASTS + 2) {
            toaster.error(format!("e{i}"));
        }
        let drained = toaster.drain();
        assert_eq!(drained.len(), MAX_PENDING_TOASTS);
        assert_eq!(drained[0].message, "e2");
        assert!(toaster.drain().is_empty());
    }

    #[test]
    fn clones_share_the_queue() {
        let toaster = Toaster::new();
        toaster.clone().success("Login successful!");
        assert_eq!(
            toaster.latest(),
            Some(Toast {
                kind: ToastKind::Success,
                message: "Login successful!".to_string()
            })
        );
    }
}
