//! User-visible notifications
//!
//! A small toast queue. The synchronizer pushes one toast per remote outcome;
//! the UI renders the queue and dismisses entries on a timer.

use std::cell::RefCell;
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Success,
    Error,
    Info,
}

impl ToastLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
            Self::Info => "info",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: u64,
    pub level: ToastLevel,
    pub message: String,
}

#[derive(Default)]
struct Queue {
    toasts: Vec<Toast>,
    next_id: u64,
    listeners: Vec<Rc<dyn Fn()>>,
}

/// Shared toast queue; clones push to and read from the same queue.
#[derive(Clone, Default)]
pub struct Notifications {
    queue: Rc<RefCell<Queue>>,
}

impl Notifications {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, level: ToastLevel, message: impl Into<String>) -> u64 {
        let message = message.into();
        match level {
            ToastLevel::Error => tracing::warn!(%message, "notification"),
            _ => tracing::info!(%message, "notification"),
        }

        let id = {
            let mut queue = self.queue.borrow_mut();
            queue.next_id += 1;
            let id = queue.next_id;
            queue.toasts.push(Toast { id, level, message });
            id
        };
        self.emit();
        id
    }

    pub fn success(&self, message: impl Into<String>) -> u64 {
        self.push(ToastLevel::Success, message)
    }

    pub fn error(&self, message: impl Into<String>) -> u64 {
        self.push(ToastLevel::Error, message)
    }

    pub fn info(&self, message: impl Into<String>) -> u64 {
        self.push(ToastLevel::Info, message)
    }

    pub fn dismiss(&self, id: u64) {
        let removed = {
            let mut queue = self.queue.borrow_mut();
            let before = queue.toasts.len();
            queue.toasts.retain(|t| t.id != id);
            before != queue.toasts.len()
        };
        if removed {
            self.emit();
        }
    }

    pub fn clear(&self) {
        self.queue.borrow_mut().toasts.clear();
        self.emit();
    }

    pub fn toasts(&self) -> Vec<Toast> {
        self.queue.borrow().toasts.clone()
    }

    pub fn count(&self, level: ToastLevel) -> usize {
        self.queue
            .borrow()
            .toasts
            .iter()
            .filter(|t| t.level == level)
            .count()
    }

    pub fn subscribe(&self, listener: impl Fn() + 'static) {
        self.queue.borrow_mut().listeners.push(Rc::new(listener));
    }

    fn emit(&self) {
        let listeners = self.queue.borrow().listeners.clone();
        for listener in listeners {
            listener();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_push_and_dismiss() {
        let notifications = Notifications::new();
        let a = notifications.success("saved");
        let b = notifications.error("failed");
        assert_ne!(a, b);
        assert_eq!(notifications.toasts().len(), 2);
        assert_eq!(notifications.count(ToastLevel::Error), 1);

        notifications.dismiss(a);
        let toasts = notifications.toasts();
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts[0].message, "failed");
    }

    #[test]
    fn test_listeners_fire() {
        let notifications = Notifications::new();
        let hits = Rc::new(Cell::new(0));
        let hits_clone = hits.clone();
        notifications.subscribe(move || hits_clone.set(hits_clone.get() + 1));

        let id = notifications.info("hello");
        notifications.dismiss(id);
        // unknown id: nothing changes, no event
        notifications.dismiss(id);
        assert_eq!(hits.get(), 2);
    }
}
