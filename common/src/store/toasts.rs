use uuid::Uuid;

use crate::model::toast::{Severity, Toast};

/// Errors stay on screen longer so the message can actually be read.
pub const ERROR_TOAST_MS: u32 = 5000;
pub const DEFAULT_TOAST_MS: u32 = 3000;

/// Insertion-ordered collection of pending toasts. The rack only holds the
/// data; scheduling the timed removal is the UI shell's job, which calls
/// [`ToastRack::dismiss`] when a toast's `duration_ms` elapses or when the
/// user closes it by hand.
#[derive(Debug, Default)]
pub struct ToastRack {
    toasts: Vec<Toast>,
}

impl ToastRack {
    pub fn new() -> ToastRack {
        ToastRack::default()
    }

    /// Appends a toast with a fresh id and returns the id.
    pub fn notify(&mut self, message: impl Into<String>, severity: Severity) -> String {
        let id = format!("toast_{}", Uuid::new_v4().simple());
        let duration_ms = match severity {
            Severity::Error => ERROR_TOAST_MS,
            _ => DEFAULT_TOAST_MS,
        };
        self.toasts.push(Toast {
            id: id.clone(),
            message: message.into(),
            severity,
            duration_ms,
        });
        id
    }

    pub fn success(&mut self, message: impl Into<String>) -> String {
        self.notify(message, Severity::Success)
    }

    pub fn error(&mut self, message: impl Into<String>) -> String {
        self.notify(message, Severity::Error)
    }

    pub fn info(&mut self, message: impl Into<String>) -> String {
        self.notify(message, Severity::Info)
    }

    /// Removes a toast immediately, independent of its timer. Unknown ids
    /// are ignored (the timer may fire after a manual dismissal).
    pub fn dismiss(&mut self, id: &str) {
        self.toasts.retain(|t| t.id != id);
    }

    pub fn toasts(&self) -> &[Toast] {
        &self.toasts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notify_keeps_insertion_order_and_fresh_ids() {
        let mut rack = ToastRack::new();
        let first = rack.success("primeira");
        let second = rack.error("segunda");
        assert_ne!(first, second);

        let messages: Vec<&str> = rack.toasts().iter().map(|t| t.message.as_str()).collect();
        assert_eq!(messages, vec!["primeira", "segunda"]);
    }

    #[test]
    fn durations_follow_severity() {
        let mut rack = ToastRack::new();
        rack.error("falhou");
        rack.info("aviso");
        assert_eq!(rack.toasts()[0].duration_ms, ERROR_TOAST_MS);
        assert_eq!(rack.toasts()[1].duration_ms, DEFAULT_TOAST_MS);
    }

    #[test]
    fn dismiss_removes_only_the_target() {
        let mut rack = ToastRack::new();
        let first = rack.success("uma");
        rack.success("outra");
        rack.dismiss(&first);
        assert_eq!(rack.toasts().len(), 1);
        assert_eq!(rack.toasts()[0].message, "outra");

        // Dismissing twice is a no-op.
        rack.dismiss(&first);
        assert_eq!(rack.toasts().len(), 1);
    }
}
