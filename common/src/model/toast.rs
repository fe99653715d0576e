use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    Success,
    Error,
    Info,
}

/// An ephemeral user-facing notification. Never persisted; removed either
/// by explicit dismissal or when its `duration_ms` elapses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Toast {
    pub id: String,
    pub message: String,
    pub severity: Severity,
    pub duration_ms: u32,
}
