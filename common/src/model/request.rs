use serde::{Deserialize, Serialize};
use std::fmt;

use crate::model::zonal::Zonal;

/// Lifecycle status of a repair request. Transitions are unordered: any
/// status may be set from any other. Serialized values are the storage
/// strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RequestStatus {
    #[serde(rename = "Aberta")]
    Open,
    #[serde(rename = "Em andamento")]
    InProgress,
    #[serde(rename = "Concluída")]
    Completed,
    #[serde(rename = "Cancelada")]
    Canceled,
}

impl RequestStatus {
    pub const ALL: [RequestStatus; 4] = [
        RequestStatus::Open,
        RequestStatus::InProgress,
        RequestStatus::Completed,
        RequestStatus::Canceled,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            RequestStatus::Open => "Aberta",
            RequestStatus::InProgress => "Em andamento",
            RequestStatus::Completed => "Concluída",
            RequestStatus::Canceled => "Cancelada",
        }
    }

    pub fn from_label(label: &str) -> Option<RequestStatus> {
        RequestStatus::ALL.into_iter().find(|s| s.label() == label)
    }

    /// A request still awaiting field work, i.e. neither completed nor
    /// canceled.
    pub fn is_active(&self) -> bool {
        matches!(self, RequestStatus::Open | RequestStatus::InProgress)
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// GPS fix plus the human-readable address captured with it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationData {
    pub latitude: f64,
    pub longitude: f64,
    pub address: String,
}

/// A field inspection record. The id is assigned at creation and immutable;
/// photos travel as base64 data URLs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepairRequest {
    pub id: String,
    pub protocol: String,
    pub sei_number: String,
    pub contract: String,
    pub description: String,
    pub location: LocationData,
    pub visit_date: String,
    pub status: RequestStatus,
    pub technician_id: String,
    pub zonal: Zonal,
    pub photo_before: Option<String>,
    pub photo_after: Option<String>,
    pub created_at: String,
}
