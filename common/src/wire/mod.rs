//! Storage-schema records exchanged with the persistence backend.
//!
//! The domain model is nested (a request owns a `LocationData`); the
//! storage schema is flat, with underscore_case column names. These records
//! are the translation layer: every optional field is always present and
//! serializes to an explicit `null` when absent, so a write can never be
//! misread as a partial update. Empty strings in optional positions are
//! normalized to the absent marker on the way out.

use serde::{Deserialize, Serialize};

use crate::model::request::{LocationData, RepairRequest, RequestStatus};
use crate::model::user::User;
use crate::model::zonal::{Zonal, ZonalMetadata};

fn none_if_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Flat row of the `repair_requests` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepairRequestRecord {
    pub id: String,
    pub protocol: String,
    pub sei_number: String,
    pub contract: String,
    pub description: String,
    pub latitude: f64,
    pub longitude: f64,
    pub address: String,
    pub visit_date: String,
    pub status: RequestStatus,
    pub technician_id: String,
    pub zonal: Zonal,
    pub photo_before: Option<String>,
    pub photo_after: Option<String>,
    pub created_at: String,
}

impl From<&RepairRequest> for RepairRequestRecord {
    fn from(request: &RepairRequest) -> RepairRequestRecord {
        RepairRequestRecord {
            id: request.id.clone(),
            protocol: request.protocol.clone(),
            sei_number: request.sei_number.clone(),
            contract: request.contract.clone(),
            description: request.description.clone(),
            latitude: request.location.latitude,
            longitude: request.location.longitude,
            address: request.location.address.clone(),
            visit_date: request.visit_date.clone(),
            status: request.status,
            technician_id: request.technician_id.clone(),
            zonal: request.zonal,
            photo_before: none_if_empty(request.photo_before.clone()),
            photo_after: none_if_empty(request.photo_after.clone()),
            created_at: request.created_at.clone(),
        }
    }
}

impl From<RepairRequestRecord> for RepairRequest {
    fn from(record: RepairRequestRecord) -> RepairRequest {
        RepairRequest {
            id: record.id,
            protocol: record.protocol,
            sei_number: record.sei_number,
            contract: record.contract,
            description: record.description,
            location: LocationData {
                latitude: record.latitude,
                longitude: record.longitude,
                address: record.address,
            },
            visit_date: record.visit_date,
            status: record.status,
            technician_id: record.technician_id,
            zonal: record.zonal,
            photo_before: record.photo_before,
            photo_after: record.photo_after,
            created_at: record.created_at,
        }
    }
}

/// Row of the `users` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: String,
    pub name: String,
    pub role: String,
    pub zonal: Zonal,
    pub registration_number: Option<String>,
    pub email: Option<String>,
}

impl From<&User> for UserRecord {
    fn from(user: &User) -> UserRecord {
        UserRecord {
            id: user.id.clone(),
            name: user.name.clone(),
            role: user.role.clone(),
            zonal: user.zonal,
            registration_number: none_if_empty(user.registration_number.clone()),
            email: none_if_empty(user.email.clone()),
        }
    }
}

impl From<UserRecord> for User {
    fn from(record: UserRecord) -> User {
        User {
            id: record.id,
            name: record.name,
            role: record.role,
            zonal: record.zonal,
            registration_number: record.registration_number,
            email: record.email,
        }
    }
}

/// Row of the `zonals` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZonalRecord {
    pub id: Zonal,
    pub name: String,
    pub manager_id: Option<String>,
    pub assistant_id: Option<String>,
    pub description: Option<String>,
}

impl From<&ZonalMetadata> for ZonalRecord {
    fn from(zonal: &ZonalMetadata) -> ZonalRecord {
        ZonalRecord {
            id: zonal.id,
            name: zonal.name.clone(),
            manager_id: none_if_empty(zonal.manager_id.clone()),
            assistant_id: none_if_empty(zonal.assistant_id.clone()),
            description: none_if_empty(zonal.description.clone()),
        }
    }
}

impl From<ZonalRecord> for ZonalMetadata {
    fn from(record: ZonalRecord) -> ZonalMetadata {
        ZonalMetadata {
            id: record.id,
            name: record.name,
            manager_id: record.manager_id,
            assistant_id: record.assistant_id,
            description: record.description,
        }
    }
}

/// Read-only snapshot shipped to the report endpoints: the currently
/// filtered requests plus the users needed to resolve technician names.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportPayload {
    pub requests: Vec<RepairRequestRecord>,
    pub users: Vec<UserRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::request::RequestStatus;

    fn sample_request() -> RepairRequest {
        RepairRequest {
            id: "req_100".to_string(),
            protocol: "2024.123456".to_string(),
            sei_number: "00.123.456/2024".to_string(),
            contract: "CTR-05/2023".to_string(),
            description: "Recapeamento asfáltico".to_string(),
            location: LocationData {
                latitude: -23.5505,
                longitude: -46.6333,
                address: "Av. Paulista, 1000".to_string(),
            },
            visit_date: "2024-05-15".to_string(),
            status: RequestStatus::Open,
            technician_id: "u2".to_string(),
            zonal: Zonal::North,
            photo_before: None,
            photo_after: Some(String::new()),
            created_at: "2024-05-10".to_string(),
        }
    }

    #[test]
    fn absent_optionals_serialize_as_explicit_null() {
        let record = RepairRequestRecord::from(&sample_request());
        let json: serde_json::Value = serde_json::to_value(&record).unwrap();
        // Present in the payload, with the explicit "no value" marker.
        assert!(json.get("photo_before").unwrap().is_null());
        // Empty string is normalized to the absent marker, not sent as "".
        assert!(json.get("photo_after").unwrap().is_null());
    }

    #[test]
    fn location_is_flattened_and_restored() {
        let request = sample_request();
        let record = RepairRequestRecord::from(&request);
        assert_eq!(record.latitude, request.location.latitude);
        assert_eq!(record.address, request.location.address);

        let restored = RepairRequest::from(record);
        assert_eq!(restored.location, request.location);
        assert_eq!(restored.id, request.id);
    }

    #[test]
    fn status_and_zonal_use_storage_strings() {
        let record = RepairRequestRecord::from(&sample_request());
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"status\":\"Aberta\""));
        assert!(json.contains("\"zonal\":\"Zonal Norte\""));
    }
}
