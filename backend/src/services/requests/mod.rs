//! # Repair-request service
//!
//! CRUD endpoints for the `repair_requests` table. Each handler delegates
//! to an inner function over a `rusqlite::Connection`, so the same logic
//! runs against an in-memory database in tests.
//!
//! ## Registered routes
//!
//! *   **`GET ""`**: `list::process`: every request, newest first
//!     (`created_at DESC`).
//! *   **`POST ""`**: `create::process`: inserts a fully-populated record;
//!     a reused id surfaces as a constraint error.
//! *   **`PUT /{request_id}`**: `update::process`: whole-row replacement,
//!     keyed by the path id.
//! *   **`DELETE /{request_id}`**: `remove::process`: removal by id; an
//!     absent id is a no-op.

mod create;
mod list;
mod remove;
mod update;

use actix_web::web::{delete, get, post, put, scope};
use actix_web::Scope;

const API_PATH: &str = "/api/requests";

pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("", get().to(list::process))
        .route("", post().to(create::process))
        .route("/{request_id}", put().to(update::process))
        .route("/{request_id}", delete().to(remove::process))
}

#[cfg(test)]
pub(crate) fn sample_record(id: &str, created_at: &str) -> common::wire::RepairRequestRecord {
    use common::model::request::RequestStatus;
    use common::model::zonal::Zonal;

    common::wire::RepairRequestRecord {
        id: id.to_string(),
        protocol: format!("2024.{id}"),
        sei_number: "00.123.456/2024".to_string(),
        contract: "CTR-05/2023".to_string(),
        description: "Recapeamento asfáltico".to_string(),
        latitude: -23.5505,
        longitude: -46.6333,
        address: "Av. Paulista, 1000".to_string(),
        visit_date: "2024-05-15".to_string(),
        status: RequestStatus::Open,
        technician_id: "u2".to_string(),
        zonal: Zonal::North,
        photo_before: None,
        photo_after: None,
        created_at: created_at.to_string(),
    }
}
