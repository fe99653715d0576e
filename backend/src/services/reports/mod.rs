//! # Report service
//!
//! Both endpoints consume a read-only snapshot: the SPA posts the currently
//! filtered request records plus the user records needed to resolve
//! technician names. Nothing here touches the database.
//!
//! *   **`POST /csv`**: `csv::process`: one flattened row per request.
//! *   **`POST /pdf`**: `pdf::process`: paginated document, one section
//!     per request with the before/after photos embedded.

mod csv;
mod pdf;

use actix_web::web::{post, scope};
use actix_web::Scope;

const API_PATH: &str = "/api/reports";

pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("/csv", post().to(csv::process))
        .route("/pdf", post().to(pdf::process))
}
