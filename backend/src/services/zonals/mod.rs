//! # Zonal-metadata service
//!
//! The zone id set is fixed; rows are seeded at startup and only ever
//! upserted, never deleted.
//!
//! *   **`GET ""`**: `list::process`: the four metadata rows.
//! *   **`POST /save`**: `save::process`: upsert keyed on id. Optional
//!     references arrive as explicit nulls and are stored as NULL.

mod list;
mod save;

use actix_web::web::{get, post, scope};
use actix_web::Scope;

const API_PATH: &str = "/api/zonals";

pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("", get().to(list::process))
        .route("/save", post().to(save::process))
}
