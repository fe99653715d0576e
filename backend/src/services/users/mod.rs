//! # Personnel service
//!
//! Endpoints for the `users` table.
//!
//! *   **`GET ""`**: `list::process`: all personnel records.
//! *   **`POST /save`**: `save::process`: upsert keyed on id. A write that
//!     would give a zone a second manager is rejected by the partial unique
//!     index (see `db::init`).
//! *   **`DELETE /{user_id}`**: `remove::process`: unconditional removal;
//!     references held elsewhere keep their ids and resolve to
//!     placeholders on the client.

mod list;
mod remove;
mod save;

use actix_web::web::{delete, get, post, scope};
use actix_web::Scope;

const API_PATH: &str = "/api/users";

pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("", get().to(list::process))
        .route("/save", post().to(save::process))
        .route("/{user_id}", delete().to(remove::process))
}

#[cfg(test)]
pub(crate) fn sample_user(id: &str, name: &str, role: &str, zonal: &str) -> common::wire::UserRecord {
    common::wire::UserRecord {
        id: id.to_string(),
        name: name.to_string(),
        role: role.to_string(),
        zonal: common::model::zonal::Zonal::from_id(zonal).expect("known zonal"),
        registration_number: None,
        email: None,
    }
}
