use async_trait::async_trait;
use thiserror::Error;

use crate::model::request::RepairRequest;
use crate::model::role::RoleLabel;
use crate::model::user::User;
use crate::model::zonal::ZonalMetadata;

/// Any storage-layer failure, flattened to a human-readable message. The
/// gateway performs no retry and no partial rollback; recovery belongs to
/// the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct PersistenceError {
    pub message: String,
}

impl PersistenceError {
    pub fn new(message: impl Into<String>) -> PersistenceError {
        PersistenceError {
            message: message.into(),
        }
    }
}

/// Sole boundary between the domain store and durable storage.
///
/// Requests support the full CRUD surface; users are upserted; zonal
/// metadata supports only list/upsert (rows are never deleted). The role
/// dictionary lives in browser-local storage, never in the remote backend,
/// but it crosses the same boundary so the store has a single place to
/// reach durable state. Implementations hold no cached state.
///
/// Futures are `?Send`: the production implementation runs on the browser
/// event loop, whose futures are not `Send`.
#[async_trait(?Send)]
pub trait Gateway {
    async fn list_requests(&self) -> Result<Vec<RepairRequest>, PersistenceError>;
    async fn create_request(&self, request: &RepairRequest) -> Result<(), PersistenceError>;
    async fn update_request(&self, request: &RepairRequest) -> Result<(), PersistenceError>;
    async fn delete_request(&self, id: &str) -> Result<(), PersistenceError>;

    async fn list_users(&self) -> Result<Vec<User>, PersistenceError>;
    async fn save_user(&self, user: &User) -> Result<(), PersistenceError>;
    async fn delete_user(&self, id: &str) -> Result<(), PersistenceError>;

    async fn list_zonals(&self) -> Result<Vec<ZonalMetadata>, PersistenceError>;
    async fn save_zonal(&self, zonal: &ZonalMetadata) -> Result<(), PersistenceError>;

    async fn load_roles(&self) -> Result<Vec<RoleLabel>, PersistenceError>;
    async fn save_roles(&self, roles: &[RoleLabel]) -> Result<(), PersistenceError>;
}
