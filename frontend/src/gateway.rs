//! HTTP implementation of the persistence gateway.
//!
//! Remote entities go through the backend's JSON API; the role-label
//! dictionary lives in browser-local storage under a fixed key. Every
//! remote call carries a deadline so a stalled backend surfaces as a
//! normal persistence failure instead of hanging the mutation forever.
//! Non-2xx responses surface their body verbatim as the error message.

use async_trait::async_trait;
use futures_util::future::{self, Either};
use gloo_net::http::{Request, Response};
use gloo_storage::errors::StorageError;
use gloo_storage::{LocalStorage, Storage};
use gloo_timers::future::TimeoutFuture;

use common::model::request::RepairRequest;
use common::model::role::RoleLabel;
use common::model::user::User;
use common::model::zonal::ZonalMetadata;
use common::store::gateway::{Gateway, PersistenceError};
use common::wire::{RepairRequestRecord, UserRecord, ZonalRecord};

const REQUEST_DEADLINE_MS: u32 = 15_000;
const ROLES_STORAGE_KEY: &str = "sgr_roles";

#[derive(Clone, Default)]
pub struct HttpGateway;

fn gateway_err(e: impl std::fmt::Display) -> PersistenceError {
    PersistenceError::new(e.to_string())
}

/// Races the request against the per-call deadline.
async fn with_deadline<F>(send: F) -> Result<Response, PersistenceError>
where
    F: std::future::Future<Output = Result<Response, gloo_net::Error>>,
{
    let send = Box::pin(send);
    let deadline = Box::pin(TimeoutFuture::new(REQUEST_DEADLINE_MS));
    match future::select(send, deadline).await {
        Either::Left((response, _)) => response.map_err(gateway_err),
        Either::Right(_) => Err(PersistenceError::new(
            "Tempo limite excedido ao contactar o servidor.",
        )),
    }
}

/// Accepts 2xx; otherwise surfaces the response body as the error message.
async fn ok_or_body(response: Response) -> Result<Response, PersistenceError> {
    if response.ok() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    let message = if body.trim().is_empty() {
        format!("Falha na comunicação com o servidor (HTTP {}).", response.status())
    } else {
        body
    };
    Err(PersistenceError::new(message))
}

async fn get_json<T: serde::de::DeserializeOwned>(url: &str) -> Result<T, PersistenceError> {
    let response = with_deadline(Request::get(url).send()).await?;
    let response = ok_or_body(response).await?;
    response.json::<T>().await.map_err(gateway_err)
}

async fn post_json<T: serde::Serialize>(url: &str, body: &T) -> Result<(), PersistenceError> {
    let request = Request::post(url).json(body).map_err(gateway_err)?;
    let response = with_deadline(request.send()).await?;
    ok_or_body(response).await?;
    Ok(())
}

async fn put_json<T: serde::Serialize>(url: &str, body: &T) -> Result<(), PersistenceError> {
    let request = Request::put(url).json(body).map_err(gateway_err)?;
    let response = with_deadline(request.send()).await?;
    ok_or_body(response).await?;
    Ok(())
}

async fn delete(url: &str) -> Result<(), PersistenceError> {
    let response = with_deadline(Request::delete(url).send()).await?;
    ok_or_body(response).await?;
    Ok(())
}

#[async_trait(?Send)]
impl Gateway for HttpGateway {
    async fn list_requests(&self) -> Result<Vec<RepairRequest>, PersistenceError> {
        let records: Vec<RepairRequestRecord> = get_json("/api/requests").await?;
        Ok(records.into_iter().map(RepairRequest::from).collect())
    }

    async fn create_request(&self, request: &RepairRequest) -> Result<(), PersistenceError> {
        post_json("/api/requests", &RepairRequestRecord::from(request)).await
    }

    async fn update_request(&self, request: &RepairRequest) -> Result<(), PersistenceError> {
        let url = format!("/api/requests/{}", request.id);
        put_json(&url, &RepairRequestRecord::from(request)).await
    }

    async fn delete_request(&self, id: &str) -> Result<(), PersistenceError> {
        delete(&format!("/api/requests/{}", id)).await
    }

    async fn list_users(&self) -> Result<Vec<User>, PersistenceError> {
        let records: Vec<UserRecord> = get_json("/api/users").await?;
        Ok(records.into_iter().map(User::from).collect())
    }

    async fn save_user(&self, user: &User) -> Result<(), PersistenceError> {
        post_json("/api/users/save", &UserRecord::from(user)).await
    }

    async fn delete_user(&self, id: &str) -> Result<(), PersistenceError> {
        delete(&format!("/api/users/{}", id)).await
    }

    async fn list_zonals(&self) -> Result<Vec<ZonalMetadata>, PersistenceError> {
        let records: Vec<ZonalRecord> = get_json("/api/zonals").await?;
        Ok(records.into_iter().map(ZonalMetadata::from).collect())
    }

    async fn save_zonal(&self, zonal: &ZonalMetadata) -> Result<(), PersistenceError> {
        post_json("/api/zonals/save", &ZonalRecord::from(zonal)).await
    }

    async fn load_roles(&self) -> Result<Vec<RoleLabel>, PersistenceError> {
        match LocalStorage::get::<Vec<RoleLabel>>(ROLES_STORAGE_KEY) {
            Ok(roles) => Ok(roles),
            Err(StorageError::KeyNotFound(_)) => Ok(Vec::new()),
            Err(e) => Err(gateway_err(e)),
        }
    }

    async fn save_roles(&self, roles: &[RoleLabel]) -> Result<(), PersistenceError> {
        LocalStorage::set(ROLES_STORAGE_KEY, roles).map_err(gateway_err)
    }
}
