//! The session-wide domain store.
//!
//! The store holds the authoritative in-memory copy of every entity
//! collection and runs the confirm-then-apply mutation protocol: a mutation
//! first goes through the [`Gateway`]; only on success is the affected
//! collection swapped wholesale for a new one. Collections live behind
//! `Rc<Vec<_>>`, so a reader holding a snapshot always sees either the
//! pre-mutation or the post-mutation collection, never a half-applied one.
//!
//! Business rules that are pure lookups over current state (duplicate ids,
//! one manager per zone, role removal guards) are checked before the
//! gateway is ever called; the backing schema enforces the manager rule a
//! second time, so the check here is a fast path, not the source of truth.
//!
//! Every mutation outcome, success or failure, emits exactly one toast.
//! Read paths emit nothing and never fail.

use std::cell::RefCell;
use std::rc::Rc;

use thiserror::Error;

use crate::model::request::RepairRequest;
use crate::model::role::{self, RoleLabel};
use crate::model::toast::{Severity, Toast};
use crate::model::user::User;
use crate::model::zonal::{Zonal, ZonalMetadata};
use crate::store::gateway::{Gateway, PersistenceError};
use crate::store::toasts::ToastRack;
use crate::store::views::resolve_zonal_name;

use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum StoreError {
    /// A business rule rejected the mutation before any gateway call.
    #[error("{0}")]
    Validation(String),
    /// The gateway reported a storage failure; in-memory state is untouched.
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

#[derive(Default)]
struct Collections {
    requests: Rc<Vec<RepairRequest>>,
    users: Rc<Vec<User>>,
    zonals: Rc<Vec<ZonalMetadata>>,
    roles: Rc<Vec<RoleLabel>>,
    /// Bumped on every commit so the UI can cheaply detect change.
    generation: u64,
}

/// Handle to the shared session state. Cloning is cheap and every clone
/// observes the same collections; the store itself is single-threaded.
pub struct DomainStore<G> {
    gateway: Rc<G>,
    state: Rc<RefCell<Collections>>,
    toasts: Rc<RefCell<ToastRack>>,
}

impl<G> Clone for DomainStore<G> {
    fn clone(&self) -> Self {
        DomainStore {
            gateway: Rc::clone(&self.gateway),
            state: Rc::clone(&self.state),
            toasts: Rc::clone(&self.toasts),
        }
    }
}

impl<G: Gateway> DomainStore<G> {
    pub fn new(gateway: G) -> DomainStore<G> {
        DomainStore {
            gateway: Rc::new(gateway),
            state: Rc::new(RefCell::new(Collections::default())),
            toasts: Rc::new(RefCell::new(ToastRack::new())),
        }
    }

    /// Fetches every collection from the gateway and replaces the session
    /// snapshot. Zonal metadata and the role dictionary fall back to their
    /// seed values when the backing store has nothing yet.
    pub async fn load_all(&self) -> Result<(), StoreError> {
        let requests = self.gateway.list_requests().await;
        let users = self.gateway.list_users().await;
        let zonals = self.gateway.list_zonals().await;
        let roles = self.gateway.load_roles().await;

        let (requests, users, mut zonals, mut roles) = match (requests, users, zonals, roles) {
            (Ok(r), Ok(u), Ok(z), Ok(l)) => (r, u, z, l),
            (Err(e), ..) | (_, Err(e), ..) | (_, _, Err(e), _) | (_, _, _, Err(e)) => {
                return Err(self.persistence_failure(e));
            }
        };
        if zonals.is_empty() {
            zonals = ZonalMetadata::defaults();
        }
        if roles.is_empty() {
            roles = RoleLabel::built_in();
        }

        let mut state = self.state.borrow_mut();
        state.requests = Rc::new(requests);
        state.users = Rc::new(users);
        state.zonals = Rc::new(zonals);
        state.roles = Rc::new(roles);
        state.generation += 1;
        Ok(())
    }

    // ---- snapshots -----------------------------------------------------

    pub fn requests(&self) -> Rc<Vec<RepairRequest>> {
        Rc::clone(&self.state.borrow().requests)
    }

    pub fn users(&self) -> Rc<Vec<User>> {
        Rc::clone(&self.state.borrow().users)
    }

    pub fn zonals(&self) -> Rc<Vec<ZonalMetadata>> {
        Rc::clone(&self.state.borrow().zonals)
    }

    pub fn roles(&self) -> Rc<Vec<RoleLabel>> {
        Rc::clone(&self.state.borrow().roles)
    }

    pub fn generation(&self) -> u64 {
        self.state.borrow().generation
    }

    /// Display name for a zone; falls back to the raw id when no metadata
    /// row exists.
    pub fn zonal_name(&self, id: Zonal) -> String {
        resolve_zonal_name(&self.state.borrow().zonals, id)
    }

    /// Label for a role key; falls back to the raw key when the dictionary
    /// has no entry. The fallback is an "unresolved" signal.
    pub fn role_label(&self, key: &str) -> String {
        self.state
            .borrow()
            .roles
            .iter()
            .find(|r| r.key == key)
            .map_or_else(|| key.to_string(), |r| r.label.clone())
    }

    // ---- notifications -------------------------------------------------

    pub fn toasts(&self) -> Vec<Toast> {
        self.toasts.borrow().toasts().to_vec()
    }

    pub fn dismiss_toast(&self, id: &str) {
        self.toasts.borrow_mut().dismiss(id);
    }

    pub fn notify(&self, message: impl Into<String>, severity: Severity) {
        self.toasts.borrow_mut().notify(message, severity);
    }

    // ---- repair requests -----------------------------------------------

    /// Creates a request. The id must not be in use; on commit the new
    /// request is prepended, keeping the most-recent-first display order.
    pub async fn add_request(&self, request: RepairRequest) -> Result<(), StoreError> {
        {
            let state = self.state.borrow();
            if state.requests.iter().any(|r| r.id == request.id) {
                drop(state);
                return Err(self.reject(format!(
                    "Já existe uma solicitação com o identificador {}.",
                    request.id
                )));
            }
        }

        self.gateway
            .create_request(&request)
            .await
            .map_err(|e| self.persistence_failure(e))?;

        let mut next = Vec::with_capacity(self.state.borrow().requests.len() + 1);
        next.push(request);
        next.extend(self.state.borrow().requests.iter().cloned());
        self.commit_requests(next);
        self.toasts
            .borrow_mut()
            .success("Solicitação registrada com sucesso.");
        Ok(())
    }

    /// Replaces a request wholesale by id. Partial updates are not
    /// supported; callers supply the complete updated entity.
    pub async fn update_request(&self, request: RepairRequest) -> Result<(), StoreError> {
        {
            let state = self.state.borrow();
            if !state.requests.iter().any(|r| r.id == request.id) {
                drop(state);
                return Err(self.reject(format!("Solicitação {} não encontrada.", request.id)));
            }
        }

        self.gateway
            .update_request(&request)
            .await
            .map_err(|e| self.persistence_failure(e))?;

        let next = self
            .state
            .borrow()
            .requests
            .iter()
            .map(|r| {
                if r.id == request.id {
                    request.clone()
                } else {
                    r.clone()
                }
            })
            .collect();
        self.commit_requests(next);
        self.toasts
            .borrow_mut()
            .success("Solicitação atualizada com sucesso.");
        Ok(())
    }

    /// Removes a request by id. An absent id is the gateway's concern to
    /// report; the store does not guard against it.
    pub async fn delete_request(&self, id: &str) -> Result<(), StoreError> {
        self.gateway
            .delete_request(id)
            .await
            .map_err(|e| self.persistence_failure(e))?;

        let next = self
            .state
            .borrow()
            .requests
            .iter()
            .filter(|r| r.id != id)
            .cloned()
            .collect();
        self.commit_requests(next);
        self.toasts.borrow_mut().success("Solicitação removida.");
        Ok(())
    }

    // ---- personnel -----------------------------------------------------

    pub async fn add_user(&self, user: User) -> Result<(), StoreError> {
        self.persist_user(user).await
    }

    pub async fn update_user(&self, user: User) -> Result<(), StoreError> {
        self.persist_user(user).await
    }

    async fn persist_user(&self, user: User) -> Result<(), StoreError> {
        if let Some(existing) = self.manager_conflict(&user) {
            return Err(self.reject(format!(
                "{} já possui gerente: {}.",
                self.zonal_name(user.zonal),
                existing.name
            )));
        }

        self.gateway
            .save_user(&user)
            .await
            .map_err(|e| self.persistence_failure(e))?;

        let mut next: Vec<User> = self.state.borrow().users.to_vec();
        match next.iter_mut().find(|u| u.id == user.id) {
            Some(slot) => *slot = user,
            None => next.push(user),
        }
        self.commit_users(next);
        self.toasts
            .borrow_mut()
            .success("Colaborador salvo com sucesso.");
        Ok(())
    }

    /// At most one user with the Manager role per zone. The scan excludes
    /// the user being edited so a manager can be re-saved in place.
    fn manager_conflict(&self, candidate: &User) -> Option<User> {
        if candidate.role != role::MANAGER {
            return None;
        }
        self.state
            .borrow()
            .users
            .iter()
            .find(|u| u.role == role::MANAGER && u.zonal == candidate.zonal && u.id != candidate.id)
            .cloned()
    }

    /// Deletes unconditionally. References left behind (zone manager,
    /// request technician) stay dangling and resolve to placeholders.
    pub async fn delete_user(&self, id: &str) -> Result<(), StoreError> {
        self.gateway
            .delete_user(id)
            .await
            .map_err(|e| self.persistence_failure(e))?;

        let next = self
            .state
            .borrow()
            .users
            .iter()
            .filter(|u| u.id != id)
            .cloned()
            .collect();
        self.commit_users(next);
        self.toasts.borrow_mut().success("Colaborador removido.");
        Ok(())
    }

    // ---- zonal metadata ------------------------------------------------

    /// Replaces a zone's metadata by id. No validation beyond the id match.
    pub async fn update_zonal(&self, zonal: ZonalMetadata) -> Result<(), StoreError> {
        self.gateway
            .save_zonal(&zonal)
            .await
            .map_err(|e| self.persistence_failure(e))?;

        let mut next: Vec<ZonalMetadata> = self.state.borrow().zonals.to_vec();
        match next.iter_mut().find(|z| z.id == zonal.id) {
            Some(slot) => *slot = zonal,
            None => next.push(zonal),
        }
        self.commit_zonals(next);
        self.toasts.borrow_mut().success("Zonal atualizada.");
        Ok(())
    }

    // ---- role dictionary -----------------------------------------------

    /// Adds a custom role under a generated unique key.
    pub async fn add_role(&self, label: String) -> Result<(), StoreError> {
        if label.trim().is_empty() {
            return Err(self.reject("Informe um nome para a função."));
        }

        let mut next: Vec<RoleLabel> = self.state.borrow().roles.to_vec();
        next.push(RoleLabel::new(
            format!("role_{}", Uuid::new_v4().simple()),
            label.trim(),
        ));

        self.gateway
            .save_roles(&next)
            .await
            .map_err(|e| self.persistence_failure(e))?;

        self.commit_roles(next);
        self.toasts.borrow_mut().success("Função adicionada.");
        Ok(())
    }

    /// Removes a custom role. Built-in roles and roles still referenced by
    /// a user are rejected without touching the gateway.
    pub async fn remove_role(&self, key: &str) -> Result<(), StoreError> {
        if role::is_built_in(key) {
            let message = "Funções padrão não podem ser removidas.";
            self.toasts.borrow_mut().info(message);
            return Err(StoreError::Validation(message.to_string()));
        }
        let in_use = {
            let state = self.state.borrow();
            state.users.iter().find(|u| u.role == key).cloned()
        };
        if let Some(user) = in_use {
            return Err(self.reject(format!("A função ainda está em uso por {}.", user.name)));
        }

        let next: Vec<RoleLabel> = self
            .state
            .borrow()
            .roles
            .iter()
            .filter(|r| r.key != key)
            .cloned()
            .collect();

        self.gateway
            .save_roles(&next)
            .await
            .map_err(|e| self.persistence_failure(e))?;

        self.commit_roles(next);
        self.toasts.borrow_mut().success("Função removida.");
        Ok(())
    }

    // ---- commit & failure helpers --------------------------------------

    fn commit_requests(&self, requests: Vec<RepairRequest>) {
        let mut state = self.state.borrow_mut();
        state.requests = Rc::new(requests);
        state.generation += 1;
    }

    fn commit_users(&self, users: Vec<User>) {
        let mut state = self.state.borrow_mut();
        state.users = Rc::new(users);
        state.generation += 1;
    }

    fn commit_zonals(&self, zonals: Vec<ZonalMetadata>) {
        let mut state = self.state.borrow_mut();
        state.zonals = Rc::new(zonals);
        state.generation += 1;
    }

    fn commit_roles(&self, roles: Vec<RoleLabel>) {
        let mut state = self.state.borrow_mut();
        state.roles = Rc::new(roles);
        state.generation += 1;
    }

    fn reject(&self, message: impl Into<String>) -> StoreError {
        let message = message.into();
        self.toasts.borrow_mut().error(message.clone());
        StoreError::Validation(message)
    }

    fn persistence_failure(&self, error: PersistenceError) -> StoreError {
        self.toasts.borrow_mut().error(error.message.clone());
        StoreError::Persistence(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::request::{LocationData, RequestStatus};
    use crate::model::toast::Severity;

    /// In-memory gateway that records every call and can be armed to fail
    /// the next write.
    #[derive(Default)]
    struct MockGateway {
        calls: RefCell<Vec<&'static str>>,
        fail_with: RefCell<Option<String>>,
        requests: RefCell<Vec<RepairRequest>>,
        users: RefCell<Vec<User>>,
        zonals: RefCell<Vec<ZonalMetadata>>,
        roles: RefCell<Vec<RoleLabel>>,
    }

    impl MockGateway {
        fn check_failure(&self) -> Result<(), PersistenceError> {
            match self.fail_with.borrow().as_ref() {
                Some(message) => Err(PersistenceError::new(message.clone())),
                None => Ok(()),
            }
        }

        fn calls(&self) -> Vec<&'static str> {
            self.calls.borrow().clone()
        }
    }

    #[async_trait::async_trait(?Send)]
    impl Gateway for MockGateway {
        async fn list_requests(&self) -> Result<Vec<RepairRequest>, PersistenceError> {
            self.calls.borrow_mut().push("list_requests");
            self.check_failure()?;
            Ok(self.requests.borrow().clone())
        }

        async fn create_request(&self, _request: &RepairRequest) -> Result<(), PersistenceError> {
            self.calls.borrow_mut().push("create_request");
            self.check_failure()
        }

        async fn update_request(&self, _request: &RepairRequest) -> Result<(), PersistenceError> {
            self.calls.borrow_mut().push("update_request");
            self.check_failure()
        }

        async fn delete_request(&self, _id: &str) -> Result<(), PersistenceError> {
            self.calls.borrow_mut().push("delete_request");
            self.check_failure()
        }

        async fn list_users(&self) -> Result<Vec<User>, PersistenceError> {
            self.calls.borrow_mut().push("list_users");
            self.check_failure()?;
            Ok(self.users.borrow().clone())
        }

        async fn save_user(&self, _user: &User) -> Result<(), PersistenceError> {
            self.calls.borrow_mut().push("save_user");
            self.check_failure()
        }

        async fn delete_user(&self, _id: &str) -> Result<(), PersistenceError> {
            self.calls.borrow_mut().push("delete_user");
            self.check_failure()
        }

        async fn list_zonals(&self) -> Result<Vec<ZonalMetadata>, PersistenceError> {
            self.calls.borrow_mut().push("list_zonals");
            self.check_failure()?;
            Ok(self.zonals.borrow().clone())
        }

        async fn save_zonal(&self, _zonal: &ZonalMetadata) -> Result<(), PersistenceError> {
            self.calls.borrow_mut().push("save_zonal");
            self.check_failure()
        }

        async fn load_roles(&self) -> Result<Vec<RoleLabel>, PersistenceError> {
            self.calls.borrow_mut().push("load_roles");
            self.check_failure()?;
            Ok(self.roles.borrow().clone())
        }

        async fn save_roles(&self, _roles: &[RoleLabel]) -> Result<(), PersistenceError> {
            self.calls.borrow_mut().push("save_roles");
            self.check_failure()
        }
    }

    fn request(id: &str, zonal: Zonal) -> RepairRequest {
        RepairRequest {
            id: id.to_string(),
            protocol: format!("2024.{id}"),
            sei_number: "00.123.456/2024".to_string(),
            contract: "CTR-05/2023".to_string(),
            description: "Recapeamento asfáltico".to_string(),
            location: LocationData {
                latitude: -23.55,
                longitude: -46.63,
                address: "Av. Paulista, 1000".to_string(),
            },
            visit_date: "2024-05-15".to_string(),
            status: RequestStatus::Open,
            technician_id: "u2".to_string(),
            zonal,
            photo_before: None,
            photo_after: None,
            created_at: "2024-05-10".to_string(),
        }
    }

    fn user(id: &str, name: &str, role_key: &str, zonal: Zonal) -> User {
        User {
            id: id.to_string(),
            name: name.to_string(),
            role: role_key.to_string(),
            zonal,
            registration_number: None,
            email: None,
        }
    }

    async fn loaded_store(gateway: MockGateway) -> DomainStore<MockGateway> {
        let store = DomainStore::new(gateway);
        store.load_all().await.unwrap();
        store
    }

    fn last_toast(store: &DomainStore<MockGateway>) -> Toast {
        store.toasts().last().cloned().expect("a toast was queued")
    }

    #[tokio::test]
    async fn add_request_prepends_and_queues_success_toast() {
        let gateway = MockGateway::default();
        gateway.requests.borrow_mut().push(request("req_001", Zonal::South));
        let store = loaded_store(gateway).await;

        store.add_request(request("req_100", Zonal::North)).await.unwrap();

        let requests = store.requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].id, "req_100");
        assert_eq!(requests[1].id, "req_001");
        let toast = last_toast(&store);
        assert_eq!(toast.severity, Severity::Success);
    }

    #[tokio::test]
    async fn duplicate_request_id_is_rejected_before_the_gateway() {
        let gateway = MockGateway::default();
        gateway.requests.borrow_mut().push(request("req_001", Zonal::South));
        let store = loaded_store(gateway).await;

        let err = store.add_request(request("req_001", Zonal::North)).await.unwrap_err();
        assert!(matches!(err, StoreError::Validation(_)));
        assert!(!store.gateway.calls().contains(&"create_request"));
        assert_eq!(store.requests().len(), 1);
        assert_eq!(last_toast(&store).severity, Severity::Error);
    }

    #[tokio::test]
    async fn failed_update_leaves_the_collection_untouched() {
        let gateway = MockGateway::default();
        gateway.requests.borrow_mut().push(request("req_001", Zonal::South));
        let store = loaded_store(gateway).await;

        let before = store.requests();
        let generation = store.generation();

        *store.gateway.fail_with.borrow_mut() = Some("violação de restrição".to_string());
        let mut edited = request("req_001", Zonal::South);
        edited.status = RequestStatus::Completed;
        let err = store.update_request(edited).await.unwrap_err();

        assert!(matches!(err, StoreError::Persistence(_)));
        // The snapshot reference was never swapped.
        assert!(Rc::ptr_eq(&before, &store.requests()));
        assert_eq!(store.generation(), generation);
        // The failure message is surfaced verbatim.
        assert_eq!(last_toast(&store).message, "violação de restrição");
    }

    #[tokio::test]
    async fn update_request_replaces_by_id() {
        let gateway = MockGateway::default();
        gateway.requests.borrow_mut().extend([
            request("req_001", Zonal::South),
            request("req_002", Zonal::North),
        ]);
        let store = loaded_store(gateway).await;

        let mut edited = request("req_002", Zonal::North);
        edited.status = RequestStatus::Completed;
        edited.photo_after = Some("data:image/png;base64,xyz".to_string());
        store.update_request(edited.clone()).await.unwrap();

        let requests = store.requests();
        assert_eq!(requests[0].id, "req_001");
        assert_eq!(requests[1], edited);
    }

    #[tokio::test]
    async fn update_of_unknown_request_is_a_local_rejection() {
        let store = loaded_store(MockGateway::default()).await;
        let err = store.update_request(request("req_404", Zonal::North)).await.unwrap_err();
        assert!(matches!(err, StoreError::Validation(_)));
        assert!(!store.gateway.calls().contains(&"update_request"));
    }

    #[tokio::test]
    async fn delete_request_removes_by_id() {
        let gateway = MockGateway::default();
        gateway.requests.borrow_mut().extend([
            request("req_001", Zonal::South),
            request("req_002", Zonal::North),
        ]);
        let store = loaded_store(gateway).await;

        store.delete_request("req_001").await.unwrap();
        let requests = store.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].id, "req_002");
    }

    #[tokio::test]
    async fn second_manager_for_a_zone_is_rejected_naming_the_incumbent() {
        let gateway = MockGateway::default();
        gateway.users.borrow_mut().push(user("u4", "Juliana Lima", role::MANAGER, Zonal::South));
        let store = loaded_store(gateway).await;

        let err = store
            .add_user(user("u9", "Marcos Dias", role::MANAGER, Zonal::South))
            .await
            .unwrap_err();

        assert!(matches!(err, StoreError::Validation(_)));
        assert!(!store.gateway.calls().contains(&"save_user"));
        assert_eq!(store.users().len(), 1);
        assert!(last_toast(&store).message.contains("Juliana Lima"));
    }

    #[tokio::test]
    async fn a_manager_can_be_edited_in_place() {
        let gateway = MockGateway::default();
        gateway.users.borrow_mut().push(user("u4", "Juliana Lima", role::MANAGER, Zonal::South));
        let store = loaded_store(gateway).await;

        let mut edited = user("u4", "Juliana Lima e Silva", role::MANAGER, Zonal::South);
        edited.email = Some("juliana@prefeitura.gov.br".to_string());
        store.update_user(edited.clone()).await.unwrap();

        assert_eq!(store.users()[0], edited);
    }

    #[tokio::test]
    async fn managers_of_different_zones_coexist() {
        let gateway = MockGateway::default();
        gateway.users.borrow_mut().push(user("u1", "Ricardo Souza", role::MANAGER, Zonal::North));
        let store = loaded_store(gateway).await;

        store
            .add_user(user("u4", "Juliana Lima", role::MANAGER, Zonal::South))
            .await
            .unwrap();
        assert_eq!(store.users().len(), 2);
    }

    #[tokio::test]
    async fn delete_user_leaves_dangling_references_resolvable() {
        let gateway = MockGateway::default();
        gateway.users.borrow_mut().push(user("u2", "Ana Oliveira", role::COLLABORATOR, Zonal::North));
        gateway.requests.borrow_mut().push(request("req_001", Zonal::North));
        let store = loaded_store(gateway).await;

        store.delete_user("u2").await.unwrap();
        assert!(store.users().is_empty());
        // The request still points at u2; lookups degrade, nothing fails.
        assert_eq!(store.requests()[0].technician_id, "u2");
    }

    #[tokio::test]
    async fn built_in_roles_cannot_be_removed() {
        let store = loaded_store(MockGateway::default()).await;
        let err = store.remove_role(role::MANAGER).await.unwrap_err();
        assert!(matches!(err, StoreError::Validation(_)));
        assert!(!store.gateway.calls().contains(&"save_roles"));
        assert_eq!(store.roles().len(), 3);
        assert_eq!(last_toast(&store).severity, Severity::Info);
    }

    #[tokio::test]
    async fn role_in_use_cannot_be_removed() {
        let gateway = MockGateway::default();
        gateway.roles.borrow_mut().extend(RoleLabel::built_in());
        gateway
            .roles
            .borrow_mut()
            .push(RoleLabel::new("role_123", "Topógrafo"));
        gateway.users.borrow_mut().push(user("u7", "Carlos Santos", "role_123", Zonal::East));
        let store = loaded_store(gateway).await;

        let err = store.remove_role("role_123").await.unwrap_err();
        assert!(matches!(err, StoreError::Validation(_)));
        assert!(!store.gateway.calls().contains(&"save_roles"));
        assert_eq!(store.roles().len(), 4);
        assert!(last_toast(&store).message.contains("Carlos Santos"));
    }

    #[tokio::test]
    async fn unused_custom_role_is_removed() {
        let gateway = MockGateway::default();
        gateway.roles.borrow_mut().extend(RoleLabel::built_in());
        gateway
            .roles
            .borrow_mut()
            .push(RoleLabel::new("role_123", "Topógrafo"));
        let store = loaded_store(gateway).await;

        store.remove_role("role_123").await.unwrap();
        assert_eq!(store.roles().len(), 3);
    }

    #[tokio::test]
    async fn added_roles_get_fresh_generated_keys() {
        let store = loaded_store(MockGateway::default()).await;
        store.add_role("Topógrafo".to_string()).await.unwrap();
        store.add_role("Fiscal".to_string()).await.unwrap();

        let roles = store.roles();
        assert_eq!(roles.len(), 5);
        let added: Vec<&RoleLabel> = roles.iter().filter(|r| !role::is_built_in(&r.key)).collect();
        assert_ne!(added[0].key, added[1].key);
        assert!(added.iter().all(|r| r.key.starts_with("role_")));
    }

    #[tokio::test]
    async fn lookups_fall_back_to_the_raw_identifier() {
        let store = loaded_store(MockGateway::default()).await;
        // Defaults were seeded, so names resolve; an unknown role key comes
        // back unchanged.
        assert_eq!(store.zonal_name(Zonal::West), "Zonal Oeste");
        assert_eq!(store.role_label(role::MANAGER), "Gerente");
        assert_eq!(store.role_label("role_missing"), "role_missing");
    }

    #[tokio::test]
    async fn renamed_zonal_resolves_to_the_override() {
        let store = loaded_store(MockGateway::default()).await;
        let mut meta = store.zonals()[0].clone();
        meta.name = "Regional Norte".to_string();
        store.update_zonal(meta).await.unwrap();
        assert_eq!(store.zonal_name(Zonal::North), "Regional Norte");
    }

    #[tokio::test]
    async fn load_failure_queues_an_error_toast() {
        let gateway = MockGateway::default();
        *gateway.fail_with.borrow_mut() = Some("sem conexão".to_string());
        let store = DomainStore::new(gateway);

        let err = store.load_all().await.unwrap_err();
        assert!(matches!(err, StoreError::Persistence(_)));
        assert_eq!(last_toast(&store).message, "sem conexão");
    }
}
