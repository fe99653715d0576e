//! Session state core: the domain store, its persistence gateway boundary,
//! the toast notification channel and the derived read-only projections.

pub mod domain;
pub mod gateway;
pub mod toasts;
pub mod views;

pub use domain::{DomainStore, StoreError};
pub use gateway::{Gateway, PersistenceError};
pub use toasts::ToastRack;
