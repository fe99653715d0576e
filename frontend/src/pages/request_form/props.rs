use yew::prelude::*;

use crate::app::StoreHandle;

#[derive(Properties, PartialEq)]
pub struct NewRequestProps {
    pub handle: StoreHandle,
    /// Emitted after the request has been committed by the store.
    pub on_saved: Callback<()>,
    pub on_back: Callback<()>,
}
