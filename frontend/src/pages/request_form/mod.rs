//! New-visit form: root module wiring the Yew `Component` implementation
//! with submodules for props, state, update logic and view rendering.
//!
//! The form collects the administrative fields, the zone/technician
//! assignment, the GPS fix and the mandatory "before" photo, then builds a
//! complete `RepairRequest` and routes it through the domain store.

mod messages;
mod props;
mod state;
mod update;
mod view;

use yew::prelude::*;

pub use messages::Msg;
pub use props::NewRequestProps;
pub use state::NewRequestPage;

impl Component for NewRequestPage {
    type Message = Msg;
    type Properties = NewRequestProps;

    fn create(_ctx: &Context<Self>) -> Self {
        NewRequestPage::new()
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        update::update(self, ctx, msg)
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        view::view(self, ctx)
    }
}
