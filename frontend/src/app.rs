//! Root component: owns the domain store, the active page and the toast
//! expiry timers. Pages receive a [`StoreHandle`] carrying the store plus a
//! change callback; after any mutation they emit the callback and the whole
//! tree re-renders from fresh snapshots.

use std::collections::HashSet;

use yew::platform::spawn_local;
use yew::prelude::*;

use common::store::DomainStore;
use gloo_timers::future::TimeoutFuture;

use crate::gateway::HttpGateway;
use crate::pages::dashboard::DashboardPage;
use crate::pages::org_setup::OrgSetupPage;
use crate::pages::request_details::RequestDetailsPage;
use crate::pages::request_form::NewRequestPage;
use crate::pages::request_list::RequestListPage;
use crate::toasts::ToastTray;

/// Store access passed down to every page. Equality is the store's commit
/// generation: a commit produces a handle that compares unequal, so child
/// components re-render exactly when the collections changed.
#[derive(Clone)]
pub struct StoreHandle {
    pub store: DomainStore<HttpGateway>,
    pub generation: u64,
    pub on_change: Callback<()>,
}

impl PartialEq for StoreHandle {
    fn eq(&self, other: &Self) -> bool {
        self.generation == other.generation
    }
}

#[derive(Clone, PartialEq)]
pub enum Page {
    Dashboard,
    Requests,
    RequestDetails(String),
    NewRequest,
    Organization,
}

pub enum Msg {
    Loaded,
    StoreChanged,
    Navigate(Page),
    DismissToast(String),
}

pub struct App {
    store: DomainStore<HttpGateway>,
    page: Page,
    loading: bool,
    /// Toast ids that already have an expiry timer running.
    scheduled: HashSet<String>,
}

impl App {
    /// Starts one expiry timer per not-yet-scheduled toast.
    fn schedule_toast_expiry(&mut self, ctx: &Context<Self>) {
        for toast in self.store.toasts() {
            if !self.scheduled.insert(toast.id.clone()) {
                continue;
            }
            let link = ctx.link().clone();
            spawn_local(async move {
                TimeoutFuture::new(toast.duration_ms).await;
                link.send_message(Msg::DismissToast(toast.id));
            });
        }
    }

    fn nav_button(&self, ctx: &Context<Self>, label: &str, page: Page) -> Html {
        let active = match (&self.page, &page) {
            (Page::RequestDetails(_), Page::Requests) => true,
            (current, target) => current == target,
        };
        let class = if active { "nav-btn active" } else { "nav-btn" };
        let target = page.clone();
        html! {
            <button class={class} onclick={ctx.link().callback(move |_| Msg::Navigate(target.clone()))}>
                { label }
            </button>
        }
    }
}

impl Component for App {
    type Message = Msg;
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        let store = DomainStore::new(HttpGateway::default());

        let link = ctx.link().clone();
        let loader = store.clone();
        spawn_local(async move {
            if loader.load_all().await.is_err() {
                gloo_console::error!("falha ao carregar os dados iniciais");
            }
            link.send_message(Msg::Loaded);
        });

        App {
            store,
            page: Page::Dashboard,
            loading: true,
            scheduled: HashSet::new(),
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Loaded => {
                self.loading = false;
                self.schedule_toast_expiry(ctx);
                true
            }
            Msg::StoreChanged => {
                self.schedule_toast_expiry(ctx);
                true
            }
            Msg::Navigate(page) => {
                self.page = page;
                true
            }
            Msg::DismissToast(id) => {
                self.store.dismiss_toast(&id);
                self.scheduled.remove(&id);
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let handle = StoreHandle {
            store: self.store.clone(),
            generation: self.store.generation(),
            on_change: link.callback(|_| Msg::StoreChanged),
        };

        let content = if self.loading {
            html! { <div class="card muted">{"Carregando dados do servidor..."}</div> }
        } else {
            match &self.page {
                Page::Dashboard => html! { <DashboardPage handle={handle.clone()} /> },
                Page::Requests => html! {
                    <RequestListPage
                        handle={handle.clone()}
                        on_open={link.callback(|id: String| Msg::Navigate(Page::RequestDetails(id)))}
                        on_new={link.callback(|_| Msg::Navigate(Page::NewRequest))}
                    />
                },
                Page::RequestDetails(id) => html! {
                    <RequestDetailsPage
                        handle={handle.clone()}
                        request_id={id.clone()}
                        on_back={link.callback(|_| Msg::Navigate(Page::Requests))}
                    />
                },
                Page::NewRequest => html! {
                    <NewRequestPage
                        handle={handle.clone()}
                        on_saved={link.callback(|_| Msg::Navigate(Page::Requests))}
                        on_back={link.callback(|_| Msg::Navigate(Page::Requests))}
                    />
                },
                Page::Organization => html! { <OrgSetupPage handle={handle.clone()} /> },
            }
        };

        html! {
            <div class="layout">
                <aside class="sidebar">
                    <h1>{"SGR-Vias"}</h1>
                    <p class="subtitle">{"Setor de Engenharia - Prefeitura Municipal"}</p>
                    { self.nav_button(ctx, "Dashboard", Page::Dashboard) }
                    { self.nav_button(ctx, "Solicitações", Page::Requests) }
                    { self.nav_button(ctx, "Nova Visita", Page::NewRequest) }
                    { self.nav_button(ctx, "Organização", Page::Organization) }
                </aside>
                <main class="content">
                    { content }
                </main>
                <ToastTray
                    toasts={self.store.toasts()}
                    on_dismiss={link.callback(Msg::DismissToast)}
                />
            </div>
        }
    }
}
