use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::platform::spawn_local;
use yew::prelude::*;

use common::model::request::RequestStatus;
use common::model::toast::Severity;
use common::model::zonal::Zonal;
use common::store::views::{self, RequestFilter};
use common::wire::{RepairRequestRecord, ReportPayload, UserRecord};

use crate::app::StoreHandle;
use crate::files;

/// Filterable list of every request, with CSV/PDF export of the currently
/// filtered snapshot.
pub struct RequestListPage {
    filter: RequestFilter,
    exporting: bool,
}

#[derive(Properties, PartialEq)]
pub struct RequestListProps {
    pub handle: StoreHandle,
    pub on_open: Callback<String>,
    pub on_new: Callback<()>,
}

pub enum Msg {
    SetSearch(String),
    SetStatus(String),
    SetZonal(String),
    Export(&'static str),
    ExportFinished,
}

impl RequestListPage {
    fn snapshot_payload(&self, ctx: &Context<Self>) -> ReportPayload {
        let store = &ctx.props().handle.store;
        let requests = store.requests();
        let filtered = views::filter_requests(&requests, &self.filter);
        ReportPayload {
            requests: filtered.into_iter().map(RepairRequestRecord::from).collect(),
            users: store.users().iter().map(UserRecord::from).collect(),
        }
    }
}

impl Component for RequestListPage {
    type Message = Msg;
    type Properties = RequestListProps;

    fn create(_ctx: &Context<Self>) -> Self {
        RequestListPage {
            filter: RequestFilter::default(),
            exporting: false,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::SetSearch(value) => {
                self.filter.search = value;
                true
            }
            Msg::SetStatus(value) => {
                self.filter.status = RequestStatus::from_label(&value);
                true
            }
            Msg::SetZonal(value) => {
                self.filter.zonal = Zonal::from_id(&value);
                true
            }
            Msg::Export(format) => {
                if self.exporting {
                    return false;
                }
                self.exporting = true;

                let payload = self.snapshot_payload(ctx);
                let handle = ctx.props().handle.clone();
                let link = ctx.link().clone();
                spawn_local(async move {
                    let result = export_report(format, &payload).await;
                    if let Err(message) = result {
                        handle.store.notify(message, Severity::Error);
                        handle.on_change.emit(());
                    }
                    link.send_message(Msg::ExportFinished);
                });
                true
            }
            Msg::ExportFinished => {
                self.exporting = false;
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let store = &ctx.props().handle.store;
        let requests = store.requests();
        let users = store.users();
        let filtered = views::filter_requests(&requests, &self.filter);

        html! {
            <>
                <div class="row" style="justify-content: space-between;">
                    <div>
                        <h2>{"Solicitações de Reparos"}</h2>
                        <p class="muted">{"Gerencie e filtre todos os chamados ativos."}</p>
                    </div>
                    <div class="row">
                        <button
                            class="secondary"
                            disabled={self.exporting}
                            onclick={link.callback(|_| Msg::Export("csv"))}
                        >
                            {"Exportar CSV"}
                        </button>
                        <button
                            class="secondary"
                            disabled={self.exporting}
                            onclick={link.callback(|_| Msg::Export("pdf"))}
                        >
                            {"Exportar PDF"}
                        </button>
                        <button class="primary" onclick={ctx.props().on_new.reform(|_| ())}>
                            {"Nova Visita"}
                        </button>
                    </div>
                </div>

                <div class="card row">
                    <input
                        style="flex: 2; min-width: 160px;"
                        type="text"
                        placeholder="Pesquisar..."
                        value={self.filter.search.clone()}
                        oninput={link.callback(|e: InputEvent| {
                            Msg::SetSearch(e.target_unchecked_into::<HtmlInputElement>().value())
                        })}
                    />
                    <select
                        style="flex: 1; min-width: 140px; width: auto;"
                        onchange={link.callback(|e: Event| {
                            Msg::SetStatus(e.target_unchecked_into::<HtmlSelectElement>().value())
                        })}
                    >
                        <option value="all" selected={self.filter.status.is_none()}>{"Todos Status"}</option>
                        {
                            for RequestStatus::ALL.into_iter().map(|status| html! {
                                <option
                                    value={status.label()}
                                    selected={self.filter.status == Some(status)}
                                >
                                    { status.label() }
                                </option>
                            })
                        }
                    </select>
                    <select
                        style="flex: 1; min-width: 140px; width: auto;"
                        onchange={link.callback(|e: Event| {
                            Msg::SetZonal(e.target_unchecked_into::<HtmlSelectElement>().value())
                        })}
                    >
                        <option value="all" selected={self.filter.zonal.is_none()}>{"Todas Zonais"}</option>
                        {
                            for Zonal::ALL.into_iter().map(|zonal| html! {
                                <option
                                    value={zonal.id()}
                                    selected={self.filter.zonal == Some(zonal)}
                                >
                                    { store.zonal_name(zonal) }
                                </option>
                            })
                        }
                    </select>
                    <span class="muted">{ format!("{} resultados", filtered.len()) }</span>
                </div>

                {
                    if filtered.is_empty() {
                        html! {
                            <div class="card muted">
                                {"Nenhuma solicitação encontrada. Ajuste os filtros ou crie um novo registro."}
                            </div>
                        }
                    } else {
                        html! {
                            for filtered.iter().map(|request| {
                                let technician = users
                                    .iter()
                                    .find(|u| u.id == request.technician_id)
                                    .map_or_else(|| "Não atribuído".to_string(), |u| u.name.clone());
                                let id = request.id.clone();
                                let on_open = ctx.props().on_open.clone();
                                html! {
                                    <button
                                        class="list-item"
                                        key={request.id.clone()}
                                        onclick={Callback::from(move |_: MouseEvent| on_open.emit(id.clone()))}
                                    >
                                        <div class="row">
                                            <span class="badge">{ request.status.label() }</span>
                                            <strong>{ &request.protocol }</strong>
                                            <span class="muted">{ format!("SEI: {}", request.sei_number) }</span>
                                            <span class="badge">{ store.zonal_name(request.zonal) }</span>
                                        </div>
                                        <p>{ &request.description }</p>
                                        <div class="row muted">
                                            <span>{ &request.location.address }</span>
                                            <span>{ &request.visit_date }</span>
                                            <span>{ technician }</span>
                                        </div>
                                    </button>
                                }
                            })
                        }
                    }
                }
            </>
        }
    }
}

/// Posts the snapshot and downloads the returned file.
async fn export_report(format: &'static str, payload: &ReportPayload) -> Result<(), String> {
    let url = format!("/api/reports/{}", format);
    let request = gloo_net::http::Request::post(&url)
        .json(payload)
        .map_err(|e| e.to_string())?;
    let response = request.send().await.map_err(|e| e.to_string())?;
    if !response.ok() {
        let body = response.text().await.unwrap_or_default();
        return Err(if body.trim().is_empty() {
            format!("Falha ao exportar o relatório (HTTP {}).", response.status())
        } else {
            body
        });
    }
    let bytes = response.binary().await.map_err(|e| e.to_string())?;
    files::download_bytes(&bytes, &format!("relatorio_reparos.{}", format));
    Ok(())
}
