use web_sys::HtmlInputElement;
use yew::platform::spawn_local;
use yew::prelude::*;

use common::model::request::{RepairRequest, RequestStatus};
use common::model::toast::Severity;
use common::wire::{RepairRequestRecord, ReportPayload, UserRecord};

use crate::app::StoreHandle;
use crate::files;

/// Detail view of a single request: status changes, "after" photo upload,
/// per-request PDF report and deletion.
pub struct RequestDetailsPage {
    busy: bool,
}

#[derive(Properties, PartialEq)]
pub struct RequestDetailsProps {
    pub handle: StoreHandle,
    pub request_id: String,
    pub on_back: Callback<()>,
}

pub enum Msg {
    SetStatus(RequestStatus),
    AfterPhotoSelected(web_sys::File),
    AfterPhotoLoaded(String),
    Delete,
    ExportPdf,
    Done,
}

impl RequestDetailsPage {
    fn current_request(&self, ctx: &Context<Self>) -> Option<RepairRequest> {
        ctx.props()
            .handle
            .store
            .requests()
            .iter()
            .find(|r| r.id == ctx.props().request_id)
            .cloned()
    }

    fn push_update(&mut self, ctx: &Context<Self>, request: RepairRequest) {
        self.busy = true;
        let handle = ctx.props().handle.clone();
        let link = ctx.link().clone();
        spawn_local(async move {
            let _ = handle.store.update_request(request).await;
            handle.on_change.emit(());
            link.send_message(Msg::Done);
        });
    }
}

impl Component for RequestDetailsPage {
    type Message = Msg;
    type Properties = RequestDetailsProps;

    fn create(_ctx: &Context<Self>) -> Self {
        RequestDetailsPage { busy: false }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::SetStatus(status) => {
                if let Some(mut request) = self.current_request(ctx) {
                    if request.status != status {
                        request.status = status;
                        self.push_update(ctx, request);
                    }
                }
                true
            }
            Msg::AfterPhotoSelected(file) => {
                let link = ctx.link().clone();
                spawn_local(async move {
                    let blob = gloo_file::Blob::from(file);
                    if let Ok(data_url) = gloo_file::futures::read_as_data_url(&blob).await {
                        link.send_message(Msg::AfterPhotoLoaded(data_url));
                    }
                });
                false
            }
            Msg::AfterPhotoLoaded(data_url) => {
                if let Some(mut request) = self.current_request(ctx) {
                    // Registering the "after" evidence closes the request.
                    request.photo_after = Some(data_url);
                    request.status = RequestStatus::Completed;
                    self.push_update(ctx, request);
                }
                true
            }
            Msg::Delete => {
                self.busy = true;
                let handle = ctx.props().handle.clone();
                let id = ctx.props().request_id.clone();
                let on_back = ctx.props().on_back.clone();
                let link = ctx.link().clone();
                spawn_local(async move {
                    let result = handle.store.delete_request(&id).await;
                    handle.on_change.emit(());
                    if result.is_ok() {
                        on_back.emit(());
                    }
                    link.send_message(Msg::Done);
                });
                true
            }
            Msg::ExportPdf => {
                let Some(request) = self.current_request(ctx) else {
                    return false;
                };
                self.busy = true;
                let handle = ctx.props().handle.clone();
                let link = ctx.link().clone();
                let payload = ReportPayload {
                    requests: vec![RepairRequestRecord::from(&request)],
                    users: handle.store.users().iter().map(UserRecord::from).collect(),
                };
                let filename = format!("relatorio_{}.pdf", request.protocol.replace('/', "-"));
                spawn_local(async move {
                    match download_pdf(&payload, &filename).await {
                        Ok(_) => {}
                        Err(message) => {
                            handle.store.notify(message, Severity::Error);
                            handle.on_change.emit(());
                        }
                    }
                    link.send_message(Msg::Done);
                });
                true
            }
            Msg::Done => {
                self.busy = false;
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let store = &ctx.props().handle.store;

        let Some(request) = self.current_request(ctx) else {
            return html! {
                <div class="card">
                    <h2>{"Solicitação não encontrada"}</h2>
                    <button class="secondary" onclick={ctx.props().on_back.reform(|_| ())}>
                        {"Voltar para lista"}
                    </button>
                </div>
            };
        };

        let users = store.users();
        let technician = users
            .iter()
            .find(|u| u.id == request.technician_id)
            .map_or_else(|| "Não definido".to_string(), |u| u.name.clone());
        let technician_role = users
            .iter()
            .find(|u| u.id == request.technician_id)
            .map_or_else(String::new, |u| store.role_label(&u.role));

        html! {
            <>
                <div class="row" style="justify-content: space-between;">
                    <div>
                        <div class="row">
                            <span class="badge">{ request.status.label() }</span>
                            <span class="muted">{ format!("#{}", request.id) }</span>
                        </div>
                        <h2>{ &request.protocol }</h2>
                    </div>
                    <div class="row">
                        <button class="secondary" onclick={ctx.props().on_back.reform(|_| ())}>
                            {"Voltar"}
                        </button>
                        <button class="secondary" disabled={self.busy} onclick={link.callback(|_| Msg::ExportPdf)}>
                            {"Gerar Relatório PDF"}
                        </button>
                        <button class="danger" disabled={self.busy} onclick={link.callback(|_| Msg::Delete)}>
                            {"Excluir"}
                        </button>
                    </div>
                </div>

                <div class="card">
                    <div class="row" style="justify-content: space-between;">
                        <h2>{"Informações Detalhadas"}</h2>
                        <div class="row">
                            <button
                                class="secondary"
                                disabled={self.busy}
                                onclick={link.callback(|_| Msg::SetStatus(RequestStatus::InProgress))}
                            >
                                {"Em andamento"}
                            </button>
                            <button
                                class="secondary"
                                disabled={self.busy}
                                onclick={link.callback(|_| Msg::SetStatus(RequestStatus::Completed))}
                            >
                                {"Concluir"}
                            </button>
                            <button
                                class="secondary"
                                disabled={self.busy}
                                onclick={link.callback(|_| Msg::SetStatus(RequestStatus::Canceled))}
                            >
                                {"Cancelar"}
                            </button>
                        </div>
                    </div>
                    <div class="grid-2">
                        <div>
                            <label>{"Número SEI"}</label>
                            <p>{ &request.sei_number }</p>
                            <label>{"Contrato"}</label>
                            <p>{ &request.contract }</p>
                            <label>{"Data da Visita"}</label>
                            <p>{ &request.visit_date }</p>
                            <label>{"Zonal Atribuída"}</label>
                            <p>{ store.zonal_name(request.zonal) }</p>
                        </div>
                        <div>
                            <label>{"Responsável"}</label>
                            <p>{ format!("{} {}", technician, technician_role) }</p>
                            <label>{"Criado em"}</label>
                            <p>{ &request.created_at }</p>
                            <label>{"Localização Geográfica"}</label>
                            <p>{ &request.location.address }</p>
                            <p class="muted">
                                { format!("Lat: {} | Long: {}", request.location.latitude, request.location.longitude) }
                            </p>
                        </div>
                    </div>
                    <label>{"Descrição do Problema"}</label>
                    <p>{ &request.description }</p>
                </div>

                <div class="card">
                    <h2>{"Registro Fotográfico (Antes x Depois)"}</h2>
                    <div class="grid-2">
                        <div>
                            <label>{"Antes"}</label>
                            {
                                match &request.photo_before {
                                    Some(src) => html! { <img class="photo" src={src.clone()} alt="Antes" /> },
                                    None => html! { <p class="muted">{"Sem foto do antes"}</p> },
                                }
                            }
                        </div>
                        <div>
                            <label>{"Depois"}</label>
                            {
                                match &request.photo_after {
                                    Some(src) => html! { <img class="photo" src={src.clone()} alt="Depois" /> },
                                    None => html! {
                                        <div>
                                            <p class="muted">{"Registrar conclusão: envie a foto do depois."}</p>
                                            <input
                                                type="file"
                                                accept="image/*"
                                                onchange={link.batch_callback(|e: Event| {
                                                    let input = e.target_unchecked_into::<HtmlInputElement>();
                                                    input.files().and_then(|files| files.get(0)).map(Msg::AfterPhotoSelected)
                                                })}
                                            />
                                        </div>
                                    },
                                }
                            }
                        </div>
                    </div>
                </div>
            </>
        }
    }
}

async fn download_pdf(payload: &ReportPayload, filename: &str) -> Result<(), String> {
    let request = gloo_net::http::Request::post("/api/reports/pdf")
        .json(payload)
        .map_err(|e| e.to_string())?;
    let response = request.send().await.map_err(|e| e.to_string())?;
    if !response.ok() {
        let body = response.text().await.unwrap_or_default();
        return Err(if body.trim().is_empty() {
            format!("Falha ao gerar o relatório (HTTP {}).", response.status())
        } else {
            body
        });
    }
    let bytes = response.binary().await.map_err(|e| e.to_string())?;
    files::download_bytes(&bytes, filename);
    Ok(())
}
