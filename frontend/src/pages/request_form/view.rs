use web_sys::{HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};
use yew::prelude::*;

use common::model::zonal::Zonal;

use super::messages::Msg;
use super::state::NewRequestPage;

pub fn view(component: &NewRequestPage, ctx: &Context<NewRequestPage>) -> Html {
    let link = ctx.link();
    let store = &ctx.props().handle.store;
    let users = store.users();

    // Only personnel of the selected zone can be assigned.
    let personnel: Vec<_> = users.iter().filter(|u| u.zonal == component.zonal).collect();

    html! {
        <>
            <h2>{"Nova Visita Técnica"}</h2>
            <p class="muted">{"Registro de vistoria oficial em campo."}</p>

            <div class="card">
                <h2>{"Protocolo"}</h2>
                <div class="grid-2">
                    <div>
                        <label>{"Protocolo (opcional)"}</label>
                        <input
                            type="text"
                            placeholder="Gerado automaticamente se vazio"
                            value={component.protocol.clone()}
                            oninput={link.callback(|e: InputEvent| {
                                Msg::SetProtocol(e.target_unchecked_into::<HtmlInputElement>().value())
                            })}
                        />
                        <label>{"Número SEI"}</label>
                        <input
                            type="text"
                            placeholder="00.000.000/0000-00"
                            value={component.sei_number.clone()}
                            oninput={link.callback(|e: InputEvent| {
                                Msg::SetSei(e.target_unchecked_into::<HtmlInputElement>().value())
                            })}
                        />
                    </div>
                    <div>
                        <label>{"Contrato"}</label>
                        <input
                            type="text"
                            placeholder="Ex: CTR-05/2023"
                            value={component.contract.clone()}
                            oninput={link.callback(|e: InputEvent| {
                                Msg::SetContract(e.target_unchecked_into::<HtmlInputElement>().value())
                            })}
                        />
                        <label>{"Data da Visita"}</label>
                        <input
                            type="date"
                            value={component.visit_date.clone()}
                            oninput={link.callback(|e: InputEvent| {
                                Msg::SetVisitDate(e.target_unchecked_into::<HtmlInputElement>().value())
                            })}
                        />
                    </div>
                </div>
            </div>

            <div class="card">
                <h2>{"Atribuição"}</h2>
                <div class="grid-2">
                    <div>
                        <label>{"Unidade Operativa"}</label>
                        <select onchange={link.batch_callback(|e: Event| {
                            let value = e.target_unchecked_into::<HtmlSelectElement>().value();
                            Zonal::from_id(&value).map(Msg::SetZonal)
                        })}>
                            {
                                for Zonal::ALL.into_iter().map(|zonal| html! {
                                    <option value={zonal.id()} selected={component.zonal == zonal}>
                                        { store.zonal_name(zonal) }
                                    </option>
                                })
                            }
                        </select>
                    </div>
                    <div>
                        <label>{"Responsável"}</label>
                        <select onchange={link.callback(|e: Event| {
                            Msg::SetTechnician(e.target_unchecked_into::<HtmlSelectElement>().value())
                        })}>
                            <option value="" selected={component.technician_id.is_empty()}>
                                {"Selecione..."}
                            </option>
                            {
                                for personnel.iter().map(|user| html! {
                                    <option
                                        value={user.id.clone()}
                                        selected={component.technician_id == user.id}
                                    >
                                        { format!("{} ({})", user.name, store.role_label(&user.role)) }
                                    </option>
                                })
                            }
                        </select>
                    </div>
                </div>
            </div>

            <div class="card">
                <h2>{"Evidência GPS"}</h2>
                <button
                    class="secondary"
                    disabled={component.locating}
                    onclick={link.callback(|_| Msg::CaptureLocation)}
                >
                    {
                        if component.locating {
                            "Obtendo localização..."
                        } else if component.has_location() {
                            "Localização Capturada ✓"
                        } else {
                            "Capturar GPS Atual"
                        }
                    }
                </button>
                {
                    if component.address.is_empty() {
                        html! {}
                    } else {
                        html! { <p class="muted">{ &component.address }</p> }
                    }
                }
            </div>

            <div class="card">
                <h2>{"Evidência Visual"}</h2>
                <label>{"Foto do \"Antes\""}</label>
                <input
                    type="file"
                    accept="image/*"
                    onchange={link.batch_callback(|e: Event| {
                        let input = e.target_unchecked_into::<HtmlInputElement>();
                        input.files().and_then(|files| files.get(0)).map(Msg::PhotoSelected)
                    })}
                />
                {
                    match &component.photo_before {
                        Some(src) => html! { <img class="photo" src={src.clone()} alt="Antes" /> },
                        None => html! {
                            <p class="muted">{"Toque para capturar a imagem do estado atual da via."}</p>
                        },
                    }
                }
            </div>

            <div class="card">
                <label>{"Descrição Técnica da Ocorrência"}</label>
                <textarea
                    rows="4"
                    placeholder="Descreva detalhadamente o problema observado..."
                    value={component.description.clone()}
                    oninput={link.callback(|e: InputEvent| {
                        Msg::SetDescription(e.target_unchecked_into::<HtmlTextAreaElement>().value())
                    })}
                />
            </div>

            <div class="row">
                <button class="secondary" onclick={ctx.props().on_back.reform(|_| ())}>
                    {"Voltar"}
                </button>
                <button class="primary" disabled={component.saving} onclick={link.callback(|_| Msg::Submit)}>
                    { if component.saving { "Salvando..." } else { "Salvar" } }
                </button>
            </div>
        </>
    }
}
