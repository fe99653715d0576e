use uuid::Uuid;
use web_sys::{HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};
use yew::platform::spawn_local;
use yew::prelude::*;

use common::model::role::{self, RoleLabel};
use common::model::toast::Severity;
use common::model::user::User;
use common::model::zonal::{Zonal, ZonalMetadata};
use common::store::views;

use crate::app::StoreHandle;

/// Organisation setup: per-zone cards, personnel management, zone settings
/// and the role-label dictionary.
pub struct OrgSetupPage {
    // personnel form
    form_open: bool,
    editing_id: Option<String>,
    name: String,
    role: String,
    zonal: Zonal,
    registration_number: String,
    email: String,
    // zone settings form
    zonal_editing: Option<Zonal>,
    zonal_name: String,
    zonal_manager: String,
    zonal_assistant: String,
    zonal_description: String,
    // role dictionary
    new_role_label: String,
    busy: bool,
}

#[derive(Properties, PartialEq)]
pub struct OrgSetupProps {
    pub handle: StoreHandle,
}

pub enum Msg {
    OpenForm,
    EditUser(User),
    CloseForm,
    SetName(String),
    SetRole(String),
    SetZonal(Zonal),
    SetRegistration(String),
    SetEmail(String),
    SaveUser,
    UserSaved(bool),
    DeleteUser(String),
    EditZonal(ZonalMetadata),
    CloseZonal,
    SetZonalName(String),
    SetZonalManager(String),
    SetZonalAssistant(String),
    SetZonalDescription(String),
    SaveZonal,
    ZonalSaved(bool),
    SetNewRole(String),
    AddRole,
    RoleAdded(bool),
    RemoveRole(String),
    Done,
}

fn opt(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

impl OrgSetupPage {
    fn close_user_form(&mut self) {
        self.form_open = false;
        self.editing_id = None;
        self.name = String::new();
        self.role = role::COLLABORATOR.to_string();
        self.zonal = Zonal::North;
        self.registration_number = String::new();
        self.email = String::new();
    }

    fn close_zonal_form(&mut self) {
        self.zonal_editing = None;
        self.zonal_name = String::new();
        self.zonal_manager = String::new();
        self.zonal_assistant = String::new();
        self.zonal_description = String::new();
    }

    fn zonal_card(&self, ctx: &Context<Self>, zonal: Zonal) -> Html {
        let link = ctx.link();
        let store = &ctx.props().handle.store;
        let users = store.users();
        let requests = store.requests();
        let zonals = store.zonals();

        let stats = views::zonal_stats(zonal, &users, &requests, &zonals);
        let roster = views::zonal_roster(&users, zonal);
        let meta = zonals
            .iter()
            .find(|z| z.id == zonal)
            .cloned()
            .unwrap_or_else(|| ZonalMetadata {
                id: zonal,
                name: zonal.id().to_string(),
                manager_id: None,
                assistant_id: None,
                description: None,
            });

        html! {
            <div class="card" key={zonal.id()}>
                <div class="row" style="justify-content: space-between;">
                    <h2>{ store.zonal_name(zonal) }</h2>
                    <button class="secondary" onclick={link.callback(move |_| Msg::EditZonal(meta.clone()))}>
                        {"Configurar"}
                    </button>
                </div>
                <p class="muted">{ format!("Gerente Responsável: {}", stats.manager_name) }</p>
                <p class="muted">{ format!("Auxiliar: {}", stats.assistant_name) }</p>
                <p class="muted">{ format!("Total Equipe: {} membros", stats.team_size) }</p>
                <p class="muted">{ format!("Chamados Ativos: {}", stats.open_requests) }</p>
                <div>
                    {
                        for roster.iter().map(|user| html! {
                            <span class="chip" key={user.id.clone()}>
                                { &user.name }
                                <span class="muted">{ store.role_label(&user.role) }</span>
                            </span>
                        })
                    }
                </div>
            </div>
        }
    }

    fn zonal_form(&self, ctx: &Context<Self>, zonal: Zonal) -> Html {
        let link = ctx.link();
        let store = &ctx.props().handle.store;
        let users = store.users();
        let team = views::zonal_roster(&users, zonal);

        let reference_select = |label: &str, current: &str, set: Callback<Event>| {
            html! {
                <div>
                    <label>{ label }</label>
                    <select onchange={set}>
                        <option value="" selected={current.is_empty()}>{"Não definido"}</option>
                        {
                            for team.iter().map(|user| html! {
                                <option value={user.id.clone()} selected={current == user.id}>
                                    { &user.name }
                                </option>
                            })
                        }
                    </select>
                </div>
            }
        };

        html! {
            <div class="card">
                <h2>{ format!("Configurar {}", zonal.id()) }</h2>
                <div class="grid-2">
                    <div>
                        <label>{"Nome de Exibição"}</label>
                        <input
                            type="text"
                            value={self.zonal_name.clone()}
                            oninput={link.callback(|e: InputEvent| {
                                Msg::SetZonalName(e.target_unchecked_into::<HtmlInputElement>().value())
                            })}
                        />
                    </div>
                    {
                        reference_select(
                            "Gerente Responsável",
                            &self.zonal_manager,
                            link.callback(|e: Event| {
                                Msg::SetZonalManager(e.target_unchecked_into::<HtmlSelectElement>().value())
                            }),
                        )
                    }
                    {
                        reference_select(
                            "Auxiliar",
                            &self.zonal_assistant,
                            link.callback(|e: Event| {
                                Msg::SetZonalAssistant(e.target_unchecked_into::<HtmlSelectElement>().value())
                            }),
                        )
                    }
                </div>
                <label>{"Descrição"}</label>
                <textarea
                    rows="2"
                    value={self.zonal_description.clone()}
                    oninput={link.callback(|e: InputEvent| {
                        Msg::SetZonalDescription(e.target_unchecked_into::<HtmlTextAreaElement>().value())
                    })}
                />
                <div class="row" style="margin-top: 10px;">
                    <button class="secondary" onclick={link.callback(|_| Msg::CloseZonal)}>{"Cancelar"}</button>
                    <button class="primary" disabled={self.busy} onclick={link.callback(|_| Msg::SaveZonal)}>
                        {"Salvar Zonal"}
                    </button>
                </div>
            </div>
        }
    }

    fn user_form(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let store = &ctx.props().handle.store;
        let roles = store.roles();

        let title = if self.editing_id.is_some() {
            "Editar Colaborador"
        } else {
            "Novo Colaborador"
        };

        html! {
            <div class="card">
                <h2>{ title }</h2>
                <div class="grid-2">
                    <div>
                        <label>{"Nome"}</label>
                        <input
                            type="text"
                            value={self.name.clone()}
                            oninput={link.callback(|e: InputEvent| {
                                Msg::SetName(e.target_unchecked_into::<HtmlInputElement>().value())
                            })}
                        />
                        <label>{"Função"}</label>
                        <select onchange={link.callback(|e: Event| {
                            Msg::SetRole(e.target_unchecked_into::<HtmlSelectElement>().value())
                        })}>
                            {
                                for roles.iter().map(|entry| html! {
                                    <option value={entry.key.clone()} selected={self.role == entry.key}>
                                        { &entry.label }
                                    </option>
                                })
                            }
                        </select>
                        <label>{"Zonal"}</label>
                        <select onchange={link.batch_callback(|e: Event| {
                            let value = e.target_unchecked_into::<HtmlSelectElement>().value();
                            Zonal::from_id(&value).map(Msg::SetZonal)
                        })}>
                            {
                                for Zonal::ALL.into_iter().map(|zonal| html! {
                                    <option value={zonal.id()} selected={self.zonal == zonal}>
                                        { store.zonal_name(zonal) }
                                    </option>
                                })
                            }
                        </select>
                    </div>
                    <div>
                        <label>{"Matrícula (opcional)"}</label>
                        <input
                            type="text"
                            value={self.registration_number.clone()}
                            oninput={link.callback(|e: InputEvent| {
                                Msg::SetRegistration(e.target_unchecked_into::<HtmlInputElement>().value())
                            })}
                        />
                        <label>{"E-mail (opcional)"}</label>
                        <input
                            type="email"
                            value={self.email.clone()}
                            oninput={link.callback(|e: InputEvent| {
                                Msg::SetEmail(e.target_unchecked_into::<HtmlInputElement>().value())
                            })}
                        />
                    </div>
                </div>
                <div class="row" style="margin-top: 10px;">
                    <button class="secondary" onclick={link.callback(|_| Msg::CloseForm)}>{"Cancelar"}</button>
                    <button class="primary" disabled={self.busy} onclick={link.callback(|_| Msg::SaveUser)}>
                        {"Salvar"}
                    </button>
                </div>
            </div>
        }
    }

    fn personnel_table(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let store = &ctx.props().handle.store;
        let users = store.users();

        html! {
            <div class="card">
                <h2>{"Equipe Técnica"}</h2>
                <table>
                    <thead>
                        <tr>
                            <th>{"Nome"}</th>
                            <th>{"Função"}</th>
                            <th>{"Zonal"}</th>
                            <th>{"Matrícula"}</th>
                            <th></th>
                        </tr>
                    </thead>
                    <tbody>
                        {
                            for users.iter().map(|user| {
                                let edit_user = user.clone();
                                let delete_id = user.id.clone();
                                html! {
                                    <tr key={user.id.clone()}>
                                        <td>{ &user.name }</td>
                                        <td>{ store.role_label(&user.role) }</td>
                                        <td>{ store.zonal_name(user.zonal) }</td>
                                        <td>{ user.registration_number.clone().unwrap_or_else(|| "-".to_string()) }</td>
                                        <td>
                                            <div class="row">
                                                <button
                                                    class="secondary"
                                                    onclick={link.callback(move |_| Msg::EditUser(edit_user.clone()))}
                                                >
                                                    {"Editar"}
                                                </button>
                                                <button
                                                    class="danger"
                                                    disabled={self.busy}
                                                    onclick={link.callback(move |_| Msg::DeleteUser(delete_id.clone()))}
                                                >
                                                    {"Remover"}
                                                </button>
                                            </div>
                                        </td>
                                    </tr>
                                }
                            })
                        }
                    </tbody>
                </table>
            </div>
        }
    }

    fn roles_card(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let store = &ctx.props().handle.store;
        let roles: Vec<RoleLabel> = store.roles().to_vec();

        html! {
            <div class="card">
                <h2>{"Funções"}</h2>
                <p class="muted">{"As três funções padrão são permanentes; funções personalizadas só podem ser removidas quando nenhum colaborador as utiliza."}</p>
                <div>
                    {
                        for roles.iter().map(|entry| {
                            let key = entry.key.clone();
                            let removable = !role::is_built_in(&entry.key);
                            html! {
                                <span class="chip" key={entry.key.clone()}>
                                    { &entry.label }
                                    {
                                        if removable {
                                            html! {
                                                <button
                                                    class="danger"
                                                    disabled={self.busy}
                                                    onclick={link.callback(move |_| Msg::RemoveRole(key.clone()))}
                                                >
                                                    {"×"}
                                                </button>
                                            }
                                        } else {
                                            html! {}
                                        }
                                    }
                                </span>
                            }
                        })
                    }
                </div>
                <div class="row" style="margin-top: 10px;">
                    <input
                        style="max-width: 240px;"
                        type="text"
                        placeholder="Nova função..."
                        value={self.new_role_label.clone()}
                        oninput={link.callback(|e: InputEvent| {
                            Msg::SetNewRole(e.target_unchecked_into::<HtmlInputElement>().value())
                        })}
                    />
                    <button class="secondary" disabled={self.busy} onclick={link.callback(|_| Msg::AddRole)}>
                        {"Adicionar"}
                    </button>
                </div>
            </div>
        }
    }
}

impl Component for OrgSetupPage {
    type Message = Msg;
    type Properties = OrgSetupProps;

    fn create(_ctx: &Context<Self>) -> Self {
        OrgSetupPage {
            form_open: false,
            editing_id: None,
            name: String::new(),
            role: role::COLLABORATOR.to_string(),
            zonal: Zonal::North,
            registration_number: String::new(),
            email: String::new(),
            zonal_editing: None,
            zonal_name: String::new(),
            zonal_manager: String::new(),
            zonal_assistant: String::new(),
            zonal_description: String::new(),
            new_role_label: String::new(),
            busy: false,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::OpenForm => {
                self.close_user_form();
                self.form_open = true;
                true
            }
            Msg::EditUser(user) => {
                self.form_open = true;
                self.editing_id = Some(user.id);
                self.name = user.name;
                self.role = user.role;
                self.zonal = user.zonal;
                self.registration_number = user.registration_number.unwrap_or_default();
                self.email = user.email.unwrap_or_default();
                true
            }
            Msg::CloseForm => {
                self.close_user_form();
                true
            }
            Msg::SetName(value) => {
                self.name = value;
                true
            }
            Msg::SetRole(value) => {
                self.role = value;
                true
            }
            Msg::SetZonal(value) => {
                self.zonal = value;
                true
            }
            Msg::SetRegistration(value) => {
                self.registration_number = value;
                true
            }
            Msg::SetEmail(value) => {
                self.email = value;
                true
            }
            Msg::SaveUser => {
                let handle = ctx.props().handle.clone();
                if self.name.trim().is_empty() {
                    handle
                        .store
                        .notify("Informe o nome do colaborador.", Severity::Error);
                    handle.on_change.emit(());
                    return true;
                }
                self.busy = true;

                let editing = self.editing_id.clone();
                let user = User {
                    id: editing
                        .clone()
                        .unwrap_or_else(|| format!("u_{}", Uuid::new_v4().simple())),
                    name: self.name.trim().to_string(),
                    role: self.role.clone(),
                    zonal: self.zonal,
                    registration_number: opt(&self.registration_number),
                    email: opt(&self.email),
                };
                let link = ctx.link().clone();
                spawn_local(async move {
                    let result = if editing.is_some() {
                        handle.store.update_user(user).await
                    } else {
                        handle.store.add_user(user).await
                    };
                    handle.on_change.emit(());
                    link.send_message(Msg::UserSaved(result.is_ok()));
                });
                true
            }
            Msg::UserSaved(saved) => {
                self.busy = false;
                if saved {
                    self.close_user_form();
                }
                true
            }
            Msg::DeleteUser(id) => {
                self.busy = true;
                let handle = ctx.props().handle.clone();
                let link = ctx.link().clone();
                spawn_local(async move {
                    let _ = handle.store.delete_user(&id).await;
                    handle.on_change.emit(());
                    link.send_message(Msg::Done);
                });
                true
            }
            Msg::EditZonal(meta) => {
                self.zonal_editing = Some(meta.id);
                self.zonal_name = meta.name;
                self.zonal_manager = meta.manager_id.unwrap_or_default();
                self.zonal_assistant = meta.assistant_id.unwrap_or_default();
                self.zonal_description = meta.description.unwrap_or_default();
                true
            }
            Msg::CloseZonal => {
                self.close_zonal_form();
                true
            }
            Msg::SetZonalName(value) => {
                self.zonal_name = value;
                true
            }
            Msg::SetZonalManager(value) => {
                self.zonal_manager = value;
                true
            }
            Msg::SetZonalAssistant(value) => {
                self.zonal_assistant = value;
                true
            }
            Msg::SetZonalDescription(value) => {
                self.zonal_description = value;
                true
            }
            Msg::SaveZonal => {
                let Some(zonal) = self.zonal_editing else {
                    return false;
                };
                self.busy = true;

                let name = if self.zonal_name.trim().is_empty() {
                    zonal.id().to_string()
                } else {
                    self.zonal_name.trim().to_string()
                };
                let meta = ZonalMetadata {
                    id: zonal,
                    name,
                    manager_id: opt(&self.zonal_manager),
                    assistant_id: opt(&self.zonal_assistant),
                    description: opt(&self.zonal_description),
                };
                let handle = ctx.props().handle.clone();
                let link = ctx.link().clone();
                spawn_local(async move {
                    let result = handle.store.update_zonal(meta).await;
                    handle.on_change.emit(());
                    link.send_message(Msg::ZonalSaved(result.is_ok()));
                });
                true
            }
            Msg::ZonalSaved(saved) => {
                self.busy = false;
                if saved {
                    self.close_zonal_form();
                }
                true
            }
            Msg::SetNewRole(value) => {
                self.new_role_label = value;
                true
            }
            Msg::AddRole => {
                self.busy = true;
                let label = self.new_role_label.clone();
                let handle = ctx.props().handle.clone();
                let link = ctx.link().clone();
                spawn_local(async move {
                    let result = handle.store.add_role(label).await;
                    handle.on_change.emit(());
                    link.send_message(Msg::RoleAdded(result.is_ok()));
                });
                true
            }
            Msg::RoleAdded(added) => {
                self.busy = false;
                if added {
                    self.new_role_label = String::new();
                }
                true
            }
            Msg::RemoveRole(key) => {
                self.busy = true;
                let handle = ctx.props().handle.clone();
                let link = ctx.link().clone();
                spawn_local(async move {
                    let _ = handle.store.remove_role(&key).await;
                    handle.on_change.emit(());
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

        html! {
            <>
                <div class="row" style="justify-content: space-between;">
                    <div>
                        <h2>{"Estrutura Organizacional"}</h2>
                        <p class="muted">{"Gestão das 4 zonais operativas e equipe técnica."}</p>
                    </div>
                    <button class="primary" onclick={link.callback(|_| Msg::OpenForm)}>
                        {"Novo Colaborador"}
                    </button>
                </div>

                {
                    if let Some(zonal) = self.zonal_editing {
                        self.zonal_form(ctx, zonal)
                    } else {
                        html! {}
                    }
                }
                { if self.form_open { self.user_form(ctx) } else { html! {} } }

                <div class="grid-2">
                    { for Zonal::ALL.into_iter().map(|zonal| self.zonal_card(ctx, zonal)) }
                </div>

                { self.personnel_table(ctx) }
                { self.roles_card(ctx) }
            </>
        }
    }
}
