use yew::{html, Component, Context, Html, Properties};

use common::store::views;

use crate::app::StoreHandle;

/// Management overview: status totals plus the per-zone distribution, all
/// recomputed from the current snapshots on every render.
pub struct DashboardPage;

#[derive(Properties, PartialEq)]
pub struct DashboardProps {
    pub handle: StoreHandle,
}

fn stat_card(label: &str, value: usize) -> Html {
    html! {
        <div class="card">
            <div class="stat-value">{ value }</div>
            <div class="stat-label">{ label }</div>
        </div>
    }
}

impl Component for DashboardPage {
    type Message = ();
    type Properties = DashboardProps;

    fn create(_ctx: &Context<Self>) -> Self {
        DashboardPage
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let store = &ctx.props().handle.store;
        let requests = store.requests();
        let zonals = store.zonals();

        let counts = views::status_counts(&requests);
        let by_zonal = views::zonal_request_counts(&requests, &zonals);

        html! {
            <>
                <h2>{"Dashboard de Gestão"}</h2>
                <p class="muted">{"Visão geral do sistema de reparos em vias públicas."}</p>

                <div class="stat-grid">
                    { stat_card("Total Geral", counts.total) }
                    { stat_card("Em Aberto", counts.open) }
                    { stat_card("Em Andamento", counts.in_progress) }
                    { stat_card("Concluídas", counts.completed) }
                    { stat_card("Canceladas", counts.canceled) }
                </div>

                <div class="card">
                    <h2>{"Solicitações por Zonal"}</h2>
                    <table>
                        <thead>
                            <tr><th>{"Zonal"}</th><th>{"Solicitações"}</th></tr>
                        </thead>
                        <tbody>
                            {
                                for by_zonal.iter().map(|(name, count)| html! {
                                    <tr key={name.clone()}>
                                        <td>{ name.clone() }</td>
                                        <td><span class="badge">{ *count }</span></td>
                                    </tr>
                                })
                            }
                        </tbody>
                    </table>
                </div>
            </>
        }
    }
}
