use common::model::toast::{Severity, Toast};
use yew::events::MouseEvent;
use yew::{html, Callback, Component, Context, Html, Properties};

/// Fixed-position tray rendering the pending toasts, oldest first. Expiry
/// timers live in the root component; the tray only draws and forwards
/// explicit dismissals.
pub struct ToastTray;

#[derive(Properties, PartialEq)]
pub struct ToastTrayProps {
    pub toasts: Vec<Toast>,
    pub on_dismiss: Callback<String>,
}

fn severity_class(severity: Severity) -> &'static str {
    match severity {
        Severity::Success => "success",
        Severity::Error => "error",
        Severity::Info => "info",
    }
}

impl Component for ToastTray {
    type Message = ();
    type Properties = ToastTrayProps;

    fn create(_ctx: &Context<Self>) -> Self {
        ToastTray
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let props = ctx.props();
        html! {
            <div class="toast-tray">
                {
                    for props.toasts.iter().map(|toast| {
                        let id = toast.id.clone();
                        let on_dismiss = props.on_dismiss.clone();
                        let dismiss = Callback::from(move |_: MouseEvent| on_dismiss.emit(id.clone()));
                        html! {
                            <div class={format!("toast {}", severity_class(toast.severity))} key={toast.id.clone()}>
                                <span>{ &toast.message }</span>
                                <button onclick={dismiss}>{"×"}</button>
                            </div>
                        }
                    })
                }
            </div>
        }
    }
}
