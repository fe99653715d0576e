use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use yew::platform::spawn_local;
use yew::prelude::*;

use common::model::toast::Severity;

use super::messages::Msg;
use super::state::NewRequestPage;

pub fn update(component: &mut NewRequestPage, ctx: &Context<NewRequestPage>, msg: Msg) -> bool {
    match msg {
        Msg::SetProtocol(value) => {
            component.protocol = value;
            true
        }
        Msg::SetSei(value) => {
            component.sei_number = value;
            true
        }
        Msg::SetContract(value) => {
            component.contract = value;
            true
        }
        Msg::SetDescription(value) => {
            component.description = value;
            true
        }
        Msg::SetZonal(zonal) => {
            component.zonal = zonal;
            // The technician choices depend on the zone.
            component.technician_id = String::new();
            true
        }
        Msg::SetTechnician(value) => {
            component.technician_id = value;
            true
        }
        Msg::SetVisitDate(value) => {
            component.visit_date = value;
            true
        }
        Msg::CaptureLocation => {
            component.locating = true;
            request_position(ctx);
            true
        }
        Msg::LocationCaptured {
            latitude,
            longitude,
        } => {
            component.locating = false;
            component.latitude = latitude;
            component.longitude = longitude;
            // Reverse geocoding is an external concern; record the fix with
            // a field-note placeholder until the address is confirmed.
            component.address = format!(
                "Localização registrada em campo ({:.5}, {:.5})",
                latitude, longitude
            );
            true
        }
        Msg::LocationFailed => {
            component.locating = false;
            let handle = ctx.props().handle.clone();
            handle.store.notify(
                "Erro ao obter localização. Verifique as permissões de GPS.",
                Severity::Error,
            );
            handle.on_change.emit(());
            true
        }
        Msg::PhotoSelected(file) => {
            let link = ctx.link().clone();
            spawn_local(async move {
                let blob = gloo_file::Blob::from(file);
                if let Ok(data_url) = gloo_file::futures::read_as_data_url(&blob).await {
                    link.send_message(Msg::PhotoLoaded(data_url));
                }
            });
            false
        }
        Msg::PhotoLoaded(data_url) => {
            component.photo_before = Some(data_url);
            true
        }
        Msg::Submit => {
            if component.saving {
                return false;
            }
            let handle = ctx.props().handle.clone();
            if !component.has_location() || component.photo_before.is_none() {
                handle.store.notify(
                    "Localização e foto são obrigatórias para comprovação de campo.",
                    Severity::Error,
                );
                handle.on_change.emit(());
                return true;
            }
            if component.technician_id.is_empty() {
                handle
                    .store
                    .notify("Selecione o responsável pela visita.", Severity::Error);
                handle.on_change.emit(());
                return true;
            }

            component.saving = true;
            let request = component.build_request();
            let link = ctx.link().clone();
            spawn_local(async move {
                let result = handle.store.add_request(request).await;
                handle.on_change.emit(());
                match result {
                    Ok(_) => link.send_message(Msg::Saved),
                    Err(_) => link.send_message(Msg::SaveFailed),
                }
            });
            true
        }
        Msg::Saved => {
            component.saving = false;
            ctx.props().on_saved.emit(());
            false
        }
        Msg::SaveFailed => {
            component.saving = false;
            true
        }
    }
}

/// Asks the browser for one GPS fix. The coordinates are read reflectively
/// from the callback argument, so no typed geolocation bindings are needed.
fn request_position(ctx: &Context<NewRequestPage>) {
    let link = ctx.link().clone();
    let geolocation = web_sys::window().and_then(|w| w.navigator().geolocation().ok());

    let Some(geolocation) = geolocation else {
        link.send_message(Msg::LocationFailed);
        return;
    };

    let success_link = link.clone();
    let on_success = Closure::once_into_js(move |position: JsValue| {
        let coords = js_sys::Reflect::get(&position, &JsValue::from_str("coords"))
            .unwrap_or(JsValue::UNDEFINED);
        let latitude = js_sys::Reflect::get(&coords, &JsValue::from_str("latitude"))
            .ok()
            .and_then(|v| v.as_f64());
        let longitude = js_sys::Reflect::get(&coords, &JsValue::from_str("longitude"))
            .ok()
            .and_then(|v| v.as_f64());
        match (latitude, longitude) {
            (Some(latitude), Some(longitude)) => success_link.send_message(Msg::LocationCaptured {
                latitude,
                longitude,
            }),
            _ => success_link.send_message(Msg::LocationFailed),
        }
    });

    let error_link = link.clone();
    let on_error = Closure::once_into_js(move |_error: JsValue| {
        error_link.send_message(Msg::LocationFailed);
    });

    if geolocation
        .get_current_position_with_error_callback(
            on_success.unchecked_ref(),
            Some(on_error.unchecked_ref()),
        )
        .is_err()
    {
        link.send_message(Msg::LocationFailed);
    }
}
