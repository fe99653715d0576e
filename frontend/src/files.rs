use wasm_bindgen::JsCast;
use web_sys::HtmlElement;

/// Triggers a browser download of `bytes` under `filename` via a temporary
/// object URL and a synthetic anchor click.
pub fn download_bytes(bytes: &[u8], filename: &str) {
    let array = js_sys::Uint8Array::from(bytes);
    let parts = js_sys::Array::new();
    parts.push(&array);

    let Ok(blob) = web_sys::Blob::new_with_u8_array_sequence(parts.as_ref()) else {
        return;
    };
    let Ok(url) = web_sys::Url::create_object_url_with_blob(&blob) else {
        return;
    };

    if let Some(document) = web_sys::window().and_then(|w| w.document()) {
        if let Ok(anchor) = document.create_element("a") {
            anchor.set_attribute("href", &url).ok();
            anchor.set_attribute("download", filename).ok();
            if let Ok(element) = anchor.dyn_into::<HtmlElement>() {
                element.click();
            }
        }
    }
    web_sys::Url::revoke_object_url(&url).ok();
}
