use js_sys::Uint8Array;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response};
use wind_overlay_core::{DataFetchError, Dataset};

pub async fn fetch_dataset(path: &str) -> Result<Dataset, DataFetchError> {
    let response = get(path).await?;
    let body = JsFuture::from(response.text().map_err(js_error)?)
        .await
        .map_err(js_error)?;
    parse_body(body.as_string())
}

/// Raw bytes of a same-origin asset, e.g. the campus image.
pub async fn fetch_bytes(path: &str) -> Result<Vec<u8>, DataFetchError> {
    let response = get(path).await?;
    let buffer = JsFuture::from(response.array_buffer().map_err(js_error)?)
        .await
        .map_err(js_error)?;
    Ok(Uint8Array::new(&buffer).to_vec())
}

async fn get(path: &str) -> Result<Response, DataFetchError> {
    let window =
        web_sys::window().ok_or_else(|| DataFetchError::Network("no window".to_string()))?;

    let opts = RequestInit::new();
    opts.set_method("GET");
    opts.set_mode(RequestMode::SameOrigin);

    let request = Request::new_with_str_and_init(path, &opts).map_err(js_error)?;
    let response_value = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(js_error)?;
    let response = response_value.dyn_into::<Response>().map_err(js_error)?;

    check_status(response.ok(), response.status(), path)?;
    Ok(response)
}

pub fn check_status(ok: bool, status: u16, path: &str) -> Result<(), DataFetchError> {
    if ok {
        return Ok(());
    }
    Err(DataFetchError::Status {
        status,
        path: path.to_string(),
    })
}

pub fn parse_body(body: Option<String>) -> Result<Dataset, DataFetchError> {
    let body =
        body.ok_or_else(|| DataFetchError::Network("response body is not text".to_string()))?;
    Dataset::from_json(body.as_bytes())
}

fn js_error(value: JsValue) -> DataFetchError {
    DataFetchError::Network(format!("{value:?}"))
}
