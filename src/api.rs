//! `fetch` transport for the four services.

use serde::Serialize;
use skycal_core::error::ServiceError;
use skycal_core::protocol::{self, Reply, UploadAccepted, UploadReply, UPLOAD_PATH};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

#[inline]
fn network(e: JsValue) -> ServiceError {
    ServiceError::Network(
        e.as_string()
            .or_else(|| {
                e.dyn_ref::<js_sys::Error>()
                    .map(|err| String::from(err.message()))
            })
            .unwrap_or_else(|| format!("{:?}", e)),
    )
}

#[derive(Clone, Debug)]
pub struct Api {
    base: String,
}

impl Api {
    pub fn new(base: impl Into<String>) -> Self {
        let mut base = base.into();
        while base.ends_with('/') {
            base.pop();
        }
        Self { base }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    pub async fn upload(&self, file: &web::File) -> Result<UploadAccepted, ServiceError> {
        let form = web::FormData::new().map_err(network)?;
        form.append_with_blob_and_filename("file", file, &file.name())
            .map_err(network)?;
        let init = web::RequestInit::new();
        init.set_method("POST");
        init.set_body(&form);
        let request =
            web::Request::new_with_str_and_init(&self.url(UPLOAD_PATH), &init).map_err(network)?;
        let (status, body) = send(request).await?;
        protocol::decode::<UploadReply>(status, &body)
    }

    /// POST `request` as JSON and decode the reply envelope.
    pub async fn post<R: Reply>(
        &self,
        path: &str,
        request: &impl Serialize,
    ) -> Result<R::Output, ServiceError> {
        let body = protocol::encode(request)?;
        let headers = web::Headers::new().map_err(network)?;
        headers
            .set("Content-Type", "application/json")
            .map_err(network)?;
        let init = web::RequestInit::new();
        init.set_method("POST");
        init.set_headers(&headers);
        init.set_body(&JsValue::from_str(&body));
        let req = web::Request::new_with_str_and_init(&self.url(path), &init).map_err(network)?;
        let (status, text) = send(req).await?;
        log::debug!("[api] {} -> {}", path, status);
        protocol::decode::<R>(status, &text)
    }
}

async fn send(request: web::Request) -> Result<(u16, String), ServiceError> {
    let window = web::window().ok_or_else(|| ServiceError::Network("no window".into()))?;
    let resp: web::Response = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(network)?
        .dyn_into()
        .map_err(network)?;
    let status = resp.status();
    let text = JsFuture::from(resp.text().map_err(network)?)
        .await
        .map_err(network)?
        .as_string()
        .unwrap_or_default();
    Ok((status, text))
}
