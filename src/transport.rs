// HTTP plumbing. The engine decides what to request and how to interpret answers;
// the browser's fetch() does the I/O through a JS callback.

use std::future::Future;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;

use crate::error::EngineError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
        }
    }
}

/// Outgoing request. Bodies are always JSON text.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub body: Option<String>,
}

impl HttpRequest {
    pub fn get(url: impl Into<String>) -> Self {
        HttpRequest {
            method: Method::Get,
            url: url.into(),
            body: None,
        }
    }

    pub fn post_json(url: impl Into<String>, body: String) -> Self {
        HttpRequest {
            method: Method::Post,
            url: url.into(),
            body: Some(body),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Anything that can carry a request to the network.
///
/// Single-threaded by design: futures are not required to be `Send`.
pub trait Transport {
    fn send(&self, request: HttpRequest)
        -> impl Future<Output = Result<HttpResponse, EngineError>>;
}

/// Transport backed by a JS function `(method, url, body) => Promise<{status, body}>`.
///
/// The JS side is a thin wrapper around `fetch`:
/// ```js
/// const fetcher = async (method, url, body) => {
///   const res = await fetch(url, body === null ? { method } :
///     { method, headers: { "Content-Type": "application/json" }, body });
///   return { status: res.status, body: await res.text() };
/// };
/// ```
/// A rejected promise is reported as a network failure.
pub struct JsFetchTransport {
    fetcher: js_sys::Function,
}

impl JsFetchTransport {
    pub fn new(fetcher: js_sys::Function) -> Self {
        JsFetchTransport { fetcher }
    }
}

impl Transport for JsFetchTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, EngineError> {
        let network_error = |err: JsValue| EngineError::Network {
            url: request.url.clone(),
            message: err
                .as_string()
                .unwrap_or_else(|| format!("{:?}", err)),
        };

        let body = request
            .body
            .as_deref()
            .map(JsValue::from_str)
            .unwrap_or(JsValue::NULL);

        let returned = self
            .fetcher
            .call3(
                &JsValue::NULL,
                &JsValue::from_str(request.method.as_str()),
                &JsValue::from_str(&request.url),
                &body,
            )
            .map_err(network_error)?;
        let promise: js_sys::Promise = returned.dyn_into().map_err(network_error)?;
        let value = JsFuture::from(promise).await.map_err(network_error)?;

        let status = js_sys::Reflect::get(&value, &JsValue::from_str("status"))
            .ok()
            .and_then(|v| v.as_f64())
            .ok_or_else(|| EngineError::Network {
                url: request.url.clone(),
                message: "fetcher returned no status".to_string(),
            })?;
        let body = js_sys::Reflect::get(&value, &JsValue::from_str("body"))
            .ok()
            .and_then(|v| v.as_string())
            .unwrap_or_default();

        Ok(HttpResponse {
            status: status as u16,
            body,
        })
    }
}


#[cfg(test)]
mod tests {
    use super::mock::MockTransport;
    use super::*;
    use futures::executor::block_on;

    #[test]
    fn success_range() {
        assert!(HttpResponse { status: 200, body: String::new() }.is_success());
        assert!(HttpResponse { status: 204, body: String::new() }.is_success());
        assert!(!HttpResponse { status: 404, body: String::new() }.is_success());
        assert!(!HttpResponse { status: 500, body: String::new() }.is_success());
    }

    #[test]
    fn post_json_carries_body() {
        let req = HttpRequest::post_json("http://h/p", "{}".to_string());
        assert_eq!(req.method.as_str(), "POST");
        assert_eq!(req.body.as_deref(), Some("{}"));
    }

    #[test]
    fn mock_records_requests() {
        let transport = MockTransport::new().respond("data/a.json", 200, "[]");
        let res = block_on(transport.send(HttpRequest::get("data/a.json"))).unwrap();
        assert_eq!(res.body, "[]");
        let err = block_on(transport.send(HttpRequest::get("data/b.json"))).unwrap_err();
        assert!(err.is_transport_failure());
        assert_eq!(transport.requested_urls(), vec!["data/a.json", "data/b.json"]);
    }
}
