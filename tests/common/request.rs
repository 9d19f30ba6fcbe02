#![allow(dead_code, unused_imports)]

use axum::{
    Router,
    body::Body,
    http::{Method, Request, header},
};
use http_body_util::BodyExt;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tower::ServiceExt;

async fn send(
    app: &Router,
    method: Method,
    path: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (u16, Vec<u8>) {
    let mut builder = Request::builder().method(method).uri(path);

    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }

    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_string(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();

    let status = response.status().as_u16();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, body_bytes.to_vec())
}

/// Deserialize `bytes` into `T`, panicking with a diagnostic message on failure.
fn deserialize_or_panic<T: DeserializeOwned>(status: u16, path: &str, bytes: &[u8]) -> T {
    serde_json::from_slice(bytes).unwrap_or_else(|e| {
        panic!(
            "Failed to deserialize response into {}\n\
             Status: {status} | Path: {path}\n\
             Error : {e}\n\
             Body  : {}",
            std::any::type_name::<T>(),
            String::from_utf8_lossy(bytes)
        )
    })
}

/// JSON POST without authentication
pub async fn post_json<T: DeserializeOwned>(app: &Router, path: &str, body: Value) -> (u16, T) {
    let (status, bytes) = send(app, Method::POST, path, None, Some(body)).await;
    let response_body = deserialize_or_panic(status, path, &bytes);
    (status, response_body)
}

/// JSON POST with a bearer token
pub async fn post_json_auth<T: DeserializeOwned>(
    app: &Router,
    path: &str,
    token: &str,
    body: Value,
) -> (u16, T) {
    let (status, bytes) = send(app, Method::POST, path, Some(token), Some(body)).await;
    let response_body = deserialize_or_panic(status, path, &bytes);
    (status, response_body)
}

/// JSON PUT with a bearer token
pub async fn put_json_auth<T: DeserializeOwned>(
    app: &Router,
    path: &str,
    token: &str,
    body: Value,
) -> (u16, T) {
    let (status, bytes) = send(app, Method::PUT, path, Some(token), Some(body)).await;
    let response_body = deserialize_or_panic(status, path, &bytes);
    (status, response_body)
}

/// Authenticated GET
pub async fn get_auth<T: DeserializeOwned>(app: &Router, path: &str, token: &str) -> (u16, T) {
    let (status, bytes) = send(app, Method::GET, path, Some(token), None).await;
    let response_body = deserialize_or_panic(status, path, &bytes);
    (status, response_body)
}

/// Authenticated DELETE
pub async fn delete_auth<T: DeserializeOwned>(app: &Router, path: &str, token: &str) -> (u16, T) {
    let (status, bytes) = send(app, Method::DELETE, path, Some(token), None).await;
    let response_body = deserialize_or_panic(status, path, &bytes);
    (status, response_body)
}

/// GET returning the raw status only (for unauthenticated checks)
pub async fn get_status(app: &Router, path: &str) -> u16 {
    let (status, _) = send(app, Method::GET, path, None, None).await;
    status
}

/// Unauthenticated GET returning the body as text
pub async fn get_text(app: &Router, path: &str) -> (u16, String) {
    let (status, bytes) = send(app, Method::GET, path, None, None).await;
    (status, String::from_utf8_lossy(&bytes).into_owned())
}
