//! Hook registration API endpoints
//!
//! One handler per route shape; each picks the operation from the request
//! method and produces exactly one terminal response. Validation order is
//! fixed: path, then declared content type, then method, then payload —
//! the store is never touched before the payload has fully validated.

use std::sync::Arc;

use axum::{
    body::to_bytes,
    extract::{OriginalUri, Path, Request, State},
    http::{HeaderMap, Method, StatusCode, Uri, header},
    response::{IntoResponse, Response},
};
use hookpoint::{Hook, PROTOCOL_VERSION, payload};
use tracing::info;

use crate::{
    error::{ServiceError, ServiceResult},
    state::AppState,
};

/// The only media type registrations may declare.
const XML_MEDIA_TYPE: &str = "application/xml";

/// Dispatch for the bare collection path
pub async fn collection(
    State(state): State<Arc<AppState>>,
    OriginalUri(uri): OriginalUri,
    request: Request,
) -> ServiceResult<Response> {
    let method = request.method().clone();
    if method == Method::POST {
        create(&state, &uri, request).await
    } else if method == Method::GET {
        list(&state).await
    } else if method == Method::DELETE {
        // Nothing is ever stored without an identifier, so a bare DELETE
        // can only miss.
        Err(ServiceError::ResourceNotFound)
    } else {
        Err(ServiceError::MethodNotSupported)
    }
}

/// Dispatch for a member path carrying an identifier
pub async fn member(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    OriginalUri(uri): OriginalUri,
    request: Request,
) -> ServiceResult<Response> {
    // The recognized surface only admits a numeric trailing identifier.
    if id.is_empty() || !id.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ServiceError::RouteNotFound);
    }

    let method = request.method().clone();
    if method == Method::POST {
        create(&state, &uri, request).await
    } else if method == Method::GET {
        fetch(&state, &id).await
    } else if method == Method::DELETE {
        delete(&state, &id).await
    } else {
        Err(ServiceError::MethodNotSupported)
    }
}

/// Register a hook, replacing any prior registration
async fn create(state: &AppState, uri: &Uri, request: Request) -> ServiceResult<Response> {
    // Decided from the declared type alone, before the body is read.
    if !declares_xml(request.headers()) {
        return Err(ServiceError::UnsupportedMediaType);
    }

    let body = to_bytes(request.into_body(), state.config.max_request_size)
        .await
        .map_err(|e| {
            ServiceError::MalformedPayload(format!("failed to read request body: {e}"))
        })?;
    let body = std::str::from_utf8(&body)
        .map_err(|e| ServiceError::MalformedPayload(e.to_string()))?;

    let registration =
        payload::parse_registration(body).map_err(|e| ServiceError::MalformedPayload(e.to_string()))?;

    if registration.version != PROTOCOL_VERSION {
        return Err(ServiceError::UnsupportedVersion);
    }

    let hook = Hook::new(state.hook_id(), registration.uri, registration.version);
    let document = hook.to_xml();
    state.store.put(hook.clone()).await?;

    info!(hook_id = %hook.id, uri = %hook.uri, "hook registered");

    let location = format!("{}/{}", uri.path(), hook.id);
    Ok((
        StatusCode::CREATED,
        [
            (header::CONTENT_TYPE, XML_MEDIA_TYPE.to_string()),
            (header::LOCATION, location),
        ],
        document,
    )
        .into_response())
}

/// Return the stored hook wrapped in the `<hooks>` container
async fn list(state: &AppState) -> ServiceResult<Response> {
    let mut body = String::from("<hooks>\n");
    if let Some(hook) = state.store.get(state.hook_id()).await? {
        body.push_str(&hook.to_xml());
    }
    body.push_str("</hooks>\n");
    Ok(xml_response(StatusCode::OK, body))
}

/// Return the stored hook document verbatim
async fn fetch(state: &AppState, id: &str) -> ServiceResult<Response> {
    if id != state.hook_id() {
        return Err(ServiceError::ResourceNotFound);
    }
    let hook = state
        .store
        .get(id)
        .await?
        .ok_or(ServiceError::ResourceNotFound)?;
    Ok(xml_response(StatusCode::OK, hook.to_xml()))
}

/// Remove the stored hook
async fn delete(state: &AppState, id: &str) -> ServiceResult<Response> {
    if !state.store.delete(id).await? {
        return Err(ServiceError::ResourceNotFound);
    }
    info!(hook_id = %id, "hook removed");
    Ok(StatusCode::NO_CONTENT.into_response())
}

/// Exact match on the declared media type, parameters included, mirroring
/// what registering agents have always been required to send.
fn declares_xml(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value == XML_MEDIA_TYPE)
}

fn xml_response(status: StatusCode, body: String) -> Response {
    (status, [(header::CONTENT_TYPE, XML_MEDIA_TYPE)], body).into_response()
}
