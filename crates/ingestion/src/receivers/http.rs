//! SPDX-FileCopyrightText: © 2025 Cory Parent <goedelsoup+orasi@goedelsoup.io>
//! SPDX-License-Identifier: Apache-2.0
//!

//! OTLP/HTTP router and handlers
//!
//! Each signal kind is served on its configurable v1 path and, when enabled,
//! on its fixed v2 path. Both paths share one handler; only v2 requests pass
//! through the authentication gate.

use axum::{
    body::{to_bytes, Body},
    extract::State,
    http::{HeaderMap, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::any,
    Json, Router,
};
use collector_core::{
    CollectorError, CollectorResult, LogsPayload, MetricsPayload, ReceiverConfig, SignalKind,
    TracesPayload,
};
use serde_json::json;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::context::EndpointContext;
use super::dispatch::{dispatch, ReceiverShared, RoutedSignal};
use super::ServerTask;
use crate::conversion::decode_payload;
use crate::security::authenticate;

/// Resolve the path table for a configuration, rejecting collisions
pub(crate) fn route_table(config: &ReceiverConfig) -> CollectorResult<Vec<(String, SignalKind)>> {
    let mut routes: Vec<(String, SignalKind)> = SignalKind::ALL
        .iter()
        .map(|kind| (config.v1_path(*kind).to_string(), *kind))
        .collect();

    if config.enable_v2 {
        routes.extend(
            SignalKind::ALL
                .iter()
                .map(|kind| (kind.v2_path().to_string(), *kind)),
        );
    }

    let mut seen: HashMap<&str, SignalKind> = HashMap::new();
    for (path, kind) in &routes {
        if !path.starts_with('/') || path.contains(['{', '}', '*', ':']) {
            return Err(CollectorError::configuration(format!(
                "invalid {} path '{}'",
                kind, path
            )));
        }
        if let Some(existing) = seen.insert(path.as_str(), *kind) {
            return Err(CollectorError::configuration(format!(
                "path '{}' is bound to both {} and {}",
                path, existing, kind
            )));
        }
    }

    Ok(routes)
}

/// Build the OTLP/HTTP router
pub(crate) fn build_router(
    config: &ReceiverConfig,
    shared: Arc<ReceiverShared>,
) -> CollectorResult<Router> {
    let mut router = Router::new();
    for (path, kind) in route_table(config)? {
        debug!(signal = %kind, path = %path, "Registering HTTP route");
        router = match kind {
            SignalKind::Traces => router.route(&path, any(handle_export::<TracesPayload>)),
            SignalKind::Metrics => router.route(&path, any(handle_export::<MetricsPayload>)),
            SignalKind::Logs => router.route(&path, any(handle_export::<LogsPayload>)),
        };
    }

    Ok(router.with_state(shared))
}

/// Serve a router on an already bound listener with graceful shutdown
pub(crate) fn spawn_http_server(
    listener: TcpListener,
    router: Router,
) -> CollectorResult<ServerTask> {
    let local_addr = listener.local_addr().map_err(|e| {
        CollectorError::startup_with_source("failed to read HTTP listener address", e)
    })?;

    let shutdown = CancellationToken::new();
    let signal = shutdown.clone();

    let handle = tokio::spawn(async move {
        info!("Starting OTLP HTTP server on {}", local_addr);

        let result = axum::serve(listener, router)
            .with_graceful_shutdown(signal.cancelled_owned())
            .await;

        match result {
            Ok(()) => {
                info!("OTLP HTTP server on {} stopped", local_addr);
                Ok(())
            }
            Err(e) => {
                warn!("OTLP HTTP server on {} failed: {}", local_addr, e);
                Err(CollectorError::network_with_source("HTTP server failed", e))
            }
        }
    });

    Ok(ServerTask {
        local_addr,
        shutdown,
        handle,
    })
}

async fn handle_export<P: RoutedSignal>(
    State(shared): State<Arc<ReceiverShared>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Body,
) -> Response {
    if method != Method::POST {
        return error_response(StatusCode::METHOD_NOT_ALLOWED, "method not allowed");
    }

    let context = EndpointContext::http(uri.path(), &headers);

    if context.is_v2 {
        if let Err(rejection) = authenticate(&shared.auth, &headers) {
            warn!(signal = %P::KIND, path = %context.path, "Rejected v2 request: {}", rejection);
            return error_response(rejection.status_code(), &rejection.to_string());
        }
    }

    let bytes = match to_bytes(body, shared.max_body_bytes).await {
        Ok(bytes) => bytes,
        Err(e) => {
            debug!(signal = %P::KIND, "Failed to read request body: {}", e);
            return error_response(
                StatusCode::BAD_REQUEST,
                &format!("failed to read request body: {}", e),
            );
        }
    };

    let payload: P = match decode_payload(&bytes, context.encoding) {
        Ok(payload) => payload,
        Err(e) => {
            debug!(signal = %P::KIND, encoding = ?context.encoding, "{}", e);
            return error_response(StatusCode::BAD_REQUEST, e.message());
        }
    };

    match dispatch(&shared, payload, &context).await {
        Ok(()) => (StatusCode::OK, Json(json!({}))).into_response(),
        Err(e) => error_response(StatusCode::INTERNAL_SERVER_ERROR, &e.to_string()),
    }
}

fn error_response(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(json!({
            "error": message,
            "code": status.as_u16(),
        })),
    )
        .into_response()
}
