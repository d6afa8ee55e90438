//! SPDX-FileCopyrightText: © 2025 Cory Parent <goedelsoup+orasi@goedelsoup.io>
//! SPDX-License-Identifier: Apache-2.0
//!

//! OTLP/gRPC services
//!
//! One service value implements the trace, metrics and logs export services.
//! gRPC calls are never authentication-gated.

use collector_core::{CollectorError, CollectorResult};
use opentelemetry_proto::tonic::collector::logs::v1::logs_service_server::{
    LogsService, LogsServiceServer,
};
use opentelemetry_proto::tonic::collector::logs::v1::{
    ExportLogsServiceRequest, ExportLogsServiceResponse,
};
use opentelemetry_proto::tonic::collector::metrics::v1::metrics_service_server::{
    MetricsService, MetricsServiceServer,
};
use opentelemetry_proto::tonic::collector::metrics::v1::{
    ExportMetricsServiceRequest, ExportMetricsServiceResponse,
};
use opentelemetry_proto::tonic::collector::trace::v1::trace_service_server::{
    TraceService, TraceServiceServer,
};
use opentelemetry_proto::tonic::collector::trace::v1::{
    ExportTraceServiceRequest, ExportTraceServiceResponse,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio_stream::wrappers::TcpListenerStream;
use tokio_util::sync::CancellationToken;
use tonic::{transport::Server, Request, Response, Status};
use tracing::{info, warn};

use super::context::EndpointContext;
use super::dispatch::{dispatch, ReceiverShared, RoutedSignal};
use super::ServerTask;

/// gRPC export services backed by the receiver's shared state
#[derive(Clone)]
pub(crate) struct OtlpGrpcService {
    shared: Arc<ReceiverShared>,
}

impl OtlpGrpcService {
    pub(crate) fn new(shared: Arc<ReceiverShared>) -> Self {
        Self { shared }
    }

    async fn ingest<P: RoutedSignal>(&self, request: Request<P>) -> Result<(), Status> {
        let context = EndpointContext::grpc(P::KIND);
        dispatch(&self.shared, request.into_inner(), &context)
            .await
            .map_err(|e| Status::internal(e.to_string()))
    }
}

#[tonic::async_trait]
impl TraceService for OtlpGrpcService {
    async fn export(
        &self,
        request: Request<ExportTraceServiceRequest>,
    ) -> Result<Response<ExportTraceServiceResponse>, Status> {
        self.ingest(request).await?;
        Ok(Response::new(ExportTraceServiceResponse {
            partial_success: None,
        }))
    }
}

#[tonic::async_trait]
impl MetricsService for OtlpGrpcService {
    async fn export(
        &self,
        request: Request<ExportMetricsServiceRequest>,
    ) -> Result<Response<ExportMetricsServiceResponse>, Status> {
        self.ingest(request).await?;
        Ok(Response::new(ExportMetricsServiceResponse {
            partial_success: None,
        }))
    }
}

#[tonic::async_trait]
impl LogsService for OtlpGrpcService {
    async fn export(
        &self,
        request: Request<ExportLogsServiceRequest>,
    ) -> Result<Response<ExportLogsServiceResponse>, Status> {
        self.ingest(request).await?;
        Ok(Response::new(ExportLogsServiceResponse {
            partial_success: None,
        }))
    }
}

/// Serve the export services on an already bound listener
pub(crate) fn spawn_grpc_server(
    listener: TcpListener,
    shared: Arc<ReceiverShared>,
) -> CollectorResult<ServerTask> {
    let local_addr = listener.local_addr().map_err(|e| {
        CollectorError::startup_with_source("failed to read gRPC listener address", e)
    })?;
    let max_message_size = shared.max_body_bytes;
    let service = OtlpGrpcService::new(shared);

    let shutdown = CancellationToken::new();
    let signal = shutdown.clone();
    let incoming = TcpListenerStream::new(listener);

    let handle = tokio::spawn(async move {
        info!("Starting OTLP gRPC server on {}", local_addr);

        let result = Server::builder()
            .add_service(
                TraceServiceServer::new(service.clone())
                    .max_decoding_message_size(max_message_size),
            )
            .add_service(
                MetricsServiceServer::new(service.clone())
                    .max_decoding_message_size(max_message_size),
            )
            .add_service(
                LogsServiceServer::new(service).max_decoding_message_size(max_message_size),
            )
            .serve_with_incoming_shutdown(incoming, signal.cancelled_owned())
            .await;

        match result {
            Ok(()) => {
                info!("OTLP gRPC server on {} stopped", local_addr);
                Ok(())
            }
            Err(e) => {
                warn!("OTLP gRPC server on {} failed: {}", local_addr, e);
                Err(CollectorError::network_with_source("gRPC server failed", e))
            }
        }
    });

    Ok(ServerTask {
        local_addr,
        shutdown,
        handle,
    })
}
