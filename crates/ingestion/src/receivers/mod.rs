//! SPDX-FileCopyrightText: © 2025 Cory Parent <goedelsoup+orasi@goedelsoup.io>
//! SPDX-License-Identifier: Apache-2.0
//!

//! OTLP receiver
//!
//! A single receiver serves OTLP over gRPC and HTTP and hands every decoded
//! batch to the consumer registered for its signal kind.

pub mod context;
pub mod handle;
pub mod otlp_receiver;
pub mod stats;

pub(crate) mod dispatch;
pub(crate) mod grpc;
pub(crate) mod http;

pub use context::{ContentEncoding, EndpointContext, Protocol};
pub use handle::ReceiverHandle;
pub use otlp_receiver::OtlpReceiver;
pub use stats::{ReceiverCounters, ReceiverStats};

use collector_core::CollectorResult;
use std::net::SocketAddr;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// A spawned server and the means to stop it
pub(crate) struct ServerTask {
    pub(crate) local_addr: SocketAddr,
    pub(crate) shutdown: CancellationToken,
    pub(crate) handle: JoinHandle<CollectorResult<()>>,
}
