//! SPDX-FileCopyrightText: © 2025 Cory Parent <goedelsoup+orasi@goedelsoup.io>
//! SPDX-License-Identifier: Apache-2.0
//!

//! Conversion of wire bodies into typed OTLP requests

pub mod otlp;

pub use otlp::decode_payload;
