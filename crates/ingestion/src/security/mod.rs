//! SPDX-FileCopyrightText: © 2025 Cory Parent <goedelsoup+orasi@goedelsoup.io>
//! SPDX-License-Identifier: Apache-2.0
//!

//! Request authentication for versioned ingestion endpoints

pub mod auth;

pub use auth::{
    authenticate, AuthRejection, COLLECTOR_ID_HEADER, KEY_ID_HEADER, KEY_ID_PREFIX,
    KEY_SECRET_HEADER, KEY_SECRET_PREFIX,
};
