//! SPDX-FileCopyrightText: © 2025 Cory Parent <goedelsoup+orasi@goedelsoup.io>
//! SPDX-License-Identifier: Apache-2.0
//!

//! Key-based authentication gate
//!
//! v2 endpoints identify the sending collector by a key id and, optionally, a
//! key secret carried in request headers. The checks run in a fixed order and
//! the first failing check decides the rejection.

use axum::http::{HeaderMap, StatusCode};
use collector_core::{AuthPolicy, CollectorError};
use tracing::debug;

/// Header carrying the key id
pub const KEY_ID_HEADER: &str = "key-id";

/// Header carrying the key secret
pub const KEY_SECRET_HEADER: &str = "key-secret";

/// Header carrying the sending collector's id (informational)
pub const COLLECTOR_ID_HEADER: &str = "collector-id";

/// Required key id prefix
pub const KEY_ID_PREFIX: &str = "tfk_";

/// Required key secret prefix
pub const KEY_SECRET_PREFIX: &str = "tfs_";

/// Reason a request was refused by the authentication gate
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AuthRejection {
    #[error("missing key id")]
    MissingKeyId,

    #[error("invalid key id format")]
    InvalidKeyFormat,

    #[error("key id not authorized")]
    NotAuthorized,

    #[error("missing key secret")]
    MissingSecret,

    #[error("invalid key secret format")]
    InvalidSecretFormat,
}

impl AuthRejection {
    /// HTTP status returned for this rejection
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthRejection::NotAuthorized => StatusCode::FORBIDDEN,
            _ => StatusCode::UNAUTHORIZED,
        }
    }
}

impl From<AuthRejection> for CollectorError {
    fn from(rejection: AuthRejection) -> Self {
        CollectorError::authentication(rejection.to_string())
    }
}

/// Run the authentication gate against request headers
pub fn authenticate(policy: &AuthPolicy, headers: &HeaderMap) -> Result<(), AuthRejection> {
    if !policy.required {
        return Ok(());
    }

    let key_id = header_value(headers, KEY_ID_HEADER).ok_or(AuthRejection::MissingKeyId)?;
    let key_id = std::str::from_utf8(key_id).map_err(|_| AuthRejection::InvalidKeyFormat)?;
    if !key_id.starts_with(KEY_ID_PREFIX) {
        return Err(AuthRejection::InvalidKeyFormat);
    }

    if !policy.allow_list.is_empty() && !policy.allow_list.contains(key_id) {
        return Err(AuthRejection::NotAuthorized);
    }

    if policy.validate_secret {
        let secret =
            header_value(headers, KEY_SECRET_HEADER).ok_or(AuthRejection::MissingSecret)?;
        let secret =
            std::str::from_utf8(secret).map_err(|_| AuthRejection::InvalidSecretFormat)?;
        if !secret.starts_with(KEY_SECRET_PREFIX) {
            return Err(AuthRejection::InvalidSecretFormat);
        }
    }

    let collector_id = header_value(headers, COLLECTOR_ID_HEADER)
        .and_then(|value| std::str::from_utf8(value).ok())
        .unwrap_or("unknown");
    debug!(key_id, collector_id, "Authenticated v2 request");

    Ok(())
}

fn header_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a [u8]> {
    headers
        .get(name)
        .map(|value| value.as_bytes())
        .filter(|value| !value.is_empty())
}
