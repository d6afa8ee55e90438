//! SPDX-FileCopyrightText: © 2025 Cory Parent <goedelsoup+orasi@goedelsoup.io>
//! SPDX-License-Identifier: Apache-2.0
//!

//! Error context for logging

use std::fmt;

/// Classification of an error, attached to log records
#[derive(Debug, Clone)]
pub struct ErrorContext {
    pub error_type: &'static str,
    pub retryable: bool,
    pub permanent: bool,
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ErrorContext {{ type: {}, retryable: {}, permanent: {} }}",
            self.error_type, self.retryable, self.permanent
        )
    }
}
