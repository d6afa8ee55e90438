//! SPDX-FileCopyrightText: © 2025 Cory Parent <goedelsoup+orasi@goedelsoup.io>
//! SPDX-License-Identifier: Apache-2.0
//!

//! Supervisor state management

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{Duration, Instant};

/// Lifecycle state of the supervisor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SupervisorState {
    /// Built, never run
    Idle,
    /// Receiver started, waiting for cancellation
    Running,
    /// Shut down; may be run again
    Stopped,
}

impl fmt::Display for SupervisorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SupervisorState::Idle => write!(f, "idle"),
            SupervisorState::Running => write!(f, "running"),
            SupervisorState::Stopped => write!(f, "stopped"),
        }
    }
}

/// State plus the time the current run began
#[derive(Debug)]
pub(crate) struct StateCell {
    state: SupervisorState,
    started_at: Option<Instant>,
}

impl StateCell {
    pub(crate) fn new() -> Self {
        Self {
            state: SupervisorState::Idle,
            started_at: None,
        }
    }

    pub(crate) fn state(&self) -> SupervisorState {
        self.state
    }

    /// Enter Running, returning the state to restore if startup fails.
    /// `None` when already running.
    pub(crate) fn begin_run(&mut self) -> Option<SupervisorState> {
        if self.state == SupervisorState::Running {
            return None;
        }
        let previous = self.state;
        self.state = SupervisorState::Running;
        self.started_at = Some(Instant::now());
        Some(previous)
    }

    pub(crate) fn revert(&mut self, previous: SupervisorState) {
        self.state = previous;
        self.started_at = None;
    }

    pub(crate) fn stop(&mut self) {
        self.state = SupervisorState::Stopped;
        self.started_at = None;
    }

    /// Time since the current run began; zero unless running
    pub(crate) fn uptime(&self) -> Duration {
        match (self.state, self.started_at) {
            (SupervisorState::Running, Some(started_at)) => started_at.elapsed(),
            _ => Duration::ZERO,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transitions() {
        let mut cell = StateCell::new();
        assert_eq!(cell.state(), SupervisorState::Idle);
        assert_eq!(cell.uptime(), Duration::ZERO);

        assert_eq!(cell.begin_run(), Some(SupervisorState::Idle));
        assert_eq!(cell.state(), SupervisorState::Running);
        assert_eq!(cell.begin_run(), None);

        cell.stop();
        assert_eq!(cell.state(), SupervisorState::Stopped);
        assert_eq!(cell.uptime(), Duration::ZERO);

        assert_eq!(cell.begin_run(), Some(SupervisorState::Stopped));
        cell.revert(SupervisorState::Stopped);
        assert_eq!(cell.state(), SupervisorState::Stopped);
    }

    #[test]
    fn test_state_serialization() {
        assert_eq!(
            serde_json::to_string(&SupervisorState::Running).unwrap(),
            "\"running\""
        );
        assert_eq!(SupervisorState::Idle.to_string(), "idle");
    }
}
