// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The notification event carried on the controller's publish/subscribe bus.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::id::ProjectId;

/// Which subscribers an event is delivered to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Scope {
    /// Delivered to every controller-wide subscriber.
    Controller,
    /// Delivered to subscribers of this specific project, in addition to
    /// controller-wide subscribers.
    Project(ProjectId),
}

/// A single notification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub action: String,
    pub payload: Value,
    pub scope: Scope,
}

impl Event {
    pub fn controller(action: impl Into<String>, payload: Value) -> Self {
        Self {
            action: action.into(),
            payload,
            scope: Scope::Controller,
        }
    }

    pub fn project(project_id: ProjectId, action: impl Into<String>, payload: Value) -> Self {
        Self {
            action: action.into(),
            payload,
            scope: Scope::Project(project_id),
        }
    }

    /// Marker event inserted in place of a dropped notification when a
    /// subscriber's queue overflows.
    pub fn dropped_marker(scope: Scope) -> Self {
        Self {
            action: "notification.dropped".to_string(),
            payload: Value::Null,
            scope,
        }
    }
}

#[cfg(test)]
#[path = "event_tests.rs"]
mod tests;
