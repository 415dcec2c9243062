use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::error::Category;
use thiserror::Error;

use crate::model::*;

/// Parsed command from one input line.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "command", rename_all = "lowercase")]
pub enum Command {
    Room {
        venue: String,
        room: String,
        size: Size,
    },
    Request(AllocationRequest),
    Change(AllocationRequest),
    Cancel {
        id: String,
    },
    List {
        venue: String,
    },
}

/// Shared payload of `request` and `change`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AllocationRequest {
    pub id: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub small: u32,
    pub medium: u32,
    pub large: u32,
}

impl AllocationRequest {
    pub fn demand(&self) -> Demand {
        Demand::new(self.small, self.medium, self.large)
    }
}

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("invalid JSON: {0}")]
    Syntax(serde_json::Error),
    #[error("invalid command: {0}")]
    Invalid(serde_json::Error),
}

impl From<serde_json::Error> for CommandError {
    fn from(e: serde_json::Error) -> Self {
        match e.classify() {
            Category::Syntax | Category::Eof | Category::Io => CommandError::Syntax(e),
            Category::Data => CommandError::Invalid(e),
        }
    }
}

pub fn parse_command(line: &str) -> Result<Command, CommandError> {
    Ok(serde_json::from_str(line.trim())?)
}

// ── Replies ──────────────────────────────────────────────────────

/// Outcome of a request/change, or a failed command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum StatusReply {
    Success { venue: String, rooms: Vec<String> },
    Rejected,
    Error { error: String },
}

impl From<Outcome> for StatusReply {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Allocated { venue, rooms } => StatusReply::Success { venue, rooms },
            Outcome::Rejected => StatusReply::Rejected,
        }
    }
}

/// One line of output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Reply {
    Status(StatusReply),
    Rooms(Vec<RoomReport>),
}

impl Reply {
    pub fn error(e: impl std::fmt::Display) -> Self {
        Reply::Status(StatusReply::Error {
            error: e.to_string(),
        })
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

impl From<Outcome> for Reply {
    fn from(outcome: Outcome) -> Self {
        Reply::Status(outcome.into())
    }
}
