// Copyright (C) 2013-2020 Blockstack PBC, a public benefit corporation
// Copyright (C) 2020-2026 Stacks Open Internet Foundation
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <http://www.gnu.org/licenses/>.

use colored::Colorize;

/// Failures raised while asserting on, or writing, textual Clarity values.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ExpectError {
    /// The text did not match the expected literal
    #[error("Expected {expected}, got {actual}")]
    Mismatch { expected: String, actual: String },
    /// A list or tuple was expected but its outer delimiters are missing
    #[error("Expected {expected}, got {actual}")]
    Structural { expected: String, actual: String },
    /// The writer was handed a value it cannot express
    #[error("{0}")]
    UnsupportedValue(String),
    /// No event in the list satisfied the requested shape
    #[error("Unable to retrieve expected {}{}", .wanted, events_suffix(.events))]
    NotFound {
        wanted: String,
        events: Option<String>,
    },
}

fn events_suffix(events: &Option<String>) -> String {
    match events {
        Some(dump) => format!("\n{dump}"),
        None => String::new(),
    }
}

impl ExpectError {
    pub(crate) fn mismatch(expected: &str, actual: &str) -> Self {
        ExpectError::Mismatch {
            expected: expected.to_string(),
            actual: actual.to_string(),
        }
    }

    /// Terminal rendering: expected text in green, actual text in red.
    pub fn colorized(&self) -> String {
        match self {
            ExpectError::Mismatch { expected, actual }
            | ExpectError::Structural { expected, actual } => {
                format!("Expected {}, got {}", expected.green(), actual.red())
            }
            other => other.to_string(),
        }
    }
}

/// Failures talking to the session host.
#[derive(thiserror::Error, Debug)]
pub enum BridgeError {
    /// The host rejected the call
    #[error("host error: {0}")]
    Host(String),
    /// The host answered with something that is not the expected JSON
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
    /// Empty blocks cannot move the chain tip backwards
    #[error("Chain tip cannot be moved from {from} to {to}")]
    ChainTip { from: u64, to: u64 },
}
