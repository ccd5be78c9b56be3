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

//! Assertion helpers for textual Clarity values returned by a contract test
//! host, and writers for the literals sent back to it.
//!
//! ```ignore
//! let receipt = &block.receipts[0];
//! receipt.result().expect_err()?.expect_uint(403u32)?;
//! ```

#[macro_use]
extern crate serde_derive;

#[macro_use]
extern crate clarinet_common;

pub mod chain;
pub mod config;
pub mod errors;
pub mod events;
mod scanner;
pub mod types;
pub mod value;

pub use chain::{Block, Chain, Host, HostOperation, Tx, TxReceipt};
pub use config::{ConfigError, ExpectConfig};
pub use errors::{BridgeError, ExpectError};
pub use events::{EventsExt, HostEvent};
pub use value::ClarityValue;

#[cfg(test)]
pub mod tests;
