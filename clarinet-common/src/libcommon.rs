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

#![allow(unused_macros)]
#![cfg_attr(test, allow(unused_variables, unused_assignments))]

#[allow(unused_imports)]
#[macro_use(o, slog_log, slog_trace, slog_debug, slog_info, slog_warn, slog_error)]
extern crate slog;

#[macro_use]
extern crate lazy_static;

#[macro_use]
pub mod util;

pub mod consts {
    /// Prefix every canonical buffer literal starts with
    pub const BUFF_LITERAL_PREFIX: &str = "0x";

    /// Environment switches read once when the logger is first used
    pub const LOG_TRACE_ENV: &str = "CLARINET_LOG_TRACE";
    pub const LOG_DEBUG_ENV: &str = "CLARINET_LOG_DEBUG";
}
