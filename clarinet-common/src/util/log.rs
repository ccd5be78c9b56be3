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

use std::env;
use std::sync::atomic::{AtomicUsize, Ordering};

use slog::{Drain, Level, Logger};

use crate::consts::{LOG_DEBUG_ENV, LOG_TRACE_ENV};

lazy_static! {
    pub static ref LOGGER: Logger = make_logger();
    static ref LOGLEVEL: AtomicUsize = AtomicUsize::new(level_from_env().as_usize());
}

#[cfg(not(any(test, feature = "testing")))]
fn make_logger() -> Logger {
    let decorator = slog_term::PlainSyncDecorator::new(std::io::stderr());
    let drain = slog_term::FullFormat::new(decorator).build();
    Logger::root(drain.ignore_res(), o!())
}

#[cfg(any(test, feature = "testing"))]
fn make_logger() -> Logger {
    // route through the test harness so output is captured per test
    let decorator = slog_term::PlainSyncDecorator::new(slog_term::TestStdoutWriter);
    let drain = slog_term::FullFormat::new(decorator).build();
    Logger::root(drain.ignore_res(), o!())
}

fn level_from_env() -> Level {
    if env::var(LOG_TRACE_ENV) == Ok("1".into()) {
        Level::Trace
    } else if env::var(LOG_DEBUG_ENV) == Ok("1".into()) {
        Level::Debug
    } else {
        Level::Info
    }
}

/// Current process-wide log level
pub fn loglevel() -> Level {
    Level::from_usize(LOGLEVEL.load(Ordering::SeqCst)).unwrap_or(Level::Info)
}

/// Override the level chosen from the environment.
pub fn set_loglevel(level: Level) {
    LOGLEVEL.store(level.as_usize(), Ordering::SeqCst);
}

/// Parse a level name as it appears in config files (`trace` ... `error`).
pub fn parse_loglevel(name: &str) -> Option<Level> {
    match name.to_ascii_lowercase().as_str() {
        "trace" => Some(Level::Trace),
        "debug" => Some(Level::Debug),
        "info" => Some(Level::Info),
        "warn" | "warning" => Some(Level::Warning),
        "error" => Some(Level::Error),
        "critical" => Some(Level::Critical),
        _ => None,
    }
}

#[macro_export]
macro_rules! trace {
    ($($arg:tt)*) => ({
        if slog::Level::Trace.is_at_least($crate::util::log::loglevel()) {
            slog_trace!($crate::util::log::LOGGER, $($arg)*)
        }
    })
}

#[macro_export]
macro_rules! debug {
    ($($arg:tt)*) => ({
        if slog::Level::Debug.is_at_least($crate::util::log::loglevel()) {
            slog_debug!($crate::util::log::LOGGER, $($arg)*)
        }
    })
}

#[macro_export]
macro_rules! info {
    ($($arg:tt)*) => ({
        if slog::Level::Info.is_at_least($crate::util::log::loglevel()) {
            slog_info!($crate::util::log::LOGGER, $($arg)*)
        }
    })
}

#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => ({
        if slog::Level::Warning.is_at_least($crate::util::log::loglevel()) {
            slog_warn!($crate::util::log::LOGGER, $($arg)*)
        }
    })
}

#[macro_export]
macro_rules! error {
    ($($arg:tt)*) => ({
        if slog::Level::Error.is_at_least($crate::util::log::loglevel()) {
            slog_error!($crate::util::log::LOGGER, $($arg)*)
        }
    })
}
