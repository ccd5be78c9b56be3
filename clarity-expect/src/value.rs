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

use std::collections::BTreeMap;
use std::fmt;

use crate::errors::ExpectError;
use crate::scanner::{split_tuple_entry, split_top_level};
use crate::types;

/// A borrowed Clarity value in its canonical textual form, as returned by the
/// session host. Every `expect_*` method checks the text against an expected
/// shape and either returns the decoded value (or the unwrapped payload, for
/// chaining) or an [`ExpectError`] naming both sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClarityValue<'a>(&'a str);

impl<'a> ClarityValue<'a> {
    pub fn new(text: &'a str) -> Self {
        ClarityValue(text)
    }

    pub fn as_str(&self) -> &'a str {
        self.0
    }

    /// Match `expected` at the start of the text and return what follows it.
    ///
    /// The literal must be followed by the end of the text or by one space,
    /// which is dropped from the remainder. When `wrapped`, the text must
    /// also be enclosed in a single pair of parentheses, e.g. `(ok u5)`.
    pub fn consume(&self, expected: &str, wrapped: bool) -> Result<ClarityValue<'a>, ExpectError> {
        let src = self.0;
        let mismatch = || ExpectError::mismatch(expected, src);

        let delimiters = if wrapped { 2 } else { 0 };
        if src.len() < expected.len() + delimiters {
            return Err(mismatch());
        }

        let inner = if wrapped {
            src.strip_prefix('(')
                .and_then(|s| s.strip_suffix(')'))
                .ok_or_else(mismatch)?
        } else {
            src
        };

        let rest = inner.strip_prefix(expected).ok_or_else(mismatch)?;
        if rest.is_empty() {
            return Ok(ClarityValue(rest));
        }
        rest.strip_prefix(' ').map(ClarityValue).ok_or_else(mismatch)
    }

    /// Scalar assertions: the literal has to account for the whole text.
    pub(crate) fn consume_exact(&self, expected: &str) -> Result<(), ExpectError> {
        let remainder = self.consume(expected, false)?;
        if !remainder.0.is_empty() {
            return Err(ExpectError::mismatch(expected, self.0));
        }
        Ok(())
    }

    pub fn expect_ok(&self) -> Result<ClarityValue<'a>, ExpectError> {
        self.consume("ok", true)
    }

    pub fn expect_err(&self) -> Result<ClarityValue<'a>, ExpectError> {
        self.consume("err", true)
    }

    pub fn expect_some(&self) -> Result<ClarityValue<'a>, ExpectError> {
        self.consume("some", true)
    }

    pub fn expect_none(&self) -> Result<(), ExpectError> {
        self.consume_exact("none")
    }

    pub fn expect_bool(&self, expected: bool) -> Result<bool, ExpectError> {
        self.consume_exact(&types::bool(expected))?;
        Ok(expected)
    }

    pub fn expect_uint(&self, expected: impl Into<u128>) -> Result<u128, ExpectError> {
        let expected = expected.into();
        self.consume_exact(&types::uint(expected))?;
        Ok(expected)
    }

    pub fn expect_int(&self, expected: impl Into<i128>) -> Result<i128, ExpectError> {
        let expected = expected.into();
        self.consume_exact(&types::int(expected))?;
        Ok(expected)
    }

    /// Unlike the other scalars, buffers are compared as whole strings
    /// against the writer's output.
    pub fn expect_buff(&self, expected: impl AsRef<[u8]>) -> Result<Vec<u8>, ExpectError> {
        let expected = expected.as_ref();
        let literal = types::buff(expected);
        if self.0 != literal {
            return Err(ExpectError::mismatch(&literal, self.0));
        }
        Ok(expected.to_vec())
    }

    pub fn expect_ascii(&self, expected: &str) -> Result<String, ExpectError> {
        self.consume_exact(&types::ascii(expected))?;
        Ok(expected.to_string())
    }

    pub fn expect_utf8(&self, expected: &str) -> Result<String, ExpectError> {
        self.consume_exact(&types::utf8(expected))?;
        Ok(expected.to_string())
    }

    /// Principals are compared verbatim: pass the leading `'` when the text
    /// carries one (contract results do, event fields do not).
    pub fn expect_principal(&self, expected: &str) -> Result<String, ExpectError> {
        self.consume_exact(expected)?;
        Ok(expected.to_string())
    }

    /// Split a `[e1, e2, ...]` list into its element texts.
    pub fn expect_list(&self) -> Result<Vec<ClarityValue<'a>>, ExpectError> {
        if !(self.0.starts_with('[') && self.0.ends_with(']')) {
            return Err(ExpectError::Structural {
                expected: "(list ...)".to_string(),
                actual: self.0.to_string(),
            });
        }
        Ok(split_top_level(self.0)
            .into_iter()
            .map(ClarityValue)
            .collect())
    }

    /// Split a `{ k1: v1, k2: v2 }` tuple into its fields. Nested values are
    /// left as text.
    pub fn expect_tuple(&self) -> Result<BTreeMap<&'a str, ClarityValue<'a>>, ExpectError> {
        if !(self.0.starts_with('{') && self.0.ends_with('}')) {
            return Err(ExpectError::Structural {
                expected: "(tuple ...)".to_string(),
                actual: self.0.to_string(),
            });
        }
        Ok(split_top_level(self.0)
            .into_iter()
            .filter_map(split_tuple_entry)
            .map(|(key, value)| (key, ClarityValue(value)))
            .collect())
    }
}

impl<'a> From<&'a str> for ClarityValue<'a> {
    fn from(text: &'a str) -> Self {
        ClarityValue(text)
    }
}

impl<'a> From<&'a String> for ClarityValue<'a> {
    fn from(text: &'a String) -> Self {
        ClarityValue(text.as_str())
    }
}

impl PartialEq<str> for ClarityValue<'_> {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for ClarityValue<'_> {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl fmt::Display for ClarityValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
