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

//! Writers for the canonical textual form of Clarity values, as sent to the
//! session host when building contract-call arguments.

use clarinet_common::consts::BUFF_LITERAL_PREFIX;
use clarinet_common::util::hash::to_hex;
use serde_json::{Map, Value as JsonValue};

use crate::errors::ExpectError;

pub fn ok(value: &str) -> String {
    format!("(ok {value})")
}

pub fn err(value: &str) -> String {
    format!("(err {value})")
}

pub fn some(value: &str) -> String {
    format!("(some {value})")
}

pub fn none() -> String {
    "none".to_string()
}

pub fn bool(value: bool) -> String {
    value.to_string()
}

pub fn int(value: impl Into<i128>) -> String {
    value.into().to_string()
}

pub fn uint(value: impl Into<u128>) -> String {
    format!("u{}", value.into())
}

/// Double-quoted, with JSON escaping of quotes, backslashes and control chars.
pub fn ascii(value: &str) -> String {
    json_quote(value)
}

pub fn utf8(value: &str) -> String {
    format!("u{}", json_quote(value))
}

/// `0x`-prefixed lowercase hex of the given bytes. A `&str` is written as
/// its UTF-8 encoding.
pub fn buff(value: impl AsRef<[u8]>) -> String {
    let bytes = value.as_ref();
    let mut out = String::with_capacity(BUFF_LITERAL_PREFIX.len() + bytes.len() * 2);
    out.push_str(BUFF_LITERAL_PREFIX);
    out.push_str(&to_hex(bytes));
    out
}

pub fn list<I, S>(values: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let items: Vec<String> = values
        .into_iter()
        .map(|v| v.as_ref().to_string())
        .collect();
    format!("(list {})", items.join(" "))
}

pub fn principal(value: &str) -> String {
    format!("'{value}")
}

/// Write a tuple literal from a JSON object whose string fields already hold
/// Clarity text (e.g. the output of [`uint`]). Nested objects become nested
/// tuples. Array-valued fields are rejected.
pub fn tuple(value: &JsonValue) -> Result<String, ExpectError> {
    match value {
        JsonValue::Object(fields) => Ok(format!("{{ {} }}", serialize_tuple(fields)?)),
        _ => Err(ExpectError::UnsupportedValue(
            "Tuple must be a map".to_string(),
        )),
    }
}

fn serialize_tuple(fields: &Map<String, JsonValue>) -> Result<String, ExpectError> {
    let mut items = Vec::with_capacity(fields.len());
    for (key, value) in fields.iter() {
        let item = match value {
            JsonValue::Array(_) => {
                return Err(ExpectError::UnsupportedValue(
                    "Tuple value can't be an array".to_string(),
                ))
            }
            JsonValue::Null => {
                return Err(ExpectError::UnsupportedValue(
                    "Tuple value can't be null".to_string(),
                ))
            }
            JsonValue::Object(nested) => format!("{key}: {{ {} }}", serialize_tuple(nested)?),
            JsonValue::String(text) => format!("{key}: {text}"),
            JsonValue::Bool(b) => format!("{key}: {b}"),
            JsonValue::Number(n) => format!("{key}: {n}"),
        };
        items.push(item);
    }
    Ok(items.join(", "))
}

fn json_quote(value: &str) -> String {
    // serializing a str cannot fail
    serde_json::to_string(value).unwrap_or_default()
}
