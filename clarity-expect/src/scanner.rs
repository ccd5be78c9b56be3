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

//! Top-level splitting of bracketed list and tuple text.
//!
//! Only the bracket characters are tracked. String literals are not, so a
//! comma inside a quoted value at depth 1 splits the element.

/// Split `src` (whose first and last characters are the outer delimiters)
/// into the substrings between top-level commas.
pub fn split_top_level(src: &str) -> Vec<&str> {
    let mut stack: Vec<char> = vec![];
    let mut elements = vec![];
    let mut start = 1;

    for (i, c) in src.char_indices() {
        if c == ',' && stack.len() == 1 {
            elements.push(&src[start.min(i)..i]);
            // skip the comma and the separator after it
            let after = i + 1;
            start = after + src[after..].chars().next().map_or(0, char::len_utf8);
        }
        match c {
            '(' | '[' | '{' => stack.push(c),
            ')' if stack.last() == Some(&'(') => {
                stack.pop();
            }
            '}' if stack.last() == Some(&'{') => {
                stack.pop();
            }
            ']' if stack.last() == Some(&'[') => {
                stack.pop();
            }
            _ => {}
        }
    }

    let end = src.len().saturating_sub(1);
    if start < end {
        elements.push(&src[start..end]);
    }
    elements
}

/// Split a tuple element at its first `:` into a trimmed key and value.
pub fn split_tuple_entry(element: &str) -> Option<(&str, &str)> {
    let colon = element.find(':')?;
    Some((element[..colon].trim(), element[colon + 1..].trim()))
}
