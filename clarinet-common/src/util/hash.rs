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

const HEX_DIGITS: &[u8; 16] = b"0123456789abcdef";

const fn make_byte_to_hex() -> [[u8; 2]; 256] {
    let mut table = [[0u8; 2]; 256];
    let mut i = 0;
    while i < 256 {
        table[i] = [HEX_DIGITS[i >> 4], HEX_DIGITS[i & 0x0f]];
        i += 1;
    }
    table
}

/// Lowercase two-digit encoding of every byte value, indexed by the byte itself.
pub const BYTE_TO_HEX: [[u8; 2]; 256] = make_byte_to_hex();

/// Convert a slice of u8 to a lowercase hex string
pub fn to_hex(s: &[u8]) -> String {
    let mut r = Vec::with_capacity(s.len() * 2);
    for b in s.iter() {
        r.extend_from_slice(&BYTE_TO_HEX[*b as usize]);
    }
    // every entry of the table is ASCII
    String::from_utf8(r).unwrap_or_default()
}
