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

use serde::ser::SerializeMap;
use serde::{Deserializer, Serializer};
use serde_json::Value as JsonValue;
use slog::{slog_debug, slog_trace};

use crate::errors::ExpectError;
use crate::value::ClarityValue;

define_named_enum!(
    /// Top-level keys the host uses to tag each event record
    EventKind {
        STXTransfer("stx_transfer_event"),
        FTTransfer("ft_transfer_event"),
        FTMint("ft_mint_event"),
        FTBurn("ft_burn_event"),
        NFTTransfer("nft_transfer_event"),
        NFTMint("nft_mint_event"),
        NFTBurn("nft_burn_event"),
        SmartContract("contract_event"),
    }
);

/// An event emitted by a transaction, as reported by the session host.
/// Records whose kind is not one of [`EventKind`] are kept verbatim.
#[derive(Debug, Clone, PartialEq)]
pub enum HostEvent {
    STXTransferEvent(STXTransferEventData),
    FTTransferEvent(FTTransferEventData),
    FTMintEvent(FTMintEventData),
    FTBurnEvent(FTBurnEventData),
    NFTTransferEvent(NFTTransferEventData),
    NFTMintEvent(NFTMintEventData),
    NFTBurnEvent(NFTBurnEventData),
    SmartContractEvent(SmartContractEventData),
    Unknown(JsonValue),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct STXTransferEventData {
    pub sender: String,
    pub recipient: String,
    pub amount: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memo: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FTTransferEventData {
    pub asset_identifier: String,
    pub sender: String,
    pub recipient: String,
    pub amount: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FTMintEventData {
    pub asset_identifier: String,
    pub recipient: String,
    pub amount: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FTBurnEventData {
    pub asset_identifier: String,
    pub sender: String,
    pub amount: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NFTTransferEventData {
    pub asset_identifier: String,
    pub sender: String,
    pub recipient: String,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_value: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NFTMintEventData {
    pub asset_identifier: String,
    pub recipient: String,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_value: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NFTBurnEventData {
    pub asset_identifier: String,
    pub sender: String,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_value: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SmartContractEventData {
    pub contract_identifier: String,
    pub topic: String,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_value: Option<String>,
}

impl HostEvent {
    pub fn kind(&self) -> Option<EventKind> {
        match self {
            HostEvent::STXTransferEvent(_) => Some(EventKind::STXTransfer),
            HostEvent::FTTransferEvent(_) => Some(EventKind::FTTransfer),
            HostEvent::FTMintEvent(_) => Some(EventKind::FTMint),
            HostEvent::FTBurnEvent(_) => Some(EventKind::FTBurn),
            HostEvent::NFTTransferEvent(_) => Some(EventKind::NFTTransfer),
            HostEvent::NFTMintEvent(_) => Some(EventKind::NFTMint),
            HostEvent::NFTBurnEvent(_) => Some(EventKind::NFTBurn),
            HostEvent::SmartContractEvent(_) => Some(EventKind::SmartContract),
            HostEvent::Unknown(_) => None,
        }
    }

    /// Decode a host record by looking for the first well-known kind key it
    /// carries. Records without one, or whose fields do not fit the kind,
    /// become [`HostEvent::Unknown`].
    pub fn from_json(raw: JsonValue) -> HostEvent {
        let Some(kind) = EventKind::ALL
            .iter()
            .find(|kind| raw.get(kind.get_name_str()).is_some())
        else {
            return HostEvent::Unknown(raw);
        };
        match HostEvent::decode(*kind, raw[kind.get_name_str()].clone()) {
            Ok(event) => event,
            Err(e) => {
                debug!("Keeping malformed event as raw JSON"; "kind" => %kind, "error" => %e);
                HostEvent::Unknown(raw)
            }
        }
    }

    fn decode(kind: EventKind, data: JsonValue) -> Result<HostEvent, serde_json::Error> {
        let event = match kind {
            EventKind::STXTransfer => HostEvent::STXTransferEvent(serde_json::from_value(data)?),
            EventKind::FTTransfer => HostEvent::FTTransferEvent(serde_json::from_value(data)?),
            EventKind::FTMint => HostEvent::FTMintEvent(serde_json::from_value(data)?),
            EventKind::FTBurn => HostEvent::FTBurnEvent(serde_json::from_value(data)?),
            EventKind::NFTTransfer => HostEvent::NFTTransferEvent(serde_json::from_value(data)?),
            EventKind::NFTMint => HostEvent::NFTMintEvent(serde_json::from_value(data)?),
            EventKind::NFTBurn => HostEvent::NFTBurnEvent(serde_json::from_value(data)?),
            EventKind::SmartContract => {
                HostEvent::SmartContractEvent(serde_json::from_value(data)?)
            }
        };
        Ok(event)
    }
}

impl serde::Serialize for HostEvent {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        match self {
            HostEvent::STXTransferEvent(data) => serialize_tagged(s, EventKind::STXTransfer, data),
            HostEvent::FTTransferEvent(data) => serialize_tagged(s, EventKind::FTTransfer, data),
            HostEvent::FTMintEvent(data) => serialize_tagged(s, EventKind::FTMint, data),
            HostEvent::FTBurnEvent(data) => serialize_tagged(s, EventKind::FTBurn, data),
            HostEvent::NFTTransferEvent(data) => serialize_tagged(s, EventKind::NFTTransfer, data),
            HostEvent::NFTMintEvent(data) => serialize_tagged(s, EventKind::NFTMint, data),
            HostEvent::NFTBurnEvent(data) => serialize_tagged(s, EventKind::NFTBurn, data),
            HostEvent::SmartContractEvent(data) => {
                serialize_tagged(s, EventKind::SmartContract, data)
            }
            HostEvent::Unknown(raw) => serde::Serialize::serialize(raw, s),
        }
    }
}

/// Same layout the host uses: `{ "type": <kind>, <kind>: { ... } }`
fn serialize_tagged<S, T>(s: S, kind: EventKind, data: &T) -> Result<S::Ok, S::Error>
where
    S: Serializer,
    T: serde::Serialize,
{
    let mut map = s.serialize_map(Some(2))?;
    map.serialize_entry("type", kind.get_name_str())?;
    map.serialize_entry(kind.get_name_str(), data)?;
    map.end()
}

impl<'de> serde::Deserialize<'de> for HostEvent {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let raw = <JsonValue as serde::Deserialize>::deserialize(d)?;
        Ok(HostEvent::from_json(raw))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct STXTransferEvent {
    pub amount: u128,
    pub sender: String,
    pub recipient: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FungibleTokenTransferEvent {
    pub amount: u128,
    pub sender: String,
    pub recipient: String,
    /// Full asset identifier as reported by the host
    pub asset_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FungibleTokenMintEvent {
    pub amount: u128,
    pub recipient: String,
    pub asset_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FungibleTokenBurnEvent {
    pub amount: u128,
    pub sender: String,
    pub asset_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrintEvent {
    pub contract_identifier: String,
    pub topic: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NonFungibleTokenTransferEvent {
    pub token_id: String,
    pub sender: String,
    pub recipient: String,
    pub asset_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NonFungibleTokenMintEvent {
    pub token_id: String,
    pub recipient: String,
    pub asset_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NonFungibleTokenBurnEvent {
    pub token_id: String,
    pub sender: String,
    pub asset_id: String,
}

/// Searches over the events of a receipt. Each search returns the first
/// event satisfying every field check, and fails with
/// [`ExpectError::NotFound`] once the list is exhausted.
pub trait EventsExt {
    fn expect_stx_transfer_event(
        &self,
        amount: u128,
        sender: &str,
        recipient: &str,
    ) -> Result<STXTransferEvent, ExpectError>;

    /// `asset_id` only has to be a suffix of the reported identifier.
    fn expect_fungible_token_transfer_event(
        &self,
        amount: u128,
        sender: &str,
        recipient: &str,
        asset_id: &str,
    ) -> Result<FungibleTokenTransferEvent, ExpectError>;

    fn expect_fungible_token_mint_event(
        &self,
        amount: u128,
        recipient: &str,
        asset_id: &str,
    ) -> Result<FungibleTokenMintEvent, ExpectError>;

    fn expect_fungible_token_burn_event(
        &self,
        amount: u128,
        sender: &str,
        asset_id: &str,
    ) -> Result<FungibleTokenBurnEvent, ExpectError>;

    /// `value` only has to be a suffix of the printed value.
    fn expect_print_event(
        &self,
        contract_identifier: &str,
        value: &str,
    ) -> Result<PrintEvent, ExpectError>;

    /// NFT searches compare the token id as raw text and require the asset
    /// identifier to be exactly `<asset_address>::<asset_id>`.
    fn expect_non_fungible_token_transfer_event(
        &self,
        token_id: &str,
        sender: &str,
        recipient: &str,
        asset_address: &str,
        asset_id: &str,
    ) -> Result<NonFungibleTokenTransferEvent, ExpectError>;

    fn expect_non_fungible_token_mint_event(
        &self,
        token_id: &str,
        recipient: &str,
        asset_address: &str,
        asset_id: &str,
    ) -> Result<NonFungibleTokenMintEvent, ExpectError>;

    fn expect_non_fungible_token_burn_event(
        &self,
        token_id: &str,
        sender: &str,
        asset_address: &str,
        asset_id: &str,
    ) -> Result<NonFungibleTokenBurnEvent, ExpectError>;
}

fn find_event<T, F>(events: &[HostEvent], matcher: F) -> Option<T>
where
    F: Fn(&HostEvent) -> Result<T, ExpectError>,
{
    for (index, event) in events.iter().enumerate() {
        match matcher(event) {
            Ok(found) => return Some(found),
            Err(e) => {
                trace!("Event does not match"; "index" => index, "reason" => %e);
            }
        }
    }
    None
}

fn not_found(wanted: &str) -> ExpectError {
    ExpectError::NotFound {
        wanted: wanted.to_string(),
        events: None,
    }
}

fn wrong_kind(expected: EventKind, event: &HostEvent) -> ExpectError {
    ExpectError::mismatch(
        expected.get_name_str(),
        event.kind().map_or("unknown event", |kind| kind.get_name_str()),
    )
}

/// Host amounts are bare decimal strings, so they are checked as ints.
fn expect_amount(text: &str, amount: u128) -> Result<u128, ExpectError> {
    ClarityValue::new(text).consume_exact(&amount.to_string())?;
    Ok(amount)
}

fn expect_principal(text: &str, principal: &str) -> Result<String, ExpectError> {
    ClarityValue::new(text).expect_principal(principal)
}

fn expect_suffix(text: &str, suffix: &str) -> Result<String, ExpectError> {
    if !text.ends_with(suffix) {
        return Err(ExpectError::mismatch(suffix, text));
    }
    Ok(text.to_string())
}

fn expect_equal(text: &str, expected: &str) -> Result<String, ExpectError> {
    if text != expected {
        return Err(ExpectError::mismatch(expected, text));
    }
    Ok(text.to_string())
}

impl EventsExt for [HostEvent] {
    fn expect_stx_transfer_event(
        &self,
        amount: u128,
        sender: &str,
        recipient: &str,
    ) -> Result<STXTransferEvent, ExpectError> {
        find_event(self, |event| {
            let HostEvent::STXTransferEvent(data) = event else {
                return Err(wrong_kind(EventKind::STXTransfer, event));
            };
            Ok(STXTransferEvent {
                amount: expect_amount(&data.amount, amount)?,
                sender: expect_principal(&data.sender, sender)?,
                recipient: expect_principal(&data.recipient, recipient)?,
            })
        })
        .ok_or_else(|| not_found("STXTransferEvent"))
    }

    fn expect_fungible_token_transfer_event(
        &self,
        amount: u128,
        sender: &str,
        recipient: &str,
        asset_id: &str,
    ) -> Result<FungibleTokenTransferEvent, ExpectError> {
        find_event(self, |event| {
            let HostEvent::FTTransferEvent(data) = event else {
                return Err(wrong_kind(EventKind::FTTransfer, event));
            };
            Ok(FungibleTokenTransferEvent {
                amount: expect_amount(&data.amount, amount)?,
                sender: expect_principal(&data.sender, sender)?,
                recipient: expect_principal(&data.recipient, recipient)?,
                asset_id: expect_suffix(&data.asset_identifier, asset_id)?,
            })
        })
        .ok_or_else(|| ExpectError::NotFound {
            wanted: format!(
                "FungibleTokenTransferEvent({amount}, {sender}, {recipient}, {asset_id})"
            ),
            events: Some(serde_json::to_string(self).unwrap_or_default()),
        })
    }

    fn expect_fungible_token_mint_event(
        &self,
        amount: u128,
        recipient: &str,
        asset_id: &str,
    ) -> Result<FungibleTokenMintEvent, ExpectError> {
        find_event(self, |event| {
            let HostEvent::FTMintEvent(data) = event else {
                return Err(wrong_kind(EventKind::FTMint, event));
            };
            Ok(FungibleTokenMintEvent {
                amount: expect_amount(&data.amount, amount)?,
                recipient: expect_principal(&data.recipient, recipient)?,
                asset_id: expect_suffix(&data.asset_identifier, asset_id)?,
            })
        })
        .ok_or_else(|| not_found("FungibleTokenMintEvent"))
    }

    fn expect_fungible_token_burn_event(
        &self,
        amount: u128,
        sender: &str,
        asset_id: &str,
    ) -> Result<FungibleTokenBurnEvent, ExpectError> {
        find_event(self, |event| {
            let HostEvent::FTBurnEvent(data) = event else {
                return Err(wrong_kind(EventKind::FTBurn, event));
            };
            Ok(FungibleTokenBurnEvent {
                amount: expect_amount(&data.amount, amount)?,
                sender: expect_principal(&data.sender, sender)?,
                asset_id: expect_suffix(&data.asset_identifier, asset_id)?,
            })
        })
        .ok_or_else(|| not_found("FungibleTokenBurnEvent"))
    }

    fn expect_print_event(
        &self,
        contract_identifier: &str,
        value: &str,
    ) -> Result<PrintEvent, ExpectError> {
        find_event(self, |event| {
            let HostEvent::SmartContractEvent(data) = event else {
                return Err(wrong_kind(EventKind::SmartContract, event));
            };
            let contract_identifier =
                expect_principal(&data.contract_identifier, contract_identifier)?;
            Ok(PrintEvent {
                contract_identifier,
                topic: expect_suffix(&data.topic, "print")?,
                value: expect_suffix(&data.value, value)?,
            })
        })
        .ok_or_else(|| not_found("PrintEvent"))
    }

    fn expect_non_fungible_token_transfer_event(
        &self,
        token_id: &str,
        sender: &str,
        recipient: &str,
        asset_address: &str,
        asset_id: &str,
    ) -> Result<NonFungibleTokenTransferEvent, ExpectError> {
        let asset_identifier = format!("{asset_address}::{asset_id}");
        find_event(self, |event| {
            let HostEvent::NFTTransferEvent(data) = event else {
                return Err(wrong_kind(EventKind::NFTTransfer, event));
            };
            Ok(NonFungibleTokenTransferEvent {
                token_id: expect_equal(&data.value, token_id)?,
                sender: expect_principal(&data.sender, sender)?,
                recipient: expect_principal(&data.recipient, recipient)?,
                asset_id: expect_equal(&data.asset_identifier, &asset_identifier)?,
            })
        })
        .ok_or_else(|| not_found("NonFungibleTokenTransferEvent"))
    }

    fn expect_non_fungible_token_mint_event(
        &self,
        token_id: &str,
        recipient: &str,
        asset_address: &str,
        asset_id: &str,
    ) -> Result<NonFungibleTokenMintEvent, ExpectError> {
        let asset_identifier = format!("{asset_address}::{asset_id}");
        find_event(self, |event| {
            let HostEvent::NFTMintEvent(data) = event else {
                return Err(wrong_kind(EventKind::NFTMint, event));
            };
            Ok(NonFungibleTokenMintEvent {
                token_id: expect_equal(&data.value, token_id)?,
                recipient: expect_principal(&data.recipient, recipient)?,
                asset_id: expect_equal(&data.asset_identifier, &asset_identifier)?,
            })
        })
        .ok_or_else(|| not_found("NonFungibleTokenMintEvent"))
    }

    fn expect_non_fungible_token_burn_event(
        &self,
        token_id: &str,
        sender: &str,
        asset_address: &str,
        asset_id: &str,
    ) -> Result<NonFungibleTokenBurnEvent, ExpectError> {
        let asset_identifier = format!("{asset_address}::{asset_id}");
        find_event(self, |event| {
            let HostEvent::NFTBurnEvent(data) = event else {
                return Err(wrong_kind(EventKind::NFTBurn, event));
            };
            Ok(NonFungibleTokenBurnEvent {
                token_id: expect_equal(&data.value, token_id)?,
                sender: expect_principal(&data.sender, sender)?,
                asset_id: expect_equal(&data.asset_identifier, &asset_identifier)?,
            })
        })
        .ok_or_else(|| not_found("NonFungibleTokenBurnEvent"))
    }
}
