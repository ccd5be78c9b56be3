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

//! Thin client over the session host: transaction builders plus a chain
//! handle that forwards calls and decodes the JSON responses. Opening and
//! closing sessions is left to the caller.

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde_json::{json, Value as JsonValue};
use slog::{slog_debug, slog_warn};

use crate::errors::BridgeError;
use crate::events::HostEvent;
use crate::value::ClarityValue;

define_named_enum!(
    /// Operations exposed by the session host
    HostOperation {
        NewSession("api/v1/new_session"),
        LoadDeployment("api/v1/load_deployment"),
        MineBlock("api/v1/mine_block"),
        MineEmptyBlocks("api/v1/mine_empty_blocks"),
        CallReadOnlyFn("api/v1/call_read_only_fn"),
        GetAssetsMaps("api/v1/get_assets_maps"),
        TerminateSession("api/v1/terminate_session"),
    }
);

/// The native runtime that owns sessions, mines blocks and runs contracts.
/// Every call is synchronous and answers with a JSON document.
pub trait Host {
    fn invoke(&mut self, op: HostOperation, payload: &JsonValue) -> Result<String, BridgeError>;
}

define_u8_enum!(
    /// Value of a transaction's `type` field
    TxType {
        TransferSTX = 1,
        ContractCall = 2,
        DeployContract = 3
    }
);

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TxContractCall {
    pub contract: String,
    pub method: String,
    pub args: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TxTransfer {
    pub recipient: String,
    pub amount: u128,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TxDeployContract {
    pub name: String,
    pub code: String,
}

/// A transaction to include in a mined block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Tx {
    #[serde(rename = "type")]
    pub tx_type: TxType,
    pub sender: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contract_call: Option<TxContractCall>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transfer_stx: Option<TxTransfer>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deploy_contract: Option<TxDeployContract>,
}

impl Tx {
    fn new(tx_type: TxType, sender: &str) -> Tx {
        Tx {
            tx_type,
            sender: sender.to_string(),
            contract_call: None,
            transfer_stx: None,
            deploy_contract: None,
        }
    }

    /// `args` are Clarity literals, typically built with [`crate::types`].
    pub fn contract_call<I, S>(contract: &str, method: &str, args: I, sender: &str) -> Tx
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut tx = Tx::new(TxType::ContractCall, sender);
        tx.contract_call = Some(TxContractCall {
            contract: contract.to_string(),
            method: method.to_string(),
            args: args.into_iter().map(Into::into).collect(),
        });
        tx
    }

    pub fn transfer_stx(amount: u128, recipient: &str, sender: &str) -> Tx {
        let mut tx = Tx::new(TxType::TransferSTX, sender);
        tx.transfer_stx = Some(TxTransfer {
            recipient: recipient.to_string(),
            amount,
        });
        tx
    }

    pub fn deploy_contract(name: &str, code: &str, sender: &str) -> Tx {
        let mut tx = Tx::new(TxType::DeployContract, sender);
        tx.deploy_contract = Some(TxDeployContract {
            name: name.to_string(),
            code: code.to_string(),
        });
        tx
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TxReceipt {
    pub result: String,
    #[serde(default)]
    pub events: Vec<HostEvent>,
}

impl TxReceipt {
    pub fn result(&self) -> ClarityValue<'_> {
        ClarityValue::from(&self.result)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub height: u64,
    pub receipts: Vec<TxReceipt>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
struct MinedBlock {
    block_height: u64,
    #[serde(default)]
    receipts: Vec<TxReceipt>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EmptyBlock {
    pub session_id: u64,
    pub block_height: u64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ReadOnlyFn {
    pub session_id: u64,
    pub result: String,
    #[serde(default)]
    pub events: Vec<HostEvent>,
}

impl ReadOnlyFn {
    pub fn result(&self) -> ClarityValue<'_> {
        ClarityValue::from(&self.result)
    }
}

/// Balances per asset, then per owner.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AssetsMaps {
    pub session_id: u64,
    pub assets: BTreeMap<String, BTreeMap<String, u128>>,
}

/// Handle on an open session. Tracks the chain tip reported by the host.
pub struct Chain<H: Host> {
    host: H,
    session_id: u64,
    block_height: u64,
}

impl<H: Host> Chain<H> {
    pub fn new(host: H, session_id: u64) -> Chain<H> {
        Chain {
            host,
            session_id,
            block_height: 1,
        }
    }

    pub fn session_id(&self) -> u64 {
        self.session_id
    }

    pub fn block_height(&self) -> u64 {
        self.block_height
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    fn call<T: DeserializeOwned>(
        &mut self,
        op: HostOperation,
        payload: JsonValue,
    ) -> Result<T, BridgeError> {
        debug!("Invoke host"; "op" => %op, "session_id" => self.session_id);
        let response = self.host.invoke(op, &payload)?;
        Ok(serde_json::from_str(&response)?)
    }

    pub fn mine_block(&mut self, transactions: Vec<Tx>) -> Result<Block, BridgeError> {
        let payload = json!({
            "sessionId": self.session_id,
            "transactions": transactions,
        });
        let mined: MinedBlock = self.call(HostOperation::MineBlock, payload)?;
        self.block_height = mined.block_height;
        Ok(Block {
            height: mined.block_height,
            receipts: mined.receipts,
        })
    }

    pub fn mine_empty_block(&mut self, count: u64) -> Result<EmptyBlock, BridgeError> {
        let payload = json!({
            "sessionId": self.session_id,
            "count": count,
        });
        let block: EmptyBlock = self.call(HostOperation::MineEmptyBlocks, payload)?;
        self.block_height = block.block_height;
        Ok(block)
    }

    /// Mine empty blocks until the tip reaches `target_block_height`.
    pub fn mine_empty_block_until(
        &mut self,
        target_block_height: u64,
    ) -> Result<EmptyBlock, BridgeError> {
        let Some(count) = target_block_height.checked_sub(self.block_height) else {
            warn!("Refusing to move chain tip backwards";
                  "from" => self.block_height, "to" => target_block_height);
            return Err(BridgeError::ChainTip {
                from: self.block_height,
                to: target_block_height,
            });
        };
        self.mine_empty_block(count)
    }

    pub fn call_read_only_fn<I, S>(
        &mut self,
        contract: &str,
        method: &str,
        args: I,
        sender: &str,
    ) -> Result<ReadOnlyFn, BridgeError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let args: Vec<String> = args.into_iter().map(Into::into).collect();
        let payload = json!({
            "sessionId": self.session_id,
            "contract": contract,
            "method": method,
            "args": args,
            "sender": sender,
        });
        self.call(HostOperation::CallReadOnlyFn, payload)
    }

    pub fn get_assets_maps(&mut self) -> Result<AssetsMaps, BridgeError> {
        let payload = json!({ "sessionId": self.session_id });
        self.call(HostOperation::GetAssetsMaps, payload)
    }
}
