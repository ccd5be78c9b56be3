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

use std::collections::HashSet;

use serde_json::{json, Value as JsonValue};

use crate::chain::*;
use crate::errors::BridgeError;
use crate::events::EventsExt;
use crate::types::{self, uint};

const DEPLOYER: &str = "ST1PQHQKV0RJXZFY1DGX8MNSNYVE3VGZJSRTPGZGM";
const WALLET_1: &str = "ST1SJ3DTE5DN7X54YDH5D64R3BCB6A2AG2ZQ8YPD5";
const WALLET_2: &str = "ST2CY5V39NHDPWSXMW9QDT3HC3GD6Q6XX4CFRK9AG";

/// In-memory stand-in for the session host, running a `color-vote`
/// contract: each participant scores four colors from u0 to u5, once.
struct ColorVoteHost {
    block_height: u64,
    voters: HashSet<String>,
    calls: Vec<(HostOperation, JsonValue)>,
}

impl ColorVoteHost {
    fn new() -> ColorVoteHost {
        ColorVoteHost {
            block_height: 1,
            voters: HashSet::new(),
            calls: vec![],
        }
    }

    fn run(&mut self, method: &str, args: &[&str], sender: &str) -> (String, Vec<JsonValue>) {
        match method {
            "get-nb-of-voters" => (uint(self.voters.len() as u64), vec![]),
            "vote" => {
                let valid = args.len() == 4
                    && args.iter().all(|arg| {
                        matches!(
                            arg.strip_prefix('u').and_then(|n| n.parse::<u32>().ok()),
                            Some(score) if score <= 5
                        )
                    });
                if !valid {
                    return (types::err(&uint(400u32)), vec![]);
                }
                if !self.voters.insert(sender.to_string()) {
                    return (types::err(&uint(403u32)), vec![]);
                }
                let printed = types::tuple(&json!({
                    "voter": types::principal(sender),
                    "nb-of-voters": uint(self.voters.len() as u64),
                }))
                .unwrap();
                let event = json!({
                    "type": "contract_event",
                    "contract_event": {
                        "contract_identifier": format!("{DEPLOYER}.color-vote"),
                        "topic": "print",
                        "value": printed,
                    }
                });
                (types::ok(&types::bool(true)), vec![event])
            }
            _ => (types::err(&uint(404u32)), vec![]),
        }
    }

    fn execute(&mut self, tx: &JsonValue) -> JsonValue {
        let sender = tx["sender"].as_str().unwrap_or_default().to_string();
        if let Some(transfer) = tx.get("transferStx") {
            let event = json!({
                "type": "stx_transfer_event",
                "stx_transfer_event": {
                    "sender": sender,
                    "recipient": transfer["recipient"],
                    "amount": transfer["amount"].to_string(),
                }
            });
            return json!({ "result": types::ok(&types::bool(true)), "events": [event] });
        }
        let call = &tx["contractCall"];
        let args: Vec<&str> = call["args"]
            .as_array()
            .map(|args| args.iter().filter_map(JsonValue::as_str).collect())
            .unwrap_or_default();
        let (result, events) = self.run(call["method"].as_str().unwrap_or_default(), &args, &sender);
        json!({ "result": result, "events": events })
    }
}

impl Host for ColorVoteHost {
    fn invoke(&mut self, op: HostOperation, payload: &JsonValue) -> Result<String, BridgeError> {
        self.calls.push((op, payload.clone()));
        let session_id = payload["sessionId"].clone();
        let response = match op {
            HostOperation::MineBlock => {
                let txs = payload["transactions"]
                    .as_array()
                    .ok_or_else(|| BridgeError::Host("missing transactions".to_string()))?;
                let receipts: Vec<JsonValue> = txs.iter().map(|tx| self.execute(tx)).collect();
                self.block_height += 1;
                json!({
                    "session_id": session_id,
                    "block_height": self.block_height,
                    "receipts": receipts,
                })
            }
            HostOperation::MineEmptyBlocks => {
                self.block_height += payload["count"].as_u64().unwrap_or_default();
                json!({ "session_id": session_id, "block_height": self.block_height })
            }
            HostOperation::CallReadOnlyFn => {
                let sender = payload["sender"].as_str().unwrap_or_default().to_string();
                let (result, events) =
                    self.run(payload["method"].as_str().unwrap_or_default(), &[], &sender);
                json!({ "session_id": session_id, "result": result, "events": events })
            }
            HostOperation::GetAssetsMaps => json!({
                "session_id": session_id,
                "assets": { "STX": { WALLET_1: 100000000000000u64, WALLET_2: 100000000000000u64 } }
            }),
            other => return Err(BridgeError::Host(format!("unsupported operation {other}"))),
        };
        Ok(response.to_string())
    }
}

fn vote(scores: [u32; 4], sender: &str) -> Tx {
    Tx::contract_call("color-vote", "vote", scores.map(uint), sender)
}

#[test]
fn test_get_nb_of_voters_returns_the_right_number_of_voters() {
    let mut chain = Chain::new(ColorVoteHost::new(), 0);
    let block = chain
        .mine_block(vec![Tx::contract_call(
            "color-vote",
            "get-nb-of-voters",
            Vec::<String>::new(),
            WALLET_1,
        )])
        .unwrap();

    block.receipts[0].result().expect_uint(0u32).unwrap();
}

#[test]
fn test_vote_participant_can_vote_only_one_time() {
    let mut chain = Chain::new(ColorVoteHost::new(), 0);
    let block = chain
        .mine_block(vec![vote([5, 5, 5, 5], WALLET_1), vote([5, 5, 5, 5], WALLET_1)])
        .unwrap();

    assert!(block.receipts[0]
        .result()
        .expect_ok()
        .unwrap()
        .expect_bool(true)
        .unwrap());
    assert_eq!(
        block.receipts[1]
            .result()
            .expect_err()
            .unwrap()
            .expect_uint(403u32)
            .unwrap(),
        403
    );
}

#[test]
fn test_vote_increments_the_number_of_voters() {
    let mut chain = Chain::new(ColorVoteHost::new(), 0);
    let block = chain
        .mine_block(vec![
            vote([5, 5, 5, 5], WALLET_1),
            Tx::contract_call("color-vote", "get-nb-of-voters", Vec::<String>::new(), WALLET_1),
        ])
        .unwrap();

    block.receipts[0]
        .result()
        .expect_ok()
        .unwrap()
        .expect_bool(true)
        .unwrap();
    block.receipts[1].result().expect_uint(1u32).unwrap();
}

#[test]
fn test_vote_throws_an_error_if_the_vote_is_not_valid() {
    let mut chain = Chain::new(ColorVoteHost::new(), 0);
    let block = chain.mine_block(vec![vote([6, 5, 5, 5], WALLET_1)]).unwrap();

    block.receipts[0]
        .result()
        .expect_err()
        .unwrap()
        .expect_uint(400u32)
        .unwrap();
}

#[test]
fn test_vote_prints_voter() {
    let mut chain = Chain::new(ColorVoteHost::new(), 0);
    let block = chain.mine_block(vec![vote([1, 2, 3, 4], WALLET_2)]).unwrap();

    let contract = format!("{DEPLOYER}.color-vote");
    let printed = block.receipts[0]
        .events
        .expect_print_event(&contract, "nb-of-voters: u1 }")
        .unwrap();
    let fields = crate::ClarityValue::from(&printed.value).expect_tuple().unwrap();
    fields["voter"]
        .expect_principal(&types::principal(WALLET_2))
        .unwrap();
}

#[test]
fn test_mine_block_payload_and_height() {
    let mut chain = Chain::new(ColorVoteHost::new(), 7);
    assert_eq!(chain.block_height(), 1);
    let block = chain.mine_block(vec![vote([0, 1, 2, 3], WALLET_1)]).unwrap();
    assert_eq!(block.height, 2);
    assert_eq!(chain.block_height(), 2);

    let (op, payload) = chain.host().calls.last().unwrap();
    assert_eq!(*op, HostOperation::MineBlock);
    assert_eq!(
        payload,
        &json!({
            "sessionId": 7,
            "transactions": [{
                "type": 2,
                "sender": WALLET_1,
                "contractCall": {
                    "contract": "color-vote",
                    "method": "vote",
                    "args": ["u0", "u1", "u2", "u3"],
                }
            }]
        })
    );
}

#[test]
fn test_tx_builders() {
    assert_eq!(
        serde_json::to_value(Tx::transfer_stx(1000, WALLET_2, WALLET_1)).unwrap(),
        json!({
            "type": 1,
            "sender": WALLET_1,
            "transferStx": { "recipient": WALLET_2, "amount": 1000 }
        })
    );
    assert_eq!(
        serde_json::to_value(Tx::deploy_contract("counter", "(define-data-var n uint u0)", DEPLOYER))
            .unwrap(),
        json!({
            "type": 3,
            "sender": DEPLOYER,
            "deployContract": { "name": "counter", "code": "(define-data-var n uint u0)" }
        })
    );
}

#[test]
fn test_tx_type_codes() {
    let codes: Vec<u8> = [
        Tx::transfer_stx(1, WALLET_2, WALLET_1),
        Tx::contract_call("color-vote", "vote", Vec::<String>::new(), WALLET_1),
        Tx::deploy_contract("counter", "", DEPLOYER),
    ]
    .iter()
    .map(|tx| tx.tx_type.to_u8())
    .collect();
    assert_eq!(codes, vec![1, 2, 3]);
    assert_eq!(TxType::from_u8(1), Some(TxType::TransferSTX));
    assert_eq!(TxType::from_u8(2), Some(TxType::ContractCall));
    assert_eq!(TxType::from_u8(3), Some(TxType::DeployContract));
    assert_eq!(TxType::from_u8(4), None);
}

#[test]
fn test_transfer_receipt_events() {
    let mut chain = Chain::new(ColorVoteHost::new(), 0);
    let block = chain
        .mine_block(vec![Tx::transfer_stx(250, WALLET_2, WALLET_1)])
        .unwrap();
    let transfer = block.receipts[0]
        .events
        .expect_stx_transfer_event(250, WALLET_1, WALLET_2)
        .unwrap();
    assert_eq!(transfer.amount, 250);
}

#[test]
fn test_mine_empty_blocks() {
    let mut chain = Chain::new(ColorVoteHost::new(), 0);
    let block = chain.mine_empty_block(3).unwrap();
    assert_eq!(block.block_height, 4);
    assert_eq!(chain.block_height(), 4);

    let block = chain.mine_empty_block_until(10).unwrap();
    assert_eq!(block.block_height, 10);
    let (_, payload) = chain.host().calls.last().unwrap();
    assert_eq!(payload["count"], 6);

    // staying at the tip is allowed
    chain.mine_empty_block_until(10).unwrap();

    match chain.mine_empty_block_until(5) {
        Err(BridgeError::ChainTip { from, to }) => {
            assert_eq!((from, to), (10, 5));
        }
        other => panic!("unexpected result: {other:?}"),
    }
    assert_eq!(chain.block_height(), 10);
}

#[test]
fn test_call_read_only_fn() {
    let mut chain = Chain::new(ColorVoteHost::new(), 0);
    chain.mine_block(vec![vote([5, 4, 3, 2], WALLET_1)]).unwrap();

    let read = chain
        .call_read_only_fn("color-vote", "get-nb-of-voters", Vec::<String>::new(), WALLET_2)
        .unwrap();
    read.result().expect_uint(1u32).unwrap();
    assert!(read.events.is_empty());

    let (op, payload) = chain.host().calls.last().unwrap();
    assert_eq!(op.get_name_str(), "api/v1/call_read_only_fn");
    assert_eq!(payload["sender"], WALLET_2);
}

#[test]
fn test_get_assets_maps() {
    let mut chain = Chain::new(ColorVoteHost::new(), 0);
    let maps = chain.get_assets_maps().unwrap();
    assert_eq!(maps.assets["STX"][WALLET_1], 100_000_000_000_000);
}

struct BrokenHost;

impl Host for BrokenHost {
    fn invoke(&mut self, op: HostOperation, _payload: &JsonValue) -> Result<String, BridgeError> {
        match op {
            HostOperation::MineBlock => Ok("not json".to_string()),
            other => Err(BridgeError::Host(format!("{other} unavailable"))),
        }
    }
}

#[test]
fn test_host_failures_propagate() {
    let mut chain = Chain::new(BrokenHost, 0);
    assert!(matches!(
        chain.mine_block(vec![]),
        Err(BridgeError::Json(_))
    ));
    match chain.get_assets_maps() {
        Err(BridgeError::Host(message)) => {
            assert_eq!(message, "api/v1/get_assets_maps unavailable")
        }
        other => panic!("unexpected result: {other:?}"),
    }
    assert_eq!(chain.block_height(), 1);
}

#[test]
fn test_host_operation_names() {
    assert_eq!(HostOperation::ALL.len(), 7);
    assert_eq!(
        HostOperation::lookup_by_name("api/v1/mine_empty_blocks"),
        Some(HostOperation::MineEmptyBlocks)
    );
    assert_eq!(
        HostOperation::NewSession.to_string(),
        "api/v1/new_session"
    );
}
