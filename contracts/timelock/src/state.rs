use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use cosmwasm_std::{Addr, StdResult, Storage, Timestamp, Uint128};
use cw20::Denom;
use cw_storage_plus::{Index, IndexList, IndexedMap, Item, Map, MultiIndex};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
pub struct Config {
    pub owner: Addr,
    /// Asset accepted by locks and paid out on claim
    pub asset: Denom,
    /// Decimal places between a display amount and base units
    pub decimals: u32,
    /// Max lock time in seconds
    pub max_lock_time: u64,
}

/// A time-locked transfer. The sender sees it as a lock, the recipient as an
/// incoming transfer. Status is derived from the timestamps, see `status`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
pub struct Transfer {
    pub id: u64,
    pub sender: Addr,
    pub recipient: Addr,
    pub amount: Uint128,
    pub created_at: Timestamp,
    pub unlock_at: Timestamp,
    pub claimed_at: Option<Timestamp>,
}

pub struct TransferIndexes<'a> {
    pub sender: MultiIndex<'a, Addr, Transfer, u64>,
    pub recipient: MultiIndex<'a, Addr, Transfer, u64>,
}

impl<'a> IndexList<Transfer> for TransferIndexes<'a> {
    fn get_indexes(&'_ self) -> Box<dyn Iterator<Item = &'_ dyn Index<Transfer>> + '_> {
        let v: Vec<&dyn Index<Transfer>> = vec![&self.sender, &self.recipient];
        Box::new(v.into_iter())
    }
}

pub fn transfers<'a>() -> IndexedMap<'a, u64, Transfer, TransferIndexes<'a>> {
    let indexes = TransferIndexes {
        sender: MultiIndex::new(|_pk, t| t.sender.clone(), "transfers", "transfers__sender"),
        recipient: MultiIndex::new(
            |_pk, t| t.recipient.clone(),
            "transfers",
            "transfers__recipient",
        ),
    };
    IndexedMap::new("transfers", indexes)
}

pub const CONFIG: Item<Config> = Item::new("config");
pub const TRANSFER_SEQ: Item<u64> = Item::new("transfer_seq");
/// (sender, nonce) -> transfer id, rejects resubmitted locks
pub const NONCES: Map<(&Addr, &str), u64> = Map::new("nonces");

pub fn next_transfer_id(store: &mut dyn Storage) -> StdResult<u64> {
    let id = TRANSFER_SEQ.may_load(store)?.unwrap_or_default() + 1;
    TRANSFER_SEQ.save(store, &id)?;
    Ok(id)
}
