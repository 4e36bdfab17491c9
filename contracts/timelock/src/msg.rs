use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Timestamp, Uint128};
use cw20::{Cw20ReceiveMsg, Denom};

use crate::status::{LockStatus, TransferStatus};
use crate::validate::ValidationErrors;

#[cw_serde]
pub enum AssetMsg {
    Native { denom: String },
    Cw20 { address: String },
}

#[cw_serde]
pub struct InstantiateMsg {
    /// Asset locked and paid out by this contract
    pub asset: AssetMsg,
    /// Decimal places of the asset, used to parse display amounts
    pub decimals: u32,
    /// Max lock time in seconds
    pub max_lock_time: u64,
}

#[cw_serde]
pub enum ExecuteMsg {
    /// Lock the attached funds for `recipient` during the `time` period.
    /// `amount` is the display amount and must match the funds sent.
    Lock {
        amount: String,
        time: String,
        recipient: String,
        nonce: Option<String>,
    },
    /// Recipient takes the funds once the unlock time has passed
    Claim { id: u64 },
    /// This accepts a properly-encoded ReceiveMsg from a cw20 contract
    Receive(Cw20ReceiveMsg),
}

#[cw_serde]
pub enum ReceiveMsg {
    Lock {
        amount: String,
        time: String,
        recipient: String,
        nonce: Option<String>,
    },
}

#[cw_serde]
pub struct MigrateMsg {}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(ConfigResponse)]
    Config {},
    /// Dry run of a lock request, reporting every invalid field
    #[returns(ValidationResponse)]
    ValidateLock {
        amount: String,
        time: String,
        recipient: String,
    },
    #[returns(TransferInfo)]
    Transfer { id: u64 },
    /// Locks created by `owner`
    #[returns(LocksResponse)]
    Locks {
        owner: String,
        start_after: Option<u64>,
        limit: Option<u32>,
    },
    /// Transfers addressed to `recipient`
    #[returns(TransfersResponse)]
    Transfers {
        recipient: String,
        start_after: Option<u64>,
        limit: Option<u32>,
    },
    /// Both sides of an address plus totals
    #[returns(AccountsResponse)]
    Accounts { address: String },
}

#[cw_serde]
pub struct ConfigResponse {
    pub owner: Addr,
    pub asset: Denom,
    pub decimals: u32,
    pub max_lock_time: u64,
}

#[cw_serde]
pub struct ValidationResponse {
    pub valid: bool,
    pub errors: ValidationErrors,
}

#[cw_serde]
pub struct TransferInfo {
    pub id: u64,
    pub sender: Addr,
    pub recipient: Addr,
    pub amount: Uint128,
    pub created_at: Timestamp,
    pub unlock_at: Timestamp,
    pub claimed_at: Option<Timestamp>,
    pub lock_status: LockStatus,
    pub transfer_status: TransferStatus,
}

/// Sender side of a transfer
#[cw_serde]
pub struct LockView {
    pub id: u64,
    pub amount: Uint128,
    pub display_amount: String,
    pub recipient: Addr,
    pub unlock_at: Timestamp,
    pub status: LockStatus,
    pub created_at: Timestamp,
    pub remaining_seconds: u64,
    pub countdown: String,
}

/// Recipient side of a transfer
#[cw_serde]
pub struct TransferView {
    pub id: u64,
    pub amount: Uint128,
    pub display_amount: String,
    pub sender: Addr,
    pub unlock_at: Timestamp,
    pub status: TransferStatus,
    pub created_at: Timestamp,
    pub remaining_seconds: u64,
    pub countdown: String,
}

#[cw_serde]
pub struct LocksResponse {
    pub locks: Vec<LockView>,
}

#[cw_serde]
pub struct TransfersResponse {
    pub transfers: Vec<TransferView>,
}

#[cw_serde]
pub struct AccountSummary {
    pub total_locked: Uint128,
    pub total_incoming: Uint128,
    pub claimable_count: u32,
}

#[cw_serde]
pub struct AccountsResponse {
    pub locks: Vec<LockView>,
    pub transfers: Vec<TransferView>,
    pub summary: AccountSummary,
}
