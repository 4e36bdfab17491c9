use cosmwasm_std::{StdError, Timestamp, Uint128};
use thiserror::Error;

use crate::validate::ValidationErrors;

#[derive(Error, Debug)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("Unauthorized")]
    Unauthorized {},

    #[error("Invalid config: {reason}")]
    InvalidConfig { reason: String },

    #[error("Invalid lock request: {errors}")]
    InvalidRequest { errors: ValidationErrors },

    #[error("Please enter a valid wallet address")]
    InvalidAddress {},

    #[error("Send some coins to lock funds")]
    EmptyBalance {},

    #[error("Only {expected} is accepted")]
    WrongAsset { expected: String },

    #[error("Sent {received} but requested {expected}")]
    FundsMismatch { expected: Uint128, received: Uint128 },

    #[error("Lock nonce already in use")]
    AlreadyInUse {},

    #[error("Transfer {id} already claimed")]
    AlreadyClaimed { id: u64 },

    #[error("Transfer {id} is not claimable until {unlock_at}")]
    NotClaimable { id: u64, unlock_at: Timestamp },

    #[error("Cannot migrate from {previous}")]
    InvalidMigration { previous: String },
}
