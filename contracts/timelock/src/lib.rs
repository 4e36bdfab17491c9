pub mod balance;
pub mod contract;
pub mod duration;
mod error;
pub mod msg;
pub mod state;
pub mod status;
pub mod validate;

pub use crate::error::ContractError;
