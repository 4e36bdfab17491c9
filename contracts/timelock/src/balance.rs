use cosmwasm_std::{
    to_binary, Addr, BankMsg, Coin, CosmosMsg, Decimal, StdError, StdResult, Uint128, WasmMsg,
};
use cw20::{Cw20ExecuteMsg, Denom};

use crate::error::ContractError;

pub fn asset_name(asset: &Denom) -> String {
    match asset {
        Denom::Native(denom) => format!("native:{}", denom),
        Denom::Cw20(address) => format!("cw20:{}", address),
    }
}

/// Total of the configured native coin attached to a message.
pub fn native_received(asset: &Denom, funds: &[Coin]) -> Result<Uint128, ContractError> {
    let denom = match asset {
        Denom::Native(denom) => denom,
        Denom::Cw20(_) => {
            return Err(ContractError::WrongAsset {
                expected: asset_name(asset),
            })
        }
    };

    let mut total = Uint128::zero();
    for coin in funds {
        if &coin.denom != denom {
            return Err(ContractError::WrongAsset {
                expected: asset_name(asset),
            });
        }
        total = total.checked_add(coin.amount).map_err(StdError::from)?;
    }

    if total.is_zero() {
        return Err(ContractError::EmptyBalance {});
    }
    Ok(total)
}

/// Amount received through a cw20 `Send`, where `token` is the calling contract.
pub fn cw20_received(
    asset: &Denom,
    token: &Addr,
    amount: Uint128,
) -> Result<Uint128, ContractError> {
    match asset {
        Denom::Cw20(address) if address == token => {}
        _ => {
            return Err(ContractError::WrongAsset {
                expected: asset_name(asset),
            })
        }
    }

    if amount.is_zero() {
        return Err(ContractError::EmptyBalance {});
    }
    Ok(amount)
}

pub fn send_tokens(to: &Addr, asset: &Denom, amount: Uint128) -> StdResult<CosmosMsg> {
    let msg = match asset {
        Denom::Native(denom) => BankMsg::Send {
            to_address: to.into(),
            amount: vec![Coin {
                denom: denom.to_owned(),
                amount,
            }],
        }
        .into(),
        Denom::Cw20(address) => {
            let transfer = Cw20ExecuteMsg::Transfer {
                recipient: to.into(),
                amount,
            };
            WasmMsg::Execute {
                contract_addr: address.to_string(),
                msg: to_binary(&transfer)?,
                funds: vec![],
            }
            .into()
        }
    };
    Ok(msg)
}

/// Display form of a base unit amount, `1500000` with 6 decimals is `1.5`.
pub fn format_amount(amount: Uint128, decimals: u32) -> String {
    match Decimal::from_atomics(amount, decimals) {
        Ok(value) => value.to_string(),
        Err(_) => amount.to_string(),
    }
}
