#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cosmwasm_std::{
    from_binary, to_binary, Addr, Api, Binary, Deps, DepsMut, Env, MessageInfo, Order, Response,
    StdError, StdResult, Timestamp, Uint128,
};
use cw2::{get_contract_version, set_contract_version};
use cw20::{Balance, Cw20CoinVerified, Cw20ReceiveMsg, Denom};
use cw_storage_plus::Bound;

use crate::balance::{asset_name, cw20_received, format_amount, native_received, send_tokens};
use crate::error::ContractError;
use crate::msg::{
    AccountSummary, AccountsResponse, AssetMsg, ConfigResponse, ExecuteMsg, InstantiateMsg,
    LockView, LocksResponse, MigrateMsg, QueryMsg, ReceiveMsg, TransferInfo, TransferView,
    TransfersResponse, ValidationResponse,
};
use crate::state::{next_transfer_id, transfers, Config, Transfer, CONFIG, NONCES};
use crate::status::{countdown, TransferStatus};
use crate::validate::{validate_address, validate_lock, LockRequest, MAX_DECIMALS};

// version info for migration info
const CONTRACT_NAME: &str = "crates.io:cw-disper-timelock";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

const DEFAULT_LIMIT: u32 = 10;
const MAX_LIMIT: u32 = 30;
const NANOS_PER_SECOND: u64 = 1_000_000_000;

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    if msg.decimals > MAX_DECIMALS {
        return Err(ContractError::InvalidConfig {
            reason: format!("decimals must be at most {}", MAX_DECIMALS),
        });
    }
    if msg.max_lock_time == 0 {
        return Err(ContractError::InvalidConfig {
            reason: "max_lock_time must be greater than zero".to_string(),
        });
    }

    let asset = match msg.asset {
        AssetMsg::Native { denom } => {
            if denom.is_empty() {
                return Err(ContractError::InvalidConfig {
                    reason: "native denom is empty".to_string(),
                });
            }
            Denom::Native(denom)
        }
        AssetMsg::Cw20 { address } => Denom::Cw20(deps.api.addr_validate(&address)?),
    };

    let config = Config {
        owner: info.sender,
        asset,
        decimals: msg.decimals,
        max_lock_time: msg.max_lock_time,
    };
    CONFIG.save(deps.storage, &config)?;

    let res = Response::new()
        .add_attribute("action", "instantiate")
        .add_attribute("owner", &config.owner)
        .add_attribute("asset", asset_name(&config.asset));
    Ok(res)
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::Lock {
            amount,
            time,
            recipient,
            nonce,
        } => {
            let request = LockRequest {
                amount,
                time,
                recipient,
            };
            try_lock(
                deps,
                env,
                Balance::from(info.funds),
                &info.sender,
                request,
                nonce,
            )
        }
        ExecuteMsg::Claim { id } => try_claim(deps, env, info, id),
        ExecuteMsg::Receive(msg) => try_receive(deps, env, info, msg),
    }
}

pub fn try_lock(
    deps: DepsMut,
    env: Env,
    balance: Balance,
    sender: &Addr,
    request: LockRequest,
    nonce: Option<String>,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let lock = validate_lock(deps.api, &config, &request)
        .map_err(|errors| ContractError::InvalidRequest { errors })?;

    let received = match balance {
        Balance::Native(funds) => native_received(&config.asset, &funds.0)?,
        Balance::Cw20(token) => cw20_received(&config.asset, &token.address, token.amount)?,
    };
    if received != lock.amount {
        return Err(ContractError::FundsMismatch {
            expected: lock.amount,
            received,
        });
    }

    if let Some(nonce) = &nonce {
        if NONCES.has(deps.storage, (sender, nonce.as_str())) {
            return Err(ContractError::AlreadyInUse {});
        }
    }

    let now = env.block.time;
    let unlock_at = unlock_time(now, lock.duration)?;
    let id = next_transfer_id(deps.storage)?;
    if let Some(nonce) = &nonce {
        NONCES.save(deps.storage, (sender, nonce.as_str()), &id)?;
    }

    let transfer = Transfer {
        id,
        sender: sender.clone(),
        recipient: lock.recipient,
        amount: lock.amount,
        created_at: now,
        unlock_at,
        claimed_at: None,
    };
    transfers().save(deps.storage, id, &transfer)?;

    let res = Response::new()
        .add_attribute("action", "lock")
        .add_attribute("id", id.to_string())
        .add_attribute("sender", sender)
        .add_attribute("recipient", &transfer.recipient)
        .add_attribute("amount", transfer.amount)
        .add_attribute("unlock_at", unlock_at.seconds().to_string());
    Ok(res)
}

pub fn try_claim(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    id: u64,
) -> Result<Response, ContractError> {
    let mut transfer = transfers().load(deps.storage, id)?;

    if transfer.recipient != info.sender {
        return Err(ContractError::Unauthorized {});
    }
    if transfer.is_claimed() {
        return Err(ContractError::AlreadyClaimed { id });
    }
    let now = env.block.time;
    if !transfer.is_unlocked_at(now) {
        return Err(ContractError::NotClaimable {
            id,
            unlock_at: transfer.unlock_at,
        });
    }

    // mark claimed in the same transaction as the payout
    transfer.claimed_at = Some(now);
    transfers().save(deps.storage, id, &transfer)?;

    let config = CONFIG.load(deps.storage)?;
    let payout = send_tokens(&transfer.recipient, &config.asset, transfer.amount)?;

    let res = Response::new()
        .add_attribute("action", "claim")
        .add_attribute("id", id.to_string())
        .add_attribute("recipient", &transfer.recipient)
        .add_attribute("amount", transfer.amount)
        .add_message(payout);
    Ok(res)
}

pub fn try_receive(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    wrapper: Cw20ReceiveMsg,
) -> Result<Response, ContractError> {
    let msg: ReceiveMsg = from_binary(&wrapper.msg)?;
    let balance = Balance::Cw20(Cw20CoinVerified {
        address: info.sender,
        amount: wrapper.amount,
    });
    let api = deps.api;
    let sender = &api.addr_validate(&wrapper.sender)?;
    match msg {
        ReceiveMsg::Lock {
            amount,
            time,
            recipient,
            nonce,
        } => {
            let request = LockRequest {
                amount,
                time,
                recipient,
            };
            try_lock(deps, env, balance, sender, request, nonce)
        }
    }
}

fn unlock_time(now: Timestamp, duration: u64) -> StdResult<Timestamp> {
    let max_duration = (u64::MAX - now.nanos()) / NANOS_PER_SECOND;
    if duration > max_duration {
        return Err(StdError::generic_err("Unlock time overflow"));
    }
    Ok(now.plus_seconds(duration))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn migrate(deps: DepsMut, _env: Env, _msg: MigrateMsg) -> Result<Response, ContractError> {
    let previous = get_contract_version(deps.storage)?;
    if previous.contract != CONTRACT_NAME {
        return Err(ContractError::InvalidMigration {
            previous: previous.contract,
        });
    }
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    let res = Response::new()
        .add_attribute("action", "migrate")
        .add_attribute("from_version", previous.version)
        .add_attribute("to_version", CONTRACT_VERSION);
    Ok(res)
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, env: Env, msg: QueryMsg) -> Result<Binary, ContractError> {
    let res = match msg {
        QueryMsg::Config {} => to_binary(&query_config(deps)?),
        QueryMsg::ValidateLock {
            amount,
            time,
            recipient,
        } => {
            let request = LockRequest {
                amount,
                time,
                recipient,
            };
            to_binary(&query_validate(deps, request)?)
        }
        QueryMsg::Transfer { id } => to_binary(&query_transfer(deps, env, id)?),
        QueryMsg::Locks {
            owner,
            start_after,
            limit,
        } => to_binary(&query_locks(deps, env, owner, start_after, limit)?),
        QueryMsg::Transfers {
            recipient,
            start_after,
            limit,
        } => to_binary(&query_transfers(deps, env, recipient, start_after, limit)?),
        QueryMsg::Accounts { address } => to_binary(&query_accounts(deps, env, address)?),
    };
    Ok(res?)
}

fn query_config(deps: Deps) -> StdResult<ConfigResponse> {
    let config = CONFIG.load(deps.storage)?;
    Ok(ConfigResponse {
        owner: config.owner,
        asset: config.asset,
        decimals: config.decimals,
        max_lock_time: config.max_lock_time,
    })
}

fn query_validate(deps: Deps, request: LockRequest) -> StdResult<ValidationResponse> {
    let config = CONFIG.load(deps.storage)?;
    let errors = validate_lock(deps.api, &config, &request)
        .err()
        .unwrap_or_default();

    Ok(ValidationResponse {
        valid: errors.is_empty(),
        errors,
    })
}

fn query_transfer(deps: Deps, env: Env, id: u64) -> StdResult<TransferInfo> {
    let transfer = transfers().load(deps.storage, id)?;
    let now = env.block.time;

    Ok(TransferInfo {
        lock_status: transfer.lock_status(now),
        transfer_status: transfer.transfer_status(now),
        id: transfer.id,
        sender: transfer.sender,
        recipient: transfer.recipient,
        amount: transfer.amount,
        created_at: transfer.created_at,
        unlock_at: transfer.unlock_at,
        claimed_at: transfer.claimed_at,
    })
}

fn query_locks(
    deps: Deps,
    env: Env,
    owner: String,
    start_after: Option<u64>,
    limit: Option<u32>,
) -> Result<LocksResponse, ContractError> {
    let owner = lookup_address(deps.api, &owner)?;
    let config = CONFIG.load(deps.storage)?;
    let limit = limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT) as usize;
    let start = start_after.map(Bound::exclusive);

    let locks: StdResult<Vec<_>> = transfers()
        .idx
        .sender
        .prefix(owner)
        .range(deps.storage, start, None, Order::Ascending)
        .take(limit)
        .map(|item| item.map(|(_, t)| to_lock_view(&t, env.block.time, config.decimals)))
        .collect();

    Ok(LocksResponse { locks: locks? })
}

fn query_transfers(
    deps: Deps,
    env: Env,
    recipient: String,
    start_after: Option<u64>,
    limit: Option<u32>,
) -> Result<TransfersResponse, ContractError> {
    let recipient = lookup_address(deps.api, &recipient)?;
    let config = CONFIG.load(deps.storage)?;
    let limit = limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT) as usize;
    let start = start_after.map(Bound::exclusive);

    let items: StdResult<Vec<_>> = transfers()
        .idx
        .recipient
        .prefix(recipient)
        .range(deps.storage, start, None, Order::Ascending)
        .take(limit)
        .map(|item| item.map(|(_, t)| to_transfer_view(&t, env.block.time, config.decimals)))
        .collect();

    Ok(TransfersResponse { transfers: items? })
}

fn query_accounts(
    deps: Deps,
    env: Env,
    address: String,
) -> Result<AccountsResponse, ContractError> {
    let address = lookup_address(deps.api, &address)?;
    let config = CONFIG.load(deps.storage)?;
    let now = env.block.time;

    let owned: Vec<Transfer> = transfers()
        .idx
        .sender
        .prefix(address.clone())
        .range(deps.storage, None, None, Order::Ascending)
        .map(|item| item.map(|(_, t)| t))
        .collect::<StdResult<_>>()?;
    let incoming: Vec<Transfer> = transfers()
        .idx
        .recipient
        .prefix(address)
        .range(deps.storage, None, None, Order::Ascending)
        .map(|item| item.map(|(_, t)| t))
        .collect::<StdResult<_>>()?;

    let summary = AccountSummary {
        total_locked: sum_amounts(&owned)?,
        total_incoming: sum_amounts(&incoming)?,
        claimable_count: incoming
            .iter()
            .filter(|t| t.transfer_status(now) == TransferStatus::Claimable)
            .count() as u32,
    };

    Ok(AccountsResponse {
        locks: owned
            .iter()
            .map(|t| to_lock_view(t, now, config.decimals))
            .collect(),
        transfers: incoming
            .iter()
            .map(|t| to_transfer_view(t, now, config.decimals))
            .collect(),
        summary,
    })
}

fn lookup_address(api: &dyn Api, address: &str) -> Result<Addr, ContractError> {
    validate_address(api, address).map_err(|_| ContractError::InvalidAddress {})
}

fn sum_amounts(transfers: &[Transfer]) -> StdResult<Uint128> {
    transfers.iter().try_fold(Uint128::zero(), |total, t| {
        total.checked_add(t.amount).map_err(StdError::from)
    })
}

fn to_lock_view(transfer: &Transfer, now: Timestamp, decimals: u32) -> LockView {
    LockView {
        id: transfer.id,
        amount: transfer.amount,
        display_amount: format_amount(transfer.amount, decimals),
        recipient: transfer.recipient.clone(),
        unlock_at: transfer.unlock_at,
        status: transfer.lock_status(now),
        created_at: transfer.created_at,
        remaining_seconds: transfer.remaining_seconds(now),
        countdown: countdown(now, transfer.unlock_at),
    }
}

fn to_transfer_view(transfer: &Transfer, now: Timestamp, decimals: u32) -> TransferView {
    TransferView {
        id: transfer.id,
        amount: transfer.amount,
        display_amount: format_amount(transfer.amount, decimals),
        sender: transfer.sender.clone(),
        unlock_at: transfer.unlock_at,
        status: transfer.transfer_status(now),
        created_at: transfer.created_at,
        remaining_seconds: transfer.remaining_seconds(now),
        countdown: countdown(now, transfer.unlock_at),
    }
}
