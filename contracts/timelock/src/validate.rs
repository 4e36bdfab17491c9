use std::fmt;

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Api, Decimal, Uint128};
use thiserror::Error;

use crate::duration::parse_duration;
use crate::state::Config;

/// Wallet addresses shorter than this are rejected before chain validation.
pub const MIN_ADDRESS_LENGTH: usize = 32;

/// Fractional digits held by `cosmwasm_std::Decimal`.
pub const MAX_DECIMALS: u32 = 18;

#[cw_serde]
#[derive(Error)]
pub enum FieldError {
    #[error("Please enter a valid amount")]
    AmountInvalid {},

    #[error("Amount supports at most {decimals} decimal places")]
    AmountPrecision { decimals: u32 },

    #[error("Please specify a time period")]
    TimeMissing {},

    #[error("Unrecognized time period '{input}'")]
    TimeUnrecognized { input: String },

    #[error("Time period must be longer than zero")]
    TimeZero {},

    #[error("Time period exceeds the maximum of {max} seconds")]
    TimeTooLong { max: u64 },

    #[error("Please enter a valid wallet address")]
    RecipientInvalid {},
}

/// Per-field outcome of a lock request, `None` where the field is valid.
#[cw_serde]
#[derive(Default)]
pub struct ValidationErrors {
    pub amount: Option<FieldError>,
    pub time: Option<FieldError>,
    pub recipient: Option<FieldError>,
}

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.amount.is_none() && self.time.is_none() && self.recipient.is_none()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields = [
            ("amount", &self.amount),
            ("time", &self.time),
            ("recipient", &self.recipient),
        ];
        let mut first = true;
        for (name, error) in fields.iter() {
            if let Some(error) = error {
                if !first {
                    f.write_str(", ")?;
                }
                write!(f, "{}: {}", name, error)?;
                first = false;
            }
        }
        Ok(())
    }
}

/// Raw lock request as typed by the sender.
#[derive(Clone, Debug, PartialEq)]
pub struct LockRequest {
    pub amount: String,
    pub time: String,
    pub recipient: String,
}

/// A lock request that passed every field check.
#[derive(Clone, Debug, PartialEq)]
pub struct ValidLock {
    /// Base units of the configured asset
    pub amount: Uint128,
    /// Lock duration in seconds
    pub duration: u64,
    pub recipient: Addr,
}

/// Checks every field of `request` and reports all failures at once.
pub fn validate_lock(
    api: &dyn Api,
    config: &Config,
    request: &LockRequest,
) -> Result<ValidLock, ValidationErrors> {
    let amount = validate_amount(&request.amount, config.decimals);
    let duration = validate_time(&request.time, config.max_lock_time);
    let recipient = validate_address(api, &request.recipient);

    match (amount, duration, recipient) {
        (Ok(amount), Ok(duration), Ok(recipient)) => Ok(ValidLock {
            amount,
            duration,
            recipient,
        }),
        (amount, duration, recipient) => Err(ValidationErrors {
            amount: amount.err(),
            time: duration.err(),
            recipient: recipient.err(),
        }),
    }
}

/// Parses a display amount such as `1.5` into base units.
///
/// Only plain digits with an optional `.` fraction are accepted, no sign.
pub fn validate_amount(input: &str, decimals: u32) -> Result<Uint128, FieldError> {
    let input = input.trim();
    let (whole, fraction) = match input.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (input, None),
    };
    let is_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    if !is_digits(whole) || !fraction.map_or(true, is_digits) {
        return Err(FieldError::AmountInvalid {});
    }

    // trailing zeros carry no precision
    let fraction = fraction.unwrap_or("").trim_end_matches('0');
    if fraction.len() > decimals as usize {
        return Err(FieldError::AmountPrecision { decimals });
    }

    let normalized = if fraction.is_empty() {
        whole.to_string()
    } else {
        format!("{}.{}", whole, fraction)
    };
    let value: Decimal = normalized
        .parse()
        .map_err(|_| FieldError::AmountInvalid {})?;
    if value.is_zero() {
        return Err(FieldError::AmountInvalid {});
    }

    let scale = 10u128.pow(MAX_DECIMALS - decimals);
    Ok(Uint128::new(value.atomics().u128() / scale))
}

/// Parses a free-text time period and bounds it by `max_lock_time`.
pub fn validate_time(input: &str, max_lock_time: u64) -> Result<u64, FieldError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(FieldError::TimeMissing {});
    }

    let seconds = parse_duration(input).ok_or_else(|| FieldError::TimeUnrecognized {
        input: input.to_string(),
    })?;
    if seconds == 0 {
        return Err(FieldError::TimeZero {});
    }
    if seconds >= max_lock_time {
        return Err(FieldError::TimeTooLong { max: max_lock_time });
    }
    Ok(seconds)
}

pub fn validate_address(api: &dyn Api, input: &str) -> Result<Addr, FieldError> {
    if input.chars().count() < MIN_ADDRESS_LENGTH {
        return Err(FieldError::RecipientInvalid {});
    }
    api.addr_validate(input)
        .map_err(|_| FieldError::RecipientInvalid {})
}
