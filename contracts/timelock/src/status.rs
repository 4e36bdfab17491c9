use cosmwasm_schema::cw_serde;
use cosmwasm_std::Timestamp;

use crate::duration::{DAY, HOUR};
use crate::state::Transfer;

/// Status of a transfer as seen by its sender.
#[cw_serde]
#[derive(Copy, Eq)]
pub enum LockStatus {
    /// Funds are locked until `unlock_at`
    Active,
    /// The recipient claimed the funds
    Unlocked,
    /// `unlock_at` has passed and the funds are still unclaimed
    Expired,
}

/// Status of a transfer as seen by its recipient.
#[cw_serde]
#[derive(Copy, Eq)]
pub enum TransferStatus {
    Pending,
    Claimable,
    Claimed,
}

impl Transfer {
    pub fn is_claimed(&self) -> bool {
        self.claimed_at.is_some()
    }

    /// The unlock boundary is inclusive: at `unlock_at` the funds are free.
    pub fn is_unlocked_at(&self, now: Timestamp) -> bool {
        now >= self.unlock_at
    }

    pub fn lock_status(&self, now: Timestamp) -> LockStatus {
        if self.is_claimed() {
            LockStatus::Unlocked
        } else if self.is_unlocked_at(now) {
            LockStatus::Expired
        } else {
            LockStatus::Active
        }
    }

    pub fn transfer_status(&self, now: Timestamp) -> TransferStatus {
        if self.is_claimed() {
            TransferStatus::Claimed
        } else if self.is_unlocked_at(now) {
            TransferStatus::Claimable
        } else {
            TransferStatus::Pending
        }
    }

    pub fn remaining_seconds(&self, now: Timestamp) -> u64 {
        self.unlock_at.seconds().saturating_sub(now.seconds())
    }
}

/// Human readable time left until `unlock_at`, e.g. `3d 4h remaining`.
pub fn countdown(now: Timestamp, unlock_at: Timestamp) -> String {
    let remaining = unlock_at.seconds().saturating_sub(now.seconds());
    if now >= unlock_at {
        return "Expired".to_string();
    }

    let days = remaining / DAY;
    let hours = (remaining % DAY) / HOUR;
    if days > 0 {
        format!("{}d {}h remaining", days, hours)
    } else {
        format!("{}h remaining", hours)
    }
}
