use anchor_lang::prelude::*;

use crate::{
    constants::{MAX_ENTRIES_PER_CALL, MAX_ENTRY_RUNS, MIN_ENTRIES_PER_CALL},
    error::LotteryError,
    state::Config,
};

// 32 owner + 8 first_slot + 4 count
pub const ENTRY_RUN_SIZE: usize = 32 + 8 + 4;

// Space calculation, before any entry run:
// 8 (discriminator) +
// 8 (round_id) +
// 8 (start_timestamp) +
// 8 (total_entries) +
// 8 (total_collected) +
// 4 (unique_account_count) +
// 1 (closed) +
// 1 (refunded) +
// 33 (winner: Option<Pubkey>) +
// 9 (winning_slot: Option<u64>) +
// 1 (bump) +
// 4 (entry_runs length)
pub const ROUND_BASE_SIZE: usize = 8 + 8 + 8 + 8 + 8 + 4 + 1 + 1 + 33 + 9 + 1 + 4;

/// A purchase: `count` consecutive slots starting at `first_slot`, all owned by `owner`
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct EntryRun {
    pub owner: Pubkey,
    pub first_slot: u64,
    pub count: u32,
}

#[account]
#[derive(Debug, Default)]
pub struct Round {
    pub round_id: u64,
    pub start_timestamp: i64,
    pub total_entries: u64,
    pub total_collected: u64,
    pub unique_account_count: u32,
    pub closed: bool,
    pub refunded: bool,
    pub winner: Option<Pubkey>,
    pub winning_slot: Option<u64>,
    pub bump: u8,
    pub entry_runs: Vec<EntryRun>,
}

/// Outcome of a successful purchase
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryReceipt {
    pub first_slot: u64,
    pub amount: u64,
    /// True when this purchase was the round's first entry
    pub activated: bool,
}

/// Validates a purchase of `entries` units against the attached `value`.
/// Returns the exact cost.
pub fn check_purchase(entries: u64, entry_price: u64, value: u64) -> Result<u64> {
    require!(
        (MIN_ENTRIES_PER_CALL..=MAX_ENTRIES_PER_CALL).contains(&entries),
        LotteryError::InvalidAmount
    );
    let cost = entries
        .checked_mul(entry_price)
        .ok_or(LotteryError::Overflow)?;
    require!(value == cost, LotteryError::InsufficientValue);
    Ok(cost)
}

impl Round {
    /// Account size holding `runs` entry runs
    pub const fn space_for(runs: usize) -> usize {
        ROUND_BASE_SIZE + runs * ENTRY_RUN_SIZE
    }

    /// Account size once `buyer` has purchased. Each purchase that opens a new run grows the
    /// account by one run, paid for by that buyer.
    pub fn space_after_purchase(&self, buyer: &Pubkey) -> usize {
        match self.entry_runs.last() {
            Some(last) if last.owner == *buyer => Self::space_for(self.entry_runs.len()),
            _ => Self::space_for(self.entry_runs.len() + 1),
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.round_id != 0
    }

    pub fn open(&mut self, round_id: u64, bump: u8) {
        self.round_id = round_id;
        self.bump = bump;
    }

    pub fn has_started(&self) -> bool {
        self.start_timestamp > 0
    }

    /// Earliest time the round can be evaluated for closure or refund
    pub fn ends_at(&self, interval: i64) -> Option<i64> {
        if !self.has_started() {
            return None;
        }
        self.start_timestamp.checked_add(interval)
    }

    pub fn has_expired(&self, interval: i64, now: i64) -> bool {
        self.ends_at(interval).is_some_and(|end| now >= end)
    }

    pub fn is_valid(&self, min_unique_accounts: u32) -> bool {
        self.unique_account_count >= min_unique_accounts
    }

    pub fn entries_of(&self, owner: &Pubkey) -> u64 {
        self.entry_runs
            .iter()
            .filter(|run| run.owner == *owner)
            .map(|run| u64::from(run.count))
            .sum()
    }

    pub fn owner_of_slot(&self, slot: u64) -> Option<Pubkey> {
        if slot >= self.total_entries {
            return None;
        }
        let idx = self.entry_runs.partition_point(|run| run.first_slot <= slot);
        self.entry_runs.get(idx.checked_sub(1)?).map(|run| run.owner)
    }

    /// Appends `entries` slots owned by `buyer`.
    pub fn record_entries(
        &mut self,
        buyer: Pubkey,
        entries: u64,
        entry_price: u64,
        value: u64,
        now: i64,
    ) -> Result<EntryReceipt> {
        let amount = check_purchase(entries, entry_price, value)?;
        require!(!self.closed && !self.refunded, LotteryError::RoundNotOpen);

        let count = u32::try_from(entries).map_err(|_| LotteryError::Overflow)?;
        let first_slot = self.total_entries;
        let total_entries = self
            .total_entries
            .checked_add(entries)
            .ok_or(LotteryError::Overflow)?;
        let total_collected = self
            .total_collected
            .checked_add(amount)
            .ok_or(LotteryError::Overflow)?;
        let is_new_account = !self.entry_runs.iter().any(|run| run.owner == buyer);

        match self.entry_runs.last_mut() {
            Some(last) if last.owner == buyer => {
                last.count = last.count.checked_add(count).ok_or(LotteryError::Overflow)?;
            }
            _ => {
                require!(self.entry_runs.len() < MAX_ENTRY_RUNS, LotteryError::RoundFull);
                self.entry_runs.push(EntryRun {
                    owner: buyer,
                    first_slot,
                    count,
                });
            }
        }

        self.total_entries = total_entries;
        self.total_collected = total_collected;
        if is_new_account {
            self.unique_account_count = self
                .unique_account_count
                .checked_add(1)
                .ok_or(LotteryError::Overflow)?;
        }

        let activated = !self.has_started();
        if activated {
            self.start_timestamp = now;
        }

        Ok(EntryReceipt {
            first_slot,
            amount,
            activated,
        })
    }

    pub fn ensure_refundable(&self, config: &Config, now: i64) -> Result<()> {
        require!(
            self.has_expired(config.interval, now)
                && !self.is_valid(config.min_unique_accounts)
                && !self.refunded
                && !self.closed,
            LotteryError::CannotRefund
        );
        Ok(())
    }

    /// Marks the round refunded and returns what `account` deposited into it.
    pub fn refund(&mut self, account: &Pubkey, config: &Config, now: i64) -> Result<u64> {
        self.ensure_refundable(config, now)?;

        let entries = self.entries_of(account);
        require!(entries > 0, LotteryError::CannotRefund);
        let amount = config.entry_cost(entries)?;

        self.refunded = true;
        Ok(amount)
    }

    pub fn ensure_drawable(&self, config: &Config, now: i64) -> Result<()> {
        require!(
            self.round_id != config.effective_round_id(now)
                && self.has_expired(config.interval, now)
                && self.is_valid(config.min_unique_accounts)
                && !self.closed
                && !self.refunded,
            LotteryError::CannotSelectWinner
        );
        Ok(())
    }

    pub fn close(&mut self, winner: Pubkey, winning_slot: u64) {
        self.closed = true;
        self.winner = Some(winner);
        self.winning_slot = Some(winning_slot);
    }
}
