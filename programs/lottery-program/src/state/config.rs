use anchor_lang::prelude::*;

use crate::error::LotteryError;

// 8 discriminator + 5 * 32 pubkeys + 8 entry_price + 8 interval + 4 min_unique_accounts
// + 8 current_round_id + 8 current_round_started_at + 1 bump
pub const CONFIG_ACCOUNT_SIZE: usize = 8 + 5 * 32 + 8 + 8 + 4 + 8 + 8 + 1;

#[account]
#[derive(Debug)]
pub struct Config {
    pub operator: Pubkey,
    pub beneficiary: Pubkey,
    pub randomness_authority: Pubkey,
    pub conversion_program: Pubkey,
    pub conversion_deposit: Pubkey,
    pub entry_price: u64,
    pub interval: i64,
    pub min_unique_accounts: u32,
    /// Last round id written to storage; see `effective_round_id` for the live value
    pub current_round_id: u64,
    /// Start of the stored current round, 0 until its first entry
    pub current_round_started_at: i64,
    pub bump: u8,
}

impl Config {
    /// Round currently accepting entries.
    ///
    /// Once the stored round has started and its interval has elapsed it is closed to new
    /// entries, and the next id takes over without any write.
    pub fn effective_round_id(&self, now: i64) -> u64 {
        if self.current_round_started_at > 0
            && now.saturating_sub(self.current_round_started_at) >= self.interval
        {
            self.current_round_id.saturating_add(1)
        } else {
            self.current_round_id
        }
    }

    /// Persists the rollover computed by `effective_round_id` and returns the live id.
    pub fn roll_over(&mut self, now: i64) -> u64 {
        let effective = self.effective_round_id(now);
        if effective != self.current_round_id {
            self.current_round_id = effective;
            self.current_round_started_at = 0;
        }
        effective
    }

    pub fn mark_round_started(&mut self, round_id: u64, now: i64) {
        if round_id == self.current_round_id {
            self.current_round_started_at = now;
        }
    }

    /// Moves the stored round past `round_id` after it has been closed.
    pub fn advance_past(&mut self, round_id: u64) -> Result<()> {
        let next = round_id.checked_add(1).ok_or(LotteryError::Overflow)?;
        if next > self.current_round_id {
            self.current_round_id = next;
            self.current_round_started_at = 0;
        }
        Ok(())
    }

    pub fn entry_cost(&self, entries: u64) -> Result<u64> {
        Ok(entries
            .checked_mul(self.entry_price)
            .ok_or(LotteryError::Overflow)?)
    }
}

#[cfg(test)]
pub(crate) fn test_config(entry_price: u64, interval: i64, min_unique_accounts: u32) -> Config {
    Config {
        operator: Pubkey::new_unique(),
        beneficiary: Pubkey::new_unique(),
        randomness_authority: Pubkey::new_unique(),
        conversion_program: Pubkey::new_unique(),
        conversion_deposit: Pubkey::new_unique(),
        entry_price,
        interval,
        min_unique_accounts,
        current_round_id: crate::constants::FIRST_ROUND_ID,
        current_round_started_at: 0,
        bump: 255,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const START: i64 = 1_700_000_000;

    #[test]
    fn test_round_without_entries_never_rolls_over() {
        let config = test_config(1, 300, 6);
        assert_eq!(config.effective_round_id(START + 10_000), 1);
    }

    #[test]
    fn test_round_rolls_over_once_interval_elapsed() {
        let mut config = test_config(1, 300, 6);
        config.mark_round_started(1, START);

        assert_eq!(config.effective_round_id(START + 299), 1);
        assert_eq!(config.effective_round_id(START + 300), 2);

        assert_eq!(config.roll_over(START + 301), 2);
        assert_eq!(config.current_round_id, 2);
        assert_eq!(config.current_round_started_at, 0);
        // a fresh round stays current until somebody enters it
        assert_eq!(config.roll_over(START + 10_000), 2);
    }

    #[test]
    fn test_advance_past_never_moves_backwards() {
        let mut config = test_config(1, 300, 6);
        config.current_round_id = 4;
        config.current_round_started_at = START;

        config.advance_past(2).unwrap();
        assert_eq!(config.current_round_id, 4);
        assert_eq!(config.current_round_started_at, START);

        config.advance_past(4).unwrap();
        assert_eq!(config.current_round_id, 5);
        assert_eq!(config.current_round_started_at, 0);
    }

    #[test]
    fn test_entry_cost_is_checked() {
        let config = test_config(u64::MAX, 300, 6);
        assert_eq!(config.entry_cost(1).unwrap(), u64::MAX);
        crate::error::assert_lottery_error(config.entry_cost(2), LotteryError::Overflow);
    }
}
