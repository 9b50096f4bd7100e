use anchor_lang::prelude::*;

use crate::{error::LotteryError, utils::fold_entropy};

// 8 discriminator + 32 value + 8 published_at + 1 consumed + 1 bump
pub const RANDOMNESS_FEED_ACCOUNT_SIZE: usize = 8 + 32 + 8 + 1 + 1;

/// Single-use randomness written by the randomness authority
#[account]
#[derive(Debug)]
pub struct RandomnessFeed {
    pub value: [u8; 32],
    pub published_at: i64,
    pub consumed: bool,
    pub bump: u8,
}

impl RandomnessFeed {
    /// Writes a fresh value, replacing any unconsumed one.
    pub fn publish(&mut self, value: [u8; 32], now: i64) {
        self.value = value;
        self.published_at = now;
        self.consumed = false;
    }

    /// Consumes the published value if it was written at or after `not_before`.
    pub fn consume(&mut self, not_before: i64) -> Result<u64> {
        require!(
            !self.consumed && self.published_at >= not_before,
            LotteryError::RandomnessUnavailable
        );
        self.consumed = true;
        Ok(fold_entropy(&self.value, self.published_at as u64))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::assert_lottery_error;

    fn empty_feed() -> RandomnessFeed {
        RandomnessFeed {
            value: [0; 32],
            published_at: 0,
            consumed: true,
            bump: 255,
        }
    }

    #[test]
    fn test_value_is_single_use() {
        let mut feed = empty_feed();
        assert_lottery_error(feed.consume(0), LotteryError::RandomnessUnavailable);

        feed.publish([7; 32], 1_000);
        let first = feed.consume(1_000).unwrap();
        assert_eq!(first, fold_entropy(&[7; 32], 1_000));
        assert_lottery_error(feed.consume(1_000), LotteryError::RandomnessUnavailable);
    }

    #[test]
    fn test_stale_value_is_rejected() {
        let mut feed = empty_feed();
        feed.publish([1; 32], 999);

        assert_lottery_error(feed.consume(1_000), LotteryError::RandomnessUnavailable);
        assert!(!feed.consumed);
    }

    #[test]
    fn test_early_value_is_replaced() {
        let mut feed = empty_feed();
        feed.publish([1; 32], 10);
        assert_lottery_error(feed.consume(300), LotteryError::RandomnessUnavailable);

        feed.publish([2; 32], 400);
        assert_eq!(feed.value, [2; 32]);
        assert_eq!(feed.consume(300).unwrap(), fold_entropy(&[2; 32], 400));
    }
}
