use anchor_lang::prelude::*;

use crate::error::LotteryError;

// 8 discriminator + 8 fee_pool + 1 bump
pub const LEDGER_ACCOUNT_SIZE: usize = 8 + 8 + 1;

/// Program-wide fee pool. Per-account balances live in `Credit` PDAs.
#[account]
#[derive(Debug, Default)]
pub struct Ledger {
    /// Accumulated fee shares, owned by the program rather than any account
    pub fee_pool: u64,
    pub bump: u8,
}

impl Ledger {
    pub fn accrue_fees(&mut self, amount: u64) -> Result<()> {
        self.fee_pool = self
            .fee_pool
            .checked_add(amount)
            .ok_or(LotteryError::Overflow)?;
        Ok(())
    }

    /// Zeroes the fee pool and returns what it held.
    pub fn take_fee_pool(&mut self) -> u64 {
        std::mem::take(&mut self.fee_pool)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::assert_lottery_error;

    #[test]
    fn test_fee_pool_rotation() {
        let mut ledger = Ledger::default();
        ledger.accrue_fees(14).unwrap();
        ledger.accrue_fees(1).unwrap();

        assert_eq!(ledger.take_fee_pool(), 15);
        assert_eq!(ledger.fee_pool, 0);
        assert_eq!(ledger.take_fee_pool(), 0);
    }

    #[test]
    fn test_fee_pool_is_checked() {
        let mut ledger = Ledger {
            fee_pool: u64::MAX,
            bump: 255,
        };
        assert_lottery_error(ledger.accrue_fees(1), LotteryError::Overflow);
    }
}
