use anchor_lang::prelude::*;

use crate::error::LotteryError;

// 8 discriminator + 32 owner + 8 amount + 32 rent_payer
pub const CREDIT_ACCOUNT_SIZE: usize = 8 + 32 + 8 + 32;

/// Withdrawable balance of one account, PDA `["credit", owner]`.
///
/// Created on the owner's first winning share and closed back to `rent_payer` when withdrawn.
#[account]
#[derive(Debug, Default)]
pub struct Credit {
    pub owner: Pubkey,
    pub amount: u64,
    /// Account that paid this PDA's rent and gets it back on withdrawal
    pub rent_payer: Pubkey,
}

impl Credit {
    pub fn is_open(&self) -> bool {
        self.owner != Pubkey::default()
    }

    /// Claims a freshly created account for `owner`; an open account keeps its payer.
    pub fn open(&mut self, owner: Pubkey, rent_payer: Pubkey) -> Result<()> {
        if self.is_open() {
            require_keys_eq!(self.owner, owner, LotteryError::WinnerMismatch);
            return Ok(());
        }
        self.owner = owner;
        self.rent_payer = rent_payer;
        Ok(())
    }

    pub fn add(&mut self, amount: u64) -> Result<()> {
        self.amount = self
            .amount
            .checked_add(amount)
            .ok_or(LotteryError::Overflow)?;
        Ok(())
    }

    /// Removes and returns the whole balance.
    pub fn take(&mut self) -> Result<u64> {
        require!(self.amount > 0, LotteryError::NothingToWithdraw);
        Ok(std::mem::take(&mut self.amount))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::assert_lottery_error;

    #[test]
    fn test_open_keeps_first_payer() {
        let owner = Pubkey::new_unique();
        let first_payer = Pubkey::new_unique();
        let mut credit = Credit::default();

        credit.open(owner, first_payer).unwrap();
        credit.add(5).unwrap();
        credit.open(owner, Pubkey::new_unique()).unwrap();
        credit.add(7).unwrap();

        assert_eq!(credit.rent_payer, first_payer);
        assert_eq!(credit.amount, 12);
        assert_lottery_error(
            credit.open(Pubkey::new_unique(), first_payer),
            LotteryError::WinnerMismatch,
        );
    }

    #[test]
    fn test_take_is_exactly_once() {
        let mut credit = Credit::default();
        credit.open(Pubkey::new_unique(), Pubkey::new_unique()).unwrap();
        credit.add(10).unwrap();

        assert_eq!(credit.take().unwrap(), 10);
        assert_eq!(credit.amount, 0);
        assert_lottery_error(credit.take(), LotteryError::NothingToWithdraw);
    }

    #[test]
    fn test_add_is_checked() {
        let mut credit = Credit {
            amount: u64::MAX,
            ..Credit::default()
        };
        assert_lottery_error(credit.add(1), LotteryError::Overflow);
    }
}
