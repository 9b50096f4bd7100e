use anchor_lang::prelude::*;

use crate::{
    constants::{FEE_PERCENT, PERCENT_DENOMINATOR, PRIZE_PERCENT, SERVICE_PERCENT},
    error::LotteryError,
};

/// Division of a round's collected value. Each share is truncated on its own;
/// `remainder` is what truncation left over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PotSplit {
    pub prize: u64,
    pub fee: u64,
    pub service: u64,
    pub remainder: u64,
}

impl PotSplit {
    pub fn from_collected(total: u64) -> Result<Self> {
        let prize = percent_of(total, PRIZE_PERCENT)?;
        let fee = percent_of(total, FEE_PERCENT)?;
        let service = percent_of(total, SERVICE_PERCENT)?;
        let remainder = total
            .checked_sub(prize)
            .and_then(|rest| rest.checked_sub(fee))
            .and_then(|rest| rest.checked_sub(service))
            .ok_or(LotteryError::Overflow)?;

        Ok(Self {
            prize,
            fee,
            service,
            remainder,
        })
    }

    /// Everything that lands in the fee pool
    pub fn fee_with_remainder(&self) -> Result<u64> {
        Ok(self
            .fee
            .checked_add(self.remainder)
            .ok_or(LotteryError::Overflow)?)
    }
}

fn percent_of(total: u64, percent: u64) -> Result<u64> {
    let share = (total as u128)
        .checked_mul(percent as u128)
        .ok_or(LotteryError::Overflow)?
        / PERCENT_DENOMINATOR as u128;
    u64::try_from(share).map_err(|_| LotteryError::Overflow.into())
}
