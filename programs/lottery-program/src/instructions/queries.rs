use anchor_lang::prelude::*;

use crate::{
    constants::{CONFIG_SEED, CREDIT_SEED, LEDGER_SEED, ROUND_SEED},
    error::LotteryError,
    state::{Config, Credit, Ledger, Round},
};

/// Round accepting entries right now, including a rollover not yet written to storage
pub fn current_round_id(ctx: Context<ReadConfig>) -> Result<u64> {
    let now = Clock::get()?.unix_timestamp;
    Ok(ctx.accounts.config.effective_round_id(now))
}

pub fn slot_owner(ctx: Context<ReadRound>, _round_id: u64, slot: u64) -> Result<Pubkey> {
    Ok(ctx
        .accounts
        .round
        .owner_of_slot(slot)
        .ok_or(LotteryError::SlotOutOfRange)?)
}

/// Unclaimed credit of `account`; zero when it has no credit account
pub fn balance_of(ctx: Context<ReadCredit>, _account: Pubkey) -> Result<u64> {
    Ok(load::<Credit>(&ctx.accounts.credit)?.map_or(0, |credit| credit.amount))
}

pub fn fee_pool(ctx: Context<ReadLedger>) -> Result<u64> {
    Ok(ctx.accounts.ledger.fee_pool)
}

/// Whether `select_winner` would accept `round_id` now, randomness aside
pub fn can_select_winner(ctx: Context<ReadRoundState>, _round_id: u64) -> Result<bool> {
    let now = Clock::get()?.unix_timestamp;
    let round = load::<Round>(&ctx.accounts.round)?;
    Ok(is_drawable(round.as_ref(), &ctx.accounts.config, now))
}

/// Whether participants of `round_id` could claim a refund now
pub fn can_refund(ctx: Context<ReadRoundState>, _round_id: u64) -> Result<bool> {
    let now = Clock::get()?.unix_timestamp;
    let round = load::<Round>(&ctx.accounts.round)?;
    Ok(is_refundable(round.as_ref(), &ctx.accounts.config, now))
}

fn is_drawable(round: Option<&Round>, config: &Config, now: i64) -> bool {
    round.is_some_and(|round| round.ensure_drawable(config, now).is_ok())
}

fn is_refundable(round: Option<&Round>, config: &Config, now: i64) -> bool {
    round.is_some_and(|round| round.ensure_refundable(config, now).is_ok())
}

/// Deserializes a PDA that may not have been created yet.
fn load<T: AccountDeserialize>(info: &AccountInfo) -> Result<Option<T>> {
    if info.data_is_empty() {
        return Ok(None);
    }
    let data = info.try_borrow_data()?;
    Ok(Some(T::try_deserialize(&mut &data[..])?))
}

#[derive(Accounts)]
pub struct ReadConfig<'info> {
    #[account(
        seeds = [CONFIG_SEED],
        bump = config.bump,
    )]
    pub config: Account<'info, Config>,
}

#[derive(Accounts)]
#[instruction(round_id: u64)]
pub struct ReadRound<'info> {
    #[account(
        seeds = [
            ROUND_SEED,
            round_id.to_le_bytes().as_ref(),
        ],
        bump = round.bump,
    )]
    pub round: Box<Account<'info, Round>>,
}

#[derive(Accounts)]
#[instruction(round_id: u64)]
pub struct ReadRoundState<'info> {
    #[account(
        seeds = [CONFIG_SEED],
        bump = config.bump,
    )]
    pub config: Account<'info, Config>,

    /// CHECK: round PDA, possibly not created yet; deserialized by the handler
    #[account(
        seeds = [
            ROUND_SEED,
            round_id.to_le_bytes().as_ref(),
        ],
        bump,
    )]
    pub round: UncheckedAccount<'info>,
}

#[derive(Accounts)]
#[instruction(account: Pubkey)]
pub struct ReadCredit<'info> {
    /// CHECK: credit PDA of `account`, absent until its first share
    #[account(
        seeds = [CREDIT_SEED, account.as_ref()],
        bump,
    )]
    pub credit: UncheckedAccount<'info>,
}

#[derive(Accounts)]
pub struct ReadLedger<'info> {
    #[account(
        seeds = [LEDGER_SEED],
        bump = ledger.bump,
    )]
    pub ledger: Box<Account<'info, Ledger>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::test_config;

    const START: i64 = 1_700_000_000;

    fn round_with(config: &mut Config, accounts: usize) -> Round {
        let mut round = Round::default();
        round.open(1, 254);
        for _ in 0..accounts {
            round
                .record_entries(Pubkey::new_unique(), 1, 1, 1, START)
                .unwrap();
        }
        config.mark_round_started(1, START);
        round
    }

    #[test]
    fn test_missing_round_is_neither_drawable_nor_refundable() {
        let config = test_config(1, 300, 6);
        assert!(!is_drawable(None, &config, START + 300));
        assert!(!is_refundable(None, &config, START + 300));
    }

    #[test]
    fn test_expired_round_is_drawable_or_refundable() {
        let mut config = test_config(1, 300, 6);
        let mut valid = round_with(&mut config, 6);
        let invalid = round_with(&mut config, 5);

        assert!(!is_drawable(Some(&valid), &config, START + 299));
        assert!(!is_refundable(Some(&invalid), &config, START + 299));

        assert!(is_drawable(Some(&valid), &config, START + 300));
        assert!(!is_refundable(Some(&valid), &config, START + 300));
        assert!(is_refundable(Some(&invalid), &config, START + 300));
        assert!(!is_drawable(Some(&invalid), &config, START + 300));

        valid.close(Pubkey::new_unique(), 0);
        assert!(!is_drawable(Some(&valid), &config, START + 300));
    }

    #[test]
    fn test_missing_account_loads_as_none() {
        let key = Pubkey::new_unique();
        let owner = crate::ID;
        let mut lamports = 0;
        let mut data: Vec<u8> = Vec::new();
        let info = AccountInfo::new(&key, false, false, &mut lamports, &mut data, &owner, false, 0);

        assert!(load::<Credit>(&info).unwrap().is_none());
    }

    #[test]
    fn test_credit_account_loads_its_balance() {
        let credit = Credit {
            owner: Pubkey::new_unique(),
            amount: 42,
            rent_payer: Pubkey::new_unique(),
        };
        let mut data = Vec::new();
        credit.try_serialize(&mut data).unwrap();

        let key = Pubkey::new_unique();
        let owner = crate::ID;
        let mut lamports = 1;
        let info = AccountInfo::new(&key, false, false, &mut lamports, &mut data, &owner, false, 0);

        assert_eq!(load::<Credit>(&info).unwrap().unwrap().amount, 42);
    }
}
