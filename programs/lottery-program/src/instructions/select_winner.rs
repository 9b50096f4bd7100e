use anchor_lang::prelude::*;

use crate::{
    constants::{CONFIG_SEED, CREDIT_SEED, LEDGER_SEED, RANDOMNESS_SEED, ROUND_SEED},
    error::LotteryError,
    state::{Config, Credit, Ledger, RandomnessFeed, Round, CREDIT_ACCOUNT_SIZE},
    utils::{unbiased_range, FeedRandomness, PotSplit, RandomnessSource},
};

/// Event emitted when a round is closed and its pot distributed
#[event]
#[derive(Debug)]
pub struct WinnerSelected {
    pub round_id: u64,
    pub winner: Pubkey,
    /// Account that triggered the draw and earned the service share
    pub service_provider: Pubkey,
    pub winning_slot: u64,
    pub prize: u64,
    pub fee: u64,
    pub service: u64,
    /// Lamports lost to share truncation, added to the fee pool
    pub remainder: u64,
}

/// Instruction to draw the winner of an expired round and distribute its pot
///
/// # Arguments
/// * `round_id` - The round to close
/// * `winner` - Owner of the winning slot. The published randomness is public, so the caller
///   computes the draw off-chain to pass the winner's credit account; a wrong guess aborts.
///
/// # Security Considerations
/// 1. The round must no longer be current, must have expired and met its threshold
/// 2. The round must be neither closed nor refunded
/// 3. Randomness must have been published at or after the round's end and is consumed here
/// 4. The drawn winner must match `winner`, which pins the winner's credit PDA
///
/// # Implementation Notes
/// - The winner gets 85% and the caller 1% as credits; 14% plus any truncation remainder
///   goes to the fee pool
/// - The caller pays rent for credit accounts that do not exist yet and is recorded as their
///   rent payer, so the rent comes back when the balance is withdrawn
/// - `caller_credit` is passed only when the caller earns a non-zero share and is not the winner
/// - No lamports move; winners and callers collect through `withdraw`
pub fn select_winner(ctx: Context<SelectWinner>, round_id: u64, winner: Pubkey) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let caller = ctx.accounts.caller.key();

    let not_before = ctx
        .accounts
        .round
        .ends_at(ctx.accounts.config.interval)
        .unwrap_or(i64::MAX);
    let mut randomness = FeedRandomness::new(&mut ctx.accounts.randomness_feed, not_before);

    let outcome = settle_round(
        &mut ctx.accounts.config,
        &mut ctx.accounts.round,
        &mut ctx.accounts.ledger,
        caller,
        &mut randomness,
        now,
    )?;
    require_keys_eq!(outcome.winner, winner, LotteryError::WinnerMismatch);

    credit_shares(
        &outcome,
        &mut ctx.accounts.winner_credit,
        ctx.accounts.caller_credit.as_deref_mut(),
    )?;

    msg!(
        "Round {} won by {} with slot {}",
        round_id,
        outcome.winner,
        outcome.winning_slot
    );
    emit!(outcome);

    Ok(())
}

/// Closes `round`, picking its winning slot from `randomness`. The fee share and remainder go
/// to the fee pool; the returned outcome carries the prize and service shares still to credit.
pub fn settle_round(
    config: &mut Config,
    round: &mut Round,
    ledger: &mut Ledger,
    service_provider: Pubkey,
    randomness: &mut impl RandomnessSource,
    now: i64,
) -> Result<WinnerSelected> {
    round.ensure_drawable(config, now)?;

    let split = PotSplit::from_collected(round.total_collected)?;
    let winning_slot = unbiased_range(randomness.next_u64()?, round.total_entries)?;
    let winner = round
        .owner_of_slot(winning_slot)
        .ok_or(LotteryError::SlotOutOfRange)?;

    ledger.accrue_fees(split.fee_with_remainder()?)?;

    round.close(winner, winning_slot);
    config.advance_past(round.round_id)?;

    Ok(WinnerSelected {
        round_id: round.round_id,
        winner,
        service_provider,
        winning_slot,
        prize: split.prize,
        fee: split.fee,
        service: split.service,
        remainder: split.remainder,
    })
}

/// Credits the prize to the winner and the service share to the caller.
///
/// A caller who won takes both shares on the winner's account and must not pass a second
/// one. A zero service share needs no caller account.
pub fn credit_shares(
    outcome: &WinnerSelected,
    winner_credit: &mut Credit,
    caller_credit: Option<&mut Credit>,
) -> Result<()> {
    let caller = outcome.service_provider;

    winner_credit.open(outcome.winner, caller)?;
    winner_credit.add(outcome.prize)?;

    if caller == outcome.winner {
        require!(caller_credit.is_none(), LotteryError::InvalidCreditAccount);
        return winner_credit.add(outcome.service);
    }

    match caller_credit {
        Some(credit) => {
            credit.open(caller, caller)?;
            credit.add(outcome.service)
        }
        None => {
            require!(outcome.service == 0, LotteryError::InvalidCreditAccount);
            Ok(())
        }
    }
}

#[derive(Accounts)]
#[instruction(round_id: u64, winner: Pubkey)]
pub struct SelectWinner<'info> {
    #[account(
        mut,
        seeds = [CONFIG_SEED],
        bump = config.bump,
    )]
    pub config: Account<'info, Config>,

    #[account(
        mut,
        seeds = [
            ROUND_SEED,
            round_id.to_le_bytes().as_ref(),
        ],
        bump = round.bump,
    )]
    pub round: Box<Account<'info, Round>>,

    #[account(
        mut,
        seeds = [LEDGER_SEED],
        bump = ledger.bump,
    )]
    pub ledger: Account<'info, Ledger>,

    #[account(
        mut,
        seeds = [RANDOMNESS_SEED],
        bump = randomness_feed.bump,
    )]
    pub randomness_feed: Account<'info, RandomnessFeed>,

    /// Anyone may trigger the draw; they receive the service share
    #[account(mut)]
    pub caller: Signer<'info>,

    #[account(
        init_if_needed,
        payer = caller,
        space = CREDIT_ACCOUNT_SIZE,
        seeds = [CREDIT_SEED, winner.as_ref()],
        bump,
    )]
    pub winner_credit: Account<'info, Credit>,

    #[account(
        init_if_needed,
        payer = caller,
        space = CREDIT_ACCOUNT_SIZE,
        seeds = [CREDIT_SEED, caller.key().as_ref()],
        bump,
    )]
    pub caller_credit: Option<Account<'info, Credit>>,

    pub system_program: Program<'info, System>,
}
