use anchor_lang::prelude::*;

use crate::{
    constants::{CONFIG_SEED, ROUND_SEED},
    error::LotteryError,
    state::{Config, Round},
};

/// Instruction to create the account of the round accepting entries
///
/// # Account Validations
/// * Round - PDA with seeds ["round", round_id], created empty if missing
/// * Payer - Pays rent for the round header only; entry runs are paid by their buyers
///
/// # Implementation Notes
/// - Idempotent, so clients can bundle it ahead of `enter_lottery` in the same transaction
/// - Only the current round can be opened
pub fn open_round(ctx: Context<OpenRound>, round_id: u64) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;

    let opened = open_current_round(
        &ctx.accounts.config,
        &mut ctx.accounts.round,
        round_id,
        ctx.bumps.round,
        now,
    )?;
    if opened {
        msg!("Round {} account opened", round_id);
    }

    Ok(())
}

/// Claims a freshly created round account for `round_id`. Returns false if it was already open.
pub fn open_current_round(
    config: &Config,
    round: &mut Round,
    round_id: u64,
    bump: u8,
    now: i64,
) -> Result<bool> {
    if round.is_initialized() {
        return Ok(false);
    }
    require!(
        round_id == config.effective_round_id(now),
        LotteryError::RoundMismatch
    );
    round.open(round_id, bump);
    Ok(true)
}

#[derive(Accounts)]
#[instruction(round_id: u64)]
pub struct OpenRound<'info> {
    #[account(
        seeds = [CONFIG_SEED],
        bump = config.bump,
    )]
    pub config: Account<'info, Config>,

    #[account(
        init_if_needed,
        payer = payer,
        space = Round::space_for(0),
        seeds = [
            ROUND_SEED,
            round_id.to_le_bytes().as_ref(),
        ],
        bump,
    )]
    pub round: Box<Account<'info, Round>>,

    #[account(mut)]
    pub payer: Signer<'info>,

    pub system_program: Program<'info, System>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::assert_lottery_error, state::test_config};

    const START: i64 = 1_700_000_000;

    #[test]
    fn test_opens_only_the_current_round() {
        let mut config = test_config(1, 300, 6);
        let mut round = Round::default();

        assert_lottery_error(
            open_current_round(&config, &mut round, 2, 254, START),
            LotteryError::RoundMismatch,
        );
        assert!(!round.is_initialized());

        config.mark_round_started(1, START);
        assert!(open_current_round(&config, &mut round, 2, 254, START + 300).unwrap());
        assert_eq!(round.round_id, 2);
        assert_eq!(round.bump, 254);
    }

    #[test]
    fn test_reopening_is_a_no_op() {
        let config = test_config(1, 300, 6);
        let mut round = Round::default();
        open_current_round(&config, &mut round, 1, 254, START).unwrap();
        round
            .record_entries(Pubkey::new_unique(), 1, 1, 1, START)
            .unwrap();

        assert!(!open_current_round(&config, &mut round, 1, 200, START).unwrap());
        assert_eq!(round.bump, 254);
        assert_eq!(round.total_entries, 1);
    }
}
