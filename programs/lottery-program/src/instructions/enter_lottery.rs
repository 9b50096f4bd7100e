use anchor_lang::{prelude::*, system_program};

use crate::{
    constants::{CONFIG_SEED, ROUND_SEED, VAULT_SEED},
    error::LotteryError,
    state::{check_purchase, Config, EntryReceipt, Round, Vault},
};

/// Event emitted on a round's first accepted entry
#[event]
pub struct RoundActivated {
    pub round_id: u64,
    pub start_timestamp: i64,
}

/// Event emitted when entries are purchased
#[event]
pub struct EntriesPurchased {
    pub round_id: u64,
    pub buyer: Pubkey,
    /// Number of entry units purchased
    pub entries: u64,
    /// Lamports paid
    pub amount: u64,
    /// First slot index owned by this purchase
    pub first_slot: u64,
}

/// Instruction to buy `entries` units of the current round for exactly `amount` lamports
///
/// # Arguments
/// * `round_id` - The round the buyer expects to be accepting entries
/// * `entries` - Entry units to buy, 1 to 5 per call
/// * `amount` - Lamports attached, must equal `entries * entry_price`
///
/// # Security Considerations
/// 1. Entry count and attached value are validated before anything else
/// 2. An expired current round is rolled over first, so late buyers land in the next round
/// 3. Round state is updated before the transfer, and the vault delta is verified after it
///
/// # Rent
/// The round account must already exist (see `open_round`). A purchase that starts a new entry
/// run grows the account by one run at the buyer's expense; extending one's own last run is free.
pub fn enter_lottery(
    ctx: Context<EnterLottery>,
    round_id: u64,
    entries: u64,
    amount: u64,
) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let buyer = ctx.accounts.buyer.key();

    let receipt = record_purchase(
        &mut ctx.accounts.config,
        &mut ctx.accounts.round,
        round_id,
        buyer,
        entries,
        amount,
        now,
    )?;
    if receipt.activated {
        msg!("Round {} activated at {}", round_id, now);
        emit!(RoundActivated {
            round_id,
            start_timestamp: now,
        });
    }

    let pre_transfer_balance = ctx.accounts.vault.to_account_info().lamports();

    system_program::transfer(
        CpiContext::new(
            ctx.accounts.system_program.to_account_info(),
            system_program::Transfer {
                from: ctx.accounts.buyer.to_account_info(),
                to: ctx.accounts.vault.to_account_info(),
            },
        ),
        receipt.amount,
    )?;

    let post_transfer_balance = ctx.accounts.vault.to_account_info().lamports();
    require!(
        post_transfer_balance
            == pre_transfer_balance
                .checked_add(receipt.amount)
                .ok_or(LotteryError::Overflow)?,
        LotteryError::TransferFailed
    );

    emit!(EntriesPurchased {
        round_id,
        buyer,
        entries,
        amount: receipt.amount,
        first_slot: receipt.first_slot,
    });

    Ok(())
}

/// Validates and books a purchase into `round`, rolling the current round over first.
pub fn record_purchase(
    config: &mut Config,
    round: &mut Round,
    round_id: u64,
    buyer: Pubkey,
    entries: u64,
    amount: u64,
    now: i64,
) -> Result<EntryReceipt> {
    check_purchase(entries, config.entry_price, amount)?;

    let current_round_id = config.roll_over(now);
    require!(round_id == current_round_id, LotteryError::RoundMismatch);

    let receipt = round.record_entries(buyer, entries, config.entry_price, amount, now)?;
    if receipt.activated {
        config.mark_round_started(round_id, now);
    }
    Ok(receipt)
}

#[derive(Accounts)]
#[instruction(round_id: u64)]
pub struct EnterLottery<'info> {
    #[account(
        mut,
        seeds = [CONFIG_SEED],
        bump = config.bump,
    )]
    pub config: Account<'info, Config>,

    #[account(mut)]
    pub buyer: Signer<'info>,

    /// Round accepting entries, grown by one run when this purchase opens a new one
    #[account(
        mut,
        seeds = [
            ROUND_SEED,
            round_id.to_le_bytes().as_ref(),
        ],
        bump = round.bump,
        realloc = round.space_after_purchase(&buyer.key()),
        realloc::payer = buyer,
        realloc::zero = false,
    )]
    pub round: Box<Account<'info, Round>>,

    #[account(
        mut,
        seeds = [VAULT_SEED],
        bump = vault.bump,
    )]
    pub vault: Account<'info, Vault>,

    pub system_program: Program<'info, System>,
}
