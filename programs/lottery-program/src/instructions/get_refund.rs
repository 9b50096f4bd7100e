use anchor_lang::prelude::*;

use crate::{
    constants::{CONFIG_SEED, ROUND_SEED, VAULT_SEED},
    state::{Config, Round, Vault},
};

/// Event emitted when a depositor is refunded from an invalid round
#[event]
pub struct RoundRefunded {
    pub round_id: u64,
    pub account: Pubkey,
    /// Lamports returned
    pub amount: u64,
}

/// Instruction to reclaim deposits from a round that expired below the unique account threshold
///
/// # Security Considerations
/// 1. The round must have started, its interval must have elapsed and the threshold must be unmet
/// 2. The round must be neither closed nor already refunded
/// 3. The signer must hold entries in the round
/// 4. The round is flagged refunded before lamports leave the vault
///
/// # Implementation Notes
/// - Returns exactly `entries * entry_price` to the signer
/// - The refunded flag is round-wide: once set, every later refund of the round fails
/// - Lamports move directly between the vault PDA and the signer, never through the ledger
pub fn get_refund(ctx: Context<GetRefund>, round_id: u64) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let signer = ctx.accounts.signer.key();

    let amount = ctx
        .accounts
        .round
        .refund(&signer, &ctx.accounts.config, now)?;

    // The vault is a PDA owned by this program, so lamports can be moved directly.
    ctx.accounts.vault.sub_lamports(amount)?;
    ctx.accounts.signer.add_lamports(amount)?;

    msg!("Refunded {} lamports from round {}", amount, round_id);
    emit!(RoundRefunded {
        round_id,
        account: signer,
        amount,
    });

    Ok(())
}

#[derive(Accounts)]
#[instruction(round_id: u64)]
pub struct GetRefund<'info> {
    #[account(
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
        seeds = [VAULT_SEED],
        bump = vault.bump,
    )]
    pub vault: Account<'info, Vault>,

    #[account(mut)]
    pub signer: Signer<'info>,
}
