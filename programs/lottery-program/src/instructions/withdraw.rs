use anchor_lang::prelude::*;

use crate::{
    constants::{CREDIT_SEED, VAULT_SEED},
    state::{Credit, Vault},
};

/// Event emitted when a credit balance is paid out
#[event]
pub struct Withdrawn {
    pub account: Pubkey,
    /// Lamports paid
    pub amount: u64,
}

/// Instruction to withdraw the signer's whole credit balance
///
/// # Security Considerations
/// The balance is taken from the credit account before any lamports move, and the account is
/// closed back to its rent payer, so a repeated call fails account validation.
pub fn withdraw(ctx: Context<Withdraw>) -> Result<()> {
    let account = ctx.accounts.signer.key();
    let amount = ctx.accounts.credit.take()?;

    ctx.accounts.vault.sub_lamports(amount)?;
    ctx.accounts.signer.add_lamports(amount)?;

    emit!(Withdrawn { account, amount });

    Ok(())
}

#[derive(Accounts)]
pub struct Withdraw<'info> {
    #[account(
        mut,
        seeds = [CREDIT_SEED, signer.key().as_ref()],
        bump,
        has_one = rent_payer,
        close = rent_payer,
    )]
    pub credit: Account<'info, Credit>,

    /// CHECK: pinned by `credit.rent_payer`, receives the credit account's rent
    #[account(mut)]
    pub rent_payer: UncheckedAccount<'info>,

    #[account(
        mut,
        seeds = [VAULT_SEED],
        bump = vault.bump,
    )]
    pub vault: Account<'info, Vault>,

    #[account(mut)]
    pub signer: Signer<'info>,
}
