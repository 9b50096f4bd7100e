use anchor_lang::prelude::*;

use crate::{
    constants::{
        CONFIG_SEED, DEFAULT_MIN_UNIQUE_ACCOUNTS, FIRST_ROUND_ID, LEDGER_SEED, RANDOMNESS_SEED,
        VAULT_SEED,
    },
    error::LotteryError,
    state::{
        Config, Ledger, RandomnessFeed, Vault, CONFIG_ACCOUNT_SIZE, LEDGER_ACCOUNT_SIZE,
        RANDOMNESS_FEED_ACCOUNT_SIZE, VAULT_ACCOUNT_SIZE,
    },
};

/// Parameters fixed at deployment
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug)]
pub struct InitializeParams {
    pub entry_price: u64,
    pub interval: i64,
    /// Falls back to `DEFAULT_MIN_UNIQUE_ACCOUNTS` when omitted
    pub min_unique_accounts: Option<u32>,
    pub beneficiary: Pubkey,
    pub randomness_authority: Pubkey,
    pub conversion_program: Pubkey,
    pub conversion_deposit: Pubkey,
}

impl InitializeParams {
    /// Checks the parameters and returns the effective unique account threshold.
    pub fn validate(&self) -> Result<u32> {
        require!(self.entry_price > 0, LotteryError::InvalidEntryPrice);
        require!(self.interval > 0, LotteryError::InvalidInterval);
        let min_unique_accounts = self
            .min_unique_accounts
            .unwrap_or(DEFAULT_MIN_UNIQUE_ACCOUNTS);
        require!(min_unique_accounts >= 1, LotteryError::InvalidThreshold);
        Ok(min_unique_accounts)
    }
}

/// Instruction to initialize the lottery. Called once by the operator at deployment.
///
/// # Security Considerations
/// - Creates the config, ledger, vault and randomness feed PDAs; none can be created twice
/// - Entry price, interval and threshold are validated and then locked
/// - Beneficiary and conversion accounts are pinned so fee rotation can be triggered by anyone
///
/// # Account Validations
/// * Config - New PDA with seed "config"
/// * Ledger - New PDA with seed "ledger"
/// * Vault - New PDA with seed "vault", holds every deposited lamport
/// * RandomnessFeed - New PDA with seed "randomness", starts with nothing to consume
/// * Operator - Pays for the accounts and is recorded as the operator
pub fn initialize(ctx: Context<Initialize>, params: InitializeParams) -> Result<()> {
    let min_unique_accounts = params.validate()?;

    let config = &mut ctx.accounts.config;
    config.operator = ctx.accounts.operator.key();
    config.beneficiary = params.beneficiary;
    config.randomness_authority = params.randomness_authority;
    config.conversion_program = params.conversion_program;
    config.conversion_deposit = params.conversion_deposit;
    config.entry_price = params.entry_price;
    config.interval = params.interval;
    config.min_unique_accounts = min_unique_accounts;
    config.current_round_id = FIRST_ROUND_ID;
    config.current_round_started_at = 0;
    config.bump = ctx.bumps.config;

    let ledger = &mut ctx.accounts.ledger;
    ledger.fee_pool = 0;
    ledger.bump = ctx.bumps.ledger;

    ctx.accounts.vault.bump = ctx.bumps.vault;

    let feed = &mut ctx.accounts.randomness_feed;
    feed.value = [0; 32];
    feed.published_at = 0;
    feed.consumed = true;
    feed.bump = ctx.bumps.randomness_feed;

    msg!(
        "Lottery initialized: entry price {}, interval {}s, threshold {}",
        params.entry_price,
        params.interval,
        min_unique_accounts
    );

    Ok(())
}

#[derive(Accounts)]
pub struct Initialize<'info> {
    #[account(
        init,
        payer = operator,
        space = CONFIG_ACCOUNT_SIZE,
        seeds = [CONFIG_SEED],
        bump
    )]
    pub config: Account<'info, Config>,

    #[account(
        init,
        payer = operator,
        space = LEDGER_ACCOUNT_SIZE,
        seeds = [LEDGER_SEED],
        bump
    )]
    pub ledger: Box<Account<'info, Ledger>>,

    #[account(
        init,
        payer = operator,
        space = VAULT_ACCOUNT_SIZE,
        seeds = [VAULT_SEED],
        bump
    )]
    pub vault: Account<'info, Vault>,

    #[account(
        init,
        payer = operator,
        space = RANDOMNESS_FEED_ACCOUNT_SIZE,
        seeds = [RANDOMNESS_SEED],
        bump
    )]
    pub randomness_feed: Account<'info, RandomnessFeed>,

    #[account(mut)]
    pub operator: Signer<'info>,

    pub system_program: Program<'info, System>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::assert_lottery_error;

    fn params() -> InitializeParams {
        InitializeParams {
            entry_price: 10_000_000,
            interval: 300,
            min_unique_accounts: None,
            beneficiary: Pubkey::new_unique(),
            randomness_authority: Pubkey::new_unique(),
            conversion_program: Pubkey::new_unique(),
            conversion_deposit: Pubkey::new_unique(),
        }
    }

    #[test]
    fn test_threshold_defaults() {
        assert_eq!(params().validate().unwrap(), DEFAULT_MIN_UNIQUE_ACCOUNTS);

        let custom = InitializeParams {
            min_unique_accounts: Some(2),
            ..params()
        };
        assert_eq!(custom.validate().unwrap(), 2);
    }

    #[test]
    fn test_invalid_params() {
        let free = InitializeParams {
            entry_price: 0,
            ..params()
        };
        assert_lottery_error(free.validate(), LotteryError::InvalidEntryPrice);

        let instant = InitializeParams {
            interval: 0,
            ..params()
        };
        assert_lottery_error(instant.validate(), LotteryError::InvalidInterval);

        let open = InitializeParams {
            min_unique_accounts: Some(0),
            ..params()
        };
        assert_lottery_error(open.validate(), LotteryError::InvalidThreshold);
    }
}
