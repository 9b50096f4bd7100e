use anchor_lang::prelude::*;

use crate::{
    constants::{CONFIG_SEED, LEDGER_SEED, VAULT_SEED},
    error::LotteryError,
    state::{Config, Ledger, Vault},
    utils::{ConversionProgram, ConversionService},
};

/// Event emitted when the fee pool is handed to the conversion service
#[event]
#[derive(Debug)]
pub struct FeesConverted {
    pub beneficiary: Pubkey,
    /// Lamports taken from the fee pool
    pub amount_converted: u64,
    /// Asset units the conversion service reported for the beneficiary
    pub asset_received: u64,
}

/// Instruction to send the whole fee pool through the conversion service for the beneficiary
///
/// # Account Validations
/// 1. Beneficiary, conversion program and deposit account must match the config
/// 2. The conversion program must be executable
///
/// # Security Considerations
/// The pool is zeroed before the external call. An empty pool is rejected by the service,
/// and any failure in the call reverts the zeroing with it.
pub fn convert_fees(ctx: Context<ConvertFees>) -> Result<()> {
    let beneficiary = ctx.accounts.config.beneficiary;

    let program = ctx.accounts.conversion_program.to_account_info();
    let vault = ctx.accounts.vault.to_account_info();
    let deposit = ctx.accounts.conversion_deposit.to_account_info();
    let beneficiary_info = ctx.accounts.beneficiary.to_account_info();
    let mut service = ConversionProgram {
        program: &program,
        vault: &vault,
        deposit: &deposit,
        beneficiary: &beneficiary_info,
    };

    let outcome = rotate_fees(&mut ctx.accounts.ledger, beneficiary, &mut service)?;

    msg!(
        "Converted {} lamports of fees into {} for {}",
        outcome.amount_converted,
        outcome.asset_received,
        beneficiary
    );
    emit!(outcome);

    Ok(())
}

/// Empties the fee pool into `service` on behalf of `beneficiary`.
pub fn rotate_fees(
    ledger: &mut Ledger,
    beneficiary: Pubkey,
    service: &mut impl ConversionService,
) -> Result<FeesConverted> {
    let amount_converted = ledger.take_fee_pool();
    let asset_received = service.convert(amount_converted, &beneficiary)?;

    Ok(FeesConverted {
        beneficiary,
        amount_converted,
        asset_received,
    })
}

#[derive(Accounts)]
pub struct ConvertFees<'info> {
    #[account(
        seeds = [CONFIG_SEED],
        bump = config.bump,
        has_one = beneficiary @ LotteryError::InvalidConversionAccounts,
        has_one = conversion_program @ LotteryError::InvalidConversionAccounts,
        has_one = conversion_deposit @ LotteryError::InvalidConversionAccounts,
    )]
    pub config: Account<'info, Config>,

    #[account(
        mut,
        seeds = [LEDGER_SEED],
        bump = ledger.bump,
    )]
    pub ledger: Box<Account<'info, Ledger>>,

    #[account(
        mut,
        seeds = [VAULT_SEED],
        bump = vault.bump,
    )]
    pub vault: Account<'info, Vault>,

    /// CHECK: pinned by `config.beneficiary`, only forwarded to the conversion program
    pub beneficiary: UncheckedAccount<'info>,

    /// CHECK: pinned by `config.conversion_program`
    #[account(executable)]
    pub conversion_program: UncheckedAccount<'info>,

    /// CHECK: pinned by `config.conversion_deposit`, receives the converted lamports
    #[account(mut)]
    pub conversion_deposit: UncheckedAccount<'info>,

    pub caller: Signer<'info>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::assert_lottery_error, utils::RecordingConversion};

    #[test]
    fn test_pool_is_emptied_into_service() {
        let mut ledger = Ledger::default();
        ledger.accrue_fees(140).unwrap();
        ledger.accrue_fees(1).unwrap();
        let beneficiary = Pubkey::new_unique();
        let mut service = RecordingConversion {
            rate: 2,
            calls: Vec::new(),
        };

        let outcome = rotate_fees(&mut ledger, beneficiary, &mut service).unwrap();

        assert_eq!(outcome.amount_converted, 141);
        assert_eq!(outcome.asset_received, 282);
        assert_eq!(outcome.beneficiary, beneficiary);
        assert_eq!(service.calls, vec![(141, beneficiary)]);
        assert_eq!(ledger.fee_pool, 0);
    }

    #[test]
    fn test_empty_pool_is_rejected() {
        let mut ledger = Ledger::default();
        ledger.accrue_fees(5).unwrap();
        let beneficiary = Pubkey::new_unique();
        let mut service = RecordingConversion {
            rate: 1,
            calls: Vec::new(),
        };

        rotate_fees(&mut ledger, beneficiary, &mut service).unwrap();
        assert_lottery_error(
            rotate_fees(&mut ledger, beneficiary, &mut service),
            LotteryError::ConversionRejected,
        );
        assert_eq!(service.calls.len(), 1);
    }

    #[test]
    fn test_only_the_fee_pool_is_converted() {
        let mut ledger = Ledger::default();
        ledger.accrue_fees(15).unwrap();
        let mut service = RecordingConversion {
            rate: 1,
            calls: Vec::new(),
        };

        let outcome = rotate_fees(&mut ledger, Pubkey::new_unique(), &mut service).unwrap();

        assert_eq!(outcome.amount_converted, 15);
        ledger.accrue_fees(3).unwrap();
        assert_eq!(ledger.fee_pool, 3);
    }
}
