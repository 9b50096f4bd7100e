use anchor_lang::{
    prelude::*,
    solana_program::{
        hash::hash,
        instruction::{AccountMeta, Instruction},
        program::{get_return_data, invoke},
    },
};
use arrayref::array_ref;

use crate::error::LotteryError;

/// External service that swaps lamports for a yield-bearing asset on behalf of a beneficiary.
pub trait ConversionService {
    /// Converts `amount` lamports and returns how much of the asset `beneficiary` received.
    fn convert(&mut self, amount: u64, beneficiary: &Pubkey) -> Result<u64>;
}

/// CPI adapter for the configured conversion program.
///
/// Lamports move from the vault to the pinned deposit account, then the program's `convert`
/// instruction is invoked with `[amount: u64 LE, beneficiary: Pubkey]` and must answer with
/// the converted amount as a u64 in its return data.
pub struct ConversionProgram<'a, 'info> {
    pub program: &'a AccountInfo<'info>,
    pub vault: &'a AccountInfo<'info>,
    pub deposit: &'a AccountInfo<'info>,
    pub beneficiary: &'a AccountInfo<'info>,
}

impl ConversionProgram<'_, '_> {
    fn instruction_data(amount: u64, beneficiary: &Pubkey) -> Vec<u8> {
        let mut data = Vec::with_capacity(8 + 8 + 32);
        data.extend_from_slice(&hash(b"global:convert").to_bytes()[..8]);
        data.extend_from_slice(&amount.to_le_bytes());
        data.extend_from_slice(beneficiary.as_ref());
        data
    }
}

impl ConversionService for ConversionProgram<'_, '_> {
    fn convert(&mut self, amount: u64, beneficiary: &Pubkey) -> Result<u64> {
        require!(amount > 0, LotteryError::ConversionRejected);

        self.vault.sub_lamports(amount)?;
        self.deposit.add_lamports(amount)?;

        let ix = Instruction {
            program_id: self.program.key(),
            accounts: vec![
                AccountMeta::new(self.deposit.key(), false),
                AccountMeta::new_readonly(*beneficiary, false),
                AccountMeta::new_readonly(self.vault.key(), false),
            ],
            data: Self::instruction_data(amount, beneficiary),
        };
        invoke(
            &ix,
            &[
                self.deposit.clone(),
                self.beneficiary.clone(),
                self.vault.clone(),
                self.program.clone(),
            ],
        )?;

        let (program_id, data) = get_return_data().ok_or(LotteryError::ConversionRejected)?;
        require_keys_eq!(
            program_id,
            self.program.key(),
            LotteryError::ConversionRejected
        );
        require!(data.len() >= 8, LotteryError::ConversionRejected);

        Ok(u64::from_le_bytes(*array_ref![data, 0, 8]))
    }
}

#[cfg(test)]
pub(crate) struct RecordingConversion {
    pub rate: u64,
    pub calls: Vec<(u64, Pubkey)>,
}

#[cfg(test)]
impl ConversionService for RecordingConversion {
    fn convert(&mut self, amount: u64, beneficiary: &Pubkey) -> Result<u64> {
        require!(amount > 0, LotteryError::ConversionRejected);
        self.calls.push((amount, *beneficiary));
        Ok(amount * self.rate)
    }
}
