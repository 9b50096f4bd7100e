use anchor_lang::prelude::*;

// 8 discriminator, 1 bump
pub const VAULT_ACCOUNT_SIZE: usize = 8 + 1;

/// Program-owned account holding every deposited lamport until it is refunded,
/// withdrawn from the ledger or rotated out as fees.
#[account]
pub struct Vault {
    pub bump: u8,
}
