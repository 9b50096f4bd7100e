use anchor_lang::error_code;

#[error_code]
pub enum LotteryError {
    Overflow,
    #[msg("Entries per purchase must be between 1 and 5")]
    InvalidAmount,
    #[msg("Attached value must equal entries times the entry price")]
    InsufficientValue,
    #[msg("Round is not eligible for a refund")]
    CannotRefund,
    #[msg("Round is not eligible for winner selection")]
    CannotSelectWinner,
    #[msg("No balance to withdraw")]
    NothingToWithdraw,
    #[msg("Conversion service rejected the amount")]
    ConversionRejected,
    #[msg("Round id does not match the round accepting entries")]
    RoundMismatch,
    #[msg("Round no longer accepts entries")]
    RoundNotOpen,
    #[msg("Round has reached its maximum number of purchases")]
    RoundFull,
    #[msg("Vault transfer failed")]
    TransferFailed,
    #[msg("No fresh randomness is available for this round")]
    RandomnessUnavailable,
    #[msg("Only the randomness authority may publish randomness")]
    NotRandomnessAuthority,
    #[msg("Conversion accounts do not match the configuration")]
    InvalidConversionAccounts,
    #[msg("Entry price must be greater than zero")]
    InvalidEntryPrice,
    #[msg("Round interval must be greater than zero")]
    InvalidInterval,
    #[msg("Unique account threshold must be at least one")]
    InvalidThreshold,
    #[msg("Slot is outside the round's entries")]
    SlotOutOfRange,
    #[msg("Credit account does not belong to the drawn winner")]
    WinnerMismatch,
    #[msg("Caller credit account is missing or not allowed")]
    InvalidCreditAccount,
}

#[cfg(test)]
pub(crate) fn assert_lottery_error<T: std::fmt::Debug>(
    result: anchor_lang::Result<T>,
    expected: LotteryError,
) {
    let err = result.expect_err("operation should have failed");
    assert_eq!(err, anchor_lang::error::Error::from(expected));
}
