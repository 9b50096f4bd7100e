/// PDA seeds
pub const CONFIG_SEED: &[u8] = b"config";
pub const ROUND_SEED: &[u8] = b"round";
pub const LEDGER_SEED: &[u8] = b"ledger";
pub const VAULT_SEED: &[u8] = b"vault";
pub const RANDOMNESS_SEED: &[u8] = b"randomness";
pub const CREDIT_SEED: &[u8] = b"credit";

/// Entry units a single purchase may carry, regardless of what the buyer already holds
pub const MIN_ENTRIES_PER_CALL: u64 = 1;
pub const MAX_ENTRIES_PER_CALL: u64 = 5;

/// Distinct accounts a round needs before it can be drawn instead of refunded
pub const DEFAULT_MIN_UNIQUE_ACCOUNTS: u32 = 6;

/// Pot split, in percent of the round's collected value
pub const PRIZE_PERCENT: u64 = 85;
pub const FEE_PERCENT: u64 = 14;
pub const SERVICE_PERCENT: u64 = 1;
pub const PERCENT_DENOMINATOR: u64 = 100;

/// Purchases (runs of consecutive slots) a round account can hold
pub const MAX_ENTRY_RUNS: usize = 200;

/// Rounds are numbered from here
pub const FIRST_ROUND_ID: u64 = 1;
