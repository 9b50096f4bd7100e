use anchor_lang::prelude::*;
use arrayref::array_ref;

use crate::{error::LotteryError, state::RandomnessFeed};

/// A source of unpredictable values, one per draw.
pub trait RandomnessSource {
    fn next_u64(&mut self) -> Result<u64>;
}

/// Draws from the on-chain feed, refusing values published before the round closed.
pub struct FeedRandomness<'a> {
    feed: &'a mut RandomnessFeed,
    not_before: i64,
}

impl<'a> FeedRandomness<'a> {
    pub fn new(feed: &'a mut RandomnessFeed, not_before: i64) -> Self {
        Self { feed, not_before }
    }
}

impl RandomnessSource for FeedRandomness<'_> {
    fn next_u64(&mut self) -> Result<u64> {
        self.feed.consume(self.not_before)
    }
}

/// Folds a 32-byte value and a salt into one u64.
pub fn fold_entropy(value: &[u8; 32], salt: u64) -> u64 {
    let mut folded = salt;
    for offset in [0, 8, 16, 24] {
        let chunk = u64::from_le_bytes(*array_ref![value, offset, 8]);
        folded = mix(folded, chunk);
    }
    folded
}

/// splitmix64 finaliser: every input bit flips each output bit with ~50% probability.
pub fn mix(a: u64, b: u64) -> u64 {
    let mut z = a.wrapping_add(b);

    z = (z ^ (z >> 30)).wrapping_mul(0xbf58476d1ce4e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d049bb133111eb);
    z ^ (z >> 31)
}

/// Maps `x` into `[0, range)`.
///
/// Powers of two are masked. Larger ranges use rejection sampling against the last
/// partial bucket, remixing a bounded number of times before falling back to modulo.
pub fn unbiased_range(x: u64, range: u64) -> Result<u64> {
    require!(range > 0, LotteryError::SlotOutOfRange);

    if range.is_power_of_two() {
        return Ok(x & (range - 1));
    }

    // bias is below 2^-56 here
    if range <= 256 {
        return Ok(x % range);
    }

    let threshold = u64::MAX - (u64::MAX % range);
    let mut value = x;

    const MAX_ATTEMPTS: u8 = 3;

    for i in 0..MAX_ATTEMPTS {
        // If value is below threshold, we can use modulo safely
        if value < threshold {
            return Ok(value % range);
        }
        value = mix(value, value.wrapping_add(u64::from(i) + 1));
    }

    // Fallback case - the bias is minimal after the mixing operations
    Ok(value % range)
}

#[cfg(test)]
pub(crate) struct FixedRandomness(pub u64);

#[cfg(test)]
impl RandomnessSource for FixedRandomness {
    fn next_u64(&mut self) -> Result<u64> {
        Ok(self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::assert_lottery_error;

    #[test]
    fn test_mix_is_deterministic_and_spreads() {
        assert_eq!(mix(1, 2), mix(1, 2));
        assert_ne!(mix(1, 2), mix(1, 3));
        assert_ne!(fold_entropy(&[0; 32], 1), fold_entropy(&[0; 32], 2));
        let mut value = [0u8; 32];
        value[31] = 1;
        assert_ne!(fold_entropy(&value, 1), fold_entropy(&[0; 32], 1));
    }

    #[test]
    fn test_unbiased_range_stays_in_bounds() {
        for range in [1u64, 2, 6, 7, 30, 256, 257, 1_000, 1 << 20] {
            for x in [0u64, 1, 5, 255, 12_345, u64::MAX - 1, u64::MAX] {
                assert!(unbiased_range(x, range).unwrap() < range);
            }
        }
    }

    #[test]
    fn test_unbiased_range_small_ranges_use_modulo() {
        assert_eq!(unbiased_range(13, 6).unwrap(), 1);
        assert_eq!(unbiased_range(13, 8).unwrap(), 5);
        assert_eq!(unbiased_range(u64::MAX, 1).unwrap(), 0);
    }

    #[test]
    fn test_unbiased_range_rejects_empty_range() {
        assert_lottery_error(unbiased_range(1, 0), LotteryError::SlotOutOfRange);
    }

    #[test]
    fn test_every_slot_is_reachable() {
        let range = 6;
        let mut seen = [false; 6];
        for seed in 0..200u64 {
            let slot = unbiased_range(mix(seed, 0), range).unwrap();
            seen[slot as usize] = true;
        }
        assert!(seen.iter().all(|hit| *hit));
    }
}
