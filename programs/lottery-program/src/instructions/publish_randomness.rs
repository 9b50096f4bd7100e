use anchor_lang::prelude::*;

use crate::{
    constants::{CONFIG_SEED, RANDOMNESS_SEED},
    error::LotteryError,
    state::{Config, RandomnessFeed},
};

/// Event emitted when fresh randomness becomes available
#[event]
pub struct RandomnessPublished {
    pub published_at: i64,
}

/// Instruction for the randomness authority to publish a single-use 32-byte value.
///
/// An unconsumed value is replaced. A draw only accepts a value published at or after the
/// round's end, so an early publication has to be superseded for the round to be drawn.
pub fn publish_randomness(ctx: Context<PublishRandomness>, value: [u8; 32]) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let feed = &mut ctx.accounts.randomness_feed;
    if !feed.consumed {
        msg!("Replacing unconsumed randomness published at {}", feed.published_at);
    }
    feed.publish(value, now);

    emit!(RandomnessPublished { published_at: now });

    Ok(())
}

#[derive(Accounts)]
pub struct PublishRandomness<'info> {
    #[account(
        seeds = [CONFIG_SEED],
        bump = config.bump,
        has_one = randomness_authority @ LotteryError::NotRandomnessAuthority,
    )]
    pub config: Account<'info, Config>,

    #[account(
        mut,
        seeds = [RANDOMNESS_SEED],
        bump = randomness_feed.bump,
    )]
    pub randomness_feed: Account<'info, RandomnessFeed>,

    pub randomness_authority: Signer<'info>,
}
